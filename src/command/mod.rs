//! Packed command values
//!
//! A [`Command`] is the unit routed by the dispatch core: a base code that
//! identifies the action plus modifier bits that carry arguments. It is a
//! plain `Copy` value; creating one never allocates.

pub mod codes;

use std::fmt;
use std::str::FromStr;

use codes::{BRL_MSK_ARG, BRL_MSK_BLK, BRL_MSK_CMD, BRL_MSK_FLG, EOF};

/// A command code with its modifier bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Command(i32);

impl Command {
    /// The "no command" sentinel
    pub const NONE: Command = Command(EOF);

    pub const NOOP: Command = Command(codes::BRL_CMD_NOOP);
    pub const LNUP: Command = Command(codes::BRL_CMD_LNUP);
    pub const LNDN: Command = Command(codes::BRL_CMD_LNDN);
    pub const PRDIFLN: Command = Command(codes::BRL_CMD_PRDIFLN);
    pub const NXDIFLN: Command = Command(codes::BRL_CMD_NXDIFLN);

    /// Wrap a raw integer as produced by a driver or key table
    pub const fn from_raw(value: i32) -> Self {
        Command(value)
    }

    /// Build a block command with an argument byte
    pub const fn block_with_argument(block: i32, argument: u8) -> Self {
        Command((block & BRL_MSK_BLK) | argument as i32)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == EOF
    }

    /// The masked portion that identifies the action
    pub const fn base(self) -> i32 {
        self.0 & BRL_MSK_CMD
    }

    /// Block byte; zero for simple commands
    pub const fn block(self) -> i32 {
        self.0 & BRL_MSK_BLK
    }

    pub const fn is_block(self) -> bool {
        self.block() != 0
    }

    /// Argument byte of a block command
    pub const fn argument(self) -> u8 {
        (self.0 & BRL_MSK_ARG) as u8
    }

    /// Everything outside the base code
    pub const fn modifiers(self) -> i32 {
        self.0 & !BRL_MSK_CMD
    }

    pub const fn flags(self) -> i32 {
        self.0 & BRL_MSK_FLG
    }

    pub const fn has_flags(self, flags: i32) -> bool {
        self.0 & flags == flags
    }

    pub const fn with_flags(self, flags: i32) -> Self {
        Command(self.0 | (flags & BRL_MSK_FLG))
    }

    /// Replace the base code, keeping every modifier bit
    pub const fn with_base(self, base: i32) -> Self {
        Command((base & BRL_MSK_CMD) | self.modifiers())
    }

    /// Name of the base code, if it is a known command
    pub fn name(self) -> Option<&'static str> {
        if self.is_none() {
            return None;
        }
        codes::find_entry(self.base()).map(|e| e.name)
    }

    /// Human-readable description of the base code
    pub fn description(self) -> Option<&'static str> {
        if self.is_none() {
            return None;
        }
        codes::find_entry(self.base()).map(|e| e.description)
    }
}

impl Default for Command {
    fn default() -> Self {
        Command::NOOP
    }
}

impl From<i32> for Command {
    fn from(value: i32) -> Self {
        Command(value)
    }
}

/// Formats as `NAME`, `NAME+ARG`, and appends any flag names,
/// e.g. `ROUTE+12` or `SKPIDLNS on`
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "EOF");
        }

        match self.name() {
            Some(name) if self.is_block() => write!(f, "{}+{}", name, self.argument())?,
            Some(name) => write!(f, "{}", name)?,
            None => write!(f, "{:04X}", self.base())?,
        }

        if self.has_flags(codes::BRL_FLG_TOGGLE_ON) {
            write!(f, " on")?;
        } else if self.has_flags(codes::BRL_FLG_TOGGLE_OFF) {
            write!(f, " off")?;
        }
        if self.has_flags(codes::BRL_FLG_MOTION_ROUTE) {
            write!(f, " route")?;
        }
        Ok(())
    }
}

/// Error returned when a command name can't be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(pub String);

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid command: {}", self.0)
    }
}

impl std::error::Error for ParseCommandError {}

/// Parses `NAME` or `NAME+ARG` (block commands only)
impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, argument) = match s.split_once('+') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };

        let entry =
            codes::find_entry_by_name(name).ok_or_else(|| ParseCommandError(s.to_string()))?;

        match argument {
            None => Ok(Command(entry.code)),
            Some(arg) if entry.code & BRL_MSK_BLK != 0 => {
                let arg: u8 = arg
                    .trim()
                    .parse()
                    .map_err(|_| ParseCommandError(s.to_string()))?;
                Ok(Command::block_with_argument(entry.code, arg))
            }
            Some(_) => Err(ParseCommandError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::codes::*;
    use super::*;

    #[test]
    fn test_base_and_modifiers_split() {
        let cmd = Command::from_raw(BRL_CMD_LNUP | BRL_FLG_REPEAT_DELAY);
        assert_eq!(cmd.base(), BRL_CMD_LNUP);
        assert_eq!(cmd.modifiers(), BRL_FLG_REPEAT_DELAY);
        assert!(!cmd.is_block());
    }

    #[test]
    fn test_block_argument() {
        let cmd = Command::block_with_argument(BRL_BLK_ROUTE, 12);
        assert!(cmd.is_block());
        assert_eq!(cmd.block(), BRL_BLK_ROUTE);
        assert_eq!(cmd.argument(), 12);
        assert_eq!(cmd.raw(), 0x010C);
    }

    #[test]
    fn test_with_base_keeps_modifiers() {
        let cmd = Command::LNUP.with_flags(BRL_FLG_TOGGLE_ON | BRL_FLG_REPEAT_INITIAL);
        let swapped = cmd.with_base(BRL_CMD_PRDIFLN);
        assert_eq!(swapped.base(), BRL_CMD_PRDIFLN);
        assert_eq!(swapped.modifiers(), cmd.modifiers());
    }

    #[test]
    fn test_none_sentinel() {
        assert!(Command::NONE.is_none());
        assert!(!Command::NOOP.is_none());
        assert_eq!(Command::NONE.name(), None);
        assert_eq!(Command::NONE.to_string(), "EOF");
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::LNUP.to_string(), "LNUP");
        assert_eq!(
            Command::block_with_argument(BRL_BLK_CUTBEGIN, 3).to_string(),
            "CUTBEGIN+3"
        );
        assert_eq!(
            Command::from_raw(BRL_CMD_SKPIDLNS | BRL_FLG_TOGGLE_ON).to_string(),
            "SKPIDLNS on"
        );
        assert_eq!(Command::from_raw(0x00F0).to_string(), "00F0");
    }

    #[test]
    fn test_parse() {
        assert_eq!("LNDN".parse::<Command>(), Ok(Command::LNDN));
        assert_eq!("nxdifln".parse::<Command>(), Ok(Command::NXDIFLN));
        assert_eq!(
            "ROUTE+7".parse::<Command>(),
            Ok(Command::block_with_argument(BRL_BLK_ROUTE, 7))
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("WARP".parse::<Command>().is_err());
        assert!("LNUP+3".parse::<Command>().is_err());
        assert!("ROUTE+300".parse::<Command>().is_err());
    }
}
