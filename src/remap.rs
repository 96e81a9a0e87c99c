//! Preference-driven command substitution
//!
//! With "skip identical lines" enabled, plain line motion becomes motion to the
//! nearest line with different content, and vice versa, so the same keys keep
//! offering both behaviors.

use crate::command::codes::{BRL_CMD_LNDN, BRL_CMD_LNUP, BRL_CMD_NXDIFLN, BRL_CMD_PRDIFLN};
use crate::command::Command;

/// Swap line motion with differing-line motion when `skip_identical_lines` is set
///
/// Only the base code changes; modifier bits are carried over untouched.
pub fn remap(command: Command, skip_identical_lines: bool) -> Command {
    if !skip_identical_lines {
        return command;
    }

    let base = match command.base() {
        BRL_CMD_LNUP => BRL_CMD_PRDIFLN,
        BRL_CMD_LNDN => BRL_CMD_NXDIFLN,
        BRL_CMD_PRDIFLN => BRL_CMD_LNUP,
        BRL_CMD_NXDIFLN => BRL_CMD_LNDN,
        _ => return command,
    };

    command.with_base(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::codes::{BRL_BLK_ROUTE, BRL_FLG_REPEAT_DELAY, BRL_FLG_REPEAT_INITIAL};

    const LINE_MOTION: [Command; 4] = [
        Command::LNUP,
        Command::LNDN,
        Command::PRDIFLN,
        Command::NXDIFLN,
    ];

    #[test]
    fn test_swaps_pairs_when_enabled() {
        assert_eq!(remap(Command::LNUP, true), Command::PRDIFLN);
        assert_eq!(remap(Command::LNDN, true), Command::NXDIFLN);
        assert_eq!(remap(Command::PRDIFLN, true), Command::LNUP);
        assert_eq!(remap(Command::NXDIFLN, true), Command::LNDN);
    }

    #[test]
    fn test_identity_when_disabled() {
        for command in LINE_MOTION {
            assert_eq!(remap(command, false), command);
        }
        let route = Command::block_with_argument(BRL_BLK_ROUTE, 4);
        assert_eq!(remap(route, false), route);
    }

    #[test]
    fn test_involution_with_fixed_preference() {
        for command in LINE_MOTION {
            assert_eq!(remap(remap(command, true), true), command);
        }
    }

    #[test]
    fn test_other_commands_untouched() {
        let route = Command::block_with_argument(BRL_BLK_ROUTE, 4);
        assert_eq!(remap(route, true), route);
        assert_eq!(remap(Command::NOOP, true), Command::NOOP);
    }

    #[test]
    fn test_modifier_bits_preserved() {
        let flags = BRL_FLG_REPEAT_DELAY | BRL_FLG_REPEAT_INITIAL;
        let remapped = remap(Command::LNUP.with_flags(flags), true);
        assert_eq!(remapped, Command::PRDIFLN.with_flags(flags));
    }
}
