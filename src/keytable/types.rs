//! Raw key identifiers

use std::fmt;
use std::str::FromStr;

/// Key number that matches every key in its group
pub const KEY_ANY: u8 = 0xFF;

/// A physical key: the group (set) it belongs to and its number within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyValue {
    pub group: u8,
    pub number: u8,
}

impl KeyValue {
    pub const fn new(group: u8, number: u8) -> Self {
        Self { group, number }
    }

    /// Wildcard for every key in `group`
    pub const fn any_in(group: u8) -> Self {
        Self {
            group,
            number: KEY_ANY,
        }
    }

    pub const fn is_any(self) -> bool {
        self.number == KEY_ANY
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            write!(f, "{}.*", self.group)
        } else {
            write!(f, "{}.{}", self.group, self.number)
        }
    }
}

/// Parses `group.number` or `group number`
impl FromStr for KeyValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(|c: char| c == '.' || c.is_whitespace());
        let (Some(group), Some(number), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("Invalid key: {}", s));
        };

        let group = group
            .parse()
            .map_err(|_| format!("Invalid key group: {}", group))?;
        let number = match number {
            "*" => KEY_ANY,
            n => n.parse().map_err(|_| format!("Invalid key number: {}", n))?,
        };
        Ok(Self { group, number })
    }
}
