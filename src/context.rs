//! Command contexts
//!
//! A context names the namespace that governs how the next raw input is
//! interpreted. The handler stack stores one per level; `Default` is a
//! deferred marker that the resolver replaces with whatever the screen
//! reports.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Namespace for interpreting raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandContext {
    /// A menu (e.g. preferences) is being navigated
    Menu,
    /// Braille keyboard chord entry
    Chords,
    /// A message is shown and the next key dismisses it
    Waiting,
    /// Resolved through the screen
    #[default]
    Default,
}

impl CommandContext {
    /// All contexts, `Default` last
    pub const ALL: [CommandContext; 4] = [
        CommandContext::Menu,
        CommandContext::Chords,
        CommandContext::Waiting,
        CommandContext::Default,
    ];

    pub fn is_default(self) -> bool {
        self == CommandContext::Default
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommandContext::Menu => "menu",
            CommandContext::Chords => "chords",
            CommandContext::Waiting => "waiting",
            CommandContext::Default => "default",
        }
    }
}

impl fmt::Display for CommandContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "menu" => Ok(CommandContext::Menu),
            "chords" | "chord" => Ok(CommandContext::Chords),
            "waiting" | "wait" => Ok(CommandContext::Waiting),
            "default" => Ok(CommandContext::Default),
            _ => Err(format!("Invalid context: {}", s)),
        }
    }
}

/// Supplies the concrete context when the handler stack has nothing specific
///
/// Implemented by the screen subsystem: a special screen such as the
/// preferences menu reports `Menu`, an ordinary console reports `Default`.
pub trait ScreenContext {
    fn command_context(&self) -> CommandContext;
}

/// A screen whose context never changes
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedScreenContext(pub CommandContext);

impl ScreenContext for FixedScreenContext {
    fn command_context(&self) -> CommandContext {
        self.0
    }
}

impl<F> ScreenContext for F
where
    F: Fn() -> CommandContext,
{
    fn command_context(&self) -> CommandContext {
        self()
    }
}
