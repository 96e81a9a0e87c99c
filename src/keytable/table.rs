//! KeyTable struct for storing and looking up key bindings

use std::collections::HashMap;

use super::types::KeyValue;
use crate::command::Command;
use crate::context::CommandContext;

/// A single binding of a key (or key group) to a command within a context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub context: CommandContext,
    pub key: KeyValue,
    pub command: Command,
}

impl KeyBinding {
    /// Binding in the `Default` context
    pub fn new(key: KeyValue, command: Command) -> Self {
        Self {
            context: CommandContext::Default,
            key,
            command,
        }
    }

    /// Scope this binding to a context (builder pattern)
    pub fn in_context(mut self, context: CommandContext) -> Self {
        self.context = context;
        self
    }
}

/// Stores bindings per context and translates keys into commands
#[derive(Debug, Clone, Default)]
pub struct KeyTable {
    bindings: HashMap<(CommandContext, KeyValue), Command>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a key table with the given bindings
    ///
    /// Later bindings for the same context and key replace earlier ones.
    pub fn with_bindings(bindings: impl IntoIterator<Item = KeyBinding>) -> Self {
        let mut table = Self::new();
        for binding in bindings {
            table.add_binding(binding);
        }
        table
    }

    pub fn add_binding(&mut self, binding: KeyBinding) {
        if let Some(previous) = self
            .bindings
            .insert((binding.context, binding.key), binding.command)
        {
            tracing::debug!(
                context = %binding.context,
                key = %binding.key,
                "replaced binding for {} with {}",
                previous,
                binding.command
            );
        }
    }

    /// Translate a key pressed in `context`
    ///
    /// Tries the context's own bindings, then the `Default` context. Within a
    /// context an exact key binding wins over a group wildcard; a wildcard
    /// bound to a block command passes the key number as its argument.
    pub fn lookup(&self, context: CommandContext, key: KeyValue) -> Option<Command> {
        self.lookup_in(context, key).or_else(|| {
            if context.is_default() {
                None
            } else {
                self.lookup_in(CommandContext::Default, key)
            }
        })
    }

    fn lookup_in(&self, context: CommandContext, key: KeyValue) -> Option<Command> {
        if let Some(&command) = self.bindings.get(&(context, key)) {
            return Some(command);
        }

        let any = KeyValue::any_in(key.group);
        self.bindings
            .get(&(context, any))
            .map(|&command| {
                if command.is_block() {
                    Command::block_with_argument(command.block(), key.number)
                        .with_flags(command.flags())
                } else {
                    command
                }
            })
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::codes::{BRL_BLK_ROUTE, BRL_CMD_MENU_NEXT_ITEM};

    fn table() -> KeyTable {
        KeyTable::with_bindings([
            KeyBinding::new(KeyValue::new(0, 0), Command::LNUP),
            KeyBinding::new(KeyValue::new(0, 1), Command::LNDN),
            KeyBinding::new(KeyValue::any_in(1), Command::from_raw(BRL_BLK_ROUTE)),
            KeyBinding::new(
                KeyValue::new(0, 1),
                Command::from_raw(BRL_CMD_MENU_NEXT_ITEM),
            )
            .in_context(CommandContext::Menu),
        ])
    }

    #[test]
    fn test_lookup_default_context() {
        let table = table();
        assert_eq!(
            table.lookup(CommandContext::Default, KeyValue::new(0, 0)),
            Some(Command::LNUP)
        );
        assert_eq!(table.lookup(CommandContext::Default, KeyValue::new(0, 9)), None);
    }

    #[test]
    fn test_context_binding_overrides_default() {
        let table = table();
        assert_eq!(
            table.lookup(CommandContext::Menu, KeyValue::new(0, 1)),
            Some(Command::from_raw(BRL_CMD_MENU_NEXT_ITEM))
        );
    }

    #[test]
    fn test_context_falls_back_to_default() {
        let table = table();
        assert_eq!(
            table.lookup(CommandContext::Menu, KeyValue::new(0, 0)),
            Some(Command::LNUP)
        );
        assert_eq!(
            table.lookup(CommandContext::Waiting, KeyValue::new(0, 1)),
            Some(Command::LNDN)
        );
    }

    #[test]
    fn test_wildcard_passes_key_number() {
        let table = table();
        assert_eq!(
            table.lookup(CommandContext::Default, KeyValue::new(1, 17)),
            Some(Command::block_with_argument(BRL_BLK_ROUTE, 17))
        );
    }

    #[test]
    fn test_later_binding_replaces_earlier() {
        let table = KeyTable::with_bindings([
            KeyBinding::new(KeyValue::new(0, 0), Command::LNUP),
            KeyBinding::new(KeyValue::new(0, 0), Command::PRDIFLN),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.lookup(CommandContext::Default, KeyValue::new(0, 0)),
            Some(Command::PRDIFLN)
        );
    }
}
