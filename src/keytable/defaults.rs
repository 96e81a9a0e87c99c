//! Default key table for the standard input transport
//!
//! Models a generic display with a row of navigation keys (group 0) and one
//! routing key per cell (group 1).

use super::table::KeyBinding;
use super::types::KeyValue;
use crate::command::codes::*;
use crate::command::Command;
use crate::context::CommandContext;

/// Group of the navigation keys
pub const NAVIGATION_KEYS: u8 = 0;
/// Group of the routing keys above each cell
pub const ROUTING_KEYS: u8 = 1;

fn nav(number: u8, code: i32) -> KeyBinding {
    KeyBinding::new(
        KeyValue::new(NAVIGATION_KEYS, number),
        Command::from_raw(code),
    )
}

/// Built-in bindings
pub fn default_bindings() -> Vec<KeyBinding> {
    let menu = CommandContext::Menu;

    vec![
        // ====================================================================
        // Default context
        // ====================================================================
        nav(0, BRL_CMD_LNUP),
        nav(1, BRL_CMD_LNDN),
        nav(2, BRL_CMD_FWINLT),
        nav(3, BRL_CMD_FWINRT),
        nav(4, BRL_CMD_TOP_LEFT),
        nav(5, BRL_CMD_BOT_LEFT),
        nav(6, BRL_CMD_HOME),
        nav(7, BRL_CMD_PREFMENU),
        nav(8, BRL_CMD_SKPIDLNS),
        nav(9, BRL_CMD_PASTE),
        KeyBinding::new(
            KeyValue::any_in(ROUTING_KEYS),
            Command::from_raw(BRL_BLK_ROUTE),
        ),
        // ====================================================================
        // Menu context
        // ====================================================================
        nav(0, BRL_CMD_MENU_PREV_ITEM).in_context(menu),
        nav(1, BRL_CMD_MENU_NEXT_ITEM).in_context(menu),
        nav(2, BRL_CMD_MENU_PREV_SETTING).in_context(menu),
        nav(3, BRL_CMD_MENU_NEXT_SETTING).in_context(menu),
        nav(4, BRL_CMD_MENU_FIRST_ITEM).in_context(menu),
        nav(5, BRL_CMD_MENU_LAST_ITEM).in_context(menu),
        nav(8, BRL_CMD_PREFSAVE).in_context(menu),
        KeyBinding::new(
            KeyValue::any_in(ROUTING_KEYS),
            Command::from_raw(BRL_BLK_SETLEFT),
        )
        .in_context(menu),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keytable::KeyTable;

    #[test]
    fn test_defaults_have_no_duplicates() {
        let bindings = default_bindings();
        let table = KeyTable::with_bindings(bindings.clone());
        assert_eq!(table.len(), bindings.len());
    }

    #[test]
    fn test_menu_keys_differ_from_default() {
        let table = KeyTable::with_bindings(default_bindings());
        let key = KeyValue::new(NAVIGATION_KEYS, 1);
        assert_eq!(
            table.lookup(CommandContext::Default, key),
            Some(Command::LNDN)
        );
        assert_eq!(
            table.lookup(CommandContext::Menu, key),
            Some(Command::from_raw(BRL_CMD_MENU_NEXT_ITEM))
        );
    }
}
