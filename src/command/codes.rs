//! Numeric command-code layout
//!
//! These values are shared with key tables and display drivers, so the layout
//! is fixed bit for bit:
//!
//! ```text
//!  31        24 23        16 15         8 7          0
//! +------------+------------+------------+------------+
//! |  (unused)  |   flags    |   block    |  argument  |
//! +------------+------------+------------+------------+
//!                            \________ base code ____/
//! ```
//!
//! A command with a zero block byte is a simple command identified by its
//! argument byte. A command with a non-zero block byte is a block command whose
//! argument byte is a parameter (routing-key column, virtual terminal, ...).

/// Argument byte of a command
pub const BRL_MSK_ARG: i32 = 0x00FF;
/// Block byte of a command
pub const BRL_MSK_BLK: i32 = 0xFF00;
/// Base code: everything that identifies the semantic action
pub const BRL_MSK_CMD: i32 = BRL_MSK_BLK | BRL_MSK_ARG;
/// Modifier flags
pub const BRL_MSK_FLG: i32 = 0xFF_0000;

/// Sentinel for "no command" (end of input)
pub const EOF: i32 = -1;

// ============================================================================
// Flags
// ============================================================================

pub const BRL_FLG_TOGGLE_ON: i32 = 0x01_0000;
pub const BRL_FLG_TOGGLE_OFF: i32 = 0x02_0000;
pub const BRL_FLG_TOGGLE_MASK: i32 = BRL_FLG_TOGGLE_ON | BRL_FLG_TOGGLE_OFF;
pub const BRL_FLG_MOTION_ROUTE: i32 = 0x04_0000;
pub const BRL_FLG_REPEAT_DELAY: i32 = 0x40_0000;
pub const BRL_FLG_REPEAT_INITIAL: i32 = 0x80_0000;
pub const BRL_FLG_REPEAT_MASK: i32 = BRL_FLG_REPEAT_DELAY | BRL_FLG_REPEAT_INITIAL;

// ============================================================================
// Simple commands
// ============================================================================

pub const BRL_CMD_NOOP: i32 = 0;
pub const BRL_CMD_LNUP: i32 = 1;
pub const BRL_CMD_LNDN: i32 = 2;
pub const BRL_CMD_WINUP: i32 = 3;
pub const BRL_CMD_WINDN: i32 = 4;
pub const BRL_CMD_PRDIFLN: i32 = 5;
pub const BRL_CMD_NXDIFLN: i32 = 6;
pub const BRL_CMD_ATTRUP: i32 = 7;
pub const BRL_CMD_ATTRDN: i32 = 8;
pub const BRL_CMD_TOP: i32 = 9;
pub const BRL_CMD_BOT: i32 = 10;
pub const BRL_CMD_TOP_LEFT: i32 = 11;
pub const BRL_CMD_BOT_LEFT: i32 = 12;
pub const BRL_CMD_PRPGRPH: i32 = 13;
pub const BRL_CMD_NXPGRPH: i32 = 14;
pub const BRL_CMD_PRPROMPT: i32 = 15;
pub const BRL_CMD_NXPROMPT: i32 = 16;
pub const BRL_CMD_PRSEARCH: i32 = 17;
pub const BRL_CMD_NXSEARCH: i32 = 18;
pub const BRL_CMD_CHRLT: i32 = 19;
pub const BRL_CMD_CHRRT: i32 = 20;
pub const BRL_CMD_HWINLT: i32 = 21;
pub const BRL_CMD_HWINRT: i32 = 22;
pub const BRL_CMD_FWINLT: i32 = 23;
pub const BRL_CMD_FWINRT: i32 = 24;
pub const BRL_CMD_FWINLTSKIP: i32 = 25;
pub const BRL_CMD_FWINRTSKIP: i32 = 26;
pub const BRL_CMD_LNBEG: i32 = 27;
pub const BRL_CMD_LNEND: i32 = 28;
pub const BRL_CMD_HOME: i32 = 29;
pub const BRL_CMD_BACK: i32 = 30;
pub const BRL_CMD_RETURN: i32 = 31;
pub const BRL_CMD_FREEZE: i32 = 32;
pub const BRL_CMD_DISPMD: i32 = 33;
pub const BRL_CMD_SIXDOTS: i32 = 34;
pub const BRL_CMD_SLIDEWIN: i32 = 35;
pub const BRL_CMD_SKPIDLNS: i32 = 36;
pub const BRL_CMD_SKPBLNKWINS: i32 = 37;
pub const BRL_CMD_CSRVIS: i32 = 38;
pub const BRL_CMD_CSRHIDE: i32 = 39;
pub const BRL_CMD_CSRTRK: i32 = 40;
pub const BRL_CMD_CSRSIZE: i32 = 41;
pub const BRL_CMD_CSRBLINK: i32 = 42;
pub const BRL_CMD_ATTRVIS: i32 = 43;
pub const BRL_CMD_ATTRBLINK: i32 = 44;
pub const BRL_CMD_CAPBLINK: i32 = 45;
pub const BRL_CMD_TUNES: i32 = 46;
pub const BRL_CMD_AUTOREPEAT: i32 = 47;
pub const BRL_CMD_AUTOSPEAK: i32 = 48;
pub const BRL_CMD_HELP: i32 = 49;
pub const BRL_CMD_INFO: i32 = 50;
pub const BRL_CMD_LEARN: i32 = 51;
pub const BRL_CMD_PREFMENU: i32 = 52;
pub const BRL_CMD_PREFSAVE: i32 = 53;
pub const BRL_CMD_PREFLOAD: i32 = 54;
pub const BRL_CMD_MENU_FIRST_ITEM: i32 = 55;
pub const BRL_CMD_MENU_LAST_ITEM: i32 = 56;
pub const BRL_CMD_MENU_PREV_ITEM: i32 = 57;
pub const BRL_CMD_MENU_NEXT_ITEM: i32 = 58;
pub const BRL_CMD_MENU_PREV_SETTING: i32 = 59;
pub const BRL_CMD_MENU_NEXT_SETTING: i32 = 60;
pub const BRL_CMD_MUTE: i32 = 61;
pub const BRL_CMD_SPKHOME: i32 = 62;
pub const BRL_CMD_SAY_LINE: i32 = 63;
pub const BRL_CMD_SAY_ABOVE: i32 = 64;
pub const BRL_CMD_SAY_BELOW: i32 = 65;
pub const BRL_CMD_SAY_SLOWER: i32 = 66;
pub const BRL_CMD_SAY_FASTER: i32 = 67;
pub const BRL_CMD_SAY_SOFTER: i32 = 68;
pub const BRL_CMD_SAY_LOUDER: i32 = 69;
pub const BRL_CMD_SWITCHVT_PREV: i32 = 70;
pub const BRL_CMD_SWITCHVT_NEXT: i32 = 71;
pub const BRL_CMD_CSRJMP_VERT: i32 = 72;
pub const BRL_CMD_PASTE: i32 = 73;
pub const BRL_CMD_RESTARTBRL: i32 = 74;
pub const BRL_CMD_RESTARTSPEECH: i32 = 75;
pub const BRL_CMD_OFFLINE: i32 = 76;

// ============================================================================
// Block commands (argument in the low byte)
// ============================================================================

pub const BRL_BLK_ROUTE: i32 = 0x0100;
pub const BRL_BLK_CUTBEGIN: i32 = 0x0200;
pub const BRL_BLK_CUTAPPEND: i32 = 0x0300;
pub const BRL_BLK_CUTRECT: i32 = 0x0400;
pub const BRL_BLK_CUTLINE: i32 = 0x0500;
pub const BRL_BLK_SWITCHVT: i32 = 0x0600;
pub const BRL_BLK_PRINDENT: i32 = 0x0700;
pub const BRL_BLK_NXINDENT: i32 = 0x0800;
pub const BRL_BLK_DESCCHAR: i32 = 0x0900;
pub const BRL_BLK_SETLEFT: i32 = 0x0A00;
pub const BRL_BLK_SETMARK: i32 = 0x0B00;
pub const BRL_BLK_GOTOMARK: i32 = 0x0C00;
pub const BRL_BLK_GOTOLINE: i32 = 0x0D00;
pub const BRL_BLK_PRDIFCHAR: i32 = 0x0E00;
pub const BRL_BLK_NXDIFCHAR: i32 = 0x0F00;
pub const BRL_BLK_PASSKEY: i32 = 0x2000;
pub const BRL_BLK_PASSCHAR: i32 = 0x2100;
pub const BRL_BLK_PASSDOTS: i32 = 0x2200;
pub const BRL_BLK_PASSAT: i32 = 0x2300;
pub const BRL_BLK_PASSXT: i32 = 0x2400;
pub const BRL_BLK_PASSPS2: i32 = 0x2500;
pub const BRL_BLK_CONTEXT: i32 = 0x2600;

/// Name and short description of a simple or block command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: &'static str,
    pub code: i32,
    pub description: &'static str,
}

const fn entry(name: &'static str, code: i32, description: &'static str) -> CommandEntry {
    CommandEntry {
        name,
        code,
        description,
    }
}

/// Simple commands, indexed by code
pub static SIMPLE_COMMANDS: &[CommandEntry] = &[
    entry("NOOP", BRL_CMD_NOOP, "do nothing"),
    entry("LNUP", BRL_CMD_LNUP, "go up one line"),
    entry("LNDN", BRL_CMD_LNDN, "go down one line"),
    entry("WINUP", BRL_CMD_WINUP, "go up several lines"),
    entry("WINDN", BRL_CMD_WINDN, "go down several lines"),
    entry("PRDIFLN", BRL_CMD_PRDIFLN, "go up to nearest line with different content"),
    entry("NXDIFLN", BRL_CMD_NXDIFLN, "go down to nearest line with different content"),
    entry("ATTRUP", BRL_CMD_ATTRUP, "go up to nearest line with different highlighting"),
    entry("ATTRDN", BRL_CMD_ATTRDN, "go down to nearest line with different highlighting"),
    entry("TOP", BRL_CMD_TOP, "go to top line"),
    entry("BOT", BRL_CMD_BOT, "go to bottom line"),
    entry("TOP_LEFT", BRL_CMD_TOP_LEFT, "go to beginning of top line"),
    entry("BOT_LEFT", BRL_CMD_BOT_LEFT, "go to beginning of bottom line"),
    entry("PRPGRPH", BRL_CMD_PRPGRPH, "go up to last line of previous paragraph"),
    entry("NXPGRPH", BRL_CMD_NXPGRPH, "go down to first line of next paragraph"),
    entry("PRPROMPT", BRL_CMD_PRPROMPT, "go up to previous command prompt"),
    entry("NXPROMPT", BRL_CMD_NXPROMPT, "go down to next command prompt"),
    entry("PRSEARCH", BRL_CMD_PRSEARCH, "search backward for cut text"),
    entry("NXSEARCH", BRL_CMD_NXSEARCH, "search forward for cut text"),
    entry("CHRLT", BRL_CMD_CHRLT, "go left one character"),
    entry("CHRRT", BRL_CMD_CHRRT, "go right one character"),
    entry("HWINLT", BRL_CMD_HWINLT, "go left half a window"),
    entry("HWINRT", BRL_CMD_HWINRT, "go right half a window"),
    entry("FWINLT", BRL_CMD_FWINLT, "go left one window"),
    entry("FWINRT", BRL_CMD_FWINRT, "go right one window"),
    entry("FWINLTSKIP", BRL_CMD_FWINLTSKIP, "go left to nearest non-blank window"),
    entry("FWINRTSKIP", BRL_CMD_FWINRTSKIP, "go right to nearest non-blank window"),
    entry("LNBEG", BRL_CMD_LNBEG, "go to beginning of line"),
    entry("LNEND", BRL_CMD_LNEND, "go to end of line"),
    entry("HOME", BRL_CMD_HOME, "go to cursor"),
    entry("BACK", BRL_CMD_BACK, "go back after cursor tracking"),
    entry("RETURN", BRL_CMD_RETURN, "go to cursor or go back after cursor tracking"),
    entry("FREEZE", BRL_CMD_FREEZE, "set screen image frozen/unfrozen"),
    entry("DISPMD", BRL_CMD_DISPMD, "set display mode attributes/text"),
    entry("SIXDOTS", BRL_CMD_SIXDOTS, "set text style 6-dot/8-dot"),
    entry("SLIDEWIN", BRL_CMD_SLIDEWIN, "set sliding window on/off"),
    entry("SKPIDLNS", BRL_CMD_SKPIDLNS, "set skipping of lines with identical content on/off"),
    entry("SKPBLNKWINS", BRL_CMD_SKPBLNKWINS, "set skipping of blank windows on/off"),
    entry("CSRVIS", BRL_CMD_CSRVIS, "set cursor visibility on/off"),
    entry("CSRHIDE", BRL_CMD_CSRHIDE, "set hidden cursor on/off"),
    entry("CSRTRK", BRL_CMD_CSRTRK, "set cursor tracking on/off"),
    entry("CSRSIZE", BRL_CMD_CSRSIZE, "set cursor style block/underline"),
    entry("CSRBLINK", BRL_CMD_CSRBLINK, "set cursor blinking on/off"),
    entry("ATTRVIS", BRL_CMD_ATTRVIS, "set attribute underlining on/off"),
    entry("ATTRBLINK", BRL_CMD_ATTRBLINK, "set attribute blinking on/off"),
    entry("CAPBLINK", BRL_CMD_CAPBLINK, "set capital letter blinking on/off"),
    entry("TUNES", BRL_CMD_TUNES, "set alert tunes on/off"),
    entry("AUTOREPEAT", BRL_CMD_AUTOREPEAT, "set autorepeat on/off"),
    entry("AUTOSPEAK", BRL_CMD_AUTOSPEAK, "set autospeak on/off"),
    entry("HELP", BRL_CMD_HELP, "enter/leave help display"),
    entry("INFO", BRL_CMD_INFO, "enter/leave status display"),
    entry("LEARN", BRL_CMD_LEARN, "enter/leave command learn mode"),
    entry("PREFMENU", BRL_CMD_PREFMENU, "enter/leave preferences menu"),
    entry("PREFSAVE", BRL_CMD_PREFSAVE, "save preferences"),
    entry("PREFLOAD", BRL_CMD_PREFLOAD, "restore saved preferences"),
    entry("MENU_FIRST_ITEM", BRL_CMD_MENU_FIRST_ITEM, "go to first item"),
    entry("MENU_LAST_ITEM", BRL_CMD_MENU_LAST_ITEM, "go to last item"),
    entry("MENU_PREV_ITEM", BRL_CMD_MENU_PREV_ITEM, "go to previous item"),
    entry("MENU_NEXT_ITEM", BRL_CMD_MENU_NEXT_ITEM, "go to next item"),
    entry("MENU_PREV_SETTING", BRL_CMD_MENU_PREV_SETTING, "select previous choice"),
    entry("MENU_NEXT_SETTING", BRL_CMD_MENU_NEXT_SETTING, "select next choice"),
    entry("MUTE", BRL_CMD_MUTE, "stop speaking"),
    entry("SPKHOME", BRL_CMD_SPKHOME, "go to current speech position"),
    entry("SAY_LINE", BRL_CMD_SAY_LINE, "speak current line"),
    entry("SAY_ABOVE", BRL_CMD_SAY_ABOVE, "speak from top of screen through current line"),
    entry("SAY_BELOW", BRL_CMD_SAY_BELOW, "speak from current line through bottom of screen"),
    entry("SAY_SLOWER", BRL_CMD_SAY_SLOWER, "decrease speech rate"),
    entry("SAY_FASTER", BRL_CMD_SAY_FASTER, "increase speech rate"),
    entry("SAY_SOFTER", BRL_CMD_SAY_SOFTER, "decrease speech volume"),
    entry("SAY_LOUDER", BRL_CMD_SAY_LOUDER, "increase speech volume"),
    entry("SWITCHVT_PREV", BRL_CMD_SWITCHVT_PREV, "switch to previous virtual terminal"),
    entry("SWITCHVT_NEXT", BRL_CMD_SWITCHVT_NEXT, "switch to next virtual terminal"),
    entry("CSRJMP_VERT", BRL_CMD_CSRJMP_VERT, "bring cursor to line"),
    entry("PASTE", BRL_CMD_PASTE, "insert cut text at cursor"),
    entry("RESTARTBRL", BRL_CMD_RESTARTBRL, "restart braille driver"),
    entry("RESTARTSPEECH", BRL_CMD_RESTARTSPEECH, "restart speech driver"),
    entry("OFFLINE", BRL_CMD_OFFLINE, "braille display temporarily unavailable"),
];

/// Block commands, ordered by block code
pub static BLOCK_COMMANDS: &[CommandEntry] = &[
    entry("ROUTE", BRL_BLK_ROUTE, "bring cursor to character"),
    entry("CUTBEGIN", BRL_BLK_CUTBEGIN, "start new cut buffer at character"),
    entry("CUTAPPEND", BRL_BLK_CUTAPPEND, "append to existing cut buffer from character"),
    entry("CUTRECT", BRL_BLK_CUTRECT, "rectangular cut to character"),
    entry("CUTLINE", BRL_BLK_CUTLINE, "linear cut to character"),
    entry("SWITCHVT", BRL_BLK_SWITCHVT, "switch to virtual terminal"),
    entry("PRINDENT", BRL_BLK_PRINDENT, "go up to nearest line with less indent than character"),
    entry("NXINDENT", BRL_BLK_NXINDENT, "go down to nearest line with less indent than character"),
    entry("DESCCHAR", BRL_BLK_DESCCHAR, "describe character"),
    entry("SETLEFT", BRL_BLK_SETLEFT, "place left end of window at character"),
    entry("SETMARK", BRL_BLK_SETMARK, "remember current window position"),
    entry("GOTOMARK", BRL_BLK_GOTOMARK, "go to remembered window position"),
    entry("GOTOLINE", BRL_BLK_GOTOLINE, "go to selected line"),
    entry("PRDIFCHAR", BRL_BLK_PRDIFCHAR, "go up to nearest line with different character"),
    entry("NXDIFCHAR", BRL_BLK_NXDIFCHAR, "go down to nearest line with different character"),
    entry("PASSKEY", BRL_BLK_PASSKEY, "emulate special key"),
    entry("PASSCHAR", BRL_BLK_PASSCHAR, "type unicode character"),
    entry("PASSDOTS", BRL_BLK_PASSDOTS, "type braille character"),
    entry("PASSAT", BRL_BLK_PASSAT, "AT (set 2) keyboard scan code"),
    entry("PASSXT", BRL_BLK_PASSXT, "XT (set 1) keyboard scan code"),
    entry("PASSPS2", BRL_BLK_PASSPS2, "PS/2 (set 3) keyboard scan code"),
    entry("CONTEXT", BRL_BLK_CONTEXT, "switch to command context"),
];

/// Find the table entry for a base code
pub fn find_entry(base: i32) -> Option<&'static CommandEntry> {
    if base & BRL_MSK_BLK == 0 {
        SIMPLE_COMMANDS.iter().find(|e| e.code == base)
    } else {
        let block = base & BRL_MSK_BLK;
        BLOCK_COMMANDS.iter().find(|e| e.code == block)
    }
}

/// Find a table entry by name (case-insensitive)
pub fn find_entry_by_name(name: &str) -> Option<&'static CommandEntry> {
    SIMPLE_COMMANDS
        .iter()
        .chain(BLOCK_COMMANDS.iter())
        .find(|e| e.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_table_is_indexed_by_code() {
        for (index, entry) in SIMPLE_COMMANDS.iter().enumerate() {
            assert_eq!(entry.code, index as i32, "{} out of place", entry.name);
        }
    }

    #[test]
    fn test_block_codes_have_empty_argument() {
        for entry in BLOCK_COMMANDS {
            assert_eq!(entry.code & BRL_MSK_ARG, 0, "{}", entry.name);
            assert_ne!(entry.code & BRL_MSK_BLK, 0, "{}", entry.name);
        }
    }

    #[test]
    fn test_masks_do_not_overlap() {
        assert_eq!(BRL_MSK_CMD & BRL_MSK_FLG, 0);
        assert_eq!(BRL_MSK_ARG & BRL_MSK_BLK, 0);
        assert_eq!(BRL_MSK_CMD, 0xFFFF);
    }

    #[test]
    fn test_find_entry_for_block_ignores_argument() {
        let entry = find_entry(BRL_BLK_ROUTE | 12).unwrap();
        assert_eq!(entry.name, "ROUTE");
    }

    #[test]
    fn test_find_entry_by_name() {
        assert_eq!(find_entry_by_name("prdifln").unwrap().code, BRL_CMD_PRDIFLN);
        assert_eq!(find_entry_by_name("CUTBEGIN").unwrap().code, BRL_BLK_CUTBEGIN);
        assert!(find_entry_by_name("FLY").is_none());
    }
}
