//! Line-oriented input transport
//!
//! Stands in for a display driver: each line of text becomes one [`Event`].
//!
//! ```text
//! key 0 1          raw key (group, number), translated via the key table
//! key 1.*          not accepted: wildcards only exist in key tables
//! LNUP             command by name
//! ROUTE+12         block command with argument
//! say <text>       show a message
//! wait <text>      show a message and wait for a key
//! quit             stop the daemon
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::io::BufRead;

use crate::command::Command;
use crate::event_loop::{Event, InputSender};
use crate::keytable::KeyValue;

/// Parse one input line
///
/// Returns `Ok(None)` for lines that carry no event.
pub fn parse_line(line: &str) -> Result<Option<Event>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let event = match word {
        "key" => {
            let key: KeyValue = rest.parse()?;
            if key.is_any() {
                return Err(format!("Not a physical key: {}", rest));
            }
            Event::Key(key)
        }
        "say" => Event::Message {
            text: rest.to_string(),
            wait: false,
        },
        "wait" => Event::Message {
            text: rest.to_string(),
            wait: true,
        },
        "quit" | "exit" => Event::Shutdown,
        _ => {
            let command: Command = line.parse().map_err(|e| format!("{}", e))?;
            Event::Command(command)
        }
    };
    Ok(Some(event))
}

/// Feed lines from `reader` into the event loop until input ends
///
/// Sends [`Event::Shutdown`] at end of input. Returns the number of events
/// delivered.
pub fn read_lines(reader: impl BufRead, input: &InputSender) -> usize {
    let mut delivered = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("input read failed: {}", e);
                break;
            }
        };

        match parse_line(&line) {
            Ok(Some(event)) => {
                let stop = event == Event::Shutdown;
                if !input.send(event) {
                    tracing::debug!("event loop gone, input stopped");
                    return delivered;
                }
                delivered += 1;
                if stop {
                    return delivered;
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(line = index + 1, "{}", e),
        }
    }

    input.shutdown();
    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::codes::BRL_BLK_ROUTE;

    #[test]
    fn test_parse_key() {
        assert_eq!(
            parse_line("key 0 1"),
            Ok(Some(Event::Key(KeyValue::new(0, 1))))
        );
        assert_eq!(
            parse_line("  key 1.12 "),
            Ok(Some(Event::Key(KeyValue::new(1, 12))))
        );
        assert!(parse_line("key 1.*").is_err());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("LNUP"), Ok(Some(Event::Command(Command::LNUP))));
        assert_eq!(
            parse_line("route+3"),
            Ok(Some(Event::Command(Command::block_with_argument(
                BRL_BLK_ROUTE,
                3
            ))))
        );
        assert!(parse_line("NOT_A_COMMAND").is_err());
    }

    #[test]
    fn test_parse_messages_and_quit() {
        assert_eq!(
            parse_line("wait press a key"),
            Ok(Some(Event::Message {
                text: "press a key".to_string(),
                wait: true
            }))
        );
        assert_eq!(parse_line("quit"), Ok(Some(Event::Shutdown)));
        assert_eq!(parse_line("# comment"), Ok(None));
        assert_eq!(parse_line(""), Ok(None));
    }
}
