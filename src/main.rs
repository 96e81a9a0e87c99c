//! brld - braille display command dispatch daemon
//!
//! Reads key and command events from stdin (or a script file), translates
//! them through the default key table and runs them through the command core.
//! Handled commands are echoed to stdout.

use std::cell::Cell;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;

use brld::cli::{CliArgs, InputSource};
use brld::command::codes::{
    BRL_CMD_PREFMENU, BRL_CMD_PREFSAVE, BRL_CMD_SKPIDLNS, BRL_FLG_TOGGLE_OFF, BRL_FLG_TOGGLE_ON,
};
use brld::keytable::{default_bindings, KeyTable};
use brld::{
    transport, Command, CommandContext, CommandExecutor, CommandHandler, Dispatcher, EventLoop,
    Preferences, ScreenContext,
};

/// Bottom of the handler stack: echoes every command it is given
struct ConsoleHandler;

impl CommandHandler for ConsoleHandler {
    fn handle_command(&mut self, command: Command) -> bool {
        if command == Command::NOOP {
            return false;
        }
        let description = command.description().unwrap_or("unknown command");
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}: {}", command, description) {
            tracing::warn!("console write failed: {}", e);
        }
        true
    }
}

/// Preferences menu stand-in
///
/// `PREFMENU` opens and closes it. While open, the screen reports `Menu`, so
/// keys are translated with the menu bindings.
#[derive(Debug, Clone, Default)]
struct PreferencesMenu {
    open: Rc<Cell<bool>>,
}

impl CommandHandler for PreferencesMenu {
    fn handle_command(&mut self, command: Command) -> bool {
        if command.base() != BRL_CMD_PREFMENU {
            return false;
        }
        let open = !self.open.get();
        self.open.set(open);
        tracing::info!(open, "preferences menu");
        true
    }
}

impl ScreenContext for PreferencesMenu {
    fn command_context(&self) -> CommandContext {
        if self.open.get() {
            CommandContext::Menu
        } else {
            CommandContext::Default
        }
    }
}

/// Executor that applies preference commands after normal dispatch
///
/// Every command goes through the dispatcher first, so preference commands
/// are logged like any other.
struct PreferenceCommands {
    save_path: Option<PathBuf>,
}

impl CommandExecutor for PreferenceCommands {
    fn execute_command(&mut self, command: Command, dispatcher: &mut Dispatcher) -> bool {
        let handled = dispatcher.handle_command(command);

        match command.base() {
            BRL_CMD_SKPIDLNS => {
                let mut preferences = *dispatcher.preferences();
                preferences.skip_identical_lines =
                    toggle(command, preferences.skip_identical_lines);
                dispatcher.set_preferences(preferences);
                true
            }
            BRL_CMD_PREFSAVE => {
                let preferences = dispatcher.preferences();
                let saved = match &self.save_path {
                    Some(path) => preferences.save_to(path),
                    None => preferences.save(),
                };
                if let Err(e) = saved {
                    tracing::error!("{}", e);
                }
                true
            }
            _ => handled,
        }
    }
}

/// Apply a toggle command's on/off flags to `current`
fn toggle(command: Command, current: bool) -> bool {
    if command.has_flags(BRL_FLG_TOGGLE_ON) {
        true
    } else if command.has_flags(BRL_FLG_TOGGLE_OFF) {
        false
    } else {
        !current
    }
}

fn open_input(source: &InputSource) -> Result<Box<dyn BufRead + Send>> {
    Ok(match source {
        InputSource::Stdin => Box::new(BufReader::new(io::stdin())),
        InputSource::Script(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
    })
}

fn main() -> Result<()> {
    let config = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    brld::tracing::init(config.file_logging);

    let preferences: Preferences = config.preferences();
    tracing::info!(
        skip_identical_lines = preferences.skip_identical_lines,
        "starting"
    );

    let reader = open_input(&config.input)?;

    let menu = PreferencesMenu::default();
    let screen = menu.clone();
    let mut event_loop = EventLoop::new(preferences, KeyTable::with_bindings(default_bindings()))
        .configure_core(|core| core.with_screen(Box::new(screen)));
    let core = event_loop.core_mut();
    core.push_handler(CommandContext::Default, Box::new(ConsoleHandler))?;
    core.push_handler(CommandContext::Default, Box::new(menu))?;
    core.install_executor(Box::new(PreferenceCommands {
        save_path: config.config_path.clone(),
    }));

    let input = event_loop.input();
    let reader_thread = std::thread::Builder::new()
        .name("input".to_string())
        .spawn(move || transport::read_lines(reader, &input))
        .context("Failed to start input thread")?;

    let discarded = event_loop.run();

    match reader_thread.join() {
        Ok(delivered) => tracing::info!(delivered, discarded, "input finished"),
        Err(_) => tracing::error!("input thread panicked"),
    }

    Ok(())
}
