//! brld - command dispatch core for a braille display daemon
//!
//! Commands arrive from display drivers (through a key table) or from the
//! control API, wait in a FIFO queue, and are executed one per alarm on the
//! dispatch thread:
//!
//! ```text
//! key → KeyTable → CommandQueue → alarm → executor → Dispatcher
//!                                                      ├─ remap
//!                                                      ├─ log
//!                                                      └─ HandlerStack (top-down)
//! ```
//!
//! The handler stack also decides the context used to translate the next key.

pub mod alarm;
pub mod api;
pub mod cli;
pub mod command;
pub mod command_core;
pub mod config;
pub mod config_paths;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod event_loop;
pub mod handler;
pub mod keytable;
pub mod log;
pub mod queue;
pub mod remap;
pub mod tracing;
pub mod transport;

// Re-export commonly used types
pub use alarm::AlarmScheduler;
pub use api::{CommandExecutor, CommandFilter, Filtered};
pub use command::Command;
pub use command_core::CommandCore;
pub use config::Preferences;
pub use context::{CommandContext, ScreenContext};
pub use dispatch::Dispatcher;
pub use error::CoreError;
pub use event_loop::{Event, EventLoop, InputSender};
pub use handler::{CommandHandler, HandlerStack, KeyWaiter};
pub use log::CommandLog;
pub use queue::CommandQueue;
