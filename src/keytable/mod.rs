//! Context-sensitive key tables
//!
//! Translates raw key input from a display into commands:
//!
//! ```text
//! driver key event → KeyValue → KeyTable::lookup(context) → Command → queue
//! ```
//!
//! Bindings are grouped by [`CommandContext`](crate::context::CommandContext);
//! lookups fall back to the `Default` context when the current one has no
//! binding for a key.

mod defaults;
mod table;
mod types;

pub use defaults::{default_bindings, NAVIGATION_KEYS, ROUTING_KEYS};
pub use table::{KeyBinding, KeyTable};
pub use types::{KeyValue, KEY_ANY};
