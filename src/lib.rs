//! par-tint: streaming pattern highlighter for piped terminal output.
//!
//! Bytes arrive on stdin, logical lines are detected as they complete, each
//! line is matched against the registered highlight rules, and matching
//! spans are wrapped in ANSI style sequences before the line is written to
//! stdout.
//!
//! The pipeline, leaves first:
//!
//! - [`highlight`] — the rule registry consulted on every line
//! - [`buffer`] — fixed-capacity store for unconsumed input
//! - [`reader`] — the adaptive read loop deciding when buffered bytes are
//!   ready to process
//! - [`processor`] — line splitting and escape-sequence splicing
//! - [`session`] — the context object owning all of the above

pub mod buffer;
pub mod cli;
pub mod debug;
pub mod highlight;
pub mod processor;
pub mod reader;
pub mod session;

pub use buffer::{INPUT_MAX, InputBuffer};
pub use highlight::{HighlightError, HighlightRegistry, HighlightRule, Style};
pub use reader::{WAIT_FOR_NEW_LINE, run, spawn_stdin_reader};
pub use session::Session;
