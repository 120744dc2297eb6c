//! Session context: the single owner of the input buffer, the highlight
//! registry, and the output writer.
//!
//! Everything the stream pipeline touches hangs off one `Session` value
//! constructed at startup and passed by `&mut` through the read loop — no
//! global state.

use crate::buffer::{INPUT_MAX, InputBuffer};
use crate::highlight::{DEFAULT_MARKER, HighlightRegistry, HighlightRule, Style};
use crate::processor;
use std::io::{self, Write};

pub struct Session<W: Write> {
    buffer: InputBuffer,
    registry: HighlightRegistry,
    command_char: char,
    out: W,
}

impl<W: Write> Session<W> {
    /// Full-capacity session with the built-in default rule registered.
    pub fn new(out: W) -> Self {
        Self::with_capacity(INPUT_MAX, out)
    }

    /// Session with a custom buffer capacity. Tests use small capacities to
    /// exercise the overflow failsafe.
    pub fn with_capacity(capacity: usize, out: W) -> Self {
        let mut session = Self {
            buffer: InputBuffer::new(capacity),
            registry: HighlightRegistry::new(),
            command_char: '%',
            out,
        };
        session.register_rule(DEFAULT_MARKER, "bold");
        session
    }

    pub fn command_char(&self) -> char {
        self.command_char
    }

    pub fn set_command_char(&mut self, command_char: char) {
        self.command_char = command_char;
    }

    pub fn registry(&self) -> &HighlightRegistry {
        &self.registry
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    /// Compile and register a rule. Bad patterns and unknown style words are
    /// logged and skipped so one broken rule never takes the whole rule set
    /// down with it.
    pub fn register_rule(&mut self, pattern: &str, style_spec: &str) {
        match Style::parse(style_spec).and_then(|style| HighlightRule::new(pattern, style)) {
            Ok(rule) => self.registry.add(rule),
            Err(e) => log::warn!("Skipping highlight rule {pattern:?}: {e}"),
        }
    }

    /// Remove the rule registered for `pattern`, if any.
    pub fn unregister_rule(&mut self, pattern: &str) -> bool {
        self.registry.remove(pattern)
    }

    /// Append a read chunk, force-flushing whenever the chunk would not fit.
    /// A flush empties the buffer, so any chunk up to `INPUT_MAX` bytes is
    /// placed without loss; larger chunks are placed in capacity-sized
    /// pieces.
    pub fn append_chunk(&mut self, mut chunk: &[u8]) -> io::Result<()> {
        while !chunk.is_empty() {
            if chunk.len() > self.buffer.remaining() {
                log::trace!(
                    "Chunk of {} bytes exceeds {} remaining, force-flushing",
                    chunk.len(),
                    self.buffer.remaining()
                );
                self.process(false)?;
            }
            let take = chunk.len().min(self.buffer.remaining());
            self.buffer.append(&chunk[..take]);
            chunk = &chunk[take..];
        }
        Ok(())
    }

    /// Run the line processor over the buffered bytes.
    pub fn process(&mut self, strict_lines: bool) -> io::Result<()> {
        processor::process(&mut self.buffer, &self.registry, &mut self.out, strict_lines)
    }

    /// Orderly shutdown: drain the registry, print the optional final
    /// message, flush, and hand the writer back. The process exit code is
    /// the caller's decision.
    pub fn shutdown(mut self, message: Option<&str>) -> io::Result<W> {
        self.registry.drain();
        if let Some(msg) = message {
            writeln!(self.out, "\n{msg}")?;
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_carries_the_default_marker_rule() {
        let session = Session::new(Vec::new());
        assert_eq!(session.registry().len(), 1);
        assert_eq!(
            session.registry().iter().next().unwrap().condition(),
            DEFAULT_MARKER
        );
    }

    #[test]
    fn invalid_rules_are_skipped_not_fatal() {
        let mut session = Session::new(Vec::new());
        session.register_rule("(unclosed", "red");
        session.register_rule("fine", "sparkly");
        assert_eq!(session.registry().len(), 1); // default rule only
    }

    #[test]
    fn unregister_removes_the_default_rule() {
        let mut session = Session::new(Vec::new());
        assert!(session.unregister_rule(DEFAULT_MARKER));
        assert!(session.registry().is_empty());
    }

    #[test]
    fn append_chunk_force_flushes_instead_of_overflowing() {
        let mut session = Session::with_capacity(8, Vec::new());
        session.unregister_rule(DEFAULT_MARKER);

        session.append_chunk(b"0123456789abcdefghij").unwrap();
        // Nothing lost: emitted bytes plus still-buffered bytes equal input
        let buffered = session.buffer().as_slice().to_vec();
        let out = session.shutdown(None).unwrap();
        let mut seen = out.clone();
        seen.extend_from_slice(&buffered);
        assert_eq!(seen, b"0123456789abcdefghij".to_vec());
        assert!(buffered.len() <= 8);
    }

    #[test]
    fn shutdown_appends_final_message_after_a_blank_line() {
        let session = Session::new(Vec::new());
        let out = session.shutdown(Some("done")).unwrap();
        assert_eq!(out, b"\ndone\n".to_vec());
    }
}
