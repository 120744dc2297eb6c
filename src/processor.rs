//! Line processor: splits buffered bytes into lines, splices style escape
//! sequences around matched spans, and emits the result.
//!
//! Highlighting is purely additive — no input byte is dropped or reordered,
//! only escape sequences are inserted around matched spans.

use crate::buffer::InputBuffer;
use crate::highlight::{HighlightRegistry, STYLE_RESET};
use std::io::{self, Write};

/// Process eligible buffered bytes and consume them from the buffer.
///
/// With `strict_lines`, only bytes up to and including the last newline are
/// eligible; a trailing partial line stays buffered. Without it (timeout or
/// overflow path), everything goes — no more data is expected soon, so the
/// partial line is shown as-is.
pub fn process<W: Write>(
    buffer: &mut InputBuffer,
    registry: &HighlightRegistry,
    out: &mut W,
    strict_lines: bool,
) -> io::Result<()> {
    let eligible = if strict_lines {
        match buffer.last_line_end() {
            Some(end) => end,
            None => return Ok(()), // no complete line yet
        }
    } else {
        buffer.len()
    };
    if eligible == 0 {
        return Ok(());
    }

    {
        let region = &buffer.as_slice()[..eligible];
        let mut pos = 0;
        while pos < region.len() {
            let (line, terminated) = match region[pos..].iter().position(|&b| b == b'\n') {
                Some(rel) => (&region[pos..pos + rel], true),
                None => (&region[pos..], false),
            };
            out.write_all(&colorize_line(line, registry))?;
            if terminated {
                out.write_all(b"\n")?;
            }
            pos += line.len() + usize::from(terminated);
        }
    }

    buffer.consume_prefix(eligible);
    out.flush()
}

/// Splice style sequences into a single line (without its terminator).
///
/// Spans are applied in a single left-to-right pass: a span starting inside
/// an already-styled region is dropped, so the first match wins for any
/// byte position. Ties at the same position go to the earlier-registered
/// rule (the sort below is stable over registration order).
pub fn colorize_line(line: &[u8], registry: &HighlightRegistry) -> Vec<u8> {
    let mut spans = registry.match_all(line);
    if spans.is_empty() {
        return line.to_vec();
    }
    spans.sort_by_key(|s| s.start);

    let mut out = Vec::with_capacity(line.len() + spans.len() * 16);
    let mut pos = 0;
    for span in spans {
        if span.start < pos {
            continue;
        }
        out.extend_from_slice(&line[pos..span.start]);
        out.extend_from_slice(&span.style.prefix());
        out.extend_from_slice(&line[span.start..span.end]);
        out.extend_from_slice(STYLE_RESET);
        pos = span.end;
    }
    out.extend_from_slice(&line[pos..]);
    out
}
