//! Highlight rules, styles, and the rule registry.
//!
//! A rule pairs a compiled pattern with the SGR style to splice around its
//! matches. The registry is a dense, order-preserving table: registration
//! order is match precedence, removal shifts later entries left, and
//! shutdown drains it from the front.

use regex::bytes::Regex;
use thiserror::Error;

/// Initial registry capacity; grows by Vec's amortized doubling as rules
/// are registered.
pub const INITIAL_RULE_CAPACITY: usize = 8;

/// Marker string recognized by the built-in default rule.
pub const DEFAULT_MARKER: &str = "hello:";

/// SGR sequence that ends a styled span.
pub const STYLE_RESET: &[u8] = b"\x1b[0m";

/// Errors producing a rule from user-supplied pattern and style strings.
#[derive(Debug, Error)]
pub enum HighlightError {
    /// The condition string is not a valid regular expression.
    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A style word is not a known attribute or color name.
    #[error("unknown style word {0:?}")]
    UnknownStyleWord(String),

    /// The style string ends after `on` or `bright` without a color.
    #[error("style {0:?} ends with a dangling modifier")]
    DanglingModifier(String),

    /// The style string contains no attributes at all.
    #[error("empty style")]
    EmptyStyle,
}

/// A terminal style expressed as SGR parameter codes.
///
/// Parsed from a space-separated attribute string: attribute words (`bold`,
/// `underline`, ...), color words (`red`, `cyan`, ...), `bright <color>`
/// for the high-intensity palette, and `on <color>` for backgrounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    codes: Vec<u8>,
}

fn attribute_code(word: &str) -> Option<u8> {
    Some(match word {
        "bold" => 1,
        "dim" => 2,
        "italic" => 3,
        "underline" => 4,
        "blink" => 5,
        "reverse" => 7,
        "strike" => 9,
        _ => return None,
    })
}

fn color_code(word: &str) -> Option<u8> {
    Some(match word {
        "black" => 30,
        "red" => 31,
        "green" => 32,
        "yellow" => 33,
        "blue" => 34,
        "magenta" => 35,
        "cyan" => 36,
        "white" => 37,
        _ => return None,
    })
}

impl Style {
    /// Parse a style attribute string such as `"bold red"` or
    /// `"underline on bright blue"`.
    pub fn parse(spec: &str) -> Result<Self, HighlightError> {
        let mut codes = Vec::new();
        let mut background = false;
        let mut bright = false;

        for word in spec.split_whitespace() {
            let word = word.to_ascii_lowercase();
            match word.as_str() {
                "on" => background = true,
                "bright" => bright = true,
                _ => {
                    let code = if let Some(base) = color_code(&word) {
                        let mut code = base;
                        if bright {
                            code += 60;
                        }
                        if background {
                            code += 10;
                        }
                        background = false;
                        bright = false;
                        code
                    } else if let Some(attr) = attribute_code(&word) {
                        if background || bright {
                            // "on bold" and friends make no sense
                            return Err(HighlightError::UnknownStyleWord(word));
                        }
                        attr
                    } else {
                        return Err(HighlightError::UnknownStyleWord(word));
                    };
                    codes.push(code);
                }
            }
        }

        if background || bright {
            return Err(HighlightError::DanglingModifier(spec.to_string()));
        }
        if codes.is_empty() {
            return Err(HighlightError::EmptyStyle);
        }
        Ok(Self { codes })
    }

    /// The escape sequence that starts this style.
    pub fn prefix(&self) -> Vec<u8> {
        let params: Vec<String> = self.codes.iter().map(|c| c.to_string()).collect();
        format!("\x1b[{}m", params.join(";")).into_bytes()
    }
}

/// One active highlight rule. Identity is the condition string: two rules
/// compare equal when their conditions match, regardless of style.
#[derive(Debug, Clone)]
pub struct HighlightRule {
    condition: String,
    regex: Regex,
    style: Style,
}

impl PartialEq for HighlightRule {
    fn eq(&self, other: &Self) -> bool {
        self.condition == other.condition
    }
}

impl HighlightRule {
    /// Compile `condition` and pair it with `style`.
    ///
    /// The byte-oriented regex engine is used because the stream is not
    /// guaranteed to be UTF-8.
    pub fn new(condition: &str, style: Style) -> Result<Self, HighlightError> {
        let regex = Regex::new(condition).map_err(|source| HighlightError::Pattern {
            pattern: condition.to_string(),
            source,
        })?;
        Ok(Self {
            condition: condition.to_string(),
            regex,
            style,
        })
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// A matched span on a line, carrying the style to splice around it.
#[derive(Debug, Clone, Copy)]
pub struct MatchSpan<'a> {
    pub start: usize,
    pub end: usize,
    pub style: &'a Style,
}

/// Dense, order-preserving table of active rules.
#[derive(Debug, Default)]
pub struct HighlightRegistry {
    rules: Vec<HighlightRule>,
}

impl HighlightRegistry {
    pub fn new() -> Self {
        Self {
            rules: Vec::with_capacity(INITIAL_RULE_CAPACITY),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HighlightRule> {
        self.rules.iter()
    }

    /// Register a rule. A rule whose condition is already registered
    /// replaces the existing entry in place, keeping its position and
    /// therefore its match precedence.
    pub fn add(&mut self, rule: HighlightRule) {
        if let Some(existing) = self
            .rules
            .iter_mut()
            .find(|r| r.condition == rule.condition)
        {
            log::debug!("Replacing highlight rule {:?}", rule.condition);
            *existing = rule;
        } else {
            log::debug!("Registering highlight rule {:?}", rule.condition);
            self.rules.push(rule);
        }
    }

    /// Remove the first rule whose condition equals `condition`, shifting
    /// later entries left. A missing condition is a silent no-op.
    pub fn remove(&mut self, condition: &str) -> bool {
        match self.rules.iter().position(|r| r.condition == condition) {
            Some(idx) => {
                self.rules.remove(idx);
                log::debug!("Removed highlight rule {condition:?}");
                true
            }
            None => false,
        }
    }

    /// All non-empty match spans on `line`, in registration order. Overlap
    /// resolution is the caller's job (first match wins per byte position).
    pub fn match_all<'a>(&'a self, line: &[u8]) -> Vec<MatchSpan<'a>> {
        let mut spans = Vec::new();
        for rule in &self.rules {
            for m in rule.regex.find_iter(line) {
                if m.start() == m.end() {
                    continue; // zero-width match, nothing to style
                }
                spans.push(MatchSpan {
                    start: m.start(),
                    end: m.end(),
                    style: &rule.style,
                });
            }
        }
        spans
    }

    /// Shutdown idiom: repeatedly remove the entry at position 0 until the
    /// registry is empty.
    pub fn drain(&mut self) {
        while let Some(first) = self.rules.first() {
            let condition = first.condition.clone();
            self.remove(&condition);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(condition: &str, style: &str) -> HighlightRule {
        HighlightRule::new(condition, Style::parse(style).unwrap()).unwrap()
    }

    #[test]
    fn style_parse_builds_sgr_prefix() {
        let style = Style::parse("bold red").unwrap();
        assert_eq!(style.prefix(), b"\x1b[1;31m".to_vec());
    }

    #[test]
    fn style_parse_handles_background_and_bright() {
        let style = Style::parse("underline on blue").unwrap();
        assert_eq!(style.prefix(), b"\x1b[4;44m".to_vec());

        let style = Style::parse("bright green").unwrap();
        assert_eq!(style.prefix(), b"\x1b[92m".to_vec());

        let style = Style::parse("on bright cyan").unwrap();
        assert_eq!(style.prefix(), b"\x1b[106m".to_vec());
    }

    #[test]
    fn style_parse_rejects_unknown_words() {
        assert!(matches!(
            Style::parse("sparkly"),
            Err(HighlightError::UnknownStyleWord(_))
        ));
    }

    #[test]
    fn style_parse_rejects_dangling_modifiers() {
        assert!(matches!(
            Style::parse("red on"),
            Err(HighlightError::DanglingModifier(_))
        ));
        assert!(matches!(Style::parse(""), Err(HighlightError::EmptyStyle)));
    }

    #[test]
    fn bad_pattern_is_reported_with_its_source() {
        let err = HighlightRule::new("(unclosed", Style::parse("red").unwrap()).unwrap_err();
        assert!(matches!(err, HighlightError::Pattern { .. }));
    }

    #[test]
    fn add_replaces_duplicate_condition_in_place() {
        let mut registry = HighlightRegistry::new();
        registry.add(rule("ERROR", "red"));
        registry.add(rule("WARN", "yellow"));
        registry.add(rule("ERROR", "bold red"));

        assert_eq!(registry.len(), 2);
        let first = registry.iter().next().unwrap();
        assert_eq!(first.condition(), "ERROR");
        assert_eq!(first.style().prefix(), b"\x1b[1;31m".to_vec());
    }

    #[test]
    fn remove_shifts_later_entries_left() {
        let mut registry = HighlightRegistry::new();
        registry.add(rule("a", "red"));
        registry.add(rule("b", "green"));
        registry.add(rule("c", "blue"));

        assert!(registry.remove("b"));
        let conditions: Vec<&str> = registry.iter().map(|r| r.condition()).collect();
        assert_eq!(conditions, ["a", "c"]);
    }

    #[test]
    fn remove_missing_condition_is_a_no_op() {
        let mut registry = HighlightRegistry::new();
        registry.add(rule("a", "red"));
        assert!(!registry.remove("zzz"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn drain_terminates_in_count_steps() {
        let mut registry = HighlightRegistry::new();
        for condition in ["a", "b", "c", "d"] {
            registry.add(rule(condition, "red"));
        }

        let mut steps = 0;
        while !registry.is_empty() {
            let first = registry.iter().next().unwrap().condition().to_string();
            assert!(registry.remove(&first));
            steps += 1;
        }
        assert_eq!(steps, 4);
    }

    #[test]
    fn drain_empties_the_registry() {
        let mut registry = HighlightRegistry::new();
        registry.add(rule("a", "red"));
        registry.add(rule("b", "green"));
        registry.drain();
        assert!(registry.is_empty());
    }

    #[test]
    fn match_all_yields_spans_in_registration_order() {
        let mut registry = HighlightRegistry::new();
        registry.add(rule("def", "green"));
        registry.add(rule("abc", "red"));

        let spans = registry.match_all(b"abc def");
        assert_eq!(spans.len(), 2);
        // "def" registered first, so its span comes first even though it
        // starts later in the line
        assert_eq!((spans[0].start, spans[0].end), (4, 7));
        assert_eq!((spans[1].start, spans[1].end), (0, 3));
    }

    #[test]
    fn match_all_skips_zero_width_matches() {
        let mut registry = HighlightRegistry::new();
        registry.add(rule("x*", "red"));
        let spans = registry.match_all(b"ax");
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (1, 2));
    }
}
