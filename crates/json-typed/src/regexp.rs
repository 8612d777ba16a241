//! Regular expression values.
//!
//! A [`RegExp`] keeps the pattern source and the flag string separately.
//! Its textual form is the delimited literal `/source/flags`; the source is
//! kept escaped so that the literal can always be split at its last `/`.

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::TypedJsonError;

/// Flags in canonical order.
const KNOWN_FLAGS: &str = "dgimsuvy";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegExp {
    source: String,
    flags: String,
}

impl RegExp {
    /// Builds a regular expression from a pattern and a flag string.
    ///
    /// Flags are validated against `dgimsuvy` and sorted. An empty pattern
    /// becomes `(?:)`, and forward slashes / line terminators are escaped.
    pub fn new(source: &str, flags: &str) -> Result<Self, TypedJsonError> {
        Ok(Self {
            source: escape_source(source),
            flags: canonical_flags(flags)?,
        })
    }

    /// Parses a delimited literal such as `/a+b/gi`.
    ///
    /// Text that is not delimited is taken as the whole pattern, with no
    /// flags.
    pub fn parse(literal: &str) -> Result<Self, TypedJsonError> {
        if let Some(body) = literal.strip_prefix('/') {
            if let Some(end) = body.rfind('/') {
                return Self::new(&body[..end], &body[end + 1..]);
            }
        }
        Self::new(literal, "")
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(flag)
    }

    /// Compiles the pattern with the `regex` engine.
    ///
    /// `i`, `m`, `s` and `u` map onto the builder options. `g`, `y` and `d`
    /// describe matching state rather than the pattern and are ignored.
    pub fn to_regex(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&self.source.replace("\\/", "/"))
            .case_insensitive(self.has_flag('i'))
            .multi_line(self.has_flag('m'))
            .dot_matches_new_line(self.has_flag('s'))
            .unicode(self.has_flag('u') || self.has_flag('v'))
            .build()
    }
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

fn canonical_flags(flags: &str) -> Result<String, TypedJsonError> {
    let mut seen = [false; KNOWN_FLAGS.len()];
    for ch in flags.chars() {
        match KNOWN_FLAGS.find(ch) {
            Some(i) if !seen[i] => seen[i] = true,
            _ => return Err(TypedJsonError::InvalidRegExpFlags(flags.to_string())),
        }
    }
    Ok(KNOWN_FLAGS
        .chars()
        .zip(seen)
        .filter_map(|(ch, on)| on.then_some(ch))
        .collect())
}

fn escape_source(source: &str) -> String {
    if source.is_empty() {
        return "(?:)".to_string();
    }
    let mut out = String::with_capacity(source.len());
    let mut in_class = false;
    let mut chars = source.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                out.push('\\');
                match chars.next() {
                    Some('\n') => out.push('n'),
                    Some('\r') => out.push('r'),
                    Some(next) => out.push(next),
                    None => {}
                }
            }
            '/' if !in_class => out.push_str("\\/"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '[' => {
                in_class = true;
                out.push(ch);
            }
            ']' => {
                in_class = false;
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}
