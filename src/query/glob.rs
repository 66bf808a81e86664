//! Shell-style name patterns
//!
//! `*` matches any run of characters (including none), `?` matches exactly
//! one character and everything else matches itself. Patterns are compiled
//! to anchored regular expressions, so a pattern must cover the whole name.
//! Matching is case-sensitive.

use regex::Regex;
use std::fmt;

/// A compiled glob pattern
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compiles a glob pattern
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&translate(pattern))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Returns true if the whole of `name` matches the pattern
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Returns the pattern source
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the pattern contains no wildcards
    pub fn is_literal(&self) -> bool {
        !self.pattern.contains(['*', '?'])
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Compiles `pattern` and tests `name`; an uncompilable pattern never matches
pub fn glob_match(pattern: &str, name: &str) -> bool {
    match GlobPattern::new(pattern) {
        Ok(glob) => glob.is_match(name),
        Err(e) => {
            tracing::debug!(pattern, error = %e, "glob pattern failed to compile");
            false
        }
    }
}

fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("^(?s:");
    let mut previous_star = false;
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '*' => {
                if !previous_star {
                    out.push_str(".*");
                }
            }
            '?' => out.push('.'),
            other => out.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
        previous_star = c == '*';
    }
    out.push_str(")$");
    out
}
