//! Path pattern compilation.
//!
//! A pattern is a dot-delimited path in which each `*` stands for exactly one
//! path segment: `menu.*` matches `menu.news` but not `menu.news.world`. The
//! match is anchored over the whole candidate path.

use regex::Regex;

use crate::error::{ActionError, ActionResult};

/// What a single `*` wildcard matches: one path segment, never a dot.
const SEGMENT_CLASS: &str = r"[\w\d\-_]+";

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    /// Compile `pattern` into an anchored matching rule. Literal segments are
    /// regex-escaped; each `*` becomes a single-segment match.
    pub fn compile(pattern: &str) -> ActionResult<Self> {
        if pattern.is_empty() {
            return Err(ActionError::InvalidPattern("empty pattern".to_string()));
        }
        let mut rule = String::with_capacity(pattern.len() + 16);
        rule.push('^');
        for (idx, literal) in pattern.split('*').enumerate() {
            if idx > 0 {
                rule.push_str(SEGMENT_CLASS);
            }
            rule.push_str(&regex::escape(literal));
        }
        rule.push('$');
        let regex = Regex::new(&rule)
            .map_err(|error| ActionError::InvalidPattern(format!("{pattern}: {error}")))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True when the pattern contains no wildcard and can only match one path.
    pub fn is_exact(&self) -> bool {
        !self.source.contains('*')
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Pattern selecting all siblings of `path`: the parent path with a `*` leaf.
/// `menu.news.publish` becomes `menu.news.*`; a single-segment path becomes `*`.
pub fn parent_pattern(path: &str) -> String {
    match path.rfind('.') {
        Some(idx) => format!("{}.*", &path[..idx]),
        None => "*".to_string(),
    }
}
