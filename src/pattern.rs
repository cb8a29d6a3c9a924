//! Filter-string parsing: one raw filter becomes an ordered set of glob
//! patterns, tried left to right against each directory.

use globset::{Glob, GlobMatcher};
use log::debug;

/// Default character separating patterns in a filter string.
pub const PATTERN_DELIMITER: char = '|';

/// The pattern every walk falls back to when the filter contains nothing
/// usable.
pub const MATCH_EVERYTHING: &str = "*";

/// One glob pattern compiled for matching entry base names.
#[derive(Clone, Debug)]
pub struct Pattern {
    text: String,
    matcher: GlobMatcher,
}

impl Pattern {
    /// Compile `text` into a matcher. A fragment that is not valid glob
    /// syntax is demoted to a literal match rather than rejected; filter
    /// input never fails to parse.
    fn compile(text: &str) -> Pattern {
        let matcher = match Glob::new(text) {
            Ok(glob) => glob.compile_matcher(),
            Err(err) => {
                debug!("pattern {:?} is not valid glob syntax ({}), matching literally", text, err);
                let escaped = globset::escape(text);
                Glob::new(&escaped)
                    .unwrap_or_else(|_| Glob::new(MATCH_EVERYTHING).unwrap())
                    .compile_matcher()
            }
        };
        Pattern {
            text: text.to_string(),
            matcher,
        }
    }

    /// The pattern as written in the filter string.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when `name` (an entry base name) matches this pattern.
    pub fn matches(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }
}

/// Ordered set of distinct, non-blank patterns parsed from one filter string.
///
/// Never empty: a filter with no usable fragments collapses to the single
/// wildcard pattern. Iteration order equals the left-to-right order in the
/// input, which in turn fixes the result ordering for same-directory matches
/// across patterns.
#[derive(Clone, Debug)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Split `filter` on `delimiter`, dropping blank fragments and duplicate
    /// patterns (first occurrence wins).
    pub fn parse(filter: &str, delimiter: char) -> PatternSet {
        let mut patterns: Vec<Pattern> = Vec::new();
        for fragment in filter.split(delimiter) {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            if patterns.iter().any(|p| p.text == fragment) {
                continue;
            }
            patterns.push(Pattern::compile(fragment));
        }
        if patterns.is_empty() {
            patterns.push(Pattern::compile(MATCH_EVERYTHING));
        }
        PatternSet { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        // Always false in practice: parse leaves at least one pattern.
        self.patterns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        PatternSet::parse(MATCH_EVERYTHING, PATTERN_DELIMITER)
    }
}
