//! Wildcard matching for include/exclude filters
//!
//! Patterns are deliberately simple: a literal name, `*suffix` or `prefix*`.
//! A `*` anywhere else never matches.

/// Test `name` against a single filter pattern
///
/// # Examples
/// ```
/// use backsync::matcher::matches;
///
/// assert!(matches("report.txt", "*.txt"));
/// assert!(matches("report.txt", "report*"));
/// assert!(!matches("abxcd", "ab*cd"));
/// ```
pub fn matches(name: &str, pattern: &str) -> bool {
    if name == pattern {
        return true;
    }
    if !pattern.contains('*') {
        return false;
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        return !suffix.contains('*') && name.ends_with(suffix);
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return !prefix.contains('*') && name.starts_with(prefix);
    }

    false
}

/// Test `name` against every pattern, true on the first hit
pub fn matches_any<S: AsRef<str>>(name: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|p| matches(name, p.as_ref()))
}

/// Check whether a pattern uses only the supported wildcard positions
pub fn is_supported(pattern: &str) -> bool {
    let inner = pattern
        .strip_prefix('*')
        .or_else(|| pattern.strip_suffix('*'))
        .unwrap_or(pattern);
    !inner.contains('*')
}

/// Include/exclude filter for one axis (files or directories)
///
/// Holding exclude and include patterns at the same time is not representable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// Everything passes
    #[default]
    All,

    /// Anything matching one of the patterns is dropped
    Exclude(Vec<String>),

    /// Only things matching one of the patterns pass
    Include(Vec<String>),
}

impl Filter {
    /// Build a filter from optional exclude and include lists
    ///
    /// Returns `None` when both lists are non-empty.
    pub fn from_lists(exclude: Vec<String>, include: Vec<String>) -> Option<Self> {
        match (exclude.is_empty(), include.is_empty()) {
            (true, true) => Some(Filter::All),
            (false, true) => Some(Filter::Exclude(exclude)),
            (true, false) => Some(Filter::Include(include)),
            (false, false) => None,
        }
    }

    /// Decide whether an entry passes, given every name it may be known by
    ///
    /// An entry matches when any of its names matches any pattern.
    pub fn allows(&self, names: &[&str]) -> bool {
        match self {
            Filter::All => true,
            Filter::Exclude(patterns) => !names.iter().any(|n| matches_any(n, patterns)),
            Filter::Include(patterns) => names.iter().any(|n| matches_any(n, patterns)),
        }
    }

    /// The configured patterns, if any
    pub fn patterns(&self) -> &[String] {
        match self {
            Filter::All => &[],
            Filter::Exclude(p) | Filter::Include(p) => p,
        }
    }
}
