use regex::Regex;

use crate::config::ResolvedOptions;

/// Path fragment that is never transformed, regardless of the globs.
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Translate a glob into a regex anchored at the end of the id.
///
/// Supported syntax:
/// - `**` matches anything, including `/`
/// - `*` matches within one path segment (no `/`)
/// - `?` matches a single character
///
/// Everything else is literal; there is no brace expansion and no `[...]`
/// character class.
pub fn glob_to_regex(glob: &str) -> String {
    let mut pattern = String::with_capacity(glob.len() * 2);
    let mut chars = glob.chars().peekable();
    let mut literal = [0u8; 4];

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                pattern.push_str(".*");
            }
            '*' => pattern.push_str("[^/]*"),
            '?' => pattern.push('.'),
            other => pattern.push_str(&regex::escape(other.encode_utf8(&mut literal))),
        }
    }

    pattern.push('$');
    pattern
}

/// Compiled include/exclude globs for one options snapshot.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl SourceFilter {
    pub fn new(options: &ResolvedOptions) -> Self {
        Self {
            include: compile_globs(&options.include),
            exclude: compile_globs(&options.exclude),
        }
    }

    /// A file is eligible when it is outside the dependency directory, matches
    /// at least one include glob and no exclude glob.
    pub fn matches(&self, id: &str) -> bool {
        if id.contains(DEPENDENCY_DIR) {
            return false;
        }

        let included = self.include.iter().any(|re| re.is_match(id));
        let excluded = self.exclude.iter().any(|re| re.is_match(id));

        included && !excluded
    }
}

fn compile_globs(globs: &[String]) -> Vec<Regex> {
    globs
        .iter()
        .filter_map(|glob| match Regex::new(&glob_to_regex(glob)) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!("Ignoring glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect()
}

/// One-shot eligibility check. Prefer a cached [`SourceFilter`] in loops.
pub fn should_transform(id: &str, options: &ResolvedOptions) -> bool {
    SourceFilter::new(options).matches(id)
}
