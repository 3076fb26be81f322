//! Pattern-matching gate for discovered object names.
//!
//! Filtering happens before any per-table work: a name that fails the gate is
//! recorded as filtered and costs no further catalog I/O.

/// Decides whether a discovered name is processed, from glob-style include
/// and exclude pattern lists.
///
/// A name is allowed iff it matches no exclude pattern, and either no include
/// patterns are configured or it matches at least one. Excludes win when both
/// lists match the same name.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    include_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
}

impl FilterEngine {
    pub fn new(include_patterns: Vec<String>, exclude_patterns: Vec<String>) -> Self {
        Self {
            include_patterns,
            exclude_patterns,
        }
    }

    /// Returns true if `name` passes the configured patterns.
    pub fn allowed(&self, name: &str) -> bool {
        if matches_any_pattern(name, &self.exclude_patterns) {
            return false;
        }
        self.include_patterns.is_empty() || matches_any_pattern(name, &self.include_patterns)
    }
}

/// Checks if a name matches any of the given patterns.
pub fn matches_any_pattern(name: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| glob_match(pattern, name))
}

/// Simple glob pattern matching.
///
/// Supports:
/// - `*` matches any sequence of characters
/// - `?` matches any single character
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern_chars: Vec<char> = pattern.chars().collect();
    let text_chars: Vec<char> = text.chars().collect();

    glob_match_recursive(&pattern_chars, &text_chars, 0, 0)
}

fn glob_match_recursive(pattern: &[char], text: &[char], mut pi: usize, mut ti: usize) -> bool {
    while pi < pattern.len() {
        match pattern[pi] {
            '*' => {
                // Skip consecutive stars
                while pi < pattern.len() && pattern[pi] == '*' {
                    pi += 1;
                }

                // Star at end matches everything
                if pi == pattern.len() {
                    return true;
                }

                // Try matching rest of pattern at each position
                while ti <= text.len() {
                    if glob_match_recursive(pattern, text, pi, ti) {
                        return true;
                    }
                    ti += 1;
                }
                return false;
            }
            '?' => {
                if ti >= text.len() {
                    return false;
                }
                pi += 1;
                ti += 1;
            }
            c => {
                if ti >= text.len() || text[ti] != c {
                    return false;
                }
                pi += 1;
                ti += 1;
            }
        }
    }

    // Pattern exhausted - text should also be exhausted
    ti == text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(includes: &[&str], excludes: &[&str]) -> FilterEngine {
        FilterEngine::new(
            includes.iter().map(|s| s.to_string()).collect(),
            excludes.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_no_patterns_allows_everything() {
        let f = engine(&[], &[]);
        assert!(f.allowed("orders"));
        assert!(f.allowed("anything_at_all"));
    }

    #[test]
    fn test_include_only() {
        let f = engine(&["orders*"], &[]);
        assert!(f.allowed("orders"));
        assert!(f.allowed("orders_2024"));
        assert!(!f.allowed("customers"));
    }

    #[test]
    fn test_exclude_only() {
        let f = engine(&[], &["tmp_*"]);
        assert!(f.allowed("orders"));
        assert!(!f.allowed("tmp_orders"));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        // A name matching both lists is rejected.
        let f = engine(&["orders*"], &["*_staging"]);
        assert!(f.allowed("orders"));
        assert!(!f.allowed("orders_staging"));
    }

    #[test]
    fn test_glob_match_exact() {
        assert!(glob_match("test", "test"));
        assert!(!glob_match("test", "testing"));
        assert!(!glob_match("testing", "test"));
    }

    #[test]
    fn test_glob_match_star() {
        assert!(glob_match("test_*", "test_db"));
        assert!(glob_match("test_*", "test_"));
        assert!(glob_match("test_*", "test_database_backup"));
        assert!(!glob_match("test_*", "testdb"));
        assert!(!glob_match("test_*", "mytest_db"));
    }

    #[test]
    fn test_glob_match_star_prefix() {
        assert!(glob_match("*_backup", "db_backup"));
        assert!(glob_match("*_backup", "_backup"));
        assert!(!glob_match("*_backup", "backup"));
        assert!(!glob_match("*_backup", "db_backup_old"));
    }

    #[test]
    fn test_glob_match_multiple_stars() {
        assert!(glob_match("*test*", "test"));
        assert!(glob_match("*test*", "mytestdb"));
        assert!(!glob_match("*test*", "tst"));
    }

    #[test]
    fn test_glob_match_question_mark() {
        assert!(glob_match("test?", "test1"));
        assert!(!glob_match("test?", "test"));
        assert!(!glob_match("test?", "test12"));
    }

    #[test]
    fn test_matches_any_pattern() {
        let patterns = vec!["test_*".to_string(), "*_backup".to_string()];

        assert!(matches_any_pattern("test_db", &patterns));
        assert!(matches_any_pattern("my_backup", &patterns));
        assert!(!matches_any_pattern("production", &patterns));
    }

    #[test]
    fn test_matches_any_pattern_empty() {
        let patterns: Vec<String> = vec![];
        assert!(!matches_any_pattern("anything", &patterns));
    }
}
