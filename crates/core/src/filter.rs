//! Name-based exclusion rules for the tree walk

use std::collections::HashSet;

use crate::config::SyncConfig;

/// Directory name that is never descended into
const LOST_AND_FOUND: &str = "lost+found";

/// Decides which directories to enter and which files to skip
///
/// Symlinks are not handled here: the walker drops them before any name
/// rule is consulted.
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter {
    recursive: bool,
    ignore_names: HashSet<String>,
}

impl IgnoreFilter {
    pub fn new(recursive: bool, ignore_names: HashSet<String>) -> Self {
        Self {
            recursive,
            ignore_names,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.recursive(), config.ignore_names().clone())
    }

    /// Whether the walk should enter a directory called `name`
    pub fn should_descend(&self, name: &str) -> bool {
        if !self.recursive {
            return false;
        }

        if name.starts_with('.') || name.starts_with('_') {
            return false;
        }

        if self.ignore_names.contains(name) {
            return false;
        }

        name != LOST_AND_FOUND
    }

    /// Whether a file called `name` is excluded by the ignore list
    pub fn should_skip_file(&self, name: &str) -> bool {
        self.ignore_names.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(recursive: bool, names: &[&str]) -> IgnoreFilter {
        IgnoreFilter::new(recursive, names.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn test_non_recursive_never_descends() {
        let f = filter(false, &[]);
        assert!(!f.should_descend("docs"));
        assert!(!f.should_descend("images"));
    }

    #[test]
    fn test_hidden_and_underscore_dirs() {
        let f = filter(true, &[]);
        assert!(!f.should_descend(".git"));
        assert!(!f.should_descend(".cache"));
        assert!(!f.should_descend("_drafts"));
        assert!(f.should_descend("docs"));
        assert!(f.should_descend("my.dir"));
    }

    #[test]
    fn test_ignored_and_lost_found_dirs() {
        let f = filter(true, &["node_modules"]);
        assert!(!f.should_descend("node_modules"));
        assert!(!f.should_descend("lost+found"));
        assert!(f.should_descend("node_modules2"));
    }

    #[test]
    fn test_should_skip_file_exact_match_only() {
        let f = filter(true, &["Thumbs.db", "secret.txt"]);
        assert!(f.should_skip_file("Thumbs.db"));
        assert!(f.should_skip_file("secret.txt"));
        assert!(!f.should_skip_file("thumbs.db"));
        assert!(!f.should_skip_file("secret.txt.bak"));
        // Built-in directory rules do not apply to files
        assert!(!f.should_skip_file(".htaccess"));
        assert!(!f.should_skip_file("_config.yml"));
    }

    #[test]
    fn test_from_config() {
        let config = SyncConfig::builder("b", "/d")
            .recursive(true)
            .ignore_list("tmp")
            .build()
            .unwrap();
        let f = IgnoreFilter::from_config(&config);
        assert!(f.should_descend("src"));
        assert!(!f.should_descend("tmp"));
        assert!(f.should_skip_file("tmp"));
    }
}
