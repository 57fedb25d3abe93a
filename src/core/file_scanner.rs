use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::core::source_filter::{DEPENDENCY_DIR, SourceFilter};

/// Result of scanning a project for transformable sources.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Matching files, sorted.
    pub files: Vec<PathBuf>,
    /// Entries that could not be accessed.
    pub skipped_count: usize,
}

/// Walk `root` the way a bundler would see it: every file whose path passes
/// `filter`. Dependency and hidden directories are never entered.
pub fn scan_sources(root: &Path, filter: &SourceFilter) -> ScanResult {
    let mut result = ScanResult::default();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_pruned_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                tracing::warn!("Cannot access path: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if filter.matches(&path.to_string_lossy()) {
            result.files.push(path.to_path_buf());
        }
    }

    result.files.sort();
    result
}

fn is_pruned_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name == DEPENDENCY_DIR || name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::config::ResolvedOptions;

    fn names(result: &ScanResult, root: &Path) -> Vec<String> {
        result
            .files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_scan_default_extensions() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/components")).unwrap();
        File::create(root.join("src/main.ts")).unwrap();
        File::create(root.join("src/components/App.vue")).unwrap();
        File::create(root.join("src/style.css")).unwrap();

        let result = scan_sources(root, &SourceFilter::new(&ResolvedOptions::default()));

        assert_eq!(names(&result, root), vec!["src/components/App.vue", "src/main.ts"]);
        assert_eq!(result.skipped_count, 0);
    }

    #[test]
    fn test_scan_skips_dependency_and_hidden_dirs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("node_modules/lib")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        File::create(root.join("node_modules/lib/index.js")).unwrap();
        File::create(root.join(".cache/chunk.js")).unwrap();
        File::create(root.join("app.js")).unwrap();

        let result = scan_sources(root, &SourceFilter::new(&ResolvedOptions::default()));

        assert_eq!(names(&result, root), vec!["app.js"]);
    }
}
