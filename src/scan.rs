//! The directory scanner that builds a collection from the `.in`/`.ans` pairs.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::collection::TestcaseCollection;
use crate::error::ManagerError;
use crate::testcase::TestcaseEntry;

/// Suffix of the input files.
const INPUT_SUFFIX: &str = ".in";
/// Suffix of the answer files.
const ANSWER_SUFFIX: &str = ".ans";

/// Scan a directory looking for `name.in`/`name.ans` pairs.
///
/// The scan is not recursive. A pair is valid only when both the `.in` and the `.ans`
/// file with the same basename are present; unpaired files are ignored. The resulting
/// collection contains one entry per pair, named after the input file (extension
/// included), in ascending lexical order of basename and with the default metadata.
///
/// Fails with [`ManagerError::DirectoryNotFound`] if `dir` is not an existing
/// directory. The returned collection replaces any previously loaded one: there is no
/// merge with prior state.
pub fn scan_directory<P: AsRef<Path>>(dir: P) -> Result<TestcaseCollection, ManagerError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ManagerError::DirectoryNotFound(dir.into()));
    }
    debug!("Scanning directory {}", dir.display());
    // basename -> input file name, sorted by basename
    let mut inputs: BTreeMap<String, String> = BTreeMap::new();
    let mut answers: HashSet<String> = HashSet::new();
    for entry in std::fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().to_string();
        if let Some(base) = name.strip_suffix(INPUT_SUFFIX) {
            inputs.insert(base.to_string(), name);
        } else if let Some(base) = name.strip_suffix(ANSWER_SUFFIX) {
            answers.insert(base.to_string());
        }
    }
    let entries: Vec<_> = inputs
        .into_iter()
        .filter(|(base, _)| answers.contains(base))
        .map(|(_, file)| TestcaseEntry::new(file))
        .collect();
    info!("Found {} testcase pairs in {}", entries.len(), dir.display());
    Ok(TestcaseCollection::new(entries))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn make_dir(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            fs::write(dir.path().join(file), "").unwrap();
        }
        dir
    }

    fn scanned_names(dir: &Path) -> Vec<String> {
        scan_directory(dir)
            .unwrap()
            .iter()
            .map(|entry| entry.name.clone())
            .collect()
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = scan_directory(&missing).unwrap_err();
        match err {
            ManagerError::DirectoryNotFound(path) => assert_eq!(path, missing),
            _ => panic!("Wrong error: {:?}", err),
        }
    }

    #[test]
    fn test_only_complete_pairs() {
        let dir = make_dir(&["a.in", "a.ans", "b.in", "c.ans"]);
        let coll = scan_directory(dir.path()).unwrap();
        assert_eq!(coll.len(), 1);
        let entry = coll.get(0).unwrap();
        assert_eq!(entry.name, "a.in");
        assert_eq!(entry.time_limit, 2000);
        assert_eq!(entry.memory_limit, 1_048_576);
        assert_eq!(entry.score, 0);
        assert_eq!(entry.subtask_id, 0);
    }

    #[test]
    fn test_lexical_order() {
        let dir = make_dir(&[
            "10.in", "10.ans", "2.in", "2.ans", "1.in", "1.ans", "alpha.in", "alpha.ans",
        ]);
        assert_eq!(scanned_names(dir.path()), vec!["1.in", "10.in", "2.in", "alpha.in"]);
    }

    #[test]
    fn test_unrelated_files_ignored() {
        let dir = make_dir(&["a.in", "a.ans", "a.out", "README.md", "gen.py"]);
        assert_eq!(scanned_names(dir.path()), vec!["a.in"]);
    }

    #[test]
    fn test_dotted_basenames() {
        let dir = make_dir(&["x.y.in", "x.y.ans", "x.in", "y.ans"]);
        assert_eq!(scanned_names(dir.path()), vec!["x.y.in"]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(scan_directory(dir.path()).unwrap().is_empty());
    }
}
