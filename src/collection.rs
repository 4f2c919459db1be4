//! The ordered collection of testcases and its editing operations.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::ManagerError;
use crate::testcase::{Field, FieldPatch, TestcaseEntry};

/// An ordered collection of testcases.
///
/// The order is meaningful: it is the export order. Names are unique within the
/// collection: the scanner builds it from the pairs it finds (one entry per basename)
/// and the importer only updates existing entries matched by name, it never adds new
/// ones.
///
/// The reorder operations take the current selection (0-based positions) as an explicit
/// argument and return the selection tracking the moved entries, so that the caller can
/// re-render from collection + selection without any shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestcaseCollection {
    entries: Vec<TestcaseEntry>,
}

impl TestcaseCollection {
    /// Make a new collection from a list of entries.
    pub fn new(entries: Vec<TestcaseEntry>) -> TestcaseCollection {
        TestcaseCollection { entries }
    }

    /// The number of testcases in the collection.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection contains no testcase.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at the given position, if any.
    pub fn get(&self, index: usize) -> Option<&TestcaseEntry> {
        self.entries.get(index)
    }

    /// Mutable access to the entry at the given position, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut TestcaseEntry> {
        self.entries.get_mut(index)
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &TestcaseEntry> {
        self.entries.iter()
    }

    /// The position of the entry with the given name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    /// Move every selected entry one position towards the front.
    ///
    /// Each selected index, in ascending order, is swapped with its predecessor. This is
    /// a pairwise swap per selected entry, not a block move: non-contiguous selections
    /// can change their relative adjacency, matching the historical behaviour of the
    /// tool. The call is a no-op when nothing is selected or the first entry is part of
    /// the selection.
    ///
    /// Returns the new positions of the selected entries.
    pub fn move_up(&mut self, selection: &[usize]) -> Vec<usize> {
        let selection = self.normalize_selection(selection);
        if selection.is_empty() || selection[0] == 0 {
            return selection;
        }
        for &index in &selection {
            self.entries.swap(index - 1, index);
        }
        selection.into_iter().map(|index| index - 1).collect()
    }

    /// Move every selected entry one position towards the back.
    ///
    /// Symmetric to [`move_up`](TestcaseCollection::move_up): each selected index, in
    /// descending order, is swapped with its successor. No-op when nothing is selected
    /// or the last entry is part of the selection.
    ///
    /// Returns the new positions of the selected entries.
    pub fn move_down(&mut self, selection: &[usize]) -> Vec<usize> {
        let selection = self.normalize_selection(selection);
        if selection.is_empty() || selection[selection.len() - 1] == self.len() - 1 {
            return selection;
        }
        for &index in selection.iter().rev() {
            self.entries.swap(index, index + 1);
        }
        selection.into_iter().map(|index| index + 1).collect()
    }

    /// Apply a patch to every selected entry.
    pub fn bulk_update(&mut self, selection: &[usize], patch: &FieldPatch) {
        for index in self.normalize_selection(selection) {
            patch.apply_to(&mut self.entries[index]);
        }
    }

    /// Update the selected entries from raw user-entered values.
    ///
    /// A blank value leaves the corresponding field untouched. All the values are
    /// validated before any entry is modified, so a failed update leaves the collection
    /// exactly as it was.
    pub fn bulk_update_raw<'a, I>(
        &mut self,
        selection: &[usize],
        values: I,
    ) -> Result<(), ManagerError>
    where
        I: IntoIterator<Item = (Field, &'a str)>,
    {
        let patch = FieldPatch::parse(values, true)?;
        self.bulk_update(selection, &patch);
        Ok(())
    }

    /// Update a single entry from raw user-entered values.
    ///
    /// Unlike [`bulk_update_raw`](TestcaseCollection::bulk_update_raw) blank values are
    /// not skipped here: every value must be a valid integer or the whole edit is
    /// rejected and the entry is left unchanged.
    pub fn edit_raw<'a, I>(&mut self, index: usize, values: I) -> Result<(), ManagerError>
    where
        I: IntoIterator<Item = (Field, &'a str)>,
    {
        let patch = FieldPatch::parse(values, false)?;
        if let Some(entry) = self.entries.get_mut(index) {
            patch.apply_to(entry);
        }
        Ok(())
    }

    /// Reorder the collection so that the given names come first, in the given order.
    ///
    /// Names not present in the collection are ignored; the entries whose name is not
    /// listed keep their relative order, after all the listed ones.
    pub fn reorder_by_names(&mut self, names: &[String]) {
        let mut front = Vec::with_capacity(names.len());
        for name in names {
            if let Some(index) = self.position_of(name) {
                front.push(self.entries.remove(index));
            }
        }
        front.append(&mut self.entries);
        self.entries = front;
    }

    /// Sorted, deduplicated copy of a selection, with the out-of-range positions
    /// dropped.
    fn normalize_selection(&self, selection: &[usize]) -> Vec<usize> {
        selection
            .iter()
            .copied()
            .filter(|&index| index < self.len())
            .sorted()
            .dedup()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn collection(names: &[&str]) -> TestcaseCollection {
        TestcaseCollection::new(names.iter().map(|&name| TestcaseEntry::new(name)).collect())
    }

    fn names(collection: &TestcaseCollection) -> Vec<&str> {
        collection.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn test_move_up_single() {
        let mut coll = collection(&["a.in", "b.in", "c.in"]);
        let selection = coll.move_up(&[1]);
        assert_eq!(names(&coll), vec!["b.in", "a.in", "c.in"]);
        assert_eq!(selection, vec![0]);
    }

    #[test]
    fn test_move_up_at_top_is_noop() {
        let mut coll = collection(&["a.in", "b.in", "c.in"]);
        let selection = coll.move_up(&[0, 2]);
        assert_eq!(names(&coll), vec!["a.in", "b.in", "c.in"]);
        assert_eq!(selection, vec![0, 2]);
    }

    #[test]
    fn test_move_up_non_contiguous_swaps_independently() {
        let mut coll = collection(&["a.in", "b.in", "c.in", "d.in"]);
        let selection = coll.move_up(&[1, 3]);
        // each selected entry moves exactly one slot, they become adjacent
        assert_eq!(names(&coll), vec!["b.in", "a.in", "d.in", "c.in"]);
        assert_eq!(selection, vec![0, 2]);
    }

    #[test]
    fn test_move_up_contiguous_block() {
        let mut coll = collection(&["a.in", "b.in", "c.in", "d.in"]);
        let selection = coll.move_up(&[2, 3]);
        assert_eq!(names(&coll), vec!["a.in", "c.in", "d.in", "b.in"]);
        assert_eq!(selection, vec![1, 2]);
    }

    #[test]
    fn test_move_down_single() {
        let mut coll = collection(&["a.in", "b.in", "c.in"]);
        let selection = coll.move_down(&[1]);
        assert_eq!(names(&coll), vec!["a.in", "c.in", "b.in"]);
        assert_eq!(selection, vec![2]);
    }

    #[test]
    fn test_move_down_at_bottom_is_noop() {
        let mut coll = collection(&["a.in", "b.in", "c.in"]);
        let selection = coll.move_down(&[0, 2]);
        assert_eq!(names(&coll), vec!["a.in", "b.in", "c.in"]);
        assert_eq!(selection, vec![0, 2]);
    }

    #[test]
    fn test_move_down_contiguous_block() {
        let mut coll = collection(&["a.in", "b.in", "c.in", "d.in"]);
        let selection = coll.move_down(&[0, 1]);
        assert_eq!(names(&coll), vec!["c.in", "a.in", "b.in", "d.in"]);
        assert_eq!(selection, vec![1, 2]);
    }

    #[test]
    fn test_move_up_then_down_restores_order() {
        let mut coll = collection(&["a.in", "b.in", "c.in"]);
        let original = coll.clone();
        let selection = coll.move_up(&[1]);
        let selection = coll.move_down(&selection);
        assert_eq!(coll, original);
        assert_eq!(selection, vec![1]);
    }

    #[test]
    fn test_move_with_empty_selection_is_noop() {
        let mut coll = collection(&["a.in", "b.in"]);
        assert_eq!(coll.move_up(&[]), Vec::<usize>::new());
        assert_eq!(coll.move_down(&[]), Vec::<usize>::new());
        assert_eq!(names(&coll), vec!["a.in", "b.in"]);
    }

    #[test]
    fn test_selection_normalization() {
        let mut coll = collection(&["a.in", "b.in", "c.in"]);
        // duplicated, unsorted and out-of-range indices
        let selection = coll.move_up(&[2, 1, 2, 99]);
        assert_eq!(names(&coll), vec!["b.in", "c.in", "a.in"]);
        assert_eq!(selection, vec![0, 1]);
    }

    #[test]
    fn test_bulk_update_sets_selected_only() {
        let mut coll = collection(&["a.in", "b.in", "c.in"]);
        coll.bulk_update_raw(&[0, 1], [(Field::Score, "5")]).unwrap();
        assert_eq!(coll.get(0).unwrap().score, 5);
        assert_eq!(coll.get(1).unwrap().score, 5);
        assert_eq!(coll.get(2).unwrap().score, 0);
        // the other fields are untouched
        assert_eq!(coll.get(0).unwrap().time_limit, 2000);
    }

    #[test]
    fn test_bulk_update_all_blank_is_noop() {
        let mut coll = collection(&["a.in", "b.in"]);
        let original = coll.clone();
        coll.bulk_update_raw(&[0, 1], crate::testcase::FIELDS.map(|f| (f, "")))
            .unwrap();
        assert_eq!(coll, original);
    }

    #[test]
    fn test_bulk_update_is_atomic() {
        let mut coll = collection(&["a.in", "b.in"]);
        let original = coll.clone();
        let err = coll
            .bulk_update_raw(&[0, 1], [(Field::Score, "5"), (Field::TimeLimit, "fast")])
            .unwrap_err();
        match err {
            ManagerError::InvalidValue { field, value } => {
                assert_eq!(field, Field::TimeLimit);
                assert_eq!(value, "fast");
            }
            _ => panic!("Wrong error: {:?}", err),
        }
        // no entry has been modified, not even by the valid score value
        assert_eq!(coll, original);
    }

    #[test]
    fn test_edit_rejects_blank() {
        let mut coll = collection(&["a.in"]);
        let original = coll.clone();
        assert!(coll
            .edit_raw(0, [(Field::Score, "7"), (Field::SubtaskId, "")])
            .is_err());
        assert_eq!(coll, original);
    }

    #[test]
    fn test_edit_rejects_non_integer() {
        let mut coll = collection(&["a.in"]);
        let original = coll.clone();
        assert!(coll
            .edit_raw(0, [(Field::Score, "7"), (Field::MemoryLimit, "2GiB")])
            .is_err());
        assert_eq!(coll, original);
    }

    #[test]
    fn test_edit_updates_all_fields() {
        let mut coll = collection(&["a.in"]);
        coll.edit_raw(
            0,
            [
                (Field::TimeLimit, "1000"),
                (Field::MemoryLimit, "262144"),
                (Field::Score, "10"),
                (Field::SubtaskId, "2"),
            ],
        )
        .unwrap();
        let entry = coll.get(0).unwrap();
        assert_eq!(entry.time_limit, 1000);
        assert_eq!(entry.memory_limit, 262_144);
        assert_eq!(entry.score, 10);
        assert_eq!(entry.subtask_id, 2);
    }

    #[test]
    fn test_reorder_by_names() {
        let mut coll = collection(&["a.in", "b.in", "c.in", "d.in"]);
        coll.reorder_by_names(&["c.in".into(), "missing.in".into(), "a.in".into()]);
        // listed names first in the given order, the others keep their relative order
        assert_eq!(names(&coll), vec!["c.in", "a.in", "b.in", "d.in"]);
    }
}
