//! The record store: a validated, duplicate-free collection of students
//! mirrored to a flat `roll|name|grade` file.
//!
//! Every mutating operation rewrites the whole backing file. If that write
//! fails the operation returns [`RecordError::PersistenceFailure`], but the
//! in-memory change stays in place; the next successful save brings the file
//! back in line.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::RecordError;
use crate::model::{parse_grade, validate_name, validate_roll, Roll, StudentRecord};

/// Result of an [`RecordStore::update`] call.
#[derive(Debug)]
pub struct UpdateOutcome {
    /// The record after the accepted changes were applied.
    pub record: StudentRecord,
    /// Fields that were provided but failed validation.
    pub rejected: Vec<RecordError>,
    /// Whether any field was changed (and the store persisted).
    pub changed: bool,
}

/// In-memory student records synchronised with a backing file.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<StudentRecord>,
}

impl RecordStore {
    /// Create an empty store backed by `path`. Nothing is read until
    /// [`load`](Self::load) is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Create a store and load whatever the backing file holds.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RecordError> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in collection order.
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read the backing file and append every acceptable line.
    ///
    /// Lines that do not parse, fail validation, or repeat a roll already in
    /// the collection are skipped silently. A missing file is not an error.
    /// Returns the number of records added.
    pub fn load(&mut self) -> Result<usize, RecordError> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no backing file at {}", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(self.persistence_error(e)),
        };

        let content = String::from_utf8_lossy(&bytes);
        let mut added = 0;
        for (idx, line) in content.lines().enumerate() {
            match StudentRecord::from_storage_line(line) {
                Some(record) if self.position(record.roll()).is_none() => {
                    self.records.push(record);
                    added += 1;
                }
                _ => tracing::debug!("skipping line {} of {}", idx + 1, self.path.display()),
            }
        }

        if added > 0 {
            tracing::info!("loaded {added} records from {}", self.path.display());
        }
        Ok(added)
    }

    /// Overwrite the backing file with the current collection.
    pub fn save(&self) -> Result<(), RecordError> {
        let mut content = String::new();
        for record in &self.records {
            content.push_str(&record.to_storage_line());
            content.push('\n');
        }

        fs::write(&self.path, content).map_err(|e| {
            tracing::warn!("failed to save {}: {e}", self.path.display());
            self.persistence_error(e)
        })?;
        tracing::debug!(
            "saved {} records to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Validate and append a new record, then persist.
    ///
    /// Checks run in order: roll, name, grade, uniqueness.
    pub fn add(
        &mut self,
        roll: Roll,
        name: &str,
        grade: &str,
    ) -> Result<StudentRecord, RecordError> {
        let record = StudentRecord::new(roll, name, grade)?;
        if self.position(roll).is_some() {
            return Err(RecordError::DuplicateRoll(roll));
        }

        self.records.push(record.clone());
        self.save()?;
        Ok(record)
    }

    /// Look up a record by roll. `Ok(None)` means not found.
    pub fn find_by_roll(&self, roll: Roll) -> Result<Option<&StudentRecord>, RecordError> {
        validate_roll(roll)?;
        Ok(self.records.iter().find(|r| r.roll() == roll))
    }

    /// Case-insensitive substring search over full names, in collection
    /// order. An empty result means no match.
    pub fn find_by_name(&self, query: &str) -> Result<Vec<&StudentRecord>, RecordError> {
        validate_name(query)?;
        let needle = query.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| r.full_name().to_lowercase().contains(&needle))
            .collect())
    }

    /// Change the name and/or grade of an existing record.
    ///
    /// `None` or a blank value keeps the current field. Each provided field
    /// is validated on its own, so a bad grade does not block a good name
    /// (and vice versa). The store is persisted when anything changed.
    pub fn update(
        &mut self,
        roll: Roll,
        new_name: Option<&str>,
        new_grade: Option<&str>,
    ) -> Result<UpdateOutcome, RecordError> {
        let idx = self.position(roll).ok_or(RecordError::NotFound(roll))?;
        let mut rejected = Vec::new();
        let mut changed = false;

        if let Some(name) = new_name.filter(|n| !n.trim().is_empty()) {
            match validate_name(name) {
                Ok(name) => {
                    self.records[idx].set_full_name(name);
                    changed = true;
                }
                Err(e) => {
                    tracing::debug!("rejected name update for roll {roll}: {e}");
                    rejected.push(e);
                }
            }
        }

        if let Some(grade) = new_grade.filter(|g| !g.trim().is_empty()) {
            match parse_grade(grade) {
                Ok(grade) => {
                    self.records[idx].set_grade(grade);
                    changed = true;
                }
                Err(e) => {
                    tracing::debug!("rejected grade update for roll {roll}: {e}");
                    rejected.push(e);
                }
            }
        }

        if changed {
            self.save()?;
        }

        Ok(UpdateOutcome {
            record: self.records[idx].clone(),
            rejected,
            changed,
        })
    }

    /// Remove the record with this roll, then persist.
    pub fn delete(&mut self, roll: Roll) -> Result<StudentRecord, RecordError> {
        let idx = self.position(roll).ok_or(RecordError::NotFound(roll))?;
        let removed = self.records.remove(idx);
        self.save()?;
        Ok(removed)
    }

    /// Stable sort by roll, then persist.
    pub fn sort_by_roll(&mut self) -> Result<(), RecordError> {
        self.records.sort_by_key(|r| r.roll());
        self.save()
    }

    /// Stable, case-insensitive sort by full name, then persist.
    pub fn sort_by_name(&mut self) -> Result<(), RecordError> {
        self.records.sort_by_cached_key(|r| r.full_name().to_lowercase());
        self.save()
    }

    fn position(&self, roll: Roll) -> Option<usize> {
        self.records.iter().position(|r| r.roll() == roll)
    }

    fn persistence_error(&self, source: std::io::Error) -> RecordError {
        RecordError::PersistenceFailure {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Grade;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("students.txt"));
        (dir, store)
    }

    fn rolls(store: &RecordStore) -> Vec<Roll> {
        store.records().iter().map(|r| r.roll()).collect()
    }

    #[test]
    fn add_then_find() {
        let (_dir, mut store) = temp_store();
        store.add(3, "  Alice ", "a").unwrap();

        let found = store.find_by_roll(3).unwrap().unwrap();
        assert_eq!(found.full_name(), "Alice");
        assert_eq!(found.grade(), Grade::A);
    }

    #[test]
    fn add_duplicate_roll_leaves_store_unchanged() {
        let (_dir, mut store) = temp_store();
        store.add(3, "Alice", "a").unwrap();

        let err = store.add(3, "Bob", "b").unwrap_err();
        assert!(matches!(err, RecordError::DuplicateRoll(3)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].full_name(), "Alice");
    }

    #[test]
    fn add_validation_order() {
        let (_dir, mut store) = temp_store();
        assert!(matches!(
            store.add(0, "R2", "Z"),
            Err(RecordError::InvalidRoll(0))
        ));
        assert!(matches!(
            store.add(1, "R2", "Z"),
            Err(RecordError::InvalidName(_))
        ));
        assert!(matches!(
            store.add(1, "Ron", "Z"),
            Err(RecordError::InvalidGrade(_))
        ));
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn add_persists_immediately() {
        let (_dir, mut store) = temp_store();
        store.add(2, "Bob", "b+").unwrap();
        store.add(1, "Ann", "a").unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "2|Bob|B+\n1|Ann|A\n");
    }

    #[test]
    fn find_by_roll_rejects_non_positive() {
        let (_dir, store) = temp_store();
        assert!(matches!(
            store.find_by_roll(0),
            Err(RecordError::InvalidRoll(0))
        ));
        assert!(store.find_by_roll(9).unwrap().is_none());
    }

    #[test]
    fn find_by_name_substring_case_insensitive() {
        let (_dir, mut store) = temp_store();
        store.add(1, "Alice Smith", "A").unwrap();
        store.add(2, "Bob", "B").unwrap();
        store.add(3, "Malice", "C").unwrap();

        let hits: Vec<Roll> = store
            .find_by_name("ALIC")
            .unwrap()
            .iter()
            .map(|r| r.roll())
            .collect();
        assert_eq!(hits, vec![1, 3]);
        assert!(store.find_by_name("zed").unwrap().is_empty());
        assert!(matches!(
            store.find_by_name("b0b"),
            Err(RecordError::InvalidName(_))
        ));
    }

    #[test]
    fn update_applies_valid_fields() {
        let (_dir, mut store) = temp_store();
        store.add(1, "Ann", "B").unwrap();

        let outcome = store.update(1, Some(" Anna "), Some("a+")).unwrap();
        assert!(outcome.changed);
        assert!(outcome.rejected.is_empty());
        assert_eq!(outcome.record.full_name(), "Anna");
        assert_eq!(outcome.record.grade(), Grade::APlus);

        let reloaded = RecordStore::open(store.path()).unwrap();
        assert_eq!(reloaded.records()[0].full_name(), "Anna");
    }

    #[test]
    fn update_is_partial() {
        let (_dir, mut store) = temp_store();
        store.add(1, "Ann", "B").unwrap();

        let outcome = store.update(1, Some("Ann 2"), Some("c")).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.rejected.len(), 1);
        assert!(matches!(outcome.rejected[0], RecordError::InvalidName(_)));
        assert_eq!(outcome.record.full_name(), "Ann");
        assert_eq!(outcome.record.grade(), Grade::C);
    }

    #[test]
    fn update_blank_fields_keep_values() {
        let (_dir, mut store) = temp_store();
        store.add(1, "Ann", "B").unwrap();

        let outcome = store.update(1, Some("  "), None).unwrap();
        assert!(!outcome.changed);
        assert!(outcome.rejected.is_empty());
        assert_eq!(outcome.record, store.records()[0]);
    }

    #[test]
    fn update_missing_roll() {
        let (_dir, mut store) = temp_store();
        assert!(matches!(
            store.update(4, Some("Ann"), None),
            Err(RecordError::NotFound(4))
        ));
    }

    #[test]
    fn delete_then_not_found() {
        let (_dir, mut store) = temp_store();
        store.add(3, "Alice", "a").unwrap();

        let removed = store.delete(3).unwrap();
        assert_eq!(removed.roll(), 3);
        assert!(store.find_by_roll(3).unwrap().is_none());
        assert!(matches!(store.delete(3), Err(RecordError::NotFound(3))));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "");
    }

    #[test]
    fn sort_by_roll_orders_and_persists() {
        let (_dir, mut store) = temp_store();
        for (roll, name) in [(5, "Eve"), (2, "Bob"), (9, "Ian"), (1, "Ann")] {
            store.add(roll, name, "B").unwrap();
        }

        store.sort_by_roll().unwrap();
        assert_eq!(rolls(&store), vec![1, 2, 5, 9]);

        let reloaded = RecordStore::open(store.path()).unwrap();
        assert_eq!(rolls(&reloaded), vec![1, 2, 5, 9]);
    }

    #[test]
    fn sort_by_name_is_case_insensitive_and_stable() {
        let (_dir, mut store) = temp_store();
        store.add(1, "bob", "B").unwrap();
        store.add(2, "Alice", "B").unwrap();
        store.add(3, "BOB", "B").unwrap();
        store.add(4, "carl", "B").unwrap();

        store.sort_by_name().unwrap();
        assert_eq!(rolls(&store), vec![2, 1, 3, 4]);
    }

    #[test]
    fn load_missing_file_is_empty() {
        let (_dir, mut store) = temp_store();
        assert_eq!(store.load().unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn load_skips_invalid_and_duplicate_lines() {
        let (_dir, store) = temp_store();
        std::fs::write(
            store.path(),
            "5|Tom|Z\n5|Tom|B\n5|Tim|A\ngarbage\n-1|Neg|A\n6|R2D2|A\n7|Ann|c+\n\n",
        )
        .unwrap();

        let store = RecordStore::open(store.path()).unwrap();
        assert_eq!(store.len(), 2);
        let tom = store.find_by_roll(5).unwrap().unwrap();
        assert_eq!(tom.full_name(), "Tom");
        assert_eq!(tom.grade(), Grade::B);
        assert_eq!(store.find_by_roll(7).unwrap().unwrap().grade(), Grade::CPlus);
    }

    #[test]
    fn load_tolerates_invalid_utf8() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), b"1|Ann|A\n2|\xff\xfe|B\r\n3|Cy|C\r\n").unwrap();

        let store = RecordStore::open(store.path()).unwrap();
        assert_eq!(rolls(&store), vec![1, 3]);
    }

    #[test]
    fn save_load_roundtrip() {
        let (_dir, mut store) = temp_store();
        store.add(4, "Dana Scully", "a+").unwrap();
        store.add(2, "Fox Mulder", "d").unwrap();
        store.save().unwrap();

        let reloaded = RecordStore::open(store.path()).unwrap();
        assert_eq!(reloaded.records(), store.records());
    }

    #[test]
    fn failed_save_keeps_in_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten as a file.
        let mut store = RecordStore::new(dir.path());

        let err = store.add(1, "Ann", "A").unwrap_err();
        assert!(matches!(err, RecordError::PersistenceFailure { .. }));
        assert_eq!(store.len(), 1);
        assert!(store.find_by_roll(1).unwrap().is_some());
    }

    #[test]
    fn failed_save_keeps_delete_and_sort() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RecordStore::new(dir.path().join("students.txt"));
        store.add(2, "bob", "B").unwrap();
        store.add(1, "Alice", "A").unwrap();
        store.add(3, "Cy", "C").unwrap();

        // Point the store at the directory so every later save fails.
        store.path = dir.path().to_path_buf();

        let err = store.delete(3).unwrap_err();
        assert!(matches!(err, RecordError::PersistenceFailure { .. }));
        assert!(store.find_by_roll(3).unwrap().is_none());
        assert_eq!(rolls(&store), vec![2, 1]);

        let err = store.sort_by_name().unwrap_err();
        assert!(matches!(err, RecordError::PersistenceFailure { .. }));
        assert_eq!(rolls(&store), vec![1, 2]);

        let err = store.update(1, Some("Alicia"), None).unwrap_err();
        assert!(matches!(err, RecordError::PersistenceFailure { .. }));
        assert_eq!(store.records()[0].full_name(), "Alicia");

        // The file still holds the last successful snapshot.
        assert_eq!(
            std::fs::read_to_string(dir.path().join("students.txt")).unwrap(),
            "2|bob|B\n1|Alice|A\n3|Cy|C\n"
        );
    }

    #[test]
    fn load_read_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RecordStore::new(dir.path());
        assert!(matches!(
            store.load(),
            Err(RecordError::PersistenceFailure { .. })
        ));
    }
}
