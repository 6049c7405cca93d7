//! File-backed birthday storage.
//!
//! All records live in a single TOML file:
//!
//! ```toml
//! next_id = 3
//!
//! [[birthday]]
//! id = 1
//! name = "Alice"
//! birth_date = "1990-06-15"
//! category = "Family"
//! ```
//!
//! Ids are handed out from `next_id` and never reused.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::birthday::{BirthdayRecord, NewBirthday, validate};
use crate::error::{BdayError, BdayResult};

/// Read access to every stored birthday.
pub trait BirthdaySource {
    fn all_birthdays(&self) -> BdayResult<Vec<BirthdayRecord>>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    next_id: u64,

    #[serde(default, rename = "birthday")]
    birthdays: Vec<BirthdayRecord>,
}

pub struct BirthdayStore {
    path: PathBuf,
    file: StoreFile,
}

impl BirthdayStore {
    /// Open the store at `path`. A missing file is an empty store; nothing is
    /// written until the first change.
    pub fn open(path: impl Into<PathBuf>) -> BdayResult<Self> {
        let path = path.into();

        let mut file: StoreFile = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content).map_err(|e| {
                BdayError::Serialization(format!("{}: {e}", path.display()))
            })?
        } else {
            StoreFile::default()
        };

        let mut seen = HashSet::new();
        for record in &file.birthdays {
            if !seen.insert(record.id) {
                return Err(BdayError::Store(format!(
                    "Duplicate birthday id {} in {}",
                    record.id,
                    path.display()
                )));
            }
        }

        // Tolerate hand-edited files whose counter fell behind
        // At u64::MAX this stays put and `insert` reports the id space as exhausted
        let max_id = file.birthdays.iter().map(|b| b.id).max().unwrap_or(0);
        file.next_id = file.next_id.max(max_id.saturating_add(1));

        tracing::debug!(path = %path.display(), count = file.birthdays.len(), "opened store");
        Ok(BirthdayStore { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, oldest birth date first (ties by id).
    pub fn all(&self) -> Vec<BirthdayRecord> {
        let mut records = self.file.birthdays.clone();
        records.sort_by_key(|r| (r.birth_date, r.id));
        records
    }

    pub fn get(&self, id: u64) -> Option<&BirthdayRecord> {
        self.file.birthdays.iter().find(|b| b.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.file.birthdays.is_empty()
    }

    /// Validate and store a new birthday, returning its id.
    pub fn insert(&mut self, birthday: NewBirthday, today: NaiveDate) -> BdayResult<u64> {
        validate(&birthday.name, birthday.birth_date, today)?;

        let id = self.file.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| BdayError::Store("id space exhausted".to_string()))?;
        let record = birthday.into_record(id);
        tracing::info!(id, "adding birthday {record}");

        self.file.next_id = next_id;
        self.file.birthdays.push(record);
        self.save()?;

        Ok(id)
    }

    /// Replace the record with the same id.
    pub fn update(&mut self, record: BirthdayRecord, today: NaiveDate) -> BdayResult<()> {
        validate(&record.name, record.birth_date, today)?;

        let existing = self
            .file
            .birthdays
            .iter_mut()
            .find(|b| b.id == record.id)
            .ok_or(BdayError::BirthdayNotFound(record.id))?;

        let id = record.id;
        *existing = NewBirthday {
            name: record.name,
            birth_date: record.birth_date,
            category: record.category,
        }
        .into_record(id);
        tracing::info!(id, "updated birthday {existing}");

        self.save()
    }

    /// Remove a record, returning it.
    pub fn delete(&mut self, id: u64) -> BdayResult<BirthdayRecord> {
        let index = self
            .file
            .birthdays
            .iter()
            .position(|b| b.id == id)
            .ok_or(BdayError::BirthdayNotFound(id))?;

        let removed = self.file.birthdays.remove(index);
        tracing::info!(id, "deleted birthday {removed}");

        self.save()?;
        Ok(removed)
    }

    /// Write to a sibling temp file and rename it over the store.
    fn save(&self) -> BdayResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&self.file)
            .map_err(|e| BdayError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

impl BirthdaySource for BirthdayStore {
    fn all_birthdays(&self) -> BdayResult<Vec<BirthdayRecord>> {
        Ok(self.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::birthday::ValidationError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 6, 1)
    }

    fn temp_store() -> (tempfile::TempDir, BirthdayStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = BirthdayStore::open(dir.path().join("data/birthdays.toml")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.is_empty());
        assert!(store.all_birthdays().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_insert_assigns_increasing_ids_and_persists() {
        let (_dir, mut store) = temp_store();

        let a = store
            .insert(NewBirthday::new("Alice", date(1990, 6, 15)).with_category("Family"), today())
            .unwrap();
        let b = store.insert(NewBirthday::new("Bob", date(1985, 1, 7)), today()).unwrap();
        assert_eq!((a, b), (1, 2));

        let reopened = BirthdayStore::open(store.path()).unwrap();
        let names: Vec<String> = reopened.all().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
        assert_eq!(reopened.get(1).unwrap().category, "Family");
    }

    #[test]
    fn test_twins_and_duplicates_are_kept_apart() {
        let (_dir, mut store) = temp_store();
        let birth = date(1995, 6, 15);

        let first = store.insert(NewBirthday::new("Alice Smith", birth), today()).unwrap();
        let second = store.insert(NewBirthday::new("Alice Smith", birth), today()).unwrap();
        let twin = store.insert(NewBirthday::new("Bob Smith", birth), today()).unwrap();

        assert_ne!(first, second);
        let all = store.all();
        assert_eq!(all.len(), 3);
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![first, second, twin]);

        store.delete(first).unwrap();
        assert_eq!(store.get(second).unwrap().name, "Alice Smith");
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let (_dir, mut store) = temp_store();

        store.insert(NewBirthday::new("Alice", date(1990, 1, 1)), today()).unwrap();
        let b = store.insert(NewBirthday::new("Bob", date(1990, 1, 2)), today()).unwrap();
        store.delete(b).unwrap();

        let mut reopened = BirthdayStore::open(store.path()).unwrap();
        let c = reopened.insert(NewBirthday::new("Carol", date(1990, 1, 3)), today()).unwrap();
        assert_eq!(c, 3);
    }

    #[test]
    fn test_insert_rejects_invalid() {
        let (_dir, mut store) = temp_store();

        let err = store.insert(NewBirthday::new(" ", date(1990, 1, 1)), today()).unwrap_err();
        assert!(matches!(err, BdayError::Validation(ValidationError::EmptyName)));

        let err = store.insert(NewBirthday::new("Future", date(2030, 1, 1)), today()).unwrap_err();
        assert!(matches!(err, BdayError::Validation(ValidationError::FutureBirthDate)));

        assert!(store.is_empty());
    }

    #[test]
    fn test_update() {
        let (_dir, mut store) = temp_store();
        let id = store.insert(NewBirthday::new("Alice", date(1990, 6, 15)), today()).unwrap();

        let mut record = store.get(id).unwrap().clone();
        record.name = " Alicia ".to_string();
        record.birth_date = date(1990, 6, 16);
        store.update(record, today()).unwrap();

        let reopened = BirthdayStore::open(store.path()).unwrap();
        let updated = reopened.get(id).unwrap();
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.birth_date, date(1990, 6, 16));
    }

    #[test]
    fn test_unknown_ids() {
        let (_dir, mut store) = temp_store();
        let ghost = BirthdayRecord {
            id: 42,
            name: "Ghost".to_string(),
            birth_date: date(1990, 1, 1),
            category: String::new(),
        };

        assert!(matches!(store.update(ghost, today()), Err(BdayError::BirthdayNotFound(42))));
        assert!(matches!(store.delete(42), Err(BdayError::BirthdayNotFound(42))));
    }

    #[test]
    fn test_hand_edited_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("birthdays.toml");
        std::fs::write(
            &path,
            r#"
[[birthday]]
id = 5
name = "Eve"
birth_date = "1992-02-29"
"#,
        )
        .unwrap();

        let mut store = BirthdayStore::open(&path).unwrap();
        assert_eq!(store.get(5).unwrap().category, "");

        let id = store.insert(NewBirthday::new("Frank", date(1980, 3, 3)), today()).unwrap();
        assert_eq!(id, 6);
    }

    #[test]
    fn test_exhausted_id_space() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("birthdays.toml");
        std::fs::write(
            &path,
            r#"
[[birthday]]
id = 18446744073709551615
name = "Eve"
birth_date = "1992-02-29"
"#,
        )
        .unwrap();

        let mut store = BirthdayStore::open(&path).unwrap();
        assert_eq!(store.get(u64::MAX).unwrap().name, "Eve");

        let result = store.insert(NewBirthday::new("Frank", date(1980, 3, 3)), today());
        assert!(matches!(result, Err(BdayError::Store(msg)) if msg == "id space exhausted"));
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("birthdays.toml");
        std::fs::write(
            &path,
            r#"
[[birthday]]
id = 1
name = "Eve"
birth_date = "1992-02-29"

[[birthday]]
id = 1
name = "Mallory"
birth_date = "1993-03-01"
"#,
        )
        .unwrap();

        assert!(matches!(BirthdayStore::open(&path), Err(BdayError::Store(_))));
    }
}
