//! User directory, one JSON record per line.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One account in the directory.
///
/// `password_hash` is whatever digest the login collaborator produced;
/// nothing here hashes or verifies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password_hash: String,
}

/// File-backed username → profile mapping.
///
/// Consumed by the login/account collaborator; the commerce engine itself
/// never touches it.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    path: PathBuf,
}

impl UserDirectory {
    /// Use `users.jsonl` under the given data directory, creating the
    /// directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(DataError::io(&dir))?;
        Ok(Self {
            path: dir.join("users.jsonl"),
        })
    }

    /// Load every account record. A missing file is an empty directory.
    pub fn load(&self) -> Result<Vec<UserRecord>, DataError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(DataError::io(&self.path))?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| DataError::Malformed {
                    path: self.path.clone(),
                    line: index + 1,
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    /// Look up an account by exact username.
    pub fn find(&self, username: &str) -> Result<Option<UserRecord>, DataError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|record| record.username == username))
    }

    /// Append a new account.
    ///
    /// Fails with `DuplicateUser` when the username is taken.
    pub fn insert(&self, record: &UserRecord) -> Result<(), DataError> {
        if self.find(&record.username)?.is_some() {
            return Err(DataError::DuplicateUser(record.username.clone()));
        }
        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(DataError::io(&self.path))?;
        writeln!(file, "{}", line).map_err(DataError::io(&self.path))?;
        file.sync_all().map_err(DataError::io(&self.path))?;
        tracing::info!(username = %record.username, "account recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maya() -> UserRecord {
        UserRecord {
            first_name: "Maya".to_string(),
            last_name: "Iyer".to_string(),
            username: "maya01".to_string(),
            password_hash: "a".repeat(64),
        }
    }

    #[test]
    fn test_missing_file_is_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let users = UserDirectory::open(dir.path()).unwrap();
        assert!(users.load().unwrap().is_empty());
        assert!(users.find("maya01").unwrap().is_none());
    }

    #[test]
    fn test_insert_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let users = UserDirectory::open(dir.path()).unwrap();

        users.insert(&maya()).unwrap();

        let found = users.find("maya01").unwrap().unwrap();
        assert_eq!(found, maya());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let users = UserDirectory::open(dir.path()).unwrap();

        users.insert(&maya()).unwrap();
        let err = users.insert(&maya()).unwrap_err();
        assert!(matches!(err, DataError::DuplicateUser(u) if u == "maya01"));
        assert_eq!(users.load().unwrap().len(), 1);
    }

    #[test]
    fn test_records_round_trip_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let users = UserDirectory::open(dir.path()).unwrap();

        let mut ravi = maya();
        ravi.username = "ravi22".to_string();
        ravi.first_name = "Ravi".to_string();

        users.insert(&maya()).unwrap();
        users.insert(&ravi).unwrap();

        let all = users.load().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].username, "maya01");
        assert_eq!(all[1].username, "ravi22");
    }
}
