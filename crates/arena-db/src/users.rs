use rusqlite::{OptionalExtension, params};

use crate::{Database, StorageError};

/// User row as stored, password hash included. Only the auth layer sees
/// this shape; everything else gets [`arena_types::User`].
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
}

impl Database {
    /// Inserts a user with an already-hashed password, returning the new id.
    /// The username column is UNIQUE; a duplicate surfaces as a storage
    /// error, callers that want a friendly rejection check first.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<i64, StorageError> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2)",
                params![username, password_hash],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, StorageError> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, username, password FROM users WHERE username = ?1",
                    [username],
                    |row| {
                        Ok(UserRow {
                            id: row.get(0)?,
                            username: row.get(1)?,
                            password: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_fetch_user() {
        let db = Database::open_in_memory().unwrap();
        let id = db.create_user("alice", "hash").unwrap();
        let row = db.get_user_by_username("alice").unwrap().unwrap();
        assert_eq!(row.id, id);
        assert_eq!(row.password, "hash");
    }

    #[test]
    fn unknown_username_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_user_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn duplicate_username_rejected_by_storage() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("alice", "hash").unwrap();
        assert!(db.create_user("alice", "other").is_err());
    }
}
