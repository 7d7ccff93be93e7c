use rusqlite::params;

use crate::error::Result;
use crate::models::{Journal, User};
use crate::store::sqlite::{from_json, to_json, SqliteStore};
use crate::store::{JournalStore, UserStore};

fn row_to_journal(row: &rusqlite::Row) -> rusqlite::Result<Journal> {
    let name: String = row.get(2)?;
    Ok(Journal {
        id: row.get(0)?,
        path: row.get(1)?,
        name: from_json(&name),
        primary_locale: row.get(3)?,
        default_license_url: row.get(4)?,
        default_copyright_holder: row.get(5)?,
        default_copyright_year: row.get(6)?,
    })
}

const JOURNAL_COLUMNS: &str = "id, path, name, primary_locale, default_license_url, \
     default_copyright_holder, default_copyright_year";

impl JournalStore for SqliteStore {
    fn insert_journal(&self, journal: &Journal) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO journals
                (path, name, primary_locale, default_license_url,
                 default_copyright_holder, default_copyright_year)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                journal.path,
                to_json(&journal.name)?,
                journal.primary_locale,
                journal.default_license_url,
                journal.default_copyright_holder,
                journal.default_copyright_year,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn journal_by_path(&self, path: &str) -> Result<Option<Journal>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {JOURNAL_COLUMNS} FROM journals WHERE path = ?1"))?;
        let journal = stmt
            .query_row(params![path], row_to_journal)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        Ok(journal)
    }

    fn journals(&self) -> Result<Vec<Journal>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("SELECT {JOURNAL_COLUMNS} FROM journals ORDER BY id"))?;
        let rows = stmt.query_map([], row_to_journal)?;
        let mut journals = Vec::new();
        for row in rows {
            journals.push(row?);
        }
        Ok(journals)
    }
}

impl UserStore for SqliteStore {
    fn insert_user(&self, user: &User) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO users (username, email, given_name, family_name)
             VALUES (?1, ?2, ?3, ?4)",
            params![user.username, user.email, user.given_name, user.family_name],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, username, email, given_name, family_name FROM users WHERE username = ?1",
        )?;
        let user = stmt
            .query_row(params![username], |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                    given_name: row.get(3)?,
                    family_name: row.get(4)?,
                })
            })
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedString;

    #[test]
    fn journal_lookup_by_path() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store
            .insert_journal(&Journal {
                path: "testj".into(),
                name: LocalizedString::with("en_US", "Test Journal"),
                primary_locale: "en_US".into(),
                default_license_url: Some("https://example.com/license".into()),
                ..Default::default()
            })
            .unwrap();

        let journal = store.journal_by_path("testj").unwrap().unwrap();
        assert_eq!(journal.id, id);
        assert_eq!(journal.display_name(), "Test Journal");
        assert!(store.journal_by_path("missing").unwrap().is_none());
    }

    #[test]
    fn user_lookup_by_username() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert_user(&User {
                id: 0,
                username: "editor".into(),
                email: "editor@example.com".into(),
                given_name: "Ed".into(),
                family_name: "Itor".into(),
            })
            .unwrap();
        let user = store.user_by_username("editor").unwrap().unwrap();
        assert_eq!(user.email, "editor@example.com");
    }
}
