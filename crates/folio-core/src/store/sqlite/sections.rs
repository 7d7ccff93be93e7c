use rusqlite::params;

use crate::error::Result;
use crate::models::Section;
use crate::store::sqlite::{from_json, to_json, SqliteStore};
use crate::store::SectionStore;

fn row_to_section(row: &rusqlite::Row) -> rusqlite::Result<Section> {
    let title: String = row.get(2)?;
    let abbrev: String = row.get(3)?;
    let policy: String = row.get(4)?;
    Ok(Section {
        id: row.get(0)?,
        journal_id: row.get(1)?,
        title: from_json(&title),
        abbrev: from_json(&abbrev),
        policy: from_json(&policy),
        abstracts_not_required: row.get(5)?,
        meta_indexed: row.get(6)?,
        meta_reviewed: row.get(7)?,
        editor_restricted: row.get(8)?,
        hide_title: row.get(9)?,
        hide_author: row.get(10)?,
    })
}

impl SectionStore for SqliteStore {
    fn find_section_by_title(
        &self,
        journal_id: i64,
        locale: &str,
        title: &str,
    ) -> Result<Option<Section>> {
        let conn = self.conn();
        // The localized title lives in a JSON column; match on the locale key.
        let mut stmt = conn.prepare(
            "SELECT id, journal_id, title, abbrev, policy, abstracts_not_required,
                    meta_indexed, meta_reviewed, editor_restricted, hide_title, hide_author
             FROM sections
             WHERE journal_id = ?1 AND json_extract(title, '$.' || ?2) = ?3
             ORDER BY id LIMIT 1",
        )?;
        let section = stmt
            .query_row(params![journal_id, locale, title], row_to_section)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        Ok(section)
    }

    fn insert_section(&self, section: &Section) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO sections
                (journal_id, title, abbrev, policy, abstracts_not_required, meta_indexed,
                 meta_reviewed, editor_restricted, hide_title, hide_author)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                section.journal_id,
                to_json(&section.title)?,
                to_json(&section.abbrev)?,
                to_json(&section.policy)?,
                section.abstracts_not_required,
                section.meta_indexed,
                section.meta_reviewed,
                section.editor_restricted,
                section.hide_title,
                section.hide_author,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn delete_section(&self, id: i64) -> Result<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM sections WHERE id = ?1", params![id])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedString;
    use crate::models::Journal;
    use crate::store::JournalStore;

    #[test]
    fn finds_section_by_localized_title() {
        let store = SqliteStore::open_in_memory().unwrap();
        let journal_id = store
            .insert_journal(&Journal {
                path: "test".into(),
                primary_locale: "en_US".into(),
                ..Default::default()
            })
            .unwrap();

        let section = Section {
            id: 0,
            journal_id,
            title: LocalizedString::with("en_US", "Research Article"),
            abbrev: LocalizedString::with("en_US", "RES"),
            policy: LocalizedString::new(),
            abstracts_not_required: true,
            meta_indexed: true,
            meta_reviewed: false,
            editor_restricted: true,
            hide_title: false,
            hide_author: false,
        };
        let id = store.insert_section(&section).unwrap();

        let found = store
            .find_section_by_title(journal_id, "en_US", "Research Article")
            .unwrap()
            .unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.abbrev.get("en_US"), Some("RES"));

        assert!(store
            .find_section_by_title(journal_id, "en_US", "Reviews")
            .unwrap()
            .is_none());
        assert!(store
            .find_section_by_title(journal_id, "fr_CA", "Research Article")
            .unwrap()
            .is_none());
    }
}
