use std::str::FromStr;

use rusqlite::params;

use crate::error::Result;
use crate::locale::LocalizedValues;
use crate::models::{Role, UserGroup, Vocabulary, WorkflowStage};
use crate::store::sqlite::{from_json, to_json, SqliteStore};
use crate::store::{UserGroupStore, VocabularyStore};

impl VocabularyStore for SqliteStore {
    fn replace_vocabulary(
        &self,
        kind: Vocabulary,
        publication_id: i64,
        terms: &LocalizedValues,
    ) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "DELETE FROM vocabulary WHERE publication_id = ?1 AND kind = ?2",
            params![publication_id, kind.to_string()],
        )?;
        let mut stmt = conn.prepare(
            "INSERT INTO vocabulary (publication_id, kind, locale, seq, term)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (locale, values) in terms.iter() {
            for (seq, term) in values.iter().enumerate() {
                stmt.execute(params![
                    publication_id,
                    kind.to_string(),
                    locale,
                    seq as i64,
                    term
                ])?;
            }
        }
        Ok(())
    }

    fn vocabulary(&self, kind: Vocabulary, publication_id: i64) -> Result<LocalizedValues> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT locale, term FROM vocabulary
             WHERE publication_id = ?1 AND kind = ?2
             ORDER BY locale, seq",
        )?;
        let rows = stmt.query_map(params![publication_id, kind.to_string()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut terms = LocalizedValues::new();
        for row in rows {
            let (locale, term) = row?;
            terms.push(&locale, term);
        }
        Ok(terms)
    }
}

impl UserGroupStore for SqliteStore {
    fn insert_user_group(&self, group: &UserGroup) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO user_groups (journal_id, role, name, stages)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                group.journal_id,
                group.role.to_string(),
                group.name,
                to_json(&group.stages)?,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn user_group_ids_by_role(&self, role: Role, journal_id: i64) -> Result<Vec<i64>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id FROM user_groups WHERE role = ?1 AND journal_id = ?2 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![role.to_string(), journal_id], |row| row.get(0))?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }

    fn group_assigned_to_stage(&self, group_id: i64, stage: WorkflowStage) -> Result<bool> {
        let conn = self.conn();
        let stages: Option<String> = conn
            .query_row(
                "SELECT stages FROM user_groups WHERE id = ?1",
                params![group_id],
                |row| row.get(0),
            )
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        let Some(stages) = stages else {
            return Ok(false);
        };
        let stages: Vec<WorkflowStage> = from_json(&stages);
        Ok(stages.contains(&stage))
    }

    fn assign_stage(&self, submission_id: i64, group_id: i64, user_id: i64) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO stage_assignments (submission_id, user_group_id, user_id)
             VALUES (?1, ?2, ?3)",
            params![submission_id, group_id, user_id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Journal;
    use crate::store::{JournalStore, PublicationStore, SubmissionStore};

    #[test]
    fn vocabulary_replacement_is_total() {
        let store = SqliteStore::open_in_memory().unwrap();
        let journal_id = store
            .insert_journal(&Journal {
                path: "test".into(),
                primary_locale: "en_US".into(),
                ..Default::default()
            })
            .unwrap();
        // Vocabulary rows only need a publication; build the minimal chain.
        let submission_id = store
            .insert_submission(&crate::models::Submission {
                id: 0,
                journal_id,
                locale: "en_US".into(),
                status: Default::default(),
                stage: Default::default(),
                progress: 0,
                current_publication_id: None,
                date_submitted: None,
                last_modified: None,
            })
            .unwrap();
        let publication_id = store
            .insert_publication(&crate::models::Publication {
                id: 0,
                submission_id,
                locale: "en_US".into(),
                section_id: 1,
                issue_id: 1,
                version: 1,
                seq: submission_id,
                status: Default::default(),
                date_published: chrono::NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
                access_status: Default::default(),
                title: crate::locale::LocalizedString::with("en_US", "T"),
                abstract_text: crate::locale::LocalizedString::new(),
                pages: None,
                license_url: None,
                copyright_holder: crate::locale::LocalizedString::new(),
                copyright_year: None,
                doi: None,
            })
            .unwrap();

        let mut first = LocalizedValues::new();
        first.push("en_US", "alpha");
        first.push("en_US", "beta");
        store
            .replace_vocabulary(Vocabulary::Keyword, publication_id, &first)
            .unwrap();

        let mut second = LocalizedValues::new();
        second.push("en_US", "gamma");
        store
            .replace_vocabulary(Vocabulary::Keyword, publication_id, &second)
            .unwrap();

        let stored = store.vocabulary(Vocabulary::Keyword, publication_id).unwrap();
        assert_eq!(stored.get("en_US"), ["gamma"]);
    }

    #[test]
    fn groups_filter_by_role_and_stage() {
        let store = SqliteStore::open_in_memory().unwrap();
        let journal_id = store
            .insert_journal(&Journal {
                path: "test".into(),
                primary_locale: "en_US".into(),
                ..Default::default()
            })
            .unwrap();
        let manager_id = store
            .insert_user_group(&UserGroup {
                id: 0,
                journal_id,
                role: Role::Manager,
                name: "Journal Manager".into(),
                stages: vec![WorkflowStage::Production],
            })
            .unwrap();
        store
            .insert_user_group(&UserGroup {
                id: 0,
                journal_id,
                role: Role::Author,
                name: "Author".into(),
                stages: vec![],
            })
            .unwrap();

        assert_eq!(
            store.user_group_ids_by_role(Role::Manager, journal_id).unwrap(),
            vec![manager_id]
        );
        assert!(store
            .group_assigned_to_stage(manager_id, WorkflowStage::Production)
            .unwrap());
        assert!(!store
            .group_assigned_to_stage(manager_id, WorkflowStage::Review)
            .unwrap());
    }
}
