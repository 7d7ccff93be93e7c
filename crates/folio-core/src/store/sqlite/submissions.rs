use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::params;

use crate::error::Result;
use crate::models::{Submission, SubmissionStatus, WorkflowStage};
use crate::store::sqlite::SqliteStore;
use crate::store::SubmissionStore;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_datetime(value: Option<NaiveDateTime>) -> Option<String> {
    value.map(|dt| dt.format(DATETIME_FORMAT).to_string())
}

fn parse_datetime(value: Option<String>) -> Option<NaiveDateTime> {
    value.and_then(|s| NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT).ok())
}

fn row_to_submission(row: &rusqlite::Row) -> rusqlite::Result<Submission> {
    let status: String = row.get(3)?;
    let stage: String = row.get(4)?;
    Ok(Submission {
        id: row.get(0)?,
        journal_id: row.get(1)?,
        locale: row.get(2)?,
        status: SubmissionStatus::from_str(&status).unwrap_or_default(),
        stage: WorkflowStage::from_str(&stage).unwrap_or_default(),
        progress: row.get(5)?,
        current_publication_id: row.get(6)?,
        date_submitted: parse_datetime(row.get(7)?),
        last_modified: parse_datetime(row.get(8)?),
    })
}

impl SubmissionStore for SqliteStore {
    fn insert_submission(&self, submission: &Submission) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO submissions
                (journal_id, locale, status, stage, progress, current_publication_id,
                 date_submitted, last_modified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                submission.journal_id,
                submission.locale,
                submission.status.to_string(),
                submission.stage.to_string(),
                submission.progress,
                submission.current_publication_id,
                format_datetime(submission.date_submitted),
                format_datetime(submission.last_modified),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn submission(&self, id: i64) -> Result<Option<Submission>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, journal_id, locale, status, stage, progress,
                    current_publication_id, date_submitted, last_modified
             FROM submissions WHERE id = ?1",
        )?;
        let submission = stmt
            .query_row(params![id], row_to_submission)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        Ok(submission)
    }

    fn update_submission(&self, submission: &Submission) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "UPDATE submissions SET
                journal_id = ?2, locale = ?3, status = ?4, stage = ?5, progress = ?6,
                current_publication_id = ?7, date_submitted = ?8, last_modified = ?9
             WHERE id = ?1",
            params![
                submission.id,
                submission.journal_id,
                submission.locale,
                submission.status.to_string(),
                submission.stage.to_string(),
                submission.progress,
                submission.current_publication_id,
                format_datetime(submission.date_submitted),
                format_datetime(submission.last_modified),
            ],
        )?;
        Ok(())
    }

    fn delete_submission(&self, id: i64) -> Result<()> {
        // Publications, authors, galleys, vocabulary, and stage assignments
        // cascade via foreign keys.
        let conn = self.conn();
        conn.execute("DELETE FROM submissions WHERE id = ?1", params![id])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedString;
    use crate::models::{AccessStatus, Journal, Publication};
    use crate::store::{JournalStore, PublicationStore};
    use chrono::NaiveDate;

    fn sample_submission(journal_id: i64) -> Submission {
        Submission {
            id: 0,
            journal_id,
            locale: "en_US".into(),
            status: SubmissionStatus::Published,
            stage: WorkflowStage::Production,
            progress: 0,
            current_publication_id: None,
            date_submitted: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap().and_hms_opt(0, 0, 0),
            last_modified: None,
        }
    }

    #[test]
    fn round_trips_submission() {
        let store = SqliteStore::open_in_memory().unwrap();
        let journal_id = store
            .insert_journal(&Journal {
                path: "test".into(),
                primary_locale: "en_US".into(),
                ..Default::default()
            })
            .unwrap();

        let id = store.insert_submission(&sample_submission(journal_id)).unwrap();
        let found = store.submission(id).unwrap().unwrap();
        assert_eq!(found.status, SubmissionStatus::Published);
        assert_eq!(found.stage, WorkflowStage::Production);
        assert_eq!(
            found.date_submitted,
            NaiveDate::from_ymd_opt(2019, 6, 1).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn delete_cascades_to_publications() {
        let store = SqliteStore::open_in_memory().unwrap();
        let journal_id = store
            .insert_journal(&Journal {
                path: "test".into(),
                primary_locale: "en_US".into(),
                ..Default::default()
            })
            .unwrap();
        let submission_id = store.insert_submission(&sample_submission(journal_id)).unwrap();
        let publication_id = store
            .insert_publication(&Publication {
                id: 0,
                submission_id,
                locale: "en_US".into(),
                section_id: 1,
                issue_id: 1,
                version: 1,
                seq: submission_id,
                status: SubmissionStatus::Published,
                date_published: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
                access_status: AccessStatus::Open,
                title: LocalizedString::with("en_US", "T"),
                abstract_text: LocalizedString::new(),
                pages: None,
                license_url: None,
                copyright_holder: LocalizedString::new(),
                copyright_year: None,
                doi: None,
            })
            .unwrap();

        store.delete_submission(submission_id).unwrap();
        assert!(store.submission(submission_id).unwrap().is_none());
        assert!(store.publication(publication_id).unwrap().is_none());
    }
}
