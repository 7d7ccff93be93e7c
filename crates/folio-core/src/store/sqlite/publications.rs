use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::params;

use crate::error::Result;
use crate::models::{AccessStatus, Publication, SubmissionStatus};
use crate::store::sqlite::{from_json, to_json, SqliteStore};
use crate::store::PublicationStore;

fn row_to_publication(row: &rusqlite::Row) -> rusqlite::Result<Publication> {
    let status: String = row.get(7)?;
    let date: String = row.get(8)?;
    let access: String = row.get(9)?;
    let title: String = row.get(10)?;
    let abstract_text: String = row.get(11)?;
    let holder: String = row.get(14)?;
    Ok(Publication {
        id: row.get(0)?,
        submission_id: row.get(1)?,
        locale: row.get(2)?,
        section_id: row.get(3)?,
        issue_id: row.get(4)?,
        version: row.get(5)?,
        seq: row.get(6)?,
        status: SubmissionStatus::from_str(&status).unwrap_or_default(),
        date_published: NaiveDate::parse_from_str(&date, "%Y-%m-%d").unwrap_or_default(),
        access_status: AccessStatus::from_str(&access).unwrap_or_default(),
        title: from_json(&title),
        abstract_text: from_json(&abstract_text),
        pages: row.get(12)?,
        license_url: row.get(13)?,
        copyright_holder: from_json(&holder),
        copyright_year: row.get(15)?,
        doi: row.get(16)?,
    })
}

impl PublicationStore for SqliteStore {
    fn insert_publication(&self, publication: &Publication) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO publications
                (submission_id, locale, section_id, issue_id, version, seq, status,
                 date_published, access_status, title, abstract, pages, license_url,
                 copyright_holder, copyright_year, doi)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                publication.submission_id,
                publication.locale,
                publication.section_id,
                publication.issue_id,
                publication.version,
                publication.seq,
                publication.status.to_string(),
                publication.date_published.to_string(),
                publication.access_status.to_string(),
                to_json(&publication.title)?,
                to_json(&publication.abstract_text)?,
                publication.pages,
                publication.license_url,
                to_json(&publication.copyright_holder)?,
                publication.copyright_year,
                publication.doi,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn publication(&self, id: i64) -> Result<Option<Publication>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, submission_id, locale, section_id, issue_id, version, seq, status,
                    date_published, access_status, title, abstract, pages, license_url,
                    copyright_holder, copyright_year, doi
             FROM publications WHERE id = ?1",
        )?;
        let publication = stmt
            .query_row(params![id], row_to_publication)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        Ok(publication)
    }

    fn update_publication(&self, publication: &Publication) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "UPDATE publications SET
                submission_id = ?2, locale = ?3, section_id = ?4, issue_id = ?5,
                version = ?6, seq = ?7, status = ?8, date_published = ?9,
                access_status = ?10, title = ?11, abstract = ?12, pages = ?13,
                license_url = ?14, copyright_holder = ?15, copyright_year = ?16, doi = ?17
             WHERE id = ?1",
            params![
                publication.id,
                publication.submission_id,
                publication.locale,
                publication.section_id,
                publication.issue_id,
                publication.version,
                publication.seq,
                publication.status.to_string(),
                publication.date_published.to_string(),
                publication.access_status.to_string(),
                to_json(&publication.title)?,
                to_json(&publication.abstract_text)?,
                publication.pages,
                publication.license_url,
                to_json(&publication.copyright_holder)?,
                publication.copyright_year,
                publication.doi,
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedString;
    use crate::models::{Journal, Submission, SubmissionStatus, WorkflowStage};
    use crate::store::{JournalStore, SubmissionStore};

    #[test]
    fn round_trips_publication_with_localized_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        let journal_id = store
            .insert_journal(&Journal {
                path: "test".into(),
                primary_locale: "en_US".into(),
                ..Default::default()
            })
            .unwrap();
        let submission_id = store
            .insert_submission(&Submission {
                id: 0,
                journal_id,
                locale: "en_US".into(),
                status: SubmissionStatus::Published,
                stage: WorkflowStage::Production,
                progress: 0,
                current_publication_id: None,
                date_submitted: None,
                last_modified: None,
            })
            .unwrap();

        let mut title = LocalizedString::with("en_US", "Title");
        title.set("fr_CA", "Titre");
        let publication = Publication {
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
            title,
            abstract_text: LocalizedString::with("en_US", "An abstract."),
            pages: Some("10-15".into()),
            license_url: Some("https://creativecommons.org/licenses/by/4.0/".into()),
            copyright_holder: LocalizedString::with("en_US", "Ada Lovelace"),
            copyright_year: Some(2019),
            doi: Some("10.1234/abc".into()),
        };
        let id = store.insert_publication(&publication).unwrap();

        let mut found = store.publication(id).unwrap().unwrap();
        assert_eq!(found.title.get("fr_CA"), Some("Titre"));
        assert_eq!(found.pages.as_deref(), Some("10-15"));
        assert_eq!(found.copyright_year, Some(2019));

        found.doi = Some("10.9999/zzz".into());
        store.update_publication(&found).unwrap();
        let again = store.publication(id).unwrap().unwrap();
        assert_eq!(again.doi.as_deref(), Some("10.9999/zzz"));
    }
}
