use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::params;

use crate::error::Result;
use crate::models::{AccessStatus, Issue};
use crate::store::sqlite::{from_json, to_json, SqliteStore};
use crate::store::IssueStore;

fn row_to_issue(row: &rusqlite::Row) -> rusqlite::Result<Issue> {
    let title: String = row.get(5)?;
    let date: String = row.get(6)?;
    let access: String = row.get(9)?;
    Ok(Issue {
        id: row.get(0)?,
        journal_id: row.get(1)?,
        volume: row.get(2)?,
        number: row.get(3)?,
        year: row.get(4)?,
        title: from_json(&title),
        date_published: NaiveDate::parse_from_str(&date, "%Y-%m-%d").unwrap_or_default(),
        published: row.get(7)?,
        current: row.get(8)?,
        access_status: AccessStatus::from_str(&access).unwrap_or_default(),
        show_volume: row.get(10)?,
        show_number: row.get(11)?,
        show_year: row.get(12)?,
        show_title: row.get(13)?,
    })
}

const ISSUE_COLUMNS: &str = "id, journal_id, volume, number, year, title, date_published, \
     published, current, access_status, show_volume, show_number, show_year, show_title";

impl IssueStore for SqliteStore {
    fn find_published_issue(
        &self,
        journal_id: i64,
        volume: i32,
        number: i32,
    ) -> Result<Option<Issue>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ISSUE_COLUMNS} FROM issues
             WHERE journal_id = ?1 AND volume = ?2 AND number = ?3 AND published = 1
             ORDER BY id LIMIT 1"
        ))?;
        let issue = stmt
            .query_row(params![journal_id, volume, number], row_to_issue)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        Ok(issue)
    }

    fn insert_issue(&self, issue: &Issue) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO issues
                (journal_id, volume, number, year, title, date_published, published,
                 current, access_status, show_volume, show_number, show_year, show_title)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                issue.journal_id,
                issue.volume,
                issue.number,
                issue.year,
                to_json(&issue.title)?,
                issue.date_published.to_string(),
                issue.published,
                issue.current,
                issue.access_status.to_string(),
                issue.show_volume,
                issue.show_number,
                issue.show_year,
                issue.show_title,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update_issue(&self, issue: &Issue) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "UPDATE issues SET
                journal_id = ?2, volume = ?3, number = ?4, year = ?5, title = ?6,
                date_published = ?7, published = ?8, current = ?9, access_status = ?10,
                show_volume = ?11, show_number = ?12, show_year = ?13, show_title = ?14
             WHERE id = ?1",
            params![
                issue.id,
                issue.journal_id,
                issue.volume,
                issue.number,
                issue.year,
                to_json(&issue.title)?,
                issue.date_published.to_string(),
                issue.published,
                issue.current,
                issue.access_status.to_string(),
                issue.show_volume,
                issue.show_number,
                issue.show_year,
                issue.show_title,
            ],
        )?;
        Ok(())
    }

    fn delete_issue(&self, id: i64) -> Result<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM issues WHERE id = ?1", params![id])?;
        Ok(())
    }
}
