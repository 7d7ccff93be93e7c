use rusqlite::params;

use crate::error::Result;
use crate::models::{Author, Galley};
use crate::store::sqlite::{from_json, to_json, SqliteStore};
use crate::store::{AuthorStore, GalleyStore};

fn row_to_author(row: &rusqlite::Row) -> rusqlite::Result<Author> {
    let given: String = row.get(2)?;
    let family: String = row.get(3)?;
    let middle: String = row.get(4)?;
    let preferred: String = row.get(6)?;
    let affiliation: String = row.get(7)?;
    Ok(Author {
        id: row.get(0)?,
        publication_id: row.get(1)?,
        given_name: from_json(&given),
        family_name: from_json(&family),
        middle_name: from_json(&middle),
        suffix: row.get(5)?,
        preferred_public_name: from_json(&preferred),
        affiliation: from_json(&affiliation),
        email: row.get(8)?,
        seq: row.get(9)?,
        primary_contact: row.get(10)?,
        include_in_browse: row.get(11)?,
        user_group_id: row.get(12)?,
    })
}

impl AuthorStore for SqliteStore {
    fn insert_author(&self, author: &Author) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO authors
                (publication_id, given_name, family_name, middle_name, suffix,
                 preferred_public_name, affiliation, email, seq, primary_contact,
                 include_in_browse, user_group_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                author.publication_id,
                to_json(&author.given_name)?,
                to_json(&author.family_name)?,
                to_json(&author.middle_name)?,
                author.suffix,
                to_json(&author.preferred_public_name)?,
                to_json(&author.affiliation)?,
                author.email,
                author.seq,
                author.primary_contact,
                author.include_in_browse,
                author.user_group_id,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn authors_by_publication(&self, publication_id: i64) -> Result<Vec<Author>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, publication_id, given_name, family_name, middle_name, suffix,
                    preferred_public_name, affiliation, email, seq, primary_contact,
                    include_in_browse, user_group_id
             FROM authors WHERE publication_id = ?1 ORDER BY seq",
        )?;
        let rows = stmt.query_map(params![publication_id], row_to_author)?;
        let mut authors = Vec::new();
        for row in rows {
            authors.push(row?);
        }
        Ok(authors)
    }
}

impl GalleyStore for SqliteStore {
    fn insert_galley(&self, galley: &Galley) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO galleys
                (publication_id, label, locale, name, seq, submission_file_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                galley.publication_id,
                galley.label,
                galley.locale,
                to_json(&galley.name)?,
                galley.seq,
                galley.submission_file_id,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update_galley(&self, galley: &Galley) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "UPDATE galleys SET
                publication_id = ?2, label = ?3, locale = ?4, name = ?5, seq = ?6,
                submission_file_id = ?7
             WHERE id = ?1",
            params![
                galley.id,
                galley.publication_id,
                galley.label,
                galley.locale,
                to_json(&galley.name)?,
                galley.seq,
                galley.submission_file_id,
            ],
        )?;
        Ok(())
    }
}
