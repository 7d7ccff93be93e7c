use chrono::Utc;
use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: u32 = 1;

pub fn apply_pragmas(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

/// Creates all tables and records the schema version. Idempotent.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS journals (
            id                        INTEGER PRIMARY KEY,
            path                      TEXT UNIQUE NOT NULL,
            name                      TEXT NOT NULL DEFAULT '{}',
            primary_locale            TEXT NOT NULL,
            default_license_url       TEXT,
            default_copyright_holder  TEXT,
            default_copyright_year    INTEGER
        );

        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY,
            username    TEXT UNIQUE NOT NULL,
            email       TEXT NOT NULL,
            given_name  TEXT NOT NULL DEFAULT '',
            family_name TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS user_groups (
            id         INTEGER PRIMARY KEY,
            journal_id INTEGER NOT NULL REFERENCES journals(id) ON DELETE CASCADE,
            role       TEXT NOT NULL,
            name       TEXT NOT NULL,
            stages     TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS issues (
            id             INTEGER PRIMARY KEY,
            journal_id     INTEGER NOT NULL REFERENCES journals(id) ON DELETE CASCADE,
            volume         INTEGER NOT NULL,
            number         INTEGER NOT NULL,
            year           INTEGER NOT NULL,
            title          TEXT NOT NULL DEFAULT '{}',
            date_published TEXT NOT NULL,
            published      INTEGER NOT NULL DEFAULT 0,
            current        INTEGER NOT NULL DEFAULT 0,
            access_status  TEXT NOT NULL DEFAULT 'open',
            show_volume    INTEGER NOT NULL DEFAULT 1,
            show_number    INTEGER NOT NULL DEFAULT 1,
            show_year      INTEGER NOT NULL DEFAULT 1,
            show_title     INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_issues_journal_volume_number
            ON issues(journal_id, volume, number);

        CREATE TABLE IF NOT EXISTS sections (
            id                     INTEGER PRIMARY KEY,
            journal_id             INTEGER NOT NULL REFERENCES journals(id) ON DELETE CASCADE,
            title                  TEXT NOT NULL DEFAULT '{}',
            abbrev                 TEXT NOT NULL DEFAULT '{}',
            policy                 TEXT NOT NULL DEFAULT '{}',
            abstracts_not_required INTEGER NOT NULL DEFAULT 0,
            meta_indexed           INTEGER NOT NULL DEFAULT 0,
            meta_reviewed          INTEGER NOT NULL DEFAULT 0,
            editor_restricted      INTEGER NOT NULL DEFAULT 0,
            hide_title             INTEGER NOT NULL DEFAULT 0,
            hide_author            INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS submissions (
            id                     INTEGER PRIMARY KEY,
            journal_id             INTEGER NOT NULL REFERENCES journals(id) ON DELETE CASCADE,
            locale                 TEXT NOT NULL,
            status                 TEXT NOT NULL DEFAULT 'queued',
            stage                  TEXT NOT NULL DEFAULT 'submission',
            progress               INTEGER NOT NULL DEFAULT 0,
            current_publication_id INTEGER,
            date_submitted         TEXT,
            last_modified          TEXT
        );

        CREATE TABLE IF NOT EXISTS publications (
            id               INTEGER PRIMARY KEY,
            submission_id    INTEGER NOT NULL REFERENCES submissions(id) ON DELETE CASCADE,
            locale           TEXT NOT NULL,
            section_id       INTEGER NOT NULL,
            issue_id         INTEGER NOT NULL,
            version          INTEGER NOT NULL DEFAULT 1,
            seq              INTEGER NOT NULL DEFAULT 0,
            status           TEXT NOT NULL DEFAULT 'queued',
            date_published   TEXT NOT NULL,
            access_status    TEXT NOT NULL DEFAULT 'open',
            title            TEXT NOT NULL DEFAULT '{}',
            abstract         TEXT NOT NULL DEFAULT '{}',
            pages            TEXT,
            license_url      TEXT,
            copyright_holder TEXT NOT NULL DEFAULT '{}',
            copyright_year   INTEGER,
            doi              TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_publications_submission
            ON publications(submission_id);

        CREATE TABLE IF NOT EXISTS authors (
            id                    INTEGER PRIMARY KEY,
            publication_id        INTEGER NOT NULL REFERENCES publications(id) ON DELETE CASCADE,
            given_name            TEXT NOT NULL DEFAULT '{}',
            family_name           TEXT NOT NULL DEFAULT '{}',
            middle_name           TEXT NOT NULL DEFAULT '{}',
            suffix                TEXT,
            preferred_public_name TEXT NOT NULL DEFAULT '{}',
            affiliation           TEXT NOT NULL DEFAULT '{}',
            email                 TEXT NOT NULL,
            seq                   INTEGER NOT NULL,
            primary_contact       INTEGER NOT NULL DEFAULT 0,
            include_in_browse     INTEGER NOT NULL DEFAULT 1,
            user_group_id         INTEGER
        );

        CREATE TABLE IF NOT EXISTS galleys (
            id                 INTEGER PRIMARY KEY,
            publication_id     INTEGER NOT NULL REFERENCES publications(id) ON DELETE CASCADE,
            label              TEXT NOT NULL,
            locale             TEXT NOT NULL,
            name               TEXT NOT NULL DEFAULT '{}',
            seq                INTEGER NOT NULL DEFAULT 1,
            submission_file_id INTEGER
        );

        CREATE TABLE IF NOT EXISTS vocabulary (
            publication_id INTEGER NOT NULL REFERENCES publications(id) ON DELETE CASCADE,
            kind           TEXT NOT NULL,
            locale         TEXT NOT NULL,
            seq            INTEGER NOT NULL,
            term           TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_vocabulary_publication
            ON vocabulary(publication_id, kind);

        CREATE TABLE IF NOT EXISTS stage_assignments (
            id            INTEGER PRIMARY KEY,
            submission_id INTEGER NOT NULL REFERENCES submissions(id) ON DELETE CASCADE,
            user_group_id INTEGER NOT NULL,
            user_id       INTEGER NOT NULL
        );
        ",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_migrations(version, applied_at) VALUES (?1, ?2)",
        rusqlite::params![SCHEMA_VERSION, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}
