use serde::{Deserialize, Serialize};

use crate::locale::LocalizedString;

/// A named category of articles within a journal (e.g. "Articles",
/// "Reviews"). Sections are journal-scoped and shared between issues, so
/// the importer deduplicates them by exact localized title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub journal_id: i64,
    pub title: LocalizedString,
    /// First three letters of the title, uppercased.
    pub abbrev: LocalizedString,
    pub policy: LocalizedString,
    pub abstracts_not_required: bool,
    pub meta_indexed: bool,
    pub meta_reviewed: bool,
    pub editor_restricted: bool,
    pub hide_title: bool,
    pub hide_author: bool,
}
