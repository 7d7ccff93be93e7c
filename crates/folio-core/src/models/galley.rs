use serde::{Deserialize, Serialize};

use crate::locale::LocalizedString;

/// A publishable file representation (the PDF) attached to a publication.
/// The file itself lives in managed storage; `submission_file_id` is the
/// reference handed back by the file store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Galley {
    pub id: i64,
    pub publication_id: i64,
    pub label: String,
    pub locale: String,
    /// Display name, the source PDF filename.
    pub name: LocalizedString,
    pub seq: i32,
    pub submission_file_id: Option<i64>,
}
