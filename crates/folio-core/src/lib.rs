//! Folio — imports bepress-exported journal content into a journal
//! management store.
//!
//! Each article arrives as a metadata XML document plus a PDF. The importer
//! resolves or creates the issue and section the article belongs to, builds
//! a submission with a version-1 publication (localized titles, abstracts,
//! authors, controlled vocabulary, license/copyright), attaches the PDF as a
//! galley, and rolls back top-level records if any step fails.

pub mod doi;
pub mod error;
pub mod files;
pub mod import;
pub mod locale;
pub mod messages;
pub mod models;
pub mod search;
pub mod store;
pub mod xml;

pub use error::{FolioError, Result};
pub use files::{FilePurpose, FileRef, FileStore, FsFileStore};
pub use import::{
    ArticleImporter, ImportError, ImportFailure, ImportOptions, ImportOutcome, ImportRequest,
};
pub use locale::{LocalizedString, LocalizedValues};
pub use messages::{MessageCatalog, Messages};
pub use models::*;
pub use search::{NoopSearchIndex, SearchIndex};
pub use store::memory::MemoryStore;
pub use store::sqlite::{ConnectionPool, SqliteStore};
pub use store::Backend;
pub use xml::ArticleDocument;
