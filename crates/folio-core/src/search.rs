//! Search-index collaborator.
//!
//! The importer fires change notifications after each article; indexing
//! itself happens elsewhere. Calls are fire-and-forget.

use tracing::debug;

pub trait SearchIndex {
    fn submission_metadata_changed(&self, submission_id: i64);
    fn submission_files_changed(&self, submission_id: i64);
    fn changes_finished(&self);
}

/// Logs notifications and drops them.
#[derive(Debug, Default)]
pub struct NoopSearchIndex;

impl SearchIndex for NoopSearchIndex {
    fn submission_metadata_changed(&self, submission_id: i64) {
        debug!(submission = submission_id, "search index: metadata changed");
    }

    fn submission_files_changed(&self, submission_id: i64) {
        debug!(submission = submission_id, "search index: files changed");
    }

    fn changes_finished(&self) {
        debug!("search index: changes finished");
    }
}
