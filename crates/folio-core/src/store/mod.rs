//! Persistent-store contracts the importer writes through.
//!
//! Each entity gets a small accessor trait (lookup by key, insert returning
//! the assigned identity, update, delete). `Backend` bundles the traits the
//! import pipeline needs so it can run against any store: the bundled
//! SQLite adapter, the in-memory reference store, or an external system.

pub mod memory;
pub mod sqlite;

use crate::error::Result;
use crate::locale::LocalizedValues;
use crate::models::{
    Author, Galley, Issue, Journal, Publication, Role, Section, Submission, User, UserGroup,
    Vocabulary, WorkflowStage,
};

pub trait IssueStore {
    /// First published issue matching (journal, volume, number), in store
    /// enumeration order.
    fn find_published_issue(&self, journal_id: i64, volume: i32, number: i32)
        -> Result<Option<Issue>>;
    fn insert_issue(&self, issue: &Issue) -> Result<i64>;
    fn update_issue(&self, issue: &Issue) -> Result<()>;
    fn delete_issue(&self, id: i64) -> Result<()>;
}

pub trait SectionStore {
    /// Exact localized-title match within a journal.
    fn find_section_by_title(
        &self,
        journal_id: i64,
        locale: &str,
        title: &str,
    ) -> Result<Option<Section>>;
    fn insert_section(&self, section: &Section) -> Result<i64>;
    fn delete_section(&self, id: i64) -> Result<()>;
}

pub trait SubmissionStore {
    fn insert_submission(&self, submission: &Submission) -> Result<i64>;
    fn submission(&self, id: i64) -> Result<Option<Submission>>;
    fn update_submission(&self, submission: &Submission) -> Result<()>;
    /// Deletes the submission and everything hanging off it (publications,
    /// authors, galleys, vocabulary).
    fn delete_submission(&self, id: i64) -> Result<()>;
}

pub trait PublicationStore {
    fn insert_publication(&self, publication: &Publication) -> Result<i64>;
    fn publication(&self, id: i64) -> Result<Option<Publication>>;
    fn update_publication(&self, publication: &Publication) -> Result<()>;
}

pub trait AuthorStore {
    fn insert_author(&self, author: &Author) -> Result<i64>;
    fn authors_by_publication(&self, publication_id: i64) -> Result<Vec<Author>>;
}

pub trait GalleyStore {
    fn insert_galley(&self, galley: &Galley) -> Result<i64>;
    fn update_galley(&self, galley: &Galley) -> Result<()>;
}

pub trait VocabularyStore {
    /// Replaces all terms of one kind for a publication.
    fn replace_vocabulary(
        &self,
        kind: Vocabulary,
        publication_id: i64,
        terms: &LocalizedValues,
    ) -> Result<()>;
    fn vocabulary(&self, kind: Vocabulary, publication_id: i64) -> Result<LocalizedValues>;
}

pub trait UserGroupStore {
    fn insert_user_group(&self, group: &UserGroup) -> Result<i64>;
    /// Candidate group ids granting `role` within a journal, in store order.
    fn user_group_ids_by_role(&self, role: Role, journal_id: i64) -> Result<Vec<i64>>;
    fn group_assigned_to_stage(&self, group_id: i64, stage: WorkflowStage) -> Result<bool>;
    /// Records a user's participation in a submission under a group.
    fn assign_stage(&self, submission_id: i64, group_id: i64, user_id: i64) -> Result<()>;
}

/// Journal/user administration, used by drivers rather than the importer.
pub trait JournalStore {
    fn insert_journal(&self, journal: &Journal) -> Result<i64>;
    fn journal_by_path(&self, path: &str) -> Result<Option<Journal>>;
    fn journals(&self) -> Result<Vec<Journal>>;
}

pub trait UserStore {
    fn insert_user(&self, user: &User) -> Result<i64>;
    fn user_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// Everything the import pipeline needs from one store.
pub trait Backend:
    IssueStore
    + SectionStore
    + SubmissionStore
    + PublicationStore
    + AuthorStore
    + GalleyStore
    + VocabularyStore
    + UserGroupStore
{
}

impl<T> Backend for T where
    T: IssueStore
        + SectionStore
        + SubmissionStore
        + PublicationStore
        + AuthorStore
        + GalleyStore
        + VocabularyStore
        + UserGroupStore
{
}
