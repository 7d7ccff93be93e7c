//! The article import pipeline.
//!
//! One `ArticleImporter::import` call handles one article end to end:
//! resolve or create the issue, resolve or create the section, create the
//! submission and its version-1 publication with merged locale data,
//! insert authors and controlled vocabulary, attach the PDF galley, and
//! notify the search index. Failures queue typed errors, roll back the
//! top-level records created so far, and surface everything to the caller.

mod authors;
mod failure;
mod galley;
mod issue;
mod publication;
mod section;

pub use failure::ImportFailure;

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::error::{FolioError, Result};
use crate::files::FileStore;
use crate::messages::{MessageCatalog, Messages};
use crate::models::{Issue, Journal, Publication, Section, Submission, User, Vocabulary};
use crate::search::SearchIndex;
use crate::store::Backend;
use crate::xml::ArticleDocument;

/// Everything describing one article to import. Volume and number are the
/// directory-derived positional identifiers supplied by the driver.
#[derive(Debug)]
pub struct ImportRequest<'a> {
    pub journal: &'a Journal,
    /// The user running the import (audit identity).
    pub user: &'a User,
    /// The editor assigned as production-stage participant.
    pub editor: &'a User,
    pub document: &'a ArticleDocument,
    /// One or more PDF paths; the first becomes the galley file.
    pub pdf_paths: &'a [PathBuf],
    pub volume: &'a str,
    pub number: &'a str,
    /// Email for authors the document gives none for.
    pub default_email: &'a str,
}

/// The created/matched records for a successful import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub issue: Issue,
    pub section: Section,
    pub submission: Submission,
    pub publication: Publication,
}

#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Also delete sections created by a failed run. Off by default: a
    /// section is journal-scoped and may already be referenced by the time
    /// a later article fails.
    pub rollback_sections: bool,
    /// Genre key passed to the file store.
    pub genre_key: String,
    /// Policy text for newly created sections, already resolved from the
    /// installation's message catalog.
    pub section_policy: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            rollback_sections: false,
            genre_key: "SUBMISSION".to_string(),
            section_policy: Messages::new().format("section.default.policy", &[]),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The article could not be imported; rollback has run and `failures`
    /// holds the queued reasons.
    #[error("article import aborted ({} queued failures)", .failures.len())]
    Aborted { failures: Vec<ImportFailure> },
    /// The store or filesystem failed; rollback was attempted.
    #[error(transparent)]
    Backend(#[from] FolioError),
}

impl ImportError {
    pub fn failures(&self) -> &[ImportFailure] {
        match self {
            ImportError::Aborted { failures } => failures,
            ImportError::Backend(_) => &[],
        }
    }

    /// Renders the queued failures for display.
    pub fn messages(&self, catalog: &dyn MessageCatalog) -> Vec<String> {
        self.failures().iter().map(|f| f.render(catalog)).collect()
    }
}

/// Internal step outcome: a queued-and-abort signal or a hard store error.
pub(crate) enum StepError {
    Abort,
    Store(FolioError),
}

impl From<FolioError> for StepError {
    fn from(error: FolioError) -> Self {
        StepError::Store(error)
    }
}

pub(crate) type StepResult<T> = std::result::Result<T, StepError>;

/// Top-level records created during a run, deleted in creation order on
/// failure. Sections are tracked separately (see `ImportOptions`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DependentItem {
    Issue(i64),
    Submission(i64),
}

/// Per-invocation pipeline state. Nothing outlives the call, so concurrent
/// imports against different stores are safe.
pub(crate) struct ImportRun<'a> {
    pub(crate) request: &'a ImportRequest<'a>,
    pub(crate) primary_locale: &'a str,
    /// Primary-locale title used in error parameters; may be empty.
    pub(crate) article_title: String,
    pub(crate) dependents: Vec<DependentItem>,
    pub(crate) created_sections: Vec<i64>,
    pub(crate) failures: Vec<ImportFailure>,
}

impl ImportRun<'_> {
    pub(crate) fn push_failure(&mut self, failure: ImportFailure) {
        self.failures.push(failure);
    }
}

pub struct ArticleImporter<'a> {
    store: &'a dyn Backend,
    files: &'a dyn FileStore,
    search: &'a dyn SearchIndex,
    options: ImportOptions,
}

impl<'a> ArticleImporter<'a> {
    pub fn new(
        store: &'a dyn Backend,
        files: &'a dyn FileStore,
        search: &'a dyn SearchIndex,
    ) -> Self {
        Self::with_options(store, files, search, ImportOptions::default())
    }

    pub fn with_options(
        store: &'a dyn Backend,
        files: &'a dyn FileStore,
        search: &'a dyn SearchIndex,
        options: ImportOptions,
    ) -> Self {
        Self {
            store,
            files,
            search,
            options,
        }
    }

    /// Imports one article, returning the created/matched records or the
    /// queued failures after rollback.
    pub fn import(
        &self,
        request: &ImportRequest<'_>,
    ) -> std::result::Result<ImportOutcome, ImportError> {
        if request.pdf_paths.is_empty() {
            return Err(ImportError::Backend(FolioError::InvalidDocument(
                "no PDF file supplied".into(),
            )));
        }

        let primary_locale = request.journal.primary_locale.as_str();
        let article_title = request
            .document
            .localized("title", "titles", primary_locale)
            .into_single()
            .localized(primary_locale)
            .unwrap_or_default()
            .to_string();
        debug!(
            journal = %request.journal.path,
            user = %request.user.username,
            volume = request.volume,
            number = request.number,
            title = %article_title,
            "importing article"
        );

        let mut run = ImportRun {
            request,
            primary_locale,
            article_title,
            dependents: Vec::new(),
            created_sections: Vec::new(),
            failures: Vec::new(),
        };

        match self.run_pipeline(&mut run) {
            Ok(outcome) => {
                info!(
                    issue = outcome.issue.id,
                    section = outcome.section.id,
                    submission = outcome.submission.id,
                    "article imported"
                );
                Ok(outcome)
            }
            Err(StepError::Abort) => {
                warn!(failures = run.failures.len(), "import aborted; rolling back");
                self.rollback(&run).map_err(ImportError::Backend)?;
                Err(ImportError::Aborted {
                    failures: run.failures,
                })
            }
            Err(StepError::Store(error)) => {
                warn!(%error, "store failure during import; rolling back");
                if let Err(rollback_error) = self.rollback(&run) {
                    warn!(%rollback_error, "rollback incomplete after store failure");
                }
                Err(ImportError::Backend(error))
            }
        }
    }

    fn run_pipeline(&self, run: &mut ImportRun<'_>) -> StepResult<ImportOutcome> {
        let issue = match issue::resolve_issue(self.store, run)? {
            Some(issue) => issue,
            None => {
                let title = run.article_title.clone();
                run.push_failure(ImportFailure::MissingIssue { title });
                return Err(StepError::Abort);
            }
        };

        let section = match section::resolve_section(self.store, run, &self.options.section_policy)?
        {
            Some(section) => section,
            None => {
                let title = run.article_title.clone();
                run.push_failure(ImportFailure::MissingSection { title });
                return Err(StepError::Abort);
            }
        };

        let mut submission = publication::create_submission_shell(self.store, run)?;
        let data = publication::collect_article_data(run, &issue);
        let mut publication = publication::build_publication(
            self.store,
            run,
            &issue,
            &section,
            &mut submission,
            &data,
        )?;
        let authors = authors::process_authors(self.store, run, publication.id)?;
        publication::assign_editor(self.store, run, &submission)?;
        publication::apply_permissions(self.store, run, &mut publication, &authors, &data)?;
        // Vocabulary goes in only after the final whole-record publication
        // update above; the update would wipe these relations otherwise.
        self.insert_vocabulary(run, publication.id)?;
        galley::attach_galley(
            self.store,
            self.files,
            run,
            &self.options,
            publication.id,
            submission.id,
        )?;

        self.search.submission_metadata_changed(submission.id);
        self.search.submission_files_changed(submission.id);
        self.search.changes_finished();

        Ok(ImportOutcome {
            issue,
            section,
            submission,
            publication,
        })
    }

    fn insert_vocabulary(&self, run: &ImportRun<'_>, publication_id: i64) -> Result<()> {
        let document = run.request.document;
        let pairs = [
            (Vocabulary::Keyword, "keyword", "keywords"),
            (Vocabulary::Subject, "subject-area", "subject-areas"),
            (Vocabulary::Discipline, "discipline", "disciplines"),
        ];
        for (kind, singular, plural) in pairs {
            let terms = document
                .localized(singular, plural, run.primary_locale)
                .split_terms(';');
            self.store.replace_vocabulary(kind, publication_id, &terms)?;
        }
        Ok(())
    }

    fn rollback(&self, run: &ImportRun<'_>) -> Result<()> {
        for item in &run.dependents {
            match item {
                DependentItem::Issue(id) => {
                    warn!(issue = id, "rolling back issue");
                    self.store.delete_issue(*id)?;
                }
                DependentItem::Submission(id) => {
                    warn!(submission = id, "rolling back submission");
                    self.store.delete_submission(*id)?;
                }
            }
        }
        if self.options.rollback_sections {
            for id in &run.created_sections {
                warn!(section = id, "rolling back section");
                self.store.delete_section(*id)?;
            }
        }
        Ok(())
    }
}
