use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;
use url::Url;

use crate::doi;
use crate::import::failure::ImportFailure;
use crate::import::{DependentItem, ImportRun, StepError, StepResult};
use crate::locale::LocalizedString;
use crate::models::{
    AccessStatus, Author, Issue, Publication, Role, Section, Submission, SubmissionStatus,
    WorkflowStage,
};
use crate::store::Backend;
use crate::xml::parse_date_parts;

/// Article-level values pulled out of the document before the publication
/// is built: the dynamic `fields` list plus the two date elements.
#[derive(Debug, Clone)]
pub(super) struct ArticleData {
    pub date_published: NaiveDate,
    pub date_submitted: NaiveDateTime,
    pub license_url: Option<String>,
    pub doi: Option<String>,
}

/// Creates and persists the submission shell, then re-fetches it so the
/// pipeline works with the store's view of the record. Registered as a
/// dependent item before anything else references it.
pub(super) fn create_submission_shell(
    store: &dyn Backend,
    run: &mut ImportRun<'_>,
) -> StepResult<Submission> {
    let shell = Submission {
        id: 0,
        journal_id: run.request.journal.id,
        locale: run.primary_locale.to_string(),
        status: SubmissionStatus::Published,
        stage: WorkflowStage::Production,
        progress: 0,
        current_publication_id: None,
        date_submitted: None,
        last_modified: None,
    };
    let id = store.insert_submission(&shell)?;
    run.dependents.push(DependentItem::Submission(id));
    let submission = store
        .submission(id)?
        .ok_or(crate::error::FolioError::RecordNotFound {
            entity: "submission",
            id,
        })?;
    debug!(submission = id, "created submission shell");
    Ok(submission)
}

/// Single pass over the document's known fields and date elements. An
/// unparseable article publication date falls back to the issue's; an
/// unparseable submission date falls back to the article publication date.
pub(super) fn collect_article_data(run: &ImportRun<'_>, issue: &Issue) -> ArticleData {
    let document = run.request.document;
    let fields = document.fields();

    let license_url = fields
        .distribution_license
        .as_deref()
        .and_then(validate_license_url);

    let date_published = fields
        .publication_date
        .as_deref()
        .and_then(parse_date_parts)
        .and_then(|parts| parts.full_date())
        .unwrap_or(issue.date_published);

    let date_submitted = document
        .child_value("submission-date")
        .as_deref()
        .and_then(parse_date_parts)
        .and_then(|parts| parts.full_date())
        .unwrap_or(date_published)
        .and_time(NaiveTime::MIN);

    // Prefer the explicit field; fall back to an article-id of type doi.
    let doi = fields
        .doi
        .or_else(|| document.article_id("doi"))
        .map(|raw| doi::normalize(&raw).unwrap_or_else(|| raw.trim().to_string()));

    ArticleData {
        date_published,
        date_submitted,
        license_url,
        doi,
    }
}

/// Builds and persists the version-1 publication, then points the
/// submission's current publication (and dates) at it.
pub(super) fn build_publication(
    store: &dyn Backend,
    run: &mut ImportRun<'_>,
    issue: &Issue,
    section: &Section,
    submission: &mut Submission,
    data: &ArticleData,
) -> StepResult<Publication> {
    let document = run.request.document;
    let primary = run.primary_locale;

    let mut title = document.localized("title", "titles", primary).into_single();
    if title.is_empty() {
        run.push_failure(ImportFailure::ArticleTitleMissing);
        return Err(StepError::Abort);
    }
    // Every publication needs a title in the journal's primary locale; copy
    // the first available locale's title when the document lacks one.
    title.ensure_locale(primary);

    let abstract_text = document
        .localized("abstract", "abstracts", primary)
        .into_single();

    let pages = match (document.child_value("fpage"), document.child_value("lpage")) {
        (Some(first), Some(last)) => Some(format!("{first}-{last}")),
        _ => None,
    };

    let mut publication = Publication {
        id: 0,
        submission_id: submission.id,
        locale: primary.to_string(),
        section_id: section.id,
        issue_id: issue.id,
        version: 1,
        seq: submission.id,
        status: SubmissionStatus::Published,
        date_published: data.date_published,
        access_status: AccessStatus::Open,
        title,
        abstract_text,
        pages,
        license_url: None,
        copyright_holder: LocalizedString::new(),
        copyright_year: None,
        doi: None,
    };
    let id = store.insert_publication(&publication)?;
    publication = store
        .publication(id)?
        .ok_or(crate::error::FolioError::RecordNotFound {
            entity: "publication",
            id,
        })?;

    submission.current_publication_id = Some(id);
    submission.date_submitted = Some(data.date_submitted);
    submission.last_modified = Some(data.date_published.and_time(NaiveTime::MIN));
    store.update_submission(submission)?;

    Ok(publication)
}

/// Finds the first manager-role group assignable to the submission's stage
/// and records the editor's stage assignment under it. No such group aborts
/// the import.
pub(super) fn assign_editor(
    store: &dyn Backend,
    run: &mut ImportRun<'_>,
    submission: &Submission,
) -> StepResult<i64> {
    let journal = run.request.journal;
    let group_ids = store.user_group_ids_by_role(Role::Manager, journal.id)?;

    let mut editor_group = None;
    for group_id in group_ids {
        if store.group_assigned_to_stage(group_id, submission.stage)? {
            editor_group = Some(group_id);
            break;
        }
    }
    let Some(group_id) = editor_group else {
        run.push_failure(ImportFailure::MissingEditorGroupId);
        return Err(StepError::Abort);
    };

    store.assign_stage(submission.id, group_id, run.request.editor.id)?;
    Ok(group_id)
}

/// Copyright year comes from the publication date, the holder from the
/// freshly inserted author set; whatever remains unset falls back to the
/// journal's configured defaults. Persists the publication. Must run before
/// any vocabulary is attached, since this is a whole-record update.
pub(super) fn apply_permissions(
    store: &dyn Backend,
    run: &ImportRun<'_>,
    publication: &mut Publication,
    authors: &[Author],
    data: &ArticleData,
) -> StepResult<()> {
    let journal = run.request.journal;
    let primary = run.primary_locale;

    let author_string = authors
        .iter()
        .map(|a| a.full_name(primary))
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if !author_string.is_empty() {
        publication.copyright_holder = LocalizedString::with(primary, author_string);
    }
    publication.copyright_year = Some(data.date_published.year());
    publication.license_url = data.license_url.clone();
    publication.doi = data.doi.clone();

    if publication.copyright_holder.is_empty() {
        if let Some(holder) = &journal.default_copyright_holder {
            publication.copyright_holder = LocalizedString::with(primary, holder);
        }
    }
    if publication.copyright_year.is_none() {
        publication.copyright_year = journal.default_copyright_year;
    }
    if publication.license_url.is_none() {
        publication.license_url = journal.default_license_url.clone();
    }

    store.update_publication(publication)?;
    Ok(())
}

/// A usable license value must be an absolute http(s) URL; anything else is
/// discarded rather than stored.
fn validate_license_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            Some(trimmed.to_string())
        }
        _ => {
            debug!(value = trimmed, "discarding invalid distribution license");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn license_urls_must_be_absolute_http() {
        assert_eq!(
            validate_license_url(" https://creativecommons.org/licenses/by/4.0/ ").as_deref(),
            Some("https://creativecommons.org/licenses/by/4.0/")
        );
        assert_eq!(validate_license_url("creativecommons.org/by"), None);
        assert_eq!(validate_license_url("ftp://example.com/license"), None);
        assert_eq!(validate_license_url("not a url"), None);
    }
}
