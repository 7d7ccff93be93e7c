use chrono::Datelike;
use tracing::{debug, info};

use crate::error::Result;
use crate::import::failure::ImportFailure;
use crate::import::{DependentItem, ImportRun};
use crate::locale::LocalizedString;
use crate::models::{AccessStatus, Issue};
use crate::store::Backend;
use crate::xml::parse_date_parts;

/// Resolves or creates the issue for this article. Returns `Ok(None)` after
/// queueing a typed failure when no issue can be determined; the caller
/// adds the umbrella `MissingIssue` failure and aborts.
pub(super) fn resolve_issue(store: &dyn Backend, run: &mut ImportRun<'_>) -> Result<Option<Issue>> {
    let journal = run.request.journal;

    let (Some(volume), Some(number)) = (
        parse_positive(run.request.volume),
        parse_positive(run.request.number),
    ) else {
        run.push_failure(ImportFailure::MissingVolumeNumber {
            title: run.article_title.clone(),
        });
        return Ok(None);
    };

    if let Some(existing) = store.find_published_issue(journal.id, volume, number)? {
        debug!(issue = existing.id, volume, number, "reusing published issue");
        return Ok(Some(existing));
    }

    // New issue: its publication date comes from the article's
    // publication-date element. Year and month are required; the day
    // defaults to the first of the month.
    let raw_date = run.request.document.child_value("publication-date");
    let date = raw_date
        .as_deref()
        .and_then(parse_date_parts)
        .and_then(|parts| parts.month_start());
    let Some(date_published) = date else {
        run.push_failure(ImportFailure::MissingPublicationDate {
            title: run.article_title.clone(),
        });
        return Ok(None);
    };

    let year = date_published.year();
    let mut issue = Issue {
        id: 0,
        journal_id: journal.id,
        volume,
        number,
        year,
        title: LocalizedString::with(
            run.primary_locale,
            format!("Vol. {volume}, No. {number} ({year})"),
        ),
        date_published,
        published: true,
        current: false,
        access_status: AccessStatus::Open,
        show_volume: true,
        show_number: true,
        show_year: true,
        show_title: false,
    };
    issue.id = store.insert_issue(&issue)?;
    run.dependents.push(DependentItem::Issue(issue.id));
    info!(issue = issue.id, volume, number, year, "created issue");

    Ok(Some(issue))
}

/// The driver derives volume/number identifiers from directory names; only
/// a positive integer is usable.
fn parse_positive(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_integers_only() {
        assert_eq!(parse_positive("4"), Some(4));
        assert_eq!(parse_positive(" 12 "), Some(12));
        assert_eq!(parse_positive(""), None);
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-3"), None);
        assert_eq!(parse_positive("vol4"), None);
    }
}
