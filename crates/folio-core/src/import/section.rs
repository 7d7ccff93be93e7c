use tracing::{debug, info};

use crate::error::Result;
use crate::import::ImportRun;
use crate::locale::LocalizedString;
use crate::models::Section;
use crate::store::Backend;

/// Resolves or creates the section for this article. The section name
/// derives from `document-type`, falling back to `type`, falling back to
/// the literal `"Articles"`. Returns `Ok(None)` when the derived name is
/// empty; the caller queues `MissingSection`.
pub(super) fn resolve_section(
    store: &dyn Backend,
    run: &mut ImportRun<'_>,
    default_policy: &str,
) -> Result<Option<Section>> {
    let journal = run.request.journal;
    let document = run.request.document;

    let name = match document
        .child_value("document-type")
        .or_else(|| document.child_value("type"))
    {
        Some(raw) => section_name(&raw),
        None => "Articles".to_string(),
    };
    if name.is_empty() {
        return Ok(None);
    }

    if let Some(existing) = store.find_section_by_title(journal.id, run.primary_locale, &name)? {
        debug!(section = existing.id, title = %name, "reusing section");
        return Ok(Some(existing));
    }

    let abbrev: String = name.chars().take(3).collect::<String>().to_uppercase();
    let mut section = Section {
        id: 0,
        journal_id: journal.id,
        title: LocalizedString::with(run.primary_locale, &name),
        abbrev: LocalizedString::with(run.primary_locale, abbrev),
        policy: LocalizedString::with(run.primary_locale, default_policy),
        abstracts_not_required: true,
        meta_indexed: true,
        meta_reviewed: false,
        editor_restricted: true,
        hide_title: false,
        hide_author: false,
    };
    section.id = store.insert_section(&section)?;
    run.created_sections.push(section.id);
    info!(section = section.id, title = %name, "created section");

    Ok(Some(section))
}

/// Normalizes a raw document type into a section title: underscores become
/// spaces, then each word is title-cased.
fn section_name(raw: &str) -> String {
    raw.replace('_', " ")
        .to_lowercase()
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscores_and_case_normalize() {
        assert_eq!(section_name("research_article"), "Research Article");
        assert_eq!(section_name("Research Article"), "Research Article");
        assert_eq!(section_name("RESEARCH_ARTICLE"), "Research Article");
        assert_eq!(section_name("review"), "Review");
    }

    #[test]
    fn underscores_only_normalizes_to_empty() {
        assert_eq!(section_name("___"), "");
    }
}
