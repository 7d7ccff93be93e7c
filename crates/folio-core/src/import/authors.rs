use std::collections::BTreeSet;

use tracing::info;

use crate::error::Result;
use crate::import::ImportRun;
use crate::locale::LocalizedString;
use crate::models::{Author, Role};
use crate::store::Backend;
use crate::xml::{localized_values, Element};

/// Inserts the article's authors against the publication. A document with
/// no `<authors>` element gets a single placeholder author carrying the
/// journal's name; an empty `<authors>` element yields no authors at all.
pub(super) fn process_authors(
    store: &dyn Backend,
    run: &ImportRun<'_>,
    publication_id: i64,
) -> Result<Vec<Author>> {
    let journal = run.request.journal;
    let user_group_id = store
        .user_group_ids_by_role(Role::Author, journal.id)?
        .first()
        .copied();

    let mut authors = Vec::new();
    match run.request.document.author_nodes() {
        None => {
            let mut author = placeholder_author(run, publication_id, user_group_id);
            author.id = store.insert_author(&author)?;
            info!(publication = publication_id, "no authors element; created placeholder author");
            authors.push(author);
        }
        Some(nodes) => {
            for (index, node) in nodes.into_iter().enumerate() {
                let mut author = author_from_node(node, index, run, publication_id, user_group_id);
                author.id = store.insert_author(&author)?;
                authors.push(author);
            }
        }
    }
    Ok(authors)
}

fn author_from_node(
    node: &Element,
    index: usize,
    run: &ImportRun<'_>,
    publication_id: i64,
    user_group_id: Option<i64>,
) -> Author {
    let primary = run.primary_locale;

    let given_name = localized_values(node, "fname", "fnames", primary).into_single();
    let middle_name = localized_values(node, "mname", "mnames", primary).into_single();
    let mut family_name = localized_values(node, "lname", "lnames", primary).into_single();
    if family_name.is_empty() {
        // Anonymous contributors surface under the journal's own name.
        family_name.set(primary, run.request.journal.display_name());
    }
    let suffix = node.child_value("suffix");
    let affiliation = localized_values(node, "institution", "institutions", primary).into_single();
    let email = node
        .child_value("email")
        .unwrap_or_else(|| run.request.default_email.to_string());

    let preferred_public_name =
        preferred_public_name(&given_name, &middle_name, &family_name, suffix.as_deref());

    Author {
        id: 0,
        publication_id,
        given_name,
        family_name,
        middle_name,
        suffix,
        preferred_public_name,
        affiliation,
        email,
        seq: index as i32 + 1,
        primary_contact: index == 0,
        include_in_browse: true,
        user_group_id,
    }
}

fn placeholder_author(
    run: &ImportRun<'_>,
    publication_id: i64,
    user_group_id: Option<i64>,
) -> Author {
    Author {
        id: 0,
        publication_id,
        given_name: LocalizedString::new(),
        family_name: LocalizedString::with(run.primary_locale, run.request.journal.display_name()),
        middle_name: LocalizedString::new(),
        suffix: None,
        preferred_public_name: LocalizedString::new(),
        affiliation: LocalizedString::new(),
        email: run.request.default_email.to_string(),
        seq: 1,
        primary_contact: true,
        include_in_browse: true,
        user_group_id,
    }
}

/// The default public rendering is given+family, which drops middle names
/// and suffixes. When either is present, build an explicit per-locale
/// rendering of every name part.
fn preferred_public_name(
    given: &LocalizedString,
    middle: &LocalizedString,
    family: &LocalizedString,
    suffix: Option<&str>,
) -> LocalizedString {
    let mut out = LocalizedString::new();
    if middle.is_empty() && suffix.is_none() {
        return out;
    }

    let locales: BTreeSet<&str> = given
        .iter()
        .chain(middle.iter())
        .chain(family.iter())
        .map(|(locale, _)| locale)
        .collect();

    for locale in locales {
        let mut parts: Vec<&str> = [
            given.localized(locale),
            middle.localized(locale),
            family.localized(locale),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();
        if let Some(suffix) = suffix {
            parts.push(suffix);
        }
        if !parts.is_empty() {
            out.set(locale, parts.join(" "));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_name_absent_without_middle_or_suffix() {
        let given = LocalizedString::with("en_US", "Ada");
        let family = LocalizedString::with("en_US", "Lovelace");
        let preferred = preferred_public_name(&given, &LocalizedString::new(), &family, None);
        assert!(preferred.is_empty());
    }

    #[test]
    fn preferred_name_built_per_locale_with_middle() {
        let given = LocalizedString::with("en_US", "John");
        let middle = LocalizedString::with("en_US", "Q.");
        let family = LocalizedString::with("en_US", "Public");
        let preferred = preferred_public_name(&given, &middle, &family, None);
        assert_eq!(preferred.get("en_US"), Some("John Q. Public"));
    }

    #[test]
    fn preferred_name_appends_suffix() {
        let given = LocalizedString::with("en_US", "Sammy");
        let family = LocalizedString::with("en_US", "Davis");
        let preferred = preferred_public_name(&given, &LocalizedString::new(), &family, Some("Jr."));
        assert_eq!(preferred.get("en_US"), Some("Sammy Davis Jr."));
    }

    #[test]
    fn preferred_name_covers_union_of_locales() {
        let mut given = LocalizedString::with("en_US", "Nikolai");
        given.set("ru_RU", "Николай");
        let middle = LocalizedString::with("en_US", "I.");
        let family = LocalizedString::with("en_US", "Lobachevsky");
        let preferred = preferred_public_name(&given, &middle, &family, None);
        // The ru_RU rendering falls back to available parts.
        assert_eq!(preferred.get("en_US"), Some("Nikolai I. Lobachevsky"));
        assert_eq!(preferred.get("ru_RU"), Some("Николай I. Lobachevsky"));
    }
}
