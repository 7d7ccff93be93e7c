use crate::locale::LocalizedValues;
use crate::xml::element::Element;

/// Shared extraction rule for localized XML fields.
///
/// Looks for a singular element directly under `parent` first; its `locale`
/// attribute (defaulting to the primary locale) keys the single entry.
/// Otherwise iterates the singular children of the plural container,
/// grouping by each child's own locale and preserving encounter order
/// within a locale. Blank values are not recorded.
///
/// This backs titles, abstracts, keywords, subjects, disciplines, and every
/// author name/affiliation field.
pub fn localized_values(
    parent: &Element,
    singular: &str,
    plural: &str,
    primary_locale: &str,
) -> LocalizedValues {
    let mut out = LocalizedValues::new();

    if let Some(node) = parent.child(singular) {
        push_node(&mut out, node, primary_locale);
        return out;
    }

    if let Some(container) = parent.child(plural) {
        for node in container.children_named(singular) {
            push_node(&mut out, node, primary_locale);
        }
    }

    out
}

fn push_node(out: &mut LocalizedValues, node: &Element, primary_locale: &str) {
    let value = node.value();
    if value.is_empty() {
        return;
    }
    let locale = node
        .attr("locale")
        .filter(|l| !l.is_empty())
        .unwrap_or(primary_locale);
    out.push(locale, value);
}
