//! Localized message catalog.
//!
//! Import failures are queued as (message key, parameters) pairs and only
//! rendered for display at the end of a run. `Messages` ships the English
//! defaults; installations with their own catalogs implement
//! `MessageCatalog`.

use std::collections::HashMap;

pub trait MessageCatalog {
    /// Renders `key`, substituting `{name}` placeholders from `params`.
    fn format(&self, key: &str, params: &[(&str, String)]) -> String;
}

pub struct Messages {
    entries: HashMap<&'static str, &'static str>,
}

impl Default for Messages {
    fn default() -> Self {
        let entries = HashMap::from([
            (
                "import.error.missingVolumeNumber",
                "Missing volume or issue number for article \"{title}\"; skipped.",
            ),
            (
                "import.error.missingPubDate",
                "Missing or invalid publication date for article \"{title}\"; skipped.",
            ),
            (
                "import.error.missingIssue",
                "No issue could be found or created for article \"{title}\"; skipped.",
            ),
            (
                "import.error.missingSection",
                "No section could be found or created for article \"{title}\"; skipped.",
            ),
            (
                "import.error.missingTitle",
                "Article is missing a title in every locale; skipped.",
            ),
            (
                "import.error.missingEditorGroupId",
                "No manager user group participates in the production stage; cannot assign the editor.",
            ),
            (
                "section.default.policy",
                "Section default policy",
            ),
        ]);
        Self { entries }
    }
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageCatalog for Messages {
    fn format(&self, key: &str, params: &[(&str, String)]) -> String {
        let template = self.entries.get(key).copied().unwrap_or(key);
        let mut out = template.to_string();
        for (name, value) in params {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_parameters() {
        let messages = Messages::new();
        let rendered = messages.format(
            "import.error.missingIssue",
            &[("title", "On Turtles".to_string())],
        );
        assert!(rendered.contains("\"On Turtles\""));
    }

    #[test]
    fn unknown_keys_render_as_themselves() {
        let messages = Messages::new();
        assert_eq!(messages.format("no.such.key", &[]), "no.such.key");
    }
}
