use crate::messages::MessageCatalog;

/// A queued import failure: message key plus parameters, rendered for
/// display only after rollback completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportFailure {
    /// Volume or issue number absent; no issue was attempted.
    MissingVolumeNumber { title: String },
    /// `publication-date` missing or unparseable (year/month).
    MissingPublicationDate { title: String },
    /// Issue resolution/creation failed.
    MissingIssue { title: String },
    /// Section name empty or resolution/creation failed.
    MissingSection { title: String },
    /// No title extractable in any locale.
    ArticleTitleMissing,
    /// No manager-role group assignable to the production stage.
    MissingEditorGroupId,
}

impl ImportFailure {
    pub fn message_key(&self) -> &'static str {
        match self {
            ImportFailure::MissingVolumeNumber { .. } => "import.error.missingVolumeNumber",
            ImportFailure::MissingPublicationDate { .. } => "import.error.missingPubDate",
            ImportFailure::MissingIssue { .. } => "import.error.missingIssue",
            ImportFailure::MissingSection { .. } => "import.error.missingSection",
            ImportFailure::ArticleTitleMissing => "import.error.missingTitle",
            ImportFailure::MissingEditorGroupId => "import.error.missingEditorGroupId",
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            ImportFailure::MissingVolumeNumber { title }
            | ImportFailure::MissingPublicationDate { title }
            | ImportFailure::MissingIssue { title }
            | ImportFailure::MissingSection { title } => vec![("title", title.clone())],
            ImportFailure::ArticleTitleMissing | ImportFailure::MissingEditorGroupId => vec![],
        }
    }

    /// Human-readable rendering through the installation's catalog.
    pub fn render(&self, catalog: &dyn MessageCatalog) -> String {
        catalog.format(self.message_key(), &self.params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Messages;

    #[test]
    fn renders_with_title_parameter() {
        let failure = ImportFailure::MissingIssue {
            title: "On Turtles".into(),
        };
        let rendered = failure.render(&Messages::new());
        assert!(rendered.contains("On Turtles"));
    }

    #[test]
    fn keys_are_stable() {
        assert_eq!(
            ImportFailure::ArticleTitleMissing.message_key(),
            "import.error.missingTitle"
        );
        assert_eq!(
            ImportFailure::MissingEditorGroupId.message_key(),
            "import.error.missingEditorGroupId"
        );
    }
}
