use serde::{Deserialize, Serialize};

use crate::locale::LocalizedString;

/// A contributor attached to a publication. Name parts are individually
/// localized; `preferred_public_name` is derived when a middle name or
/// suffix is present, since the default given+family rendering would drop
/// them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub publication_id: i64,
    pub given_name: LocalizedString,
    pub family_name: LocalizedString,
    pub middle_name: LocalizedString,
    pub suffix: Option<String>,
    pub preferred_public_name: LocalizedString,
    pub affiliation: LocalizedString,
    pub email: String,
    /// 1-based author order from the source document.
    pub seq: i32,
    pub primary_contact: bool,
    pub include_in_browse: bool,
    pub user_group_id: Option<i64>,
}

impl Author {
    /// Full name in `locale`: given, middle, and family parts joined with
    /// spaces, skipping missing parts.
    pub fn full_name(&self, locale: &str) -> String {
        let parts = [
            self.given_name.localized(locale),
            self.middle_name.localized(locale),
            self.family_name.localized(locale),
        ];
        parts
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_skips_missing_parts() {
        let author = Author {
            given_name: LocalizedString::with("en_US", "Ada"),
            family_name: LocalizedString::with("en_US", "Lovelace"),
            ..Default::default()
        };
        assert_eq!(author.full_name("en_US"), "Ada Lovelace");
    }

    #[test]
    fn full_name_includes_middle() {
        let author = Author {
            given_name: LocalizedString::with("en_US", "John"),
            middle_name: LocalizedString::with("en_US", "Q."),
            family_name: LocalizedString::with("en_US", "Public"),
            ..Default::default()
        };
        assert_eq!(author.full_name("en_US"), "John Q. Public");
    }
}
