use std::fs;
use std::path::Path;

use crate::error::{FolioError, Result};
use crate::locale::LocalizedValues;
use crate::xml::element::{self, Element};
use crate::xml::extract;

/// Values recognized inside a document's dynamic `<fields>` list, mapped in
/// a single pass. Unrecognized field names are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownFields {
    pub distribution_license: Option<String>,
    pub publication_date: Option<String>,
    pub doi: Option<String>,
}

/// A parsed bepress article metadata document, rooted at its `<document>`
/// element.
#[derive(Debug, Clone)]
pub struct ArticleDocument {
    document: Element,
}

impl ArticleDocument {
    /// Parses a metadata XML string. The export wraps the article in a
    /// `<documents>` root; a bare `<document>` root is also accepted.
    pub fn parse(xml: &str) -> Result<Self> {
        let root = element::parse(xml)?;
        let document = if root.name == "document" {
            root
        } else {
            root.children
                .into_iter()
                .find(|c| c.name == "document")
                .ok_or_else(|| FolioError::InvalidDocument("no <document> element".into()))?
        };
        Ok(Self { document })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let xml = fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    pub fn node(&self) -> &Element {
        &self.document
    }

    /// Trimmed value of a direct child element, if present and non-empty.
    pub fn child_value(&self, name: &str) -> Option<String> {
        self.document.child_value(name)
    }

    /// Localized extraction (singular/plural pair) rooted at the document.
    pub fn localized(&self, singular: &str, plural: &str, primary_locale: &str) -> LocalizedValues {
        extract::localized_values(&self.document, singular, plural, primary_locale)
    }

    /// Single pass over `<fields><field name="…"><value>…</value></field></fields>`.
    pub fn fields(&self) -> KnownFields {
        let mut known = KnownFields::default();
        let Some(fields) = self.document.child("fields") else {
            return known;
        };
        for field in fields.children_named("field") {
            let Some(value) = field.child_value("value") else {
                continue;
            };
            match field.attr("name") {
                Some("distribution_license") => known.distribution_license = Some(value),
                Some("publication_date") => known.publication_date = Some(value),
                Some("doi") => known.doi = Some(value),
                _ => {}
            }
        }
        known
    }

    /// Value of the first `<article-id>` whose `pub-id-type` matches.
    pub fn article_id(&self, id_type: &str) -> Option<String> {
        self.document
            .children_named("article-id")
            .find(|node| node.attr("pub-id-type") == Some(id_type))
            .map(|node| node.value().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Author nodes, or `None` when the document has no `<authors>` element
    /// at all (which triggers placeholder-author creation downstream). An
    /// empty `<authors>` element yields `Some` of an empty list.
    pub fn author_nodes(&self) -> Option<Vec<&Element>> {
        self.document
            .child("authors")
            .map(|authors| authors.children_named("author").collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_documents_root() {
        let doc = ArticleDocument::parse(
            r#"<documents><document><title>T</title></document></documents>"#,
        )
        .unwrap();
        assert_eq!(doc.child_value("title").as_deref(), Some("T"));
    }

    #[test]
    fn accepts_bare_document_root() {
        let doc = ArticleDocument::parse(r#"<document><fpage>3</fpage></document>"#).unwrap();
        assert_eq!(doc.child_value("fpage").as_deref(), Some("3"));
    }

    #[test]
    fn rejects_missing_document() {
        assert!(ArticleDocument::parse(r#"<documents><other/></documents>"#).is_err());
    }

    #[test]
    fn fields_mapped_in_single_pass() {
        let doc = ArticleDocument::parse(
            r#"<document>
                 <fields>
                   <field name="distribution_license"><value>https://creativecommons.org/licenses/by/4.0/</value></field>
                   <field name="publication_date"><value>2019-06-01</value></field>
                   <field name="doi"><value>10.1234/abc</value></field>
                   <field name="mystery"><value>ignored</value></field>
                   <field name="empty"/>
                 </fields>
               </document>"#,
        )
        .unwrap();
        let fields = doc.fields();
        assert_eq!(
            fields.distribution_license.as_deref(),
            Some("https://creativecommons.org/licenses/by/4.0/")
        );
        assert_eq!(fields.publication_date.as_deref(), Some("2019-06-01"));
        assert_eq!(fields.doi.as_deref(), Some("10.1234/abc"));
    }

    #[test]
    fn article_id_filtered_by_type() {
        let doc = ArticleDocument::parse(
            r#"<document>
                 <article-id pub-id-type="publisher">123</article-id>
                 <article-id pub-id-type="doi">10.5555/xyz</article-id>
               </document>"#,
        )
        .unwrap();
        assert_eq!(doc.article_id("doi").as_deref(), Some("10.5555/xyz"));
        assert_eq!(doc.article_id("pmid"), None);
    }

    #[test]
    fn author_nodes_distinguish_missing_from_empty() {
        let without = ArticleDocument::parse(r#"<document/>"#).unwrap();
        assert!(without.author_nodes().is_none());

        let empty = ArticleDocument::parse(r#"<document><authors/></document>"#).unwrap();
        assert_eq!(empty.author_nodes().unwrap().len(), 0);

        let with = ArticleDocument::parse(
            r#"<document><authors><author><lname>Doe</lname></author></authors></document>"#,
        )
        .unwrap();
        assert_eq!(with.author_nodes().unwrap().len(), 1);
    }
}
