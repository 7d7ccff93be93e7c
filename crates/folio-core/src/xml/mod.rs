//! Parsing of bepress article metadata documents.
//!
//! Each article directory carries a `metadata.xml` whose `<document>`
//! element holds titles, abstracts, authors, vocabulary, dates, and a
//! dynamic `<fields>` list. The export format is loose: localized fields
//! appear either as a single element with a `locale` attribute or as a
//! plural container of such elements. Documents are parsed into a generic
//! element tree and read through typed accessors.

mod dates;
mod document;
mod element;
mod extract;

pub use dates::{parse_date_parts, DateParts};
pub use document::{ArticleDocument, KnownFields};
pub use element::Element;
pub use extract::localized_values;
