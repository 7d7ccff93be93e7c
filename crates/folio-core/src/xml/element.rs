use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{FolioError, Result};

/// One element of a parsed metadata document: name, attributes, direct
/// text content, and child elements in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child with the given element name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text content of this element.
    pub fn value(&self) -> &str {
        self.text.trim()
    }

    /// Trimmed text content of the first child with the given name, if it
    /// exists and is non-empty.
    pub fn child_value(&self, name: &str) -> Option<String> {
        self.child(name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Parses an XML string into its root element.
pub fn parse(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => stack.push(element_from(e)),
            Ok(Event::Empty(ref e)) => {
                let element = element_from(e);
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Text(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    let raw = e
                        .unescape()
                        .map(Cow::into_owned)
                        .unwrap_or_else(|_| String::from_utf8_lossy(e.as_ref()).into_owned());
                    append_text(top, &decode_entities(&raw));
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    let raw = String::from_utf8_lossy(e.as_ref()).into_owned();
                    append_text(top, &raw);
                }
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| FolioError::InvalidDocument("unbalanced end tag".into()))?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FolioError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| FolioError::InvalidDocument("no root element".into()))
}

fn element_from(start: &BytesStart) -> Element {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let attributes = start
        .attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map(Cow::into_owned)
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            (key, value)
        })
        .collect();
    Element {
        name,
        attributes,
        text: String::new(),
        children: Vec::new(),
    }
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            // Keep the first root; anything after it is junk.
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn append_text(element: &mut Element, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !element.text.is_empty() {
        element.text.push(' ');
    }
    element.text.push_str(text);
}

/// Decodes residual character references left after XML unescaping.
///
/// bepress exports HTML-escape field content before XML-escaping it, so
/// decoded text still contains references like `&amp;#8217;` → `&#8217;`.
/// Handles numeric references plus the common named set; unknown
/// references pass through untouched.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match rest.find(';') {
            // Entities are short; longer ampersand runs are literal text.
            Some(end) if end > 1 && end <= 10 => {
                let entity = &rest[1..end];
                match decode_entity(entity) {
                    Some(decoded) => {
                        out.push_str(&decoded);
                        rest = &rest[end + 1..];
                    }
                    None => {
                        out.push('&');
                        rest = &rest[1..];
                    }
                }
            }
            _ => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<String> {
    if let Some(num) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        let code = u32::from_str_radix(num, 16).ok()?;
        return char::from_u32(code).map(String::from);
    }
    if let Some(num) = entity.strip_prefix('#') {
        let code: u32 = num.parse().ok()?;
        return char::from_u32(code).map(String::from);
    }

    let ch = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '–',
        "mdash" => '—',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "hellip" => '…',
        "middot" => '·',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "deg" => '°',
        "plusmn" => '±',
        "sect" => '§',
        "para" => '¶',
        "eacute" => 'é',
        "egrave" => 'è',
        "agrave" => 'à',
        "ccedil" => 'ç',
        "ntilde" => 'ñ',
        "ouml" => 'ö',
        "auml" => 'ä',
        "uuml" => 'ü',
        "szlig" => 'ß',
        _ => return None,
    };
    Some(ch.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let root = parse(
            r#"<documents>
                 <document>
                   <title locale="en_US">A &amp; B</title>
                   <fpage>10</fpage>
                 </document>
               </documents>"#,
        )
        .unwrap();
        assert_eq!(root.name, "documents");
        let document = root.child("document").unwrap();
        let title = document.child("title").unwrap();
        assert_eq!(title.attr("locale"), Some("en_US"));
        assert_eq!(title.value(), "A & B");
        assert_eq!(document.child_value("fpage").as_deref(), Some("10"));
    }

    #[test]
    fn parses_empty_elements() {
        let root = parse(r#"<document><fpage/><lpage>7</lpage></document>"#).unwrap();
        assert!(root.child("fpage").is_some());
        assert_eq!(root.child_value("fpage"), None);
        assert_eq!(root.child_value("lpage").as_deref(), Some("7"));
    }

    #[test]
    fn decodes_double_escaped_html_entities() {
        let root = parse(r#"<t>It&amp;rsquo;s 5&amp;#176; colder</t>"#).unwrap();
        assert_eq!(root.value(), "It’s 5° colder");
    }

    #[test]
    fn unknown_entities_pass_through() {
        assert_eq!(decode_entities("a &bogus; b"), "a &bogus; b");
        assert_eq!(decode_entities("R&D"), "R&D");
    }

    #[test]
    fn rejects_documents_without_root() {
        assert!(parse("   ").is_err());
    }
}
