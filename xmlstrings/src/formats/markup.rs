//! Support for Android `strings.xml` localization format.
//!
//! The document is kept as the full event stream it was parsed from, so
//! writing it back reproduces declaration, comments, attributes and
//! whitespace. Only the text of `<string>` elements can be changed, through an
//! index built while parsing.

use quick_xml::{
    Reader, Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesStart, BytesText, Event},
};
use std::{
    borrow::Cow,
    collections::HashMap,
    io::{BufRead, Write},
    ops::Range,
};

use crate::{
    error::Error,
    traits::Parser,
    types::{MergeResult, StringTable},
};

/// Name of the elements holding localized text.
pub const STRING_TAG: &[u8] = b"string";

/// A tagged element located in the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    key: String,
    /// Events making up the element's text. Empty when the text is absent.
    text: Range<usize>,
    value: Option<String>,
    modified: bool,
}

/// A tagged element whose text run is still being read.
struct OpenElement {
    key: String,
    text_start: usize,
    value: Option<String>,
}

impl OpenElement {
    fn push_text(&mut self, text: &str) {
        self.value.get_or_insert_with(String::new).push_str(text);
    }

    fn close(self, end: usize) -> Element {
        Element {
            key: self.key,
            text: self.text_start..end,
            value: self.value,
            modified: false,
        }
    }
}

/// A parsed `strings.xml` document.
#[derive(Debug, Clone)]
pub struct Document {
    events: Vec<Event<'static>>,
    elements: Vec<Element>,
    tagged_count: usize,
}

impl Document {
    /// All named entries. For repeated names the last element wins.
    pub fn table(&self) -> StringTable {
        self.elements
            .iter()
            .map(|element| (element.key.as_str(), element.value.clone()))
            .collect()
    }

    /// Named entries in document order, repeated names included.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.elements
            .iter()
            .map(|element| (element.key.as_str(), element.value.as_deref()))
    }

    /// Number of `<string>` elements, named or not.
    pub fn element_count(&self) -> usize {
        self.tagged_count
    }

    /// `true` once any element text was replaced.
    pub fn is_modified(&self) -> bool {
        self.elements.iter().any(|element| element.modified)
    }

    /// Replaces the text of every element named `key` that already has text
    /// different from `value`. Returns how many elements changed.
    pub fn set_text(&mut self, key: &str, value: &str) -> usize {
        let mut changed = 0;
        for element in self.elements.iter_mut().filter(|e| e.key == key) {
            if element.value.as_deref().is_some_and(|current| current != value) {
                element.value = Some(value.to_string());
                element.modified = true;
                changed += 1;
            }
        }
        changed
    }

    /// Applies every applied record of a merge. Returns how many elements changed.
    pub fn apply(&mut self, result: &MergeResult) -> usize {
        result
            .applied
            .iter()
            .filter_map(|record| {
                record
                    .new_value
                    .as_deref()
                    .map(|value| self.set_text(&record.key, value))
            })
            .sum()
    }
}

impl Parser for Document {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut events = Vec::new();
        let mut elements = Vec::new();
        let mut tagged_count = 0;
        let mut open: Option<OpenElement> = None;
        let mut depth = 0usize;
        let mut has_root = false;

        loop {
            let event = xml_reader.read_event_into(&mut buf)?;
            let index = events.len();

            let text = match &event {
                Event::Text(text) if open.is_some() => Some(text.unescape()?),
                Event::CData(data) if open.is_some() => Some(Cow::Borrowed(
                    std::str::from_utf8(data).map_err(|e| Error::InvalidMarkup(e.to_string()))?,
                )),
                _ => None,
            };
            match text {
                Some(text) => {
                    if let Some(element) = open.as_mut() {
                        element.push_text(&text);
                    }
                }
                None => {
                    if let Some(element) = open.take() {
                        elements.push(element.close(index));
                    }
                }
            }

            match &event {
                Event::Start(start) => {
                    depth += 1;
                    has_root = true;
                    if is_tagged(start) {
                        tagged_count += 1;
                        open = read_name(start)?.map(|key| OpenElement {
                            key,
                            text_start: index + 1,
                            value: None,
                        });
                    }
                }
                Event::Empty(start) => {
                    has_root = true;
                    if is_tagged(start) {
                        tagged_count += 1;
                        if let Some(key) = read_name(start)? {
                            elements.push(Element {
                                key,
                                text: index + 1..index + 1,
                                value: None,
                                modified: false,
                            });
                        }
                    }
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => break,
                _ => {}
            }

            events.push(event.into_owned());
            buf.clear();
        }

        if !has_root {
            return Err(Error::InvalidMarkup("document has no root element".to_string()));
        }
        if depth != 0 {
            return Err(Error::InvalidMarkup(format!(
                "unexpected end of document with {} unclosed element(s)",
                depth
            )));
        }

        tracing::debug!(
            elements = tagged_count,
            named = elements.len(),
            "parsed strings.xml document"
        );

        Ok(Document {
            events,
            elements,
            tagged_count,
        })
    }

    /// Writes the document back with a UTF-8 declaration.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(writer);

        let replacements: HashMap<usize, &Element> = self
            .elements
            .iter()
            .filter(|element| element.modified)
            .map(|element| (element.text.start, element))
            .collect();

        let mut index = 0;
        match self.events.first() {
            Some(Event::Decl(decl)) => {
                xml_writer.write_event(Event::Decl(utf8_declaration(decl)?))?;
                index = 1;
            }
            _ => {
                xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
                xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
            }
        }

        while index < self.events.len() {
            if let Some(element) = replacements.get(&index) {
                let value = element.value.as_deref().unwrap_or_default();
                xml_writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(value))))?;
                index = element.text.end.max(index + 1);
                continue;
            }
            xml_writer.write_event(self.events[index].clone())?;
            index += 1;
        }

        Ok(())
    }
}

fn is_tagged(start: &BytesStart) -> bool {
    start.name().as_ref() == STRING_TAG
}

/// Reads the `name` attribute. Missing and empty names both give `None`.
fn read_name(start: &BytesStart) -> Result<Option<String>, Error> {
    for attr in start.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::InvalidMarkup(e.to_string()))?;
        if attr.key.as_ref() == b"name" {
            let name = attr.unescape_value()?.into_owned();
            if name.is_empty() {
                tracing::debug!("skipping <string> with an empty name");
                return Ok(None);
            }
            return Ok(Some(name));
        }
    }
    tracing::debug!("skipping <string> without a name");
    Ok(None)
}

/// Rebuilds a declaration with `encoding="utf-8"`, keeping version and standalone.
fn utf8_declaration(original: &BytesDecl) -> Result<BytesDecl<'static>, Error> {
    let version = original
        .version()
        .map_err(|e| Error::InvalidMarkup(e.to_string()))?;
    let version = String::from_utf8_lossy(&version).into_owned();

    let standalone = match original.standalone() {
        Some(value) => {
            let value = value.map_err(|e| Error::InvalidMarkup(e.to_string()))?;
            Some(String::from_utf8_lossy(&value).into_owned())
        }
        None => None,
    };

    Ok(BytesDecl::new(&version, Some("utf-8"), standalone.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <!-- Greetings -->
    <string name="greeting">Hello</string>
    <string name="farewell"/>
    <string name="tools" translatable="false">Tom &amp; Jerry</string>
</resources>
"#;

    fn write_to_string(document: &Document) -> String {
        let mut out = Vec::new();
        document.to_writer(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_basic_strings_xml() {
        let document = Document::from_str(SAMPLE).unwrap();
        let table = document.table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("greeting"), Some(Some("Hello")));
        assert_eq!(table.get("farewell"), Some(None));
        assert_eq!(table.get("tools"), Some(Some("Tom & Jerry")));
        assert_eq!(document.element_count(), 3);
    }

    #[test]
    fn test_empty_element_is_absent() {
        let xml = r#"<resources><string name="empty"></string><string name="blank"> </string></resources>"#;
        let table = Document::from_str(xml).unwrap().table();
        assert_eq!(table.get("empty"), Some(None));
        assert_eq!(table.get("blank"), Some(Some(" ")));
    }

    #[test]
    fn test_text_stops_at_first_child() {
        let xml = r#"<resources><string name="styled">Hello <b>world</b>!</string></resources>"#;
        let table = Document::from_str(xml).unwrap().table();
        assert_eq!(table.get("styled"), Some(Some("Hello ")));
    }

    #[test]
    fn test_cdata_is_part_of_text() {
        let xml = r#"<resources><string name="html"><![CDATA[<b>bold</b>]]></string></resources>"#;
        let table = Document::from_str(xml).unwrap().table();
        assert_eq!(table.get("html"), Some(Some("<b>bold</b>")));
    }

    #[test]
    fn test_missing_or_empty_name_is_skipped() {
        let xml = r#"
        <resources>
            <string>No name attr</string>
            <string name="">Empty name</string>
            <string name="ok">Fine</string>
        </resources>
        "#;
        let document = Document::from_str(xml).unwrap();
        let table = document.table();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("ok"), Some(Some("Fine")));
        assert_eq!(document.element_count(), 3);
    }

    #[test]
    fn test_strings_at_any_depth_and_plurals_ignored() {
        let xml = r#"
        <resources>
            <group><string name="nested">Inner</string></group>
            <plurals name="apples">
                <item quantity="one">One apple</item>
            </plurals>
        </resources>
        "#;
        let table = Document::from_str(xml).unwrap().table();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("nested"), Some(Some("Inner")));
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let xml = r#"<resources><string name="a">1</string><string name="a">2</string></resources>"#;
        let table = Document::from_str(xml).unwrap().table();
        assert_eq!(table.get("a"), Some(Some("2")));
    }

    #[test]
    fn test_mismatched_tags_fail() {
        let xml = r#"<resources><string name="a">1</strin></resources>"#;
        assert!(Document::from_str(xml).is_err());
    }

    #[test]
    fn test_unclosed_document_fails() {
        let xml = r#"<resources><string name="a">1</string>"#;
        let err = Document::from_str(xml).unwrap_err();
        assert!(err.to_string().contains("unclosed"));
    }

    #[test]
    fn test_empty_document_fails() {
        let err = Document::from_str("").unwrap_err();
        assert!(err.to_string().contains("no root element"));
    }

    #[test]
    fn test_unmodified_round_trip_is_identical() {
        let document = Document::from_str(SAMPLE).unwrap();
        assert_eq!(write_to_string(&document), SAMPLE);
    }

    #[test]
    fn test_set_text_changes_only_that_text() {
        let mut document = Document::from_str(SAMPLE).unwrap();
        assert_eq!(document.set_text("greeting", "Good day"), 1);
        assert!(document.is_modified());
        assert_eq!(
            write_to_string(&document),
            SAMPLE.replace(">Hello<", ">Good day<")
        );
    }

    #[test]
    fn test_set_text_never_fills_absent_text() {
        let mut document = Document::from_str(SAMPLE).unwrap();
        assert_eq!(document.set_text("farewell", "Bye"), 0);
        assert_eq!(document.set_text("greeting", "Hello"), 0);
        assert!(!document.is_modified());
    }

    #[test]
    fn test_set_text_escapes_markup_characters() {
        let mut document = Document::from_str(SAMPLE).unwrap();
        document.set_text("tools", "Tom & <Jerry> \"quoted\"");
        let written = write_to_string(&document);
        assert!(written.contains(r#"translatable="false">Tom &amp; &lt;Jerry&gt; "quoted"</string>"#));

        let reparsed = Document::from_str(&written).unwrap();
        assert_eq!(
            reparsed.table().get("tools"),
            Some(Some("Tom & <Jerry> \"quoted\""))
        );
    }

    #[test]
    fn test_declaration_rewritten_as_utf8() {
        let xml = "<?xml version=\"1.0\" encoding=\"ISO-8859-1\" standalone=\"yes\"?>\n<resources><string name=\"a\">x</string></resources>";
        let document = Document::from_str(xml).unwrap();
        let written = write_to_string(&document);
        assert!(written.starts_with(
            "<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"yes\"?>\n<resources>"
        ));
    }

    #[test]
    fn test_declaration_added_when_missing() {
        let xml = r#"<resources><string name="a">x</string></resources>"#;
        let document = Document::from_str(xml).unwrap();
        assert_eq!(
            write_to_string(&document),
            format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n{}", xml)
        );
    }
}
