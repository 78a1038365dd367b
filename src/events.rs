//! Streaming OSIS event source built on quick-xml.
//!
//! Turns an OSIS document into the flat [`ParseEvent`] sequence the
//! converter consumes, without building a tree. Self-closing elements become
//! a start event immediately followed by an end event. A well-formedness
//! error ends the stream early; whatever was read so far still converts.

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::model::{Attributes, ParseEvent};

pub struct OsisEventReader<'a> {
    reader: Reader<&'a [u8]>,
    /// End event owed for a self-closing element
    pending_end: Option<String>,
    done: bool,
}

impl<'a> OsisEventReader<'a> {
    pub fn new(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        // the converter resynchronizes mismatched end tags itself
        reader.config_mut().check_end_names = false;
        Self { reader, pending_end: None, done: false }
    }
}

impl Iterator for OsisEventReader<'_> {
    type Item = ParseEvent;

    fn next(&mut self) -> Option<ParseEvent> {
        if let Some(name) = self.pending_end.take() {
            return Some(ParseEvent::EndElement { name });
        }
        if self.done {
            return None;
        }
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => return Some(start_event(&e)),
                Ok(Event::Empty(e)) => {
                    let event = start_event(&e);
                    self.pending_end = Some(element_name(e.name().as_ref()));
                    return Some(event);
                }
                Ok(Event::End(e)) => {
                    return Some(ParseEvent::EndElement { name: element_name(e.name().as_ref()) });
                }
                Ok(Event::Text(e)) => {
                    let text = unescape_text(&e);
                    if !text.is_empty() {
                        return Some(ParseEvent::Characters { text });
                    }
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    if !text.is_empty() {
                        return Some(ParseEvent::Characters { text });
                    }
                }
                Ok(Event::Eof) => {
                    self.done = true;
                    return None;
                }
                // declarations, comments, processing instructions, doctype
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(
                        position = self.reader.buffer_position(),
                        error = %err,
                        "OSIS document is not well-formed, stopping early"
                    );
                    self.done = true;
                    return None;
                }
            }
        }
    }
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn start_event(e: &BytesStart<'_>) -> ParseEvent {
    let name = element_name(e.name().as_ref());
    let mut attributes = Attributes::new();
    for attr in e.attributes() {
        match attr {
            Ok(attr) => {
                let key = String::from_utf8_lossy(attr.key.as_ref());
                let value = attr
                    .unescape_value()
                    .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned().into());
                attributes.insert(&key, &value);
            }
            Err(err) => tracing::debug!(element = name.as_str(), error = %err, "skipping malformed attribute"),
        }
    }
    ParseEvent::StartElement { name, attributes }
}

/// Unescape character content; text with an unknown entity is kept raw.
fn unescape_text(e: &BytesText<'_>) -> String {
    match e.unescape() {
        Ok(text) => text.into_owned(),
        Err(err) => {
            tracing::debug!(error = %err, "keeping text with unresolved entity as is");
            String::from_utf8_lossy(e.as_ref()).into_owned()
        }
    }
}
