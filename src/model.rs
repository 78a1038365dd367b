//! Data model shared by the event source, the converter and its hosts.
//!
//! These structures describe what flows into a conversion (parse events)
//! and what comes out of it (HTML plus extracted note records).

use serde::{Deserialize, Serialize};

/// One event of an OSIS parse stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseEvent {
    StartElement { name: String, attributes: Attributes },
    Characters { text: String },
    EndElement { name: String },
}

impl ParseEvent {
    pub fn start(name: &str, attributes: &[(&str, &str)]) -> Self {
        ParseEvent::StartElement {
            name: name.to_string(),
            attributes: Attributes::from_pairs(attributes),
        }
    }

    pub fn text(text: &str) -> Self {
        ParseEvent::Characters { text: text.to_string() }
    }

    pub fn end(name: &str) -> Self {
        ParseEvent::EndElement { name: name.to_string() }
    }
}

/// Element attributes in document order.
///
/// OSIS elements rarely carry more than five attributes, so lookups are a
/// linear scan over a small vector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut attrs = Self::new();
        for (k, v) in pairs {
            attrs.insert(k, v);
        }
        attrs
    }

    /// Insert or replace an attribute, keeping the original position on replace.
    pub fn insert(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The attribute value, if present and not empty.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Whether the attribute is present and equals `value`.
    pub fn is(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Kind of an extracted note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteType {
    /// Study or translation note text
    General,
    /// A cross-reference to another passage
    CrossReference,
}

/// A footnote or cross-reference pulled out of the running text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    /// Verse the note belongs to
    pub verse_no: u32,
    /// Offset in the produced HTML where the note anchor was written
    pub position: usize,
    /// Id of the anchor element in the HTML (`"{chapter}.{verse}.{ref}"` style)
    pub anchor_id: String,
    /// Visible note marker, e.g. "a" or "3b"
    pub note_ref: String,
    /// Note body after formatting
    pub body: String,
    pub note_type: NoteType,
    /// Target passage of a cross-reference
    pub osis_ref: Option<String>,
}

/// A bookmark or user-note marker attached to a verse by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleTag {
    /// CSS class added to the verse marker span
    pub class: String,
    /// Optional HTML written inline right after the verse marker
    pub fragment: Option<String>,
}

impl StyleTag {
    pub fn class(class: &str) -> Self {
        Self { class: class.to_string(), fragment: None }
    }
}

/// Everything one conversion produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub html: String,
    pub notes: Vec<NoteRecord>,
}
