//! Note and reference handlers.
//!
//! A note leaves only an anchor in the text; its body is collected in the
//! temp store and returned to the caller as a [`NoteRecord`]:
//!
//! ```xml
//! In the <note n="a" osisRef="Gen.1.1" type="crossReference"><reference osisRef="Job.38.4-Job.38.7">Job 38:4-7</reference>; <reference osisRef="Ps.33.6">Ps. 33:6</reference></note>beginning
//! ```
//!
//! References inside a note become cross-reference records; anywhere else
//! they are rendered as links. A reference without `osisRef` links to the
//! passage its text names, and a `Module:key` target becomes a
//! `sword://Module/key` link.

use crate::model::{Attributes, NoteRecord, NoteType};

use super::constants::*;
use super::context::{OpenNote, RenderContext};
use super::dispatch::{FrameState, TagHandler};
use super::element::ElementKind;
use super::text::{escape_attr, escape_text};

/// Characters left between the references of a cross-reference note.
const SEPARATOR_CHARS: &[char] = &['[', ']', ';', '(', ')', '.', ','];

pub(super) struct NoteHandler;
pub(super) struct ReferenceHandler;

pub(super) static NOTE: NoteHandler = NoteHandler;
pub(super) static REFERENCE: ReferenceHandler = ReferenceHandler;

impl TagHandler for NoteHandler {
    fn tag_name(&self) -> &'static str {
        "note"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        let note_ref = match attrs.non_empty("n") {
            Some(n) => n.to_string(),
            None => next_note_ref(cx),
        };
        let anchor_id = format!("{}.{}", cx.verse.verse_id(), note_ref);
        let position = cx.buffer.position();

        if cx.options.show_notes {
            cx.write(&format!(
                "<a href='{NOTE_PROTOCOL}:{}' class='{CLASS_NOTE_REF}'>{}</a>{SPACE}",
                escape_attr(&anchor_id),
                escape_text(&note_ref),
            ));
        }

        if let Some(open) = cx.notes.current.take() {
            tracing::debug!(note = open.note_ref.as_str(), "note nested inside another note");
        }
        cx.notes.current = Some(OpenNote { note_ref, anchor_id, position });
        FrameState::Note(cx.buffer.begin_temp_store())
    }

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, _content: &str) {
        let FrameState::Note(store) = state else {
            return;
        };
        let body = cx.buffer.take_temp_store();
        cx.buffer.end_temp_store(store);

        let Some(open) = cx.notes.current.take() else {
            return;
        };
        if is_only_separators(&body) {
            return;
        }
        let body = cx.formatter.format(&open.note_ref, &body);
        cx.notes.records.push(NoteRecord {
            verse_no: cx.verse.current_verse_no,
            position: open.position,
            anchor_id: open.anchor_id,
            note_ref: open.note_ref,
            body,
            note_type: NoteType::General,
            osis_ref: None,
        });
    }
}

impl TagHandler for ReferenceHandler {
    fn tag_name(&self) -> &'static str {
        "reference"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        // drop separators like ';' collected between references
        if cx.notes.current.is_some() {
            cx.buffer.clear_temp_store();
        }
        FrameState::Reference {
            store: cx.buffer.begin_temp_store(),
            osis_ref: attrs.non_empty("osisRef").map(String::from),
        }
    }

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, text: &str) {
        let FrameState::Reference { store, osis_ref } = state else {
            return;
        };
        let content = cx.buffer.take_temp_store();
        cx.buffer.end_temp_store(store);

        if let Some(open) = cx.notes.current.as_ref() {
            let body = cx.formatter.format(&open.note_ref, &content);
            let record = NoteRecord {
                verse_no: cx.verse.current_verse_no,
                position: open.position,
                anchor_id: open.anchor_id.clone(),
                note_ref: open.note_ref.clone(),
                body,
                note_type: NoteType::CrossReference,
                osis_ref,
            };
            cx.notes.records.push(record);
            return;
        }

        let target = match osis_ref {
            Some(osis_ref) => Some(osis_ref),
            None => {
                tracing::debug!(text, verse = cx.verse.current_verse_no, "reference without osisRef");
                target_from_text(text, cx.verse.book.as_deref(), cx.verse.chapter)
            }
        };
        if cx.writes_reach_verse() && !content.trim().is_empty() {
            cx.mark_text_written();
        }
        match target {
            Some(target) => {
                let href = link_href(&target);
                cx.write(&format!("<a href='{}'>{content}</a>", escape_attr(&href)));
            }
            None => cx.write(&content),
        }
    }
}

/// Passage named by the text of a reference, e.g. "Gen 1:1". A bare
/// "3:16" or "16" is completed from the current book and chapter.
fn target_from_text(text: &str, book: Option<&str>, chapter: Option<u32>) -> Option<String> {
    let text = text.trim();
    let mut chars = text.chars();
    let first = chars.next()?;
    let second = chars.next();
    let is_local = first.is_ascii_digit() && !second.is_some_and(|c| c.is_alphabetic() || c.is_whitespace());
    match (is_local, book) {
        (true, Some(book)) if text.contains(':') => Some(format!("{book} {text}")),
        (true, Some(book)) => match chapter {
            Some(chapter) => Some(format!("{book} {chapter}:{text}")),
            None => Some(format!("{book} {text}")),
        },
        (true, None) => None,
        (false, _) => Some(text.to_string()),
    }
}

/// `href` of a reference link: `Module:key` becomes a sword URN, anything
/// else a bible link to the passage.
fn link_href(target: &str) -> String {
    let target = target.trim();
    if target.contains(':') && !target.contains(char::is_whitespace) && !target.starts_with(SWORD_URN_PREFIX) {
        return format!("{SWORD_URN_PREFIX}{}", target.replace(':', "/"));
    }
    if target.starts_with(SWORD_URN_PREFIX) {
        return target.to_string();
    }
    format!("{BIBLE_PROTOCOL}:{}", passage_to_osis(target))
}

/// "Gen 1:1" becomes "Gen.1.1", "1 John 3:16-18" becomes "1John.3.16-18";
/// an osisRef is left as it is.
fn passage_to_osis(passage: &str) -> String {
    match passage.rsplit_once(char::is_whitespace) {
        Some((book, place)) if place.starts_with(|c: char| c.is_ascii_digit()) => {
            let book: String = book.split_whitespace().collect();
            format!("{}.{}", book.trim_end_matches('.'), place.replace(':', "."))
        }
        _ => passage.to_string(),
    }
}

/// Next generated note ref for the current verse: "1a", "1b", ... The
/// letter sequence restarts with every verse.
fn next_note_ref(cx: &mut RenderContext<'_>) -> String {
    let verse_no = cx.verse.current_verse_no;
    if cx.notes.counted_verse != Some(verse_no) {
        cx.notes.counted_verse = Some(verse_no);
        cx.notes.count = 0;
    }
    let letter = char::from(b'a' + (cx.notes.count % 26) as u8);
    cx.notes.count += 1;
    format!("{verse_no}{letter}")
}

fn is_only_separators(body: &str) -> bool {
    body.chars().all(|c| c.is_whitespace() || SEPARATOR_CHARS.contains(&c))
}
