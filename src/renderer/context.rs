//! Per-conversion mutable state shared by all tag handlers.

use crate::model::{NoteRecord, StyleTag};
use crate::options::ConverterOptions;

use super::buffer::{HtmlBuffer, Insertion};
use super::text::{adjust_hebrew, escape_text};

// ─── Collaborators ───────────────────────────────────────────────────

/// Supplies bookmark and user-note markers for a verse.
pub trait MarkerLookup {
    fn styles_for(&self, verse_no: u32) -> Vec<StyleTag>;
}

/// Turns an extracted note body into the HTML shown to the user.
pub trait NoteFormatter {
    fn format(&self, note_ref: &str, body: &str) -> String;
}

/// Marker lookup for pages without bookmarks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMarkers;

impl MarkerLookup for NoMarkers {
    fn styles_for(&self, _verse_no: u32) -> Vec<StyleTag> {
        Vec::new()
    }
}

/// Note formatter that keeps the body as rendered.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainNotes;

impl NoteFormatter for PlainNotes {
    fn format(&self, _note_ref: &str, body: &str) -> String {
        body.trim().to_string()
    }
}

// ─── Verse context ───────────────────────────────────────────────────

#[derive(Debug, Default)]
pub(super) struct VerseContext {
    pub(super) current_verse_no: u32,
    pub(super) book: Option<String>,
    pub(super) chapter: Option<u32>,
    /// Set once non-blank text follows the current verse marker
    pub(super) text_written_since_verse: bool,
    /// Offset just before the current verse marker
    pub(super) pre_verse_offset: usize,
    pub(super) any_text_written: bool,
    /// Red-letter spans currently open
    pub(super) red_letter_depth: usize,
    /// Non-blank visible text runs written so far
    pub(super) text_runs: usize,
    /// Verse 0 marker that is dropped unless text follows it
    pub(super) pending_verse_zero: Option<VerseZero>,
}

/// Buffer span of a verse 0 marker.
#[derive(Debug, Clone, Copy)]
pub(super) struct VerseZero {
    /// Position before anything the verse wrote
    pub(super) rollback: usize,
    /// Position right after the marker
    pub(super) marker_end: usize,
}

impl VerseContext {
    /// Id of the current verse, e.g. "1.3" (chapter.verse) or "3".
    pub(super) fn verse_id(&self) -> String {
        match self.chapter {
            Some(chapter) => format!("{chapter}.{}", self.current_verse_no),
            None => self.current_verse_no.to_string(),
        }
    }
}

// ─── Milestone bookkeeping ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LineKind {
    Plain,
    Indent(usize),
}

#[derive(Debug)]
pub(super) struct LineEntry {
    pub(super) id: Option<String>,
    pub(super) kind: LineKind,
}

#[derive(Debug)]
pub(super) struct DivisionEntry {
    pub(super) id: String,
    /// Text runs counted when the division opened
    pub(super) text_mark: usize,
    pub(super) paragraph: bool,
}

#[derive(Debug)]
pub(super) struct PreverseEntry {
    pub(super) id: String,
    pub(super) insertion: Insertion,
}

#[derive(Debug)]
pub(super) struct QuoteEntry {
    pub(super) id: String,
    pub(super) red_letter: bool,
}

#[derive(Debug, Default)]
pub(super) struct NoteState {
    pub(super) count: usize,
    pub(super) counted_verse: Option<u32>,
    pub(super) current: Option<OpenNote>,
    pub(super) records: Vec<NoteRecord>,
}

#[derive(Debug, Clone)]
pub(super) struct OpenNote {
    pub(super) note_ref: String,
    pub(super) anchor_id: String,
    pub(super) position: usize,
}

// ─── Render context ──────────────────────────────────────────────────

pub(super) struct RenderContext<'a> {
    pub(super) options: &'a ConverterOptions,
    pub(super) markers: &'a dyn MarkerLookup,
    pub(super) formatter: &'a dyn NoteFormatter,
    pub(super) buffer: HtmlBuffer,
    pub(super) verse: VerseContext,
    pub(super) lines: Vec<LineEntry>,
    pub(super) divisions: Vec<DivisionEntry>,
    pub(super) preverse: Vec<PreverseEntry>,
    pub(super) quotes: Vec<QuoteEntry>,
    pub(super) notes: NoteState,
    pub(super) verse_line_open: bool,
}

impl<'a> RenderContext<'a> {
    pub(super) fn new(
        options: &'a ConverterOptions,
        markers: &'a dyn MarkerLookup,
        formatter: &'a dyn NoteFormatter,
    ) -> Self {
        Self {
            options,
            markers,
            formatter,
            buffer: HtmlBuffer::new(),
            verse: VerseContext::default(),
            lines: Vec::new(),
            divisions: Vec::new(),
            preverse: Vec::new(),
            quotes: Vec::new(),
            notes: NoteState::default(),
            verse_line_open: false,
        }
    }

    pub(super) fn write(&mut self, html: &str) {
        self.buffer.write(html);
    }

    /// Write document character content.
    pub(super) fn write_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        // Only text landing after the verse marker counts as verse content.
        if self.writes_reach_verse() && !text.trim().is_empty() {
            self.mark_text_written();
        }
        let mut html = escape_text(text);
        if self.options.is_hebrew() {
            html = adjust_hebrew(&html);
        }
        self.buffer.write(&html);
    }

    /// True while writes land in the visible text after the verse marker.
    pub(super) fn writes_reach_verse(&self) -> bool {
        !self.buffer.is_suppressed() && !self.buffer.is_inserting() && !self.buffer.is_temp_storing()
    }

    /// Count a run of visible verse text.
    pub(super) fn mark_text_written(&mut self) {
        self.verse.text_written_since_verse = true;
        self.verse.any_text_written = true;
        self.verse.text_runs += 1;
    }

    /// Drop a verse 0 marker that nothing but whitespace followed.
    pub(super) fn settle_verse_zero(&mut self) {
        let Some(zero) = self.verse.pending_verse_zero.take() else {
            return;
        };
        if self.buffer.is_inserting() {
            return;
        }
        let tail_is_blank = self
            .buffer
            .as_str()
            .get(zero.marker_end..)
            .is_some_and(|tail| tail.trim().is_empty());
        if tail_is_blank && !self.verse.text_written_since_verse {
            self.buffer.truncate(zero.rollback);
            if self.verse.pre_verse_offset > zero.rollback {
                self.verse.pre_verse_offset = zero.rollback;
            }
            for position in self.note_positions().filter(|p| **p > zero.rollback) {
                *position = zero.rollback;
            }
        }
    }

    /// Close any preverse insertion left open by a missing end milestone so
    /// the text behind it becomes visible again.
    pub(super) fn release_preverse(&mut self) {
        while let Some(entry) = self.preverse.pop() {
            tracing::debug!(id = entry.id.as_str(), verse = self.verse.current_verse_no, "unterminated preverse division");
            self.finish_preverse_insertion(entry.insertion);
        }
    }

    /// Finish a preverse insertion and keep later preverse content after it.
    pub(super) fn finish_preverse_insertion(&mut self, insertion: Insertion) {
        let inserted_start = self.buffer.insertion_start();
        let inserted_end = self.buffer.position();
        self.buffer.finish_inserting(insertion);
        if self.buffer.is_inserting() {
            return;
        }
        self.verse.pre_verse_offset = inserted_end;
        if let Some(start) = inserted_start {
            let by = inserted_end - start;
            self.shift_note_positions(start, by);
            if let Some(zero) = self.verse.pending_verse_zero.as_mut().filter(|z| z.rollback >= start) {
                zero.rollback += by;
                zero.marker_end += by;
            }
        }
    }

    /// Move note anchors that sat after `from` by `by` bytes.
    fn shift_note_positions(&mut self, from: usize, by: usize) {
        for position in self.note_positions().filter(|p| **p > from) {
            *position += by;
        }
    }

    fn note_positions(&mut self) -> impl Iterator<Item = &mut usize> + '_ {
        let open = self.notes.current.iter_mut().map(|n| &mut n.position);
        let records = self.notes.records.iter_mut().map(|r| &mut r.position);
        open.chain(records)
    }
}
