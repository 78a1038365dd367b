//! OSIS to HTML converter.
//!
//! The converter is fed one parse event at a time and never builds a
//! document tree. Element handlers are stateless statics; everything a
//! single conversion needs lives in its [`RenderContext`](context::RenderContext),
//! so converters on different threads share nothing but the log dedup set.

pub mod buffer;
mod constants;
mod context;
mod dispatch;
mod division;
mod element;
mod inline;
mod notes;
mod poetry;
mod quote;
mod strongs;
mod text;
mod title;
mod verse;

use crate::model::{Attributes, ConversionResult, ParseEvent};
use crate::options::ConverterOptions;

use context::RenderContext;
use dispatch::Dispatcher;

pub use buffer::HtmlBuffer;
pub use context::{MarkerLookup, NoMarkers, NoteFormatter, PlainNotes};
pub use element::ElementKind;

static NO_MARKERS: NoMarkers = NoMarkers;
static PLAIN_NOTES: PlainNotes = PlainNotes;

// ═══════════════════════════════════════════════════════════════════════
// Converter driver
// ═══════════════════════════════════════════════════════════════════════

/// One conversion of one OSIS event stream.
///
/// ```
/// use osishtml::{ConverterOptions, OsisToHtml, ParseEvent};
///
/// let options = ConverterOptions::default();
/// let mut converter = OsisToHtml::new(&options);
/// converter.handle(ParseEvent::start("verse", &[("osisID", "Gen.1.1")]));
/// converter.handle(ParseEvent::end("verse"));
/// converter.handle(ParseEvent::text("In the beginning"));
/// let result = converter.finish();
/// assert!(result.html.ends_with("</span>In the beginning"));
/// ```
pub struct OsisToHtml<'a> {
    cx: RenderContext<'a>,
    dispatcher: Dispatcher,
}

impl<'a> OsisToHtml<'a> {
    pub fn new(options: &'a ConverterOptions) -> Self {
        let mut cx = RenderContext::new(options, &NO_MARKERS, &PLAIN_NOTES);
        if !options.left_to_right {
            cx.write("<span dir='rtl'>");
        }
        Self { cx, dispatcher: Dispatcher::default() }
    }

    /// Use `markers` for bookmark and user-note styling of verse markers.
    pub fn with_markers(mut self, markers: &'a dyn MarkerLookup) -> Self {
        self.cx.markers = markers;
        self
    }

    /// Use `formatter` to turn extracted note bodies into display HTML.
    pub fn with_note_formatter(mut self, formatter: &'a dyn NoteFormatter) -> Self {
        self.cx.formatter = formatter;
        self
    }

    pub fn handle(&mut self, event: ParseEvent) {
        match event {
            ParseEvent::StartElement { name, attributes } => self.start_element(&name, &attributes),
            ParseEvent::Characters { text } => self.characters(&text),
            ParseEvent::EndElement { name } => self.end_element(&name),
        }
    }

    pub fn start_element(&mut self, name: &str, attributes: &Attributes) {
        self.dispatcher.start_element(&mut self.cx, name, attributes);
    }

    pub fn characters(&mut self, text: &str) {
        self.dispatcher.characters(text);
    }

    pub fn end_element(&mut self, name: &str) {
        self.dispatcher.end_element(&mut self.cx, name);
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.dispatcher.depth()
    }

    /// End of stream: close whatever is still open and hand back the page.
    pub fn finish(self) -> ConversionResult {
        let Self { mut cx, mut dispatcher } = self;
        dispatcher.finish(&mut cx);
        cx.release_preverse();
        cx.settle_verse_zero();

        // quotation milestones without an end marker
        if cx.verse.red_letter_depth > 0 {
            tracing::debug!(open = cx.verse.red_letter_depth, "closing unterminated red-letter quotations");
            for _ in 0..cx.verse.red_letter_depth {
                cx.write("</span>");
            }
        }

        if cx.verse_line_open {
            cx.write("</div>");
        }
        if let Some(footer) = cx.options.extra_footer.as_deref() {
            cx.write(footer);
        }
        if !cx.options.left_to_right {
            cx.write("</span>");
        }

        tracing::debug!(
            bytes = cx.buffer.position(),
            notes = cx.notes.records.len(),
            last_verse = cx.verse.current_verse_no,
            "conversion finished"
        );
        ConversionResult {
            html: cx.buffer.into_html(),
            notes: cx.notes.records,
        }
    }
}

/// Convert a complete event sequence with the default collaborators.
pub fn convert_events<I>(events: I, options: &ConverterOptions) -> ConversionResult
where
    I: IntoIterator<Item = ParseEvent>,
{
    let mut converter = OsisToHtml::new(options);
    for event in events {
        converter.handle(event);
    }
    converter.finish()
}

// ═══════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════
