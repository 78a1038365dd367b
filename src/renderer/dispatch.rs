//! Tag dispatch: routes start/characters/end events to the handler of each
//! element and keeps the stack of open elements.
//!
//! Handlers are stateless `Sync` statics. Whatever a handler's `start` needs
//! to remember until its `end` travels in the frame as a [`FrameState`];
//! everything shared across elements lives in the [`RenderContext`].

use crate::diagnostics;
use crate::model::Attributes;

use super::buffer::{Insertion, Suppression, TempStore};
use super::context::RenderContext;
use super::element::ElementKind;
use super::{division, inline, notes, poetry, quote, strongs, title, verse};

/// What a handler's `start` hands to its `end`.
#[derive(Debug, Default)]
pub(super) enum FrameState {
    #[default]
    Empty,
    /// Markup to write when the element closes
    Close(&'static str),
    Title {
        suppression: Option<Suppression>,
        insertion: Option<Insertion>,
    },
    Line,
    LineGroup,
    Division {
        /// Text runs counted when the division opened
        text_mark: usize,
        paragraph: bool,
        insertion: Option<Insertion>,
    },
    Lexical(Vec<String>),
    Note(TempStore),
    Reference {
        store: TempStore,
        osis_ref: Option<String>,
    },
}

pub(super) trait TagHandler: Sync {
    fn tag_name(&self) -> &'static str;

    fn start(
        &self,
        cx: &mut RenderContext<'_>,
        parent: Option<&ElementKind>,
        attrs: &Attributes,
    ) -> FrameState;

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, content: &str);
}

/// Handler for elements that only render their content.
pub(super) struct PassThroughHandler;

impl TagHandler for PassThroughHandler {
    fn tag_name(&self) -> &'static str {
        "*"
    }

    fn start(&self, _cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, _attrs: &Attributes) -> FrameState {
        FrameState::Empty
    }

    fn end(&self, _cx: &mut RenderContext<'_>, _state: FrameState, _content: &str) {}
}

static PASS_THROUGH: PassThroughHandler = PassThroughHandler;

pub(super) fn handler_for(kind: &ElementKind) -> &'static dyn TagHandler {
    match kind {
        ElementKind::Verse => &verse::VERSE,
        ElementKind::Title => &title::TITLE,
        ElementKind::L => &poetry::LINE,
        ElementKind::Lg => &poetry::LINE_GROUP,
        ElementKind::Lb => &poetry::LINE_BREAK,
        ElementKind::Div => &division::DIV,
        ElementKind::P => &division::PARAGRAPH,
        ElementKind::Milestone => &division::MILESTONE,
        ElementKind::Q => &quote::QUOTE,
        ElementKind::W => &strongs::WORD,
        ElementKind::Note => &notes::NOTE,
        ElementKind::Reference => &notes::REFERENCE,
        ElementKind::Hi => &inline::HI,
        ElementKind::TransChange => &inline::TRANS_CHANGE,
        ElementKind::DivineName => &inline::DIVINE_NAME,
        ElementKind::Figure => &inline::FIGURE,
        ElementKind::PassThrough | ElementKind::Unknown(_) => &PASS_THROUGH,
    }
}

// ─── Dispatch stack ──────────────────────────────────────────────────

#[derive(Debug)]
pub(super) struct DispatchFrame {
    pub(super) kind: ElementKind,
    pub(super) name: String,
    state: FrameState,
    /// Character run not yet written
    pending: String,
    /// All character content seen directly inside this element
    content: String,
}

#[derive(Debug, Default)]
pub(super) struct Dispatcher {
    stack: Vec<DispatchFrame>,
    /// Character run outside any element
    root_pending: String,
}

impl Dispatcher {
    pub(super) fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(super) fn start_element(&mut self, cx: &mut RenderContext<'_>, name: &str, attrs: &Attributes) {
        self.flush(cx);
        let kind = ElementKind::resolve(name);
        if let ElementKind::Unknown(ref unknown) = kind {
            diagnostics::unknown_element(unknown, cx.verse.current_verse_no);
        }
        let handler = handler_for(&kind);
        tracing::trace!(element = name, handler = handler.tag_name(), depth = self.stack.len(), "start element");
        let parent = self.stack.last().map(|f| &f.kind);
        let state = handler.start(cx, parent, attrs);
        self.stack.push(DispatchFrame {
            kind,
            name: name.to_string(),
            state,
            pending: String::new(),
            content: String::new(),
        });
    }

    /// Adjacent character events are merged into one run; a parser may split
    /// a single token across several callbacks.
    pub(super) fn characters(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(frame) => {
                frame.pending.push_str(text);
                frame.content.push_str(text);
            }
            None => self.root_pending.push_str(text),
        }
    }

    pub(super) fn end_element(&mut self, cx: &mut RenderContext<'_>, name: &str) {
        self.flush(cx);
        while let Some(frame) = self.stack.pop() {
            let matched = frame.name == name || frame.name.eq_ignore_ascii_case(name);
            if !matched {
                tracing::warn!(
                    expected = frame.name.as_str(),
                    found = name,
                    verse = cx.verse.current_verse_no,
                    "mismatched OSIS end element"
                );
            }
            Self::close(cx, frame);
            if matched {
                return;
            }
        }
        tracing::warn!(element = name, "end element without open element");
    }

    /// Close every open element, innermost first.
    pub(super) fn finish(&mut self, cx: &mut RenderContext<'_>) {
        self.flush(cx);
        while let Some(frame) = self.stack.pop() {
            tracing::debug!(element = frame.name.as_str(), "element left open at end of stream");
            Self::close(cx, frame);
        }
    }

    fn close(cx: &mut RenderContext<'_>, frame: DispatchFrame) {
        let DispatchFrame { kind, state, content, .. } = frame;
        handler_for(&kind).end(cx, state, &content);
    }

    /// Write the pending character run of the innermost element.
    fn flush(&mut self, cx: &mut RenderContext<'_>) {
        let pending = match self.stack.last_mut() {
            Some(frame) => std::mem::take(&mut frame.pending),
            None => std::mem::take(&mut self.root_pending),
        };
        cx.write_text(&pending);
    }
}
