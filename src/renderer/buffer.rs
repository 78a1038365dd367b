//! HTML buffer: accumulates output text and supports the three write modes
//! the tag handlers need: suppressed writes, side-buffer (temp store) writes,
//! and backdated insertion at an earlier offset.
//!
//! Every `begin`/`suppress` call hands back a token that the matching end
//! call consumes, so modes are released exactly once.

/// Proof that writes are suppressed; release with [`HtmlBuffer::unsuppress`].
#[must_use = "suppression must be released with HtmlBuffer::unsuppress"]
#[derive(Debug)]
pub struct Suppression(());

/// Proof that writes go to the temp store; release with [`HtmlBuffer::end_temp_store`].
#[must_use = "temp store must be released with HtmlBuffer::end_temp_store"]
#[derive(Debug)]
pub struct TempStore(());

/// Proof that writes land at an insertion point; release with [`HtmlBuffer::finish_inserting`].
#[must_use = "insertion must be released with HtmlBuffer::finish_inserting"]
#[derive(Debug)]
pub struct Insertion(());

#[derive(Debug, Default)]
pub struct HtmlBuffer {
    html: String,
    temp_store: String,
    saved_tail: String,
    insertion_offset: usize,
    suppress_count: usize,
    temp_store_depth: usize,
    insertion_depth: usize,
}

impl HtmlBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` to whichever destination the current mode selects.
    pub fn write(&mut self, text: &str) {
        if self.suppress_count > 0 {
            return;
        }
        if self.temp_store_depth > 0 {
            self.temp_store.push_str(text);
        } else {
            self.html.push_str(text);
        }
    }

    // ─── Suppression ─────────────────────────────────────────────────

    pub fn suppress(&mut self) -> Suppression {
        self.suppress_count += 1;
        Suppression(())
    }

    pub fn unsuppress(&mut self, _token: Suppression) {
        release(&mut self.suppress_count, "unsuppress");
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppress_count > 0
    }

    // ─── Temp store ──────────────────────────────────────────────────

    pub fn begin_temp_store(&mut self) -> TempStore {
        self.temp_store_depth += 1;
        TempStore(())
    }

    pub fn end_temp_store(&mut self, _token: TempStore) {
        release(&mut self.temp_store_depth, "end_temp_store");
    }

    pub fn temp_store_contents(&self) -> &str {
        &self.temp_store
    }

    /// Take the temp store contents, leaving it empty.
    pub fn take_temp_store(&mut self) -> String {
        std::mem::take(&mut self.temp_store)
    }

    pub fn clear_temp_store(&mut self) {
        self.temp_store.clear();
    }

    pub fn is_temp_storing(&self) -> bool {
        self.temp_store_depth > 0
    }

    // ─── Positions ───────────────────────────────────────────────────

    /// Current length of the main buffer.
    pub fn position(&self) -> usize {
        self.html.len()
    }

    /// Discard main-buffer content after `pos`.
    pub fn truncate(&mut self, pos: usize) {
        if pos < self.html.len() {
            let pos = floor_char_boundary(&self.html, pos);
            self.html.truncate(pos);
        }
    }

    // ─── Backdated insertion ─────────────────────────────────────────

    /// Make subsequent writes land at `offset`. Only the outermost call
    /// moves text; nested calls just count.
    pub fn begin_insert_at(&mut self, offset: usize) -> Insertion {
        if self.insertion_depth == 0 {
            let offset = floor_char_boundary(&self.html, offset.min(self.html.len()));
            self.saved_tail = self.html.split_off(offset);
            self.insertion_offset = offset;
        }
        self.insertion_depth += 1;
        Insertion(())
    }

    /// Close an insertion; the outermost close replays the preserved tail.
    pub fn finish_inserting(&mut self, _token: Insertion) {
        if release(&mut self.insertion_depth, "finish_inserting") && self.insertion_depth == 0 {
            let tail = std::mem::take(&mut self.saved_tail);
            self.html.push_str(&tail);
        }
    }

    pub fn is_inserting(&self) -> bool {
        self.insertion_depth > 0
    }

    /// Offset the open insertion started at.
    pub fn insertion_start(&self) -> Option<usize> {
        self.is_inserting().then_some(self.insertion_offset)
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_html(mut self) -> String {
        if self.insertion_depth > 0 {
            tracing::error!(depth = self.insertion_depth, "buffer finished with an open insertion");
            let tail = std::mem::take(&mut self.saved_tail);
            self.html.push_str(&tail);
        }
        self.html
    }
}

/// Decrement a mode counter. An end call with the counter at zero is a
/// handler bug: it asserts in debug builds and is a logged no-op otherwise.
fn release(counter: &mut usize, call: &str) -> bool {
    debug_assert!(*counter > 0, "{call} without matching begin");
    if *counter == 0 {
        tracing::error!(call, "unbalanced buffer mode call ignored");
        return false;
    }
    *counter -= 1;
    true
}

fn floor_char_boundary(s: &str, mut pos: usize) -> usize {
    while pos > 0 && !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_go_to_main_buffer() {
        let mut buf = HtmlBuffer::new();
        buf.write("In the ");
        buf.write("beginning");
        assert_eq!(buf.as_str(), "In the beginning");
        assert_eq!(buf.position(), 16);
    }

    #[test]
    fn suppressed_writes_are_discarded() {
        let mut buf = HtmlBuffer::new();
        buf.write("a");
        let outer = buf.suppress();
        let inner = buf.suppress();
        buf.write("hidden");
        buf.unsuppress(inner);
        buf.write("still hidden");
        buf.unsuppress(outer);
        buf.write("b");
        assert_eq!(buf.as_str(), "ab");
    }

    #[test]
    fn temp_store_collects_side_text() {
        let mut buf = HtmlBuffer::new();
        buf.write("text");
        let token = buf.begin_temp_store();
        buf.write("note body");
        assert_eq!(buf.temp_store_contents(), "note body");
        buf.end_temp_store(token);
        assert_eq!(buf.as_str(), "text");
        assert_eq!(buf.take_temp_store(), "note body");
        assert_eq!(buf.temp_store_contents(), "");
    }

    #[test]
    fn suppression_wins_over_temp_store() {
        let mut buf = HtmlBuffer::new();
        let store = buf.begin_temp_store();
        let hide = buf.suppress();
        buf.write("x");
        buf.unsuppress(hide);
        buf.end_temp_store(store);
        assert_eq!(buf.temp_store_contents(), "");
    }

    #[test]
    fn truncate_discards_tail() {
        let mut buf = HtmlBuffer::new();
        buf.write("keep|drop");
        buf.truncate(4);
        assert_eq!(buf.as_str(), "keep");
        buf.truncate(100);
        assert_eq!(buf.as_str(), "keep");
    }

    #[test]
    fn insertion_law() {
        let w1 = "<span class='verse'>1</span>";
        for p in 0..=w1.len() {
            let mut buf = HtmlBuffer::new();
            buf.write(w1);
            let token = buf.begin_insert_at(p);
            buf.write("<h1>Title</h1>");
            buf.finish_inserting(token);
            assert_eq!(buf.as_str(), format!("{}<h1>Title</h1>{}", &w1[..p], &w1[p..]));
        }
    }

    #[test]
    fn nested_insertion_only_moves_text_once() {
        let mut buf = HtmlBuffer::new();
        buf.write("AB");
        let outer = buf.begin_insert_at(1);
        buf.write("x");
        let inner = buf.begin_insert_at(0);
        buf.write("y");
        buf.finish_inserting(inner);
        assert!(buf.is_inserting());
        buf.write("z");
        buf.finish_inserting(outer);
        assert_eq!(buf.as_str(), "AxyzB");
        assert!(!buf.is_inserting());
    }

    #[test]
    fn balanced_modes_restore_state() {
        let mut buf = HtmlBuffer::new();
        buf.write("base");
        let ins = buf.begin_insert_at(2);
        let store = buf.begin_temp_store();
        let hide = buf.suppress();
        buf.unsuppress(hide);
        buf.end_temp_store(store);
        buf.finish_inserting(ins);
        assert_eq!(buf.as_str(), "base");
        assert!(!buf.is_suppressed());
        assert!(!buf.is_temp_storing());
        assert!(!buf.is_inserting());
    }

    #[test]
    fn insertion_offset_snaps_to_char_boundary() {
        let mut buf = HtmlBuffer::new();
        buf.write("é");
        let token = buf.begin_insert_at(1);
        buf.write("x");
        buf.finish_inserting(token);
        assert_eq!(buf.as_str(), "xé");
    }

    #[test]
    fn open_insertion_is_replayed_on_finish() {
        let mut buf = HtmlBuffer::new();
        buf.write("verse");
        let token = buf.begin_insert_at(0);
        buf.write("title");
        std::mem::forget(token);
        assert_eq!(buf.into_html(), "titleverse");
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "unsuppress without matching begin")]
    fn unmatched_end_asserts_in_debug() {
        let mut other = HtmlBuffer::new();
        let token = other.suppress();
        let mut buf = HtmlBuffer::new();
        buf.unsuppress(token);
    }
}
