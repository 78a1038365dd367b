//! Shared constants for the HTML renderer: CSS classes, link protocols and
//! OSIS vocabulary.

// ── HTML snippets ───────────────────────────────────────────────────
pub(super) const BR: &str = "<br />";
pub(super) const NBSP: &str = "&#160;";
pub(super) const SPACE: &str = " ";
pub(super) const ZERO_WIDTH_SPACE: &str = "&#x200b;";
pub(super) const BREAKLINE: &str = "<div class='breakline'></div>";

// ── Link protocols ──────────────────────────────────────────────────
pub(super) const HEBREW_DEF_PROTOCOL: &str = "hdef";
pub(super) const GREEK_DEF_PROTOCOL: &str = "gdef";
pub(super) const BIBLE_PROTOCOL: &str = "bible";
pub(super) const NOTE_PROTOCOL: &str = "note";
pub(super) const SWORD_URN_PREFIX: &str = "sword://";

// ── Lexical attribute prefixes ──────────────────────────────────────
pub(super) const LEMMA_STRONGS: &str = "strong:";
pub(super) const MORPH_PREFIXES: &[&str] = &["robinson:", "strongMorph:"];
pub(super) const STRONGS_PAD_WIDTH: usize = 5;

// ── CSS classes ─────────────────────────────────────────────────────
pub(super) const CLASS_VERSE: &str = "verse";
pub(super) const CLASS_STRONGS: &str = "strongs";
pub(super) const CLASS_MORPHOLOGY: &str = "morphology";
pub(super) const CLASS_NOTE_REF: &str = "noteRef";
pub(super) const CLASS_RED_LETTER: &str = "redLetter";
pub(super) const CLASS_TRANS_CHANGE: &str = "transChange";
pub(super) const CLASS_DIVINE_NAME: &str = "divineName";

// ── OSIS attribute values ───────────────────────────────────────────
pub(super) const GENERATED_TITLE_TYPE: &str = "x-gen";
pub(super) const PREVERSE: &str = "x-preverse";
pub(super) const PARAGRAPH_TYPES: &[&str] = &["paragraph", "x-p"];
pub(super) const JESUS: &str = "Jesus";

/// Verse number above which an osisID is treated as garbage.
pub(super) const MAX_VERSE_NO: u32 = 999;
