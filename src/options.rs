//! Conversion options, fixed for the lifetime of one converter.

use serde::{Deserialize, Serialize};

/// Display settings that shape the produced HTML.
///
/// Hosts usually pass these as JSON (camelCase keys); any key left out
/// keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConverterOptions {
    pub show_verse_numbers: bool,
    pub show_titles: bool,
    pub show_strongs: bool,
    pub show_morphology: bool,
    /// Render the words of Jesus in red
    pub red_letter: bool,
    pub left_to_right: bool,
    /// ISO language code of the module, e.g. "en" or "he"
    pub language_code: String,
    /// Base location of module resources such as figures
    pub module_base_path: String,
    /// Write note anchors into the text
    pub show_notes: bool,
    /// Put every verse on its own line
    pub verse_per_line: bool,
    /// HTML appended after the converted text
    pub extra_footer: Option<String>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            show_verse_numbers: true,
            show_titles: true,
            show_strongs: false,
            show_morphology: false,
            red_letter: false,
            left_to_right: true,
            language_code: "en".to_string(),
            module_base_path: String::new(),
            show_notes: true,
            verse_per_line: false,
            extra_footer: None,
        }
    }
}

impl ConverterOptions {
    /// Parse options from a JSON object, e.g. `{"showStrongs": true}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }

    pub(crate) fn is_hebrew(&self) -> bool {
        self.language_code == "he"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let opts = ConverterOptions::from_json(r#"{"showStrongs": true, "languageCode": "he"}"#).unwrap();
        assert!(opts.show_strongs);
        assert!(opts.show_verse_numbers);
        assert!(opts.is_hebrew());
        assert_eq!(opts.extra_footer, None);
    }

    #[test]
    fn blank_json_is_default() {
        assert_eq!(ConverterOptions::from_json("  ").unwrap(), ConverterOptions::default());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(ConverterOptions::from_json("{showStrongs: yes}").is_err());
    }
}
