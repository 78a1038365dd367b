//! osishtml: streaming OSIS to HTML converter for scripture display.
//!
//! A page of OSIS markup is converted in one pass over its parse events,
//! without building a document tree. Malformed or unusual input never
//! aborts a conversion; the worst case is a best-effort render plus log
//! entries.
//!
//! # Example
//! ```
//! use osishtml::{convert_osis, ConverterOptions};
//!
//! let options = ConverterOptions { show_strongs: true, ..Default::default() };
//! let result = convert_osis(
//!     r#"<verse osisID="Gen.1.1"/>In the beginning <w lemma="strong:H0430">God</w>"#,
//!     &options,
//! );
//! assert!(result.html.contains("hdef:00430"));
//! ```

pub mod diagnostics;
pub mod error;
pub mod events;
pub mod model;
pub mod options;
pub mod renderer;

#[cfg(target_os = "android")]
pub mod android;

pub use error::OsisHtmlError;
pub use events::OsisEventReader;
pub use model::*;
pub use options::ConverterOptions;
pub use renderer::{convert_events, MarkerLookup, NoMarkers, NoteFormatter, OsisToHtml, PlainNotes};

/// Convert an OSIS document fragment to HTML.
pub fn convert_osis(xml: &str, options: &ConverterOptions) -> ConversionResult {
    convert_events(OsisEventReader::new(xml), options)
}

/// Convert raw OSIS bytes, which must be UTF-8.
pub fn convert_bytes(data: &[u8], options: &ConverterOptions) -> Result<ConversionResult, OsisHtmlError> {
    let xml = std::str::from_utf8(data)?;
    Ok(convert_osis(xml, options))
}

/// Convert a result to a JSON string.
/// Useful for passing data across FFI boundaries.
pub fn result_to_json(result: &ConversionResult) -> Result<String, OsisHtmlError> {
    serde_json::to_string(result).map_err(OsisHtmlError::Json)
}

/// Parse JSON options, convert, and serialize the result.
pub fn convert_to_json(xml: &str, options_json: &str) -> Result<String, OsisHtmlError> {
    let options = ConverterOptions::from_json(options_json).map_err(OsisHtmlError::Options)?;
    result_to_json(&convert_osis(xml, &options))
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI: for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Convert OSIS markup and return the result as a JSON C string
/// (`{"html": ..., "notes": [...]}`).
/// The caller must free the returned string with `osishtml_free_string`.
///
/// `options_json` may be null for default options.
///
/// # Safety
/// `xml` must be a valid null-terminated UTF-8 C string; `options_json`
/// must be null or one as well.
#[no_mangle]
pub unsafe extern "C" fn osishtml_convert(xml: *const c_char, options_json: *const c_char) -> *mut c_char {
    if xml.is_null() {
        return std::ptr::null_mut();
    }
    let xml = match unsafe { CStr::from_ptr(xml) }.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };
    let options_json = if options_json.is_null() {
        ""
    } else {
        match unsafe { CStr::from_ptr(options_json) }.to_str() {
            Ok(s) => s,
            Err(_) => return std::ptr::null_mut(),
        }
    };

    match convert_to_json(xml, options_json) {
        Ok(json) => CString::new(json).unwrap_or_default().into_raw(),
        Err(err) => {
            tracing::warn!(error = %err, "OSIS conversion failed");
            std::ptr::null_mut()
        }
    }
}

/// Free a string previously returned by osishtml functions.
///
/// # Safety
/// `ptr` must be a string previously returned by an osishtml function, or null.
#[no_mangle]
pub unsafe extern "C" fn osishtml_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_is_reported() {
        let err = convert_bytes(&[b'<', b'p', b'>', 0xff], &ConverterOptions::default()).unwrap_err();
        assert!(matches!(err, OsisHtmlError::InvalidUtf8(_)));
    }

    #[test]
    fn bad_options_are_reported() {
        let err = convert_to_json("<p/>", "{not json").unwrap_err();
        assert!(matches!(err, OsisHtmlError::Options(_)));
    }

    #[test]
    fn ffi_round_trip() {
        let xml = CString::new(r#"<verse osisID="Gen.1.1"/>In"#).unwrap();
        let opts = CString::new(r#"{"showVerseNumbers": false}"#).unwrap();
        unsafe {
            let out = osishtml_convert(xml.as_ptr(), opts.as_ptr());
            assert!(!out.is_null());
            let json = CStr::from_ptr(out).to_str().unwrap().to_string();
            osishtml_free_string(out);
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["html"], "<span class='verse' id='1.1'>&#x200b;</span>In");
            assert!(value["notes"].as_array().unwrap().is_empty());
        }
    }

    #[test]
    fn null_input_gives_null() {
        unsafe {
            assert!(osishtml_convert(std::ptr::null(), std::ptr::null()).is_null());
        }
    }
}
