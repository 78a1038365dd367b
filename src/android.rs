//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;

use crate::convert_to_json;

/// Convert OSIS markup to HTML, returning the result as JSON
/// (`{"html": ..., "notes": [...]}`).
///
/// Called from Kotlin as:
///   external fun convert(osis: String, optionsJson: String?): String?
#[no_mangle]
pub extern "system" fn Java_net_bible_service_format_OsisHtml_convert(
    mut env: JNIEnv,
    _class: JClass,
    osis: JString,
    options_json: JString,
) -> jstring {
    let osis: String = match env.get_string(&osis) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let options_json: String = if options_json.is_null() {
        String::new()
    } else {
        env.get_string(&options_json).map(|s| s.into()).unwrap_or_default()
    };

    match convert_to_json(&osis, &options_json) {
        Ok(json) => match env.new_string(&json) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(err) => {
            tracing::warn!(error = %err, "OSIS conversion failed");
            std::ptr::null_mut()
        }
    }
}
