//! WASM bindings for browser-based conversion.
//!
//! Exposes Markdown to mrkdwn conversion to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::{Options, convert_with};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Convert Markdown to Slack mrkdwn.
///
/// With `mentions` set, `@here`, `@channel` and `@everyone` become Slack's
/// `<!here>` form.
#[wasm_bindgen]
pub fn markdown_to_mrkdwn(input: &str, mentions: bool) -> Result<String, JsValue> {
    let mut options = Options::new();
    options.mention_translation(mentions);
    convert_with(input, &options).map_err(|e| JsValue::from_str(&e.to_string()))
}
