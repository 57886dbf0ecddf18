use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum LandingError {
    #[error("javascript error: {0}")]
    Js(String),
    #[error("missing element: {0}")]
    MissingElement(&'static str),
    #[error("invalid landing config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for LandingError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| js_message(&value))
            .unwrap_or_else(|| format!("{:?}", value));
        LandingError::Js(message)
    }
}

// Error objects carry their text on `message`, not on the value itself.
fn js_message(value: &JsValue) -> Option<String> {
    web_sys::js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
}

pub type Result<T> = std::result::Result<T, LandingError>;
