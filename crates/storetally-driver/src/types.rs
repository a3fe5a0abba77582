//! Driver-facing value types and the JSON shapes of the WebDriver wire protocol.

use std::time::Duration;

use serde::Deserialize;

/// Opaque handle to an element inside the current session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(String);

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Window geometry in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WindowRect {
    #[serde(default)]
    pub x: i64,
    #[serde(default)]
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    #[must_use]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A single-finger press, drag and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swipe {
    pub from: Point,
    pub to: Point,
    /// How long the finger rests at `from` before moving.
    pub hold: Duration,
    /// Duration of the move from `from` to `to`.
    pub travel: Duration,
}

/// Envelope shared by every WebDriver response: `{"value": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct WireResponse<T> {
    pub value: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireError {
    pub error: String,
    #[serde(default)]
    pub message: String,
}

/// Element reference as returned by find-element; Appium sends both keys,
/// older servers only `ELEMENT`.
#[derive(Debug, Deserialize)]
pub(crate) struct WireElement {
    #[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
    pub w3c: Option<String>,
    #[serde(rename = "ELEMENT")]
    pub legacy: Option<String>,
}

impl WireElement {
    pub fn into_element_ref(self) -> Option<ElementRef> {
        self.w3c.or(self.legacy).map(ElementRef)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_element_prefers_w3c_key() {
        let raw = serde_json::json!({
            "element-6066-11e4-a52e-4f735466cecf": "w3c-id",
            "ELEMENT": "legacy-id"
        });
        let element: WireElement = serde_json::from_value(raw).unwrap();
        assert_eq!(element.into_element_ref(), Some(ElementRef::new("w3c-id")));
    }

    #[test]
    fn wire_element_falls_back_to_legacy_key() {
        let raw = serde_json::json!({"ELEMENT": "legacy-id"});
        let element: WireElement = serde_json::from_value(raw).unwrap();
        assert_eq!(element.into_element_ref(), Some(ElementRef::new("legacy-id")));
    }

    #[test]
    fn wire_element_without_keys_is_none() {
        let element: WireElement = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(element.into_element_ref().is_none());
    }

    #[test]
    fn window_rect_tolerates_missing_origin() {
        let rect: WindowRect =
            serde_json::from_value(serde_json::json!({"width": 1080, "height": 2220})).unwrap();
        assert_eq!(rect.x, 0);
        assert_eq!(rect.height, 2220);
    }
}
