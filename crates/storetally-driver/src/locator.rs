//! Element lookup strategies understood by the Appium server.

use std::fmt;

/// How to find an element: a W3C `using` strategy plus its selector value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Android resource id, e.g. `android:id/aerr_wait`.
    Id(String),
    /// Content description, e.g. `Stores, tab, 2 of 3`.
    AccessibilityId(String),
    /// Structural path through the view hierarchy.
    XPath(String),
    /// Widget class; used for child lookups under a parent element.
    ClassName(String),
}

impl Locator {
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    pub fn accessibility_id(value: impl Into<String>) -> Self {
        Self::AccessibilityId(value.into())
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::XPath(value.into())
    }

    pub fn class_name(value: impl Into<String>) -> Self {
        Self::ClassName(value.into())
    }

    /// The `using` value sent in a find-element request.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::AccessibilityId(_) => "accessibility id",
            Self::XPath(_) => "xpath",
            Self::ClassName(_) => "class name",
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Id(v) | Self::AccessibilityId(v) | Self::XPath(v) | Self::ClassName(v) => v,
        }
    }

    pub(crate) fn to_request_body(&self) -> serde_json::Value {
        serde_json::json!({ "using": self.strategy(), "value": self.value() })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy(), self.value())
    }
}
