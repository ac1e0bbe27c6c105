use serde::{Deserialize, Serialize};

/// Which neighbouring article a navigation link points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavDirection {
    Previous,
    Next,
}

impl NavDirection {
    /// Title used when the page link has none.
    pub fn fallback_title(self) -> &'static str {
        match self {
            NavDirection::Previous => "Previous article",
            NavDirection::Next => "Next article",
        }
    }
}

/// A previous/next article link found on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub href: String,
    pub title: Option<String>,
}

/// Vertical extent of the article in document coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArticleBounds {
    pub top: f64,
    pub height: f64,
}

/// Current scroll offset and viewport height (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
}

impl Default for ScrollMetrics {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            viewport_height: 800.0,
        }
    }
}

/// Floating elements the controller adds to the page at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    ExitButton,
    Nav { direction: NavDirection, href: String, title: String },
    KeyboardHint,
    FontControls,
    ProgressRing,
}
