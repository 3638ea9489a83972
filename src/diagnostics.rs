//! Layout diagnostics.
//!
//! Elements drawn outside a page's padding box produce warnings, not
//! errors: the build always completes and the warnings are collected on
//! the page so callers and tests can inspect them. Each warning is also
//! mirrored to the `log` facade.

use std::fmt;

/// The kind of element that triggered a bounds warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// A rendered text line
    Text,
    /// An image placement
    Image,
}

/// A non-fatal notice that an element's draw rectangle falls outside the
/// page's padding box and may be cut off when rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsWarning {
    /// What kind of element overflowed
    pub kind: ElementKind,
    /// The line text or image name
    pub label: String,
    /// X position of the offending rectangle
    pub x: f32,
    /// Y position of the offending rectangle
    pub y: f32,
    /// Rectangle width
    pub width: f32,
    /// Rectangle height
    pub height: f32,
}

impl fmt::Display for BoundsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = match self.kind {
            ElementKind::Text => "Text",
            ElementKind::Image => "Image",
        };
        write!(
            f,
            "{} '{}' at ({:.1}, {:.1}) may be cut off \
             (width={:.1}, height={:.1}); adjust its position or the padding",
            noun, self.label, self.x, self.y, self.width, self.height
        )
    }
}

/// Collecting sink for layout warnings.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<BoundsWarning>,
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and mirror it to the log facade.
    pub fn report(&mut self, warning: BoundsWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// All warnings recorded so far, in emission order.
    pub fn warnings(&self) -> &[BoundsWarning] {
        &self.warnings
    }

    /// Whether any warning has been recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of recorded warnings.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}
