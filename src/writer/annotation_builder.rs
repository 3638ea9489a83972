//! Link annotations.
//!
//! A hyperlink attached to a text line becomes a `/Annot` object with a
//! `/Link` subtype and a URI action at finalize time.

use crate::geometry::Rect;
use crate::object::Object;

/// A hyperlink region: a rectangle on the page plus the target URI.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkAnnotation {
    /// Bounding rectangle in page coordinates
    pub rect: Rect,
    /// Target URI opened when the region is activated
    pub uri: String,
}

impl LinkAnnotation {
    /// Create a link annotation with a URI action.
    pub fn uri(rect: Rect, uri: impl Into<String>) -> Self {
        Self {
            rect,
            uri: uri.into(),
        }
    }

    /// Build the annotation dictionary.
    pub fn to_object(&self) -> Object {
        let action = Object::dict(vec![
            ("S", Object::name("URI")),
            ("URI", Object::string(&self.uri)),
        ]);
        Object::dict(vec![
            ("Type", Object::name("Annot")),
            ("Subtype", Object::name("Link")),
            (
                "Rect",
                Object::rect(
                    self.rect.x as f64,
                    self.rect.y as f64,
                    self.rect.width as f64,
                    self.rect.height as f64,
                ),
            ),
            (
                "Border",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(0),
                ]),
            ),
            ("A", action),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::ObjectSerializer;

    #[test]
    fn test_link_object_shape() {
        let link = LinkAnnotation::uri(Rect::new(50.0, 460.0, 120.0, 12.0), "https://example.com");
        let bytes = ObjectSerializer::new().serialize(&link.to_object()).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Type /Annot"));
        assert!(text.contains("/Subtype /Link"));
        assert!(text.contains("/Rect [50 460 170 472]"));
        assert!(text.contains("/Border [0 0 0]"));
        assert!(text.contains("/A <</S /URI /URI (https://example.com)>>"));
    }
}
