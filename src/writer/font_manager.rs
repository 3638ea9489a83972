//! Font variant resolution and font object creation.
//!
//! Only the standard Type1 fonts are supported, with four variants per
//! family: plain, bold, oblique, and bold-oblique. Resource keys are the
//! dash-stripped family name plus the variant suffix (`HelveticaBold`);
//! the `/BaseFont` value keeps the PostScript dash (`Helvetica-Bold`).

use crate::object::{Object, ObjectId, ObjectStore};
use indexmap::IndexMap;

/// Variant suffixes in the order the font objects are created.
const VARIANT_SUFFIXES: [&str; 4] = ["", "Bold", "Oblique", "BoldOblique"];

/// Resolve the font resource key for a base family and style flags.
///
/// Dashes are stripped from the family name first, so `"Helvetica-Bold"`
/// and `"HelveticaBold"` normalize identically.
pub fn variant_key(base: &str, bold: bool, italic: bool) -> String {
    let family: String = base.chars().filter(|&c| c != '-').collect();
    let suffix = match (bold, italic) {
        (true, true) => "BoldOblique",
        (true, false) => "Bold",
        (false, true) => "Oblique",
        (false, false) => "",
    };
    format!("{}{}", family, suffix)
}

/// Creates the document's fixed set of font objects.
#[derive(Debug, Clone)]
pub struct FontManager {
    family: String,
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new("Helvetica")
    }
}

impl FontManager {
    /// Create a manager for one base family.
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into().chars().filter(|&c| c != '-').collect(),
        }
    }

    /// The dash-stripped family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Resource key and PostScript BaseFont name for each of the four
    /// variants, in creation order.
    pub fn variants(&self) -> Vec<(String, String)> {
        VARIANT_SUFFIXES
            .iter()
            .map(|suffix| {
                let key = format!("{}{}", self.family, suffix);
                let base_font = if suffix.is_empty() {
                    self.family.clone()
                } else {
                    format!("{}-{}", self.family, suffix)
                };
                (key, base_font)
            })
            .collect()
    }

    /// Create the four font objects in the store and return the document
    /// font resource map (resource key → object identity).
    ///
    /// Called exactly once per document, at finalize time, regardless of
    /// how many pages use the fonts.
    pub fn create_objects(&self, store: &mut ObjectStore) -> IndexMap<String, ObjectId> {
        self.variants()
            .into_iter()
            .map(|(key, base_font)| {
                let font = Object::dict(vec![
                    ("Type", Object::name("Font")),
                    ("Subtype", Object::name("Type1")),
                    ("Name", Object::Name(key.clone())),
                    ("BaseFont", Object::Name(base_font)),
                    ("Encoding", Object::name("WinAnsiEncoding")),
                ]);
                (key, store.add(font))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_key_combinations() {
        assert_eq!(variant_key("Helvetica", false, false), "Helvetica");
        assert_eq!(variant_key("Helvetica", true, false), "HelveticaBold");
        assert_eq!(variant_key("Helvetica", false, true), "HelveticaOblique");
        assert_eq!(variant_key("Helvetica", true, true), "HelveticaBoldOblique");
    }

    #[test]
    fn test_variant_key_strips_dashes() {
        assert_eq!(variant_key("Helvetica-Bold", false, false), "HelveticaBold");
    }

    #[test]
    fn test_variants_map_to_postscript_names() {
        let manager = FontManager::default();
        let variants = manager.variants();
        assert_eq!(variants.len(), 4);
        assert_eq!(variants[0], ("Helvetica".into(), "Helvetica".into()));
        assert_eq!(variants[1], ("HelveticaBold".into(), "Helvetica-Bold".into()));
        assert_eq!(
            variants[3],
            ("HelveticaBoldOblique".into(), "Helvetica-BoldOblique".into())
        );
    }

    #[test]
    fn test_create_objects_assigns_sequential_ids() {
        let mut store = ObjectStore::new();
        let map = FontManager::default().create_objects(&mut store);

        assert_eq!(map.len(), 4);
        assert_eq!(store.len(), 4);
        let ids: Vec<u32> = map.values().map(|id| id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(map.contains_key("HelveticaOblique"));
    }
}
