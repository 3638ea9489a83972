//! Property tests for the color and wrapping utilities.

use pdf_scribe::color::ColorSpec;
use pdf_scribe::layout::{wrap_text, AVG_CHAR_WIDTH_FACTOR};
use proptest::prelude::*;

proptest! {
    /// Six-digit hex resolution returns exactly component / 255.
    #[test]
    fn hex_resolution_matches_components(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
        let hex = format!("#{:02X}{:02X}{:02X}", r, g, b);
        let color = ColorSpec::Hex(hex).resolve().unwrap();
        prop_assert!((color.r - r as f32 / 255.0).abs() < 1e-6);
        prop_assert!((color.g - g as f32 / 255.0).abs() < 1e-6);
        prop_assert!((color.b - b as f32 / 255.0).abs() < 1e-6);
        prop_assert!((0.0..=1.0).contains(&color.r));
        prop_assert!((0.0..=1.0).contains(&color.g));
        prop_assert!((0.0..=1.0).contains(&color.b));
    }

    /// Three-digit shorthand resolves identically to its doubled form.
    #[test]
    fn hex_shorthand_equals_doubled(a in 0u8..16, b in 0u8..16, c in 0u8..16) {
        let short = format!("#{:X}{:X}{:X}", a, b, c);
        let full = format!("#{:X}{:X}{:X}{:X}{:X}{:X}", a, a, b, b, c, c);
        let resolved_short = ColorSpec::Hex(short).resolve().unwrap();
        let resolved_full = ColorSpec::Hex(full).resolve().unwrap();
        prop_assert_eq!(resolved_short, resolved_full);
    }

    /// Case variations of hex digits resolve identically.
    #[test]
    fn hex_is_case_insensitive(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
        let upper = format!("#{:02X}{:02X}{:02X}", r, g, b);
        let lower = upper.to_ascii_lowercase();
        prop_assert_eq!(
            ColorSpec::Hex(upper).resolve().unwrap(),
            ColorSpec::Hex(lower).resolve().unwrap()
        );
    }

    /// No wrapped line exceeds the character budget unless it is a single
    /// unsplittable word, and no word is lost or reordered.
    #[test]
    fn wrap_respects_budget_and_loses_nothing(
        words in proptest::collection::vec("[a-z]{1,14}", 1..25),
        max_width in 30.0f32..300.0,
        font_size in 6.0f32..24.0,
    ) {
        let text = words.join(" ");
        let lines = wrap_text(&text, max_width, font_size);
        let budget = (max_width / (AVG_CHAR_WIDTH_FACTOR * font_size)) as usize;

        prop_assert!(!lines.is_empty());
        for line in &lines {
            let over_budget = line.chars().count() > budget;
            prop_assert!(
                !over_budget || !line.contains(' '),
                "multi-word line over budget: {:?} (budget {})",
                line,
                budget
            );
        }

        let rejoined: Vec<String> = lines
            .iter()
            .flat_map(|line| line.split(' ').map(str::to_string))
            .collect();
        prop_assert_eq!(rejoined, words);
    }
}
