//! Page content stream builder.
//!
//! Builds the ordered sequence of low-level drawing operators for one
//! page: fill/stroke color changes, rectangle fills, line strokes for
//! underline and strikethrough, text draws, and image transforms.

use crate::color::Color;
use crate::error::Result;
use std::io::Write;

/// Operators this engine emits into a content stream.
#[derive(Debug, Clone)]
pub enum ContentOp {
    /// Set fill color RGB (rg)
    SetFillColor(Color),
    /// Set stroke color RGB (RG)
    SetStrokeColor(Color),
    /// Rectangle path (re)
    Rect(f32, f32, f32, f32),
    /// Fill the current path (f)
    Fill,
    /// Move to (m)
    MoveTo(f32, f32),
    /// Line to (l)
    LineTo(f32, f32),
    /// Stroke the current path (S)
    Stroke,
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font and size (Tf)
    SetFont(String, f32),
    /// Move text position (Td)
    MoveText(f32, f32),
    /// Show text (Tj), literal string with escaping
    ShowText(String),
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Paint XObject (Do)
    PaintXObject(String),
}

/// Builder for a page's content stream.
#[derive(Debug, Clone, Default)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentOp>,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Set fill color.
    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.op(ContentOp::SetFillColor(color))
    }

    /// Set stroke color.
    pub fn stroke_color(&mut self, color: Color) -> &mut Self {
        self.op(ContentOp::SetStrokeColor(color))
    }

    /// Fill a rectangle with the current fill color.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.op(ContentOp::Rect(x, y, width, height));
        self.op(ContentOp::Fill)
    }

    /// Stroke a horizontal line from `(x, y)` to `(x + length, y)` with
    /// the current stroke color. Used for underline and strikethrough.
    pub fn horizontal_line(&mut self, x: f32, y: f32, length: f32) -> &mut Self {
        self.op(ContentOp::MoveTo(x, y));
        self.op(ContentOp::LineTo(x + length, y));
        self.op(ContentOp::Stroke)
    }

    /// Draw a line of text at a position with the given font resource key.
    pub fn text_at(&mut self, font_key: &str, size: f32, x: f32, y: f32, text: &str) -> &mut Self {
        self.op(ContentOp::BeginText);
        self.op(ContentOp::SetFont(font_key.to_string(), size));
        self.op(ContentOp::MoveText(x, y));
        self.op(ContentOp::ShowText(text.to_string()));
        self.op(ContentOp::EndText)
    }

    /// Draw an image XObject scaled into the rectangle at `(x, y)`.
    ///
    /// Wraps the transform in a save/restore pair so the scaling does not
    /// leak into subsequent operators.
    pub fn draw_image(
        &mut self,
        resource_name: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> &mut Self {
        self.op(ContentOp::SaveState);
        self.op(ContentOp::Transform(width, 0.0, 0.0, height, x, y));
        self.op(ContentOp::PaintXObject(resource_name.to_string()));
        self.op(ContentOp::RestoreState)
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the stream is empty.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Build the content stream bytes, one operator per line.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        for op in &self.operations {
            self.write_op(&mut buf, op)?;
            writeln!(buf)?;
        }
        Ok(buf)
    }

    /// Write a single operation to the buffer.
    fn write_op<W: Write>(&self, w: &mut W, op: &ContentOp) -> std::io::Result<()> {
        match op {
            ContentOp::SetFillColor(c) => {
                write_nums(w, &[c.r, c.g, c.b])?;
                write!(w, " rg")
            },
            ContentOp::SetStrokeColor(c) => {
                write_nums(w, &[c.r, c.g, c.b])?;
                write!(w, " RG")
            },
            ContentOp::Rect(x, y, width, height) => {
                write_nums(w, &[*x, *y, *width, *height])?;
                write!(w, " re")
            },
            ContentOp::Fill => write!(w, "f"),
            ContentOp::MoveTo(x, y) => {
                write_nums(w, &[*x, *y])?;
                write!(w, " m")
            },
            ContentOp::LineTo(x, y) => {
                write_nums(w, &[*x, *y])?;
                write!(w, " l")
            },
            ContentOp::Stroke => write!(w, "S"),
            ContentOp::BeginText => write!(w, "BT"),
            ContentOp::EndText => write!(w, "ET"),
            ContentOp::SetFont(name, size) => {
                write!(w, "/{} ", name)?;
                write_nums(w, &[*size])?;
                write!(w, " Tf")
            },
            ContentOp::MoveText(x, y) => {
                write_nums(w, &[*x, *y])?;
                write!(w, " Td")
            },
            ContentOp::ShowText(text) => {
                write!(w, "(")?;
                write_escaped(w, text)?;
                write!(w, ") Tj")
            },
            ContentOp::SaveState => write!(w, "q"),
            ContentOp::RestoreState => write!(w, "Q"),
            ContentOp::Transform(a, b, c, d, e, f) => {
                write_nums(w, &[*a, *b, *c, *d, *e, *f])?;
                write!(w, " cm")
            },
            ContentOp::PaintXObject(name) => write!(w, "/{} Do", name),
        }
    }
}

/// Write operand numbers space-separated at 3-decimal precision with
/// trailing zeros trimmed.
fn write_nums<W: Write>(w: &mut W, values: &[f32]) -> std::io::Result<()> {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(w, " ")?;
        }
        if value.fract() == 0.0 {
            write!(w, "{}", *value as i64)?;
        } else {
            let formatted = format!("{:.3}", value);
            write!(w, "{}", formatted.trim_end_matches('0').trim_end_matches('.'))?;
        }
    }
    Ok(())
}

/// Write a literal string body with PDF escaping.
fn write_escaped<W: Write>(w: &mut W, text: &str) -> std::io::Result<()> {
    for byte in text.bytes() {
        match byte {
            b'(' => write!(w, "\\(")?,
            b')' => write!(w, "\\)")?,
            b'\\' => write!(w, "\\\\")?,
            b'\n' => write!(w, "\\n")?,
            b'\r' => write!(w, "\\r")?,
            b'\t' => write!(w, "\\t")?,
            _ => w.write_all(&[byte])?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_string(builder: &ContentStreamBuilder) -> String {
        String::from_utf8_lossy(&builder.build().unwrap()).to_string()
    }

    #[test]
    fn test_text_draw_sequence() {
        let mut builder = ContentStreamBuilder::new();
        builder.fill_color(Color::black());
        builder.text_at("Helvetica", 24.0, 100.0, 700.0, "Hello");

        let content = build_string(&builder);
        assert!(content.contains("0 0 0 rg"));
        assert!(content.contains("BT"));
        assert!(content.contains("/Helvetica 24 Tf"));
        assert!(content.contains("100 700 Td"));
        assert!(content.contains("(Hello) Tj"));
        assert!(content.contains("ET"));
    }

    #[test]
    fn test_image_draw_is_wrapped_in_state_save() {
        let mut builder = ContentStreamBuilder::new();
        builder.draw_image("Im1", 50.0, 650.0, 200.0, 150.0);

        let content = build_string(&builder);
        assert!(content.contains("q\n200 0 0 150 50 650 cm\n/Im1 Do\nQ\n"));
    }

    #[test]
    fn test_underline_stroke() {
        let mut builder = ContentStreamBuilder::new();
        builder.stroke_color(Color::new(1.0, 0.0, 0.0));
        builder.horizontal_line(50.0, 456.4, 120.0);

        let content = build_string(&builder);
        assert!(content.contains("1 0 0 RG"));
        assert!(content.contains("50 456.4 m"));
        assert!(content.contains("170 456.4 l"));
        assert!(content.contains("S\n"));
    }

    #[test]
    fn test_background_fill() {
        let mut builder = ContentStreamBuilder::new();
        builder.fill_color(Color::white());
        builder.fill_rect(10.0, 20.0, 100.0, 12.0);

        let content = build_string(&builder);
        assert!(content.contains("1 1 1 rg"));
        assert!(content.contains("10 20 100 12 re\nf\n"));
    }

    #[test]
    fn test_text_escaping() {
        let mut builder = ContentStreamBuilder::new();
        builder.text_at("Helvetica", 12.0, 0.0, 0.0, "with (parens) and \\slash");

        let content = build_string(&builder);
        assert!(content.contains("(with \\(parens\\) and \\\\slash) Tj"));
    }

    #[test]
    fn test_number_trimming() {
        let mut builder = ContentStreamBuilder::new();
        builder.fill_color(Color::from_rgb8(128, 0, 255));

        let content = build_string(&builder);
        // 128/255 rounds to 0.502 at 3 decimals; 255/255 is exactly 1.
        assert!(content.contains("0.502 0 1 rg"));
    }

    #[test]
    fn test_empty_builder_builds_empty_stream() {
        let builder = ContentStreamBuilder::new();
        assert!(builder.is_empty());
        assert!(builder.build().unwrap().is_empty());
    }
}
