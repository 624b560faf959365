//! Content stream assembly for report pages.
//!
//! Only the operators a report page draws with are modelled: text objects
//! with the two Helvetica resources, RGB fills, rectangles and straight-line
//! paths (ISO 32000-1, sections 8 and 9).

use super::color::Color;
use super::encoding::encode_win_ansi;
use std::fmt;
use std::io::Write;

/// One content stream operator with its operands.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// `BT`
    BeginText,
    /// `ET`
    EndText,
    /// `/name size Tf`
    Font(String, f32),
    /// `a b c d e f Tm`
    TextMatrix(f32, f32, f32, f32, f32, f32),
    /// `(...) Tj` with WinAnsi-encoded bytes
    ShowText(Vec<u8>),
    /// `r g b rg`
    FillRgb(f32, f32, f32),
    /// `x y m`
    MoveTo(f32, f32),
    /// `x y l`
    LineTo(f32, f32),
    /// `x y w h re`
    Rect(f32, f32, f32, f32),
    /// `h`
    ClosePath,
    /// `f`
    Fill,
}

/// A number written the way content streams expect: no exponent, at most
/// three decimals, trailing zeros trimmed.
struct Num(f32);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 1000.0).round() / 1000.0;
        if rounded.fract() == 0.0 {
            // Avoids "-0"
            write!(f, "{}", rounded as i64)
        } else {
            let formatted = format!("{:.3}", rounded);
            write!(f, "{}", formatted.trim_end_matches('0').trim_end_matches('.'))
        }
    }
}

/// Builder for PDF content streams.
///
/// Tracks whether a text object is open and which font is selected, so
/// redundant `BT`/`Tf` operators are not emitted.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentStreamOp>,
    current_font: Option<(String, f32)>,
    in_text_object: bool,
    replaced_chars: usize,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operations recorded so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Number of characters that could not be encoded and were replaced.
    pub fn replaced_chars(&self) -> usize {
        self.replaced_chars
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
            // Every text object selects its own font.
            self.current_font = None;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations.
    pub fn set_font(&mut self, font_name: &str, size: f32) -> &mut Self {
        self.begin_text();
        let wanted = (font_name.to_string(), size);
        if self.current_font.as_ref() != Some(&wanted) {
            self.op(ContentStreamOp::Font(font_name.to_string(), size));
            self.current_font = Some(wanted);
        }
        self
    }

    /// Show text with its baseline starting at `(x, y)`.
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        let (encoded, replaced) = encode_win_ansi(text);
        self.replaced_chars += replaced;
        self.begin_text();
        self.op(ContentStreamOp::TextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(encoded))
    }

    /// Set the non-stroking (fill) colour. Applies to text and shapes.
    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.op(ContentStreamOp::FillRgb(color.r, color.g, color.b))
    }

    /// Move to a point (start a new subpath).
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::MoveTo(x, y))
    }

    /// Draw a line to a point.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::LineTo(x, y))
    }

    /// Append a rectangle subpath.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::Rect(x, y, width, height))
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) -> &mut Self {
        self.op(ContentStreamOp::ClosePath)
    }

    /// Fill the current path.
    pub fn fill(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Fill)
    }

    /// Fill a rectangle with a colour.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) -> &mut Self {
        self.end_text();
        self.fill_color(color).rect(x, y, width, height).fill()
    }

    /// Fill a closed polygon. Fewer than three vertices draw nothing.
    pub fn fill_polygon(&mut self, vertices: &[(f32, f32)], color: Color) -> &mut Self {
        if vertices.len() < 3 {
            return self;
        }
        self.end_text();
        self.fill_color(color);
        self.move_to(vertices[0].0, vertices[0].1);
        for &(x, y) in &vertices[1..] {
            self.line_to(x, y);
        }
        self.close_path().fill()
    }

    /// Build the content stream bytes. An open text object is closed.
    pub fn build(&mut self) -> std::io::Result<Vec<u8>> {
        self.end_text();
        let mut buf = Vec::new();
        for op in &self.operations {
            write_op(&mut buf, op)?;
            writeln!(buf)?;
        }
        Ok(buf)
    }
}

fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::Font(name, size) => write!(w, "/{} {} Tf", name, Num(*size)),
        ContentStreamOp::TextMatrix(a, b, c, d, e, f) => write!(
            w,
            "{} {} {} {} {} {} Tm",
            Num(*a),
            Num(*b),
            Num(*c),
            Num(*d),
            Num(*e),
            Num(*f)
        ),
        ContentStreamOp::ShowText(bytes) => {
            write!(w, "(")?;
            write_escaped_string(w, bytes)?;
            write!(w, ") Tj")
        },
        ContentStreamOp::FillRgb(r, g, b) => {
            write!(w, "{} {} {} rg", Num(*r), Num(*g), Num(*b))
        },
        ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", Num(*x), Num(*y)),
        ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", Num(*x), Num(*y)),
        ContentStreamOp::Rect(x, y, width, height) => {
            write!(w, "{} {} {} {} re", Num(*x), Num(*y), Num(*width), Num(*height))
        },
        ContentStreamOp::ClosePath => write!(w, "h"),
        ContentStreamOp::Fill => write!(w, "f"),
    }
}

/// Escape a literal string body. Bytes outside printable ASCII are written
/// as octal escapes so the stream stays 7-bit clean.
fn write_escaped_string<W: Write>(w: &mut W, bytes: &[u8]) -> std::io::Result<()> {
    for &byte in bytes {
        match byte {
            b'(' => write!(w, "\\(")?,
            b')' => write!(w, "\\)")?,
            b'\\' => write!(w, "\\\\")?,
            0x20..=0x7E => w.write_all(&[byte])?,
            _ => write!(w, "\\{:03o}", byte)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(builder: &mut ContentStreamBuilder) -> String {
        String::from_utf8(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 12.0).text("Hello, World!", 72.0, 720.0);

        let content = built(&mut builder);
        assert_eq!(content, "BT\n/F1 12 Tf\n1 0 0 1 72 720 Tm\n(Hello, World!) Tj\nET\n");
    }

    #[test]
    fn test_font_not_repeated() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 10.0).text("a", 0.0, 0.0);
        builder.set_font("F1", 10.0).text("b", 0.0, 10.0);
        builder.set_font("F2", 10.0).text("c", 0.0, 20.0);

        let content = built(&mut builder);
        assert_eq!(content.matches("/F1 10 Tf").count(), 1);
        assert_eq!(content.matches("/F2 10 Tf").count(), 1);
        assert_eq!(content.matches("BT").count(), 1);
    }

    #[test]
    fn test_shapes_close_text_object() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 9.0).text("label", 50.0, 700.0);
        builder.fill_rect(200.0, 698.5, 250.0, 10.0, Color::gray(0.9));
        builder.set_font("F1", 9.0).text("3 (75%)", 460.0, 700.0);

        let content = built(&mut builder);
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[4], "ET");
        assert_eq!(lines[5], "0.9 0.9 0.9 rg");
        assert_eq!(lines[6], "200 698.5 250 10 re");
        assert_eq!(lines[7], "f");
        assert_eq!(lines[8], "BT");
        assert_eq!(lines[9], "/F1 9 Tf");
    }

    #[test]
    fn test_polygon() {
        let mut builder = ContentStreamBuilder::new();
        builder.fill_polygon(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], Color::black());
        assert_eq!(built(&mut builder), "0 0 0 rg\n0 0 m\n10 0 l\n0 10 l\nh\nf\n");
    }

    #[test]
    fn test_degenerate_polygon_draws_nothing() {
        let mut builder = ContentStreamBuilder::new();
        builder.fill_polygon(&[(0.0, 0.0), (1.0, 1.0)], Color::black());
        assert!(builder.build().unwrap().is_empty());
    }

    #[test]
    fn test_text_escaping_and_encoding() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("(Grün) \\ 日", 0.0, 0.0);
        let content = built(&mut builder);
        assert!(content.contains("(\\(Gr\\374n\\) \\\\ ?) Tj"));
        assert_eq!(builder.replaced_chars(), 1);
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(Num(1.0).to_string(), "1");
        assert_eq!(Num(0.33333334).to_string(), "0.333");
        assert_eq!(Num(-0.0001).to_string(), "0");
        assert_eq!(Num(12.5).to_string(), "12.5");
        assert_eq!(Num(-3.25).to_string(), "-3.25");
    }
}
