//! Byte encoding of PDF objects (ISO 32000-1, section 7.3).
//!
//! Output is compact: single spaces between tokens, dictionaries on one
//! line.

use crate::object::{Dict, PdfObject};
use std::io::{self, Write};

/// Encodes [`PdfObject`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Encode a direct object.
    pub fn serialize(&self, obj: &PdfObject) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        write_object(&mut out, obj)?;
        Ok(out)
    }

    /// Encode a direct object as text (tests and debugging).
    pub fn serialize_to_string(&self, obj: &PdfObject) -> io::Result<String> {
        Ok(String::from_utf8_lossy(&self.serialize(obj)?).into_owned())
    }

    /// Encode an indirect object definition: `{id} 0 obj\n{object}\nendobj\n`.
    pub fn serialize_indirect(&self, id: u32, obj: &PdfObject) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        writeln!(out, "{} 0 obj", id)?;
        write_object(&mut out, obj)?;
        write!(out, "\nendobj\n")?;
        Ok(out)
    }
}

fn write_object<W: Write>(w: &mut W, obj: &PdfObject) -> io::Result<()> {
    match obj {
        PdfObject::Integer(i) => write!(w, "{}", i),
        PdfObject::Real(r) => write_real(w, *r),
        PdfObject::Name(name) => write_name(w, name),
        PdfObject::Text(bytes) => write_text(w, bytes),
        PdfObject::Array(items) => {
            write!(w, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(w, " ")?;
                }
                write_object(w, item)?;
            }
            write!(w, "]")
        },
        PdfObject::Dict(dict) => write_dict(w, None, dict),
        PdfObject::Stream(dict, data) => {
            write_dict(w, Some(data.len()), dict)?;
            write!(w, "\nstream\n")?;
            w.write_all(data)?;
            write!(w, "\nendstream")
        },
        PdfObject::Ref(id) => write!(w, "{}", id),
    }
}

/// A stream dictionary gets `/Length` first, replacing any stored value.
fn write_dict<W: Write>(w: &mut W, length: Option<usize>, dict: &Dict) -> io::Result<()> {
    write!(w, "<<")?;
    if let Some(length) = length {
        write!(w, " /Length {}", length)?;
    }
    for (key, value) in dict.iter() {
        if length.is_some() && key == "Length" {
            continue;
        }
        write!(w, " ")?;
        write_name(w, key)?;
        write!(w, " ")?;
        write_object(w, value)?;
    }
    write!(w, " >>")
}

/// Integers print without a fraction; other values with up to five decimals.
fn write_real<W: Write>(w: &mut W, value: f64) -> io::Result<()> {
    if value.fract() == 0.0 {
        return write!(w, "{}", value as i64);
    }
    let formatted = format!("{:.5}", value);
    write!(w, "{}", formatted.trim_end_matches('0').trim_end_matches('.'))
}

/// Literal string when every byte is printable ASCII, hex string otherwise.
fn write_text<W: Write>(w: &mut W, bytes: &[u8]) -> io::Result<()> {
    if bytes.iter().all(|b| (0x20..=0x7E).contains(b)) {
        write!(w, "(")?;
        for &b in bytes {
            if matches!(b, b'(' | b')' | b'\\') {
                write!(w, "\\")?;
            }
            w.write_all(&[b])?;
        }
        write!(w, ")")
    } else {
        write!(w, "<")?;
        for b in bytes {
            write!(w, "{:02X}", b)?;
        }
        write!(w, ">")
    }
}

/// Bytes outside the regular character set, plus `#`, become `#xx`.
fn write_name<W: Write>(w: &mut W, name: &str) -> io::Result<()> {
    write!(w, "/")?;
    for b in name.bytes() {
        let delimiter = matches!(b, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%');
        if (0x21..=0x7E).contains(&b) && !delimiter && b != b'#' {
            w.write_all(&[b])?;
        } else {
            write!(w, "#{:02X}", b)?;
        }
    }
    Ok(())
}
