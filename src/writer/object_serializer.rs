//! PDF object serialization.
//!
//! Converts [`Object`] values to their byte representation following the
//! PDF syntax rules. Dictionaries serialize in insertion order, so the
//! emitted bytes are deterministic for a given object graph.

use crate::error::{Error, Result};
use crate::object::{Dict, Object, ObjectId};
use std::io::Write;

/// Serializer for PDF objects.
#[derive(Debug, Clone, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a new object serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize an object to bytes.
    ///
    /// Fails with [`Error::DanglingReference`] if an unresolved
    /// placeholder is encountered anywhere in the object.
    pub fn serialize(&self, obj: &Object) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj)?;
        Ok(buf)
    }

    /// Serialize an indirect object definition.
    ///
    /// Format: `{id} 0 obj\n{object}\nendobj\n`
    pub fn serialize_indirect(&self, id: ObjectId, obj: &Object) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        writeln!(buf, "{} 0 obj", id.get())?;
        self.write_object(&mut buf, obj)?;
        write!(buf, "\nendobj\n")?;
        Ok(buf)
    }

    /// Write an object to a buffer.
    fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> Result<()> {
        match obj {
            Object::Null => write!(w, "null")?,
            Object::Boolean(b) => write!(w, "{}", if *b { "true" } else { "false" })?,
            Object::Integer(i) => write!(w, "{}", i)?,
            Object::Real(r) => self.write_real(w, *r)?,
            Object::String(s) => self.write_string(w, s)?,
            Object::Name(n) => self.write_name(w, n)?,
            Object::Array(arr) => self.write_array(w, arr)?,
            Object::Dictionary(dict) => self.write_dictionary(w, dict)?,
            Object::Stream { dict, data } => self.write_stream(w, dict, data)?,
            Object::Reference(id) => write!(w, "{}", id)?,
            Object::Placeholder(key) => return Err(Error::DanglingReference(key.name())),
        }
        Ok(())
    }

    /// Write a real number at coordinate precision (2 decimal places),
    /// with trailing zeros removed.
    fn write_real<W: Write>(&self, w: &mut W, value: f64) -> Result<()> {
        if value.fract() == 0.0 {
            write!(w, "{}", value as i64)?;
        } else {
            let formatted = format!("{:.2}", value);
            let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
            write!(w, "{}", trimmed)?;
        }
        Ok(())
    }

    /// Write a PDF string.
    ///
    /// Uses literal string syntax `(...)` with escaping, or hex syntax
    /// `<...>` when the data is not printable ASCII.
    fn write_string<W: Write>(&self, w: &mut W, data: &[u8]) -> Result<()> {
        let is_printable = data
            .iter()
            .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));

        if is_printable {
            write!(w, "(")?;
            for &byte in data {
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
            write!(w, ")")?;
        } else {
            write!(w, "<")?;
            for byte in data {
                write!(w, "{:02X}", byte)?;
            }
            write!(w, ">")?;
        }
        Ok(())
    }

    /// Write a PDF name, escaping delimiter and non-regular bytes as `#xx`.
    fn write_name<W: Write>(&self, w: &mut W, name: &str) -> Result<()> {
        write!(w, "/")?;
        for byte in name.bytes() {
            match byte {
                b'!'
                | b'"'
                | b'$'..=b'&'
                | b'\''..=b'.'
                | b'0'..=b'9'
                | b';'
                | b'<'
                | b'>'
                | b'?'
                | b'@'
                | b'A'..=b'Z'
                | b'^'..=b'z'
                | b'|'
                | b'~' => {
                    w.write_all(&[byte])?;
                },
                _ => {
                    write!(w, "#{:02X}", byte)?;
                },
            }
        }
        Ok(())
    }

    /// Write a PDF array.
    fn write_array<W: Write>(&self, w: &mut W, arr: &[Object]) -> Result<()> {
        write!(w, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_object(w, obj)?;
        }
        write!(w, "]")?;
        Ok(())
    }

    /// Write a PDF dictionary in insertion order.
    fn write_dictionary<W: Write>(&self, w: &mut W, dict: &Dict) -> Result<()> {
        write!(w, "<<")?;
        for (i, (key, value)) in dict.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_name(w, key)?;
            write!(w, " ")?;
            self.write_object(w, value)?;
        }
        write!(w, ">>")?;
        Ok(())
    }

    /// Write a PDF stream.
    ///
    /// `/Length` is always derived from the actual payload here, so the
    /// declared length cannot disagree with the bytes written.
    fn write_stream<W: Write>(&self, w: &mut W, dict: &Dict, data: &[u8]) -> Result<()> {
        let mut dict_with_length = dict.clone();
        dict_with_length.insert("Length".to_string(), Object::Integer(data.len() as i64));

        self.write_dictionary(w, &dict_with_length)?;
        write!(w, "\nstream\n")?;
        w.write_all(data)?;
        write!(w, "\nendstream")?;
        Ok(())
    }
}
