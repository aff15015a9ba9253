use lopdf::content::Content;
use lopdf::xref::{Xref, XrefEntry, XrefType};
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream};
use std::io::{self, Seek, Write};

/// Writes indirect objects straight to the output as they are produced.
///
/// Only the page tree and catalog are held back until `finish`, because
/// their contents depend on every page having been written.
pub struct StreamingPdfWriter<W: Write + Seek> {
    writer: W,
    xref: Xref,
    max_id: u32,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl<W: Write + Seek> StreamingPdfWriter<W> {
    pub fn new(mut writer: W, version: &str) -> io::Result<Self> {
        writer.write_all(format!("%PDF-{}\n%âãÏÓ\n", version).as_bytes())?;

        Ok(Self {
            writer,
            xref: Xref::new(0, XrefType::CrossReferenceTable),
            max_id: 2,
            pages_id: (1, 0),
            catalog_id: (2, 0),
            page_ids: Vec::new(),
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    /// Allocates an id and writes `object` under it immediately.
    pub fn write_object(&mut self, object: Object) -> io::Result<ObjectId> {
        let id = self.new_object_id();
        internal_writer::write_indirect_object(&mut self.writer, id, &object, &mut self.xref)?;
        Ok(id)
    }

    pub fn write_content_stream(&mut self, content: Content) -> io::Result<ObjectId> {
        let bytes = content
            .encode()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        self.write_object(Object::Stream(Stream::new(dictionary! {}, bytes)))
    }

    pub fn push_page_id(&mut self, page_id: ObjectId) {
        self.page_ids.push(page_id);
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Writes the page tree, catalog, optional info dictionary, cross-reference
    /// table and trailer, then hands back the underlying writer.
    pub fn finish(mut self, info: Option<Dictionary>) -> io::Result<W> {
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => self
                .page_ids
                .iter()
                .map(|id| Object::Reference(*id))
                .collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        internal_writer::write_indirect_object(
            &mut self.writer,
            self.pages_id,
            &pages_dict.into(),
            &mut self.xref,
        )?;

        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        internal_writer::write_indirect_object(
            &mut self.writer,
            self.catalog_id,
            &catalog_dict.into(),
            &mut self.xref,
        )?;

        let info_id = match info {
            Some(info) => Some(self.write_object(info.into())?),
            None => None,
        };

        let xref_start = self.writer.stream_position()?;
        self.xref.size = self.max_id + 1;
        internal_writer::write_xref(&mut self.writer, &self.xref)?;

        let mut trailer = dictionary! {
            "Size" => self.xref.size as i64,
            "Root" => self.catalog_id,
        };
        if let Some(info_id) = info_id {
            trailer.set("Info", info_id);
        }
        writeln!(self.writer, "trailer")?;
        internal_writer::write_dictionary(&mut self.writer, &trailer)?;
        writeln!(self.writer, "\nstartxref")?;
        writeln!(self.writer, "{}", xref_start)?;
        write!(self.writer, "%%EOF")?;

        self.writer.flush()?;
        Ok(self.writer)
    }
}

mod internal_writer {
    use super::*;
    use lopdf::StringFormat;
    use std::collections::BTreeMap;

    pub fn write_indirect_object<W: Write + Seek>(
        writer: &mut W,
        id: ObjectId,
        object: &Object,
        xref: &mut Xref,
    ) -> io::Result<()> {
        let offset = writer.stream_position()?;
        xref.insert(id.0, XrefEntry::Normal { offset: offset as u32, generation: id.1 });
        writeln!(writer, "{} {} obj", id.0, id.1)?;
        write_object(writer, object)?;
        writeln!(writer, "\nendobj")?;
        Ok(())
    }

    pub fn write_object(writer: &mut dyn Write, object: &Object) -> io::Result<()> {
        match object {
            Object::Null => writer.write_all(b"null"),
            Object::Boolean(b) => writer.write_all(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => write!(writer, "{}", i),
            Object::Real(r) => write!(writer, "{:.3}", r),
            Object::Name(n) => {
                writer.write_all(b"/")?;
                writer.write_all(n)
            }
            Object::String(s, format) => match format {
                StringFormat::Literal => {
                    writer.write_all(b"(")?;
                    for &byte in s {
                        if byte == b'(' || byte == b')' || byte == b'\\' {
                            writer.write_all(b"\\")?;
                        }
                        writer.write_all(&[byte])?;
                    }
                    writer.write_all(b")")
                }
                StringFormat::Hexadecimal => {
                    let hex: String = s.iter().map(|b| format!("{:02X}", b)).collect();
                    write!(writer, "<{}>", hex)
                }
            },
            Object::Array(arr) => {
                writer.write_all(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        writer.write_all(b" ")?;
                    }
                    write_object(writer, obj)?;
                }
                writer.write_all(b"]")
            }
            Object::Dictionary(dict) => write_dictionary(writer, dict),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                write_dictionary(writer, &dict)?;
                writer.write_all(b"\nstream\n")?;
                writer.write_all(&stream.content)?;
                writer.write_all(b"\nendstream")
            }
            Object::Reference(id) => write!(writer, "{} {} R", id.0, id.1),
        }
    }

    pub fn write_dictionary(writer: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
        writer.write_all(b"<<")?;
        let sorted_keys: BTreeMap<_, _> = dict.iter().collect();
        for (key, value) in sorted_keys {
            writer.write_all(b"/")?;
            writer.write_all(key)?;
            writer.write_all(b" ")?;
            write_object(writer, value)?;
            writer.write_all(b" ")?;
        }
        writer.write_all(b">>")
    }

    /// Writes a single `0 size` subsection. Ids that were allocated but never
    /// written are listed as free entries.
    pub fn write_xref<W: Write>(writer: &mut W, xref: &Xref) -> io::Result<()> {
        writeln!(writer, "xref")?;
        writeln!(writer, "0 {}", xref.size)?;
        writeln!(writer, "0000000000 65535 f ")?;
        for id in 1..xref.size {
            match xref.entries.get(&id) {
                Some(XrefEntry::Normal { offset, generation }) => {
                    writeln!(writer, "{:010} {:05} n ", offset, generation)?;
                }
                _ => writeln!(writer, "0000000000 65535 f ")?,
            }
        }
        Ok(())
    }
}
