use lopdf::content::Operation;
use lopdf::{Object, StringFormat};
use std::{fs::File, io::BufWriter, io::Write as _, mem, path::Path};
use time::OffsetDateTime;

use crate::error::{ContextError, ErrorKind};
use crate::font::{encode_winansi, StandardFont};

/// The text state of the canvas, which applies to every following `draw_string`.
#[derive(Debug, Clone, Copy)]
struct FontState {
    font: StandardFont,
    size: f32,
}

/// A drawing surface backed by a single-page PDF document.
///
/// Every drawing call appends operations to the content stream of the page in order, the
/// document structure (catalog, page tree, resources) is only assembled when the canvas is
/// finalized through `save` or `save_to_bytes`.
pub struct PdfCanvas {
    /// Page width in points.
    pub width: f32,
    /// Page height in points, written as-is even when it is not positive.
    pub height: f32,
    /// The title stored in the document information dictionary.
    pub title: String,
    /// The operations of the page content stream, in drawing order.
    operations: Vec<Operation>,
    font_state: FontState,
}

impl PdfCanvas {
    /// Create a new canvas for a page of the given width and height in points. The fill color
    /// is set to black and the default font is Helvetica at 12 points.
    pub fn new(width: f32, height: f32) -> Self {
        PdfCanvas {
            width,
            height,
            title: "Barcodes".into(),
            operations: vec![Operation::new("g", vec![0.into()])],
            font_state: FontState {
                font: StandardFont::Helvetica,
                size: 12.0,
            },
        }
    }

    /// Selects the font and size for the text drawn afterwards.
    pub fn set_font(&mut self, font: StandardFont, size: f32) {
        self.font_state = FontState { font, size };
    }

    /// The width in points of the text when set in the given font and size.
    pub fn string_width(&self, text: &str, font: StandardFont, size: f32) -> f32 {
        font.string_width(text, size)
    }

    /// Draws the text with its baseline starting at the given position, using the current font.
    pub fn draw_string(&mut self, x: f32, y: f32, text: &str) {
        let FontState { font, size } = self.font_state;
        self.operations.extend([
            Operation::new("BT", vec![]), // Begin text section
            Operation::new("Tf", vec![font.resource_name().into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_winansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Fills the given rectangles, each expressed as `[x, y, width, height]`, as one path.
    pub fn fill_rectangles(&mut self, rectangles: &[[f32; 4]]) {
        if rectangles.is_empty() {
            return;
        }
        for [x, y, width, height] in rectangles {
            self.operations.push(Operation::new(
                "re",
                vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()],
            ));
        }
        self.operations.push(Operation::new("f", vec![]));
    }

    /// Assembles the finished document from the drawn operations.
    fn build_document(&self) -> Result<lopdf::Document, ContextError> {
        use lopdf::Object::*;
        use lopdf::StringFormat::*;

        let mut document = lopdf::Document::with_version("1.5");

        let document_info = lopdf::Dictionary::from_iter(vec![
            ("Title", text_string(&self.title)),
            (
                "Producer",
                String(
                    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
                        .as_bytes()
                        .to_vec(),
                    Literal,
                ),
            ),
            (
                "CreationDate",
                String(
                    to_pdf_timestamp_format(&OffsetDateTime::UNIX_EPOCH).into_bytes(),
                    Literal,
                ),
            ),
            (
                "ModDate",
                String(
                    to_pdf_timestamp_format(&OffsetDateTime::UNIX_EPOCH).into_bytes(),
                    Literal,
                ),
            ),
        ]);
        let document_info_id = document.add_object(Dictionary(document_info));

        // The font is one of the standard 14, so only its name and encoding are needed
        let font = StandardFont::Helvetica;
        let font_id = document.add_object(lopdf::Dictionary::from_iter(vec![
            ("Type", Name("Font".into())),
            ("Subtype", Name("Type1".into())),
            ("BaseFont", Name(font.base_font().into())),
            ("Encoding", Name("WinAnsiEncoding".into())),
        ]));
        let resources_id = document.add_object(lopdf::Dictionary::from_iter(vec![(
            "Font",
            Dictionary(lopdf::Dictionary::from_iter(vec![(
                font.resource_name(),
                Reference(font_id),
            )])),
        )]));

        let content = lopdf::content::Content {
            operations: self.operations.clone(),
        };
        let content_bytes = content.encode().map_err(|error| {
            ContextError::with_error(ErrorKind::Document, "Failed to encode the page content", &error)
        })?;
        let content_id = document.add_object(lopdf::Stream::new(
            lopdf::Dictionary::new(),
            content_bytes,
        ));

        let pages_id = document.new_object_id();
        let page_box = || Array(vec![0.into(), 0.into(), self.width.into(), self.height.into()]);
        let page_id = document.add_object(lopdf::Dictionary::from_iter(vec![
            ("Type", "Page".into()),
            ("Parent", Reference(pages_id)),
            ("Rotate", Integer(0)),
            ("MediaBox", page_box()),
            ("CropBox", page_box()),
            ("TrimBox", page_box()),
            ("Resources", Reference(resources_id)),
            ("Contents", Reference(content_id)),
        ]));

        let pages = lopdf::Dictionary::from_iter(vec![
            ("Type", "Pages".into()),
            ("Count", Integer(1)),
            ("Kids", vec![Reference(page_id)].into()),
        ]);
        document.objects.insert(pages_id, Dictionary(pages));

        let catalog_id = document.add_object(lopdf::Dictionary::from_iter(vec![
            ("Type", "Catalog".into()),
            ("PageLayout", "OneColumn".into()),
            ("PageMode", "UseNone".into()),
            ("Pages", Reference(pages_id)),
        ]));

        document.trailer.set("Root", Reference(catalog_id));
        document.trailer.set("Info", Reference(document_info_id));

        Ok(document)
    }

    /// Finalize the canvas and return the bytes of the PDF document.
    pub fn save_to_bytes(&self) -> Result<Vec<u8>, ContextError> {
        let mut document = self.build_document()?;

        let mut pdf_document_bytes = Vec::new();
        let mut writer = BufWriter::new(&mut pdf_document_bytes);
        document.save_to(&mut writer).map_err(|error| {
            ContextError::with_error(
                ErrorKind::Document,
                "Error while saving the PDF document to bytes",
                &error,
            )
        })?;
        writer.flush().map_err(|error| {
            ContextError::with_error(
                ErrorKind::Document,
                "Error while saving the PDF document to bytes",
                &error,
            )
        })?;
        mem::drop(writer);

        Ok(pdf_document_bytes)
    }

    /// Finalize the canvas and write it to the given path, creating or truncating the file.
    pub fn save(&self, path: &Path) -> Result<(), ContextError> {
        let pdf_document_bytes = self.save_to_bytes()?;

        let file = File::create(path).map_err(|error| {
            ContextError::with_error(
                ErrorKind::Io,
                format!("Failed to create the output file {:?}", path),
                &error,
            )
        })?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&pdf_document_bytes)
            .and_then(|_| writer.flush())
            .map_err(|error| {
                ContextError::with_error(
                    ErrorKind::Io,
                    format!("Failed to write the output file {:?}", path),
                    &error,
                )
            })?;

        Ok(())
    }
}

/// Encodes a text string of the document information dictionary. ASCII is stored as-is, since
/// it reads the same in PDFDocEncoding, anything else as UTF-16BE preceded by the byte order mark.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let bytes = [0xfe, 0xff]
        .into_iter()
        .chain(text.encode_utf16().flat_map(u16::to_be_bytes))
        .collect();
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Formats the given time so that it matches what the PDF specification expects.
/// An example of it is the following: D:20170505150224+02'00'.
fn to_pdf_timestamp_format(date: &OffsetDateTime) -> String {
    let offset = date.offset();
    let offset_sign = if offset.is_negative() { '-' } else { '+' };
    format!(
        "D:{:04}{:02}{:02}{:02}{:02}{:02}{offset_sign}{:02}'{:02}'",
        date.year(),
        u8::from(date.month()),
        date.day(),
        date.hour(),
        date.minute(),
        date.second(),
        offset.whole_hours().abs(),
        offset.minutes_past_hour().abs(),
    )
}
