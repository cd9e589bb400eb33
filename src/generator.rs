use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::barcode::{BarcodeSymbology, Code128};
use crate::error::{ContextError, ErrorKind};
use crate::font::StandardFont;
use crate::layout::{centered_x, PageLayout, BARCODE_HEIGHT, TEXT_SIZE};
use crate::pdf::PdfCanvas;
use crate::request::{range_length, GenerationRequest};

/// What a successful generation produced, used for the final status message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    /// `end - start + 1`, which is not positive for an inverted range.
    pub item_count: i64,
    pub output_path: PathBuf,
}

/// Renders the request with Code 128 barcodes and writes the PDF file to the output path.
pub fn generate(request: &GenerationRequest) -> Result<GenerationSummary, ContextError> {
    generate_with(request, &Code128)
}

/// Renders the request with the given symbology and writes the PDF file to the output path.
/// The file is only created once every barcode has been encoded successfully.
pub fn generate_with<S: BarcodeSymbology>(
    request: &GenerationRequest,
    symbology: &S,
) -> Result<GenerationSummary, ContextError> {
    let canvas = render_document(request, symbology)?;
    canvas.save(&request.output_path)?;
    log::info!(
        "Saved the output file to the path: {:?}",
        request.output_path
    );

    Ok(GenerationSummary {
        item_count: request.item_count(),
        output_path: request.output_path.clone(),
    })
}

/// Draws every item of the request onto a fresh single-page canvas, from the bottom of the
/// page upwards, without touching the filesystem.
pub fn render_document<S: BarcodeSymbology>(
    request: &GenerationRequest,
    symbology: &S,
) -> Result<PdfCanvas, ContextError> {
    if range_length(request.start, request.end).is_none() {
        return Err(ContextError::with_context(
            ErrorKind::Parameter,
            format!(
                "The range {}..={} holds more numbers than can be counted",
                request.start, request.end
            ),
        ));
    }

    let layout = PageLayout::for_request(request);
    log::debug!("{:?}", layout);
    if layout.item_count <= 0 {
        log::warn!(
            "The range {}..={} is empty, the page height will be {}",
            request.start,
            request.end,
            layout.page_height
        );
    }

    let mut canvas = PdfCanvas::new(layout.page_width, layout.page_height);
    if !request.text.is_empty() {
        canvas.title = request.text.clone();
    }
    let font = StandardFont::Helvetica;

    for item in layout.items(request) {
        if !request.text.is_empty() {
            canvas.set_font(font, TEXT_SIZE);
            let caption_width = canvas.string_width(&request.text, font, TEXT_SIZE);
            canvas.draw_string(
                centered_x(layout.page_width, caption_width),
                item.caption_baseline(),
                &request.text,
            );
        }

        let barcode = symbology.render(&item.value, BARCODE_HEIGHT, request.bar_width)?;
        let barcode_x = centered_x(layout.page_width, barcode.width());
        barcode.draw_on(&mut canvas, barcode_x, item.y_position);
        log::debug!(
            "Drew {:?} at ({}, {}) with a width of {}",
            item.value,
            barcode_x,
            item.y_position,
            barcode.width()
        );

        canvas.set_font(font, TEXT_SIZE);
        let value_width = canvas.string_width(&item.value, font, TEXT_SIZE);
        canvas.draw_string(
            centered_x(layout.page_width, value_width),
            item.value_baseline(),
            &item.value,
        );
    }

    Ok(canvas)
}
