use crate::error::{ContextError, ErrorKind};
use crate::pdf::PdfCanvas;

/// Minimum quiet zone on either side of a symbol, a quarter of an inch.
const MINIMUM_QUIET_ZONE: f32 = 18.0;
/// The quiet zone is at least this many times the bar width.
const QUIET_ZONE_BAR_WIDTHS: f32 = 10.0;

/// A linear barcode symbology which is able to turn a value into a pattern of bars.
///
/// Implementations only encode, they never draw a human-readable line of text, as the
/// caller decides where and whether the value is printed.
pub trait BarcodeSymbology {
    /// Renders the value as bars of the given height, where `bar_width` is the width in points
    /// of a single module.
    fn render(
        &self,
        value: &str,
        bar_height: f32,
        bar_width: f32,
    ) -> Result<RenderedBarcode, ContextError>;
}

/// Code 128, restricted to code set B so that every printable ASCII character is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Code128;

impl BarcodeSymbology for Code128 {
    fn render(
        &self,
        value: &str,
        bar_height: f32,
        bar_width: f32,
    ) -> Result<RenderedBarcode, ContextError> {
        // Code set B is selected through a marker character which must not appear in the data
        if let Some(character) = value.chars().find(|character| !(' '..='~').contains(character)) {
            return Err(ContextError::with_context(
                ErrorKind::Encoding,
                format!(
                    "Unable to encode {:?} as Code 128: the character {:?} is not supported",
                    value, character
                ),
            ));
        }

        let symbol = barcoders::sym::code128::Code128::new(format!("Ɓ{value}")).map_err(|error| {
            ContextError::with_error(
                ErrorKind::Encoding,
                format!("Unable to encode {:?} as Code 128", value),
                &error,
            )
        })?;

        Ok(RenderedBarcode::new(symbol.encode(), bar_height, bar_width))
    }
}

/// The modules of an encoded symbol, ready to be measured and drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBarcode {
    /// One entry per module, `1` for a dark module and `0` for a light one.
    modules: Vec<u8>,
    bar_height: f32,
    bar_width: f32,
    quiet_zone: f32,
}

impl RenderedBarcode {
    pub fn new(modules: Vec<u8>, bar_height: f32, bar_width: f32) -> RenderedBarcode {
        RenderedBarcode {
            modules,
            bar_height,
            bar_width,
            quiet_zone: MINIMUM_QUIET_ZONE.max(bar_width * QUIET_ZONE_BAR_WIDTHS),
        }
    }

    /// The total width in points, including the quiet zones on both sides.
    pub fn width(&self) -> f32 {
        self.modules.len() as f32 * self.bar_width + 2.0 * self.quiet_zone
    }

    pub fn height(&self) -> f32 {
        self.bar_height
    }

    pub fn quiet_zone(&self) -> f32 {
        self.quiet_zone
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// The dark bars as `(offset, width)` pairs in points, measured from the left edge of the
    /// symbol (after the quiet zone). Adjacent dark modules are merged into a single bar.
    pub fn bars(&self) -> Vec<(f32, f32)> {
        let mut bars = Vec::new();
        let mut current_bar: Option<(usize, usize)> = None;

        for (index, module) in self.modules.iter().enumerate() {
            if *module != 0 {
                match current_bar.as_mut() {
                    Some((_, length)) => *length += 1,
                    None => current_bar = Some((index, 1)),
                }
            } else if let Some(bar) = current_bar.take() {
                bars.push(bar);
            }
        }
        bars.extend(current_bar);

        bars.into_iter()
            .map(|(start, length)| {
                (
                    start as f32 * self.bar_width,
                    length as f32 * self.bar_width,
                )
            })
            .collect()
    }

    /// Draws the bars onto the canvas with the lower left corner of the symbol, quiet zone
    /// included, at the given position.
    pub fn draw_on(&self, canvas: &mut PdfCanvas, x: f32, y: f32) {
        let origin = x + self.quiet_zone;
        let rectangles = self
            .bars()
            .into_iter()
            .map(|(offset, width)| [origin + offset, y, width, self.bar_height])
            .collect::<Vec<_>>();
        canvas.fill_rectangles(&rectangles);
    }
}
