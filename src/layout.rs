use serde::{Deserialize, Serialize};

use crate::request::GenerationRequest;

/// Height of the bars of every barcode, 0.5 cm.
pub const BARCODE_HEIGHT: f32 = 0.5 * POINTS_PER_CENTIMETER;
/// Vertical gap between two items and distance of the first barcode from the bottom edge, 0.4 cm.
pub const SPACING: f32 = 0.4 * POINTS_PER_CENTIMETER;
/// Extra room per item for the caption above and the value below the barcode, 4 mm.
pub const CAPTION_ALLOWANCE: f32 = 4.0 * POINTS_PER_MILLIMETER;
/// Distance between the top of the bars and the caption baseline, 1 mm.
pub const CAPTION_GAP: f32 = 1.0 * POINTS_PER_MILLIMETER;
/// Distance between the bottom of the bars and the baseline of the printed value, 3 mm.
pub const VALUE_DROP: f32 = 3.0 * POINTS_PER_MILLIMETER;
/// Font size of both text lines, in points.
pub const TEXT_SIZE: f32 = 8.0;

const POINTS_PER_MILLIMETER: f32 = 72.0 / 25.4;
const POINTS_PER_CENTIMETER: f32 = 72.0 / 2.54;

/// Converts centimeters to points, the unit every PDF coordinate is expressed in.
pub fn centimeters_to_points(centimeters: f32) -> f32 {
    centimeters * POINTS_PER_CENTIMETER
}

/// The x coordinate that centers content of the given width on the page. Content wider than
/// the page gets a negative offset and overflows on both sides equally.
pub fn centered_x(page_width: f32, content_width: f32) -> f32 {
    (page_width - content_width) / 2.0
}

/// The geometry of the single page, derived from a request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub page_width: f32,
    /// `item_height * item_count`, which is zero or negative for an inverted range.
    pub page_height: f32,
    pub item_height: f32,
    pub item_count: i64,
}

/// One barcode of the sheet together with where it is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeItem {
    pub number: i64,
    /// The string encoded in the bars and printed below them.
    pub value: String,
    /// Distance of the bottom of the bars from the bottom edge of the page.
    pub y_position: f32,
}

impl BarcodeItem {
    /// Baseline of the caption drawn above the bars.
    pub fn caption_baseline(&self) -> f32 {
        self.y_position + BARCODE_HEIGHT + CAPTION_GAP
    }

    /// Baseline of the value printed below the bars.
    pub fn value_baseline(&self) -> f32 {
        self.y_position - VALUE_DROP
    }
}

impl PageLayout {
    pub fn for_request(request: &GenerationRequest) -> PageLayout {
        let item_height = BARCODE_HEIGHT + SPACING + CAPTION_ALLOWANCE;
        let item_count = request.item_count();

        PageLayout {
            page_width: centimeters_to_points(request.width),
            page_height: item_height * item_count as f32,
            item_height,
            item_count,
        }
    }

    /// Plans every item in drawing order, starting one spacing unit above the bottom edge and
    /// moving up by one item height each time.
    pub fn items(&self, request: &GenerationRequest) -> Vec<BarcodeItem> {
        request
            .numbers()
            .enumerate()
            .map(|(index, number)| BarcodeItem {
                number,
                value: request.encoded_value(number),
                y_position: SPACING + self.item_height * index as f32,
            })
            .collect()
    }
}
