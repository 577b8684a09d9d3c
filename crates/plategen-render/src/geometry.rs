//! Plate dimensions and the widths reserved around the content block.
//!
//! Everything is stored already multiplied by the render scale.

use crate::text::TextStyle;
use plategen_core::registry::SEASONAL_INDICATOR_WIDTH;
use plategen_core::{Chrome, CompactMetrics, PlateFont};
use serde::Serialize;

pub const PLATE_WIDTH: f64 = 520.0;
pub const PLATE_HEIGHT: f64 = 110.0;
pub const PLATE_BORDER: f64 = 3.0;
pub const CONTENT_PADDING: f64 = 12.0;
pub const CONTENT_GAP: f64 = 16.0;
pub const PLATE_FONT_SIZE: f64 = 105.0;
pub const PLATE_LETTER_SPACING: f64 = 2.0;
pub const CORNER_RADIUS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateGeometry {
    pub scale: f64,
    pub maximum_width: f64,
    pub minimum_width: f64,
    pub height: f64,
    pub border: f64,
    pub padding: f64,
    /// Flex gap between content items.
    pub gap: f64,
    pub font_size: f64,
    pub letter_spacing: f64,
    pub corner_radius: f64,
}

impl PlateGeometry {
    pub fn at_scale(scale: f64, compact: &CompactMetrics) -> Self {
        Self {
            scale,
            maximum_width: PLATE_WIDTH * scale,
            minimum_width: compact.min_width * scale,
            height: PLATE_HEIGHT * scale,
            border: PLATE_BORDER * scale,
            padding: CONTENT_PADDING * scale,
            gap: CONTENT_GAP * scale,
            font_size: PLATE_FONT_SIZE * scale,
            letter_spacing: PLATE_LETTER_SPACING * scale,
            corner_radius: CORNER_RADIUS * scale,
        }
    }

    pub fn text_style(&self, font: PlateFont) -> TextStyle {
        TextStyle {
            font,
            font_size: self.font_size,
            letter_spacing: self.letter_spacing,
        }
    }

    pub fn inner_height(&self) -> f64 {
        self.height - 2.0 * self.border
    }
}

/// Chrome widths taken out of the plate before content is placed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservations {
    pub left_band: f64,
    pub right_band: f64,
    pub seasonal: f64,
}

impl Reservations {
    pub fn from_chrome(chrome: &Chrome, scale: f64) -> Self {
        Self {
            left_band: chrome.left_band_width * scale,
            right_band: chrome.right_band_width() * scale,
            seasonal: if chrome.seasonal.is_some() {
                SEASONAL_INDICATOR_WIDTH * scale
            } else {
                0.0
            },
        }
    }

    /// `leftBand + rightBand + seasonal + 2×border + 2×padding`.
    pub fn reserved_width(&self, geometry: &PlateGeometry) -> f64 {
        self.left_band
            + self.right_band
            + self.seasonal
            + 2.0 * geometry.border
            + 2.0 * geometry.padding
    }
}
