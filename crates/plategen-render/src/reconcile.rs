//! Width reconciliation: natural content width + plate geometry → plate width and compression.
//!
//! The plate never grows past its standard width. When content does not fit, it is squeezed
//! horizontally down to [`MIN_COMPRESSION_RATIO`]; anything beyond that overflows.

use crate::geometry::{PlateGeometry, Reservations};
use plategen_core::{Chrome, CompactMetrics, TokenSequence, WidthMode};
use serde::Serialize;

pub const MIN_COMPRESSION_RATIO: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasurementSource {
    /// Natural width came from a text measurer with the plate font available.
    Measured,
    /// Closed-form estimate, used before the font is ready or after a readiness timeout.
    Estimated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub plate_width: f64,
    pub plate_height: f64,
    /// Horizontal scale applied to the content block, in `[0.65, 1.0]`.
    pub compression_ratio: f64,
    pub content_natural_width: f64,
    pub available_width: f64,
    pub minimum_width: f64,
    pub source: MeasurementSource,
}

impl LayoutResult {
    /// Inverse of the compression ratio, applied to emblem clusters so they keep their size.
    pub fn emblem_counter_scale(&self) -> f64 {
        1.0 / self.compression_ratio
    }

    pub fn is_compressed(&self) -> bool {
        self.compression_ratio < 1.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReconcileInput<'a> {
    pub mode: WidthMode,
    pub natural_width: f64,
    pub minimum_width: f64,
    pub geometry: &'a PlateGeometry,
    pub reservations: &'a Reservations,
    pub source: MeasurementSource,
}

/// `max(0.65, available / natural)` when the content overflows, else 1.
pub fn compression_ratio(available_width: f64, natural_width: f64) -> f64 {
    if natural_width > available_width && natural_width > 0.0 {
        (available_width / natural_width).max(MIN_COMPRESSION_RATIO)
    } else {
        1.0
    }
}

pub fn reconcile(input: ReconcileInput<'_>) -> LayoutResult {
    let geometry = input.geometry;
    let reserved = input.reservations.reserved_width(geometry);
    let maximum = geometry.maximum_width;
    let minimum = input.minimum_width.min(maximum);
    let natural = input.natural_width.max(0.0);

    let (plate_width, compression_ratio) = match input.mode {
        WidthMode::Standard => (maximum, compression_ratio(maximum - reserved, natural)),
        WidthMode::Compact => {
            let required = reserved + natural;
            if required <= maximum {
                (required.max(minimum), 1.0)
            } else {
                (maximum, compression_ratio(maximum - reserved, natural))
            }
        }
    };

    let result = LayoutResult {
        plate_width,
        plate_height: geometry.height,
        compression_ratio,
        content_natural_width: natural,
        available_width: plate_width - reserved,
        minimum_width: minimum,
        source: input.source,
    };
    tracing::debug!(
        mode = input.mode.as_str(),
        natural,
        reserved,
        plate_width,
        compression_ratio,
        "reconciled plate width"
    );
    result
}

/// Closed-form estimate of the content width from character and emblem counts.
///
/// One emblem allowance (plus its gap) when any emblem is shown, however many clusters the
/// shape places. The word space is added only when a secondary run exists, and the
/// inter-block gap once.
pub fn estimate_content_width(tokens: &TokenSequence, metrics: &CompactMetrics, scale: f64) -> f64 {
    let primary = tokens.primary_char_count() as f64;
    let secondary = tokens.secondary_char_count() as f64;

    let mut width = (primary + secondary) * metrics.char_width;
    if tokens.has_emblems() {
        width += metrics.emblem_width + metrics.gap;
    }
    if secondary > 0.0 {
        width += metrics.word_space;
    }
    width += metrics.gap;
    width * scale
}

/// Smallest compact plate width for this content, floored at the metric minimum.
pub fn estimate_minimum_width(
    tokens: &TokenSequence,
    chrome: &Chrome,
    metrics: &CompactMetrics,
    scale: f64,
) -> f64 {
    let reservations = Reservations::from_chrome(chrome, scale);
    let width = reservations.left_band
        + reservations.right_band
        + reservations.seasonal
        + metrics.padding * scale
        + estimate_content_width(tokens, metrics, scale);
    width.max(metrics.min_width * scale)
}
