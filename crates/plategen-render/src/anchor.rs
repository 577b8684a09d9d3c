//! Unscaled description of the content row, used to obtain its natural width.
//!
//! Adjacent text and separator tokens share one flex item; emblem clusters stand alone. A
//! caller that measures text outside this crate (a browser, a shaping engine) can walk
//! [`MeasurementAnchor::items`] and feed its own widths to [`MeasurementAnchor::natural_width_with`].

use crate::geometry::PlateGeometry;
use crate::text::{TextMeasurer, TextStyle};
use plategen_core::{AssembledPlate, EmblemCluster, Token};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum AnchorItem {
    Text { text: String },
    Emblems { cluster: EmblemCluster },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementAnchor {
    pub items: Vec<AnchorItem>,
    pub style: TextStyle,
    pub gap: f64,
    pub scale: f64,
}

impl MeasurementAnchor {
    pub fn new(assembled: &AssembledPlate, geometry: &PlateGeometry) -> Self {
        let mut items = Vec::new();
        let mut run = String::new();
        for token in &assembled.tokens {
            match token {
                Token::Text { text, .. } => run.push_str(text),
                Token::Separator { separator } => run.push_str(separator.glyph()),
                Token::Emblems { cluster } => {
                    if !run.is_empty() {
                        items.push(AnchorItem::Text {
                            text: std::mem::take(&mut run),
                        });
                    }
                    items.push(AnchorItem::Emblems {
                        cluster: cluster.clone(),
                    });
                }
            }
        }
        if !run.is_empty() {
            items.push(AnchorItem::Text { text: run });
        }

        Self {
            items,
            style: geometry.text_style(assembled.font),
            gap: geometry.gap,
            scale: geometry.scale,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Width of one item before compression.
    pub fn item_width(&self, item: &AnchorItem, measurer: &dyn TextMeasurer) -> f64 {
        match item {
            AnchorItem::Text { text } => measurer.measure(text, &self.style).width,
            AnchorItem::Emblems { cluster } => cluster.width() * self.scale,
        }
    }

    pub fn natural_width(&self, measurer: &dyn TextMeasurer) -> f64 {
        self.natural_width_with(|item| self.item_width(item, measurer))
    }

    /// Sum of item widths plus the flex gaps between them.
    pub fn natural_width_with(&self, mut width_of: impl FnMut(&AnchorItem) -> f64) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        let items: f64 = self.items.iter().map(&mut width_of).sum();
        items + self.gap * (self.items.len() - 1) as f64
    }
}
