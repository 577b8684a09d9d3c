use crate::reconcile::LayoutResult;
use crate::text::TextStyle;
use plategen_core::{EmblemCluster, LeftBand, PlateStyle, SeasonalWindow};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// One flex item of the content row. `x` is relative to [`ContentBlock::origin_x`] and
/// unscaled; the block's compression applies on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ContentItem {
    Text {
        x: f64,
        width: f64,
        baseline_y: f64,
        text: String,
    },
    Emblems {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        /// Horizontal scale that cancels the block compression.
        counter_scale: f64,
        cluster: EmblemCluster,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    /// Region the content is centered in (available width).
    pub rect: Rect,
    /// Left edge of the compressed content row.
    pub origin_x: f64,
    pub compression_ratio: f64,
    pub natural_width: f64,
    pub style: TextStyle,
    pub font_family: &'static str,
    pub items: Vec<ContentItem>,
}

impl ContentBlock {
    /// Width actually covered after compression; may exceed `rect.width` past the ratio floor.
    pub fn rendered_width(&self) -> f64 {
        self.natural_width * self.compression_ratio
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum RenderNode {
    Stripe {
        rect: Rect,
        color: &'static str,
    },
    LeftBand {
        rect: Rect,
        band: LeftBand,
        font_size: f64,
    },
    RightBand {
        rect: Rect,
        color: &'static str,
        text_color: &'static str,
        text: String,
        font_size: f64,
    },
    Content(ContentBlock),
    SeasonalIndicator {
        rect: Rect,
        window: SeasonalWindow,
        font_size: f64,
    },
}

/// Surface treatment derived from the plate style. Never affects geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    pub style: PlateStyle,
    pub shadow: bool,
    pub glossy: bool,
    pub carbon: bool,
    /// White outer rim drawn around flat plates.
    pub rim: bool,
}

impl Surface {
    pub fn from_style(style: PlateStyle) -> Self {
        Self {
            style,
            shadow: style.is_3d(),
            glossy: style.is_glossy(),
            carbon: style.is_carbon(),
            rim: !style.is_3d(),
        }
    }
}

/// Absolutely positioned plate, in pixels at the requested scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTree {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub border: f64,
    pub corner_radius: f64,
    pub font_family: &'static str,
    pub font_color: String,
    pub background_color: String,
    pub surface: Surface,
    pub layout: LayoutResult,
    pub nodes: Vec<RenderNode>,
}

impl RenderTree {
    pub fn content(&self) -> Option<&ContentBlock> {
        self.nodes.iter().find_map(|node| match node {
            RenderNode::Content(block) => Some(block),
            _ => None,
        })
    }

    pub fn left_band(&self) -> Option<(&Rect, &LeftBand)> {
        self.nodes.iter().find_map(|node| match node {
            RenderNode::LeftBand { rect, band, .. } => Some((rect, band)),
            _ => None,
        })
    }

    pub fn seasonal_indicator(&self) -> Option<&Rect> {
        self.nodes.iter().find_map(|node| match node {
            RenderNode::SeasonalIndicator { rect, .. } => Some(rect),
            _ => None,
        })
    }
}
