//! Plate composer: absolute placement of chrome around the reconciled content block.
//!
//! Chrome (bands, stripes, the seasonal indicator) is laid out at its fixed size; only the
//! content block is subject to compression.

use crate::anchor::{AnchorItem, MeasurementAnchor};
use crate::geometry::PlateGeometry;
use crate::model::{ContentBlock, ContentItem, Rect, RenderNode, RenderTree, Surface};
use crate::reconcile::LayoutResult;
use crate::text::TextMeasurer;
use plategen_core::registry::SEASONAL_INDICATOR_WIDTH;
use plategen_core::{AssembledPlate, FormatProfile, LeftBand, PlateConfiguration};

const LEFT_BAND_FONT_SIZE: f64 = 18.0;
const RIGHT_BAND_FONT_SIZE: f64 = 16.0;
const SEASONAL_FONT_SIZE: f64 = 14.0;
/// Baseline offset below the vertical center, as a fraction of the font size.
const BASELINE_SHIFT: f64 = 0.35;

pub fn compose(
    config: &PlateConfiguration,
    profile: &FormatProfile,
    assembled: &AssembledPlate,
    layout: &LayoutResult,
    geometry: &PlateGeometry,
    measurer: &dyn TextMeasurer,
) -> RenderTree {
    let scale = geometry.scale;
    let width = layout.plate_width;
    let height = geometry.height;
    let border = geometry.border;
    let inner_height = geometry.inner_height();
    let chrome = &assembled.chrome;

    let mut nodes = Vec::new();

    // Stripes span the full inner width; the left band sits between the stripe blocks.
    let mut band_inset = 0.0;
    if let Some(stripes) = chrome.stripes {
        let h = stripes.stripe_height * scale;
        for i in 0..stripes.stripes_per_edge {
            let offset = i as f64 * 2.0 * h;
            nodes.push(RenderNode::Stripe {
                rect: Rect::new(border, border + offset, width - 2.0 * border, h),
                color: stripes.color,
            });
            nodes.push(RenderNode::Stripe {
                rect: Rect::new(border, height - border - h - offset, width - 2.0 * border, h),
                color: stripes.color,
            });
        }
        band_inset = stripes.block_height() * scale;
    }

    let left_band_width = chrome.left_band_width * scale;
    if chrome.left_band != LeftBand::None {
        nodes.push(RenderNode::LeftBand {
            rect: Rect::new(
                border,
                border + band_inset,
                left_band_width,
                inner_height - 2.0 * band_inset,
            ),
            band: chrome.left_band.clone(),
            font_size: LEFT_BAND_FONT_SIZE * scale,
        });
    }

    let right_band_width = chrome.right_band_width() * scale;
    if let Some(band) = &chrome.right_band {
        nodes.push(RenderNode::RightBand {
            rect: Rect::new(
                width - border - right_band_width,
                border,
                right_band_width,
                inner_height,
            ),
            color: band.spec.color,
            text_color: band.spec.text_color,
            text: band.text.clone(),
            font_size: RIGHT_BAND_FONT_SIZE * scale,
        });
    }

    let block = Rect::new(
        border + left_band_width + geometry.padding,
        border,
        layout.available_width,
        inner_height,
    );
    nodes.push(RenderNode::Content(compose_content(
        assembled, layout, geometry, measurer, block,
    )));

    if let Some(window) = chrome.seasonal {
        let seasonal_width = SEASONAL_INDICATOR_WIDTH * scale;
        nodes.push(RenderNode::SeasonalIndicator {
            rect: Rect::new(
                width - border - right_band_width - seasonal_width,
                border,
                seasonal_width,
                inner_height,
            ),
            window,
            font_size: SEASONAL_FONT_SIZE * scale,
        });
    }

    RenderTree {
        width,
        height,
        scale,
        border,
        corner_radius: geometry.corner_radius,
        font_family: profile.font.family(),
        font_color: config.font_color.clone(),
        background_color: config.background_color.clone(),
        surface: Surface::from_style(config.style),
        layout: *layout,
        nodes,
    }
}

fn compose_content(
    assembled: &AssembledPlate,
    layout: &LayoutResult,
    geometry: &PlateGeometry,
    measurer: &dyn TextMeasurer,
    block: Rect,
) -> ContentBlock {
    let anchor = MeasurementAnchor::new(assembled, geometry);
    let ratio = layout.compression_ratio;
    let counter_scale = layout.emblem_counter_scale();
    let center_y = geometry.height / 2.0;

    let mut items = Vec::with_capacity(anchor.items.len());
    let mut x = 0.0;
    for (idx, item) in anchor.items.iter().enumerate() {
        if idx > 0 {
            x += anchor.gap;
        }
        let item_width = anchor.item_width(item, measurer);
        match item {
            AnchorItem::Text { text } => items.push(ContentItem::Text {
                x,
                width: item_width,
                baseline_y: center_y + geometry.font_size * BASELINE_SHIFT,
                text: text.clone(),
            }),
            AnchorItem::Emblems { cluster } => {
                let cluster_height = cluster.height() * geometry.scale;
                items.push(ContentItem::Emblems {
                    x,
                    y: center_y - cluster_height / 2.0,
                    width: item_width,
                    height: cluster_height,
                    counter_scale,
                    cluster: cluster.clone(),
                });
            }
        }
        x += item_width;
    }
    let natural_width = x;

    ContentBlock {
        rect: block,
        origin_x: block.x + (block.width - natural_width * ratio) / 2.0,
        compression_ratio: ratio,
        natural_width,
        style: anchor.style,
        font_family: assembled.font.family(),
        items,
    }
}
