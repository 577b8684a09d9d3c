use crate::model::{ContentBlock, ContentItem, Rect, RenderNode, RenderTree};
use crate::reconcile::MeasurementSource;
use plategen_core::emblem::{CLUSTER_STACK_GAP, COAT_OF_ARMS_SIZE};
use plategen_core::registry::{EU_BLUE, EU_YELLOW, UK_EV_GREEN};
use plategen_core::{
    Emblem, EmblemCluster, InspectionSticker, LeftBand, NationalEmblem, RegionSet, RegionalEmblem,
    SeasonalWindow,
};
use std::fmt::Write as _;

/// Edge of the square the EU star ring is drawn in, base pixels.
pub const STAR_RING_BOX: f64 = 36.0;
pub const STAR_RING_RADIUS: f64 = 13.0;
pub const STAR_COUNT: usize = 12;
const STAR_OUTER_RADIUS: f64 = 2.4;
const STAR_INNER_RADIUS: f64 = 0.95;

const UK_BLUE: &str = "#012169";
const UK_RED: &str = "#C8102E";
const NORWAY_RED: &str = "#BA0C2F";
const NORWAY_BLUE: &str = "#00205B";
const FLAG_BLACK: &str = "#000000";
const FLAG_RED: &str = "#DD0000";
const FLAG_GOLD: &str = "#FFCE00";

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `id`, also used as prefix for ids under `<defs>`.
    pub svg_id: Option<String>,
    /// Extra space around the plate, e.g. to keep a 3D drop shadow inside the viewBox.
    pub viewbox_padding: f64,
    /// When true, annotate the root element with layout results (`data-*` attributes).
    pub include_layout_metadata: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            svg_id: None,
            viewbox_padding: 0.0,
            include_layout_metadata: true,
        }
    }
}

pub fn render_plate_svg(tree: &RenderTree, options: &SvgRenderOptions) -> String {
    let id = options.svg_id.as_deref().unwrap_or("plate");
    let id = escape_attr(id);
    let pad = options.viewbox_padding.max(0.0);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{id}" width="{w}" height="{h}" viewBox="{vx} {vy} {w} {h}""#,
        w = fmt(tree.width + 2.0 * pad),
        h = fmt(tree.height + 2.0 * pad),
        vx = fmt(-pad),
        vy = fmt(-pad),
    );
    if options.include_layout_metadata {
        let _ = write!(
            &mut out,
            r#" data-plate-width="{}" data-compression="{}" data-counter-scale="{}" data-source="{}" data-style="{}""#,
            fmt(tree.layout.plate_width),
            fmt_ratio(tree.layout.compression_ratio),
            fmt_ratio(tree.layout.emblem_counter_scale()),
            match tree.layout.source {
                MeasurementSource::Measured => "measured",
                MeasurementSource::Estimated => "estimated",
            },
            tree.surface.style.as_str(),
        );
    }
    out.push('>');

    render_defs(&mut out, tree, &id);

    let filter = if tree.surface.shadow {
        format!(r#" filter="url(#{id}-shadow)""#)
    } else {
        String::new()
    };
    let _ = write!(&mut out, r#"<g class="plate"{filter}>"#);

    let half = tree.border / 2.0;
    if tree.surface.rim {
        let _ = write!(
            &mut out,
            r##"<rect class="plate-rim" x="0" y="0" width="{}" height="{}" rx="{}" fill="#FFFFFF"/>"##,
            fmt(tree.width),
            fmt(tree.height),
            fmt(tree.corner_radius),
        );
    }
    let _ = write!(
        &mut out,
        r#"<rect class="plate-body" x="{x}" y="{x}" width="{w}" height="{h}" rx="{rx}" fill="{fill}" stroke="{stroke}" stroke-width="{sw}"/>"#,
        x = fmt(half),
        w = fmt(tree.width - tree.border),
        h = fmt(tree.height - tree.border),
        rx = fmt((tree.corner_radius - half).max(0.0)),
        fill = escape_attr(&tree.background_color),
        stroke = escape_attr(&tree.font_color),
        sw = fmt(tree.border),
    );
    if tree.surface.carbon {
        let _ = write!(
            &mut out,
            r#"<rect class="plate-carbon" x="{x}" y="{x}" width="{w}" height="{h}" rx="{rx}" fill="url(#{id}-carbon)" opacity="0.18"/>"#,
            x = fmt(tree.border),
            w = fmt(tree.width - 2.0 * tree.border),
            h = fmt(tree.height - 2.0 * tree.border),
            rx = fmt((tree.corner_radius - tree.border).max(0.0)),
        );
    }

    for node in &tree.nodes {
        match node {
            RenderNode::Stripe { rect, color } => {
                let _ = write!(
                    &mut out,
                    r#"<rect class="plate-stripe" {} fill="{}"/>"#,
                    rect_attrs(rect),
                    color
                );
            }
            RenderNode::LeftBand {
                rect,
                band,
                font_size,
            } => render_left_band(&mut out, rect, band, *font_size, tree.scale),
            RenderNode::RightBand {
                rect,
                color,
                text_color,
                text,
                font_size,
            } => {
                let _ = write!(
                    &mut out,
                    r#"<g class="plate-right-band"><rect {} fill="{}"/>"#,
                    rect_attrs(rect),
                    color
                );
                if !text.is_empty() {
                    let _ = write!(
                        &mut out,
                        r#"<text x="{}" y="{}" text-anchor="middle" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
                        fmt(rect.center_x()),
                        fmt(rect.center_y() + font_size * 0.35),
                        escape_attr(tree.font_family),
                        fmt(*font_size),
                        text_color,
                        escape_xml(text)
                    );
                }
                out.push_str("</g>");
            }
            RenderNode::Content(block) => render_content(&mut out, tree, block),
            RenderNode::SeasonalIndicator {
                rect,
                window,
                font_size,
            } => render_seasonal(&mut out, tree, rect, window, *font_size),
        }
    }

    if tree.surface.glossy {
        let _ = write!(
            &mut out,
            r#"<rect class="plate-gloss" x="0" y="0" width="{}" height="{}" rx="{}" fill="url(#{id}-gloss)" pointer-events="none"/>"#,
            fmt(tree.width),
            fmt(tree.height),
            fmt(tree.corner_radius),
        );
    }

    out.push_str("</g></svg>");
    out
}

fn render_defs(out: &mut String, tree: &RenderTree, id: &str) {
    let surface = tree.surface;
    if !(surface.shadow || surface.glossy || surface.carbon) {
        return;
    }
    out.push_str("<defs>");
    if surface.shadow {
        let _ = write!(
            out,
            r##"<filter id="{id}-shadow" x="-10%" y="-20%" width="120%" height="160%"><feDropShadow dx="0" dy="{}" stdDeviation="{}" flood-color="#000000" flood-opacity="0.35"/></filter>"##,
            fmt(4.0 * tree.scale),
            fmt(3.0 * tree.scale),
        );
    }
    if surface.glossy {
        let _ = write!(
            out,
            r##"<linearGradient id="{id}-gloss" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="#FFFFFF" stop-opacity="0.45"/><stop offset="0.5" stop-color="#FFFFFF" stop-opacity="0.08"/><stop offset="1" stop-color="#FFFFFF" stop-opacity="0"/></linearGradient>"##,
        );
    }
    if surface.carbon {
        let cell = 6.0 * tree.scale;
        let _ = write!(
            out,
            r##"<pattern id="{id}-carbon" width="{c}" height="{c}" patternUnits="userSpaceOnUse"><rect width="{c}" height="{c}" fill="#1A1A1A"/><path d="M0 0L{h} {h}M{h} {c}L{c} {h}" stroke="#4D4D4D" stroke-width="{sw}"/></pattern>"##,
            c = fmt(cell),
            h = fmt(cell / 2.0),
            sw = fmt(cell / 4.0),
        );
    }
    out.push_str("</defs>");
}

fn render_left_band(out: &mut String, rect: &Rect, band: &LeftBand, font_size: f64, scale: f64) {
    out.push_str(r#"<g class="plate-left-band">"#);
    match band {
        LeftBand::None => {}
        LeftBand::Eu { code } => {
            let _ = write!(out, r#"<rect {} fill="{}"/>"#, rect_attrs(rect), EU_BLUE);
            let box_size = STAR_RING_BOX * scale;
            let bx = rect.center_x() - box_size / 2.0;
            let by = rect.y + 8.0 * scale;
            let _ = write!(
                out,
                r#"<g class="eu-stars" transform="translate({} {}) scale({})">"#,
                fmt(bx),
                fmt(by),
                fmt(scale)
            );
            for points in star_ring() {
                let _ = write!(out, r#"<polygon points="{points}" fill="{EU_YELLOW}"/>"#);
            }
            out.push_str("</g>");
            band_code(out, rect, code, font_size, scale);
        }
        LeftBand::GermanFlag => {
            let third = rect.height / 3.0;
            for (i, color) in [FLAG_BLACK, FLAG_RED, FLAG_GOLD].into_iter().enumerate() {
                let stripe = Rect::new(rect.x, rect.y + i as f64 * third, rect.width, third);
                let _ = write!(out, r#"<rect {} fill="{color}"/>"#, rect_attrs(&stripe));
            }
        }
        LeftBand::Uk { flag, electric } => {
            let fill = if *electric { UK_EV_GREEN } else { UK_BLUE };
            let _ = write!(out, r#"<rect {} fill="{fill}"/>"#, rect_attrs(rect));
            if *flag {
                let w = rect.width - 8.0 * scale;
                let flag_rect = Rect::new(rect.x + 4.0 * scale, rect.y + 8.0 * scale, w, w * 0.6);
                union_flag(out, &flag_rect, scale);
            }
            band_code(out, rect, "UK", font_size, scale);
        }
        LeftBand::NorwayFlag => {
            let _ = write!(out, r#"<rect {} fill="{}"/>"#, rect_attrs(rect), EU_BLUE);
            let w = rect.width - 10.0 * scale;
            let flag_rect = Rect::new(rect.x + 5.0 * scale, rect.y + 10.0 * scale, w, w * 0.73);
            nordic_cross(out, &flag_rect, NORWAY_RED, NORWAY_BLUE);
            band_code(out, rect, "N", font_size, scale);
        }
    }
    out.push_str("</g>");
}

fn band_code(out: &mut String, rect: &Rect, code: &str, font_size: f64, scale: f64) {
    let _ = write!(
        out,
        r##"<text class="band-code" x="{}" y="{}" text-anchor="middle" font-family="EuroPlate, sans-serif" font-size="{}" fill="#FFFFFF">{}</text>"##,
        fmt(rect.center_x()),
        fmt(rect.bottom() - 10.0 * scale),
        fmt(font_size),
        escape_xml(code)
    );
}

fn union_flag(out: &mut String, r: &Rect, scale: f64) {
    let _ = write!(out, r#"<rect {} fill="{UK_BLUE}"/>"#, rect_attrs(r));
    let diag = format!(
        "M{} {}L{} {}M{} {}L{} {}",
        fmt(r.x),
        fmt(r.y),
        fmt(r.right()),
        fmt(r.bottom()),
        fmt(r.right()),
        fmt(r.y),
        fmt(r.x),
        fmt(r.bottom())
    );
    let _ = write!(
        out,
        r##"<path d="{diag}" stroke="#FFFFFF" stroke-width="{}"/><path d="{diag}" stroke="{UK_RED}" stroke-width="{}"/>"##,
        fmt(3.0 * scale),
        fmt(1.2 * scale)
    );
    let cross = format!(
        "M{} {}H{}M{} {}V{}",
        fmt(r.x),
        fmt(r.center_y()),
        fmt(r.right()),
        fmt(r.center_x()),
        fmt(r.y),
        fmt(r.bottom())
    );
    let _ = write!(
        out,
        r##"<path d="{cross}" stroke="#FFFFFF" stroke-width="{}"/><path d="{cross}" stroke="{UK_RED}" stroke-width="{}"/>"##,
        fmt(5.0 * scale),
        fmt(3.0 * scale)
    );
}

fn nordic_cross(out: &mut String, r: &Rect, field: &str, cross: &str) {
    let _ = write!(out, r#"<rect {} fill="{field}"/>"#, rect_attrs(r));
    // Vertical bar sits at 6/16 of the width (Nordic cross proportions).
    let cx = r.x + r.width * 6.0 / 16.0;
    let cy = r.center_y();
    let outer = r.height * 4.0 / 16.0;
    let inner = r.height * 2.0 / 16.0;
    for (w, color) in [(outer, "#FFFFFF"), (inner, cross)] {
        let _ = write!(
            out,
            r#"<path d="M{} {}H{}M{} {}V{}" stroke="{color}" stroke-width="{}"/>"#,
            fmt(r.x),
            fmt(cy),
            fmt(r.right()),
            fmt(cx),
            fmt(r.y),
            fmt(r.bottom()),
            fmt(w)
        );
    }
}

fn render_content(out: &mut String, tree: &RenderTree, block: &ContentBlock) {
    let _ = write!(
        out,
        r#"<g class="plate-content" transform="translate({} 0) scale({} 1)">"#,
        fmt(block.origin_x),
        fmt_ratio(block.compression_ratio)
    );
    for item in &block.items {
        match item {
            ContentItem::Text {
                x,
                baseline_y,
                text,
                ..
            } => {
                let _ = write!(
                    out,
                    r#"<text x="{}" y="{}" font-family="{}" font-size="{}" letter-spacing="{}" fill="{}" xml:space="preserve">{}</text>"#,
                    fmt(*x),
                    fmt(*baseline_y),
                    escape_attr(block.font_family),
                    fmt(block.style.font_size),
                    fmt(block.style.letter_spacing),
                    escape_attr(&tree.font_color),
                    escape_xml(text)
                );
            }
            ContentItem::Emblems {
                x,
                y,
                width,
                counter_scale,
                cluster,
                ..
            } => {
                let cx = x + width / 2.0;
                let _ = write!(
                    out,
                    r#"<g class="emblem-cluster" transform="translate({cx} 0) scale({s} 1) translate({ncx} 0)">"#,
                    cx = fmt(cx),
                    s = fmt_ratio(*counter_scale),
                    ncx = fmt(-cx),
                );
                render_cluster(out, cluster, cx, *y, tree.scale, &tree.font_color);
                out.push_str("</g>");
            }
        }
    }
    out.push_str("</g>");
}

fn render_cluster(
    out: &mut String,
    cluster: &EmblemCluster,
    cx: f64,
    top: f64,
    scale: f64,
    ink: &str,
) {
    let mut y = top;
    for emblem in &cluster.emblems {
        let w = emblem.width() * scale;
        let h = emblem.height() * scale;
        let r = Rect::new(cx - w / 2.0, y, w, h);
        match emblem {
            Emblem::InspectionSticker(sticker) => render_inspection_sticker(out, sticker, &r),
            Emblem::Regional(regional) => render_regional(out, regional, &r, scale, ink),
            Emblem::National { emblem } => render_national(out, *emblem, &r),
            Emblem::Military => render_military(out, &r),
        }
        y += h + CLUSTER_STACK_GAP * scale;
    }
}

fn render_inspection_sticker(out: &mut String, sticker: &InspectionSticker, r: &Rect) {
    let (cx, cy) = (r.center_x(), r.center_y());
    let radius = r.width / 2.0;
    let _ = write!(
        out,
        r##"<g class="inspection-sticker" data-month="{month}"><circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="#000000" stroke-width="{sw}"/>"##,
        month = sticker.month,
        cx = fmt(cx),
        cy = fmt(cy),
        r = fmt(radius),
        fill = sticker.color(),
        sw = fmt(radius * 0.04),
    );
    let _ = write!(
        out,
        r#"<g class="inspection-dial" transform="rotate({} {} {})">"#,
        fmt(sticker.rotation_degrees()),
        fmt(cx),
        fmt(cy)
    );
    let number_size = radius * 0.32;
    for month in 1..=12u32 {
        let angle = (month as f64 * 30.0).to_radians();
        let nx = cx + angle.sin() * radius * 0.74;
        let ny = cy - angle.cos() * radius * 0.74 + number_size * 0.35;
        let _ = write!(
            out,
            r##"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="{}" fill="#000000">{}</text>"##,
            fmt(nx),
            fmt(ny),
            fmt(number_size),
            month
        );
    }
    out.push_str("</g>");
    let _ = write!(
        out,
        r##"<path d="M{} {}l{} {}h{}z" fill="#000000"/>"##,
        fmt(cx),
        fmt(r.y + radius * 0.2),
        fmt(-radius * 0.08),
        fmt(-radius * 0.16),
        fmt(radius * 0.16)
    );
    let _ = write!(
        out,
        r##"<text class="inspection-year" x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-weight="bold" font-size="{}" fill="#000000">{}</text></g>"##,
        fmt(cx),
        fmt(cy + radius * 0.16),
        fmt(radius * 0.45),
        sticker.year_label()
    );
}

fn render_regional(out: &mut String, regional: &RegionalEmblem, r: &Rect, scale: f64, ink: &str) {
    match regional.set {
        RegionSet::GermanStates => {
            let (cx, cy) = (r.center_x(), r.center_y());
            let radius = r.width / 2.0;
            let _ = write!(
                out,
                r##"<g class="regional-seal" data-region="{}"><circle cx="{}" cy="{}" r="{}" fill="#FFFFFF" stroke="{}" stroke-width="{}"/>"##,
                escape_attr(&regional.code),
                fmt(cx),
                fmt(cy),
                fmt(radius),
                escape_attr(ink),
                fmt(radius * 0.05)
            );
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                fmt(cx),
                fmt(cy),
                fmt(radius * 0.55),
                escape_attr(ink),
                fmt(radius * 0.03)
            );
            if let Some(name) = &regional.name {
                caption(
                    out,
                    cx,
                    r.y + radius * 0.38,
                    regional.region_caption_font_size() * scale,
                    name,
                    ink,
                );
            }
            if let Some(city) = &regional.city {
                caption(
                    out,
                    cx,
                    r.bottom() - radius * 0.22,
                    regional.city_caption_font_size() * scale,
                    city,
                    ink,
                );
            }
            out.push_str("</g>");
        }
        RegionSet::AustrianStates | RegionSet::SwissCantons | RegionSet::None => {
            let size = regional.size() * scale;
            let arms = Rect::new(r.x, r.y, size, size);
            let _ = write!(
                out,
                r#"<g class="regional-arms" data-region="{}">"#,
                escape_attr(&regional.code)
            );
            let field = if regional.set == RegionSet::AustrianStates {
                "#C8102E"
            } else {
                "#FFFFFF"
            };
            shield(out, &arms, field, ink, scale);
            if regional.set == RegionSet::SwissCantons {
                caption(
                    out,
                    arms.center_x(),
                    arms.center_y() + 4.0 * scale,
                    12.0 * scale,
                    &regional.code,
                    ink,
                );
            } else if let Some(name) = &regional.name {
                caption(
                    out,
                    arms.center_x(),
                    r.bottom() - 1.0 * scale,
                    8.0 * scale * 0.8,
                    name,
                    ink,
                );
            }
            out.push_str("</g>");
        }
    }
}

fn render_national(out: &mut String, emblem: NationalEmblem, r: &Rect) {
    let _ = write!(
        out,
        r#"<g class="national-arms"><title>{}</title>"#,
        escape_xml(emblem.label())
    );
    let scale = r.width / COAT_OF_ARMS_SIZE;
    shield(out, r, emblem.field_color(), "#000000", scale);
    if emblem == NationalEmblem::Switzerland {
        let arm = r.width * 0.14;
        let len = r.width * 0.36;
        let (cx, cy) = (r.center_x(), r.y + r.height * 0.45);
        let _ = write!(
            out,
            r##"<path d="M{} {}h{}v{}h{}v{}h{}v{}h{}v{}h{}v{}h{}z" fill="#FFFFFF"/>"##,
            fmt(cx - arm / 2.0),
            fmt(cy - len / 2.0),
            fmt(arm),
            fmt((len - arm) / 2.0),
            fmt((len - arm) / 2.0),
            fmt(arm),
            fmt(-(len - arm) / 2.0),
            fmt((len - arm) / 2.0),
            fmt(-arm),
            fmt(-(len - arm) / 2.0),
            fmt(-(len - arm) / 2.0),
            fmt(-arm),
            fmt((len - arm) / 2.0),
        );
    }
    out.push_str("</g>");
}

fn render_military(out: &mut String, r: &Rect) {
    let (cx, cy) = (r.center_x(), r.center_y());
    let s = r.width / 2.0;
    let w = s * 0.35;
    let _ = write!(
        out,
        r##"<g class="military-cross"><path d="M{} {}L{} {}L{} {}L{} {}L{} {}L{} {}L{} {}L{} {}L{} {}L{} {}L{} {}L{} {}Z" fill="#000000" stroke="#FFFFFF" stroke-width="{}"/></g>"##,
        fmt(cx - w),
        fmt(cy - s),
        fmt(cx + w),
        fmt(cy - s),
        fmt(cx + w * 0.6),
        fmt(cy - w * 0.6),
        fmt(cx + s),
        fmt(cy - w),
        fmt(cx + s),
        fmt(cy + w),
        fmt(cx + w * 0.6),
        fmt(cy + w * 0.6),
        fmt(cx + w),
        fmt(cy + s),
        fmt(cx - w),
        fmt(cy + s),
        fmt(cx - w * 0.6),
        fmt(cy + w * 0.6),
        fmt(cx - s),
        fmt(cy + w),
        fmt(cx - s),
        fmt(cy - w),
        fmt(cx - w * 0.6),
        fmt(cy - w * 0.6),
        fmt(s * 0.06),
    );
}

fn render_seasonal(
    out: &mut String,
    tree: &RenderTree,
    rect: &Rect,
    window: &SeasonalWindow,
    font_size: f64,
) {
    let (start, end) = window.labels();
    let ink = escape_attr(&tree.font_color);
    let inset = 4.0 * tree.scale;
    let frame = Rect::new(
        rect.x + inset,
        rect.y + inset,
        rect.width - 2.0 * inset,
        rect.height - 2.0 * inset,
    );
    let _ = write!(
        out,
        r#"<g class="seasonal-indicator" data-window="{window}"><rect {} fill="none" stroke="{ink}" stroke-width="{}"/>"#,
        rect_attrs(&frame),
        fmt(1.5 * tree.scale)
    );
    let _ = write!(
        out,
        r#"<path d="M{} {}H{}" stroke="{ink}" stroke-width="{}"/>"#,
        fmt(frame.x),
        fmt(frame.center_y()),
        fmt(frame.right()),
        fmt(tree.scale)
    );
    for (label, y) in [
        (start, frame.y + frame.height * 0.25),
        (end, frame.y + frame.height * 0.75),
    ] {
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="{}" font-size="{}" fill="{ink}">{label}</text>"#,
            fmt(frame.center_x()),
            fmt(y + font_size * 0.35),
            escape_attr(tree.font_family),
            fmt(font_size)
        );
    }
    out.push_str("</g>");
}

fn shield(out: &mut String, r: &Rect, fill: &str, stroke: &str, scale: f64) {
    let shoulder = r.y + r.height * 0.55;
    let _ = write!(
        out,
        r#"<path d="M{x} {y}H{right}V{shoulder}Q{right} {curve} {cx} {bottom}Q{x} {curve} {x} {shoulder}Z" fill="{fill}" stroke="{stroke}" stroke-width="{sw}"/>"#,
        x = fmt(r.x),
        y = fmt(r.y),
        right = fmt(r.right()),
        shoulder = fmt(shoulder),
        curve = fmt(r.y + r.height * 0.85),
        cx = fmt(r.center_x()),
        bottom = fmt(r.bottom()),
        fill = escape_attr(fill),
        stroke = escape_attr(stroke),
        sw = fmt(scale),
    );
}

fn caption(out: &mut String, x: f64, y: f64, font_size: f64, text: &str, ink: &str) {
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="{}" fill="{}">{}</text>"#,
        fmt(x),
        fmt(y),
        fmt(font_size),
        escape_attr(ink),
        escape_xml(text)
    );
}

/// Points of one five-pointed star, rounded to 1/1000.
pub fn star_points(cx: f64, cy: f64, outer: f64, inner: f64) -> String {
    let mut out = String::new();
    for i in 0..10 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = (i as f64 * 36.0 - 90.0).to_radians();
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(
            &mut out,
            "{},{}",
            fmt(round3(cx + radius * angle.cos())),
            fmt(round3(cy + radius * angle.sin()))
        );
    }
    out
}

/// Twelve stars on a ring, in the coordinates of a [`STAR_RING_BOX`] square.
pub fn star_ring() -> Vec<String> {
    let center = STAR_RING_BOX / 2.0;
    (0..STAR_COUNT)
        .map(|i| {
            let angle = (i as f64 * 360.0 / STAR_COUNT as f64).to_radians();
            star_points(
                center + STAR_RING_RADIUS * angle.sin(),
                center - STAR_RING_RADIUS * angle.cos(),
                STAR_OUTER_RADIUS,
                STAR_INNER_RADIUS,
            )
        })
        .collect()
}

fn rect_attrs(r: &Rect) -> String {
    format!(
        r#"x="{}" y="{}" width="{}" height="{}""#,
        fmt(r.x),
        fmt(r.y),
        fmt(r.width),
        fmt(r.height)
    )
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn fmt(v: f64) -> String {
    // Avoid `-0` and float noise in attribute values.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = round3(v).to_string();
    if s == "-0" { "0".to_string() } else { s }
}

/// Ratios keep more precision so that `ratio × counter-scale` stays 1 after parsing.
fn fmt_ratio(v: f64) -> String {
    if !v.is_finite() {
        return "1".to_string();
    }
    let s = ((v * 1e6).round() / 1e6).to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_xml(text)
}
