#![forbid(unsafe_code)]

use crate::render::{
    HeadlessError, LayoutOptions, LayoutSession, LayoutedPlate, RenderTree, SvgRenderOptions,
    render_plate_svg,
};
use image::ImageEncoder as _;
use plategen_core::{Country, PlateConfiguration};

/// Pixel ratio the preview is captured at before the export resize.
pub const EXPORT_PIXEL_RATIO: f32 = 3.0;
pub const EXPORT_WIDTH: u32 = 420;
pub const EXPORT_MIN_HEIGHT: u32 = 100;
pub const EXPORT_MAX_HEIGHT: u32 = 200;
const EXPORT_NAME_MAX_CHARS: usize = 20;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color for JPG rendering")]
    JpegBackground,
    #[error("JPG rendering requires an opaque background color (e.g. white)")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
    #[error("plate layout has not settled yet")]
    NotSettled,
}

impl From<plategen_render::Error> for RasterError {
    fn from(err: plategen_render::Error) -> Self {
        RasterError::Headless(HeadlessError::Render(err))
    }
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

/// Fixed-size PNG export settings.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub pixel_ratio: f32,
    pub width: u32,
    pub min_height: u32,
    pub max_height: u32,
    pub background: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: EXPORT_PIXEL_RATIO,
            width: EXPORT_WIDTH,
            min_height: EXPORT_MIN_HEIGHT,
            max_height: EXPORT_MAX_HEIGHT,
            background: None,
        }
    }
}

impl ExportOptions {
    /// Output height for a capture of `width × height` pixels.
    pub fn target_height(&self, width: u32, height: u32) -> u32 {
        if width == 0 || height == 0 {
            return self.min_height;
        }
        let aspect = f64::from(width) / f64::from(height);
        let h = (f64::from(self.width) / aspect).round();
        (h as u32).clamp(self.min_height, self.max_height)
    }
}

#[derive(Debug, Clone)]
pub struct ExportedPlate {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

pub fn render_png(
    config: &PlateConfiguration,
    layout_options: &LayoutOptions,
    svg_options: &SvgRenderOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_svg(config, layout_options, svg_options)?;
    svg_to_png(&svg, raster)
}

pub fn render_jpeg(
    config: &PlateConfiguration,
    layout_options: &LayoutOptions,
    svg_options: &SvgRenderOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_svg(config, layout_options, svg_options)?;
    svg_to_jpeg(&svg, raster)
}

pub fn render_pdf(
    config: &PlateConfiguration,
    layout_options: &LayoutOptions,
    svg_options: &SvgRenderOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_svg(config, layout_options, svg_options)?;
    svg_to_pdf(&svg)
}

/// Lays out `config` synchronously and exports the result at the fixed export size.
pub fn export_png(
    config: &PlateConfiguration,
    layout_options: &LayoutOptions,
    svg_options: &SvgRenderOptions,
    export: &ExportOptions,
) -> Result<ExportedPlate> {
    let plate = plategen_render::layout_plate(config, layout_options)?;
    export_tree_png(config, &plate.tree, svg_options, export)
}

/// Exports the settled plate of an interactive session.
///
/// Fails with [`RasterError::NotSettled`] while a newer reconciliation pass is in flight.
pub fn export_settled_png(
    config: &PlateConfiguration,
    session: &LayoutSession<LayoutedPlate>,
    svg_options: &SvgRenderOptions,
    export: &ExportOptions,
) -> Result<ExportedPlate> {
    let plate = session.settled().ok_or(RasterError::NotSettled)?;
    export_tree_png(config, &plate.tree, svg_options, export)
}

pub fn export_tree_png(
    config: &PlateConfiguration,
    tree: &RenderTree,
    svg_options: &SvgRenderOptions,
    export: &ExportOptions,
) -> Result<ExportedPlate> {
    let svg = render_plate_svg(tree, svg_options);
    let pixmap = svg_to_pixmap(&svg, export.pixel_ratio, export.background.as_deref())?;
    let (src_w, src_h) = (pixmap.width(), pixmap.height());

    // tiny-skia stores premultiplied alpha; `image` expects straight RGBA.
    let mut rgba = Vec::with_capacity((src_w as usize) * (src_h as usize) * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let capture =
        image::RgbaImage::from_raw(src_w, src_h, rgba).ok_or(RasterError::PixmapAlloc)?;

    let width = export.width.max(1);
    let height = export.target_height(src_w, src_h);
    let resized =
        image::imageops::resize(&capture, width, height, image::imageops::FilterType::Triangle);

    let mut png = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png)
        .write_image(resized.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .map_err(|_| RasterError::PngEncode)?;

    let file_name = export_file_name(config);
    tracing::info!(
        file_name = %file_name,
        width,
        height,
        bytes = png.len(),
        "exported plate"
    );
    Ok(ExportedPlate {
        file_name,
        width,
        height,
        png,
    })
}

/// `Plate<name>.png` where `<name>` keeps only ASCII letters and digits, at most 20 of them.
///
/// German plates are named from their structured fields; others from the free text, falling
/// back to the structured fields when the text is empty.
pub fn export_file_name(config: &PlateConfiguration) -> String {
    let structured = format!("{}{}{}", config.city_code, config.letters, config.numbers);
    let base = if config.country == Country::Germany {
        format!("{structured}{}", config.suffix.as_str())
    } else if config.plate_text.is_empty() {
        structured
    } else {
        config.plate_text.clone()
    };
    let name: String = base
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(EXPORT_NAME_MAX_CHARS)
        .collect();
    format!("Plate{name}.png")
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let bg = options.background.as_deref().unwrap_or("white");
    let Some(color) = parse_tiny_skia_color(bg) else {
        return Err(RasterError::JpegBackground);
    };
    if color.alpha() != 1.0 {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }

    let pixmap = svg_to_pixmap(svg, options.scale, Some(bg))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // The background is opaque, so every alpha byte is 255 and can be dropped.
    let rgba = pixmap.data();
    let mut rgb = vec![0u8; (w as usize) * (h as usize) * 3];
    for (src, dst) in rgba.chunks_exact(4).zip(rgb.chunks_exact_mut(3)) {
        dst.copy_from_slice(&src[..3]);
    }

    let mut out = Vec::new();
    let mut enc =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = PLATE_FALLBACK_FONT.to_string();

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}

// Used when none of the plate faces is installed.
const PLATE_FALLBACK_FONT: &str = "DejaVu Sans";

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = PLATE_FALLBACK_FONT.to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // The emitter always writes `width`/`height` matching its viewBox.
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;

    if let Some(color) = background.and_then(parse_tiny_skia_color) {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => Some(tiny_skia::Color::from_rgba8(
            hex1(bytes[0])?,
            hex1(bytes[1])?,
            hex1(bytes[2])?,
            255,
        )),
        6 => Some(tiny_skia::Color::from_rgba8(
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            255,
        )),
        8 => Some(tiny_skia::Color::from_rgba8(
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            hex2(&bytes[6..8])?,
        )),
        _ => None,
    }
}
