#![forbid(unsafe_code)]

//! `plategen` is a headless European license plate configurator.
//!
//! A [`PlateConfiguration`] resolves to a format profile, an assembled token sequence, a
//! reconciled plate width and finally a render tree that can be emitted as SVG.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`plategen::render`)
//! - `raster`: enable PNG/JPG/PDF output and the fixed-size PNG export via pure-Rust SVG
//!   rasterization/conversion

pub use plategen_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use plategen_render::model::RenderTree;
    pub use plategen_render::reconcile::{LayoutResult, MeasurementSource};
    pub use plategen_render::settle::{LayoutSession, MeasureKey, SettleGate, readiness};
    pub use plategen_render::svg::{SvgRenderOptions, render_plate_svg};
    pub use plategen_render::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
    pub use plategen_render::{
        LayoutOptions, LayoutedPlate, PreparedPlate, configuration_from_json, estimate_plate,
        layout_plate, settle_plate,
    };

    use plategen_core::PlateConfiguration;

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Config(#[from] plategen_core::Error),
        #[error(transparent)]
        Render(#[from] plategen_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several plates can
    /// be inlined into one document without their `<defs>` ids colliding.
    ///
    /// Unsupported characters become `-`; ids that do not start with an ASCII letter get a
    /// `p-` prefix.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "p-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 2);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
            out.push(if ok { ch } else { '-' });
        }

        if !out.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            out.insert_str(0, "p-");
        }
        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "p" {
            return "p-untitled".to_string();
        }
        out.to_string()
    }

    /// Lays out `config` and emits its SVG in one call.
    pub fn render_svg(
        config: &PlateConfiguration,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let plate = layout_plate(config, layout_options)?;
        Ok(render_plate_svg(&plate.tree, svg_options))
    }

    /// Strict variant for shareable links: rejects unknown keys and malformed values.
    pub fn render_fragment_svg(
        fragment: &str,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let config = plategen_core::parse_fragment(fragment)?;
        render_svg(&config, layout_options, svg_options)
    }

    /// Bundles layout and SVG options for repeated headless rendering.
    ///
    /// All work is CPU-bound; nothing here performs I/O or needs an executor.
    #[derive(Clone, Default)]
    pub struct HeadlessRenderer {
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_scale(mut self, scale: f64) -> Self {
            self.layout = self.layout.with_scale(scale);
            self
        }

        pub fn layout(&self, config: &PlateConfiguration) -> Result<LayoutedPlate> {
            Ok(layout_plate(config, &self.layout)?)
        }

        pub fn render_svg(&self, config: &PlateConfiguration) -> Result<String> {
            render_svg(config, &self.layout, &self.svg)
        }

        pub fn render_svg_with_id(&self, config: &PlateConfiguration, id: &str) -> Result<String> {
            let mut svg = self.svg.clone();
            svg.svg_id = Some(sanitize_svg_id(id));
            render_svg(config, &self.layout, &svg)
        }

        #[cfg(feature = "raster")]
        pub fn render_png(
            &self,
            config: &PlateConfiguration,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_png(config, &self.layout, &self.svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg(
            &self,
            config: &PlateConfiguration,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_jpeg(config, &self.layout, &self.svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf(&self, config: &PlateConfiguration) -> raster::Result<Vec<u8>> {
            raster::render_pdf(config, &self.layout, &self.svg)
        }

        #[cfg(feature = "raster")]
        pub fn export_png(
            &self,
            config: &PlateConfiguration,
            export: &raster::ExportOptions,
        ) -> raster::Result<raster::ExportedPlate> {
            raster::export_png(config, &self.layout, &self.svg, export)
        }
    }
}
