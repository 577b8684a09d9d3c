#![forbid(unsafe_code)]

pub mod anchor;
pub mod compose;
pub mod geometry;
pub mod model;
pub mod reconcile;
pub mod settle;
pub mod svg;
pub mod text;

use crate::anchor::MeasurementAnchor;
use crate::geometry::{PlateGeometry, Reservations};
use crate::model::RenderTree;
use crate::reconcile::{LayoutResult, MeasurementSource, ReconcileInput};
use crate::settle::{LayoutSession, PassTicket, SettleGate};
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use plategen_core::{AssembledPlate, FormatProfile, PlateConfiguration};
use std::future::Future;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] plategen_core::Error),
    #[error("invalid render scale: {scale}")]
    InvalidScale { scale: f64 },
    #[error("configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    /// Multiplier applied to every base dimension (520×110 at scale 1).
    pub scale: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            scale: 1.0,
        }
    }
}

impl LayoutOptions {
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    fn checked_scale(&self) -> Result<f64> {
        if self.scale.is_finite() && self.scale > 0.0 {
            Ok(self.scale)
        } else {
            Err(Error::InvalidScale { scale: self.scale })
        }
    }
}

/// Everything derived from one configuration snapshot.
#[derive(Debug, Clone)]
pub struct LayoutedPlate {
    pub profile: FormatProfile,
    pub assembled: AssembledPlate,
    pub geometry: PlateGeometry,
    pub anchor: MeasurementAnchor,
    pub layout: LayoutResult,
    pub tree: RenderTree,
}

impl LayoutSession<LayoutedPlate> {
    /// Settles `plate`, keeping an estimated layout open for re-measurement.
    pub fn finish_plate(&mut self, ticket: PassTicket, plate: LayoutedPlate) -> bool {
        let source = plate.layout.source;
        self.finish_with(ticket, source, plate)
    }
}

/// Registry, assembler and geometry for one configuration, before any width is decided.
#[derive(Debug, Clone)]
pub struct PreparedPlate {
    pub config: PlateConfiguration,
    pub profile: FormatProfile,
    pub assembled: AssembledPlate,
    pub geometry: PlateGeometry,
    pub reservations: Reservations,
    pub anchor: MeasurementAnchor,
}

impl PreparedPlate {
    pub fn new(config: &PlateConfiguration, scale: f64) -> Self {
        let (profile, assembled) = plategen_core::assemble(config);
        let geometry = PlateGeometry::at_scale(scale, &profile.compact);
        let reservations = Reservations::from_chrome(&assembled.chrome, scale);
        let anchor = MeasurementAnchor::new(&assembled, &geometry);
        Self {
            config: config.clone(),
            profile,
            assembled,
            geometry,
            reservations,
            anchor,
        }
    }

    pub fn minimum_width(&self) -> f64 {
        reconcile::estimate_minimum_width(
            &self.assembled.tokens,
            &self.assembled.chrome,
            &self.profile.compact,
            self.geometry.scale,
        )
    }

    /// Reconciles against a natural width obtained elsewhere (e.g. an external measurer).
    pub fn reconcile_with(&self, natural_width: f64, source: MeasurementSource) -> LayoutResult {
        reconcile::reconcile(ReconcileInput {
            mode: self.config.width_mode,
            natural_width,
            minimum_width: self.minimum_width(),
            geometry: &self.geometry,
            reservations: &self.reservations,
            source,
        })
    }

    pub fn measured(&self, measurer: &dyn TextMeasurer) -> LayoutResult {
        self.reconcile_with(
            self.anchor.natural_width(measurer),
            MeasurementSource::Measured,
        )
    }

    /// Closed-form fallback, usable before the plate font is available.
    pub fn estimated(&self) -> LayoutResult {
        let natural = reconcile::estimate_content_width(
            &self.assembled.tokens,
            &self.profile.compact,
            self.geometry.scale,
        );
        self.reconcile_with(natural, MeasurementSource::Estimated)
    }

    pub fn finish(self, layout: LayoutResult, measurer: &dyn TextMeasurer) -> LayoutedPlate {
        let tree = compose::compose(
            &self.config,
            &self.profile,
            &self.assembled,
            &layout,
            &self.geometry,
            measurer,
        );
        LayoutedPlate {
            profile: self.profile,
            assembled: self.assembled,
            geometry: self.geometry,
            anchor: self.anchor,
            layout,
            tree,
        }
    }
}

/// Synchronous layout with the configured measurer, assuming its font data is available.
pub fn layout_plate(config: &PlateConfiguration, options: &LayoutOptions) -> Result<LayoutedPlate> {
    let prepared = PreparedPlate::new(config, options.checked_scale()?);
    let layout = prepared.measured(options.text_measurer.as_ref());
    Ok(prepared.finish(layout, options.text_measurer.as_ref()))
}

/// Layout from the closed-form estimate only.
pub fn estimate_plate(
    config: &PlateConfiguration,
    options: &LayoutOptions,
) -> Result<LayoutedPlate> {
    let prepared = PreparedPlate::new(config, options.checked_scale()?);
    let layout = prepared.estimated();
    Ok(prepared.finish(layout, options.text_measurer.as_ref()))
}

/// Measures once `gate` opens; falls back to the estimate when `deadline` resolves first.
pub async fn settle_plate<D>(
    config: &PlateConfiguration,
    options: &LayoutOptions,
    gate: &SettleGate,
    deadline: D,
) -> Result<LayoutedPlate>
where
    D: Future<Output = ()>,
{
    let prepared = PreparedPlate::new(config, options.checked_scale()?);
    let measurer = options.text_measurer.as_ref();
    let layout = settle::settle(
        gate,
        deadline,
        || prepared.measured(measurer),
        || prepared.estimated(),
    )
    .await;
    Ok(prepared.finish(layout, measurer))
}

/// Parses a camelCase JSON configuration; missing fields take their defaults.
pub fn configuration_from_json(json: &str) -> Result<PlateConfiguration> {
    Ok(serde_json::from_str(json)?)
}
