#![forbid(unsafe_code)]

//! License plate configuration model, format registry and content assembler (headless).
//!
//! Design goals:
//! - pure functions of explicit inputs (no ambient state, no rendering backend)
//! - one tagged shape per plate format, resolved once per configuration
//! - deterministic, serializable intermediate results

pub mod assemble;
pub mod config;
pub mod country;
pub mod emblem;
pub mod error;
pub mod hash;
pub mod regions;
pub mod registry;

pub use assemble::{
    AssembledPlate, Chrome, LeftBand, PlateShape, RightBand, Separator, TextRole, Token,
    TokenSequence, assemble_tokens,
};
pub use config::{PlateConfiguration, PlateStyle, SeasonalWindow, Suffix, WidthMode};
pub use country::Country;
pub use emblem::{Emblem, EmblemCluster, InspectionSticker, NationalEmblem, RegionalEmblem};
pub use error::{Error, Result};
pub use hash::{decode_fragment, encode_fragment, parse_fragment};
pub use regions::RegionSet;
pub use registry::{
    BandPolicy, COMPACT_METRICS, CompactMetrics, FormatProfile, PlateFont, RightBandSpec,
    ShapeKind, StripeSpec, resolve_format, resolve_format_code,
};

/// Resolves the profile for `config.country` and assembles its content in one step.
pub fn assemble(config: &PlateConfiguration) -> (FormatProfile, AssembledPlate) {
    let profile = resolve_format(config.country);
    let assembled = assemble_tokens(config, &profile);
    (profile, assembled)
}

#[cfg(test)]
mod tests;
