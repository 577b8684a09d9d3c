//! Country format registry.
//!
//! Static mapping from a country to the structural parameters of its plate: band placement,
//! colors, font and which content shape the assembler builds. Every number here is in base
//! pixels (scale 1); the render crate multiplies by the requested scale.

use crate::country::Country;
use crate::emblem::NationalEmblem;
use crate::error::Result;
use crate::regions::RegionSet;
use serde::{Deserialize, Serialize};

pub const EU_BLUE: &str = "#003399";
pub const EU_YELLOW: &str = "#FFCC00";
pub const AUSTRIAN_RED: &str = "#C8102E";
pub const UK_EV_GREEN: &str = "#00A651";

pub const EU_BAND_WIDTH: f64 = 45.0;
pub const UK_BAND_WIDTH: f64 = 40.0;
pub const RIGHT_BAND_WIDTH: f64 = 40.0;
pub const SEASONAL_INDICATOR_WIDTH: f64 = 40.0;
pub const AUSTRIAN_STRIPE_HEIGHT: f64 = 5.0;

/// Which left-hand band a country uses, before per-configuration flags are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BandPolicy {
    /// No supranational band at all.
    None,
    /// EU band: star ring plus the country code.
    Eu,
    /// EU band, replaced by the German tricolor for the military city code.
    EuOrMilitaryFlag,
    /// UK flag band and/or green EV band, each optional.
    UkOptional,
    /// Norwegian flag band, always shown.
    NorwayFlag,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RightBandSpec {
    pub width: f64,
    pub color: &'static str,
    pub text_color: &'static str,
    pub default_text: &'static str,
}

/// Horizontal stripes along the top and bottom edges.
///
/// Each edge carries `stripes_per_edge` stripes of height `stripe_height`, separated by gaps of
/// the same height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeSpec {
    pub color: &'static str,
    pub stripe_height: f64,
    pub stripes_per_edge: u32,
}

impl StripeSpec {
    /// Height of the stripe block on one edge, stripes plus the gaps between them.
    pub fn block_height(&self) -> f64 {
        let n = self.stripes_per_edge.max(1) as f64;
        self.stripe_height * (2.0 * n - 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlateFont {
    EuroPlate,
    EuroPlateCondensed,
    CharlesWright,
    Trafikkalfabetet,
    Tratex,
}

impl PlateFont {
    /// CSS font-family stack for the plate text.
    pub fn family(self) -> &'static str {
        match self {
            PlateFont::EuroPlate => "EuroPlate, sans-serif",
            PlateFont::EuroPlateCondensed => "'EuroPlate Condensed', EuroPlate, sans-serif",
            PlateFont::CharlesWright => "'Charles Wright', sans-serif",
            PlateFont::Trafikkalfabetet => "Trafikkalfabetet, sans-serif",
            PlateFont::Tratex => "Tratex, sans-serif",
        }
    }

    /// Primary face name, used to key font readiness.
    pub fn face(self) -> &'static str {
        match self {
            PlateFont::EuroPlate => "EuroPlate",
            PlateFont::EuroPlateCondensed => "EuroPlate Condensed",
            PlateFont::CharlesWright => "Charles Wright",
            PlateFont::Trafikkalfabetet => "Trafikkalfabetet",
            PlateFont::Tratex => "Tratex",
        }
    }
}

/// Content recipe selected for a country. The assembler turns it into a [`crate::PlateShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    /// Structured city code / letters / numbers (standard or military).
    German,
    /// District code, state coat of arms, serial.
    Austria,
    /// Leading run, national coat of arms, trailing run.
    SingleEmblem(NationalEmblem),
    /// National shield, text, optional canton shield.
    SwissDual,
    /// Fixed-length code or personalized text.
    Swedish,
    /// One freeform run.
    FreeText,
}

/// Constants of the closed-form compact width estimate.
///
/// One set for every shape so that the estimate never depends on which country is selected
/// beyond band and emblem presence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactMetrics {
    pub char_width: f64,
    pub emblem_width: f64,
    pub gap: f64,
    pub word_space: f64,
    pub padding: f64,
    pub min_width: f64,
}

pub const COMPACT_METRICS: CompactMetrics = CompactMetrics {
    char_width: 47.0,
    emblem_width: 50.0,
    gap: 16.0,
    word_space: 20.0,
    padding: 24.0,
    min_width: 340.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatProfile {
    pub country: Country,
    pub left_band: BandPolicy,
    /// Width of the left band when it is shown.
    pub left_band_width: f64,
    pub right_band: Option<RightBandSpec>,
    pub stripes: Option<StripeSpec>,
    pub font: PlateFont,
    pub font_color: &'static str,
    pub background_color: &'static str,
    pub shape: ShapeKind,
    pub regions: RegionSet,
    pub supports_seasonal: bool,
    pub compact: CompactMetrics,
}

/// Resolves the plate format for a supported country.
pub fn resolve_format(country: Country) -> FormatProfile {
    let mut profile = FormatProfile {
        country,
        left_band: BandPolicy::Eu,
        left_band_width: EU_BAND_WIDTH,
        right_band: None,
        stripes: None,
        font: PlateFont::EuroPlate,
        font_color: "#000000",
        background_color: "#FFFFFF",
        shape: ShapeKind::FreeText,
        regions: RegionSet::None,
        supports_seasonal: false,
        compact: COMPACT_METRICS,
    };

    match country {
        Country::Germany => {
            profile.left_band = BandPolicy::EuOrMilitaryFlag;
            profile.shape = ShapeKind::German;
            profile.regions = RegionSet::GermanStates;
            profile.supports_seasonal = true;
        }
        Country::Austria => {
            profile.stripes = Some(StripeSpec {
                color: AUSTRIAN_RED,
                stripe_height: AUSTRIAN_STRIPE_HEIGHT,
                stripes_per_edge: 2,
            });
            profile.font = PlateFont::EuroPlateCondensed;
            profile.shape = ShapeKind::Austria;
            profile.regions = RegionSet::AustrianStates;
        }
        Country::France => {
            profile.right_band = Some(RightBandSpec {
                width: RIGHT_BAND_WIDTH,
                color: EU_BLUE,
                text_color: "#FFFFFF",
                default_text: "75",
            });
        }
        Country::Italy => {
            profile.right_band = Some(RightBandSpec {
                width: RIGHT_BAND_WIDTH,
                color: EU_BLUE,
                text_color: "#FFFFFF",
                default_text: "RM",
            });
        }
        Country::Portugal => {
            profile.font_color = EU_BLUE;
            profile.right_band = Some(RightBandSpec {
                width: RIGHT_BAND_WIDTH,
                color: EU_YELLOW,
                text_color: "#000000",
                default_text: "",
            });
        }
        Country::Netherlands => profile.background_color = "#F7D117",
        Country::Luxembourg => profile.background_color = "#FCD116",
        Country::Cyprus => profile.background_color = "#F4C430",
        Country::Belgium => profile.font_color = "#C8102E",
        Country::Hungary => profile.shape = ShapeKind::SingleEmblem(NationalEmblem::Hungary),
        Country::Slovakia => profile.shape = ShapeKind::SingleEmblem(NationalEmblem::Slovakia),
        Country::Liechtenstein => {
            profile.left_band = BandPolicy::None;
            profile.left_band_width = 0.0;
            profile.font_color = "#FFFFFF";
            profile.background_color = "#000000";
            profile.shape = ShapeKind::SingleEmblem(NationalEmblem::Liechtenstein);
        }
        Country::Switzerland => {
            profile.left_band = BandPolicy::None;
            profile.left_band_width = 0.0;
            profile.shape = ShapeKind::SwissDual;
            profile.regions = RegionSet::SwissCantons;
        }
        Country::UnitedKingdom => {
            profile.left_band = BandPolicy::UkOptional;
            profile.left_band_width = UK_BAND_WIDTH;
            profile.font = PlateFont::CharlesWright;
        }
        Country::Norway => {
            profile.left_band = BandPolicy::NorwayFlag;
            profile.font = PlateFont::Trafikkalfabetet;
        }
        Country::Sweden => {
            profile.left_band = BandPolicy::None;
            profile.left_band_width = 0.0;
            profile.font = PlateFont::Tratex;
            profile.shape = ShapeKind::Swedish;
        }
        Country::Bulgaria
        | Country::Croatia
        | Country::CzechRepublic
        | Country::Denmark
        | Country::Estonia
        | Country::Finland
        | Country::Greece
        | Country::Ireland
        | Country::Latvia
        | Country::Lithuania
        | Country::Malta
        | Country::Poland
        | Country::Romania
        | Country::Slovenia
        | Country::Spain => {}
    }

    profile
}

/// Resolves a country code string. Unlisted codes fail with [`crate::Error::UnknownCountry`].
pub fn resolve_format_code(code: &str) -> Result<FormatProfile> {
    let country = code.parse::<Country>()?;
    Ok(resolve_format(country))
}
