//! Parameters of the decorative elements placed inside the content block.
//!
//! Drawing itself happens in the render crate; this module only decides *what* each emblem
//! shows and how large its box is, which is all the layout needs.

use crate::regions::RegionSet;
use serde::Serialize;

/// Base edge length of a round regional seal (German state sticker).
pub const REGIONAL_SEAL_SIZE: f64 = 42.0;
/// Base edge length of a coat of arms (Austrian states, national shields, cantons).
pub const COAT_OF_ARMS_SIZE: f64 = 50.0;
/// The inspection sticker is drawn at this fraction of the regional seal.
pub const INSPECTION_STICKER_FACTOR: f64 = 0.85;
/// Vertical gap between stacked emblems of one cluster.
pub const CLUSTER_STACK_GAP: f64 = 2.0;
/// Height of the caption line under an Austrian coat of arms.
pub const ARMS_CAPTION_HEIGHT: f64 = 9.0;

const CAPTION_BASE_FONT_SIZE: f64 = 8.0;

/// Sticker colors for a rotating six-year cycle, starting with 2025.
const INSPECTION_YEAR_COLORS: [&str; 6] = [
    "#FF5F00", // orange
    "#0066B3", // blue
    "#FFCC00", // yellow
    "#8B4513", // brown
    "#FF69B4", // pink
    "#009640", // green
];
const INSPECTION_COLOR_BASE_YEAR: i32 = 2025;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NationalEmblem {
    Hungary,
    Slovakia,
    Liechtenstein,
    Switzerland,
}

impl NationalEmblem {
    pub fn label(self) -> &'static str {
        match self {
            NationalEmblem::Hungary => "Hungarian coat of arms",
            NationalEmblem::Slovakia => "Slovak coat of arms",
            NationalEmblem::Liechtenstein => "Liechtenstein coat of arms",
            NationalEmblem::Switzerland => "Swiss coat of arms",
        }
    }

    /// Dominant field color, used by the simplified shield drawing.
    pub fn field_color(self) -> &'static str {
        match self {
            NationalEmblem::Hungary => "#CE2939",
            NationalEmblem::Slovakia => "#EE1C25",
            NationalEmblem::Liechtenstein => "#002B7F",
            NationalEmblem::Switzerland => "#DA291C",
        }
    }
}

/// The periodic technical inspection sticker (HU).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionSticker {
    pub year: i32,
    pub month: u32,
}

impl InspectionSticker {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Dial rotation in degrees that brings the due month to the top.
    ///
    /// The dial artwork has 12 at the top, so month 12 needs no rotation and every other month
    /// turns the dial counter-clockwise by 30° per month. Out-of-range months are not clamped.
    pub fn rotation_degrees(&self) -> f64 {
        if self.month == 12 {
            0.0
        } else {
            -(self.month as f64) * 30.0
        }
    }

    pub fn color(&self) -> &'static str {
        let idx = (self.year - INSPECTION_COLOR_BASE_YEAR).rem_euclid(6) as usize;
        INSPECTION_YEAR_COLORS[idx]
    }

    /// Last two digits of the year.
    pub fn year_label(&self) -> String {
        format!("{:02}", self.year.rem_euclid(100))
    }

    pub fn size(&self) -> f64 {
        REGIONAL_SEAL_SIZE * INSPECTION_STICKER_FACTOR
    }
}

/// A regional emblem: state seal, state coat of arms or canton shield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalEmblem {
    pub set: RegionSet,
    pub code: String,
    /// Full region name when the code is known to the set.
    pub name: Option<String>,
    /// City name printed on German state seals.
    pub city: Option<String>,
}

impl RegionalEmblem {
    pub fn new(set: RegionSet, code: &str, city: Option<&str>) -> Self {
        let name = set.name(code);
        if name.is_none() && set != RegionSet::None {
            tracing::warn!(region = code, ?set, "unknown region code; emblem drawn without name");
        }
        Self {
            set,
            code: code.to_string(),
            name: name.map(str::to_string),
            city: city.filter(|c| !c.trim().is_empty()).map(str::to_string),
        }
    }

    /// Edge length of the emblem artwork, excluding any caption.
    pub fn size(&self) -> f64 {
        match self.set {
            RegionSet::GermanStates => REGIONAL_SEAL_SIZE,
            RegionSet::AustrianStates | RegionSet::SwissCantons | RegionSet::None => {
                COAT_OF_ARMS_SIZE
            }
        }
    }

    /// Height including the state-name caption drawn under Austrian arms.
    pub fn height(&self) -> f64 {
        match self.set {
            RegionSet::AustrianStates => self.size() + CLUSTER_STACK_GAP + ARMS_CAPTION_HEIGHT,
            _ => self.size(),
        }
    }

    /// Font size for the region name arc on a German seal, stepping down with length.
    pub fn region_caption_font_size(&self) -> f64 {
        let len = self
            .name
            .as_deref()
            .map(|n| n.chars().count())
            .unwrap_or(0);
        let factor = if len > 18 {
            0.45
        } else if len > 12 {
            0.55
        } else if len > 8 {
            0.7
        } else {
            0.9
        };
        CAPTION_BASE_FONT_SIZE * factor
    }

    /// Font size for the city arc on a German seal, stepping down with length.
    pub fn city_caption_font_size(&self) -> f64 {
        let len = self.city.as_deref().map(|c| c.chars().count()).unwrap_or(0);
        let factor = if len > 20 {
            0.45
        } else if len > 15 {
            0.55
        } else if len > 10 {
            0.65
        } else if len > 7 {
            0.8
        } else {
            1.0
        };
        CAPTION_BASE_FONT_SIZE * factor
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Emblem {
    InspectionSticker(InspectionSticker),
    Regional(RegionalEmblem),
    National { emblem: NationalEmblem },
    /// Bundeswehr cross on military plates.
    Military,
}

impl Emblem {
    pub fn width(&self) -> f64 {
        match self {
            Emblem::InspectionSticker(sticker) => sticker.size(),
            Emblem::Regional(regional) => regional.size(),
            Emblem::National { .. } => COAT_OF_ARMS_SIZE,
            Emblem::Military => REGIONAL_SEAL_SIZE,
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            Emblem::Regional(regional) => regional.height(),
            other => other.width(),
        }
    }
}

/// Emblems stacked vertically in one slot of the content row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmblemCluster {
    pub emblems: Vec<Emblem>,
}

impl EmblemCluster {
    pub fn new(emblems: Vec<Emblem>) -> Self {
        Self { emblems }
    }

    pub fn is_empty(&self) -> bool {
        self.emblems.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.emblems.iter().map(Emblem::width).fold(0.0, f64::max)
    }

    pub fn height(&self) -> f64 {
        let n = self.emblems.len();
        if n == 0 {
            return 0.0;
        }
        let stacked: f64 = self.emblems.iter().map(Emblem::height).sum();
        stacked + CLUSTER_STACK_GAP * (n - 1) as f64
    }
}
