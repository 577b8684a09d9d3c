//! The plate configuration record.
//!
//! The record is owned by the interactive shell. The layout core only ever borrows it, so every
//! editing helper here lives on the shell side of that boundary: they normalize form input the
//! same way the configurator form does before the value reaches the core.

use crate::country::Country;
use crate::error::{Error, Result};
use crate::registry::resolve_format;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// City code that switches a German plate to the military (Bundeswehr) format.
pub const MILITARY_CITY_CODE: &str = "Y";

pub const MAX_CITY_CODE_LEN: usize = 3;
pub const MAX_LETTERS_LEN: usize = 2;
pub const MAX_NUMBERS_LEN: usize = 4;
pub const MAX_CITY_NAME_LEN: usize = 35;
pub const MAX_RIGHT_BAND_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthMode {
    /// Fixed maximum physical width regardless of content.
    #[default]
    Standard,
    /// Shrink-to-fit, capped at the standard width.
    Compact,
}

impl WidthMode {
    pub fn as_str(self) -> &'static str {
        match self {
            WidthMode::Standard => "standard",
            WidthMode::Compact => "compact",
        }
    }
}

impl FromStr for WidthMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "standard" => Ok(WidthMode::Standard),
            "compact" => Ok(WidthMode::Compact),
            other => Err(Error::InvalidValue {
                field: "width",
                value: other.to_string(),
            }),
        }
    }
}

/// Rendering treatment of the plate surface. Affects shadows and texture, never layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlateStyle {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "3d-black-matte")]
    BlackMatte3d,
    #[serde(rename = "3d-black-glossy")]
    BlackGlossy3d,
    #[serde(rename = "3d-carbon-matte")]
    CarbonMatte3d,
    #[serde(rename = "3d-carbon-glossy")]
    CarbonGlossy3d,
}

impl PlateStyle {
    pub const ALL: [PlateStyle; 5] = [
        PlateStyle::Normal,
        PlateStyle::BlackMatte3d,
        PlateStyle::BlackGlossy3d,
        PlateStyle::CarbonMatte3d,
        PlateStyle::CarbonGlossy3d,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlateStyle::Normal => "normal",
            PlateStyle::BlackMatte3d => "3d-black-matte",
            PlateStyle::BlackGlossy3d => "3d-black-glossy",
            PlateStyle::CarbonMatte3d => "3d-carbon-matte",
            PlateStyle::CarbonGlossy3d => "3d-carbon-glossy",
        }
    }

    pub fn is_3d(self) -> bool {
        self != PlateStyle::Normal
    }

    pub fn is_glossy(self) -> bool {
        matches!(self, PlateStyle::BlackGlossy3d | PlateStyle::CarbonGlossy3d)
    }

    pub fn is_carbon(self) -> bool {
        matches!(self, PlateStyle::CarbonMatte3d | PlateStyle::CarbonGlossy3d)
    }
}

impl FromStr for PlateStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        PlateStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| Error::InvalidValue {
                field: "style",
                value: s.to_string(),
            })
    }
}

/// German plate suffix: `E` for electric vehicles, `H` for historic vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Suffix {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "E")]
    Electric,
    #[serde(rename = "H")]
    Historic,
}

impl Suffix {
    pub fn as_str(self) -> &'static str {
        match self {
            Suffix::None => "",
            Suffix::Electric => "E",
            Suffix::Historic => "H",
        }
    }
}

impl FromStr for Suffix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Ok(Suffix::None),
            "E" | "e" => Ok(Suffix::Electric),
            "H" | "h" => Ok(Suffix::Historic),
            other => Err(Error::InvalidValue {
                field: "suffix",
                value: other.to_string(),
            }),
        }
    }
}

/// Months during which a seasonal plate is valid.
///
/// `start_month > end_month` is legal and describes a window that wraps across the year end
/// (e.g. November to March).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalWindow {
    pub start_month: u32,
    pub end_month: u32,
}

impl SeasonalWindow {
    pub fn new(start_month: u32, end_month: u32) -> Self {
        Self {
            start_month,
            end_month,
        }
    }

    pub fn wraps_year_end(&self) -> bool {
        self.start_month > self.end_month
    }

    pub fn contains(&self, month: u32) -> bool {
        if self.wraps_year_end() {
            month >= self.start_month || month <= self.end_month
        } else {
            (self.start_month..=self.end_month).contains(&month)
        }
    }

    /// Two-digit labels as stamped on the plate, start first.
    pub fn labels(&self) -> (String, String) {
        (
            format!("{:02}", self.start_month),
            format!("{:02}", self.end_month),
        )
    }
}

impl fmt::Display for SeasonalWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_month, self.end_month)
    }
}

impl FromStr for SeasonalWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidValue {
            field: "season",
            value: s.to_string(),
        };
        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let start_month = start.trim().parse::<u32>().map_err(|_| invalid())?;
        let end_month = end.trim().parse::<u32>().map_err(|_| invalid())?;
        Ok(Self::new(start_month, end_month))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlateConfiguration {
    pub country: Country,
    pub width_mode: WidthMode,
    pub style: PlateStyle,

    /// Freeform plate text, authoritative for every country except Germany.
    pub plate_text: String,

    // Structured fields, authoritative for Germany.
    pub city_code: String,
    pub letters: String,
    pub numbers: String,
    pub suffix: Suffix,

    pub show_regional_emblem: bool,
    pub show_inspection_sticker: bool,
    pub show_flag_band: bool,
    pub is_electric_variant: bool,

    pub region: String,
    pub city_name: String,
    pub inspection_year: i32,
    pub inspection_month: u32,
    pub seasonal_window: Option<SeasonalWindow>,
    pub right_band_text: String,

    pub font_color: String,
    pub background_color: String,
}

impl Default for PlateConfiguration {
    fn default() -> Self {
        Self {
            country: Country::Germany,
            width_mode: WidthMode::Standard,
            style: PlateStyle::Normal,
            plate_text: "NIKLAS".to_string(),
            city_code: "N".to_string(),
            letters: "IK".to_string(),
            numbers: "745".to_string(),
            suffix: Suffix::None,
            show_regional_emblem: true,
            show_inspection_sticker: true,
            show_flag_band: true,
            is_electric_variant: false,
            region: "NW".to_string(),
            city_name: "Landeshauptstadt Düsseldorf".to_string(),
            inspection_year: 2027,
            inspection_month: 7,
            seasonal_window: None,
            right_band_text: String::new(),
            font_color: "#000000".to_string(),
            background_color: "#FFFFFF".to_string(),
        }
    }
}

impl PlateConfiguration {
    /// Switches country and resets colors and the right band code to the country defaults.
    pub fn with_country(mut self, country: Country) -> Self {
        let profile = resolve_format(country);
        self.country = country;
        self.font_color = profile.font_color.to_string();
        self.background_color = profile.background_color.to_string();
        self.right_band_text = profile
            .right_band
            .map(|band| band.default_text.to_string())
            .unwrap_or_default();
        if !profile.regions.contains(&self.region) {
            if let Some(code) = profile.regions.default_code() {
                self.region = code.to_string();
            }
        }
        self
    }

    pub fn uses_structured_fields(&self) -> bool {
        self.country == Country::Germany
    }

    pub fn is_military(&self) -> bool {
        self.uses_structured_fields() && self.city_code == MILITARY_CITY_CODE
    }

    pub fn set_city_code(&mut self, raw: &str) {
        self.city_code = upper_truncated(raw, MAX_CITY_CODE_LEN);
    }

    pub fn set_letters(&mut self, raw: &str) {
        self.letters = upper_truncated(raw, MAX_LETTERS_LEN);
    }

    pub fn set_numbers(&mut self, raw: &str) {
        self.numbers = raw
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(MAX_NUMBERS_LEN)
            .collect();
    }

    pub fn set_city_name(&mut self, raw: &str) {
        self.city_name = raw.chars().take(MAX_CITY_NAME_LEN).collect();
    }

    pub fn set_right_band_text(&mut self, raw: &str) {
        self.right_band_text = upper_truncated(raw, MAX_RIGHT_BAND_LEN);
    }

    pub fn set_plate_text(&mut self, raw: &str) {
        self.plate_text = raw.to_uppercase();
    }
}

fn upper_truncated(raw: &str, max_chars: usize) -> String {
    raw.to_uppercase().chars().take(max_chars).collect()
}
