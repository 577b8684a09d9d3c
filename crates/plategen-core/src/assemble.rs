//! Content assembler: configuration + format profile → ordered tokens and chrome.
//!
//! The shape is chosen from the country alone (plus the German military city code). The
//! assembler never looks at the text to decide which recipe applies.

use crate::config::{PlateConfiguration, SeasonalWindow, Suffix};
use crate::country::Country;
use crate::emblem::{Emblem, EmblemCluster, InspectionSticker, NationalEmblem, RegionalEmblem};
use crate::regions::RegionSet;
use crate::registry::{
    BandPolicy, FormatProfile, PlateFont, RightBandSpec, ShapeKind, StripeSpec,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextRole {
    /// The leading run (German city code, Austrian district, freeform text).
    Primary,
    /// Everything after the first emblem slot or separator.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Separator {
    Space,
    HairSpace,
    Dash,
}

impl Separator {
    pub fn glyph(self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::HairSpace => "\u{200A}",
            Separator::Dash => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Token {
    Text { text: String, role: TextRole },
    Emblems { cluster: EmblemCluster },
    Separator { separator: Separator },
}

impl Token {
    fn text(text: impl Into<String>, role: TextRole) -> Self {
        Token::Text {
            text: text.into(),
            role,
        }
    }

    fn separator(separator: Separator) -> Self {
        Token::Separator { separator }
    }
}

/// Left-to-right renderable units of the content block. Immutable once assembled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TokenSequence(Vec<Token>);

impl TokenSequence {
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_emblems(&self) -> bool {
        self.0.iter().any(|t| matches!(t, Token::Emblems { .. }))
    }

    pub fn emblem_clusters(&self) -> impl Iterator<Item = &EmblemCluster> {
        self.0.iter().filter_map(|t| match t {
            Token::Emblems { cluster } => Some(cluster),
            _ => None,
        })
    }

    fn char_count(&self, wanted: TextRole) -> usize {
        self.0
            .iter()
            .map(|t| match t {
                Token::Text { text, role } if *role == wanted => text.chars().count(),
                _ => 0,
            })
            .sum()
    }

    pub fn primary_char_count(&self) -> usize {
        self.char_count(TextRole::Primary)
    }

    pub fn secondary_char_count(&self) -> usize {
        self.char_count(TextRole::Secondary)
    }

    /// Text content with separator glyphs, emblems omitted.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for token in &self.0 {
            match token {
                Token::Text { text, .. } => out.push_str(text),
                Token::Separator { separator } => out.push_str(separator.glyph()),
                Token::Emblems { .. } => {}
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Resolved content recipe, carrying only the fields its shape uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "shape")]
pub enum PlateShape {
    GermanStandard {
        city_code: String,
        letters: String,
        numbers: String,
        suffix: Suffix,
        /// Numeric city codes join letters and numbers with a dash.
        diplomatic: bool,
    },
    GermanMilitary {
        letters: String,
        numbers: String,
    },
    Austria {
        district: String,
        serial: String,
        state: Option<String>,
    },
    SingleEmblem {
        emblem: NationalEmblem,
        leading: String,
        trailing: String,
    },
    SwissDual {
        text: String,
        canton: Option<String>,
    },
    Swedish {
        text: String,
        personalized: bool,
    },
    FreeText {
        text: String,
    },
}

/// Concrete left band after configuration flags are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "band")]
pub enum LeftBand {
    None,
    Eu { code: String },
    GermanFlag,
    Uk { flag: bool, electric: bool },
    NorwayFlag,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RightBand {
    pub spec: RightBandSpec,
    pub text: String,
}

/// Fixed-position elements around the content block, in base pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chrome {
    pub left_band: LeftBand,
    pub left_band_width: f64,
    pub right_band: Option<RightBand>,
    pub stripes: Option<StripeSpec>,
    pub seasonal: Option<SeasonalWindow>,
}

impl Chrome {
    pub fn right_band_width(&self) -> f64 {
        self.right_band.as_ref().map(|b| b.spec.width).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledPlate {
    pub country: Country,
    pub font: PlateFont,
    pub shape: PlateShape,
    pub tokens: TokenSequence,
    pub chrome: Chrome,
}

/// Builds the token sequence and chrome for a configuration.
pub fn assemble_tokens(config: &PlateConfiguration, profile: &FormatProfile) -> AssembledPlate {
    let shape = resolve_shape(config, profile);
    let tokens = build_tokens(&shape, config, profile);
    let chrome = resolve_chrome(config, profile);
    tracing::debug!(
        country = %profile.country,
        tokens = tokens.len(),
        left_band_width = chrome.left_band_width,
        "assembled plate content"
    );
    AssembledPlate {
        country: profile.country,
        font: profile.font,
        shape,
        tokens,
        chrome,
    }
}

fn resolve_shape(config: &PlateConfiguration, profile: &FormatProfile) -> PlateShape {
    match profile.shape {
        ShapeKind::German if config.is_military() => PlateShape::GermanMilitary {
            letters: config.letters.clone(),
            numbers: config.numbers.clone(),
        },
        ShapeKind::German => PlateShape::GermanStandard {
            city_code: config.city_code.clone(),
            letters: config.letters.clone(),
            numbers: config.numbers.clone(),
            suffix: config.suffix,
            diplomatic: !config.city_code.is_empty()
                && config.city_code.chars().all(|c| c.is_ascii_digit()),
        },
        ShapeKind::Austria => {
            let (district, serial) = split_leading_word(&config.plate_text);
            PlateShape::Austria {
                district,
                serial,
                state: config
                    .show_regional_emblem
                    .then(|| config.region.clone()),
            }
        }
        ShapeKind::SingleEmblem(emblem) => {
            let (leading, trailing) = split_leading_word(&config.plate_text);
            PlateShape::SingleEmblem {
                emblem,
                leading,
                trailing,
            }
        }
        ShapeKind::SwissDual => PlateShape::SwissDual {
            text: config.plate_text.trim().to_string(),
            canton: config
                .show_regional_emblem
                .then(|| config.region.clone()),
        },
        ShapeKind::Swedish => {
            let compact: String = config
                .plate_text
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if is_swedish_registration_code(&compact) {
                PlateShape::Swedish {
                    text: compact,
                    personalized: false,
                }
            } else {
                PlateShape::Swedish {
                    text: config.plate_text.trim().to_string(),
                    personalized: true,
                }
            }
        }
        ShapeKind::FreeText => PlateShape::FreeText {
            text: config.plate_text.trim().to_string(),
        },
    }
}

fn build_tokens(
    shape: &PlateShape,
    config: &PlateConfiguration,
    profile: &FormatProfile,
) -> TokenSequence {
    let mut tokens = Vec::new();
    match shape {
        PlateShape::GermanStandard {
            city_code,
            letters,
            numbers,
            suffix,
            diplomatic,
        } => {
            push_text(&mut tokens, city_code, TextRole::Primary);

            let mut emblems = Vec::new();
            if config.show_inspection_sticker {
                emblems.push(Emblem::InspectionSticker(InspectionSticker::new(
                    config.inspection_year,
                    config.inspection_month,
                )));
            }
            if config.show_regional_emblem {
                emblems.push(Emblem::Regional(RegionalEmblem::new(
                    RegionSet::GermanStates,
                    &config.region,
                    Some(&config.city_name),
                )));
            }
            if emblems.is_empty() {
                if !city_code.is_empty() && !(letters.is_empty() && numbers.is_empty()) {
                    tokens.push(Token::separator(Separator::HairSpace));
                }
            } else {
                tokens.push(Token::Emblems {
                    cluster: EmblemCluster::new(emblems),
                });
            }

            let tail = format!("{numbers}{}", suffix.as_str());
            let join = if *diplomatic {
                Separator::Dash
            } else {
                Separator::Space
            };
            push_joined(&mut tokens, letters, join, &tail);
        }
        PlateShape::GermanMilitary { letters, numbers } => {
            push_text(&mut tokens, crate::config::MILITARY_CITY_CODE, TextRole::Primary);
            tokens.push(Token::separator(Separator::Dash));
            push_text(&mut tokens, letters, TextRole::Secondary);
            tokens.push(Token::Emblems {
                cluster: EmblemCluster::new(vec![Emblem::Military]),
            });
            push_text(&mut tokens, numbers, TextRole::Secondary);
        }
        PlateShape::Austria {
            district,
            serial,
            state,
        } => {
            push_text(&mut tokens, district, TextRole::Primary);
            if let Some(state) = state {
                tokens.push(Token::Emblems {
                    cluster: EmblemCluster::new(vec![Emblem::Regional(RegionalEmblem::new(
                        profile.regions,
                        state,
                        None,
                    ))]),
                });
            }
            push_text(&mut tokens, serial, TextRole::Secondary);
        }
        PlateShape::SingleEmblem {
            emblem,
            leading,
            trailing,
        } => {
            push_text(&mut tokens, leading, TextRole::Primary);
            if config.show_regional_emblem {
                tokens.push(Token::Emblems {
                    cluster: EmblemCluster::new(vec![Emblem::National { emblem: *emblem }]),
                });
            }
            push_text(&mut tokens, trailing, TextRole::Secondary);
        }
        PlateShape::SwissDual { text, canton } => {
            tokens.push(Token::Emblems {
                cluster: EmblemCluster::new(vec![Emblem::National {
                    emblem: NationalEmblem::Switzerland,
                }]),
            });
            push_text(&mut tokens, text, TextRole::Primary);
            if let Some(canton) = canton {
                tokens.push(Token::Emblems {
                    cluster: EmblemCluster::new(vec![Emblem::Regional(RegionalEmblem::new(
                        profile.regions,
                        canton,
                        None,
                    ))]),
                });
            }
        }
        PlateShape::Swedish { text, personalized } => {
            if *personalized {
                push_text(&mut tokens, text, TextRole::Primary);
            } else {
                let (letters, serial) = text.split_at(3);
                push_text(&mut tokens, letters, TextRole::Primary);
                tokens.push(Token::separator(Separator::Space));
                push_text(&mut tokens, serial, TextRole::Secondary);
            }
        }
        PlateShape::FreeText { text } => push_text(&mut tokens, text, TextRole::Primary),
    }
    TokenSequence(tokens)
}

fn resolve_chrome(config: &PlateConfiguration, profile: &FormatProfile) -> Chrome {
    let left_band = match profile.left_band {
        BandPolicy::None => LeftBand::None,
        BandPolicy::Eu => LeftBand::Eu {
            code: profile.country.code().to_string(),
        },
        BandPolicy::EuOrMilitaryFlag if config.is_military() => LeftBand::GermanFlag,
        BandPolicy::EuOrMilitaryFlag => LeftBand::Eu {
            code: profile.country.code().to_string(),
        },
        BandPolicy::UkOptional if config.show_flag_band || config.is_electric_variant => {
            LeftBand::Uk {
                flag: config.show_flag_band,
                electric: config.is_electric_variant,
            }
        }
        BandPolicy::UkOptional => LeftBand::None,
        BandPolicy::NorwayFlag => LeftBand::NorwayFlag,
    };
    let left_band_width = if left_band == LeftBand::None {
        0.0
    } else {
        profile.left_band_width
    };

    let seasonal = if profile.supports_seasonal {
        config.seasonal_window
    } else {
        if config.seasonal_window.is_some() {
            tracing::debug!(country = %profile.country, "seasonal window ignored for country");
        }
        None
    };

    Chrome {
        left_band,
        left_band_width,
        right_band: profile.right_band.map(|spec| RightBand {
            spec,
            text: config.right_band_text.clone(),
        }),
        stripes: profile.stripes,
        seasonal,
    }
}

fn push_text(tokens: &mut Vec<Token>, text: &str, role: TextRole) {
    if !text.is_empty() {
        tokens.push(Token::text(text, role));
    }
}

fn push_joined(tokens: &mut Vec<Token>, left: &str, join: Separator, right: &str) {
    push_text(tokens, left, TextRole::Secondary);
    if !left.is_empty() && !right.is_empty() {
        tokens.push(Token::separator(join));
    }
    push_text(tokens, right, TextRole::Secondary);
}

fn split_leading_word(text: &str) -> (String, String) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((head, tail)) => (head.to_string(), tail.trim().to_string()),
        None => (text.to_string(), String::new()),
    }
}

/// Standard Swedish code: three letters, two digits, then a digit or letter.
fn is_swedish_registration_code(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.len() == 6
        && chars[..3].iter().all(|c| c.is_ascii_uppercase())
        && chars[3..5].iter().all(|c| c.is_ascii_digit())
        && chars[5].is_ascii_alphanumeric()
}
