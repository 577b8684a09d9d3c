//! URL fragment persistence for [`PlateConfiguration`].
//!
//! One flat `key=value` pair per field, form-urlencoded, with every field omitted while it still
//! equals its default. Colors and the right band code are compared against the defaults of the
//! configured country, so switching countries keeps fragments short.

use crate::config::{PlateConfiguration, PlateStyle, SeasonalWindow, Suffix, WidthMode};
use crate::country::Country;
use crate::error::{Error, Result};
use crate::registry::resolve_format;
use std::str::FromStr;
use url::form_urlencoded;

pub fn encode_fragment(config: &PlateConfiguration) -> String {
    let defaults = PlateConfiguration::default().with_country(config.country);
    let mut out = form_urlencoded::Serializer::new(String::new());

    if config.country != Country::default() {
        out.append_pair("country", config.country.code());
    }
    let mut text = |key: &str, value: &str, default: &str| {
        if value != default {
            out.append_pair(key, value);
        }
    };
    text("code", &config.city_code, &defaults.city_code);
    text("letters", &config.letters, &defaults.letters);
    text("numbers", &config.numbers, &defaults.numbers);
    text("suffix", config.suffix.as_str(), defaults.suffix.as_str());
    text("state", &config.region, &defaults.region);
    text("city", &config.city_name, &defaults.city_name);
    text("width", config.width_mode.as_str(), defaults.width_mode.as_str());
    text("style", config.style.as_str(), defaults.style.as_str());
    text("fontColor", &config.font_color, &defaults.font_color);
    text("bgColor", &config.background_color, &defaults.background_color);
    text("text", &config.plate_text, &defaults.plate_text);
    text("rightBand", &config.right_band_text, &defaults.right_band_text);

    if config.inspection_year != defaults.inspection_year {
        out.append_pair("huYear", &config.inspection_year.to_string());
    }
    if config.inspection_month != defaults.inspection_month {
        out.append_pair("huMonth", &config.inspection_month.to_string());
    }
    if !config.show_regional_emblem {
        out.append_pair("wappen", "0");
    }
    if !config.show_inspection_sticker {
        out.append_pair("hu", "0");
    }
    if !config.show_flag_band {
        out.append_pair("flag", "0");
    }
    if config.is_electric_variant {
        out.append_pair("ev", "1");
    }
    if let Some(window) = config.seasonal_window {
        out.append_pair("season", &window.to_string());
    }
    out.finish()
}

/// Lenient decoding: unknown keys are skipped and malformed values keep their default.
///
/// An unknown country falls back to the default country.
pub fn decode_fragment(fragment: &str) -> PlateConfiguration {
    let mut config = base_for(fragment, false).unwrap_or_default();
    for (key, value) in pairs(fragment) {
        if let Err(err) = apply_pair(&mut config, &key, &value) {
            tracing::warn!(%key, %value, error = %err, "ignoring malformed fragment value");
        }
    }
    config
}

/// Strict decoding: the first malformed value or unknown key fails the whole fragment.
pub fn parse_fragment(fragment: &str) -> Result<PlateConfiguration> {
    let mut config = base_for(fragment, true)?;
    for (key, value) in pairs(fragment) {
        match apply_pair(&mut config, &key, &value) {
            Ok(true) => {}
            Ok(false) => {
                return Err(Error::InvalidFragment {
                    message: format!("unknown key `{key}`"),
                });
            }
            Err(err) => return Err(err),
        }
    }
    Ok(config)
}

fn pairs(fragment: &str) -> impl Iterator<Item = (String, String)> + '_ {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    form_urlencoded::parse(raw.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned()))
}

/// Country goes first: it decides which defaults the remaining keys override.
fn base_for(fragment: &str, strict: bool) -> Result<PlateConfiguration> {
    let country = pairs(fragment)
        .filter(|(key, _)| key == "country")
        .last()
        .map(|(_, value)| value);
    let country = match country {
        None => Country::default(),
        Some(code) => match Country::from_str(&code) {
            Ok(country) => country,
            Err(err) if strict => return Err(err),
            Err(err) => {
                tracing::warn!(error = %err, "falling back to the default country");
                Country::default()
            }
        },
    };
    Ok(PlateConfiguration::default().with_country(country))
}

/// Returns `Ok(false)` for keys this codec does not know.
fn apply_pair(config: &mut PlateConfiguration, key: &str, value: &str) -> Result<bool> {
    match key {
        "country" => {}
        "code" => config.set_city_code(value),
        "letters" => config.set_letters(value),
        "numbers" => config.set_numbers(value),
        "suffix" => config.suffix = Suffix::from_str(value)?,
        "state" => config.region = value.to_uppercase(),
        "city" => config.set_city_name(value),
        "width" => config.width_mode = WidthMode::from_str(value)?,
        "style" => config.style = PlateStyle::from_str(value)?,
        "fontColor" => config.font_color = parse_color("fontColor", value)?,
        "bgColor" => config.background_color = parse_color("bgColor", value)?,
        "text" => config.set_plate_text(value),
        "rightBand" => {
            if resolve_format(config.country).right_band.is_some() {
                config.set_right_band_text(value);
            }
        }
        "huYear" => config.inspection_year = parse_number("huYear", value)?,
        "huMonth" => config.inspection_month = parse_number("huMonth", value)?,
        "wappen" => config.show_regional_emblem = parse_flag("wappen", value)?,
        "hu" => config.show_inspection_sticker = parse_flag("hu", value)?,
        "flag" => config.show_flag_band = parse_flag("flag", value)?,
        "ev" => config.is_electric_variant = parse_flag("ev", value)?,
        "season" => config.seasonal_window = Some(SeasonalWindow::from_str(value)?),
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| Error::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool> {
    match value.trim() {
        "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        _ => Err(Error::InvalidValue {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_color(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    let hex = value.strip_prefix('#').unwrap_or(value);
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(Error::InvalidValue {
            field,
            value: value.to_string(),
        });
    }
    Ok(format!("#{}", hex.to_ascii_uppercase()))
}
