use crate::*;
use serde_json::json;

#[test]
fn default_configuration_is_the_documented_german_plate() {
    let config = PlateConfiguration::default();
    assert_eq!(config.country, Country::Germany);
    assert_eq!(
        (config.city_code.as_str(), config.letters.as_str(), config.numbers.as_str()),
        ("N", "IK", "745")
    );
    assert_eq!(config.region, "NW");
    assert_eq!((config.inspection_year, config.inspection_month), (2027, 7));
    assert_eq!(config.width_mode, WidthMode::Standard);
    assert_eq!(config.style, PlateStyle::Normal);
}

#[test]
fn with_country_resets_colors_band_text_and_foreign_region() {
    let mut config = PlateConfiguration::default();
    config.font_color = "#123456".to_string();
    let config = config.with_country(Country::Netherlands);
    assert_eq!(config.font_color, "#000000");
    assert_eq!(config.background_color, "#F7D117");
    assert_eq!(config.right_band_text, "");

    let config = config.with_country(Country::Italy);
    assert_eq!(config.right_band_text, "RM");
    assert_eq!(config.background_color, "#FFFFFF");

    let config = config.with_country(Country::Austria);
    assert_eq!(config.region, "B");

    let config = config.with_country(Country::Liechtenstein);
    assert_eq!(config.font_color, "#FFFFFF");
    assert_eq!(config.background_color, "#000000");
}

#[test]
fn form_setters_normalize_input() {
    let mut config = PlateConfiguration::default();
    config.set_city_code("hamb");
    config.set_letters("xyz");
    config.set_numbers("12a3456");
    config.set_right_band_text("abcd");
    config.set_plate_text("wien 1");
    config.set_city_name(&"x".repeat(50));
    assert_eq!(config.city_code, "HAM");
    assert_eq!(config.letters, "XY");
    assert_eq!(config.numbers, "1234");
    assert_eq!(config.right_band_text, "ABC");
    assert_eq!(config.plate_text, "WIEN 1");
    assert_eq!(config.city_name.chars().count(), 35);
}

#[test]
fn json_uses_camel_case_and_fills_defaults() {
    let config: PlateConfiguration = serde_json::from_value(json!({
        "country": "S",
        "widthMode": "compact",
        "style": "3d-carbon-glossy",
        "plateText": "SVENSKA",
        "seasonalWindow": { "startMonth": 11, "endMonth": 3 }
    }))
    .unwrap();
    assert_eq!(config.country, Country::Sweden);
    assert_eq!(config.width_mode, WidthMode::Compact);
    assert_eq!(config.style, PlateStyle::CarbonGlossy3d);
    assert!(config.style.is_carbon() && config.style.is_glossy() && config.style.is_3d());
    assert_eq!(config.letters, "IK");
    assert_eq!(config.seasonal_window, Some(SeasonalWindow::new(11, 3)));
}

#[test]
fn unknown_country_in_json_is_an_error() {
    let err = serde_json::from_value::<PlateConfiguration>(json!({ "country": "ZZ" }))
        .unwrap_err()
        .to_string();
    assert!(err.contains("Unsupported country code: ZZ"), "{err}");
}

#[test]
fn seasonal_window_wraps_year_end() {
    let winter = SeasonalWindow::new(11, 3);
    assert!(winter.wraps_year_end());
    assert!(winter.contains(12) && winter.contains(1) && winter.contains(3));
    assert!(!winter.contains(6));

    let summer = SeasonalWindow::new(3, 10);
    assert!(!summer.wraps_year_end());
    assert!(summer.contains(3) && summer.contains(10));
    assert!(!summer.contains(11));
    assert_eq!(summer.labels(), ("03".to_string(), "10".to_string()));
    assert_eq!("3-10".parse::<SeasonalWindow>().unwrap(), summer);
    assert!("3".parse::<SeasonalWindow>().is_err());
}

#[test]
fn style_and_suffix_parse_their_wire_names() {
    for style in PlateStyle::ALL {
        assert_eq!(style.as_str().parse::<PlateStyle>().unwrap(), style);
    }
    assert!("4d".parse::<PlateStyle>().is_err());
    assert_eq!("h".parse::<Suffix>().unwrap(), Suffix::Historic);
    assert_eq!("".parse::<Suffix>().unwrap(), Suffix::None);
}
