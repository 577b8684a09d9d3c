use crate::*;

#[test]
fn default_configuration_encodes_to_an_empty_fragment() {
    assert_eq!(encode_fragment(&PlateConfiguration::default()), "");
    assert_eq!(decode_fragment(""), PlateConfiguration::default());
    assert_eq!(decode_fragment("#"), PlateConfiguration::default());
}

#[test]
fn changed_fields_are_written_with_their_short_keys() {
    let mut config = PlateConfiguration::default();
    config.set_city_code("M");
    config.show_inspection_sticker = false;
    config.is_electric_variant = true;
    config.seasonal_window = Some(SeasonalWindow::new(3, 10));
    config.width_mode = WidthMode::Compact;
    assert_eq!(
        encode_fragment(&config),
        "code=M&width=compact&hu=0&ev=1&season=3-10"
    );
}

#[test]
fn colors_are_compared_against_the_country_defaults() {
    let config = PlateConfiguration::default().with_country(Country::Netherlands);
    assert_eq!(encode_fragment(&config), "country=NL");

    let mut config = config;
    config.font_color = "#C8102E".to_string();
    assert_eq!(encode_fragment(&config), "country=NL&fontColor=%23C8102E");
}

#[test]
fn fragment_survives_a_round_trip() {
    let mut config = PlateConfiguration::default().with_country(Country::France);
    config.set_plate_text("ab-123-cd");
    config.set_right_band_text("13");
    config.style = PlateStyle::BlackMatte3d;
    config.inspection_month = 12;
    config.show_regional_emblem = false;
    config.show_flag_band = false;
    config.set_city_name("Saint-Étienne");

    let fragment = encode_fragment(&config);
    assert_eq!(decode_fragment(&fragment), config);
    assert_eq!(decode_fragment(&format!("#{fragment}")), config);
    assert_eq!(parse_fragment(&fragment).unwrap(), config);
}

#[test]
fn lenient_decoding_skips_bad_values_and_unknown_keys() {
    let config = decode_fragment("huMonth=dec&letters=ab&tilt=1&bgColor=blue");
    assert_eq!(config.inspection_month, 7);
    assert_eq!(config.letters, "AB");
    assert_eq!(config.background_color, "#FFFFFF");
}

#[test]
fn unknown_country_falls_back_to_default_when_lenient() {
    let config = decode_fragment("country=ZZ&text=HELLO");
    assert_eq!(config.country, Country::Germany);
    assert_eq!(config.plate_text, "HELLO");
    assert_eq!(
        parse_fragment("country=ZZ").unwrap_err(),
        Error::UnknownCountry {
            code: "ZZ".to_string()
        }
    );
}

#[test]
fn strict_decoding_reports_the_first_problem() {
    assert_eq!(
        parse_fragment("tilt=1").unwrap_err(),
        Error::InvalidFragment {
            message: "unknown key `tilt`".to_string()
        }
    );
    assert_eq!(
        parse_fragment("width=narrow").unwrap_err(),
        Error::InvalidValue {
            field: "width",
            value: "narrow".to_string()
        }
    );
}

#[test]
fn country_key_applies_before_other_keys_regardless_of_order() {
    let config = decode_fragment("rightBand=rm&country=I");
    assert_eq!(config.country, Country::Italy);
    assert_eq!(config.right_band_text, "RM");

    let config = decode_fragment("rightBand=13&country=F");
    assert_eq!(config.right_band_text, "13");
}
