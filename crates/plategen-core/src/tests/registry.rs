use crate::*;

#[test]
fn every_country_resolves_and_round_trips_its_code() {
    for country in Country::ALL {
        let profile = resolve_format(country);
        assert_eq!(profile.country, country);
        assert_eq!(
            resolve_format_code(country.code()).unwrap().country,
            country
        );
    }
}

#[test]
fn unknown_code_is_rejected_without_a_profile() {
    let err = resolve_format_code("XX").unwrap_err();
    assert_eq!(
        err,
        Error::UnknownCountry {
            code: "XX".to_string()
        }
    );
    assert_eq!(err.to_string(), "Unsupported country code: XX");
}

#[test]
fn codes_are_case_insensitive() {
    assert_eq!(resolve_format_code("est").unwrap().country, Country::Estonia);
    assert_eq!(resolve_format_code(" uk ").unwrap().country, Country::UnitedKingdom);
}

#[test]
fn registry_table() {
    const BLACK: &str = "#000000";
    const WHITE: &str = "#FFFFFF";

    struct Row {
        code: &'static str,
        band: BandPolicy,
        band_width: f64,
        right_band: Option<&'static str>,
        stripes: bool,
        font: PlateFont,
        font_color: &'static str,
        background: &'static str,
        shape: ShapeKind,
    }
    #[rustfmt::skip]
    let rows = [
        Row { code: "D", band: BandPolicy::EuOrMilitaryFlag, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::German },
        Row { code: "A", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: true, font: PlateFont::EuroPlateCondensed, font_color: BLACK, background: WHITE, shape: ShapeKind::Austria },
        Row { code: "B", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: "#C8102E", background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "BG", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "HR", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "CY", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: "#F4C430", shape: ShapeKind::FreeText },
        Row { code: "CZ", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "DK", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "EST", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "FIN", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "F", band: BandPolicy::Eu, band_width: 45.0, right_band: Some(registry::EU_BLUE), stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "GR", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "H", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::SingleEmblem(NationalEmblem::Hungary) },
        Row { code: "IRL", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "I", band: BandPolicy::Eu, band_width: 45.0, right_band: Some(registry::EU_BLUE), stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "LV", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "LT", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "L", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: "#FCD116", shape: ShapeKind::FreeText },
        Row { code: "M", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "NL", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: "#F7D117", shape: ShapeKind::FreeText },
        Row { code: "PL", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "P", band: BandPolicy::Eu, band_width: 45.0, right_band: Some(registry::EU_YELLOW), stripes: false, font: PlateFont::EuroPlate, font_color: registry::EU_BLUE, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "RO", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "SK", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::SingleEmblem(NationalEmblem::Slovakia) },
        Row { code: "SLO", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "E", band: BandPolicy::Eu, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "S", band: BandPolicy::None, band_width: 0.0, right_band: None, stripes: false, font: PlateFont::Tratex, font_color: BLACK, background: WHITE, shape: ShapeKind::Swedish },
        Row { code: "CH", band: BandPolicy::None, band_width: 0.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: BLACK, background: WHITE, shape: ShapeKind::SwissDual },
        Row { code: "FL", band: BandPolicy::None, band_width: 0.0, right_band: None, stripes: false, font: PlateFont::EuroPlate, font_color: WHITE, background: BLACK, shape: ShapeKind::SingleEmblem(NationalEmblem::Liechtenstein) },
        Row { code: "UK", band: BandPolicy::UkOptional, band_width: 40.0, right_band: None, stripes: false, font: PlateFont::CharlesWright, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
        Row { code: "N", band: BandPolicy::NorwayFlag, band_width: 45.0, right_band: None, stripes: false, font: PlateFont::Trafikkalfabetet, font_color: BLACK, background: WHITE, shape: ShapeKind::FreeText },
    ];

    assert_eq!(rows.len(), Country::ALL.len());
    for country in Country::ALL {
        assert!(
            rows.iter().any(|row| row.code == country.code()),
            "no row for {}",
            country.code()
        );
    }

    for row in rows {
        let profile = resolve_format_code(row.code).unwrap();
        assert_eq!(profile.left_band, row.band, "{}", row.code);
        assert_eq!(profile.left_band_width, row.band_width, "{}", row.code);
        assert_eq!(
            profile.right_band.map(|b| b.color),
            row.right_band,
            "{}",
            row.code
        );
        assert_eq!(profile.stripes.is_some(), row.stripes, "{}", row.code);
        assert_eq!(profile.font, row.font, "{}", row.code);
        assert_eq!(profile.font_color, row.font_color, "{}", row.code);
        assert_eq!(profile.background_color, row.background, "{}", row.code);
        assert_eq!(profile.shape, row.shape, "{}", row.code);
    }
}

#[test]
fn default_eu_countries_share_one_profile_shape() {
    let eu_default = [
        "BG", "HR", "CZ", "DK", "EST", "FIN", "GR", "IRL", "LV", "LT", "M", "PL", "RO", "SLO",
        "E",
    ];
    for code in eu_default {
        let profile = resolve_format_code(code).unwrap();
        assert_eq!(profile.left_band, BandPolicy::Eu, "{code}");
        assert_eq!(profile.shape, ShapeKind::FreeText, "{code}");
        assert_eq!(profile.font, PlateFont::EuroPlate, "{code}");
        assert!(profile.right_band.is_none(), "{code}");
        assert!(profile.stripes.is_none(), "{code}");
        assert_eq!(profile.font_color, "#000000", "{code}");
        assert_eq!(profile.background_color, "#FFFFFF", "{code}");
    }
}

#[test]
fn austrian_stripe_block_is_two_stripes_and_one_gap() {
    let stripes = resolve_format(Country::Austria).stripes.unwrap();
    assert_eq!(stripes.stripes_per_edge, 2);
    assert_eq!(stripes.block_height(), 15.0);
}

#[test]
fn only_germany_supports_seasonal_windows() {
    for country in Country::ALL {
        assert_eq!(
            resolve_format(country).supports_seasonal,
            country == Country::Germany,
            "{country}"
        );
    }
}

#[test]
fn compact_metrics_are_shared_by_every_profile() {
    for country in Country::ALL {
        assert_eq!(resolve_format(country).compact, COMPACT_METRICS, "{country}");
    }
}

#[test]
fn region_tables_resolve_names() {
    assert_eq!(RegionSet::GermanStates.codes().count(), 16);
    assert_eq!(RegionSet::AustrianStates.codes().count(), 9);
    assert_eq!(RegionSet::SwissCantons.codes().count(), 26);
    assert_eq!(RegionSet::GermanStates.name("nw"), Some("Nordrhein-Westfalen"));
    assert_eq!(RegionSet::AustrianStates.name("W"), Some("Wien"));
    assert_eq!(RegionSet::SwissCantons.name("ZH"), Some("Zürich"));
    assert!(!RegionSet::None.contains("NW"));
}

#[test]
fn profile_serializes_camel_case() {
    let value = serde_json::to_value(resolve_format(Country::France)).unwrap();
    assert_eq!(value["country"], "F");
    assert_eq!(value["leftBand"], "eu");
    assert_eq!(value["rightBand"]["defaultText"], "75");
    assert_eq!(value["font"], "euroPlate");
}
