use plategen_core::{Country, PlateConfiguration, PlateFont};
use plategen_render::anchor::{AnchorItem, MeasurementAnchor};
use plategen_render::geometry::PlateGeometry;
use plategen_render::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};

fn style(font: PlateFont) -> TextStyle {
    TextStyle {
        font,
        font_size: 100.0,
        letter_spacing: 2.0,
    }
}

#[test]
fn letter_spacing_is_added_per_glyph() {
    let m = DeterministicTextMeasurer::default();
    let w = m.measure("ABC", &style(PlateFont::EuroPlate)).width;
    assert!((w - (3.0 * 42.0 + 3.0 * 2.0)).abs() < 1e-9);
}

#[test]
fn separators_have_fixed_advances() {
    let m = DeterministicTextMeasurer::default();
    let s = style(PlateFont::EuroPlate);
    let space = m.measure(" ", &s).width;
    let hair = m.measure("\u{200A}", &s).width;
    let dash = m.measure("-", &s).width;
    assert!(hair < space && space < dash);
    assert!((space - 27.0).abs() < 1e-9);
}

#[test]
fn zero_width_characters_do_not_advance() {
    let m = DeterministicTextMeasurer::default();
    let s = style(PlateFont::EuroPlate);
    assert_eq!(
        m.measure("AB\u{200B}", &s).width,
        m.measure("AB", &s).width
    );
    assert_eq!(m.measure("", &s).height, 0.0);
}

#[test]
fn condensed_face_is_narrower() {
    let m = DeterministicTextMeasurer::default();
    let regular = m.measure("W 12345", &style(PlateFont::EuroPlate)).width;
    let condensed = m.measure("W 12345", &style(PlateFont::EuroPlateCondensed)).width;
    assert!(condensed < regular);
}

#[test]
fn explicit_factor_overrides_the_face() {
    let m = DeterministicTextMeasurer {
        char_width_factor: 0.5,
        line_height_factor: 0.0,
    };
    let w = m.measure("AA", &style(PlateFont::Tratex)).width;
    assert!((w - 104.0).abs() < 1e-9);
}

#[test]
fn anchor_merges_text_runs_between_emblems() {
    let config = PlateConfiguration::default();
    let (profile, assembled) = plategen_core::assemble(&config);
    let anchor = MeasurementAnchor::new(&assembled, &PlateGeometry::at_scale(1.0, &profile.compact));
    assert_eq!(anchor.items.len(), 3);
    assert_eq!(
        anchor.items[2],
        AnchorItem::Text {
            text: "IK 745".to_string()
        }
    );

    // External widths: every item 10 px, two gaps of 16.
    assert_eq!(anchor.natural_width_with(|_| 10.0), 30.0 + 32.0);
}

#[test]
fn empty_content_has_zero_natural_width() {
    let mut config = PlateConfiguration::default().with_country(Country::Denmark);
    config.set_plate_text("");
    let (profile, assembled) = plategen_core::assemble(&config);
    let anchor = MeasurementAnchor::new(&assembled, &PlateGeometry::at_scale(1.0, &profile.compact));
    assert!(anchor.is_empty());
    assert_eq!(anchor.natural_width(&DeterministicTextMeasurer::default()), 0.0);
}
