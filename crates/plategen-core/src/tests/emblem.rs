use crate::*;

#[test]
fn month_twelve_is_the_unrotated_top_position() {
    assert_eq!(InspectionSticker::new(2027, 12).rotation_degrees(), 0.0);
    for month in 1..=11 {
        assert_eq!(
            InspectionSticker::new(2027, month).rotation_degrees(),
            -(month as f64) * 30.0
        );
    }
}

#[test]
fn out_of_range_months_degrade_without_panicking() {
    assert_eq!(InspectionSticker::new(2027, 0).rotation_degrees(), 0.0);
    assert_eq!(InspectionSticker::new(2027, 13).rotation_degrees(), -390.0);
}

#[test]
fn sticker_color_cycles_every_six_years() {
    let a = InspectionSticker::new(2025, 1).color();
    assert_eq!(a, "#FF5F00");
    assert_eq!(InspectionSticker::new(2031, 1).color(), a);
    assert_eq!(InspectionSticker::new(2019, 1).color(), a);
    assert_eq!(InspectionSticker::new(2026, 1).color(), "#0066B3");
    assert_eq!(InspectionSticker::new(2027, 1).year_label(), "27");
}

#[test]
fn cluster_stacks_sticker_over_seal() {
    let cluster = EmblemCluster::new(vec![
        Emblem::InspectionSticker(InspectionSticker::new(2027, 7)),
        Emblem::Regional(RegionalEmblem::new(RegionSet::GermanStates, "BY", None)),
    ]);
    assert_eq!(cluster.width(), 42.0);
    assert!((cluster.height() - (42.0 * 0.85 + 2.0 + 42.0)).abs() < 1e-9);
    assert!(EmblemCluster::new(Vec::new()).is_empty());
}

#[test]
fn austrian_arms_reserve_a_caption_line() {
    let arms = RegionalEmblem::new(RegionSet::AustrianStates, "T", None);
    assert_eq!(arms.name.as_deref(), Some("Tirol"));
    assert_eq!(arms.size(), 50.0);
    assert_eq!(arms.height(), 61.0);
}

#[test]
fn seal_captions_shrink_with_length() {
    let short = RegionalEmblem::new(RegionSet::GermanStates, "BY", Some("Köln"));
    let long = RegionalEmblem::new(
        RegionSet::GermanStates,
        "MV",
        Some("Landeshauptstadt Düsseldorf"),
    );
    assert!(long.region_caption_font_size() < short.region_caption_font_size());
    assert!(long.city_caption_font_size() < short.city_caption_font_size());
    assert!(RegionalEmblem::new(RegionSet::GermanStates, "BY", Some("  ")).city.is_none());
}
