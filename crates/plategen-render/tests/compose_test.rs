use plategen_core::{Country, LeftBand, PlateConfiguration, PlateStyle};
use plategen_render::model::{ContentItem, RenderNode};
use plategen_render::reconcile::MeasurementSource;
use plategen_render::text::DeterministicTextMeasurer;
use plategen_render::{LayoutOptions, PreparedPlate, layout_plate};

fn text_config(country: Country, text: &str) -> PlateConfiguration {
    let mut config = PlateConfiguration::default().with_country(country);
    config.set_plate_text(text);
    config
}

#[test]
fn content_block_starts_after_band_border_and_padding() {
    let plate = layout_plate(&PlateConfiguration::default(), &LayoutOptions::default()).unwrap();
    let (band_rect, band) = plate.tree.left_band().unwrap();
    assert_eq!(band, &LeftBand::Eu { code: "D".into() });
    assert_eq!((band_rect.x, band_rect.y), (3.0, 3.0));
    assert_eq!((band_rect.width, band_rect.height), (45.0, 104.0));

    let block = plate.tree.content().unwrap();
    assert_eq!(block.rect.x, 3.0 + 45.0 + 12.0);
    assert_eq!(block.rect.width, plate.layout.available_width);
    assert_eq!(block.compression_ratio, 1.0);
    // Centered when it fits.
    let slack = block.rect.width - block.natural_width;
    assert!((block.origin_x - (block.rect.x + slack / 2.0)).abs() < 1e-9);
}

#[test]
fn austrian_band_is_inset_between_the_stripe_blocks() {
    let plate = layout_plate(
        &text_config(Country::Austria, "W 12345 B"),
        &LayoutOptions::default(),
    )
    .unwrap();
    let stripes: Vec<_> = plate
        .tree
        .nodes
        .iter()
        .filter_map(|n| match n {
            RenderNode::Stripe { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect();
    assert_eq!(stripes.len(), 4);
    assert!(stripes.iter().any(|r| r.y == 3.0));
    assert!(stripes.iter().any(|r| r.y == 13.0));
    assert!(stripes.iter().any(|r| r.bottom() == 107.0));

    let (band_rect, _) = plate.tree.left_band().unwrap();
    assert_eq!(band_rect.y, 3.0 + 15.0);
    assert_eq!(band_rect.height, 104.0 - 30.0);
}

#[test]
fn right_band_is_anchored_to_the_right_edge() {
    let plate = layout_plate(
        &text_config(Country::Italy, "AB 123 CD"),
        &LayoutOptions::default(),
    )
    .unwrap();
    let band = plate
        .tree
        .nodes
        .iter()
        .find_map(|n| match n {
            RenderNode::RightBand { rect, text, .. } => Some((*rect, text.clone())),
            _ => None,
        })
        .unwrap();
    assert_eq!(band.0.x, 520.0 - 3.0 - 40.0);
    assert_eq!(band.1, "RM");
    assert_eq!(plate.layout.available_width, 520.0 - 45.0 - 40.0 - 30.0);
}

#[test]
fn plates_without_a_band_start_content_at_the_border() {
    let mut config = text_config(Country::UnitedKingdom, "AB12 CDE");
    config.show_flag_band = false;
    let plate = layout_plate(&config, &LayoutOptions::default()).unwrap();
    assert!(plate.tree.left_band().is_none());
    assert_eq!(plate.tree.content().unwrap().rect.x, 3.0 + 12.0);
}

#[test]
fn chrome_keeps_its_size_when_content_is_compressed() {
    let prepared = PreparedPlate::new(&PlateConfiguration::default(), 1.0);
    let layout = prepared.reconcile_with(1000.0, MeasurementSource::Measured);
    let plate = prepared.finish(layout, &DeterministicTextMeasurer::default());

    let (band_rect, _) = plate.tree.left_band().unwrap();
    assert_eq!(band_rect.width, 45.0);

    let block = plate.tree.content().unwrap();
    assert!(block.compression_ratio < 1.0);
    let counter = block
        .items
        .iter()
        .find_map(|item| match item {
            ContentItem::Emblems { counter_scale, .. } => Some(*counter_scale),
            _ => None,
        })
        .unwrap();
    assert!((counter * block.compression_ratio - 1.0).abs() < 1e-12);
}

#[test]
fn content_items_follow_flex_order_with_gaps() {
    let plate = layout_plate(&PlateConfiguration::default(), &LayoutOptions::default()).unwrap();
    let block = plate.tree.content().unwrap();
    let xs: Vec<(f64, f64)> = block
        .items
        .iter()
        .map(|item| match item {
            ContentItem::Text { x, width, .. } => (*x, *width),
            ContentItem::Emblems { x, width, .. } => (*x, *width),
        })
        .collect();
    assert_eq!(xs.len(), 3);
    assert_eq!(xs[0].0, 0.0);
    for pair in xs.windows(2) {
        assert!((pair[1].0 - (pair[0].0 + pair[0].1 + 16.0)).abs() < 1e-9);
    }
    assert!(matches!(&block.items[1], ContentItem::Emblems { width, .. } if *width == 42.0));
}

#[test]
fn style_changes_the_surface_but_not_the_geometry() {
    let flat = layout_plate(&PlateConfiguration::default(), &LayoutOptions::default()).unwrap();
    let mut config = PlateConfiguration::default();
    config.style = PlateStyle::BlackGlossy3d;
    let glossy = layout_plate(&config, &LayoutOptions::default()).unwrap();

    assert_eq!(flat.layout, glossy.layout);
    assert_eq!(flat.tree.nodes, glossy.tree.nodes);
    assert!(flat.tree.surface.rim && !flat.tree.surface.shadow);
    assert!(glossy.tree.surface.shadow && glossy.tree.surface.glossy);
    assert!(!glossy.tree.surface.rim);
}

#[test]
fn render_tree_serializes_for_external_consumers() {
    let plate = layout_plate(&PlateConfiguration::default(), &LayoutOptions::default()).unwrap();
    let value = serde_json::to_value(&plate.tree).unwrap();
    assert_eq!(value["width"], 520.0);
    assert_eq!(value["layout"]["source"], "measured");
    assert_eq!(value["fontFamily"], "EuroPlate, sans-serif");
    assert!(
        value["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .any(|n| n["kind"] == "content")
    );
}
