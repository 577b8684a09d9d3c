#![cfg(feature = "render")]

use plategen::render::{HeadlessError, HeadlessRenderer, render_fragment_svg, sanitize_svg_id};
use plategen::{Country, PlateConfiguration};

#[test]
fn svg_ids_are_sanitized() {
    assert_eq!(sanitize_svg_id("  "), "p-untitled");
    assert_eq!(sanitize_svg_id("preview 1"), "preview-1");
    assert_eq!(sanitize_svg_id("1st plate"), "p-1st-plate");
    assert_eq!(sanitize_svg_id("a//b"), "a-b");
}

#[test]
fn renderer_prefixes_definitions_with_the_id() {
    let renderer = HeadlessRenderer::new();
    let mut config = PlateConfiguration::default();
    config.style = plategen::PlateStyle::BlackGlossy3d;
    let svg = renderer.render_svg_with_id(&config, "card #2").unwrap();
    let doc = roxmltree::Document::parse(&svg).unwrap();
    assert_eq!(doc.root_element().attribute("id"), Some("card-2"));
    assert!(
        doc.descendants()
            .any(|n| n.attribute("id") == Some("card-2-shadow"))
    );
}

#[test]
fn strict_fragment_rendering_reports_unknown_keys() {
    let renderer = HeadlessRenderer::new();
    let svg = render_fragment_svg("#country=PL&text=WW%20123", &renderer.layout, &renderer.svg)
        .unwrap();
    assert!(svg.contains(">PL<"));

    let err = render_fragment_svg("colour=red", &renderer.layout, &renderer.svg).unwrap_err();
    assert!(matches!(err, HeadlessError::Config(_)));
}

#[test]
fn scaled_renderer_doubles_the_canvas() {
    let renderer = HeadlessRenderer::new().with_scale(2.0);
    let plate = renderer
        .layout(&PlateConfiguration::default().with_country(Country::France))
        .unwrap();
    assert_eq!(plate.tree.width, 1040.0);
    assert_eq!(plate.tree.height, 220.0);
}
