//! Tests for resolution order through the style graph

use fudge_theme::config::RegistryConfig;
use fudge_theme::error::ThemeError;
use fudge_theme::id::ResourceId;
use fudge_theme::ids;
use fudge_theme::registry::ThemeRegistry;
use fudge_theme::value::ResourceValue;
use fudge_theme::ResourceEnum;
use vello::peniko::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ResourceEnum)]
enum Shape {
    Square,
    Round = 5,
    Pill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ResourceEnum)]
enum Weight {
    Light,
    Heavy,
}

fn registry() -> ThemeRegistry {
    let mut registry = ThemeRegistry::new(RegistryConfig::default());
    registry.initialize();
    registry
}

fn red() -> Color {
    Color::from_rgb8(255, 0, 0)
}

#[test]
fn test_button_scenario() {
    let mut registry = registry();
    let base = registry.create_style("BaseButton").unwrap();
    let button = registry.create_inherited_style(base, "Button").unwrap();

    registry.set_value_override(base, ids::TEXT_COLOR, Color::BLACK).unwrap();
    registry.set_value_override(base, ids::BORDER_WIDTH, 2.0f32).unwrap();
    registry.set_value_override(button, ids::TEXT_COLOR, red()).unwrap();

    let theme = registry.main_theme();
    let text = registry.get_color(button, theme, ids::TEXT_COLOR).unwrap();
    assert_eq!(text.components, red().components);
    assert_eq!(registry.get_float(button, theme, ids::BORDER_WIDTH), Some(2.0));

    let base_text = registry.get_color(base, theme, ids::TEXT_COLOR).unwrap();
    assert_eq!(base_text.components, Color::BLACK.components);
}

#[test]
fn test_override_shadows_parent() {
    let mut registry = registry();
    let parent = registry.create_style("P").unwrap();
    let child = registry.create_inherited_style(parent, "S").unwrap();
    let x = ResourceId::new(100);

    registry.set_value_override(parent, x, 1i64).unwrap();
    registry.set_value_override(child, x, 2i64).unwrap();

    assert_eq!(registry.get_int(child, None, x), Some(2));
    assert_eq!(registry.get_int(parent, None, x), Some(1));
}

#[test]
fn test_inheritance_fallback_and_theme_fallback() {
    let mut registry = registry();
    let parent = registry.create_style("P").unwrap();
    let child = registry.create_inherited_style(parent, "S").unwrap();
    let x = ResourceId::new(100);
    registry.set_value_override(parent, x, 1i64).unwrap();

    assert_eq!(registry.get_int(child, None, x), Some(1));

    // Theme fallback only when asked for.
    let theme = registry.main_theme();
    let fill = registry.get_resource_value(child, theme, ids::FILL_COLOR, true).unwrap();
    assert!(fill.is_some());
    let fill = registry.get_resource_value(child, theme, ids::FILL_COLOR, false).unwrap();
    assert!(fill.is_none());
}

#[test]
fn test_redirect_chaining() {
    let mut registry = registry();
    let parent = registry.create_style("P").unwrap();
    let child = registry.create_inherited_style(parent, "S").unwrap();
    let (x, y, z) = (ResourceId::new(100), ResourceId::new(101), ResourceId::new(102));

    registry.set_resource_override(child, x, y).unwrap();
    registry.set_resource_override(child, y, z).unwrap();
    registry.set_value_override(parent, z, "deep").unwrap();

    assert_eq!(registry.get_string(child, None, x).as_deref(), Some("deep"));
}

#[test]
fn test_cross_reference_leaves_chain() {
    let mut registry = registry();
    let s = registry.create_style("S").unwrap();
    let t_parent = registry.create_style("TParent").unwrap();
    let t = registry.create_inherited_style(t_parent, "T").unwrap();
    let (x, z) = (ResourceId::new(100), ResourceId::new(200));

    registry.set_value_override(t_parent, z, 42i64).unwrap();
    registry.set_resource_reference(s, x, t, z).unwrap();

    assert_eq!(registry.get_int(s, None, x), registry.get_int(t, None, z));
    assert_eq!(registry.get_int(s, None, x), Some(42));
}

#[test]
fn test_direct_cycle_rejected() {
    let mut registry = registry();
    let a = registry.create_style("styleA").unwrap();
    let b = registry.create_style("styleB").unwrap();
    let id = ResourceId::new(5);

    registry.set_value_override(b, id, 7i64).unwrap();
    registry.set_resource_reference(a, id, b, id).unwrap();

    let err = registry.set_resource_reference(b, id, a, id).unwrap_err();
    assert!(matches!(err, ThemeError::ReferenceCycle { .. }));

    let entry = registry.style(b).unwrap().entry(id).cloned();
    assert_eq!(entry, Some(fudge_theme::style::StyleEntry::Value(ResourceValue::Int(7))));
    assert_eq!(registry.get_int(a, None, id), Some(7));
}

#[test]
fn test_transitive_cycle_rejected_without_mutation() {
    let mut registry = registry();
    let a = registry.create_style("A").unwrap();
    let b = registry.create_style("B").unwrap();
    let c = registry.create_style("C").unwrap();
    let (x, y, w) = (ResourceId::new(100), ResourceId::new(101), ResourceId::new(102));

    registry.set_resource_reference(b, y, c, w).unwrap();
    registry.set_resource_reference(c, w, a, x).unwrap();

    let before_a = registry.style(a).unwrap().len();
    assert!(registry.set_resource_reference(a, x, b, y).is_err());
    assert_eq!(registry.style(a).unwrap().len(), before_a);
    assert!(registry.style(a).unwrap().entry(x).is_none());
}

#[test]
fn test_redirect_cycle_rejected() {
    let mut registry = registry();
    let s = registry.create_style("S").unwrap();
    let (x, y) = (ResourceId::new(100), ResourceId::new(101));

    registry.set_resource_override(s, x, y).unwrap();
    assert!(registry.set_resource_override(s, y, x).is_err());
    assert!(registry.set_resource_override(s, x, x).is_err());
}

#[test]
fn test_enum_type_mismatch_is_not_found() {
    let mut registry = registry();
    let s = registry.create_style("S").unwrap();
    let id = ResourceId::new(100);

    registry.set_enum_override(s, id, Shape::Round).unwrap();
    assert_eq!(registry.get_enum_resource::<Shape>(s, None, id), Some(Shape::Round));
    assert_eq!(registry.get_enum_resource::<Weight>(s, None, id), None);

    registry.set_value_override(s, id, 5i64).unwrap();
    assert_eq!(registry.get_enum_resource::<Shape>(s, None, id), None);
}

#[test]
fn test_derived_enum_discriminants() {
    assert_eq!(Shape::Square.to_raw(), 0);
    assert_eq!(Shape::Round.to_raw(), 5);
    assert_eq!(Shape::Pill.to_raw(), 6);
    assert_eq!(Shape::from_raw(6), Some(Shape::Pill));
    assert_eq!(Shape::from_raw(1), None);
}

#[test]
fn test_depth_ceiling_bounds_inheritance() {
    let mut registry = ThemeRegistry::new(RegistryConfig::default().with_max_resolution_depth(4));
    registry.initialize();

    let mut style = registry.create_style("s0").unwrap();
    let root = style;
    for i in 1..8 {
        style = registry.create_inherited_style(style, &format!("s{}", i)).unwrap();
    }
    registry.set_value_override(root, ResourceId::new(100), 1i64).unwrap();

    let err = registry
        .get_resource_value(style, None, ResourceId::new(100), true)
        .unwrap_err();
    assert!(matches!(err, ThemeError::ResolutionDepthExceeded { max_depth: 4, .. }));
    // Typed getters swallow the error after logging it.
    assert_eq!(registry.get_int(style, None, ResourceId::new(100)), None);
}

#[test]
fn test_resources_enum_any_order() {
    let mut registry = registry();
    let own = registry.create_style("Own").unwrap();
    let class = registry.create_style("Class").unwrap();
    let (first, second) = (ResourceId::new(100), ResourceId::new(101));

    registry.set_enum_override(class, first, Shape::Pill).unwrap();
    registry.set_enum_override(own, second, Shape::Square).unwrap();
    registry.set_value_override(own, first, 1i64).unwrap();

    let resources = registry.resources(vec![own, class], registry.main_theme());
    // `first` resolves on `own` to an int, which hides the Shape on `class`.
    assert_eq!(resources.get_enum::<Shape>(first), None);
    assert_eq!(resources.get_enum_any::<Shape>(&[first, second]), Some(Shape::Square));
    assert_eq!(resources.get_enum::<Weight>(second), None);
}

#[test]
fn test_resources_enum_any_resolves_each_id_fully() {
    let mut registry = registry();
    let class = registry.create_style("Class").unwrap();
    let (first, second) = (ResourceId::new(110), ResourceId::new(111));

    let main = registry.main_theme().unwrap();
    registry
        .theme_mut(main)
        .unwrap()
        .set(first, ResourceValue::enumeration(Shape::Round));
    registry.set_enum_override(class, second, Shape::Pill).unwrap();

    let resources = registry.resources(vec![class], Some(main));
    assert_eq!(resources.get_enum_any::<Shape>(&[first, second]), Some(Shape::Round));
    assert_eq!(resources.get_enum_any::<Shape>(&[second, first]), Some(Shape::Pill));
}
