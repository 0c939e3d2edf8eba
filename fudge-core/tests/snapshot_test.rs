//! Tests for exporting and rebuilding control trees

use std::any::Any;

use fudge_core::error::CoreError;
use fudge_core::factory::ControlFactory;
use fudge_core::layout::ListLayout;
use fudge_core::property::PropertyBag;
use fudge_core::snapshot::WidgetDescriptor;
use fudge_core::tree::UiTree;
use fudge_core::widget::{GuiRoot, PainterRequest, Widget, WidgetKind};
use fudge_theme::ids;
use fudge_theme::painter::{PainterTag, TextPainter};
use fudge_theme::registry::ThemeRegistry;
use nalgebra::Vector2;

#[derive(Debug, Default)]
struct Shelf;

impl WidgetKind for Shelf {
    const TYPE_NAME: &'static str = "Shelf";
}

impl Widget for Shelf {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn is_container(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Default)]
struct Caption {
    text: String,
}

impl WidgetKind for Caption {
    const TYPE_NAME: &'static str = "Caption";
}

impl Widget for Caption {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn painter_requests(&self) -> Vec<PainterRequest> {
        vec![PainterRequest::new(ids::LABEL_PAINTER, PainterTag::PART_PAINTER)]
    }

    fn properties(&self) -> PropertyBag {
        PropertyBag::new().with("text", self.text.as_str())
    }

    fn apply_properties(&mut self, properties: &PropertyBag) {
        if let Some(text) = properties.get_str("text") {
            self.text = text.to_string();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn setup() -> (ThemeRegistry, ControlFactory) {
    let mut registry = ThemeRegistry::default();
    registry.initialize();
    let mut factory = ControlFactory::with_builtins();
    factory.register_kind::<Shelf>();
    factory.register_kind::<Caption>();
    factory.register_class_styles(&mut registry).unwrap();
    (registry, factory)
}

#[test]
fn test_snapshot_round_trip() {
    let (mut registry, factory) = setup();
    let fancy = registry.create_style("fancy").unwrap();

    let mut tree = UiTree::new();
    let root = tree.create(GuiRoot, "root");
    let shelf = tree.create(Shelf, "shelf");
    tree.add_child(root, shelf).unwrap();
    tree.set_position(shelf, Vector2::new(12.0, 8.0)).unwrap();
    tree.set_layout(shelf, Some(Box::new(ListLayout::vertical().with_spacing(4.0))))
        .unwrap();

    let caption = tree.create(Caption { text: "Hello".into() }, "caption");
    tree.add_child(shelf, caption).unwrap();
    tree.set_style(caption, Some(fancy), &mut registry).unwrap();
    tree.set_min_size(caption, Some(Vector2::new(30.0, 10.0))).unwrap();
    tree.with_layout_mut::<ListLayout, _>(shelf, |list| list.slot_mut(0).unwrap().enforce_limits = true);

    let descriptor = tree.snapshot(root, &registry).unwrap();
    let json = descriptor.to_json().unwrap();
    let decoded = WidgetDescriptor::from_json(&json).unwrap();
    assert_eq!(decoded, descriptor);

    let mut rebuilt = UiTree::new();
    let new_root = rebuilt.instantiate(&decoded, &factory, &mut registry).unwrap();
    assert_eq!(rebuilt.len(), 3);
    assert_eq!(rebuilt.snapshot(new_root, &registry).unwrap(), descriptor);

    let new_caption = rebuilt.find(new_root, "caption").unwrap();
    assert_eq!(rebuilt.widget::<Caption>(new_caption).unwrap().text, "Hello");
    assert_eq!(rebuilt.get(new_caption).unwrap().style(), Some(fancy));
    assert!(rebuilt
        .get(new_caption)
        .unwrap()
        .painters()
        .get_as::<TextPainter>(ids::LABEL_PAINTER)
        .is_some());

    let new_shelf = rebuilt.find(new_root, "shelf").unwrap();
    let list = rebuilt.layout_as::<ListLayout>(new_shelf).unwrap();
    assert_eq!(list.spacing(), 4.0);
    assert!(list.slot(0).unwrap().enforce_limits);
    assert_eq!(rebuilt.position(new_shelf), Some(Vector2::new(12.0, 8.0)));
}

#[test]
fn test_unknown_control_type_builds_nothing() {
    let (mut registry, factory) = setup();
    let descriptor = WidgetDescriptor::new("Shelf", "shelf")
        .with_layout("ListLayout")
        .with_child(WidgetDescriptor::new("Caption", "ok"))
        .with_child(WidgetDescriptor::new("Marquee", "bad"));

    let mut tree = UiTree::new();
    let err = tree.instantiate(&descriptor, &factory, &mut registry).unwrap_err();
    assert!(matches!(err, CoreError::UnknownControlType(name) if name == "Marquee"));
    assert!(tree.is_empty());
}

#[test]
fn test_unknown_layout_type_builds_nothing() {
    let (mut registry, factory) = setup();
    let descriptor = WidgetDescriptor::new("Shelf", "shelf").with_layout("GridLayout");

    let mut tree = UiTree::new();
    let err = tree.instantiate(&descriptor, &factory, &mut registry).unwrap_err();
    assert!(matches!(err, CoreError::UnknownLayoutType(_)));
    assert!(tree.is_empty());
}

#[test]
fn test_rejected_layout_cleans_up() {
    let (mut registry, factory) = setup();
    let descriptor = WidgetDescriptor::new("GuiRoot", "root").with_child(
        WidgetDescriptor::new("Shelf", "shelf")
            .with_child(WidgetDescriptor::new("GuiRoot", "inner").with_layout("StackLayout")),
    );

    let mut tree = UiTree::new();
    let err = tree.instantiate(&descriptor, &factory, &mut registry).unwrap_err();
    assert!(matches!(err, CoreError::LayoutRejected { .. }));
    assert!(tree.is_empty());
}

#[test]
fn test_missing_style_is_not_fatal() {
    let (mut registry, factory) = setup();
    let descriptor = WidgetDescriptor::new("Caption", "caption").with_style("does-not-exist");

    let mut tree = UiTree::new();
    let caption = tree.instantiate(&descriptor, &factory, &mut registry).unwrap();
    assert_eq!(tree.get(caption).unwrap().style(), None);
    assert_eq!(
        tree.style_chain(caption, &registry).unwrap().first().copied(),
        registry.style_by_name("Caption")
    );
}
