//! Tests for the standard widgets inside a control tree

use fudge_core::layout::ListLayout;
use fudge_core::snapshot::WidgetDescriptor;
use fudge_core::tree::{ControlId, UiTree};
use fudge_core::widget::GuiRoot;
use fudge_theme::ids;
use fudge_theme::painter::{DrawCommand, RecordingCanvas};
use fudge_theme::registry::ThemeRegistry;
use fudge_theme::value::FontDescriptor;
use fudge_widgets::button::{Button, ButtonState};
use fudge_widgets::filled_box::FilledBox;
use fudge_widgets::label::Label;
use fudge_widgets::panel::Panel;
use fudge_widgets::standard_factory;
use nalgebra::Vector2;
use vello::kurbo::Rect;
use vello::peniko::Color;

fn registry() -> ThemeRegistry {
    let mut registry = ThemeRegistry::default();
    registry.initialize();
    standard_factory().register_class_styles(&mut registry).unwrap();
    registry
}

fn red() -> Color {
    Color::from_rgb8(255, 0, 0)
}

fn root_with(tree: &mut UiTree, child: ControlId, position: Vector2<f32>, size: Vector2<f32>) -> ControlId {
    let root = tree.create(GuiRoot, "root");
    tree.add_child(root, child).unwrap();
    tree.set_position(child, position).unwrap();
    tree.set_size(child, size).unwrap();
    root
}

#[test]
fn test_label_measure_follows_style_font() {
    let mut registry = registry();
    let mut tree = UiTree::new();
    let label = tree.create(Label::new("Hi"), "label");

    let default_font = tree.style_resources(label, &registry).unwrap().font(ids::TEXT_FONT).unwrap();
    let measured = tree.measure(label, &registry, Vector2::new(100.0, 100.0)).unwrap();
    assert_eq!(
        measured.size,
        Vector2::new(default_font.estimate_width("Hi"), default_font.line_height())
    );
    assert!(!measured.depends_on_space);

    let big = FontDescriptor::new("serif", 30.0);
    let style = registry.style_by_name("Label").unwrap();
    registry.set_value_override(style, ids::TEXT_FONT, big.clone()).unwrap();

    let measured = tree.measure(label, &registry, Vector2::new(1.0, 1.0)).unwrap();
    assert_eq!(measured.size, Vector2::new(big.estimate_width("Hi"), big.line_height()));
    assert_eq!(measured.min, measured.size);
}

#[test]
fn test_panel_lists_labels() {
    let registry = registry();
    let mut tree = UiTree::new();
    let panel = tree.create(Panel::new(), "panel");
    tree.set_layout(panel, Some(Box::new(ListLayout::vertical()))).unwrap();

    let labels: Vec<_> = ["one", "two", "three"]
        .iter()
        .map(|text| {
            let label = tree.create(Label::new(*text), *text);
            tree.add_child(panel, label).unwrap();
            label
        })
        .collect();

    tree.update_layout(panel, &registry, Vector2::new(200.0, 200.0)).unwrap();
    let line = tree.size(labels[0]).unwrap().y;
    assert!(line > 0.0);
    assert_eq!(tree.position(labels[1]).unwrap().y, line);
    assert_eq!(tree.position(labels[2]).unwrap().y, line * 2.0);
}

#[test]
fn test_pressed_button_paints_pressed_background() {
    let mut registry = registry();
    let button_style = registry.style_by_name("Button").unwrap();
    registry.set_value_override(button_style, ids::BUTTON_TEXT_COLOR, red()).unwrap();

    let mut tree = UiTree::new();
    let button = tree.create(Button::new().with_text("OK"), "ok");
    let root = root_with(&mut tree, button, Vector2::new(10.0, 10.0), Vector2::new(80.0, 30.0));
    tree.refresh_all_painters(root, &registry).unwrap();
    tree.with_widget_mut::<Button, _>(button, |button| button.set_state(ButtonState::Pressed));

    let pressed = tree
        .style_resources(button, &registry)
        .unwrap()
        .color(ids::BACKGROUND_PRESSED_COLOR)
        .unwrap();

    let mut canvas = RecordingCanvas::new();
    tree.paint(root, &registry, &mut canvas).unwrap();
    let commands = canvas.commands();

    match &commands[0] {
        DrawCommand::FillRect { rect, color } => {
            assert_eq!(*rect, Rect::new(10.0, 10.0, 90.0, 40.0));
            assert_eq!(color.components, pressed.components);
        },
        other => panic!("expected a background fill, got {:?}", other),
    }
    assert!(commands.iter().any(|command| matches!(
        command,
        DrawCommand::Text { text, color, .. } if text == "OK" && color.components == red().components
    )));
}

#[test]
fn test_button_rejects_non_state_painter() {
    let mut registry = registry();
    let base = registry.style_by_name("BaseButton").unwrap();
    registry.set_painter_override(base, ids::BUTTON_PAINTER, "TextPainter").unwrap();

    let mut tree = UiTree::new();
    let button = tree.create(Button::new().with_text("OK"), "ok");
    tree.refresh_painters(button, &registry).unwrap();

    let painters = tree.get(button).unwrap().painters();
    assert!(!painters.contains(ids::BUTTON_PAINTER));
    assert!(painters.contains(ids::LABEL_PAINTER));
}

#[test]
fn test_button_inherits_from_base_button_style() {
    let mut registry = registry();
    let base = registry.style_by_name("BaseButton").unwrap();
    registry.set_value_override(base, ids::TEXT_COLOR, Color::BLACK).unwrap();
    registry.set_value_override(base, ids::BORDER_WIDTH, 2.0f32).unwrap();
    let button_style = registry.style_by_name("Button").unwrap();
    registry.set_value_override(button_style, ids::TEXT_COLOR, red()).unwrap();

    let mut tree = UiTree::new();
    let button = tree.create(Button::new(), "button");
    let resources = tree.style_resources(button, &registry).unwrap();
    assert_eq!(resources.color(ids::TEXT_COLOR).unwrap().components, red().components);
    assert_eq!(resources.float(ids::BORDER_WIDTH), Some(2.0));

    tree.refresh_painters(button, &registry).unwrap();
    let measured = tree.measure(button, &registry, Vector2::new(100.0, 100.0)).unwrap();
    let padding = resources.padding(ids::INNER_PADDING).unwrap();
    assert_eq!(measured.size.x, padding.width() + 4.0);
}

#[test]
fn test_filled_box_uses_style_color() {
    let mut registry = registry();
    let style = registry.style_by_name("FilledBox").unwrap();
    registry.set_value_override(style, ids::FILL_COLOR, red()).unwrap();

    let mut tree = UiTree::new();
    let filled = tree.create(FilledBox::new(), "fill");
    let root = root_with(&mut tree, filled, Vector2::new(10.0, 20.0), Vector2::new(5.0, 5.0));

    let mut canvas = RecordingCanvas::new();
    tree.paint(root, &registry, &mut canvas).unwrap();

    match canvas.commands() {
        [DrawCommand::FillRect { rect, color }] => {
            assert_eq!(*rect, Rect::new(10.0, 20.0, 15.0, 25.0));
            assert_eq!(color.components, red().components);
        },
        other => panic!("expected a single fill, got {:?}", other),
    }
}

#[test]
fn test_widget_tree_round_trip() {
    let mut registry = registry();
    let factory = standard_factory();

    let descriptor = WidgetDescriptor::new("GuiRoot", "root").with_child(
        WidgetDescriptor::new("Panel", "panel")
            .with_layout("ListLayout")
            .with_child(WidgetDescriptor::new("Label", "title"))
            .with_child(WidgetDescriptor::new("Button", "ok"))
            .with_child(WidgetDescriptor::new("FilledBox", "swatch")),
    );

    let mut tree = UiTree::new();
    let root = tree.instantiate(&descriptor, &factory, &mut registry).unwrap();
    let title = tree.find(root, "title").unwrap();
    tree.with_widget_mut::<Label, _>(title, |label| label.set_text("Welcome"));
    let swatch = tree.find(root, "swatch").unwrap();
    tree.with_widget_mut::<FilledBox, _>(swatch, |filled| filled.set_color(Some(red())));

    let snapshot = tree.snapshot(root, &registry).unwrap();
    let json = snapshot.to_json().unwrap();

    let mut rebuilt = UiTree::new();
    let new_root = rebuilt
        .instantiate(&WidgetDescriptor::from_json(&json).unwrap(), &factory, &mut registry)
        .unwrap();
    assert_eq!(rebuilt.snapshot(new_root, &registry).unwrap(), snapshot);

    let title = rebuilt.find(new_root, "title").unwrap();
    assert_eq!(rebuilt.widget::<Label>(title).unwrap().text(), "Welcome");
    let swatch = rebuilt.find(new_root, "swatch").unwrap();
    let color = rebuilt.widget::<FilledBox>(swatch).unwrap().color().unwrap();
    assert_eq!(color.components, red().components);
}
