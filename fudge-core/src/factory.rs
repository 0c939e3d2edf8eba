//! Typed instantiation of controls and layouts by name.

use indexmap::IndexMap;

use fudge_theme::error::ThemeError;
use fudge_theme::registry::ThemeRegistry;

use crate::error::{CoreError, CoreResult};
use crate::layout::{BoxedLayout, LayoutFactory};
use crate::widget::{class_chain, BoxedWidget, GuiRoot, WidgetKind};

/// Builds a widget.
pub type WidgetConstructor = fn() -> BoxedWidget;

fn construct<W: WidgetKind>() -> BoxedWidget {
    Box::<W>::default()
}

/// Maps control type names to constructors and carries the [LayoutFactory].
#[derive(Debug, Clone)]
pub struct ControlFactory {
    constructors: IndexMap<&'static str, WidgetConstructor>,
    layouts: LayoutFactory,
}

impl Default for ControlFactory {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ControlFactory {
    /// A factory without any control or layout types.
    pub fn empty() -> Self {
        Self {
            constructors: IndexMap::new(),
            layouts: LayoutFactory::new(),
        }
    }

    /// A factory with [GuiRoot] and the built-in layouts registered.
    pub fn with_builtins() -> Self {
        let mut factory = Self {
            constructors: IndexMap::new(),
            layouts: LayoutFactory::with_builtins(),
        };
        factory.register_kind::<GuiRoot>();
        factory
    }

    /// Register `constructor` under `name`, replacing any previous registration.
    pub fn register(&mut self, name: &'static str, constructor: WidgetConstructor) {
        if self.constructors.insert(name, constructor).is_some() {
            log::warn!("Control type '{}' registered twice, keeping the latest", name);
        }
    }

    /// Register the widget type `W` under its type name.
    pub fn register_kind<W: WidgetKind>(&mut self) {
        self.register(W::TYPE_NAME, construct::<W>);
    }

    /// Construct the widget registered as `name`.
    pub fn create(&self, name: &str) -> CoreResult<BoxedWidget> {
        self.constructors
            .get(name)
            .map(|constructor| constructor())
            .ok_or_else(|| CoreError::UnknownControlType(name.to_string()))
    }

    /// Construct the layout registered as `name`.
    pub fn create_layout(&self, name: &str) -> CoreResult<BoxedLayout> {
        self.layouts.create(name)
    }

    /// Whether a control type `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered control type names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    /// The layout factory.
    pub fn layouts(&self) -> &LayoutFactory {
        &self.layouts
    }

    /// The layout factory, for registering custom layouts.
    pub fn layouts_mut(&mut self) -> &mut LayoutFactory {
        &mut self.layouts
    }

    /// Make sure every class of every registered control type has a style.
    ///
    /// Missing class styles are created inheriting from the style of the next base
    /// class, and the outermost base class inherits from the default style. Existing
    /// styles are left alone. Returns how many styles were created.
    pub fn register_class_styles(&self, registry: &mut ThemeRegistry) -> CoreResult<usize> {
        let root = registry.default_style().ok_or(ThemeError::NotInitialized)?;
        let mut created = 0;

        for constructor in self.constructors.values() {
            let widget = constructor();
            let mut parent = root;
            for class in class_chain(widget.as_ref()).into_iter().rev() {
                parent = match registry.style_by_name(class) {
                    Some(style) => style,
                    None => {
                        created += 1;
                        registry.create_inherited_style(parent, class)?
                    },
                };
            }
        }

        log::debug!("Registered {} class styles", created);
        Ok(created)
    }
}
