//! # Theme Registry
//!
//! [ThemeRegistry] is the namespace for themes, styles, tokens and painter types.
//! There is no global state: every logical owner (an editor, a running application)
//! holds its own handle with its own lifecycle, so tearing one down never touches
//! another.
//!
//! ```rust
//! use fudge_theme::config::RegistryConfig;
//! use fudge_theme::ids;
//! use fudge_theme::registry::ThemeRegistry;
//! use vello::peniko::Color;
//!
//! let mut registry = ThemeRegistry::new(RegistryConfig::default());
//! registry.initialize();
//!
//! let base = registry.create_style("BaseButton").unwrap();
//! let button = registry.create_inherited_style(base, "Button").unwrap();
//! registry.set_value_override(base, ids::BORDER_WIDTH, 2.0f32).unwrap();
//! registry.set_value_override(button, ids::TEXT_COLOR, Color::from_rgb8(255, 0, 0)).unwrap();
//!
//! let theme = registry.main_theme();
//! assert_eq!(registry.get_float(button, theme, ids::BORDER_WIDTH), Some(2.0));
//! ```

use indexmap::IndexMap;
use slotmap::SlotMap;
use vello::peniko::Color;

use crate::config::{RegistryConfig, RegistryContext};
use crate::error::{ThemeError, ThemeResult};
use crate::id::{ResourceId, TokenTable};
use crate::painter::{PainterFactoryRegistry, PainterTag, PartPainter};
use crate::resolver::{Resolver, StyleGraph};
use crate::resources::StyleResources;
use crate::style::{Style, StyleEntry, StyleId};
use crate::theme::defaults;
use crate::theme::palette::ThemePalette;
use crate::theme::{Theme, ThemeId};
use crate::value::{FontDescriptor, FromResource, Padding, ResourceEnum, ResourceValue, TextureHandle};

/// A handle owning themes, styles, tokens and painter factories.
#[derive(Debug)]
pub struct ThemeRegistry {
    config: RegistryConfig,
    initialized: bool,
    themes: SlotMap<ThemeId, Theme>,
    theme_names: IndexMap<String, ThemeId>,
    styles: StyleGraph,
    style_names: IndexMap<String, StyleId>,
    tokens: TokenTable,
    painters: PainterFactoryRegistry,
    main_theme: Option<ThemeId>,
    default_style: Option<StyleId>,
}

impl ThemeRegistry {
    /// Create an uninitialized handle.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            initialized: false,
            themes: SlotMap::with_key(),
            theme_names: IndexMap::new(),
            styles: StyleGraph::with_key(),
            style_names: IndexMap::new(),
            tokens: TokenTable::new(),
            painters: PainterFactoryRegistry::new(),
            main_theme: None,
            default_style: None,
        }
    }

    /// The handle's configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The logical owner of this handle.
    pub fn context(&self) -> RegistryContext {
        self.config.context
    }

    /// Whether [initialize](Self::initialize) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Create the main theme, the default style and the built-in painter types.
    ///
    /// A dark theme named [DARK_THEME_NAME](defaults::DARK_THEME_NAME) is registered next to
    /// the main theme unless the main theme already uses that name.
    ///
    /// Returns `false` without doing anything if the handle is already initialized.
    pub fn initialize(&mut self) -> bool {
        if self.initialized {
            log::debug!("Theme registry ({:?}) already initialized", self.config.context);
            return false;
        }

        let mut main = Theme::new(self.config.main_theme.clone());
        defaults::populate(&mut main, &ThemePalette::light());
        let main = self.themes.insert(main);
        self.theme_names.insert(self.config.main_theme.clone(), main);
        self.main_theme = Some(main);

        if self.theme_names.contains_key(defaults::DARK_THEME_NAME) {
            log::debug!("Main theme is named '{}', skipping the built-in dark theme", defaults::DARK_THEME_NAME);
        } else {
            let mut dark = Theme::new(defaults::DARK_THEME_NAME);
            defaults::populate(&mut dark, &ThemePalette::dark());
            let dark = self.themes.insert(dark);
            self.theme_names.insert(defaults::DARK_THEME_NAME.to_string(), dark);
        }

        let default_style = self.styles.insert(Style::new(Some(self.config.default_style.clone()), None));
        self.style_names.insert(self.config.default_style.clone(), default_style);
        self.default_style = Some(default_style);

        self.painters.register_builtins();
        self.initialized = true;

        log::debug!("Theme registry ({:?}) initialized", self.config.context);
        true
    }

    /// Drop every style, theme, token and painter type owned by this handle.
    ///
    /// Returns `false` without doing anything if the handle is not initialized.
    pub fn uninitialize(&mut self) -> bool {
        if !self.initialized {
            log::debug!("Theme registry ({:?}) not initialized", self.config.context);
            return false;
        }

        self.themes.clear();
        self.theme_names.clear();
        self.styles.clear();
        self.style_names.clear();
        self.tokens.clear();
        self.painters.clear();
        self.main_theme = None;
        self.default_style = None;
        self.initialized = false;

        log::debug!("Theme registry ({:?}) uninitialized", self.config.context);
        true
    }

    fn ensure_initialized(&self) -> ThemeResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(ThemeError::NotInitialized)
        }
    }

    // Tokens

    /// The id interned for `name`.
    pub fn token(&mut self, name: &str) -> ResourceId {
        self.tokens.intern(name)
    }

    /// The name an id was interned from.
    pub fn token_name(&self, id: ResourceId) -> Option<&str> {
        self.tokens.name(id)
    }

    /// The token table.
    pub fn tokens(&self) -> &TokenTable {
        &self.tokens
    }

    // Themes

    /// Create an empty theme.
    pub fn create_theme(&mut self, name: &str) -> ThemeResult<ThemeId> {
        self.ensure_initialized()?;
        if self.theme_names.contains_key(name) {
            log::warn!("Theme '{}' already exists", name);
            return Err(ThemeError::duplicate_theme(name));
        }

        let id = self.themes.insert(Theme::new(name));
        self.theme_names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Create `dest` as a copy of every resource in `source`.
    pub fn duplicate_theme(&mut self, source: &str, dest: &str) -> ThemeResult<ThemeId> {
        self.ensure_initialized()?;
        let source_id = self
            .theme_by_name(source)
            .ok_or_else(|| ThemeError::theme_not_found(source))?;
        if self.theme_names.contains_key(dest) {
            log::warn!("Theme '{}' already exists", dest);
            return Err(ThemeError::duplicate_theme(dest));
        }

        let mut copy = self.themes[source_id].clone();
        copy.rename(dest);
        let id = self.themes.insert(copy);
        self.theme_names.insert(dest.to_string(), id);
        Ok(id)
    }

    /// Look up a theme.
    pub fn theme(&self, id: ThemeId) -> Option<&Theme> {
        self.themes.get(id)
    }

    /// Look up a theme for editing.
    pub fn theme_mut(&mut self, id: ThemeId) -> Option<&mut Theme> {
        self.themes.get_mut(id)
    }

    /// Find a theme by name.
    pub fn theme_by_name(&self, name: &str) -> Option<ThemeId> {
        self.theme_names.get(name).copied()
    }

    /// The theme created by [initialize](Self::initialize).
    pub fn main_theme(&self) -> Option<ThemeId> {
        self.main_theme
    }

    /// Names of all themes in creation order.
    pub fn theme_names(&self) -> impl Iterator<Item = &str> {
        self.theme_names.keys().map(String::as_str)
    }

    // Styles

    /// Create a root style called `name`.
    pub fn create_style(&mut self, name: &str) -> ThemeResult<StyleId> {
        self.insert_named_style(name, None)
    }

    /// The style called `name`, created as a root style if it does not exist.
    pub fn create_or_get_style(&mut self, name: &str) -> ThemeResult<StyleId> {
        match self.style_by_name(name) {
            Some(id) => Ok(id),
            None => self.create_style(name),
        }
    }

    /// Create a style called `name` inheriting from `parent`.
    pub fn create_inherited_style(&mut self, parent: StyleId, name: &str) -> ThemeResult<StyleId> {
        if !self.styles.contains_key(parent) {
            return Err(ThemeError::style_not_found(format!("{:?}", parent)));
        }
        self.insert_named_style(name, Some(parent))
    }

    fn insert_named_style(&mut self, name: &str, parent: Option<StyleId>) -> ThemeResult<StyleId> {
        self.ensure_initialized()?;
        if self.style_names.contains_key(name) {
            log::warn!("Style '{}' already exists", name);
            return Err(ThemeError::duplicate_style(name));
        }

        let id = self.styles.insert(Style::new(Some(name.to_string()), parent));
        self.style_names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Create an unnamed style owned by a single control.
    pub fn create_private_style(&mut self, parent: Option<StyleId>) -> ThemeResult<StyleId> {
        self.ensure_initialized()?;
        if let Some(parent) = parent {
            if !self.styles.contains_key(parent) {
                return Err(ThemeError::style_not_found(format!("{:?}", parent)));
            }
        }

        Ok(self.styles.insert(Style::new(None, parent)))
    }

    /// Release a private style. Named styles are never released this way.
    pub fn release_private_style(&mut self, id: StyleId) -> bool {
        match self.styles.get(id) {
            Some(style) if style.is_private() => {
                self.styles.remove(id);
                true
            },
            _ => false,
        }
    }

    /// Look up a style.
    pub fn style(&self, id: StyleId) -> Option<&Style> {
        self.styles.get(id)
    }

    /// Find a style by name.
    pub fn style_by_name(&self, name: &str) -> Option<StyleId> {
        self.style_names.get(name).copied()
    }

    /// The root style every class style falls back to.
    pub fn default_style(&self) -> Option<StyleId> {
        self.default_style
    }

    /// Names of all named styles in creation order.
    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.style_names.keys().map(String::as_str)
    }

    // Style entries

    /// Give `style` a direct value for `id`.
    pub fn set_value_override(
        &mut self,
        style: StyleId,
        id: ResourceId,
        value: impl Into<ResourceValue>,
    ) -> ThemeResult<()> {
        self.commit(style, id, StyleEntry::Value(value.into()))
    }

    /// Give `style` an enum value for `id`.
    pub fn set_enum_override<T: ResourceEnum>(&mut self, style: StyleId, id: ResourceId, value: T) -> ThemeResult<()> {
        self.commit(style, id, StyleEntry::Value(ResourceValue::enumeration(value)))
    }

    /// Assign a painter type name to `id` on `style`.
    pub fn set_painter_override(&mut self, style: StyleId, id: ResourceId, painter: impl Into<String>) -> ThemeResult<()> {
        self.commit(style, id, StyleEntry::Value(ResourceValue::Painter(painter.into())))
    }

    /// Make `id` on `style` resolve as `other_id` on the same style.
    pub fn set_resource_override(&mut self, style: StyleId, id: ResourceId, other_id: ResourceId) -> ThemeResult<()> {
        self.commit(style, id, StyleEntry::Redirect(other_id))
    }

    /// Make `id` on `style` resolve as `other_id` on `other_style`.
    ///
    /// Fails without changing anything if the new edge would close a cycle.
    pub fn set_resource_reference(
        &mut self,
        style: StyleId,
        id: ResourceId,
        other_style: StyleId,
        other_id: ResourceId,
    ) -> ThemeResult<()> {
        if !self.styles.contains_key(other_style) {
            return Err(ThemeError::style_not_found(format!("{:?}", other_style)));
        }
        self.commit(style, id, StyleEntry::Reference(other_style, other_id))
    }

    /// Remove the local entry for `id` on `style`.
    pub fn reset_resource_override(&mut self, style: StyleId, id: ResourceId) -> bool {
        self.styles
            .get_mut(style)
            .and_then(|style| style.remove_entry(id))
            .is_some()
    }

    fn commit(&mut self, style: StyleId, id: ResourceId, entry: StyleEntry) -> ThemeResult<()> {
        let Some(node) = self.styles.get(style) else {
            return Err(ThemeError::style_not_found(format!("{:?}", style)));
        };

        if let Err(err) = self.resolver().check_edge(style, id, &entry) {
            log::warn!("Rejected entry {} on style '{}': {}", id, node.label(), err);
            return Err(err);
        }

        self.styles[style].set_entry(id, entry);
        Ok(())
    }

    // Resolution

    /// A resolver over this handle's styles.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.styles, self.config.max_resolution_depth)
    }

    /// Resolve `id` on `style`, falling back to `theme` when `check_theme` is set.
    pub fn get_resource_value(
        &self,
        style: StyleId,
        theme: Option<ThemeId>,
        id: ResourceId,
        check_theme: bool,
    ) -> ThemeResult<Option<&ResourceValue>> {
        let theme = theme.and_then(|theme| self.themes.get(theme));
        self.resolver().resolve(style, id, theme, check_theme)
    }

    /// Resolve the first of `ids` over `styles`, see [Resolver::resolve_in_styles].
    pub fn resolve_in_styles(
        &self,
        styles: &[StyleId],
        theme: Option<ThemeId>,
        ids: &[ResourceId],
    ) -> ThemeResult<Option<&ResourceValue>> {
        let theme = theme.and_then(|theme| self.themes.get(theme));
        self.resolver().resolve_in_styles(styles, ids, theme)
    }

    /// Resolve `id` as a `T`. Misses, type mismatches and depth errors yield `None`.
    pub fn get<T: FromResource>(&self, style: StyleId, theme: Option<ThemeId>, id: ResourceId) -> Option<T> {
        self.get_resource_value(style, theme, id, true)
            .ok()
            .flatten()
            .and_then(T::from_resource)
    }

    /// Resolve a color.
    pub fn get_color(&self, style: StyleId, theme: Option<ThemeId>, id: ResourceId) -> Option<Color> {
        self.get(style, theme, id)
    }

    /// Resolve a float.
    pub fn get_float(&self, style: StyleId, theme: Option<ThemeId>, id: ResourceId) -> Option<f32> {
        self.get(style, theme, id)
    }

    /// Resolve an integer.
    pub fn get_int(&self, style: StyleId, theme: Option<ThemeId>, id: ResourceId) -> Option<i64> {
        self.get(style, theme, id)
    }

    /// Resolve a flag.
    pub fn get_bool(&self, style: StyleId, theme: Option<ThemeId>, id: ResourceId) -> Option<bool> {
        self.get(style, theme, id)
    }

    /// Resolve a string.
    pub fn get_string(&self, style: StyleId, theme: Option<ThemeId>, id: ResourceId) -> Option<String> {
        self.get(style, theme, id)
    }

    /// Resolve a font.
    pub fn get_font(&self, style: StyleId, theme: Option<ThemeId>, id: ResourceId) -> Option<FontDescriptor> {
        self.get(style, theme, id)
    }

    /// Resolve a texture handle.
    pub fn get_texture(&self, style: StyleId, theme: Option<ThemeId>, id: ResourceId) -> Option<TextureHandle> {
        self.get(style, theme, id)
    }

    /// Resolve padding.
    pub fn get_padding(&self, style: StyleId, theme: Option<ThemeId>, id: ResourceId) -> Option<Padding> {
        self.get(style, theme, id)
    }

    /// Resolve a painter type name.
    pub fn get_painter_name(&self, style: StyleId, theme: Option<ThemeId>, id: ResourceId) -> Option<&str> {
        self.get_resource_value(style, theme, id, true)
            .ok()
            .flatten()
            .and_then(ResourceValue::as_painter_name)
    }

    /// Resolve an enum of type `T`. A value of any other type counts as a miss.
    pub fn get_enum_resource<T: ResourceEnum>(&self, style: StyleId, theme: Option<ThemeId>, id: ResourceId) -> Option<T> {
        self.get_resource_value(style, theme, id, true)
            .ok()
            .flatten()
            .and_then(ResourceValue::as_enum::<T>)
    }

    /// Typed access over a chain of styles.
    pub fn resources(&self, styles: Vec<StyleId>, theme: Option<ThemeId>) -> StyleResources<'_> {
        StyleResources::new(self, styles, theme)
    }

    // Painters

    /// The painter factory registry.
    pub fn painters(&self) -> &PainterFactoryRegistry {
        &self.painters
    }

    /// The painter factory registry, for registering custom painter types.
    pub fn painters_mut(&mut self) -> &mut PainterFactoryRegistry {
        &mut self.painters
    }

    /// Construct the painter type called `name`.
    pub fn create_painter_by_name(&self, name: &str) -> Option<Box<dyn PartPainter>> {
        let painter = self.painters.create_by_name(name);
        if painter.is_none() {
            log::warn!("Painter type '{}' is empty, unregistered or abstract", name);
        }
        painter
    }

    /// Construct the painter `painter_id` resolves to on `style`.
    ///
    /// The resolved type must be `required_base` or derive from it; a painter of any
    /// other type is dropped right away and `None` is returned.
    pub fn create_painter(
        &self,
        style: StyleId,
        theme: Option<ThemeId>,
        painter_id: ResourceId,
        required_base: PainterTag,
    ) -> Option<Box<dyn PartPainter>> {
        let name = self.get_painter_name(style, theme, painter_id)?;
        self.create_painter_named(name, required_base)
    }

    /// Construct the painter type called `name` if it is `required_base` or derives from it.
    pub fn create_painter_named(&self, name: &str, required_base: PainterTag) -> Option<Box<dyn PartPainter>> {
        let painter = self.create_painter_by_name(name)?;
        if !self.painters.is_subtype(painter.tag(), required_base) {
            log::warn!(
                "Painter '{}' is not a '{}', discarding it",
                painter.tag(),
                required_base
            );
            return None;
        }
        Some(painter)
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids;
    use crate::painter::{FramedFieldPainter, PainterKind, TextPainter};

    fn registry() -> ThemeRegistry {
        let mut registry = ThemeRegistry::default();
        assert!(registry.initialize());
        registry
    }

    #[test]
    fn test_uninitialized_rejects_creation() {
        let mut registry = ThemeRegistry::default();
        assert!(matches!(registry.create_style("a"), Err(ThemeError::NotInitialized)));
        assert!(matches!(registry.create_theme("a"), Err(ThemeError::NotInitialized)));
        assert!(registry.main_theme().is_none());
    }

    #[test]
    fn test_duplicate_style() {
        let mut registry = registry();
        let a = registry.create_style("a").unwrap();
        assert!(matches!(registry.create_style("a"), Err(ThemeError::DuplicateStyle { .. })));
        assert_eq!(registry.create_or_get_style("a").unwrap(), a);

        let base = registry.create_style("base").unwrap();
        assert!(registry.create_inherited_style(base, "a").is_err());
    }

    #[test]
    fn test_duplicate_theme() {
        let mut registry = registry();
        let main = registry.main_theme().unwrap();
        registry.theme_mut(main).unwrap().set(ids::FILL_COLOR, 9i64);

        let copy = registry.duplicate_theme("main", "copy").unwrap();
        assert_eq!(registry.theme(copy).unwrap().get(ids::FILL_COLOR), Some(&ResourceValue::Int(9)));
        assert_eq!(registry.theme(copy).unwrap().name(), "copy");

        assert!(matches!(registry.duplicate_theme("nope", "x"), Err(ThemeError::ThemeNotFound { .. })));
        assert!(matches!(registry.duplicate_theme("main", "copy"), Err(ThemeError::DuplicateTheme { .. })));
        assert!(matches!(registry.create_theme("main"), Err(ThemeError::DuplicateTheme { .. })));
    }

    #[test]
    fn test_private_styles() {
        let mut registry = registry();
        let named = registry.create_style("named").unwrap();
        let private = registry.create_private_style(Some(named)).unwrap();

        assert!(registry.style(private).unwrap().is_private());
        assert!(!registry.release_private_style(named));
        assert!(registry.release_private_style(private));
        assert!(!registry.release_private_style(private));
    }

    #[test]
    fn test_reset_override() {
        let mut registry = registry();
        let style = registry.create_style("s").unwrap();
        registry.set_value_override(style, ids::FILL_COLOR, 1i64).unwrap();

        assert!(registry.reset_resource_override(style, ids::FILL_COLOR));
        assert!(!registry.reset_resource_override(style, ids::FILL_COLOR));
        assert_eq!(registry.get_int(style, None, ids::FILL_COLOR), None);
    }

    #[test]
    fn test_painter_name_resolution() {
        let registry = registry();
        let default = registry.default_style().unwrap();
        let main = registry.main_theme();

        assert_eq!(
            registry.get_painter_name(default, main, ids::BUTTON_PAINTER),
            Some(FramedFieldPainter::TAG.name())
        );

        let painter = registry
            .create_painter(default, main, ids::LABEL_PAINTER, PainterTag::PART_PAINTER)
            .unwrap();
        assert_eq!(painter.tag(), TextPainter::TAG);
    }

    #[test]
    fn test_tokens_cleared_on_uninitialize() {
        let mut registry = registry();
        let id = registry.token("Accent");
        assert_eq!(registry.token_name(id), Some("Accent"));

        assert!(registry.uninitialize());
        assert_eq!(registry.token_name(id), None);
        assert!(registry.painters().is_empty());
    }
}
