//! # Part Painters
//!
//! A part painter draws one visual fragment of a control (a framed background, a
//! line of text, an image). Painters are chosen by style: a control asks its style
//! for a painter id, the style resolves that id to a painter *type name*, and the
//! [PainterFactoryRegistry] constructs the named type.
//!
//! Painter types form a small single-inheritance hierarchy described by
//! [PainterTag]s. Abstract tags (like [PainterTag::PART_PAINTER]) exist only as
//! bases and cannot be constructed. The full set of ancestors of every tag is
//! computed when the tag is registered, so checking whether a constructed painter
//! fits the base a caller asked for is a set lookup.
//!
//! ```rust
//! use fudge_theme::painter::{PainterFactoryRegistry, PainterTag, FramedFieldPainter, PainterKind};
//!
//! let painters = PainterFactoryRegistry::with_builtins();
//!
//! assert!(painters.is_subtype(FramedFieldPainter::TAG, PainterTag::STATE_PAINTER));
//! assert!(painters.create_by_name("FramedFieldPainter").is_some());
//! assert!(painters.create_by_name("PartPainter").is_none());
//! ```

use std::any::Any;
use std::fmt;

use bitflags::bitflags;
use indexmap::IndexMap;
use vello::kurbo::Rect;

use crate::error::{ThemeError, ThemeResult};
use crate::id::ResourceId;
use crate::resources::StyleResources;
use crate::value::Padding;

mod aligned_image;
mod canvas;
mod framed_field;
mod state_order;
mod text;

pub use aligned_image::AlignedImagePainter;
pub use canvas::{Canvas, DrawCommand, RecordingCanvas};
pub use framed_field::FramedFieldPainter;
pub use state_order::{StateOrder, StateVisuals};
pub use text::TextPainter;

/// Names a painter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PainterTag(&'static str);

impl PainterTag {
    /// Root of the painter hierarchy.
    pub const PART_PAINTER: Self = Self("PartPainter");
    /// Abstract base of painters whose output depends on [PaintState].
    pub const STATE_PAINTER: Self = Self("StatePainter");

    /// Create a tag.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The type name.
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for PainterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

bitflags! {
    /// Interaction state a painter may reflect.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PaintState: u8 {
        /// The pointer is over the control.
        const HOVERED = 1 << 0;
        /// The control is being pressed.
        const PRESSED = 1 << 1;
        /// The control has keyboard focus.
        const FOCUSED = 1 << 2;
        /// The control does not accept input.
        const DISABLED = 1 << 3;
        /// The control is toggled down.
        const DOWN = 1 << 4;
    }
}

/// Id indirection handed to a painter on initialization.
///
/// Painters look up generic slots (for example [ids::BACKGROUND_COLOR](crate::ids::BACKGROUND_COLOR))
/// through the mapping, which lets one painter type serve controls that store
/// their resources under different ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PainterMapping {
    map: IndexMap<ResourceId, ResourceId>,
}

impl PainterMapping {
    /// An identity mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `from` to `to`.
    pub fn with(mut self, from: ResourceId, to: ResourceId) -> Self {
        self.map.insert(from, to);
        self
    }

    /// Map `from` to `to`.
    pub fn insert(&mut self, from: ResourceId, to: ResourceId) {
        self.map.insert(from, to);
    }

    /// The id to use for the generic slot `id`.
    pub fn map(&self, id: ResourceId) -> ResourceId {
        self.map.get(&id).copied().unwrap_or(id)
    }
}

/// A polymorphic leaf renderer configured from style resources.
pub trait PartPainter: Any + fmt::Debug {
    /// The concrete painter type.
    fn tag(&self) -> PainterTag;

    /// Read resources from the owning control's style.
    fn initialize(&mut self, resources: &StyleResources<'_>, mapping: &PainterMapping);

    /// Draw into `rect`.
    fn draw(&self, canvas: &mut dyn Canvas, rect: Rect, state: PaintState);

    /// Space the painter occupies around content drawn inside it.
    fn content_padding(&self) -> Padding {
        Padding::ZERO
    }

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A constructible painter type.
pub trait PainterKind: PartPainter + Default {
    /// The tag this type registers under.
    const TAG: PainterTag;
    /// The tag of the direct base type.
    const BASE: PainterTag;
}

type Constructor = fn() -> Box<dyn PartPainter>;

fn construct<P: PainterKind>() -> Box<dyn PartPainter> {
    Box::<P>::default()
}

#[derive(Debug, Clone)]
struct PainterEntry {
    base: Option<PainterTag>,
    ancestors: Vec<PainterTag>,
    constructor: Option<Constructor>,
}

/// Maps painter type names to constructors.
#[derive(Debug, Clone)]
pub struct PainterFactoryRegistry {
    entries: IndexMap<&'static str, PainterEntry>,
}

impl PainterFactoryRegistry {
    /// A registry holding only the abstract root [PainterTag::PART_PAINTER].
    pub fn new() -> Self {
        let mut entries = IndexMap::new();
        entries.insert(
            PainterTag::PART_PAINTER.name(),
            PainterEntry {
                base: None,
                ancestors: vec![PainterTag::PART_PAINTER],
                constructor: None,
            },
        );

        Self { entries }
    }

    /// A registry with the built-in painter types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    pub(crate) fn register_builtins(&mut self) {
        let results = [
            self.register_abstract(PainterTag::STATE_PAINTER, PainterTag::PART_PAINTER),
            self.register::<FramedFieldPainter>(),
            self.register::<TextPainter>(),
            self.register::<AlignedImagePainter>(),
        ];

        for result in results {
            if let Err(err) = result {
                log::warn!("Built-in painter registration failed: {}", err);
            }
        }
    }

    /// Register an abstract tag deriving from `base`.
    pub fn register_abstract(&mut self, tag: PainterTag, base: PainterTag) -> ThemeResult<()> {
        self.insert(tag, base, None)
    }

    /// Register the constructible painter type `P`.
    pub fn register<P: PainterKind>(&mut self) -> ThemeResult<()> {
        self.insert(P::TAG, P::BASE, Some(construct::<P> as Constructor))
    }

    fn insert(&mut self, tag: PainterTag, base: PainterTag, constructor: Option<Constructor>) -> ThemeResult<()> {
        if tag.name().is_empty() {
            return Err(ThemeError::painter_registration(tag.name(), "empty name"));
        }

        if self.entries.contains_key(tag.name()) {
            return Err(ThemeError::painter_registration(tag.name(), "already registered"));
        }

        let Some(base_entry) = self.entries.get(base.name()) else {
            return Err(ThemeError::painter_registration(
                tag.name(),
                format!("base '{}' is not registered", base),
            ));
        };

        let mut ancestors = Vec::with_capacity(base_entry.ancestors.len() + 1);
        ancestors.push(tag);
        ancestors.extend_from_slice(&base_entry.ancestors);

        self.entries.insert(
            tag.name(),
            PainterEntry {
                base: Some(base),
                ancestors,
                constructor,
            },
        );

        log::debug!("Registered painter type '{}' (base '{}')", tag, base);
        Ok(())
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether `name` is registered without a constructor.
    pub fn is_abstract(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|entry| entry.constructor.is_none())
    }

    /// The direct base of `name`.
    pub fn base_of(&self, name: &str) -> Option<PainterTag> {
        self.entries.get(name).and_then(|entry| entry.base)
    }

    /// Whether `tag` is `base` or derives from it.
    pub fn is_subtype(&self, tag: PainterTag, base: PainterTag) -> bool {
        self.entries
            .get(tag.name())
            .is_some_and(|entry| entry.ancestors.contains(&base))
    }

    /// Construct the painter type called `name`.
    ///
    /// Returns `None` for empty, unregistered and abstract names.
    pub fn create_by_name(&self, name: &str) -> Option<Box<dyn PartPainter>> {
        if name.is_empty() {
            return None;
        }

        let constructor = self.entries.get(name)?.constructor?;
        Some(constructor())
    }

    /// Every registered tag in registration order.
    pub fn tags(&self) -> impl Iterator<Item = PainterTag> + '_ {
        self.entries.values().filter_map(|entry| entry.ancestors.first().copied())
    }

    /// Constructible tags deriving from `base`, for type pickers.
    pub fn concrete_subtypes(&self, base: PainterTag) -> Vec<PainterTag> {
        self.entries
            .values()
            .filter(|entry| entry.constructor.is_some() && entry.ancestors.contains(&base))
            .filter_map(|entry| entry.ancestors.first().copied())
            .collect()
    }

    /// Drop every registration except the root.
    pub fn clear(&mut self) {
        self.entries.truncate(1);
    }

    /// Number of registered tags, the root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether only the root is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }
}

impl Default for PainterFactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}
