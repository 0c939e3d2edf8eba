use crate::painter::PaintState;
use crate::value::{FromResource, ResourceValue};

/// The order in which a state painter checks interaction states.
///
/// A control can be hovered, pressed and focused at once, but a painter shows
/// the visuals of one state. The first entry whose flags are all set in the
/// control's state is the one drawn. An empty entry matches any state, so it can
/// end a list as a catch-all.
///
/// Stored as a resource under [STATE_ORDER](crate::ids::STATE_ORDER), so the
/// order resolves through the style chain like any other value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateOrder(Vec<PaintState>);

impl StateOrder {
    /// Create an order from entries checked first to last.
    pub fn new(entries: impl IntoIterator<Item = PaintState>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Entries in checking order.
    pub fn entries(&self) -> &[PaintState] {
        &self.0
    }

    /// The first entry matching `state`, empty when none does.
    pub fn matching(&self, state: PaintState) -> PaintState {
        self.0
            .iter()
            .copied()
            .find(|entry| state.contains(*entry))
            .unwrap_or_else(PaintState::empty)
    }
}

impl Default for StateOrder {
    /// Disabled first, then down, pressed, hovered and focused.
    fn default() -> Self {
        Self::new([
            PaintState::DISABLED,
            PaintState::DOWN,
            PaintState::PRESSED,
            PaintState::HOVERED,
            PaintState::FOCUSED,
        ])
    }
}

impl From<StateOrder> for ResourceValue {
    fn from(value: StateOrder) -> Self {
        Self::StateOrder(value)
    }
}

impl FromResource for StateOrder {
    fn from_resource(value: &ResourceValue) -> Option<Self> {
        value.as_state_order().cloned()
    }
}

/// One value per state a state painter can show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVisuals<T> {
    /// No state matched.
    pub idle: T,
    /// Shown for [PaintState::HOVERED].
    pub hovered: T,
    /// Shown for [PaintState::PRESSED].
    pub pressed: T,
    /// Shown for [PaintState::DOWN].
    pub down: T,
    /// Shown for [PaintState::FOCUSED].
    pub focused: T,
    /// Shown for [PaintState::DISABLED].
    pub disabled: T,
}

impl<T: Copy> StateVisuals<T> {
    /// The same value for every state.
    pub fn uniform(value: T) -> Self {
        Self {
            idle: value,
            hovered: value,
            pressed: value,
            down: value,
            focused: value,
            disabled: value,
        }
    }

    /// The value for an entry returned by [StateOrder::matching].
    pub fn get(&self, matched: PaintState) -> T {
        if matched.contains(PaintState::DISABLED) {
            self.disabled
        } else if matched.contains(PaintState::DOWN) {
            self.down
        } else if matched.contains(PaintState::PRESSED) {
            self.pressed
        } else if matched.contains(PaintState::HOVERED) {
            self.hovered
        } else if matched.contains(PaintState::FOCUSED) {
            self.focused
        } else {
            self.idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let order = StateOrder::default();
        assert_eq!(order.matching(PaintState::HOVERED | PaintState::PRESSED), PaintState::PRESSED);
        assert_eq!(
            order.matching(PaintState::DISABLED | PaintState::HOVERED),
            PaintState::DISABLED
        );
        assert_eq!(order.matching(PaintState::FOCUSED), PaintState::FOCUSED);
        assert_eq!(order.matching(PaintState::empty()), PaintState::empty());
    }

    #[test]
    fn test_combined_entry_needs_every_flag() {
        let order = StateOrder::new([PaintState::HOVERED | PaintState::FOCUSED, PaintState::FOCUSED]);
        assert_eq!(order.matching(PaintState::FOCUSED), PaintState::FOCUSED);
        assert_eq!(
            order.matching(PaintState::FOCUSED | PaintState::HOVERED),
            PaintState::HOVERED | PaintState::FOCUSED
        );
        assert_eq!(order.matching(PaintState::HOVERED), PaintState::empty());
    }

    #[test]
    fn test_empty_entry_is_catch_all() {
        let order = StateOrder::new([PaintState::empty(), PaintState::DISABLED]);
        assert_eq!(order.matching(PaintState::DISABLED), PaintState::empty());
    }

    #[test]
    fn test_visuals_pick_matched_state() {
        let mut visuals = StateVisuals::uniform(0);
        visuals.down = 1;
        visuals.focused = 2;
        assert_eq!(visuals.get(PaintState::DOWN), 1);
        assert_eq!(visuals.get(PaintState::FOCUSED), 2);
        assert_eq!(visuals.get(PaintState::HOVERED), 0);
        assert_eq!(visuals.get(PaintState::empty()), 0);
    }

    #[test]
    fn test_order_is_a_resource() {
        let value = ResourceValue::from(StateOrder::new([PaintState::FOCUSED]));
        assert_eq!(value.kind(), "state_order");
        assert_eq!(
            StateOrder::from_resource(&value).map(|order| order.entries().to_vec()),
            Some(vec![PaintState::FOCUSED])
        );
        assert_eq!(StateOrder::from_resource(&ResourceValue::Int(1)), None);
    }
}
