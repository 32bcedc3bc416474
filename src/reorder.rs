use crate::cards::CardDescriptor;
use crate::samples::Metric;

/// The dashboard card list plus its edit/drag state machine.
///
/// Two modes: `viewing` (cards are inert tiles, taps navigate) and
/// `editing` (cards grow a drag handle and can be reordered). Inside
/// editing there is a transient sub-state: `idle` or `dragging` one card.
/// There is no path from viewing straight into dragging — `begin_drag` is
/// a no-op unless edit mode is on.
#[derive(Debug, Clone)]
pub struct CardBoard {
    cards: Vec<CardDescriptor>,
    edit_mode: bool,
    drag: Option<DragState>,
}

#[derive(Debug, Clone)]
struct DragState {
    key: Metric,
    /// Key order at pick-up, so an aborted drag can be undone.
    origin: Vec<Metric>,
}

impl CardBoard {
    pub fn new(cards: Vec<CardDescriptor>) -> Self {
        debug_assert!(
            {
                let keys: Vec<_> = cards.iter().map(|c| c.key).collect();
                keys.iter().all(|k| keys.iter().filter(|o| *o == k).count() == 1)
            },
            "card keys must be unique"
        );
        Self {
            cards,
            edit_mode: false,
            drag: None,
        }
    }

    pub fn cards(&self) -> &[CardDescriptor] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// The card currently lifted, if any.
    pub fn dragging(&self) -> Option<Metric> {
        self.drag.as_ref().map(|d| d.key)
    }

    /// Flip between viewing and editing. Leaving edit mode with a drag
    /// still in flight aborts it: the pre-drag order is restored rather
    /// than silently committing a half-finished move.
    pub fn toggle_edit_mode(&mut self) {
        if self.edit_mode {
            if let Some(drag) = self.drag.take() {
                self.restore_order(&drag.origin);
            }
        }
        self.edit_mode = !self.edit_mode;
    }

    /// Pick up a card. Only valid while editing and idle; otherwise the
    /// gesture never starts.
    pub fn begin_drag(&mut self, key: Metric) {
        if !self.edit_mode || self.drag.is_some() {
            return;
        }
        if !self.cards.iter().any(|c| c.key == key) {
            return;
        }
        self.drag = Some(DragState {
            key,
            origin: self.cards.iter().map(|c| c.key).collect(),
        });
    }

    /// Move the lifted card to `slot`, shifting its neighbors. The list
    /// reorders live while the drag is in progress.
    pub fn update_drag(&mut self, slot: usize) {
        let Some(drag) = &self.drag else {
            return;
        };
        let Some(from) = self.cards.iter().position(|c| c.key == drag.key) else {
            return;
        };
        let to = slot.min(self.cards.len().saturating_sub(1));
        if from == to {
            return;
        }
        let card = self.cards.remove(from);
        self.cards.insert(to, card);
    }

    /// Drop the lifted card, committing wherever it currently sits. This
    /// is the only point at which a new order becomes canonical.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    fn restore_order(&mut self, origin: &[Metric]) {
        self.cards.sort_by_key(|c| {
            origin.iter().position(|&k| k == c.key).unwrap_or(usize::MAX)
        });
    }
}

/// Map a pointer offset from the top of the card list to the nearest slot.
/// Each slot is `slot_height` tall; offsets exactly on a slot boundary
/// resolve to the following slot (floor semantics), which is the
/// documented tie-break for drops landing between two neighbors.
pub fn slot_for_pointer(y: f32, slot_height: f32, len: usize) -> usize {
    if len == 0 || slot_height <= 0.0 {
        return 0;
    }
    let raw = (y / slot_height).floor() as i64;
    raw.clamp(0, len as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::default_cards;

    fn keys(board: &CardBoard) -> Vec<Metric> {
        board.cards().iter().map(|c| c.key).collect()
    }

    fn board() -> CardBoard {
        CardBoard::new(default_cards())
    }

    #[test]
    fn test_begin_drag_requires_edit_mode() {
        let mut b = board();
        let before = keys(&b);
        b.begin_drag(Metric::Glucose);
        b.update_drag(0);
        b.end_drag();
        assert_eq!(keys(&b), before, "drag while viewing must be a no-op");
        assert_eq!(b.dragging(), None);
    }

    #[test]
    fn test_reorder_commits_on_drop() {
        let mut b = board();
        b.toggle_edit_mode();
        // Drag the third card to the top.
        let third = keys(&b)[2];
        b.begin_drag(third);
        b.update_drag(0);
        b.end_drag();
        let after = keys(&b);
        assert_eq!(after[0], third);
        assert_eq!(after[1], Metric::Sleep);
        assert_eq!(after[2], Metric::Exercise);
    }

    #[test]
    fn test_reorder_preserves_key_multiset() {
        let mut b = board();
        let mut before = keys(&b);
        b.toggle_edit_mode();
        b.begin_drag(Metric::Vo2Max);
        b.update_drag(0);
        b.update_drag(4);
        b.update_drag(2);
        b.end_drag();
        let mut after = keys(&b);
        before.sort_by_key(|m| format!("{m:?}"));
        after.sort_by_key(|m| format!("{m:?}"));
        assert_eq!(before, after);
    }

    #[test]
    fn test_toggle_without_drag_keeps_order() {
        let mut b = board();
        let before = keys(&b);
        b.toggle_edit_mode();
        b.toggle_edit_mode();
        assert_eq!(keys(&b), before);
        assert!(!b.edit_mode());
    }

    #[test]
    fn test_toggle_mid_drag_aborts_and_restores() {
        let mut b = board();
        let before = keys(&b);
        b.toggle_edit_mode();
        b.begin_drag(Metric::Temperature);
        b.update_drag(0);
        assert_ne!(keys(&b), before, "live reorder should be visible");
        b.toggle_edit_mode();
        assert_eq!(keys(&b), before, "aborted drag must restore order");
        assert_eq!(b.dragging(), None);
        assert!(!b.edit_mode());
    }

    #[test]
    fn test_second_begin_drag_ignored_while_dragging() {
        let mut b = board();
        b.toggle_edit_mode();
        b.begin_drag(Metric::Sleep);
        b.begin_drag(Metric::Glucose);
        assert_eq!(b.dragging(), Some(Metric::Sleep));
    }

    #[test]
    fn test_update_drag_clamps_slot() {
        let mut b = board();
        b.toggle_edit_mode();
        b.begin_drag(Metric::Sleep);
        b.update_drag(999);
        b.end_drag();
        assert_eq!(*keys(&b).last().unwrap(), Metric::Sleep);
    }

    #[test]
    fn test_live_updates_idempotent() {
        let mut b = board();
        b.toggle_edit_mode();
        b.begin_drag(Metric::HeartRate);
        b.update_drag(5);
        let mid = keys(&b);
        b.update_drag(5);
        assert_eq!(keys(&b), mid);
        b.end_drag();
    }

    #[test]
    fn test_slot_for_pointer_boundaries() {
        // 64px slots, 9 cards.
        assert_eq!(slot_for_pointer(0.0, 64.0, 9), 0);
        assert_eq!(slot_for_pointer(63.9, 64.0, 9), 0);
        // Exactly on the boundary: resolves to the following slot.
        assert_eq!(slot_for_pointer(64.0, 64.0, 9), 1);
        assert_eq!(slot_for_pointer(-20.0, 64.0, 9), 0);
        assert_eq!(slot_for_pointer(10_000.0, 64.0, 9), 8);
        assert_eq!(slot_for_pointer(100.0, 64.0, 0), 0);
    }
}
