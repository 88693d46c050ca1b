//! Move directives and the capability controllers issue them through.

use lift_core::{ElevatorId, FloorId};

/// A requested elevator move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Directive {
    pub elevator: ElevatorId,
    pub floor:    FloorId,
}

impl Directive {
    pub fn new(elevator: ElevatorId, floor: FloorId) -> Self {
        Self { elevator, floor }
    }
}

/// The move capability exposed to a [`Controller`][crate::Controller].
///
/// `move_to` only records the request.  Whoever owns the capability decides
/// when and how it is applied, and validates the elevator id at that point.
pub trait ControlledElevators {
    /// Instruct `elevator` to travel to `floor`.
    fn move_to(&mut self, elevator: ElevatorId, floor: FloorId);
}

/// An ordered buffer of directives, drained by the owner after each callback.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveQueue {
    pending: Vec<Directive>,
}

impl DirectiveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.pending.iter()
    }

    /// Remove and return every queued directive in issue order.
    ///
    /// The queue is empty afterwards, so no directive is handed out twice.
    pub fn take(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.pending)
    }

    /// Discard everything queued.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl ControlledElevators for DirectiveQueue {
    fn move_to(&mut self, elevator: ElevatorId, floor: FloorId) {
        self.pending.push(Directive { elevator, floor });
    }
}

impl IntoIterator for DirectiveQueue {
    type Item     = Directive;
    type IntoIter = std::vec::IntoIter<Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.pending.into_iter()
    }
}
