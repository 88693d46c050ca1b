//! Strongly typed identifier wrappers.
//!
//! Elevators, floors, and actors are all addressed by their position in the
//! simulation's storage, so each id is a thin `u32` index.  Keeping them as
//! distinct types stops a floor number from being passed where an elevator
//! index is expected.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an elevator in the simulation's roster.
    pub struct ElevatorId(u32);
}

typed_id! {
    /// Floor number, counted from the ground floor at 0.
    pub struct FloorId(u32);
}

typed_id! {
    /// Index of an actor in attachment order.
    pub struct ActorId(u32);
}

impl FloorId {
    /// Signed distance from `self` to `to`; positive means `to` is above.
    #[inline]
    pub fn delta_to(self, to: FloorId) -> i64 {
        i64::from(to.0) - i64::from(self.0)
    }
}
