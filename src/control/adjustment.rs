//! Computing the brightness an operation should result in

use crate::external::brightness::BrightnessValue;
use serde::Deserialize;
use std::fmt;

/// A brightness change requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Increase,
    Decrease,
    SetMin,
    SetMax,
}

/// One of the ends of the brightness range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Min,
    Max,
}

impl Boundary {
    pub fn value(self) -> BrightnessValue {
        match self {
            Boundary::Min => BrightnessValue::MIN,
            Boundary::Max => BrightnessValue::MAX,
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Boundary::Min => write!(f, "min"),
            Boundary::Max => write!(f, "max"),
        }
    }
}

impl Operation {
    /// The boundary this operation moves towards
    pub fn boundary(self) -> Boundary {
        match self {
            Operation::Increase | Operation::SetMax => Boundary::Max,
            Operation::Decrease | Operation::SetMin => Boundary::Min,
        }
    }

    /// Whether applying the operation to `current` can't change anything,
    /// because `current` already sits at the boundary the operation moves to.
    pub fn is_noop_at(self, current: BrightnessValue) -> bool {
        current == self.boundary().value()
    }
}

/// Parameters of relative brightness changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Adjustment {
    /// How many percentage points a single increase or decrease moves
    pub step: u8,
    /// Results this close to a boundary are moved onto the boundary
    pub snap_margin: u8,
}

impl Default for Adjustment {
    fn default() -> Self {
        Adjustment {
            step: 33,
            snap_margin: 5,
        }
    }
}

impl Adjustment {
    /// Compute the brightness `op` should set, starting from `current`.
    ///
    /// Relative changes are clamped to the valid range and then snapped to
    /// the nearest boundary when they end up within `snap_margin` of it, so a
    /// step which doesn't divide 100 never leaves the display a few points
    /// short of fully on or off.
    pub fn apply(&self, current: BrightnessValue, op: Operation) -> BrightnessValue {
        let step = i32::from(self.step);
        let moved = match op {
            Operation::SetMin => return BrightnessValue::MIN,
            Operation::SetMax => return BrightnessValue::MAX,
            Operation::Increase => i32::from(current.get()) + step,
            Operation::Decrease => i32::from(current.get()) - step,
        };
        self.snap(BrightnessValue::clamped(moved))
    }

    fn snap(&self, value: BrightnessValue) -> BrightnessValue {
        if value.get() >= BrightnessValue::MAX.get().saturating_sub(self.snap_margin) {
            BrightnessValue::MAX
        } else if value.get() <= self.snap_margin {
            BrightnessValue::MIN
        } else {
            value
        }
    }
}

/// [Adjustment::apply] with the default step and snap margin
pub fn adjust(current: BrightnessValue, op: Operation) -> BrightnessValue {
    Adjustment::default().apply(current, op)
}
