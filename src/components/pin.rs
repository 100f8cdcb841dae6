use super::LogicValue;
use serde::{Deserialize, Serialize};

/// Point on the schematic canvas.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}
impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns `self` moved by (`dx`, `dy`).
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Width and height of a component's bounding box.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PinDirection {
    Input,
    Output,
}

/// Connection point of a component.
///
/// The direction is fixed when the owning component is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    position: Position,
    value: LogicValue,
    direction: PinDirection,
    connected: bool,
}
impl Pin {
    pub(crate) fn new(direction: PinDirection, position: Position) -> Self {
        Self {
            position,
            value: LogicValue::Undefined,
            direction,
            connected: false,
        }
    }

    pub fn value(&self) -> LogicValue {
        self.value
    }

    /// Writes `value` and returns true if it differs from the previous one.
    pub fn set_value(&mut self, value: LogicValue) -> bool {
        let changed = self.value != value;
        self.value = value;
        changed
    }

    pub fn direction(&self) -> PinDirection {
        self.direction
    }

    pub fn is_input(&self) -> bool {
        self.direction == PinDirection::Input
    }

    pub fn is_output(&self) -> bool {
        self.direction == PinDirection::Output
    }

    /// Returns true if at least one wire is attached to this pin.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub(crate) fn set_connected(&mut self, connected: bool) {
        self.connected = connected
    }

    /// Absolute position on the canvas, only used for hit testing.
    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn move_by(&mut self, dx: i32, dy: i32) {
        self.position = self.position.offset(dx, dy)
    }

    /// Returns true if `point` is within `radius` of the pin on both axes.
    pub fn hit(&self, point: Position, radius: i32) -> bool {
        (self.position.x - point.x).abs() <= radius && (self.position.y - point.y).abs() <= radius
    }
}
