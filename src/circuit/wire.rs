use super::{ComponentHandle, PinRef};
use crate::Position;

/// A conductor between two pins. It carries no value of its own, the simulation copies the value
/// of its output side pin onto its input side pin.
///
/// Wires are built in two stages, [started](super::Circuit::start_wire) from one pin and later
/// [completed](super::Circuit::set_end_pin) with the other one. An unfinished wire is inert.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    start: PinRef,
    end: Option<PinRef>,
    waypoints: Vec<Position>,
    selected: bool,
}
impl Wire {
    pub(super) fn new(start: PinRef) -> Self {
        Self {
            start,
            end: None,
            waypoints: Vec::new(),
            selected: false,
        }
    }

    pub fn start(&self) -> PinRef {
        self.start
    }

    pub fn end(&self) -> Option<PinRef> {
        self.end
    }

    pub(super) fn set_end(&mut self, end: PinRef) {
        self.end = Some(end)
    }

    pub fn is_complete(&self) -> bool {
        self.end.is_some()
    }

    /// Returns true if either end of the wire is `pin`.
    pub fn touches(&self, pin: PinRef) -> bool {
        self.start == pin || self.end == Some(pin)
    }

    /// Returns true if either end of the wire belongs to `component`.
    pub fn touches_component(&self, component: ComponentHandle) -> bool {
        self.start.component == component
            || self.end.map(|end| end.component) == Some(component)
    }

    /// Returns both ends of the wire, the start first.
    pub fn ends(&self) -> impl Iterator<Item = PinRef> {
        std::iter::once(self.start).chain(self.end)
    }

    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    pub fn add_waypoint(&mut self, point: Position) {
        self.waypoints.push(point)
    }

    pub fn clear_waypoints(&mut self) {
        self.waypoints.clear()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected
    }
}
