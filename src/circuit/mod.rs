//! The circuit arena: placed components, the wires between their pins and the simulation engine.
mod handles;
#[macro_use]
mod simulation;
mod wire;

pub use handles::*;
pub use simulation::*;
pub use wire::*;

use crate::components::{Component, ComponentKind, LogicValue, Pin, Position};
use crate::data_structures::Slab;
use casey::pascal;
use concat_idents::concat_idents;
use log::debug;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::path::Path;
use std::time::Instant;

use ComponentKind::*;

/// Structural misuse of a [Circuit].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CircuitError {
    UnknownComponent(ComponentHandle),
    UnknownWire(WireHandle),
    UnknownPin(PinRef),
    /// The wire already has an end pin.
    WireAlreadyComplete(WireHandle),
    /// A wire can't end on the pin it started from.
    SelfConnection(PinRef),
    /// The component doesn't have the state the operation needs, e.g. toggling an [And] gate.
    WrongKind {
        component: ComponentHandle,
        kind: ComponentKind,
        expected: ComponentKind,
    },
}
impl Display for CircuitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CircuitError::UnknownComponent(handle) => write!(f, "{} doesn't exist", handle),
            CircuitError::UnknownWire(handle) => write!(f, "{} doesn't exist", handle),
            CircuitError::UnknownPin(pin) => write!(f, "{} doesn't exist", pin),
            CircuitError::WireAlreadyComplete(handle) => {
                write!(f, "{} already has an end pin", handle)
            }
            CircuitError::SelfConnection(pin) => write!(f, "can't connect {} to itself", pin),
            CircuitError::WrongKind {
                component,
                kind,
                expected,
            } => write!(f, "{} is a {}, expected: {}", component, kind, expected),
        }
    }
}
impl std::error::Error for CircuitError {}

/// Places a component of the kind named in snake case, e.g. `add_input_switch`.
macro_rules! component_constructors {
    ($name:ident,$($rest:ident),*) => {
        component_constructors!($name);
        component_constructors!($($rest),*);
    };
    ($name:ident) => {
        concat_idents!(add_name = add, _, $name {
            /// Places a new component of this kind with its top left corner at `position`.
            pub fn add_name(&mut self, position: Position) -> ComponentHandle {
                self.add_component(pascal!($name), position)
            }
        });
    };
}

/// A flat collection of components and the wires between their pins.
///
/// Components and wires are stored in [Slabs](Slab) and referenced through handles, so removing
/// one never invalidates the handles to the rest. Values only move through the circuit when it is
/// [simulated](Circuit::simulate).
///
/// # Example
/// ```
/// # use logisim_core::{Circuit, LogicValue::*, Position};
/// let mut c = Circuit::new();
///
/// let a = c.add_input_switch(Position::new(0, 0));
/// let b = c.add_input_switch(Position::new(0, 60));
/// let and = c.add_and(Position::new(100, 20));
/// let led = c.add_output_led(Position::new(200, 20));
///
/// c.connect(a.pin(0), and.pin(0)).unwrap();
/// c.connect(b.pin(0), and.pin(1)).unwrap();
/// c.connect(and.pin(2), led.pin(0)).unwrap();
///
/// c.set_switch(a, true).unwrap();
/// c.set_switch(b, true).unwrap();
/// c.simulate().unwrap();
///
/// assert_eq!(c.value(led.pin(0)), High);
/// assert!(c.component(led).unwrap().is_lit());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    components: Slab<Component>,
    wires: Slab<Wire>,
    config: SimulationConfig,
    #[cfg(feature = "debug_probes")]
    probes: Vec<Probe>,
}
impl Circuit {
    /// Returns an empty [Circuit] with the default [SimulationConfig].
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns an empty [Circuit] simulated with `config`.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config
    }

    component_constructors!(
        and,
        or,
        not,
        nand,
        nor,
        xor,
        xnor,
        buffer,
        input_switch,
        output_led,
        clock_generator
    );

    /// Places a new component of `kind` with its top left corner at `position`.
    pub fn add_component(&mut self, kind: ComponentKind, position: Position) -> ComponentHandle {
        self.insert_component(Component::new(kind, position))
    }

    /// Places an already built component, its pins lose any connection flag they carried.
    pub fn insert_component(&mut self, mut component: Component) -> ComponentHandle {
        for pin in component.pins_mut() {
            pin.set_connected(false);
        }
        let handle = ComponentHandle(self.components.insert(component));
        debug!("added {}", handle);
        handle
    }

    /// Removes a component together with every wire attached to it.
    pub fn remove_component(&mut self, handle: ComponentHandle) -> Result<Component, CircuitError> {
        let component = self
            .components
            .remove(handle.0)
            .ok_or(CircuitError::UnknownComponent(handle))?;

        let attached: Vec<_> = self
            .wires
            .iter()
            .filter(|(_, wire)| wire.touches_component(handle))
            .map(|(index, _)| WireHandle(index))
            .collect();
        for wire in attached {
            self.remove_wire(wire)?;
        }

        #[cfg(feature = "debug_probes")]
        self.probes.retain(|probe| probe.pin.component != handle);

        debug!("removed {} ({})", handle, component.kind());
        Ok(component)
    }

    pub fn component(&self, handle: ComponentHandle) -> Option<&Component> {
        self.components.get(handle.0)
    }

    /// Mutable access for presentation changes and per-kind settings. Pin values only change through
    /// the circuit.
    pub fn component_mut(&mut self, handle: ComponentHandle) -> Option<&mut Component> {
        self.components.get_mut(handle.0)
    }

    fn component_or_err(&mut self, handle: ComponentHandle) -> Result<&mut Component, CircuitError> {
        self.components
            .get_mut(handle.0)
            .ok_or(CircuitError::UnknownComponent(handle))
    }

    /// Iterates over the components in placement order, until a removed slot gets reused.
    pub fn components(&self) -> impl Iterator<Item = (ComponentHandle, &Component)> {
        self.components
            .iter()
            .map(|(index, component)| (ComponentHandle(index), component))
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn wire(&self, handle: WireHandle) -> Option<&Wire> {
        self.wires.get(handle.0)
    }

    /// Mutable access to a wire's waypoints and selection, its ends only change through the circuit.
    pub fn wire_mut(&mut self, handle: WireHandle) -> Option<&mut Wire> {
        self.wires.get_mut(handle.0)
    }

    pub fn wires(&self) -> impl Iterator<Item = (WireHandle, &Wire)> {
        self.wires.iter().map(|(index, wire)| (WireHandle(index), wire))
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Returns true if the circuit has no components and no wires.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.wires.is_empty()
    }

    /// Removes every component and wire.
    pub fn clear(&mut self) {
        self.components.clear();
        self.wires.clear();
        #[cfg(feature = "debug_probes")]
        self.probes.clear();
    }

    pub fn pin(&self, pin: PinRef) -> Option<&Pin> {
        self.components.get(pin.component.0)?.pin(pin.pin)
    }

    fn pin_mut(&mut self, pin: PinRef) -> Result<&mut Pin, CircuitError> {
        self.components
            .get_mut(pin.component.0)
            .and_then(|component| component.pins_mut().get_mut(pin.pin))
            .ok_or(CircuitError::UnknownPin(pin))
    }

    /// Returns the value of `pin`, [Undefined](LogicValue::Undefined) if it doesn't exist.
    pub fn value(&self, pin: PinRef) -> LogicValue {
        self.pin(pin).map(Pin::value).unwrap_or_default()
    }

    /// Writes `value` straight into `pin`.
    ///
    /// Input pins of non source components are reset at the start of every simulation, so this is
    /// mostly useful on outputs.
    pub fn set_value(&mut self, pin: PinRef, value: LogicValue) -> Result<(), CircuitError> {
        self.pin_mut(pin)?.set_value(value);
        Ok(())
    }

    /// Returns the topmost component under `point`.
    pub fn component_at(&self, point: Position) -> Option<ComponentHandle> {
        self.components()
            .filter(|(_, component)| component.contains(point))
            .map(|(handle, _)| handle)
            .last()
    }

    /// Returns the pin under `point`, searching the topmost components first.
    pub fn pin_at(&self, point: Position) -> Option<PinRef> {
        self.components()
            .filter_map(|(handle, component)| component.pin_at(point).map(|pin| handle.pin(pin)))
            .last()
    }

    /// Sets an [InputSwitch] and drives its output pin.
    pub fn set_switch(&mut self, handle: ComponentHandle, on: bool) -> Result<(), CircuitError> {
        let component = self.component_or_err(handle)?;
        if component.set_switch(on) {
            Ok(())
        } else {
            Err(wrong_kind(handle, component, InputSwitch))
        }
    }

    pub fn toggle_switch(&mut self, handle: ComponentHandle) -> Result<(), CircuitError> {
        let component = self.component_or_err(handle)?;
        if component.toggle_switch() {
            Ok(())
        } else {
            Err(wrong_kind(handle, component, InputSwitch))
        }
    }

    /// Toggles a [ClockGenerator] by hand.
    pub fn step_clock(&mut self, handle: ComponentHandle) -> Result<(), CircuitError> {
        let component = self.component_or_err(handle)?;
        if component.step_clock() {
            Ok(())
        } else {
            Err(wrong_kind(handle, component, ClockGenerator))
        }
    }

    /// Advances every clock generator to `now`. Returns true if any of them toggled, in which case
    /// the circuit should be simulated again.
    pub fn tick_clocks(&mut self, now: Instant) -> bool {
        let mut toggled = false;
        for (_, component) in self.components.iter_mut() {
            toggled |= component.tick_clock(now);
        }
        toggled
    }

    /// Starts a wire at `start` and marks the pin as connected. The wire carries nothing until it is
    /// completed with [Circuit::set_end_pin].
    pub fn start_wire(&mut self, start: PinRef) -> Result<WireHandle, CircuitError> {
        self.pin_mut(start)?.set_connected(true);
        let handle = WireHandle(self.wires.insert(Wire::new(start)));
        debug!("started {} at {}", handle, start);
        Ok(handle)
    }

    /// Completes `wire` at `end`.
    pub fn set_end_pin(&mut self, wire: WireHandle, end: PinRef) -> Result<(), CircuitError> {
        let start = match self.wires.get(wire.0) {
            Some(w) if w.is_complete() => return Err(CircuitError::WireAlreadyComplete(wire)),
            Some(w) => w.start(),
            None => return Err(CircuitError::UnknownWire(wire)),
        };
        if start == end {
            return Err(CircuitError::SelfConnection(end));
        }
        self.pin_mut(end)?.set_connected(true);
        unwrap!(self.wires.get_mut(wire.0), "{} disappeared", wire).set_end(end);
        debug!("completed {} from {} to {}", wire, start, end);
        Ok(())
    }

    /// Adds a complete wire between `from` and `to`. Nothing is added if either pin is invalid.
    pub fn connect(&mut self, from: PinRef, to: PinRef) -> Result<WireHandle, CircuitError> {
        if self.pin(to).is_none() {
            return Err(CircuitError::UnknownPin(to));
        }
        if from == to {
            return Err(CircuitError::SelfConnection(to));
        }
        let wire = self.start_wire(from)?;
        self.set_end_pin(wire, to)?;
        Ok(wire)
    }

    /// Drops a wire that was never completed, clearing its start pin's connection flag if nothing
    /// else reaches it.
    pub fn discard_wire(&mut self, wire: WireHandle) -> Result<Wire, CircuitError> {
        match self.wires.get(wire.0) {
            Some(w) if w.is_complete() => Err(CircuitError::WireAlreadyComplete(wire)),
            Some(_) => self.remove_wire(wire),
            None => Err(CircuitError::UnknownWire(wire)),
        }
    }

    /// Removes a wire and recomputes the connection flag of both of its ends.
    pub fn remove_wire(&mut self, wire: WireHandle) -> Result<Wire, CircuitError> {
        let removed = self
            .wires
            .remove(wire.0)
            .ok_or(CircuitError::UnknownWire(wire))?;
        for end in removed.ends() {
            self.refresh_connected(end);
        }
        debug!("removed {}", wire);
        Ok(removed)
    }

    /// A pin is connected while at least one wire reaches it.
    fn refresh_connected(&mut self, pin: PinRef) {
        let connected = self.wires.iter().any(|(_, wire)| wire.touches(pin));
        if let Ok(pin) = self.pin_mut(pin) {
            pin.set_connected(connected);
        }
    }

    /// "Probes" `pin`, meaning that whenever a simulation changes its value, the new value will be
    /// printed to stdout along with `name`.
    #[cfg(feature = "debug_probes")]
    pub fn probe<S: Into<String>>(&mut self, pin: PinRef, name: S) {
        let last = self.value(pin);
        self.probes.push(Probe {
            name: name.into(),
            pin,
            last,
        });
    }

    #[cfg(feature = "debug_probes")]
    fn print_probes(&mut self) {
        let components = &self.components;
        for probe in self.probes.iter_mut() {
            let value = components
                .get(probe.pin.component.0)
                .and_then(|component| component.pin(probe.pin.pin))
                .map(Pin::value)
                .unwrap_or_default();
            if value != probe.last {
                probe.last = value;
                colour::cyan_ln!("{}:{}", probe.name, value);
            }
        }
    }

    /// Writes the netlist to `path` in graphviz dot format, one node per component and one edge per
    /// complete wire.
    pub fn dump_dot<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        use petgraph::dot::Dot;
        use std::io::Write;

        let mut graph = petgraph::Graph::<String, String>::new();
        let mut index = HashMap::new();
        for (handle, component) in self.components() {
            index.insert(handle, graph.add_node(format!("{} {}", component.kind(), handle.0)));
        }
        for (_, wire) in self.wires() {
            let (start, end) = match wire.end() {
                Some(end) => (wire.start(), end),
                None => continue,
            };
            if let (Some(from), Some(to)) = (index.get(&start.component), index.get(&end.component)) {
                graph.add_edge(*from, *to, format!("{}:{}", start.pin, end.pin));
            }
        }

        let mut f = std::fs::File::create(path)?;
        write!(f, "{}", Dot::new(&graph))
    }
}

fn wrong_kind(handle: ComponentHandle, component: &Component, expected: ComponentKind) -> CircuitError {
    CircuitError::WrongKind {
        component: handle,
        kind: component.kind(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LogicValue::*;

    #[test]
    fn test_constructors() {
        let mut c = Circuit::new();
        let and = c.add_and(Position::new(0, 0));
        let switch = c.add_input_switch(Position::new(0, 100));
        let clock = c.add_clock_generator(Position::new(0, 200));
        let counter = c.add_component(FourBitCounter, Position::new(100, 0));

        assert_eq!(c.component(and).unwrap().kind(), And);
        assert_eq!(c.component(switch).unwrap().kind(), InputSwitch);
        assert_eq!(c.component(clock).unwrap().kind(), ClockGenerator);
        assert_eq!(c.component(counter).unwrap().kind(), FourBitCounter);
        assert_eq!(c.component_count(), 4);
    }

    #[test]
    fn test_wire_lifecycle() {
        let mut c = Circuit::new();
        let switch = c.add_input_switch(Position::new(0, 0));
        let led = c.add_output_led(Position::new(100, 0));

        let wire = c.start_wire(switch.pin(0)).unwrap();
        assert!(c.pin(switch.pin(0)).unwrap().is_connected());
        assert!(!c.wire(wire).unwrap().is_complete());

        assert_eq!(
            c.set_end_pin(wire, switch.pin(0)),
            Err(CircuitError::SelfConnection(switch.pin(0)))
        );
        assert_eq!(
            c.set_end_pin(wire, led.pin(3)),
            Err(CircuitError::UnknownPin(led.pin(3)))
        );

        c.set_end_pin(wire, led.pin(0)).unwrap();
        assert!(c.pin(led.pin(0)).unwrap().is_connected());
        assert_eq!(
            c.set_end_pin(wire, led.pin(0)),
            Err(CircuitError::WireAlreadyComplete(wire))
        );
        assert_eq!(
            c.discard_wire(wire),
            Err(CircuitError::WireAlreadyComplete(wire))
        );

        c.remove_wire(wire).unwrap();
        assert!(!c.pin(switch.pin(0)).unwrap().is_connected());
        assert!(!c.pin(led.pin(0)).unwrap().is_connected());
        assert_eq!(c.remove_wire(wire), Err(CircuitError::UnknownWire(wire)));
    }

    #[test]
    fn test_discard_keeps_other_connections() {
        let mut c = Circuit::new();
        let switch = c.add_input_switch(Position::new(0, 0));
        let led = c.add_output_led(Position::new(100, 0));

        c.connect(switch.pin(0), led.pin(0)).unwrap();
        let dangling = c.start_wire(switch.pin(0)).unwrap();
        let discarded = c.discard_wire(dangling).unwrap();
        assert_eq!(discarded.start(), switch.pin(0));

        assert!(c.pin(switch.pin(0)).unwrap().is_connected());
        assert_eq!(c.wire_count(), 1);
    }

    #[test]
    fn test_connect_validates_both_ends() {
        let mut c = Circuit::new();
        let switch = c.add_input_switch(Position::new(0, 0));

        assert_eq!(
            c.connect(switch.pin(0), switch.pin(1)),
            Err(CircuitError::UnknownPin(switch.pin(1)))
        );
        assert_eq!(c.wire_count(), 0);
        assert!(!c.pin(switch.pin(0)).unwrap().is_connected());
    }

    #[test]
    fn test_remove_component_cascades() {
        let mut c = Circuit::new();
        let switch = c.add_input_switch(Position::new(0, 0));
        let not = c.add_not(Position::new(100, 0));
        let led = c.add_output_led(Position::new(200, 0));
        c.connect(switch.pin(0), not.pin(0)).unwrap();
        c.connect(not.pin(1), led.pin(0)).unwrap();

        let removed = c.remove_component(not).unwrap();
        assert_eq!(removed.kind(), Not);
        assert_eq!(c.wire_count(), 0);
        assert!(!c.pin(switch.pin(0)).unwrap().is_connected());
        assert!(!c.pin(led.pin(0)).unwrap().is_connected());

        // The slot gets reused but the old handle stays dead.
        let and = c.add_and(Position::new(100, 0));
        assert!(c.component(not).is_none());
        assert_eq!(c.component(and).unwrap().kind(), And);
        assert_eq!(
            c.toggle_switch(not),
            Err(CircuitError::UnknownComponent(not))
        );
        assert_eq!(c.value(not.pin(0)), Undefined);
    }

    #[test]
    fn test_switch_and_clock_errors() {
        let mut c = Circuit::new();
        let and = c.add_and(Position::new(0, 0));
        let clock = c.add_clock_generator(Position::new(0, 100));

        assert_eq!(
            c.set_switch(and, true),
            Err(CircuitError::WrongKind {
                component: and,
                kind: And,
                expected: InputSwitch
            })
        );
        assert!(c.step_clock(and).is_err());
        c.step_clock(clock).unwrap();
        assert_eq!(c.value(clock.pin(0)), High);
    }

    #[test]
    fn test_tick_clocks() {
        let mut c = Circuit::new();
        let clock = c.add_clock_generator(Position::new(0, 0));
        let frequency = c
            .component(clock)
            .and_then(Component::clock_generator)
            .map(|clock| clock.frequency());
        assert_eq!(frequency, Some(1));

        let later = Instant::now() + std::time::Duration::from_secs(1);
        assert!(c.tick_clocks(later));
        assert_eq!(c.value(clock.pin(0)), High);
        assert!(!c.tick_clocks(later));
    }

    #[test]
    fn test_hit_testing() {
        let mut c = Circuit::new();
        let below = c.add_and(Position::new(0, 0));
        let above = c.add_or(Position::new(20, 0));

        assert_eq!(c.component_at(Position::new(30, 10)), Some(above));
        assert_eq!(c.component_at(Position::new(5, 10)), Some(below));
        assert_eq!(c.component_at(Position::new(500, 500)), None);
        assert_eq!(c.pin_at(Position::new(1, 40)), Some(below.pin(1)));
    }

    #[test]
    fn test_set_value_and_clear() {
        let mut c = Circuit::new();
        let and = c.add_and(Position::new(0, 0));
        c.set_value(and.pin(2), High).unwrap();
        assert_eq!(c.value(and.pin(2)), High);
        assert!(c.set_value(and.pin(3), High).is_err());

        c.clear();
        assert!(c.is_empty());
        assert_eq!(c.value(and.pin(2)), Undefined);
    }

    #[test]
    fn test_dump_dot() {
        let mut c = Circuit::new();
        let switch = c.add_input_switch(Position::new(0, 0));
        let led = c.add_output_led(Position::new(100, 0));
        c.connect(switch.pin(0), led.pin(0)).unwrap();
        c.start_wire(led.pin(0)).unwrap();

        let path = std::env::temp_dir().join("logisim_core_test_dump.dot");
        c.dump_dot(&path).unwrap();
        let dot = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(dot.contains("digraph"));
        assert!(dot.contains("input_switch"));
        assert!(dot.contains("output_led"));
        assert_eq!(dot.matches("->").count(), 1);
    }
}
