//! Tri-state digital logic circuits and a fixed-point simulator for them.
//!
//! A [Circuit] owns placed [Components](Component) and the [Wires](Wire) between their pins.
//! [Circuit::simulate] propagates [LogicValues](LogicValue) until nothing changes, sequential
//! components sample their clocks once the combinational logic has settled.
//!
//! # Example
//! ```
//! # use logisim_core::{Circuit, ComponentKind, LogicValue::*, Position};
//! let mut c = Circuit::new();
//!
//! let data = c.add_input_switch(Position::new(0, 0));
//! let clock = c.add_input_switch(Position::new(0, 40));
//! let dff = c.add_component(ComponentKind::DFlipFlop, Position::new(100, 0));
//! c.connect(data.pin(0), dff.pin(0)).unwrap();
//! c.connect(clock.pin(0), dff.pin(1)).unwrap();
//!
//! c.set_switch(data, true).unwrap();
//! c.set_switch(clock, false).unwrap();
//! c.simulate().unwrap();
//! assert_eq!(c.value(dff.pin(2)), Low);
//!
//! // Rising edge.
//! c.set_switch(clock, true).unwrap();
//! c.simulate().unwrap();
//! assert_eq!(c.value(dff.pin(2)), High);
//! ```
#[macro_use]
extern crate unwrap;
extern crate concat_idents;

pub mod components;
pub mod data_structures;
#[macro_use]
pub mod circuit;
pub mod document;

pub use circuit::{
    Circuit, CircuitError, ComponentHandle, PinRef, SimulationConfig, SimulationError, Wire,
    WireHandle, DEFAULT_MAX_PASSES,
};
pub use components::{
    ClockEdge, Clock, Component, ComponentKind, ComponentState, CountDirection, EdgeDetector,
    Evaluation, LogicValue, ParityMode, Pin, PinDirection, Position, ShiftDirection, Size,
};
pub use document::{CircuitDocument, DocumentError, DocumentManager, KindTag};
