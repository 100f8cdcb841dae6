//! Component kinds, their pins and their evaluation.
mod arithmetic;
pub mod coders;
mod displays;
pub mod gates;
mod io;
mod kind;
mod pin;
mod selectors;
mod sequential;
mod value;

pub use coders::ParityMode;
pub use displays::*;
pub use io::*;
pub use kind::*;
pub use pin::*;
pub use sequential::{
    ClockEdge, CountDirection, Counter, EdgeDetector, FlipFlop, Register, ShiftDirection,
};
pub use value::*;

use crate::data_structures::{pack_bits, BitIter};
use smallvec::SmallVec;
use std::time::Instant;
use ComponentKind::*;

/// Distance between neighbouring pins on the canvas.
pub const PIN_SPACING: i32 = 20;
/// How close a point has to be to a pin to hit it.
pub const PIN_HIT_RADIUS: i32 = 5;
/// Smallest and largest scale a component can be drawn at.
pub const SCALE_RANGE: (f32, f32) = (0.5, 3.0);

/// Returns the LSB first value of `pins`, [Undefined](LogicValue::Undefined) counts as 0.
pub(crate) fn pack_lsb_first(pins: &[Pin]) -> u32 {
    pack_bits(pins.iter().map(|pin| pin.value().is_high()))
}

/// Drives the bits of `value` onto `pins`, LSB first.
pub(crate) fn drive_lsb_first(pins: &mut [Pin], value: u32) {
    let width = pins.len() as u8;
    for (pin, bit) in pins.iter_mut().zip(BitIter::new(value, width)) {
        pin.set_value(LogicValue::from_bool(bit));
    }
}

/// Per-kind state of a [Component].
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentState {
    Combinational,
    Parity(ParityMode),
    Switch { on: bool },
    Clock(Clock),
    FlipFlop(FlipFlop),
    Counter(Counter),
    Register(Register),
    SevenSegment(SegmentDisplay),
    LedMatrix(LedGrid),
    Numeric(NumericDisplay),
}
impl ComponentState {
    fn for_kind(kind: ComponentKind, now: Instant) -> Self {
        match kind {
            InputSwitch => ComponentState::Switch { on: false },
            ClockGenerator => ComponentState::Clock(Clock::new(1, now)),
            ParityGenerator => ComponentState::Parity(ParityMode::default()),
            DFlipFlop | JkFlipFlop | TFlipFlop | SrLatch => {
                ComponentState::FlipFlop(FlipFlop::default())
            }
            FourBitCounter => ComponentState::Counter(Counter::new(16)),
            BcdCounter => ComponentState::Counter(Counter::new(10)),
            FourBitRegister | FourBitShiftRegister => {
                ComponentState::Register(Register::default())
            }
            SevenSegmentDisplay => ComponentState::SevenSegment(SegmentDisplay::default()),
            LedMatrix => ComponentState::LedMatrix(LedGrid::default()),
            HexDisplay | BinaryDisplay => ComponentState::Numeric(NumericDisplay::default()),
            OutputLed | And | Or | Not | Nand | Nor | Xor | Xnor | Buffer | HalfAdder
            | FullAdder | FourBitAdder | Mux2To1 | Mux4To1 | Demux1To2 | Demux1To4
            | PriorityEncoder4To2 | PriorityEncoder8To3 | Decoder2To4 | Decoder3To8
            | Decoder4To16 | BcdToSevenSegment | MagnitudeComparator => {
                ComponentState::Combinational
            }
        }
    }
}

/// A placed component: its kind, the pins it owns and its geometry.
///
/// Pin order follows [ComponentKind::pin_layout], inputs first.
///
/// # Example
/// ```
/// # use logisim_core::{Component, ComponentKind, LogicValue::*, Position};
/// let mut and = Component::new(ComponentKind::And, Position::new(10, 10));
///
/// assert_eq!(and.pins().len(), 3);
/// assert_eq!(and.evaluate(), Low);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    kind: ComponentKind,
    position: Position,
    size: Size,
    pins: SmallVec<[Pin; 8]>,
    selected: bool,
    rotation: i32,
    scale: f32,
    state: ComponentState,
}
impl Component {
    /// Returns a new component of `kind` with its top left corner at `position`.
    pub fn new(kind: ComponentKind, position: Position) -> Self {
        let layout = kind.pin_layout();
        let rows = layout.inputs.len().max(layout.outputs.len()) as i32;
        let width = match kind.evaluation() {
            Evaluation::SingleOutput | Evaluation::Source => 3 * PIN_SPACING,
            _ => 4 * PIN_SPACING,
        };
        let size = Size {
            width,
            height: (rows + 1) * PIN_SPACING,
        };

        let row = |i: usize| position.y + (i as i32 + 1) * PIN_SPACING;
        let inputs = (0..layout.inputs.len())
            .map(|i| Pin::new(PinDirection::Input, Position::new(position.x, row(i))));
        let outputs = (0..layout.outputs.len())
            .map(|i| Pin::new(PinDirection::Output, Position::new(position.x + width, row(i))));

        Self {
            kind,
            position,
            size,
            pins: inputs.chain(outputs).collect(),
            selected: false,
            rotation: 0,
            scale: 1.0,
            state: ComponentState::for_kind(kind, Instant::now()),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub(crate) fn pins_mut(&mut self) -> &mut [Pin] {
        &mut self.pins
    }

    pub fn pin(&self, index: usize) -> Option<&Pin> {
        self.pins.get(index)
    }

    pub fn inputs(&self) -> &[Pin] {
        &self.pins[..self.kind.pin_layout().inputs.len()]
    }

    pub fn outputs(&self) -> &[Pin] {
        &self.pins[self.kind.pin_layout().inputs.len()..]
    }

    /// Returns the value of the pin at `index`, [Undefined](LogicValue::Undefined) if there is no such pin.
    pub fn output(&self, index: usize) -> LogicValue {
        self.pins
            .get(index)
            .map(Pin::value)
            .unwrap_or(LogicValue::Undefined)
    }

    pub fn state(&self) -> &ComponentState {
        &self.state
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected
    }

    /// Rotation in degrees, always one of 0, 90, 180 or 270.
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// Sets the rotation, snapped to the nearest quarter turn.
    pub fn set_rotation(&mut self, degrees: i32) {
        let snapped = ((degrees as f32 / 90.0).round() as i32) * 90;
        self.rotation = snapped.rem_euclid(360);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Sets the drawing scale, clamped to [SCALE_RANGE].
    pub fn set_scale(&mut self, scale: f32) {
        let (min, max) = SCALE_RANGE;
        self.scale = scale.max(min).min(max);
    }

    /// Moves the component and its pins so its top left corner is at `position`.
    pub fn move_to(&mut self, position: Position) {
        let (dx, dy) = (position.x - self.position.x, position.y - self.position.y);
        self.position = position;
        for pin in self.pins.iter_mut() {
            pin.move_by(dx, dy);
        }
    }

    /// Returns true if `point` lies inside the component's bounding box.
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.size.width
            && point.y >= self.position.y
            && point.y <= self.position.y + self.size.height
    }

    /// Returns the index of the pin under `point`.
    pub fn pin_at(&self, point: Position) -> Option<usize> {
        self.pins.iter().position(|pin| pin.hit(point, PIN_HIT_RADIUS))
    }

    /// Sets every input pin to [Undefined](LogicValue::Undefined), primary inputs are left alone.
    pub(crate) fn reset_inputs(&mut self) {
        if self.kind.is_source() {
            return;
        }
        for pin in self.pins.iter_mut().filter(|pin| pin.is_input()) {
            pin.set_value(LogicValue::Undefined);
        }
    }

    /// Returns the output of a single-output gate computed from its current inputs.
    ///
    /// Any other kind returns [Undefined](LogicValue::Undefined).
    pub fn evaluate(&self) -> LogicValue {
        if self.kind.evaluation() != Evaluation::SingleOutput {
            return LogicValue::Undefined;
        }
        let b = self.pins[1].value();
        gates::evaluate(self.kind, self.pins[0].value(), b)
    }

    /// Writes `value` into every output pin, returns true if any of them changed.
    pub(crate) fn drive_outputs(&mut self, value: LogicValue) -> bool {
        let mut changed = false;
        for pin in self.pins.iter_mut().filter(|pin| pin.is_output()) {
            changed |= pin.set_value(value);
        }
        changed
    }

    /// Recomputes every output of a multi-output kind and refreshes display state.
    /// Returns true if any output pin changed.
    pub fn compute_outputs(&mut self) -> bool {
        let before = self.output_values();
        let kind = self.kind;
        match kind {
            HalfAdder | FullAdder | FourBitAdder => arithmetic::compute(kind, &mut self.pins),
            Mux2To1 | Mux4To1 | Demux1To2 | Demux1To4 => selectors::compute(kind, &mut self.pins),
            PriorityEncoder4To2 | PriorityEncoder8To3 | Decoder2To4 | Decoder3To8
            | Decoder4To16 | BcdToSevenSegment | MagnitudeComparator | ParityGenerator => {
                let parity = match self.state {
                    ComponentState::Parity(mode) => mode,
                    _ => ParityMode::default(),
                };
                coders::compute(kind, parity, &mut self.pins)
            }
            OutputLed | SevenSegmentDisplay | LedMatrix | HexDisplay | BinaryDisplay => {
                match &mut self.state {
                    ComponentState::SevenSegment(display) => display.refresh(&self.pins),
                    ComponentState::LedMatrix(display) => display.refresh(&self.pins),
                    ComponentState::Numeric(display) => display.refresh(&self.pins),
                    _ => {}
                }
                return false;
            }
            InputSwitch | ClockGenerator | And | Or | Not | Nand | Nor | Xor | Xnor | Buffer
            | DFlipFlop | JkFlipFlop | SrLatch | TFlipFlop | FourBitRegister
            | FourBitShiftRegister | FourBitCounter | BcdCounter => return false,
        }
        before != self.output_values()
    }

    /// Runs one sequential step: edge triggered kinds sample their clock once, level triggered ones
    /// evaluate, and both drive their stored state onto their outputs.
    /// Returns true if any output pin changed.
    pub fn update_on_clock(&mut self) -> bool {
        let before = self.output_values();
        let kind = self.kind;
        match &mut self.state {
            ComponentState::FlipFlop(state) => {
                sequential::update_flip_flop(kind, state, &mut self.pins)
            }
            ComponentState::Counter(state) => sequential::update_counter(state, &mut self.pins),
            ComponentState::Register(state) => {
                sequential::update_register(kind, state, &mut self.pins)
            }
            _ => return false,
        }
        before != self.output_values()
    }

    fn output_values(&self) -> SmallVec<[LogicValue; 16]> {
        self.outputs().iter().map(Pin::value).collect()
    }

    /// Returns the edge detector of an edge triggered component.
    pub fn edge_detector(&self) -> Option<&EdgeDetector> {
        if self.kind.evaluation() != Evaluation::EdgeTriggered {
            return None;
        }
        match &self.state {
            ComponentState::FlipFlop(state) => Some(&state.edge),
            ComponentState::Counter(state) => Some(&state.edge),
            ComponentState::Register(state) => Some(&state.edge),
            _ => None,
        }
    }

    fn edge_detector_mut(&mut self) -> Option<&mut EdgeDetector> {
        if self.kind.evaluation() != Evaluation::EdgeTriggered {
            return None;
        }
        match &mut self.state {
            ComponentState::FlipFlop(state) => Some(&mut state.edge),
            ComponentState::Counter(state) => Some(&mut state.edge),
            ComponentState::Register(state) => Some(&mut state.edge),
            _ => None,
        }
    }

    /// Sets the clock edge an edge triggered component reacts to.
    /// Returns false if the component has no clock.
    pub fn set_trigger_edge(&mut self, edge: ClockEdge) -> bool {
        match self.edge_detector_mut() {
            Some(detector) => {
                detector.set_edge(edge);
                true
            }
            None => false,
        }
    }

    /// Forgets the sampled clock history of an edge triggered component.
    pub fn reset_clock_history(&mut self) {
        if let Some(detector) = self.edge_detector_mut() {
            detector.reset()
        }
    }

    pub fn flip_flop(&self) -> Option<&FlipFlop> {
        match &self.state {
            ComponentState::FlipFlop(state) => Some(state),
            _ => None,
        }
    }

    pub fn counter(&self) -> Option<&Counter> {
        match &self.state {
            ComponentState::Counter(state) => Some(state),
            _ => None,
        }
    }

    /// Returns false if the component is not a counter.
    pub fn set_count_direction(&mut self, direction: CountDirection) -> bool {
        match &mut self.state {
            ComponentState::Counter(state) => {
                state.direction = direction;
                true
            }
            _ => false,
        }
    }

    pub fn register(&self) -> Option<&Register> {
        match &self.state {
            ComponentState::Register(state) => Some(state),
            _ => None,
        }
    }

    /// Returns false if the component is not a shift register.
    pub fn set_shift_direction(&mut self, direction: ShiftDirection) -> bool {
        match (&mut self.state, self.kind) {
            (ComponentState::Register(state), FourBitShiftRegister) => {
                state.shift = direction;
                true
            }
            _ => false,
        }
    }

    pub fn parity_mode(&self) -> Option<ParityMode> {
        match self.state {
            ComponentState::Parity(mode) => Some(mode),
            _ => None,
        }
    }

    /// Returns false if the component is not a parity generator.
    pub fn set_parity_mode(&mut self, mode: ParityMode) -> bool {
        match &mut self.state {
            ComponentState::Parity(current) => {
                *current = mode;
                true
            }
            _ => false,
        }
    }

    /// Returns the state of an input switch.
    pub fn switch_state(&self) -> Option<bool> {
        match self.state {
            ComponentState::Switch { on } => Some(on),
            _ => None,
        }
    }

    /// Sets an input switch and drives its output pin.
    /// Returns false if the component is not a switch.
    pub fn set_switch(&mut self, on: bool) -> bool {
        match &mut self.state {
            ComponentState::Switch { on: state } => {
                *state = on;
                self.pins[0].set_value(LogicValue::from_bool(on));
                true
            }
            _ => false,
        }
    }

    /// Flips an input switch, returns false if the component is not a switch.
    pub fn toggle_switch(&mut self) -> bool {
        match self.switch_state() {
            Some(on) => self.set_switch(!on),
            None => false,
        }
    }

    pub fn clock_generator(&self) -> Option<&Clock> {
        match &self.state {
            ComponentState::Clock(clock) => Some(clock),
            _ => None,
        }
    }

    /// Returns false if the component is not a clock generator.
    pub fn set_clock_frequency(&mut self, frequency_hz: u32) -> bool {
        match &mut self.state {
            ComponentState::Clock(clock) => {
                clock.set_frequency(frequency_hz);
                true
            }
            _ => false,
        }
    }

    /// Advances a clock generator to `now`, driving its output if it toggled.
    /// Returns true if it toggled.
    pub fn tick_clock(&mut self, now: Instant) -> bool {
        if let ComponentState::Clock(clock) = &mut self.state {
            if clock.update(now) {
                self.pins[0].set_value(clock.value());
                return true;
            }
        }
        false
    }

    /// Toggles a clock generator by hand, returns false if the component is not one.
    pub fn step_clock(&mut self) -> bool {
        match &mut self.state {
            ComponentState::Clock(clock) => {
                clock.toggle();
                self.pins[0].set_value(clock.value());
                true
            }
            _ => false,
        }
    }

    /// Returns true if the component is an output LED with a [High](LogicValue::High) input.
    pub fn is_lit(&self) -> bool {
        self.kind == OutputLed && self.pins[0].value().is_high()
    }

    pub fn seven_segment(&self) -> Option<&SegmentDisplay> {
        match &self.state {
            ComponentState::SevenSegment(display) => Some(display),
            _ => None,
        }
    }

    /// Returns false if the component is not a seven segment display.
    pub fn set_common_cathode(&mut self, common_cathode: bool) -> bool {
        match &mut self.state {
            ComponentState::SevenSegment(display) => {
                display.common_cathode = common_cathode;
                display.refresh(&self.pins);
                true
            }
            _ => false,
        }
    }

    pub fn led_matrix(&self) -> Option<&LedGrid> {
        match &self.state {
            ComponentState::LedMatrix(display) => Some(display),
            _ => None,
        }
    }

    /// Returns the hex or binary display state.
    pub fn numeric_display(&self) -> Option<&NumericDisplay> {
        match &self.state {
            ComponentState::Numeric(display) => Some(display),
            _ => None,
        }
    }
}
