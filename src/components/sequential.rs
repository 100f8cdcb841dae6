use super::{drive_lsb_first, ComponentKind, LogicValue, Pin};
use num_integer::Integer;
use serde::{Deserialize, Serialize};
use ComponentKind::*;
use LogicValue::*;

/// Clock transition that triggers an edge triggered component.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockEdge {
    Rising,
    Falling,
    Both,
}
impl Default for ClockEdge {
    fn default() -> Self {
        ClockEdge::Rising
    }
}

/// Remembers the last sampled clock value of a sequential component.
///
/// This is the only simulation state that survives between simulations besides the stored outputs,
/// so it has to be sampled exactly once per sequential round.
///
/// # Example
/// ```
/// # use logisim_core::{ClockEdge, EdgeDetector, LogicValue::*};
/// let mut edge = EdgeDetector::new(ClockEdge::Rising);
///
/// assert_eq!(edge.is_triggered(Low), false);
/// assert_eq!(edge.is_triggered(High), true);
/// assert_eq!(edge.is_triggered(High), false);
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct EdgeDetector {
    last_clock: LogicValue,
    edge: ClockEdge,
}
impl EdgeDetector {
    pub fn new(edge: ClockEdge) -> Self {
        Self {
            last_clock: Undefined,
            edge,
        }
    }

    /// Returns true if going from the last sampled value to `clock` is a triggering transition.
    /// Always records `clock` as the last sampled value.
    pub fn is_triggered(&mut self, clock: LogicValue) -> bool {
        let last = std::mem::replace(&mut self.last_clock, clock);
        match self.edge {
            ClockEdge::Rising => last == Low && clock == High,
            ClockEdge::Falling => last == High && clock == Low,
            ClockEdge::Both => last != clock && clock.is_defined(),
        }
    }

    pub fn last_clock(&self) -> LogicValue {
        self.last_clock
    }

    pub fn edge(&self) -> ClockEdge {
        self.edge
    }

    pub fn set_edge(&mut self, edge: ClockEdge) {
        self.edge = edge
    }

    /// Forgets the clock history, the next sample can't trigger.
    pub fn reset(&mut self) {
        self.last_clock = Undefined
    }
}
impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(ClockEdge::default())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountDirection {
    Up,
    Down,
}
impl Default for CountDirection {
    fn default() -> Self {
        CountDirection::Up
    }
}

/// Direction the stored bits move in a [FourBitShiftRegister] on each clock edge.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    /// Towards Q3, the serial input enters at Q0.
    Left,
    /// Towards Q0, the serial input enters at Q3.
    Right,
}
impl Default for ShiftDirection {
    fn default() -> Self {
        ShiftDirection::Left
    }
}

/// Stored state of D, JK and T flip-flops and of the SR latch.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct FlipFlop {
    pub(super) edge: EdgeDetector,
    q: LogicValue,
    q_not: LogicValue,
}
impl FlipFlop {
    pub fn q(&self) -> LogicValue {
        self.q
    }

    pub fn q_not(&self) -> LogicValue {
        self.q_not
    }

    fn set(&mut self, q: LogicValue) {
        self.q = q;
        self.q_not = q.complement();
    }

    fn toggle(&mut self) {
        self.set(self.q.complement())
    }
}
impl Default for FlipFlop {
    fn default() -> Self {
        Self {
            edge: EdgeDetector::default(),
            q: Low,
            q_not: High,
        }
    }
}

/// Stored state of the 4-bit binary and BCD counters.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Counter {
    pub(super) edge: EdgeDetector,
    count: u8,
    modulus: u8,
    pub(super) direction: CountDirection,
}
impl Counter {
    pub(super) fn new(modulus: u8) -> Self {
        Self {
            edge: EdgeDetector::default(),
            count: 0,
            modulus,
            direction: CountDirection::default(),
        }
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn direction(&self) -> CountDirection {
        self.direction
    }

    fn step(&mut self) {
        let delta = match self.direction {
            CountDirection::Up => 1,
            CountDirection::Down => -1,
        };
        self.count = (self.count as i16 + delta).mod_floor(&(self.modulus as i16)) as u8;
    }
}

/// Stored state of the 4-bit register and shift register.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Register {
    pub(super) edge: EdgeDetector,
    bits: [LogicValue; 4],
    pub(super) shift: ShiftDirection,
}
impl Register {
    /// Returns the stored bits, Q0 first.
    pub fn bits(&self) -> [LogicValue; 4] {
        self.bits
    }

    pub fn shift_direction(&self) -> ShiftDirection {
        self.shift
    }

    fn shift_in(&mut self, serial: LogicValue) {
        match self.shift {
            ShiftDirection::Left => {
                self.bits.rotate_right(1);
                self.bits[0] = serial;
            }
            ShiftDirection::Right => {
                self.bits.rotate_left(1);
                self.bits[3] = serial;
            }
        }
    }
}
impl Default for Register {
    fn default() -> Self {
        Self {
            edge: EdgeDetector::default(),
            bits: [Low; 4],
            shift: ShiftDirection::default(),
        }
    }
}

/// Samples the clock of a flip-flop, updates it on a trigger and drives Q and QN.
pub(super) fn update_flip_flop(kind: ComponentKind, state: &mut FlipFlop, pins: &mut [Pin]) {
    let (outputs, triggered) = match kind {
        SrLatch => {
            match (pins[0].value(), pins[1].value()) {
                (High, Low) => state.set(High),
                (Low, High) => state.set(Low),
                (High, High) => {
                    state.q = Undefined;
                    state.q_not = Undefined;
                }
                _ => {}
            }
            (2, false)
        }
        DFlipFlop => (2, state.edge.is_triggered(pins[1].value())),
        TFlipFlop => (2, state.edge.is_triggered(pins[1].value())),
        JkFlipFlop => (3, state.edge.is_triggered(pins[2].value())),
        _ => unreachable!("{} is not a flip-flop", kind),
    };

    if triggered {
        match kind {
            DFlipFlop => state.set(pins[0].value()),
            TFlipFlop => {
                if pins[0].value() == High {
                    state.toggle()
                }
            }
            JkFlipFlop => match (pins[0].value(), pins[1].value()) {
                (Low, High) => state.set(Low),
                (High, Low) => state.set(High),
                (High, High) => state.toggle(),
                _ => {}
            },
            _ => {}
        }
    }

    pins[outputs].set_value(state.q);
    pins[outputs + 1].set_value(state.q_not);
}

/// Layout: clock, reset, Q0..Q3.
pub(super) fn update_counter(state: &mut Counter, pins: &mut [Pin]) {
    // The clock is always sampled so reset doesn't swallow the edge history.
    let triggered = state.edge.is_triggered(pins[0].value());
    if pins[1].value() == High {
        state.count = 0;
    } else if triggered {
        state.step();
    }
    drive_lsb_first(&mut pins[2..6], state.count as u32);
}

/// Samples the clock of a register, loads or shifts on a trigger and drives Q0..Q3.
pub(super) fn update_register(kind: ComponentKind, state: &mut Register, pins: &mut [Pin]) {
    let clock = kind.clock_pin().unwrap_or_else(|| unreachable!("{} is not a register", kind));
    if state.edge.is_triggered(pins[clock].value()) {
        match kind {
            FourBitRegister => {
                for (bit, pin) in state.bits.iter_mut().zip(pins[0..4].iter()) {
                    *bit = pin.value();
                }
            }
            _ => state.shift_in(pins[0].value()),
        }
    }
    for (pin, bit) in pins[clock + 1..clock + 5].iter_mut().zip(state.bits.iter()) {
        pin.set_value(*bit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use crate::Position;

    #[test]
    fn test_edge_detector() {
        let mut rising = EdgeDetector::new(ClockEdge::Rising);
        let mut falling = EdgeDetector::new(ClockEdge::Falling);
        let mut both = EdgeDetector::new(ClockEdge::Both);
        let sequence = [Undefined, High, Low, High, High, Undefined, Low, High, Low];
        let expected = [
            // rising, falling, both
            (false, false, false),
            (false, false, true),
            (false, true, true),
            (true, false, true),
            (false, false, false),
            (false, false, false),
            (false, false, true),
            (true, false, true),
            (false, true, true),
        ];
        for (clock, expected) in sequence.iter().zip(expected.iter()) {
            let got = (
                rising.is_triggered(*clock),
                falling.is_triggered(*clock),
                both.is_triggered(*clock),
            );
            assert_eq!(got, *expected, "clock {}", clock);
        }
        assert_eq!(rising.last_clock(), Low);
    }

    fn clocked(c: &mut Component, inputs: &[(usize, LogicValue)]) {
        for (i, value) in inputs {
            c.pins_mut()[*i].set_value(*value);
        }
        c.update_on_clock();
    }

    #[test]
    fn test_d_flip_flop() {
        let mut c = Component::new(DFlipFlop, Position::default());
        clocked(&mut c, &[(0, High), (1, Low)]);
        assert_eq!((c.output(2), c.output(3)), (Low, High));

        clocked(&mut c, &[(1, High)]);
        assert_eq!((c.output(2), c.output(3)), (High, Low));

        // No transition, D is ignored.
        clocked(&mut c, &[(0, Low)]);
        assert_eq!((c.output(2), c.output(3)), (High, Low));

        clocked(&mut c, &[(0, Undefined), (1, Low)]);
        clocked(&mut c, &[(1, High)]);
        assert_eq!((c.output(2), c.output(3)), (Undefined, Undefined));
    }

    #[test]
    fn test_jk_flip_flop() {
        let mut c = Component::new(JkFlipFlop, Position::default());
        let pulse = |c: &mut Component, j, k| {
            clocked(c, &[(0, j), (1, k), (2, Low)]);
            clocked(c, &[(2, High)]);
            (c.output(3), c.output(4))
        };
        assert_eq!(pulse(&mut c, High, Low), (High, Low));
        assert_eq!(pulse(&mut c, Low, Low), (High, Low));
        assert_eq!(pulse(&mut c, Low, High), (Low, High));
        assert_eq!(pulse(&mut c, High, High), (High, Low));
        assert_eq!(pulse(&mut c, High, High), (Low, High));
        assert_eq!(pulse(&mut c, Undefined, High), (Low, High));
    }

    #[test]
    fn test_t_flip_flop() {
        let mut c = Component::new(TFlipFlop, Position::default());
        clocked(&mut c, &[(0, High), (1, Low)]);
        clocked(&mut c, &[(1, High)]);
        assert_eq!(c.output(2), High);
        clocked(&mut c, &[(1, Low)]);
        clocked(&mut c, &[(1, High)]);
        assert_eq!(c.output(2), Low);
        clocked(&mut c, &[(0, Low), (1, Low)]);
        clocked(&mut c, &[(1, High)]);
        assert_eq!(c.output(2), Low);
    }

    #[test]
    fn test_sr_latch() {
        let mut c = Component::new(SrLatch, Position::default());
        clocked(&mut c, &[(0, High), (1, Low)]);
        assert_eq!((c.output(2), c.output(3)), (High, Low));
        clocked(&mut c, &[(0, Low)]);
        assert_eq!((c.output(2), c.output(3)), (High, Low));
        clocked(&mut c, &[(1, High)]);
        assert_eq!((c.output(2), c.output(3)), (Low, High));
        clocked(&mut c, &[(0, High)]);
        assert_eq!((c.output(2), c.output(3)), (Undefined, Undefined));
        clocked(&mut c, &[(0, Undefined), (1, Low)]);
        assert_eq!((c.output(2), c.output(3)), (Undefined, Undefined));
    }

    fn count(c: &Component) -> u32 {
        crate::components::pack_lsb_first(&c.pins()[2..6])
    }

    #[test]
    fn test_counter_wraps_and_resets() {
        let mut c = Component::new(FourBitCounter, Position::default());
        clocked(&mut c, &[(0, Low), (1, Low)]);
        for expected in (1..16).chain(0..3) {
            clocked(&mut c, &[(0, High)]);
            assert_eq!(count(&c), expected);
            clocked(&mut c, &[(0, Low)]);
        }

        // Reset wins over the edge.
        clocked(&mut c, &[(0, High), (1, High)]);
        assert_eq!(count(&c), 0);
        // The edge seen during reset isn't replayed.
        clocked(&mut c, &[(1, Low)]);
        assert_eq!(count(&c), 0);
    }

    #[test]
    fn test_counter_down_and_bcd() {
        let mut c = Component::new(FourBitCounter, Position::default());
        c.set_count_direction(CountDirection::Down);
        clocked(&mut c, &[(0, Low), (1, Low)]);
        clocked(&mut c, &[(0, High)]);
        assert_eq!(count(&c), 15);

        let mut c = Component::new(BcdCounter, Position::default());
        clocked(&mut c, &[(0, Low), (1, Low)]);
        for _ in 0..10 {
            clocked(&mut c, &[(0, High)]);
            clocked(&mut c, &[(0, Low)]);
        }
        assert_eq!(count(&c), 0);
    }

    #[test]
    fn test_register_loads_on_edge() {
        let mut c = Component::new(FourBitRegister, Position::default());
        clocked(&mut c, &[(0, High), (1, Low), (2, High), (3, Low), (4, Low)]);
        let q = |c: &Component| (5..9).map(|i| c.output(i)).collect::<Vec<_>>();
        assert_eq!(q(&c), vec![Low; 4]);
        clocked(&mut c, &[(4, High)]);
        assert_eq!(q(&c), vec![High, Low, High, Low]);
    }

    #[test]
    fn test_shift_register() {
        let q = |c: &Component| (2..6).map(|i| c.output(i)).collect::<Vec<_>>();
        let mut c = Component::new(FourBitShiftRegister, Position::default());
        clocked(&mut c, &[(0, High), (1, Low)]);
        clocked(&mut c, &[(1, High)]);
        clocked(&mut c, &[(0, Low), (1, Low)]);
        clocked(&mut c, &[(1, High)]);
        assert_eq!(q(&c), vec![Low, High, Low, Low]);

        let mut c = Component::new(FourBitShiftRegister, Position::default());
        c.set_shift_direction(ShiftDirection::Right);
        clocked(&mut c, &[(0, High), (1, Low)]);
        clocked(&mut c, &[(1, High)]);
        assert_eq!(q(&c), vec![Low, Low, Low, High]);
    }
}
