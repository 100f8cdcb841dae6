use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// How the engine drives a component during a simulation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Evaluation {
    /// Primary input, its output pins are driven from outside the engine and never reset.
    Source,
    /// Combinational kind with a single output computed by [Component::evaluate](super::Component::evaluate).
    SingleOutput,
    /// Combinational kind that writes its outputs in [Component::compute_outputs](super::Component::compute_outputs).
    MultiOutput,
    /// Input-only kind whose internal state mirrors its inputs.
    Display,
    /// Sequential kind that samples a clock pin through an [EdgeDetector](super::EdgeDetector).
    EdgeTriggered,
    /// Sequential kind without a clock, evaluated every sequential round.
    LevelTriggered,
}

/// Names and directions of a kind's pins. Inputs come first, then outputs.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PinLayout {
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
}
impl PinLayout {
    const fn new(inputs: &'static [&'static str], outputs: &'static [&'static str]) -> Self {
        Self { inputs, outputs }
    }

    pub fn len(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the index of the pin called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .position(|pin| *pin == name)
    }
}

const GATE1: PinLayout = PinLayout::new(&["A"], &["Y"]);
const GATE2: PinLayout = PinLayout::new(&["A", "B"], &["Y"]);
const FOUR_BIT_STATE: &[&str] = &["Q0", "Q1", "Q2", "Q3"];

/// Every component kind that can be placed in a [Circuit](crate::Circuit).
///
/// The string form (`"and"`, `"four_bit_counter"`, ...) is the stable tag used by the file format,
/// the integer form is the legacy tag older documents were written with.
///
/// # Example
/// ```
/// # use logisim_core::ComponentKind;
/// use std::convert::TryFrom;
/// use std::str::FromStr;
///
/// assert_eq!(ComponentKind::DFlipFlop.to_string(), "d_flip_flop");
/// assert_eq!(ComponentKind::from_str("xor"), Ok(ComponentKind::Xor));
/// assert_eq!(ComponentKind::try_from(3u8).ok(), Some(ComponentKind::And));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    IntoPrimitive,
    TryFromPrimitive,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ComponentKind {
    InputSwitch = 1,
    OutputLed = 2,
    And = 3,
    Or = 4,
    Not = 5,
    Nand = 6,
    Nor = 7,
    Xor = 8,
    Xnor = 9,
    Buffer = 10,
    HalfAdder = 12,
    FullAdder = 13,
    FourBitAdder = 14,
    Mux2To1 = 15,
    Mux4To1 = 16,
    Demux1To2 = 17,
    Demux1To4 = 18,
    PriorityEncoder4To2 = 19,
    PriorityEncoder8To3 = 21,
    Decoder2To4 = 22,
    Decoder3To8 = 23,
    Decoder4To16 = 24,
    BcdToSevenSegment = 25,
    DFlipFlop = 26,
    JkFlipFlop = 27,
    SrLatch = 28,
    TFlipFlop = 29,
    ClockGenerator = 30,
    FourBitRegister = 31,
    FourBitShiftRegister = 32,
    FourBitCounter = 33,
    BcdCounter = 34,
    SevenSegmentDisplay = 35,
    LedMatrix = 36,
    HexDisplay = 38,
    BinaryDisplay = 39,
    MagnitudeComparator = 64,
    ParityGenerator = 65,
}
use ComponentKind::*;

impl ComponentKind {
    /// Returns the ordered pin layout of the kind, pin indexes used by evaluation follow it exactly.
    pub fn pin_layout(self) -> PinLayout {
        match self {
            InputSwitch => PinLayout::new(&[], &["OUT"]),
            OutputLed => PinLayout::new(&["IN"], &[]),
            And | Or | Nand | Nor | Xor | Xnor => GATE2,
            Not | Buffer => GATE1,
            HalfAdder => PinLayout::new(&["A", "B"], &["S", "C"]),
            FullAdder => PinLayout::new(&["A", "B", "CIN"], &["S", "COUT"]),
            FourBitAdder => PinLayout::new(
                &["A3", "A2", "A1", "A0", "B3", "B2", "B1", "B0", "CIN"],
                &["S3", "S2", "S1", "S0", "COUT"],
            ),
            Mux2To1 => PinLayout::new(&["I0", "I1", "S"], &["Y"]),
            Mux4To1 => PinLayout::new(&["I0", "I1", "I2", "I3", "S0", "S1"], &["Y"]),
            Demux1To2 => PinLayout::new(&["I", "S"], &["Y0", "Y1"]),
            Demux1To4 => PinLayout::new(&["I", "S0", "S1"], &["Y0", "Y1", "Y2", "Y3"]),
            PriorityEncoder4To2 => PinLayout::new(&["I0", "I1", "I2", "I3"], &["A0", "A1", "V"]),
            PriorityEncoder8To3 => PinLayout::new(
                &["I0", "I1", "I2", "I3", "I4", "I5", "I6", "I7"],
                &["A0", "A1", "A2", "V"],
            ),
            Decoder2To4 => PinLayout::new(&["A0", "A1", "EN"], &["Y0", "Y1", "Y2", "Y3"]),
            Decoder3To8 => PinLayout::new(
                &["A0", "A1", "A2", "EN"],
                &["Y0", "Y1", "Y2", "Y3", "Y4", "Y5", "Y6", "Y7"],
            ),
            Decoder4To16 => PinLayout::new(
                &["A0", "A1", "A2", "A3", "EN"],
                &[
                    "Y0", "Y1", "Y2", "Y3", "Y4", "Y5", "Y6", "Y7", "Y8", "Y9", "Y10", "Y11",
                    "Y12", "Y13", "Y14", "Y15",
                ],
            ),
            BcdToSevenSegment => {
                PinLayout::new(&["D0", "D1", "D2", "D3"], &["a", "b", "c", "d", "e", "f", "g"])
            }
            MagnitudeComparator => PinLayout::new(
                &["A0", "A1", "A2", "A3", "B0", "B1", "B2", "B3"],
                &["GT", "EQ", "LT"],
            ),
            ParityGenerator => PinLayout::new(&["D0", "D1", "D2", "D3"], &["P"]),
            DFlipFlop => PinLayout::new(&["D", "CLK"], &["Q", "QN"]),
            JkFlipFlop => PinLayout::new(&["J", "K", "CLK"], &["Q", "QN"]),
            TFlipFlop => PinLayout::new(&["T", "CLK"], &["Q", "QN"]),
            SrLatch => PinLayout::new(&["S", "R"], &["Q", "QN"]),
            ClockGenerator => PinLayout::new(&[], &["OUT"]),
            FourBitRegister => PinLayout::new(&["D0", "D1", "D2", "D3", "CLK"], FOUR_BIT_STATE),
            FourBitShiftRegister => PinLayout::new(&["SI", "CLK"], FOUR_BIT_STATE),
            FourBitCounter | BcdCounter => PinLayout::new(&["CLK", "RST"], FOUR_BIT_STATE),
            SevenSegmentDisplay => PinLayout::new(&["a", "b", "c", "d", "e", "f", "g"], &[]),
            LedMatrix => PinLayout::new(
                &[
                    "R0", "R1", "R2", "R3", "R4", "R5", "R6", "R7", "C0", "C1", "C2", "C3", "C4",
                    "C5", "C6", "C7",
                ],
                &[],
            ),
            HexDisplay => PinLayout::new(&["D0", "D1", "D2", "D3"], &[]),
            BinaryDisplay => {
                PinLayout::new(&["D0", "D1", "D2", "D3", "D4", "D5", "D6", "D7"], &[])
            }
        }
    }

    /// Returns how the engine drives this kind.
    pub fn evaluation(self) -> Evaluation {
        match self {
            InputSwitch | ClockGenerator => Evaluation::Source,
            And | Or | Not | Nand | Nor | Xor | Xnor | Buffer => Evaluation::SingleOutput,
            HalfAdder | FullAdder | FourBitAdder | Mux2To1 | Mux4To1 | Demux1To2 | Demux1To4
            | PriorityEncoder4To2 | PriorityEncoder8To3 | Decoder2To4 | Decoder3To8
            | Decoder4To16 | BcdToSevenSegment | MagnitudeComparator | ParityGenerator => {
                Evaluation::MultiOutput
            }
            OutputLed | SevenSegmentDisplay | LedMatrix | HexDisplay | BinaryDisplay => {
                Evaluation::Display
            }
            DFlipFlop | JkFlipFlop | TFlipFlop | FourBitRegister | FourBitShiftRegister
            | FourBitCounter | BcdCounter => Evaluation::EdgeTriggered,
            SrLatch => Evaluation::LevelTriggered,
        }
    }

    /// Returns the index of the clock input for edge triggered kinds.
    pub fn clock_pin(self) -> Option<usize> {
        match self {
            DFlipFlop | TFlipFlop | FourBitShiftRegister => Some(1),
            JkFlipFlop => Some(2),
            FourBitRegister => Some(4),
            FourBitCounter | BcdCounter => Some(0),
            _ => None,
        }
    }

    /// Returns true for primary inputs, whose pins the engine never resets.
    pub fn is_source(self) -> bool {
        self.evaluation() == Evaluation::Source
    }

    /// Returns true if the kind keeps state across simulations.
    pub fn is_sequential(self) -> bool {
        matches!(
            self.evaluation(),
            Evaluation::EdgeTriggered | Evaluation::LevelTriggered
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::convert::TryFrom;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_string_tags_round_trip_and_are_unique() {
        let mut seen = HashSet::new();
        for kind in ComponentKind::iter() {
            let tag: &'static str = kind.into();
            assert!(seen.insert(tag), "duplicate tag {}", tag);
            assert_eq!(ComponentKind::from_str(tag), Ok(kind));
        }
    }

    #[test]
    fn test_legacy_tags() {
        assert_eq!(ComponentKind::try_from(1u8).ok(), Some(InputSwitch));
        assert_eq!(ComponentKind::try_from(21u8).ok(), Some(PriorityEncoder8To3));
        assert_eq!(ComponentKind::try_from(39u8).ok(), Some(BinaryDisplay));
        // Wires and the selection tool were never components.
        assert!(ComponentKind::try_from(0u8).is_err());
        assert!(ComponentKind::try_from(11u8).is_err());
        assert_eq!(u8::from(FourBitCounter), 33);
    }

    #[test]
    fn test_clock_pin_is_named_clk() {
        for kind in ComponentKind::iter() {
            let layout = kind.pin_layout();
            assert_eq!(kind.clock_pin(), layout.index_of("CLK"), "{}", kind);
            assert_eq!(
                kind.clock_pin().is_some(),
                kind.evaluation() == Evaluation::EdgeTriggered,
                "{}",
                kind
            );
        }
    }

    #[test]
    fn test_layout_shapes() {
        for kind in ComponentKind::iter() {
            let layout = kind.pin_layout();
            match kind.evaluation() {
                Evaluation::Source => assert!(layout.inputs.is_empty()),
                Evaluation::SingleOutput => assert_eq!(layout.outputs.len(), 1),
                Evaluation::Display => assert!(layout.outputs.is_empty()),
                _ => assert!(!layout.outputs.is_empty()),
            }
        }
        assert_eq!(FourBitAdder.pin_layout().len(), 14);
        assert_eq!(LedMatrix.pin_layout().len(), 16);
    }
}
