use super::{drive_lsb_first, pack_lsb_first, ComponentKind, LogicValue, Pin};
use serde::{Deserialize, Serialize};
use ComponentKind::*;
use LogicValue::*;

/// Segment patterns for the decimal digits, bit 6 is segment a and bit 0 is segment g.
const DIGIT_SEGMENTS: [u8; 10] = [
    0b111_1110, 0b011_0000, 0b110_1101, 0b111_1001, 0b011_0011, 0b101_1011, 0b101_1111,
    0b111_0000, 0b111_1111, 0b111_1011,
];

/// Returns the segments a..g lit for `code`, codes above 9 are blank.
///
/// # Example
/// ```
/// # use logisim_core::components::coders::seven_segments;
/// assert_eq!(seven_segments(1), [false, true, true, false, false, false, false]);
/// assert_eq!(seven_segments(12), [false; 7]);
/// ```
pub fn seven_segments(code: u32) -> [bool; 7] {
    let pattern = DIGIT_SEGMENTS.get(code as usize).copied().unwrap_or(0);
    let mut segments = [false; 7];
    for (i, segment) in segments.iter_mut().enumerate() {
        *segment = pattern & (1 << (6 - i)) != 0;
    }
    segments
}

/// Parity the [ParityGenerator](ComponentKind::ParityGenerator) output completes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityMode {
    Even,
    Odd,
}
impl Default for ParityMode {
    fn default() -> Self {
        ParityMode::Even
    }
}

/// Writes the outputs of the decoder, encoder, comparator or parity `kind`.
///
/// `parity` is only read by [ParityGenerator].
pub(super) fn compute(kind: ComponentKind, parity: ParityMode, pins: &mut [Pin]) {
    match kind {
        Decoder2To4 => decode(pins, 2),
        Decoder3To8 => decode(pins, 3),
        Decoder4To16 => decode(pins, 4),
        PriorityEncoder4To2 => priority_encode(pins, 4, 2),
        PriorityEncoder8To3 => priority_encode(pins, 8, 3),
        BcdToSevenSegment => {
            let code = pack_lsb_first(&pins[0..4]);
            for (pin, lit) in pins[4..11].iter_mut().zip(seven_segments(code).iter()) {
                pin.set_value(LogicValue::from_bool(*lit));
            }
        }
        MagnitudeComparator => {
            let a = pack_lsb_first(&pins[0..4]);
            let b = pack_lsb_first(&pins[4..8]);
            pins[8].set_value(LogicValue::from_bool(a > b));
            pins[9].set_value(LogicValue::from_bool(a == b));
            pins[10].set_value(LogicValue::from_bool(a < b));
        }
        ParityGenerator => {
            let odd = pack_lsb_first(&pins[0..4]).count_ones() % 2 == 1;
            let out = match parity {
                ParityMode::Even => odd,
                ParityMode::Odd => !odd,
            };
            pins[4].set_value(LogicValue::from_bool(out));
        }
        _ => unreachable!("{} is not a coder", kind),
    }
}

/// Layout: `bits` address lines LSB first, enable, 2^`bits` outputs.
fn decode(pins: &mut [Pin], bits: usize) {
    let enabled = pins[bits].value() == High;
    let address = pack_lsb_first(&pins[..bits]) as usize;
    for (i, pin) in pins[bits + 1..].iter_mut().enumerate() {
        pin.set_value(LogicValue::from_bool(enabled && i == address));
    }
}

/// Layout: `inputs` request lines, `bits` address outputs LSB first, valid.
fn priority_encode(pins: &mut [Pin], inputs: usize, bits: usize) {
    let winner = (0..inputs).rev().find(|i| pins[*i].value() == High);
    let address = winner.unwrap_or(0) as u32;
    drive_lsb_first(&mut pins[inputs..inputs + bits], address);
    pins[inputs + bits].set_value(LogicValue::from_bool(winner.is_some()));
}
