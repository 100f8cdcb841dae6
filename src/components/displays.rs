use super::{pack_lsb_first, Pin};
use bitvec::prelude::*;

/// State of a seven segment display, segments a..g on pins 0..7.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDisplay {
    segments: [bool; 7],
    pub(super) common_cathode: bool,
}
impl SegmentDisplay {
    /// Returns the lit state of segments a..g.
    pub fn segments(&self) -> [bool; 7] {
        self.segments
    }

    /// A common cathode display lights a segment on [High](crate::LogicValue::High), a common anode one on anything else.
    pub fn is_common_cathode(&self) -> bool {
        self.common_cathode
    }

    pub(super) fn refresh(&mut self, pins: &[Pin]) {
        for (segment, pin) in self.segments.iter_mut().zip(pins.iter()) {
            *segment = pin.value().is_high() == self.common_cathode;
        }
    }
}
impl Default for SegmentDisplay {
    fn default() -> Self {
        Self {
            segments: [false; 7],
            common_cathode: true,
        }
    }
}

/// State of an 8x8 LED matrix. Pins 0..8 are the row lines and pins 8..16 the column lines,
/// an LED is lit when both its row and its column are [High](crate::LogicValue::High).
#[derive(Debug, Clone, PartialEq)]
pub struct LedGrid {
    leds: BitArray<[u64; 1], Lsb0>,
}
impl LedGrid {
    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        row < 8 && col < 8 && self.leds[row * 8 + col]
    }

    pub fn lit_count(&self) -> usize {
        self.leds.count_ones()
    }

    pub(super) fn refresh(&mut self, pins: &[Pin]) {
        for row in 0..8 {
            for col in 0..8 {
                let lit = pins[row].value().is_high() && pins[8 + col].value().is_high();
                self.leds.set(row * 8 + col, lit);
            }
        }
    }
}
impl Default for LedGrid {
    fn default() -> Self {
        Self {
            leds: BitArray::new([0; 1]),
        }
    }
}

/// Shows the LSB first value of its inputs, used by the hex and the binary displays.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct NumericDisplay {
    value: u8,
}
impl NumericDisplay {
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns the value as an uppercase hex digit, only meaningful for 4 bit displays.
    pub fn hex_char(&self) -> char {
        std::char::from_digit(self.value as u32 % 16, 16)
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }

    pub(super) fn refresh(&mut self, pins: &[Pin]) {
        self.value = pack_lsb_first(pins) as u8;
    }
}

#[cfg(test)]
mod tests {
    use crate::components::{Component, ComponentKind};
    use crate::Position;
    use crate::LogicValue::{self, *};

    fn driven(kind: ComponentKind, inputs: &[LogicValue]) -> Component {
        let mut c = Component::new(kind, Position::default());
        for (i, value) in inputs.iter().enumerate() {
            c.pins_mut()[i].set_value(*value);
        }
        c.compute_outputs();
        c
    }

    #[test]
    fn test_seven_segment_polarity() {
        let inputs = [High, Low, Undefined, High, Low, Low, High];
        let c = driven(ComponentKind::SevenSegmentDisplay, &inputs);
        let segments = c.seven_segment().unwrap().segments();
        assert_eq!(segments, [true, false, false, true, false, false, true]);

        let mut c = Component::new(ComponentKind::SevenSegmentDisplay, Position::default());
        c.set_common_cathode(false);
        for (i, value) in inputs.iter().enumerate() {
            c.pins_mut()[i].set_value(*value);
        }
        c.compute_outputs();
        let segments = c.seven_segment().unwrap().segments();
        assert_eq!(segments, [false, true, true, false, true, true, false]);
    }

    #[test]
    fn test_led_matrix() {
        let mut inputs = vec![Low; 16];
        inputs[2] = High;
        inputs[5] = High;
        inputs[8 + 7] = High;
        let c = driven(ComponentKind::LedMatrix, &inputs);
        let matrix = c.led_matrix().unwrap();
        assert_eq!(matrix.lit_count(), 2);
        assert!(matrix.is_lit(2, 7));
        assert!(matrix.is_lit(5, 7));
        assert!(!matrix.is_lit(2, 6));
        assert!(!matrix.is_lit(8, 7));
    }

    #[test]
    fn test_numeric_displays() {
        let c = driven(ComponentKind::HexDisplay, &[High, High, Low, High]);
        let display = c.numeric_display().unwrap();
        assert_eq!(display.value(), 11);
        assert_eq!(display.hex_char(), 'B');

        let c = driven(
            ComponentKind::BinaryDisplay,
            &[High, Low, Low, Low, Undefined, Low, Low, High],
        );
        assert_eq!(c.numeric_display().unwrap().value(), 129);
    }

    #[test]
    fn test_output_led() {
        let c = driven(ComponentKind::OutputLed, &[High]);
        assert!(c.is_lit());
        let c = driven(ComponentKind::OutputLed, &[Undefined]);
        assert!(!c.is_lit());
    }
}
