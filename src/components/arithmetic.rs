use super::gates;
use super::{ComponentKind, LogicValue, Pin};
use crate::data_structures::BitIter;
use ComponentKind::*;

/// Writes the outputs of the adder `kind` from its inputs.
///
/// Undefined inputs count as 0.
pub(super) fn compute(kind: ComponentKind, pins: &mut [Pin]) {
    match kind {
        HalfAdder => {
            let (a, b) = (pins[0].value(), pins[1].value());
            pins[2].set_value(gates::evaluate(Xor, a, b));
            pins[3].set_value(gates::evaluate(And, a, b));
        }
        FullAdder => {
            let total: u32 = pins[..3].iter().map(|pin| pin.value().bit()).sum();
            pins[3].set_value(LogicValue::from_bool(total % 2 == 1));
            pins[4].set_value(LogicValue::from_bool(total >= 2));
        }
        FourBitAdder => {
            // Operands and sum are laid out most significant bit first.
            let a = pack_msb_first(&pins[0..4]);
            let b = pack_msb_first(&pins[4..8]);
            let sum = a + b + pins[8].value().bit();

            for (i, bit) in BitIter::new(sum, 4).enumerate() {
                pins[12 - i].set_value(LogicValue::from_bool(bit));
            }
            pins[13].set_value(LogicValue::from_bool(sum > 15));
        }
        _ => unreachable!("{} is not an adder", kind),
    }
}

fn pack_msb_first(pins: &[Pin]) -> u32 {
    pins.iter()
        .fold(0, |acc, pin| (acc << 1) | pin.value().bit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use crate::Position;
    use LogicValue::*;

    fn adder(kind: ComponentKind, inputs: &[LogicValue]) -> Component {
        let mut c = Component::new(kind, Position::default());
        for (i, value) in inputs.iter().enumerate() {
            c.pins_mut()[i].set_value(*value);
        }
        c.compute_outputs();
        c
    }

    #[test]
    fn test_half_adder() {
        let c = adder(HalfAdder, &[High, High]);
        assert_eq!(c.output(2), Low);
        assert_eq!(c.output(3), High);

        let c = adder(HalfAdder, &[High, Undefined]);
        assert_eq!(c.output(2), Low);
        assert_eq!(c.output(3), Low);
    }

    #[test]
    fn test_full_adder_exhaustive() {
        for n in 0..8u32 {
            let inputs: Vec<_> = BitIter::new(n, 3).map(LogicValue::from_bool).collect();
            let total = n.count_ones();
            let c = adder(FullAdder, &inputs);
            assert_eq!(c.output(3), LogicValue::from_bool(total % 2 == 1), "{}", n);
            assert_eq!(c.output(4), LogicValue::from_bool(total >= 2), "{}", n);
        }

        let c = adder(FullAdder, &[High, High, Low]);
        assert_eq!(c.output(3), Low);
        assert_eq!(c.output(4), High);
    }

    /// Inputs for the four bit adder, operands most significant bit first.
    fn four_bit_inputs(a: u32, b: u32, cin: bool) -> Vec<LogicValue> {
        let msb_first = |n: u32| {
            let mut bits: Vec<_> = BitIter::new(n, 4).map(LogicValue::from_bool).collect();
            bits.reverse();
            bits
        };
        let mut inputs = msb_first(a);
        inputs.extend(msb_first(b));
        inputs.push(cin.into());
        inputs
    }

    fn four_bit_sum(c: &Component) -> u32 {
        pack_msb_first(&c.pins()[9..13])
    }

    #[test]
    fn test_four_bit_adder() {
        let c = adder(FourBitAdder, &four_bit_inputs(0b1010, 0b0101, false));
        assert_eq!(four_bit_sum(&c), 0b1111);
        assert_eq!(c.output(13), Low);

        let c = adder(FourBitAdder, &four_bit_inputs(0b1111, 0b0001, false));
        assert_eq!(four_bit_sum(&c), 0);
        assert_eq!(c.output(13), High);

        let c = adder(FourBitAdder, &four_bit_inputs(7, 8, true));
        assert_eq!(four_bit_sum(&c), 0);
        assert_eq!(c.output(13), High);
    }

    #[test]
    fn test_four_bit_adder_pin_order() {
        // A0 is pin 3 and S0 is pin 12.
        let mut inputs = vec![Low; 9];
        inputs[3] = High;
        let c = adder(FourBitAdder, &inputs);
        assert_eq!(c.output(12), High);
        assert_eq!(c.output(9), Low);
    }
}
