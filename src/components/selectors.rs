use super::{ComponentKind, LogicValue, Pin};
use ComponentKind::*;
use LogicValue::*;

/// Returns the selected line index, [None] if any select line is [Undefined].
fn select(lines: &[Pin]) -> Option<usize> {
    lines.iter().enumerate().try_fold(0, |acc, (i, pin)| {
        pin.value().to_bool().map(|bit| acc | (bit as usize) << i)
    })
}

/// Writes the outputs of the multiplexer or demultiplexer `kind` from its inputs.
pub(super) fn compute(kind: ComponentKind, pins: &mut [Pin]) {
    match kind {
        Mux2To1 => mux(pins, 2, 1),
        Mux4To1 => mux(pins, 4, 2),
        Demux1To2 => demux(pins, 1, 2),
        Demux1To4 => demux(pins, 2, 4),
        _ => unreachable!("{} is not a selector", kind),
    }
}

/// Layout: data inputs, select lines, output.
fn mux(pins: &mut [Pin], data: usize, selects: usize) {
    let out = match select(&pins[data..data + selects]) {
        Some(line) => pins[line].value(),
        None => Undefined,
    };
    pins[data + selects].set_value(out);
}

/// Layout: input, select lines, outputs.
fn demux(pins: &mut [Pin], selects: usize, outputs: usize) {
    let input = pins[0].value();
    let selected = select(&pins[1..1 + selects]);
    for (i, pin) in pins[1 + selects..1 + selects + outputs].iter_mut().enumerate() {
        pin.set_value(match selected {
            Some(line) if line == i => input,
            Some(_) => Low,
            None => Undefined,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use crate::Position;

    fn selector(kind: ComponentKind, inputs: &[LogicValue]) -> Component {
        let mut c = Component::new(kind, Position::default());
        for (i, value) in inputs.iter().enumerate() {
            c.pins_mut()[i].set_value(*value);
        }
        c.compute_outputs();
        c
    }

    #[test]
    fn test_mux2() {
        assert_eq!(selector(Mux2To1, &[High, Low, Low]).output(3), High);
        assert_eq!(selector(Mux2To1, &[High, Low, High]).output(3), Low);
        assert_eq!(selector(Mux2To1, &[High, High, Undefined]).output(3), Undefined);
    }

    #[test]
    fn test_mux4() {
        let data = [Low, High, Low, High];
        let c = selector(Mux4To1, &[data[0], data[1], data[2], data[3], High, Low]);
        assert_eq!(c.output(6), High);

        let c = selector(Mux4To1, &[High, Low, Low, Low, Low, Low]);
        assert_eq!(c.output(6), High);

        let c = selector(Mux4To1, &[Low, Low, Low, High, High, High]);
        assert_eq!(c.output(6), High);

        let c = selector(Mux4To1, &[High, High, High, High, Low, Undefined]);
        assert_eq!(c.output(6), Undefined);
    }

    #[test]
    fn test_demux2() {
        let c = selector(Demux1To2, &[High, High]);
        assert_eq!((c.output(2), c.output(3)), (Low, High));

        let c = selector(Demux1To2, &[High, Undefined]);
        assert_eq!((c.output(2), c.output(3)), (Undefined, Undefined));
    }

    #[test]
    fn test_demux4() {
        let c = selector(Demux1To4, &[High, Low, High]);
        let outputs: Vec<_> = (3..7).map(|i| c.output(i)).collect();
        assert_eq!(outputs, vec![Low, Low, High, Low]);

        let c = selector(Demux1To4, &[High, Undefined, Low]);
        let outputs: Vec<_> = (3..7).map(|i| c.output(i)).collect();
        assert_eq!(outputs, vec![Undefined; 4]);
    }
}
