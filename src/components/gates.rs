use super::{ComponentKind, LogicValue};
use ComponentKind::*;
use LogicValue::*;

/// Returns the output of the single-output gate `kind` for inputs `a` and `b`.
///
/// Gates never output [Undefined], an undefined input counts as "not [High]"
/// (and as "not [Low]" for the gates that look for an explicit [Low]).
/// `b` is ignored by [Not] and [Buffer].
///
/// # Panics
///
/// Panics if `kind` is not a single-output gate.
///
/// # Example
/// ```
/// # use logisim_core::{ComponentKind, LogicValue::*};
/// # use logisim_core::components::gates::evaluate;
/// assert_eq!(evaluate(ComponentKind::And, High, Undefined), Low);
/// assert_eq!(evaluate(ComponentKind::Not, Undefined, Undefined), High);
/// ```
pub fn evaluate(kind: ComponentKind, a: LogicValue, b: LogicValue) -> LogicValue {
    let out = match kind {
        And => a == High && b == High,
        Or => a == High || b == High,
        Not => a != High,
        Nand => !(a == High && b == High),
        Nor => !(a == High || b == High),
        Xor => (a == High && b == Low) || (a == Low && b == High),
        Xnor => (a == High && b == High) || (a == Low && b == Low),
        Buffer => a == High,
        _ => panic!("{} is not a single-output gate", kind),
    };
    LogicValue::from_bool(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: [LogicValue; 3] = [Low, High, Undefined];

    /// Checks `kind` against `table`, indexed by [Low, High, Undefined] x [Low, High, Undefined].
    fn assert_table(kind: ComponentKind, table: [[LogicValue; 3]; 3]) {
        for (i, a) in VALUES.iter().enumerate() {
            for (j, b) in VALUES.iter().enumerate() {
                assert_eq!(
                    evaluate(kind, *a, *b),
                    table[i][j],
                    "{}({}, {})",
                    kind,
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_and() {
        assert_table(And, [[Low, Low, Low], [Low, High, Low], [Low, Low, Low]]);
    }

    #[test]
    fn test_or() {
        assert_table(Or, [[Low, High, Low], [High, High, High], [Low, High, Low]]);
    }

    #[test]
    fn test_nand() {
        assert_table(
            Nand,
            [[High, High, High], [High, Low, High], [High, High, High]],
        );
    }

    #[test]
    fn test_nor() {
        assert_table(Nor, [[High, Low, High], [Low, Low, Low], [High, Low, High]]);
    }

    #[test]
    fn test_xor() {
        assert_table(Xor, [[Low, High, Low], [High, Low, Low], [Low, Low, Low]]);
    }

    #[test]
    fn test_xnor() {
        assert_table(Xnor, [[High, Low, Low], [Low, High, Low], [Low, Low, Low]]);
    }

    #[test]
    fn test_not_and_buffer() {
        for b in VALUES.iter() {
            assert_eq!(evaluate(Not, Low, *b), High);
            assert_eq!(evaluate(Not, High, *b), Low);
            assert_eq!(evaluate(Not, Undefined, *b), High);

            assert_eq!(evaluate(Buffer, Low, *b), Low);
            assert_eq!(evaluate(Buffer, High, *b), High);
            assert_eq!(evaluate(Buffer, Undefined, *b), Low);
        }
    }

    #[test]
    #[should_panic(expected = "half_adder is not a single-output gate")]
    fn test_not_a_gate() {
        evaluate(HalfAdder, High, High);
    }
}
