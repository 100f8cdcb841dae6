use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Tri-state logic signal.
///
/// [LogicValue::Undefined] means the signal has not been driven yet, is conflicting or is a don't-care.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicValue {
    Low,
    High,
    Undefined,
}
use LogicValue::*;

impl LogicValue {
    /// Returns [High] for `true` and [Low] for `false`.
    pub fn from_bool(value: bool) -> Self {
        if value {
            High
        } else {
            Low
        }
    }

    pub fn is_high(self) -> bool {
        self == High
    }

    pub fn is_low(self) -> bool {
        self == Low
    }

    /// Returns true if `self` is [High] or [Low].
    pub fn is_defined(self) -> bool {
        self != Undefined
    }

    /// Returns 1 for [High] and 0 for anything else, [Undefined] counts as 0 in arithmetic.
    pub fn bit(self) -> u32 {
        (self == High) as u32
    }

    /// Returns the boolean value of a driven signal, [None] if it is [Undefined].
    pub fn to_bool(self) -> Option<bool> {
        match self {
            High => Some(true),
            Low => Some(false),
            Undefined => None,
        }
    }

    /// Returns the logical complement, [Undefined] stays [Undefined].
    ///
    /// # Example
    /// ```
    /// # use logisim_core::LogicValue;
    /// assert_eq!(LogicValue::High.complement(), LogicValue::Low);
    /// assert_eq!(LogicValue::Undefined.complement(), LogicValue::Undefined);
    /// ```
    pub fn complement(self) -> Self {
        match self {
            High => Low,
            Low => High,
            Undefined => Undefined,
        }
    }
}

impl Default for LogicValue {
    fn default() -> Self {
        Undefined
    }
}

impl From<bool> for LogicValue {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl Display for LogicValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = match self {
            Low => '0',
            High => '1',
            Undefined => 'X',
        };
        write!(f, "{}", c)
    }
}
