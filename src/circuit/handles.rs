use crate::data_structures::SlabIndex;
use std::fmt::{self, Display, Formatter};

/// Handle to a component placed in a [Circuit](super::Circuit).
///
/// Handles stay valid while the component is alive, a handle to a removed component never
/// resolves to a component added later.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ComponentHandle(pub(super) SlabIndex);
impl ComponentHandle {
    /// Returns a [PinRef] to the pin at `index` of this component.
    pub fn pin(self, index: usize) -> PinRef {
        PinRef {
            component: self,
            pin: index,
        }
    }
}
impl Display for ComponentHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "component {}", self.0)
    }
}

/// Handle to a wire in a [Circuit](super::Circuit).
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct WireHandle(pub(super) SlabIndex);
impl Display for WireHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "wire {}", self.0)
    }
}

/// Non-owning reference to a pin: the component that owns it and the pin's index in
/// [ComponentKind::pin_layout](crate::ComponentKind::pin_layout) order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PinRef {
    pub component: ComponentHandle,
    pub pin: usize,
}
impl Display for PinRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} pin {}", self.component, self.pin)
    }
}

/// A named pin whose value gets printed whenever a simulation changes it.
#[derive(Debug, Clone)]
#[cfg(feature = "debug_probes")]
pub(super) struct Probe {
    pub name: String,
    pub pin: PinRef,
    pub last: crate::LogicValue,
}
