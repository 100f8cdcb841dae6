//! On disk layout of a [CircuitDocument](super::CircuitDocument).
use crate::components::{
    ClockEdge, Component, ComponentKind, CountDirection, LogicValue, ParityMode, ShiftDirection,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Kind of a saved component, its snake case name or the integer older files were written with.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KindTag {
    Name(String),
    Legacy(u8),
}
impl KindTag {
    /// Returns the kind this tag names, if any.
    pub fn resolve(&self) -> Option<ComponentKind> {
        match self {
            KindTag::Name(name) => ComponentKind::from_str(name).ok(),
            KindTag::Legacy(tag) => ComponentKind::try_from(*tag).ok(),
        }
    }
}
impl From<ComponentKind> for KindTag {
    fn from(kind: ComponentKind) -> Self {
        KindTag::Name(kind.to_string())
    }
}
impl Display for KindTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KindTag::Name(name) => write!(f, "\"{}\"", name),
            KindTag::Legacy(tag) => write!(f, "{}", tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct Metadata {
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct DocumentFile {
    pub metadata: Metadata,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub components: Vec<ComponentEntry>,
    #[serde(default)]
    pub wires: Vec<WireEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct ComponentEntry {
    #[serde(rename = "type")]
    pub kind: KindTag,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub pins: Vec<LogicValue>,
    #[serde(default)]
    pub settings: Settings,
}

/// Per-kind configuration, only the fields that apply to the kind are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_edge: Option<ClockEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_direction: Option<CountDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_direction: Option<ShiftDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_frequency: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_cathode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parity: Option<ParityMode>,
}
impl Settings {
    pub fn of(component: &Component) -> Self {
        Self {
            switch_on: component.switch_state(),
            trigger_edge: component.edge_detector().map(|detector| detector.edge()),
            count_direction: component.counter().map(|counter| counter.direction()),
            shift_direction: match component.kind() {
                ComponentKind::FourBitShiftRegister => {
                    component.register().map(|register| register.shift_direction())
                }
                _ => None,
            },
            clock_frequency: component.clock_generator().map(|clock| clock.frequency()),
            common_cathode: component
                .seven_segment()
                .map(|display| display.is_common_cathode()),
            parity: component.parity_mode(),
        }
    }

    /// Applies every setting to `component`, settings that don't fit its kind are ignored.
    pub fn apply(&self, component: &mut Component) {
        if let Some(on) = self.switch_on {
            component.set_switch(on);
        }
        if let Some(edge) = self.trigger_edge {
            component.set_trigger_edge(edge);
        }
        if let Some(direction) = self.count_direction {
            component.set_count_direction(direction);
        }
        if let Some(direction) = self.shift_direction {
            component.set_shift_direction(direction);
        }
        if let Some(frequency) = self.clock_frequency {
            component.set_clock_frequency(frequency);
        }
        if let Some(common_cathode) = self.common_cathode {
            component.set_common_cathode(common_cathode);
        }
        if let Some(mode) = self.parity {
            component.set_parity_mode(mode);
        }
    }
}

/// A wire between two pins, each given as (component ordinal, pin index).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct WireEntry {
    pub start: (usize, usize),
    #[serde(default)]
    pub end: Option<(usize, usize)>,
    #[serde(default)]
    pub waypoints: Vec<(i32, i32)>,
}
