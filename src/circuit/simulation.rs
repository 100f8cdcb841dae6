use super::{Circuit, PinRef};
use crate::components::{Evaluation, LogicValue};
use indexmap::IndexMap;
use log::{debug, warn};
use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};

/// Default number of combinational passes [Circuit::simulate] runs before giving up.
pub const DEFAULT_MAX_PASSES: usize = 1000;

/// Per circuit simulation settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SimulationConfig {
    /// Upper bound on the combinational passes of a single simulation, 0 counts as 1.
    pub max_passes: usize,
}
impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SimulationError {
    /// The circuit kept changing after `passes` passes, usually an oscillating feedback loop.
    DidNotConverge { passes: usize },
}
impl Display for SimulationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::DidNotConverge { passes } => {
                write!(f, "circuit didn't stabilize after {} passes", passes)
            }
        }
    }
}
impl std::error::Error for SimulationError {}

/// Asserts that the circuit stabilizes within [DEFAULT_MAX_PASSES] passes and returns the pass count.
#[macro_export]
macro_rules! assert_settles {
    ($circuit:expr) => {
        $circuit
            .simulate_with_max($crate::circuit::DEFAULT_MAX_PASSES)
            .expect("Circuit didn't stabilize after 1000 passes")
    };
}

/// Asserts the value of each pin, `assert_pins!(circuit, pin => value, ...)`.
#[macro_export]
macro_rules! assert_pins {
    ($circuit:expr, $($pin:expr => $value:expr),+ $(,)?) => {
        $(
            let actual = $circuit.value($pin);
            assert!(
                actual == $value,
                "{} is {}, expected: {}",
                $pin,
                actual,
                $value
            );
        )+
    };
}

impl Circuit {
    /// Propagates values through the circuit until no pin changes, with the configured
    /// [max_passes](SimulationConfig::max_passes). Returns the number of combinational passes.
    ///
    /// See [Circuit::simulate_with_max].
    pub fn simulate(&mut self) -> Result<usize, SimulationError> {
        self.simulate_with_max(self.config.max_passes)
    }

    /// Propagates values through the circuit until no pin changes.
    ///
    /// 1. The input pins of every component but the primary inputs are reset to
    ///    [Undefined](LogicValue::Undefined).
    /// 2. Passes run until one of them changes nothing. Each pass copies values along the wires,
    ///    evaluates the single output gates and then the multi output components and displays.
    /// 3. Once stable, every sequential component samples its clock once and drives its outputs.
    ///    If any output changed, step 2 runs again.
    ///
    /// Sequential components only ever see clock values that went through every wire and gate on
    /// their way, no matter how many hops they took.
    ///
    /// Returns [SimulationError::DidNotConverge] once `max_passes` passes ran without reaching a
    /// stable state. At least one pass always runs.
    ///
    /// # Example
    /// ```
    /// # use logisim_core::{Circuit, Position, SimulationError};
    /// let mut c = Circuit::new();
    ///
    /// // A NOT gate feeding itself never settles.
    /// let not = c.add_not(Position::new(0, 0));
    /// c.connect(not.pin(1), not.pin(0)).unwrap();
    ///
    /// assert_eq!(
    ///     c.simulate_with_max(10),
    ///     Err(SimulationError::DidNotConverge { passes: 10 })
    /// );
    /// ```
    pub fn simulate_with_max(&mut self, max_passes: usize) -> Result<usize, SimulationError> {
        let max_passes = max_passes.max(1);
        for (_, component) in self.components.iter_mut() {
            component.reset_inputs();
        }
        let links = self.resolve_wires();

        let mut passes = 0;
        loop {
            loop {
                if passes == max_passes {
                    warn!("circuit didn't stabilize after {} passes", passes);
                    return Err(SimulationError::DidNotConverge { passes });
                }
                passes += 1;

                let mut changed = self.propagate_wires(&links);
                changed |= self.evaluate_gates();
                changed |= self.compute_outputs();

                #[cfg(feature = "debug_probes")]
                self.print_probes();

                if !changed {
                    break;
                }
            }

            let changed = self.update_sequential();

            #[cfg(feature = "debug_probes")]
            self.print_probes();

            if !changed {
                break;
            }
        }

        debug!("circuit stabilized after {} passes", passes);
        Ok(passes)
    }

    /// Groups the drivers of every pin driven by a complete wire with a defined direction.
    fn resolve_wires(&self) -> IndexMap<PinRef, SmallVec<[PinRef; 1]>> {
        let mut links: IndexMap<PinRef, SmallVec<[PinRef; 1]>> =
            IndexMap::with_capacity(self.wires.len());
        let mut inert = 0;
        for (handle, wire) in self.wires() {
            let (start, end) = match wire.end() {
                Some(end) => (wire.start(), end),
                None => continue,
            };
            let (start_pin, end_pin) = match (self.pin(start), self.pin(end)) {
                (Some(start_pin), Some(end_pin)) => (start_pin, end_pin),
                _ => {
                    debug!("{} has a dangling end", handle);
                    continue;
                }
            };
            match (start_pin.is_output(), end_pin.is_output()) {
                (true, false) => links.entry(end).or_default().push(start),
                (false, true) => links.entry(start).or_default().push(end),
                _ => inert += 1,
            }
        }
        if inert > 0 {
            warn!(
                "{} wire(s) connect two pins of the same direction and carry no value",
                inert
            );
        }
        links
    }

    /// Drivers that disagree leave the driven pin [Undefined](LogicValue::Undefined).
    fn propagate_wires(&mut self, links: &IndexMap<PinRef, SmallVec<[PinRef; 1]>>) -> bool {
        let mut changed = false;
        for (to, drivers) in links {
            let mut values = drivers.iter().map(|from| self.value(*from));
            let first = values.next().unwrap_or_default();
            let value = if values.all(|value| value == first) {
                first
            } else {
                LogicValue::Undefined
            };
            if let Ok(pin) = self.pin_mut(*to) {
                changed |= pin.set_value(value);
            }
        }
        changed
    }

    fn evaluate_gates(&mut self) -> bool {
        let mut changed = false;
        for (_, component) in self.components.iter_mut() {
            if component.kind().evaluation() == Evaluation::SingleOutput {
                let value = component.evaluate();
                changed |= component.drive_outputs(value);
            }
        }
        changed
    }

    fn compute_outputs(&mut self) -> bool {
        let mut changed = false;
        for (_, component) in self.components.iter_mut() {
            match component.kind().evaluation() {
                Evaluation::MultiOutput | Evaluation::Display => {
                    changed |= component.compute_outputs()
                }
                _ => {}
            }
        }
        changed
    }

    fn update_sequential(&mut self) -> bool {
        let mut changed = false;
        for (_, component) in self.components.iter_mut() {
            if component.kind().is_sequential() {
                changed |= component.update_on_clock();
            }
        }
        changed
    }

    /// Returns the value of every pin in the circuit, in component then pin order.
    pub fn snapshot(&self) -> Vec<LogicValue> {
        self.components()
            .flat_map(|(_, component)| component.pins().iter().map(|pin| pin.value()))
            .collect()
    }
}
