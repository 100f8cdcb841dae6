//! Free running demo: a clock generator drives a 4-bit counter into a hex display and a
//! BCD counter into a seven segment display. Stop it with ctrl-c.
//!
//! Pass a path as the first argument to also dump the netlist there in dot format.
use logisim_core::{Circuit, ComponentKind::*, Position};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Renders segments a..g as a single line, lit segments show their letter.
fn segments_line(segments: [bool; 7]) -> String {
    segments
        .iter()
        .zip("abcdefg".chars())
        .map(|(lit, name)| if *lit { name } else { '.' })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut c = Circuit::new();

    let clock = c.add_clock_generator(Position::new(0, 0));
    let counter = c.add_component(FourBitCounter, Position::new(100, 0));
    let hex = c.add_component(HexDisplay, Position::new(200, 0));
    let bcd_counter = c.add_component(BcdCounter, Position::new(100, 200));
    let decoder = c.add_component(BcdToSevenSegment, Position::new(200, 200));
    let display = c.add_component(SevenSegmentDisplay, Position::new(300, 200));

    c.connect(clock.pin(0), counter.pin(0))?;
    c.connect(clock.pin(0), bcd_counter.pin(0))?;
    for bit in 0..4 {
        c.connect(counter.pin(2 + bit), hex.pin(bit))?;
        c.connect(bcd_counter.pin(2 + bit), decoder.pin(bit))?;
    }
    for segment in 0..7 {
        c.connect(decoder.pin(4 + segment), display.pin(segment))?;
    }
    if let Some(clock) = c.component_mut(clock) {
        clock.set_clock_frequency(4);
    }

    #[cfg(feature = "debug_probes")]
    c.probe(clock.pin(0), "clock");

    if let Some(path) = std::env::args().nth(1) {
        c.dump_dot(&path)?;
        colour::dark_grey_ln!("netlist written to {}", path);
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))?;

    c.simulate()?;
    while running.load(Ordering::SeqCst) {
        if c.tick_clocks(Instant::now()) {
            let passes = c.simulate()?;

            let hex_char = c
                .component(hex)
                .and_then(|hex| hex.numeric_display())
                .map(|display| display.hex_char())
                .unwrap_or('?');
            let segments = c
                .component(display)
                .and_then(|display| display.seven_segment())
                .map(|display| segments_line(display.segments()))
                .unwrap_or_default();
            colour::green!("hex: {} ", hex_char);
            colour::yellow!("7seg: {} ", segments);
            colour::dark_grey_ln!("({} passes)", passes);
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    colour::cyan_ln!("stopped");
    Ok(())
}
