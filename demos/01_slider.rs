//! Volume-slider simulation driven by a scripted finger drag.
//!
//! A drag across the three pads raises the level, and a quick tap on the
//! middle pad recalls the default. Run with `cargo run --example 01_slider`.

use touchbar::{Config, Input, Mode, TouchBar};

fn main() -> Result<(), touchbar::ConfigError> {
  let config = Config::default()
    .with_default_position(5000)
    .with_resolution(250)
    .with_tap_timeout(20)
    .with_twitch_suppression_delay(1)
    .with_mode(Mode::Bounded { spring_back: false, snap: true, ramp: false });
  let mut bar = TouchBar::new(config)?;

  // One raw 3-bit reading per control cycle, bit0 = pad A
  let script = [
    0b001, 0b001, 0b001, // settle on pad A
    0b011, 0b010, // slide across to B
    0b110, 0b100, // and on to C
    0b000, 0b000, 0b000, // let go
    0b010, 0b010, // quick tap on B...
    0b000, 0b000, // ...recalls the default position
  ];

  println!("starting at {:5} ({:6.2} %)", bar.position(), bar.position_percent());
  for (cycle, raw) in script.into_iter().enumerate() {
    bar.update(Input::packed(raw));
    if let Some(pad) = bar.tap() {
      println!("cycle {cycle:2}: tap on pad {}", pad.as_str());
    }
    if bar.changed() {
      println!("cycle {cycle:2}: position {:5} ({:6.2} %)", bar.position(), bar.position_percent());
    }
  }
  Ok(())
}
