//! Endless jog-wheel simulation with the configuration kept in a byte store.
//!
//! Rollover mode wraps the position modulo the limit, so dragging around the
//! pad ring behaves like spinning a rotary encoder with 24 detents per turn.
//! Run with `cargo run --example 02_jog_wheel`.

use touchbar::{Config, Input, MemoryStore, Mode, TouchBar, RECORD_LEN};

fn main() -> Result<(), touchbar::StoreError<touchbar::OutOfRegion>> {
  let mut store = MemoryStore::<RECORD_LEN>::new();
  Config::default()
    .with_limit(2400)
    .with_resolution(100)
    .with_twitch_suppression_delay(1)
    .with_mode(Mode::Rollover)
    .save_to(&mut store, 0)?;

  let mut wheel = TouchBar::from_store(&mut store, 0)?;

  // Settle the first contact through the twitch filter
  wheel.update(Input::packed(0b001));
  wheel.update(Input::packed(0b001));

  println!("clockwise:");
  let forward = [0b011, 0b010, 0b110, 0b100, 0b101, 0b001];
  for raw in forward.into_iter().cycle().take(30) {
    wheel.update(Input::packed(raw));
    print_detent(&wheel);
  }

  println!("counter-clockwise:");
  let backward = [0b101, 0b100, 0b110, 0b010, 0b011, 0b001];
  for raw in backward.into_iter().cycle().take(12) {
    wheel.update(Input::packed(raw));
    print_detent(&wheel);
  }
  Ok(())
}

fn print_detent(wheel: &TouchBar) {
  if wheel.changed() {
    println!("  position {:4} (detent {:2})", wheel.position(), wheel.position() / 100);
  }
}
