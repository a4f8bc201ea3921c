//! Position arithmetic: bounded stepping, rollover wraparound, ramping toward
//! a target, and the snap/spring-back drives.
//!
//! Steps are computed in wider integers throughout. A double step is up to
//! 510 units, so `u16` sums near the limit and subtractions near zero would
//! otherwise wrap.

use crate::config::{Config, Mode};
use crate::gesture::Direction;
use crate::pads::Pad;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct Output {
  current: u16,
  target: u16,
  previous: u16,
  ramp_counter: u8,
}

impl Output {
  pub(crate) const fn new(position: u16) -> Self {
    Self { current: position, target: position, previous: position, ramp_counter: 0 }
  }

  pub(crate) const fn current(&self) -> u16 {
    self.current
  }

  pub(crate) const fn target(&self) -> u16 {
    self.target
  }

  /// `true` when this cycle's adjustment moved the position.
  pub(crate) const fn changed(&self) -> bool {
    self.current != self.previous
  }

  /// Record the pre-adjustment position the change event compares against.
  pub(crate) fn capture_previous(&mut self) {
    self.previous = self.current;
  }

  /// Direct position override, clamped to the configured range.
  pub(crate) fn set_current(&mut self, position: u16, config: &Config) {
    self.current = position.min(config.limit);
    if !config.mode.ramps() {
      self.target = self.current;
    }
  }

  /// Direct target override, clamped to the configured range.
  ///
  /// Without ramping there is nothing to walk toward, so the position jumps
  /// along with it.
  pub(crate) fn set_target(&mut self, position: u16, config: &Config) {
    self.target = position.min(config.limit);
    if !config.mode.ramps() {
      self.current = self.target;
    }
  }

  /// Pull the ramp destination onto the current position.
  ///
  /// Runs on reconfiguration so new ramp settings start from where the
  /// output actually is.
  pub(crate) fn settle(&mut self) {
    self.target = self.current;
  }

  /// Drive toward the default position (spring-back and resets).
  pub(crate) fn reset(&mut self, config: &Config) {
    self.drive(config.default_position, config);
  }

  /// Drive toward the preset tied to a tapped pad.
  pub(crate) fn snap_to(&mut self, pad: Pad, config: &Config) {
    match pad {
      Pad::A => self.drive(0, config),
      Pad::B => self.drive(config.default_position, config),
      Pad::C => self.drive(config.limit, config),
    }
  }

  fn drive(&mut self, position: u16, config: &Config) {
    if config.mode.ramps() {
      self.target = position;
    } else {
      self.current = position;
      self.target = position;
    }
  }

  /// Apply this cycle's decoded direction and run the ramp engine.
  pub(crate) fn apply(&mut self, direction: Direction, config: &Config) {
    match config.mode {
      Mode::Rollover => {
        self.roll(direction, config);
        self.target = self.current;
      }
      Mode::Bounded { ramp: true, .. } => {
        self.target = stepped(self.target, direction, config);
        self.tick(config);
      }
      Mode::Bounded { .. } => {
        self.current = stepped(self.current, direction, config);
        self.target = self.current;
      }
    }
  }

  fn roll(&mut self, direction: Direction, config: &Config) {
    if direction.is_static() {
      return;
    }
    let mut step = config.resolution as i32 * direction.magnitude() as i32;
    if direction.is_reverse() {
      step = -step;
    }
    self.current = (self.current as i32 + step).rem_euclid(config.limit as i32) as u16;
  }

  /// Walk `current` toward `target` every `ramp_delay` cycles.
  fn tick(&mut self, config: &Config) {
    if self.ramp_counter == config.ramp_delay - 1 {
      let step = config.ramp_resolution as u16;
      if self.current < self.target {
        let gap = self.target - self.current;
        self.current += gap.min(step);
      } else if self.current > self.target {
        let gap = self.current - self.target;
        self.current -= gap.min(step);
      }
    }
    self.ramp_counter = (self.ramp_counter + 1) % config.ramp_delay;
  }
}

/// One direction step from `value`, clamped to `[0, limit]`.
///
/// A double step that would cross a bound still lands exactly on it.
fn stepped(value: u16, direction: Direction, config: &Config) -> u16 {
  let step = config.resolution as u32 * direction.magnitude() as u32;
  if direction.is_forward() {
    (value as u32 + step).min(config.limit as u32) as u16
  } else {
    (value as u32).saturating_sub(step) as u16
  }
}
