//! Tap detection: a quick touch-and-release of exactly one pad.
//!
//! The window counter runs while a single pad is down and through the release
//! cycle. Any two-or-more-pad state slams the window shut by pegging the
//! counter at the timeout; it only rearms once the strip has been fully idle
//! for two cycles.

use crate::pads::{Pad, Pads};

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct TapTracker {
  counter: u16,
}

impl TapTracker {
  pub(crate) const fn new() -> Self {
    Self { counter: 0 }
  }

  /// Advance the window for this cycle.
  ///
  /// `previous` is the most recent distinct state before `pads`; the counter
  /// keeps running on the release cycle itself (idle with a non-idle
  /// predecessor) so a slow release still counts against the window.
  pub(crate) fn track(&mut self, pads: Pads, previous: Pads, timeout: u16) {
    let within_gesture = pads.single().is_some() || (pads.is_idle() && !previous.is_idle());
    if within_gesture {
      // Saturates at the timeout; the event test below only ever asks
      // whether the window is still open.
      self.counter = self.counter.saturating_add(1).min(timeout);
    } else if pads.is_idle() && previous.is_idle() {
      self.counter = 0;
    } else {
      self.counter = timeout;
    }
  }

  /// The pad released as a tap this cycle, if the window is still open.
  ///
  /// Valid from the cycle the release is accepted until the next update
  /// shifts the history.
  pub(crate) fn event(&self, pads: Pads, previous: Pads, timeout: u16) -> Option<Pad> {
    if self.counter < timeout && pads.is_idle() {
      previous.single()
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const TIMEOUT: u16 = 5;

  fn pads(bits: u8) -> Pads {
    Pads::from_bits(bits)
  }

  #[test]
  fn quick_release_of_each_pad_taps() {
    for (bits, pad) in [(0b001, Pad::A), (0b010, Pad::B), (0b100, Pad::C)] {
      let mut tap = TapTracker::new();
      tap.track(pads(bits), Pads::IDLE, TIMEOUT);
      assert_eq!(tap.event(pads(bits), Pads::IDLE, TIMEOUT), None);

      // Release cycle: idle with the tapped pad as predecessor
      tap.track(Pads::IDLE, pads(bits), TIMEOUT);
      assert_eq!(tap.event(Pads::IDLE, pads(bits), TIMEOUT), Some(pad));
    }
  }

  #[test]
  fn holding_past_the_timeout_suppresses() {
    let mut tap = TapTracker::new();
    for _ in 0..TIMEOUT {
      tap.track(pads(0b010), Pads::IDLE, TIMEOUT);
    }
    tap.track(Pads::IDLE, pads(0b010), TIMEOUT);
    assert_eq!(tap.event(Pads::IDLE, pads(0b010), TIMEOUT), None);
  }

  #[test]
  fn two_pad_contact_closes_the_window() {
    let mut tap = TapTracker::new();
    tap.track(pads(0b001), Pads::IDLE, TIMEOUT);
    tap.track(pads(0b011), pads(0b001), TIMEOUT);
    // Back to a single pad, then release: still no tap
    tap.track(pads(0b001), pads(0b011), TIMEOUT);
    tap.track(Pads::IDLE, pads(0b001), TIMEOUT);
    assert_eq!(tap.event(Pads::IDLE, pads(0b001), TIMEOUT), None);
  }

  #[test]
  fn window_rearms_after_full_idle() {
    let mut tap = TapTracker::new();
    for _ in 0..TIMEOUT + 3 {
      tap.track(pads(0b100), Pads::IDLE, TIMEOUT);
    }
    tap.track(Pads::IDLE, pads(0b100), TIMEOUT);
    assert_eq!(tap.event(Pads::IDLE, pads(0b100), TIMEOUT), None);

    // Second idle cycle has an idle predecessor and resets the counter
    tap.track(Pads::IDLE, Pads::IDLE, TIMEOUT);

    tap.track(pads(0b100), Pads::IDLE, TIMEOUT);
    tap.track(Pads::IDLE, pads(0b100), TIMEOUT);
    assert_eq!(tap.event(Pads::IDLE, pads(0b100), TIMEOUT), Some(Pad::C));
  }

  #[test]
  fn release_from_two_pads_reports_nothing() {
    let mut tap = TapTracker::new();
    tap.track(pads(0b011), Pads::IDLE, TIMEOUT);
    tap.track(Pads::IDLE, pads(0b011), TIMEOUT);
    assert_eq!(tap.event(Pads::IDLE, pads(0b011), TIMEOUT), None);
  }

  #[test]
  fn zero_timeout_disables_taps() {
    let mut tap = TapTracker::new();
    tap.track(pads(0b001), Pads::IDLE, 0);
    tap.track(Pads::IDLE, pads(0b001), 0);
    assert_eq!(tap.event(Pads::IDLE, pads(0b001), 0), None);
  }
}
