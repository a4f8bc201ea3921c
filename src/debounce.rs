//! Twitch suppression and distinct-state history for the raw pad readings.
//!
//! Capacitive pads flicker on contact make and break. A reading that involves
//! idle (a touch appearing out of nowhere, or everything releasing) is only
//! accepted once it has persisted; changes from one contact shape to another
//! pass immediately, since a moving finger produces exactly those.

use crate::pads::Pads;

/// Per-instance debouncing state.
///
/// `history` keeps the last three distinct accepted states. The shift runs at
/// the start of each cycle, one cycle behind acceptance, so on the cycle a new
/// state is accepted `history[0]` still holds its predecessor. The classifier
/// keys on exactly that pairing, which is what makes each transition fire a
/// direction for a single cycle.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct Debouncer {
  pads: Pads,
  history: [Pads; 3],
  raw: Pads,
  twitch_counter: u8,
}

impl Debouncer {
  pub(crate) const fn new() -> Self {
    Self { pads: Pads::IDLE, history: [Pads::IDLE; 3], raw: Pads::IDLE, twitch_counter: 0 }
  }

  /// Feed one raw reading; `delay` is the configured twitch suppression delay.
  pub(crate) fn update(&mut self, raw: Pads, delay: u8) {
    if self.pads != self.history[0] {
      self.history[2] = self.history[1];
      self.history[1] = self.history[0];
      self.history[0] = self.pads;
    }

    self.twitch_counter = self.twitch_counter.saturating_add(1);
    if raw != self.raw {
      self.twitch_counter = 0;
    }

    // Contact-to-contact changes pass immediately; entering or leaving idle
    // must persist for delay + 1 consecutive samples first.
    let changed = raw != self.pads;
    let between_contacts = !raw.is_idle() && !self.pads.is_idle();
    if changed && (between_contacts || self.twitch_counter == delay) {
      self.pads = raw;
    }
    self.raw = raw;
  }

  /// Currently accepted contact state.
  pub(crate) const fn pads(&self) -> Pads {
    self.pads
  }

  /// Last three distinct accepted states, most recent first.
  pub(crate) const fn history(&self) -> [Pads; 3] {
    self.history
  }

  /// Drop the older history entries on full release.
  pub(crate) fn clear_history_tail(&mut self) {
    self.history[1] = Pads::IDLE;
    self.history[2] = Pads::IDLE;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const DELAY: u8 = 2;

  fn pads(bits: u8) -> Pads {
    Pads::from_bits(bits)
  }

  #[test]
  fn touch_from_idle_needs_persistence() {
    let mut debouncer = Debouncer::new();

    debouncer.update(pads(0b001), DELAY);
    assert!(debouncer.pads().is_idle());
    debouncer.update(pads(0b001), DELAY);
    assert!(debouncer.pads().is_idle());

    // Third consecutive identical sample reaches the delay
    debouncer.update(pads(0b001), DELAY);
    assert_eq!(debouncer.pads(), pads(0b001));
  }

  #[test]
  fn contact_to_contact_is_immediate() {
    let mut debouncer = Debouncer::new();
    for _ in 0..=DELAY {
      debouncer.update(pads(0b001), DELAY);
    }
    assert_eq!(debouncer.pads(), pads(0b001));

    debouncer.update(pads(0b011), DELAY);
    assert_eq!(debouncer.pads(), pads(0b011));
    debouncer.update(pads(0b010), DELAY);
    assert_eq!(debouncer.pads(), pads(0b010));
  }

  #[test]
  fn short_release_twitch_is_suppressed() {
    let mut debouncer = Debouncer::new();
    for _ in 0..=DELAY {
      debouncer.update(pads(0b010), DELAY);
    }

    // Release flickers for fewer cycles than the delay
    debouncer.update(Pads::IDLE, DELAY);
    debouncer.update(Pads::IDLE, DELAY);
    assert_eq!(debouncer.pads(), pads(0b010));

    debouncer.update(pads(0b010), DELAY);
    assert_eq!(debouncer.pads(), pads(0b010));
  }

  #[test]
  fn unstable_reading_never_accepted() {
    let mut debouncer = Debouncer::new();
    for _ in 0..20 {
      debouncer.update(pads(0b001), DELAY);
      debouncer.update(Pads::IDLE, DELAY);
    }
    // The raw value never persists, so the counter never reaches the delay
    assert!(debouncer.pads().is_idle());
  }

  #[test]
  fn history_lags_acceptance_by_one_cycle() {
    let mut debouncer = Debouncer::new();
    for _ in 0..=DELAY {
      debouncer.update(pads(0b001), DELAY);
    }
    // Acceptance cycle: history still shows the predecessor
    assert_eq!(debouncer.history()[0], Pads::IDLE);

    debouncer.update(pads(0b011), DELAY);
    assert_eq!(debouncer.pads(), pads(0b011));
    assert_eq!(debouncer.history()[0], pads(0b001));

    // One cycle later the accepted state itself lands in history
    debouncer.update(pads(0b011), DELAY);
    assert_eq!(debouncer.history(), [pads(0b011), pads(0b001), Pads::IDLE]);
  }

  #[test]
  fn history_records_distinct_states_only() {
    let mut debouncer = Debouncer::new();
    for _ in 0..=DELAY {
      debouncer.update(pads(0b001), DELAY);
    }
    debouncer.update(pads(0b011), DELAY);
    debouncer.update(pads(0b010), DELAY);
    debouncer.update(pads(0b010), DELAY);
    debouncer.update(pads(0b010), DELAY);

    assert_eq!(debouncer.history(), [pads(0b010), pads(0b011), pads(0b001)]);
  }

  #[test]
  fn zero_delay_accepts_on_first_sample() {
    let mut debouncer = Debouncer::new();
    debouncer.update(pads(0b100), 0);
    assert_eq!(debouncer.pads(), pads(0b100));
  }
}
