//! Direction classification over the three-pad ring.
//!
//! The pads form a fixed topology A → B → C → A; sliding a finger forward
//! walks the contact state through a known ring of values, and sliding back
//! walks it the other way. Classification is purely combinational: each cycle
//! the current state and its recorded predecessors either match one of the
//! transition rules below or they do not. There is no sequential state beyond
//! the history itself.
//!
//! Two rule families cover the two ways a finger can ride the strip:
//!
//! - **Light touch**: at most two pads active at once. Every rule keys on
//!   `(pads, history[0])`. A match against the direct predecessor yields a
//!   single step; a match against the predecessor one further around the ring
//!   means an intermediate state was skipped (fast finger) and yields a double
//!   step.
//! - **Hard touch**: the finger presses hard enough to bridge 2–3 pads. The
//!   `(pads, history[0])` pair alone is ambiguous here, so each rule inspects
//!   `(history[1], history[2])` to recover which way the roll started. Hard
//!   rules only ever yield single steps.

use crate::pads::Pads;

/// Decoded movement for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
  /// Two steps backward: a reverse transition that skipped a state.
  Decrement2,
  /// One step backward.
  Decrement,
  /// No movement decoded this cycle.
  Static,
  /// One step forward.
  Increment,
  /// Two steps forward: a forward transition that skipped a state.
  Increment2,
}

impl Direction {
  /// Returns `true` for forward movement of either size.
  pub const fn is_forward(self) -> bool {
    matches!(self, Direction::Increment | Direction::Increment2)
  }

  /// Returns `true` for backward movement of either size.
  pub const fn is_reverse(self) -> bool {
    matches!(self, Direction::Decrement | Direction::Decrement2)
  }

  /// Returns `true` if no movement was decoded.
  pub const fn is_static(self) -> bool {
    matches!(self, Direction::Static)
  }

  /// Step multiplier: 0, 1, or 2 resolution units.
  pub const fn magnitude(self) -> u8 {
    match self {
      Direction::Static => 0,
      Direction::Increment | Direction::Decrement => 1,
      Direction::Increment2 | Direction::Decrement2 => 2,
    }
  }

  /// Returns a human-readable string representation of the direction.
  pub const fn as_str(self) -> &'static str {
    match self {
      Direction::Decrement2 => "decrement2",
      Direction::Decrement => "decrement",
      Direction::Static => "static",
      Direction::Increment => "increment",
      Direction::Increment2 => "increment2",
    }
  }
}

/// One light-touch transition: current state plus the state it replaced.
struct LightRule {
  pads: u8,
  previous: u8,
  direction: Direction,
}

impl LightRule {
  const fn new(pads: u8, previous: u8, direction: Direction) -> Self {
    Self { pads, previous, direction }
  }
}

/// One hard-touch transition, disambiguated by the two older history entries.
struct HardRule {
  pads: u8,
  previous: u8,
  forward: [(u8, u8); 2],
  reverse: [(u8, u8); 2],
}

impl HardRule {
  const fn new(pads: u8, previous: u8, forward: [(u8, u8); 2], reverse: [(u8, u8); 2]) -> Self {
    Self { pads, previous, forward, reverse }
  }
}

/// Light-touch rules in evaluation order: forward cases, then reverse cases.
///
/// Reading a forward pair: touching A then bridging to A+B means the finger
/// moved toward B, so `(0b011, 0b001)` is one step forward, and arriving at
/// A+B straight from C+A (the state one further back around the ring) is the
/// skip variant worth two. The reverse half mirrors every pair.
const LIGHT_RULES: [LightRule; 24] = [
  LightRule::new(0b011, 0b001, Direction::Increment),
  LightRule::new(0b011, 0b101, Direction::Increment2),
  LightRule::new(0b010, 0b011, Direction::Increment),
  LightRule::new(0b010, 0b001, Direction::Increment2),
  LightRule::new(0b110, 0b010, Direction::Increment),
  LightRule::new(0b110, 0b011, Direction::Increment2),
  LightRule::new(0b100, 0b110, Direction::Increment),
  LightRule::new(0b100, 0b010, Direction::Increment2),
  LightRule::new(0b101, 0b100, Direction::Increment),
  LightRule::new(0b101, 0b110, Direction::Increment2),
  LightRule::new(0b001, 0b101, Direction::Increment),
  LightRule::new(0b001, 0b100, Direction::Increment2),
  LightRule::new(0b101, 0b001, Direction::Decrement),
  LightRule::new(0b101, 0b011, Direction::Decrement2),
  LightRule::new(0b100, 0b101, Direction::Decrement),
  LightRule::new(0b100, 0b001, Direction::Decrement2),
  LightRule::new(0b110, 0b100, Direction::Decrement),
  LightRule::new(0b110, 0b101, Direction::Decrement2),
  LightRule::new(0b010, 0b110, Direction::Decrement),
  LightRule::new(0b010, 0b100, Direction::Decrement2),
  LightRule::new(0b011, 0b010, Direction::Decrement),
  LightRule::new(0b011, 0b110, Direction::Decrement2),
  LightRule::new(0b001, 0b011, Direction::Decrement),
  LightRule::new(0b001, 0b010, Direction::Decrement2),
];

/// Hard-touch rules. A roll with all pads pressed alternates between the
/// all-on state and a two-pad state, so `(pads, history[0])` repeats for both
/// roll directions and only the older entries tell them apart. The second
/// trail pair of each rule covers the roll's entry from a light touch.
const HARD_RULES: [HardRule; 6] = [
  HardRule::new(0b111, 0b011, [(0b111, 0b101), (0b001, 0b000)], [(0b111, 0b110), (0b010, 0b000)]),
  HardRule::new(0b110, 0b111, [(0b011, 0b111), (0b011, 0b001)], [(0b101, 0b111), (0b101, 0b001)]),
  HardRule::new(0b111, 0b110, [(0b111, 0b011), (0b010, 0b000)], [(0b111, 0b101), (0b100, 0b000)]),
  HardRule::new(0b101, 0b111, [(0b110, 0b111), (0b110, 0b010)], [(0b011, 0b111), (0b011, 0b010)]),
  HardRule::new(0b111, 0b101, [(0b111, 0b110), (0b100, 0b000)], [(0b111, 0b011), (0b001, 0b000)]),
  HardRule::new(0b011, 0b111, [(0b101, 0b111), (0b101, 0b100)], [(0b110, 0b111), (0b110, 0b100)]),
];

/// Classify the current cycle's movement from the contact state and history.
///
/// Rules are scanned in table order and a later match overwrites an earlier
/// one; anything the tables do not cover leaves the direction static. The
/// caller handles the idle state (no rule matches it).
pub(crate) fn classify(pads: Pads, history: [Pads; 3]) -> Direction {
  let key = (pads.bits(), history[0].bits());
  let trail = (history[1].bits(), history[2].bits());

  let mut direction = Direction::Static;
  for rule in &LIGHT_RULES {
    if key == (rule.pads, rule.previous) {
      direction = rule.direction;
    }
  }
  for rule in &HARD_RULES {
    if key == (rule.pads, rule.previous) {
      if rule.forward.contains(&trail) {
        direction = Direction::Increment;
      }
      if rule.reverse.contains(&trail) {
        direction = Direction::Decrement;
      }
    }
  }
  direction
}
