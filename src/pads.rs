//! Pad-state vocabulary: the packed 3-bit contact state, pad identifiers, and
//! the per-cycle input forms accepted by [`crate::TouchBar::update`].

use embedded_hal::digital::InputPin;

/// One of the three touch contacts, ordered A → B → C along the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pad {
  A,
  B,
  C,
}

impl Pad {
  /// Returns the bit this pad occupies in a packed reading.
  pub const fn mask(self) -> u8 {
    1 << self as u8
  }

  /// Returns a human-readable string representation of the pad.
  pub const fn as_str(self) -> &'static str {
    match self {
      Pad::A => "A",
      Pad::B => "B",
      Pad::C => "C",
    }
  }
}

/// Packed contact state of the strip: bit0 = A, bit1 = B, bit2 = C.
///
/// The strip reports at most three simultaneous contacts, so the whole state
/// fits the low three bits of a byte. Values constructed from wider readings
/// are masked down to those bits.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pads(u8);

impl Pads {
  /// No pad touched.
  pub const IDLE: Self = Self(0);

  /// Build a state from three per-pad contact readings.
  pub const fn new(a: bool, b: bool, c: bool) -> Self {
    Self((a as u8) | (b as u8) << 1 | (c as u8) << 2)
  }

  /// Build a state from a packed reading, discarding bits above the low three.
  pub const fn from_bits(bits: u8) -> Self {
    Self(bits & 0x07)
  }

  /// Returns the packed representation.
  pub const fn bits(self) -> u8 {
    self.0
  }

  /// Returns `true` if pad A is touched.
  pub const fn a(self) -> bool {
    self.0 & 0x01 != 0
  }

  /// Returns `true` if pad B is touched.
  pub const fn b(self) -> bool {
    self.0 & 0x02 != 0
  }

  /// Returns `true` if pad C is touched.
  pub const fn c(self) -> bool {
    self.0 & 0x04 != 0
  }

  /// Returns `true` if the given pad is touched.
  pub const fn contains(self, pad: Pad) -> bool {
    self.0 & pad.mask() != 0
  }

  /// Returns `true` if no pad is touched.
  pub const fn is_idle(self) -> bool {
    self.0 == 0
  }

  /// Returns the touched pad when exactly one pad is active.
  pub const fn single(self) -> Option<Pad> {
    match self.0 {
      0x01 => Some(Pad::A),
      0x02 => Some(Pad::B),
      0x04 => Some(Pad::C),
      _ => None,
    }
  }

  /// Returns the state with pads A and C exchanged.
  ///
  /// Used for strips mounted in reverse, so that a physical A→C drag still
  /// decodes as forward motion.
  pub const fn mirrored(self) -> Self {
    Self((self.0 & 0x02) | (self.0 & 0x01) << 2 | (self.0 & 0x04) >> 2)
  }

  /// Sample three digital inputs into a contact state.
  ///
  /// All three pins must share one type, which in practice means the HAL's
  /// erased/degraded pin type. Active level adaption (pull-ups, inversion) is
  /// the caller's concern; a high level reads as "touched" here.
  pub fn from_pins<P: InputPin>(a: &mut P, b: &mut P, c: &mut P) -> Result<Self, P::Error> {
    Ok(Self::new(a.is_high()?, b.is_high()?, c.is_high()?))
  }
}

impl core::fmt::Debug for Pads {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self.0 {
      0 => write!(f, "Pads(idle)"),
      bits => {
        write!(f, "Pads(")?;
        let mut first = true;
        for pad in [Pad::A, Pad::B, Pad::C] {
          if bits & pad.mask() != 0 {
            if !first {
              write!(f, "+")?;
            }
            write!(f, "{}", pad.as_str())?;
            first = false;
          }
        }
        write!(f, ")")
      }
    }
  }
}

impl From<u8> for Pads {
  fn from(bits: u8) -> Self {
    Self::from_bits(bits)
  }
}

/// A single cycle's raw reading, in either of the two supported shapes.
///
/// Sensing front-ends differ in what they hand over: charge-transfer ICs
/// usually expose one packed status byte, discrete implementations read three
/// pins. Both shapes funnel into the same [`crate::TouchBar::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
  /// Packed reading: bit0 = A, bit1 = B, bit2 = C. Upper bits are discarded.
  Packed(u8),
  /// Three independent per-pad readings.
  Split { a: bool, b: bool, c: bool },
}

impl Input {
  /// Reading as a packed byte.
  pub const fn packed(raw: u8) -> Self {
    Self::Packed(raw)
  }

  /// Reading as three per-pad booleans.
  pub const fn split(a: bool, b: bool, c: bool) -> Self {
    Self::Split { a, b, c }
  }

  /// Resolve either shape into the canonical contact state.
  pub const fn pads(self) -> Pads {
    match self {
      Self::Packed(raw) => Pads::from_bits(raw),
      Self::Split { a, b, c } => Pads::new(a, b, c),
    }
  }
}

impl From<Pads> for Input {
  fn from(pads: Pads) -> Self {
    Self::Packed(pads.bits())
  }
}
