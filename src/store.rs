//! Configuration persistence over an injected byte-region store.
//!
//! The decoder itself performs no I/O. Whatever actually holds the bytes,
//! EEPROM, a flash page, a file on the host, is handed in as a
//! [`ConfigStore`] and the configuration serializes itself through it as one
//! fixed 11-byte record per strip. Multiple strips reserve consecutive
//! records at offsets the caller chooses.

use crate::config::{Config, ConfigError, Mode};

/// Serialized size of one configuration record.
pub const RECORD_LEN: usize = 11;

/// Byte-region capability the configuration persists through.
pub trait ConfigStore {
  type Error;

  /// Fill `buf` from the region starting at `offset`.
  fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), Self::Error>;

  /// Write `data` to the region starting at `offset`.
  fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), Self::Error>;
}

/// Errors that can occur while loading or saving a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError<E> {
  /// The backing store failed with its own error.
  Store(E),
  /// The stored bytes do not decode as a configuration record.
  Malformed,
  /// The decoded configuration fails validation.
  Invalid(ConfigError),
}

impl<E> From<ConfigError> for StoreError<E> {
  fn from(error: ConfigError) -> Self {
    Self::Invalid(error)
  }
}

/// On-store image of one strip's configuration, fields little-endian in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[packbits::pack(bytes = 11)]
struct Record {
  default_position: u16,
  limit: u16,
  resolution: u8,
  ramp_delay: u8,
  ramp_resolution: u8,
  flags: u8,
  tap_timeout: u16,
  twitch_suppression_delay: u8,
}

/// Packed mode + flip byte. Bit positions are fixed by the record format:
/// bit7 rollover, bit6 spring-back, bit5 snap, bit4 ramp, bit3 flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flags(u8);

impl Flags {
  const ROLLOVER: u8 = 1 << 7;
  const SPRING_BACK: u8 = 1 << 6;
  const SNAP: u8 = 1 << 5;
  const RAMP: u8 = 1 << 4;
  const FLIP: u8 = 1 << 3;

  const fn pack(mode: Mode, flip: bool) -> Self {
    let mut bits = 0;
    match mode {
      Mode::Rollover => bits |= Self::ROLLOVER,
      Mode::Bounded { spring_back, snap, ramp } => {
        if spring_back {
          bits |= Self::SPRING_BACK;
        }
        if snap {
          bits |= Self::SNAP;
        }
        if ramp {
          bits |= Self::RAMP;
        }
      }
    }
    if flip {
      bits |= Self::FLIP;
    }
    Self(bits)
  }

  /// Decoded output mode. Rollover dominates: when its bit is set the
  /// bounded-mode bits are ignored.
  const fn mode(self) -> Mode {
    if self.0 & Self::ROLLOVER != 0 {
      Mode::Rollover
    } else {
      Mode::Bounded {
        spring_back: self.0 & Self::SPRING_BACK != 0,
        snap: self.0 & Self::SNAP != 0,
        ramp: self.0 & Self::RAMP != 0,
      }
    }
  }

  const fn flip(self) -> bool {
    self.0 & Self::FLIP != 0
  }
}

/// One persisted field, for single-field write-back after a setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
  DefaultPosition,
  Limit,
  Resolution,
  RampDelay,
  RampResolution,
  /// Mode and flip, packed into the single flags byte.
  Flags,
  TapTimeout,
  TwitchSuppressionDelay,
}

impl Field {
  /// Byte range of this field inside the record.
  const fn range(self) -> core::ops::Range<usize> {
    match self {
      Field::DefaultPosition => 0..2,
      Field::Limit => 2..4,
      Field::Resolution => 4..5,
      Field::RampDelay => 5..6,
      Field::RampResolution => 6..7,
      Field::Flags => 7..8,
      Field::TapTimeout => 8..10,
      Field::TwitchSuppressionDelay => 10..11,
    }
  }
}

impl Record {
  fn from_config(config: &Config) -> Self {
    Self {
      default_position: config.default_position,
      limit: config.limit,
      resolution: config.resolution,
      ramp_delay: config.ramp_delay,
      ramp_resolution: config.ramp_resolution,
      flags: Flags::pack(config.mode, config.flip).0,
      tap_timeout: config.tap_timeout,
      twitch_suppression_delay: config.twitch_suppression_delay,
    }
  }

  fn into_config(self) -> Config {
    let flags = Flags(self.flags);
    Config {
      default_position: self.default_position,
      limit: self.limit,
      resolution: self.resolution,
      ramp_delay: self.ramp_delay,
      ramp_resolution: self.ramp_resolution,
      tap_timeout: self.tap_timeout,
      twitch_suppression_delay: self.twitch_suppression_delay,
      mode: flags.mode(),
      flip: flags.flip(),
    }
  }
}

impl Config {
  /// Load and validate a configuration record starting at `base`.
  pub fn load<S: ConfigStore>(store: &mut S, base: u32) -> Result<Self, StoreError<S::Error>> {
    let mut bytes = [0u8; RECORD_LEN];
    store.read(base, &mut bytes).map_err(StoreError::Store)?;
    let record = Record::try_from(bytes).map_err(|_| StoreError::Malformed)?;
    let config = record.into_config();
    config.validate()?;
    Ok(config)
  }

  /// Persist the whole configuration record starting at `base`.
  pub fn save_to<S: ConfigStore>(&self, store: &mut S, base: u32) -> Result<(), StoreError<S::Error>> {
    let bytes: [u8; RECORD_LEN] = Record::from_config(self).try_into().map_err(|_| StoreError::Malformed)?;
    store.write(base, &bytes).map_err(StoreError::Store)
  }

  /// Persist a single field, leaving the rest of the record untouched.
  pub fn save_field_to<S: ConfigStore>(
    &self,
    store: &mut S,
    base: u32,
    field: Field,
  ) -> Result<(), StoreError<S::Error>> {
    let bytes: [u8; RECORD_LEN] = Record::from_config(self).try_into().map_err(|_| StoreError::Malformed)?;
    let range = field.range();
    let offset = base + range.start as u32;
    store.write(offset, &bytes[range]).map_err(StoreError::Store)
  }
}

/// Access outside the reserved region of a [`MemoryStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRegion;

/// Fixed-size in-memory store, for host-side tests and RAM-backed setups.
///
/// Fresh instances read as all `0xFF`, matching erased non-volatile memory.
#[derive(Debug, Clone, Copy)]
pub struct MemoryStore<const N: usize> {
  bytes: [u8; N],
}

impl<const N: usize> MemoryStore<N> {
  pub const fn new() -> Self {
    Self { bytes: [0xFF; N] }
  }

  /// Raw view of the region, mainly for inspection in tests.
  pub const fn bytes(&self) -> &[u8; N] {
    &self.bytes
  }
}

impl<const N: usize> Default for MemoryStore<N> {
  fn default() -> Self {
    Self::new()
  }
}

impl<const N: usize> ConfigStore for MemoryStore<N> {
  type Error = OutOfRegion;

  fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), Self::Error> {
    let start = offset as usize;
    let end = start.checked_add(buf.len()).ok_or(OutOfRegion)?;
    let source = self.bytes.get(start..end).ok_or(OutOfRegion)?;
    buf.copy_from_slice(source);
    Ok(())
  }

  fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), Self::Error> {
    let start = offset as usize;
    let end = start.checked_add(data.len()).ok_or(OutOfRegion)?;
    let destination = self.bytes.get_mut(start..end).ok_or(OutOfRegion)?;
    destination.copy_from_slice(data);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Config {
    Config::default()
      .with_default_position(5000)
      .with_limit(9000)
      .with_resolution(90)
      .with_ramp_delay(6)
      .with_ramp_resolution(15)
      .with_tap_timeout(80)
      .with_twitch_suppression_delay(2)
      .with_mode(Mode::Bounded { spring_back: true, snap: true, ramp: true })
      .with_flip(true)
  }

  #[test]
  fn record_round_trip_preserves_every_field() {
    let mut store = MemoryStore::<RECORD_LEN>::new();
    let config = sample();

    config.save_to(&mut store, 0).unwrap();
    let loaded = Config::load(&mut store, 0).unwrap();
    assert_eq!(loaded, config);
  }

  #[test]
  fn rollover_round_trips_too() {
    let mut store = MemoryStore::<RECORD_LEN>::new();
    let config = Config::default().with_mode(Mode::Rollover);

    config.save_to(&mut store, 0).unwrap();
    assert_eq!(Config::load(&mut store, 0).unwrap().mode, Mode::Rollover);
  }

  #[test]
  fn record_layout_is_stable() {
    let mut store = MemoryStore::<RECORD_LEN>::new();
    sample().save_to(&mut store, 0).unwrap();

    // default 5000, limit 9000 and tap timeout 80 little-endian; flags
    // rollover=0, spring_back/snap/ramp/flip set
    assert_eq!(store.bytes(), &[0x88, 0x13, 0x28, 0x23, 90, 6, 15, 0b0111_1000, 80, 0, 2]);
  }

  #[test]
  fn rollover_bit_dominates_the_bounded_bits() {
    let mut store = MemoryStore::<RECORD_LEN>::new();
    sample().save_to(&mut store, 0).unwrap();
    // Corrupt the flags byte so every mode bit is set at once
    store.write(7, &[0b1111_1000]).unwrap();

    let loaded = Config::load(&mut store, 0).unwrap();
    assert_eq!(loaded.mode, Mode::Rollover);
    assert!(loaded.flip);
  }

  #[test]
  fn invalid_record_is_rejected_not_applied() {
    let mut store = MemoryStore::<RECORD_LEN>::new();
    sample().save_to(&mut store, 0).unwrap();
    // Zero out the limit field
    store.write(2, &[0, 0]).unwrap();

    assert_eq!(Config::load(&mut store, 0), Err(StoreError::Invalid(ConfigError::ZeroLimit)));
  }

  #[test]
  fn single_field_write_back_leaves_the_rest_alone() {
    let mut store = MemoryStore::<RECORD_LEN>::new();
    let original = sample();
    original.save_to(&mut store, 0).unwrap();

    // Change two fields in memory but persist only one of them
    let changed = original.with_limit(7000).with_resolution(50);
    changed.save_field_to(&mut store, 0, Field::Limit).unwrap();

    let loaded = Config::load(&mut store, 0).unwrap();
    assert_eq!(loaded.limit, 7000);
    assert_eq!(loaded.resolution, original.resolution);
    assert_eq!(loaded.default_position, original.default_position);
  }

  #[test]
  fn records_stack_at_caller_chosen_offsets() {
    let mut store = MemoryStore::<{ RECORD_LEN * 2 }>::new();
    let first = sample();
    let second = Config::default().with_mode(Mode::Rollover);

    first.save_to(&mut store, 0).unwrap();
    second.save_to(&mut store, RECORD_LEN as u32).unwrap();

    assert_eq!(Config::load(&mut store, 0).unwrap(), first);
    assert_eq!(Config::load(&mut store, RECORD_LEN as u32).unwrap(), second);
  }

  #[test]
  fn out_of_region_access_is_reported() {
    let mut store = MemoryStore::<4>::new();
    assert_eq!(Config::load(&mut store, 0), Err(StoreError::Store(OutOfRegion)));
    assert_eq!(sample().save_to(&mut store, 0), Err(StoreError::Store(OutOfRegion)));
  }
}
