//! Strip configuration: position range, step sizes, timing windows, and the
//! output mode.

/// Output policy of the strip.
///
/// Rollover and the bounded-range behaviors are mutually exclusive: a rolled
/// over position has no ends to clamp, snap to, or spring back toward, so the
/// rollover variant carries none of those switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
  /// Position clamps at `[0, limit]`.
  Bounded {
    /// Return toward `default_position` whenever all pads are released.
    spring_back: bool,
    /// A tap on A/B/C drives the position to 0 / default / limit.
    snap: bool,
    /// Movement writes `target`; `current` follows gradually at the
    /// configured ramp rate instead of jumping.
    ramp: bool,
  },
  /// Position wraps around modulo `limit`, like an endless rotary knob.
  Rollover,
}

impl Mode {
  /// Bounded mode with every extra behavior off.
  pub const fn bounded() -> Self {
    Self::Bounded { spring_back: false, snap: false, ramp: false }
  }

  /// Returns `true` for the rollover (wraparound) mode.
  pub const fn is_rollover(self) -> bool {
    matches!(self, Mode::Rollover)
  }

  /// Returns `true` if movement goes through the ramp engine.
  pub const fn ramps(self) -> bool {
    matches!(self, Mode::Bounded { ramp: true, .. })
  }

  /// Returns `true` if taps snap the position to the presets.
  pub const fn snaps(self) -> bool {
    matches!(self, Mode::Bounded { snap: true, .. })
  }

  /// Returns `true` if full release returns the position to the default.
  pub const fn springs_back(self) -> bool {
    matches!(self, Mode::Bounded { spring_back: true, .. })
  }
}

impl Default for Mode {
  fn default() -> Self {
    Self::bounded()
  }
}

/// A rejected configuration value.
///
/// Validation runs at construction and on every setter; when it fails the
/// previous configuration stays in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
  /// `limit` must be greater than zero.
  ZeroLimit,
  /// `default_position` must not exceed `limit`.
  DefaultBeyondLimit,
  /// `resolution` must be greater than zero.
  ZeroResolution,
  /// `resolution` must be smaller than `limit`.
  ResolutionBeyondLimit,
  /// `ramp_resolution` must be greater than zero.
  ZeroRampResolution,
  /// `ramp_resolution` must be smaller than `limit`.
  RampResolutionBeyondLimit,
  /// `ramp_delay` is a cycle modulus and must be greater than zero.
  ZeroRampDelay,
}

/// Tunable parameters of one strip.
///
/// All cycle-counted fields (`ramp_delay`, `tap_timeout`,
/// `twitch_suppression_delay`) are logical counts of `update` calls, not
/// wall-clock time; their meaning follows the host's sampling cadence.
///
/// # Example
/// ```no_run
/// use touchbar::{Config, Mode};
///
/// let config = Config::default()
///   .with_limit(1000)
///   .with_resolution(25)
///   .with_mode(Mode::Bounded { spring_back: false, snap: true, ramp: false });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
  /// Position loaded at startup and returned to by spring-back and resets.
  pub default_position: u16,
  /// Inclusive upper bound in bounded mode, wraparound modulus in rollover.
  ///
  /// The stock 10000 makes the percent queries read as 0.00..100.00.
  pub limit: u16,
  /// Position change per decoded single step.
  pub resolution: u8,
  /// Position change per ramp tick.
  pub ramp_resolution: u8,
  /// Cycles between ramp ticks.
  pub ramp_delay: u8,
  /// Maximum cycle count for a touch-and-release to register as a tap.
  pub tap_timeout: u16,
  /// Cycles a reading entering or leaving idle must persist to be accepted.
  pub twitch_suppression_delay: u8,
  /// Output policy.
  pub mode: Mode,
  /// Exchange pads A and C, for strips mounted in reverse.
  pub flip: bool,
}

impl Config {
  pub const fn with_default_position(mut self, default_position: u16) -> Self {
    self.default_position = default_position;
    self
  }

  pub const fn with_limit(mut self, limit: u16) -> Self {
    self.limit = limit;
    self
  }

  pub const fn with_resolution(mut self, resolution: u8) -> Self {
    self.resolution = resolution;
    self
  }

  pub const fn with_ramp_resolution(mut self, ramp_resolution: u8) -> Self {
    self.ramp_resolution = ramp_resolution;
    self
  }

  pub const fn with_ramp_delay(mut self, ramp_delay: u8) -> Self {
    self.ramp_delay = ramp_delay;
    self
  }

  pub const fn with_tap_timeout(mut self, tap_timeout: u16) -> Self {
    self.tap_timeout = tap_timeout;
    self
  }

  pub const fn with_twitch_suppression_delay(mut self, twitch_suppression_delay: u8) -> Self {
    self.twitch_suppression_delay = twitch_suppression_delay;
    self
  }

  pub const fn with_mode(mut self, mode: Mode) -> Self {
    self.mode = mode;
    self
  }

  pub const fn with_flip(mut self, flip: bool) -> Self {
    self.flip = flip;
    self
  }

  /// Check every field against its documented valid range.
  ///
  /// Returns the first violation found, in field order.
  pub const fn validate(&self) -> Result<(), ConfigError> {
    if self.limit == 0 {
      return Err(ConfigError::ZeroLimit);
    }
    if self.default_position > self.limit {
      return Err(ConfigError::DefaultBeyondLimit);
    }
    if self.resolution == 0 {
      return Err(ConfigError::ZeroResolution);
    }
    if self.resolution as u16 >= self.limit {
      return Err(ConfigError::ResolutionBeyondLimit);
    }
    if self.ramp_resolution == 0 {
      return Err(ConfigError::ZeroRampResolution);
    }
    if self.ramp_resolution as u16 >= self.limit {
      return Err(ConfigError::RampResolutionBeyondLimit);
    }
    if self.ramp_delay == 0 {
      return Err(ConfigError::ZeroRampDelay);
    }
    Ok(())
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      default_position: 0,
      limit: 10000,
      resolution: 100,
      ramp_resolution: 10,
      ramp_delay: 4,
      tap_timeout: 100,
      twitch_suppression_delay: 3,
      mode: Mode::bounded(),
      flip: false,
    }
  }
}
