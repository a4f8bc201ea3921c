#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `no_std` gesture decoder for three-pad capacitive touch strips.
//!
//! Three pads in a row, bridged by a sliding finger, are enough to emulate a
//! slider, a jog wheel, a spring-loaded pitch bend, or a bank of tap-to-recall
//! presets. This crate turns the three noisy "is touched" signals into a
//! bounded position value using nothing but integer arithmetic and the
//! caller's own loop cadence. Feed it one reading per control cycle and it
//! handles:
//!
//! - Suppressing single-cycle contact twitches before they reach the
//!   classifier
//! - Classifying light and hard drag gestures from the contact transition
//!   history, including fast swipes that skip an intermediate state
//! - Advancing the position under clamped or wraparound arithmetic, with
//!   optional ramping toward a target, tap-to-snap presets, and spring-back
//!   to a default
//! - Validating every configuration change instead of feeding zero moduli
//!   into the cycle arithmetic
//! - Persisting the configuration through a caller-supplied byte store
//!
//! ```
//! use touchbar::{Config, Input, TouchBar};
//!
//! fn example() -> Result<(), touchbar::ConfigError> {
//!   let config = Config::default().with_limit(10000).with_resolution(100);
//!   let mut bar = TouchBar::new(config)?;
//!
//!   // Once per control-loop cycle
//!   bar.update(Input::split(false, true, false));
//!   if bar.changed() {
//!     let _position = bar.position();
//!   }
//!   Ok(())
//! }
//! ```
mod config;
mod debounce;
mod gesture;
mod output;
mod pads;
mod store;
mod tap;

pub use config::{Config, ConfigError, Mode};
pub use gesture::Direction;
pub use pads::{Input, Pad, Pads};
pub use store::{ConfigStore, Field, MemoryStore, OutOfRegion, StoreError, RECORD_LEN};

use debounce::Debouncer;
use output::Output;
use tap::TapTracker;

/// Gesture decoder for one three-pad touch strip.
///
/// The decoder owns its configuration and runtime state and offers one
/// synchronous entry point, [`TouchBar::update`], meant to be called at a
/// fixed cadence from the host's control loop. Every window in the
/// configuration counts those calls, not wall-clock time. Create an instance
/// with [`TouchBar::new`], or with [`TouchBar::from_store`] to pick up a
/// persisted configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchBar {
  config: Config,
  debounce: Debouncer,
  tap: TapTracker,
  output: Output,
}

impl TouchBar {
  /// Create a decoder with a validated configuration.
  ///
  /// The position starts at `default_position`.
  pub fn new(config: Config) -> Result<Self, ConfigError> {
    config.validate()?;
    Ok(Self {
      config,
      debounce: Debouncer::new(),
      tap: TapTracker::new(),
      output: Output::new(config.default_position),
    })
  }

  /// Create a decoder from the configuration record persisted at `base`.
  pub fn from_store<S: ConfigStore>(store: &mut S, base: u32) -> Result<Self, StoreError<S::Error>> {
    let config = Config::load(store, base)?;
    Ok(Self::new(config)?)
  }

  /// Feed one raw reading and advance the decoder by one cycle.
  ///
  /// Never blocks and performs no I/O. Debouncing runs first, then tap
  /// tracking, snapping, direction classification, and the position update,
  /// so every query afterwards reflects this cycle.
  pub fn update(&mut self, input: Input) {
    let mut raw = input.pads();
    if self.config.flip {
      raw = raw.mirrored();
    }
    self.debounce.update(raw, self.config.twitch_suppression_delay);

    let pads = self.debounce.pads();
    let history = self.debounce.history();
    self.tap.track(pads, history[0], self.config.tap_timeout);

    // Must run before the snap, or a snap never reports a change event
    self.output.capture_previous();

    if self.config.mode.snaps() {
      if let Some(pad) = self.tap.event(pads, history[0], self.config.tap_timeout) {
        self.output.snap_to(pad, &self.config);
      }
    }

    let direction = if pads.is_idle() {
      self.debounce.clear_history_tail();
      if self.config.mode.springs_back() {
        self.output.reset(&self.config);
      }
      Direction::Static
    } else {
      gesture::classify(pads, history)
    };
    self.output.apply(direction, &self.config);
  }

  /// Current position in `[0, limit]`.
  pub const fn position(&self) -> u16 {
    self.output.current()
  }

  /// Ramp destination; equals the position whenever ramping is off.
  pub const fn target(&self) -> u16 {
    self.output.target()
  }

  /// Position scaled by 1/100, reading as a percentage with the stock
  /// `limit` of 10000.
  pub fn position_percent(&self) -> f32 {
    self.output.current() as f32 / 100.0
  }

  /// Target scaled by 1/100.
  pub fn target_percent(&self) -> f32 {
    self.output.target() as f32 / 100.0
  }

  /// Whether this cycle's update moved the position.
  pub const fn changed(&self) -> bool {
    self.output.changed()
  }

  /// The pad whose quick release counts as a tap this cycle, if any.
  pub fn tap(&self) -> Option<Pad> {
    self.tap.event(self.debounce.pads(), self.debounce.history()[0], self.config.tap_timeout)
  }

  /// Jump the position directly, clamped to `limit`.
  ///
  /// Useful when an outer controller also writes the output and the strip
  /// should pick up from there instead of jumping on the next touch.
  pub fn set_position(&mut self, position: u16) {
    self.output.set_current(position, &self.config);
  }

  /// Redirect an in-flight ramp, clamped to `limit`.
  pub fn set_target(&mut self, target: u16) {
    self.output.set_target(target, &self.config);
  }

  /// Drive toward `default_position`: the target when ramping, else the
  /// position itself.
  pub fn reset(&mut self) {
    self.output.reset(&self.config);
  }

  /// Swap the whole parameter set.
  ///
  /// The target is pulled onto the current position so new ramp settings
  /// never resume a leftover transition. On error the previous configuration
  /// stays in force.
  pub fn reconfigure(&mut self, config: Config) -> Result<(), ConfigError> {
    config.validate()?;
    self.config = config;
    self.output.set_current(self.output.current(), &self.config);
    self.output.settle();
    Ok(())
  }

  fn apply_config(&mut self, candidate: Config) -> Result<(), ConfigError> {
    candidate.validate()?;
    self.config = candidate;
    Ok(())
  }

  /// Change the reset/spring-back position.
  pub fn set_default_position(&mut self, default_position: u16) -> Result<(), ConfigError> {
    self.apply_config(self.config.with_default_position(default_position))
  }

  /// Change the position range.
  pub fn set_limit(&mut self, limit: u16) -> Result<(), ConfigError> {
    self.apply_config(self.config.with_limit(limit))?;
    // A shrunken range must not strand the output outside it
    let target = self.output.target();
    self.output.set_current(self.output.current(), &self.config);
    self.output.set_target(target, &self.config);
    Ok(())
  }

  /// Change the step size per decoded direction event.
  pub fn set_resolution(&mut self, resolution: u8) -> Result<(), ConfigError> {
    self.apply_config(self.config.with_resolution(resolution))
  }

  /// Change the step size per ramp tick.
  pub fn set_ramp_resolution(&mut self, ramp_resolution: u8) -> Result<(), ConfigError> {
    self.apply_config(self.config.with_ramp_resolution(ramp_resolution))
  }

  /// Change the cycle count between ramp ticks.
  pub fn set_ramp_delay(&mut self, ramp_delay: u8) -> Result<(), ConfigError> {
    self.apply_config(self.config.with_ramp_delay(ramp_delay))
  }

  /// Change the tap window length.
  pub fn set_tap_timeout(&mut self, tap_timeout: u16) -> Result<(), ConfigError> {
    self.apply_config(self.config.with_tap_timeout(tap_timeout))
  }

  /// Change how long a reading crossing idle must persist.
  pub fn set_twitch_suppression_delay(&mut self, delay: u8) -> Result<(), ConfigError> {
    self.apply_config(self.config.with_twitch_suppression_delay(delay))
  }

  /// Switch the output policy.
  ///
  /// Leaving ramp mode settles the target onto the current position.
  pub fn set_mode(&mut self, mode: Mode) {
    self.config = self.config.with_mode(mode);
    if !self.config.mode.ramps() {
      self.output.settle();
    }
  }

  /// Mirror the pad order for strips mounted in reverse.
  pub fn set_flip(&mut self, flip: bool) {
    self.config = self.config.with_flip(flip);
  }

  /// Persist the whole configuration record at `base`.
  pub fn save_to<S: ConfigStore>(&self, store: &mut S, base: u32) -> Result<(), StoreError<S::Error>> {
    self.config.save_to(store, base)
  }

  /// Persist one field's bytes only, for write-limited stores.
  pub fn save_field_to<S: ConfigStore>(
    &self,
    store: &mut S,
    base: u32,
    field: Field,
  ) -> Result<(), StoreError<S::Error>> {
    self.config.save_field_to(store, base, field)
  }

  /// Active configuration.
  pub const fn config(&self) -> Config {
    self.config
  }
}
