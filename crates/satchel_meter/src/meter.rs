//! Bounded integer meter

use crate::config::MeterConfig;
use satchel_event::Signal;
use std::cmp::Ordering;
use thiserror::Error;

/// Meter contract violations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeterError {
    #[error("Meter maximum must be greater than zero, got {0}")]
    InvalidMaximum(u32),

    #[error("Meter value {value} exceeds maximum {maximum}")]
    ValueAboveMaximum { value: u32, maximum: u32 },

    #[error("Fill percent must be within 0..=100, got {0}")]
    InvalidPercent(f32),

    #[error("Cannot lower maximum {maximum} by {amount}")]
    MaximumUnderflow { maximum: u32, amount: u32 },
}

impl MeterError {
    /// Every meter error is a caller-side invalid argument
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidMaximum(_)
                | Self::ValueAboveMaximum { .. }
                | Self::InvalidPercent(_)
                | Self::MaximumUnderflow { .. }
        )
    }
}

/// Meter result alias
pub type Result<T> = std::result::Result<T, MeterError>;

/// Sign of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Decrease,
    Unchanged,
    Increase,
}

impl Direction {
    /// Direction of travel from `old` to `new`
    pub fn between(old: u32, new: u32) -> Self {
        match new.cmp(&old) {
            Ordering::Less => Self::Decrease,
            Ordering::Equal => Self::Unchanged,
            Ordering::Greater => Self::Increase,
        }
    }

    /// -1, 0 or 1
    pub fn signum(&self) -> i32 {
        match self {
            Self::Decrease => -1,
            Self::Unchanged => 0,
            Self::Increase => 1,
        }
    }
}

/// Magnitude and direction of a value or maximum change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeterChange {
    pub amount: u32,
    pub direction: Direction,
}

impl MeterChange {
    pub fn between(old: u32, new: u32) -> Self {
        Self {
            amount: old.abs_diff(new),
            direction: Direction::between(old, new),
        }
    }
}

/// Events emitted by a meter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterEvent {
    /// Current value moved
    ValueChanged(MeterChange),
    /// Maximum moved
    MaximumChanged(MeterChange),
    /// An increase landed on the maximum
    Refilled,
    /// The value reached zero
    Depleted,
}

/// Integer resource pool clamped to `0..=maximum`.
///
/// Mutators never clamp bad input silently: invalid maxima, values above the
/// maximum and out-of-range percentages are rejected with a [`MeterError`].
/// Amounts that do not fit are handed back as overflow or underflow.
#[derive(Debug)]
pub struct Meter {
    value: u32,
    maximum: u32,
    events: Signal<MeterEvent>,
}

impl Meter {
    /// Default maximum for a new meter
    pub const DEFAULT_MAXIMUM: u32 = 100;

    /// Create a meter with an explicit value
    pub fn new(maximum: u32, value: u32) -> Result<Self> {
        if maximum == 0 {
            return Err(MeterError::InvalidMaximum(maximum));
        }
        if value > maximum {
            return Err(MeterError::ValueAboveMaximum { value, maximum });
        }

        Ok(Self {
            value,
            maximum,
            events: Signal::new(),
        })
    }

    /// Create a full meter
    pub fn with_maximum(maximum: u32) -> Result<Self> {
        Self::new(maximum, maximum)
    }

    /// Create a meter from configuration
    pub fn from_config(config: &MeterConfig) -> Result<Self> {
        Self::new(config.maximum, config.value.unwrap_or(config.maximum))
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Fill level in percent (0.0 - 100.0)
    pub fn percentage_filled(&self) -> f32 {
        self.value as f32 / self.maximum as f32 * 100.0
    }

    pub fn is_full(&self) -> bool {
        self.value == self.maximum
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Signal fired on every change to this meter
    pub fn events(&self) -> &Signal<MeterEvent> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut Signal<MeterEvent> {
        &mut self.events
    }

    /// Set the value directly
    pub fn set_value(&mut self, value: u32) -> Result<()> {
        if value > self.maximum {
            return Err(MeterError::ValueAboveMaximum {
                value,
                maximum: self.maximum,
            });
        }

        let was_empty = self.value == 0;
        self.apply_value(value);
        if value == 0 && !was_empty {
            self.events.emit(&MeterEvent::Depleted);
        }
        Ok(())
    }

    /// Set the maximum. A value above the new maximum is pulled down to it,
    /// after the maximum change has been signalled.
    pub fn set_maximum(&mut self, maximum: u32) -> Result<()> {
        if maximum == 0 {
            return Err(MeterError::InvalidMaximum(maximum));
        }
        if maximum == self.maximum {
            return Ok(());
        }

        let change = MeterChange::between(self.maximum, maximum);
        self.maximum = maximum;
        self.events.emit(&MeterEvent::MaximumChanged(change));

        if self.value > maximum {
            self.apply_value(maximum);
        }
        Ok(())
    }

    /// Add to the value. Returns the overflow that did not fit.
    pub fn increase(&mut self, amount: u32) -> u32 {
        let after = self.value as u64 + amount as u64;
        let maximum = self.maximum as u64;

        if after >= maximum {
            self.apply_value(self.maximum);
            if amount > 0 {
                self.events.emit(&MeterEvent::Refilled);
            }
            return (after - maximum) as u32;
        }

        self.apply_value(after as u32);
        0
    }

    /// Subtract from the value. Returns the underflow that could not be taken.
    pub fn decrease(&mut self, amount: u32) -> u32 {
        let remainder = amount.saturating_sub(self.value);
        self.apply_value(self.value.saturating_sub(amount));

        if amount > 0 && self.value == 0 {
            self.events.emit(&MeterEvent::Depleted);
        }
        remainder
    }

    /// Fill to the maximum. Returns the amount added.
    pub fn refill(&mut self) -> u32 {
        let required = self.maximum - self.value;
        self.increase(required);
        required
    }

    /// Empty the meter. Returns the amount removed.
    pub fn deplete(&mut self) -> u32 {
        let amount = self.value;
        self.decrease(amount);
        amount
    }

    /// Move the value to `floor(percent / 100 * maximum)`.
    ///
    /// Returns the signed adjustment: positive for an increase, negative for a decrease.
    pub fn fill_to_percent(&mut self, percent: f32) -> Result<i64> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(MeterError::InvalidPercent(percent));
        }

        let desired = (percent as f64 * self.maximum as f64 / 100.0).floor() as u32;
        let desired = desired.min(self.maximum);

        if desired > self.value {
            let increase = desired - self.value;
            self.increase(increase);
            Ok(increase as i64)
        } else {
            let decrease = self.value - desired;
            self.decrease(decrease);
            Ok(-(decrease as i64))
        }
    }

    fn apply_value(&mut self, value: u32) {
        if value == self.value {
            return;
        }
        let change = MeterChange::between(self.value, value);
        self.value = value;
        self.events.emit(&MeterEvent::ValueChanged(change));
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self {
            value: Self::DEFAULT_MAXIMUM,
            maximum: Self::DEFAULT_MAXIMUM,
            events: Signal::new(),
        }
    }
}
