//! Health pool

use crate::config::MeterConfig;
use crate::meter::{Meter, MeterError, Result};

/// Hit points backed by a [`Meter`]
#[derive(Debug, Default)]
pub struct Health {
    meter: Meter,
}

impl Health {
    /// Create a full health pool
    pub fn new(max_health: u32) -> Result<Self> {
        Ok(Self {
            meter: Meter::with_maximum(max_health)?,
        })
    }

    /// Create a health pool from configuration
    pub fn from_config(config: &MeterConfig) -> Result<Self> {
        Ok(Self {
            meter: Meter::from_config(config)?,
        })
    }

    /// Apply damage. Returns the overkill that went past zero.
    pub fn damage(&mut self, amount: u32) -> u32 {
        let overkill = self.meter.decrease(amount);
        if amount > 0 && self.meter.is_empty() {
            log::debug!("Health depleted (overkill {})", overkill);
        }
        overkill
    }

    /// Heal. Returns the overheal that did not fit.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.meter.increase(amount)
    }

    /// Raise max health
    pub fn increase_max(&mut self, amount: u32) -> Result<()> {
        let maximum = self.meter.maximum().saturating_add(amount);
        self.meter.set_maximum(maximum)
    }

    /// Lower max health; current health follows it down if needed
    pub fn decrease_max(&mut self, amount: u32) -> Result<()> {
        let maximum = self.meter.maximum();
        if amount >= maximum {
            return Err(MeterError::MaximumUnderflow { maximum, amount });
        }
        self.meter.set_maximum(maximum - amount)
    }

    pub fn current(&self) -> u32 {
        self.meter.value()
    }

    pub fn max(&self) -> u32 {
        self.meter.maximum()
    }

    /// Get health as a percentage (0.0 - 100.0)
    pub fn health_percent(&self) -> f32 {
        self.meter.percentage_filled()
    }

    /// Check if at full health
    pub fn is_full(&self) -> bool {
        self.meter.is_full()
    }

    pub fn is_dead(&self) -> bool {
        self.meter.is_empty()
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn meter(&self) -> &Meter {
        &self.meter
    }

    pub fn meter_mut(&mut self) -> &mut Meter {
        &mut self.meter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meter::MeterEvent;
    use satchel_event::Recorder;

    #[test]
    fn test_damage_and_death() {
        let mut health = Health::new(50).unwrap();
        let events: Recorder<MeterEvent> = Recorder::new();
        health.meter_mut().events_mut().subscribe(events.listener());

        assert_eq!(health.damage(30), 0);
        assert_eq!(health.current(), 20);
        assert!(health.is_alive());

        assert_eq!(health.damage(100), 80);
        assert!(health.is_dead());
        assert_eq!(events.snapshot().last(), Some(&MeterEvent::Depleted));
    }

    #[test]
    fn test_healing() {
        let mut health = Health::new(100).unwrap();
        health.damage(50);

        assert_eq!(health.heal(30), 0);
        assert_eq!(health.current(), 80);

        // Can't overheal
        assert_eq!(health.heal(50), 30);
        assert!(health.is_full());
    }

    #[test]
    fn test_max_health_changes() {
        let mut health = Health::new(100).unwrap();

        health.increase_max(20).unwrap();
        assert_eq!(health.max(), 120);
        assert_eq!(health.current(), 100);

        health.decrease_max(50).unwrap();
        assert_eq!(health.max(), 70);
        assert_eq!(health.current(), 70);

        assert_eq!(
            health.decrease_max(70).unwrap_err(),
            MeterError::MaximumUnderflow {
                maximum: 70,
                amount: 70
            }
        );
        assert_eq!(health.max(), 70);
    }
}
