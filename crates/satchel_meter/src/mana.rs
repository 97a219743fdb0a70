//! Mana pool

use crate::config::MeterConfig;
use crate::meter::{Meter, MeterError, Result};

/// Spendable magic resource backed by a [`Meter`]
#[derive(Debug, Default)]
pub struct Mana {
    meter: Meter,
}

impl Mana {
    pub fn new(max_mana: u32) -> Result<Self> {
        Ok(Self {
            meter: Meter::with_maximum(max_mana)?,
        })
    }

    pub fn from_config(config: &MeterConfig) -> Result<Self> {
        Ok(Self {
            meter: Meter::from_config(config)?,
        })
    }

    /// Whether `amount` can be paid in full
    pub fn can_spend(&self, amount: u32) -> bool {
        amount <= self.meter.value()
    }

    /// Spend mana. Returns the shortfall if the pool ran dry.
    pub fn spend(&mut self, amount: u32) -> u32 {
        self.meter.decrease(amount)
    }

    /// Restore mana. Returns the excess that did not fit.
    pub fn restore(&mut self, amount: u32) -> u32 {
        self.meter.increase(amount)
    }

    pub fn increase_max(&mut self, amount: u32) -> Result<()> {
        let maximum = self.meter.maximum().saturating_add(amount);
        self.meter.set_maximum(maximum)
    }

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

    #[test]
    fn test_spend_and_restore() {
        let mut mana = Mana::from_config(&MeterConfig::mana()).unwrap();
        assert_eq!(mana.max(), 50);

        assert!(mana.can_spend(50));
        assert!(!mana.can_spend(51));

        assert_eq!(mana.spend(20), 0);
        assert_eq!(mana.current(), 30);
        assert_eq!(mana.spend(40), 10);
        assert_eq!(mana.current(), 0);

        assert_eq!(mana.restore(60), 10);
        assert_eq!(mana.current(), 50);
    }

    #[test]
    fn test_max_mana() {
        let mut mana = Mana::new(10).unwrap();
        mana.increase_max(5).unwrap();
        assert_eq!(mana.max(), 15);
        assert_eq!(mana.current(), 10);

        mana.decrease_max(12).unwrap();
        assert_eq!(mana.current(), 3);
        assert!(mana.decrease_max(3).is_err());
    }
}
