//! Satchel Meter - Bounded Resource Pools
//!
//! This crate provides the integer meter behind every resource pool.
//!
//! # Features
//!
//! - Value clamped to `0..=maximum` at all times
//! - Overflow/underflow remainders instead of silent clamping
//! - Directional change signals for bars that animate
//! - Refilled/depleted signals
//! - Percentage fills
//! - Health and mana pools built on the same meter
//!
//! # Example
//!
//! ```ignore
//! use satchel_meter::prelude::*;
//!
//! let mut health = Health::new(100)?;
//! health.meter_mut().events_mut().subscribe(|event| println!("{:?}", event));
//!
//! let overkill = health.damage(120);
//! assert_eq!(overkill, 20);
//! assert!(health.is_dead());
//! ```

pub mod config;
pub mod health;
pub mod mana;
pub mod meter;

pub mod prelude {
    pub use crate::config::MeterConfig;
    pub use crate::health::Health;
    pub use crate::mana::Mana;
    pub use crate::meter::{Direction, Meter, MeterChange, MeterError, MeterEvent, Result};
}

pub use prelude::*;
