//! Threshold Configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_THRESHOLD_SALES, DEFAULT_THRESHOLD_SPAM};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("{name} threshold must lie strictly between 0 and 1, got {value}")]
    OutOfRange { name: &'static str, value: f64 },
}

/// The two configured thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Challenge tier, and the hold floor (`sales - 0.2`)
    pub sales: f64,
    /// Block tier
    pub spam: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            sales: DEFAULT_THRESHOLD_SALES,
            spam: DEFAULT_THRESHOLD_SPAM,
        }
    }
}

impl Thresholds {
    /// Both values must lie in (0, 1). Their relative order is not enforced.
    pub fn new(sales: f64, spam: f64) -> Result<Self, ThresholdError> {
        check("sales", sales)?;
        check("spam", spam)?;
        Ok(Self { sales, spam })
    }

    /// True when the tiers do not nest (`spam < sales`)
    pub fn is_inverted(&self) -> bool {
        self.spam < self.sales
    }
}

fn check(name: &'static str, value: f64) -> Result<(), ThresholdError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ThresholdError::OutOfRange { name, value })
    }
}
