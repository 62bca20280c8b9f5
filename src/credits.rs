//! Local credit ledger
//!
//! Credits pay for a run's power-up selection. The ledger is the gate that
//! decides whether a run may start; the simulation only ever sees a selection
//! that has already been paid for.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::{self, PersistError};
use crate::sim::PowerUp;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{powerup} costs {needed} credits but only {available} are available")]
    InsufficientCredits {
        powerup: &'static str,
        needed: u32,
        available: u32,
    },
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Credit balance for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreditLedger {
    pub balance: u32,
}

impl CreditLedger {
    pub fn new(balance: u32) -> Self {
        Self { balance }
    }

    pub fn add(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Remove credits, never going below zero
    pub fn subtract(&mut self, amount: u32) {
        self.balance = self.balance.saturating_sub(amount);
    }

    pub fn can_afford(&self, powerup: PowerUp) -> bool {
        self.balance >= powerup.cost()
    }

    /// Pay for a run; returns the remaining balance
    pub fn purchase(&mut self, powerup: PowerUp) -> Result<u32, LedgerError> {
        let needed = powerup.cost();
        if !self.can_afford(powerup) {
            log::warn!(
                "Cannot start with {}: need {}, have {}",
                powerup.as_str(),
                needed,
                self.balance
            );
            return Err(LedgerError::InsufficientCredits {
                powerup: powerup.as_str(),
                needed,
                available: self.balance,
            });
        }
        self.balance -= needed;
        Ok(self.balance)
    }

    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        Ok(persistence::load_or_default(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        Ok(persistence::save(path, self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract_clamps_at_zero() {
        let mut ledger = CreditLedger::new(2);
        ledger.subtract(5);
        assert_eq!(ledger.balance, 0);
        ledger.add(7);
        assert_eq!(ledger.balance, 7);
    }

    #[test]
    fn test_purchase_charges_cost() {
        let mut ledger = CreditLedger::new(5);
        assert_eq!(ledger.purchase(PowerUp::Shield).ok(), Some(2));
        assert_eq!(ledger.purchase(PowerUp::SlowMotion).ok(), Some(0));
    }

    #[test]
    fn test_insufficient_balance_blocks_start() {
        let mut ledger = CreditLedger::new(3);
        let err = ledger.purchase(PowerUp::DoublePoints).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientCredits { needed: 4, available: 3, .. }
        ));
        assert_eq!(ledger.balance, 3);
        assert!(ledger.can_afford(PowerUp::Shield));
        assert!(!CreditLedger::new(0).can_afford(PowerUp::None));
    }

    #[test]
    fn test_persists_balance() {
        let path = std::env::temp_dir()
            .join(format!("slope-runner-ledger-{}.json", std::process::id()));
        CreditLedger::new(11).save(&path).expect("save");
        assert_eq!(CreditLedger::load(&path).expect("load").balance, 11);
        let _ = std::fs::remove_file(&path);
    }
}
