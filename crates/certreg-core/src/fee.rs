//! Fee transfer collaborator.
//!
//! The registry only requests transfers; settlement belongs to whatever
//! implements `FeeTransfer`. `RecordingFeeTransfer` is the in-process
//! implementation used by the CLI journal and by tests.

use crate::identity::Principal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeeTransferError {
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u64, available: u64 },

    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Moves `amount` from `payer` to `payee`, or fails without side effects.
pub trait FeeTransfer {
    fn transfer(
        &mut self,
        amount: u64,
        payer: &Principal,
        payee: &Principal,
    ) -> Result<(), FeeTransferError>;
}

/// One completed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTransferRecord {
    pub amount: u64,
    pub from: Principal,
    pub to: Principal,
}

/// Records every transfer; optionally enforces per-payer balances.
///
/// Payers without a tracked balance are treated as unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingFeeTransfer {
    transfers: Vec<FeeTransferRecord>,
    balances: BTreeMap<Principal, u64>,
}

impl RecordingFeeTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a balance for `principal`.
    pub fn with_balance(mut self, principal: impl Into<Principal>, amount: u64) -> Self {
        self.balances.insert(principal.into(), amount);
        self
    }

    pub fn transfers(&self) -> &[FeeTransferRecord] {
        &self.transfers
    }

    pub fn balance_of(&self, principal: &Principal) -> Option<u64> {
        self.balances.get(principal).copied()
    }

    /// Re-append a transfer recovered from the journal.
    pub fn restore(&mut self, record: FeeTransferRecord) {
        self.transfers.push(record);
    }
}

impl FeeTransfer for RecordingFeeTransfer {
    fn transfer(
        &mut self,
        amount: u64,
        payer: &Principal,
        payee: &Principal,
    ) -> Result<(), FeeTransferError> {
        if let Some(available) = self.balances.get(payer).copied() {
            if available < amount {
                return Err(FeeTransferError::InsufficientBalance {
                    required: amount,
                    available,
                });
            }
            self.balances.insert(payer.clone(), available - amount);
            if let Some(credit) = self.balances.get_mut(payee) {
                *credit = credit.saturating_add(amount);
            }
        }

        self.transfers.push(FeeTransferRecord {
            amount,
            from: payer.clone(),
            to: payee.clone(),
        });
        Ok(())
    }
}
