use anchor_lang::prelude::*;

use crate::constants::INDEX_PRECISION;
use crate::error::FeeShareError;
use crate::utils::math::{mul_div_floor, to_u64};

/// Per-holder checkpoint PDA: `[HOLDER_SEED, collection, owner]`.
#[account]
#[derive(Debug, Default)]
pub struct HolderAccount {
    pub collection: Pubkey,
    pub owner: Pubkey,
    /// Mirrors the number of items owned.
    pub units: u64,
    /// Distribution index at the last settlement of this holder.
    pub index_snapshot: u128,
    /// Settled but unclaimed entitlement.
    pub accrued: u64,
    /// Lifetime claimed amount.
    pub total_claimed: u64,
    pub bump: u8,
}

impl HolderAccount {
    pub const SIZE: usize =
        32 + // collection
        32 + // owner
        8 +  // units
        16 + // index_snapshot
        8 +  // accrued
        8 +  // total_claimed
        1;   // bump

    /// Space for discriminator + fields.
    pub const SPACE: usize = 8 + Self::SIZE;

    pub fn is_open(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Binds a fresh record; it starts earning from `index` onward.
    pub fn open(&mut self, collection: Pubkey, owner: Pubkey, index: u128, bump: u8) {
        self.collection = collection;
        self.owner = owner;
        self.units = 0;
        self.index_snapshot = index;
        self.accrued = 0;
        self.total_claimed = 0;
        self.bump = bump;
    }

    /// Entitlement earned between `index_snapshot` and `index` at current units.
    pub fn earned_since_snapshot(&self, index: u128) -> Result<u64> {
        let diff = index
            .checked_sub(self.index_snapshot)
            .ok_or(FeeShareError::MathOverflow)?;
        let earned = mul_div_floor(self.units as u128, diff, INDEX_PRECISION)?;
        Ok(to_u64(earned)?)
    }

    pub fn pending_at(&self, index: u128) -> Result<u64> {
        Ok(self
            .accrued
            .checked_add(self.earned_since_snapshot(index)?)
            .ok_or(FeeShareError::MathOverflow)?)
    }

    /// Moves earnings up to `index` into `accrued`; returns the new `accrued`.
    pub fn settle(&mut self, index: u128) -> Result<u64> {
        self.accrued = self.pending_at(index)?;
        self.index_snapshot = index;
        Ok(self.accrued)
    }

    /// Zeroes `accrued` and books it as claimed.
    pub fn take_accrued(&mut self) -> Result<u64> {
        let amount = self.accrued;
        self.accrued = 0;
        self.total_claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(FeeShareError::MathOverflow)?;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(units: u64) -> HolderAccount {
        let mut h = HolderAccount::default();
        h.open(
            Pubkey::new_from_array([9; 32]),
            Pubkey::new_from_array([7; 32]),
            0,
            254,
        );
        h.units = units;
        h
    }

    #[test]
    fn open_marks_record_and_snapshots_index() {
        let mut h = HolderAccount::default();
        assert!(!h.is_open());
        h.open(Pubkey::new_from_array([9; 32]), Pubkey::new_from_array([7; 32]), 42, 1);
        assert!(h.is_open());
        assert_eq!(h.index_snapshot, 42);
        assert_eq!(h.pending_at(1_000).unwrap(), 0);
    }

    #[test]
    fn settle_accrues_at_current_units() {
        let mut h = holder(3);
        let index = 5 * INDEX_PRECISION;
        assert_eq!(h.pending_at(index).unwrap(), 15);
        assert_eq!(h.settle(index).unwrap(), 15);
        assert_eq!(h.index_snapshot, index);
        // settling twice at the same index adds nothing
        assert_eq!(h.settle(index).unwrap(), 15);
    }

    #[test]
    fn take_accrued_zeroes_and_counts() {
        let mut h = holder(1);
        h.settle(2 * INDEX_PRECISION).unwrap();
        assert_eq!(h.take_accrued().unwrap(), 2);
        assert_eq!(h.accrued, 0);
        assert_eq!(h.total_claimed, 2);
        assert_eq!(h.take_accrued().unwrap(), 0);
    }

    #[test]
    fn stale_index_fails_closed() {
        let mut h = holder(1);
        h.settle(10).unwrap();
        assert!(h.pending_at(9).is_err());
    }
}
