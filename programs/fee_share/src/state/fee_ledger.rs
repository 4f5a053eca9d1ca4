//! Fee ledger aggregate: deposit ledger, distribution index and reserve fund.
//!
//! Every inbound fee is recognized as a deposit whose holder share is released
//! linearly over the vesting window. Recognitions within one day share a
//! deposit that starts vesting at the next day boundary, which bounds the
//! number of unmatured deposits by the window length. The index accumulates released value per
//! unit of holding and is checkpointed before total units or the deposit set
//! change, so each interval is divided by the units outstanding during it.
//! Holders settle against the index in O(1).

use anchor_lang::prelude::*;

use crate::constants::{
    BPS_DENOMINATOR, DEPOSIT_BUCKET_SECS, INDEX_PRECISION, MAX_ACTIVE_DEPOSITS,
    MAX_VESTING_WINDOW_SECS,
};
use crate::error::FeeShareError;
use crate::state::HolderAccount;
use crate::utils::math::{bps_of, mul_div_floor};
use crate::utils::{time, vesting};

/// Recognized inbound amounts of one bucket. Recognitions landing in the
/// same bucket share a start, so merging them leaves every ramp unchanged.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deposit {
    /// Gross recognized amount.
    pub amount: u64,
    /// Part of `amount` released to holders over the vesting window.
    pub holder_share: u64,
    /// Bucket end at or after the recognition time.
    pub vests_from: i64,
}

impl Deposit {
    pub const SIZE: usize =
        8 + // amount
        8 + // holder_share
        8;  // vests_from

    pub fn released_at(&self, now_ts: i64, window_secs: i64) -> Result<u64> {
        Ok(vesting::released_amount(
            self.holder_share,
            self.vests_from,
            now_ts,
            window_secs,
        )?)
    }
}

/// Outcome of one recognition call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecognizedFees {
    pub amount: u64,
    pub holder_share: u64,
    pub reserve_share: u64,
    pub vests_from: i64,
}

/// Fee ledger PDA: `[LEDGER_SEED, collection]`.
#[account]
#[derive(Debug)]
pub struct FeeLedger {
    pub collection: Pubkey,
    /// Holder share of each recognized deposit, in bps.
    pub holder_share_bps: u16,
    /// Vesting window of every deposit, in seconds.
    pub vesting_window: i64,
    /// Released value per unit of holding, scaled by `INDEX_PRECISION`.
    pub index: u128,
    /// Units outstanding since the last checkpoint.
    pub total_units: u64,
    /// Total released as of the last checkpoint.
    pub released_at_checkpoint: u64,
    /// Holder shares of deposits that finished vesting and were folded away.
    pub matured_released: u64,
    pub last_checkpoint_ts: i64,
    /// Recognized holder shares not yet claimed (released or not).
    pub owed_to_holders: u64,
    /// Reserve fund balance, withdrawable by the operator.
    pub reserve_balance: u64,
    pub total_recognized: u64,
    pub total_claimed: u64,
    pub total_reserve_withdrawn: u64,
    /// Unmatured deposits, oldest first.
    pub deposits: Vec<Deposit>,
    pub bump: u8,
}

impl FeeLedger {
    pub const SIZE: usize =
        32 + // collection
        2 +  // holder_share_bps
        8 +  // vesting_window
        16 + // index
        8 +  // total_units
        8 +  // released_at_checkpoint
        8 +  // matured_released
        8 +  // last_checkpoint_ts
        8 +  // owed_to_holders
        8 +  // reserve_balance
        8 +  // total_recognized
        8 +  // total_claimed
        8 +  // total_reserve_withdrawn
        4 + MAX_ACTIVE_DEPOSITS * Deposit::SIZE + // deposits
        1;   // bump

    /// Space for discriminator + fields.
    pub const SPACE: usize = 8 + Self::SIZE;

    pub fn new(
        collection: Pubkey,
        holder_share_bps: u16,
        vesting_window: i64,
        now_ts: i64,
        bump: u8,
    ) -> Result<Self> {
        require!(
            holder_share_bps as u64 <= BPS_DENOMINATOR,
            FeeShareError::InvalidConfig
        );
        require!(
            vesting_window > 0 && vesting_window <= MAX_VESTING_WINDOW_SECS,
            FeeShareError::InvalidConfig
        );
        Ok(Self {
            collection,
            holder_share_bps,
            vesting_window,
            index: 0,
            total_units: 0,
            released_at_checkpoint: 0,
            matured_released: 0,
            last_checkpoint_ts: now_ts,
            owed_to_holders: 0,
            reserve_balance: 0,
            total_recognized: 0,
            total_claimed: 0,
            total_reserve_withdrawn: 0,
            deposits: Vec::new(),
            bump,
        })
    }

    /// Vault amount already attributed to holders or to the reserve.
    pub fn accounted_balance(&self) -> Result<u64> {
        Ok(self
            .reserve_balance
            .checked_add(self.owed_to_holders)
            .ok_or(FeeShareError::MathOverflow)?)
    }

    /// Sum of every deposit's released amount at `now_ts`.
    pub fn released_total_at(&self, now_ts: i64) -> Result<u64> {
        let mut total = self.matured_released;
        for d in self.deposits.iter() {
            total = total
                .checked_add(d.released_at(now_ts, self.vesting_window)?)
                .ok_or(FeeShareError::MathOverflow)?;
        }
        Ok(total)
    }

    fn index_step(&self, delta: u64) -> Result<u128> {
        if delta == 0 || self.total_units == 0 {
            return Ok(0);
        }
        Ok(mul_div_floor(
            delta as u128,
            INDEX_PRECISION,
            self.total_units as u128,
        )?)
    }

    fn released_since_checkpoint(&self, now_ts: i64) -> Result<(u64, u64)> {
        require!(
            now_ts >= self.last_checkpoint_ts,
            FeeShareError::InvalidTimestamp
        );
        let released = self.released_total_at(now_ts)?;
        let delta = released
            .checked_sub(self.released_at_checkpoint)
            .ok_or(FeeShareError::MathOverflow)?;
        Ok((released, delta))
    }

    /// Index value a checkpoint at `now_ts` would produce, without mutating.
    pub fn projected_index(&self, now_ts: i64) -> Result<u128> {
        let (_, delta) = self.released_since_checkpoint(now_ts)?;
        Ok(self
            .index
            .checked_add(self.index_step(delta)?)
            .ok_or(FeeShareError::MathOverflow)?)
    }

    /// Attributes everything released since the last checkpoint to the units
    /// outstanding during that interval. Idempotent at a fixed `now_ts`.
    pub fn checkpoint(&mut self, now_ts: i64) -> Result<()> {
        let (released, delta) = self.released_since_checkpoint(now_ts)?;
        if delta > 0 {
            if self.total_units > 0 {
                self.index = self
                    .index
                    .checked_add(self.index_step(delta)?)
                    .ok_or(FeeShareError::MathOverflow)?;
            } else {
                // Released while no units existed: nobody can ever claim it.
                self.owed_to_holders = self
                    .owed_to_holders
                    .checked_sub(delta)
                    .ok_or(FeeShareError::MathOverflow)?;
                self.reserve_balance = self
                    .reserve_balance
                    .checked_add(delta)
                    .ok_or(FeeShareError::MathOverflow)?;
            }
        }
        self.released_at_checkpoint = released;
        self.last_checkpoint_ts = now_ts;
        self.fold_matured(now_ts)
    }

    /// Drops fully vested deposits; their shares move to `matured_released`.
    fn fold_matured(&mut self, now_ts: i64) -> Result<()> {
        let mut matured = self.matured_released;
        let mut active = Vec::with_capacity(self.deposits.len());
        for d in self.deposits.iter() {
            if time::is_window_over(now_ts, d.vests_from, self.vesting_window)? {
                matured = matured
                    .checked_add(d.holder_share)
                    .ok_or(FeeShareError::MathOverflow)?;
            } else {
                active.push(*d);
            }
        }
        self.matured_released = matured;
        self.deposits = active;
        Ok(())
    }

    fn push_deposit(&mut self, deposit: Deposit) -> Result<()> {
        if let Some(last) = self.deposits.last_mut() {
            if last.vests_from == deposit.vests_from {
                last.amount = last
                    .amount
                    .checked_add(deposit.amount)
                    .ok_or(FeeShareError::MathOverflow)?;
                last.holder_share = last
                    .holder_share
                    .checked_add(deposit.holder_share)
                    .ok_or(FeeShareError::MathOverflow)?;
                return Ok(());
            }
        }
        require!(
            self.deposits.len() < MAX_ACTIVE_DEPOSITS,
            FeeShareError::DepositLedgerFull
        );
        self.deposits.push(deposit);
        Ok(())
    }

    /// Recognizes the vault balance above the accounted watermark, split
    /// between holders (vested from the end of the current bucket) and the
    /// reserve (immediate).
    pub fn recognize(&mut self, now_ts: i64, vault_balance: u64) -> Result<RecognizedFees> {
        self.checkpoint(now_ts)?;

        let accounted = self.accounted_balance()?;
        let amount = vault_balance
            .checked_sub(accounted)
            .ok_or(FeeShareError::VaultUnderfunded)?;
        if amount == 0 {
            return Ok(RecognizedFees::default());
        }

        let holder_share = bps_of(amount, self.holder_share_bps)?;
        let reserve_share = amount
            .checked_sub(holder_share)
            .ok_or(FeeShareError::MathOverflow)?;
        let vests_from = time::bucket_end(now_ts, DEPOSIT_BUCKET_SECS)?;
        if holder_share > 0 {
            self.push_deposit(Deposit {
                amount,
                holder_share,
                vests_from,
            })?;
        }

        self.owed_to_holders = self
            .owed_to_holders
            .checked_add(holder_share)
            .ok_or(FeeShareError::MathOverflow)?;
        self.reserve_balance = self
            .reserve_balance
            .checked_add(reserve_share)
            .ok_or(FeeShareError::MathOverflow)?;
        self.total_recognized = self
            .total_recognized
            .checked_add(amount)
            .ok_or(FeeShareError::MathOverflow)?;

        Ok(RecognizedFees {
            amount,
            holder_share,
            reserve_share,
            vests_from,
        })
    }

    /// Credits value that belongs to the reserve outright (mint proceeds).
    pub fn credit_reserve(&mut self, amount: u64) -> Result<()> {
        self.reserve_balance = self
            .reserve_balance
            .checked_add(amount)
            .ok_or(FeeShareError::MathOverflow)?;
        Ok(())
    }

    /// Empties the reserve; the caller pays the returned amount out.
    pub fn take_reserve(&mut self) -> Result<u64> {
        let amount = self.reserve_balance;
        self.reserve_balance = 0;
        self.total_reserve_withdrawn = self
            .total_reserve_withdrawn
            .checked_add(amount)
            .ok_or(FeeShareError::MathOverflow)?;
        Ok(amount)
    }

    /// Checkpoints, then settles `holder` at its current units.
    pub fn sync_holder(&mut self, holder: &mut HolderAccount, now_ts: i64) -> Result<u64> {
        self.checkpoint(now_ts)?;
        holder.settle(self.index)
    }

    /// Pending entitlement of `holder` at `now_ts`, without mutating.
    pub fn pending_of(&self, holder: &HolderAccount, now_ts: i64) -> Result<u64> {
        holder.pending_at(self.projected_index(now_ts)?)
    }

    /// Issuance hook: settles the recipient at its old balance, then grows
    /// its units and the total.
    pub fn issue_units(&mut self, holder: &mut HolderAccount, count: u64, now_ts: i64) -> Result<()> {
        self.sync_holder(holder, now_ts)?;
        holder.units = holder
            .units
            .checked_add(count)
            .ok_or(FeeShareError::MathOverflow)?;
        self.total_units = self
            .total_units
            .checked_add(count)
            .ok_or(FeeShareError::MathOverflow)?;
        Ok(())
    }

    /// Transfer hook: settles both sides at their old balances, then moves units.
    pub fn move_units(
        &mut self,
        from: &mut HolderAccount,
        to: &mut HolderAccount,
        count: u64,
        now_ts: i64,
    ) -> Result<()> {
        require!(from.units >= count, FeeShareError::NotItemOwner);
        self.sync_holder(from, now_ts)?;
        self.sync_holder(to, now_ts)?;
        from.units = from
            .units
            .checked_sub(count)
            .ok_or(FeeShareError::MathOverflow)?;
        to.units = to
            .units
            .checked_add(count)
            .ok_or(FeeShareError::MathOverflow)?;
        Ok(())
    }

    /// Settles and zeroes the holder's entitlement; the caller pays it out
    /// after this returns.
    pub fn claim(&mut self, holder: &mut HolderAccount, now_ts: i64) -> Result<u64> {
        self.sync_holder(holder, now_ts)?;
        let amount = holder.take_accrued()?;
        self.owed_to_holders = self
            .owed_to_holders
            .checked_sub(amount)
            .ok_or(FeeShareError::MathOverflow)?;
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
    use crate::constants::{DEFAULT_HOLDER_SHARE_BPS, DEFAULT_VESTING_WINDOW_SECS};
    use crate::test_utils::code;
    use crate::utils::time::days;

    const T0: i64 = 1_700_006_400; // day boundary
    const UNIT: u64 = 1_000_000_000;

    fn ledger() -> FeeLedger {
        FeeLedger::new(
            Pubkey::new_from_array([5; 32]),
            DEFAULT_HOLDER_SHARE_BPS,
            DEFAULT_VESTING_WINDOW_SECS,
            T0,
            253,
        )
        .unwrap()
    }

    fn holder(seed: u8) -> HolderAccount {
        let mut h = HolderAccount::default();
        h.open(
            Pubkey::new_from_array([5; 32]),
            Pubkey::new_from_array([seed; 32]),
            0,
            1,
        );
        h
    }

    #[test]
    fn rejects_bad_config() {
        let c = Pubkey::new_from_array([5; 32]);
        assert!(FeeLedger::new(c, 10_001, DEFAULT_VESTING_WINDOW_SECS, T0, 1).is_err());
        assert!(FeeLedger::new(c, 5_000, 0, T0, 1).is_err());
        assert!(FeeLedger::new(c, 5_000, MAX_VESTING_WINDOW_SECS + 1, T0, 1).is_err());
        assert!(FeeLedger::new(c, 5_000, MAX_VESTING_WINDOW_SECS, T0, 1).is_ok());
    }

    #[test]
    fn recognize_splits_and_tracks_watermark() {
        let mut l = ledger();
        let r = l.recognize(T0, 3 * UNIT + 1).unwrap();
        assert_eq!(r.amount, 3 * UNIT + 1);
        assert_eq!(r.holder_share, 3 * UNIT / 2);
        assert_eq!(r.reserve_share, 3 * UNIT / 2 + 1);
        assert_eq!(l.accounted_balance().unwrap(), 3 * UNIT + 1);
        // nothing new arrived
        assert_eq!(l.recognize(T0 + 5, 3 * UNIT + 1).unwrap(), RecognizedFees::default());
        assert_eq!(l.deposits.len(), 1);
    }

    #[test]
    fn same_day_recognitions_merge() {
        let mut l = ledger();
        l.issue_units(&mut holder(1), 1, T0).unwrap();
        assert_eq!(l.recognize(T0 + 1, 2 * UNIT).unwrap().vests_from, T0 + days(1).unwrap());
        l.recognize(T0 + 3_600, 6 * UNIT).unwrap();
        assert_eq!(l.deposits.len(), 1);
        assert_eq!(l.deposits[0].amount, 6 * UNIT);
        assert_eq!(l.deposits[0].holder_share, 3 * UNIT);
        l.recognize(T0 + days(1).unwrap() + 1, 8 * UNIT).unwrap();
        assert_eq!(l.deposits.len(), 2);
    }

    #[test]
    fn vesting_waits_for_bucket_end() {
        let mut l = ledger();
        let mut h = holder(1);
        l.issue_units(&mut h, 1, T0).unwrap();
        l.recognize(T0 + 10, 31 * UNIT).unwrap();
        let start = T0 + days(1).unwrap();
        assert_eq!(l.pending_of(&h, start).unwrap(), 0);
        assert_eq!(
            l.pending_of(&h, start + days(10).unwrap()).unwrap(),
            5 * UNIT
        );
    }

    #[test]
    fn vault_below_watermark_is_rejected() {
        let mut l = ledger();
        l.credit_reserve(10).unwrap();
        assert_eq!(
            code(l.recognize(T0, 9).unwrap_err()),
            u32::from(FeeShareError::VaultUnderfunded)
        );
    }

    #[test]
    fn checkpoint_is_idempotent_at_same_instant() {
        let mut l = ledger();
        let mut h = holder(1);
        l.issue_units(&mut h, 2, T0).unwrap();
        l.recognize(T0, 31 * UNIT).unwrap();
        let t = T0 + days(3).unwrap();
        l.checkpoint(t).unwrap();
        let index = l.index;
        l.checkpoint(t).unwrap();
        assert_eq!(l.index, index);
        assert_eq!(l.projected_index(t).unwrap(), index);
    }

    #[test]
    fn projected_index_matches_checkpoint() {
        let mut l = ledger();
        l.issue_units(&mut holder(1), 3, T0).unwrap();
        l.recognize(T0, 31 * UNIT).unwrap();
        let t = T0 + days(17).unwrap() + 123;
        let projected = l.projected_index(t).unwrap();
        l.checkpoint(t).unwrap();
        assert_eq!(l.index, projected);
    }

    #[test]
    fn clock_going_backwards_is_rejected() {
        let mut l = ledger();
        l.checkpoint(T0 + 10).unwrap();
        assert_eq!(
            code(l.checkpoint(T0 + 9).unwrap_err()),
            u32::from(FeeShareError::InvalidTimestamp)
        );
    }

    #[test]
    fn release_without_holders_goes_to_reserve() {
        let mut l = ledger();
        l.recognize(T0, 2 * UNIT).unwrap();
        l.checkpoint(T0 + days(40).unwrap()).unwrap();
        assert_eq!(l.index, 0);
        assert_eq!(l.owed_to_holders, 0);
        assert_eq!(l.reserve_balance, 2 * UNIT);
        assert_eq!(l.accounted_balance().unwrap(), 2 * UNIT);
    }

    #[test]
    fn matured_deposits_are_folded_without_changing_totals() {
        let mut l = ledger();
        l.issue_units(&mut holder(1), 1, T0).unwrap();
        l.recognize(T0, 2 * UNIT).unwrap();
        l.recognize(T0 + days(20).unwrap(), 4 * UNIT).unwrap();
        let t = T0 + days(35).unwrap();
        let before = l.released_total_at(t).unwrap();
        l.checkpoint(t).unwrap();
        assert_eq!(l.deposits.len(), 1);
        assert_eq!(l.matured_released, UNIT);
        assert_eq!(l.released_total_at(t).unwrap(), before);
    }

    #[test]
    fn dust_recognitions_cannot_block_real_fees() {
        let mut l = ledger();
        let mut h = holder(1);
        l.issue_units(&mut h, 1, T0).unwrap();
        let mut vault = 0;
        for i in 0..MAX_ACTIVE_DEPOSITS as i64 {
            vault += 2;
            l.recognize(T0 + 1 + i, vault).unwrap();
        }
        assert_eq!(l.deposits.len(), 1);

        vault += 31 * UNIT;
        let day1 = T0 + days(1).unwrap();
        assert_eq!(l.recognize(day1, vault).unwrap().amount, 31 * UNIT);
        assert_eq!(
            l.pending_of(&h, day1 + days(10).unwrap()).unwrap(),
            5 * UNIT + 64 * 10 / 31
        );
        assert_eq!(
            l.pending_of(&h, day1 + days(31).unwrap()).unwrap(),
            31 * UNIT / 2 + 64
        );
    }

    #[test]
    fn daily_recognitions_stay_within_capacity() {
        let c = Pubkey::new_from_array([5; 32]);
        for window in [DEFAULT_VESTING_WINDOW_SECS, MAX_VESTING_WINDOW_SECS] {
            let mut l = FeeLedger::new(c, DEFAULT_HOLDER_SHARE_BPS, window, T0, 1).unwrap();
            let mut vault = 0;
            let mut peak = 0;
            for d in 0..200i64 {
                for offset in [7 + d * 3_571 % 80_000, 86_399] {
                    vault += 2;
                    l.recognize(T0 + days(d).unwrap() + offset, vault).unwrap();
                    peak = peak.max(l.deposits.len());
                }
            }
            let bound = (window / DEPOSIT_BUCKET_SECS) as usize + 1;
            assert!(peak <= bound, "window {window}: {peak} > {bound}");
            assert!(peak <= MAX_ACTIVE_DEPOSITS);
        }
    }

    #[test]
    fn move_units_requires_balance() {
        let mut l = ledger();
        let (mut a, mut b) = (holder(1), holder(2));
        assert_eq!(
            code(l.move_units(&mut a, &mut b, 1, T0).unwrap_err()),
            u32::from(FeeShareError::NotItemOwner)
        );
    }

    #[test]
    fn take_reserve_empties_fund() {
        let mut l = ledger();
        l.credit_reserve(7).unwrap();
        assert_eq!(l.take_reserve().unwrap(), 7);
        assert_eq!(l.take_reserve().unwrap(), 0);
        assert_eq!(l.total_reserve_withdrawn, 7);
    }
}
