use anchor_lang::prelude::*;

use crate::error::FeeShareError;
use crate::state::OffsetSource;

/// Singleton collection config PDA; also the vault authority.
#[account]
#[derive(Debug)]
pub struct Collection {
    /// Operator role: withdraws the reserve, hands the role over.
    pub operator: Pubkey,
    /// Mint of the payment / fee token.
    pub payment_mint: Pubkey,
    /// Vault token account (PDA) holding all payment tokens.
    pub vault: Pubkey,
    /// Account queried for the numbering offset on first issuance.
    pub offset_provider: Pubkey,
    /// Price per item in payment-token base units.
    pub unit_price: u64,
    pub max_supply: u64,
    /// Max items per `issue` call.
    pub max_batch: u8,
    /// Items issued so far (also the next mint sequence).
    pub issued: u64,
    /// Latched numbering offset, reduced modulo `max_supply`.
    pub offset: Option<u64>,
    pub bump: u8,
}

impl Collection {
    pub const SIZE: usize =
        32 + // operator
        32 + // payment_mint
        32 + // vault
        32 + // offset_provider
        8 +  // unit_price
        8 +  // max_supply
        1 +  // max_batch
        8 +  // issued
        9 +  // offset (Option<u64>)
        1;   // bump

    pub fn is_operator(&self, key: &Pubkey) -> bool {
        self.operator == *key
    }

    /// Latches the numbering offset once; later calls return the latched value.
    pub fn latch_offset<S: OffsetSource + ?Sized>(&mut self, source: &S) -> Result<u64> {
        if let Some(offset) = self.offset {
            return Ok(offset);
        }
        require!(self.max_supply > 0, FeeShareError::InvalidConfig);
        let raw = source
            .current_offset()
            .ok_or(FeeShareError::OffsetUnavailable)?;
        let offset = raw % self.max_supply;
        self.offset = Some(offset);
        Ok(offset)
    }

    /// Public number of the item minted at `sequence`.
    pub fn public_id(&self, sequence: u64) -> Result<u64> {
        let offset = self.offset.ok_or(FeeShareError::OffsetUnavailable)?;
        let shifted = (offset as u128)
            .checked_add(sequence as u128)
            .ok_or(FeeShareError::MathOverflow)?;
        Ok((shifted % self.max_supply as u128) as u64)
    }

    pub fn price_for(&self, count: u8) -> Result<u64> {
        Ok(self
            .unit_price
            .checked_mul(count as u64)
            .ok_or(FeeShareError::MathOverflow)?)
    }

    /// Validates an issuance request and reserves the next `count` public ids.
    pub fn reserve_ids(&mut self, count: u8, paid_amount: u64) -> Result<Vec<u64>> {
        require!(
            count > 0 && count <= self.max_batch,
            FeeShareError::InvalidCount
        );
        let end = self
            .issued
            .checked_add(count as u64)
            .ok_or(FeeShareError::MathOverflow)?;
        require!(end <= self.max_supply, FeeShareError::SupplyExhausted);
        require!(
            paid_amount >= self.price_for(count)?,
            FeeShareError::InsufficientPayment
        );

        let ids = (self.issued..end)
            .map(|sequence| self.public_id(sequence))
            .collect::<Result<Vec<u64>>>()?;
        self.issued = end;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::code;

    const PRICE: u64 = 50_000_000;

    fn collection(max_supply: u64) -> Collection {
        Collection {
            operator: Pubkey::new_from_array([1; 32]),
            payment_mint: Pubkey::new_from_array([2; 32]),
            vault: Pubkey::new_from_array([3; 32]),
            offset_provider: Pubkey::new_from_array([4; 32]),
            unit_price: PRICE,
            max_supply,
            max_batch: 5,
            issued: 0,
            offset: None,
            bump: 255,
        }
    }

    #[test]
    fn numbering_is_shifted_by_offset_and_wraps() {
        let mut c = collection(10);
        assert_eq!(c.latch_offset(&1u64).unwrap(), 1);
        let ids = c.reserve_ids(5, 5 * PRICE).unwrap();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        let ids = c.reserve_ids(5, 5 * PRICE).unwrap();
        assert_eq!(ids, vec![6, 7, 8, 9, 0]);
        assert_eq!(c.issued, 10);
    }

    #[test]
    fn offset_is_latched_once_and_reduced() {
        let mut c = collection(10);
        assert_eq!(c.latch_offset(&23u64).unwrap(), 3);
        assert_eq!(c.latch_offset(&5u64).unwrap(), 3);
        assert_eq!(c.reserve_ids(1, PRICE).unwrap(), vec![3]);
    }

    #[test]
    fn unpublished_offset_blocks_issuance() {
        let mut c = collection(10);
        let provider = crate::state::OffsetProvider::default();
        assert_eq!(
            code(c.latch_offset(&provider).unwrap_err()),
            u32::from(FeeShareError::OffsetUnavailable)
        );
        assert_eq!(
            code(c.reserve_ids(1, PRICE).unwrap_err()),
            u32::from(FeeShareError::OffsetUnavailable)
        );
    }

    #[test]
    fn rejects_bad_counts() {
        let mut c = collection(10);
        c.latch_offset(&0u64).unwrap();
        assert_eq!(
            code(c.reserve_ids(0, PRICE).unwrap_err()),
            u32::from(FeeShareError::InvalidCount)
        );
        assert_eq!(
            code(c.reserve_ids(6, 6 * PRICE).unwrap_err()),
            u32::from(FeeShareError::InvalidCount)
        );
        assert_eq!(c.issued, 0);
    }

    #[test]
    fn rejects_underpayment_but_accepts_overpayment() {
        let mut c = collection(10);
        c.latch_offset(&0u64).unwrap();
        assert_eq!(
            code(c.reserve_ids(2, 2 * PRICE - 1).unwrap_err()),
            u32::from(FeeShareError::InsufficientPayment)
        );
        assert_eq!(c.reserve_ids(1, 2 * PRICE).unwrap(), vec![0]);
    }

    #[test]
    fn supply_cap_is_enforced() {
        let mut c = collection(3);
        c.latch_offset(&0u64).unwrap();
        c.reserve_ids(2, 2 * PRICE).unwrap();
        assert_eq!(
            code(c.reserve_ids(2, 2 * PRICE).unwrap_err()),
            u32::from(FeeShareError::SupplyExhausted)
        );
        assert_eq!(c.reserve_ids(1, PRICE).unwrap(), vec![2]);
        assert_eq!(
            code(c.reserve_ids(1, PRICE).unwrap_err()),
            u32::from(FeeShareError::SupplyExhausted)
        );
    }
}
