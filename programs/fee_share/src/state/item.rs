use anchor_lang::prelude::*;

/// One issued item. Created at issuance, never closed.
#[account]
#[derive(Debug)]
pub struct Item {
    pub collection: Pubkey,
    /// Public number in `[0, max_supply)`.
    pub id: u64,
    /// Mint order (k-th issued item).
    pub sequence: u64,
    pub owner: Pubkey,
    pub bump: u8,
}

impl Item {
    pub const SIZE: usize =
        32 + // collection
        8 +  // id
        8 +  // sequence
        32 + // owner
        1;   // bump

    /// Space for discriminator + fields.
    pub const SPACE: usize = 8 + Self::SIZE;
}
