use anchor_lang::prelude::*;

/// Source of the one-time numbering offset that decouples mint order from
/// public item numbers.
pub trait OffsetSource {
    /// `None` while the source has nothing to offer yet.
    fn current_offset(&self) -> Option<u64>;
}

/// Fixed offset, for deterministic substitution.
impl OffsetSource for u64 {
    fn current_offset(&self) -> Option<u64> {
        Some(*self)
    }
}

/// On-chain offset source; its authority publishes the value exactly once.
#[account]
#[derive(Debug, Default)]
pub struct OffsetProvider {
    pub authority: Pubkey,
    pub offset: u64,
    pub published: bool,
    pub bump: u8,
}

impl OffsetProvider {
    pub const SIZE: usize =
        32 + // authority
        8 +  // offset
        1 +  // published
        1;   // bump
}

impl OffsetSource for OffsetProvider {
    fn current_offset(&self) -> Option<u64> {
        self.published.then_some(self.offset)
    }
}
