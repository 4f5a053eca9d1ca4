use anchor_lang::prelude::*;

use crate::constants::{COLLECTION_SEED, HOLDER_SEED, LEDGER_SEED};
use crate::state::{Collection, FeeLedger, HolderAccount};

/// Settles the holder up to now and reports what a claim would pay.
pub fn quote_pending(ctx: Context<QuotePending>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;

    let ledger = &mut ctx.accounts.fee_ledger;
    let holder = &mut ctx.accounts.holder_account;
    let pending = ledger.sync_holder(holder, now)?;

    emit!(PendingQuoted {
        owner: holder.owner,
        units: holder.units,
        pending,
        total_claimed: holder.total_claimed,
        index: ledger.index,
    });

    Ok(pending)
}

#[derive(Accounts)]
pub struct QuotePending<'info> {
    #[account(seeds = [COLLECTION_SEED], bump = collection.bump)]
    pub collection: Account<'info, Collection>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, collection.key().as_ref()],
        bump = fee_ledger.bump
    )]
    pub fee_ledger: Box<Account<'info, FeeLedger>>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, collection.key().as_ref(), holder_account.owner.as_ref()],
        bump = holder_account.bump
    )]
    pub holder_account: Account<'info, HolderAccount>,
}

#[event]
pub struct PendingQuoted {
    pub owner: Pubkey,
    pub units: u64,
    pub pending: u64,
    pub total_claimed: u64,
    pub index: u128,
}
