use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{COLLECTION_SEED, LEDGER_SEED, VAULT_SEED};
use crate::error::FeeShareError;
use crate::state::{Collection, FeeLedger};

/// Permissionless. Books whatever arrived in the vault since the last call
/// as one deposit and returns its amount.
pub fn recognize_fees(ctx: Context<RecognizeFees>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let vault_balance = ctx.accounts.vault.amount;

    let ledger = &mut ctx.accounts.fee_ledger;
    let recognized = ledger.recognize(now, vault_balance)?;
    if recognized.amount == 0 {
        msg!("nothing to recognize");
        return Ok(0);
    }

    emit!(FeesRecognized {
        collection: ctx.accounts.collection.key(),
        amount: recognized.amount,
        holder_share: recognized.holder_share,
        reserve_share: recognized.reserve_share,
        recognized_at: now,
        vests_from: recognized.vests_from,
        active_deposits: ledger.deposits.len() as u8,
    });

    Ok(recognized.amount)
}

#[derive(Accounts)]
pub struct RecognizeFees<'info> {
    #[account(seeds = [COLLECTION_SEED], bump = collection.bump)]
    pub collection: Account<'info, Collection>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, collection.key().as_ref()],
        bump = fee_ledger.bump
    )]
    pub fee_ledger: Box<Account<'info, FeeLedger>>,

    #[account(
        seeds = [VAULT_SEED, collection.key().as_ref()],
        bump,
        constraint = vault.mint == collection.payment_mint @ FeeShareError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,
}

#[event]
pub struct FeesRecognized {
    pub collection: Pubkey,
    pub amount: u64,
    pub holder_share: u64,
    pub reserve_share: u64,
    pub recognized_at: i64,
    pub vests_from: i64,
    pub active_deposits: u8,
}
