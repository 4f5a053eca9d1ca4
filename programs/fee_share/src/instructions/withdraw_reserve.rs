use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{COLLECTION_SEED, LEDGER_SEED, VAULT_SEED};
use crate::error::FeeShareError;
use crate::state::{Collection, FeeLedger};

/// Operator only. Empties the reserve into `destination`; an empty reserve
/// is a successful no-op returning 0.
pub fn withdraw_reserve(ctx: Context<WithdrawReserve>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;

    let collection = &ctx.accounts.collection;
    require!(
        collection.is_operator(&ctx.accounts.operator.key()),
        FeeShareError::NotAuthorized
    );
    require_keys_eq!(
        ctx.accounts.destination.mint,
        collection.payment_mint,
        FeeShareError::InvalidTokenMint
    );

    // Orphaned releases reach the reserve only at a checkpoint.
    let ledger = &mut ctx.accounts.fee_ledger;
    ledger.checkpoint(now)?;
    let amount = ledger.take_reserve()?;
    if amount == 0 {
        msg!("reserve is empty");
        return Ok(0);
    }

    require!(
        ctx.accounts.vault.amount >= amount,
        FeeShareError::VaultUnderfunded
    );

    let signer_seeds: &[&[&[u8]]] = &[&[COLLECTION_SEED, &[collection.bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: collection.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(ReserveWithdrawn {
        collection: collection.key(),
        operator: collection.operator,
        destination: ctx.accounts.destination.key(),
        amount,
        total_withdrawn: ledger.total_reserve_withdrawn,
    });

    Ok(amount)
}

#[derive(Accounts)]
pub struct WithdrawReserve<'info> {
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
        seeds = [VAULT_SEED, collection.key().as_ref()],
        bump,
        constraint = vault.mint == collection.payment_mint @ FeeShareError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Any token account of the payment mint.
    #[account(mut)]
    pub destination: Account<'info, TokenAccount>,

    pub operator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct ReserveWithdrawn {
    pub collection: Pubkey,
    pub operator: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub total_withdrawn: u64,
}
