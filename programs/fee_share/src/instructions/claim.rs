use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{COLLECTION_SEED, HOLDER_SEED, LEDGER_SEED, VAULT_SEED};
use crate::error::FeeShareError;
use crate::state::{Collection, FeeLedger, HolderAccount};

/// Pays the signer everything released to it so far. The ledger is fully
/// updated before the token transfer; a holder with nothing pending gets 0.
pub fn claim(ctx: Context<Claim>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let collection_key = ctx.accounts.collection.key();
    let holder_key = ctx.accounts.holder.key();

    require_keys_eq!(
        ctx.accounts.holder_token_account.mint,
        ctx.accounts.collection.payment_mint,
        FeeShareError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.holder_token_account.owner,
        holder_key,
        FeeShareError::InvalidTokenAccount
    );

    let ledger = &mut ctx.accounts.fee_ledger;
    let account = &mut ctx.accounts.holder_account;
    if !account.is_open() {
        account.open(collection_key, holder_key, ledger.index, ctx.bumps.holder_account);
    }
    let amount = ledger.claim(account, now)?;
    let total_claimed = account.total_claimed;

    if amount == 0 {
        return Ok(0);
    }

    require!(
        ctx.accounts.vault.amount >= amount,
        FeeShareError::VaultUnderfunded
    );

    let signer_seeds: &[&[&[u8]]] = &[&[COLLECTION_SEED, &[ctx.accounts.collection.bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.holder_token_account.to_account_info(),
                authority: ctx.accounts.collection.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(FeeClaimed {
        collection: collection_key,
        holder: holder_key,
        amount,
        total_claimed,
    });

    Ok(amount)
}

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(seeds = [COLLECTION_SEED], bump = collection.bump)]
    pub collection: Account<'info, Collection>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, collection.key().as_ref()],
        bump = fee_ledger.bump
    )]
    pub fee_ledger: Box<Account<'info, FeeLedger>>,

    #[account(
        init_if_needed,
        payer = holder,
        space = HolderAccount::SPACE,
        seeds = [HOLDER_SEED, collection.key().as_ref(), holder.key().as_ref()],
        bump
    )]
    pub holder_account: Account<'info, HolderAccount>,

    #[account(
        mut,
        seeds = [VAULT_SEED, collection.key().as_ref()],
        bump,
        constraint = vault.mint == collection.payment_mint @ FeeShareError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub holder_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub holder: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct FeeClaimed {
    pub collection: Pubkey,
    pub holder: Pubkey,
    pub amount: u64,
    pub total_claimed: u64,
}
