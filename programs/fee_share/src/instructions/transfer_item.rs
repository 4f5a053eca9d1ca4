use anchor_lang::prelude::*;

use crate::constants::{COLLECTION_SEED, HOLDER_SEED, ITEM_SEED, LEDGER_SEED};
use crate::error::FeeShareError;
use crate::state::{Collection, FeeLedger, HolderAccount, Item};

/// Moves one item and its unit; both sides are settled at their old
/// balances first, so past accrual stays with the sender.
pub fn transfer_item(ctx: Context<TransferItem>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let collection_key = ctx.accounts.collection.key();
    let recipient_key = ctx.accounts.recipient.key();

    let ledger = &mut ctx.accounts.fee_ledger;
    let to = &mut ctx.accounts.recipient_holder;
    if !to.is_open() {
        to.open(collection_key, recipient_key, ledger.index, ctx.bumps.recipient_holder);
    }
    ledger.move_units(&mut ctx.accounts.sender_holder, to, 1, now)?;

    let item = &mut ctx.accounts.item;
    item.owner = recipient_key;

    emit!(ItemTransferred {
        collection: collection_key,
        id: item.id,
        from: ctx.accounts.sender.key(),
        to: recipient_key,
        from_units: ctx.accounts.sender_holder.units,
        to_units: ctx.accounts.recipient_holder.units,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct TransferItem<'info> {
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
        seeds = [ITEM_SEED, collection.key().as_ref(), &item.id.to_le_bytes()],
        bump = item.bump,
        constraint = item.owner == sender.key() @ FeeShareError::NotItemOwner,
    )]
    pub item: Account<'info, Item>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, collection.key().as_ref(), sender.key().as_ref()],
        bump = sender_holder.bump
    )]
    pub sender_holder: Account<'info, HolderAccount>,

    #[account(
        init_if_needed,
        payer = sender,
        space = HolderAccount::SPACE,
        seeds = [HOLDER_SEED, collection.key().as_ref(), recipient.key().as_ref()],
        bump
    )]
    pub recipient_holder: Account<'info, HolderAccount>,

    /// CHECK: any wallet may receive an item; only its key is used.
    #[account(constraint = recipient.key() != sender.key() @ FeeShareError::InvalidRecipient)]
    pub recipient: UncheckedAccount<'info>,

    #[account(mut)]
    pub sender: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct ItemTransferred {
    pub collection: Pubkey,
    pub id: u64,
    pub from: Pubkey,
    pub to: Pubkey,
    pub from_units: u64,
    pub to_units: u64,
}
