use anchor_lang::prelude::*;

use crate::constants::COLLECTION_SEED;
use crate::error::FeeShareError;
use crate::state::Collection;

pub fn set_operator(ctx: Context<SetOperator>, new_operator: Pubkey) -> Result<()> {
    require!(new_operator != Pubkey::default(), FeeShareError::InvalidPubkey);

    let collection_key = ctx.accounts.collection.key();
    let collection = &mut ctx.accounts.collection;
    require_keys_eq!(
        ctx.accounts.operator.key(),
        collection.operator,
        FeeShareError::NotAuthorized
    );
    require!(new_operator != collection_key, FeeShareError::InvalidPubkey);

    let old = collection.operator;
    collection.operator = new_operator;

    emit!(OperatorSet {
        collection: collection_key,
        old_operator: old,
        new_operator,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetOperator<'info> {
    #[account(mut, seeds = [COLLECTION_SEED], bump = collection.bump)]
    pub collection: Account<'info, Collection>,

    pub operator: Signer<'info>,
}

#[event]
pub struct OperatorSet {
    pub collection: Pubkey,
    pub old_operator: Pubkey,
    pub new_operator: Pubkey,
}
