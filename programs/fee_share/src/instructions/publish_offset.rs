use anchor_lang::prelude::*;

use crate::constants::OFFSET_PROVIDER_SEED;
use crate::error::FeeShareError;
use crate::state::OffsetProvider;

/// One-shot: a published offset can never be replaced.
pub fn publish_offset(ctx: Context<PublishOffset>, offset: u64) -> Result<()> {
    let provider = &mut ctx.accounts.offset_provider;
    require_keys_eq!(
        ctx.accounts.authority.key(),
        provider.authority,
        FeeShareError::NotAuthorized
    );
    require!(!provider.published, FeeShareError::OffsetAlreadyPublished);

    provider.offset = offset;
    provider.published = true;

    emit!(OffsetPublished {
        provider: provider.key(),
        offset,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct PublishOffset<'info> {
    #[account(
        mut,
        seeds = [OFFSET_PROVIDER_SEED, offset_provider.authority.as_ref()],
        bump = offset_provider.bump
    )]
    pub offset_provider: Account<'info, OffsetProvider>,

    pub authority: Signer<'info>,
}

#[event]
pub struct OffsetPublished {
    pub provider: Pubkey,
    pub offset: u64,
}
