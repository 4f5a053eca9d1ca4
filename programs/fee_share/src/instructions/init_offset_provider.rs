use anchor_lang::prelude::*;

use crate::constants::OFFSET_PROVIDER_SEED;
use crate::state::OffsetProvider;

pub fn init_offset_provider(ctx: Context<InitOffsetProvider>) -> Result<()> {
    let provider = &mut ctx.accounts.offset_provider;
    provider.authority = ctx.accounts.authority.key();
    provider.offset = 0;
    provider.published = false;
    provider.bump = ctx.bumps.offset_provider;

    emit!(OffsetProviderInitialized {
        provider: provider.key(),
        authority: provider.authority,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitOffsetProvider<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + OffsetProvider::SIZE,
        seeds = [OFFSET_PROVIDER_SEED, authority.key().as_ref()],
        bump
    )]
    pub offset_provider: Account<'info, OffsetProvider>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct OffsetProviderInitialized {
    pub provider: Pubkey,
    pub authority: Pubkey,
}
