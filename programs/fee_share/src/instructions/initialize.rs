use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{
    BPS_DENOMINATOR, COLLECTION_SEED, LEDGER_SEED, MAX_BATCH_LIMIT, MAX_VESTING_WINDOW_SECS,
    VAULT_SEED,
};
use crate::error::FeeShareError;
use crate::state::{Collection, FeeLedger, OffsetProvider};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeArgs {
    /// Price per item in payment-token base units.
    pub unit_price: u64,
    pub max_supply: u64,
    pub max_batch: u8,
    /// Holder share of every recognized fee, basis points.
    pub holder_share_bps: u16,
    pub vesting_window_secs: i64,
}

impl InitializeArgs {
    pub fn validate(&self) -> Result<()> {
        require!(self.unit_price > 0, FeeShareError::InvalidConfig);
        require!(self.max_supply > 0, FeeShareError::InvalidConfig);
        require!(
            self.max_batch > 0 && self.max_batch <= MAX_BATCH_LIMIT,
            FeeShareError::InvalidConfig
        );
        require!(
            (self.holder_share_bps as u64) <= BPS_DENOMINATOR,
            FeeShareError::InvalidConfig
        );
        require!(
            self.vesting_window_secs > 0 && self.vesting_window_secs <= MAX_VESTING_WINDOW_SECS,
            FeeShareError::InvalidConfig
        );
        Ok(())
    }

    /// Fingerprint of the economic parameters, logged with the init event.
    pub fn config_hash(&self, payment_mint: &Pubkey, offset_provider: &Pubkey) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(payment_mint.as_ref());
        hasher.update(offset_provider.as_ref());
        hasher.update(&self.unit_price.to_le_bytes());
        hasher.update(&self.max_supply.to_le_bytes());
        hasher.update(&[self.max_batch]);
        hasher.update(&self.holder_share_bps.to_le_bytes());
        hasher.update(&self.vesting_window_secs.to_le_bytes());
        *hasher.finalize().as_bytes()
    }
}

pub fn initialize(ctx: Context<Initialize>, args: InitializeArgs) -> Result<()> {
    args.validate()?;

    let now = Clock::get()?.unix_timestamp;
    let collection_key = ctx.accounts.collection.key();

    let collection = &mut ctx.accounts.collection;
    collection.operator = ctx.accounts.operator.key();
    collection.payment_mint = ctx.accounts.payment_mint.key();
    collection.vault = ctx.accounts.vault.key();
    collection.offset_provider = ctx.accounts.offset_provider.key();
    collection.unit_price = args.unit_price;
    collection.max_supply = args.max_supply;
    collection.max_batch = args.max_batch;
    collection.issued = 0;
    collection.offset = None;
    collection.bump = ctx.bumps.collection;

    ctx.accounts.fee_ledger.set_inner(FeeLedger::new(
        collection_key,
        args.holder_share_bps,
        args.vesting_window_secs,
        now,
        ctx.bumps.fee_ledger,
    )?);

    emit!(CollectionInitialized {
        collection: collection_key,
        operator: ctx.accounts.collection.operator,
        payment_mint: ctx.accounts.collection.payment_mint,
        vault: ctx.accounts.collection.vault,
        unit_price: args.unit_price,
        max_supply: args.max_supply,
        holder_share_bps: args.holder_share_bps,
        vesting_window_secs: args.vesting_window_secs,
        config_hash: args.config_hash(
            &ctx.accounts.collection.payment_mint,
            &ctx.accounts.collection.offset_provider,
        ),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = operator,
        space = 8 + Collection::SIZE,
        seeds = [COLLECTION_SEED],
        bump
    )]
    pub collection: Account<'info, Collection>,

    #[account(
        init,
        payer = operator,
        space = FeeLedger::SPACE,
        seeds = [LEDGER_SEED, collection.key().as_ref()],
        bump
    )]
    pub fee_ledger: Box<Account<'info, FeeLedger>>,

    #[account(
        init,
        payer = operator,
        token::mint = payment_mint,
        token::authority = collection,
        seeds = [VAULT_SEED, collection.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub payment_mint: Account<'info, Mint>,

    /// Queried for the numbering offset on first issuance.
    pub offset_provider: Account<'info, OffsetProvider>,

    #[account(mut)]
    pub operator: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct CollectionInitialized {
    pub collection: Pubkey,
    pub operator: Pubkey,
    pub payment_mint: Pubkey,
    pub vault: Pubkey,
    pub unit_price: u64,
    pub max_supply: u64,
    pub holder_share_bps: u16,
    pub vesting_window_secs: i64,
    pub config_hash: [u8; 32],
}
