use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{COLLECTION_SEED, HOLDER_SEED, ITEM_SEED, LEDGER_SEED, VAULT_SEED};
use crate::error::FeeShareError;
use crate::state::{Collection, FeeLedger, HolderAccount, Item, OffsetProvider};

/// Mints `count` items to the signer for `paid_amount` payment tokens. The
/// whole payment lands in the vault and belongs to the reserve.
pub fn issue<'info>(
    ctx: Context<'_, '_, '_, 'info, Issue<'info>>,
    count: u8,
    paid_amount: u64,
) -> Result<Vec<u64>> {
    let now = Clock::get()?.unix_timestamp;
    let collection_key = ctx.accounts.collection.key();
    let minter_key = ctx.accounts.minter.key();

    require_keys_eq!(
        ctx.accounts.minter_token_account.mint,
        ctx.accounts.collection.payment_mint,
        FeeShareError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.minter_token_account.owner,
        minter_key,
        FeeShareError::InvalidTokenAccount
    );
    require!(
        ctx.remaining_accounts.len() == count as usize,
        FeeShareError::ItemCountMismatch
    );

    let collection = &mut ctx.accounts.collection;
    if collection.offset.is_none() {
        let offset = collection.latch_offset(&*ctx.accounts.offset_provider)?;
        emit!(OffsetLatched {
            collection: collection_key,
            offset,
        });
    }
    let first_sequence = collection.issued;
    let ids = collection.reserve_ids(count, paid_amount)?;

    let ledger = &mut ctx.accounts.fee_ledger;
    let holder = &mut ctx.accounts.holder_account;
    if !holder.is_open() {
        holder.open(collection_key, minter_key, ledger.index, ctx.bumps.holder_account);
    }
    ledger.issue_units(holder, count as u64, now)?;
    ledger.credit_reserve(paid_amount)?;

    for (k, (id, item_info)) in ids.iter().zip(ctx.remaining_accounts.iter()).enumerate() {
        let id_bytes = id.to_le_bytes();
        let (expected, bump) = Pubkey::find_program_address(
            &[ITEM_SEED, collection_key.as_ref(), &id_bytes],
            ctx.program_id,
        );
        require_keys_eq!(item_info.key(), expected, FeeShareError::InvalidItemAccount);
        require!(
            item_info.data_is_empty() && item_info.owner == &system_program::ID,
            FeeShareError::InvalidItemAccount
        );

        let bump_seed = [bump];
        let item_seeds: &[&[u8]] = &[ITEM_SEED, collection_key.as_ref(), &id_bytes, &bump_seed];
        create_item_account(
            item_info,
            &ctx.accounts.minter.to_account_info(),
            &ctx.accounts.system_program.to_account_info(),
            item_seeds,
            ctx.program_id,
        )?;

        let sequence = first_sequence
            .checked_add(k as u64)
            .ok_or(FeeShareError::MathOverflow)?;
        let item = Item {
            collection: collection_key,
            id: *id,
            sequence,
            owner: minter_key,
            bump,
        };
        let mut data = item_info.try_borrow_mut_data()?;
        item.try_serialize(&mut &mut data[..])?;
    }

    if paid_amount > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.minter_token_account.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                    authority: ctx.accounts.minter.to_account_info(),
                },
            ),
            paid_amount,
        )?;
    }

    emit!(ItemsIssued {
        collection: collection_key,
        owner: minter_key,
        ids: ids.clone(),
        paid_amount,
        issued: ctx.accounts.collection.issued,
        holder_units: ctx.accounts.holder_account.units,
    });

    Ok(ids)
}

/// Creates an item PDA the way `#[account(init)]` does: an address that
/// already holds lamports is topped up, allocated and assigned instead of
/// created.
fn create_item_account<'info>(
    item: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system: &AccountInfo<'info>,
    item_seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<()> {
    let required = Rent::get()?.minimum_balance(Item::SPACE);
    let signer_seeds: &[&[&[u8]]] = &[item_seeds];
    let current = item.lamports();

    if current == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system.clone(),
                system_program::CreateAccount {
                    from: payer.clone(),
                    to: item.clone(),
                },
                signer_seeds,
            ),
            required,
            Item::SPACE as u64,
            program_id,
        );
    }

    let top_up = required.saturating_sub(current);
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system.clone(),
                system_program::Transfer {
                    from: payer.clone(),
                    to: item.clone(),
                },
            ),
            top_up,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system.clone(),
            system_program::Allocate {
                account_to_allocate: item.clone(),
            },
            signer_seeds,
        ),
        Item::SPACE as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system.clone(),
            system_program::Assign {
                account_to_assign: item.clone(),
            },
            signer_seeds,
        ),
        program_id,
    )
}

#[derive(Accounts)]
pub struct Issue<'info> {
    #[account(mut, seeds = [COLLECTION_SEED], bump = collection.bump)]
    pub collection: Account<'info, Collection>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, collection.key().as_ref()],
        bump = fee_ledger.bump
    )]
    pub fee_ledger: Box<Account<'info, FeeLedger>>,

    #[account(
        init_if_needed,
        payer = minter,
        space = HolderAccount::SPACE,
        seeds = [HOLDER_SEED, collection.key().as_ref(), minter.key().as_ref()],
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
    pub minter_token_account: Account<'info, TokenAccount>,

    #[account(address = collection.offset_provider @ FeeShareError::InvalidPubkey)]
    pub offset_provider: Account<'info, OffsetProvider>,

    #[account(mut)]
    pub minter: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct OffsetLatched {
    pub collection: Pubkey,
    pub offset: u64,
}

#[event]
pub struct ItemsIssued {
    pub collection: Pubkey,
    pub owner: Pubkey,
    pub ids: Vec<u64>,
    pub paid_amount: u64,
    pub issued: u64,
    pub holder_units: u64,
}
