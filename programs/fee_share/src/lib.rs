use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use instructions::*;

declare_id!("FjSFx4iBN7MSgjaUUUQT25HNMB6iMBd4k3wh2zh2pGxQ");

#[program]
pub mod fee_share {
    use super::*;

    pub fn init_offset_provider(ctx: Context<InitOffsetProvider>) -> Result<()> {
        instructions::init_offset_provider::init_offset_provider(ctx)
    }

    pub fn publish_offset(ctx: Context<PublishOffset>, offset: u64) -> Result<()> {
        instructions::publish_offset::publish_offset(ctx, offset)
    }

    pub fn initialize(ctx: Context<Initialize>, args: InitializeArgs) -> Result<()> {
        instructions::initialize::initialize(ctx, args)
    }

    /// Mints `count` items to the signer; `remaining_accounts` carry the item
    /// PDAs in id order.
    pub fn issue<'info>(
        ctx: Context<'_, '_, '_, 'info, Issue<'info>>,
        count: u8,
        paid_amount: u64,
    ) -> Result<Vec<u64>> {
        instructions::issue::issue(ctx, count, paid_amount)
    }

    pub fn transfer_item(ctx: Context<TransferItem>) -> Result<()> {
        instructions::transfer_item::transfer_item(ctx)
    }

    pub fn recognize_fees(ctx: Context<RecognizeFees>) -> Result<u64> {
        instructions::recognize_fees::recognize_fees(ctx)
    }

    pub fn quote_pending(ctx: Context<QuotePending>) -> Result<u64> {
        instructions::quote_pending::quote_pending(ctx)
    }

    pub fn claim(ctx: Context<Claim>) -> Result<u64> {
        instructions::claim::claim(ctx)
    }

    pub fn withdraw_reserve(ctx: Context<WithdrawReserve>) -> Result<u64> {
        instructions::withdraw_reserve::withdraw_reserve(ctx)
    }

    pub fn set_operator(ctx: Context<SetOperator>, new_operator: Pubkey) -> Result<()> {
        instructions::set_operator::set_operator(ctx, new_operator)
    }
}
