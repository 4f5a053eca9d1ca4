use anchor_lang::prelude::*;

/// Custom error codes for the fee-share program.
#[error_code]
pub enum FeeShareError {
    #[msg("Insufficient payment for the requested item count")]
    InsufficientPayment,

    #[msg("Invalid item count (zero or above the per-call cap)")]
    InvalidCount,

    #[msg("Max item supply reached")]
    SupplyExhausted,

    #[msg("Unauthorized: operator signature required")]
    NotAuthorized,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid timestamp (clock moved backwards)")]
    InvalidTimestamp,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Too many unmatured deposits; retry after the oldest one vests")]
    DepositLedgerFull,

    #[msg("Vault balance is below the accounted amount")]
    VaultUnderfunded,

    #[msg("Numbering offset is not available yet")]
    OffsetUnavailable,

    #[msg("Numbering offset already published")]
    OffsetAlreadyPublished,

    #[msg("Item accounts do not match the issued count")]
    ItemCountMismatch,

    #[msg("Item account does not match the expected address")]
    InvalidItemAccount,

    #[msg("Signer does not own the item")]
    NotItemOwner,

    #[msg("Invalid item recipient")]
    InvalidRecipient,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,
}
