//! Program-wide constants.

/// PDA seed of the singleton collection config.
pub const COLLECTION_SEED: &[u8] = b"collection";
/// PDA seed of the fee ledger, suffixed by the collection key.
pub const LEDGER_SEED: &[u8] = b"fee_ledger";
/// PDA seed of the payment-token vault, suffixed by the collection key.
pub const VAULT_SEED: &[u8] = b"vault";
/// PDA seed of a holder record: `[HOLDER_SEED, collection, wallet]`.
pub const HOLDER_SEED: &[u8] = b"holder";
/// PDA seed of an item: `[ITEM_SEED, collection, public_id_le]`.
pub const ITEM_SEED: &[u8] = b"item";
/// PDA seed of an offset provider: `[OFFSET_PROVIDER_SEED, authority]`.
pub const OFFSET_PROVIDER_SEED: &[u8] = b"offset_provider";

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Default vesting window of a recognized deposit.
pub const DEFAULT_VESTING_WINDOW_SECS: i64 = 31 * SECONDS_PER_DAY;

/// Default holder share of every recognized deposit (50%).
pub const DEFAULT_HOLDER_SHARE_BPS: u16 = 5_000;

/// Basis-point denominator.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Fixed-point scale of the distribution index (value per unit of holding).
pub const INDEX_PRECISION: u128 = 1_000_000_000_000;

/// Max unmatured deposits kept in the ledger at once.
pub const MAX_ACTIVE_DEPOSITS: usize = 64;

/// Recognitions are grouped into buckets of this length; a deposit starts
/// vesting at the end of its bucket, so one bucket holds one deposit.
pub const DEPOSIT_BUCKET_SECS: i64 = SECONDS_PER_DAY;

/// Longest vesting window: an open interval of `window + bucket` seconds
/// holds at most `MAX_ACTIVE_DEPOSITS` bucket starts.
pub const MAX_VESTING_WINDOW_SECS: i64 = (MAX_ACTIVE_DEPOSITS as i64 - 1) * DEPOSIT_BUCKET_SECS;

/// Upper bound for the configured per-call issuance count.
pub const MAX_BATCH_LIMIT: u8 = 20;
