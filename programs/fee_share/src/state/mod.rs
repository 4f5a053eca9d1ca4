pub mod collection;
pub mod fee_ledger;
pub mod holder_account;
pub mod item;
pub mod offset_provider;

pub use collection::*;
pub use fee_ledger::*;
pub use holder_account::*;
pub use item::*;
pub use offset_provider::*;
