pub mod init_offset_provider;
pub mod publish_offset;
pub mod initialize;
pub mod issue;
pub mod transfer_item;
pub mod recognize_fees;
pub mod quote_pending;
pub mod claim;
pub mod withdraw_reserve;
pub mod set_operator;

pub use init_offset_provider::*;
pub use publish_offset::*;
pub use initialize::*;
pub use issue::*;
pub use transfer_item::*;
pub use recognize_fees::*;
pub use quote_pending::*;
pub use claim::*;
pub use withdraw_reserve::*;
pub use set_operator::*;
