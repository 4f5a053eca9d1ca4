pub mod math;
pub mod time;
pub mod vesting;
