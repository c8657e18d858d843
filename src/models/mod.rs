pub mod constants;
pub mod contact;
pub mod deal;
pub mod filter;
