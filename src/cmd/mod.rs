pub mod account;
pub mod context;
