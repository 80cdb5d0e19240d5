mod account;
mod error;
mod run;

pub use account::*;
pub use error::*;
