mod cache;
mod error;
mod model;
mod resolver;
mod store;

pub use error::*;
pub use model::*;
pub use resolver::*;
pub use store::*;
