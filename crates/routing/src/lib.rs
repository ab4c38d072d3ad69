pub mod client;
pub mod comparison;
pub mod config;
pub mod error;
pub mod protocol;

pub use client::*;
pub use comparison::*;
pub use config::*;
pub use error::*;
pub use protocol::*;
