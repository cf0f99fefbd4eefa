//! Pocketchat ABI crate: stable contracts shared by the host and generation engines.

pub mod backend;
pub mod token;

pub use backend::*;
pub use token::*;
