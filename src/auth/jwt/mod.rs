//! JWT token handling
//!
//! This module provides JWT token creation, verification, and management.

mod handler;
mod tokens;
mod types;
mod utils;

#[cfg(test)]
mod tests;

// Re-export public types and the handler
pub use types::{Claims, JwtHandler, TokenPair, TokenType};
