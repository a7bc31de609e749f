//! AI and Model utilities
//!
//! This module provides token management, model support detection, and AI-related utilities.

pub mod cache;
pub mod counter;
pub mod models;
pub mod tokens;

// Re-export commonly used types and functions
pub use cache::*;
pub use counter::TokenCounter;
pub use models::{ModelCapabilities, ModelUtils};
pub use tokens::{TokenUsage, TokenUtils, TokenizerType};
