//! Services module
//!
//! This module contains business logic and service implementations

pub mod pricing;

pub use pricing::{
    CostRange, CostResult, CostType, ModelInfo, PricingEventType, PricingService,
    PricingStatistics, PricingUpdateEvent,
};
