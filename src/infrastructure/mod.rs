//! Infrastructure layer - Store adapters, services and runtime plumbing

pub mod auth;
pub mod logging;
pub mod offer;
pub mod storage;
pub mod user;
