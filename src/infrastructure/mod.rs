//! Adapters that tag third-party errors with sentinels

pub mod auth;
pub mod persistence;
