// crates/gatehouse-lib/src/handlers/mod.rs

//! HTTP request handlers.

pub mod auth;
