//! CRM backend library.
//!
//! Exposes the query/mutation API over customers, products, and orders as
//! a library so the binary, the CLI, and the integration tests share one
//! implementation.
//!
//! # Layers
//!
//! - [`db`] - repositories over `PostgreSQL` (the Entity Store)
//! - [`services`] - validation and mutation workflows, envelope types
//! - [`routes`] - thin axum JSON handlers
//! - [`models`] / [`config`] / [`state`] / [`error`] - supporting pieces

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
