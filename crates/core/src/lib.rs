//! # Mailing Core
//!
//! Domain types, validation rules and services for the mailing backend.
//!
//! Persistence is reached only through the traits in [`repository`]; the
//! `mailing-db` crate provides the PostgreSQL implementation and [`mock`]
//! provides `mockall` doubles for tests.

pub mod errors;
pub mod mock;
pub mod models;
pub mod repository;
pub mod services;
