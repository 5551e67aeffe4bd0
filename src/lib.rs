//! Multi-Division Broker Platform API
//!
//! This library provides the core functionality for the broker platform
//! API: ten business divisions with lead/opportunity generation and
//! weighted match scoring, a generic five-factor matcher, a fan-out
//! division registry, and deal/revenue aggregation backed by Postgres or
//! an in-memory fixture store.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `divisions`: The ten division specs and their mock data.
//! - `errors`: Error handling types.
//! - `finance`: Shared financial math (amortization, commission).
//! - `handlers`: HTTP request handlers and the router.
//! - `matcher`: Generic five-factor opportunity matcher.
//! - `models`: Core data models.
//! - `registry`: Division registry and fan-out execution.
//! - `scoring`: Declarative division scoring interpreter.
//! - `storage`: Deal/revenue storage port (Postgres + in-memory).

pub mod config;
pub mod db;
pub mod divisions;
pub mod errors;
pub mod finance;
pub mod handlers;
pub mod matcher;
pub mod models;
pub mod registry;
pub mod scoring;
pub mod storage;
