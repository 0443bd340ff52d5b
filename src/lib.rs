//! # partprice
//!
//! A small HTTP service that looks up a hardware component by type and name
//! and returns a computed price.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────┐   ┌──────────┐   ┌────────────────┐
//! │ specs/*.json│──▶│  Seeder  │──▶│  SQLite  │──▶│ Lookup + Price │
//! └─────────────┘   └──────────┘   └──────────┘   └───────┬────────┘
//!                                                         │
//!                                          ┌──────────────┤
//!                                          ▼              ▼
//!                                     ┌─────────┐   ┌──────────┐
//!                                     │   CLI   │   │   HTTP   │
//!                                     └─────────┘   └──────────┘
//! ```
//!
//! The pricing formulas themselves live in the `partprice-core` crate,
//! which is pure and has no I/O. This crate stores attribute records,
//! resolves (type, name) pairs, and serves the results.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema creation |
//! | [`models`] | Spec items, stored records, price quotes |
//! | [`seed`] | First-run load from spec files |
//! | [`lookup`] | (type, name) resolution and pricing |
//! | [`estimate`] | Price a spec file without the database |
//! | [`server`] | HTTP server |

pub mod config;
pub mod db;
pub mod estimate;
pub mod lookup;
pub mod migrate;
pub mod models;
pub mod seed;
pub mod server;
