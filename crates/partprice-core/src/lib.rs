//! # partprice core
//!
//! Pure pricing logic for partprice: the dotted-path attribute accessor,
//! the component type tag, and the per-type price calculator.
//!
//! This crate has no tokio, sqlx, filesystem, or network dependencies.
//! Every function is a pure computation over an already-resolved
//! attribute record, so it can be called from any number of concurrent
//! requests without coordination.
//!
//! ```rust
//! use partprice_core::pricing::price;
//! use serde_json::json;
//!
//! assert_eq!(price("CPU", &json!({})), 340.0);
//! assert_eq!(price("Toaster", &json!({"slots": 4})), 150.0);
//! ```

pub mod attrs;
pub mod component;
pub mod pricing;

pub use component::ComponentType;
pub use pricing::{price, price_for, PriceBounds};
