//! Shared test fixtures for OTForge crates.
//!
//! This crate provides constraint lists, candidates and competitions for
//! testing. It depends only on `otforge-core`.
//!
//! - [`constraints`] - constraint list builders
//! - [`tableau`] - candidates, competitions and ERC patterns
//! - [`systems`] - small grammar systems with known typologies
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! otforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use otforge_test::constraints::markedness;
//! use otforge_test::systems::three_language_system;
//! ```

pub mod constraints;
pub mod systems;
pub mod tableau;

pub use constraints::{kinded, markedness};
pub use systems::{cyclic_ercs, reordered_three_language_system, three_language_system};
pub use tableau::{candidate, competition, erc};
