//! Match-3 (workspace facade crate).
//!
//! Re-exports the `crates/` members under one roof so tools and tests can
//! reach everything through `match3::{core, engine, types}`.

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;

pub mod sim;
