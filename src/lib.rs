//! carepot - event and state store for a pill dispenser and cooking pot
//!
//! The service records:
//! - pill dispense history and the dispense schedule
//! - motion sensor events
//! - recipes, their steps, and which step the pot is currently on
//!
//! Everything lives in one SQLite file and is exposed over a small JSON API.

pub mod api;
pub mod config;
pub mod error;
pub mod instructions;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
