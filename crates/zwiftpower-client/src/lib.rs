//! ZwiftPower results API and event page client.

mod client;
mod error;
mod types;

pub use client::{extract_title, ZwiftPowerClient, UNKNOWN_EVENT_TITLE};
pub use error::ZwiftPowerError;
pub use types::*;
