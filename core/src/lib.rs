//! Raffler core: random draws, saved raffles and the preferences that
//! drive the screens.

pub mod app;
pub mod assets;
pub mod config;
pub mod custom_raffle;
pub mod device;
pub mod draw;
pub mod error;
pub mod preferences;
pub mod presentation;
pub mod quick_decision;
pub mod rng;
pub mod store;
pub mod types;

pub use app::Raffler;
pub use error::{RaffleError, RaffleResult};
