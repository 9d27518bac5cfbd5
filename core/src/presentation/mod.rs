//! Screen state holders.
//!
//! Each view model owns its observable state. Storage and draw work runs
//! through a `Dispatcher` and is awaited before any state is republished,
//! so observers never see a half-applied update.

use crate::error::{RaffleError, RaffleResult};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

pub mod custom_raffle;
pub mod lottery;
pub mod messages;
pub mod preferences;
pub mod quick_decision;
mod validation;

pub use messages::Messages;

/// Where a screen is in its validate/dispatch cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScreenPhase {
    #[default]
    Idle,
    Validating,
    ValidationFailed,
    Dispatching,
    Succeeded,
    Failed,
}

/// A single observable value. `None` until the first publish.
pub struct Observable<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T: Clone> Observable<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn publish(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    /// Latest published value, if any.
    pub fn current(&self) -> Option<T> {
        self.tx.borrow().clone()
    }

    pub fn has_value(&self) -> bool {
        self.tx.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs storage and engine work off the caller's task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dispatcher {
    /// `tokio::task::spawn_blocking`.
    #[default]
    Background,
    /// Run on the calling task. Used where no blocking pool is wanted.
    Inline,
}

impl Dispatcher {
    pub async fn in_background<F, T>(&self, work: F) -> RaffleResult<T>
    where
        F: FnOnce() -> RaffleResult<T> + Send + 'static,
        T: Send + 'static,
    {
        match self {
            Self::Background => tokio::task::spawn_blocking(work)
                .await
                .map_err(|e| RaffleError::Dispatch(e.to_string()))?,
            Self::Inline => work(),
        }
    }
}
