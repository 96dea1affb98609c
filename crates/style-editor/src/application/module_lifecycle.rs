//! Module lifecycle: lazy, single-flight acquisition of an engine module.
//!
//! # How it works (for beginners)
//!
//! Engines are expensive to bring up, so they are loaded on first use.  A
//! [`ModuleSlot`] tracks one engine through these states:
//!
//! ```text
//! NotLoaded ──acquire──► Loading ──ok──► Ready(engine)
//!                            │
//!                            └──err──► Unavailable(failure)
//! ```
//!
//! The first caller of [`ModuleSlot::acquire`] spawns the load on its own
//! tokio task and every caller, first or not, waits on the same
//! [`tokio::sync::watch`] channel.  The load therefore runs at most once and
//! finishes even if every waiter is cancelled.
//!
//! A failure is sticky: once a slot is `Unavailable` every later `acquire`
//! returns the same [`EngineAcquisitionFailure`] without trying again.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tracing::{info, warn};

/// An engine module could not be brought up.
///
/// Non-fatal: the features that need the module are disabled and the rest of
/// the editor keeps working.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{module} is unavailable: {reason}")]
pub struct EngineAcquisitionFailure {
    pub module: &'static str,
    pub reason: String,
}

/// Produces an engine instance.
#[async_trait]
pub trait ModuleLoader<M: ?Sized + Send + Sync>: Send + Sync {
    async fn load(&self) -> Result<Arc<M>, String>;
}

/// Observable state of a [`ModuleSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    NotLoaded,
    Loading,
    Ready,
    Unavailable,
}

type LoadResult<M> = Result<Arc<M>, EngineAcquisitionFailure>;

enum SlotState<M: ?Sized> {
    NotLoaded,
    Loading(watch::Receiver<Option<LoadResult<M>>>),
    Ready(Arc<M>),
    Unavailable(EngineAcquisitionFailure),
}

/// Lazily loaded, shared engine instance.
pub struct ModuleSlot<M: ?Sized + Send + Sync> {
    name: &'static str,
    loader: Arc<dyn ModuleLoader<M>>,
    state: Arc<Mutex<SlotState<M>>>,
}

impl<M: ?Sized + Send + Sync + 'static> ModuleSlot<M> {
    pub fn new(name: &'static str, loader: Arc<dyn ModuleLoader<M>>) -> Self {
        Self {
            name,
            loader,
            state: Arc::new(Mutex::new(SlotState::NotLoaded)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn status(&self) -> ModuleStatus {
        match &*self.state.lock().await {
            SlotState::NotLoaded => ModuleStatus::NotLoaded,
            SlotState::Loading(_) => ModuleStatus::Loading,
            SlotState::Ready(_) => ModuleStatus::Ready,
            SlotState::Unavailable(_) => ModuleStatus::Unavailable,
        }
    }

    /// The settled outcome, or `None` while not loaded or still loading.
    ///
    /// Never starts a load.
    pub async fn peek(&self) -> Option<LoadResult<M>> {
        match &*self.state.lock().await {
            SlotState::Ready(module) => Some(Ok(Arc::clone(module))),
            SlotState::Unavailable(failure) => Some(Err(failure.clone())),
            SlotState::NotLoaded | SlotState::Loading(_) => None,
        }
    }

    /// Returns the engine, loading it first if nobody has yet.
    pub async fn acquire(&self) -> LoadResult<M> {
        let mut rx = {
            let mut state = self.state.lock().await;
            match &*state {
                SlotState::Ready(module) => return Ok(Arc::clone(module)),
                SlotState::Unavailable(failure) => return Err(failure.clone()),
                SlotState::Loading(rx) => rx.clone(),
                SlotState::NotLoaded => {
                    let (tx, rx) = watch::channel(None);
                    *state = SlotState::Loading(rx.clone());
                    self.spawn_load(tx);
                    rx
                }
            }
        };

        let settled = match rx.wait_for(Option::is_some).await {
            Ok(value) => value.clone(),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| {
            Err(EngineAcquisitionFailure {
                module: self.name,
                reason: "load task ended without a result".to_string(),
            })
        })
    }

    fn spawn_load(&self, tx: watch::Sender<Option<LoadResult<M>>>) {
        let name = self.name;
        let loader = Arc::clone(&self.loader);
        let state = Arc::clone(&self.state);
        info!(module = name, "acquiring module");

        tokio::spawn(async move {
            let result = loader
                .load()
                .await
                .map_err(|reason| EngineAcquisitionFailure { module: name, reason });

            *state.lock().await = match &result {
                Ok(module) => SlotState::Ready(Arc::clone(module)),
                Err(failure) => SlotState::Unavailable(failure.clone()),
            };
            match &result {
                Ok(_) => info!(module = name, "module ready"),
                Err(failure) => warn!("{failure}"),
            }

            // No receivers left is fine: the slot state already holds the outcome.
            let _ = tx.send(Some(result));
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
