//! Module loaders for the built-in engines.
//!
//! The formatter loader validates every preset before reporting ready, so a
//! broken preset table surfaces as an unavailable formatter instead of a
//! failure halfway through an edit.

use std::sync::Arc;

use async_trait::async_trait;
use style_core::Preset;
use tracing::debug;

use super::{ItaniumDemangler, ReferenceFormatter};
use crate::application::module_lifecycle::ModuleLoader;
use crate::application::ports::{DemanglingEngine, FormattingEngine};

/// Loads [`ItaniumDemangler`].
#[derive(Debug, Default)]
pub struct BuiltinDemanglerLoader;

#[async_trait]
impl ModuleLoader<dyn DemanglingEngine> for BuiltinDemanglerLoader {
    async fn load(&self) -> Result<Arc<dyn DemanglingEngine>, String> {
        Ok(Arc::new(ItaniumDemangler::new()))
    }
}

/// Loads [`ReferenceFormatter`] after checking that every preset builds.
#[derive(Debug, Default)]
pub struct BuiltinFormatterLoader;

#[async_trait]
impl ModuleLoader<dyn FormattingEngine> for BuiltinFormatterLoader {
    async fn load(&self) -> Result<Arc<dyn FormattingEngine>, String> {
        let checked = tokio::task::spawn_blocking(|| {
            for preset in Preset::ALL {
                preset
                    .build()
                    .map_err(|e| format!("preset {preset} does not build: {e}"))?;
            }
            Ok::<_, String>(Preset::ALL.len())
        })
        .await
        .map_err(|e| format!("preset validation task failed: {e}"))??;
        debug!(presets = checked, "validated presets");

        Ok(Arc::new(ReferenceFormatter::new()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
