//! The process-wide coordinator.
//!
//! Installed once during application bootstrap; everything after that grabs it
//! with [`global`] or receives a cloned [`LoadingHandle`] directly.

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, LoaderConfig};
use crate::coordinator::LoadingHandle;

static COORDINATOR: OnceCell<LoadingHandle> = OnceCell::new();

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("loading coordinator is already installed")]
    AlreadyInstalled,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Creates the global coordinator. Fails if one already exists.
pub fn install(config: &LoaderConfig) -> Result<LoadingHandle, CoordinatorError> {
    config.validate()?;

    let mut created = false;
    let handle = COORDINATOR.get_or_init(|| {
        created = true;
        LoadingHandle::new(config)
    });
    if !created {
        return Err(CoordinatorError::AlreadyInstalled);
    }

    info!(
        tick_interval_ms = config.tick_interval_ms,
        fade_delay_ms = config.fade_delay_ms,
        "loading coordinator installed"
    );
    Ok(handle.clone())
}

/// The installed coordinator, if bootstrap has run.
pub fn global() -> Option<LoadingHandle> {
    COORDINATOR.get().cloned()
}
