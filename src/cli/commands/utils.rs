//! Shared utilities for CLI commands

use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::store::Store;
use crate::core::Home;

/// Resolve the household for a command, honoring `--home`/`LARDER_HOME`.
pub fn resolve_home(global: &GlobalOpts) -> Result<Home> {
    Home::resolve(global.home.as_deref()).map_err(|e| miette::miette!("{}", e))
}

/// Resolve the household and open its store.
pub fn open_store(global: &GlobalOpts) -> Result<(Home, Store)> {
    let home = resolve_home(global)?;
    let store = Store::open(&home).map_err(|e| miette::miette!("{}", e))?;
    Ok((home, store))
}
