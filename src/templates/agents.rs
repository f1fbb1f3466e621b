//! The shared `AGENTS.md` instructions file.
//!
//! It lives at the top of the template root and is synced into workspaces
//! like any other general template.

use super::catalog::TemplateCatalog;
use crate::error::Result;

/// File name of the agent instructions template.
pub const AGENTS_FILE: &str = "AGENTS.md";

/// Read `AGENTS.md` from the template root; empty when absent.
pub async fn load_agents(catalog: &TemplateCatalog) -> Result<String> {
    let path = catalog.source_path(AGENTS_FILE).await?;
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

/// Replace `AGENTS.md` in the template root.
pub async fn save_agents(catalog: &TemplateCatalog, content: &str) -> Result<()> {
    let path = catalog.source_path(AGENTS_FILE).await?;
    tokio::fs::write(&path, content).await?;
    tracing::info!("Saved {}", path.display());
    Ok(())
}
