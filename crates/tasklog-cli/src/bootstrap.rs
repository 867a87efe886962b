use anyhow::Context;
use tasklog_config::TasklogConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration or the file given by `--config`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TasklogConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    match &flags.config {
        Some(path) => TasklogConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => TasklogConfig::load().context("failed to load tasklog configuration"),
    }
}
