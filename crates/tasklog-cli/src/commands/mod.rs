pub mod add;
pub mod list;
pub mod schema;
pub mod shared;
pub mod summarize;

use tasklog_config::TasklogConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: TasklogConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Summarize(args) => summarize::handle(&args, config, flags).await,
        Commands::Add(args) => add::handle(&args, &config, flags),
        Commands::List(args) => list::handle(&args, &config, flags),
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}
