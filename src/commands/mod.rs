pub mod fight;

use clap::Subcommand;

use crate::config::Config;
use crate::db::FightStore;
use crate::error::AppError;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start a new fight, archiving the current one.
    #[command(name = "new-fight")]
    NewFight {
        food_a: String,
        food_b: String,
    },

    /// Record (or change) a vote in the current fight.
    Vote {
        voter_id: String,
        choice: String,
    },

    /// Write the static results page.
    Render,

    /// Print the current fight's standings.
    Status,
}

// Each invocation is one load, at most one mutation, and one save. Returns
// the line to print on success.
pub async fn handle_command(
    store: &dyn FightStore,
    config: &Config,
    command: &Command,
) -> Result<String, AppError> {
    match command {
        Command::NewFight { food_a, food_b } => fight::handle_new_fight(store, food_a, food_b).await,
        Command::Vote { voter_id, choice } => fight::handle_vote(store, voter_id, choice).await,
        Command::Render => fight::handle_render(store, config).await,
        Command::Status => fight::handle_status(store, config).await,
    }
}
