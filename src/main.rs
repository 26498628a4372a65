use chrono_tz::Tz;
use clap::Parser;
use food_fight::commands::{self, Command};
use food_fight::config::{Config, DEFAULT_DATA_PATH, DEFAULT_SITE_DIR, DEFAULT_TIMEZONE};
use food_fight::db::JsonFileStore;
use log::{debug, error};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "food-fight", about = "Run food fights and render the results page")]
struct Cli {
    /// Path to the fights document.
    #[arg(long, global = true, default_value = DEFAULT_DATA_PATH, env = "FOOD_FIGHT_DATA")]
    data: PathBuf,

    /// Directory the results page is written to.
    #[arg(long, global = true, default_value = DEFAULT_SITE_DIR, env = "FOOD_FIGHT_SITE_DIR")]
    site_dir: PathBuf,

    /// IANA timezone used when displaying timestamps.
    #[arg(long, global = true, default_value = DEFAULT_TIMEZONE, env = "FOOD_FIGHT_TIMEZONE")]
    timezone: Tz,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::new(cli.data, cli.site_dir, cli.timezone);
    debug!("Using {:?}", config);

    let store = JsonFileStore::new(&config.data_path);

    match commands::handle_command(&store, &config, &cli.command).await {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
