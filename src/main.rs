// ===== saasi/src/main.rs =====
use clap::{Parser, Subcommand};
use saasi::storage::JsonFileStore;
use tracing::Level;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the persisted session (one JSON file per phase).
    #[arg(global = true, short, long, default_value = "data/session")]
    store: String,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Report(cmd::report::ReportArgs),
    Seed(cmd::seed::SeedArgs),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::WARN })
        .init();

    let store = JsonFileStore::new(&cli.store);

    match cli.command {
        Commands::Report(args) => cmd::report::run(args, store),
        Commands::Seed(args) => cmd::seed::run(args, store),
    }
}
