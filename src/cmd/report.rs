use crate::reports;
use clap::Args;
use saasi::config::Config;
use saasi::progress::narrative::narrative;
use saasi::progress::unlock::UnlockThresholds;
use saasi::progress::{aggregate, overall_level};
use saasi::storage::{JsonFileStore, ResultStore};
use serde_json::json;

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub config: Config,

    /// Emit the summary as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: ReportArgs, store: JsonFileStore) {
    let history = store.history();
    let summary = aggregate(&history);
    let level = overall_level(summary.total_score, summary.completed_phases);
    let thresholds = UnlockThresholds::from_params(&args.config.gates);

    if args.json {
        let payload = json!({
            "summary": summary,
            "level": level,
            "journey": narrative(&history),
        });
        println!("{}", serde_json::to_string_pretty(&payload).unwrap());
        return;
    }

    reports::print_progress_report(&history, &summary, &level, &thresholds);
    println!("\n{}\n", narrative(&history));
}
