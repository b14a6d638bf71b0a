use crate::reports;
use clap::Args;
use saasi::config::Config;
use saasi::progress::unlock::Phase;
use saasi::session::Session;
use saasi::storage::JsonFileStore;
use std::process;

#[derive(Args, Debug, Clone)]
pub struct SeedArgs {
    #[command(flatten)]
    pub config: Config,

    /// Phase to open directly; everything before it is synthesized.
    #[arg(long, default_value_t = 4)]
    pub upto: u8,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: SeedArgs, store: JsonFileStore) {
    let target = match Phase::from_number(args.upto) {
        Some(p) => p,
        None => {
            eprintln!("❌ '--upto {}' is not a phase (expected 1-4)", args.upto);
            process::exit(1);
        }
    };

    let mut session = Session::new(Box::new(store), &args.config);
    let generated = session.direct_access(target, args.seed);

    println!(
        "\n🎯 Opened phase {} ({}) directly",
        target.number(),
        target.title()
    );
    if generated.is_empty() {
        println!("No prior phases needed seeding.");
    } else {
        reports::print_generated(&generated);
    }
}
