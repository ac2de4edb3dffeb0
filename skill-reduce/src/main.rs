use std::path::PathBuf;

use clap::Parser;
use skill_reduce::{load_batches, load_config, score_batches, write_records};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "skill-reduce")]
#[command(about = "Score contributor skill against gold-standard feedback")]
#[command(version)]
struct Args {
    /// Reducer config file (`{"reducer_config": {"user_skill_reducer": {...}}}`)
    #[arg(short, long)]
    config: PathBuf,

    /// Contributor batches (`[{"user_id", "extracts", "relevant_reduction"}]`)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file; results go to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> std::process::ExitCode {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout may carry the results, keep logs on stderr
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();

    info!("skill-reduce {}", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> skill_reduce::Result<()> {
    let config = load_config(&args.config)?;
    let batches = load_batches(&args.input)?;
    let records = score_batches(&config, &batches)?;
    write_records(&records, args.output.as_deref())
}
