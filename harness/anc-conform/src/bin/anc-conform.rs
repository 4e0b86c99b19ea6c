use anc_conform::discovery::DiscoveryOptions;
use anc_conform::suite::{execute_suite, SuiteOptions};
use clap::Parser;
use std::process::ExitCode;

#[derive(clap::Parser)]
#[command(version, about = "Run the ancc conformance suite", long_about = None)]
struct AppArgs {
    /// Only run cases whose file name contains this text.
    #[arg(long, default_value = "")]
    filter: String,

    /// Path to the compiler executable under test.
    #[arg(long, default_value_t = default_ancc())]
    ancc: String,

    /// Directory holding the `.anc` case files.
    #[arg(long, default_value = "tests/cases")]
    cases: String,
}

fn default_ancc() -> String {
    format!("bin/ancc{}", std::env::consts::EXE_SUFFIX)
}

impl From<AppArgs> for SuiteOptions {
    fn from(args: AppArgs) -> Self {
        Self {
            discovery: DiscoveryOptions::new(args.cases).with_filter(args.filter),
            ancc: args.ancc.into(),
        }
    }
}

fn main() -> miette::Result<ExitCode> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let options = SuiteOptions::from(AppArgs::parse());
    let result = execute_suite(&options, &mut std::io::stdout().lock())?;
    Ok(result.exit_code())
}
