use std::io;
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

use benchplot::Destination;

const USAGE: &str = "usage: benchplot <json_path> [output_path]";

/// benchplot: eight-panel dashboard of test-suite refinement benchmark results.
#[derive(Parser)]
#[command(
    name = "benchplot",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BENCHPLOT_BUILD_COMMIT"), ")"),
    about
)]
struct Cli {
    /// Benchmark results JSON.
    input: Option<PathBuf>,

    /// Image to write (.png, .jpg, .bmp, .svg). Omit to open a viewer.
    output: Option<PathBuf>,

    /// Print the computed panel data as JSON instead of drawing.
    #[arg(long)]
    json: bool,

    /// Debug logging on stderr (RUST_LOG overrides).
    #[arg(short, long)]
    verbose: bool,

    /// Print shell completions for the given shell.
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "benchplot", &mut io::stdout());
        return;
    }

    init_logging(cli.verbose);

    let Some(input) = cli.input else {
        println!("{USAGE}");
        process::exit(1);
    };

    if cli.json {
        match benchplot::compute(&input) {
            Ok(dashboard) => println!(
                "{}",
                serde_json::to_string_pretty(&dashboard.data)
                    .expect("dashboard data is always serializable")
            ),
            Err(e) => fail(&e),
        }
        return;
    }

    match benchplot::generate(&input, cli.output.as_deref()) {
        Ok(dashboard) => match dashboard.destination {
            Some(Destination::Saved(path)) => {
                println!("Visualization saved to {}", path.display());
            }
            Some(Destination::Shown(path)) => {
                tracing::info!(path = %path.display(), "opened in viewer");
            }
            None => {}
        },
        Err(e) => fail(&e),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn fail(e: &benchplot::error::ReportError) -> ! {
    eprintln!("error: {e}");
    process::exit(e.exit_code());
}
