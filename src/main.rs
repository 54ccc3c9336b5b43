mod strip;
mod watch;

use clap::Parser;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

const DEFAULT_INPUT: &str = "public/full-logo.png";
const DEFAULT_OUTPUT: &str = "public/full-logo-transparent.png";

#[derive(Parser)]
#[command(name = "bgstrip")]
#[command(about = "Makes near-white pixels transparent and trims the image to what is left", long_about = None)]
struct Args {
    /// Image to strip
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the PNG (its directory must already exist)
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Print a JSON summary of the run
    #[arg(long)]
    json: bool,

    /// Keep running and strip again whenever the input changes
    #[arg(short, long)]
    watch: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    // Start watching before the first run so an edit made meanwhile is not missed.
    let watcher = if args.watch {
        match watch::InputWatcher::new(&args.input, &args.output) {
            Ok(w) => Some(w),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let succeeded = run_once(&args);

    if let Some(watcher) = watcher {
        println!("Watching: {}", args.input.display());
        println!("Press Ctrl+C to stop...\n");
        if let Err(e) = watcher.run(|| {
            println!("Processing: {}", args.input.display());
            // Already reported; a failed run must not stop the watcher.
            let _ = run_once(&args);
        }) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    if !succeeded {
        std::process::exit(1);
    }
}

/// Strip once and report to the console. Returns whether it succeeded.
fn run_once(args: &Args) -> bool {
    let report = match strip::strip(&args.input, &args.output) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            return false;
        }
    };

    println!("Successfully removed background");
    if report.was_cropped() {
        info!(
            "trimmed {}x{} to {}x{}",
            report.source_width, report.source_height, report.width, report.height
        );
    }

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Warning: Failed to serialize report: {e}"),
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    use super::{Args, DEFAULT_INPUT, DEFAULT_OUTPUT};

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_to_logo_paths() {
        let args = Args::try_parse_from(["bgstrip"]).unwrap();

        assert_eq!(args.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(!args.json);
        assert!(!args.watch);
    }

    #[test]
    fn accepts_paths_and_flags() {
        let args =
            Args::try_parse_from(["bgstrip", "a.jpg", "out/b.png", "--json", "-w"]).unwrap();

        assert_eq!(args.input, PathBuf::from("a.jpg"));
        assert_eq!(args.output, PathBuf::from("out/b.png"));
        assert!(args.json);
        assert!(args.watch);
    }
}
