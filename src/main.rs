mod cli;

use std::io::{stderr, stdout, Write};
use std::panic;
use std::process::ExitCode;

use anyhow::{Context, Result};
use crossterm::{cursor::Show, execute, terminal::disable_raw_mode};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use maskline::config::Config;
use maskline::{prompt_async, PromptError};

/// Exit status for Ctrl-C, as a shell would report SIGINT
const EXIT_INTERRUPTED: u8 = 130;

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("maskline=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::WARN.as_str()))
    };

    // Logs go to stderr so stdout carries only the answer
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .init();
}

fn setup_panic_handler() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(stderr(), Show);
        original_hook(panic_info);
    }));
}

async fn run() -> Result<ExitCode> {
    let args = cli::parse_args()?;
    if args.help {
        println!("{}", cli::USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    setup_logging(args.verbose);
    setup_panic_handler();

    let config = Config::load()?;
    let options = cli::resolve_options(&args, &config)?;

    match prompt_async(args.prompt_text(), options).await {
        Ok(value) => {
            let mut stdout = stdout();
            writeln!(stdout, "{}", value).context("Failed to write answer")?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(PromptError::Interrupted) => Ok(ExitCode::from(EXIT_INTERRUPTED)),
        Err(e) => Err(e).context("Failed to read input"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("maskline: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
