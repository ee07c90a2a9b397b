//! CLI argument parsing and option resolution
//!
//! Handles command-line argument parsing and layering of config file,
//! environment, and flags into one set of prompt options.

use std::env;

use anyhow::{bail, Context, Result};

use maskline::config::Config;
use maskline::options::{Mask, OutputTarget, PromptOptions};

const DEFAULT_PROMPT: &str = "Password: ";

pub const USAGE: &str = "\
Usage: maskline [PROMPT] [OPTIONS]

Read one line from the terminal without echoing it, and print it to stdout.

Options:
  -m, --mask <C>       Echo C for each typed character (default: *)
      --no-mask        Echo typed characters as-is
      --hidden         Echo nothing
  -d, --default <V>    Value used when the line is left empty
  -r, --required       Refuse empty lines even when a default is set
  -e, --stderr         Write the prompt to stderr (default)
      --stdout         Write the prompt to stdout, mixed with the answer
  -v, --verbose        Debug logging to stderr
  -h, --help           Show this help";

/// Parsed command-line arguments
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub prompt: Option<String>,
    /// Options given explicitly on the command line
    pub options: PromptOptions,
    pub verbose: bool,
    pub help: bool,
}

impl Args {
    pub fn prompt_text(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }
}

/// Parse command-line arguments from the process environment
pub fn parse_args() -> Result<Args> {
    parse_args_from(env::args().skip(1)) // Skip the binary name
}

/// Parse command-line arguments, excluding the binary name
pub fn parse_args_from<I>(iter: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args::default();
    let mut iter = iter.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-m" | "--mask" => {
                let value = iter.next().context("--mask needs a value")?;
                match Mask::parse(&value) {
                    Some(mask) => args.options.mask = Some(mask),
                    None => bail!("--mask must be a single character, got {:?}", value),
                }
            }
            "--no-mask" => {
                args.options.mask = Some(Mask::None);
            }
            "--hidden" => {
                args.options.mask = Some(Mask::Hidden);
            }
            "-d" | "--default" => {
                let value = iter.next().context("--default needs a value")?;
                args.options.default = Some(value);
            }
            "-r" | "--required" => {
                args.options.required = Some(true);
            }
            "-e" | "--stderr" => {
                args.options.output = Some(OutputTarget::Stderr);
            }
            "--stdout" => {
                args.options.output = Some(OutputTarget::Stdout);
            }
            "-v" | "--verbose" => {
                args.verbose = true;
            }
            "-h" | "--help" => {
                args.help = true;
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                bail!("Unknown option: {}", arg);
            }
            _ => {
                if args.prompt.is_some() {
                    bail!("Unexpected argument: {}", arg);
                }
                args.prompt = Some(arg);
            }
        }
    }

    Ok(args)
}

/// Resolve options from config file, then env var, then explicit flags
///
/// The prompt goes to stderr unless something asks for stdout, so stdout
/// carries only the answer.
pub fn resolve_options(args: &Args, config: &Config) -> Result<PromptOptions> {
    let mut options = config.prompt_options();

    if let Ok(env_mask) = env::var("MASKLINE_MASK") {
        match Mask::parse(&env_mask) {
            Some(mask) => options.mask = Some(mask),
            None => bail!("MASKLINE_MASK must be a single character, got {:?}", env_mask),
        }
    }

    options.merge(&args.options);
    options.output.get_or_insert(OutputTarget::Stderr);
    Ok(options)
}
