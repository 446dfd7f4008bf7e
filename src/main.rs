use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use when_clause::cli::{self, CheckOptions, CliError};

#[derive(ClapParser)]
#[command(name = "whenc")]
#[command(about = "whenc - evaluate, normalize and inspect when-clause context expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a when-clause against a JSON object context
    Check {
        /// The when-clause to evaluate
        expression: String,

        /// JSON context (reads from stdin if not provided)
        #[arg(short, long)]
        context: Option<String>,

        /// Report through the exit code only (0 matched, 1 not matched)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the canonical (normalized) form of a when-clause
    Normalize {
        /// The when-clause to normalize
        expression: String,

        /// Negate the expression before normalizing
        #[arg(long)]
        negate: bool,
    },

    /// List the context keys a when-clause reads, one per line
    Keys {
        /// The when-clause to inspect
        expression: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            expression,
            context,
            quiet,
        } => run_check(expression, context, quiet),
        Commands::Normalize { expression, negate } => {
            match cli::execute_normalize(&expression, negate) {
                Ok(canonical) => {
                    println!("{}", canonical);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        Commands::Keys { expression } => match cli::execute_keys(&expression) {
            Ok(keys) => {
                for key in keys {
                    println!("{}", key);
                }
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(2);
    }
}

fn run_check(expression: String, context: Option<String>, quiet: bool) -> Result<(), CliError> {
    let context = match context {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            if buffer.trim().is_empty() {
                None
            } else {
                Some(buffer)
            }
        }
        None => None,
    };

    let options = CheckOptions {
        expression,
        context,
    };

    let matched = cli::execute_check(&options)?;
    if quiet {
        if !matched {
            std::process::exit(1);
        }
    } else {
        println!("{}", matched);
    }
    Ok(())
}
