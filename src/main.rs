use clap::{Parser as ClapParser, Subcommand};
use ctxq::cli::{self, CliError, FilterOptions};
use ctxq::output;
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "ctxq")]
#[command(about = "ctxq - Filter nodes of a hierarchical context tree with a small query language")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the syntax of a query
    Check {
        /// The query to validate
        query: String,
    },

    /// Dump the token sequence of a query
    Tokens {
        /// The query to tokenize
        query: String,
    },

    /// Evaluate a query against a context tree and print the matching uids
    Filter {
        /// The query to evaluate
        query: String,

        /// Context tree as JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Also print the ancestor keys to open so matches are visible
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let (query, result) = match cli.command {
        Commands::Check { query } => {
            let result = cli::execute_check(&query).map(|_| println!("Syntax is valid"));
            (query, result)
        }
        Commands::Tokens { query } => {
            let result = cli::execute_tokens(&query).map(|tokens| {
                for token in tokens {
                    println!("{:>4}  {:<10}  {}", token.position, token.kind, token.lexeme);
                }
            });
            (query, result)
        }
        Commands::Filter {
            query,
            input,
            pretty,
            open,
        } => {
            let result = run_filter(query.clone(), input, pretty, open);
            (query, result)
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        if let Some(position) = e.position() {
            eprintln!("{}", output::caret_diagnostic(&query, position));
        }
        std::process::exit(1);
    }
}

fn run_filter(
    query: String,
    input: Option<String>,
    pretty: bool,
    open_keys: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = FilterOptions {
        query,
        input,
        open_keys,
    };

    let result = cli::execute_filter(&options)?;
    let json = if pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .map_err(CliError::Json)?;
    println!("{}", json);
    Ok(())
}
