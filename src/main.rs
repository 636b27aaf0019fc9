use clap::{ArgAction, Parser as ClapParser, Subcommand};
use kaql::cli::{self, CheckResult, CliError, ParseOptions};
use std::io::{self, Read};
use tracing::Level;

#[derive(ClapParser)]
#[command(name = "kaql")]
#[command(about = "KaQL - A small boolean filter expression language")]
#[command(version)]
struct Cli {
    /// Log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a filter
    Check {
        /// The filter (reads from stdin if not provided)
        query: Option<String>,
    },

    /// Parse a filter and print it fully parenthesized
    Parse {
        /// The filter (reads from stdin if not provided)
        query: Option<String>,

        /// Print the syntax tree instead
        #[arg(long)]
        tree: bool,
    },

    /// Print the tokens of a filter
    Tokens {
        /// The filter (reads from stdin if not provided)
        query: Option<String>,
    },

    /// List documentation topics
    Docs,

    /// Show documentation for a specific topic
    Doc {
        /// Topic name (use 'kaql docs' to list topics)
        topic: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_subscriber(cli.verbose);

    let result = match cli.command {
        Commands::Check { query } => run_check(query),
        Commands::Parse { query, tree } => run_parse(query, tree),
        Commands::Tokens { query } => read_query(query).map(|query| {
            print!("{}", cli::execute_tokens(&query));
        }),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { topic } => cli::get_doc_topic(&topic).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_subscriber(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to install log subscriber");
    }
}

/// Take the query from the argument, or from stdin when it is piped
fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            // Newlines are not whitespace in the language
            Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
        }
        None => Err(CliError::NoQuery),
    }
}

fn run_check(query: Option<String>) -> Result<(), CliError> {
    let query = read_query(query)?;

    match cli::execute_check(&query)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Empty => println!("Empty query"),
    }
    Ok(())
}

fn run_parse(query: Option<String>, tree: bool) -> Result<(), CliError> {
    let options = ParseOptions {
        query: read_query(query)?,
        tree,
    };

    println!("{}", cli::execute_parse(&options)?);
    Ok(())
}
