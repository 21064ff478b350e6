use clap::{Parser as ClapParser, Subcommand};
use json_linq::cli::{self, CheckOptions, CheckResult, CliError};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "jlinq")]
#[command(about = "jlinq - Filter JSON arrays with LINQ-style queries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and execute a query
    Check {
        /// The query to execute, e.g. 'this.Where(x => x.age >= 18)'
        query: String,

        /// JSON array input (reads from stdin if neither this nor --file is given)
        #[arg(short, long, conflicts_with = "file")]
        input: Option<String>,

        /// Read the JSON array from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print single-line JSON
        #[arg(short, long)]
        compact: bool,

        /// Only validate syntax, don't execute
        #[arg(long)]
        syntax_only: bool,

        /// Print the parsed query tree instead of executing
        #[arg(long, conflicts_with = "syntax_only")]
        show_ast: bool,
    },

    /// Show documentation, optionally for one topic
    Docs {
        /// Topic name (syntax, operators, semantics)
        topic: Option<String>,
    },
}

fn main() {
    // RUST_LOG=json_linq=debug shows each stage
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("json_linq=warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            query,
            input,
            file,
            compact,
            syntax_only,
            show_ast,
        } => run_check(query, input, file, compact, syntax_only, show_ast),
        Commands::Docs { topic: None } => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Docs { topic: Some(topic) } => cli::get_doc_topic(&topic).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    query: String,
    input: Option<String>,
    file: Option<PathBuf>,
    compact: bool,
    syntax_only: bool,
    show_ast: bool,
) -> Result<(), CliError> {
    let input = match (input, file) {
        (Some(s), _) => Some(s),
        (None, Some(path)) => Some(fs::read_to_string(path)?),
        (None, None) if !syntax_only && !show_ast && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        (None, None) => None,
    };

    let options = CheckOptions {
        query,
        input,
        compact,
        syntax_only,
        show_ast,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Ast(expr) => println!("{:#?}", expr),
        CheckResult::Success(output) => println!("{}", output),
    }
    Ok(())
}
