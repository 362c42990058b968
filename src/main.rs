//! Routedefs - route table and path resolution for a code review web app

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use routedefs::route::pattern;
use routedefs::{Config, Field, Resolver, RouteName, RouteParameters};

/// Route table and path resolution for a code review web app
#[derive(Parser)]
#[command(name = "routedefs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a route into a URL path
    Resolve {
        /// Route name, e.g. repository-view
        route: String,

        #[command(flatten)]
        params: ParamArgs,
    },
    /// List routes and the fields they read
    Routes,
    /// Print the path-pattern table
    Patterns {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check the pattern table against the resolver
    Check,
    /// Show the effective configuration
    Config {
        /// Print the config file path instead
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args)]
struct ParamArgs {
    /// Space name
    #[arg(long)]
    space_name: Option<String>,
    /// Repository path, space/repo
    #[arg(long)]
    repository_path: Option<String>,
    /// Branch, tag or commit
    #[arg(long)]
    git_reference: Option<String>,
    /// File or directory inside the repository
    #[arg(long)]
    resource_path: Option<String>,
    /// Reference the commit history starts from
    #[arg(long)]
    commit_reference: Option<String>,
    /// Branch name
    #[arg(long)]
    branch_name: Option<String>,
    /// base...head reference pair
    #[arg(long)]
    diff_reference_pair: Option<String>,
    /// Pull request number
    #[arg(long)]
    pull_request_id: Option<String>,
    /// Pull request tab
    #[arg(long)]
    pull_request_section: Option<String>,
    /// Webhook identifier
    #[arg(long)]
    webhook_id: Option<String>,
}

impl From<ParamArgs> for RouteParameters {
    fn from(args: ParamArgs) -> Self {
        Self {
            space_name: args.space_name,
            repository_path: args.repository_path,
            git_reference: args.git_reference,
            resource_path: args.resource_path,
            commit_reference: args.commit_reference,
            branch_name: args.branch_name,
            diff_reference_pair: args.diff_reference_pair,
            pull_request_id: args.pull_request_id,
            pull_request_section: args.pull_request_section,
            webhook_id: args.webhook_id,
        }
    }
}

fn main() -> Result<()> {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            // For actual errors, show error + help
            eprintln!("error: {}\n", e.kind());
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Resolve { route, params } => cmd_resolve(&route, params.into()),
        Commands::Routes => {
            cmd_routes();
            Ok(())
        }
        Commands::Patterns { json } => cmd_patterns(json),
        Commands::Check => {
            cmd_check();
            Ok(())
        }
        Commands::Config { path } => cmd_config(path),
    }
}

/// Log to the temp dir - tail with: tail -f /tmp/routedefs.log
/// Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
fn init_logging() {
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level == 0 {
        return;
    }

    let level = match debug_level {
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    let log_path = routedefs::paths::log_path();
    if let (Some(directory), Some(file_name)) = (log_path.parent(), log_path.file_name()) {
        let file_appender = tracing_appender::rolling::never(directory, file_name);
        tracing_subscriber::fmt()
            .with_writer(file_appender)
            .with_max_level(level)
            .with_ansi(false)
            .init();
    }
}

fn cmd_resolve(route: &str, params: RouteParameters) -> Result<()> {
    let route: RouteName = route.parse()?;
    let config = Config::load()?;
    let resolver = Resolver::new(&config);
    let path = resolver
        .resolve(route, &params)
        .with_context(|| format!("Failed to resolve {route}"))?;
    println!("{path}");
    Ok(())
}

fn join_fields(fields: &[Field]) -> String {
    if fields.is_empty() {
        return "-".to_string();
    }
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn cmd_routes() {
    for route in RouteName::ALL {
        println!(
            "{:<24} required: {:<50} optional: {}",
            route.as_str(),
            join_fields(route.required_fields()),
            join_fields(route.optional_fields())
        );
    }
}

fn cmd_patterns(json: bool) -> Result<()> {
    let table = pattern::table()?;
    if json {
        let contents =
            serde_json::to_string_pretty(&table).context("Failed to serialize pattern table")?;
        println!("{contents}");
        return Ok(());
    }

    for entry in &table {
        for pattern in &entry.patterns {
            println!("{:<24} {pattern}", entry.route.as_str());
        }
    }
    Ok(())
}

fn cmd_check() {
    let report = routedefs::check_consistency();
    if report.is_consistent() {
        println!(
            "Pattern table consistent ({} patterns)",
            report.checked_patterns
        );
        return;
    }

    for violation in &report.violations {
        eprintln!("{violation}");
    }
    eprintln!(
        "{} violation(s) in {} patterns",
        report.violations.len(),
        report.checked_patterns
    );
    std::process::exit(1);
}

fn cmd_config(path: bool) -> Result<()> {
    if path {
        println!("{}", Config::default_path().display());
        return Ok(());
    }

    let config = Config::load()?;
    let contents = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("{contents}");
    Ok(())
}
