//! datafilter — render filter trees to SQL
//!
//! # Usage
//!
//! ```bash
//! # Parameterized SQL from a JSON filter
//! datafilter render filter.json
//!
//! # Inline literals, indented
//! echo '{"field":"id","op":"=","val":1}' | datafilter render --inline --indent 2
//!
//! # Combine filters
//! datafilter join --logic or a.json b.json
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use datafilter::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "datafilter")]
#[command(version)]
#[command(about = "Render JSON filter trees to SQL WHERE fragments", long_about = None)]
#[command(after_help = "EXAMPLES:
    datafilter render filter.json
    datafilter render --inline --indent 2 < filter.json
    datafilter join --logic or a.json b.json")]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a filter to SQL
    Render {
        /// Filter JSON file (stdin when omitted)
        file: Option<PathBuf>,

        /// Spaces per nesting level
        #[arg(long)]
        indent: Option<usize>,

        /// Write values into the SQL instead of $N placeholders
        #[arg(long)]
        inline: bool,

        /// Number of the first placeholder
        #[arg(long)]
        start: Option<usize>,

        /// Quote identifiers ("table"."column")
        #[arg(long)]
        quote: bool,

        /// Print {"sql", "values"} as JSON
        #[arg(long)]
        json: bool,

        /// Render config file (TOML)
        #[arg(long, env = "DATAFILTER_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Join several filters under one group and print the result
    Join {
        /// Group logic
        #[arg(long, default_value = "and")]
        logic: Logic,

        /// Filter JSON files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Pretty-print the joined filter
        #[arg(long)]
        pretty: bool,
    },
    /// Validate a filter and summarise it
    Check {
        /// Filter JSON file (stdin when omitted)
        file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            file,
            indent,
            inline,
            start,
            quote,
            json,
            config,
        } => {
            let overrides = RenderOverrides {
                indent,
                inline,
                start,
                quote,
            };
            render(file.as_deref(), config.as_deref(), &overrides, json)
        }
        Commands::Join {
            logic,
            files,
            pretty,
        } => join(logic, &files, pretty),
        Commands::Check { file } => check(file.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("DATAFILTER_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct RenderOverrides {
    indent: Option<usize>,
    inline: bool,
    start: Option<usize>,
    quote: bool,
}

fn render(
    file: Option<&Path>,
    config: Option<&Path>,
    overrides: &RenderOverrides,
    as_json: bool,
) -> anyhow::Result<()> {
    let mut config = RenderConfig::load(config).context("Failed to load render config")?;
    if let Some(indent) = overrides.indent {
        config.indentation = indent;
    }
    if let Some(start) = overrides.start {
        config.parameter_start_index = start;
    }
    if overrides.inline {
        config.use_parameters = false;
    }
    if overrides.quote {
        config.quote_identifiers = true;
    }
    config.validate()?;

    let filter = read_filter(file)?;
    let output = filter.to_sql(&config.to_options())?;

    if as_json {
        let body = match &output {
            SqlOutput::Parameterized(p) => serde_json::to_string_pretty(p)?,
            SqlOutput::Inline(sql) => serde_json::to_string_pretty(&ParameterizedSql {
                sql: sql.clone(),
                values: Vec::new(),
            })?,
        };
        println!("{}", body);
        return Ok(());
    }

    match output.sql() {
        Some(sql) => println!("{}", sql.white()),
        None => println!("{}", "(no filter)".dimmed()),
    }

    if !output.values().is_empty() {
        println!();
        println!("{}", "Bindings:".cyan());
        for (i, value) in output.values().iter().enumerate() {
            let json = serde_json::to_string(value)?;
            println!("  ${} = {}", config.parameter_start_index + i, json.yellow());
        }
    }
    Ok(())
}

fn join(logic: Logic, files: &[PathBuf], pretty: bool) -> anyhow::Result<()> {
    let filters = files
        .iter()
        .map(|path| read_filter(Some(path)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let joined = join_filters(logic, &filters);
    let json = if pretty {
        joined.to_json_pretty()?
    } else {
        joined.to_json()?
    };
    println!("{}", json);
    Ok(())
}

fn check(file: Option<&Path>) -> anyhow::Result<()> {
    let filter = read_filter(file)?;
    let Some(root) = filter.value() else {
        println!("{} {}", "✓".green(), "empty filter (null)".dimmed());
        return Ok(());
    };

    // Catches operator/value shape errors.
    filter.to_sql_inline(&ToSqlOptions::new())?;

    println!("{} valid filter", "✓".green());
    println!("  {} {}", "Leaves:".dimmed(), root.leaf_count().to_string().cyan());
    println!("  {} {}", "Depth:".dimmed(), root.depth().to_string().cyan());
    Ok(())
}

fn read_filter(file: Option<&Path>) -> anyhow::Result<DataFilter> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    let source = file.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
    DataFilter::from_json(&content).with_context(|| format!("Invalid filter JSON in {}", source))
}
