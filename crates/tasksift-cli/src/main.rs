//! Tasksift CLI - multi-attribute task search

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;
use tasksift_core::config::Config;
use tasksift_core::domain::search::{
    Composition, Predicate, SearchAttribute, SearchComposer, SearchMode, SqliteRecordStore,
};
use tasksift_core::domain::tasks::{TaskListQuery, TaskSummary};
use tasksift_core::storage::{Database, DatabaseConfig, SettingsRepository};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "tasksift")]
#[command(author, version, about = "Search tasks across comments, titles, projects and more", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database file (overrides config and TASKSIFT_DATABASE)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Verbose logging (per-attribute lookups)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Search tasks
    Search {
        /// Query value; `#<n>` selects a single task by id
        query: String,
        /// Show how each attribute contributed
        #[arg(short, long)]
        explain: bool,
    },

    /// List searchable attributes
    Attributes,

    /// Enable or disable attributes
    Toggles {
        #[command(subcommand)]
        action: ToggleAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Run health check
    Doctor,
}

#[derive(Subcommand)]
enum ToggleAction {
    /// Show stored toggle values
    List,
    /// Enable searching on attributes
    Enable {
        #[arg(required = true)]
        attributes: Vec<String>,
    },
    /// Disable searching on attributes
    Disable {
        #[arg(required = true)]
        attributes: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration
    List,
    /// Reset to defaults
    Reset,
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        report_error(&err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::from_default_env().add_directive(
        format!("tasksift={}", level)
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into()),
    );

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<tasksift_core::Error>() {
        Some(core) => {
            eprintln!("Error [{}]: {}", core.code(), core);
            if let Some(suggestion) = core.suggestion() {
                eprintln!("  Try: {}", suggestion);
            }
        }
        None => eprintln!("Error: {:#}", err),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;

    match cli.command {
        Commands::Config { action } => cmd_config(action, format),

        Commands::Doctor => cmd_doctor(cli.database).await,

        command => {
            let config = Config::load()?;
            let db = open_database(&config, cli.database).await?;
            let result = match command {
                Commands::Search { query, explain } => {
                    cmd_search(&db, &config, &query, explain, format).await
                }
                Commands::Attributes => cmd_attributes(&db, format).await,
                Commands::Toggles { action } => cmd_toggles(&db, action, format).await,
                Commands::Config { .. } | Commands::Doctor => Ok(()),
            };
            db.close().await;
            result
        }
    }
}

async fn open_database(config: &Config, database: Option<PathBuf>) -> anyhow::Result<Database> {
    let db_config = match database {
        Some(path) => {
            DatabaseConfig::with_path(path).max_connections(config.database.max_connections)
        }
        None => config.database.to_database_config(),
    };
    debug!(path = ?db_config.path, "Opening database");
    Database::new(db_config).await
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn cmd_search(
    db: &Database,
    config: &Config,
    query: &str,
    explain: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let composer = SearchComposer::new(
        Arc::new(SqliteRecordStore::new(db.pool().clone())),
        Arc::new(SettingsRepository::new(db.pool().clone())),
    )
    .with_options(config.search);

    let composition = composer.compose_detailed(query).await?;

    let mut listing = TaskListQuery::new();
    listing.filter(composition.predicate.clone());
    let tasks = listing.fetch(db.pool()).await?;

    match format {
        OutputFormat::Json => {
            let mut output = json!({
                "query": query,
                "tasks": tasks,
            });
            if explain {
                output["composition"] = serde_json::to_value(&composition)?;
            }
            print_json(&output)
        }
        OutputFormat::Text => {
            if explain {
                print_explanation(&composition);
                println!();
            }
            print_tasks(&tasks);
            Ok(())
        }
    }
}

fn print_explanation(composition: &Composition) {
    match composition.mode {
        SearchMode::IdOnly(task_id) => println!("Mode: id-only (#{})", task_id),
        SearchMode::General => {
            println!("Mode: general");
            for contribution in &composition.contributions {
                if contribution.enabled {
                    println!(
                        "  {:<14} {} match(es)",
                        contribution.attribute.name(),
                        contribution.matched
                    );
                } else {
                    println!("  {:<14} disabled", contribution.attribute.name());
                }
            }
        }
    }

    println!("Predicate: {}", describe_predicate(&composition.predicate));
    if composition.predicate.is_no_match() {
        println!("  (no attribute matched)");
    }
}

/// Ids shown before the explanation elides the rest
const EXPLAIN_ID_LIMIT: usize = 20;

fn describe_predicate(predicate: &Predicate) -> String {
    match predicate {
        Predicate::IdEquals(id) => format!("id = {}", id),
        Predicate::IdIn(ids) => {
            let shown: Vec<String> = ids
                .iter()
                .take(EXPLAIN_ID_LIMIT)
                .map(|id| id.to_string())
                .collect();
            if ids.len() > EXPLAIN_ID_LIMIT {
                format!("id IN [{}, ...] ({} ids)", shown.join(", "), ids.len())
            } else {
                format!("id IN [{}]", shown.join(", "))
            }
        }
    }
}

fn print_tasks(tasks: &[TaskSummary]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    for task in tasks {
        match &task.project_name {
            Some(project) => println!("#{:<6} {} [{}]", task.id, task.title, project),
            None => println!("#{:<6} {}", task.id, task.title),
        }
    }
    println!();
    println!("{} task(s)", tasks.len());
}

async fn cmd_attributes(db: &Database, format: OutputFormat) -> anyhow::Result<()> {
    let settings = SettingsRepository::new(db.pool().clone());
    let states = settings.toggle_states().await?;

    match format {
        OutputFormat::Json => {
            let attributes: Vec<_> = states
                .iter()
                .map(|(attribute, enabled)| {
                    json!({
                        "name": attribute.name(),
                        "toggle_key": attribute.toggle_key(),
                        "enabled": enabled,
                    })
                })
                .collect();
            print_json(&json!(attributes))
        }
        OutputFormat::Text => {
            for (attribute, enabled) in states {
                println!(
                    "{:<14} {:<22} {}",
                    attribute.name(),
                    attribute.toggle_key(),
                    if enabled { "enabled" } else { "disabled" }
                );
            }
            Ok(())
        }
    }
}

async fn cmd_toggles(
    db: &Database,
    action: ToggleAction,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let settings = SettingsRepository::new(db.pool().clone());

    match action {
        ToggleAction::List => {
            let mut rows = Vec::with_capacity(SearchAttribute::ALL.len());
            for attribute in SearchAttribute::ALL {
                rows.push((attribute.toggle_key(), settings.get(attribute.toggle_key()).await?));
            }

            match format {
                OutputFormat::Json => {
                    let map: serde_json::Map<String, serde_json::Value> = rows
                        .into_iter()
                        .map(|(key, value)| (key.to_string(), json!(value)))
                        .collect();
                    print_json(&serde_json::Value::Object(map))
                }
                OutputFormat::Text => {
                    for (key, value) in rows {
                        println!("{} = {}", key, value.as_deref().unwrap_or("(unset)"));
                    }
                    Ok(())
                }
            }
        }
        ToggleAction::Enable { attributes } => {
            for attribute in parse_attributes(&attributes)? {
                settings.enable(attribute).await?;
                if format == OutputFormat::Text {
                    println!("Enabled {}", attribute);
                }
            }
            Ok(())
        }
        ToggleAction::Disable { attributes } => {
            for attribute in parse_attributes(&attributes)? {
                settings.disable(attribute).await?;
                if format == OutputFormat::Text {
                    println!("Disabled {}", attribute);
                }
            }
            Ok(())
        }
    }
}

/// Parse every name before touching the settings table
fn parse_attributes(names: &[String]) -> tasksift_core::Result<Vec<SearchAttribute>> {
    names.iter().map(|name| SearchAttribute::from_str(name)).collect()
}

fn cmd_config(action: ConfigAction, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if format == OutputFormat::Text {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            match format {
                OutputFormat::Json => {
                    let map: serde_json::Map<String, serde_json::Value> = items
                        .into_iter()
                        .map(|(key, value)| (key, json!(value)))
                        .collect();
                    print_json(&serde_json::Value::Object(map))?;
                }
                OutputFormat::Text => {
                    for (key, value) in items {
                        println!("{} = {}", key, value);
                    }
                }
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if format == OutputFormat::Text {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn cmd_doctor(database: Option<PathBuf>) -> anyhow::Result<()> {
    println!("Tasksift Health Check");
    println!("=====================");
    println!();

    let mut all_ok = true;

    // Check configuration
    let config = match Config::load() {
        Ok(config) => {
            println!("[OK] Configuration: Valid");
            config
        }
        Err(e) => {
            all_ok = false;
            println!("[!!] Configuration: Error - {:#}", e);
            Config::default()
        }
    };

    // Check config file location
    match Config::config_path() {
        Ok(path) => {
            if path.exists() {
                println!("[OK] Config file: {}", path.display());
            } else {
                println!("[--] Config file: {} (using defaults)", path.display());
            }
        }
        Err(e) => {
            println!("[!!] Config file: Error - {}", e);
        }
    }

    // Check database
    match open_database(&config, database).await {
        Ok(db) => {
            match db.health_check().await {
                Ok(()) => {
                    println!("[OK] Database: Connected");
                    if let Some(path) = db.path() {
                        println!("     Path: {}", path.display());
                    }

                    match db.migration_status().await {
                        Ok(status) => {
                            if status.needs_migration {
                                all_ok = false;
                                println!(
                                    "[!!] Database: Migrations pending (v{} -> v{})",
                                    status.current_version, status.target_version
                                );
                            } else {
                                println!("[OK] Database: Schema v{}", status.current_version);
                            }
                        }
                        Err(e) => {
                            all_ok = false;
                            println!("[!!] Database: Migration check failed - {:#}", e);
                        }
                    }

                    let settings = SettingsRepository::new(db.pool().clone());
                    match settings.toggle_states().await {
                        Ok(states) => {
                            let enabled: Vec<_> = states
                                .iter()
                                .filter(|(_, enabled)| *enabled)
                                .map(|(attribute, _)| attribute.name())
                                .collect();
                            if enabled.is_empty() {
                                println!(
                                    "[--] Search: No attributes enabled (only #<id> queries match)"
                                );
                            } else {
                                println!("[OK] Search: {}", enabled.join(", "));
                            }
                        }
                        Err(e) => {
                            all_ok = false;
                            println!("[!!] Search: Could not read toggles - {}", e);
                        }
                    }
                }
                Err(e) => {
                    all_ok = false;
                    println!("[!!] Database: Health check failed - {:#}", e);
                }
            }
            db.close().await;
        }
        Err(e) => {
            all_ok = false;
            println!("[!!] Database: Failed to initialize - {:#}", e);
        }
    }

    // Summary
    println!();
    if all_ok {
        println!("All checks passed!");
    } else {
        println!("Some checks failed. See above for details.");
    }

    Ok(())
}
