//! Bugjira - one interface over Bugzilla and JIRA
//!
//! Main entry point for the bugjira CLI.

use bugjira::config::Config;
use bugjira::fields::{BugjiraField, FieldFactory, FieldDataPluginRegistry, GeneratorType};
use bugjira::plugin_loader::PluginLoader;
use bugjira::{BackendKind, Bugjira, Issue};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

/// Bugjira - look up and comment on Bugzilla bugs and JIRA issues by key
#[derive(Parser, Debug)]
#[command(name = "bugjira")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/bugjira/config.json)
    #[arg(short, long, global = true, env = "BUGJIRA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show an issue (numeric keys are Bugzilla bugs, PROJ-123 keys JIRA issues)
    Issue {
        /// Issue key (e.g., 123456 or FOO-123)
        key: String,

        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a comment to an issue
    Comment {
        /// Issue key (e.g., 123456 or FOO-123)
        key: String,

        /// Comment text
        text: String,
    },

    /// List the fields configured for a backend
    Fields {
        /// Backend type (bugzilla or jira)
        backend: String,

        /// Use the configured json_generator_module instead of the
        /// per-backend field data plugins
        #[arg(long)]
        module: bool,
    },

    /// Validate the configuration file and show what it selects
    CheckConfig,
}

fn main() {
    if let Err(e) = bugjira::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> bugjira::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    match cli.command {
        Commands::Issue { key, json } => {
            let bugjira = facade(&config)?;
            let runtime = tokio::runtime::Runtime::new()?;
            let issue = runtime.block_on(bugjira.get_issue(&key))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&issue)?);
            } else {
                print_issue(&issue);
            }
        }

        Commands::Comment { key, text } => {
            let bugjira = facade(&config)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let issue = bugjira.get_issue(&key).await?;
                bugjira.add_comment(&issue, &text).await
            })?;
            println!("Added comment to {}", key);
        }

        Commands::Fields { backend, module } => {
            let kind: GeneratorType = backend.parse()?;
            let fields = if module {
                module_fields(&config, kind)?
            } else {
                facade(&config)?.get_fields(kind)?
            };

            if fields.is_empty() {
                println!("No {} fields configured", kind);
            }
            for field in &fields {
                print_field(field);
            }
        }

        Commands::CheckConfig => {
            let path = cli.config.unwrap_or_else(Config::default_path);
            println!("Configuration OK: {}", path.display());
            println!("  Bugzilla: {}", config.bugzilla.url);
            println!("  JIRA:     {}", config.jira.url);

            let registry = FieldDataPluginRegistry::with_defaults();
            for kind in [BackendKind::Bugzilla, BackendKind::Jira] {
                let name = bugjira::fields::data_generator::plugin_name(kind, &config);
                let status = if registry.contains(name) { "" } else { " (not registered)" };
                println!("  {} field data plugin: {}{}", kind, name, status);
            }

            let module = PluginLoader::module_name(&config);
            let status = if PluginLoader::new().contains(module) { "" } else { " (not registered)" };
            println!("  JSON generator module: {}{}", module, status);

            match &config.field_data_path {
                Some(path) => println!("  Field data: {}", path.display()),
                None => println!("  Field data: (none)"),
            }
        }
    }

    Ok(())
}

fn facade(config: &Config) -> bugjira::Result<Bugjira> {
    Bugjira::builder().config(config.to_value()?).build()
}

fn module_fields(config: &Config, kind: BackendKind) -> bugjira::Result<Vec<BugjiraField>> {
    let mut factory = FieldFactory::new();
    PluginLoader::new().load_plugin(config, &mut factory)?;

    Ok(match kind {
        BackendKind::Bugzilla => factory
            .get_bugzilla_fields()?
            .into_iter()
            .map(BugjiraField::Bugzilla)
            .collect(),
        BackendKind::Jira => factory
            .get_jira_fields()?
            .into_iter()
            .map(BugjiraField::Jira)
            .collect(),
    })
}

fn print_issue(issue: &Issue) {
    match issue {
        Issue::Bugzilla(bz) => match bz.bug() {
            Some(bug) => {
                println!("Bug {} [{}] {}", bug.id, bug.status, bug.summary);
                println!("  Product:   {} / {}", bug.product, bug.component);
                if let Some(assignee) = &bug.assigned_to {
                    println!("  Assignee:  {}", assignee);
                }
            }
            None => println!("Bug {}", bz.key()),
        },
        Issue::Jira(jira) => match jira.remote() {
            Some(remote) => {
                let status = remote
                    .fields
                    .status
                    .as_ref()
                    .map(|s| s.name.as_str())
                    .unwrap_or("unknown");
                println!("{} [{}] {}", remote.key, status, remote.fields.summary);
                if let Some(assignee) = &remote.fields.assignee {
                    println!("  Assignee:  {}", assignee.display_name);
                }
            }
            None => println!("{}", jira.key()),
        },
    }
}

fn print_field(field: &BugjiraField) {
    match field {
        BugjiraField::Bugzilla(f) => println!("{}", f.name),
        BugjiraField::Jira(f) => println!("{} ({})", f.name, f.jira_field_id),
    }
}
