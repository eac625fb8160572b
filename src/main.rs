// file: src/main.rs
// description: commandline entry point for inspecting and checking configuration
// reference: application bootstrap and orchestration

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use rag_config::{
    AppConfig, ENV_VARS, EnvSnapshot,
    utils::{format_info, format_success, format_warning, init_logger},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "rag_config")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Configuration loader and checker for the late-interaction RAG pipeline", long_about = None)]
struct Cli {
    /// Read variables from this file instead of a discovered .env
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,

    /// Do not look for a .env file
    #[arg(long, action = ArgAction::SetTrue)]
    no_dotenv: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify that every mandatory variable is set
    Check,

    /// Print the effective configuration with API keys masked
    Show {
        #[arg(long)]
        json: bool,
    },

    /// List recognized environment variables and their defaults
    Vars,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    let snapshot = EnvSnapshot::load(cli.env_file.as_deref(), !cli.no_dotenv)
        .context("Failed to load configuration")?;
    let config = Arc::new(AppConfig::from_snapshot(&snapshot));
    debug!("Configuration loaded");

    match cli.command {
        Commands::Check => cmd_check(&config)?,
        Commands::Show { json } => cmd_show(&config, json)?,
        Commands::Vars => cmd_vars(&snapshot),
    }

    Ok(())
}

fn cmd_check(config: &AppConfig) -> Result<()> {
    info!("Checking mandatory configuration");

    if !config.validate() {
        bail!("Configuration incomplete");
    }

    println!("{}", format_success("All required environment variables are set"));
    println!(
        "{}",
        format_info(&format!(
            "Vision model: {} on {} | LLM deployment: {}",
            config.vision.model_choice, config.vision.device, config.language_model.deployment_name
        ))
    );
    Ok(())
}

fn cmd_show(config: &AppConfig, json: bool) -> Result<()> {
    let redacted = config.redacted();

    if json {
        println!("{}", redacted.to_json(true)?);
        return Ok(());
    }

    println!("search");
    println!("  endpoint:          {}", display_or_unset(&redacted.search.endpoint));
    println!("  api_key:           {}", display_or_unset(&redacted.search.api_key));
    println!("  index_name:        {}", redacted.search.index_name);
    println!("document_extraction");
    println!(
        "  endpoint:          {}",
        display_or_unset(&redacted.document_extraction.endpoint)
    );
    println!(
        "  api_key:           {}",
        display_or_unset(&redacted.document_extraction.api_key)
    );
    println!("language_model");
    println!(
        "  endpoint:          {}",
        display_or_unset(&redacted.language_model.endpoint)
    );
    println!(
        "  api_key:           {}",
        display_or_unset(&redacted.language_model.api_key)
    );
    println!("  deployment_name:   {}", redacted.language_model.deployment_name);
    println!("  api_version:       {}", redacted.language_model.api_version);
    println!("vision");
    println!("  model_choice:      {}", redacted.vision.model_choice);
    println!("  device:            {}", redacted.vision.device);
    println!("  batch_size:        {}", redacted.vision.batch_size);
    println!("system");
    println!("  temp_dir:          {}", redacted.system.temp_dir.display());
    println!("  patch_matrix_dir:  {}", redacted.system.patch_matrix_dir.display());
    println!("  manifest_dir:      {}", redacted.system.manifest_dir.display());
    println!("  max_pages_per_doc: {}", redacted.system.max_pages_per_doc);
    println!("  default_k:         {}", redacted.system.default_k);

    let missing = config.missing_fields();
    if !missing.is_empty() {
        println!();
        println!("{}", format_warning(&format!("Missing: {}", missing.join(", "))));
    }

    Ok(())
}

fn cmd_vars(snapshot: &EnvSnapshot) {
    for var in ENV_VARS.iter() {
        let default = if var.default.is_empty() { "(required)" } else { var.default };
        let state = if snapshot.contains(var.name) { "set" } else { "unset" };
        println!(
            "{:<34} {:<32} {:<12} {}",
            var.name, var.target, default, state
        );
    }
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
}
