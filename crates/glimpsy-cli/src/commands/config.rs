//! Config command implementation.
//!
//! Manages the persisted user settings.

use anyhow::Result;
use clap::{Args, Subcommand};

use glimpsy_config::{SettingKey, Settings};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_info, print_output, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key, e.g. theme or pipeline.page_size
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(&ctx.settings, ctx.format),
        ConfigCommand::Get(get_args) => execute_get(get_args, ctx),
        ConfigCommand::Set(set_args) => execute_set(set_args, ctx),
        ConfigCommand::List => execute_list(ctx.format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args, ctx),
        ConfigCommand::Path => execute_path(ctx),
    }
}

fn execute_show(settings: &Settings, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let results: Vec<KeyValue> = settings
                .entries()
                .into_iter()
                .map(|(key, value)| KeyValue::new(key.as_str(), value))
                .collect();
            print_header("Current Configuration");
            print_output(&results, format)?;
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(settings)?),
        OutputFormat::Csv => {
            let results: Vec<KeyValue> = settings
                .entries()
                .into_iter()
                .map(|(key, value)| KeyValue::new(key.as_str(), value))
                .collect();
            print_output(&results, format)?;
        }
        OutputFormat::Minimal => {
            for (key, value) in settings.entries() {
                println!("{key}={value}");
            }
        }
    }
    Ok(())
}

fn execute_get(args: GetArgs, ctx: &Context) -> Result<()> {
    let key = SettingKey::parse(&args.key)?;
    let value = ctx.settings.get(key);

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => println!("{}: {}", key.as_str(), value),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => println!("{value}"),
    }
    Ok(())
}

fn execute_set(args: SetArgs, ctx: &Context) -> Result<()> {
    let key = SettingKey::parse(&args.key)?;
    let settings = ctx.store.set(key, &args.value)?;
    print_success(&format!("Set {} = {}", key.as_str(), settings.get(key)));
    Ok(())
}

fn execute_list(format: OutputFormat) -> Result<()> {
    let defaults = Settings::default();

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let results: Vec<KeyValue> = SettingKey::ALL
                .iter()
                .map(|key| {
                    KeyValue::new(
                        key.as_str(),
                        format!("{} (default: {})", key.description(), defaults.get(*key)),
                    )
                })
                .collect();
            if format == OutputFormat::Table {
                print_header("Available Configuration Keys");
            }
            print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = SettingKey::ALL
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": defaults.get(*key)
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            for key in SettingKey::ALL {
                println!("{}", key.as_str());
            }
        }
    }
    Ok(())
}

fn execute_reset(args: ResetArgs, ctx: &Context) -> Result<()> {
    if args.all {
        ctx.store.reset(None)?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = SettingKey::parse(&key_str)?;
        let settings = ctx.store.reset(Some(key))?;
        print_success(&format!("Reset {} to default ({})", key.as_str(), settings.get(key)));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }
    Ok(())
}

fn execute_path(ctx: &Context) -> Result<()> {
    let path = ctx.store.path();
    match ctx.format {
        OutputFormat::Minimal | OutputFormat::Json | OutputFormat::Csv => {
            println!("{}", path.display());
        }
        OutputFormat::Table => {
            print_info(&format!("Config file: {}", path.display()));
            if ctx.store.exists() {
                print_info("Status: exists");
            } else {
                print_info("Status: not created yet (using defaults)");
            }
        }
    }
    Ok(())
}
