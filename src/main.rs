use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, LevelFilter};
use std::{panic, path::PathBuf};
use vmeta::{
    build_chain, config::ConfigValidator, errors::sentinel, propagate, TimeZoneMode,
    VmetaConfig,
};
#[derive(Parser, Debug)]
#[command(
    name = "vmeta",
    author,
    version,
    about = "Error chains and JSON error envelopes for the video metadata service",
    long_about = r#"
vmeta - error reporting toolkit of the video metadata service

Builds error chains the way request handlers do, shows the diagnostic text
written to the logs and the JSON envelope returned to API clients.

EXAMPLES:
  vmeta render "parse moov" "read box" --cause "unexpected EOF"
  vmeta envelope "file rejected" --local-time
  vmeta sentinels
  vmeta trace handler parser reader --cause "short read"
  vmeta config show
    "#
)]
struct Opt {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(long, value_name = "PATH", help = "Configuration file (default: ~/.vmeta/config.json)")]
    config: Option<PathBuf>,
}
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the diagnostic text of a chain (first message is outermost).
    Render {
        #[arg(value_name = "MESSAGE", num_args = 1.., required = true)]
        messages: Vec<String>,
        #[arg(long, help = "Plain error at the bottom of the chain")]
        cause: Option<String>,
    },
    /// Print the JSON envelope a client would receive.
    Envelope {
        #[arg(value_name = "MESSAGE", num_args = 1.., required = true)]
        messages: Vec<String>,
        #[arg(long, help = "Stamp with the local offset instead of UTC")]
        local_time: bool,
    },
    /// Print the envelope of every predefined error.
    Sentinels,
    /// Unwind through the given frames and print the recovered error.
    Trace {
        #[arg(value_name = "FRAME", num_args = 1.., required = true)]
        frames: Vec<String>,
        #[arg(long, default_value = "input/output error")]
        cause: String,
    },
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    Show,
    Init,
    Validate,
}
fn main() -> Result<()> {
    let opt = Opt::parse();
    let config_path = opt.config.clone().unwrap_or_else(vmeta::default_config_path);
    let config = VmetaConfig::load(&config_path)?;
    let log_level = match opt.verbose {
        0 => config.log_level.clone(),
        1 => LevelFilter::Info.to_string(),
        2 => LevelFilter::Debug.to_string(),
        _ => LevelFilter::Trace.to_string(),
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();
    match opt.command {
        Commands::Render { messages, cause } => {
            handle_render(&messages, cause.as_deref())?;
        }
        Commands::Envelope { messages, local_time } => {
            handle_envelope(&config, &messages, local_time)?;
        }
        Commands::Sentinels => {
            handle_sentinels(&config)?;
        }
        Commands::Trace { frames, cause } => {
            handle_trace(&config, &frames, &cause)?;
        }
        Commands::Config { action } => {
            handle_config(action, config, config_path)?;
        }
    }
    Ok(())
}
fn print_json(bytes: Vec<u8>) -> Result<()> {
    let text = String::from_utf8(bytes).context("envelope is not valid UTF-8")?;
    println!("{}", text);
    Ok(())
}
fn handle_render(messages: &[String], cause: Option<&str>) -> Result<()> {
    let chain = build_chain(messages, cause).context("at least one message is required")?;
    println!("{}", chain.render_text());
    debug!("chain depth: {}", chain.depth());
    Ok(())
}
fn handle_envelope(config: &VmetaConfig, messages: &[String], local_time: bool) -> Result<()> {
    let chain = build_chain(messages, None).context("at least one message is required")?;
    let zone = if local_time { TimeZoneMode::Local } else { config.envelope.time_zone };
    print_json(chain.to_json_in(zone))
}
fn handle_sentinels(config: &VmetaConfig) -> Result<()> {
    for sentinel in sentinel::all() {
        print_json(sentinel.to_json_in(config.envelope.time_zone))?;
    }
    Ok(())
}
fn handle_trace(config: &VmetaConfig, frames: &[String], cause: &str) -> Result<()> {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(|info| debug!("panic in flight: {}", info)));
    let outcome = propagate(frames, cause);
    panic::set_hook(default_hook);
    match outcome {
        Ok(()) => bail!("trace finished without an error"),
        Err(err) => {
            println!("Chain depth: {}", err.depth());
            println!("Log text:    {}", err.render_text());
            print_json(err.report(&config.envelope))
        }
    }
}
fn handle_config(action: ConfigCommand, config: VmetaConfig, path: PathBuf) -> Result<()> {
    match action {
        ConfigCommand::Show => {
            println!("Configuration file: {:?}", path);
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init => {
            if path.exists() {
                bail!("configuration already exists at {:?}", path);
            }
            VmetaConfig::default().save(&path)?;
            println!("✓ Wrote default configuration to {:?}", path);
        }
        ConfigCommand::Validate => {
            let result = ConfigValidator::new().validate_config(&config);
            for error in &result.errors {
                println!("✗ {}: {}", error.field, error.message);
                if let Some(suggestion) = &error.suggestion {
                    println!("    {}", suggestion);
                }
            }
            for warning in &result.warnings {
                println!("! {}: {}", warning.field, warning.message);
                if let Some(suggestion) = &warning.suggestion {
                    println!("    {}", suggestion);
                }
            }
            if !result.is_valid {
                bail!("configuration at {:?} is invalid", path);
            }
            println!("✓ Configuration is valid");
        }
    }
    Ok(())
}
