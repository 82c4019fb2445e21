use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use millrace_core::{set_property, StepContext, StepReturn};
use millrace_steps::builtin_steps;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(
    name = "millrace",
    version,
    about = "Run pipeline utility steps against a workspace"
)]
struct Cli {
    /// Workspace directory the step resolves paths against
    #[arg(long, default_value = ".")]
    workspace: PathBuf,

    /// Host property definition, repeatable
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    define: Vec<String>,

    /// Invocation document: a `step` name plus a `with` argument map
    invocation: PathBuf,
}

/// One declarative step invocation.
#[derive(Debug, Deserialize)]
struct Invocation {
    step: String,
    #[serde(default = "empty_args")]
    with: serde_json::Value,
}

fn empty_args() -> serde_json::Value {
    serde_json::json!({})
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Host properties come in as -D switches, set once before any step
    // runs
    for definition in &cli.define {
        let (key, value) = definition
            .split_once('=')
            .with_context(|| format!("Property definition '{}' is not KEY=VALUE", definition))?;
        set_property(key, value);
    }

    let raw = std::fs::read_to_string(&cli.invocation).with_context(|| {
        format!(
            "Failed to read invocation file {}",
            cli.invocation.display()
        )
    })?;
    let invocation: Invocation =
        serde_yaml::from_str(&raw).context("Failed to parse invocation document")?;

    tracing::info!(
        step = %invocation.step,
        workspace = %cli.workspace.display(),
        "running step"
    );

    let registry = builtin_steps();
    let step = registry
        .create(&invocation.step, invocation.with)
        .with_context(|| format!("Failed to configure step '{}'", invocation.step))?;

    let context = Arc::new(StepContext::new(&cli.workspace));
    let execution = step
        .start(context)
        .with_context(|| format!("Failed to start step '{}'", invocation.step))?;
    let result = execution
        .run()
        .await
        .with_context(|| format!("Step '{}' failed", invocation.step))?;

    match result {
        StepReturn::None => {}
        StepReturn::Text(text) => println!("{}", text),
        other => println!("{}", serde_json::to_string_pretty(&other)?),
    }

    Ok(())
}
