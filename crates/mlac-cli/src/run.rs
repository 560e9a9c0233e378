//! # Run Subcommand
//!
//! Drives the operator the way the graph runtime would: one `setup`, then
//! `InArtifact` for every JSON line read from the input. Outbound messages
//! are written to stdout, error records to `--errors` or stderr.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use mlac_ml_client::MlApiConfig;
use mlac_operator::{ArtifactConsumer, EnvParameters, ParameterSource, StaticParameters};

use crate::output::JsonLinesPort;

/// Arguments for the `mlac run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// JSON-lines file of inbound messages. Reads stdin when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Operator parameter as key=value (repeatable), e.g. apiVersion=v1.
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Read operator parameters from MLAC_* environment variables instead.
    #[arg(long, conflicts_with = "params")]
    pub env_params: bool,

    /// File receiving error records. Defaults to stderr, which silences
    /// logs unless -v or --log-file is given.
    #[arg(long)]
    pub errors: Option<PathBuf>,
}

/// Parse a `key=value` pair.
pub fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in {raw:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Execute the run subcommand.
///
/// Returns exit code 0 once all input has been processed. Per-message
/// failures surface as error records and do not change the exit code.
pub fn run_run(args: &RunArgs) -> Result<u8> {
    let api_config = MlApiConfig::from_env().context("invalid ML API configuration")?;

    let params: Arc<dyn ParameterSource> = if args.env_params {
        Arc::new(EnvParameters::default())
    } else {
        Arc::new(args.params.iter().cloned().collect::<StaticParameters>())
    };

    let error_sink: Box<dyn Write + Send> = match &args.errors {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stderr()),
    };

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let consumer = ArtifactConsumer::builder(api_config, params)
        .out_artifact(JsonLinesPort::new(io::stdout()))
        .out_error(JsonLinesPort::new(error_sink))
        .build();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    consumer.setup();

    let processed = runtime.block_on(async {
        let mut processed = 0usize;
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            if line.trim().is_empty() {
                continue;
            }
            consumer.in_artifact_json(&line).await;
            processed += 1;
        }
        Ok::<_, anyhow::Error>(processed)
    })?;

    tracing::info!(processed, "input exhausted");
    Ok(0)
}
