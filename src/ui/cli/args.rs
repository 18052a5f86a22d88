use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueHint};
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::classifiers::WeightCheck;
use crate::core::Preprocessing;
use crate::splits::SplitKind;
use crate::ui::params::KnnParams;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Weighted k-nearest-neighbors hold-out evaluation on CSV datasets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split a dataset, classify the test cases and report the metrics
    Evaluate(EvaluateArgs),
    /// Split a dataset and write train.csv/test.csv
    Split(SplitArgs),
    /// Print the JSON schema of the parameter file
    Schema,
}

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// CSV dataset with a header row; the last column is the class
    #[arg(
        long,
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        required_unless_present = "partition"
    )]
    pub data: Option<PathBuf>,

    /// Directory holding a train.csv/test.csv pair to use instead of splitting
    #[arg(
        long,
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        conflicts_with = "data"
    )]
    pub partition: Option<PathBuf>,

    /// File to dump the report and confusion matrix as JSON
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub report_file: Option<PathBuf>,

    #[command(flatten)]
    pub params: ParamsArgs,
}

#[derive(Debug, Args)]
pub struct SplitArgs {
    /// CSV dataset with a header row; the last column is the class
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    /// Directory that receives train.csv and test.csv
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub out_dir: PathBuf,

    #[command(flatten)]
    pub params: ParamsArgs,
}

#[derive(Debug, Args)]
pub struct ParamsArgs {
    /// JSON parameter file (see the `schema` command)
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Split strategy (sequential, random)
    #[arg(long, value_name = "KIND")]
    pub split: Option<String>,

    /// Weight check (literal, feature-weights)
    #[arg(long, value_name = "KIND")]
    pub weight_check: Option<String>,

    /// Preprocessing (none, normalized, standardized)
    #[arg(long, value_name = "KIND")]
    pub preprocessing: Option<String>,

    /// Override a parameter (key=value, value parsed as JSON when possible)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<KeyValue>,
}

#[derive(Clone, Debug)]
pub struct KeyValue {
    key: String,
    value: Value,
}

impl ParamsArgs {
    /// Defaults, then the config file, then the kind flags, then `--param` overrides.
    pub fn resolve(&self) -> Result<KnnParams> {
        let mut params = match &self.config {
            Some(path) => read_config(path)?,
            None => serde_json::to_value(KnnParams::default())?,
        };

        if let Some(raw) = &self.split {
            let kind = parse_kind::<SplitKind>(raw)
                .with_context(|| format!("invalid split '{raw}'"))?;
            set_key(&mut params, "split", Value::String(kind.to_string()))?;
        }
        if let Some(raw) = &self.weight_check {
            let kind = parse_kind::<WeightCheck>(raw)
                .with_context(|| format!("invalid weight check '{raw}'"))?;
            set_key(&mut params, "weight_check", Value::String(kind.to_string()))?;
        }
        if let Some(raw) = &self.preprocessing {
            let kind = parse_kind::<Preprocessing>(raw)
                .with_context(|| format!("invalid preprocessing '{raw}'"))?;
            set_key(&mut params, "preprocessing", Value::String(kind.to_string()))?;
        }
        apply_overrides(&mut params, &self.overrides)?;

        let params: KnnParams =
            serde_json::from_value(params).context("invalid parameter values")?;
        params.validate()?;
        Ok(params)
    }
}

fn read_config(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    if !value.is_object() {
        bail!("config {} must hold a JSON object", path.display());
    }
    Ok(value)
}

fn parse_kind<T>(raw: &str) -> Result<T>
where
    T: FromStr + IntoEnumIterator + std::fmt::Display,
    <T as FromStr>::Err: std::fmt::Display,
{
    let candidates = candidate_spellings(raw);
    for cand in candidates {
        if let Ok(parsed) = cand.parse::<T>() {
            return Ok(parsed);
        }
    }
    let known: Vec<String> = T::iter().map(|kind| kind.to_string()).collect();
    Err(anyhow!(
        "could not parse value '{raw}' (expected one of: {})",
        known.join(", ")
    ))
}

fn candidate_spellings(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return out;
    }

    out.push(trimmed.to_string());
    out.push(trimmed.to_lowercase());
    out.push(kebab_from_token(trimmed));
    out.push(trimmed.replace('_', "-").to_lowercase());
    out.sort();
    out.dedup();
    out
}

fn kebab_from_token(token: &str) -> String {
    let mut buf = String::new();
    let mut prev_lower = false;
    for ch in token.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                buf.push('-');
            }
            buf.extend(ch.to_lowercase());
            prev_lower = false;
        } else if ch == '_' || ch == ' ' {
            buf.push('-');
            prev_lower = false;
        } else {
            buf.push(ch);
            prev_lower = ch.is_lowercase();
        }
    }
    buf
}

fn apply_overrides(target: &mut Value, overrides: &[KeyValue]) -> Result<()> {
    for kv in overrides {
        set_key(target, &kv.key, kv.value.clone())
            .with_context(|| format!("failed to set '{}'", kv.key))?;
    }
    Ok(())
}

/// Parameters are flat; unknown keys are rejected when the object is deserialized.
fn set_key(target: &mut Value, key: &str, new_value: Value) -> Result<()> {
    match target {
        Value::Object(params) => {
            params.insert(key.to_string(), new_value);
            Ok(())
        }
        other => bail!("parameters must be a JSON object, got {other}"),
    }
}

fn parse_key_value(raw: &str) -> Result<KeyValue, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| "expected KEY=VALUE".to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("key cannot be empty".to_string());
    }

    let value = value.trim();
    Ok(KeyValue {
        key: key.to_string(),
        value: parse_literal(value),
    })
}

fn parse_literal(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
