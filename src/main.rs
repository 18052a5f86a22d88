use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use serde::Serialize;

use wknn::core::Preprocessing;
use wknn::data::{read_csv, read_partition, write_partition};
use wknn::evaluation::{ClassificationReport, ConfusionMatrix};
use wknn::splits::{Partition, split};
use wknn::tasks::HoldoutEvaluator;
use wknn::ui::KnnParams;
use wknn::ui::cli::args::{Cli, Command, EvaluateArgs, SplitArgs};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_GREY: &str = "\x1b[90m";

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Evaluate(args) => evaluate(args),
        Command::Split(args) => split_only(args),
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&KnnParams::schema())?;
            println!("{schema}");
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct RunDump<'a> {
    dataset: &'a str,
    timestamp: String,
    params: &'a KnnParams,
    train_cases: usize,
    test_cases: usize,
    report: &'a ClassificationReport,
    confusion_matrix: &'a ConfusionMatrix,
}

fn evaluate(args: EvaluateArgs) -> Result<()> {
    let params = args.params.resolve()?;

    let partition = match (&args.partition, &args.data) {
        (Some(dir), _) => load_partition(dir, &params)?,
        (None, Some(path)) => split_dataset(path, &params)?,
        (None, None) => anyhow::bail!("either --data or --partition is required"),
    };

    print_header(&partition, &params);

    let evaluator = HoldoutEvaluator::new(Box::new(params.classifier()), partition);
    let report = evaluator.classification_report();
    let matrix = evaluator.confusion_matrix();

    println!("{report}");
    println!();
    println!("{BOLD}confusion matrix{RESET}");
    println!("{matrix}");

    if let Some(path) = args.report_file
        && !path.as_os_str().is_empty()
    {
        let partition = evaluator.partition();
        let dump = RunDump {
            dataset: partition.train.name(),
            timestamp: timestamp_now(),
            params: &params,
            train_cases: partition.train.number_of_cases(),
            test_cases: partition.test.number_of_cases(),
            report: &report,
            confusion_matrix: &matrix,
        };
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &dump)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("{DIM}report written to {}{RESET}", path.display());
    }

    Ok(())
}

fn split_only(args: SplitArgs) -> Result<()> {
    let params = args.params.resolve()?;
    let partition = split_dataset(&args.data, &params)?;
    write_partition(&partition, &args.out_dir)
        .with_context(|| format!("failed to write partition to {}", args.out_dir.display()))?;
    println!(
        "{FG_GREEN}{BOLD}✔{RESET} {} training and {} test cases written to {}",
        partition.train.number_of_cases(),
        partition.test.number_of_cases(),
        args.out_dir.display()
    );
    Ok(())
}

fn split_dataset(path: &Path, params: &KnnParams) -> Result<Partition> {
    let dataset =
        read_csv(path).with_context(|| format!("failed to load {}", path.display()))?;
    let dataset = params.prepare(dataset).context("failed to prepare dataset")?;
    split(&dataset, params.train_fraction, params.strategy()).context("failed to split dataset")
}

fn load_partition(dir: &Path, params: &KnnParams) -> Result<Partition> {
    let partition = read_partition(dir)
        .with_context(|| format!("failed to load partition from {}", dir.display()))?;
    if params.preprocessing != Preprocessing::None {
        log::warn!(
            "{} is applied to train.csv and test.csv independently",
            params.preprocessing
        );
    }
    let train = params.prepare(partition.train).context("failed to prepare train.csv")?;
    let test = params.prepare(partition.test).context("failed to prepare test.csv")?;
    Ok(Partition::new(train, test)?)
}

fn print_header(partition: &Partition, params: &KnnParams) {
    println!("{BOLD}{FG_CYAN}▶ k-NN Hold-out Evaluation{RESET}");
    println!(
        "{DIM}dataset={}{RESET}  {DIM}k={}{RESET}  {DIM}split={} ({:.2}){RESET}  {DIM}weights={}{RESET}  {}",
        partition.train.name(),
        params.k,
        params.split,
        params.train_fraction,
        params.weight_check,
        timestamp_now()
    );
    println!(
        "{DIM}train={}{RESET}  {DIM}test={}{RESET}  {DIM}classes={}{RESET}",
        partition.train.number_of_cases(),
        partition.test.number_of_cases(),
        partition.classes.join(",")
    );
    println!(
        "{FG_GREY}────────────────────────────────────────────────────────────────────────{RESET}"
    );
}

fn timestamp_now() -> String {
    use chrono::{Local, SecondsFormat};
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
