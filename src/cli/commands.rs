//! Command implementations for the Veritas CLI.

use crate::cli::args::*;
use crate::cli::output::*;
use crate::dataset::merge::merge;
use crate::dataset::source::MergeConfig;
use crate::error::Result;
use crate::infer::InferenceEngine;
use crate::infer::knowledge::KnowledgeBase;
use crate::server;
use crate::train::{TrainConfig, train};

/// Execute a CLI command.
pub fn execute_command(args: VeritasArgs) -> Result<()> {
    match &args.command {
        Command::Merge(merge_args) => run_merge(merge_args.clone(), &args),
        Command::Train(train_args) => run_train(train_args.clone(), &args),
        Command::Predict(predict_args) => run_predict(predict_args.clone(), &args),
        Command::Serve(serve_args) => run_serve(serve_args.clone(), &args),
    }
}

/// Merge the configured sources into the master dataset.
fn run_merge(args: MergeArgs, cli_args: &VeritasArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            if cli_args.verbosity() > 1 {
                println!("Loading merge config from: {}", path.display());
            }
            MergeConfig::load(path)?
        }
        None => MergeConfig::default_sources(&args.data_dir, args.output.clone()),
    };

    let report = merge(&config)?;

    let mut summary = String::new();
    for source in &report.sources {
        match &source.skipped {
            Some(reason) => {
                summary.push_str(&format!("{}: skipped ({reason})\n", source.name));
            }
            None => {
                summary.push_str(&format!(
                    "{}: {} rows ({} dropped)\n",
                    source.name, source.rows_kept, source.rows_dropped
                ));
            }
        }
    }
    summary.push_str(&format!(
        "Merged {} rows into '{}'",
        report.total_rows, report.output
    ));

    output_result(&summary, &report, cli_args)
}

/// Train the classifier from the master dataset.
fn run_train(args: TrainArgs, cli_args: &VeritasArgs) -> Result<()> {
    let mut config = TrainConfig::new(args.dataset, args.model_dir);
    config.test_ratio = args.test_ratio;
    config.seed = args.seed;
    config.write_reports = !args.no_reports;

    let report = train(&config)?;

    let summary = format!(
        "Trained on {} rows ({} test, {} dropped), vocabulary {}\n\
         Accuracy:  {:.2}%\n\
         Precision: {:.2}%\n\
         Recall:    {:.2}%\n\
         F1 Score:  {:.2}%\n\
         Artifacts saved to '{}'",
        report.train_rows,
        report.test_rows,
        report.dropped_rows,
        report.vocabulary_size,
        report.evaluation.accuracy * 100.0,
        report.evaluation.precision * 100.0,
        report.evaluation.recall * 100.0,
        report.evaluation.f1 * 100.0,
        report.model_dir
    );

    output_result(&summary, &report, cli_args)
}

/// Classify one text from the console.
fn run_predict(args: PredictArgs, cli_args: &VeritasArgs) -> Result<()> {
    if args.text.trim().is_empty() {
        eprintln!("Warning: enter some text to analyze; nothing was classified.");
        return Ok(());
    }

    let mut engine = InferenceEngine::load(&args.model_dir)?;
    if let Some(path) = &args.knowledge {
        engine = engine.with_knowledge(KnowledgeBase::load(path)?);
    }

    let verdict = engine.analyze(&args.text)?;
    let summary = format!(
        "Prediction: {} News\nAnalysis: {}",
        verdict.label, verdict.explanation
    );
    output_result(&summary, &verdict, cli_args)
}

/// Serve the web form.
fn run_serve(args: ServeArgs, cli_args: &VeritasArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!("Serving on http://{}", args.addr);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(&args.addr, args.model_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Record, write_master};
    use crate::label::Label;
    use clap::Parser;
    use tempfile::tempdir;

    fn cli(extra: &[&str]) -> VeritasArgs {
        let mut argv = vec!["veritas", "--quiet"];
        argv.extend_from_slice(extra);
        VeritasArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_merge_then_train_then_predict() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.csv");
        let master = dir.path().join("master.csv");
        let model_dir = dir.path().join("model");

        let mut content = String::from("text,label\n");
        for i in 0..6 {
            content.push_str(&format!("aliens conspiracy hoax secret case {i},0\n"));
            content.push_str(&format!("parliament budget committee report {i},1\n"));
        }
        std::fs::write(&source, content).unwrap();

        let config_path = dir.path().join("sources.json");
        let config_json = serde_json::json!({
            "output": master,
            "sources": [{ "name": "fixture", "path": source }]
        });
        std::fs::write(&config_path, config_json.to_string()).unwrap();

        let args = cli(&[
            "merge",
            "--config",
            config_path.to_str().unwrap(),
        ]);
        execute_command(args).unwrap();
        assert!(master.exists());

        let args = cli(&[
            "train",
            "--dataset",
            master.to_str().unwrap(),
            "--model-dir",
            model_dir.to_str().unwrap(),
            "--no-reports",
        ]);
        execute_command(args).unwrap();

        let args = cli(&[
            "predict",
            "--model-dir",
            model_dir.to_str().unwrap(),
            "parliament budget committee report update",
        ]);
        execute_command(args).unwrap();
    }

    #[test]
    fn test_predict_with_empty_text_is_not_fatal() {
        let args = cli(&["predict", "   "]);
        // No artifacts are loaded for blank input, so this succeeds even
        // without a trained model on disk.
        execute_command(args).unwrap();
    }

    #[test]
    fn test_train_without_dataset_fails() {
        let dir = tempdir().unwrap();
        let args = cli(&[
            "train",
            "--dataset",
            dir.path().join("missing.csv").to_str().unwrap(),
        ]);
        let err = execute_command(args).unwrap_err();
        assert!(err.to_string().contains("veritas merge"));
    }

    #[test]
    fn test_writes_master_with_rows() {
        let dir = tempdir().unwrap();
        let master = dir.path().join("master.csv");
        write_master(
            &master,
            &[Record::new("some text", Label::Real)],
        )
        .unwrap();
        assert!(master.exists());
    }
}
