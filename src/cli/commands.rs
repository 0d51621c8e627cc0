//! Command implementations for the scamshield CLI.

use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::dataset::{
    self, DatasetSource, HamCsvSource, JobCsvSource, Label, MailboxSource, SmsCsvSource, processed,
};
use crate::error::Result;
use crate::pipeline::{PipelineConfig, Predictor, Trainer};
use crate::server::{self, ServerState};

use crate::analysis::TextNormalizer;

/// Execute a CLI command.
pub fn execute_command(args: ScamShieldArgs) -> Result<()> {
    match &args.command {
        Command::Ingest(ingest_args) => ingest(ingest_args.clone(), &args),
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
        Command::Serve(serve_args) => serve(serve_args.clone(), &args),
    }
}

/// Parse the raw dataset sources into the cleaned corpus CSV.
fn ingest(args: IngestArgs, cli_args: &ScamShieldArgs) -> Result<()> {
    let mut sources: Vec<Box<dyn DatasetSource>> = Vec::new();
    if let Some(path) = &args.mailbox {
        sources.push(Box::new(MailboxSource::new(path)));
    }
    if let Some(path) = &args.ham {
        sources.push(Box::new(HamCsvSource::new(path)));
    }
    if let Some(path) = &args.sms {
        sources.push(Box::new(SmsCsvSource::new(path)));
    }
    if let Some(path) = &args.jobs {
        sources.push(Box::new(JobCsvSource::new(path)));
    }

    if sources.is_empty() {
        return Err(crate::error::AffError::invalid_argument(
            "no dataset sources given; pass at least one of --mailbox/--ham/--sms/--jobs",
        ));
    }

    if cli_args.verbosity() > 0 {
        println!("Ingesting {} dataset source(s)...", sources.len());
    }

    let raw = dataset::load_corpus(&sources)?;
    let raw_count = raw.len();

    let normalizer = TextNormalizer::new()?;
    let cleaned = dataset::normalize_documents(raw, &normalizer, args.min_clean_len);
    processed::write_processed(&args.output, &cleaned)?;

    let fraud = cleaned.iter().filter(|d| d.label == Label::Fraud).count();
    output_result(
        "Corpus compiled",
        &IngestionResult {
            documents: cleaned.len(),
            fraud,
            legitimate: cleaned.len() - fraud,
            dropped_short: raw_count - cleaned.len(),
            output_path: args.output.to_string_lossy().to_string(),
        },
        cli_args,
    )?;

    Ok(())
}

/// Train the model from a cleaned corpus and persist the artifacts.
fn train(args: TrainArgs, cli_args: &ScamShieldArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!("Loading corpus from: {}", args.corpus.display());
    }

    let documents = processed::read_processed(&args.corpus)?;

    let mut config = PipelineConfig::new(&args.model_dir)
        .with_max_features(args.max_features)
        .with_alpha(args.alpha)
        .with_cv_folds(args.folds)
        .with_seed(args.seed);
    config.test_fraction = args.test_fraction;

    let report = Trainer::new(config).train(&documents)?;

    if cli_args.verbosity() > 1 {
        for (i, fold) in report.cv_folds.iter().enumerate() {
            println!("Fold {}: accuracy = {:.2}%", i + 1, fold.accuracy * 100.0);
        }
    }

    output_result(
        "Model trained and saved",
        &TrainingResult {
            documents: report.documents,
            vocabulary_size: report.vocabulary_size,
            cv_fold_accuracies: report.cv_folds.iter().map(|m| m.accuracy).collect(),
            cv_mean: report.cv_mean,
            holdout: report.holdout,
            confusion: report.confusion,
        },
        cli_args,
    )?;

    Ok(())
}

/// Classify one text, or run the interactive session when none is given.
fn predict(args: PredictArgs, cli_args: &ScamShieldArgs) -> Result<()> {
    let config = PipelineConfig::new(&args.model_dir);
    let predictor = Predictor::load(&config)?;

    match args.text {
        Some(text) => {
            let prediction = predictor.predict(&text)?;
            output_result(
                "Prediction",
                &PredictionResult {
                    label: prediction.label.as_str().to_string(),
                    confidence: prediction.confidence,
                },
                cli_args,
            )
        }
        None => run_repl(&predictor, cli_args),
    }
}

/// Interactive classification loop on stdin.
fn run_repl(predictor: &Predictor, cli_args: &ScamShieldArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!("Advance-fee fraud detector");
        println!("Type a message and press Enter. Type 'exit' to quit.");
        println!();
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("text> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let prediction = predictor.predict(line)?;
        println!(
            "{} (confidence {:.2}%)",
            prediction.label,
            prediction.confidence * 100.0
        );
        println!();
    }

    Ok(())
}

/// Start the HTTP server.
fn serve(args: ServeArgs, cli_args: &ScamShieldArgs) -> Result<()> {
    let config = PipelineConfig::new(&args.model_dir);
    let state = Arc::new(ServerState::load(&config)?);

    if cli_args.verbosity() > 0 {
        println!("Serving on http://{}", args.addr);
        if !state.model_loaded() {
            println!("Warning: no model artifacts found; /predict will answer 503");
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(&args.addr, state))
}
