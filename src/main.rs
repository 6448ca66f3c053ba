use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use student_grades::data_loading::{DataLoader, DataLoaderFactory, RawTable, RawValue};
use student_grades::prediction::{PredictionRequest, GRADE_MINIMUM};
use student_grades::reporting::{
    correlation_heatmap, dataset_shares, feature_label, grade_by_group, grade_histogram, ModelReport,
    DEFAULT_HEATMAP_THRESHOLD, DEFAULT_HISTOGRAM_BINS,
};
use student_grades::{ConfigError, PipelineConfig, TrainedContext, TrainingPipeline};

#[derive(Parser)]
#[command(
    name = "student-grades",
    about = "Predict final student grades with a correlation-filtered linear model",
    long_about = "Cleans the UCI student-performance table, keeps the attributes correlated with the \
                 final grade, fits ordinary least squares on standardized features and explains \
                 predictions per feature."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TrainingArgs {
    /// Student table (`;`-separated CSV, or JSON array of records)
    data: PathBuf,

    /// Input format; guessed from the file extension when omitted
    #[arg(long, value_name = "csv|json")]
    format: Option<String>,

    /// TOML file with pipeline settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override a setting, e.g. `--param correlation_threshold=0.1`
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the model and print its evaluation report
    Train {
        #[command(flatten)]
        training: TrainingArgs,
    },

    /// Train, then estimate the grade of one student
    Predict {
        #[command(flatten)]
        training: TrainingArgs,

        /// Attribute value of the student, e.g. `--set failures=1 --set Mjob=teacher`
        #[arg(long = "set", value_name = "ATTR=VALUE")]
        values: Vec<String>,
    },

    /// Describe the cleaned data: shares, grade distribution and correlations
    Explore {
        #[command(flatten)]
        training: TrainingArgs,

        /// Attribute to break the grade down by
        #[arg(long, default_value = "failures")]
        by: String,

        /// Correlations weaker than this are shown as 0 in the heatmap
        #[arg(long, default_value_t = DEFAULT_HEATMAP_THRESHOLD)]
        heatmap_threshold: f64,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Train { training } => train_command(&training),
        Commands::Predict { training, values } => predict_command(&training, &values),
        Commands::Explore {
            training,
            by,
            heatmap_threshold,
        } => explore_command(&training, &by, heatmap_threshold),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn split_assignment(arg: &str) -> Result<(&str, &str), Box<dyn Error>> {
    arg.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'").into())
}

fn load_table(path: &Path, format: Option<&str>) -> Result<RawTable, Box<dyn Error>> {
    let loader: Box<dyn DataLoader> = match format {
        Some(format) => DataLoaderFactory::create(format)?,
        None => DataLoaderFactory::for_path(path),
    };
    let table = loader.load_from_path(path)?;
    log::info!("Loaded {} rows from {}", table.num_rows(), path.display());
    Ok(table)
}

fn train(args: &TrainingArgs) -> Result<TrainedContext, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default(),
    };
    for param in &args.params {
        let (key, value) = split_assignment(param)?;
        config.set_param(key, value).map_err(|e| -> Box<dyn Error> {
            if matches!(e, ConfigError::UnknownParam(_)) {
                format!("{e}; supported: {}", PipelineConfig::get_supported_params().join(", ")).into()
            } else {
                e.into()
            }
        })?;
    }

    let table = load_table(&args.data, args.format.as_deref())?;
    let pipeline = TrainingPipeline::builder().config(config).build()?;
    Ok(pipeline.train(&table)?)
}

fn train_command(args: &TrainingArgs) -> Result<(), Box<dyn Error>> {
    let ctx = train(args)?;
    let report = ModelReport::from_context(&ctx);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn predict_command(args: &TrainingArgs, values: &[String]) -> Result<(), Box<dyn Error>> {
    let ctx = train(args)?;

    let mut request = PredictionRequest::new();
    for value in values {
        let (attribute, raw) = split_assignment(value)?;
        request.set(attribute, RawValue::parse(raw));
    }
    let result = ctx.predictor().predict(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let maximum = ctx.schema().target_max();
    println!("Calculated Grade: {:.1}%", result.clamped(GRADE_MINIMUM, maximum));
    if let Some(warning) = &result.range_warning {
        println!("  ({warning})");
    }
    println!("Baseline (average student): {:.1}", result.intercept);
    for c in result.ranked_contributions() {
        println!(
            "  {:>+7.2}  {} (value {}, z = {:.2})",
            c.contribution,
            feature_label(&c.feature),
            c.raw_value,
            c.standardized
        );
    }
    if !result.defaulted.is_empty() {
        println!("Not given, defaulted: {}", result.defaulted.join(", "));
    }
    Ok(())
}

fn explore_command(args: &TrainingArgs, by: &str, heatmap_threshold: f64) -> Result<(), Box<dyn Error>> {
    let ctx = train(args)?;
    let table = ctx.table();

    let shares = dataset_shares(table);
    let histogram = grade_histogram(table.target().view(), DEFAULT_HISTOGRAM_BINS, ctx.schema().target_max());
    let groups = grade_by_group(table, by)?;
    let heatmap = correlation_heatmap(table, ctx.selection(), heatmap_threshold);

    if args.json {
        let out = serde_json::json!({
            "shares": shares,
            "histogram": histogram,
            "groups": { "attribute": by, "summaries": groups },
            "heatmap": heatmap,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Dataset statistics:");
    for share in &shares {
        println!("  {}: {:.1}%", share.label, share.percent);
    }

    println!("\nGrade distribution:");
    for bin in &histogram {
        println!("  {:>5.1}-{:<5.1} {}", bin.lower, bin.upper, "#".repeat(bin.count));
    }

    println!("\nGrade by {}:", feature_label(by));
    for g in &groups {
        println!(
            "  {:<12} n={:<4} min {:>5.1}  q1 {:>5.1}  median {:>5.1}  q3 {:>5.1}  max {:>5.1}  mean {:>5.1}",
            g.label, g.count, g.min, g.q1, g.median, g.q3, g.max, g.mean
        );
    }

    println!("\nCorrelations (|r| < {heatmap_threshold} shown as 0):");
    for (name, row) in heatmap.names.iter().zip(&heatmap.values) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>5.2}")).collect();
        println!("  {:<20} {}", name, cells.join(" "));
    }
    Ok(())
}
