//! Fertilizer Advisor command line
//!
//! Usage:
//!   cargo run --bin fertilizer_advisor -- crops
//!   cargo run --bin fertilizer_advisor -- recommend --crop Wheat --level Nitrogen=50 --level Phosphorus=70
//!   cargo run --bin fertilizer_advisor -- chart --crop Wheat --format svg --output wheat.svg
//!   cargo run --bin fertilizer_advisor -- batch --crop Wheat --samples data/soil_data.csv

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fertilizer_advisor::chart::no_requirements_message;
use fertilizer_advisor::{
    load_soil_samples, parse_readings, recommend, recommend_batch, try_recommend, AdvisorConfig,
    BarChart, CropTable, JsonFormatter, MarkdownFormatter, RecommendationReport, TextFormatter,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crop nutrient management: fertilizer recommendations from soil readings.
#[derive(Parser)]
#[command(name = "fertilizer_advisor", version)]
struct Args {
    /// Crop requirement table (CSV or Parquet). Overrides CROP_TABLE.
    #[arg(long, global = true)]
    crop_table: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the crops in the requirement table
    Crops,

    /// Recommend fertilizer for one set of readings
    Recommend {
        #[arg(long)]
        crop: String,

        /// Observed level as NAME=VALUE (repeatable)
        #[arg(long = "level", value_name = "NAME=VALUE")]
        levels: Vec<String>,

        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Fail on an unknown crop instead of printing no recommendation
        #[arg(long)]
        strict: bool,
    },

    /// Chart the crop's required nutrient levels
    Chart {
        #[arg(long)]
        crop: String,

        #[arg(long, value_enum, default_value_t = ChartFormat::Text)]
        format: ChartFormat,

        /// Write the chart to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Recommend fertilizer for every sample in a soil sample table
    Batch {
        #[arg(long)]
        crop: String,

        /// Soil sample table (CSV or Parquet)
        #[arg(long)]
        samples: PathBuf,

        /// Column holding sample identifiers
        #[arg(long)]
        id_column: Option<String>,

        #[arg(long, value_enum, default_value_t = BatchFormat::Markdown)]
        format: BatchFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Markdown,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartFormat {
    Text,
    Svg,
}

#[derive(Clone, Copy, ValueEnum)]
enum BatchFormat {
    Markdown,
    Json,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for reports
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fertilizer_advisor=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = AdvisorConfig::from_env();
    if let Some(path) = args.crop_table {
        config.crop_table = path;
    }
    tracing::debug!(?config, "configuration resolved");

    let table = CropTable::load(&config.crop_table)
        .with_context(|| format!("Failed to load crop table {}", config.crop_table.display()))?;

    match args.command {
        Command::Crops => {
            for name in table.crop_names() {
                println!("{}", name);
            }
        }

        Command::Recommend {
            crop,
            levels,
            format,
            strict,
        } => {
            let observed = parse_readings(&levels)?;
            let recommendation = if strict {
                try_recommend(&crop, &observed, &table)?
            } else {
                recommend(&crop, &observed, &table)
            };
            tracing::info!(crop = %crop, nutrients = recommendation.len(), "recommendation computed");

            let output = match format {
                ReportFormat::Text => TextFormatter::format(&recommendation, &config.unit_label),
                ReportFormat::Markdown => {
                    MarkdownFormatter::format(&crop, &recommendation, &config.unit_label)
                }
                ReportFormat::Json => JsonFormatter::format(&RecommendationReport {
                    crop: &crop,
                    unit: &config.unit_label,
                    recommendation: &recommendation,
                })?,
            };
            print!("{}", output);
            if matches!(format, ReportFormat::Json) {
                println!();
            }
        }

        Command::Chart {
            crop,
            format,
            output,
        } => {
            let Some(profile) = table.get(&crop) else {
                println!("{}", no_requirements_message(&crop));
                return Ok(());
            };

            let chart = BarChart::from_profile(profile);
            let rendered = match format {
                ChartFormat::Text => chart.render_text(config.chart_width),
                ChartFormat::Svg => chart.render_svg(),
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
                    tracing::info!(path = %path.display(), "chart written");
                }
                None => print!("{}", rendered),
            }
        }

        Command::Batch {
            crop,
            samples,
            id_column,
            format,
        } => {
            let samples = load_soil_samples(&samples, id_column.as_deref())?;
            if !table.contains(&crop) {
                tracing::warn!(crop = %crop, "crop not in requirement table, recommendations will be empty");
            }

            let results = recommend_batch(&crop, &samples, &table);

            match format {
                BatchFormat::Markdown => print!(
                    "{}",
                    MarkdownFormatter::format_batch(&crop, &results, &config.unit_label)
                ),
                BatchFormat::Json => println!(
                    "{}",
                    JsonFormatter::format_batch(&crop, &config.unit_label, &results)?
                ),
            }
        }
    }

    Ok(())
}
