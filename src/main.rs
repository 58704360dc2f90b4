use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

mod dataset;
mod models;
mod predict;
mod report;
mod rules;
mod score;

use models::{sample_profile, PredictionResult, StudentOutcome, StudentProfile, SAMPLE_PRESETS};
use score::{FixedJitter, JitterSource, SeededJitter};

#[derive(Parser)]
#[command(name = "student-success")]
#[command(
    about = "Student success prediction and advising recommendations for Group Scholar",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict success for a single student profile
    #[command(group(
        ArgGroup::new("input")
            .args(["profile", "preset"])
            .multiple(false)
    ))]
    Predict {
        /// JSON file holding the sixteen profile attributes
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Named sample profile: high-risk, average, high-potential
        #[arg(long)]
        preset: Option<String>,
        /// Seed for the jitter draw
        #[arg(long)]
        seed: Option<u64>,
        /// Exact jitter to apply instead of a random draw
        #[arg(long, allow_hyphen_values = true)]
        jitter: Option<f64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Simulated processing latency in milliseconds
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
    },
    /// Score every profile in a cohort CSV
    Batch {
        #[arg(long)]
        csv: PathBuf,
        /// Write per-student results to this CSV
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Generate a synthetic cohort CSV
    Generate {
        #[arg(long, default_value_t = 100)]
        count: usize,
        #[arg(long, default_value = "students.csv")]
        out: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate a markdown report for a cohort CSV
    Report {
        #[arg(long)]
        csv: PathBuf,
        /// Cohort label shown in the report header
        #[arg(long)]
        label: Option<String>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the reference model quality metrics
    ModelStats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Predict {
            profile,
            preset,
            seed,
            jitter,
            json,
            delay_ms,
        } => {
            let profile = load_profile(profile.as_deref(), preset.as_deref())?;
            for warning in profile.range_warnings() {
                eprintln!("warning: {warning}");
            }

            if delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            }

            let mut jitter = jitter_source(seed, jitter);
            let result = predict::predict(&profile, jitter.as_mut());

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_prediction(&result);
            }
        }
        Commands::Batch {
            csv,
            out,
            seed,
            limit,
        } => {
            let profiles = dataset::read_profiles(&csv)?;
            if profiles.is_empty() {
                println!("No profiles found in {}.", csv.display());
                return Ok(());
            }

            let mut jitter = jitter_source(seed, None);
            let outcomes = score_cohort(profiles, jitter.as_mut());
            let successes = outcomes.iter().filter(|o| o.result.prediction).count();

            println!(
                "Scored {} students, {} predicted to succeed.",
                outcomes.len(),
                successes
            );
            println!("Students most at risk:");

            let mut at_risk: Vec<&StudentOutcome> = outcomes.iter().collect();
            at_risk.sort_by(|a, b| {
                a.result
                    .success_probability
                    .partial_cmp(&b.result.success_probability)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            for outcome in at_risk.iter().take(limit) {
                println!(
                    "- {} probability {:.2} (confidence {:.2}), {} risk factors",
                    outcome.student_id,
                    outcome.result.success_probability,
                    outcome.result.confidence,
                    outcome.result.risk_factors.len()
                );
            }

            if let Some(out) = out {
                dataset::write_results(&out, &outcomes)?;
                println!("Results written to {}.", out.display());
            }
        }
        Commands::Generate { count, out, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let profiles = dataset::generate_profiles(count, &mut rng)?;
            dataset::write_profiles(&out, &profiles)?;
            println!("Wrote {} profiles to {}.", profiles.len(), out.display());
        }
        Commands::Report {
            csv,
            label,
            out,
            seed,
        } => {
            let profiles = dataset::read_profiles(&csv)?;
            let mut jitter = jitter_source(seed, None);
            let outcomes = score_cohort(profiles, jitter.as_mut());
            let report = report::build_report(label.as_deref(), &outcomes);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::ModelStats => {
            let stats = &report::MODEL_STATS;
            println!("Reference model metrics (offline training run):");
            println!("- accuracy  {:.3}", stats.accuracy);
            println!("- precision {:.3}", stats.precision);
            println!("- recall    {:.3}", stats.recall);
            println!("- f1 score  {:.3}", stats.f1_score);
        }
    }

    Ok(())
}

fn load_profile(path: Option<&Path>, preset: Option<&str>) -> anyhow::Result<StudentProfile> {
    match (path, preset) {
        (Some(path), _) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid profile in {}", path.display()))
        }
        (None, Some(name)) => sample_profile(name).with_context(|| {
            format!(
                "unknown preset '{name}', expected one of: {}",
                SAMPLE_PRESETS.join(", ")
            )
        }),
        (None, None) => Ok(StudentProfile::default()),
    }
}

fn jitter_source(seed: Option<u64>, fixed: Option<f64>) -> Box<dyn JitterSource> {
    match (fixed, seed) {
        (Some(value), _) => Box::new(FixedJitter(value)),
        (None, Some(seed)) => Box::new(SeededJitter::seeded(seed)),
        (None, None) => Box::new(SeededJitter::from_entropy()),
    }
}

fn score_cohort(
    profiles: Vec<(Uuid, StudentProfile)>,
    jitter: &mut dyn JitterSource,
) -> Vec<StudentOutcome> {
    profiles
        .into_iter()
        .map(|(student_id, profile)| {
            let result = predict::predict(&profile, jitter);
            StudentOutcome {
                student_id,
                profile,
                result,
            }
        })
        .collect()
}

fn print_prediction(result: &PredictionResult) {
    let label = if result.prediction {
        "Likely to Succeed"
    } else {
        "At Risk"
    };

    println!("Prediction: {label}");
    println!(
        "Success probability: {:.1}%",
        result.success_probability * 100.0
    );
    println!("Confidence: {:.1}%", result.confidence * 100.0);

    if !result.risk_factors.is_empty() {
        println!();
        println!("Risk factors:");
        for factor in &result.risk_factors {
            println!("- {factor}");
        }
    }

    println!();
    println!("Recommendations:");
    for recommendation in &result.recommendations {
        println!("- {recommendation}");
    }
}
