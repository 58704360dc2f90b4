use std::collections::HashMap;
use std::fmt::Write;

use chrono::Utc;

use crate::models::StudentOutcome;

/// Reference metrics from the offline training run of the original
/// classifier. Display values only, unrelated to the scoring heuristic.
pub struct ModelStats {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

pub const MODEL_STATS: ModelStats = ModelStats {
    accuracy: 0.847,
    precision: 0.823,
    recall: 0.891,
    f1_score: 0.856,
};

#[derive(Debug, Clone)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

fn count_labels<'a, I>(labels: I) -> Vec<LabelCount>
where
    I: Iterator<Item = &'a str>,
{
    let mut map: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *map.entry(label).or_insert(0) += 1;
    }

    let mut counts: Vec<LabelCount> = map
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();

    counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.label.cmp(&b.label)));
    counts
}

/// How many students each risk factor was flagged for, descending.
pub fn summarize_risk_factors(outcomes: &[StudentOutcome]) -> Vec<LabelCount> {
    count_labels(
        outcomes
            .iter()
            .flat_map(|o| o.result.risk_factors.iter().map(String::as_str)),
    )
}

/// How many students each recommendation was issued to, descending.
pub fn summarize_recommendations(outcomes: &[StudentOutcome]) -> Vec<LabelCount> {
    count_labels(
        outcomes
            .iter()
            .flat_map(|o| o.result.recommendations.iter().map(String::as_str)),
    )
}

pub fn build_report(label: Option<&str>, outcomes: &[StudentOutcome]) -> String {
    let mut output = String::new();
    let cohort_label = label.unwrap_or("full cohort");

    let _ = writeln!(output, "# Student Success Report");
    let _ = writeln!(
        output,
        "Generated for {} on {}",
        cohort_label,
        Utc::now().date_naive()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Cohort Summary");

    if outcomes.is_empty() {
        let _ = writeln!(output, "No students scored.");
        return output;
    }

    let scored = outcomes.len();
    let successes = outcomes.iter().filter(|o| o.result.prediction).count();
    let mean_probability = outcomes
        .iter()
        .map(|o| o.result.success_probability)
        .sum::<f64>()
        / scored as f64;
    let mean_confidence =
        outcomes.iter().map(|o| o.result.confidence).sum::<f64>() / scored as f64;

    let _ = writeln!(output, "- {scored} students scored");
    let _ = writeln!(
        output,
        "- {} predicted to succeed ({:.0}%)",
        successes,
        successes as f64 / scored as f64 * 100.0
    );
    let _ = writeln!(output, "- average success probability {mean_probability:.2}");
    let _ = writeln!(output, "- average confidence {mean_confidence:.2}");

    let _ = writeln!(output);
    let _ = writeln!(output, "## Risk Factor Mix");

    let factors = summarize_risk_factors(outcomes);
    if factors.is_empty() {
        let _ = writeln!(output, "No risk factors flagged for this cohort.");
    } else {
        for factor in &factors {
            let _ = writeln!(output, "- {}: {} students", factor.label, factor.count);
        }
    }

    let mut at_risk: Vec<&StudentOutcome> = outcomes.iter().collect();
    at_risk.sort_by(|a, b| {
        a.result
            .success_probability
            .partial_cmp(&b.result.success_probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let _ = writeln!(output);
    let _ = writeln!(output, "## Students Most At Risk");

    for outcome in at_risk.iter().take(10) {
        let flagged = if outcome.result.risk_factors.is_empty() {
            "no flagged risk factors".to_string()
        } else {
            outcome.result.risk_factors.join("; ")
        };
        let _ = writeln!(
            output,
            "- {} probability {:.2} (gpa {:.1}, attendance {:.0}%): {}",
            outcome.student_id,
            outcome.result.success_probability,
            outcome.profile.high_school_gpa,
            outcome.profile.attendance_rate,
            flagged
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Most Common Recommendations");

    for rec in summarize_recommendations(outcomes).iter().take(5) {
        let _ = writeln!(output, "- {}: {} students", rec.label, rec.count);
    }

    output
}
