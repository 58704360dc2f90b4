use crate::models::{PredictionResult, StudentProfile};
use crate::rules;
use crate::score::{self, JitterSource};

/// Run the scoring engine and the rule engine over a profile and merge
/// their outputs. The two are independent; neither sees the other's
/// result.
pub fn predict(profile: &StudentProfile, jitter: &mut dyn JitterSource) -> PredictionResult {
    let outcome = score::compute_score(profile, jitter);
    let (risk_factors, recommendations) = rules::derive_risks(profile);

    PredictionResult {
        success_probability: outcome.probability,
        prediction: outcome.prediction,
        confidence: outcome.confidence,
        risk_factors,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_profile;
    use crate::score::FixedJitter;

    #[test]
    fn merges_score_and_rule_outputs() {
        let profile = sample_profile("high-risk").unwrap();
        let result = predict(&profile, &mut FixedJitter(0.0));

        assert!(!result.prediction);
        assert!(result.success_probability < 0.3);
        assert_eq!(result.risk_factors.len(), 6);
        assert_eq!(result.recommendations.len(), 6);
    }

    #[test]
    fn recommendations_are_never_empty() {
        for name in crate::models::SAMPLE_PRESETS {
            let profile = sample_profile(name).unwrap();
            let result = predict(&profile, &mut FixedJitter(0.0));

            assert!(!result.recommendations.is_empty());
            if result.risk_factors.is_empty() {
                assert!(result.recommendations.len() >= 2);
            } else {
                assert_eq!(result.recommendations.len(), result.risk_factors.len());
            }
        }
    }

    #[test]
    fn rule_output_ignores_the_score() {
        // Jitter pushes the probability to the ceiling; the risk factors
        // still reflect the profile alone.
        let profile = sample_profile("high-risk").unwrap();
        let result = predict(&profile, &mut FixedJitter(1.0));

        assert!(result.prediction);
        assert_eq!(result.success_probability, 1.0);
        assert_eq!(result.risk_factors.len(), 6);
    }
}
