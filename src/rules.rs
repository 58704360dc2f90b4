use crate::models::StudentProfile;

/// One advising rule: a threshold check plus the paired messages emitted
/// when it fires.
struct RiskRule {
    applies: fn(&StudentProfile) -> bool,
    risk_factor: &'static str,
    recommendation: &'static str,
}

/// Evaluated top to bottom; output order follows table order. Rules are
/// independent, any subset can fire.
const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        applies: |p| p.high_school_gpa < 3.0,
        risk_factor: "Low high school GPA",
        recommendation: "Consider academic support programs",
    },
    RiskRule {
        applies: |p| p.study_hours_per_week < 10.0,
        risk_factor: "Insufficient study time",
        recommendation: "Increase weekly study hours to at least 15-20",
    },
    RiskRule {
        applies: |p| p.attendance_rate < 80.0,
        risk_factor: "Poor attendance",
        recommendation: "Improve class attendance to above 90%",
    },
    RiskRule {
        applies: |p| p.stress_level > 7,
        risk_factor: "High stress levels",
        recommendation: "Seek counseling or stress management resources",
    },
    RiskRule {
        applies: |p| p.social_support < 5,
        risk_factor: "Limited social support",
        recommendation: "Join study groups or student organizations",
    },
    RiskRule {
        applies: |p| p.has_computer == 0,
        risk_factor: "Limited technology access",
        recommendation: "Utilize campus computer labs or seek technology assistance",
    },
];

/// Advice given when no risk rule fires.
pub const FALLBACK_RECOMMENDATIONS: [&str; 2] = [
    "Continue current academic practices",
    "Consider mentoring other students",
];

/// Derive risk factors and paired recommendations for a profile.
///
/// Each firing rule appends exactly one string to each list, so the lists
/// stay positionally paired. When nothing fires, `risk_factors` is empty
/// and `recommendations` carries the fallback advice. This is a function
/// of the profile alone; the score plays no part, and a student can be
/// flagged here while still scoring high.
pub fn derive_risks(profile: &StudentProfile) -> (Vec<String>, Vec<String>) {
    let mut risk_factors = Vec::new();
    let mut recommendations = Vec::new();

    for rule in RISK_RULES {
        if (rule.applies)(profile) {
            risk_factors.push(rule.risk_factor.to_string());
            recommendations.push(rule.recommendation.to_string());
        }
    }

    if risk_factors.is_empty() {
        recommendations.extend(FALLBACK_RECOMMENDATIONS.iter().map(|s| s.to_string()));
    }

    (risk_factors, recommendations)
}
