use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Student attributes used for success prediction.
///
/// Categorical attributes are kept as numeric codes rather than enums so
/// that out-of-range values degrade the score instead of failing to parse.
/// Range enforcement happens at the CLI boundary via [`range_warnings`].
///
/// [`range_warnings`]: StudentProfile::range_warnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Age in years, 16-30.
    pub age: u8,
    /// 0 = female, 1 = male.
    pub gender: u8,
    /// High school GPA on a 4.0 scale.
    pub high_school_gpa: f64,
    /// Weekly study hours, 0-40.
    pub study_hours_per_week: f64,
    /// Class attendance percentage, 0-100.
    pub attendance_rate: f64,
    /// Course grade, 0-100.
    pub math_grade: f64,
    /// Course grade, 0-100.
    pub english_grade: f64,
    /// Course grade, 0-100.
    pub science_grade: f64,
    /// 0 = low, 1 = medium, 2 = high.
    pub family_income: u8,
    /// 0 = high school, 1 = bachelor, 2 = graduate.
    pub parent_education: u8,
    /// Number of extracurricular activities, 0-10.
    pub extracurricular_activities: u8,
    /// 0 = no, 1 = yes.
    pub part_time_job: u8,
    /// Self-reported stress, 1-10.
    pub stress_level: u8,
    /// Self-reported social support, 1-10.
    pub social_support: u8,
    /// 0 = no, 1 = yes.
    pub has_computer: u8,
    /// 0 = poor, 1 = good, 2 = excellent.
    pub internet_quality: u8,
}

impl Default for StudentProfile {
    fn default() -> Self {
        StudentProfile {
            age: 20,
            gender: 0,
            high_school_gpa: 3.0,
            study_hours_per_week: 10.0,
            attendance_rate: 85.0,
            math_grade: 75.0,
            english_grade: 78.0,
            science_grade: 73.0,
            family_income: 1,
            parent_education: 1,
            extracurricular_activities: 2,
            part_time_job: 0,
            stress_level: 5,
            social_support: 7,
            has_computer: 1,
            internet_quality: 1,
        }
    }
}

impl StudentProfile {
    /// One warning string per attribute outside its documented range.
    /// Empty means the profile is fully in-range.
    pub fn range_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !(16..=30).contains(&self.age) {
            warnings.push(format!("age {} outside 16-30", self.age));
        }
        if self.gender > 1 {
            warnings.push(format!("gender code {} must be 0 or 1", self.gender));
        }
        if !(0.0..=4.0).contains(&self.high_school_gpa) {
            warnings.push(format!("GPA {} outside 0.0-4.0", self.high_school_gpa));
        }
        if !(0.0..=40.0).contains(&self.study_hours_per_week) {
            warnings.push(format!(
                "study hours {} outside 0-40",
                self.study_hours_per_week
            ));
        }
        if !(0.0..=100.0).contains(&self.attendance_rate) {
            warnings.push(format!(
                "attendance rate {} outside 0-100",
                self.attendance_rate
            ));
        }
        for (label, grade) in [
            ("math grade", self.math_grade),
            ("english grade", self.english_grade),
            ("science grade", self.science_grade),
        ] {
            if !(0.0..=100.0).contains(&grade) {
                warnings.push(format!("{label} {grade} outside 0-100"));
            }
        }
        if self.family_income > 2 {
            warnings.push(format!(
                "family income code {} must be 0-2",
                self.family_income
            ));
        }
        if self.parent_education > 2 {
            warnings.push(format!(
                "parent education code {} must be 0-2",
                self.parent_education
            ));
        }
        if self.extracurricular_activities > 10 {
            warnings.push(format!(
                "extracurricular activities {} outside 0-10",
                self.extracurricular_activities
            ));
        }
        if self.part_time_job > 1 {
            warnings.push(format!(
                "part-time job code {} must be 0 or 1",
                self.part_time_job
            ));
        }
        if !(1..=10).contains(&self.stress_level) {
            warnings.push(format!("stress level {} outside 1-10", self.stress_level));
        }
        if !(1..=10).contains(&self.social_support) {
            warnings.push(format!(
                "social support {} outside 1-10",
                self.social_support
            ));
        }
        if self.has_computer > 1 {
            warnings.push(format!(
                "has-computer code {} must be 0 or 1",
                self.has_computer
            ));
        }
        if self.internet_quality > 2 {
            warnings.push(format!(
                "internet quality code {} must be 0-2",
                self.internet_quality
            ));
        }

        warnings
    }
}

/// Names accepted by [`sample_profile`].
pub const SAMPLE_PRESETS: [&str; 3] = ["high-risk", "average", "high-potential"];

/// Look up one of the named sample profiles used for demos and smoke runs.
pub fn sample_profile(name: &str) -> Option<StudentProfile> {
    match name {
        "high-risk" => Some(StudentProfile {
            age: 19,
            gender: 0,
            high_school_gpa: 2.3,
            study_hours_per_week: 5.0,
            attendance_rate: 65.0,
            math_grade: 58.0,
            english_grade: 62.0,
            science_grade: 55.0,
            family_income: 0,
            parent_education: 0,
            extracurricular_activities: 0,
            part_time_job: 1,
            stress_level: 8,
            social_support: 3,
            has_computer: 0,
            internet_quality: 0,
        }),
        "average" => Some(StudentProfile {
            age: 20,
            gender: 1,
            high_school_gpa: 3.2,
            study_hours_per_week: 12.0,
            attendance_rate: 82.0,
            math_grade: 74.0,
            english_grade: 76.0,
            science_grade: 71.0,
            family_income: 1,
            parent_education: 1,
            extracurricular_activities: 2,
            part_time_job: 1,
            stress_level: 6,
            social_support: 6,
            has_computer: 1,
            internet_quality: 1,
        }),
        "high-potential" => Some(StudentProfile {
            age: 21,
            gender: 0,
            high_school_gpa: 3.8,
            study_hours_per_week: 18.0,
            attendance_rate: 95.0,
            math_grade: 88.0,
            english_grade: 91.0,
            science_grade: 86.0,
            family_income: 2,
            parent_education: 2,
            extracurricular_activities: 4,
            part_time_job: 0,
            stress_level: 4,
            social_support: 9,
            has_computer: 1,
            internet_quality: 2,
        }),
        _ => None,
    }
}

/// Outcome of one prediction. Built fresh per request, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Clamped to [0, 1].
    pub success_probability: f64,
    /// True when the student is predicted to succeed.
    pub prediction: bool,
    /// Distance of the probability from 0.5, scaled to [0, 1].
    pub confidence: f64,
    /// One entry per triggered risk rule, in rule order.
    pub risk_factors: Vec<String>,
    /// Paired with `risk_factors`, or the fallback advice when none fired.
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StudentOutcome {
    pub student_id: Uuid,
    pub profile: StudentProfile,
    pub result: PredictionResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_in_range() {
        assert!(StudentProfile::default().range_warnings().is_empty());
    }

    #[test]
    fn sample_profiles_resolve_by_name() {
        for name in SAMPLE_PRESETS {
            let profile = sample_profile(name).expect("preset should exist");
            assert!(profile.range_warnings().is_empty(), "{name} out of range");
        }
        assert!(sample_profile("unknown").is_none());
    }

    #[test]
    fn high_risk_preset_matches_expected_values() {
        let profile = sample_profile("high-risk").unwrap();
        assert_eq!(profile.high_school_gpa, 2.3);
        assert_eq!(profile.study_hours_per_week, 5.0);
        assert_eq!(profile.has_computer, 0);
        assert_eq!(profile.stress_level, 8);
    }

    #[test]
    fn out_of_range_attributes_are_reported() {
        let profile = StudentProfile {
            age: 12,
            high_school_gpa: 4.6,
            stress_level: 0,
            internet_quality: 5,
            ..StudentProfile::default()
        };
        let warnings = profile.range_warnings();
        assert_eq!(warnings.len(), 4);
        assert!(warnings[0].contains("age"));
        assert!(warnings[1].contains("GPA"));
    }
}
