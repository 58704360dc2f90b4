use std::path::Path;

use anyhow::Context;
use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::Rng;
use rand_distr::{Beta, Gamma, Normal};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{StudentOutcome, StudentProfile};

/// One CSV row: the sixteen profile attributes plus an optional id.
/// Extra columns in input files are ignored by the reader.
#[derive(Debug, Serialize, Deserialize)]
struct ProfileRow {
    #[serde(default)]
    student_id: Option<Uuid>,
    age: u8,
    gender: u8,
    high_school_gpa: f64,
    study_hours_per_week: f64,
    attendance_rate: f64,
    math_grade: f64,
    english_grade: f64,
    science_grade: f64,
    family_income: u8,
    parent_education: u8,
    extracurricular_activities: u8,
    part_time_job: u8,
    stress_level: u8,
    social_support: u8,
    has_computer: u8,
    internet_quality: u8,
}

impl ProfileRow {
    fn from_profile(student_id: Uuid, profile: &StudentProfile) -> Self {
        ProfileRow {
            student_id: Some(student_id),
            age: profile.age,
            gender: profile.gender,
            high_school_gpa: profile.high_school_gpa,
            study_hours_per_week: profile.study_hours_per_week,
            attendance_rate: profile.attendance_rate,
            math_grade: profile.math_grade,
            english_grade: profile.english_grade,
            science_grade: profile.science_grade,
            family_income: profile.family_income,
            parent_education: profile.parent_education,
            extracurricular_activities: profile.extracurricular_activities,
            part_time_job: profile.part_time_job,
            stress_level: profile.stress_level,
            social_support: profile.social_support,
            has_computer: profile.has_computer,
            internet_quality: profile.internet_quality,
        }
    }

    fn into_profile(self) -> (Uuid, StudentProfile) {
        let id = self.student_id.unwrap_or_else(Uuid::new_v4);
        let profile = StudentProfile {
            age: self.age,
            gender: self.gender,
            high_school_gpa: self.high_school_gpa,
            study_hours_per_week: self.study_hours_per_week,
            attendance_rate: self.attendance_rate,
            math_grade: self.math_grade,
            english_grade: self.english_grade,
            science_grade: self.science_grade,
            family_income: self.family_income,
            parent_education: self.parent_education,
            extracurricular_activities: self.extracurricular_activities,
            part_time_job: self.part_time_job,
            stress_level: self.stress_level,
            social_support: self.social_support,
            has_computer: self.has_computer,
            internet_quality: self.internet_quality,
        };
        (id, profile)
    }
}

/// Read student profiles from a CSV file. Rows without a `student_id`
/// get a fresh one.
pub fn read_profiles(path: &Path) -> anyhow::Result<Vec<(Uuid, StudentProfile)>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut profiles = Vec::new();

    for (index, result) in reader.deserialize::<ProfileRow>().enumerate() {
        let row = result.with_context(|| format!("bad profile row {}", index + 1))?;
        profiles.push(row.into_profile());
    }

    Ok(profiles)
}

/// Write a cohort in the same column layout `read_profiles` accepts.
pub fn write_profiles(path: &Path, rows: &[(Uuid, StudentProfile)]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for (id, profile) in rows {
        writer.serialize(ProfileRow::from_profile(*id, profile))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write per-student prediction results.
pub fn write_results(path: &Path, outcomes: &[StudentOutcome]) -> anyhow::Result<()> {
    #[derive(Serialize)]
    struct ResultRow<'a> {
        student_id: Uuid,
        success_probability: f64,
        prediction: bool,
        confidence: f64,
        risk_factors: &'a str,
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for outcome in outcomes {
        let risk_factors = outcome.result.risk_factors.join("; ");
        writer.serialize(ResultRow {
            student_id: outcome.student_id,
            success_probability: outcome.result.success_probability,
            prediction: outcome.result.prediction,
            confidence: outcome.result.confidence,
            risk_factors: &risk_factors,
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Generate a synthetic cohort with realistic attribute distributions:
/// GPA and course grades are clipped normals, study hours a clipped
/// gamma, attendance a beta scaled to percent, and the categorical codes
/// follow fixed weights.
pub fn generate_profiles(
    count: usize,
    rng: &mut impl Rng,
) -> anyhow::Result<Vec<(Uuid, StudentProfile)>> {
    let gpa: Normal<f64> = Normal::new(3.2, 0.6)?;
    let study_hours: Gamma<f64> = Gamma::new(2.0, 5.0)?;
    let attendance: Beta<f64> = Beta::new(8.0, 2.0)?;
    let math: Normal<f64> = Normal::new(75.0, 15.0)?;
    let english: Normal<f64> = Normal::new(78.0, 12.0)?;
    let science: Normal<f64> = Normal::new(73.0, 14.0)?;
    let income = WeightedIndex::new([0.3, 0.5, 0.2])?;
    let parent_education = WeightedIndex::new([0.4, 0.4, 0.2])?;
    let internet = WeightedIndex::new([0.2, 0.5, 0.3])?;

    let mut profiles = Vec::with_capacity(count);

    for _ in 0..count {
        let profile = StudentProfile {
            age: rng.gen_range(18..=24),
            gender: u8::from(rng.gen_bool(0.5)),
            high_school_gpa: gpa.sample(rng).clamp(2.0, 4.0),
            study_hours_per_week: study_hours.sample(rng).clamp(1.0, 40.0),
            attendance_rate: attendance.sample(rng) * 100.0,
            math_grade: math.sample(rng).clamp(40.0, 100.0),
            english_grade: english.sample(rng).clamp(45.0, 100.0),
            science_grade: science.sample(rng).clamp(40.0, 100.0),
            family_income: income.sample(rng) as u8,
            parent_education: parent_education.sample(rng) as u8,
            extracurricular_activities: rng.gen_range(0..=4),
            part_time_job: u8::from(rng.gen_bool(0.4)),
            stress_level: rng.gen_range(1..=10),
            social_support: rng.gen_range(1..=10),
            has_computer: u8::from(rng.gen_bool(0.9)),
            internet_quality: internet.sample(rng) as u8,
        };
        profiles.push((Uuid::new_v4(), profile));
    }

    Ok(profiles)
}
