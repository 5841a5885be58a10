use crate::entities::position_entity;
use crate::models::CandidateProfile;

/// Evaluates a candidate profile against a position's declared
/// constraints. Returns human-readable violations in declaration order;
/// an empty list means eligible. Pure function, re-runnable on every
/// field change.
pub fn evaluate_eligibility(
    position: &position_entity::Model,
    profile: &CandidateProfile,
) -> Vec<String> {
    let mut violations = Vec::new();

    if let Some(min_cgpa) = position.min_cgpa {
        if profile.cgpa < min_cgpa {
            violations.push(format!(
                "CGPA {} is below the required minimum of {}",
                profile.cgpa, min_cgpa
            ));
        }
    }

    let departments = &position.eligible_departments.0;
    if !departments.is_empty() && !departments.contains(&profile.department) {
        violations.push(format!(
            "Department {} is not eligible for this position",
            profile.department
        ));
    }

    let levels = &position.eligible_levels.0;
    if !levels.is_empty() && !levels.contains(&profile.level) {
        violations.push(format!(
            "Level {} is not eligible for this position",
            profile.level
        ));
    }

    if let Some(gender) = &position.eligible_gender {
        if !gender.eq_ignore_ascii_case("any") && !gender.eq_ignore_ascii_case(&profile.gender) {
            violations.push(format!(
                "This position is restricted to {} candidates",
                gender.to_lowercase()
            ));
        }
    }

    violations
}
