//! Case loading, saving, validation, and introspection.

use std::path::Path;

use crate::case::CaseFile;
use crate::error::{AppError, AppResult};

/// Summary of a reactor for listing.
#[derive(Debug, Clone)]
pub struct ReactorSummary {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub scale: Option<String>,
    pub impeller_count: usize,
    pub volume_range_l: (f64, f64),
    pub agitation_range_rpm: (f64, f64),
}

/// Load a case from a YAML file.
pub fn load_case(path: &Path) -> AppResult<CaseFile> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::CaseFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_case_yaml(&content)
}

pub fn parse_case_yaml(content: &str) -> AppResult<CaseFile> {
    serde_yaml::from_str(content)
        .map_err(|e| AppError::Case(format!("Failed to parse case YAML: {}", e)))
}

/// Save a case to a YAML file.
pub fn save_case(path: &Path, case: &CaseFile) -> AppResult<()> {
    let content = serde_yaml::to_string(case)
        .map_err(|e| AppError::Case(format!("Failed to serialize case: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::CaseFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

pub fn load_case_json(path: &Path) -> AppResult<CaseFile> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::CaseFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::Case(format!("Failed to parse case JSON: {}", e)))
}

pub fn save_case_json(path: &Path, case: &CaseFile) -> AppResult<()> {
    let content = serde_json::to_string_pretty(case)
        .map_err(|e| AppError::Case(format!("Failed to serialize case: {}", e)))?;
    std::fs::write(path, content).map_err(|e| AppError::CaseFileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Validate case structure.
///
/// Only structural problems are rejected here. Incomplete physical data
/// (no reaction, no solids) is reported later as a warning by the
/// evaluation that needs it.
pub fn validate_case(case: &CaseFile) -> AppResult<()> {
    if case.reactors.is_empty() {
        return Err(AppError::Validation(
            "Case must define at least one reactor".to_string(),
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for reactor in &case.reactors {
        if reactor.id.trim().is_empty() {
            return Err(AppError::Validation("Reactor id must not be empty".to_string()));
        }
        if !seen.insert(reactor.id.as_str()) {
            return Err(AppError::Validation(format!(
                "Duplicate reactor id '{}'",
                reactor.id
            )));
        }
        if reactor.impellers.is_empty() {
            return Err(AppError::Validation(format!(
                "Reactor '{}' must have at least one impeller",
                reactor.id
            )));
        }
        reactor
            .to_reactor()
            .map_err(|e| AppError::Validation(format!("Reactor '{}': {}", reactor.id, e)))?;
    }

    if let Some(op) = &case.operating_point {
        if let Some(id) = &op.reactor {
            if case.reactor_def(id).is_err() {
                return Err(AppError::Validation(format!(
                    "Operating point refers to unknown reactor '{}'",
                    id
                )));
            }
        }
        for (name, value) in [("agitation", op.agitation_rpm), ("volume", op.volume_l)] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(AppError::Validation(format!(
                        "Operating point {} must be positive, got {}",
                        name, v
                    )));
                }
            }
        }
    }

    for component in &case.components {
        if component.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Component name must not be empty".to_string(),
            ));
        }
    }

    let b = &case.bourne;
    if !(b.pv_factor > 1.0 && b.feed_factor > 1.0) {
        return Err(AppError::Validation(
            "Bourne factors must be greater than 1".to_string(),
        ));
    }
    if !(b.threshold > 0.0) {
        return Err(AppError::Validation(
            "Bourne deviation threshold must be positive".to_string(),
        ));
    }

    Ok(())
}

/// List all reactors in the case with summaries.
pub fn list_reactors(case: &CaseFile) -> Vec<ReactorSummary> {
    case.reactors
        .iter()
        .map(|r| ReactorSummary {
            id: r.id.clone(),
            owner: r.owner.clone(),
            name: r.name.clone(),
            scale: r.scale.map(|s| s.to_string()),
            impeller_count: r.impellers.len(),
            volume_range_l: (r.volume_l.min, r.volume_l.max),
            agitation_range_rpm: (r.agitation_rpm.min, r.agitation_rpm.max),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::OperatingDef;

    const MINIMAL: &str = r#"
reactors:
  - id: R1
    internal_diameter_m: 0.6
    tan_tan_height_m: 0.8
    bottom_dish: { type: "ASME 2:1 Elliptical" }
    impellers:
      - { diameter_m: 0.25, clearance_m: 0.05, height_m: 0.05, power_number: 1.5 }
    agitation_rpm: { min: 10, max: 100 }
    volume_l: { min: 60, max: 150 }
"#;

    #[test]
    fn minimal_case_takes_defaults() {
        let case = parse_case_yaml(MINIMAL).expect("parse");
        validate_case(&case).expect("valid");
        assert_eq!(case.sweep.volume_levels, 6);
        assert_eq!(case.bourne.pv_factor, 10.0);
        assert!(case.reaction.is_none());
    }

    #[test]
    fn duplicate_ids_fail_validation() {
        let mut case = parse_case_yaml(MINIMAL).expect("parse");
        case.reactors.push(case.reactors[0].clone());
        assert!(matches!(validate_case(&case), Err(AppError::Validation(_))));
    }

    #[test]
    fn non_positive_operating_point_fails_validation() {
        let mut case = parse_case_yaml(MINIMAL).expect("parse");
        case.operating_point = Some(OperatingDef {
            reactor: Some("R1".into()),
            agitation_rpm: Some(0.0),
            volume_l: None,
        });
        assert!(matches!(validate_case(&case), Err(AppError::Validation(_))));

        case.operating_point = Some(OperatingDef {
            reactor: None,
            agitation_rpm: Some(50.0),
            volume_l: Some(-1.0),
        });
        assert!(matches!(validate_case(&case), Err(AppError::Validation(_))));
    }

    #[test]
    fn empty_case_fails_validation() {
        assert!(matches!(
            validate_case(&CaseFile::default()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn bad_yaml_is_a_case_error() {
        assert!(matches!(parse_case_yaml("reactors: 3"), Err(AppError::Case(_))));
    }
}
