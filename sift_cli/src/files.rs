use std::fs;
use std::path::Path;

use sift_core::filter::FilterSet;

use crate::errors::CliError;
use crate::ui;

/// Read a filter set from a JSON file.
pub fn load_filter_set(path: &Path) -> Result<FilterSet, CliError> {
    let content = fs::read_to_string(path).map_err(|e| {
        ui::error_with_details(
            &format!("Failed to read filter file {}", path.display()),
            &e.to_string(),
        );
        CliError::FileError
    })?;

    serde_json::from_str(&content).map_err(|e| {
        ui::error_with_details(
            &format!("Filter file {} is not a valid filter", path.display()),
            &e.to_string(),
        );
        CliError::InputError
    })
}

/// Write a filter set as pretty JSON, creating parent directories.
pub fn save_filter_set(path: &Path, filter_set: &FilterSet) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|_| CliError::FileError)?;
    }

    let json = serde_json::to_string_pretty(filter_set).map_err(|e| {
        ui::error_with_details("Failed to serialize filter", &e.to_string());
        CliError::InputError
    })?;

    fs::write(path, json).map_err(|e| {
        ui::error_with_details(
            &format!("Failed to write filter file {}", path.display()),
            &e.to_string(),
        );
        CliError::FileError
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::filter::{Combinator, Condition, ItemCondition, ListMode, Operator};
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_filter_set() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("vip.json");

        let filter_set = FilterSet::new(Combinator::Or)
            .with_condition(Condition::new("firstName", Operator::StartsWith, "Ana"))
            .with_condition(Condition::without_value("birthDate", Operator::Exists))
            .with_condition(Condition::list(
                "data.Orders",
                ListMode::MatchAll,
                Combinator::And,
                vec![ItemCondition::new("total", Operator::GreaterThan, 100i64)],
            ));

        save_filter_set(&path, &filter_set).unwrap();
        let loaded = load_filter_set(&path).unwrap();

        assert_eq!(loaded, filter_set);
    }

    #[test]
    fn test_load_hand_written_filter() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("filter.json");
        fs::write(
            &path,
            r##"{"conditions": [{"field": "age", "type": "integer", "operator": "#gt", "value": "30"}]}"##,
        )
        .unwrap();

        let loaded = load_filter_set(&path).unwrap();

        assert_eq!(loaded.logic, Combinator::And);
        assert_eq!(loaded.conditions[0].operator, Some(Operator::GreaterThan));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_filter_set(&temp_dir.path().join("missing.json"));
        assert_eq!(result, Err(CliError::FileError));
    }

    #[test]
    fn test_load_invalid_filter() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        assert_eq!(load_filter_set(&path), Err(CliError::InputError));
    }
}
