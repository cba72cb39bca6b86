use crate::error::FileError;
use crate::model::Workspace;
use std::path::Path;

/// Save a workspace to a JSON file.
pub fn save_workspace(workspace: &Workspace, path: &Path) -> Result<(), FileError> {
    let json = serde_json::to_string_pretty(workspace)?;
    std::fs::write(path, json).map_err(|source| FileError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// Load a workspace from a JSON file.
pub fn load_workspace(path: &Path) -> Result<Workspace, FileError> {
    let json = std::fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Campaign, StageDate, Task};
    use chrono::NaiveDate;

    #[test]
    fn workspace_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.planner.json");

        let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let mut campaign = Campaign::new("Launch").scheduled(day, day + chrono::Duration::days(9));
        campaign.stage_dates.push(StageDate::new("Review", day));
        let task = Task::new("Copy").in_campaign(campaign.id).scheduled(day, day);

        let mut workspace = Workspace::new("Q3");
        workspace.campaigns.push(campaign.clone());
        workspace.tasks.push(task.clone());
        save_workspace(&workspace, &path).unwrap();

        let loaded = load_workspace(&path).unwrap();
        assert_eq!(loaded.name, "Q3");
        assert_eq!(loaded.campaigns, vec![campaign]);
        assert_eq!(loaded.tasks, vec![task]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_workspace(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
