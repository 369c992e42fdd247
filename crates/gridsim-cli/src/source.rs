use std::path::{Path, PathBuf};

use gridsim_history::source::{EventInfo, RaceSession, SessionDataSource};

use crate::util;

/// Session source backed by JSON files on disk.
///
/// ```text
/// <root>/<year>/schedule.json   list of events
/// <root>/<year>/<round>.json    race session of one event
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySessionSource {
    root: PathBuf,
}

impl DirectorySessionSource {
    pub fn new<P>(root: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { root: root.into() }
    }

    fn season_dir(&self, year: u16) -> PathBuf {
        self.root.join(year.to_string())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SessionDataSource for DirectorySessionSource {
    type Error = anyhow::Error;

    fn event_schedule(&self, year: u16) -> anyhow::Result<Vec<EventInfo>> {
        util::read_json_file("schedule", self.season_dir(year).join("schedule.json"))
    }

    fn race_session(&self, year: u16, event: &EventInfo) -> anyhow::Result<RaceSession> {
        let path = self.season_dir(year).join(format!("{}.json", event.round));
        tracing::debug!(path = %path.display(), "reading race session");
        util::read_json_file("race session", path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use gridsim_history::season::build_season_dataset;

    use super::*;

    fn write(root: &Path, name: &str, contents: &str) {
        let path = root.join("2024").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_season_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "schedule.json",
            r#"[
                { "round": 1, "name": "Bahrain Grand Prix" },
                { "round": 2, "name": "Chinese Grand Prix", "format": "sprint" },
                { "round": 3, "name": "Australian Grand Prix", "format": "conventional" }
            ]"#,
        );
        write(
            dir.path(),
            "1.json",
            r#"{
                "results": [
                    { "driver": "AAA", "team": "Alpha", "position": 1, "points": 25.0 },
                    { "driver": "BBB", "team": "Beta", "position": null, "points": 0.0 }
                ],
                "laps": [
                    { "driver": "AAA", "lap_time": 90.0 },
                    { "driver": "AAA", "lap_time": 92.0 }
                ]
            }"#,
        );

        let source = DirectorySessionSource::new(dir.path());
        let dataset = build_season_dataset(&source, 2024).unwrap();

        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[0].driver, "AAA");
        assert_eq!(dataset.records[0].fastest_lap, Some(90.0));
        assert_eq!(dataset.records[1].finish_position, None);

        // round 3 has no session file
        assert_eq!(dataset.skipped.len(), 1);
        assert_eq!(dataset.skipped[0].round, 3);
        assert!(dataset.skipped[0].reason.contains("3.json"));
    }

    #[test]
    fn test_missing_schedule_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySessionSource::new(dir.path());
        assert!(build_season_dataset(&source, 2024).is_err());
    }
}
