/// Tracker workflows backed by SQLite files on disk
use habitflow::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod tracker_integration_tests {
    use super::*;

    fn open(path: &std::path::Path, today: &str) -> HabitTracker<SqliteStore, FixedClock> {
        let store = SqliteStore::new(path.to_path_buf()).expect("Failed to open store");
        HabitTracker::with_parts(store, FixedClock::new(today).unwrap())
    }

    #[test]
    fn test_habits_survive_reopen() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");

        let habit_id = {
            let tracker = open(temp_file.path(), "2024-03-09");
            let habit = tracker.add_habit("Morning walk").unwrap();
            tracker.toggle(&habit.id, None).unwrap();
            habit.id
        };

        let tracker = open(temp_file.path(), "2024-03-10");
        let result = tracker.toggle(&habit_id, None).unwrap();

        assert_eq!(result.habit.completed_dates, vec!["2024-03-09", "2024-03-10"]);
        assert_eq!(result.streaks.current_streak, 2);
        assert_eq!(result.streaks.longest_streak, 2);
    }

    #[test]
    fn test_overview_reflects_today() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = open(temp_file.path(), "2024-03-09");
        let habit = tracker.add_habit("Read").unwrap();
        tracker.toggle(&habit.id, None).unwrap();

        // Done yesterday but not today: no grace day
        let tracker = open(temp_file.path(), "2024-03-10");
        let overview: Vec<HabitOverview> = tracker
            .overview()
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(overview[0].streaks.current_streak, 0);
        assert_eq!(overview[0].streaks.longest_streak, 1);
        assert!(!overview[0].completed_today);
    }

    #[test]
    fn test_collection_written_by_another_client() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = SqliteStore::new(temp_file.path().to_path_buf()).unwrap();

        let stored: Vec<Habit> = serde_json::from_str(
            r#"[{
                "id": "1710000000000",
                "name": "Water",
                "createdAt": "2024-03-01T08:00:00Z",
                "completedDates": ["2024-03-10", "2024-03-09", "2024-03-10"]
            }]"#,
        )
        .unwrap();
        store.save(&stored).unwrap();

        let tracker = HabitTracker::with_parts(store, FixedClock::new("2024-03-10").unwrap());
        let overview: Vec<HabitOverview> = tracker
            .overview()
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(overview[0].habit.id.as_str(), "1710000000000");
        assert_eq!(overview[0].streaks.current_streak, 2);

        // Toggling a duplicated date removes every copy
        let result = tracker.toggle(&HabitId::from("1710000000000"), None).unwrap();
        assert_eq!(result.habit.completed_dates, vec!["2024-03-09"]);
    }

    #[test]
    fn test_reset_clears_database() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = open(temp_file.path(), "2024-03-10");
        tracker.add_habit("Stretch").unwrap();
        tracker.add_habit("Floss").unwrap();

        tracker.reset().unwrap();
        assert!(tracker.habits().is_empty());

        let reopened = open(temp_file.path(), "2024-03-10");
        assert!(reopened.habits().is_empty());
    }

    #[test]
    fn test_open_creates_database() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let tracker = HabitTracker::open(dir.path().join("habits.db")).unwrap();
        assert!(tracker.habits().is_empty());
        assert_eq!(tracker.today().len(), 10);
    }
}
