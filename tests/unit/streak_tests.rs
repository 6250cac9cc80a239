/// Streak engine scenarios through the public API
use habitflow::*;

#[cfg(test)]
mod streak_unit_tests {
    use super::*;

    fn summary(current_streak: u32, longest_streak: u32) -> StreakSummary {
        StreakSummary {
            current_streak,
            longest_streak,
        }
    }

    #[test]
    fn test_documented_scenarios() {
        let cases: [(&[&str], &str, StreakSummary); 5] = [
            (&[], "2024-03-10", summary(0, 0)),
            (&["2024-03-08", "2024-03-09", "2024-03-10"], "2024-03-10", summary(3, 3)),
            (&["2024-03-01", "2024-03-05", "2024-03-06"], "2024-03-06", summary(2, 2)),
            (&["2024-02-28", "2024-02-29", "2024-03-01"], "2024-03-01", summary(3, 3)),
            (&["2024-03-09"], "2024-03-10", summary(0, 1)),
        ];

        for (dates, today, expected) in cases {
            assert_eq!(calculate_streaks(dates, today).unwrap(), expected, "{dates:?}");
        }
    }

    #[test]
    fn test_order_and_duplicates_do_not_matter() {
        let forward = ["2024-01-30", "2024-01-31", "2024-02-01", "2024-02-03"];
        let shuffled = ["2024-02-03", "2024-01-31", "2024-02-01", "2024-01-30", "2024-01-31"];

        for today in ["2024-02-01", "2024-02-03", "2024-02-04"] {
            assert_eq!(
                calculate_streaks(&forward, today).unwrap(),
                calculate_streaks(&shuffled, today).unwrap()
            );
        }
    }

    #[test]
    fn test_toggle_scenario() {
        let mut habit = Habit::new("Push-ups").unwrap();
        habit.completed_dates = vec!["2024-03-10".to_string()];

        let cleared = toggle_completion(&habit, "2024-03-10");
        assert!(cleared.completed_dates.is_empty());

        let restored = toggle_completion(&cleared, "2024-03-10");
        assert_eq!(restored.completed_dates, vec!["2024-03-10".to_string()]);
        assert_eq!(restored, habit);
    }

    #[test]
    fn test_streaks_follow_toggles() {
        let mut habit = Habit::new("Push-ups").unwrap();
        let today = "2024-03-10";

        for offset in (0..5).rev() {
            let day = date::add_days(today, -offset).unwrap();
            habit = toggle_completion(&habit, &day);
        }
        assert_eq!(calculate_streaks(&habit.completed_dates, today).unwrap(), summary(5, 5));

        habit = toggle_completion(&habit, "2024-03-08");
        assert_eq!(calculate_streaks(&habit.completed_dates, today).unwrap(), summary(2, 2));

        habit = toggle_completion(&habit, today);
        assert_eq!(calculate_streaks(&habit.completed_dates, today).unwrap(), summary(0, 2));
    }
}
