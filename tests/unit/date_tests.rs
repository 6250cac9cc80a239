/// Date model checks through the public API
use habitflow::*;

#[cfg(test)]
mod date_unit_tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_add_days_round_trips_across_a_leap_cycle() {
        let mut day = "2023-01-01".to_string();
        for _ in 0..(365 * 4 + 1) {
            let next = date::add_days(&day, 1).unwrap();
            assert_eq!(date::add_days(&next, -1).unwrap(), day);
            assert_eq!(date::compare(&day, &next), Ordering::Less);
            day = next;
        }
        assert_eq!(day, "2027-01-01");
    }

    #[test]
    fn test_parse_components() {
        assert_eq!(date::parse("2024-02-29").unwrap(), (2024, 2, 29));
        assert!(matches!(
            date::parse("2024-02-30"),
            Err(DomainError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_clock_injection() {
        let clock = FixedClock::new("2024-03-10").unwrap();
        assert_eq!(clock.today(), "2024-03-10");
    }
}
