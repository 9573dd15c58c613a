#[cfg(test)]
mod tests {
    use crate::logic::{sort_chronologically, start_sort_key};
    use crate::models::{EventDateTime, RawProviderEvent};
    use crate::normalize::{normalize, DEFAULT_TITLE};
    use proptest::prelude::*;

    fn visibility_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("default".to_string())),
            Just(Some("public".to_string())),
            Just(Some("private".to_string())),
            Just(Some("PRIVATE".to_string())),
            "[a-z]{0,12}".prop_map(Some),
        ]
    }

    fn time_strategy() -> impl Strategy<Value = EventDateTime> {
        prop_oneof![
            (2000i32..2100, 1u32..13, 1u32..29).prop_map(|(y, m, d)| EventDateTime {
                date: Some(format!("{:04}-{:02}-{:02}", y, m, d)),
                ..Default::default()
            }),
            (2000i32..2100, 1u32..13, 1u32..29, 0u32..24).prop_map(|(y, m, d, h)| {
                EventDateTime {
                    date_time: Some(format!("{:04}-{:02}-{:02}T{:02}:00:00Z", y, m, d, h)),
                    ..Default::default()
                }
            }),
        ]
    }

    proptest! {
        // Titles are never empty, whatever the provider sends
        #[test]
        fn test_title_never_empty(summary in proptest::option::of(".{0,40}")) {
            let raw = RawProviderEvent {
                id: Some("p".to_string()),
                summary: summary.clone(),
                start: Some(EventDateTime { date: Some("2025-10-01".to_string()), ..Default::default() }),
                ..Default::default()
            };
            let event = normalize(&raw, None);
            prop_assert!(!event.title.is_empty());
            match summary {
                Some(s) if !s.trim().is_empty() => prop_assert_eq!(event.title, s),
                _ => prop_assert_eq!(event.title, DEFAULT_TITLE),
            }
        }

        // Only an explicit private marker hides an event
        #[test]
        fn test_public_unless_private(visibility in visibility_strategy()) {
            let raw = RawProviderEvent {
                id: Some("p".to_string()),
                visibility: visibility.clone(),
                start: Some(EventDateTime { date: Some("2025-10-01".to_string()), ..Default::default() }),
                ..Default::default()
            };
            let expected = !visibility
                .as_deref()
                .is_some_and(|v| v.eq_ignore_ascii_case("private"));
            prop_assert_eq!(normalize(&raw, None).is_public, expected);
        }

        // All-day exactly when the start is a bare date; start copied verbatim
        #[test]
        fn test_all_day_iff_date_only(start in time_strategy(), end in proptest::option::of(time_strategy())) {
            let raw = RawProviderEvent {
                id: Some("p".to_string()),
                start: Some(start.clone()),
                end: end.clone(),
                ..Default::default()
            };
            let event = normalize(&raw, None);

            prop_assert_eq!(event.is_all_day, start.date_time.is_none());
            prop_assert_eq!(Some(event.start.as_str()), start.value());
            match end {
                Some(end) => prop_assert_eq!(Some(event.end.as_str()), end.value()),
                None => prop_assert_eq!(&event.end, &event.start),
            }
        }

        // Normalizing the same record twice gives the same event
        #[test]
        fn test_normalize_is_deterministic(
            start in time_strategy(),
            summary in proptest::option::of("[A-Za-z ]{0,20}"),
            visibility in visibility_strategy(),
        ) {
            let raw = RawProviderEvent {
                id: Some("p".to_string()),
                summary,
                visibility,
                start: Some(start),
                ..Default::default()
            };
            prop_assert_eq!(normalize(&raw, Some("Club")), normalize(&raw, Some("Club")));
        }

        // The merge order is chronological and stable for equal starts
        #[test]
        fn test_sort_is_ordered_and_stable(starts in proptest::collection::vec(time_strategy(), 0..40)) {
            let mut events: Vec<_> = starts
                .into_iter()
                .enumerate()
                .map(|(i, start)| {
                    let raw = RawProviderEvent {
                        id: Some(i.to_string()),
                        start: Some(start),
                        ..Default::default()
                    };
                    normalize(&raw, None)
                })
                .collect();
            let count = events.len();
            sort_chronologically(&mut events);

            prop_assert_eq!(events.len(), count);
            for pair in events.windows(2) {
                let left = start_sort_key(&pair[0].start);
                let right = start_sort_key(&pair[1].start);
                prop_assert!(left <= right);
                if left == right {
                    let left_index: usize = pair[0].id.parse().unwrap();
                    let right_index: usize = pair[1].id.parse().unwrap();
                    prop_assert!(left_index < right_index);
                }
            }
        }
    }
}
