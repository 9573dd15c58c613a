#[cfg(test)]
mod tests {
    use crate::error::{FailureKind, SourceError};
    use crate::logic::{
        sort_chronologically, start_sort_key, AggregatorSettings, CalendarAggregator,
    };
    use crate::models::{CalendarSource, Event, EventDateTime, EventProvider, RawProviderEvent};
    use crate::source::{CalendarSourceClient, MockCalendarSourceClient};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use huntclub_config::{CalendarConfig, CalendarSourceConfig};
    use std::sync::Arc;
    use std::time::Duration;

    fn raw(id: &str, summary: &str, start: &str) -> RawProviderEvent {
        let time = if start.contains('T') {
            EventDateTime {
                date_time: Some(start.to_string()),
                ..Default::default()
            }
        } else {
            EventDateTime {
                date: Some(start.to_string()),
                ..Default::default()
            }
        };
        RawProviderEvent {
            id: Some(id.to_string()),
            summary: Some(summary.to_string()),
            start: Some(time.clone()),
            end: Some(time),
            ..Default::default()
        }
    }

    fn event(id: &str, start: &str) -> Event {
        Event {
            id: id.to_string(),
            title: id.to_string(),
            start: start.to_string(),
            end: start.to_string(),
            description: String::new(),
            location: String::new(),
            is_all_day: !start.contains('T'),
            is_public: true,
            source: EventProvider::Google,
            calendar_name: None,
        }
    }

    fn two_sources() -> Vec<CalendarSource> {
        vec![
            CalendarSource::new("club", "Club Calendar"),
            CalendarSource::new("partner", "Partner Club"),
        ]
    }

    fn aggregator(
        client: impl CalendarSourceClient + 'static,
        sources: Vec<CalendarSource>,
    ) -> CalendarAggregator {
        CalendarAggregator::new(Arc::new(client), sources, AggregatorSettings::default())
    }

    #[tokio::test]
    async fn test_merges_and_tags_all_sources() {
        let mut client = MockCalendarSourceClient::new();
        client
            .expect_fetch_events()
            .times(2)
            .returning(|source_id, _, _| match source_id {
                "club" => Ok(vec![
                    raw("c1", "Work day", "2025-10-04T07:00:00-05:00"),
                    raw("c2", "Banquet", "2025-10-25T18:00:00-05:00"),
                ]),
                _ => Ok(vec![raw("p1", "Youth hunt", "2025-10-04")]),
            });

        let events = aggregator(client, two_sources())
            .get_events("2025-10-01", "2025-10-31")
            .await;

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        // 2025-10-04 (midnight UTC) sorts before 07:00 at -05:00 (12:00 UTC)
        assert_eq!(ids, vec!["p1", "c1", "c2"]);
        assert_eq!(events[0].calendar_name.as_deref(), Some("Partner Club"));
        assert!(events[0].is_all_day);
        assert_eq!(events[1].calendar_name.as_deref(), Some("Club Calendar"));
    }

    #[tokio::test]
    async fn test_failed_source_is_isolated() {
        let mut client = MockCalendarSourceClient::new();
        client
            .expect_fetch_events()
            .returning(|source_id, _, _| match source_id {
                "club" => Ok(vec![
                    raw("c1", "Work day", "2025-10-04T07:00:00-05:00"),
                    raw("c2", "Banquet", "2025-10-25T18:00:00-05:00"),
                ]),
                _ => Err(SourceError::Rejected {
                    status: 403,
                    message: "The caller does not have permission".to_string(),
                }),
            });

        let report = aggregator(client, two_sources())
            .collect("2025-10-01", "2025-10-31")
            .await;

        assert_eq!(report.sources_queried, 2);
        assert_eq!(report.events.len(), 2);
        assert!(report
            .events
            .iter()
            .all(|e| e.calendar_name.as_deref() == Some("Club Calendar")));

        assert_eq!(report.diagnostics.len(), 1);
        let diagnostic = &report.diagnostics[0];
        assert_eq!(diagnostic.calendar_name, "Partner Club");
        assert_eq!(diagnostic.source_id, "partner");
        assert_eq!(diagnostic.kind, FailureKind::Rejected);
        assert_eq!(diagnostic.status, Some(403));
        assert!(diagnostic.message.contains("does not have permission"));
    }

    #[tokio::test]
    async fn test_all_sources_failing_yields_empty_list() {
        let mut client = MockCalendarSourceClient::new();
        client
            .expect_fetch_events()
            .returning(|_, _, _| Err(SourceError::Unreachable("connection refused".to_string())));

        let report = aggregator(client, two_sources())
            .collect("2025-10-01", "2025-10-31")
            .await;

        assert!(report.events.is_empty());
        assert_eq!(report.diagnostics.len(), 2);
        assert!(report
            .diagnostics
            .iter()
            .all(|d| d.kind == FailureKind::Unreachable && d.status.is_none()));
    }

    #[tokio::test]
    async fn test_no_sources_makes_no_calls() {
        let mut client = MockCalendarSourceClient::new();
        client.expect_fetch_events().times(0);

        let report = aggregator(client, Vec::new())
            .collect("2025-10-01", "2025-10-31")
            .await;

        assert!(report.events.is_empty());
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.sources_queried, 0);
    }

    #[tokio::test]
    async fn test_range_is_passed_through() {
        let mut client = MockCalendarSourceClient::new();
        client
            .expect_fetch_events()
            .withf(|source_id, start, end| {
                source_id == "club" && start == "2025-10-01" && end == "2025-10-31"
            })
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));

        let sources = vec![CalendarSource::new("club", "Club Calendar")];
        let events = aggregator(client, sources)
            .get_events("2025-10-01", "2025-10-31")
            .await;
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_unsorted_keeps_source_order() {
        let mut client = MockCalendarSourceClient::new();
        client
            .expect_fetch_events()
            .returning(|source_id, _, _| match source_id {
                "club" => Ok(vec![raw("late", "Late", "2025-10-30")]),
                _ => Ok(vec![raw("early", "Early", "2025-10-01")]),
            });

        let settings = AggregatorSettings {
            sort_chronologically: false,
            ..Default::default()
        };
        let events = CalendarAggregator::new(Arc::new(client), two_sources(), settings)
            .get_events("2025-10-01", "2025-10-31")
            .await;

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "early"]);
    }

    // A source that never answers on its own.
    struct StalledSource {
        delay: Duration,
    }

    #[async_trait]
    impl CalendarSourceClient for StalledSource {
        async fn fetch_events(
            &self,
            source_id: &str,
            _range_start: &str,
            _range_end: &str,
        ) -> Result<Vec<RawProviderEvent>, SourceError> {
            tokio::time::sleep(self.delay).await;
            Ok(vec![raw(source_id, "Slow", "2025-10-10")])
        }
    }

    // Panics for one calendar id, answers normally for every other.
    struct PanicsFor {
        source_id: &'static str,
    }

    #[async_trait]
    impl CalendarSourceClient for PanicsFor {
        async fn fetch_events(
            &self,
            source_id: &str,
            _range_start: &str,
            _range_end: &str,
        ) -> Result<Vec<RawProviderEvent>, SourceError> {
            if source_id == self.source_id {
                panic!("provider client bug for {}", source_id);
            }
            Ok(vec![raw("healthy-1", "Work day", "2025-10-04T07:00:00-05:00")])
        }
    }

    #[tokio::test]
    async fn test_panicking_source_is_isolated() {
        let report = aggregator(PanicsFor { source_id: "partner" }, two_sources())
            .collect("2025-10-01", "2025-10-31")
            .await;

        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].id, "healthy-1");
        assert_eq!(report.events[0].calendar_name.as_deref(), Some("Club Calendar"));

        assert_eq!(report.diagnostics.len(), 1);
        let diagnostic = &report.diagnostics[0];
        assert_eq!(diagnostic.calendar_name, "Partner Club");
        assert_eq!(diagnostic.source_id, "partner");
        assert_eq!(diagnostic.kind, FailureKind::Panicked);
        assert!(diagnostic.message.contains("provider client bug for partner"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_source_times_out() {
        let settings = AggregatorSettings {
            source_timeout: Duration::from_secs(10),
            ..Default::default()
        };
        let aggregator = CalendarAggregator::new(
            Arc::new(StalledSource {
                delay: Duration::from_secs(3600),
            }),
            two_sources(),
            settings,
        );

        let report = aggregator.collect("2025-10-01", "2025-10-31").await;
        assert!(report.events.is_empty());
        assert_eq!(report.diagnostics.len(), 2);
        assert!(report
            .diagnostics
            .iter()
            .all(|d| d.kind == FailureKind::Timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sources_are_fetched_concurrently() {
        let settings = AggregatorSettings {
            source_timeout: Duration::from_secs(10),
            ..Default::default()
        };
        let sources = vec![
            CalendarSource::new("a", "A"),
            CalendarSource::new("b", "B"),
            CalendarSource::new("c", "C"),
        ];
        let aggregator = CalendarAggregator::new(
            Arc::new(StalledSource {
                delay: Duration::from_secs(6),
            }),
            sources,
            settings,
        );

        let started = tokio::time::Instant::now();
        let report = aggregator.collect("2025-10-01", "2025-10-31").await;

        // Sequential fetching would need 18s and trip the 10s timeouts.
        assert_eq!(report.events.len(), 3);
        assert!(report.diagnostics.is_empty());
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_start_sort_key() {
        assert_eq!(
            start_sort_key("2025-10-04T07:00:00-05:00"),
            Some(Utc.with_ymd_and_hms(2025, 10, 4, 12, 0, 0).unwrap())
        );
        assert_eq!(
            start_sort_key("2025-10-04"),
            Some(Utc.with_ymd_and_hms(2025, 10, 4, 0, 0, 0).unwrap())
        );
        assert_eq!(start_sort_key("next tuesday"), None);
        assert_eq!(start_sort_key(""), None);
    }

    #[test]
    fn test_sort_is_stable_and_puts_unparseable_last() {
        let mut events = vec![
            event("bad-1", "soon"),
            event("b", "2025-10-04T12:00:00Z"),
            event("a", "2025-10-04T07:00:00-05:00"),
            event("first", "2025-10-01"),
            event("bad-2", ""),
        ];
        sort_chronologically(&mut events);

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        // "b" and "a" are the same instant and keep their input order.
        assert_eq!(ids, vec!["first", "b", "a", "bad-1", "bad-2"]);
    }

    #[test]
    fn test_from_config_without_credential_is_disabled() {
        let config = CalendarConfig {
            api_key: None,
            sources: vec![CalendarSourceConfig {
                id: Some("club".to_string()),
                display_name: "Club Calendar".to_string(),
            }],
            ..Default::default()
        };
        assert!(CalendarAggregator::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_from_config_skips_sources_without_id() {
        let config = CalendarConfig {
            api_key: Some("key".to_string()),
            timeout_secs: Some(4),
            sort_chronologically: false,
            sources: vec![
                CalendarSourceConfig {
                    id: Some(" club ".to_string()),
                    display_name: "Club Calendar".to_string(),
                },
                CalendarSourceConfig {
                    id: None,
                    display_name: "Unfinished".to_string(),
                },
                CalendarSourceConfig {
                    id: Some(String::new()),
                    display_name: "Blank".to_string(),
                },
            ],
            ..Default::default()
        };

        let aggregator = CalendarAggregator::from_config(&config).unwrap().unwrap();
        assert_eq!(
            aggregator.sources(),
            &[CalendarSource::new("club", "Club Calendar")]
        );
        assert_eq!(aggregator.settings().source_timeout, Duration::from_secs(4));
        assert!(!aggregator.settings().sort_chronologically);
    }
}
