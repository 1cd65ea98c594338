use chrono::{Duration, NaiveDate, NaiveDateTime};
use loadshed_core::{
    AreaPrettifier, EventProjector, NextOutageStatus, area_names, canonical_area_id,
    format_duration, next_outage, segment_records, sort_chronologically,
};
use loadshed_ingest::parse_machine_friendly;

const PAYLOAD: &str = "\
area_name,start,finsh,stage,source
city-of-cape-town-area-15,2024-01-02T14:00:00+02:00,2024-01-02T16:30:00+02:00,4,https://twitter.com/Eskom_SA
city-of-cape-town-area-15,2024-01-01T22:00:00+02:00,2024-01-02T02:00:00+02:00,4,https://twitter.com/Eskom_SA
western-cape-stellenbosch,2024-01-01T10:00:00+02:00,2024-01-03T10:00:00+02:00,6,https://twitter.com/Eskom_SA
city-of-cape-town-area-15,2024-01-02T06:00:00+02:00,2024-01-02T08:00
";

fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

/// Real-shaped payload: one bad line is reported, the rest flows through.
#[test]
fn payload_flows_through_every_stage() {
    let parsed = parse_machine_friendly(PAYLOAD);
    assert_eq!(parsed.records.len(), 3);
    assert_eq!(parsed.warnings.len(), 1);
    assert_eq!(parsed.warnings[0].line(), 5);

    assert_eq!(
        area_names(&parsed.records),
        vec!["city-of-cape-town-area-15", "western-cape-stellenbosch"]
    );

    let area = canonical_area_id("city-of-cape-town-area-15.ics");
    let mut records = parsed.records.clone();
    sort_chronologically(&mut records);

    let projector = EventProjector::default().with_prettifier(AreaPrettifier::standard().unwrap());
    let events = projector.project(&records, &area);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].title, "🔌 Cape Town Area 15 Stage 4😤");
    assert_eq!(events[0].start, at(1, 22, 0));

    // Between the two outages on day 2.
    match next_outage(&events, at(2, 10, 0)) {
        NextOutageStatus::Upcoming { starts_in } => assert_eq!(format_duration(starts_in), "4 hours"),
        other => panic!("expected upcoming, got {other:?}"),
    }
    assert_eq!(
        next_outage(&events, at(2, 1, 30)),
        NextOutageStatus::Ongoing { ends_in: Duration::minutes(30) }
    );
    assert_eq!(next_outage(&events, at(3, 0, 0)), NextOutageStatus::NoUpcomingOutage);
}

#[test]
fn grid_view_splits_multi_day_outages() {
    let parsed = parse_machine_friendly(PAYLOAD);
    let segments = segment_records(&parsed.records);

    let stellenbosch = EventProjector::default().project(&segments, "western-cape-stellenbosch");
    let spans: Vec<_> = stellenbosch.iter().map(|e| (e.start, e.end)).collect();
    assert_eq!(
        spans,
        vec![
            (at(1, 10, 0), at(2, 0, 0)),
            (at(2, 0, 0), at(3, 0, 0)),
            (at(3, 0, 0), at(3, 10, 0)),
        ]
    );

    let groups: Vec<usize> = segments
        .iter()
        .filter(|s| s.area_name == "western-cape-stellenbosch")
        .map(|s| s.group_id)
        .collect();
    assert!(groups.iter().all(|g| *g == groups[0]));
}

#[test]
fn ongoing_status_over_segmented_events() {
    let parsed = parse_machine_friendly(PAYLOAD);
    let mut segments = segment_records(&parsed.records);
    sort_chronologically(&mut segments);
    let events = EventProjector::default().project(&segments, "city-of-cape-town-area-15");

    // Segments end at midnight, so the banner reports the first day piece.
    assert_eq!(
        next_outage(&events, at(1, 23, 0)),
        NextOutageStatus::Ongoing { ends_in: Duration::hours(1) }
    );
}

#[test]
fn unknown_area_is_an_empty_result_not_an_error() {
    let parsed = parse_machine_friendly(PAYLOAD);
    let events = EventProjector::default().project(&parsed.records, "atlantis");
    assert!(events.is_empty());
    assert_eq!(next_outage(&events, at(1, 0, 0)), NextOutageStatus::NoUpcomingOutage);
    assert_eq!(next_outage(&events, at(1, 0, 0)).banner(), "No loadshedding scheduled");
}
