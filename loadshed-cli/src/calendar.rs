use loadshed_core::DisplayEvent;

/// Emit an iCalendar document with one VEVENT per event.
///
/// Times are written as floating local times (no `Z`, no TZID), matching the
/// schedule's single implicit zone.
pub fn events_to_ics(events: &[DisplayEvent], area: &str) -> String {
    let mut s = String::new();
    s.push_str("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//loadshed//EN\r\n");
    s.push_str(&format!("X-WR-CALNAME:{}\r\n", escape_ics(area)));

    for (i, e) in events.iter().enumerate() {
        let dtstart = e.start.format("%Y%m%dT%H%M%S");
        let dtend = e.end.format("%Y%m%dT%H%M%S");

        s.push_str("BEGIN:VEVENT\r\n");
        s.push_str(&format!("UID:{}-{}-{}@loadshed\r\n", area, dtstart, i));
        s.push_str(&format!("DTSTART:{}\r\n", dtstart));
        s.push_str(&format!("DTEND:{}\r\n", dtend));
        s.push_str(&format!("SUMMARY:{}\r\n", escape_ics(&e.title)));
        s.push_str("END:VEVENT\r\n");
    }

    s.push_str("END:VCALENDAR\r\n");
    s
}

fn escape_ics(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}
