//! Plain-text itinerary sheet for the print view.

use crate::model::trip::{PlanItem, Trip};
use std::fmt::Write;

/// Renders the title, date span and each day's plans as printable text.
///
/// Days are numbered from 1. A day without plans prints `(no plans)`.
pub fn render_print_sheet(trip: &Trip) -> String {
    let mut sheet = String::new();
    let _ = writeln!(sheet, "{}", trip.title);
    let _ = writeln!(sheet, "{} ~ {}", trip.start_date, trip.end_date);

    for (index, day) in trip.days.iter().enumerate() {
        let _ = writeln!(sheet);
        let _ = writeln!(sheet, "Day {} ({})", index + 1, day.date);
        if day.items.is_empty() {
            let _ = writeln!(sheet, "  (no plans)");
            continue;
        }
        for item in &day.items {
            let _ = writeln!(sheet, "  {}", plan_line(item));
            if let Some(memo) = item.memo.as_deref().filter(|memo| !memo.is_empty()) {
                let _ = writeln!(sheet, "      {memo}");
            }
        }
    }
    sheet
}

fn plan_line(item: &PlanItem) -> String {
    let mut line = match item.time.as_deref().filter(|time| !time.is_empty()) {
        Some(time) => format!("{time:<5} {}", item.title),
        None => format!("{:<5} {}", "", item.title),
    };
    if let Some(location) = item.location.as_deref().filter(|loc| !loc.is_empty()) {
        let _ = write!(line, " @ {location}");
    }
    line
}
