//! Display formatting for backend timestamps.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Format an RFC 3339 timestamp as `M/D/YYYY`.
///
/// Unparseable input is returned unchanged.
pub fn short_date(timestamp: &str) -> String {
    let format = format_description!("[month padding:none]/[day padding:none]/[year]");
    OffsetDateTime::parse(timestamp, &Rfc3339)
        .ok()
        .and_then(|dt| dt.format(&format).ok())
        .unwrap_or_else(|| timestamp.to_owned())
}
