use chrono::{DateTime, Utc};

/// Format an update timestamp relative to `now`, coarsening with age.
///
/// Buckets match what the dashboard shows next to each repository card:
/// days under a month, months under a year, years beyond that.
pub fn format_relative(updated: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - updated).num_days().max(0);

    if days <= 1 {
        "1 day ago".to_string()
    } else if days < 30 {
        format!("{days} days ago")
    } else if days < 365 {
        format!("{} months ago", days / 30)
    } else {
        format!("{} years ago", days / 365)
    }
}
