use chrono::{DateTime, Utc};

/// `expiresAt` as sent by the server, RFC 3339 / ISO-8601 with offset.
pub fn parse_expires_at(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Seconds left until `expires_at`, negative when already expired.
pub fn seconds_until(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (expires_at - now).num_seconds()
}

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}
