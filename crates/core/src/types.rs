/// Document ids are opaque strings assigned by the store (UUID v4).
pub type DocId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Render the current UTC time as the ISO-8601 string stored in documents.
///
/// All persisted timestamps are generated server-side through this function,
/// never taken from the client.
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
