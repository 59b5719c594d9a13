use serde::Serialize;

/// Credential record: one generated PO token plus its session identifier
/// and absolute expiry.
///
/// Either string may legitimately be empty — the platform SDK sometimes
/// yields partial data and the consuming backend decides what to do with it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub visitor_data: String,
    pub po_token: String,
    /// UNIX timestamp, milliseconds
    pub expires_at: i64,
}

impl Credential {
    pub fn new(visitor_data: String, po_token: String, expires_at: i64) -> Self {
        Self { visitor_data, po_token, expires_at }
    }

    /// A record is valid only while the current time is before its expiry.
    pub fn is_valid(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at
    }
}
