use super::types::ApiError;
use chrono::{DateTime, Local, TimeZone, Utc};
use log::error;
use serde::{Deserialize, Serialize, Serializer};
/// Timestamp layout of the envelope: `02 Jan 06 15:04 MST`.
pub const TIME_LAYOUT: &str = "%d %b %y %H:%M";
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    #[default]
    Utc,
    Local,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    pub time_zone: TimeZoneMode,
    pub log_chains: bool,
}
impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            time_zone: TimeZoneMode::Utc,
            log_chains: true,
        }
    }
}
/// JSON body sent to API clients for a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "Error")]
    pub error: String,
    #[serde(rename = "Time")]
    pub time: String,
}
impl ErrorEnvelope {
    pub fn now(error: &ApiError, zone: TimeZoneMode) -> Self {
        Self {
            error: error.public_message().to_string(),
            time: format_now(zone),
        }
    }
}
pub fn format_time<Tz: TimeZone>(at: &DateTime<Tz>, zone: TimeZoneMode) -> String {
    match zone {
        TimeZoneMode::Utc => format!("{} UTC", at.with_timezone(&Utc).format(TIME_LAYOUT)),
        TimeZoneMode::Local => at.with_timezone(&Local).format("%d %b %y %H:%M %z").to_string(),
    }
}
pub fn format_now(zone: TimeZoneMode) -> String {
    format_time(&Utc::now(), zone)
}
impl ApiError {
    /// Envelope stamped with the current time.
    pub fn envelope(&self, zone: TimeZoneMode) -> ErrorEnvelope {
        ErrorEnvelope::now(self, zone)
    }
    pub fn to_json(&self) -> Vec<u8> {
        self.to_json_in(TimeZoneMode::Utc)
    }
    pub fn to_json_in(&self, zone: TimeZoneMode) -> Vec<u8> {
        // two string fields: serialization cannot fail
        serde_json::to_vec(&self.envelope(zone)).unwrap_or_default()
    }
    /// Logs the full chain and returns the client body. Meant for the
    /// outermost handler of a request.
    pub fn report(&self, config: &EnvelopeConfig) -> Vec<u8> {
        if config.log_chains {
            error!("{}", self.render_text());
        }
        self.to_json_in(config.time_zone)
    }
}
impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.envelope(TimeZoneMode::Utc).serialize(serializer)
    }
}
