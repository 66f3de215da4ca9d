use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use yew::{Html, ToHtml, html};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp(pub DateTime<Utc>);

impl ToHtml for Timestamp {
    fn to_html(&self) -> Html {
        html! { self.0.format("%Y-%m-%d %H:%M:%S").to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn timestamp_formats_for_display() {
        let dt = Utc.with_ymd_and_hms(2026, 2, 14, 9, 15, 0).unwrap();
        let timestamp = Timestamp(dt);

        assert_eq!(timestamp.to_html(), html! { "2026-02-14 09:15:00" });
    }

    #[test]
    fn timestamp_serializes_as_rfc3339() {
        let dt = Utc.with_ymd_and_hms(2026, 2, 14, 9, 15, 0).unwrap();
        let serialized = serde_json::to_string(&Timestamp(dt)).unwrap();

        assert_eq!(serialized, "\"2026-02-14T09:15:00Z\"");

        let deserialized: Timestamp = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.0, dt);
    }
}
