use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{RadarSample, RadarSnapshot};

use super::{FetchError, SnapshotSource};

/// The production snapshot source: one unauthenticated GET against the
/// configured radar endpoint per poll.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    url: String,
    http: Client,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SnapshotSource for HttpFeed {
    async fn fetch(&self) -> Result<RadarSnapshot, FetchError> {
        let res = self.http.get(&self.url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Protocol {
                status,
                body: truncate_body(&body),
            });
        }

        parse_snapshot(&body)
    }
}

/// Wire shape of the feed document: a feature collection of geometry-wrapped
/// points plus a metadata object. Required fields that are missing or
/// ill-typed fail the parse; unknown extra fields are ignored.
#[derive(Debug, Deserialize)]
struct FeedDocument {
    features: Vec<FeedFeature>,
    metadata: FeedMetadata,
}

#[derive(Debug, Deserialize)]
struct FeedFeature {
    geometry: FeedGeometry,
    properties: FeedProperties,
}

#[derive(Debug, Deserialize)]
struct FeedGeometry {
    /// `[lon, lat]`, GeoJSON axis order.
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct FeedProperties {
    reflectivity: f64,
    #[serde(rename = "precipitationLabel")]
    precipitation_label: String,
    color: String,
}

#[derive(Debug, Deserialize)]
struct FeedMetadata {
    #[serde(default)]
    timestamp: String,
    #[serde(rename = "totalPoints")]
    total_points: u64,
}

/// Parse a response body into a [`RadarSnapshot`].
///
/// Position comes from the geometry coordinate pair; the wire order is
/// `[lon, lat]` and the model stores `(lat, lon)`.
pub fn parse_snapshot(body: &str) -> Result<RadarSnapshot, FetchError> {
    let doc: FeedDocument = serde_json::from_str(body)?;

    let samples = doc
        .features
        .into_iter()
        .map(|f| RadarSample {
            lat: f.geometry.coordinates[1],
            lon: f.geometry.coordinates[0],
            reflectivity: f.properties.reflectivity,
            precipitation_label: f.properties.precipitation_label,
            color: f.properties.color,
        })
        .collect();

    Ok(RadarSnapshot {
        samples,
        timestamp: doc.metadata.timestamp,
        total_count: doc.metadata.total_points,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Cut on a char boundary; byte 200 may fall inside a multi-byte char.
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_feature_document() {
        let body = r##"{
            "features": [{
                "geometry": {"coordinates": [-100.0, 40.0]},
                "properties": {
                    "reflectivity": 25,
                    "color": "#ffff00",
                    "precipitationLabel": "moderate"
                }
            }],
            "metadata": {"totalPoints": 1}
        }"##;

        let snap = parse_snapshot(body).expect("valid document");
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.total_count, 1);

        let sample = &snap.samples[0];
        assert_eq!(sample.lat, 40.0, "lat is the second coordinate");
        assert_eq!(sample.lon, -100.0, "lon is the first coordinate");
        assert_eq!(sample.reflectivity, 25.0);
        assert_eq!(sample.color, "#ffff00");
        assert_eq!(sample.precipitation_label, "moderate");
    }

    #[test]
    fn parses_an_empty_feature_collection() {
        let body = r#"{
            "features": [],
            "metadata": {"timestamp": "2026-08-27T12:00:00Z", "totalPoints": 0}
        }"#;

        let snap = parse_snapshot(body).expect("empty collection is valid");
        assert!(snap.is_empty());
        assert_eq!(snap.total_count, 0);
        assert_eq!(snap.timestamp, "2026-08-27T12:00:00Z");
    }

    #[test]
    fn count_mismatch_with_metadata_is_tolerated() {
        let body = r##"{
            "features": [{
                "geometry": {"coordinates": [-100.0, 40.0]},
                "properties": {
                    "reflectivity": 45.5,
                    "color": "#ff0000",
                    "precipitationLabel": "heavy"
                }
            }],
            "metadata": {"totalPoints": 3}
        }"##;

        let snap = parse_snapshot(body).expect("mismatch must not fail the parse");
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.total_count, 3);
    }

    #[test]
    fn unknown_extra_fields_are_ignored() {
        let body = r##"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-87.6, 41.9]},
                "properties": {
                    "lat": 41.9,
                    "lon": -87.6,
                    "reflectivity": 12.0,
                    "color": "#00ff00",
                    "precipitationLabel": "light",
                    "station": "KLOT"
                }
            }],
            "metadata": {"timestamp": "t", "totalPoints": 1, "source": "demo"}
        }"##;

        let snap = parse_snapshot(body).expect("extra fields pass through");
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.samples[0].precipitation_label, "light");
    }

    #[test]
    fn missing_required_property_is_a_parse_failure() {
        // No reflectivity.
        let body = r##"{
            "features": [{
                "geometry": {"coordinates": [-100.0, 40.0]},
                "properties": {"color": "#ffff00", "precipitationLabel": "moderate"}
            }],
            "metadata": {"totalPoints": 1}
        }"##;

        let err = parse_snapshot(body).unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn ill_typed_field_is_a_parse_failure() {
        let body = r##"{
            "features": [{
                "geometry": {"coordinates": ["west", "north"]},
                "properties": {
                    "reflectivity": 25,
                    "color": "#ffff00",
                    "precipitationLabel": "moderate"
                }
            }],
            "metadata": {"totalPoints": 1}
        }"##;

        assert!(parse_snapshot(body).is_err());
    }

    #[test]
    fn non_json_body_is_a_parse_failure() {
        let err = parse_snapshot("<html>502 Bad Gateway</html>").unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let out = truncate_body(&long);
        assert!(out.len() < 250);
        assert!(out.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_cuts_on_a_char_boundary() {
        // A multi-byte char straddling the cut offset must not panic.
        let mut body = "x".repeat(199);
        body.push('€');
        body.push_str(&"y".repeat(100));

        let out = truncate_body(&body);
        assert_eq!(out, format!("{}...", "x".repeat(199)));

        // Boundary exactly at the cut keeps the whole char.
        let mut aligned = "x".repeat(197);
        aligned.push('€');
        aligned.push_str(&"y".repeat(100));
        let out = truncate_body(&aligned);
        assert_eq!(out, format!("{}€...", "x".repeat(197)));
    }
}
