//! The narrow contract between the core and the external display surface.
//!
//! The core hands the surface one [`RenderDirective`] per sample plus a
//! status line; panning, zooming and tiling belong to the surface and are
//! never reprogrammed from here.

use chrono::{DateTime, Utc};

use crate::encode::{fill_opacity, marker_radius};
use crate::model::{RadarSample, RadarSnapshot, Status};

/// Stroke parameters are fixed for every marker.
pub const STROKE_WEIGHT: f64 = 1.0;
pub const STROKE_OPACITY: f64 = 0.8;

/// Everything a display surface needs to draw one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDirective {
    /// `(lat, lon)`.
    pub position: (f64, f64),
    pub radius: f64,
    /// Feed-supplied hex color, passed through unmodified.
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_weight: f64,
    pub stroke_opacity: f64,
    /// Human-readable popup text for the marker.
    pub popup: String,
}

impl RenderDirective {
    pub fn for_sample(sample: &RadarSample) -> Self {
        Self {
            position: (sample.lat, sample.lon),
            radius: marker_radius(sample.reflectivity),
            fill_color: sample.color.clone(),
            fill_opacity: fill_opacity(sample.reflectivity),
            stroke_weight: STROKE_WEIGHT,
            stroke_opacity: STROKE_OPACITY,
            popup: popup_text(sample),
        }
    }
}

/// One directive per sample, in feed order.
pub fn directives(snapshot: &RadarSnapshot) -> Vec<RenderDirective> {
    snapshot.samples.iter().map(RenderDirective::for_sample).collect()
}

/// Popup body: coordinates to 3 decimal places, reflectivity to 1, the
/// precipitation label, and the color swatch.
pub fn popup_text(sample: &RadarSample) -> String {
    format!(
        "({:.3}, {:.3}) {:.1} dBZ {} [{}]",
        sample.lat, sample.lon, sample.reflectivity, sample.precipitation_label, sample.color
    )
}

/// What the core expects of the rendering collaborator. Implementations own
/// everything presentational: map tiles, widgets, layout.
pub trait DisplaySurface {
    /// Replace all markers with the given set. An empty slice clears the map.
    fn render(&mut self, directives: &[RenderDirective]);

    /// Update the status indicator and, when known, the last successful
    /// update time.
    fn set_status(&mut self, status: Status, last_update: Option<DateTime<Utc>>);
}
