//! Terminal stand-in for the external map surface.
//!
//! Owns everything presentational. The view parameters below are set once at
//! startup and never touched by the core.

use chrono::{DateTime, Utc};
use radar_core::{DisplaySurface, RenderDirective, Status};

/// Initial map view, fixed for the lifetime of the surface.
const MAP_CENTER: (f64, f64) = (39.8283, -98.5795);
const MAP_ZOOM: u8 = 5;

pub struct TerminalSurface;

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSurface {
    pub fn new() -> Self {
        println!(
            "radar map | center ({:.4}, {:.4}) zoom {}",
            MAP_CENTER.0, MAP_CENTER.1, MAP_ZOOM
        );
        Self
    }
}

impl DisplaySurface for TerminalSurface {
    fn render(&mut self, directives: &[RenderDirective]) {
        println!("{} marker(s)", directives.len());
        for d in directives {
            println!(
                "  {}  r={} fill={}@{:.1} stroke={}@{:.1}",
                d.popup, d.radius, d.fill_color, d.fill_opacity, d.stroke_weight, d.stroke_opacity
            );
        }
    }

    fn set_status(&mut self, status: Status, last_update: Option<DateTime<Utc>>) {
        match last_update {
            Some(t) => println!("[{status}] last update {}", t.format("%H:%M:%S UTC")),
            None => println!("[{status}]"),
        }
    }
}
