//! Core library for the `radar` map viewer.
//!
//! This crate defines:
//! - The refresh lifecycle: a poller that re-fetches the remote radar feed
//!   on a fixed interval and publishes the live [`PollState`]
//! - Visual encoding of reflectivity into marker radius and opacity
//! - The render-directive contract consumed by a display surface
//! - Configuration handling (endpoint URL, refresh interval)
//!
//! It is used by `radar-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod encode;
pub mod feed;
pub mod model;
pub mod poller;
pub mod render;

pub use config::{Config, DEFAULT_ENDPOINT_URL};
pub use encode::{fill_opacity, marker_radius};
pub use feed::{FetchError, SnapshotSource, http::HttpFeed};
pub use model::{PollState, RadarSample, RadarSnapshot, Status};
pub use poller::{DEFAULT_REFRESH_INTERVAL, Poller};
pub use render::{DisplaySurface, RenderDirective, directives, popup_text};
