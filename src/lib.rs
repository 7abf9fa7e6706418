//! HMM map-matching engine: road-network indexing, an observation/transition
//! probability model, and a segmented Viterbi decoder that reconstructs the
//! sequence of road segments a noisy GPS trajectory traversed.
//!
//! KML parsing, geodetic coordinate conversion, visualization output, and
//! the per-road statistics pass are external collaborators; this crate
//! consumes and produces plain in-memory structures.

pub mod algorithm;
pub mod driver;
pub mod map;
pub mod model;

pub use driver::{build_network, match_trajectory, match_trajectory_indexed};
pub use model::network::{NamedPolyline, RoadNetwork};
pub use model::network_error::NetworkError;
pub use model::sample::{TrajectorySample, UNKNOWN};
