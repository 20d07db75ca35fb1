// Engine library root: series synthesis, indicators and signal analysis.

pub mod config;
pub mod error;
pub mod indicators;
pub mod payload;
pub mod signals;
pub mod snapshot;
pub mod strategy;
pub mod synth;

pub use error::EngineError;
pub use payload::AnalysisPayload;
pub use snapshot::SnapshotBuilder;
