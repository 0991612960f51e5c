// src/lib.rs
pub mod charts;
pub mod ecg;
pub mod error;
pub mod types;
pub use charts::{get_chart_data, ChartDescriptor, MetricsStore};
pub use ecg::{generate_waveform, get_waveform, EventKey, WaveformOptions, WaveformSeries};
pub use error::LookHeartError;
pub use types::{Category, TimePeriod};
