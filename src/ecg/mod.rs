// src/ecg/mod.rs
pub mod cache;
pub mod plot;
pub mod synth;
pub use cache::{default_cache, get_waveform, EventKey, EventSpec, EventTable, WaveformCache};
pub use plot::{render_waveform_png, PlotStyle};
pub use synth::{
    generate_waveform, generate_waveform_seeded, WaveformOptions, WaveformPoint, WaveformSeries,
};
