// src/charts/mod.rs
pub mod descriptor;
pub mod dispatch;
pub mod period;
pub mod store;
pub use descriptor::{ChartDescriptor, ChartKind, ChartRow, SeriesSpec};
pub use dispatch::{chart_rule, get_chart_data, ChartRule, Source};
pub use period::PeriodKeys;
pub use store::{MetricsStore, Record};
