use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::charts::store::Record;

pub const ROSE: &str = "#fda4af";
pub const SKY: &str = "#93c5fd";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Line,
    Bar,
    DualLine,
    DualBar,
}

impl ChartKind {
    pub fn series_count(&self) -> usize {
        match self {
            ChartKind::Line | ChartKind::Bar => 1,
            ChartKind::DualLine | ChartKind::DualBar => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSpec {
    pub y_key: String,
    pub color: String,
}

/// Renderer-agnostic chart description. `series` holds one entry for
/// single charts and two for dual charts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescriptor {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: Vec<Record>,
    pub x_key: String,
    pub series: Vec<SeriesSpec>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

/// One x position with the y value of every series, in `series` order.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartRow {
    pub x: String,
    pub ys: Vec<Option<f64>>,
}

impl ChartDescriptor {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flatten `data` using only `x_key` and the series keys.
    ///
    /// Missing or non-numeric y values come back as `None`.
    pub fn rows(&self) -> Vec<ChartRow> {
        self.data
            .iter()
            .map(|record| ChartRow {
                x: record.get(&self.x_key).map(display_x).unwrap_or_default(),
                ys: self
                    .series
                    .iter()
                    .map(|s| record.get(&s.y_key).and_then(Value::as_f64))
                    .collect(),
            })
            .collect()
    }
}

fn display_x(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Static look of a chart; combined with data to form a descriptor.
#[derive(Debug)]
pub struct ChartStyle {
    pub kind: ChartKind,
    pub x_key: &'static str,
    /// `(y_key, color)` per series.
    pub series: &'static [(&'static str, &'static str)],
    pub domain: Option<[f64; 2]>,
    pub label: Option<&'static str>,
}

impl ChartStyle {
    pub fn describe(&self, data: Vec<Record>) -> ChartDescriptor {
        debug_assert_eq!(self.series.len(), self.kind.series_count());
        ChartDescriptor {
            kind: self.kind,
            data,
            x_key: self.x_key.to_owned(),
            series: self
                .series
                .iter()
                .map(|(y_key, color)| SeriesSpec {
                    y_key: (*y_key).to_owned(),
                    color: (*color).to_owned(),
                })
                .collect(),
            domain: self.domain,
            label: self.label.map(str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    const DUAL: ChartStyle = ChartStyle {
        kind: ChartKind::DualBar,
        x_key: "name",
        series: &[("steps", ROSE), ("distance", SKY)],
        domain: None,
        label: None,
    };
    #[test]
    fn rows_follow_descriptor_keys() {
        let record = json!({ "name": "Mon", "steps": 8000, "distance": "n/a" });
        let descriptor = DUAL.describe(vec![record.as_object().cloned().unwrap()]);
        let rows = descriptor.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].x, "Mon");
        assert_eq!(rows[0].ys, vec![Some(8000.0), None]);
    }
    #[test]
    fn serialises_with_chart_field_names() {
        let value = serde_json::to_value(DUAL.describe(Vec::new())).unwrap();
        assert_eq!(value["type"], "dual-bar");
        assert_eq!(value["xKey"], "name");
        assert_eq!(value["series"][1]["yKey"], "distance");
        assert_eq!(value["series"][1]["color"], SKY);
        assert!(value.get("domain").is_none());
        assert_eq!(value["data"], json!([]));
    }
}
