use log::debug;

use crate::charts::descriptor::{ChartDescriptor, ChartKind, ChartStyle, ROSE, SKY};
use crate::charts::period::PeriodKeys;
use crate::charts::store::{Aggregate, DailySeries, MetricsStore, Record};
use crate::types::{Category, TimePeriod};

// --- 数据来源 ---
/// Where a chart's rows come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Daily(DailySeries),
    Weekly(Aggregate),
    Monthly(Aggregate),
    Yearly(Aggregate),
    /// No data for this combination; rendered as an empty chart.
    Empty,
}

#[derive(Debug)]
pub struct ChartRule {
    pub source: Source,
    pub style: &'static ChartStyle,
}

const fn rule(source: Source, style: &'static ChartStyle) -> ChartRule {
    ChartRule { source, style }
}

// --- 图表样式 ---
static HEART_DAY: ChartStyle = ChartStyle {
    kind: ChartKind::Line,
    x_key: "time",
    series: &[("bpm", ROSE)],
    domain: Some([0.0, 200.0]),
    label: Some("심박수"),
};

static HRV_DAY: ChartStyle = ChartStyle {
    kind: ChartKind::Line,
    x_key: "time",
    series: &[("ms", ROSE)],
    domain: Some([0.0, 100.0]),
    label: Some("HRV"),
};

static STRESS_DAY: ChartStyle = ChartStyle {
    kind: ChartKind::DualLine,
    x_key: "time",
    series: &[("sns", ROSE), ("pns", SKY)],
    domain: None,
    label: None,
};

// Placeholder for periods a category has no aggregates for.
static EMPTY_LINE: ChartStyle = ChartStyle {
    kind: ChartKind::Line,
    x_key: "name",
    series: &[("value", ROSE)],
    domain: None,
    label: None,
};

static ABNORMAL: ChartStyle = ChartStyle {
    kind: ChartKind::Bar,
    x_key: "name",
    series: &[("count", ROSE)],
    domain: None,
    label: Some("비정상맥박"),
};

static CALORIES: ChartStyle = ChartStyle {
    kind: ChartKind::DualBar,
    x_key: "name",
    series: &[("consumed", ROSE), ("active", SKY)],
    domain: None,
    label: None,
};

static STEPS: ChartStyle = ChartStyle {
    kind: ChartKind::DualBar,
    x_key: "name",
    series: &[("steps", ROSE), ("distance", SKY)],
    domain: None,
    label: None,
};

/// Decision table for every `(category, period)` pair.
// --- 决策表 ---
pub fn chart_rule(category: Category, period: TimePeriod) -> ChartRule {
    use crate::types::Category as C;
    use crate::types::TimePeriod as P;
    match (category, period) {
        (C::Heart, P::Day) => rule(Source::Daily(DailySeries::HeartRate), &HEART_DAY),
        (C::Variability, P::Day) => rule(Source::Daily(DailySeries::Hrv), &HRV_DAY),
        (C::Stress, P::Day) => rule(Source::Daily(DailySeries::Stress), &STRESS_DAY),
        (C::Heart | C::Variability | C::Stress, P::Week | P::Month | P::Year) => {
            rule(Source::Empty, &EMPTY_LINE)
        }

        (C::Abnormal, P::Day) => rule(Source::Daily(DailySeries::Abnormal), &ABNORMAL),
        (C::Abnormal, P::Week) => rule(Source::Weekly(Aggregate::Abnormal), &ABNORMAL),
        (C::Abnormal, P::Month) => rule(Source::Monthly(Aggregate::Abnormal), &ABNORMAL),
        (C::Abnormal, P::Year) => rule(Source::Yearly(Aggregate::Abnormal), &ABNORMAL),

        (C::Calorie, P::Day) => rule(Source::Daily(DailySeries::Calories), &CALORIES),
        (C::Calorie, P::Week) => rule(Source::Weekly(Aggregate::Calories), &CALORIES),
        (C::Calorie, P::Month) => rule(Source::Monthly(Aggregate::Calories), &CALORIES),
        (C::Calorie, P::Year) => rule(Source::Yearly(Aggregate::Calories), &CALORIES),

        (C::Steps, P::Day) => rule(Source::Daily(DailySeries::Steps), &STEPS),
        (C::Steps, P::Week) => rule(Source::Weekly(Aggregate::Steps), &STEPS),
        (C::Steps, P::Month) => rule(Source::Monthly(Aggregate::Steps), &STEPS),
        (C::Steps, P::Year) => rule(Source::Yearly(Aggregate::Steps), &STEPS),
    }
}

/// Build the chart for `category` over `period`, anchored on the day `date_key`.
///
/// Returns `None` only when the store has no record for `date_key`. Missing
/// weekly, monthly or yearly aggregates produce a descriptor with empty data.
pub fn get_chart_data(
    store: &MetricsStore,
    category: Category,
    period: TimePeriod,
    date_key: &str,
) -> Option<ChartDescriptor> {
    let Some(day) = store.day(date_key) else {
        debug!("no daily record for {date_key}");
        return None;
    };
    let ChartRule { source, style } = chart_rule(category, period);
    let data: &[Record] = match source {
        Source::Daily(series) => day.series(series),
        Source::Empty => &[],
        Source::Weekly(agg) | Source::Monthly(agg) | Source::Yearly(agg) => {
            aggregate(store, source, agg, date_key)
        }
    };
    Some(style.describe(data.to_vec()))
}

fn aggregate<'a>(
    store: &'a MetricsStore,
    source: Source,
    agg: Aggregate,
    date_key: &str,
) -> &'a [Record] {
    let keys = match PeriodKeys::from_day_key(date_key) {
        Ok(keys) => keys,
        Err(err) => {
            debug!("{err}; no aggregates for {date_key}");
            return &[];
        }
    };
    let found = match source {
        Source::Weekly(_) => store.week(&keys.week).map(|w| w.series(agg)),
        Source::Monthly(_) => store.month(&keys.month).map(|m| m.series(agg)),
        Source::Yearly(_) => store.year(&keys.year).map(|y| y.series(agg)),
        Source::Daily(_) | Source::Empty => None,
    };
    found.unwrap_or_else(|| {
        debug!("no {source:?} aggregate around {date_key}");
        &[]
    })
}
