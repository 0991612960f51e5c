// src/main.rs
use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use log::info;
use lookheart_core::charts::get_chart_data;
use lookheart_core::charts::period::{next_day, prev_day, today};
use lookheart_core::ecg::cache::DEFAULT_SEED;
use lookheart_core::ecg::{
    default_cache, render_waveform_png, EventKey, EventTable, PlotStyle, WaveformCache,
};
use lookheart_core::{Category, MetricsStore, TimePeriod};

const USAGE: &str = "usage:
  lookheart waveform <event-id|normal> [--events table.json] [--seed N] [--png out.png]
  lookheart chart <store.json> <category> <period> <YYYY-MM-DD>
  lookheart charts <store.json> <YYYY-MM-DD> [period] [--prev | --next]";

// 入口函数
fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("waveform") => waveform(&args[1..]),
        Some("chart") => chart(&args[1..]),
        Some("charts") => charts(&args[1..]),
        _ => bail!(USAGE),
    }
}

fn waveform(args: &[String]) -> Result<()> {
    let Some(key) = args.first() else {
        bail!(USAGE);
    };
    let key: EventKey = key.parse()?;
    let events = flag(args, "--events")?;
    let seed = flag(args, "--seed")?
        .map(|s| s.parse::<u64>().with_context(|| format!("bad --seed `{s}`")))
        .transpose()?;

    let custom;
    let cache = if events.is_some() || seed.is_some() {
        let table = match events {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading event table {path}"))?;
                EventTable::from_json_str(&text)
                    .with_context(|| format!("parsing event table {path}"))?
            }
            None => EventTable::builtin(),
        };
        custom = WaveformCache::build(&table, seed.unwrap_or(DEFAULT_SEED));
        &custom
    } else {
        default_cache()
    };

    if !cache.contains(key) {
        info!("event {key} not in table, showing the normal waveform");
    }
    let series = cache.get(key);
    let (min, max) = series
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.value), hi.max(p.value)));
    println!("{key}: {} samples, min {min:.2}, max {max:.2}", series.len());

    if let Some(out) = flag(args, "--png")? {
        let png = render_waveform_png(series, &PlotStyle::default())?;
        fs::write(out, png).with_context(|| format!("writing {out}"))?;
        info!("waveform written to {out}");
    }
    Ok(())
}

fn chart(args: &[String]) -> Result<()> {
    let [path, category, period, date] = args else {
        bail!(USAGE);
    };
    let store = load_store(path)?;
    let category: Category = category.parse()?;
    let period: TimePeriod = period.parse()?;
    match get_chart_data(&store, category, period, date) {
        Some(descriptor) => println!("{}", serde_json::to_string_pretty(&descriptor)?),
        None => println!("null"),
    }
    Ok(())
}

fn charts(args: &[String]) -> Result<()> {
    let (shift, positional): (Vec<&String>, Vec<&String>) =
        args.iter().partition(|a| a.starts_with("--"));
    let (path, date, period) = match positional.as_slice() {
        [path, date] => (*path, (*date).clone(), TimePeriod::Day),
        [path, date, period] => (*path, (*date).clone(), period.parse::<TimePeriod>()?),
        _ => bail!(USAGE),
    };
    // 日期导航: 前一天 / 后一天 (不超过今天)
    let date = match shift.as_slice() {
        [] => date,
        [f] if f.as_str() == "--prev" => prev_day(&date)?,
        [f] if f.as_str() == "--next" => match next_day(&date, today())? {
            Some(next) => next,
            None => {
                info!("{date} is today, staying put");
                date
            }
        },
        _ => bail!(USAGE),
    };
    let store = load_store(path)?;
    let mut out = serde_json::Map::new();
    for category in Category::ALL {
        let descriptor = get_chart_data(&store, category, period, &date);
        out.insert(category.to_string(), serde_json::to_value(descriptor)?);
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn load_store(path: &str) -> Result<MetricsStore> {
    MetricsStore::from_path(path).with_context(|| format!("loading metrics store {path}"))
}

// 命令行参数: `--name value`, 缺少值时报错
fn flag<'a>(args: &'a [String], name: &str) -> Result<Option<&'a str>> {
    let Some(i) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    match args.get(i + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        _ => bail!("{name} needs a value\n{USAGE}"),
    }
}
