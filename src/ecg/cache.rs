use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::ecg::synth::{generate_waveform, WaveformOptions, WaveformSeries};
use crate::error::LookHeartError;

// --- 默认缓存种子 ---
/// Seed the process-wide cache is synthesised with.
pub const DEFAULT_SEED: u64 = 0x4c4f_4f4b_4845_4152;

/// Identifies a cached waveform: a detected event or the normal reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEventKey", into = "RawEventKey")]
pub enum EventKey {
    Event(u32),
    Normal,
}

// JSON form: an integer id or the string "normal".
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawEventKey {
    Id(u32),
    Name(String),
}

impl TryFrom<RawEventKey> for EventKey {
    type Error = LookHeartError;

    fn try_from(raw: RawEventKey) -> Result<Self, Self::Error> {
        match raw {
            RawEventKey::Id(id) => Ok(EventKey::Event(id)),
            RawEventKey::Name(name) => name.parse(),
        }
    }
}

impl From<EventKey> for RawEventKey {
    fn from(key: EventKey) -> Self {
        match key {
            EventKey::Event(id) => RawEventKey::Id(id),
            EventKey::Normal => RawEventKey::Name("normal".to_owned()),
        }
    }
}

impl From<u32> for EventKey {
    fn from(id: u32) -> Self {
        EventKey::Event(id)
    }
}

impl FromStr for EventKey {
    type Err = LookHeartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "normal" {
            return Ok(EventKey::Normal);
        }
        s.parse::<u32>()
            .map(EventKey::Event)
            .map_err(|_| LookHeartError::InvalidEventKey(s.to_owned()))
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKey::Event(id) => write!(f, "{id}"),
            EventKey::Normal => f.write_str("normal"),
        }
    }
}

// --- 事件表 (事件 ID -> 合成参数) ---
/// One row of the event table: which key, and how to synthesise it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    pub id: EventKey,
    #[serde(flatten)]
    pub options: WaveformOptions,
}

impl EventSpec {
    pub fn event(id: u32, heart_rate_bpm: f64) -> Self {
        Self {
            id: EventKey::Event(id),
            options: WaveformOptions::with_heart_rate(heart_rate_bpm, true),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTable {
    pub entries: Vec<EventSpec>,
}

impl EventTable {
    /// Events shown on the arrhythmia screen plus the resting reference.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                // 心律失常事件: 高心率 + 异常噪声
                EventSpec::event(338, 145.0),
                EventSpec::event(337, 138.0),
                EventSpec::event(336, 142.0),
                EventSpec::event(335, 140.0),
                EventSpec::event(334, 137.0),
                EventSpec::event(42, 132.0),
                EventSpec::event(41, 128.0),
                // 正常参考波形 (默认回退)
                EventSpec {
                    id: EventKey::Normal,
                    options: WaveformOptions::default(),
                },
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, LookHeartError> {
        let table: EventTable = serde_json::from_str(json)?;
        for spec in &table.entries {
            spec.options.validate()?;
        }
        Ok(table)
    }

    pub fn get(&self, key: EventKey) -> Option<&EventSpec> {
        self.entries.iter().find(|spec| spec.id == key)
    }
}

// --- 波形缓存 ---
/// Pre-synthesised waveforms keyed by event. Read-only once built.
pub struct WaveformCache {
    events: HashMap<EventKey, WaveformSeries>,
    normal: WaveformSeries,
}

impl WaveformCache {
    /// Synthesise every table entry in table order from a single seeded RNG.
    ///
    /// A table without a `normal` row gets the resting baseline appended.
    pub fn build(table: &EventTable, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut events = HashMap::with_capacity(table.entries.len());
        let mut normal = None;
        for spec in &table.entries {
            let series = generate_waveform(&spec.options, &mut rng);
            match spec.id {
                EventKey::Normal => {
                    if normal.replace(series).is_some() {
                        warn!("event table lists `normal` more than once; keeping the last");
                    }
                }
                EventKey::Event(id) => {
                    if events.insert(spec.id, series).is_some() {
                        warn!("event table lists {id} more than once; keeping the last");
                    }
                }
            }
        }
        let normal = normal.unwrap_or_else(|| {
            debug!("event table has no `normal` row, synthesising the resting baseline");
            generate_waveform(&WaveformOptions::default(), &mut rng)
        });
        debug!("waveform cache built with {} events", events.len());
        Self { events, normal }
    }

    /// Waveform for `key`, or the normal waveform when the key is unknown.
    pub fn get(&self, key: impl Into<EventKey>) -> &WaveformSeries {
        match key.into() {
            EventKey::Normal => &self.normal,
            key => self.events.get(&key).unwrap_or(&self.normal),
        }
    }

    pub fn contains(&self, key: EventKey) -> bool {
        key == EventKey::Normal || self.events.contains_key(&key)
    }

    /// Known event keys in ascending order, excluding `normal`.
    pub fn event_keys(&self) -> Vec<EventKey> {
        let mut keys: Vec<EventKey> = self.events.keys().copied().collect();
        keys.sort_by_key(|key| match key {
            EventKey::Event(id) => *id,
            EventKey::Normal => u32::MAX,
        });
        keys
    }
}

static DEFAULT_CACHE: Lazy<WaveformCache> =
    Lazy::new(|| WaveformCache::build(&EventTable::builtin(), DEFAULT_SEED));

/// Process-wide cache built from [`EventTable::builtin`] on first use.
pub fn default_cache() -> &'static WaveformCache {
    &DEFAULT_CACHE
}

/// Look up `key` in the process-wide cache.
pub fn get_waveform(key: impl Into<EventKey>) -> &'static WaveformSeries {
    DEFAULT_CACHE.get(key)
}
