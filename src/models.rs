//! Figure object model: traces, layouts, and axis references.
//!
//! A [`Figure`] is an ordered list of [`Trace`]s plus a [`Layout`]. The layout
//! keeps flat style settings and per-axis entries separately, so grid planning
//! can restyle concrete axes without string-munging nested maps. Axis
//! references ([`AxisId`]) parse from and print to the usual short (`"x2"`)
//! and long (`"xaxis2"`) spellings.

use crate::error::Error;
use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Which family an axis belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AxisKind {
    /// Horizontal axis (`x`, `x2`, …).
    X,
    /// Vertical axis (`y`, `y2`, …).
    Y,
    /// 3d scene slot (`scene`, `scene2`, …).
    Scene,
}

/// Reference to one axis slot in a combined figure.
///
/// Indices are 1-based; index 1 is spelled without a suffix (`"x"`, `"xaxis"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AxisId {
    pub kind: AxisKind,
    pub index: usize,
}

impl AxisId {
    pub fn x(index: usize) -> Self {
        Self {
            kind: AxisKind::X,
            index,
        }
    }

    pub fn y(index: usize) -> Self {
        Self {
            kind: AxisKind::Y,
            index,
        }
    }

    pub fn scene(index: usize) -> Self {
        Self {
            kind: AxisKind::Scene,
            index,
        }
    }

    /// Short spelling used on trace bindings: `"x"`, `"y3"`, `"scene2"`.
    pub fn short(&self) -> String {
        let stem = match self.kind {
            AxisKind::X => "x",
            AxisKind::Y => "y",
            AxisKind::Scene => "scene",
        };
        if self.index <= 1 {
            stem.to_string()
        } else {
            format!("{}{}", stem, self.index)
        }
    }

    /// Long spelling used as a layout key: `"xaxis"`, `"yaxis3"`, `"scene2"`.
    pub fn layout_key(&self) -> String {
        let stem = match self.kind {
            AxisKind::X => "xaxis",
            AxisKind::Y => "yaxis",
            AxisKind::Scene => "scene",
        };
        if self.index <= 1 {
            stem.to_string()
        } else {
            format!("{}{}", stem, self.index)
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

fn axis_ref_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(xaxis|yaxis|x|y|scene)([0-9]*)$").expect("axis ref regex"))
}

impl FromStr for AxisId {
    type Err = Error;

    /// Accepts both short (`"x2"`) and long (`"xaxis2"`) spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = axis_ref_regex()
            .captures(s)
            .ok_or_else(|| Error::InvalidAxisRef(s.to_string()))?;
        let kind = match &caps[1] {
            "x" | "xaxis" => AxisKind::X,
            "y" | "yaxis" => AxisKind::Y,
            _ => AxisKind::Scene,
        };
        let digits = &caps[2];
        let index = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<usize>()
                .map_err(|_| Error::InvalidAxisRef(s.to_string()))?
        };
        if index == 0 {
            return Err(Error::InvalidAxisRef(s.to_string()));
        }
        Ok(AxisId { kind, index })
    }
}

impl Serialize for AxisId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.short())
    }
}

/// Serde helper: parse an [`AxisId`] from its string spelling. Needed for both
/// trace binding fields and layout map keys.
struct AxisIdVisitor;

impl<'de> Visitor<'de> for AxisIdVisitor {
    type Value = AxisId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an axis reference like \"x\", \"y2\" or \"scene3\"")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        s.parse::<AxisId>().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for AxisId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(AxisIdVisitor)
    }
}

/// Marker styling for scatter traces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Scatter drawing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScatterMode {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

/// What a trace draws. Tagged so a trace is never an untyped key-value bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraceKind {
    Scatter {
        mode: ScatterMode,
    },
    Histogram {
        #[serde(rename = "nbinsx")]
        bins: usize,
    },
    Bar,
}

/// One plottable series within a figure.
///
/// The `xaxis`/`yaxis`/`scene` bindings are `None` on a standalone figure and
/// are stamped by the subplot assembler when the trace is placed in a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: TraceKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<AxisId>,
}

impl Trace {
    /// Scatter trace over paired x/y values.
    pub fn scatter(x: Vec<f64>, y: Vec<f64>, mode: ScatterMode) -> Self {
        Self {
            name: None,
            kind: TraceKind::Scatter { mode },
            x,
            y,
            marker: None,
            xaxis: None,
            yaxis: None,
            scene: None,
        }
    }

    /// Histogram trace over raw values.
    pub fn histogram(values: Vec<f64>, bins: usize) -> Self {
        Self {
            name: None,
            kind: TraceKind::Histogram { bins },
            x: values,
            y: Vec::new(),
            marker: None,
            xaxis: None,
            yaxis: None,
            scene: None,
        }
    }

    /// Bar trace over paired x/y values.
    pub fn bar(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            name: None,
            kind: TraceKind::Bar,
            x,
            y,
            marker: None,
            xaxis: None,
            yaxis: None,
            scene: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }
}

/// Style entry for one axis slot.
///
/// `domain` and `anchor` are the two keys grid planning computes, so they are
/// typed; everything else (grid visibility, tick fonts, …) stays in the open
/// settings map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AxisId>,
    #[serde(flatten)]
    pub settings: BTreeMap<String, Value>,
}

impl AxisStyle {
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.settings.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Copy every template setting onto this axis, overwriting on collision.
    /// Computed `domain`/`anchor` values are kept unless the template carries
    /// its own.
    pub fn apply_template(&mut self, template: &AxisStyle) {
        for (k, v) in &template.settings {
            self.settings.insert(k.clone(), v.clone());
        }
        if template.domain.is_some() {
            self.domain = template.domain;
        }
        if template.anchor.is_some() {
            self.anchor = template.anchor;
        }
    }
}

/// The non-data portion of a figure: flat style settings plus axis entries.
///
/// Axis entries are keyed by [`AxisId`]; a theme layout keeps its x/y
/// templates under index 1 (`x`/`y`), which double as the style of the first
/// concrete axis pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub axes: BTreeMap<AxisId, AxisStyle>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.settings.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    pub fn axis(&self, id: AxisId) -> Option<&AxisStyle> {
        self.axes.get(&id)
    }

    pub fn axis_mut(&mut self, id: AxisId) -> &mut AxisStyle {
        self.axes.entry(id).or_default()
    }

    /// Union another layout into this one. Later values win; axis entries are
    /// replaced wholesale, matching how plain mappings merge.
    pub fn merge(&mut self, other: &Layout) {
        for (k, v) in &other.settings {
            self.settings.insert(k.clone(), v.clone());
        }
        for (id, style) in &other.axes {
            self.axes.insert(*id, style.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty() && self.axes.is_empty()
    }
}

/// A chart: ordered traces plus a layout. Never mutated once handed to the
/// assembler; combined figures are built fresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    #[serde(default)]
    pub data: Vec<Trace>,
    #[serde(default)]
    pub layout: Layout,
}

impl Figure {
    pub fn new(data: Vec<Trace>, layout: Layout) -> Self {
        Self { data, layout }
    }

    /// Figure with a single trace and an empty layout.
    pub fn from_trace(trace: Trace) -> Self {
        Self {
            data: vec![trace],
            layout: Layout::default(),
        }
    }
}
