//! Build figures from a table of named columns.
//!
//! [`figure`] turns one [`FigureSpec`] into a [`Figure`]; [`build_figures`]
//! maps a list of specs over the same table, one figure per spec. These are
//! the chart-construction entry points the scatter-matrix builder delegates
//! to.

use crate::error::{Error, Result};
use crate::models::{Figure, Layout, Marker, ScatterMode, Trace};
use crate::table::{Column, Table};
use crate::themes::{ThemeProvider, ThemeRegistry};
use serde::{Deserialize, Serialize};

/// Chart kinds producible from a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureKind {
    /// Line chart, one trace per selected column.
    #[default]
    Line,
    /// Marker-only scatter.
    Scatter,
    /// Bar chart.
    Bar,
    /// Histogram, one trace per selected column over its raw values.
    Histogram,
}

/// Settings for one figure built from a table.
///
/// `x` names the column used for x values (row index when absent); `y` or
/// `keys` select the value columns (all non-x columns when both are absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureSpec {
    pub kind: FigureKind,
    pub x: Option<String>,
    pub y: Option<String>,
    pub keys: Vec<String>,
    /// Histogram bucket count.
    pub bins: usize,
    pub color: Option<String>,
    pub size: Option<u32>,
    pub title: Option<String>,
    /// Theme applied to the figure's own layout, resolved through the
    /// default registry.
    pub theme: Option<String>,
}

impl Default for FigureSpec {
    fn default() -> Self {
        Self {
            kind: FigureKind::Line,
            x: None,
            y: None,
            keys: Vec::new(),
            bins: 10,
            color: None,
            size: None,
            title: None,
            theme: None,
        }
    }
}

impl FigureSpec {
    fn marker(&self) -> Option<Marker> {
        if self.color.is_none() && self.size.is_none() {
            return None;
        }
        Some(Marker {
            color: self.color.clone(),
            size: self.size,
        })
    }
}

/// Build one figure from `table` according to `spec`.
pub fn figure(table: &Table, spec: &FigureSpec) -> Result<Figure> {
    let mut layout = Layout::new();
    if let Some(theme) = &spec.theme {
        layout.merge(&ThemeRegistry::default().layout(theme)?);
    }
    if let Some(title) = &spec.title {
        layout.set("title", title.as_str());
    }

    let traces = match spec.kind {
        FigureKind::Histogram => {
            let mut traces = Vec::new();
            for col in select_columns(table, &spec.keys)? {
                let mut t = Trace::histogram(col.values.clone(), spec.bins).named(col.name.as_str());
                t.marker = spec.marker();
                traces.push(t);
            }
            traces
        }
        FigureKind::Line | FigureKind::Scatter | FigureKind::Bar => {
            let x_values = match &spec.x {
                Some(name) => lookup(table, name)?.values.clone(),
                None => (0..table.n_rows()).map(|i| i as f64).collect(),
            };
            let y_columns: Vec<&Column> = match &spec.y {
                Some(name) => vec![lookup(table, name)?],
                None if !spec.keys.is_empty() => select_columns(table, &spec.keys)?,
                // every column except the one providing x values
                None => table
                    .columns()
                    .iter()
                    .filter(|c| spec.x.as_deref() != Some(c.name.as_str()))
                    .collect(),
            };
            let mut traces = Vec::new();
            for col in y_columns {
                let mut t = match spec.kind {
                    FigureKind::Bar => Trace::bar(x_values.clone(), col.values.clone()),
                    FigureKind::Scatter => Trace::scatter(
                        x_values.clone(),
                        col.values.clone(),
                        ScatterMode::Markers,
                    ),
                    _ => Trace::scatter(x_values.clone(), col.values.clone(), ScatterMode::Lines),
                };
                t.name = Some(col.name.clone());
                t.marker = spec.marker();
                traces.push(t);
            }
            traces
        }
    };

    Ok(Figure::new(traces, layout))
}

/// Build one figure per spec over the same table.
pub fn build_figures(table: &Table, specs: &[FigureSpec]) -> Result<Vec<Figure>> {
    specs.iter().map(|spec| figure(table, spec)).collect()
}

fn lookup<'t>(table: &'t Table, name: &str) -> Result<&'t Column> {
    table
        .column(name)
        .ok_or_else(|| Error::UnknownColumn(name.to_string()))
}

/// All columns when `keys` is empty, the named ones otherwise.
fn select_columns<'t>(table: &'t Table, keys: &[String]) -> Result<Vec<&'t Column>> {
    if keys.is_empty() {
        return Ok(table.columns().iter().collect());
    }
    keys.iter().map(|name| lookup(table, name)).collect()
}
