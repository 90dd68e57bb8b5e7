use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

// ---------------------------------------------------------------------------
// ChartSpec – renderer-agnostic description of one chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
    Bar,
    Pie,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Histogram => "histogram",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        }
    }
}

/// One data series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Series {
    /// Raw observations; binning is left to the renderer.
    Samples {
        name: Option<String>,
        values: Vec<f64>,
    },
    /// Label → count pairs, in display order.
    Categories {
        name: Option<String>,
        labels: Vec<String>,
        values: Vec<u64>,
    },
}

impl Series {
    pub fn name(&self) -> Option<&str> {
        match self {
            Series::Samples { name, .. } | Series::Categories { name, .. } => name.as_deref(),
        }
    }

    /// Number of observations or categories.
    pub fn len(&self) -> usize {
        match self {
            Series::Samples { values, .. } => values.len(),
            Series::Categories { values, .. } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    /// Series are drawn on top of each other.
    Overlay,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverMode {
    #[default]
    Closest,
}

/// What pie slices show as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextInfo {
    LabelPercent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOrientation {
    Radial,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub bar_mode: Option<BarMode>,
    pub hover_mode: HoverMode,
    pub text_info: Option<TextInfo>,
    pub inside_text_orientation: Option<TextOrientation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub series: Vec<Series>,
    pub layout: ChartLayout,
}

impl ChartSpec {
    /// Convert to a Plotly figure (`{"data": [...], "layout": {...}}`).
    pub fn to_plotly(&self) -> JsonValue {
        let data: Vec<JsonValue> = self.series.iter().map(|s| self.plotly_trace(s)).collect();

        let mut layout = Map::new();
        if let Some(title) = &self.layout.x_title {
            layout.insert("xaxis".into(), json!({ "title": title }));
        }
        if let Some(title) = &self.layout.y_title {
            layout.insert("yaxis".into(), json!({ "title": title }));
        }
        if let Some(mode) = self.layout.bar_mode {
            let mode = match mode {
                BarMode::Overlay => "overlay",
            };
            layout.insert("barmode".into(), json!(mode));
        }
        let hover = match self.layout.hover_mode {
            HoverMode::Closest => "closest",
        };
        layout.insert("hovermode".into(), json!(hover));

        json!({ "data": data, "layout": layout })
    }

    fn plotly_trace(&self, series: &Series) -> JsonValue {
        let mut trace = Map::new();
        trace.insert("type".into(), json!(self.kind.as_str()));
        match series {
            Series::Samples { values, .. } => {
                trace.insert("x".into(), json!(values));
            }
            Series::Categories { labels, values, .. } if self.kind == ChartKind::Pie => {
                trace.insert("labels".into(), json!(labels));
                trace.insert("values".into(), json!(values));
            }
            Series::Categories { labels, values, .. } => {
                trace.insert("x".into(), json!(labels));
                trace.insert("y".into(), json!(values));
            }
        }
        if let Some(name) = series.name() {
            trace.insert("name".into(), json!(name));
        }
        if let Some(TextInfo::LabelPercent) = self.layout.text_info {
            trace.insert("textinfo".into(), json!("label+percent"));
        }
        if let Some(TextOrientation::Radial) = self.layout.inside_text_orientation {
            trace.insert("insidetextorientation".into(), json!("radial"));
        }
        JsonValue::Object(trace)
    }
}
