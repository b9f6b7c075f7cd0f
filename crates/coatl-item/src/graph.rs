//! Graph items
//!
//! A [`GraphItem`] is the plot window's renderable state: title, axis labels
//! and a list of named point series. Rendering itself is left to the UI
//! toolkit.

use crate::item::{private, Dependencies, ItemKind, ItemPayload};
use serde::{Deserialize, Serialize};

/// Key under which the graphing library is recorded in manifests
pub const GRAPH_LIBRARY: &str = "coatl-graph";

/// Installed version of the graphing library
pub const GRAPH_LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One named series of `(x, y)` points
///
/// Coordinates may be NaN (a gap in the plot) or infinite. JSON has no
/// literal for either, so those are stored as the strings `"NaN"`, `"inf"`
/// and `"-inf"`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    #[serde(with = "points")]
    pub points: Vec<(f64, f64)>,
}

mod points {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Coord {
        Number(f64),
        Text(String),
    }

    impl Coord {
        fn encode(v: f64) -> Self {
            if v.is_finite() {
                Self::Number(v)
            } else {
                Self::Text(v.to_string())
            }
        }

        fn decode(self) -> Result<f64, String> {
            match self {
                Self::Number(v) => Ok(v),
                Self::Text(s) => s
                    .parse()
                    .map_err(|_| format!("invalid coordinate {s:?}")),
            }
        }
    }

    pub(super) fn serialize<S: Serializer>(
        points: &[(f64, f64)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            points
                .iter()
                .map(|&(x, y)| (Coord::encode(x), Coord::encode(y))),
        )
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(f64, f64)>, D::Error> {
        Vec::<(Coord, Coord)>::deserialize(deserializer)?
            .into_iter()
            .map(|(x, y)| Ok((x.decode()?, y.decode()?)))
            .collect::<Result<_, String>>()
            .map_err(D::Error::custom)
    }
}

impl Series {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            points: Vec::new(),
        }
    }

    /// Builder-style point append
    #[must_use]
    pub fn with_point(mut self, x: f64, y: f64) -> Self {
        self.points.push((x, y));
        self
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Plot window payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphItem {
    #[serde(skip)]
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    x_label: String,
    #[serde(default)]
    y_label: String,
    #[serde(default)]
    series: Vec<Series>,
}

impl GraphItem {
    /// Empty graph named `name`
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// `(x, y)` axis labels
    #[must_use]
    pub fn axis_labels(&self) -> (&str, &str) {
        (&self.x_label, &self.y_label)
    }

    pub fn set_axis_labels(&mut self, x: impl Into<String>, y: impl Into<String>) {
        self.x_label = x.into();
        self.y_label = y.into();
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Remove every series labelled `label`; returns how many were dropped
    pub fn remove_series(&mut self, label: &str) -> usize {
        let before = self.series.len();
        self.series.retain(|s| s.label != label);
        before - self.series.len()
    }

    /// Builder-style series append
    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }
}

impl private::Sealed for GraphItem {}

impl ItemPayload for GraphItem {
    const KIND: ItemKind = ItemKind::Graph;

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn dependencies(&self) -> Dependencies {
        let mut deps = Dependencies::new();
        deps.insert(GRAPH_LIBRARY.to_string(), GRAPH_LIBRARY_VERSION.to_string());
        deps
    }
}
