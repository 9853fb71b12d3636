//! Calculator variants a pickled document can come from.
//!
//! The set is closed: anything unrecognized is kept as [`CalculatorKind::Unknown`]
//! with its original tag rather than collapsed to a sentinel.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value, json};

/// Host calculator variant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CalculatorKind {
    /// 2-D graphing calculator
    #[default]
    Graphing,
    /// Geometry tool
    Geometry,
    /// 3-D calculator
    ThreeD,
    /// Unrecognized tag, kept verbatim
    Unknown(String),
}

impl CalculatorKind {
    /// Parse a variant tag (`"graphing"`, `"calculator"`, `"geometry"`, `"3d"`)
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        match tag.to_ascii_lowercase().as_str() {
            "graphing" | "calculator" => Self::Graphing,
            "geometry" => Self::Geometry,
            "3d" => Self::ThreeD,
            _ => Self::Unknown(tag.to_string()),
        }
    }

    /// Classify a host page by its URL path, e.g. `/calculator/abc123`
    #[must_use]
    pub fn from_url_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segment = path
            .split('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or_default();
        Self::from_tag(segment)
    }

    /// Canonical tag
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Graphing => "graphing",
            Self::Geometry => "geometry",
            Self::ThreeD => "3d",
            Self::Unknown(tag) => tag,
        }
    }

    /// Check if the variant is recognized
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Default configuration for the variant
    ///
    /// These are the library's own starting views, not values read from a
    /// host. Unknown variants fall back to the graphing defaults.
    #[must_use]
    pub fn defaults(&self) -> CalculatorDefaults {
        match self {
            Self::Graphing | Self::Unknown(_) => CalculatorDefaults {
                viewport: Viewport::planar(-10.0, -10.0, 10.0, 10.0),
                dimensions: 2,
            },
            Self::Geometry => CalculatorDefaults {
                viewport: Viewport::planar(-20.0, -20.0, 20.0, 20.0),
                dimensions: 2,
            },
            Self::ThreeD => CalculatorDefaults {
                viewport: Viewport::spatial(-10.0, -10.0, -10.0, 10.0, 10.0, 10.0),
                dimensions: 3,
            },
        }
    }
}

impl FromStr for CalculatorKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Default configuration record for a calculator variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorDefaults {
    /// Initial visible region
    pub viewport: Viewport,
    /// Number of spatial axes (2 or 3)
    pub dimensions: u8,
}

/// Visible region of a graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge
    pub xmin: f64,
    /// Bottom edge
    pub ymin: f64,
    /// Right edge
    pub xmax: f64,
    /// Top edge
    pub ymax: f64,
    /// Near z bound, 3-D only
    pub zmin: Option<f64>,
    /// Far z bound, 3-D only
    pub zmax: Option<f64>,
}

impl Viewport {
    /// 2-D viewport
    #[must_use]
    pub const fn planar(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            zmin: None,
            zmax: None,
        }
    }

    /// 3-D viewport
    #[must_use]
    pub const fn spatial(xmin: f64, ymin: f64, zmin: f64, xmax: f64, ymax: f64, zmax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            zmin: Some(zmin),
            zmax: Some(zmax),
        }
    }

    /// JSON object in the host state's `graph.viewport` shape
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut viewport = json!({
            "xmin": self.xmin,
            "ymin": self.ymin,
            "xmax": self.xmax,
            "ymax": self.ymax,
        });
        if let (Some(zmin), Some(zmax), Some(obj)) = (self.zmin, self.zmax, viewport.as_object_mut())
        {
            obj.insert("zmin".to_string(), json!(zmin));
            obj.insert("zmax".to_string(), json!(zmax));
        }
        viewport
    }
}

/// Insert the variant's default `graph.viewport` when a state has none
///
/// Returns `true` if the state was changed. Non-object states are left alone.
pub fn fill_missing_viewport(state: &mut Value, kind: &CalculatorKind) -> bool {
    let Some(root) = state.as_object_mut() else {
        return false;
    };

    let graph = root
        .entry("graph")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(graph) = graph.as_object_mut() else {
        return false;
    };
    if graph.contains_key("viewport") {
        return false;
    }

    graph.insert("viewport".to_string(), kind.defaults().viewport.to_json());
    true
}
