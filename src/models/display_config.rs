//! Per-client display layout and the resolver that turns a stored layout blob into it.
//!
//! Stored layouts are untrusted JSON. Every field is validated on its own and falls back
//! to its default, so a bad value never discards the rest of the layout.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_ROWS: u32 = 3;
pub const DEFAULT_COLS: u32 = 3;
pub const DEFAULT_ROTATE_MS: u64 = 12_000;

pub const DEFAULT_PRIMARY: &str = "#f97316";
pub const DEFAULT_SECONDARY: &str = "#22c55e";
pub const DEFAULT_BACKGROUND: &str = "#050816";

/// Where the specials block sits on the TV layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpecialsArea {
    Top,
    #[default]
    Side,
    None,
}

impl SpecialsArea {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(SpecialsArea::Top),
            "side" => Some(SpecialsArea::Side),
            "none" => Some(SpecialsArea::None),
            _ => None,
        }
    }
}

/// Optional color overrides; unset fields use the default theme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// Fully resolved display colors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub background: String,
}

/// Validated TV display layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    pub rows: u32,
    pub cols: u32,
    pub rotate_ms: u64,
    pub specials_area: SpecialsArea,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_overrides: Option<ThemeOverrides>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            rotate_ms: DEFAULT_ROTATE_MS,
            specials_area: SpecialsArea::default(),
            items_per_page: None,
            theme_overrides: None,
        }
    }
}

impl DisplayConfig {
    /// Resolve a stored layout blob. Never fails.
    pub fn resolve(layout: Option<&Value>) -> Self {
        let Some(Value::Object(fields)) = layout else {
            return Self::default();
        };

        let rows = fields
            .get("rows")
            .and_then(positive_integer)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(DEFAULT_ROWS);
        let cols = fields
            .get("cols")
            .and_then(positive_integer)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(DEFAULT_COLS);
        let rotate_ms = fields
            .get("rotateMs")
            .and_then(positive_integer)
            .unwrap_or(DEFAULT_ROTATE_MS);
        // A present but invalid value derives from the grid.
        let items_per_page = fields
            .get("itemsPerPage")
            .filter(|value| !value.is_null())
            .map(|value| {
                positive_integer(value)
                    .and_then(|v| u32::try_from(v).ok())
                    .unwrap_or_else(|| rows.saturating_mul(cols))
            });
        let specials_area = fields
            .get("specialsArea")
            .and_then(Value::as_str)
            .and_then(SpecialsArea::parse)
            .unwrap_or_default();
        let theme_overrides = match fields.get("themeOverrides") {
            Some(Value::Object(theme)) => {
                let text = |key: &str| theme.get(key).and_then(Value::as_str).map(str::to_string);
                Some(ThemeOverrides {
                    primary: text("primary"),
                    secondary: text("secondary"),
                    background: text("background"),
                })
            }
            _ => None,
        };

        Self {
            rows,
            cols,
            rotate_ms,
            specials_area,
            items_per_page,
            theme_overrides,
        }
    }

    /// Items per rotated page; never less than one.
    pub fn capacity(&self) -> usize {
        let derived = self.rows.saturating_mul(self.cols);
        self.items_per_page.unwrap_or(derived).max(1) as usize
    }

    pub fn theme(&self) -> Theme {
        let overrides = self.theme_overrides.clone().unwrap_or_default();
        Theme {
            primary: overrides
                .primary
                .unwrap_or_else(|| DEFAULT_PRIMARY.to_string()),
            secondary: overrides
                .secondary
                .unwrap_or_else(|| DEFAULT_SECONDARY.to_string()),
            background: overrides
                .background
                .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string()),
        }
    }
}

/// Accepts integers, integral floats and numeric strings greater than zero.
fn positive_integer(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return (v > 0).then_some(v);
            }
            n.as_f64().and_then(integral_positive)
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .filter(|v| *v > 0)
                .or_else(|| s.parse::<f64>().ok().and_then(integral_positive))
        }
        _ => None,
    }
}

fn integral_positive(v: f64) -> Option<u64> {
    if v.is_finite() && v.fract() == 0.0 && v >= 1.0 && v <= u64::MAX as f64 {
        Some(v as u64)
    } else {
        None
    }
}
