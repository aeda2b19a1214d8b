//! Per-document view settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Which analysis cards the viewer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardMode {
    #[default]
    Insights,
    Risk,
}

impl fmt::Display for CardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardMode::Insights => write!(f, "insights"),
            CardMode::Risk => write!(f, "risk"),
        }
    }
}

impl FromStr for CardMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insights" => Ok(CardMode::Insights),
            "risk" => Ok(CardMode::Risk),
            other => Err(ValidationError::invalid_format(
                "cardMode",
                format!("unknown card mode '{}'", other),
            )),
        }
    }
}

/// Stored name of the card mode preference.
pub const CARD_MODE: &str = "cardMode";
/// Stored name of the insights chart type preference.
pub const INSIGHTS_CHART_TYPE: &str = "insightsChartType";
/// Stored name of the insights chart visibility preference.
pub const SHOW_INSIGHTS_CHARTS: &str = "showInsightsCharts";
/// Stored name of the risk category filter preference.
pub const RISK_CATEGORY_FILTER: &str = "riskCategoryFilter";

/// Flat set of view preferences for one document.
///
/// Preferences are held exactly as stored, as a JSON object of named values.
/// The typed accessors read the known preferences leniently: a value of the
/// wrong shape reads as unset but stays in the object, so saving what was
/// loaded writes back the same object. A save always replaces the whole object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentSettings(Map<String, Value>);

impl DocumentSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_card_mode(self, mode: CardMode) -> Self {
        self.with_preference(CARD_MODE, mode.to_string())
    }

    pub fn with_insights_chart_type(self, chart_type: impl Into<String>) -> Self {
        self.with_preference(INSIGHTS_CHART_TYPE, chart_type.into())
    }

    pub fn with_show_insights_charts(self, show: bool) -> Self {
        self.with_preference(SHOW_INSIGHTS_CHARTS, show)
    }

    pub fn with_risk_category_filter(self, category: impl Into<String>) -> Self {
        self.with_preference(RISK_CATEGORY_FILTER, category.into())
    }

    /// Sets any preference by its stored name, replacing a previous value.
    pub fn with_preference(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Raw stored value of a preference.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Card mode, if one is stored and recognised.
    pub fn card_mode(&self) -> Option<CardMode> {
        self.get_str(CARD_MODE)?.parse().ok()
    }

    pub fn insights_chart_type(&self) -> Option<&str> {
        self.get_str(INSIGHTS_CHART_TYPE)
    }

    pub fn show_insights_charts(&self) -> Option<bool> {
        self.get(SHOW_INSIGHTS_CHARTS)?.as_bool()
    }

    pub fn risk_category_filter(&self) -> Option<&str> {
        self.get_str(RISK_CATEGORY_FILTER)
    }

    /// Card mode to display, falling back to insights when unset or unrecognised.
    pub fn effective_card_mode(&self) -> CardMode {
        self.card_mode().unwrap_or_default()
    }

    /// True when no preference has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_str()
    }
}

impl From<Map<String, Value>> for DocumentSettings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
