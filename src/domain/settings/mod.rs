//! Settings domain - per-document view preferences and their storage key.
//!
//! Settings are scoped to one document by a [`DocumentKey`] derived from the
//! analysis result the viewer is showing. Keys embed the identifier directly,
//! so two documents with different identifiers never share settings.

mod document_key;
mod document_settings;

pub use document_key::{DocumentKey, ResultPayload, DEFAULT_SETTINGS_PREFIX};
pub use document_settings::{
    CardMode, DocumentSettings, CARD_MODE, INSIGHTS_CHART_TYPE, RISK_CATEGORY_FILTER,
    SHOW_INSIGHTS_CHARTS,
};
