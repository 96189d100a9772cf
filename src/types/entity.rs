//! Account, campaign and ad entities
//!
//! Entities are built fresh on every load and replaced wholesale; nothing
//! mutates them field-by-field afterwards. Ads reference their ad set and
//! campaign by name, mirroring the API's embedded edges.

use serde::Serialize;

use crate::types::Metrics;

/// Ad account metadata
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    /// Normalized id including the `act_` prefix
    pub id: String,
    pub name: String,
    pub currency: Option<String>,
    pub account_status: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: String,
    pub objective: String,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ad {
    pub id: String,
    pub name: String,
    pub status: String,
    pub adset_name: String,
    pub campaign_name: String,
    /// Creative object type ("VIDEO", "CAROUSEL", ...), empty if unknown
    pub creative_type: String,
    pub metrics: Metrics,
}

/// Account-level aggregate over all campaigns in the current load.
///
/// Counters are plain sums; every ratio is recomputed from those totals with
/// the shared formulas in [`crate::types::metrics`]. Ratios are never the
/// mean of per-campaign ratios.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AccountSummary {
    pub spend: f64,
    pub impressions: f64,
    pub clicks: f64,
    pub purchases: f64,
    pub leads: f64,
    pub purchase_value: f64,
    pub video_views_3s: f64,
    pub thru_plays: f64,
    pub ctr: f64,
    pub cpm: f64,
    pub cpa: f64,
    pub roas: f64,
    pub hook_rate: f64,
    pub hold_rate: f64,
}
