//! Normalized metrics and the zero-guarded ratio formulas
//!
//! Every ratio in the system is derived, never stored independently of its
//! inputs. The parser and the account aggregator both call the helpers below,
//! so per-entity and account-level values can never diverge in edge-case
//! policy: undefined inputs yield 0, never NaN or infinity.

use serde::Serialize;

/// Normalized per-entity metrics for one date window. Immutable once computed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Metrics {
    pub spend: f64,
    pub impressions: f64,
    pub clicks: f64,
    pub reach: f64,
    pub frequency: f64,
    pub ctr: f64,
    pub cpm: f64,
    pub cpc: f64,
    pub video_views_3s: f64,
    pub thru_plays: f64,
    pub purchases: f64,
    pub leads: f64,
    pub add_to_cart: f64,
    pub initiate_checkout: f64,
    pub purchase_value: f64,
    pub cpa: f64,
    pub roas: f64,
    pub hook_rate: f64,
    pub hold_rate: f64,
}

/// Guarded division: 0 when the denominator is not strictly positive
fn safe_div(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// CPA: spend / purchases, 0 if there are no purchases
pub fn cost_per_acquisition(spend: f64, purchases: f64) -> f64 {
    safe_div(spend, purchases)
}

/// ROAS: purchase value / spend, 0 unless both spend and value are positive
pub fn return_on_ad_spend(purchase_value: f64, spend: f64) -> f64 {
    if spend > 0.0 && purchase_value > 0.0 {
        purchase_value / spend
    } else {
        0.0
    }
}

/// Hook rate (%): 3s video views / impressions, 0 if no impressions
pub fn hook_rate(video_views_3s: f64, impressions: f64) -> f64 {
    safe_div(video_views_3s, impressions) * 100.0
}

/// Hold rate (%): thru-plays / 3s video views, 0 if no initial views
pub fn hold_rate(thru_plays: f64, video_views_3s: f64) -> f64 {
    safe_div(thru_plays, video_views_3s) * 100.0
}

/// CTR (%) from absolute counters
pub fn ctr_pct(clicks: f64, impressions: f64) -> f64 {
    safe_div(clicks, impressions) * 100.0
}

/// CPM from absolute counters
pub fn cpm_per_mille(spend: f64, impressions: f64) -> f64 {
    safe_div(spend, impressions) * 1000.0
}
