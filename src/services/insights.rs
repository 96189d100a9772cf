//! Insight parser: one raw insights record -> normalized metrics
//!
//! Pure and infallible. Missing or malformed numeric text degrades to 0 so a
//! quiet entity (zero insight rows in range) renders as an all-zero row rather
//! than an error.

use crate::types::metrics::{
    cost_per_acquisition, hold_rate, hook_rate, return_on_ad_spend,
};
use crate::types::{Metrics, RawAction, RawInsight};

/// Action types counted as purchases, in fallback priority order.
/// "purchase" wins when non-zero; "omni_purchase" is the fallback. They are
/// never summed — accounts firing both pixels would double count.
const PURCHASE_TYPES: [&str; 2] = ["purchase", "omni_purchase"];

/// Insight parser service
pub struct InsightParser;

impl InsightParser {
    /// Parse a possibly-absent insights record into normalized metrics.
    /// Same input always yields the same output; no side effects.
    pub fn parse(raw: Option<&RawInsight>) -> Metrics {
        let Some(ins) = raw else {
            return Metrics::default();
        };

        let actions = ins.actions.as_deref().unwrap_or(&[]);
        let action_values = ins.action_values.as_deref().unwrap_or(&[]);

        let spend = num(&ins.spend);
        let impressions = num(&ins.impressions);
        let video_views_3s = action_count(actions, "video_view");
        let thru_plays = action_count(actions, "video_thruplay_watched");
        let purchases = purchase_count(actions);
        let purchase_value = purchase_value(action_values);

        Metrics {
            spend,
            impressions,
            clicks: num(&ins.clicks),
            reach: num(&ins.reach),
            frequency: num(&ins.frequency),
            ctr: num(&ins.ctr),
            cpm: num(&ins.cpm),
            cpc: num(&ins.cpc),
            video_views_3s,
            thru_plays,
            purchases,
            leads: action_count(actions, "lead"),
            add_to_cart: action_count(actions, "add_to_cart"),
            initiate_checkout: action_count(actions, "initiate_checkout"),
            purchase_value,
            cpa: cost_per_acquisition(spend, purchases),
            roas: return_on_ad_spend(purchase_value, spend),
            hook_rate: hook_rate(video_views_3s, impressions),
            hold_rate: hold_rate(thru_plays, video_views_3s),
        }
    }
}

/// Numeric-as-text field: absent, unparseable or non-finite -> 0
fn num(field: &Option<String>) -> f64 {
    field
        .as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Value of the first action matching `action_type` exactly, in source order
fn action_count(actions: &[RawAction], action_type: &str) -> f64 {
    actions
        .iter()
        .find(|a| a.action_type == action_type)
        .map(|a| num(&a.value))
        .unwrap_or(0.0)
}

/// Purchase count with the "purchase" -> "omni_purchase" fallback chain
fn purchase_count(actions: &[RawAction]) -> f64 {
    for ty in PURCHASE_TYPES {
        let count = action_count(actions, ty);
        if count != 0.0 {
            return count;
        }
    }
    0.0
}

/// Monetary purchase value: first entry whose type is any purchase type
/// (set membership, not a fallback chain)
fn purchase_value(action_values: &[RawAction]) -> f64 {
    action_values
        .iter()
        .find(|a| PURCHASE_TYPES.contains(&a.action_type.as_str()))
        .map(|a| num(&a.value))
        .unwrap_or(0.0)
}
