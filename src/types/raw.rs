//! Graph API response schemas
//!
//! Every field is optional or defaulted: the API omits fields freely and
//! numeric values arrive as text. The loader boundary never assumes presence.

use serde::Deserialize;

/// One `{action_type, value}` entry from `actions` or `action_values`.
/// Order is source-defined and must be preserved (first-match lookups).
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RawAction {
    pub action_type: String,
    pub value: Option<String>,
}

/// A single insights record. All numeric fields are text in the wire format.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RawInsight {
    pub spend: Option<String>,
    pub impressions: Option<String>,
    pub clicks: Option<String>,
    pub reach: Option<String>,
    pub frequency: Option<String>,
    pub ctr: Option<String>,
    pub cpm: Option<String>,
    pub cpc: Option<String>,
    pub actions: Option<Vec<RawAction>>,
    pub action_values: Option<Vec<RawAction>>,
}

/// Embedded insights collection (`insights.date_preset(...){...}` edge)
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RawInsights {
    pub data: Vec<RawInsight>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCampaign {
    pub id: String,
    pub name: String,
    pub status: String,
    pub objective: Option<String>,
    pub insights: Option<RawInsights>,
}

/// `campaign{name}` edge embedded in an ad row
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCampaignRef {
    pub name: Option<String>,
}

/// `creative{object_type}` edge embedded in an ad row
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCreative {
    pub object_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawAd {
    pub id: String,
    pub name: String,
    pub status: String,
    pub adset_name: Option<String>,
    pub campaign: Option<RawCampaignRef>,
    pub creative: Option<RawCreative>,
    pub insights: Option<RawInsights>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawAccount {
    pub id: String,
    pub name: String,
    pub currency: Option<String>,
    pub account_status: Option<i64>,
}

/// Paged list envelope (`{"data": [...]}`)
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Paged<T> {
    pub data: Vec<T>,
}

impl RawAd {
    /// Campaign name from the embedded edge, empty if absent
    pub fn campaign_name(&self) -> String {
        self.campaign
            .as_ref()
            .and_then(|c| c.name.clone())
            .unwrap_or_default()
    }

    /// Creative object type (e.g. "VIDEO", "CAROUSEL"), empty if absent
    pub fn creative_type(&self) -> String {
        self.creative
            .as_ref()
            .and_then(|c| c.object_type.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_deserializes_with_all_fields_missing() {
        let insight: RawInsight = serde_json::from_str("{}").unwrap();
        assert!(insight.spend.is_none());
        assert!(insight.actions.is_none());
    }

    #[test]
    fn test_insight_numeric_fields_are_text() {
        let insight: RawInsight =
            serde_json::from_str(r#"{"spend":"123.45","impressions":"1000"}"#).unwrap();
        assert_eq!(insight.spend.as_deref(), Some("123.45"));
        assert_eq!(insight.impressions.as_deref(), Some("1000"));
    }

    #[test]
    fn test_ad_embedded_edges() {
        let ad: RawAd = serde_json::from_str(
            r#"{
                "id": "a1",
                "name": "Hook v3",
                "status": "ACTIVE",
                "adset_name": "Broad 18-45",
                "campaign": {"name": "Prospecting"},
                "creative": {"object_type": "VIDEO"},
                "insights": {"data": [{"spend": "10"}]}
            }"#,
        )
        .unwrap();
        assert_eq!(ad.campaign_name(), "Prospecting");
        assert_eq!(ad.creative_type(), "VIDEO");
        assert_eq!(ad.insights.unwrap().data.len(), 1);
    }

    #[test]
    fn test_ad_missing_edges_default_empty() {
        let ad: RawAd = serde_json::from_str(r#"{"id":"a1","name":"x","status":"PAUSED"}"#).unwrap();
        assert_eq!(ad.campaign_name(), "");
        assert_eq!(ad.creative_type(), "");
        assert!(ad.insights.is_none());
    }

    #[test]
    fn test_paged_envelope() {
        let page: Paged<RawCampaign> =
            serde_json::from_str(r#"{"data":[{"id":"c1","name":"A","status":"ACTIVE"}]}"#).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "A");
    }

    #[test]
    fn test_paged_envelope_missing_data() {
        let page: Paged<RawCampaign> = serde_json::from_str("{}").unwrap();
        assert!(page.data.is_empty());
    }
}
