//! AI analysis: prompt construction and one-shot LLM call
//!
//! The prompt is built from already-normalized data only; the model sees the
//! same numbers the tables show. Response sections use `## ` headings so the
//! UI can style them.

use std::cmp::Ordering;
use std::time::Duration;

use crate::types::{AccountInfo, AccountSummary, Ad, AdlensError, Campaign, DateWindow, Result};

const ANALYSIS_MODEL: &str = "claude-sonnet-4-20250514";
const MAX_TOKENS: u32 = 1000;
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// HTTP request timeout in seconds; generation is slower than data fetches
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// How many top performers the prompt includes
const TOP_AD_COUNT: usize = 15;
/// How many underperformers the prompt includes
const BOTTOM_AD_COUNT: usize = 8;
/// Minimum spend before an ad can be called an underperformer
const BOTTOM_MIN_SPEND: f64 = 10.0;

/// Top performers: ROAS descending, purchases as the tiebreak
pub fn top_ads(ads: &[Ad]) -> Vec<&Ad> {
    let mut ranked: Vec<&Ad> = ads.iter().collect();
    ranked.sort_by(|a, b| {
        b.metrics
            .roas
            .partial_cmp(&a.metrics.roas)
            .unwrap_or(Ordering::Equal)
            .then(
                b.metrics
                    .purchases
                    .partial_cmp(&a.metrics.purchases)
                    .unwrap_or(Ordering::Equal),
            )
    });
    ranked.truncate(TOP_AD_COUNT);
    ranked
}

/// Underperformers: meaningful spend but the worst ROAS first
pub fn bottom_ads(ads: &[Ad]) -> Vec<&Ad> {
    let mut ranked: Vec<&Ad> = ads
        .iter()
        .filter(|a| a.metrics.spend > BOTTOM_MIN_SPEND)
        .collect();
    ranked.sort_by(|a, b| {
        a.metrics
            .roas
            .partial_cmp(&b.metrics.roas)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(BOTTOM_AD_COUNT);
    ranked
}

fn ad_line(ad: &Ad) -> String {
    format!(
        "- {} [{} / {}] spend ${:.2}, roas {:.2}, cpa ${:.2}, ctr {:.2}%, hook {:.1}%, hold {:.1}%, purchases {:.0}",
        ad.name,
        ad.campaign_name,
        if ad.creative_type.is_empty() { "unknown creative" } else { &ad.creative_type },
        ad.metrics.spend,
        ad.metrics.roas,
        ad.metrics.cpa,
        ad.metrics.ctr,
        ad.metrics.hook_rate,
        ad.metrics.hold_rate,
        ad.metrics.purchases,
    )
}

fn campaign_line(c: &Campaign) -> String {
    format!(
        "- {} [{} / {}] spend ${:.2}, roas {:.2}, cpa ${:.2}, ctr {:.2}%",
        c.name, c.status, c.objective, c.metrics.spend, c.metrics.roas, c.metrics.cpa, c.metrics.ctr,
    )
}

/// Build the analysis prompt from a loaded snapshot's pieces
pub fn build_prompt(
    account: &AccountInfo,
    window: DateWindow,
    summary: &AccountSummary,
    campaigns: &[Campaign],
    ads: &[Ad],
) -> String {
    let mut p = String::new();

    p.push_str(&format!(
        "You are a senior media buyer analyzing a Meta Ads account.\n\
         Account: {} ({})\nPeriod: {}\nCurrency: {}\n\n",
        account.name,
        account.id,
        window.label(),
        account.currency.as_deref().unwrap_or("USD"),
    ));

    p.push_str(&format!(
        "ACCOUNT TOTALS\nspend ${:.2}, purchases {:.0}, revenue ${:.2}, roas {:.2}, cpa ${:.2}, \
         ctr {:.2}%, cpm ${:.2}, hook {:.1}%, hold {:.1}%, leads {:.0}\n\n",
        summary.spend,
        summary.purchases,
        summary.purchase_value,
        summary.roas,
        summary.cpa,
        summary.ctr,
        summary.cpm,
        summary.hook_rate,
        summary.hold_rate,
        summary.leads,
    ));

    p.push_str("CAMPAIGNS\n");
    for c in campaigns {
        p.push_str(&campaign_line(c));
        p.push('\n');
    }

    p.push_str("\nTOP ADS (by ROAS)\n");
    for ad in top_ads(ads) {
        p.push_str(&ad_line(ad));
        p.push('\n');
    }

    p.push_str("\nUNDERPERFORMING ADS (spend above threshold, worst ROAS)\n");
    for ad in bottom_ads(ads) {
        p.push_str(&ad_line(ad));
        p.push('\n');
    }

    p.push_str(
        "\nWrite a concise performance analysis. Use exactly these section headings, \
         each on its own line starting with '## ':\n\
         ## EXECUTIVE SUMMARY\n\
         ## WHAT IS WORKING\n\
         ## WHAT IS WASTING BUDGET\n\
         ## CREATIVE INSIGHTS\n\
         ## RECOMMENDED ACTIONS\n\
         Be specific: name ads and campaigns, cite their numbers, and keep \
         recommendations actionable (scale, pause, iterate).",
    );

    p
}

/// One-shot LLM client
#[derive(Debug)]
pub struct AnalysisService {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl AnalysisService {
    pub fn new(endpoint: &str, api_key: Option<String>) -> Result<Self> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(AdlensError::Validation("analysis endpoint is required".into()));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key,
        })
    }

    /// Send the prompt and return the model's text, sections joined in order
    pub fn analyze(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": ANALYSIS_MODEL,
            "max_tokens": MAX_TOKENS,
            "messages": [{"role": "user", "content": prompt}],
        });

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response: serde_json::Value = request.send()?.json()?;
        extract_text(&response)
    }
}

/// Join `content[].text` blocks; an upstream error message wins over a
/// generic empty-response complaint.
fn extract_text(response: &serde_json::Value) -> Result<String> {
    let text: String = response
        .pointer("/content")
        .and_then(|c| c.as_array())
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|b| b.pointer("/text").and_then(|t| t.as_str()))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let detail = response
            .pointer("/error/message")
            .and_then(|m| m.as_str())
            .unwrap_or("empty response from model");
        return Err(AdlensError::Analysis(detail.to_string()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metrics;
    use serde_json::json;

    fn ad(name: &str, spend: f64, roas: f64, purchases: f64) -> Ad {
        Ad {
            id: name.to_string(),
            name: name.to_string(),
            status: "ACTIVE".into(),
            adset_name: "Broad".into(),
            campaign_name: "Prospecting".into(),
            creative_type: "VIDEO".into(),
            metrics: Metrics {
                spend,
                roas,
                purchases,
                ..Metrics::default()
            },
        }
    }

    fn account() -> AccountInfo {
        AccountInfo {
            id: "act_123456".into(),
            name: "Demo Account".into(),
            currency: Some("USD".into()),
            account_status: Some(1),
        }
    }

    // ========== ranking tests ==========

    #[test]
    fn test_top_ads_sorted_by_roas_desc() {
        let ads = vec![ad("low", 50.0, 1.0, 2.0), ad("high", 50.0, 4.0, 2.0)];
        let top = top_ads(&ads);
        assert_eq!(top[0].name, "high");
        assert_eq!(top[1].name, "low");
    }

    #[test]
    fn test_top_ads_purchases_break_roas_ties() {
        let ads = vec![ad("few", 50.0, 2.0, 1.0), ad("many", 50.0, 2.0, 9.0)];
        let top = top_ads(&ads);
        assert_eq!(top[0].name, "many");
    }

    #[test]
    fn test_top_ads_capped_at_fifteen() {
        let ads: Vec<Ad> = (0..30)
            .map(|i| ad(&format!("ad{i}"), 50.0, i as f64, 1.0))
            .collect();
        assert_eq!(top_ads(&ads).len(), 15);
    }

    #[test]
    fn test_bottom_ads_require_meaningful_spend() {
        let ads = vec![ad("tiny", 5.0, 0.0, 0.0), ad("burner", 100.0, 0.2, 1.0)];
        let bottom = bottom_ads(&ads);
        assert_eq!(bottom.len(), 1);
        assert_eq!(bottom[0].name, "burner");
    }

    #[test]
    fn test_bottom_ads_worst_roas_first_capped_at_eight() {
        let ads: Vec<Ad> = (0..12)
            .map(|i| ad(&format!("ad{i}"), 50.0, i as f64, 1.0))
            .collect();
        let bottom = bottom_ads(&ads);
        assert_eq!(bottom.len(), 8);
        assert_eq!(bottom[0].name, "ad0");
    }

    // ========== prompt tests ==========

    #[test]
    fn test_prompt_names_account_window_and_ads() {
        let ads = vec![ad("Hook v3", 120.0, 3.5, 12.0)];
        let campaigns = vec![Campaign {
            id: "c1".into(),
            name: "Prospecting".into(),
            status: "ACTIVE".into(),
            objective: "OUTCOME_SALES".into(),
            metrics: Metrics::default(),
        }];
        let prompt = build_prompt(
            &account(),
            DateWindow::Last7d,
            &AccountSummary::default(),
            &campaigns,
            &ads,
        );
        assert!(prompt.contains("Demo Account"));
        assert!(prompt.contains("Last 7 days"));
        assert!(prompt.contains("Hook v3"));
        assert!(prompt.contains("Prospecting"));
        assert!(prompt.contains("## EXECUTIVE SUMMARY"));
        assert!(prompt.contains("## RECOMMENDED ACTIONS"));
    }

    // ========== response extraction tests ==========

    #[test]
    fn test_extract_joins_content_blocks_in_order() {
        let response = json!({"content": [{"type": "text", "text": "## A\nfirst"},
                                          {"type": "text", "text": "\n## B\nsecond"}]});
        assert_eq!(extract_text(&response).unwrap(), "## A\nfirst\n## B\nsecond");
    }

    #[test]
    fn test_extract_surfaces_upstream_error_message() {
        let response = json!({"error": {"message": "invalid x-api-key"}});
        let err = extract_text(&response).unwrap_err();
        assert!(err.to_string().contains("invalid x-api-key"));
    }

    #[test]
    fn test_extract_empty_content_is_analysis_error() {
        let response = json!({"content": []});
        assert!(matches!(
            extract_text(&response).unwrap_err(),
            AdlensError::Analysis(_)
        ));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        assert!(matches!(
            AnalysisService::new("  ", None).unwrap_err(),
            AdlensError::Validation(_)
        ));
    }
}
