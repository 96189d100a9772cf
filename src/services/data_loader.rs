//! Data loader: orchestrates account, campaign and ad fetches into one snapshot
//!
//! A load is all-or-nothing. The three fetches run in sequence and any failure
//! aborts the whole load, so the app never holds a half-populated snapshot.

use chrono::{DateTime, Local};

use crate::services::{AdPlatform, Aggregator, InsightParser};
use crate::types::{
    AccountInfo, AccountSummary, Ad, AdlensError, Campaign, DateWindow, Metrics, RawAd,
    RawCampaign, Result,
};

/// Prefix the platform expects on every ad account id
const ACCOUNT_PREFIX: &str = "act_";

/// Normalize a user-supplied account id to the `act_`-prefixed form.
/// Already-prefixed ids pass through unchanged.
pub fn normalize_account_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with(ACCOUNT_PREFIX) {
        raw.to_string()
    } else {
        format!("{ACCOUNT_PREFIX}{raw}")
    }
}

/// Monotonic generation counter for in-flight loads. Each load carries the
/// generation it was started with; results from a superseded generation are
/// dropped instead of overwriting newer state.
#[derive(Debug, Default)]
pub struct LoadTracker {
    latest: u64,
}

impl LoadTracker {
    /// Start a new load, superseding any in flight. Returns its generation.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether a finished load's generation is still the latest one
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }
}

/// Everything one successful load produces, replaced wholesale
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    pub generation: u64,
    pub window: DateWindow,
    pub account: AccountInfo,
    pub campaigns: Vec<Campaign>,
    pub ads: Vec<Ad>,
    pub summary: AccountSummary,
    pub loaded_at: DateTime<Local>,
}

/// Load orchestrator over any ad-platform backend
pub struct DataLoader<P: AdPlatform> {
    platform: P,
}

impl<P: AdPlatform> DataLoader<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Run one full load for an account and date window.
    ///
    /// Validates and normalizes the id before touching the network, then
    /// fetches account metadata, campaigns and ads in that order. Each row's
    /// first insights record (the platform returns one per date window) is
    /// normalized into metrics; the summary is folded from campaign metrics.
    pub fn load(
        &self,
        account_id: &str,
        window: DateWindow,
        generation: u64,
    ) -> Result<AccountSnapshot> {
        if account_id.trim().is_empty() {
            return Err(AdlensError::Validation("account id is required".into()));
        }
        let account_id = normalize_account_id(account_id);

        let raw_account = self.platform.account(&account_id)?;
        let raw_campaigns = self.platform.campaigns(&account_id, window)?;
        let raw_ads = self.platform.ads(&account_id, window)?;

        let account = AccountInfo {
            id: account_id,
            name: raw_account.name,
            currency: raw_account.currency,
            account_status: raw_account.account_status,
        };
        let campaigns: Vec<Campaign> = raw_campaigns.into_iter().map(campaign_row).collect();
        let ads: Vec<Ad> = raw_ads.into_iter().map(ad_row).collect();

        let campaign_metrics: Vec<Metrics> = campaigns.iter().map(|c| c.metrics).collect();
        let summary = Aggregator::summarize(&campaign_metrics);

        Ok(AccountSnapshot {
            generation,
            window,
            account,
            campaigns,
            ads,
            summary,
            loaded_at: Local::now(),
        })
    }
}

fn first_insight_metrics(raw: &RawCampaign) -> Metrics {
    InsightParser::parse(raw.insights.as_ref().and_then(|i| i.data.first()))
}

fn campaign_row(raw: RawCampaign) -> Campaign {
    let metrics = first_insight_metrics(&raw);
    Campaign {
        id: raw.id,
        name: raw.name,
        status: raw.status,
        objective: raw.objective.unwrap_or_default(),
        metrics,
    }
}

fn ad_row(raw: RawAd) -> Ad {
    let metrics = InsightParser::parse(raw.insights.as_ref().and_then(|i| i.data.first()));
    let campaign_name = raw.campaign_name();
    let creative_type = raw.creative_type();
    Ad {
        id: raw.id,
        name: raw.name,
        status: raw.status,
        adset_name: raw.adset_name.unwrap_or_default(),
        campaign_name,
        creative_type,
        metrics,
    }
}
