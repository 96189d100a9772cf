//! Aggregator service for the account-level summary

use crate::types::metrics::{
    cost_per_acquisition, cpm_per_mille, ctr_pct, hold_rate, hook_rate, return_on_ad_spend,
};
use crate::types::{AccountSummary, Metrics};

/// Aggregator for folding per-campaign metrics into one account summary
pub struct Aggregator;

impl Aggregator {
    /// Fold normalized campaign metrics into an account summary.
    ///
    /// Counters are plain running sums (associative and commutative, no entry
    /// depends on position). Ratios are then recomputed from the folded totals
    /// with the same zero-guarded formulas the insight parser uses — never
    /// averaged from per-campaign ratios. Empty input yields an all-zero
    /// summary.
    pub fn summarize(campaigns: &[Metrics]) -> AccountSummary {
        let mut s = AccountSummary::default();

        for m in campaigns {
            s.spend += m.spend;
            s.impressions += m.impressions;
            s.clicks += m.clicks;
            s.purchases += m.purchases;
            s.leads += m.leads;
            s.purchase_value += m.purchase_value;
            s.video_views_3s += m.video_views_3s;
            s.thru_plays += m.thru_plays;
        }

        s.ctr = ctr_pct(s.clicks, s.impressions);
        s.cpm = cpm_per_mille(s.spend, s.impressions);
        s.cpa = cost_per_acquisition(s.spend, s.purchases);
        s.roas = return_on_ad_spend(s.purchase_value, s.spend);
        s.hook_rate = hook_rate(s.video_views_3s, s.impressions);
        s.hold_rate = hold_rate(s.thru_plays, s.video_views_3s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(spend: f64, impressions: f64, clicks: f64) -> Metrics {
        Metrics {
            spend,
            impressions,
            clicks,
            ctr: ctr_pct(clicks, impressions),
            ..Metrics::default()
        }
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let s = Aggregator::summarize(&[]);
        assert_eq!(s, AccountSummary::default());
        assert!(s.ctr.is_finite());
        assert!(s.roas.is_finite());
    }

    #[test]
    fn test_counters_are_summed() {
        let a = Metrics {
            spend: 100.0,
            purchases: 2.0,
            purchase_value: 300.0,
            leads: 5.0,
            ..Metrics::default()
        };
        let b = Metrics {
            spend: 50.0,
            purchases: 1.0,
            purchase_value: 100.0,
            leads: 3.0,
            ..Metrics::default()
        };
        let s = Aggregator::summarize(&[a, b]);
        assert_eq!(s.spend, 150.0);
        assert_eq!(s.purchases, 3.0);
        assert_eq!(s.purchase_value, 400.0);
        assert_eq!(s.leads, 8.0);
    }

    #[test]
    fn test_ctr_is_weighted_not_naive_average() {
        // m1: 10 clicks / 1000 imps = 1.0%  |  m2: 100 clicks / 2000 imps = 5.0%
        let m1 = metrics(0.0, 1000.0, 10.0);
        let m2 = metrics(0.0, 2000.0, 100.0);
        let s = Aggregator::summarize(&[m1, m2]);

        let weighted = (10.0 + 100.0) / (1000.0 + 2000.0) * 100.0;
        let naive = (m1.ctr + m2.ctr) / 2.0;

        assert!((s.ctr - weighted).abs() < f64::EPSILON);
        assert!((s.ctr - naive).abs() > 0.1); // 3.67% vs 3.0%
    }

    #[test]
    fn test_summary_order_independent() {
        let m1 = metrics(120.0, 1000.0, 10.0);
        let m2 = metrics(30.0, 2000.0, 100.0);
        let m3 = metrics(75.0, 500.0, 7.0);
        let fwd = Aggregator::summarize(&[m1, m2, m3]);
        let rev = Aggregator::summarize(&[m3, m2, m1]);
        assert_eq!(fwd, rev);
    }

    #[test]
    fn test_ratios_recomputed_from_totals() {
        let a = Metrics {
            spend: 500.0,
            impressions: 50_000.0,
            clicks: 750.0,
            purchases: 5.0,
            purchase_value: 1500.0,
            video_views_3s: 10_000.0,
            thru_plays: 4_000.0,
            ..Metrics::default()
        };
        let s = Aggregator::summarize(&[a]);
        assert_eq!(s.ctr, 1.5);
        assert_eq!(s.cpm, 10.0);
        assert_eq!(s.cpa, 100.0);
        assert_eq!(s.roas, 3.0);
        assert_eq!(s.hook_rate, 20.0);
        assert_eq!(s.hold_rate, 40.0);
    }

    #[test]
    fn test_zero_guards_match_parser_policy() {
        let a = Metrics {
            spend: 100.0,
            ..Metrics::default()
        };
        let s = Aggregator::summarize(&[a]);
        assert_eq!(s.cpa, 0.0);
        assert_eq!(s.roas, 0.0);
        assert_eq!(s.ctr, 0.0);
        assert_eq!(s.hold_rate, 0.0);
    }
}
