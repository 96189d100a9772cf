//! Criterion benchmarks for insight parsing and summary aggregation

use adlens::services::{Aggregator, InsightParser};
use adlens::types::{Metrics, RawAction, RawInsight};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn action(ty: &str, value: &str) -> RawAction {
    RawAction {
        action_type: ty.to_string(),
        value: Some(value.to_string()),
    }
}

/// A representative insights record with a realistic action list
fn sample_insight() -> RawInsight {
    RawInsight {
        spend: Some("1543.27".into()),
        impressions: Some("254310".into()),
        clicks: Some("4821".into()),
        reach: Some("188402".into()),
        frequency: Some("1.35".into()),
        ctr: Some("1.90".into()),
        cpm: Some("6.07".into()),
        cpc: Some("0.32".into()),
        actions: Some(vec![
            action("landing_page_view", "3212"),
            action("video_view", "61200"),
            action("video_thruplay_watched", "18442"),
            action("add_to_cart", "412"),
            action("initiate_checkout", "198"),
            action("lead", "0"),
            action("purchase", "87"),
            action("omni_purchase", "87"),
        ]),
        action_values: Some(vec![
            action("omni_purchase", "6120.44"),
            action("purchase", "6120.44"),
        ]),
    }
}

fn bench_parse_insight(c: &mut Criterion) {
    let insight = sample_insight();

    let mut group = c.benchmark_group("insights");
    group.bench_function("parse_insight", |b| {
        b.iter(|| InsightParser::parse(black_box(Some(&insight))));
    });
    group.finish();
}

fn bench_parse_sparse_insight(c: &mut Criterion) {
    // Quiet entity: no actions, most fields absent
    let insight = RawInsight {
        spend: Some("12.40".into()),
        impressions: Some("980".into()),
        ..RawInsight::default()
    };

    let mut group = c.benchmark_group("insights");
    group.bench_function("parse_sparse_insight", |b| {
        b.iter(|| InsightParser::parse(black_box(Some(&insight))));
    });
    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let template = InsightParser::parse(Some(&sample_insight()));

    let mut group = c.benchmark_group("aggregator");
    for count in [20usize, 200, 2000] {
        let campaigns: Vec<Metrics> = (0..count)
            .map(|i| Metrics {
                spend: template.spend + i as f64,
                ..template
            })
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("summarize", count),
            &campaigns,
            |b, campaigns| {
                b.iter(|| Aggregator::summarize(black_box(campaigns)));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_insight,
    bench_parse_sparse_insight,
    bench_summarize
);
criterion_main!(benches);
