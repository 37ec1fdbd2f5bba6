//! Benchmarks for the participant view, statistics and exports
//!
//! Run with: cargo bench

use chrono::{TimeZone, Utc};
use convite::chart::{ranking_chart, GlyphEstimate, Surface};
use convite::export::{to_pdf, to_xlsx, ExportOptions};
use convite::stats::{summarize, top_locations, TOP_LOCATIONS};
use convite::view::{filter_and_sort, SortDirection, SortKey};
use convite::AttendeeRecord;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const NAMES: [&str; 6] = ["Ana", "Élio", "bia", "Zeca", "Órfão", "Carla"];
const LOCATIONS: [&str; 7] = [
    "Central", "Muhala", "Namicopo", "Napipine", "Natikiri", "Muatala", "Carrupeia",
];

fn create_records(count: usize) -> Vec<AttendeeRecord> {
    (0..count)
        .map(|i| {
            AttendeeRecord::new(
                i.to_string(),
                format!("{} {}", NAMES[i % NAMES.len()], i),
                LOCATIONS[(i * 7) % LOCATIONS.len()],
                format!("84{:07}", i),
                format!("2025-01-{:02}T10:00:00.000Z", 1 + i % 28),
            )
        })
        .collect()
}

fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("view");

    for size in [100, 1000, 10000] {
        let records = create_records(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("sort_by_name_{}", size), |b| {
            b.iter(|| filter_and_sort(black_box(&records), "", SortKey::Name, SortDirection::Ascending))
        });

        group.bench_function(format!("search_and_sort_by_date_{}", size), |b| {
            b.iter(|| filter_and_sort(black_box(&records), "an", SortKey::Date, SortDirection::Descending))
        });
    }

    group.finish();
}

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let records = create_records(10000);

    group.bench_function("summarize_10000", |b| {
        b.iter(|| summarize(black_box(&records), 1000, now))
    });

    group.bench_function("top_locations_10000", |b| {
        b.iter(|| top_locations(black_box(&records), TOP_LOCATIONS))
    });

    let top = top_locations(&records, TOP_LOCATIONS);
    group.bench_function("ranking_chart", |b| {
        b.iter(|| ranking_chart(black_box(&top), Surface::new(600.0, 300.0), &GlyphEstimate::default()))
    });

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    group.sample_size(20);

    let records = create_records(1000);
    let options = ExportOptions::default();
    let today = Utc::now().date_naive();

    group.bench_function("xlsx_1000", |b| {
        b.iter(|| to_xlsx(black_box(&records), &options).unwrap())
    });

    group.bench_function("pdf_1000", |b| {
        b.iter(|| to_pdf(black_box(&records), &options, today).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_view, bench_stats, bench_export);
criterion_main!(benches);
