use climate_api::{ClimateStore, Measurement, Station};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Ten stations reporting every day from 2010 through the anchor date.
fn synthetic_store() -> ClimateStore {
    let stations: Vec<Station> = (0..10)
        .map(|i| Station::new(format!("USC{:02}", i), format!("Station {}", i)))
        .collect();

    let start = chrono::NaiveDate::from_ymd_opt(2010, 1, 1).expect("valid date");
    let measurements: Vec<Measurement> = start
        .iter_days()
        .take_while(|d| *d < climate_api::ANCHOR_DATE)
        .flat_map(|day| {
            let date = day.format("%Y-%m-%d").to_string();
            stations.iter().enumerate().map(move |(i, s)| {
                Measurement::new(s.station.clone(), date.clone(), 60.0 + (i % 7) as f64)
                    .with_prcp(0.01 * i as f64)
            })
        })
        .collect();

    ClimateStore::from_rows(&measurements, &stations).expect("synthetic store")
}

fn bench_queries(c: &mut Criterion) {
    let store = synthetic_store();
    c.bench_function("precipitation", |b| b.iter(|| black_box(store.precipitation())));
    c.bench_function("observations", |b| b.iter(|| black_box(store.observations())));
    c.bench_function("summary_since", |b| {
        b.iter(|| black_box(store.summary_since(black_box("2016-01-01"))))
    });
    c.bench_function("summary_between", |b| {
        b.iter(|| black_box(store.summary_between(black_box("2016-01-01"), black_box("2016-12-31"))))
    });
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
