use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn integer_array(count: usize) -> String {
    let items: Vec<String> = (0..count).map(|i| i.to_string()).collect();
    format!("[{}]", items.join(","))
}

fn nested_objects(count: usize) -> String {
    let members: Vec<String> = (0..count)
        .map(|i| format!("\"key_{i:05}\": {{\"id\": {i}, \"score\": {i}.25, \"ok\": true}}"))
        .collect();
    format!("{{{}}}", members.join(","))
}

fn string_heavy(count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| format!("\"value {i} with some plain text and an escape\\n\""))
        .collect();
    format!("[{}]", items.join(","))
}

fn bench_parse(c: &mut Criterion) {
    let inputs = [
        ("integers", integer_array(10_000)),
        ("objects", nested_objects(2_000)),
        ("strings", string_heavy(2_000)),
    ];

    let mut group = c.benchmark_group("parse");
    for (name, text) in &inputs {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("flatjson", name), text, |b, text| {
            b.iter(|| {
                let doc = flatjson::parse_slice(black_box(text.as_bytes())).unwrap();
                black_box(doc.root().kind())
            });
        });
        group.bench_with_input(BenchmarkId::new("serde_json", name), text, |b, text| {
            b.iter(|| {
                let value: serde_json::Value =
                    serde_json::from_str(black_box(text)).unwrap();
                black_box(value.is_array() || value.is_object())
            });
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let text = nested_objects(2_000);
    let doc = flatjson::parse_str(&text).unwrap();

    c.bench_function("lookup/sorted_object", |b| {
        let object = doc.root().as_object().unwrap();
        b.iter(|| {
            let value = object.get(black_box("key_01500")).unwrap();
            black_box(value.as_object().unwrap().len())
        });
    });
}

criterion_group!(benches, bench_parse, bench_lookup);
criterion_main!(benches);
