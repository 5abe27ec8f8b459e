use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tagtree::{escape, parse, parser::Parser, serialize, SerializeOptions};

// ============================================================================
// Test Data: Varying Complexity and Size
// ============================================================================

const TINY_XML: &str = r#"<value>42</value>"#;

const SMALL_XML: &str = r#"<app version="1">
  <name>test</name>
  <enabled/>
  <tag>a</tag>
  <tag>b</tag>
  <tag>c</tag>
</app>"#;

const MEDIUM_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- service configuration -->
<config>
  <server name="server1" ssl="true"><host>server1.com</host><port>8080</port></server>
  <server name="server2" ssl="true"><host>server2.com</host><port>8081</port></server>
  <server name="server3" ssl="false"><host>server3.com</host><port>8082</port></server>
  <production>
    <host>prod.example.com</host>
    <port>443</port>
    <retries>5</retries>
    <banner><![CDATA[<b>Welcome</b> & enjoy]]></banner>
  </production>
  <status>Active</status>
</config>"#;

// Generate very large documents for stress testing
fn generate_xlarge_xml(count: usize) -> String {
    let mut xml = String::from("<inventory>\r\n");
    for i in 0..count {
        xml.push_str(&format!(
            "  <item id=\"{}\">\r\n    <name>Item &amp; {}</name>\r\n    <price>{}</price>\r\n    <active>{}</active>\r\n  </item>\r\n",
            i,
            i,
            i * 100,
            i % 2 == 0
        ));
    }
    xml.push_str("</inventory>\r\n");
    xml
}

// ============================================================================
// Indexer Benchmarks
// ============================================================================

fn bench_indexer_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexer_by_size");

    for (name, source) in [("tiny", TINY_XML), ("small", SMALL_XML), ("medium", MEDIUM_XML)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, source| {
            b.iter(|| Parser::new(black_box(source)).unwrap())
        });
    }

    group.finish();
}

// ============================================================================
// Parse / Serialize Benchmarks
// ============================================================================

fn bench_parse_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_by_size");

    for (name, source) in [("tiny", TINY_XML), ("small", SMALL_XML), ("medium", MEDIUM_XML)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, source| {
            b.iter(|| parse(black_box(source.as_bytes())).unwrap())
        });
    }

    group.finish();
}

fn bench_parse_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_scaling");

    for count in [10, 100, 1000] {
        let source = generate_xlarge_xml(count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &source, |b, source| {
            b.iter(|| parse(black_box(source.as_bytes())).unwrap())
        });
    }

    group.finish();
}

fn bench_serialize_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_scaling");
    let options = SerializeOptions::new("inventory");

    for count in [10, 100, 1000] {
        let document = parse(generate_xlarge_xml(count).as_bytes()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(count), &document.root, |b, root| {
            b.iter(|| serialize(black_box(root), &options).unwrap())
        });
    }

    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let options = SerializeOptions::new("config");
    c.bench_function("round_trip_medium", |b| {
        b.iter(|| {
            let document = parse(black_box(MEDIUM_XML.as_bytes())).unwrap();
            serialize(&document.root, &options).unwrap()
        })
    });
}

// ============================================================================
// Escape Benchmarks
// ============================================================================

fn bench_escape(c: &mut Criterion) {
    let plain = "plain configuration text without specials ".repeat(20);
    let special = "a < b && c > d 'quoted' \"double\" ".repeat(20);

    c.bench_function("encode_plain", |b| b.iter(|| escape::encode(black_box(&plain)).len()));
    c.bench_function("encode_special", |b| b.iter(|| escape::encode(black_box(&special)).len()));

    let encoded = escape::encode(&special).into_owned();
    c.bench_function("decode_special", |b| b.iter(|| escape::decode(black_box(&encoded)).len()));
}

criterion_group!(indexer_benches, bench_indexer_sizes);
criterion_group!(
    codec_benches,
    bench_parse_sizes,
    bench_parse_scaling,
    bench_serialize_scaling,
    bench_round_trip
);
criterion_group!(escape_benches, bench_escape);
criterion_main!(indexer_benches, codec_benches, escape_benches);
