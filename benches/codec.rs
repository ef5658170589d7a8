use bytes::Bytes;
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use j1708::protocol::{checksum, split};
use j1708::{MULTISECTION_PIDS, Message, NameLookup, Parameter, Pid, Reassembler, Value};

/// Typical broadcast: road speed, engine speed, battery voltage
fn broadcast_wire() -> Vec<u8> {
    let lookup = NameLookup::builtin();
    let params = vec![
        Parameter::new(
            Pid::new(84).unwrap(),
            Value::Scaled {
                value: 50.0,
                units: Some("mph"),
            },
        ),
        Parameter::new(
            Pid::new(190).unwrap(),
            Value::Scaled {
                value: 1500.0,
                units: Some("rpm"),
            },
        ),
        Parameter::new(
            Pid::new(168).unwrap(),
            Value::Scaled {
                value: 13.8,
                units: Some("V"),
            },
        ),
    ];
    Message::encode(128, &params, lookup).unwrap()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let lookup = NameLookup::builtin();

    let wire = broadcast_wire();
    group.throughput(Throughput::Bytes(wire.len() as u64));
    group.bench_function("parse_broadcast", |b| {
        b.iter(|| {
            black_box(Message::parse(&wire, false).unwrap());
        });
    });

    group.bench_function("decode_broadcast", |b| {
        b.iter(|| {
            let msg = Message::parse(&wire, false).unwrap();
            black_box(msg.decode(lookup).unwrap());
        });
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let lookup = NameLookup::builtin();

    let params = vec![
        Parameter::new(
            Pid::new(84).unwrap(),
            Value::Scaled {
                value: 50.0,
                units: Some("mph"),
            },
        ),
        Parameter::new(
            Pid::new(190).unwrap(),
            Value::Scaled {
                value: 1500.0,
                units: Some("rpm"),
            },
        ),
    ];
    group.bench_function("encode_broadcast", |b| {
        b.iter(|| {
            black_box(Message::encode(128, &params, lookup).unwrap());
        });
    });

    group.finish();
}

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksum");

    let frame = broadcast_wire();
    group.throughput(Throughput::Bytes(frame.len() as u64));
    group.bench_function("validate_frame", |b| {
        b.iter(|| {
            black_box(checksum::validate(&frame));
        });
    });

    group.finish();
}

fn bench_reassembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("reassembly");
    let lookup = NameLookup::builtin();

    let payload = Bytes::from(vec![0x41u8; 48]);
    let fragments = split(
        Pid::new(243).unwrap(),
        Pid::new(MULTISECTION_PIDS[0]).unwrap(),
        &payload,
        12,
    )
    .unwrap();
    let wires: Vec<Vec<u8>> = fragments
        .iter()
        .map(|frag| Message::encode(128, std::slice::from_ref(frag), lookup).unwrap())
        .collect();

    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("merge_4_sections", |b| {
        b.iter(|| {
            let mut reassembler = Reassembler::new();
            let mut merged = Vec::new();
            for wire in &wires {
                let msg = Message::parse(wire, false).unwrap();
                merged.extend(reassembler.push(&msg, lookup).unwrap());
            }
            black_box(merged);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_decode,
    bench_encode,
    bench_checksum,
    bench_reassembly
);
criterion_main!(benches);
