//! Benchmarks for netbuf.
//!
//! Run with:
//!     cargo bench

use std::io::Cursor;
use std::thread;

use bytes::{Bytes, BytesMut};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use netbuf::{Message, Pool, to_bytes};

fn bench_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool");

    for size in [64, 4 * 1024, 64 * 1024] {
        let pool = Pool::new(64 * 1024);

        group.bench_function(format!("get_put_{size}"), |b| {
            b.iter(|| {
                let (buf, n) = pool.get(black_box(size));
                pool.put(buf);
                black_box(n)
            });
        });

        // Baseline without reuse
        group.bench_function(format!("alloc_{size}"), |b| {
            b.iter(|| {
                let buf = BytesMut::with_capacity(black_box(size));
                black_box(buf.capacity())
            });
        });
    }

    group.bench_function("guard_4k", |b| {
        let pool = Pool::new(64 * 1024);
        b.iter(|| {
            let mut buf = pool.take(black_box(4096));
            buf.extend_from_slice(b"hello");
            black_box(buf.len())
        });
    });

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended");
    let threads = 4;
    let iterations = 1_000;

    group.throughput(Throughput::Elements((threads * iterations) as u64));
    group.bench_function("get_put_mixed_classes", |b| {
        let pool = Pool::new(64 * 1024);
        b.iter(|| {
            thread::scope(|s| {
                for t in 0..threads {
                    let pool = &pool;
                    s.spawn(move || {
                        for i in 0..iterations {
                            let (buf, _) = pool.get((i * 131 + t * 17) % (64 * 1024));
                            pool.put(buf);
                        }
                    });
                }
            });
        });
    });

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let size = 1024 * 1024; // 1 MB
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
    let shared = Bytes::from(data.clone());
    let fragments: Vec<Bytes> = data.chunks(16 * 1024).map(Bytes::copy_from_slice).collect();

    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("bytes", |b| {
        b.iter(|| black_box(to_bytes(shared.clone()).unwrap().len()));
    });

    group.bench_function("fragments", |b| {
        b.iter(|| black_box(to_bytes(fragments.clone()).unwrap().len()));
    });

    group.bench_function("steal_cursor", |b| {
        b.iter(|| {
            let source = Cursor::new(shared.clone());
            black_box(to_bytes(Message::writer_to(source)).unwrap().len())
        });
    });

    group.bench_function("read_to_end", |b| {
        b.iter(|| {
            let source = Cursor::new(shared.clone());
            black_box(to_bytes(Message::reader(source)).unwrap().len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_pool, bench_contended, bench_extract);
criterion_main!(benches);
