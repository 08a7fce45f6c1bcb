use criterion::*;
use tachyon_digest::utils::human_readable_size;
use tachyon_digest::{_impl_bench_trait_for_criterion, _bench_main};

_impl_bench_trait_for_criterion!(Criterion);

fn bench_md5_hash(c: &mut impl BenchTrait, size: usize) {
    let data = vec![0u8; size];

    let test_name = format!("md5 hash {}", human_readable_size(size));
    c.bench(&test_name, #[inline(always)] || {
        std::hint::black_box(tachyon_digest::crypto::hash::md5::compute(&data));
    });
}

fn bench_md5_sign_string(c: &mut impl BenchTrait, size: usize) {
    // mixed ascii and CJK, like a translation request payload
    let text = "appid\u{4f60}\u{597d}query".repeat(size / 20 + 1);

    let test_name = format!("md5 sign string {}", human_readable_size(text.len()));
    c.bench(&test_name, #[inline(always)] || {
        std::hint::black_box(tachyon_digest::digest(&text));
    });
}

fn bench_md5(c: &mut Criterion) {

    fn bench_crate_md5_hash(c: &mut Criterion, size: usize) {
        let data = vec![0u8; size];

        let test_name = format!("crate md5 hash {}", human_readable_size(size));
        c.bench_function(&test_name, |b| b.iter(|| {
            black_box(md5::compute(&data));
        }));
    }

    for size in [16, 64, 256, 1024, 8192, 65536] {
        bench_md5_hash(c, size);
        bench_crate_md5_hash(c, size);
    }
    bench_md5_sign_string(c, 64);
    bench_md5_sign_string(c, 1024);
}

criterion_group!(benches, bench_md5);
_bench_main!(benches, bench_md5_hash);
