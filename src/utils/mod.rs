cfg_if::cfg_if! {
    if #[cfg(feature = "variable_time_eq")] {
        #[inline(always)]
        pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
            a == b
        }
    } else {
        #[inline(always)]
        pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
            if a.len() != b.len() {
                return false;
            }

            let x = a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y));
            core::hint::black_box(x) == 0
        }
    }
}

/// Converts a size in bytes to a human-readable string. For benchmarking
pub fn human_readable_size(size: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut cal_size = size;
    let mut unit = 0;
    while cal_size >= 1024 && unit + 1 < UNITS.len() {
        cal_size >>= 10;
        unit += 1;
    }
    format!("{} {}", cal_size, UNITS[unit])
}

/// macro for benchmarking
#[macro_export]
macro_rules! _impl_bench_trait_for_criterion {
    ($name:ident) => {
        pub trait BenchTrait {
            fn bench<F>(&mut self, name: &str, f: F) where F: FnMut();
        }

        impl BenchTrait for std::ops::Range<usize> {
            #[inline(always)]
            fn bench<F>(&mut self, _name: &str, mut f: F) where F: FnMut() {
                for _ in self {
                    f();
                }
            }
        }

        impl BenchTrait for $name {
            #[inline(always)]
            fn bench<F>(&mut self, name: &str, mut f: F) where F: FnMut() {
                self.bench_function(name, |b| b.iter(|| {
                    f();
                }));
            }
        }
    };
}

/// `cargo bench` runs the criterion group, a plain run spins `$fn` for profiling.
#[macro_export]
macro_rules! _bench_main {
    ($name:ident, $fn:ident$(,)?) => {
        fn main() {
            if std::env::args().any(|arg| arg == "--bench") {
                $name();
                Criterion::default().configure_from_args().final_summary();
                return;
            }
            let mut range = 0..1000000;
            $fn(&mut range, 1024);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"", b""));
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }

    #[test]
    fn test_human_readable_size() {
        assert_eq!(human_readable_size(16), "16 B");
        assert_eq!(human_readable_size(8192), "8 KiB");
        assert_eq!(human_readable_size(3 << 20), "3 MiB");
        assert_eq!(human_readable_size(5 << 40), "5120 GiB");
    }
}
