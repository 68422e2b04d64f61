use std::hint::black_box;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use redblack::RbTree;

use crate::Lfsr;

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("iter");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = RbTree::with_capacity(n_values);

    for _i in 0..n_values {
        t.insert(rand.next(), 42_usize);
    }

    bench_iter(n_values, g, &t);
    bench_iter_rev(n_values, g, &t);
    bench_lower_bound(n_values, g, &t);
    bench_upper_bound(n_values, g, &t);
}

fn bench_iter<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &RbTree<u16, usize>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "iter",
    };

    g.throughput(Throughput::Elements(n_values as _));
    // Values per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            for v in t.iter() {
                black_box(v);
            }
        })
    });
}

fn bench_iter_rev<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &RbTree<u16, usize>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "iter_rev",
    };

    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            for v in t.iter().rev() {
                black_box(v);
            }
        })
    });
}

/// Generate a benchmark that positions a cursor with the named bound query,
/// then walks it to the end of the tree.
macro_rules! bound_bench {
    (
        $name:ident
    ) => {
        paste::paste! {
            fn [<bench_ $name>]<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &RbTree<u16, usize>)
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: stringify!($name),
                };

                g.throughput(Throughput::Elements(n_values as _));
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter(|| {
                        let mut cursor = t.[<cursor_ $name>](&(u16::MAX / 2));
                        while let Some(v) = cursor.key_value() {
                            black_box(v);
                            cursor.move_next();
                        }
                    })
                });
            }
        }
    }
}

bound_bench!(lower_bound);
bound_bench!(upper_bound);
