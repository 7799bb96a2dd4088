//! Common test utilities and data generators.

use benchfit::core::MeasurementRecord;

/// Records with `NsPerOp = f(size)` for each size.
#[allow(dead_code)]
pub fn records_from(sizes: &[f64], f: impl Fn(f64) -> f64) -> Vec<MeasurementRecord> {
    sizes
        .iter()
        .map(|&n| MeasurementRecord::new(n, f(n)))
        .collect()
}

/// The four-point sort benchmark used for the pinned end-to-end values.
#[allow(dead_code)]
pub fn sort_records() -> Vec<MeasurementRecord> {
    vec![
        MeasurementRecord::new(10.0, 1008.0),
        MeasurementRecord::new(100.0, 8224.0),
        MeasurementRecord::new(1000.0, 152945.0),
        MeasurementRecord::new(10000.0, 1950999.0),
    ]
}

/// Records with `NsPerOp = a·N·log(N) + b·N + c + noise`.
#[allow(dead_code)]
pub fn generate_scaling_records(
    sizes: &[f64],
    coefficients: [f64; 3],
    noise_std: f64,
    seed: u64,
) -> Vec<MeasurementRecord> {
    // Simple deterministic "random" for reproducibility
    let mut rng_state = seed;
    let mut next_rand = move || -> f64 {
        rng_state = rng_state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        ((rng_state >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0
    };

    let [a, b, c] = coefficients;
    sizes
        .iter()
        .map(|&n| MeasurementRecord::new(n, a * n * n.ln() + b * n + c + noise_std * next_rand()))
        .collect()
}

/// Geometric sizes `start, start·ratio, …` (count values).
#[allow(dead_code)]
pub fn geometric_sizes(start: f64, ratio: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| start * ratio.powi(i as i32))
        .collect()
}

/// A go test -bench transcript with two fittable families and one unsized benchmark.
#[allow(dead_code)]
pub const BENCH_OUTPUT: &str = "\
goos: linux
goarch: amd64
pkg: sort
BenchmarkSort10-4            	 1000000	      1008 ns/op
BenchmarkSort100-4           	  200000	      8224 ns/op
BenchmarkSort1000-4          	   10000	    152945 ns/op
BenchmarkSort10000-4         	    1000	   1950999 ns/op
BenchmarkStableSort10-4      	 1000000	      1260 ns/op	      32 B/op	       1 allocs/op
BenchmarkStableSort100-4     	  100000	     16730 ns/op	      32 B/op	       1 allocs/op
BenchmarkStableSort1000-4    	    5000	    301877 ns/op	      32 B/op	       1 allocs/op
BenchmarkStableSort10000-4   	     300	   4533211 ns/op	      32 B/op	       1 allocs/op
BenchmarkCopy-4              	 1000000	      1000 ns/op	 512.00 MB/s
PASS
ok  	sort	138.860s
";

/// Approximate equality check for floating point values.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}
