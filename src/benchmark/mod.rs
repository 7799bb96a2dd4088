//! Parsing of `go test -bench` output into measurement records.
//!
//! A benchmark line looks like
//!
//! ```text
//! BenchmarkSort1000-4   10000   152945 ns/op   8192 B/op   2 allocs/op
//! ```
//!
//! The trailing `-4` is GOMAXPROCS; the digits before it are the size
//! parameter, and everything before those digits (minus an optional `/`) is
//! the family the record is grouped under.

use crate::core::MeasurementRecord;
use regex::Regex;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::sync::OnceLock;

fn family_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(.*?)/?(\d+)-\d+$").expect("valid family pattern"))
}

/// Split a benchmark name into its family and size parameter.
///
/// `BenchmarkSort1000-4` → `("BenchmarkSort", 1000.0)`,
/// `BenchmarkMap/512-8` → `("BenchmarkMap", 512.0)`.
pub fn family_of(name: &str) -> Option<(String, f64)> {
    let captures = family_pattern().captures(name)?;
    let size = captures[2].parse::<f64>().ok()?;
    Some((captures[1].to_string(), size))
}

/// Parse one line of benchmark output.
///
/// Returns `None` for lines that are not benchmark results or whose name
/// carries no size parameter.
pub fn parse_line(line: &str) -> Option<MeasurementRecord> {
    let mut fields = line.split_whitespace();
    let name = fields.next()?;
    if !name.starts_with("Benchmark") {
        return None;
    }
    let iterations = fields.next()?.parse::<u64>().ok()?;

    let Some((_, size)) = family_of(name) else {
        tracing::debug!(name, "benchmark name has no size parameter, skipping");
        return None;
    };

    let mut record = MeasurementRecord {
        name: name.to_string(),
        iterations,
        size,
        ..MeasurementRecord::default()
    };

    let rest: Vec<&str> = fields.collect();
    for pair in rest.chunks(2) {
        let [value, unit] = pair else {
            break;
        };
        match *unit {
            "ns/op" => record.ns_per_op = value.parse().ok()?,
            "MB/s" => record.mb_per_s = value.parse().ok()?,
            "B/op" => record.alloced_bytes_per_op = value.parse().ok()?,
            "allocs/op" => record.allocs_per_op = value.parse().ok()?,
            _ => {}
        }
    }
    Some(record)
}

/// Parse every benchmark line of a reader, in input order.
pub fn parse_set<R: BufRead>(reader: R) -> std::io::Result<Vec<MeasurementRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        if let Some(record) = parse_line(&line?) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Group records into families, ordered by family name.
pub fn group_families(
    records: impl IntoIterator<Item = MeasurementRecord>,
) -> BTreeMap<String, Vec<MeasurementRecord>> {
    let mut families: BTreeMap<String, Vec<MeasurementRecord>> = BTreeMap::new();
    for record in records {
        if let Some((family, _)) = family_of(&record.name) {
            families.entry(family).or_default().push(record);
        }
    }
    families
}
