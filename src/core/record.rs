//! Measurement records and response selection.

use crate::solvers::RegressionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One benchmark observation at a given problem size.
///
/// Field names on the wire follow the `go test -bench` result layout, with
/// the extracted size parameter carried in `X`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Full benchmark name, e.g. `BenchmarkSort1000-4`.
    #[serde(rename = "Name", default)]
    pub name: String,
    /// Number of iterations the benchmark harness ran.
    #[serde(rename = "N", default)]
    pub iterations: u64,
    /// Size parameter extracted from the name.
    #[serde(rename = "X")]
    pub size: f64,
    #[serde(rename = "NsPerOp", default)]
    pub ns_per_op: f64,
    #[serde(rename = "AllocedBytesPerOp", default)]
    pub alloced_bytes_per_op: u64,
    #[serde(rename = "AllocsPerOp", default)]
    pub allocs_per_op: u64,
    #[serde(rename = "MBPerS", default)]
    pub mb_per_s: f64,
}

impl MeasurementRecord {
    /// Create a record carrying only a size and a time-per-op measurement.
    pub fn new(size: f64, ns_per_op: f64) -> Self {
        Self {
            size,
            ns_per_op,
            ..Self::default()
        }
    }

    /// Value of the selected response field.
    pub fn response(&self, variable: ResponseVariable) -> f64 {
        match variable {
            ResponseVariable::NsPerOp => self.ns_per_op,
            ResponseVariable::AllocedBytesPerOp => self.alloced_bytes_per_op as f64,
            ResponseVariable::AllocsPerOp => self.allocs_per_op as f64,
            ResponseVariable::MBPerS => self.mb_per_s,
        }
    }
}

/// The measured quantity being modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResponseVariable {
    /// Time per operation.
    #[default]
    NsPerOp,
    /// Bytes allocated per operation.
    AllocedBytesPerOp,
    /// Allocations per operation.
    AllocsPerOp,
    /// Throughput.
    MBPerS,
}

impl ResponseVariable {
    pub const ALL: [ResponseVariable; 4] = [
        Self::NsPerOp,
        Self::AllocedBytesPerOp,
        Self::AllocsPerOp,
        Self::MBPerS,
    ];

    /// Name used in requests and in the record encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NsPerOp => "NsPerOp",
            Self::AllocedBytesPerOp => "AllocedBytesPerOp",
            Self::AllocsPerOp => "AllocsPerOp",
            Self::MBPerS => "MBPerS",
        }
    }

    /// Human readable unit, as printed by the benchmark harness.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::NsPerOp => "ns/op",
            Self::AllocedBytesPerOp => "B/op",
            Self::AllocsPerOp => "allocs/op",
            Self::MBPerS => "MB/s",
        }
    }
}

impl fmt::Display for ResponseVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseVariable {
    type Err = RegressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| RegressionError::UnknownResponseVariable(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_variable_round_trip() {
        for v in ResponseVariable::ALL {
            assert_eq!(v.as_str().parse::<ResponseVariable>().unwrap(), v);
        }
    }

    #[test]
    fn test_unknown_response_variable() {
        let err = "nsperop".parse::<ResponseVariable>().unwrap_err();
        assert_eq!(
            err,
            RegressionError::UnknownResponseVariable("nsperop".to_string())
        );
    }

    #[test]
    fn test_record_response_selection() {
        let record = MeasurementRecord {
            name: "BenchmarkSort10-4".to_string(),
            iterations: 1_000_000,
            size: 10.0,
            ns_per_op: 1008.0,
            alloced_bytes_per_op: 32,
            allocs_per_op: 1,
            mb_per_s: 0.5,
        };
        assert_eq!(record.response(ResponseVariable::NsPerOp), 1008.0);
        assert_eq!(record.response(ResponseVariable::AllocedBytesPerOp), 32.0);
        assert_eq!(record.response(ResponseVariable::AllocsPerOp), 1.0);
        assert_eq!(record.response(ResponseVariable::MBPerS), 0.5);
    }

    #[test]
    fn test_record_decoding() {
        let json = r#"{"Name":"BenchmarkSort10-4","N":1000000,"X":10,"NsPerOp":1008}"#;
        let record: MeasurementRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.size, 10.0);
        assert_eq!(record.ns_per_op, 1008.0);
        assert_eq!(record.allocs_per_op, 0);
    }

    #[test]
    fn test_record_decoding_rejects_non_numeric() {
        let json = r#"{"X":"ten","NsPerOp":1008}"#;
        assert!(serde_json::from_str::<MeasurementRecord>(json).is_err());
    }
}
