/*!
 * Sample Line Parser
 * Turns one line of sampler output into a typed sample
 *
 * Line format: `<timestamp> <cpu> <memory> [ignored...]`, whitespace separated.
 */

use super::sample::UsageSample;
use crate::core::errors::{ParseResult, SampleParseError};
use crate::core::limits::SAMPLE_MIN_FIELDS;
use crate::core::types::Timestamp;

/// Parser with a memory scale factor applied to the raw reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleLineParser {
    memory_scale: f64,
}

impl SampleLineParser {
    /// Parser passing memory through unscaled
    pub const fn new() -> Self {
        Self { memory_scale: 1.0 }
    }

    /// Parser multiplying the raw memory field by `memory_scale`
    pub const fn with_memory_scale(memory_scale: f64) -> Self {
        Self { memory_scale }
    }

    #[inline]
    pub const fn memory_scale(&self) -> f64 {
        self.memory_scale
    }

    /// Parse a sampler line
    ///
    /// Readings must be finite and non-negative; anything else is rejected.
    pub fn parse(&self, line: &str) -> ParseResult<UsageSample> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < SAMPLE_MIN_FIELDS {
            return Err(SampleParseError::TooFewFields {
                expected: SAMPLE_MIN_FIELDS,
                found: fields.len(),
            });
        }

        let timestamp: Timestamp = fields[0]
            .parse()
            .map_err(|_| SampleParseError::InvalidTimestamp(fields[0].to_string()))?;

        let cpu = parse_reading(fields[1])
            .ok_or_else(|| SampleParseError::InvalidCpu(fields[1].to_string()))?;

        let memory = parse_reading(fields[2])
            .map(|raw| raw * self.memory_scale)
            .filter(|scaled| scaled.is_finite() && *scaled >= 0.0)
            .ok_or_else(|| SampleParseError::InvalidMemory(fields[2].to_string()))?;

        Ok(UsageSample::new(timestamp, cpu, memory))
    }
}

impl Default for SampleLineParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_reading(field: &str) -> Option<f64> {
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let sample = SampleLineParser::new().parse("1000 12.5 2048").unwrap();
        assert_eq!(sample, UsageSample::new(1000, 12.5, 2048.0));
    }

    #[test]
    fn test_reject_two_fields() {
        let err = SampleLineParser::new().parse("1000 12.5").unwrap_err();
        assert_eq!(
            err,
            SampleParseError::TooFewFields {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_reject_bad_timestamp() {
        assert!(matches!(
            SampleLineParser::new().parse("abc 1 2"),
            Err(SampleParseError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_scale_to_mib() {
        let parser = SampleLineParser::with_memory_scale(1.0 / 1_048_576.0);
        let sample = parser.parse("1000 5 1048576").unwrap();
        assert_eq!(sample.memory(), 1.0);
    }

    #[test]
    fn test_tolerates_pty_line_endings_and_extra_fields() {
        let sample = SampleLineParser::new().parse("  7 1.0 2.0 extra\r").unwrap();
        assert_eq!(sample.timestamp(), 7);
    }

    #[test]
    fn test_reject_negative_and_nan() {
        let parser = SampleLineParser::new();
        assert!(matches!(
            parser.parse("1 -3 2"),
            Err(SampleParseError::InvalidCpu(_))
        ));
        assert!(matches!(
            parser.parse("1 3 NaN"),
            Err(SampleParseError::InvalidMemory(_))
        ));
    }
}
