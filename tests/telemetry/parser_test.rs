/*!
 * Sample Line Parser Tests
 */

use dbgmon::core::limits::BYTES_TO_MIB;
use dbgmon::{SampleLineParser, SampleParseError, UsageSample};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_three_fields() {
    let parser = SampleLineParser::new();
    assert_eq!(
        parser.parse("1700000000000 3.5 81920").unwrap(),
        UsageSample::new(1_700_000_000_000, 3.5, 81920.0)
    );
}

#[test]
fn test_extra_fields_ignored() {
    let parser = SampleLineParser::new();
    let sample = parser.parse("10 1.5 2.5 99 threads").unwrap();
    assert_eq!(sample, UsageSample::new(10, 1.5, 2.5));
}

#[test]
fn test_short_lines_rejected() {
    let parser = SampleLineParser::new();
    for line in ["", "   ", "10", "10 1.5"] {
        assert!(
            matches!(parser.parse(line), Err(SampleParseError::TooFewFields { .. })),
            "line {:?} should be rejected",
            line
        );
    }
}

#[test]
fn test_non_numeric_rejected() {
    let parser = SampleLineParser::new();
    assert!(matches!(
        parser.parse("10.5 1 1"),
        Err(SampleParseError::InvalidTimestamp(_))
    ));
    assert!(matches!(
        parser.parse("10 high 1"),
        Err(SampleParseError::InvalidCpu(_))
    ));
    assert!(matches!(
        parser.parse("10 1 lots"),
        Err(SampleParseError::InvalidMemory(_))
    ));
}

#[test]
fn test_mib_scale() {
    let parser = SampleLineParser::with_memory_scale(BYTES_TO_MIB);
    let sample = parser.parse("0 0 5242880").unwrap();
    assert_eq!(sample.memory(), 5.0);
    assert_eq!(parser.memory_scale(), BYTES_TO_MIB);
}

proptest! {
    #[test]
    fn test_formatted_readings_parse_back(
        ts in 0i64..4_000_000_000_000,
        cpu in 0u32..10_000,
        mem in 0u64..1_000_000_000,
    ) {
        let line = format!("{} {} {}", ts, cpu, mem);
        let sample = SampleLineParser::new().parse(&line).unwrap();
        prop_assert_eq!(sample.timestamp(), ts);
        prop_assert_eq!(sample.cpu_percent(), cpu as f64);
        prop_assert_eq!(sample.memory(), mem as f64);
    }

    #[test]
    fn test_arbitrary_text_never_panics(line in ".{0,64}") {
        let _ = SampleLineParser::new().parse(&line);
    }
}
