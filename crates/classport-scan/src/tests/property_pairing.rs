use bstr::BString;
use quickcheck::{QuickCheck, TestResult};

use super::arbitrary::{Pool, Record, Word};
use crate::{
    options::{DEFAULT_ANNOTATION_DESCRIPTOR, DEFAULT_ATTRIBUTE_MARKER, ScanOptions},
    pool_writer::PoolWriter,
    scanner::{ScanRequest, scan},
    sink::RecordingSink,
};

fn tests() -> u64 {
    if cfg!(feature = "test-fast") {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}

/// Non-text records never touch the extractor, so they can be interleaved
/// between the annotation's strings without changing the pairs.
fn non_text(pool: &Pool) -> impl Iterator<Item = &Record> + Clone {
    pool.0.iter().filter(|r| !matches!(r, Record::Utf8(_)))
}

/// Property: `[marker, k1, v1, ..., kn, vn, end]` with arbitrary non-text
/// records sprinkled in between decodes to exactly `[(k1, v1), ..., (kn, vn)]`
/// in order.
#[test]
fn pairs_survive_interleaved_records_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(pairs: Vec<(Word, Word)>, noise: Pool, spacing: Vec<usize>) -> TestResult {
        if pairs.is_empty() {
            return TestResult::discard();
        }

        let texts: Vec<&str> = core::iter::once(DEFAULT_ANNOTATION_DESCRIPTOR)
            .chain(pairs.iter().flat_map(|(k, v)| [k.0.as_str(), v.0.as_str()]))
            .chain(core::iter::once(DEFAULT_ATTRIBUTE_MARKER))
            .collect();

        let mut noise = non_text(&noise).cycle();
        let mut spacing = spacing.iter().copied().chain(core::iter::repeat(0));
        let mut w = PoolWriter::new();
        for text in texts {
            for _ in 0..spacing.next().unwrap_or(0) % 3 {
                if let Some(rec) = noise.next() {
                    rec.write(&mut w);
                }
            }
            w.utf8(text).unwrap();
        }

        let bytes = w.into_bytes();
        let mut sink = RecordingSink::new();
        let request = ScanRequest::new(&bytes, "LFoo;", "bar");
        let Ok(Some(record)) = scan(&request, &ScanOptions::default(), &mut sink) else {
            return TestResult::failed();
        };

        let expected: Vec<(BString, BString)> = pairs
            .iter()
            .map(|(k, v)| (BString::from(k.0.as_str()), BString::from(v.0.as_str())))
            .collect();
        TestResult::from_bool(record.pairs == expected && sink.pairs().count() == expected.len())
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<(Word, Word)>, Pool, Vec<usize>) -> TestResult);
}

/// Property: text before the marker is never paired, whatever it contains.
#[test]
fn text_before_marker_is_ignored_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(prefix: Vec<Word>, key: Word, value: Word) -> bool {
        let mut w = PoolWriter::new();
        for word in &prefix {
            w.utf8(&word.0).unwrap();
        }
        w.utf8(DEFAULT_ANNOTATION_DESCRIPTOR).unwrap();
        w.utf8(&key.0).unwrap().utf8(&value.0).unwrap();

        let bytes = w.into_bytes();
        let request = ScanRequest::new(&bytes, "LFoo;", "bar");
        let record = scan(&request, &ScanOptions::default(), &mut RecordingSink::new());
        matches!(record, Ok(Some(r))
            if r.pairs == [(BString::from(key.0.as_str()), BString::from(value.0.as_str()))])
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<Word>, Word, Word) -> bool);
}

/// Property: scanning the same pool twice with one sink gives identical
/// records; nothing from the first call leaks into the second.
#[test]
fn repeated_scans_are_independent_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(head: Vec<Word>, tail: Pool) -> bool {
        let mut w = PoolWriter::new();
        w.utf8(DEFAULT_ANNOTATION_DESCRIPTOR).unwrap();
        for word in &head {
            w.utf8(&word.0).unwrap();
        }
        for rec in &tail.0 {
            rec.write(&mut w);
        }

        let bytes = w.into_bytes();
        let options = ScanOptions::default();
        let mut sink = RecordingSink::new();
        let request = ScanRequest::new(&bytes, "LFoo;", "bar");
        let first = scan(&request, &options, &mut sink);
        let events_after_first = sink.events.len();
        let second = scan(&request, &options, &mut sink);
        first == second && sink.events.len() == 2 * events_after_first
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<Word>, Pool) -> bool);
}
