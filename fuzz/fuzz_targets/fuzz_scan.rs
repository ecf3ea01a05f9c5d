#![no_main]

use arbitrary::Arbitrary;
use classport_scan::{
    ClassFile, PoolScanner, RecordingSink, ReservedKeyPolicy, ScanOptions, ScanRequest, scan,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    bound: u16,
    skip_key_only: bool,
    buffer: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let bound = usize::from(input.bound);
    let extent = bound.min(input.buffer.len());

    // The walk stays inside the extent and always moves forward.
    let mut last_end = 0;
    for rec in PoolScanner::new(input.buffer, bound) {
        let Ok(rec) = rec else { break };
        assert!(rec.offset >= last_end);
        last_end = rec.offset + rec.encoded_len();
        assert!(last_end <= extent);
    }

    let mut options = ScanOptions::default();
    if input.skip_key_only {
        options.reserved_key_policy = ReservedKeyPolicy::SkipKey;
    }
    let mut sink = RecordingSink::new();
    let request = ScanRequest::new(input.buffer, "LFuzz;", "run").with_bound(bound);
    let delivered = match scan(&request, &options, &mut sink) {
        Ok(Some(record)) => record.pairs.len(),
        Ok(None) => 0,
        Err(failure) => failure.decoded.pairs.len(),
    };
    assert_eq!(delivered, sink.pairs().count());

    // Whole-file parsing must never panic either.
    if let Ok(class) = ClassFile::parse(input.buffer) {
        assert!(class.pool_offset + class.constant_pool().len() <= input.buffer.len());
    }
});
