#![expect(missing_docs)]

mod common;

use classport_scan::{
    DEFAULT_ANNOTATION_DESCRIPTOR, PoolTag, PoolWriter, RecordingSink, ScanOptions, ScanRequest,
    scan,
};
use common::{CLASS, METHOD, annotated_pool};

fn report(pool: &[u8]) -> String {
    let mut sink = RecordingSink::new();
    let request = ScanRequest::new(pool, CLASS, METHOD);
    let _ = scan(&request, &ScanOptions::default(), &mut sink);
    sink.render()
}

#[test]
fn snapshot_report_for_annotated_class() {
    let pool = annotated_pool(&[
        ("id", "org.example:demo:1.0.0"),
        ("artefact", "demo"),
        ("group", "org.example"),
        ("version", "1.0.0"),
    ]);
    insta::assert_snapshot!(report(pool.as_bytes()), @r"
    --------------------
    Found custom annotation: Lio/github/chains_project/classport/commons/ClassportInfo;
    Class: Lcom/example/Foo;
    Method: run
    id: org.example:demo:1.0.0
    artefact: demo
    group: org.example
    version: 1.0.0
    ");
}

#[test]
fn snapshot_report_with_unknown_tags() {
    let mut pool = PoolWriter::new();
    pool.raw(0xfe, &[])
        .unwrap()
        .utf8(DEFAULT_ANNOTATION_DESCRIPTOR)
        .unwrap()
        .utf8("groupId")
        .unwrap()
        .raw(17, &[])
        .unwrap()
        .utf8("org.example")
        .unwrap();
    insta::assert_snapshot!(report(pool.as_bytes()), @r"
    Unknown constant pool type '254' at offset 0
    --------------------
    Found custom annotation: Lio/github/chains_project/classport/commons/ClassportInfo;
    Class: Lcom/example/Foo;
    Method: run
    Unknown constant pool type '17' at offset 72
    groupId: org.example
    ");
}

#[test]
fn snapshot_report_for_truncated_pool() {
    let mut pool = PoolWriter::new();
    pool.utf8(DEFAULT_ANNOTATION_DESCRIPTOR)
        .unwrap()
        .utf8("k1")
        .unwrap()
        .utf8("v1")
        .unwrap();
    let mut bytes = pool.into_bytes();
    bytes.extend_from_slice(&[PoolTag::UTF8, 0xff, 0xff, b'x']);
    insta::assert_snapshot!(report(&bytes), @r"
    --------------------
    Found custom annotation: Lio/github/chains_project/classport/commons/ClassportInfo;
    Class: Lcom/example/Foo;
    Method: run
    k1: v1
    Scan failed: Utf8(1) record at offset 71 needs 65537 payload bytes but only 3 remain
    ");
}

#[test]
fn snapshot_report_is_empty_without_annotation() {
    let mut pool = PoolWriter::new();
    pool.utf8("java/lang/Object").unwrap().utf8("Code").unwrap();
    insta::assert_snapshot!(report(pool.as_bytes()), @"");
}
