#![allow(missing_docs, dead_code)]

use classport_scan::{CLASS_MAGIC, PoolWriter, ScanOptions};

pub const CLASS: &str = "Lcom/example/Foo;";
pub const METHOD: &str = "run";

/// Wraps `pool` in a minimal class file: header, pool, then the fixed
/// access flags and class indices with no members.
pub fn class_file(pool: &PoolWriter) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&CLASS_MAGIC.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&61u16.to_be_bytes());
    out.extend_from_slice(&(pool.slot_count() + 1).to_be_bytes());
    out.extend_from_slice(pool.as_bytes());
    // access flags, this_class, super_class, then empty interface, field,
    // method and attribute tables
    out.extend_from_slice(&[0x00, 0x21, 0x00, 0x01, 0x00, 0x03]);
    out.extend_from_slice(&[0; 8]);
    out
}

/// A pool shaped like a compiled class: class and method references around
/// the embedded annotation strings.
pub fn annotated_pool(pairs: &[(&str, &str)]) -> PoolWriter {
    let options = ScanOptions::default();
    let mut w = PoolWriter::new();
    w.index_ref(classport_scan::PoolTag::Class, 2)
        .unwrap()
        .utf8("com/example/Foo")
        .unwrap()
        .index_ref(classport_scan::PoolTag::Class, 4)
        .unwrap()
        .utf8("java/lang/Object")
        .unwrap()
        .pair_ref(classport_scan::PoolTag::Methodref, 3, 6)
        .unwrap()
        .pair_ref(classport_scan::PoolTag::NameAndType, 7, 8)
        .unwrap()
        .utf8("<init>")
        .unwrap()
        .utf8("()V")
        .unwrap()
        .utf8(&options.annotation_descriptor)
        .unwrap();
    for (key, value) in pairs {
        w.utf8(key).unwrap().utf8(value).unwrap();
    }
    w.utf8(&options.attribute_marker)
        .unwrap()
        .utf8("Code")
        .unwrap()
        .utf8("SourceFile")
        .unwrap()
        .utf8("Foo.java")
        .unwrap();
    w
}
