//! Fixture builders shared by the integration tests

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

pub const PLUGIN_XML: &str = "<idea-plugin><name>X</name></idea-plugin>";

/// One entry of a fixture archive
pub struct Entry<'a> {
    pub path: &'a str,
    pub data: &'a [u8],
    pub method: CompressionMethod,
    pub modified: DateTime,
}

impl<'a> Entry<'a> {
    pub fn deflated(path: &'a str, data: &'a [u8]) -> Self {
        Self {
            path,
            data,
            method: CompressionMethod::Deflated,
            modified: stamp(2023, 1, 15),
        }
    }

    pub fn stored(path: &'a str, data: &'a [u8]) -> Self {
        Self {
            method: CompressionMethod::Stored,
            ..Self::deflated(path, data)
        }
    }

    pub fn at(mut self, modified: DateTime) -> Self {
        self.modified = modified;
        self
    }
}

pub fn stamp(year: u16, month: u8, day: u8) -> DateTime {
    DateTime::from_date_and_time(year, month, day, 10, 20, 30).unwrap()
}

/// Build a zip in memory with entries in the given order
pub fn build_zip(entries: &[Entry<'_>]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        let options = SimpleFileOptions::default()
            .compression_method(entry.method)
            .last_modified_time(entry.modified);
        if entry.path.ends_with('/') {
            writer.add_directory(entry.path, options).unwrap();
        } else {
            writer.start_file(entry.path, options).unwrap();
            writer.write_all(entry.data).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// A plugin jar with a manifest, a descriptor and a class file
pub fn plugin_jar(descriptor: &str) -> Vec<u8> {
    build_zip(&[
        Entry::stored("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n").at(stamp(2022, 6, 1)),
        Entry::deflated("META-INF/plugin.xml", descriptor.as_bytes()).at(stamp(2022, 6, 2)),
        Entry::deflated("com/bytedance/tools/codelocator/Main.class", &CLASS_BYTES)
            .at(stamp(2022, 6, 3)),
        Entry::stored("icons/logo.svg", b"<svg/>").at(stamp(2022, 6, 4)),
    ])
}

pub const CLASS_BYTES: [u8; 16] = [
    0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34, 0x00, 0x1D, 0x0A, 0x00, 0x06, 0x00, 0x0F, 0x09,
];

/// Write `bytes` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Metadata and raw (still compressed) bytes of every entry
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub path: String,
    pub method: CompressionMethod,
    pub modified: Option<DateTime>,
    pub crc32: u32,
    pub raw: Vec<u8>,
}

pub fn raw_entries(bytes: &[u8]) -> Vec<RawEntry> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index_raw(i).unwrap();
            let mut raw = Vec::new();
            file.read_to_end(&mut raw).unwrap();
            RawEntry {
                path: file.name().to_string(),
                method: file.compression(),
                modified: file.last_modified(),
                crc32: file.crc32(),
                raw,
            }
        })
        .collect()
}

/// Decompressed content of the entry at `path`
pub fn read_entry(bytes: &[u8], path: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(path).unwrap();
    let mut data = Vec::new();
    file.read_to_end(&mut data).unwrap();
    data
}

/// Names of every file in `dir`, sorted
pub fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
