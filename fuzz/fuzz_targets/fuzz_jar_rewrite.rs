#![no_main]

use k2patch::archive::rewrite_jar;
use k2patch::{patch_descriptor, ArchiveReader, PatchConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = PatchConfig::default();

    // Treat input as a jar - should never panic
    let _ = rewrite_jar(data.to_vec(), "fuzz.jar", &config);

    // Listing and reading every entry - should never panic
    if let Ok(mut reader) = ArchiveReader::from_bytes(data.to_vec(), "fuzz.zip") {
        if let Ok(entries) = reader.entries() {
            for entry in entries {
                let _ = reader.read_entry(entry.index);
            }
        }
    }

    // Treat input as descriptor text
    if let Ok(text) = std::str::from_utf8(data) {
        let outcome = patch_descriptor(text, &config);
        assert!(outcome.text().len() >= text.len());
    }
});
