#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_unpack";
    fs::create_dir_all(dir).unwrap();

    // Indexed8, 4-entry palette, no key, indices 0..=3
    fs::write(format!("{dir}/indexed8.bin"), b"\x03\x03\x00\x00\x00\x00\x01\x02\x03").unwrap();

    // Gray2 keyed on 2
    fs::write(format!("{dir}/gray2_key.bin"), b"\x85\x00\x02\x00\x00\x00\x01\x02\x03").unwrap();

    // Gray16 keyed on 0x0102
    fs::write(format!("{dir}/gray16_key.bin"), b"\x88\x00\x01\x02\x00\x01\x02\xff\xff").unwrap();

    // Rgb8 keyed on (10, 20, 30)
    fs::write(
        format!("{dir}/rgb8_key.bin"),
        b"\x8b\x00\x0a\x14\x1e\x0a\x14\x1e\x28\x32\x3c",
    )
    .unwrap();

    // Rgba16, one pixel
    fs::write(
        format!("{dir}/rgba16.bin"),
        b"\x0f\x00\x00\x00\x00\x12\x34\x56\x78\x9a\xbc\xff\xfe",
    )
    .unwrap();

    // Out-of-range index and ragged buffer for error paths
    fs::write(format!("{dir}/bad_index.bin"), b"\x03\x01\x00\x00\x00\x00\x07").unwrap();
    fs::write(format!("{dir}/ragged.bin"), b"\x0e\x00\x00\x00\x00\x01\x02\x03").unwrap();
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();

    let dir = "fuzz/corpus/fuzz_roundtrip";
    fs::create_dir_all(dir).unwrap();
    fs::write(format!("{dir}/rgb8.bin"), b"\x04\x0a\x14\x1e\x28\x32\x3c").unwrap();
    fs::write(format!("{dir}/gray_alpha16.bin"), b"\x03\x12\x34\xff\x00").unwrap();
    fs::write(format!("{dir}/bgra8.bin"), b"\x09\x01\x02\x03\x04").unwrap();

    println!("Generated seed corpora in fuzz/corpus/");
}
