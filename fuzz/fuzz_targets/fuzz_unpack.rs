#![no_main]
use libfuzzer_sys::fuzz_target;
use zensample::*;

// Input: [selector, palette_len, key0, key1, key2, samples...]; selector bit 7 enables the key
fuzz_target!(|data: &[u8]| {
    let [selector, palette_len, k0, k1, k2, samples @ ..] = data else {
        return;
    };
    let palette: Vec<Rgba<u8>> = (0..=*palette_len)
        .map(|i| Rgba::new(i, i ^ k0, i ^ k1, i ^ k2))
        .collect();
    let keyed = selector & 0x80 != 0;
    let key8 = keyed.then_some(*k0);
    let key16 = keyed.then_some(u16::from_be_bytes([*k0, *k1]));
    let rgb8 = keyed.then_some([*k0, *k1, *k2]);
    let rgb16 = keyed.then_some([u16::from(*k0) << 8, u16::from(*k1), u16::from(*k2) * 257]);

    let format = match (selector & 0x7f) % 17 {
        0 => Format::Indexed1 { palette: &palette, fill: None },
        1 => Format::Indexed2 { palette: &palette, fill: None },
        2 => Format::Indexed4 { palette: &palette, fill: None },
        3 => Format::Indexed8 { palette: &palette, fill: None },
        4 => Format::Gray1 { fill: None, key: key8 },
        5 => Format::Gray2 { fill: None, key: key8 },
        6 => Format::Gray4 { fill: None, key: key8 },
        7 => Format::Gray8 { fill: None, key: key8 },
        8 => Format::Gray16 { fill: None, key: key16 },
        9 => Format::GrayAlpha8 { fill: None },
        10 => Format::GrayAlpha16 { fill: None },
        11 => Format::Rgb8 { fill: None, key: rgb8 },
        12 => Format::Rgb16 { fill: None, key: rgb16 },
        13 => Format::Bgr8 { fill: None, key: rgb8 },
        14 => Format::Rgba8 { fill: None },
        15 => Format::Rgba16 { fill: None },
        _ => Format::Bgra8 { fill: None },
    };

    // Unvalidated formats and ragged buffers must fail cleanly, never panic
    let _ = format.validate();
    let _ = Rgba::<u8>::unpack(samples, &format);
    let _ = Rgba::<u64>::unpack(samples, &format);
    let _ = Va::<u16>::unpack(samples, &format);
    let _ = Va::<u32>::unpack(samples, &format);
    let _ = unpack_values::<u8>(samples, &format);

    if let Ok(colors) = Rgba::<u16>::unpack(samples, &format) {
        assert_eq!(colors.len() * format.bytes_per_pixel(), samples.len());
        let _ = Rgba::pack(&colors, &format);
    }
});
