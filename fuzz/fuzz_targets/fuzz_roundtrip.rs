#![no_main]
use libfuzzer_sys::fuzz_target;
use zensample::*;

fuzz_target!(|data: &[u8]| {
    // If we can unpack it, packing at the native depth must reproduce the buffer
    let [selector, samples @ ..] = data else {
        return;
    };
    let format = match selector % 10 {
        0 => Format::Gray8 { fill: None, key: None },
        1 => Format::Gray16 { fill: None, key: None },
        2 => Format::GrayAlpha8 { fill: None },
        3 => Format::GrayAlpha16 { fill: None },
        4 => Format::Rgb8 { fill: None, key: None },
        5 => Format::Rgb16 { fill: None, key: None },
        6 => Format::Bgr8 { fill: None, key: None },
        7 => Format::Rgba8 { fill: None },
        8 => Format::Rgba16 { fill: None },
        _ => Format::Bgra8 { fill: None },
    };

    let Ok(colors) = Rgba::<u16>::unpack(samples, &format) else {
        return;
    };
    let packed = Rgba::pack(&colors, &format).expect("pack of unpacked colors failed");
    assert_eq!(packed, samples, "roundtrip sample mismatch");

    let Ok(wide) = Rgba::<u64>::unpack(samples, &format) else {
        panic!("u64 unpack failed where u16 succeeded");
    };
    assert_eq!(Rgba::pack(&wide, &format).unwrap(), samples);
});
