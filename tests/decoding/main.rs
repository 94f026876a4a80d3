use miniz_oxide::deflate::compress_to_vec_zlib;
use rgb_png::{
    collect_image_data, read_header, reconstruct, Channel, Codec, DecodeOptions, Error, ErrorKind,
    ImageHeader, Pixel, Raster, Zlib, PNG,
};

const SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

fn chunk(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    let mut bytes = (data.len() as u32).to_be_bytes().to_vec();
    bytes.extend(chunk_type);
    bytes.extend(data);
    bytes.extend(hasher.finalize().to_be_bytes());
    bytes
}

fn ihdr(width: u32, height: u32) -> Vec<u8> {
    let mut data = width.to_be_bytes().to_vec();
    data.extend(height.to_be_bytes());
    data.extend([8, 2, 0, 0, 0]);
    chunk(b"IHDR", &data)
}

/// A PNG whose compressed scanlines are split over `splits` IDAT chunks, with
/// an ancillary chunk thrown in between.
fn png_from_scanlines(width: u32, height: u32, scanlines: &[u8], splits: usize) -> Vec<u8> {
    let compressed = compress_to_vec_zlib(scanlines, 6);
    let mut bytes = SIGNATURE.to_vec();
    bytes.extend(ihdr(width, height));
    bytes.extend(chunk(b"gAMA", &[0, 0, 0xb1, 0x8f]));
    for part in compressed.chunks(compressed.len().div_ceil(splits)) {
        bytes.extend(chunk(b"IDAT", part));
    }
    bytes.extend(chunk(b"IEND", &[]));
    bytes
}

#[test]
fn header_snapshot() {
    let png = png_from_scanlines(2, 1, &[0, 1, 2, 3, 4, 5, 6], 1);
    insta::assert_debug_snapshot!(read_header(&png).unwrap(), @r###"
    ImageHeader {
        width: 2,
        height: 1,
        bit_depth: 8,
        color_type: Truecolor,
        compression_method: 0,
        filter_method: 0,
        interlace_method: None,
    }
    "###);
}

#[test]
fn filter_none_end_to_end() {
    let png = PNG::decode(&png_from_scanlines(2, 1, &[0, 1, 2, 3, 4, 5, 6], 1)).unwrap();
    assert_eq!(
        png.raster().rows(),
        &[vec![Pixel::new(1, 2, 3), Pixel::new(4, 5, 6)]]
    );
}

#[test]
fn all_filters_across_split_idat() {
    // 2x5 image, one row per filter type. Expected pixels worked out by hand.
    let scanlines = [
        0, 10, 20, 30, 40, 50, 60, // None
        1, 5, 5, 5, 250, 250, 250, // Sub: second pixel wraps to (255,255,255)
        2, 1, 1, 1, 1, 1, 1, // Up
        3, 2, 2, 2, 0, 0, 0, // Average
        4, 0, 0, 0, 1, 1, 1, // Paeth
    ];
    let png = PNG::decode(&png_from_scanlines(2, 5, &scanlines, 3)).unwrap();
    let rows = png.raster().rows();
    assert_eq!(rows[0], [Pixel::new(10, 20, 30), Pixel::new(40, 50, 60)]);
    assert_eq!(rows[1], [Pixel::new(5, 5, 5), Pixel::new(255, 255, 255)]);
    assert_eq!(rows[2], [Pixel::new(6, 6, 6), Pixel::new(0, 0, 0)]);
    // Average: first pixel (2 + (0 + 6) / 2) = 5, second (0 + (5 + 0) / 2) = 2
    assert_eq!(rows[3], [Pixel::new(5, 5, 5), Pixel::new(2, 2, 2)]);
    // Paeth: first pixel predicts b = 5; second a=5 b=2 c=5 -> p=2 -> b = 2, plus 1
    assert_eq!(rows[4], [Pixel::new(5, 5, 5), Pixel::new(3, 3, 3)]);
}

#[test]
fn pipeline_stages_compose() {
    let bytes = png_from_scanlines(1, 2, &[0, 9, 8, 7, 2, 1, 1, 1], 2);
    let header = read_header(&bytes).unwrap();
    let compressed = collect_image_data(&bytes, &DecodeOptions::default()).unwrap();
    let raster = reconstruct(&Zlib.inflate(&compressed).unwrap(), &header).unwrap();
    assert_eq!(raster.get(0, 1), Some(&Pixel::new(10, 9, 8)));
}

#[test]
fn too_few_rows_names_both_counts() {
    let bytes = png_from_scanlines(2, 4, &[0; 7 * 3], 1);
    let err = PNG::decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Consistency);
    assert_eq!(
        err.to_string(),
        "there has been a data mismatch: expected 4 rows, but got 3 rows"
    );
}

#[test]
fn corrupt_image_data_is_decompression_error() {
    let mut bytes = SIGNATURE.to_vec();
    bytes.extend(ihdr(1, 1));
    bytes.extend(chunk(b"IDAT", b"definitely not zlib"));
    bytes.extend(chunk(b"IEND", &[]));
    let err = PNG::decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decompression);
}

#[test]
fn crc_verification_is_configurable() {
    let mut bytes = png_from_scanlines(1, 1, &[0, 1, 2, 3], 1);
    // Last byte of the gAMA chunk's CRC.
    let gama_crc_end = SIGNATURE.len() + 25 + 16 - 1;
    bytes[gama_crc_end] ^= 0x55;

    let err = PNG::decode(&bytes).unwrap_err();
    assert!(matches!(err, Error::Crc { ref chunk_type, .. } if chunk_type == "gAMA"));

    let png = PNG::decode_with(&bytes, DecodeOptions { verify_crc: false }, &Zlib).unwrap();
    assert_eq!(png.raster().get(0, 0), Some(&Pixel::new(1, 2, 3)));
}

#[test]
fn unsupported_profile_is_rejected() {
    let mut bytes = SIGNATURE.to_vec();
    let mut data = 1u32.to_be_bytes().to_vec();
    data.extend(1u32.to_be_bytes());
    data.extend([8, 6, 0, 0, 0]);
    bytes.extend(chunk(b"IHDR", &data));
    bytes.extend(chunk(b"IDAT", &compress_to_vec_zlib(&[0, 1, 2, 3, 4], 6)));
    bytes.extend(chunk(b"IEND", &[]));
    let err = PNG::decode(&bytes).unwrap_err();
    assert!(matches!(err, Error::Unsupported(_)));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn round_trip_preserves_pixels() {
    let rows: Vec<Vec<Pixel>> = (0..7u8)
        .map(|y| {
            (0..5u8)
                .map(|x| Pixel::new(x.wrapping_mul(51), y.wrapping_mul(37), x ^ y))
                .collect()
        })
        .collect();
    let original = PNG::new(ImageHeader::rgb8(5, 7), Raster::from_rows(rows).unwrap());

    let once = PNG::decode(&original.encode().unwrap()).unwrap();
    let twice = PNG::decode(&once.encode().unwrap()).unwrap();
    assert_eq!(once.raster(), original.raster());
    assert_eq!(twice.raster(), original.raster());
    assert_eq!(twice.header(), original.header());
}

#[test]
fn encoded_layout() {
    let png = PNG::new(ImageHeader::rgb8(1, 1), Raster::new(1, 1));
    let bytes = png.encode().unwrap();
    let chunk_types: Vec<String> = {
        let mut types = vec![];
        let mut pos = SIGNATURE.len();
        while pos < bytes.len() {
            let length = u32::from_be_bytes(bytes[pos..pos + 4].try_into().unwrap()) as usize;
            types.push(format!(
                "{} {}",
                String::from_utf8_lossy(&bytes[pos + 4..pos + 8]),
                if &bytes[pos + 4..pos + 8] == b"IDAT" {
                    "*".to_owned()
                } else {
                    length.to_string()
                }
            ));
            pos += 12 + length;
        }
        types
    };
    insta::assert_snapshot!(chunk_types.join("\n"), @r###"
    IHDR 13
    IDAT *
    IEND 0
    "###);
}

#[test]
fn save_rgb_isolates_channel() {
    let raster = Raster::from_rows(vec![vec![Pixel::new(200, 100, 50), Pixel::new(9, 8, 7)]]).unwrap();
    let header = ImageHeader::rgb8(2, 1);
    let dir = std::env::temp_dir();

    for (channel, expected) in [
        (Channel::Red, Pixel::new(200, 0, 0)),
        (Channel::Green, Pixel::new(0, 100, 0)),
        (Channel::Blue, Pixel::new(0, 0, 50)),
    ] {
        let path = dir.join(format!(
            "rgb-png-{}-{channel:?}.png",
            std::process::id()
        ));
        rgb_png::save_rgb(&raster, &header, &path, channel).unwrap();
        let saved = PNG::load(&path);
        std::fs::remove_file(&path).unwrap();
        let saved = saved.unwrap();
        assert_eq!(saved.raster().get(0, 0), Some(&expected));
        assert_eq!(saved.raster().get(1, 0), Some(&channel.isolate(Pixel::new(9, 8, 7))));
    }
}

#[test]
fn edit_then_save() {
    let mut png = PNG::new(ImageHeader::rgb8(1, 1), Raster::new(1, 1));
    *png.raster_mut().get_mut(0, 0).unwrap() = Pixel::new(200, 100, 50);
    let path = std::env::temp_dir().join(format!("rgb-png-{}-edit.png", std::process::id()));
    png.save_rgb(&path, Channel::Red).unwrap();
    let saved = PNG::load(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(saved.unwrap().raster().get(0, 0), Some(&Pixel::new(200, 0, 0)));
}
