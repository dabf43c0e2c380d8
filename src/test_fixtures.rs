//! Small images built on the fly for tests.

fn encode(format: image::ImageFormat) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 10, 10]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, format).expect("encode test image");
    out.into_inner()
}

pub(crate) fn tiny_png() -> Vec<u8> {
    encode(image::ImageFormat::Png)
}

pub(crate) fn tiny_jpeg() -> Vec<u8> {
    encode(image::ImageFormat::Jpeg)
}
