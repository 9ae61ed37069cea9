use crate::error;
use crate::util::Result;
use base64::Engine;
use image::{ImageFormat, Rgba, RgbaImage};
use snafu::ResultExt;
use std::io::Cursor;

/// Edge length of generated icons in pixels
pub const ICON_SIZE: u32 = 64;

/// Java's `String#hashCode` over UTF-16 code units
pub fn string_hash(name: &str) -> i32 {
    name.encode_utf16().fold(0_i32, |hash, code_unit| {
        i32::from(code_unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    })
}

/// The icon color of `name` as `#RRGGBB`
///
/// # Examples
///
/// ```
/// use wave_operators::util::icons::icon_color;
///
/// assert_eq!(icon_color("a"), "#000061");
/// assert_eq!(icon_color("Histogram"), "#462144");
/// ```
pub fn icon_color(name: &str) -> String {
    format!("#{:06X}", string_hash(name) & 0x00FF_FFFF)
}

/// Renders a solid square in the hash color of `name` and returns it as a PNG data URI
pub fn create_icon_data_url(name: &str) -> Result<String> {
    let [_, r, g, b] = (string_hash(name) & 0x00FF_FFFF).to_be_bytes();

    let image = RgbaImage::from_pixel(ICON_SIZE, ICON_SIZE, Rgba([r, g, b, 255]));

    let mut png_bytes: Vec<u8> = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .context(error::IconEncoding)?;

    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png_bytes)
    ))
}
