use image::RgbaImage;

/// Per-channel median colour of the opaque pixels inside a border strip of
/// `strip` pixels. Returns `None` when the strip has no opaque pixel, which is
/// the case once a previous pass has already cleared the background.
pub fn border_median_color(image: &RgbaImage, strip: usize) -> Option<[u8; 3]> {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let strip = strip.min(h / 2).min(w / 2).max(1);
    if w == 0 || h == 0 {
        return None;
    }

    let mut channels: [Vec<u8>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for (col, row, px) in image.enumerate_pixels() {
        let (row, col) = (row as usize, col as usize);
        let in_strip = row < strip || row >= h - strip || col < strip || col >= w - strip;
        if !in_strip || px.0[3] == 0 {
            continue;
        }
        for (c, values) in channels.iter_mut().enumerate() {
            values.push(px.0[c]);
        }
    }

    if channels[0].is_empty() {
        return None;
    }

    let mut median = [0u8; 3];
    for (c, values) in channels.iter_mut().enumerate() {
        values.sort_unstable();
        median[c] = values[values.len() / 2];
    }
    Some(median)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn median_ignores_center_and_transparent_pixels() {
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([250, 240, 230, 255]));
        for y in 8..12 {
            for x in 8..12 {
                img.put_pixel(x, y, Rgba([10, 10, 10, 255]));
            }
        }
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        assert_eq!(border_median_color(&img, 2), Some([250, 240, 230]));
    }

    #[test]
    fn fully_transparent_border_has_no_color() {
        let img = RgbaImage::new(10, 10);
        assert_eq!(border_median_color(&img, 2), None);
    }
}
