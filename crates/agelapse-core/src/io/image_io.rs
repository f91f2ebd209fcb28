use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::error::{PipelineError, Result};
use crate::frame::ImageShape;

/// Shape of a decoded image, channels as stored in the file.
pub fn shape_of(image: &DynamicImage) -> ImageShape {
    ImageShape {
        height: image.height(),
        width: image.width(),
        channels: image.color().channel_count(),
    }
}

/// Shape of an RGBA buffer.
pub fn rgba_shape(image: &RgbaImage) -> ImageShape {
    ImageShape {
        height: image.height(),
        width: image.width(),
        channels: 4,
    }
}

/// Load a raw frame as RGBA together with its on-disk shape.
pub fn load_rgba(path: &Path) -> Result<(RgbaImage, ImageShape)> {
    let img = image::open(path).map_err(|e| PipelineError::LoadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let shape = shape_of(&img);
    if shape.width == 0 || shape.height == 0 {
        return Err(PipelineError::LoadFailed {
            path: path.to_path_buf(),
            reason: "image has no pixels".into(),
        });
    }
    Ok((img.to_rgba8(), shape))
}

/// Drop alpha by compositing onto black, as a video frame.
pub fn flatten_on_black(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let scale = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        image::Rgb([scale(r), scale(g), scale(b)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn flatten_respects_alpha() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([200, 100, 50, 255]));
        img.put_pixel(1, 0, Rgba([200, 100, 50, 0]));
        let flat = flatten_on_black(&img);
        assert_eq!(flat.get_pixel(0, 0).0, [200, 100, 50]);
        assert_eq!(flat.get_pixel(1, 0).0, [0, 0, 0]);
    }
}
