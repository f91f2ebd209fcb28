use image::RgbaImage;

use crate::error::{PipelineError, Result};

use super::BackgroundEraser;

/// Apply the eraser `cycles` times, feeding each result into the next pass.
///
/// An empty result at any cycle fails this frame with a named error instead of
/// handing an empty image to the aligner.
pub fn erase_cycles(
    eraser: &dyn BackgroundEraser,
    image: RgbaImage,
    cycles: usize,
    sample: &str,
    index: usize,
) -> Result<RgbaImage> {
    (1..=cycles).try_fold(image, |current, cycle| match eraser.erase(&current)? {
        Some(img) if img.width() > 0 && img.height() > 0 => Ok(img),
        _ => Err(PipelineError::EraserEmpty {
            sample: sample.to_string(),
            index,
            cycle,
        }),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use image::Rgba;

    use super::*;

    /// Darkens the top-left pixel by one step per call; fails after `limit` calls.
    struct Counting {
        calls: AtomicUsize,
        limit: usize,
    }

    impl BackgroundEraser for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn erase(&self, image: &RgbaImage) -> Result<Option<RgbaImage>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n > self.limit {
                return Ok(None);
            }
            let mut out = image.clone();
            let px = out.get_pixel_mut(0, 0);
            px.0[0] = px.0[0].saturating_sub(1);
            Ok(Some(out))
        }
    }

    #[test]
    fn each_cycle_feeds_the_previous_result() {
        let eraser = Counting {
            calls: AtomicUsize::new(0),
            limit: usize::MAX,
        };
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 0, 0, 255]));
        let out = erase_cycles(&eraser, img, 4, "s", 0).unwrap();
        assert_eq!(out.get_pixel(0, 0).0[0], 6);
        assert_eq!(eraser.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn empty_result_names_frame_and_cycle() {
        let eraser = Counting {
            calls: AtomicUsize::new(0),
            limit: 1,
        };
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 0, 0, 255]));
        let err = erase_cycles(&eraser, img, 3, "R3_0", 7).unwrap_err();
        match err {
            PipelineError::EraserEmpty {
                sample,
                index,
                cycle,
            } => {
                assert_eq!(sample, "R3_0");
                assert_eq!(index, 7);
                assert_eq!(cycle, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
