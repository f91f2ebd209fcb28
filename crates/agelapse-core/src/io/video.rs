use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use tracing::{debug, warn};

use crate::consts::{VIDEO_EXTENSION, VIDEO_NAME_PREFIX};
use crate::error::{PipelineError, Result};
use crate::io::avi_writer::AviWriter;
use crate::io::image_io::{flatten_on_black, load_rgba};

/// What ended up in an assembled video.
#[derive(Clone, Debug)]
pub struct VideoSummary {
    pub path: PathBuf,
    pub frames_written: u32,
    /// Frames that could not be read back.
    pub skipped: Vec<PathBuf>,
    pub width: u32,
    pub height: u32,
}

/// `Ageing <sample>.avi`
pub fn video_file_name(sample: &str) -> String {
    format!("{VIDEO_NAME_PREFIX} {sample}.{VIDEO_EXTENSION}")
}

/// Assemble the processed frames, in the given order, into an uncompressed AVI.
///
/// The video takes the size of the first readable frame. Later frames of a
/// different size are resized to it; unreadable ones are skipped.
pub fn assemble_video(frames: &[PathBuf], output: &Path, frame_rate: u32) -> Result<VideoSummary> {
    let mut skipped = Vec::new();
    let mut writer = None;
    let mut size = (0, 0);

    for path in frames {
        let image = match load_rgba(path) {
            Ok((image, _)) => flatten_on_black(&image),
            Err(e) => {
                warn!(frame = %path.display(), error = %e, "Skipping unreadable frame");
                skipped.push(path.clone());
                continue;
            }
        };

        if writer.is_none() {
            size = image.dimensions();
            debug!(path = %output.display(), width = size.0, height = size.1, frame_rate, "Creating video");
            writer = Some(AviWriter::create(output, size.0, size.1, frame_rate)?);
        }

        let image = if image.dimensions() == size {
            image
        } else {
            imageops::resize(&image, size.0, size.1, FilterType::Triangle)
        };
        if let Some(avi) = writer.as_mut() {
            avi.write_frame(&image)?;
        }
    }

    let avi = writer.ok_or(PipelineError::EmptySequence)?;
    let frames_written = avi.frames_written();
    avi.finalize()?;

    Ok(VideoSummary {
        path: output.to_path_buf(),
        frames_written,
        skipped,
        width: size.0,
        height: size.1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_name() {
        assert_eq!(video_file_name("S1"), "Ageing S1.avi");
    }
}
