use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::Result;
use crate::frame::{CroppedFrame, FrameFailure};
use crate::io::video::video_file_name;

use super::config::RunConfig;
use super::types::SampleRun;

/// `Log <sample> <YYYY-MM-DD HH.MM.SS>.txt`
pub fn log_file_name(sample: &str, started: &DateTime<Local>) -> String {
    format!("Log {sample} {}.txt", started.format("%Y-%m-%d %H.%M.%S"))
}

/// Human-readable processing log of one sample.
pub fn render_sample_log(run: &SampleRun, config: &RunConfig) -> String {
    SampleLog { run, config }.to_string()
}

struct SampleLog<'a> {
    run: &'a SampleRun,
    config: &'a RunConfig,
}

impl fmt::Display for SampleLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { run, config } = *self;
        writeln!(f, "Processing log for sample {}", run.name)?;
        writeln!(f, "Date: {}", run.started.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Source folder: {}", run.folder.display())?;
        writeln!(f, "Timeline: {}", run.timeline.display())?;
        writeln!(f, "Frame order: {}", run.sort_mode)?;
        writeln!(f, "Initial images: {}", run.frames.len())?;
        writeln!(f, "Processed images: {}", run.cropped.len())?;
        writeln!(f)?;

        let name_width = run
            .frames
            .iter()
            .map(|frame| frame.file_name().chars().count())
            .max()
            .unwrap_or(0);
        let index_width = run.frames.len().to_string().len();

        let mut cropped = run.cropped.iter().peekable();
        let mut failed = run.failures.iter().peekable();
        for frame in &run.frames {
            let name = frame.file_name();
            let prefix = format!("{:>index_width$}. {name:<name_width$}", frame.index + 1);
            let done: Option<&CroppedFrame> = cropped.next_if(|c| c.index == frame.index);
            let fail: Option<&FrameFailure> = failed.next_if(|x| x.index == frame.index);
            match (done, fail) {
                (Some(c), _) => {
                    let label = format!("{}-{:>w$}.png", c.index, c.label, w = run.label_width);
                    writeln!(f, "{prefix} {}\t{label} {}", c.source_shape, c.shape)?;
                }
                _ => {
                    writeln!(f, "{prefix}\tEmpty image")?;
                }
            }
        }
        writeln!(f)?;

        writeln!(f, "Errors:")?;
        if run.failures.is_empty() && run.video_error.is_none() {
            writeln!(f, "  none")?;
        }
        for failure in &run.failures {
            writeln!(
                f,
                "  {}. {} [{}]: {}",
                failure.index + 1,
                failure.file_name,
                failure.stage,
                failure.reason
            )?;
        }
        if run.cropped.is_empty() {
            writeln!(f, "  no frame could be processed")?;
        }
        if let Some(e) = &run.video_error {
            writeln!(f, "  video: {e}")?;
        }
        writeln!(f)?;

        writeln!(f, "Parameters:")?;
        writeln!(f, "  Background erasure cycles: {}", config.cycles)?;
        writeln!(f, "  Eraser: {}", run.eraser)?;
        writeln!(
            f,
            "  Minimum contour area: {}",
            config.alignment.min_contour_area
        )?;
        writeln!(
            f,
            "  Film produced: {}",
            if run.video.is_some() { "yes" } else { "no" }
        )?;
        match &run.video {
            Some(v) => {
                writeln!(f, "  Video name: {}", video_file_name(&run.name))?;
                writeln!(f, "  Frame rate: {} fps", config.frame_rate)?;
                writeln!(f, "  Frame size: {}x{}", v.width, v.height)?;
                if !v.skipped.is_empty() {
                    writeln!(f, "  Frames skipped in video: {}", v.skipped.len())?;
                }
            }
            None => {
                writeln!(f, "  Video name: -")?;
            }
        }
        if let Some(spec) = &run.crop_spec {
            writeln!(
                f,
                "  Crop half-extents: {:.1} x {:.1}",
                spec.half_width, spec.half_height
            )?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Processing time: {:.2} s",
            run.processing_time.as_secs_f64()
        )?;
        writeln!(f, "Total time: {:.2} s", run.total_time.as_secs_f64())
    }
}

/// Write the log into the sample's output folder.
pub fn write_sample_log(run: &SampleRun, config: &RunConfig) -> Result<PathBuf> {
    let path = run
        .output_dir
        .join(log_file_name(&run.name, &run.started));
    std::fs::write(&path, render_sample_log(run, config))?;
    debug!(path = %path.display(), "Log written");
    Ok(path)
}
