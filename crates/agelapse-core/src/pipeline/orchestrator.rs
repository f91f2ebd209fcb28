use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::align::align_frame;
use crate::erase::{erase_cycles, BackgroundEraser};
use crate::error::{PipelineError, Result};
use crate::frame::{AlignedFrame, CroppedFrame, ErasedFrame, Frame, FrameFailure};
use crate::io::crop::{crop_centered, output_file_name, write_frame};
use crate::io::discover::{discover_samples, folder_name, list_frames, sort_frames};
use crate::io::image_io::{load_rgba, rgba_shape};
use crate::io::timeline::{load_timeline, locate_timeline};
use crate::io::video::{assemble_video, video_file_name};
use crate::unify::{frame_extent, unify, SampleCropSpec};

use super::config::RunConfig;
use super::helpers::map_frames;
use super::report::write_sample_log;
use super::types::{BatchReport, PipelineStage, ProgressReporter, SampleOutcome, SampleRun};

/// Runs samples through erase, align, crop, video and log.
pub struct Pipeline {
    config: RunConfig,
    eraser: Arc<dyn BackgroundEraser>,
}

impl Pipeline {
    pub fn new(config: RunConfig, eraser: Arc<dyn BackgroundEraser>) -> Self {
        Self { config, eraser }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Discover the sample folders under the root and process each one.
    ///
    /// A sample that fails as a whole is recorded and the batch moves on.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<BatchReport> {
        self.config.validate()?;
        let folders = discover_samples(
            &self.config.root,
            self.config.extension(),
            &self.config.output_dir_name,
            &self.config.only_samples,
        )?;
        info!(
            root = %self.config.root.display(),
            samples = folders.len(),
            eraser = self.eraser.name(),
            cycles = self.config.cycles,
            "Starting batch"
        );

        let mut report = BatchReport::default();
        for (i, folder) in folders.iter().enumerate() {
            let name = folder_name(folder);
            reporter.begin_sample(&name, i, folders.len());
            match self.run_sample(folder, reporter) {
                Ok(run) => {
                    reporter.finish_sample(&name, run.is_complete());
                    report.samples.push(SampleOutcome::Completed(run));
                }
                Err(e) => {
                    error!(sample = %name, error = %e, "Sample failed");
                    reporter.finish_sample(&name, false);
                    report.samples.push(SampleOutcome::Failed {
                        name,
                        folder: folder.clone(),
                        error: e,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Process one sample folder.
    ///
    /// Timeline problems fail the sample before anything is written. Frame
    /// level problems are collected in [`SampleRun::failures`].
    pub fn run_sample(&self, folder: &Path, reporter: &dyn ProgressReporter) -> Result<SampleRun> {
        let started = Local::now();
        let t_start = Instant::now();
        let config = &self.config;
        let name = folder_name(folder);

        reporter.begin_stage(PipelineStage::Discover, None);
        let names = list_frames(folder, config.extension())?;
        reporter.finish_stage();
        if names.is_empty() {
            return Err(PipelineError::EmptySequence);
        }

        reporter.begin_stage(PipelineStage::ResolveTimeline, None);
        let timeline_path = locate_timeline(folder, &config.timeline.file_stem)?;
        let timeline = load_timeline(&timeline_path, config.timeline.rounding)?;
        timeline.check_covers(names.len())?;
        reporter.finish_stage();

        reporter.begin_stage(PipelineStage::Sort, None);
        let (names, sort_mode) = sort_frames(names);
        let frames: Vec<Frame> = names
            .iter()
            .enumerate()
            .map(|(index, n)| Frame {
                path: folder.join(n),
                index,
                label: timeline.label(index).unwrap_or_default(),
            })
            .collect();
        reporter.finish_stage();
        info!(
            sample = %name,
            frames = frames.len(),
            order = %sort_mode,
            timeline = %timeline_path.display(),
            "Sample ready"
        );

        let output_dir = folder.join(&config.output_dir_name);
        std::fs::create_dir_all(&output_dir)?;

        let t_processing = Instant::now();
        let mut failures = Vec::new();

        // Load + erase
        reporter.begin_stage(PipelineStage::Erase, Some(frames.len()));
        let erased = map_frames(frames.iter().collect(), config.parallel, reporter, |frame| {
            self.erase_frame(frame, &name)
        });
        reporter.finish_stage();
        let erased = collect_slots(erased, &frames, PipelineStage::Erase, &mut failures);

        reporter.begin_stage(PipelineStage::Align, Some(erased.len()));
        let aligned = map_frames(erased, config.parallel, reporter, |frame| {
            align_frame(frame, &config.alignment, &name)
        });
        reporter.finish_stage();
        let aligned = collect_slots(aligned, &frames, PipelineStage::Align, &mut failures);

        reporter.begin_stage(PipelineStage::UnifyCrop, None);
        let extents: Vec<_> = aligned
            .iter()
            .map(|a| frame_extent(&a.corners, a.center))
            .collect();
        let crop_spec = if extents.is_empty() {
            warn!(sample = %name, "No frame aligned, nothing to crop");
            None
        } else {
            Some(unify(&extents)?)
        };
        reporter.finish_stage();

        let mut cropped = Vec::new();
        if let Some(spec) = crop_spec {
            debug!(
                sample = %name,
                half_width = spec.half_width,
                half_height = spec.half_height,
                "Unified crop"
            );
            reporter.begin_stage(PipelineStage::Crop, Some(aligned.len()));
            let results = map_frames(aligned, config.parallel, reporter, |frame| {
                crop_frame(frame, &frames, &spec, &output_dir)
            });
            reporter.finish_stage();
            cropped = collect_slots(results, &frames, PipelineStage::Crop, &mut failures);
        }
        failures.sort_by_key(|f| f.index);
        let processing_time = t_processing.elapsed();

        let mut video = None;
        let mut video_error = None;
        if config.film && !cropped.is_empty() {
            reporter.begin_stage(PipelineStage::Assemble, Some(cropped.len()));
            let paths: Vec<PathBuf> = cropped.iter().map(|c| c.path.clone()).collect();
            let video_path = output_dir.join(video_file_name(&name));
            match assemble_video(&paths, &video_path, config.frame_rate) {
                Ok(summary) => {
                    info!(sample = %name, path = %summary.path.display(), frames = summary.frames_written, "Video written");
                    video = Some(summary);
                }
                Err(e) => {
                    warn!(sample = %name, error = %e, "Video assembly failed");
                    video_error = Some(e.to_string());
                }
            }
            reporter.finish_stage();
        }

        let mut run = SampleRun {
            name,
            folder: folder.to_path_buf(),
            output_dir,
            timeline: timeline_path,
            sort_mode,
            eraser: self.eraser.name().to_string(),
            label_width: timeline.max_label_width(frames.len()),
            frames,
            crop_spec,
            cropped,
            failures,
            video,
            video_error,
            started,
            processing_time,
            total_time: t_start.elapsed(),
            log_path: None,
        };

        reporter.begin_stage(PipelineStage::Log, None);
        run.log_path = Some(write_sample_log(&run, config)?);
        reporter.finish_stage();
        reporter.begin_stage(PipelineStage::Done, None);
        reporter.finish_stage();

        info!(
            sample = %run.name,
            written = run.cropped.len(),
            failed = run.failures.len(),
            seconds = run.total_time.as_secs_f64(),
            "Sample finished"
        );
        Ok(run)
    }

    fn erase_frame(&self, frame: &Frame, sample: &str) -> Result<ErasedFrame> {
        let (image, source_shape) = load_rgba(&frame.path)?;
        let image = erase_cycles(
            self.eraser.as_ref(),
            image,
            self.config.cycles,
            sample,
            frame.index,
        )?;
        Ok(ErasedFrame {
            index: frame.index,
            image,
            source_shape,
        })
    }
}

/// Stage results that can tell which frame they belong to.
trait FrameSlot {
    fn frame_index(&self) -> usize;
}

impl FrameSlot for ErasedFrame {
    fn frame_index(&self) -> usize {
        self.index
    }
}

impl FrameSlot for AlignedFrame {
    fn frame_index(&self) -> usize {
        self.index
    }
}

impl FrameSlot for CroppedFrame {
    fn frame_index(&self) -> usize {
        self.index
    }
}

/// Split per-frame results into survivors and failure records.
///
/// Slot `k` of `results` belongs to the `k`-th surviving frame of the previous
/// stage, so failures are attributed by walking survivors in the same order.
fn collect_slots<T: FrameSlot>(
    results: Vec<Result<T>>,
    frames: &[Frame],
    stage: PipelineStage,
    failures: &mut Vec<FrameFailure>,
) -> Vec<T> {
    let failed_before: std::collections::BTreeSet<usize> =
        failures.iter().map(|f| f.index).collect();
    let mut pending = frames
        .iter()
        .filter(|f| !failed_before.contains(&f.index));

    let mut survivors = Vec::with_capacity(results.len());
    for result in results {
        let Some(frame) = pending.next() else {
            break;
        };
        match result {
            Ok(item) => {
                debug_assert_eq!(item.frame_index(), frame.index);
                survivors.push(item);
            }
            Err(e) => {
                let stage = match e {
                    PipelineError::LoadFailed { .. } => PipelineStage::Load,
                    _ => stage,
                };
                warn!(frame = %frame.file_name(), index = frame.index, %stage, error = %e, "Frame dropped");
                failures.push(FrameFailure {
                    index: frame.index,
                    file_name: frame.file_name(),
                    stage,
                    reason: e.to_string(),
                });
            }
        }
    }
    survivors
}

fn crop_frame(
    frame: AlignedFrame,
    frames: &[Frame],
    spec: &SampleCropSpec,
    output_dir: &Path,
) -> Result<CroppedFrame> {
    let label = frames[frame.index].label;
    let image = crop_centered(&frame.image, frame.center, spec)?;
    let path = output_dir.join(output_file_name(frame.index, label));
    write_frame(&image, &path)?;
    Ok(CroppedFrame {
        index: frame.index,
        label,
        path,
        shape: rgba_shape(&image),
        source_shape: frame.source_shape,
    })
}
