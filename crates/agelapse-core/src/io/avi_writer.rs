use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use image::RgbImage;

use crate::error::{PipelineError, Result};

const AVIF_HASINDEX: u32 = 0x10;
const AVIIF_KEYFRAME: u32 = 0x10;
const FRAME_CHUNK_ID: &[u8; 4] = b"00db";

// Fixed header layout: one uncompressed video stream.
const RIFF_SIZE_OFFSET: u64 = 4;
const TOTAL_FRAMES_OFFSET: u64 = 48;
const STREAM_LENGTH_OFFSET: u64 = 140;
const MOVI_SIZE_OFFSET: u64 = 216;
/// Position of the `movi` fourcc; index offsets are relative to it.
const MOVI_FOURCC_OFFSET: u64 = 220;
pub const AVI_HEADER_SIZE: u64 = 224;

struct IndexEntry {
    offset: u32,
    size: u32,
}

/// Writes an uncompressed (24-bit DIB) AVI at the raw byte level.
///
/// The header is written with placeholder counts and patched by
/// [`AviWriter::finalize`].
pub struct AviWriter<W: Write + Seek> {
    writer: W,
    width: u32,
    height: u32,
    index: Vec<IndexEntry>,
    position: u64,
}

impl AviWriter<BufWriter<File>> {
    pub fn create(path: &Path, width: u32, height: u32, frame_rate: u32) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), width, height, frame_rate)
    }
}

impl<W: Write + Seek> AviWriter<W> {
    pub fn new(mut writer: W, width: u32, height: u32, frame_rate: u32) -> Result<Self> {
        if width == 0 || height == 0 || width > i16::MAX as u32 || height > i16::MAX as u32 {
            return Err(PipelineError::Video(format!(
                "unsupported frame size {width}x{height}"
            )));
        }
        if frame_rate == 0 {
            return Err(PipelineError::Video("frame rate must be positive".into()));
        }
        write_header(&mut writer, width, height, frame_rate)?;
        Ok(Self {
            writer,
            width,
            height,
            index: Vec::new(),
            position: AVI_HEADER_SIZE,
        })
    }

    pub fn frames_written(&self) -> u32 {
        self.index.len() as u32
    }

    /// Append one frame; it must match the stream's dimensions.
    pub fn write_frame(&mut self, frame: &RgbImage) -> Result<()> {
        if frame.dimensions() != (self.width, self.height) {
            return Err(PipelineError::Video(format!(
                "frame is {}x{}, stream is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }
        let data = dib_bytes(frame);
        let size = data.len() as u64;
        // RIFF size once this chunk and its idx1 entry are in.
        let riff_after = self.position + 8 + size + (self.index.len() as u64 + 1) * 16;
        if riff_after > u32::MAX as u64 {
            return Err(PipelineError::Video(format!(
                "frame {} would take the AVI past the 4 GiB RIFF limit",
                self.index.len() + 1
            )));
        }
        let size = to_u32(size, "frame size")?;

        self.writer.write_all(FRAME_CHUNK_ID)?;
        self.writer.write_u32::<LittleEndian>(size)?;
        self.writer.write_all(&data)?;

        self.index.push(IndexEntry {
            offset: to_u32(self.position - MOVI_FOURCC_OFFSET, "chunk offset")?,
            size,
        });
        self.position += 8 + size as u64;
        Ok(())
    }

    /// Write the index, patch the sizes and counts, and hand back the sink.
    pub fn finalize(mut self) -> Result<W> {
        let movi_size = to_u32(self.position - MOVI_FOURCC_OFFSET, "movi size")?;
        let frames = to_u32(self.index.len() as u64, "frame count")?;
        let index_size = to_u32(self.index.len() as u64 * 16, "idx1 size")?;
        let end = self.position + 8 + u64::from(index_size);
        let riff_size = to_u32(end - 8, "RIFF size")?;

        self.writer.write_all(b"idx1")?;
        self.writer.write_u32::<LittleEndian>(index_size)?;
        for entry in &self.index {
            self.writer.write_all(FRAME_CHUNK_ID)?;
            self.writer.write_u32::<LittleEndian>(AVIIF_KEYFRAME)?;
            self.writer.write_u32::<LittleEndian>(entry.offset)?;
            self.writer.write_u32::<LittleEndian>(entry.size)?;
        }

        patch_u32(&mut self.writer, RIFF_SIZE_OFFSET, riff_size)?;
        patch_u32(&mut self.writer, TOTAL_FRAMES_OFFSET, frames)?;
        patch_u32(&mut self.writer, STREAM_LENGTH_OFFSET, frames)?;
        patch_u32(&mut self.writer, MOVI_SIZE_OFFSET, movi_size)?;
        self.writer.seek(SeekFrom::End(0))?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn to_u32(value: u64, what: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| PipelineError::Video(format!("{what} {value} exceeds the AVI 32-bit limit")))
}

fn patch_u32(w: &mut (impl Write + Seek), offset: u64, value: u32) -> Result<()> {
    w.seek(SeekFrom::Start(offset))?;
    w.write_u32::<LittleEndian>(value)?;
    Ok(())
}

/// Bytes per DIB row, padded to four.
fn row_stride(width: u32) -> usize {
    (width as usize * 3).div_ceil(4) * 4
}

/// Bottom-up BGR rows.
fn dib_bytes(frame: &RgbImage) -> Vec<u8> {
    let stride = row_stride(frame.width());
    let mut out = vec![0u8; stride * frame.height() as usize];
    for (row_out, y) in (0..frame.height()).rev().enumerate() {
        let row = &mut out[row_out * stride..];
        for x in 0..frame.width() {
            let [r, g, b] = frame.get_pixel(x, y).0;
            let i = x as usize * 3;
            row[i] = b;
            row[i + 1] = g;
            row[i + 2] = r;
        }
    }
    out
}

fn write_header(w: &mut impl Write, width: u32, height: u32, frame_rate: u32) -> Result<()> {
    let frame_bytes = (row_stride(width) * height as usize) as u32;

    w.write_all(b"RIFF")?;
    w.write_u32::<LittleEndian>(0)?; // patched
    w.write_all(b"AVI ")?;

    w.write_all(b"LIST")?;
    w.write_u32::<LittleEndian>(192)?;
    w.write_all(b"hdrl")?;

    // MainAVIHeader
    w.write_all(b"avih")?;
    w.write_u32::<LittleEndian>(56)?;
    w.write_u32::<LittleEndian>(1_000_000 / frame_rate)?;
    w.write_u32::<LittleEndian>(frame_bytes.saturating_mul(frame_rate))?;
    w.write_u32::<LittleEndian>(0)?;
    w.write_u32::<LittleEndian>(AVIF_HASINDEX)?;
    w.write_u32::<LittleEndian>(0)?; // total frames, patched
    w.write_u32::<LittleEndian>(0)?;
    w.write_u32::<LittleEndian>(1)?;
    w.write_u32::<LittleEndian>(frame_bytes + 8)?;
    w.write_u32::<LittleEndian>(width)?;
    w.write_u32::<LittleEndian>(height)?;
    for _ in 0..4 {
        w.write_u32::<LittleEndian>(0)?;
    }

    w.write_all(b"LIST")?;
    w.write_u32::<LittleEndian>(116)?;
    w.write_all(b"strl")?;

    // AVIStreamHeader
    w.write_all(b"strh")?;
    w.write_u32::<LittleEndian>(56)?;
    w.write_all(b"vids")?;
    w.write_all(b"DIB ")?;
    w.write_u32::<LittleEndian>(0)?;
    w.write_u16::<LittleEndian>(0)?;
    w.write_u16::<LittleEndian>(0)?;
    w.write_u32::<LittleEndian>(0)?;
    w.write_u32::<LittleEndian>(1)?; // scale
    w.write_u32::<LittleEndian>(frame_rate)?;
    w.write_u32::<LittleEndian>(0)?;
    w.write_u32::<LittleEndian>(0)?; // length, patched
    w.write_u32::<LittleEndian>(frame_bytes + 8)?;
    w.write_u32::<LittleEndian>(u32::MAX)?;
    w.write_u32::<LittleEndian>(0)?;
    w.write_i16::<LittleEndian>(0)?;
    w.write_i16::<LittleEndian>(0)?;
    w.write_i16::<LittleEndian>(width as i16)?;
    w.write_i16::<LittleEndian>(height as i16)?;

    // BITMAPINFOHEADER
    w.write_all(b"strf")?;
    w.write_u32::<LittleEndian>(40)?;
    w.write_u32::<LittleEndian>(40)?;
    w.write_i32::<LittleEndian>(width as i32)?;
    w.write_i32::<LittleEndian>(height as i32)?;
    w.write_u16::<LittleEndian>(1)?;
    w.write_u16::<LittleEndian>(24)?;
    w.write_u32::<LittleEndian>(0)?;
    w.write_u32::<LittleEndian>(frame_bytes)?;
    for _ in 0..4 {
        w.write_u32::<LittleEndian>(0)?;
    }

    w.write_all(b"LIST")?;
    w.write_u32::<LittleEndian>(0)?; // patched
    w.write_all(b"movi")?;
    Ok(())
}
