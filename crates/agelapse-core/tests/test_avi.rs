use byteorder::{ByteOrder, LittleEndian};
use image::{Rgba, RgbaImage};
use tempfile::TempDir;

use agelapse_core::io::video::{assemble_video, video_file_name};

#[test]
fn assembles_frames_into_avi() {
    let tmp = TempDir::new().unwrap();
    let mut paths = Vec::new();
    for i in 0..3u8 {
        let path = tmp.path().join(format!("{i}-{i}.png"));
        RgbaImage::from_pixel(6, 4, Rgba([i * 40, 10, 20, 255]))
            .save(&path)
            .unwrap();
        paths.push(path);
    }
    // Different size: resized to the first frame's.
    let odd = tmp.path().join("3-3.png");
    RgbaImage::from_pixel(12, 8, Rgba([1, 2, 3, 255])).save(&odd).unwrap();
    paths.push(odd);
    paths.push(tmp.path().join("missing.png"));

    let out = tmp.path().join(video_file_name("S1"));
    let summary = assemble_video(&paths, &out, 2).unwrap();
    assert_eq!(summary.frames_written, 4);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!((summary.width, summary.height), (6, 4));

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"AVI ");
    assert_eq!(LittleEndian::read_u32(&bytes[4..8]) as usize, bytes.len() - 8);
    assert_eq!(LittleEndian::read_u32(&bytes[48..52]), 4);
    assert_eq!(LittleEndian::read_u32(&bytes[64..68]), 6);
    assert_eq!(LittleEndian::read_u32(&bytes[68..72]), 4);
    assert_eq!(LittleEndian::read_u32(&bytes[132..136]), 2);

    // First pixel of the first frame: bottom row, BGR.
    assert_eq!(&bytes[224..228], b"00db");
    assert_eq!(&bytes[232..235], &[20, 10, 0]);
}

#[test]
fn nothing_readable_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("v.avi");
    assert!(assemble_video(&[tmp.path().join("none.png")], &out, 1).is_err());
    assert!(!out.exists());
}
