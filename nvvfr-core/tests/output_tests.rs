//! Integration tests for output filename bookkeeping

use nvvfr_core::output::{highest_counter, next_output_path};
use std::fs;
use tempfile::TempDir;

fn touch(dir: &TempDir, name: &str) {
    fs::write(dir.path().join(name), b"").unwrap();
}

#[test]
fn test_first_output_in_empty_dir() {
    let dir = TempDir::new().unwrap();
    let path = next_output_path(dir.path(), "clip").unwrap();
    assert_eq!(path, dir.path().join("clip_00001.mp4"));
}

#[test]
fn test_counter_increments_past_highest() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "clip_00001.mp4");
    touch(&dir, "clip_00004.mp4");
    touch(&dir, "clip_00002.mp4");

    let path = next_output_path(dir.path(), "clip").unwrap();
    assert_eq!(path, dir.path().join("clip_00005.mp4"));
}

#[test]
fn test_non_matching_files_ignored() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "clip_00003.mp4");
    touch(&dir, "other_00099.mp4");
    touch(&dir, "clip-00050.mp4");
    touch(&dir, "clip_00042"); // no extension
    touch(&dir, "readme.txt");

    assert_eq!(highest_counter(dir.path(), "clip").unwrap(), 3);
}

#[test]
fn test_matching_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "CLIP_00006.MP4");

    let path = next_output_path(dir.path(), "clip").unwrap();
    assert_eq!(path, dir.path().join("clip_00007.mp4"));
}

#[test]
fn test_suffixed_names_reserve_their_number() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "clip_00010_preview.mkv");

    let path = next_output_path(dir.path(), "clip").unwrap();
    assert_eq!(path, dir.path().join("clip_00011.mp4"));
}

#[test]
fn test_unpadded_counters_count_too() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "clip_7.mp4");

    assert_eq!(highest_counter(dir.path(), "clip").unwrap(), 7);
}

#[test]
fn test_missing_dir_is_created() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("renders");

    let path = next_output_path(&nested, "clip").unwrap();
    assert!(nested.is_dir());
    assert_eq!(path, nested.join("clip_00001.mp4"));
}
