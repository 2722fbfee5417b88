use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

use png_rewrite::{transform, Codec, Pixel, PixelBuffer, PngCodec};

fn process_image(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_process-image"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to spawn process-image")
}

fn write_two_pixel_png(path: &Path) {
    let image = PixelBuffer::from_raw(2, 1, vec![10, 20, 30, 40, 200, 150, 100, 255]).unwrap();
    PngCodec.encode(path, &image).unwrap();
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn red_channel_is_set_to_one() {
    let dir = tempfile::tempdir().unwrap();
    write_two_pixel_png(&dir.path().join("in.png"));

    let output = process_image(dir.path(), &["in.png", "out.png"]);
    assert!(output.status.success(), "{output:?}");

    let result = PngCodec.decode(&dir.path().join("out.png")).unwrap();
    assert_eq!(result.dimensions(), (2, 1));
    assert_eq!(result.get(0, 0).unwrap(), Pixel::new(1, 20, 30, 40));
    assert_eq!(result.get(0, 1).unwrap(), Pixel::new(1, 150, 100, 255));
}

#[test]
fn verbose_run_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    write_two_pixel_png(&dir.path().join("in.png"));

    let output = process_image(dir.path(), &["-v", "in.png", "out.png"]);
    assert!(output.status.success(), "{output:?}");
    assert!(dir.path().join("out.png").is_file());
}

#[test]
fn wrong_argument_count_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let cases: [&[&str]; 3] = [&[], &["in.png"], &["in.png", "out.png", "extra.png"]];
    for args in cases {
        let output = process_image(dir.path(), args);
        assert_eq!(output.status.code(), Some(2), "{args:?}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("usage:"), "{stderr}");
    }
    assert!(dir_entries(dir.path()).is_empty());
}

#[test]
fn missing_input_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();

    let output = process_image(dir.path(), &["missing.png", "out.png"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn malformed_input_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.png"), b"\x89PNG\r\n\x1a\nnot really").unwrap();

    let output = process_image(dir.path(), &["in.png", "out.png"]);
    assert_eq!(output.status.code(), Some(4));
    assert_eq!(dir_entries(dir.path()), ["in.png"]);
}

#[test]
fn unwritable_output_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    write_two_pixel_png(&dir.path().join("in.png"));

    let output = process_image(dir.path(), &["in.png", "nowhere/out.png"]);
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(dir_entries(dir.path()), ["in.png"]);
}

#[test]
fn library_pipeline_matches_binary() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("in.png");
    write_two_pixel_png(&input_path);

    let codec = PngCodec;
    let processed = transform::process(&codec.decode(&input_path).unwrap()).unwrap();

    let output = process_image(dir.path(), &["in.png", "out.png"]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(codec.decode(&dir.path().join("out.png")).unwrap(), processed);
}

#[test]
fn visual_bench_processes_a_suite() {
    let suite = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_two_pixel_png(&suite.path().join("basn6a08.png"));
    fs::write(suite.path().join("xcrn0g04.png"), b"corrupt").unwrap();
    fs::write(suite.path().join("broken.png"), b"also corrupt").unwrap();
    fs::write(suite.path().join("notes.txt"), b"ignored").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_visual-bench"))
        .arg(suite.path())
        .arg(out.path())
        .output()
        .expect("failed to spawn visual-bench");
    assert!(output.status.success(), "{output:?}");

    let processed = PngCodec.decode(&out.path().join("basn6a08-rgba.png")).unwrap();
    assert_eq!(processed.get(0, 1).unwrap(), Pixel::new(1, 150, 100, 255));
    assert!(out.path().join("basn6a08-orig.png").is_file());

    let results: serde_json::Value =
        serde_json::from_slice(&fs::read(out.path().join("test_results.json")).unwrap()).unwrap();
    assert_eq!(results["processed_images"], serde_json::json!(["basn6a08"]));
    assert!(results["failed_images"]["broken"].is_string());
    assert!(results["failed_images"].get("xcrn0g04").is_none());
    assert!(results["date"].is_string());
}

#[cfg(unix)]
#[test]
fn non_utf8_input_path_is_accepted() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let dir = tempfile::tempdir().unwrap();
    let input = OsStr::from_bytes(b"in\xff.png");
    write_two_pixel_png(&dir.path().join(input));

    let output = Command::new(env!("CARGO_BIN_EXE_process-image"))
        .current_dir(dir.path())
        .arg(input)
        .arg("out.png")
        .output()
        .expect("failed to spawn process-image");
    assert!(output.status.success(), "{output:?}");

    let result = PngCodec.decode(&dir.path().join("out.png")).unwrap();
    assert_eq!(result.get(0, 0).unwrap(), Pixel::new(1, 20, 30, 40));
}
