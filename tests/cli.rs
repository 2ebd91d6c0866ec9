//! Drives the `simple-scale` binary.

use image::{ImageFormat, RgbImage};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn simple_scale(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_simple-scale"))
        .args(args)
        .output()
        .expect("failed to run simple-scale")
}

fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save_with_format(path, ImageFormat::Jpeg).unwrap();
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn converts_directory() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("photos");
    fs::create_dir_all(&input).unwrap();
    write_jpeg(&input.join("dawn.jpg"), 1200, 800);
    fs::write(input.join("notes.txt"), "skip me").unwrap();
    let output = tmp.path().join("web");

    let result = simple_scale(&[
        arg(&input),
        "-o",
        arg(&output),
        "-t",
        "png",
        "-q",
        "90",
        "-w",
        "600",
        "-h",
        "300",
    ]);

    assert!(result.status.success(), "{result:?}");
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("Scaled: 1200x800 → 600x400"), "{stdout}");
    assert!(stdout.contains("Cropped: 600x400 → 600x300"), "{stdout}");
    assert!(stdout.contains("Done: 1 processed, 0 failed"), "{stdout}");

    let img = image::open(output.join("dawn.png")).unwrap();
    assert_eq!((img.width(), img.height()), (600, 300));
    assert!(!output.join("notes.png").exists());
}

#[test]
fn single_file_to_explicit_output_path() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("dawn.jpg");
    write_jpeg(&input, 300, 200);
    let output = tmp.path().join("out/small.jpg");

    let result = simple_scale(&[arg(&input), "--output", arg(&output), "--width", "150"]);

    assert!(result.status.success(), "{result:?}");
    let img = image::open(&output).unwrap();
    assert_eq!((img.width(), img.height()), (150, 100));
}

#[test]
fn failed_file_exits_with_one() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("broken.jpg"), "not a jpeg").unwrap();
    write_jpeg(&input.join("good.jpg"), 20, 20);
    let output = tmp.path().join("out");

    let result = simple_scale(&[arg(&input), "-o", arg(&output)]);

    assert_eq!(result.status.code(), Some(1));
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("Error: Failed to decode input image"), "{stdout}");
    assert!(output.join("good.jpg").exists());
    assert!(!output.join("broken.jpg").exists());
}

#[test]
fn missing_input_exits_with_two() {
    let tmp = TempDir::new().unwrap();
    let result = simple_scale(&[arg(&tmp.path().join("missing")), "-o", arg(tmp.path())]);

    assert_eq!(result.status.code(), Some(2));
    assert!(String::from_utf8(result.stderr).unwrap().contains("Input not found"));
}

#[test]
fn empty_directory_succeeds() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("empty");
    fs::create_dir_all(&input).unwrap();

    let result = simple_scale(&[arg(&input), "-o", arg(&tmp.path().join("out"))]);

    assert!(result.status.success());
    assert!(String::from_utf8(result.stdout).unwrap().contains("No images found"));
}

#[test]
fn quality_out_of_range_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let result = simple_scale(&[arg(tmp.path()), "-o", arg(tmp.path()), "-q", "0"]);
    assert!(!result.status.success());
}

#[test]
fn print_config_outputs_stock_toml() {
    let result = simple_scale(&["--print-config"]);
    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("[output]"));
    assert!(stdout.contains("[scale]"));
}

#[test]
fn help_is_long_form_only() {
    let result = simple_scale(&["--help"]);
    assert!(result.status.success());
    assert!(String::from_utf8(result.stdout).unwrap().contains("--height"));
}
