use assert_cmd::Command;
use image::{GenericImageView, Rgb, RgbImage};
use predicates::prelude::*;
use predicates::str::contains;
use std::path::Path;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("overlay-grid").unwrap()
}

fn write_page(dir: &Path, name: &str, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
        .save(dir.join(name))
        .unwrap();
}

#[test]
fn test_prints_summary_and_writes_default_output() {
    let dir = TempDir::new().unwrap();
    write_page(dir.path(), "form.png", 500, 300);

    cmd()
        .current_dir(dir.path())
        .args(["form.png", "-c", "10"])
        .assert()
        .success()
        .stdout(contains("Grid: 10 x 6 cells"))
        .stdout(contains("Cell size: 50.0 x 50.0 px"))
        .stdout(contains("Image: 500 x 300 px"))
        .stdout(contains("Saved: form-grid.png"));

    let output = image::open(dir.path().join("form-grid.png")).unwrap();
    assert_eq!(output.dimensions(), (524, 320));
}

#[test]
fn test_summary_is_exactly_four_lines() {
    let dir = TempDir::new().unwrap();
    write_page(dir.path(), "form.png", 100, 100);

    let out = cmd()
        .current_dir(dir.path())
        .args(["form.png", "--cols", "5", "--rows", "2", "--output", "out.png"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(out).unwrap();
    assert_eq!(
        stdout,
        "Grid: 5 x 2 cells\nCell size: 20.0 x 50.0 px\nImage: 100 x 100 px\nSaved: out.png\n"
    );
    assert!(dir.path().join("out.png").exists());
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    write_page(dir.path(), "form.png", 40, 40);

    cmd()
        .current_dir(dir.path())
        .args(["form.png", "-c", "4", "-vv"])
        .assert()
        .success()
        .stdout(contains("Grid: 4 x 4 cells"))
        .stdout(contains("Loading").not())
        .stderr(contains("Loading"));
}

#[test]
fn test_zero_cols_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_page(dir.path(), "form.png", 40, 40);

    cmd()
        .current_dir(dir.path())
        .args(["form.png", "-c", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid argument"));

    assert!(!dir.path().join("form-grid.png").exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .arg("absent.png")
        .assert()
        .failure()
        .stderr(contains("absent.png"));
}

#[test]
fn test_negative_cols_fail_to_parse() {
    cmd().args(["form.png", "-c", "-3"]).assert().failure();
}

#[test]
fn test_help_lists_options() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--cols"))
        .stdout(contains("--rows"))
        .stdout(contains("--output"));
}
