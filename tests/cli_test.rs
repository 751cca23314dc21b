//! Command line: convert, palette and init run the built binary.

mod common;

use common::fixtures;
use pretty_assertions::assert_eq;
use std::process::Command;

fn brickify() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_brickify"));
    cmd.env_remove("CONFIG_FILE").env_remove("BACKEND_URL");
    cmd
}

#[test]
fn test_convert_writes_preview_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    let output = dir.path().join("out.png");
    let csv = dir.path().join("parts.csv");
    std::fs::write(&input, fixtures::red_black_png()).unwrap();

    let result = brickify()
        .arg("convert")
        .arg(&input)
        .args(["--width", "2", "--cell-size", "4", "--part", "3070b"])
        .arg("--output")
        .arg(&output)
        .arg("--csv")
        .arg(&csv)
        .output()
        .unwrap();
    assert!(
        result.status.success(),
        "{}",
        String::from_utf8_lossy(&result.stderr)
    );

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("2x1 mosaic (2 bricks)"), "{stdout}");
    assert!(stdout.contains("Rood"), "{stdout}");

    let preview = image::open(&output).unwrap();
    assert_eq!((preview.width(), preview.height()), (8, 4));

    assert_eq!(
        std::fs::read_to_string(&csv).unwrap(),
        "color_name,color_hex,catalog_color_id,part_id,qty\n\
         Rood,#C91A09,5,3070b,1\n\
         Zwart,#000000,11,3070b,1\n"
    );
}

#[test]
fn test_convert_rejects_bad_width() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    std::fs::write(&input, fixtures::red_black_png()).unwrap();

    let result = brickify()
        .current_dir(dir.path())
        .arg("convert")
        .arg(&input)
        .args(["--width", "2.5"])
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(!dir.path().join("preview.png").exists());
}

#[test]
fn test_convert_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    let result = brickify()
        .arg("convert")
        .arg(dir.path().join("nope.png"))
        .output()
        .unwrap();
    assert!(!result.status.success());
}

#[test]
fn test_palette_lists_builtin_colors() {
    let result = brickify().arg("palette").output().unwrap();
    assert!(result.status.success());

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.starts_with("Palette (17 colors):"), "{stdout}");
    assert!(stdout.contains("#C91A09"));
    assert!(stdout.contains("Wit"));
}

#[test]
fn test_init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");

    let result = brickify().current_dir(dir.path()).arg("init").output().unwrap();
    assert!(result.status.success());
    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("grid_width: 48"));

    std::fs::write(&config, "defaults:\n  grid_width: 10\n").unwrap();
    let result = brickify().current_dir(dir.path()).arg("init").output().unwrap();
    assert!(result.status.success());
    assert!(String::from_utf8_lossy(&result.stdout).contains("Skipped"));
    assert_eq!(
        std::fs::read_to_string(&config).unwrap(),
        "defaults:\n  grid_width: 10\n"
    );

    let result = brickify()
        .current_dir(dir.path())
        .args(["init", "--force"])
        .output()
        .unwrap();
    assert!(result.status.success());
    assert!(std::fs::read_to_string(&config).unwrap().contains("grid_width: 48"));
}

#[test]
fn test_convert_uses_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("brickify.yaml");
    std::fs::write(&config, "defaults:\n  grid_width: 4\n  cell_size: 2\n").unwrap();
    let input = dir.path().join("photo.png");
    let output = dir.path().join("preview.png");
    std::fs::write(&input, fixtures::red_black_png()).unwrap();

    let result = brickify()
        .env("CONFIG_FILE", &config)
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();
    assert!(
        result.status.success(),
        "{}",
        String::from_utf8_lossy(&result.stderr)
    );

    let preview = image::open(&output).unwrap();
    assert_eq!((preview.width(), preview.height()), (8, 4));
}
