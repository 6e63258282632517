use std::path::PathBuf;
use std::time::{Duration, Instant};

use space_invader::background::*;
use space_invader::error::BackgroundError;
use space_invader::surface::Rgb;

fn ppm(header: &str, body: &[u8]) -> Vec<u8> {
    let mut data = header.as_bytes().to_vec();
    data.extend_from_slice(body);
    data
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("space_invader_{}_{}", std::process::id(), name))
}

/// Poll until the loader settles, with a generous timeout.
fn settle(bg: &mut Background) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while bg.is_loading() && Instant::now() < deadline {
        bg.poll();
        std::thread::sleep(Duration::from_millis(5));
    }
}

// ── Decoding ──────────────────────────────────────────────────────────────────

#[test]
fn decodes_p6() {
    let data = ppm("P6\n2 1\n255\n", &[255, 0, 0, 0, 0, 255]);
    let image = Image::from_ppm(&data).unwrap();
    assert_eq!(image.width, 2);
    assert_eq!(image.height, 1);
    assert_eq!(image.pixel(0, 0), Some(Rgb(255, 0, 0)));
    assert_eq!(image.pixel(1, 0), Some(Rgb(0, 0, 255)));
    assert_eq!(image.pixel(2, 0), None);
}

#[test]
fn header_comments_are_skipped() {
    let data = ppm("P6\n# made by hand\n1 1 # trailing\n255\n", &[1, 2, 3]);
    let image = Image::from_ppm(&data).unwrap();
    assert_eq!(image.pixels, vec![Rgb(1, 2, 3)]);
}

#[test]
fn small_maxval_is_rescaled() {
    let data = ppm("P6 1 1 15\n", &[15, 0, 5]);
    let image = Image::from_ppm(&data).unwrap();
    assert_eq!(image.pixels, vec![Rgb(255, 0, 85)]);
}

#[test]
fn extra_trailing_bytes_are_ignored() {
    let data = ppm("P6 1 1 255\n", &[1, 2, 3, 4, 5]);
    assert_eq!(Image::from_ppm(&data).unwrap().pixels.len(), 1);
}

#[test]
fn rejects_other_formats() {
    let data = ppm("P3\n1 1\n255\n", b"1 2 3");
    assert!(matches!(
        Image::from_ppm(&data),
        Err(BackgroundError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        Image::from_ppm(b"\x89PNG\r\n"),
        Err(BackgroundError::UnsupportedFormat(_))
    ));
}

#[test]
fn rejects_bad_headers() {
    assert!(matches!(
        Image::from_ppm(b"P6 two 1 255\n"),
        Err(BackgroundError::MalformedHeader(_))
    ));
    assert!(matches!(
        Image::from_ppm(b"P6 0 1 255\n"),
        Err(BackgroundError::MalformedHeader(_))
    ));
    assert!(matches!(
        Image::from_ppm(b"P6 1 1 65535\n"),
        Err(BackgroundError::MalformedHeader(_))
    ));
    assert!(matches!(
        Image::from_ppm(b"P6 1"),
        Err(BackgroundError::MalformedHeader(_))
    ));
    assert!(matches!(
        Image::from_ppm(b""),
        Err(BackgroundError::MalformedHeader(_))
    ));
}

#[test]
fn rejects_truncated_pixels() {
    let data = ppm("P6 2 2 255\n", &[0; 5]);
    match Image::from_ppm(&data) {
        Err(BackgroundError::Truncated { got, need }) => {
            assert_eq!(got, 5);
            assert_eq!(need, 12);
        }
        other => panic!("expected Truncated, got {:?}", other),
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[test]
fn missing_file_is_an_io_error() {
    let path = temp_path("does_not_exist.ppm");
    assert!(matches!(load_image(&path), Err(BackgroundError::Io { .. })));
}

#[test]
fn failed_async_load_falls_back_to_solid_fill() {
    let mut bg = Background::spawn(temp_path("also_missing.ppm"));
    settle(&mut bg);
    assert!(!bg.is_loading());
    assert!(bg.poll().is_none());
    assert!(bg.image().is_none());
}

#[test]
fn async_load_delivers_the_image() {
    let path = temp_path("bg.ppm");
    std::fs::write(&path, ppm("P6 1 2 255\n", &[10, 20, 30, 40, 50, 60])).unwrap();

    let mut bg = Background::spawn(path.clone());
    settle(&mut bg);
    let image = bg.image().expect("image loaded");
    assert_eq!(image.pixel(0, 1), Some(Rgb(40, 50, 60)));

    let _ = std::fs::remove_file(path);
}

#[test]
fn none_and_from_image() {
    let mut none = Background::none();
    assert!(!none.is_loading());
    assert!(none.poll().is_none());

    let image = Image { width: 1, height: 1, pixels: vec![Rgb(1, 1, 1)] };
    let mut ready = Background::from_image(image.clone());
    assert_eq!(ready.poll(), Some(&image));
}
