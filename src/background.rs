//! Optional background image.
//!
//! The image is a binary PPM (`P6`) read on a worker thread.  The result comes
//! back over a channel and is picked up by [`Background::poll`] on the render
//! side.  Any failure is logged and leaves the solid fill in place.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::BackgroundError;
use crate::surface::Rgb;

/// A decoded RGB image, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgb>,
}

impl Image {
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Decode a binary PPM.
    ///
    /// Header: `P6`, width, height, maxval, separated by whitespace, with
    /// `#` comments allowed.  A single whitespace byte precedes the samples.
    /// Only one byte per sample is supported (maxval ≤ 255); samples are
    /// rescaled to 0–255.
    pub fn from_ppm(data: &[u8]) -> Result<Image, BackgroundError> {
        let mut header = HeaderReader { data, pos: 0 };

        let magic = header.token()?;
        if magic != b"P6" {
            return Err(BackgroundError::UnsupportedFormat(
                String::from_utf8_lossy(magic).into_owned(),
            ));
        }
        let width = header.number("width")?;
        let height = header.number("height")?;
        let maxval = header.number("maxval")?;
        if width == 0 || height == 0 {
            return Err(BackgroundError::MalformedHeader(format!(
                "empty image {}x{}",
                width, height
            )));
        }
        if maxval == 0 || maxval > 255 {
            return Err(BackgroundError::MalformedHeader(format!(
                "maxval {} not in 1..=255",
                maxval
            )));
        }
        // Exactly one whitespace byte separates the header from the samples.
        header.pos += 1;

        let need = width as usize * height as usize * 3;
        let body = data.get(header.pos..).unwrap_or(&[]);
        if body.len() < need {
            return Err(BackgroundError::Truncated { got: body.len(), need });
        }

        let scale = |v: u8| -> u8 {
            if maxval == 255 {
                v
            } else {
                ((v as u32).min(maxval) * 255 / maxval) as u8
            }
        };
        let pixels = body[..need]
            .chunks_exact(3)
            .map(|px| Rgb(scale(px[0]), scale(px[1]), scale(px[2])))
            .collect();

        Ok(Image { width, height, pixels })
    }
}

struct HeaderReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> Result<&'a [u8], BackgroundError> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while let Some(&b) = self.data.get(self.pos) {
            if b.is_ascii_whitespace() || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        if start == self.pos {
            return Err(BackgroundError::MalformedHeader(
                "unexpected end of header".to_string(),
            ));
        }
        Ok(&self.data[start..self.pos])
    }

    fn number(&mut self, field: &str) -> Result<u32, BackgroundError> {
        let token = self.token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                BackgroundError::MalformedHeader(format!(
                    "{} is not a number: {:?}",
                    field,
                    String::from_utf8_lossy(token)
                ))
            })
    }
}

/// Read and decode the image at `path`.
pub fn load_image(path: &Path) -> Result<Image, BackgroundError> {
    let data = std::fs::read(path).map_err(|source| BackgroundError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Image::from_ppm(&data)
}

// ── Asynchronous loading ──────────────────────────────────────────────────────

enum LoadState {
    Loading(Receiver<Result<Image, BackgroundError>>),
    Ready(Image),
    Fallback,
}

/// Background asset with its load state.
pub struct Background {
    state: LoadState,
}

impl Background {
    /// No image: always the solid fill.
    pub fn none() -> Self {
        Background { state: LoadState::Fallback }
    }

    /// Start loading `path` on a worker thread.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("background-loader".to_string())
            .spawn(move || {
                // Receiver gone means the game is shutting down.
                let _ = tx.send(load_image(&path));
            });
        match spawned {
            Ok(_) => Background { state: LoadState::Loading(rx) },
            Err(e) => {
                tracing::error!(error = %e, "could not start background loader; using solid fill");
                Self::none()
            }
        }
    }

    /// Build from an already-decoded image.
    pub fn from_image(image: Image) -> Self {
        Background { state: LoadState::Ready(image) }
    }

    /// Pick up a finished load, if any, and return the current image.
    pub fn poll(&mut self) -> Option<&Image> {
        if let LoadState::Loading(rx) = &self.state {
            let result = match rx.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => Err(BackgroundError::Disconnected),
            };
            self.state = match result {
                Ok(image) => {
                    tracing::info!(width = image.width, height = image.height, "background loaded");
                    LoadState::Ready(image)
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to load background; using solid fill");
                    LoadState::Fallback
                }
            };
        }
        self.image()
    }

    pub fn image(&self) -> Option<&Image> {
        match &self.state {
            LoadState::Ready(image) => Some(image),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading(_))
    }
}
