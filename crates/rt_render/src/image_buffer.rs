//! Output image buffer and the color-to-byte conversion.

use crate::{Color, RenderError, RenderResult, Real};
use rt_math::Interval;
use std::slice::ChunksExactMut;

/// Largest value kept before scaling by 256, so 1.0 never becomes 256.
const UNORM_MAX: Real = 0.999;

/// Layout of a single pixel in [`Image::data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Three 8-bit channels, red first.
    Rgb8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
        }
    }

    pub fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Rgb8 => 24,
        }
    }

    pub fn bit_depth(self) -> u32 {
        match self {
            PixelFormat::Rgb8 => 8,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        (self.bits_per_pixel() >> 3) as usize
    }
}

/// Compression applied to [`Image::data`]. The renderer only produces raw pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressFormat {
    #[default]
    None,
}

/// An uncompressed, row-major image with the top row first.
///
/// Fields mirror what an encoder needs to consume the buffer.
#[derive(Debug, Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
    pub bit_depth: u32,
    pub pixel_format: PixelFormat,
    /// Bytes per row
    pub pitch: usize,
    pub compressed: bool,
    pub compress_format: CompressFormat,
    pub data_size: usize,
    pub data: Vec<u8>,
}

impl Image {
    /// Allocate a zeroed image.
    ///
    /// Fails on zero dimensions or when the buffer cannot be allocated;
    /// no partially sized image is ever returned.
    pub fn new(width: u32, height: u32, pixel_format: PixelFormat) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let bytes_per_pixel = pixel_format.bytes_per_pixel();
        let pitch = bytes_per_pixel * width as usize;
        let data_size = pitch
            .checked_mul(height as usize)
            .ok_or(RenderError::AllocationFailed { bytes: usize::MAX })?;

        let mut data = Vec::new();
        data.try_reserve_exact(data_size)
            .map_err(|_| RenderError::AllocationFailed { bytes: data_size })?;
        data.resize(data_size, 0);

        log::debug!(
            "Allocated {}x{} {:?} image ({} bytes, pitch {})",
            width,
            height,
            pixel_format,
            data_size,
            pitch
        );

        Ok(Self {
            width,
            height,
            bits_per_pixel: pixel_format.bits_per_pixel(),
            bit_depth: pixel_format.bit_depth(),
            pixel_format,
            pitch,
            compressed: false,
            compress_format: CompressFormat::None,
            data_size,
            data,
        })
    }

    #[inline]
    fn offset(&self, x: u32, y: u32, channel: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} image",
            x,
            y,
            self.width,
            self.height
        );
        assert!(channel < self.pixel_format.channels(), "channel {} out of range", channel);
        y as usize * self.pitch + x as usize * self.pixel_format.bytes_per_pixel() + channel
    }

    /// Write one channel of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate or channel is outside the image. Coordinates
    /// are never clamped, since that would land on a neighbouring pixel.
    pub fn set_channel(&mut self, x: u32, y: u32, channel: usize, value: u8) {
        let offset = self.offset(x, y, channel);
        self.data[offset] = value;
    }

    pub fn set_r(&mut self, x: u32, y: u32, value: u8) {
        self.set_channel(x, y, 0, value);
    }

    pub fn set_g(&mut self, x: u32, y: u32, value: u8) {
        self.set_channel(x, y, 1, value);
    }

    pub fn set_b(&mut self, x: u32, y: u32, value: u8) {
        self.set_channel(x, y, 2, value);
    }

    /// Write all channels of pixel `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.set_r(x, y, rgb[0]);
        self.set_g(x, y, rgb[1]);
        self.set_b(x, y, rgb[2]);
    }

    /// Bytes of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = self.offset(x, y, 0);
        &self.data[start..start + self.pixel_format.bytes_per_pixel()]
    }

    /// One mutable slice per pixel, in row-major order.
    ///
    /// The slices never overlap, so each can be handed to a different work unit.
    pub fn pixels_mut(&mut self) -> ChunksExactMut<'_, u8> {
        let bytes_per_pixel = self.pixel_format.bytes_per_pixel();
        self.data.chunks_exact_mut(bytes_per_pixel)
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Quantize a channel value to 8 bits.
///
/// Clamps to `[0, 0.999]`, scales by 256 and truncates. NaN maps to 0.
#[inline]
pub fn to_unorm(value: Real) -> u8 {
    (Interval::new(0.0, UNORM_MAX).clamp(value) * 256.0) as u8
}

/// Gamma 2 encoding: component-wise square root.
#[inline]
pub fn gamma_correct(color: Color) -> Color {
    Color::new(color.x.sqrt(), color.y.sqrt(), color.z.sqrt())
}

/// Average accumulated samples, gamma-correct once, then quantize.
pub fn encode_pixel(sum: Color, samples: u32) -> [u8; 3] {
    let average = sum * (1.0 / samples as Real);
    let corrected = gamma_correct(average);
    [
        to_unorm(corrected.x),
        to_unorm(corrected.y),
        to_unorm(corrected.z),
    ]
}
