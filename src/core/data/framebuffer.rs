use crate::core::data::colour::Colour;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

const BYTES_PER_PIXEL: usize = 3;

fn buffer_size_for(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq)]
pub enum FramebufferError {
    PixelOutsideBounds {
        pixel: Point,
        width: u32,
        height: u32,
    },
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for FramebufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PixelOutsideBounds {
                pixel,
                width,
                height,
            } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of {}x{} framebuffer",
                    pixel.x, pixel.y, width, height
                )
            }
            Self::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "framebuffer expects {} bytes but data has {}",
                    expected, actual
                )
            }
        }
    }
}

impl Error for FramebufferError {}

/// Row-major RGB pixels, three bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Framebuffer {
    /// Allocates a black framebuffer.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; buffer_size_for(width, height)],
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.data
    }

    fn index_of(&self, pixel: Point) -> Option<usize> {
        if pixel.x < 0
            || pixel.y < 0
            || pixel.x as u32 >= self.width
            || pixel.y as u32 >= self.height
        {
            return None;
        }

        Some((pixel.y as usize * self.width as usize + pixel.x as usize) * BYTES_PER_PIXEL)
    }

    #[must_use]
    pub fn pixel(&self, pixel: Point) -> Option<Colour> {
        self.index_of(pixel).map(|i| Colour {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
        })
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), FramebufferError> {
        let index = self
            .index_of(pixel)
            .ok_or(FramebufferError::PixelOutsideBounds {
                pixel,
                width: self.width,
                height: self.height,
            })?;

        write_colour(&mut self.data[index..index + BYTES_PER_PIXEL], colour);
        Ok(())
    }

    /// Paints a `size`×`size` square whose top-left corner is `top_left`,
    /// clipped to the framebuffer edges.
    pub fn fill_block(&mut self, top_left: Point, size: u32, colour: Colour) {
        let x_start = top_left.x.max(0) as u32;
        let y_start = top_left.y.max(0) as u32;
        let x_end = (top_left.x as i64 + size as i64).clamp(0, self.width as i64) as u32;
        let y_end = (top_left.y as i64 + size as i64).clamp(0, self.height as i64) as u32;

        for y in y_start..y_end {
            let row_start = y as usize * self.width as usize * BYTES_PER_PIXEL;
            let row = &mut self.data[row_start..row_start + self.width as usize * BYTES_PER_PIXEL];

            for x in x_start..x_end {
                let i = x as usize * BYTES_PER_PIXEL;
                write_colour(&mut row[i..i + BYTES_PER_PIXEL], colour);
            }
        }
    }

    /// Splits the rows into `slice_count` contiguous horizontal bands.
    ///
    /// Every band but the last holds `height / slice_count` rows; the last
    /// takes the remainder. Bands never overlap, so each can be handed to a
    /// different thread. `slice_count` is clamped to `1..=height`.
    pub fn split_into_slices(&mut self, slice_count: u32) -> Vec<FramebufferSlice<'_>> {
        let slice_count = slice_count.clamp(1, self.height.max(1));
        let band_height = self.height / slice_count;
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;

        let mut slices = Vec::with_capacity(slice_count as usize);
        let mut remaining: &mut [u8] = &mut self.data;

        for band in 0..slice_count {
            let first_row = band * band_height;
            let rows = if band == slice_count - 1 {
                self.height - first_row
            } else {
                band_height
            };

            let (head, tail) = std::mem::take(&mut remaining).split_at_mut(rows as usize * row_bytes);
            remaining = tail;

            slices.push(FramebufferSlice {
                first_row,
                width: self.width,
                data: head,
            });
        }

        slices
    }
}

fn write_colour(dst: &mut [u8], colour: Colour) {
    dst[0] = colour.r;
    dst[1] = colour.g;
    dst[2] = colour.b;
}

/// Exclusive view over a contiguous band of framebuffer rows.
#[derive(Debug)]
pub struct FramebufferSlice<'a> {
    first_row: u32,
    width: u32,
    data: &'a mut [u8],
}

impl FramebufferSlice<'_> {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn row_count(&self) -> u32 {
        if self.width == 0 {
            return 0;
        }

        (self.data.len() / (self.width as usize * BYTES_PER_PIXEL)) as u32
    }

    /// Row indices of the whole framebuffer covered by this slice.
    pub fn rows(&self) -> std::ops::Range<u32> {
        self.first_row..self.first_row + self.row_count()
    }

    /// Mutable RGB bytes of absolute row `y`, which must lie in [`Self::rows`].
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        let start = (y - self.first_row) as usize * row_bytes;

        &mut self.data[start..start + row_bytes]
    }
}

/// Writes `colour` at column `x` of a row obtained from [`FramebufferSlice::row_mut`].
pub fn set_row_pixel(row: &mut [u8], x: u32, colour: Colour) {
    let i = x as usize * BYTES_PER_PIXEL;
    write_colour(&mut row[i..i + BYTES_PER_PIXEL], colour);
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Colour = Colour::new(255, 0, 0);

    #[test]
    fn test_new_is_black_and_sized() {
        let framebuffer = Framebuffer::new(4, 3);

        assert_eq!(framebuffer.buffer().len(), 4 * 3 * 3);
        assert!(framebuffer.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_and_read_pixel() {
        let mut framebuffer = Framebuffer::new(3, 2);

        framebuffer.set_pixel(Point::new(2, 1), RED).unwrap();

        assert_eq!(framebuffer.pixel(Point::new(2, 1)), Some(RED));
        assert_eq!(framebuffer.pixel(Point::new(0, 0)), Some(Colour::BLACK));
        assert_eq!(&framebuffer.buffer()[15..18], &[255, 0, 0]);
    }

    #[test]
    fn test_set_pixel_outside_bounds_fails() {
        let mut framebuffer = Framebuffer::new(3, 2);

        let result = framebuffer.set_pixel(Point::new(3, 0), RED);

        assert_eq!(
            result,
            Err(FramebufferError::PixelOutsideBounds {
                pixel: Point::new(3, 0),
                width: 3,
                height: 2
            })
        );
        assert_eq!(framebuffer.pixel(Point::new(-1, 0)), None);
    }

    #[test]
    fn test_fill_block_clips_at_edges() {
        let mut framebuffer = Framebuffer::new(5, 5);

        framebuffer.fill_block(Point::new(4, 4), 4, RED);

        assert_eq!(framebuffer.pixel(Point::new(4, 4)), Some(RED));
        assert_eq!(framebuffer.pixel(Point::new(3, 4)), Some(Colour::BLACK));
        assert_eq!(framebuffer.pixel(Point::new(4, 3)), Some(Colour::BLACK));
    }

    #[test]
    fn test_fill_block_covers_whole_square() {
        let mut framebuffer = Framebuffer::new(8, 8);

        framebuffer.fill_block(Point::new(4, 0), 4, RED);

        for y in 0..8 {
            for x in 0..8 {
                let expected = if x >= 4 && y < 4 { RED } else { Colour::BLACK };
                assert_eq!(framebuffer.pixel(Point::new(x, y)), Some(expected));
            }
        }
    }

    #[test]
    fn test_split_last_slice_takes_remainder() {
        let mut framebuffer = Framebuffer::new(2, 10);

        let slices = framebuffer.split_into_slices(3);
        let rows: Vec<_> = slices.iter().map(|s| s.rows()).collect();

        assert_eq!(rows, vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_split_clamps_slice_count_to_height() {
        let mut framebuffer = Framebuffer::new(2, 2);

        assert_eq!(framebuffer.split_into_slices(16).len(), 2);
        assert_eq!(framebuffer.split_into_slices(0).len(), 1);
    }

    #[test]
    fn test_slice_writes_land_in_framebuffer() {
        let mut framebuffer = Framebuffer::new(3, 4);

        for mut slice in framebuffer.split_into_slices(2) {
            for y in slice.rows() {
                let row = slice.row_mut(y);
                set_row_pixel(row, y % 3, Colour::new(y as u8, 0, 0));
            }
        }

        assert_eq!(framebuffer.pixel(Point::new(0, 0)), Some(Colour::new(0, 0, 0)));
        assert_eq!(framebuffer.pixel(Point::new(1, 1)), Some(Colour::new(1, 0, 0)));
        assert_eq!(framebuffer.pixel(Point::new(2, 2)), Some(Colour::new(2, 0, 0)));
        assert_eq!(framebuffer.pixel(Point::new(0, 3)), Some(Colour::new(3, 0, 0)));
    }
}
