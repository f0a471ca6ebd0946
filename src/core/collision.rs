//! Pixel-accurate collision masks.
//!
//! A [`Mask`] is a packed bitmap of solid pixels. Two masks collide when at
//! least one solid pixel overlaps once the second mask is placed at an
//! integer offset relative to the first. Sprites in this game are filled
//! squares, but the test is exact for any shape built with
//! [`Mask::from_fn`].

//=== Mask ================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    /// Row-major bits, `words_per_row` u64 words per row.
    bits: Vec<u64>,
    words_per_row: usize,
}

impl Mask {
    /// Empty (all transparent) mask.
    pub fn new(width: u32, height: u32) -> Self {
        let words_per_row = (width as usize).div_ceil(64);
        Self {
            width,
            height,
            bits: vec![0; words_per_row * height as usize],
            words_per_row,
        }
    }

    /// Fully solid rectangle.
    pub fn filled(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    pub fn from_fn(width: u32, height: u32, mut solid: impl FnMut(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if solid(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (word, bit) = self.index(x, y);
        if value {
            self.bits[word] |= 1 << bit;
        } else {
            self.bits[word] &= !(1 << bit);
        }
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (word, bit) = self.index(x, y);
        self.bits[word] & (1 << bit) != 0
    }

    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// First overlapping solid pixel, in this mask's coordinates.
    ///
    /// `offset` is the position of `other`'s top-left corner relative to
    /// this mask's top-left corner. Scans rows top to bottom and returns
    /// the leftmost hit of the first row that has one.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(u32, u32)> {
        let (dx, dy) = offset;

        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (self.width as i32).min(dx + other.width as i32);
        let y1 = (self.height as i32).min(dy + other.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        for y in y0..y1 {
            let other_y = (y - dy) as u32;
            for x in x0..x1 {
                if self.get(x as u32, y as u32) && other.get((x - dx) as u32, other_y) {
                    return Some((x as u32, y as u32));
                }
            }
        }
        None
    }

    fn index(&self, x: u32, y: u32) -> (usize, u32) {
        let word = y as usize * self.words_per_row + (x as usize / 64);
        (word, x % 64)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
