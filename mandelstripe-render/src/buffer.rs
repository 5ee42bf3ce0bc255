use std::sync::atomic::{AtomicU32, Ordering};

use mandelstripe_core::IN_SET_COLOR;

/// A packed-ARGB pixel surface shared between the control thread and the
/// render workers.
///
/// Each pixel is an atomic word, so workers write through a shared
/// reference without taking a lock. Writers in one render pass own
/// disjoint rows; readers may observe a mix of old and new rows while a
/// pass is in flight.
#[derive(Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Box<[AtomicU32]>,
}

impl PixelBuffer {
    /// Create a new buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        let pixels = (0..len).map(|_| AtomicU32::new(IN_SET_COLOR)).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)].load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self, x: u32, y: u32, argb: u32) {
        self.pixels[self.index(x, y)].store(argb, Ordering::Relaxed);
    }

    /// Overwrite row `y` with `row`, which must be exactly one row wide.
    pub fn write_row(&self, y: u32, row: &[u32]) {
        debug_assert_eq!(row.len(), self.width as usize);
        let start = self.index(0, y);
        for (dst, &argb) in self.pixels[start..start + row.len()].iter().zip(row) {
            dst.store(argb, Ordering::Relaxed);
        }
    }

    /// Copy the current contents out, row-major from the top-left.
    pub fn snapshot(&self) -> Vec<u32> {
        self.pixels.iter().map(|p| p.load(Ordering::Relaxed)).collect()
    }

    /// Same as [`snapshot`](Self::snapshot) but reuses `out`'s allocation.
    pub fn snapshot_into(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.pixels.iter().map(|p| p.load(Ordering::Relaxed)));
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
