use bitvec::prelude::*;

/// The CHIP-8 display width, in pixels.
pub const DISPLAY_WIDTH: usize = 64;
/// The CHIP-8 display height, in pixels.
pub const DISPLAY_HEIGHT: usize = 32;
const DISPLAY_PIXEL_COUNT: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// An abstraction of the CHIP-8 frame buffer: a flat 64x32 grid of single-bit pixels, indexed
/// as `x + 64*y` with `(0, 0)` at the top-left.
///
/// This is only written to from within the crate (by the CPU's sprite-blit logic), but is
/// exposed publicly for read access so a hosting presenter can render frames directly via
/// [System::pixels](crate::System::pixels).
#[derive(Clone, Debug, PartialEq)]
pub struct Display {
    pixels: BitArr!(for DISPLAY_PIXEL_COUNT),
}

impl Display {
    /// Returns a [Display] instance with every pixel off.
    pub(crate) fn new() -> Self {
        Display {
            pixels: bitarr![0; DISPLAY_PIXEL_COUNT],
        }
    }

    /// Turns every pixel off.
    pub(crate) fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// Returns whether the pixel at `index` (`0..2048`) is on.
    pub fn read(&self, index: usize) -> bool {
        self.pixels[index]
    }

    /// Sets the pixel at `index` (`0..2048`) to `on`.
    pub(crate) fn write(&mut self, index: usize, on: bool) {
        self.pixels.set(index, on);
    }

    /// Returns a read-only bit-level view of the whole frame buffer, row-major, top-left origin.
    pub fn snapshot(&self) -> &BitSlice {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_all_off() {
        let display = Display::new();
        assert!(display.snapshot().not_any());
    }

    #[test]
    fn test_write_then_read() {
        let mut display = Display::new();
        display.write(5 + 64 * 3, true);
        assert!(display.read(5 + 64 * 3));
        assert!(!display.read(5 + 64 * 4));
    }

    #[test]
    fn test_clear() {
        let mut display = Display::new();
        display.write(0, true);
        display.write(2047, true);
        display.clear();
        assert!(display.snapshot().not_any());
    }

    #[test]
    fn test_snapshot_length() {
        let display = Display::new();
        assert_eq!(display.snapshot().len(), DISPLAY_WIDTH * DISPLAY_HEIGHT);
    }
}
