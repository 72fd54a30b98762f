use crate::Chip8Error;

/// The number of keys on the CHIP-8 keypad.
const NUMBER_OF_KEYS: u8 = 16;

/// An abstraction of the state (pressed / not pressed) of each key on the CHIP-8 16-key keypad.
pub(crate) struct Keypad {
    pressed: [bool; NUMBER_OF_KEYS as usize],
}

impl Keypad {
    /// Returns a [Keypad] instance with no keys pressed.
    pub(crate) fn new() -> Self {
        Keypad {
            pressed: [false; NUMBER_OF_KEYS as usize],
        }
    }

    /// Returns whether `key` is currently pressed. Returns [Chip8Error::InvalidKey] if `key`
    /// is outside `0x0..0xF`.
    pub(crate) fn is_pressed(&self, key: u8) -> Result<bool, Chip8Error> {
        match key {
            n if n < NUMBER_OF_KEYS => Ok(self.pressed[n as usize]),
            _ => Err(Chip8Error::InvalidKey { key }),
        }
    }

    /// Sets the pressed state of `key`. A `key` outside `0x0..0xF` is masked to its low nibble
    /// by the caller before reaching here, so this never errors in practice, but still reports
    /// [Chip8Error::InvalidKey] defensively should that change.
    pub(crate) fn set_pressed(&mut self, key: u8, pressed: bool) -> Result<(), Chip8Error> {
        match key {
            n if n < NUMBER_OF_KEYS => {
                self.pressed[n as usize] = pressed;
                Ok(())
            }
            _ => Err(Chip8Error::InvalidKey { key }),
        }
    }

    /// Returns the lowest-indexed key currently pressed, if any.
    pub(crate) fn lowest_pressed(&self) -> Option<u8> {
        (0..NUMBER_OF_KEYS).find(|&k| self.pressed[k as usize])
    }
}
