/// An abstraction of a CHIP-8 ROM image, ready for loading into a [System](crate::System).
///
/// A ROM is raw binary: no header, no checksum. Bytes are loaded verbatim into memory starting
/// at `0x200` by [crate::System::load_rom].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rom {
    data: Vec<u8>,
}

impl Rom {
    /// Returns a [Rom] wrapping the supplied bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Rom { data }
    }

    /// Returns a reference to the ROM's bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the size of the ROM in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_and_size() {
        let rom = Rom::new(vec![0xA1, 0x14, 0x0C, 0xFD, 0xA3]);
        assert_eq!(rom.data(), &[0xA1, 0x14, 0x0C, 0xFD, 0xA3]);
        assert_eq!(rom.size(), 5);
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(Rom::default().size(), 0);
    }
}
