/// The default CHIP-8 program start address within memory.
const DEFAULT_PROGRAM_ADDRESS: u16 = 0x200;

/// How the [Cpu](crate::Cpu) should react to an opcode it does not recognise.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnknownOpcodeMode {
    /// Return [Chip8Error::UnknownOpcode](crate::Chip8Error::UnknownOpcode) and halt.
    Strict,
    /// Log a warning via the `log` crate, treat the opcode as a no-op, and keep running.
    Lenient,
}

impl Default for UnknownOpcodeMode {
    fn default() -> Self {
        UnknownOpcodeMode::Strict
    }
}

/// A struct to allow specification of start-up parameters.
///
/// An instance of [Options] is passed to [System::new](crate::System::new) when
/// instantiating [System](crate::System).
#[derive(Copy, Clone, Debug)]
pub struct Options {
    pub program_start_address: u16,
    /// A fixed seed for the `CXNN` random-number generator, making replay deterministic. `None`
    /// seeds from OS entropy.
    pub rng_seed: Option<u64>,
    pub unknown_opcode_mode: UnknownOpcodeMode,
}

impl Default for Options {
    /// Constructor that returns an [Options] instance using typical default settings.
    fn default() -> Self {
        Options {
            program_start_address: DEFAULT_PROGRAM_ADDRESS,
            rng_seed: None,
            unknown_opcode_mode: UnknownOpcodeMode::Strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.program_start_address, 0x200);
        assert_eq!(options.rng_seed, None);
        assert_eq!(options.unknown_opcode_mode, UnknownOpcodeMode::Strict);
    }
}
