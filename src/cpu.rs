#![allow(non_snake_case)]

use crate::display::Display;
use crate::error::Chip8Error;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::options::{Options, UnknownOpcodeMode};
use crate::stack::Stack;
use crate::timers::Timers;
use bitvec::prelude::BitSlice;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod execute;
#[cfg(test)]
mod tests;

/// The number of variable registers available (`V0..=VF`).
const VARIABLE_REGISTER_COUNT: usize = 16;
/// The maximum sprite height (rows) a `DXYN` instruction may request.
const MAX_SPRITE_HEIGHT: u8 = 15;

/// The CHIP-8 CPU: registers, program counter, stack, and the fetch/decode/execute cycle.
///
/// Owns the [Memory], [Display], [Keypad] and [Timers] it operates on as plain struct
/// fields — there are no back-pointers and nothing aliased outside the struct, matching
/// the single-owner model described for this core.
pub(crate) struct Cpu {
    memory: Memory,
    display: Display,
    keypad: Keypad,
    timers: Timers,
    stack: Stack,
    variable_registers: [u8; VARIABLE_REGISTER_COUNT],
    index_register: u16,
    program_counter: u16,
    rng: StdRng,
    unknown_opcode_mode: UnknownOpcodeMode,
}

impl Cpu {
    /// Returns a freshly-initialised [Cpu]: memory cleared with the font installed, display
    /// blank, all registers zero, PC at `options.program_start_address`, and the `CXNN` PRNG
    /// seeded per `options.rng_seed`.
    pub(crate) fn new(options: Options) -> Self {
        let rng = match options.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Cpu {
            memory: Memory::new(),
            display: Display::new(),
            keypad: Keypad::new(),
            timers: Timers::new(),
            stack: Stack::new(),
            variable_registers: [0x0; VARIABLE_REGISTER_COUNT],
            index_register: 0x0,
            program_counter: options.program_start_address,
            rng,
            unknown_opcode_mode: options.unknown_opcode_mode,
        }
    }

    /// Loads `rom` into memory at the configured program start address. Does not otherwise
    /// disturb registers, the stack or the display — callers that want a full reset should
    /// construct a fresh [Cpu] (this is what [crate::System::init] does).
    pub(crate) fn load_rom(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        self.memory.load_rom(rom)
    }

    /// Decrements the delay and sound timers by one, saturating at zero. Independent of
    /// instruction execution; the host drives this at 60 Hz (see [crate::System::tick_timers]).
    pub(crate) fn tick_timers(&mut self) {
        self.timers.tick();
    }

    /// Returns whether the sound timer is active, i.e. the host should be buzzing.
    pub(crate) fn is_buzzing(&self) -> bool {
        self.timers.is_buzzing()
    }

    /// Returns a read-only bit-level view of the frame buffer, row-major, top-left origin.
    pub(crate) fn pixels(&self) -> &BitSlice {
        self.display.snapshot()
    }

    /// Sets the pressed state of `key`, masked to its low nibble.
    pub(crate) fn key_pressed(&mut self, key: u8, pressed: bool) {
        self.keypad
            .set_pressed(key & 0x0F, pressed)
            .expect("key masked to 0x0..0xF is always a valid keypad index");
    }

    /// Executes exactly one fetch/decode/execute cycle. Returns `Ok(true)` iff the executed
    /// instruction modified the display (`00E0` or `DXYN`).
    pub(crate) fn cycle(&mut self) -> Result<bool, Chip8Error> {
        // Fetch the big-endian opcode at the program counter.
        let opcode: u16 = self.memory.read_opcode(self.program_counter);
        // Pre-advance the program counter; individual execute_ methods adjust further for
        // skips, jumps, calls and returns, and FX0A undoes this when it needs to re-execute.
        self.program_counter = self.program_counter.wrapping_add(2);
        let instruction: Instruction = match Instruction::decode_from(opcode) {
            Ok(instruction) => instruction,
            Err(e) => {
                log::warn!("unknown opcode {:#06X} at PC {:#05X}", opcode, self.program_counter.wrapping_sub(2));
                return match self.unknown_opcode_mode {
                    UnknownOpcodeMode::Lenient => Ok(false),
                    UnknownOpcodeMode::Strict => Err(e),
                };
            }
        };
        let display_updated: bool = matches!(
            instruction,
            Instruction::Op00E0 | Instruction::OpDXYN { .. }
        );
        self.execute(instruction)?;
        Ok(display_updated)
    }

    /// Dispatches a decoded [Instruction] to its `execute_` handler.
    fn execute(&mut self, instruction: Instruction) -> Result<(), Chip8Error> {
        match instruction {
            Instruction::Op00E0 => self.execute_00E0(),
            Instruction::Op00EE => self.execute_00EE(),
            Instruction::Op0NNN { nnn } => self.execute_0NNN(nnn),
            Instruction::Op1NNN { nnn } => self.execute_1NNN(nnn),
            Instruction::Op2NNN { nnn } => self.execute_2NNN(nnn),
            Instruction::Op3XNN { x, nn } => self.execute_3XNN(x, nn),
            Instruction::Op4XNN { x, nn } => self.execute_4XNN(x, nn),
            Instruction::Op5XY0 { x, y } => self.execute_5XY0(x, y),
            Instruction::Op6XNN { x, nn } => self.execute_6XNN(x, nn),
            Instruction::Op7XNN { x, nn } => self.execute_7XNN(x, nn),
            Instruction::Op8XY0 { x, y } => self.execute_8XY0(x, y),
            Instruction::Op8XY1 { x, y } => self.execute_8XY1(x, y),
            Instruction::Op8XY2 { x, y } => self.execute_8XY2(x, y),
            Instruction::Op8XY3 { x, y } => self.execute_8XY3(x, y),
            Instruction::Op8XY4 { x, y } => self.execute_8XY4(x, y),
            Instruction::Op8XY5 { x, y } => self.execute_8XY5(x, y),
            Instruction::Op8XY6 { x, y } => self.execute_8XY6(x, y),
            Instruction::Op8XY7 { x, y } => self.execute_8XY7(x, y),
            Instruction::Op8XYE { x, y } => self.execute_8XYE(x, y),
            Instruction::Op9XY0 { x, y } => self.execute_9XY0(x, y),
            Instruction::OpANNN { nnn } => self.execute_ANNN(nnn),
            Instruction::OpBNNN { nnn } => self.execute_BNNN(nnn),
            Instruction::OpCXNN { x, nn } => self.execute_CXNN(x, nn),
            Instruction::OpDXYN { x, y, n } => self.execute_DXYN(x, y, n),
            Instruction::OpEX9E { x } => self.execute_EX9E(x),
            Instruction::OpEXA1 { x } => self.execute_EXA1(x),
            Instruction::OpFX07 { x } => self.execute_FX07(x),
            Instruction::OpFX0A { x } => self.execute_FX0A(x),
            Instruction::OpFX15 { x } => self.execute_FX15(x),
            Instruction::OpFX18 { x } => self.execute_FX18(x),
            Instruction::OpFX1E { x } => self.execute_FX1E(x),
            Instruction::OpFX29 { x } => self.execute_FX29(x),
            Instruction::OpFX33 { x } => self.execute_FX33(x),
            Instruction::OpFX55 { x } => self.execute_FX55(x),
            Instruction::OpFX65 { x } => self.execute_FX65(x),
        }
    }

    /// Draws a random `u8`, for `CXNN`'s use.
    fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }
}
