//! WASM API for the CPU core.
//!
//! Exposes a flat-memory machine to JavaScript: load a program, step it,
//! inspect registers and memory.

use crate::{ExecutionError, FlatMemory, LogAndSkip, MemoryBus, UnknownOpcodeHandler, CPU};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<ExecutionError> for JsError {
    fn from(err: ExecutionError) -> Self {
        JsError::new(&err.to_string())
    }
}

/// Forwards unknown-opcode diagnostics to a JS callback as `(opcode, addr)`,
/// then behaves like the default handler.
struct JsUnknownOpcode {
    callback: js_sys::Function,
    fallback: LogAndSkip,
}

impl UnknownOpcodeHandler for JsUnknownOpcode {
    fn handle(&mut self, opcode: u8, addr: u16) -> Result<u8, ExecutionError> {
        let _ = self.callback.call2(
            &JsValue::NULL,
            &JsValue::from(opcode),
            &JsValue::from(addr),
        );
        self.fallback.handle(opcode, addr)
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator {
    cpu: CPU<FlatMemory>,
}

#[wasm_bindgen]
impl Emulator {
    /// Creates a machine with 64KB of zeroed RAM and all registers at zero.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Emulator {
            cpu: CPU::new(FlatMemory::new()),
        }
    }

    /// Registers `callback(opcode, addr)` to hear about unknown opcodes.
    pub fn on_unknown_opcode(&mut self, callback: js_sys::Function) {
        self.cpu.set_unknown_opcode_handler(JsUnknownOpcode {
            callback,
            fallback: LogAndSkip::default(),
        });
    }

    /// Copies `program` into memory at `start` and points PC at it.
    pub fn load_program(&mut self, program: &[u8], start: u16) {
        self.cpu.memory_mut().load(start, program);
        self.cpu.set_pc(start);
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<(), JsError> {
        self.cpu.step().map_err(JsError::from)
    }

    /// Execute multiple cycles and return actual cycles executed
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        self.cpu
            .run_for_cycles(cycles as u64)
            .map(|c| c as u32)
            .map_err(JsError::from)
    }

    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Copies `len` bytes starting at `start` into a new `Uint8Array`.
    /// Addresses wrap at 0xFFFF.
    pub fn memory_range(&self, start: u16, len: u16) -> js_sys::Uint8Array {
        let bytes: Vec<u8> = (0..len)
            .map(|i| self.cpu.memory().read(start.wrapping_add(i)))
            .collect();
        js_sys::Uint8Array::from(bytes.as_slice())
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    // Register setters
    #[wasm_bindgen(setter)]
    pub fn set_a(&mut self, value: u8) {
        self.cpu.set_a(value);
    }

    #[wasm_bindgen(setter)]
    pub fn set_x(&mut self, value: u8) {
        self.cpu.set_x(value);
    }

    #[wasm_bindgen(setter)]
    pub fn set_y(&mut self, value: u8) {
        self.cpu.set_y(value);
    }

    #[wasm_bindgen(setter)]
    pub fn set_pc(&mut self, value: u16) {
        self.cpu.set_pc(value);
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
