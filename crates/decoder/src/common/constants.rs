//! Architectural constants shared by extractors, catalogue and decode context.

/// Register x0 (hard-wired zero).
pub const REG_ZERO: u32 = 0;
/// Register x1 (return address, ra).
pub const REG_RA: u32 = 1;
/// Register x2 (stack pointer, sp).
pub const REG_SP: u32 = 2;
/// Register x8 (frame pointer / first saved register, s0).
pub const REG_S0: u32 = 8;
/// Register x9 (second saved register, s1).
pub const REG_S1: u32 = 9;
/// Register x10 (first argument / return value, a0).
pub const REG_A0: u32 = 10;
/// Register x11 (second argument, a1).
pub const REG_A1: u32 = 11;
/// Register x18 (s2); s2..s11 are contiguous up to x27.
pub const REG_S2: u32 = 18;

/// Vector mask register index (v0).
pub const VREG_MASK: u32 = 0;

/// Base register index of the compressed 3-bit register fields (x8..x15).
pub const COMPRESSED_REG_BASE: u32 = 8;

/// Number of architectural registers per register class.
pub const NUM_REGS: u32 = 32;

/// Width in bits of a compressed (RVC) encoding.
pub const COMPRESSED_WIDTH: u32 = 16;

/// Width in bits of a standard encoding.
pub const STANDARD_WIDTH: u32 = 32;

/// Low two opcode bits identifying a 32-bit (non-compressed) encoding.
pub const STANDARD_QUADRANT: u64 = 0b11;

/// Mask keeping the significant bits of a compressed encoding.
pub const COMPRESSED_OPCODE_MASK: u64 = 0xFFFF;

/// Mask keeping the significant bits of a standard encoding.
pub const STANDARD_OPCODE_MASK: u64 = 0xFFFF_FFFF;
