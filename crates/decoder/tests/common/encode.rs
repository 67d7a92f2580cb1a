//! Raw opcode encoders.
//!
//! Register arguments are architectural indices. Compressed helpers taking a
//! 3-bit register field expect `x8`..`x15`.

use rvdecode_core::Opcode;
pub use rvdecode_core::catalog::opcode::*;

/// Encode an R-type instruction.
pub fn r_type(major: Opcode, rd: u32, funct3: u32, rs1: u32, rs2: u32, funct7: u32) -> Opcode {
    (u64::from(funct7 & 0x7F) << 25)
        | (u64::from(rs2 & 0x1F) << 20)
        | (u64::from(rs1 & 0x1F) << 15)
        | (u64::from(funct3 & 0x7) << 12)
        | (u64::from(rd & 0x1F) << 7)
        | major
}

/// Encode an I-type instruction.
pub fn i_type(major: Opcode, rd: u32, funct3: u32, rs1: u32, imm: i32) -> Opcode {
    let imm = u64::from(imm as u32 & 0xFFF);
    (imm << 20)
        | (u64::from(rs1 & 0x1F) << 15)
        | (u64::from(funct3 & 0x7) << 12)
        | (u64::from(rd & 0x1F) << 7)
        | major
}

/// Encode an S-type instruction.
pub fn s_type(major: Opcode, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> Opcode {
    let v = u64::from(imm as u32);
    (((v >> 5) & 0x7F) << 25)
        | (u64::from(rs2 & 0x1F) << 20)
        | (u64::from(rs1 & 0x1F) << 15)
        | (u64::from(funct3 & 0x7) << 12)
        | ((v & 0x1F) << 7)
        | major
}

/// Encode a B-type instruction.
pub fn b_type(funct3: u32, rs1: u32, rs2: u32, imm: i32) -> Opcode {
    let v = u64::from(imm as u32);
    (((v >> 12) & 1) << 31)
        | (((v >> 5) & 0x3F) << 25)
        | (u64::from(rs2 & 0x1F) << 20)
        | (u64::from(rs1 & 0x1F) << 15)
        | (u64::from(funct3 & 0x7) << 12)
        | (((v >> 1) & 0xF) << 8)
        | (((v >> 11) & 1) << 7)
        | BRANCH
}

/// Encode a vector arithmetic instruction (`OP-V`).
pub fn v_type(funct6: u32, masked: bool, vs2: u32, vs1: u32, funct3: u32, vd: u32) -> Opcode {
    (u64::from(funct6 & 0x3F) << 26)
        | (u64::from(!masked) << 25)
        | (u64::from(vs2 & 0x1F) << 20)
        | (u64::from(vs1 & 0x1F) << 15)
        | (u64::from(funct3 & 0x7) << 12)
        | (u64::from(vd & 0x1F) << 7)
        | OP_V
}

/// Encode `vsetvli rd, rs1, vtypei`.
pub fn vsetvli(rd: u32, rs1: u32, vtype: u32) -> Opcode {
    (u64::from(vtype & 0x7FF) << 20)
        | (u64::from(rs1 & 0x1F) << 15)
        | (0b111 << 12)
        | (u64::from(rd & 0x1F) << 7)
        | OP_V
}

/// Encode `vsetivli rd, uimm, vtypei`.
pub fn vsetivli(rd: u32, avl: u32, vtype: u32) -> Opcode {
    (0b11 << 30)
        | (u64::from(vtype & 0x3FF) << 20)
        | (u64::from(avl & 0x1F) << 15)
        | (0b111 << 12)
        | (u64::from(rd & 0x1F) << 7)
        | OP_V
}

/// `vtype` immediate from its fields; `vsew` is the encoded 3-bit width code.
pub const fn vtype(vlmul: u32, vsew: u32, ta: bool, ma: bool) -> u32 {
    ((ma as u32) << 7) | ((ta as u32) << 6) | ((vsew & 0x7) << 3) | (vlmul & 0x7)
}

/// 3-bit compressed register field of `x8`..`x15`.
fn creg(reg: u32) -> u64 {
    assert!((8..16).contains(&reg), "x{reg} has no compressed encoding");
    u64::from(reg - 8)
}

/// Encode `c.lw rd', uimm(rs1')`.
pub fn c_lw(rd: u32, rs1: u32, uimm: u32) -> Opcode {
    let u = u64::from(uimm);
    (0b010 << 13)
        | (((u >> 3) & 0x7) << 10)
        | (creg(rs1) << 7)
        | (((u >> 2) & 1) << 6)
        | (((u >> 6) & 1) << 5)
        | (creg(rd) << 2)
}

/// Encode `c.addi rd, imm`.
pub fn c_addi(rd: u32, imm: i32) -> Opcode {
    let v = u64::from(imm as u32);
    (((v >> 5) & 1) << 12) | (u64::from(rd & 0x1F) << 7) | ((v & 0x1F) << 2) | 0b01
}

/// Encode a Zcmp push/pop: `base` is the mnemonic's fixed bits.
pub fn cm_stack(base: Opcode, rlist: u32, spimm: u32) -> Opcode {
    base | (u64::from(rlist & 0xF) << 4) | (u64::from(spimm & 0x3) << 2)
}

/// Little-endian bytes of an opcode of `len` bytes.
pub fn le_bytes(opcode: Opcode, len: usize) -> Vec<u8> {
    opcode.to_le_bytes()[..len].to_vec()
}
