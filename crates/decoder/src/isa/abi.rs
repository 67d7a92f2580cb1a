//! RISC-V Application Binary Interface (ABI) register names.
//!
//! Maps architectural register indices to their calling-convention names and
//! rewrites numeric register tokens in disassembly text (`x10` -> `a0`).

/// ABI register names for x0–x31.
const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// ABI register names for f0–f31.
const FREG_NAMES: [&str; 32] = [
    "ft0", "ft1", "ft2", "ft3", "ft4", "ft5", "ft6", "ft7", "fs0", "fs1", "fa0", "fa1", "fa2",
    "fa3", "fa4", "fa5", "fa6", "fa7", "fs2", "fs3", "fs4", "fs5", "fs6", "fs7", "fs8", "fs9",
    "fs10", "fs11", "ft8", "ft9", "ft10", "ft11",
];

/// Returns the ABI name for an integer register index.
#[inline]
pub fn xreg(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("x??")
}

/// Returns the ABI name for a floating-point register index.
#[inline]
pub fn freg(idx: usize) -> &'static str {
    FREG_NAMES.get(idx).copied().unwrap_or("f??")
}

/// Maps one token such as `x10` or `f3` to its ABI name.
fn abi_token(token: &str) -> Option<&'static str> {
    let mut chars = token.chars();
    let prefix = chars.next()?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let idx: usize = digits.parse().ok()?;
    match prefix {
        'x' if idx < REG_NAMES.len() => Some(xreg(idx)),
        'f' if idx < FREG_NAMES.len() => Some(freg(idx)),
        _ => None,
    }
}

/// Rewrites every `xN`/`fN` register token of `text` to its ABI name.
///
/// Tokens are delimited by whitespace, commas and parentheses; the mnemonic
/// and immediates are left untouched.
pub fn rename_registers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut token = String::new();
    let flush = |token: &mut String, out: &mut String| {
        match abi_token(token) {
            Some(name) => out.push_str(name),
            None => out.push_str(token),
        }
        token.clear();
    };
    for (i, c) in text.char_indices() {
        // The first token is the mnemonic.
        let in_mnemonic = !text[..i].contains(char::is_whitespace);
        if in_mnemonic {
            out.push(c);
        } else if matches!(c, ' ' | '\t' | ',' | '(' | ')') {
            flush(&mut token, &mut out);
            out.push(c);
        } else {
            token.push(c);
        }
    }
    flush(&mut token, &mut out);
    out
}
