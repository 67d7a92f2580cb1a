//! Disassembly rendering.
//!
//! Every extractor renders through [`render`], parameterized by its
//! [`DasmStyle`]. Register prefixes (`x`, `f`, `v`) come from the declared
//! operand types; implied operands are not printed except as the base of a
//! stack-relative memory access.

use super::Extractor;
use crate::common::Opcode;
use crate::isa::metadata::InstMetadata;
use crate::isa::operand::{ImmediateType, OperandElement, OperandFieldId};
use crate::isa::special::SpecialField;

/// Operand layout of the disassembly text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DasmStyle {
    /// `mn rd, rs1, rs2, imm`
    #[default]
    Generic,
    /// `mn rd, imm(rs1)`
    Load,
    /// `mn rs2, imm(rs1)`
    Store,
    /// `mn rd, rs2, (rs1)`
    Amo,
    /// `mn rd, csr, rs1|uimm`
    Csr,
    /// `mn pred, succ`
    Fence,
    /// `mn rd, 0xIMM` (raw upper immediate)
    Upper,
    /// `mn vd, vs2, vs1|rs1|imm[, v0.t]`
    VectorArith,
    /// `mn vd, vs1|rs1, vs2[, v0.t]` (multiply-accumulate)
    VectorMac,
    /// `mn vd, (rs1)[, rs2][, v0.t]`
    VectorMem,
    /// `mn {ra, s0-sN}, stack_adj`
    StackList,
    /// Mnemonic only.
    Bare,
}

/// Renders `mnemonic` and the operands of `opcode` in the extractor's style.
pub fn render<E: Extractor + ?Sized>(
    ext: &E,
    mnemonic: &str,
    opcode: Opcode,
    meta: &dyn InstMetadata,
) -> String {
    let dests = ext.dest_operand_info(opcode, meta, false);
    let sources = ext.source_operand_info(opcode, meta, false);
    let explicit = |list: &[OperandElement]| -> Vec<OperandElement> {
        list.iter()
            .filter(|el| !el.is_implied && !is_companion(el.field))
            .copied()
            .collect()
    };
    let masked = sources.iter().any(|el| el.field == OperandFieldId::Vm);
    let base = sources.iter().find(|el| el.field == OperandFieldId::Rs1);
    let imm = immediate_text(ext, opcode);

    let mut parts: Vec<String> = Vec::new();
    match ext.dasm_style() {
        DasmStyle::Generic => {
            parts.extend(explicit(&dests).iter().map(ToString::to_string));
            parts.extend(
                explicit(&sources)
                    .iter()
                    .filter(|el| el.field != OperandFieldId::Vm)
                    .map(ToString::to_string),
            );
            parts.extend(imm);
        }
        DasmStyle::Load => {
            parts.extend(explicit(&dests).first().map(ToString::to_string));
            parts.push(address(imm.as_deref().unwrap_or("0"), base));
        }
        DasmStyle::Store => {
            let data = sources
                .iter()
                .find(|el| el.is_store_data && !is_companion(el.field));
            parts.extend(data.map(ToString::to_string));
            parts.push(address(imm.as_deref().unwrap_or("0"), base));
        }
        DasmStyle::Amo => {
            parts.extend(explicit(&dests).first().map(ToString::to_string));
            parts.extend(
                sources
                    .iter()
                    .find(|el| el.is_store_data && !is_companion(el.field))
                    .map(ToString::to_string),
            );
            parts.push(address("", base));
        }
        DasmStyle::Csr => {
            parts.extend(explicit(&dests).first().map(ToString::to_string));
            if let Ok(csr) = ext.special_field(SpecialField::Csr, opcode, meta) {
                parts.push(format!("{csr:#x}"));
            }
            match explicit(&sources).first() {
                Some(rs1) => parts.push(rs1.to_string()),
                None => parts.extend(imm),
            }
        }
        DasmStyle::Fence => {
            for field in [SpecialField::Pred, SpecialField::Succ] {
                if let Ok(set) = ext.special_field(field, opcode, meta) {
                    parts.push(fence_set(set));
                }
            }
        }
        DasmStyle::Upper => {
            parts.extend(explicit(&dests).first().map(ToString::to_string));
            parts.push(format!("{:#x}", ext.immediate(opcode)));
        }
        style @ (DasmStyle::VectorArith | DasmStyle::VectorMac) => {
            let order = if style == DasmStyle::VectorArith {
                [OperandFieldId::Rs2, OperandFieldId::Rs1]
            } else {
                [OperandFieldId::Rs1, OperandFieldId::Rs2]
            };
            let listed = explicit(&sources);
            parts.extend(explicit(&dests).iter().map(ToString::to_string));
            for role in order {
                parts.extend(
                    listed
                        .iter()
                        .filter(|el| el.field == role)
                        .map(ToString::to_string),
                );
            }
            parts.extend(imm);
        }
        DasmStyle::VectorMem => {
            parts.extend(
                explicit(&dests)
                    .first()
                    .or_else(|| sources.iter().find(|el| el.is_store_data))
                    .map(ToString::to_string),
            );
            parts.push(address("", base));
            parts.extend(
                sources
                    .iter()
                    .find(|el| el.field == OperandFieldId::Rs2 && !el.is_store_data)
                    .map(ToString::to_string),
            );
        }
        DasmStyle::StackList => {
            if let Ok(rlist) = ext.special_field(SpecialField::Rlist, opcode, meta) {
                parts.push(rlist_text(rlist));
            }
            if let Ok(adj) = ext.special_field(SpecialField::StackAdj, opcode, meta) {
                parts.push((adj as i64).to_string());
            }
        }
        DasmStyle::Bare => {}
    }
    if masked {
        parts.push("v0.t".to_owned());
    }

    if parts.is_empty() {
        mnemonic.to_owned()
    } else {
        format!("{mnemonic} {}", parts.join(", "))
    }
}

/// Second registers of a pair are implied by the first and never printed.
const fn is_companion(field: OperandFieldId) -> bool {
    matches!(field, OperandFieldId::Rd2 | OperandFieldId::Rs2Pair)
}

/// Formats the immediate according to its sign semantics.
fn immediate_text<E: Extractor + ?Sized>(ext: &E, opcode: Opcode) -> Option<String> {
    match ext.immediate_type() {
        ImmediateType::None => None,
        ImmediateType::Signed => Some(ext.signed_offset(opcode).to_string()),
        ImmediateType::Unsigned => Some(ext.immediate(opcode).to_string()),
    }
}

/// `offset(base)`; a missing base prints as `x0`.
fn address(offset: &str, base: Option<&OperandElement>) -> String {
    match base {
        Some(b) => format!("{offset}({b})"),
        None => format!("{offset}(x0)"),
    }
}

/// Renders a fence ordering set as `iorw` letters.
fn fence_set(set: u64) -> String {
    let letters: String = [(8, 'i'), (4, 'o'), (2, 'r'), (1, 'w')]
        .iter()
        .filter(|(bit, _)| set & bit != 0)
        .map(|(_, c)| *c)
        .collect();
    if letters.is_empty() {
        "0".to_owned()
    } else {
        letters
    }
}

/// Renders a Zcmp register list encoding as `{ra, s0-sN}`.
fn rlist_text(rlist: u64) -> String {
    match rlist {
        4 => "{ra}".to_owned(),
        5 => "{ra, s0}".to_owned(),
        6..=14 => format!("{{ra, s0-s{}}}", rlist - 5),
        15 => "{ra, s0-s11}".to_owned(),
        _ => "{}".to_owned(),
    }
}
