//! F extension: single-precision floating point.
//!
//! The encoding helpers are shared with the D extension; the two differ only
//! in the `fmt` bits of `funct7`/`funct2`, the load/store width and the
//! operand type.

use super::opcode::{LOAD_FP, MADD, MSUB, NMADD, NMSUB, OP_FP, STORE_FP};
use super::{InstDef, enc, enc7};
use crate::config::Extension as X;
use crate::isa::metadata::{InstructionType as T, MetaSpec};
use crate::isa::operand::OperandFieldId as Role;
use crate::isa::operand::OperandType;

/// Format-dependent encoding parameters.
#[derive(Clone, Copy, Debug)]
pub(super) struct Precision {
    fmt: u64,
    width: u64,
    ty: OperandType,
    ext: X,
}

pub(super) const SINGLE: Precision = Precision {
    fmt: 0b00,
    width: 2,
    ty: OperandType::Single,
    ext: X::F,
};

pub(super) const DOUBLE: Precision = Precision {
    fmt: 0b01,
    width: 3,
    ty: OperandType::Double,
    ext: X::D,
};

const INT_BASE: &[(Role, OperandType)] = &[(Role::Rs1, OperandType::Long)];
const INT_DEST: &[(Role, OperandType)] = &[(Role::Rd, OperandType::Long)];

impl Precision {
    const fn meta(self, types: &[T]) -> MetaSpec {
        MetaSpec::uniform(types, self.ty)
    }

    const fn funct7(self, funct5: u64) -> u64 {
        (funct5 << 2) | self.fmt
    }

    pub(super) const fn load(self, mnemonic: &'static str) -> InstDef {
        let meta = self.meta(&[T::Float, T::Load]).with(INT_BASE);
        InstDef::new(mnemonic, "I", enc(LOAD_FP, self.width), meta, self.ext).via("I_load")
    }

    pub(super) const fn store(self, mnemonic: &'static str) -> InstDef {
        let meta = self.meta(&[T::Float, T::Store]).with(INT_BASE);
        InstDef::new(mnemonic, "S", enc(STORE_FP, self.width), meta, self.ext)
    }

    pub(super) const fn fused(self, mnemonic: &'static str, major: u64) -> InstDef {
        let meta = self.meta(&[T::Float, T::Mac]);
        InstDef::new(mnemonic, "R4", (self.fmt << 25) | major, meta, self.ext)
    }

    /// `funct3` carries a rounding mode and stays free.
    pub(super) const fn rounded(
        self,
        mnemonic: &'static str,
        funct5: u64,
        meta: MetaSpec,
    ) -> InstDef {
        InstDef::new(mnemonic, "R", enc7(OP_FP, 0, self.funct7(funct5)), meta, self.ext)
            .ignoring(&["funct3"])
    }

    /// Rounded single-source operation selected by `rs2`.
    pub(super) const fn rounded_unary(
        self,
        mnemonic: &'static str,
        funct5: u64,
        rs2: u64,
        meta: MetaSpec,
    ) -> InstDef {
        InstDef::new(
            mnemonic,
            "R",
            (rs2 << 20) | enc7(OP_FP, 0, self.funct7(funct5)),
            meta,
            self.ext,
        )
        .ignoring(&["funct3"])
        .pinning(&["rs2"])
    }

    pub(super) const fn exact(
        self,
        mnemonic: &'static str,
        funct5: u64,
        funct3: u64,
        meta: MetaSpec,
    ) -> InstDef {
        InstDef::new(mnemonic, "R", enc7(OP_FP, funct3, self.funct7(funct5)), meta, self.ext)
    }

    pub(super) const fn exact_unary(
        self,
        mnemonic: &'static str,
        funct5: u64,
        funct3: u64,
        meta: MetaSpec,
    ) -> InstDef {
        self.exact(mnemonic, funct5, funct3, meta).pinning(&["rs2"])
    }

    pub(super) const fn arith(self) -> MetaSpec {
        self.meta(&[T::Float, T::Arith])
    }

    pub(super) const fn int_dest(self) -> MetaSpec {
        self.meta(&[T::Float, T::Convert]).with(INT_DEST)
    }

    pub(super) const fn int_src(self) -> MetaSpec {
        self.meta(&[T::Float, T::Convert]).with(INT_BASE)
    }

    pub(super) const fn compare(self) -> MetaSpec {
        self.meta(&[T::Float, T::Compare]).with(INT_DEST)
    }
}

/// `funct5` values of the OP-FP group.
pub(super) mod funct5 {
    pub const ADD: u64 = 0x00;
    pub const SUB: u64 = 0x01;
    pub const MUL: u64 = 0x02;
    pub const DIV: u64 = 0x03;
    pub const SGNJ: u64 = 0x04;
    pub const MINMAX: u64 = 0x05;
    pub const CVT_FP: u64 = 0x08;
    pub const SQRT: u64 = 0x0B;
    pub const CMP: u64 = 0x14;
    pub const CVT_TO_INT: u64 = 0x18;
    pub const CVT_FROM_INT: u64 = 0x1A;
    pub const MV_TO_INT: u64 = 0x1C;
    pub const MV_FROM_INT: u64 = 0x1E;
}

const S: Precision = SINGLE;

/// Single-precision instructions.
pub const INSTRUCTIONS: &[InstDef] = &[
    S.load("flw"),
    S.store("fsw"),
    S.fused("fmadd.s", MADD),
    S.fused("fmsub.s", MSUB),
    S.fused("fnmsub.s", NMSUB),
    S.fused("fnmadd.s", NMADD),
    S.rounded("fadd.s", funct5::ADD, S.arith()),
    S.rounded("fsub.s", funct5::SUB, S.arith()),
    S.rounded("fmul.s", funct5::MUL, S.meta(&[T::Float, T::Multiply])),
    S.rounded("fdiv.s", funct5::DIV, S.meta(&[T::Float, T::Divide])),
    S.rounded_unary("fsqrt.s", funct5::SQRT, 0, S.meta(&[T::Float, T::Sqrt])),
    S.exact("fsgnj.s", funct5::SGNJ, 0, S.meta(&[T::Float, T::Move])),
    S.exact("fsgnjn.s", funct5::SGNJ, 1, S.meta(&[T::Float, T::Move])),
    S.exact("fsgnjx.s", funct5::SGNJ, 2, S.meta(&[T::Float, T::Move])),
    S.exact("fmin.s", funct5::MINMAX, 0, S.arith()),
    S.exact("fmax.s", funct5::MINMAX, 1, S.arith()),
    S.rounded_unary("fcvt.w.s", funct5::CVT_TO_INT, 0, S.int_dest()),
    S.rounded_unary("fcvt.wu.s", funct5::CVT_TO_INT, 1, S.int_dest()),
    S.rounded_unary("fcvt.l.s", funct5::CVT_TO_INT, 2, S.int_dest()).rv64(),
    S.rounded_unary("fcvt.lu.s", funct5::CVT_TO_INT, 3, S.int_dest()).rv64(),
    S.exact_unary(
        "fmv.x.w",
        funct5::MV_TO_INT,
        0,
        S.meta(&[T::Float, T::Move]).with(INT_DEST),
    ),
    S.exact_unary(
        "fclass.s",
        funct5::MV_TO_INT,
        1,
        S.meta(&[T::Float, T::Classify]).with(INT_DEST),
    ),
    S.exact("feq.s", funct5::CMP, 2, S.compare()),
    S.exact("flt.s", funct5::CMP, 1, S.compare()),
    S.exact("fle.s", funct5::CMP, 0, S.compare()),
    S.rounded_unary("fcvt.s.w", funct5::CVT_FROM_INT, 0, S.int_src()),
    S.rounded_unary("fcvt.s.wu", funct5::CVT_FROM_INT, 1, S.int_src()),
    S.rounded_unary("fcvt.s.l", funct5::CVT_FROM_INT, 2, S.int_src()).rv64(),
    S.rounded_unary("fcvt.s.lu", funct5::CVT_FROM_INT, 3, S.int_src()).rv64(),
    S.exact_unary(
        "fmv.w.x",
        funct5::MV_FROM_INT,
        0,
        S.meta(&[T::Float, T::Move]).with(INT_BASE),
    ),
];
