//! D extension: double-precision floating point.

use super::InstDef;
use super::f::{DOUBLE as D, SINGLE, funct5};
use super::opcode::{MADD, MSUB, NMADD, NMSUB};
use crate::config::Extension as X;
use crate::isa::metadata::{InstructionType as T, MetaSpec};
use crate::isa::operand::OperandFieldId as Role;
use crate::isa::operand::OperandType;

const NARROW: MetaSpec = MetaSpec::uniform(&[T::Float, T::Convert], OperandType::Single)
    .with(&[(Role::Rs1, OperandType::Double)]);
const WIDEN: MetaSpec = MetaSpec::uniform(&[T::Float, T::Convert], OperandType::Double)
    .with(&[(Role::Rs1, OperandType::Single)]);
const TO_INT: MetaSpec = MetaSpec::uniform(&[T::Float, T::Move], OperandType::Double)
    .with(&[(Role::Rd, OperandType::Long)]);
const FROM_INT: MetaSpec = MetaSpec::uniform(&[T::Float, T::Move], OperandType::Double)
    .with(&[(Role::Rs1, OperandType::Long)]);
const CLASSIFY: MetaSpec = MetaSpec::uniform(&[T::Float, T::Classify], OperandType::Double)
    .with(&[(Role::Rd, OperandType::Long)]);
const MOVE: MetaSpec = MetaSpec::uniform(&[T::Float, T::Move], OperandType::Double);

/// Double-precision instructions.
pub const INSTRUCTIONS: &[InstDef] = &[
    D.load("fld"),
    D.store("fsd"),
    D.fused("fmadd.d", MADD),
    D.fused("fmsub.d", MSUB),
    D.fused("fnmsub.d", NMSUB),
    D.fused("fnmadd.d", NMADD),
    D.rounded("fadd.d", funct5::ADD, D.arith()),
    D.rounded("fsub.d", funct5::SUB, D.arith()),
    D.rounded(
        "fmul.d",
        funct5::MUL,
        MetaSpec::uniform(&[T::Float, T::Multiply], OperandType::Double),
    ),
    D.rounded(
        "fdiv.d",
        funct5::DIV,
        MetaSpec::uniform(&[T::Float, T::Divide], OperandType::Double),
    ),
    D.rounded_unary(
        "fsqrt.d",
        funct5::SQRT,
        0,
        MetaSpec::uniform(&[T::Float, T::Sqrt], OperandType::Double),
    ),
    D.exact("fsgnj.d", funct5::SGNJ, 0, MOVE),
    D.exact("fsgnjn.d", funct5::SGNJ, 1, MOVE),
    D.exact("fsgnjx.d", funct5::SGNJ, 2, MOVE),
    D.exact("fmin.d", funct5::MINMAX, 0, D.arith()),
    D.exact("fmax.d", funct5::MINMAX, 1, D.arith()),
    // fcvt.s.d sits in the single-precision fmt with rs2 naming the source format.
    SINGLE.rounded_unary("fcvt.s.d", funct5::CVT_FP, 1, NARROW).also(X::D),
    D.rounded_unary("fcvt.d.s", funct5::CVT_FP, 0, WIDEN),
    D.rounded_unary("fcvt.w.d", funct5::CVT_TO_INT, 0, D.int_dest()),
    D.rounded_unary("fcvt.wu.d", funct5::CVT_TO_INT, 1, D.int_dest()),
    D.rounded_unary("fcvt.l.d", funct5::CVT_TO_INT, 2, D.int_dest()).rv64(),
    D.rounded_unary("fcvt.lu.d", funct5::CVT_TO_INT, 3, D.int_dest()).rv64(),
    D.exact_unary("fmv.x.d", funct5::MV_TO_INT, 0, TO_INT).rv64(),
    D.exact_unary("fclass.d", funct5::MV_TO_INT, 1, CLASSIFY),
    D.exact("feq.d", funct5::CMP, 2, D.compare()),
    D.exact("flt.d", funct5::CMP, 1, D.compare()),
    D.exact("fle.d", funct5::CMP, 0, D.compare()),
    D.rounded_unary("fcvt.d.w", funct5::CVT_FROM_INT, 0, D.int_src()),
    D.rounded_unary("fcvt.d.wu", funct5::CVT_FROM_INT, 1, D.int_src()),
    D.rounded_unary("fcvt.d.l", funct5::CVT_FROM_INT, 2, D.int_src()).rv64(),
    D.rounded_unary("fcvt.d.lu", funct5::CVT_FROM_INT, 3, D.int_src()).rv64(),
    D.exact_unary("fmv.d.x", funct5::MV_FROM_INT, 0, FROM_INT).rv64(),
];
