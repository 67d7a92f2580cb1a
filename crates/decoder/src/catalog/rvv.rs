//! V extension subset: configuration, common integer, float and mask
//! arithmetic, scalar moves and the load/store addressing modes.

use super::InstDef;
use super::opcode::{LOAD_FP, OP_V, STORE_FP};
use crate::config::Extension as X;
use crate::isa::metadata::{InstructionType as T, MetaSpec};
use crate::isa::operand::OperandFieldId as Role;
use crate::isa::operand::OperandType;

const VSET: MetaSpec = MetaSpec::int(&[T::Vector, T::VSet]);

const VV: MetaSpec = MetaSpec::uniform(&[T::Vector, T::Arith, T::Maskable], OperandType::Vector);
const VX: MetaSpec = VV.with(SCALAR_RS1);
const VCMP: MetaSpec =
    MetaSpec::uniform(&[T::Vector, T::Compare, T::Maskable], OperandType::Vector);
const VCMPX: MetaSpec = VCMP.with(SCALAR_RS1);
const VMUL: MetaSpec =
    MetaSpec::uniform(&[T::Vector, T::Multiply, T::Maskable], OperandType::Vector);
const VMULX: MetaSpec = VMUL.with(SCALAR_RS1);
const VMAC: MetaSpec = MetaSpec::uniform(&[T::Vector, T::Mac, T::Maskable], OperandType::Vector);
const VMACX: MetaSpec = VMAC.with(SCALAR_RS1);
const VMASK: MetaSpec = MetaSpec::uniform(&[T::Vector, T::Mask], OperandType::Vector);

const VF: MetaSpec = MetaSpec::uniform(
    &[T::Vector, T::Float, T::Arith, T::Maskable],
    OperandType::Vector,
);
const VFF: MetaSpec = VF.with(FLOAT_RS1);
const VFMUL: MetaSpec = MetaSpec::uniform(
    &[T::Vector, T::Float, T::Multiply, T::Maskable],
    OperandType::Vector,
);
const VFMULF: MetaSpec = VFMUL.with(FLOAT_RS1);
const VFMAC: MetaSpec = MetaSpec::uniform(
    &[T::Vector, T::Float, T::Mac, T::Maskable],
    OperandType::Vector,
);
const VFMACF: MetaSpec = VFMAC.with(FLOAT_RS1);

const VMOVE: MetaSpec = MetaSpec::uniform(&[T::Vector, T::Move], OperandType::Vector);
const VMOVEX: MetaSpec = VMOVE.with(SCALAR_RS1);
const VMOVE_TO_X: MetaSpec = VMOVE.with(&[(Role::Rd, OperandType::Long)]);

const SCALAR_RS1: &[(Role, OperandType)] = &[(Role::Rs1, OperandType::Long)];
const FLOAT_RS1: &[(Role, OperandType)] = &[(Role::Rs1, OperandType::Single)];
const STRIDED_BASE: &[(Role, OperandType)] = &[
    (Role::Rs1, OperandType::Long),
    (Role::Rs2, OperandType::Long),
];

const fn mem(types: &[T], operands: &'static [(Role, OperandType)]) -> MetaSpec {
    MetaSpec::uniform(types, OperandType::Vector).with(operands)
}

const UNIT_LOAD: MetaSpec = mem(&[T::Vector, T::Load, T::UnitStride, T::Maskable], SCALAR_RS1);
const UNIT_STORE: MetaSpec = mem(&[T::Vector, T::Store, T::UnitStride, T::Maskable], SCALAR_RS1);
const STRIDE_LOAD: MetaSpec = mem(&[T::Vector, T::Load, T::Stride, T::Maskable], STRIDED_BASE);
const STRIDE_STORE: MetaSpec = mem(&[T::Vector, T::Store, T::Stride, T::Maskable], STRIDED_BASE);
const INDEX_LOAD: MetaSpec = mem(&[T::Vector, T::Load, T::Indexed, T::Maskable], SCALAR_RS1);
const INDEX_STORE: MetaSpec = mem(&[T::Vector, T::Store, T::Indexed, T::Maskable], SCALAR_RS1);
const WHOLE_LOAD: MetaSpec = mem(&[T::Vector, T::Load, T::Whole], SCALAR_RS1);
const WHOLE_STORE: MetaSpec = mem(&[T::Vector, T::Store, T::Whole], SCALAR_RS1);
const MASK_LOAD: MetaSpec = mem(&[T::Vector, T::Load, T::Mask], SCALAR_RS1);
const MASK_STORE: MetaSpec = mem(&[T::Vector, T::Store, T::Mask], SCALAR_RS1);

/// `funct3` operand categories.
mod cat {
    pub const OPIVV: u64 = 0;
    pub const OPFVV: u64 = 1;
    pub const OPMVV: u64 = 2;
    pub const OPIVI: u64 = 3;
    pub const OPIVX: u64 = 4;
    pub const OPFVF: u64 = 5;
    pub const OPMVX: u64 = 6;
}

/// `vm` set: unmasked.
const UNMASKED: u64 = 1 << 25;

const fn arith(mnemonic: &'static str, funct6: u64, funct3: u64, meta: MetaSpec) -> InstDef {
    InstDef::new(mnemonic, "V", (funct6 << 26) | (funct3 << 12) | OP_V, meta, X::V)
}

const fn vv(mnemonic: &'static str, funct6: u64, meta: MetaSpec) -> InstDef {
    arith(mnemonic, funct6, cat::OPIVV, meta)
}

const fn vx(mnemonic: &'static str, funct6: u64, meta: MetaSpec) -> InstDef {
    arith(mnemonic, funct6, cat::OPIVX, meta)
}

const fn vi(mnemonic: &'static str, funct6: u64, meta: MetaSpec) -> InstDef {
    arith(mnemonic, funct6, cat::OPIVI, meta).via("V_vi")
}

const fn viu(mnemonic: &'static str, funct6: u64, meta: MetaSpec) -> InstDef {
    arith(mnemonic, funct6, cat::OPIVI, meta).via("V_viu")
}

/// Unmasked mask-register logical operation.
const fn mm(mnemonic: &'static str, funct6: u64) -> InstDef {
    InstDef::new(
        mnemonic,
        "V",
        UNMASKED | (funct6 << 26) | (cat::OPMVV << 12) | OP_V,
        VMASK,
        X::V,
    )
    .pinning(&["vm"])
}

/// Addressing modes in `mop`.
mod mop {
    pub const UNIT: u64 = 0b00;
    pub const INDEXED_UNORDERED: u64 = 0b01;
    pub const STRIDED: u64 = 0b10;
    pub const INDEXED_ORDERED: u64 = 0b11;
}

/// `lumop`/`sumop` values in the `rs2` field.
mod umop {
    pub const WHOLE: u64 = 0b01000;
    pub const MASK: u64 = 0b01011;
}

const fn vmem(major: u64, mode: u64, width: u64) -> u64 {
    (mode << 26) | (width << 12) | major
}

const fn load(mnemonic: &'static str, mode: u64, width: u64, meta: MetaSpec) -> InstDef {
    let def = InstDef::new(mnemonic, "VF_MEM", vmem(LOAD_FP, mode, width), meta, X::V);
    if mode == mop::UNIT {
        def.pinning(&["rs2", "nf"])
    } else {
        def.pinning(&["nf"])
    }
}

const fn store(mnemonic: &'static str, mode: u64, width: u64, meta: MetaSpec) -> InstDef {
    let def = InstDef::new(mnemonic, "VF_MEM", vmem(STORE_FP, mode, width), meta, X::V)
        .via("VF_mem_store");
    if mode == mop::UNIT {
        def.pinning(&["rs2", "nf"])
    } else {
        def.pinning(&["nf"])
    }
}

/// Unit-stride access with a fixed `umop`, always unmasked.
const fn special_unit(mut def: InstDef, umop: u64) -> InstDef {
    def.stencil |= UNMASKED | (umop << 20);
    def.pinning(&["rs2", "nf", "vm"])
}

/// Move with `vm` pinned to 1 and one source field unused.
const fn unmasked(mut def: InstDef) -> InstDef {
    def.stencil |= UNMASKED;
    def
}

/// Vector instructions.
pub const INSTRUCTIONS: &[InstDef] = &[
    // Configuration
    InstDef::new("vsetvli", "VSETVLI", (7 << 12) | OP_V, VSET, X::V),
    InstDef::new("vsetivli", "VSETIVLI", (0b11 << 30) | (7 << 12) | OP_V, VSET, X::V),
    InstDef::new("vsetvl", "R", (0b100_0000 << 25) | (7 << 12) | OP_V, VSET, X::V),
    // Integer arithmetic
    vv("vadd.vv", 0b00_0000, VV),
    vx("vadd.vx", 0b00_0000, VX),
    vi("vadd.vi", 0b00_0000, VV),
    vv("vsub.vv", 0b00_0010, VV),
    vx("vsub.vx", 0b00_0010, VX),
    vx("vrsub.vx", 0b00_0011, VX),
    vi("vrsub.vi", 0b00_0011, VV),
    vv("vminu.vv", 0b00_0100, VV),
    vx("vminu.vx", 0b00_0100, VX),
    vv("vmin.vv", 0b00_0101, VV),
    vx("vmin.vx", 0b00_0101, VX),
    vv("vmaxu.vv", 0b00_0110, VV),
    vx("vmaxu.vx", 0b00_0110, VX),
    vv("vmax.vv", 0b00_0111, VV),
    vx("vmax.vx", 0b00_0111, VX),
    vv("vand.vv", 0b00_1001, VV),
    vx("vand.vx", 0b00_1001, VX),
    vi("vand.vi", 0b00_1001, VV),
    vv("vor.vv", 0b00_1010, VV),
    vx("vor.vx", 0b00_1010, VX),
    vi("vor.vi", 0b00_1010, VV),
    vv("vxor.vv", 0b00_1011, VV),
    vx("vxor.vx", 0b00_1011, VX),
    vi("vxor.vi", 0b00_1011, VV),
    vv("vmseq.vv", 0b01_1000, VCMP),
    vx("vmseq.vx", 0b01_1000, VCMPX),
    vi("vmseq.vi", 0b01_1000, VCMP),
    vv("vmsne.vv", 0b01_1001, VCMP),
    vx("vmsne.vx", 0b01_1001, VCMPX),
    vi("vmsne.vi", 0b01_1001, VCMP),
    vv("vsll.vv", 0b10_0101, VV),
    vx("vsll.vx", 0b10_0101, VX),
    viu("vsll.vi", 0b10_0101, VV),
    vv("vsrl.vv", 0b10_1000, VV),
    vx("vsrl.vx", 0b10_1000, VX),
    viu("vsrl.vi", 0b10_1000, VV),
    vv("vsra.vv", 0b10_1001, VV),
    vx("vsra.vx", 0b10_1001, VX),
    viu("vsra.vi", 0b10_1001, VV),
    // Multiply, multiply-accumulate and reductions
    arith("vmul.vv", 0b10_0101, cat::OPMVV, VMUL),
    arith("vmul.vx", 0b10_0101, cat::OPMVX, VMULX),
    arith("vmacc.vv", 0b10_1101, cat::OPMVV, VMAC).via("V_vd_src"),
    arith("vmacc.vx", 0b10_1101, cat::OPMVX, VMACX).via("V_vd_src"),
    arith("vredsum.vs", 0b00_0000, cat::OPMVV, VV),
    mm("vmand.mm", 0b01_1001),
    mm("vmor.mm", 0b01_1010),
    mm("vmxor.mm", 0b01_1011),
    // Floating point
    arith("vfadd.vv", 0b00_0000, cat::OPFVV, VF),
    arith("vfadd.vf", 0b00_0000, cat::OPFVF, VFF),
    arith("vfmul.vv", 0b10_0100, cat::OPFVV, VFMUL),
    arith("vfmul.vf", 0b10_0100, cat::OPFVF, VFMULF),
    arith("vfmacc.vv", 0b10_1100, cat::OPFVV, VFMAC).via("V_vd_src"),
    arith("vfmacc.vf", 0b10_1100, cat::OPFVF, VFMACF).via("V_vd_src"),
    // Moves
    unmasked(arith("vmv.v.v", 0b01_0111, cat::OPIVV, VMOVE)).pinning(&["vm", "rs2"]),
    unmasked(arith("vmv.v.x", 0b01_0111, cat::OPIVX, VMOVEX)).pinning(&["vm", "rs2"]),
    unmasked(arith("vmv.v.i", 0b01_0111, cat::OPIVI, VMOVE).via("V_vi")).pinning(&["vm", "rs2"]),
    unmasked(arith("vmv.x.s", 0b01_0000, cat::OPMVV, VMOVE_TO_X)).pinning(&["vm", "rs1"]),
    unmasked(arith("vmv.s.x", 0b01_0000, cat::OPMVX, VMOVEX)).pinning(&["vm", "rs2"]),
    // Loads
    load("vle8.v", mop::UNIT, 0, UNIT_LOAD),
    load("vle16.v", mop::UNIT, 5, UNIT_LOAD),
    load("vle32.v", mop::UNIT, 6, UNIT_LOAD),
    load("vle64.v", mop::UNIT, 7, UNIT_LOAD),
    load("vlse8.v", mop::STRIDED, 0, STRIDE_LOAD),
    load("vlse16.v", mop::STRIDED, 5, STRIDE_LOAD),
    load("vlse32.v", mop::STRIDED, 6, STRIDE_LOAD),
    load("vlse64.v", mop::STRIDED, 7, STRIDE_LOAD),
    load("vluxei8.v", mop::INDEXED_UNORDERED, 0, INDEX_LOAD),
    load("vluxei16.v", mop::INDEXED_UNORDERED, 5, INDEX_LOAD),
    load("vluxei32.v", mop::INDEXED_UNORDERED, 6, INDEX_LOAD),
    load("vluxei64.v", mop::INDEXED_UNORDERED, 7, INDEX_LOAD),
    load("vloxei8.v", mop::INDEXED_ORDERED, 0, INDEX_LOAD),
    load("vloxei16.v", mop::INDEXED_ORDERED, 5, INDEX_LOAD),
    load("vloxei32.v", mop::INDEXED_ORDERED, 6, INDEX_LOAD),
    load("vloxei64.v", mop::INDEXED_ORDERED, 7, INDEX_LOAD),
    special_unit(load("vl1re8.v", mop::UNIT, 0, WHOLE_LOAD), umop::WHOLE),
    special_unit(load("vl1re16.v", mop::UNIT, 5, WHOLE_LOAD), umop::WHOLE),
    special_unit(load("vl1re32.v", mop::UNIT, 6, WHOLE_LOAD), umop::WHOLE),
    special_unit(load("vl1re64.v", mop::UNIT, 7, WHOLE_LOAD), umop::WHOLE),
    special_unit(load("vlm.v", mop::UNIT, 0, MASK_LOAD), umop::MASK),
    // Stores
    store("vse8.v", mop::UNIT, 0, UNIT_STORE),
    store("vse16.v", mop::UNIT, 5, UNIT_STORE),
    store("vse32.v", mop::UNIT, 6, UNIT_STORE),
    store("vse64.v", mop::UNIT, 7, UNIT_STORE),
    store("vsse8.v", mop::STRIDED, 0, STRIDE_STORE),
    store("vsse16.v", mop::STRIDED, 5, STRIDE_STORE),
    store("vsse32.v", mop::STRIDED, 6, STRIDE_STORE),
    store("vsse64.v", mop::STRIDED, 7, STRIDE_STORE),
    store("vsuxei8.v", mop::INDEXED_UNORDERED, 0, INDEX_STORE),
    store("vsuxei16.v", mop::INDEXED_UNORDERED, 5, INDEX_STORE),
    store("vsuxei32.v", mop::INDEXED_UNORDERED, 6, INDEX_STORE),
    store("vsuxei64.v", mop::INDEXED_UNORDERED, 7, INDEX_STORE),
    store("vsoxei8.v", mop::INDEXED_ORDERED, 0, INDEX_STORE),
    store("vsoxei16.v", mop::INDEXED_ORDERED, 5, INDEX_STORE),
    store("vsoxei32.v", mop::INDEXED_ORDERED, 6, INDEX_STORE),
    store("vsoxei64.v", mop::INDEXED_ORDERED, 7, INDEX_STORE),
    special_unit(store("vs1r.v", mop::UNIT, 0, WHOLE_STORE), umop::WHOLE),
    special_unit(store("vsm.v", mop::UNIT, 0, MASK_STORE), umop::MASK),
];
