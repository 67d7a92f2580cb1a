//! 32-bit base encoding forms.
//!
//! Field lists are ordered from the most significant field down to the major
//! opcode. Every form pins `opcode` and, where present, `funct3`/`funct7`
//! style selector fields as its identifying fields.

use super::Form;
use crate::common::constants::STANDARD_WIDTH;
use crate::isa::field::Field;

const OPCODE: Field = Field::new("opcode", 0, 7);
const RD: Field = Field::new("rd", 7, 5);
const FUNCT3: Field = Field::new("funct3", 12, 3);
const RS1: Field = Field::new("rs1", 15, 5);
const RS2: Field = Field::new("rs2", 20, 5);

/// Field indices of [`R`].
pub mod r {
    /// `funct7[31:25]`
    pub const FUNCT7: usize = 0;
    /// `rs2[24:20]`
    pub const RS2: usize = 1;
    /// `rs1[19:15]`
    pub const RS1: usize = 2;
    /// `funct3[14:12]` (rounding mode for floating-point operations)
    pub const FUNCT3: usize = 3;
    /// `rd[11:7]`
    pub const RD: usize = 4;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 5;
}

const R_FIELDS: &[Field] = &[Field::new("funct7", 25, 7), RS2, RS1, FUNCT3, RD, OPCODE];

/// Register-register form.
pub static R: Form = Form::new("R", STANDARD_WIDTH, R_FIELDS, &[r::FUNCT7, r::FUNCT3, r::OPCODE]);

/// Field indices of [`R4`].
pub mod r4 {
    /// `rs3[31:27]`
    pub const RS3: usize = 0;
    /// `funct2[26:25]` (format)
    pub const FUNCT2: usize = 1;
    /// `rs2[24:20]`
    pub const RS2: usize = 2;
    /// `rs1[19:15]`
    pub const RS1: usize = 3;
    /// `funct3[14:12]` (rounding mode)
    pub const FUNCT3: usize = 4;
    /// `rd[11:7]`
    pub const RD: usize = 5;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 6;
}

const R4_FIELDS: &[Field] = &[
    Field::new("rs3", 27, 5),
    Field::new("funct2", 25, 2),
    RS2,
    RS1,
    FUNCT3,
    RD,
    OPCODE,
];

/// Fused multiply-add form; the rounding mode is not an identifying field.
pub static R4: Form = Form::new("R4", STANDARD_WIDTH, R4_FIELDS, &[r4::FUNCT2, r4::OPCODE]);

/// Field indices of [`I`].
pub mod i {
    /// `imm[31:20]`
    pub const IMM: usize = 0;
    /// `rs1[19:15]`
    pub const RS1: usize = 1;
    /// `funct3[14:12]`
    pub const FUNCT3: usize = 2;
    /// `rd[11:7]`
    pub const RD: usize = 3;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 4;
}

const I_FIELDS: &[Field] = &[Field::new("imm", 20, 12), RS1, FUNCT3, RD, OPCODE];

/// Register-immediate form.
pub static I: Form = Form::new("I", STANDARD_WIDTH, I_FIELDS, &[i::FUNCT3, i::OPCODE]);

/// Field indices of [`ISH`].
pub mod ish {
    /// `funct6[31:26]`
    pub const FUNCT6: usize = 0;
    /// `shamt[25:20]`
    pub const SHAMT: usize = 1;
    /// `rs1[19:15]`
    pub const RS1: usize = 2;
    /// `funct3[14:12]`
    pub const FUNCT3: usize = 3;
    /// `rd[11:7]`
    pub const RD: usize = 4;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 5;
}

const ISH_FIELDS: &[Field] = &[
    Field::new("funct6", 26, 6),
    Field::new("shamt", 20, 6),
    RS1,
    FUNCT3,
    RD,
    OPCODE,
];

/// Shift-immediate form with a 6-bit shift amount (RV64).
pub static ISH: Form = Form::new(
    "ISH",
    STANDARD_WIDTH,
    ISH_FIELDS,
    &[ish::FUNCT6, ish::FUNCT3, ish::OPCODE],
);

/// Field indices of [`ISHW`].
pub mod ishw {
    /// `funct7[31:25]`
    pub const FUNCT7: usize = 0;
    /// `shamt[24:20]`
    pub const SHAMT: usize = 1;
    /// `rs1[19:15]`
    pub const RS1: usize = 2;
    /// `funct3[14:12]`
    pub const FUNCT3: usize = 3;
    /// `rd[11:7]`
    pub const RD: usize = 4;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 5;
}

const ISHW_FIELDS: &[Field] = &[
    Field::new("funct7", 25, 7),
    Field::new("shamt", 20, 5),
    RS1,
    FUNCT3,
    RD,
    OPCODE,
];

/// Shift-immediate form with a 5-bit shift amount (RV32 and `*w` shifts).
pub static ISHW: Form = Form::new(
    "ISHW",
    STANDARD_WIDTH,
    ISHW_FIELDS,
    &[ishw::FUNCT7, ishw::FUNCT3, ishw::OPCODE],
);

/// Field indices of [`S`] and [`B`].
pub mod s {
    /// `imm7[31:25]`
    pub const IMM7: usize = 0;
    /// `rs2[24:20]`
    pub const RS2: usize = 1;
    /// `rs1[19:15]`
    pub const RS1: usize = 2;
    /// `funct3[14:12]`
    pub const FUNCT3: usize = 3;
    /// `imm5[11:7]`
    pub const IMM5: usize = 4;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 5;
}

const S_FIELDS: &[Field] = &[
    Field::new("imm7", 25, 7),
    RS2,
    RS1,
    FUNCT3,
    Field::new("imm5", 7, 5),
    OPCODE,
];

/// Store form.
pub static S: Form = Form::new("S", STANDARD_WIDTH, S_FIELDS, &[s::FUNCT3, s::OPCODE]);

/// Conditional branch form (same layout as [`S`], scrambled immediate).
pub static B: Form = Form::new("B", STANDARD_WIDTH, S_FIELDS, &[s::FUNCT3, s::OPCODE]);

/// Field indices of [`U`] and [`J`].
pub mod u {
    /// `imm20[31:12]`
    pub const IMM20: usize = 0;
    /// `rd[11:7]`
    pub const RD: usize = 1;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 2;
}

const U_FIELDS: &[Field] = &[Field::new("imm20", 12, 20), RD, OPCODE];

/// Upper-immediate form.
pub static U: Form = Form::new("U", STANDARD_WIDTH, U_FIELDS, &[u::OPCODE]);

/// Jump form (same layout as [`U`], scrambled immediate).
pub static J: Form = Form::new("J", STANDARD_WIDTH, U_FIELDS, &[u::OPCODE]);

/// Field indices of [`AMO`].
pub mod amo {
    /// `funct5[31:27]`
    pub const FUNCT5: usize = 0;
    /// `aq[26]`
    pub const AQ: usize = 1;
    /// `rl[25]`
    pub const RL: usize = 2;
    /// `rs2[24:20]`
    pub const RS2: usize = 3;
    /// `rs1[19:15]`
    pub const RS1: usize = 4;
    /// `funct3[14:12]`
    pub const FUNCT3: usize = 5;
    /// `rd[11:7]`
    pub const RD: usize = 6;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 7;
}

const AMO_FIELDS: &[Field] = &[
    Field::new("funct5", 27, 5),
    Field::new("aq", 26, 1),
    Field::new("rl", 25, 1),
    RS2,
    RS1,
    FUNCT3,
    RD,
    OPCODE,
];

/// Atomic memory operation form.
pub static AMO: Form = Form::new(
    "AMO",
    STANDARD_WIDTH,
    AMO_FIELDS,
    &[amo::FUNCT5, amo::FUNCT3, amo::OPCODE],
);

/// Field indices of [`CSR`] and [`CSRI`].
pub mod csr {
    /// `csr[31:20]`
    pub const CSR: usize = 0;
    /// `rs1[19:15]` (`uimm` for [`super::CSRI`])
    pub const RS1: usize = 1;
    /// `funct3[14:12]`
    pub const FUNCT3: usize = 2;
    /// `rd[11:7]`
    pub const RD: usize = 3;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 4;
}

const CSR_FIELDS: &[Field] = &[Field::new("csr", 20, 12), RS1, FUNCT3, RD, OPCODE];
const CSRI_FIELDS: &[Field] = &[
    Field::new("csr", 20, 12),
    Field::new("uimm", 15, 5),
    FUNCT3,
    RD,
    OPCODE,
];

/// CSR access with a register source.
pub static CSR: Form = Form::new("CSR", STANDARD_WIDTH, CSR_FIELDS, &[csr::FUNCT3, csr::OPCODE]);

/// CSR access with a 5-bit immediate source.
pub static CSRI: Form = Form::new("CSRI", STANDARD_WIDTH, CSRI_FIELDS, &[csr::FUNCT3, csr::OPCODE]);

/// Field indices of [`FENCE`].
pub mod fence {
    /// `fm[31:28]`
    pub const FM: usize = 0;
    /// `pred[27:24]`
    pub const PRED: usize = 1;
    /// `succ[23:20]`
    pub const SUCC: usize = 2;
    /// `rs1[19:15]`
    pub const RS1: usize = 3;
    /// `funct3[14:12]`
    pub const FUNCT3: usize = 4;
    /// `rd[11:7]`
    pub const RD: usize = 5;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 6;
}

const FENCE_FIELDS: &[Field] = &[
    Field::new("fm", 28, 4),
    Field::new("pred", 24, 4),
    Field::new("succ", 20, 4),
    RS1,
    FUNCT3,
    RD,
    OPCODE,
];

/// Memory ordering fence form.
pub static FENCE: Form = Form::new(
    "FENCE",
    STANDARD_WIDTH,
    FENCE_FIELDS,
    &[fence::FUNCT3, fence::OPCODE],
);

/// Field indices of [`PF`].
pub mod pf {
    /// `imm7[31:25]` (offset bits 11:5)
    pub const IMM7: usize = 0;
    /// `sel[24:20]` (prefetch kind)
    pub const SEL: usize = 1;
    /// `rs1[19:15]`
    pub const RS1: usize = 2;
    /// `funct3[14:12]`
    pub const FUNCT3: usize = 3;
    /// `rd[11:7]`
    pub const RD: usize = 4;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 5;
}

const PF_FIELDS: &[Field] = &[
    Field::new("imm7", 25, 7),
    Field::new("sel", 20, 5),
    RS1,
    FUNCT3,
    RD,
    OPCODE,
];

/// Cache-block prefetch form (`ori` encoding with `rd = x0`).
pub static PF: Form = Form::new(
    "PF",
    STANDARD_WIDTH,
    PF_FIELDS,
    &[pf::SEL, pf::FUNCT3, pf::RD, pf::OPCODE],
);
