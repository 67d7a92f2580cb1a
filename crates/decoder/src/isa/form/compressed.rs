//! 16-bit compressed encoding forms (C, Zcb, Zcmp).
//!
//! Three-bit register fields (`rs1_p`, `rd_p`, ...) name `x8`..`x15`; the
//! extractors add the base index.

use super::Form;
use crate::common::constants::COMPRESSED_WIDTH;
use crate::isa::field::Field;

const OP: Field = Field::new("op", 0, 2);
const FUNCT3: Field = Field::new("funct3", 13, 3);
const FUNCT6: Field = Field::new("funct6", 10, 6);

/// Field indices of [`CR`].
pub mod cr {
    /// `funct4[15:12]`
    pub const FUNCT4: usize = 0;
    /// `rd_rs1[11:7]`
    pub const RD_RS1: usize = 1;
    /// `rs2[6:2]`
    pub const RS2: usize = 2;
    /// `op[1:0]`
    pub const OP: usize = 3;
}

const CR_FIELDS: &[Field] = &[
    Field::new("funct4", 12, 4),
    Field::new("rd_rs1", 7, 5),
    Field::new("rs2", 2, 5),
    OP,
];

/// Compressed register form.
pub static CR: Form = Form::new("CR", COMPRESSED_WIDTH, CR_FIELDS, &[cr::FUNCT4, cr::OP]);

/// Field indices of [`CI`].
pub mod ci {
    /// `funct3[15:13]`
    pub const FUNCT3: usize = 0;
    /// `imm1[12]`
    pub const IMM1: usize = 1;
    /// `rd_rs1[11:7]`
    pub const RD_RS1: usize = 2;
    /// `imm5[6:2]`
    pub const IMM5: usize = 3;
    /// `op[1:0]`
    pub const OP: usize = 4;
}

const CI_FIELDS: &[Field] = &[
    FUNCT3,
    Field::new("imm1", 12, 1),
    Field::new("rd_rs1", 7, 5),
    Field::new("imm5", 2, 5),
    OP,
];

/// Compressed immediate form.
pub static CI: Form = Form::new("CI", COMPRESSED_WIDTH, CI_FIELDS, &[ci::FUNCT3, ci::OP]);

/// Field indices of [`CSS`].
pub mod css {
    /// `funct3[15:13]`
    pub const FUNCT3: usize = 0;
    /// `imm6[12:7]`
    pub const IMM6: usize = 1;
    /// `rs2[6:2]`
    pub const RS2: usize = 2;
    /// `op[1:0]`
    pub const OP: usize = 3;
}

const CSS_FIELDS: &[Field] = &[FUNCT3, Field::new("imm6", 7, 6), Field::new("rs2", 2, 5), OP];

/// Compressed stack-relative store form.
pub static CSS: Form = Form::new("CSS", COMPRESSED_WIDTH, CSS_FIELDS, &[css::FUNCT3, css::OP]);

/// Field indices of [`CIW`].
pub mod ciw {
    /// `funct3[15:13]`
    pub const FUNCT3: usize = 0;
    /// `imm8[12:5]`
    pub const IMM8: usize = 1;
    /// `rd_p[4:2]`
    pub const RD_P: usize = 2;
    /// `op[1:0]`
    pub const OP: usize = 3;
}

const CIW_FIELDS: &[Field] = &[FUNCT3, Field::new("imm8", 5, 8), Field::new("rd_p", 2, 3), OP];

/// Compressed wide-immediate form.
pub static CIW: Form = Form::new("CIW", COMPRESSED_WIDTH, CIW_FIELDS, &[ciw::FUNCT3, ciw::OP]);

/// Field indices of [`CL`] and [`CS`].
pub mod cl {
    /// `funct3[15:13]`
    pub const FUNCT3: usize = 0;
    /// `imm3[12:10]`
    pub const IMM3: usize = 1;
    /// `rs1_p[9:7]`
    pub const RS1_P: usize = 2;
    /// `imm2[6:5]`
    pub const IMM2: usize = 3;
    /// `rd_p[4:2]` (`rs2_p` for [`super::CS`])
    pub const RD_P: usize = 4;
    /// `op[1:0]`
    pub const OP: usize = 5;
}

const CL_FIELDS: &[Field] = &[
    FUNCT3,
    Field::new("imm3", 10, 3),
    Field::new("rs1_p", 7, 3),
    Field::new("imm2", 5, 2),
    Field::new("rd_p", 2, 3),
    OP,
];

const CS_FIELDS: &[Field] = &[
    FUNCT3,
    Field::new("imm3", 10, 3),
    Field::new("rs1_p", 7, 3),
    Field::new("imm2", 5, 2),
    Field::new("rs2_p", 2, 3),
    OP,
];

/// Compressed load form.
pub static CL: Form = Form::new("CL", COMPRESSED_WIDTH, CL_FIELDS, &[cl::FUNCT3, cl::OP]);

/// Compressed store form.
pub static CS: Form = Form::new("CS", COMPRESSED_WIDTH, CS_FIELDS, &[cl::FUNCT3, cl::OP]);

/// Field indices of [`CA`].
pub mod ca {
    /// `funct6[15:10]`
    pub const FUNCT6: usize = 0;
    /// `rd_rs1_p[9:7]`
    pub const RD_RS1_P: usize = 1;
    /// `funct2[6:5]`
    pub const FUNCT2: usize = 2;
    /// `rs2_p[4:2]`
    pub const RS2_P: usize = 3;
    /// `op[1:0]`
    pub const OP: usize = 4;
}

const CA_FIELDS: &[Field] = &[
    FUNCT6,
    Field::new("rd_rs1_p", 7, 3),
    Field::new("funct2", 5, 2),
    Field::new("rs2_p", 2, 3),
    OP,
];

/// Compressed arithmetic form.
pub static CA: Form = Form::new(
    "CA",
    COMPRESSED_WIDTH,
    CA_FIELDS,
    &[ca::FUNCT6, ca::FUNCT2, ca::OP],
);

/// Field indices of [`CB`].
pub mod cb {
    /// `funct3[15:13]`
    pub const FUNCT3: usize = 0;
    /// `imm3[12:10]`
    pub const IMM3: usize = 1;
    /// `rs1_p[9:7]`
    pub const RS1_P: usize = 2;
    /// `imm5[6:2]`
    pub const IMM5: usize = 3;
    /// `op[1:0]`
    pub const OP: usize = 4;
}

const CB_FIELDS: &[Field] = &[
    FUNCT3,
    Field::new("imm3", 10, 3),
    Field::new("rs1_p", 7, 3),
    Field::new("imm5", 2, 5),
    OP,
];

/// Compressed branch form.
pub static CB: Form = Form::new("CB", COMPRESSED_WIDTH, CB_FIELDS, &[cb::FUNCT3, cb::OP]);

/// Field indices of [`CBI`].
pub mod cbi {
    /// `funct3[15:13]`
    pub const FUNCT3: usize = 0;
    /// `imm1[12]`
    pub const IMM1: usize = 1;
    /// `funct2[11:10]`
    pub const FUNCT2: usize = 2;
    /// `rd_rs1_p[9:7]`
    pub const RD_RS1_P: usize = 3;
    /// `imm5[6:2]`
    pub const IMM5: usize = 4;
    /// `op[1:0]`
    pub const OP: usize = 5;
}

const CBI_FIELDS: &[Field] = &[
    FUNCT3,
    Field::new("imm1", 12, 1),
    Field::new("funct2", 10, 2),
    Field::new("rd_rs1_p", 7, 3),
    Field::new("imm5", 2, 5),
    OP,
];

/// Compressed register-immediate ALU form (`c.srli`, `c.srai`, `c.andi`).
pub static CBI: Form = Form::new(
    "CBI",
    COMPRESSED_WIDTH,
    CBI_FIELDS,
    &[cbi::FUNCT3, cbi::FUNCT2, cbi::OP],
);

/// Field indices of [`CJ`].
pub mod cj {
    /// `funct3[15:13]`
    pub const FUNCT3: usize = 0;
    /// `imm11[12:2]`
    pub const IMM11: usize = 1;
    /// `op[1:0]`
    pub const OP: usize = 2;
}

const CJ_FIELDS: &[Field] = &[FUNCT3, Field::new("imm11", 2, 11), OP];

/// Compressed jump form.
pub static CJ: Form = Form::new("CJ", COMPRESSED_WIDTH, CJ_FIELDS, &[cj::FUNCT3, cj::OP]);

/// Field indices of [`CU`].
pub mod cu {
    /// `funct6[15:10]`
    pub const FUNCT6: usize = 0;
    /// `rd_rs1_p[9:7]`
    pub const RD_RS1_P: usize = 1;
    /// `funct5[6:2]`
    pub const FUNCT5: usize = 2;
    /// `op[1:0]`
    pub const OP: usize = 3;
}

const CU_FIELDS: &[Field] = &[
    FUNCT6,
    Field::new("rd_rs1_p", 7, 3),
    Field::new("funct5", 2, 5),
    OP,
];

/// Compressed unary form (`c.zext.b`, `c.not`, ...).
pub static CU: Form = Form::new(
    "CU",
    COMPRESSED_WIDTH,
    CU_FIELDS,
    &[cu::FUNCT6, cu::FUNCT5, cu::OP],
);

/// Field indices of [`CLB`] and [`CSB`].
pub mod clb {
    /// `funct6[15:10]`
    pub const FUNCT6: usize = 0;
    /// `rs1_p[9:7]`
    pub const RS1_P: usize = 1;
    /// `uimm2[6:5]`
    pub const UIMM2: usize = 2;
    /// `rd_p[4:2]` (`rs2_p` for [`super::CSB`])
    pub const RD_P: usize = 3;
    /// `op[1:0]`
    pub const OP: usize = 4;
}

const CLB_FIELDS: &[Field] = &[
    FUNCT6,
    Field::new("rs1_p", 7, 3),
    Field::new("uimm2", 5, 2),
    Field::new("rd_p", 2, 3),
    OP,
];

const CSB_FIELDS: &[Field] = &[
    FUNCT6,
    Field::new("rs1_p", 7, 3),
    Field::new("uimm2", 5, 2),
    Field::new("rs2_p", 2, 3),
    OP,
];

/// Compressed byte load (`c.lbu`).
pub static CLB: Form = Form::new("CLB", COMPRESSED_WIDTH, CLB_FIELDS, &[clb::FUNCT6, clb::OP]);

/// Compressed byte store (`c.sb`).
pub static CSB: Form = Form::new("CSB", COMPRESSED_WIDTH, CSB_FIELDS, &[clb::FUNCT6, clb::OP]);

/// Field indices of [`CLH`] and [`CSH`].
pub mod clh {
    /// `funct6[15:10]`
    pub const FUNCT6: usize = 0;
    /// `rs1_p[9:7]`
    pub const RS1_P: usize = 1;
    /// `funct1[6]`
    pub const FUNCT1: usize = 2;
    /// `uimm1[5]`
    pub const UIMM1: usize = 3;
    /// `rd_p[4:2]` (`rs2_p` for [`super::CSH`])
    pub const RD_P: usize = 4;
    /// `op[1:0]`
    pub const OP: usize = 5;
}

const CLH_FIELDS: &[Field] = &[
    FUNCT6,
    Field::new("rs1_p", 7, 3),
    Field::new("funct1", 6, 1),
    Field::new("uimm1", 5, 1),
    Field::new("rd_p", 2, 3),
    OP,
];

const CSH_FIELDS: &[Field] = &[
    FUNCT6,
    Field::new("rs1_p", 7, 3),
    Field::new("funct1", 6, 1),
    Field::new("uimm1", 5, 1),
    Field::new("rs2_p", 2, 3),
    OP,
];

/// Compressed halfword load (`c.lhu`, `c.lh`).
pub static CLH: Form = Form::new(
    "CLH",
    COMPRESSED_WIDTH,
    CLH_FIELDS,
    &[clh::FUNCT6, clh::FUNCT1, clh::OP],
);

/// Compressed halfword store (`c.sh`).
pub static CSH: Form = Form::new(
    "CSH",
    COMPRESSED_WIDTH,
    CSH_FIELDS,
    &[clh::FUNCT6, clh::FUNCT1, clh::OP],
);

/// Field indices of [`CMPP`].
pub mod cmpp {
    /// `funct3[15:13]`
    pub const FUNCT3: usize = 0;
    /// `funct5[12:8]`
    pub const FUNCT5: usize = 1;
    /// `rlist[7:4]`
    pub const RLIST: usize = 2;
    /// `spimm[3:2]`
    pub const SPIMM: usize = 3;
    /// `op[1:0]`
    pub const OP: usize = 4;
}

const CMPP_FIELDS: &[Field] = &[
    FUNCT3,
    Field::new("funct5", 8, 5),
    Field::new("rlist", 4, 4),
    Field::new("spimm", 2, 2),
    OP,
];

/// Zcmp push/pop form.
pub static CMPP: Form = Form::new(
    "CMPP",
    COMPRESSED_WIDTH,
    CMPP_FIELDS,
    &[cmpp::FUNCT3, cmpp::FUNCT5, cmpp::OP],
);

/// Field indices of [`CMMV`].
pub mod cmmv {
    /// `funct6[15:10]`
    pub const FUNCT6: usize = 0;
    /// `r1s[9:7]`
    pub const R1S: usize = 1;
    /// `funct2[6:5]`
    pub const FUNCT2: usize = 2;
    /// `r2s[4:2]`
    pub const R2S: usize = 3;
    /// `op[1:0]`
    pub const OP: usize = 4;
}

const CMMV_FIELDS: &[Field] = &[
    FUNCT6,
    Field::new("r1s", 7, 3),
    Field::new("funct2", 5, 2),
    Field::new("r2s", 2, 3),
    OP,
];

/// Zcmp paired-move form (`cm.mvsa01`, `cm.mva01s`).
pub static CMMV: Form = Form::new(
    "CMMV",
    COMPRESSED_WIDTH,
    CMMV_FIELDS,
    &[cmmv::FUNCT6, cmmv::FUNCT2, cmmv::OP],
);
