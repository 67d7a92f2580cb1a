//! Vector extension encoding forms.

use super::Form;
use crate::common::constants::STANDARD_WIDTH;
use crate::isa::field::Field;

const OPCODE: Field = Field::new("opcode", 0, 7);
const RD: Field = Field::new("rd", 7, 5);
const FUNCT3: Field = Field::new("funct3", 12, 3);
const RS1: Field = Field::new("rs1", 15, 5);

/// Field indices of [`V`].
pub mod v {
    /// `funct6[31:26]`
    pub const FUNCT6: usize = 0;
    /// `vm[25]`
    pub const VM: usize = 1;
    /// `rs2[24:20]` (`vs2`)
    pub const RS2: usize = 2;
    /// `rs1[19:15]` (`vs1`, `rs1` or `simm5`)
    pub const RS1: usize = 3;
    /// `funct3[14:12]`
    pub const FUNCT3: usize = 4;
    /// `rd[11:7]` (`vd`)
    pub const RD: usize = 5;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 6;
}

const V_FIELDS: &[Field] = &[
    Field::new("funct6", 26, 6),
    Field::new("vm", 25, 1),
    Field::new("rs2", 20, 5),
    RS1,
    FUNCT3,
    RD,
    OPCODE,
];

/// Vector arithmetic form (OPIVV/OPFVV/OPMVV/OPIVI/OPIVX/OPFVF/OPMVX).
pub static V: Form = Form::new("V", STANDARD_WIDTH, V_FIELDS, &[v::FUNCT6, v::FUNCT3, v::OPCODE]);

/// Field indices of [`VF_MEM`].
pub mod vmem {
    /// `nf[31:29]`
    pub const NF: usize = 0;
    /// `mew[28]`
    pub const MEW: usize = 1;
    /// `mop[27:26]`
    pub const MOP: usize = 2;
    /// `vm[25]`
    pub const VM: usize = 3;
    /// `rs2[24:20]` (`lumop`/`sumop`, stride `rs2` or index `vs2`)
    pub const RS2: usize = 4;
    /// `rs1[19:15]` (base address)
    pub const RS1: usize = 5;
    /// `width[14:12]`
    pub const WIDTH: usize = 6;
    /// `rd[11:7]` (`vd` or `vs3`)
    pub const RD: usize = 7;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 8;
}

const VF_MEM_FIELDS: &[Field] = &[
    Field::new("nf", 29, 3),
    Field::new("mew", 28, 1),
    Field::new("mop", 26, 2),
    Field::new("vm", 25, 1),
    Field::new("rs2", 20, 5),
    RS1,
    Field::new("width", 12, 3),
    RD,
    OPCODE,
];

/// Vector load/store form.
pub static VF_MEM: Form = Form::new(
    "VF_MEM",
    STANDARD_WIDTH,
    VF_MEM_FIELDS,
    &[vmem::MEW, vmem::MOP, vmem::WIDTH, vmem::OPCODE],
);

/// Field indices of [`VSETVLI`].
pub mod vsetvli {
    /// `bit31[31]` (zero)
    pub const BIT31: usize = 0;
    /// `zimm11[30:20]` (vtype)
    pub const ZIMM11: usize = 1;
    /// `rs1[19:15]` (AVL register)
    pub const RS1: usize = 2;
    /// `funct3[14:12]`
    pub const FUNCT3: usize = 3;
    /// `rd[11:7]`
    pub const RD: usize = 4;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 5;
}

const VSETVLI_FIELDS: &[Field] = &[
    Field::new("bit31", 31, 1),
    Field::new("zimm11", 20, 11),
    RS1,
    FUNCT3,
    RD,
    OPCODE,
];

/// `vsetvli` form.
pub static VSETVLI: Form = Form::new(
    "VSETVLI",
    STANDARD_WIDTH,
    VSETVLI_FIELDS,
    &[vsetvli::BIT31, vsetvli::FUNCT3, vsetvli::OPCODE],
);

/// Field indices of [`VSETIVLI`].
pub mod vsetivli {
    /// `top2[31:30]` (`0b11`)
    pub const TOP2: usize = 0;
    /// `zimm10[29:20]` (vtype)
    pub const ZIMM10: usize = 1;
    /// `uimm[19:15]` (AVL)
    pub const UIMM: usize = 2;
    /// `funct3[14:12]`
    pub const FUNCT3: usize = 3;
    /// `rd[11:7]`
    pub const RD: usize = 4;
    /// `opcode[6:0]`
    pub const OPCODE: usize = 5;
}

const VSETIVLI_FIELDS: &[Field] = &[
    Field::new("top2", 30, 2),
    Field::new("zimm10", 20, 10),
    Field::new("uimm", 15, 5),
    FUNCT3,
    RD,
    OPCODE,
];

/// `vsetivli` form.
pub static VSETIVLI: Form = Form::new(
    "VSETIVLI",
    STANDARD_WIDTH,
    VSETIVLI_FIELDS,
    &[vsetivli::TOP2, vsetivli::FUNCT3, vsetivli::OPCODE],
);
