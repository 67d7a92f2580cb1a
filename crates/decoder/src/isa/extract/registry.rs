//! Tag to factory registry.
//!
//! Every extractor variant is registered under its tag. The decode-table
//! builder creates one canonical instance per tag and specializes it per leaf
//! through [`Extractor::special_case_clone`].

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use super::base::{
    AmoType, BType, CsrType, CsriType, FenceType, IType, IshType, IshwType, JType, PrefetchType,
    R4Type, RType, SType, UType,
};
use super::compressed::{
    CaType, CbType, CbiAndi, CbiType, CiAddi, CiAddi16sp, CiAddiw, CiFldsp, CiFlwsp, CiLdsp,
    CiLdspPair, CiLi, CiLui, CiLwsp, CiNop, CiSlli, CiType, CiwAddi4spn, CiwType, CjJal, CjType,
    ClLd, ClLdPair, ClType, ClbType, ClhType, CrAdd, CrJalr, CrJr, CrMv, CrType, CsSd, CsSdPair,
    CsType, CsbType, CshType, CssSdsp, CssSdspPair, CssSwsp, CssType, CuType,
};
use super::derived::{
    AmoPair, IArith, ICbo, IJalr, ILoad, ILoadPair, IRet, ISystem, RArith, SStorePair,
};
use super::vector::{
    VAccumulate, VImm, VImmUnsigned, VMemStore, VMemType, VType, VsetivliType, VsetvliType,
};
use super::zcmp::{CmMva01s, CmPop, CmPopret, CmPopretz, CmPush, CmmvType, CmppType};
use super::{Extractor, ExtractorRef};
use crate::common::error::BuildError;
use crate::isa::form::FixedFields;

/// Builds an extractor specialized to a fixed-field context.
pub type Factory = fn(FixedFields) -> ExtractorRef;

fn make<E: Extractor + 'static>(ext: E) -> ExtractorRef {
    Arc::new(ext)
}

const FACTORIES: &[(&str, Factory)] = &[
    // 32-bit bases
    ("R", |f| make(RType::new(f))),
    ("R4", |f| make(R4Type::new(f))),
    ("I", |f| make(IType::new(f))),
    ("ISH", |f| make(IshType::new(f))),
    ("ISHW", |f| make(IshwType::new(f))),
    ("S", |f| make(SType::new(f))),
    ("B", |f| make(BType::new(f))),
    ("U", |f| make(UType::new(f))),
    ("J", |f| make(JType::new(f))),
    ("AMO", |f| make(AmoType::new(f))),
    ("CSR", |f| make(CsrType::new(f))),
    ("CSRI", |f| make(CsriType::new(f))),
    ("FENCE", |f| make(FenceType::new(f))),
    ("PF", |f| make(PrefetchType::new(f))),
    // 32-bit derived
    ("I_arith", |f| make(IArith::new(f))),
    ("R_arith", |f| make(RArith::new(f))),
    ("I_load", |f| make(ILoad::new(f))),
    ("I_load_pair", |f| make(ILoadPair::new(f))),
    ("I_jalr", |f| make(IJalr::new(f))),
    ("I_ret", |f| make(IRet::new(f))),
    ("I_cbo", |f| make(ICbo::new(f))),
    ("I_system", |f| make(ISystem::new(f))),
    ("S_store_pair", |f| make(SStorePair::new(f))),
    ("AMO_pair", |f| make(AmoPair::new(f))),
    // compressed
    ("CR", |f| make(CrType::new(f))),
    ("CR_add", |f| make(CrAdd::new(f))),
    ("CR_mv", |f| make(CrMv::new(f))),
    ("CR_jr", |f| make(CrJr::new(f))),
    ("CR_jalr", |f| make(CrJalr::new(f))),
    ("CI", |f| make(CiType::new(f))),
    ("CI_addi", |f| make(CiAddi::new(f))),
    ("CI_nop", |f| make(CiNop::new(f))),
    ("CI_li", |f| make(CiLi::new(f))),
    ("CI_lui", |f| make(CiLui::new(f))),
    ("CI_addi16sp", |f| make(CiAddi16sp::new(f))),
    ("CI_slli", |f| make(CiSlli::new(f))),
    ("CI_addiw", |f| make(CiAddiw::new(f))),
    ("CI_lwsp", |f| make(CiLwsp::new(f))),
    ("CI_ldsp", |f| make(CiLdsp::new(f))),
    ("CI_flwsp", |f| make(CiFlwsp::new(f))),
    ("CI_fldsp", |f| make(CiFldsp::new(f))),
    ("CI_ldsp_pair", |f| make(CiLdspPair::new(f))),
    ("CSS", |f| make(CssType::new(f))),
    ("CSS_swsp", |f| make(CssSwsp::new(f))),
    ("CSS_sdsp", |f| make(CssSdsp::new(f))),
    ("CSS_sdsp_pair", |f| make(CssSdspPair::new(f))),
    ("CIW", |f| make(CiwType::new(f))),
    ("CIW_addi4spn", |f| make(CiwAddi4spn::new(f))),
    ("CL", |f| make(ClType::new(f))),
    ("CL_ld", |f| make(ClLd::new(f))),
    ("CL_ld_pair", |f| make(ClLdPair::new(f))),
    ("CS", |f| make(CsType::new(f))),
    ("CS_sd", |f| make(CsSd::new(f))),
    ("CS_sd_pair", |f| make(CsSdPair::new(f))),
    ("CA", |f| make(CaType::new(f))),
    ("CB", |f| make(CbType::new(f))),
    ("CBI", |f| make(CbiType::new(f))),
    ("CBI_andi", |f| make(CbiAndi::new(f))),
    ("CJ", |f| make(CjType::new(f))),
    ("CJ_jal", |f| make(CjJal::new(f))),
    ("CU", |f| make(CuType::new(f))),
    ("CLB", |f| make(ClbType::new(f))),
    ("CLH", |f| make(ClhType::new(f))),
    ("CSB", |f| make(CsbType::new(f))),
    ("CSH", |f| make(CshType::new(f))),
    // Zcmp
    ("CMPP", |f| make(CmppType::new(f))),
    ("CM_pop", |f| make(CmPop::new(f, 64))),
    ("CM_pop.rv32", |f| make(CmPop::new(f, 32))),
    ("CM_push", |f| make(CmPush::new(f, 64))),
    ("CM_push.rv32", |f| make(CmPush::new(f, 32))),
    ("CM_popret", |f| make(CmPopret::new(f, 64))),
    ("CM_popret.rv32", |f| make(CmPopret::new(f, 32))),
    ("CM_popretz", |f| make(CmPopretz::new(f, 64))),
    ("CM_popretz.rv32", |f| make(CmPopretz::new(f, 32))),
    ("CMMV", |f| make(CmmvType::new(f))),
    ("CM_mva01s", |f| make(CmMva01s::new(f))),
    // vector
    ("V", |f| make(VType::new(f))),
    ("V_vi", |f| make(VImm::new(f))),
    ("V_viu", |f| make(VImmUnsigned::new(f))),
    ("V_vd_src", |f| make(VAccumulate::new(f))),
    ("VF_MEM", |f| make(VMemType::new(f))),
    ("VF_mem_store", |f| make(VMemStore::new(f))),
    ("VSETVLI", |f| make(VsetvliType::new(f))),
    ("VSETIVLI", |f| make(VsetivliType::new(f))),
];

static REGISTRY: LazyLock<HashMap<&'static str, Factory>> =
    LazyLock::new(|| FACTORIES.iter().copied().collect());

/// Factory registered under `tag`.
pub fn lookup(tag: &str) -> Option<Factory> {
    REGISTRY.get(tag).copied()
}

/// Every registered tag, in registration order.
pub fn tags() -> impl Iterator<Item = &'static str> {
    FACTORIES.iter().map(|(tag, _)| *tag)
}

/// Creates the variant registered under `tag`, specialized to `fixed`.
///
/// # Errors
///
/// [`BuildError::UnknownExtractor`] if no variant is registered under `tag`.
pub fn create(tag: &str, fixed: FixedFields) -> Result<ExtractorRef, BuildError> {
    lookup(tag)
        .map(|factory| factory(fixed))
        .ok_or_else(|| BuildError::UnknownExtractor(tag.to_owned()))
}
