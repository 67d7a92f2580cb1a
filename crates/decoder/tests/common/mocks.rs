use std::fmt;
use std::sync::Arc;

use mockall::mock;
use rvdecode_core::isa::metadata::{InstMetadata, InstTypeSet, InstructionType, MetadataRef};
use rvdecode_core::isa::operand::{OperandFieldId, OperandType};

mock! {
    pub Metadata {}
    impl InstMetadata for Metadata {
        fn operand_type(&self, field: OperandFieldId) -> OperandType;
        fn inst_types(&self) -> InstTypeSet;
        fn is_inst_type(&self, ty: InstructionType) -> bool;
    }
}

impl fmt::Debug for MockMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockMetadata").finish_non_exhaustive()
    }
}

/// Metadata declaring every operand as `ty` and the instruction as `types`.
pub fn uniform_metadata(ty: OperandType, types: &'static [InstructionType]) -> MockMetadata {
    let set = InstTypeSet::of(types);
    let mut mock = MockMetadata::new();
    let _ = mock.expect_operand_type().returning(move |_| ty);
    let _ = mock.expect_inst_types().returning(move || set);
    let _ = mock
        .expect_is_inst_type()
        .returning(move |t| set.contains(t));
    mock
}

/// Shares a configured mock as a metadata handle.
pub fn shared(mock: MockMetadata) -> MetadataRef {
    Arc::new(mock)
}
