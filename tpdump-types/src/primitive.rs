//! A single trigger primitive and its subsystem-specific detail.

use crate::{
    CscData, CscDetId, DtChamberId, DtData, GemData, GemDetId, Me0Data, RpcData, RpcDetId,
    SubsystemKind,
};

/// The subsystem-specific part of a trigger primitive.
///
/// Each variant carries exactly the identifier and payload shapes of its
/// subsystem, so [`Primitive::kind`] can never disagree with them.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Csc { id: CscDetId, data: CscData },
    Rpc { id: RpcDetId, data: RpcData },
    Irpc { id: RpcDetId, data: RpcData },
    Gem { id: GemDetId, data: GemData },
    Me0 { id: GemDetId, data: Me0Data },
    Dt { id: DtChamberId, data: DtData },
}

impl Primitive {
    /// The subsystem this primitive came from.
    pub fn kind(&self) -> SubsystemKind {
        match self {
            Primitive::Csc { .. } => SubsystemKind::Csc,
            Primitive::Rpc { .. } => SubsystemKind::Rpc,
            Primitive::Irpc { .. } => SubsystemKind::Irpc,
            Primitive::Gem { .. } => SubsystemKind::Gem,
            Primitive::Me0 { .. } => SubsystemKind::Me0,
            Primitive::Dt { .. } => SubsystemKind::Dt,
        }
    }
}

/// One trigger primitive: common timing and position plus its detail.
///
/// Records are immutable once built. `wire` only carries information for
/// CSC primitives and is 0 for every other subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveRecord {
    bx: i32,
    strip: i32,
    wire: i32,
    detail: Primitive,
}

impl PrimitiveRecord {
    pub fn new(bx: i32, strip: i32, wire: i32, detail: Primitive) -> Self {
        Self {
            bx,
            strip,
            wire,
            detail,
        }
    }

    pub fn kind(&self) -> SubsystemKind {
        self.detail.kind()
    }

    /// Bunch crossing relative to the triggering one.
    pub fn bx(&self) -> i32 {
        self.bx
    }

    pub fn strip(&self) -> i32 {
        self.strip
    }

    pub fn wire(&self) -> i32 {
        self.wire
    }

    pub fn detail(&self) -> &Primitive {
        &self.detail
    }

    pub fn csc(&self) -> Option<(&CscDetId, &CscData)> {
        match &self.detail {
            Primitive::Csc { id, data } => Some((id, data)),
            _ => None,
        }
    }

    /// RPC view of the record. Answers for both RPC and iRPC primitives.
    pub fn rpc(&self) -> Option<(&RpcDetId, &RpcData)> {
        match &self.detail {
            Primitive::Rpc { id, data } | Primitive::Irpc { id, data } => Some((id, data)),
            _ => None,
        }
    }

    pub fn gem(&self) -> Option<(&GemDetId, &GemData)> {
        match &self.detail {
            Primitive::Gem { id, data } => Some((id, data)),
            _ => None,
        }
    }

    pub fn me0(&self) -> Option<(&GemDetId, &Me0Data)> {
        match &self.detail {
            Primitive::Me0 { id, data } => Some((id, data)),
            _ => None,
        }
    }

    pub fn dt(&self) -> Option<(&DtChamberId, &DtData)> {
        match &self.detail {
            Primitive::Dt { id, data } => Some((id, data)),
            _ => None,
        }
    }
}
