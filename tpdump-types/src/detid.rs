//! Chamber identifiers, one shape per subsystem.

/// Identifies a CSC chamber in trigger numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CscDetId {
    /// 1 = positive endcap, 2 = negative endcap.
    pub endcap: i32,
    /// Trigger sector, 1..=6.
    pub sector: i32,
    pub station: i32,
    pub ring: i32,
    pub chamber: i32,
}

/// Identifies an RPC roll. Shared by RPC and iRPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RpcDetId {
    /// -1 = negative endcap, 0 = barrel, 1 = positive endcap.
    pub region: i32,
    pub sector: i32,
    pub station: i32,
    pub ring: i32,
    pub subsector: i32,
    pub roll: i32,
}

impl RpcDetId {
    /// Region in CSC endcap numbering: the negative endcap becomes 2.
    pub fn endcap(&self) -> i32 {
        if self.region == -1 {
            2
        } else {
            self.region
        }
    }

    /// Whether this roll sits in an improved-RPC chamber (RE3/1 or RE4/1).
    pub fn is_irpc(&self) -> bool {
        self.region != 0 && (self.station == 3 || self.station == 4) && self.ring == 1
    }
}

/// Identifies a GEM eta partition on one layer. Shared by GEM and ME0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GemDetId {
    /// -1 or 1.
    pub region: i32,
    pub station: i32,
    pub ring: i32,
    pub chamber: i32,
    pub roll: i32,
    pub layer: i32,
}

/// Identifies a DT chamber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DtChamberId {
    /// -2..=2.
    pub wheel: i32,
    pub sector: i32,
    pub station: i32,
}
