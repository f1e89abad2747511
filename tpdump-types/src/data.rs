//! Measured quantities, one shape per subsystem.

/// Payload of a CSC local charged track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CscData {
    /// Chamber index local to the trigger sector.
    pub csc_id: i32,
    pub bend: i32,
    pub quality: i32,
    pub pattern: i32,
}

/// Payload of an RPC cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RpcData {
    pub strip_low: i32,
    pub strip_hi: i32,
    pub time: i32,
    pub valid: bool,
}

/// Payload of a GEM pad cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GemData {
    pub pad_low: i32,
    pub pad_hi: i32,
}

/// Payload of an ME0 segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Me0Data {
    pub phi_position: i32,
    pub delta_phi: i32,
    pub bend: i32,
    pub quality: i32,
    pub partition: i32,
}

/// Payload of a DT track segment.
///
/// The phi view is always present. The theta fields are filled only when
/// the theta view of the same chamber fired in the same bunch crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DtData {
    pub bti_group: i32,
    pub bending_angle: i32,
    pub quality_code: i32,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub theta_bti_group: Option<i32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub theta_quality: Option<i32>,
}
