//! The closed set of muon subsystems.

use core::fmt;

/// A muon detector technology contributing trigger primitives.
///
/// Variants are declared in processing order: collections are filled and
/// reports are printed in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SubsystemKind {
    /// Cathode strip chambers.
    Csc,
    /// Resistive plate chambers.
    Rpc,
    /// Improved RPCs in the high-eta stations RE3/1 and RE4/1.
    Irpc,
    /// Gas electron multipliers.
    Gem,
    /// The ME0 GEM station in front of ME1/1.
    Me0,
    /// Drift tubes in the barrel.
    Dt,
}

impl SubsystemKind {
    /// Every kind, in declaration order.
    pub const ALL: [SubsystemKind; 6] = [
        SubsystemKind::Csc,
        SubsystemKind::Rpc,
        SubsystemKind::Irpc,
        SubsystemKind::Gem,
        SubsystemKind::Me0,
        SubsystemKind::Dt,
    ];

    /// Label used at the start of every diagnostic line for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            SubsystemKind::Csc => "LCT",
            SubsystemKind::Rpc => "RPC",
            SubsystemKind::Irpc => "iRPC",
            SubsystemKind::Gem => "GEM",
            SubsystemKind::Me0 => "ME0",
            SubsystemKind::Dt => "DT",
        }
    }

    /// Stable lowercase name, used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            SubsystemKind::Csc => "csc",
            SubsystemKind::Rpc => "rpc",
            SubsystemKind::Irpc => "irpc",
            SubsystemKind::Gem => "gem",
            SubsystemKind::Me0 => "me0",
            SubsystemKind::Dt => "dt",
        }
    }
}

impl fmt::Display for SubsystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_declaration_order() {
        let mut sorted = SubsystemKind::ALL;
        sorted.sort();
        assert_eq!(sorted, SubsystemKind::ALL);
    }

    #[test]
    fn labels_and_names() {
        assert_eq!(SubsystemKind::Csc.label(), "LCT");
        assert_eq!(SubsystemKind::Irpc.label(), "iRPC");
        assert_eq!(SubsystemKind::Me0.to_string(), "me0");
    }
}
