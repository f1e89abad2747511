//! Configuration: input locators, subsystem activation and render style.
//!
//! Settings are layered the same way for every run:
//!
//! 1. built-in defaults (see [`PARAMETERS`]),
//! 2. an optional TOML file,
//! 3. environment variables prefixed with `TPDUMP_` (e.g. `TPDUMP_USERPC=true`).
//!
//! Everything is resolved once at setup. Nothing here changes between events.
//!
//! ```toml
//! CSCInput = "simCscTriggerPrimitiveDigis:MPCSORTED"
//! useCSC = true
//! useRPC = true
//! rpcRegionStyle = "region"
//! ```

use std::path::Path;

use config::{Config, Environment, File, Source};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tpdump_adapters::{Collector, Locator, LocatorError, SetupError, SubsystemKind};

use crate::render::{RegionStyle, RenderOptions};

/// Errors raised while loading or resolving settings. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid {option}: {source}")]
    Locator {
        option: &'static str,
        #[source]
        source: LocatorError,
    },

    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// A documented configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    pub default: &'static str,
    pub comment: &'static str,
}

const DEFAULT_CSC_INPUT: &str = "simCscTriggerPrimitiveDigis:MPCSORTED";
const DEFAULT_RPC_INPUT: &str = "simMuonRPCDigis";
const DEFAULT_GEM_INPUT: &str = "simMuonGEMPadDigiClusters";
const DEFAULT_ME0_INPUT: &str = "me0TriggerConvertedPseudoDigis";
const DEFAULT_DT_PHI_INPUT: &str = "simDtTriggerPrimitiveDigis";
const DEFAULT_DT_THETA_INPUT: &str = "simDtTriggerPrimitiveDigis:theta";

/// Every option with its default and a short explanation.
pub const PARAMETERS: &[Parameter] = &[
    Parameter {
        name: "CSCInput",
        default: DEFAULT_CSC_INPUT,
        comment: "InputTag for CSC trigger primitives",
    },
    Parameter {
        name: "RPCInput",
        default: DEFAULT_RPC_INPUT,
        comment: "InputTag for RPC trigger primitives",
    },
    Parameter {
        name: "GEMInput",
        default: DEFAULT_GEM_INPUT,
        comment: "InputTag for GEM trigger primitives",
    },
    Parameter {
        name: "ME0Input",
        default: DEFAULT_ME0_INPUT,
        comment: "InputTag for ME0 trigger primitives",
    },
    Parameter {
        name: "DTPhiInput",
        default: DEFAULT_DT_PHI_INPUT,
        comment: "InputTag for DT phi trigger primitives",
    },
    Parameter {
        name: "DTThetaInput",
        default: DEFAULT_DT_THETA_INPUT,
        comment: "InputTag for DT theta trigger primitives",
    },
    Parameter {
        name: "useCSC",
        default: "true",
        comment: "Extract and dump CSC primitives",
    },
    Parameter {
        name: "useRPC",
        default: "false",
        comment: "Extract and dump RPC primitives",
    },
    Parameter {
        name: "useIRPC",
        default: "false",
        comment: "Extract and dump iRPC primitives (read from RPCInput)",
    },
    Parameter {
        name: "useGEM",
        default: "false",
        comment: "Extract and dump GEM primitives",
    },
    Parameter {
        name: "useME0",
        default: "false",
        comment: "Extract and dump ME0 primitives",
    },
    Parameter {
        name: "useDT",
        default: "false",
        comment: "Extract and dump DT primitives",
    },
    Parameter {
        name: "rpcRegionStyle",
        default: "endcap",
        comment: "RPC region display: 'endcap' maps region -1 to 2, 'region' prints it as is",
    },
];

/// Render the option table, one `name = default  # comment` line per option.
pub fn describe() -> String {
    let width = PARAMETERS.iter().map(|p| p.name.len()).max().unwrap_or(0);
    PARAMETERS
        .iter()
        .map(|p| format!("{:width$} = {:?}  # {}\n", p.name, p.default, p.comment))
        .collect()
}

/// Raw settings as read from defaults, file and environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "CSCInput", alias = "cscinput")]
    pub csc_input: String,
    #[serde(rename = "RPCInput", alias = "rpcinput")]
    pub rpc_input: String,
    #[serde(rename = "GEMInput", alias = "geminput")]
    pub gem_input: String,
    #[serde(rename = "ME0Input", alias = "me0input")]
    pub me0_input: String,
    #[serde(rename = "DTPhiInput", alias = "dtphiinput")]
    pub dt_phi_input: String,
    #[serde(rename = "DTThetaInput", alias = "dtthetainput")]
    pub dt_theta_input: String,

    #[serde(rename = "useCSC", alias = "usecsc")]
    pub use_csc: bool,
    #[serde(rename = "useRPC", alias = "userpc")]
    pub use_rpc: bool,
    #[serde(rename = "useIRPC", alias = "useirpc")]
    pub use_irpc: bool,
    #[serde(rename = "useGEM", alias = "usegem")]
    pub use_gem: bool,
    #[serde(rename = "useME0", alias = "useme0")]
    pub use_me0: bool,
    #[serde(rename = "useDT", alias = "usedt")]
    pub use_dt: bool,

    #[serde(rename = "rpcRegionStyle", alias = "rpcregionstyle")]
    pub rpc_region_style: RegionStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            csc_input: DEFAULT_CSC_INPUT.to_string(),
            rpc_input: DEFAULT_RPC_INPUT.to_string(),
            gem_input: DEFAULT_GEM_INPUT.to_string(),
            me0_input: DEFAULT_ME0_INPUT.to_string(),
            dt_phi_input: DEFAULT_DT_PHI_INPUT.to_string(),
            dt_theta_input: DEFAULT_DT_THETA_INPUT.to_string(),
            use_csc: true,
            use_rpc: false,
            use_irpc: false,
            use_gem: false,
            use_me0: false,
            use_dt: false,
            rpc_region_style: RegionStyle::default(),
        }
    }
}

fn parse_locator(option: &'static str, value: &str) -> Result<Locator, ConfigError> {
    value
        .parse()
        .map_err(|source| ConfigError::Locator { option, source })
}

impl Settings {
    /// Load settings from an optional file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Environment::with_prefix("TPDUMP"))
    }

    /// Load settings with an explicit environment source.
    ///
    /// File keys keep their case while environment keys arrive lowercased,
    /// so file entries are folded to lowercase and layered underneath the
    /// environment.
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            let file = Config::builder().add_source(File::from(path)).build()?;
            for (key, value) in file.collect()? {
                builder = builder.set_default(key.to_lowercase(), value)?;
            }
        }
        let config = builder.add_source(env.try_parsing(true)).build()?;
        Ok(config.try_deserialize()?)
    }

    /// Activation flags in subsystem order.
    pub fn activation(&self) -> [(SubsystemKind, bool); 6] {
        [
            (SubsystemKind::Csc, self.use_csc),
            (SubsystemKind::Rpc, self.use_rpc),
            (SubsystemKind::Irpc, self.use_irpc),
            (SubsystemKind::Gem, self.use_gem),
            (SubsystemKind::Me0, self.use_me0),
            (SubsystemKind::Dt, self.use_dt),
        ]
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            region_style: self.rpc_region_style,
        }
    }

    /// Build a collector for the configured subsystems.
    ///
    /// Only locators of active subsystems are parsed. An active subsystem
    /// whose adapter was not compiled in fails with [`ConfigError::Setup`].
    #[allow(unused_mut)]
    pub fn collector(&self) -> Result<Collector, ConfigError> {
        let mut builder = Collector::builder().activation(&self.activation());

        #[cfg(feature = "csc")]
        {
            use tpdump_adapters::csc::CscAdapter;
            if self.use_csc {
                let locator = parse_locator("CSCInput", &self.csc_input)?;
                builder = builder.register(CscAdapter::new(locator));
            }
        }
        #[cfg(feature = "rpc")]
        {
            use tpdump_adapters::rpc::RpcAdapter;
            if self.use_rpc || self.use_irpc {
                let locator = parse_locator("RPCInput", &self.rpc_input)?;
                if self.use_rpc {
                    builder = builder.register(RpcAdapter::rpc(locator.clone()));
                }
                if self.use_irpc {
                    builder = builder.register(RpcAdapter::irpc(locator));
                }
            }
        }
        #[cfg(feature = "gem")]
        {
            use tpdump_adapters::gem::GemAdapter;
            if self.use_gem {
                let locator = parse_locator("GEMInput", &self.gem_input)?;
                builder = builder.register(GemAdapter::new(locator));
            }
        }
        #[cfg(feature = "me0")]
        {
            use tpdump_adapters::me0::Me0Adapter;
            if self.use_me0 {
                let locator = parse_locator("ME0Input", &self.me0_input)?;
                builder = builder.register(Me0Adapter::new(locator));
            }
        }
        #[cfg(feature = "dt")]
        {
            use tpdump_adapters::dt::DtAdapter;
            if self.use_dt {
                let phi = parse_locator("DTPhiInput", &self.dt_phi_input)?;
                let theta = parse_locator("DTThetaInput", &self.dt_theta_input)?;
                builder = builder.register(DtAdapter::new(phi, theta));
            }
        }

        Ok(builder.build()?)
    }
}
