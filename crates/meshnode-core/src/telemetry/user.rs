//! Node identity

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::anonymize::Anonymized;
use crate::errors::MeshError;
use crate::types::NodeNum;
use crate::wire::IdentityUpdate;

// ----------------------------------------------------------------------------
// Hardware Model
// ----------------------------------------------------------------------------

macro_rules! hardware_models {
    ($($variant:ident = $wire:literal => $name:literal,)+) => {
        /// Hardware variant reported by a node
        ///
        /// Enum names encode decimal points with `P` (`TBEAM_V0P7`), which is
        /// what [`MeshUser::hw_model_string`] turns back into a dot.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(from = "i32", into = "i32")]
        pub enum HardwareModel {
            #[default]
            Unset,
            $($variant,)+
            /// A wire number this build does not know
            Unrecognized(i32),
        }

        impl HardwareModel {
            /// Map a wire number onto a model
            pub fn from_wire(value: i32) -> Self {
                match value {
                    0 => Self::Unset,
                    $($wire => Self::$variant,)+
                    other => Self::Unrecognized(other),
                }
            }

            /// The wire number of this model
            pub fn to_wire(self) -> i32 {
                match self {
                    Self::Unset => 0,
                    $(Self::$variant => $wire,)+
                    Self::Unrecognized(value) => value,
                }
            }

            /// The SCREAMING_SNAKE enum name
            pub fn name(self) -> &'static str {
                match self {
                    Self::Unset => "UNSET",
                    $(Self::$variant => $name,)+
                    Self::Unrecognized(_) => "UNRECOGNIZED",
                }
            }
        }

        impl FromStr for HardwareModel {
            type Err = MeshError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    "UNSET" => Ok(Self::Unset),
                    $($name => Ok(Self::$variant),)+
                    _ => Err(MeshError::unknown_hardware_model(s)),
                }
            }
        }
    };
}

hardware_models! {
    TloraV2 = 1 => "TLORA_V2",
    TloraV1 = 2 => "TLORA_V1",
    TloraV211p6 = 3 => "TLORA_V2_1_1P6",
    Tbeam = 4 => "TBEAM",
    HeltecV20 = 5 => "HELTEC_V2_0",
    TbeamV0p7 = 6 => "TBEAM_V0P7",
    TEcho = 7 => "T_ECHO",
    TloraV11p3 = 8 => "TLORA_V1_1P3",
    Rak4631 = 9 => "RAK4631",
    HeltecV21 = 10 => "HELTEC_V2_1",
    HeltecV1 = 11 => "HELTEC_V1",
    LilygoTbeamS3Core = 12 => "LILYGO_TBEAM_S3_CORE",
    Rak11200 = 13 => "RAK11200",
    NanoG1 = 14 => "NANO_G1",
    TloraV211p8 = 15 => "TLORA_V2_1_1P8",
    TloraT3S3 = 16 => "TLORA_T3_S3",
    NanoG1Explorer = 17 => "NANO_G1_EXPLORER",
    NanoG2Ultra = 18 => "NANO_G2_ULTRA",
    StationG1 = 25 => "STATION_G1",
    Rak11310 = 26 => "RAK11310",
    LoraRelayV1 = 32 => "LORA_RELAY_V1",
    Nrf52840dk = 33 => "NRF52840DK",
    Ppr = 34 => "PPR",
    Genieblocks = 35 => "GENIEBLOCKS",
    Nrf52Unknown = 36 => "NRF52_UNKNOWN",
    Portduino = 37 => "PORTDUINO",
    AndroidSim = 38 => "ANDROID_SIM",
    DiyV1 = 39 => "DIY_V1",
    Nrf52840Pca10059 = 40 => "NRF52840_PCA10059",
    DrDev = 41 => "DR_DEV",
    M5stack = 42 => "M5STACK",
    HeltecV3 = 43 => "HELTEC_V3",
    HeltecWslV3 = 44 => "HELTEC_WSL_V3",
    Betafpv2400Tx = 45 => "BETAFPV_2400_TX",
    Betafpv900NanoTx = 46 => "BETAFPV_900_NANO_TX",
    RpiPico = 47 => "RPI_PICO",
    HeltecWirelessTracker = 48 => "HELTEC_WIRELESS_TRACKER",
    HeltecWirelessPaper = 49 => "HELTEC_WIRELESS_PAPER",
    TDeck = 50 => "T_DECK",
    TWatchS3 = 51 => "T_WATCH_S3",
    PicomputerS3 = 52 => "PICOMPUTER_S3",
    HeltecHt62 = 53 => "HELTEC_HT62",
    PrivateHw = 255 => "PRIVATE_HW",
}

impl From<i32> for HardwareModel {
    fn from(value: i32) -> Self {
        Self::from_wire(value)
    }
}

impl From<HardwareModel> for i32 {
    fn from(model: HardwareModel) -> Self {
        model.to_wire()
    }
}

impl fmt::Display for HardwareModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pretty form of a hardware model enum name: lowercase, `_` to `-`, `p` to `.`
pub fn pretty_hw_model_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            '_' => '-',
            'p' => '.',
            other => other,
        })
        .collect()
}

// ----------------------------------------------------------------------------
// Mesh User
// ----------------------------------------------------------------------------

/// Identity a node announces for itself
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshUser {
    /// Stable string handle, conventionally `!` + node number in hex
    pub id: String,
    pub long_name: String,
    pub short_name: String,
    pub hw_model: HardwareModel,
    #[serde(default)]
    pub is_licensed: bool,
}

impl MeshUser {
    pub fn new(
        id: impl Into<String>,
        long_name: impl Into<String>,
        short_name: impl Into<String>,
        hw_model: HardwareModel,
        is_licensed: bool,
    ) -> Self {
        Self {
            id: id.into(),
            long_name: long_name.into(),
            short_name: short_name.into(),
            hw_model,
            is_licensed,
        }
    }

    /// Build the identity from a decoded wire record
    pub fn from_wire(update: &IdentityUpdate) -> Self {
        Self {
            id: update.id.clone(),
            long_name: update.long_name.clone(),
            short_name: update.short_name.clone(),
            hw_model: HardwareModel::from_wire(update.hw_model),
            is_licensed: update.is_licensed,
        }
    }

    /// The wire record announcing this identity for node `num`
    pub fn to_wire(&self, num: NodeNum) -> IdentityUpdate {
        IdentityUpdate {
            num: num.value(),
            id: self.id.clone(),
            long_name: self.long_name.clone(),
            short_name: self.short_name.clone(),
            hw_model: self.hw_model.to_wire(),
            is_licensed: self.is_licensed,
        }
    }

    /// Pretty hardware model name, `None` while unset
    pub fn hw_model_string(&self) -> Option<String> {
        match self.hw_model {
            HardwareModel::Unset => None,
            model => Some(pretty_hw_model_name(model.name())),
        }
    }
}

impl fmt::Debug for MeshUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshUser")
            .field("id", &Anonymized(self.id.as_str()))
            .field("long_name", &Anonymized(self.long_name.as_str()))
            .field("short_name", &Anonymized(self.short_name.as_str()))
            .field("hw_model", &self.hw_model_string())
            .field("is_licensed", &self.is_licensed)
            .finish()
    }
}
