//! Link quality of the last packet heard from a node

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;
use crate::wire::{LinkQualityUpdate, HOP_LIMIT_UNSET, RSSI_UNKNOWN, SNR_UNKNOWN};

/// Link-quality sample with the wire sentinels turned into `None`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkQuality {
    /// Signal-to-noise ratio in dB
    pub snr: Option<f32>,
    /// Received signal strength in dBm
    pub rssi: Option<i32>,
    /// Hops the packet had left when it arrived
    pub hop_limit: Option<u32>,
    /// Channel index the packet arrived on
    pub channel: u32,
    pub last_heard: Timestamp,
}

impl LinkQuality {
    /// Build from a decoded wire record
    pub fn from_wire(update: &LinkQualityUpdate) -> Self {
        Self {
            snr: (update.snr != SNR_UNKNOWN && update.snr.is_finite()).then_some(update.snr),
            rssi: (update.rssi != RSSI_UNKNOWN).then_some(update.rssi),
            hop_limit: (update.hop_limit != HOP_LIMIT_UNSET)
                .then(|| u32::try_from(update.hop_limit).ok())
                .flatten(),
            channel: u32::try_from(update.channel).unwrap_or(0),
            last_heard: Timestamp::from_wire(update.last_heard),
        }
    }
}
