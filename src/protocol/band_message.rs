use crate::core::data::band::{Band, BandError};
use serde::{Deserialize, Serialize};

/// Wire form of a band. `height` is the height of the whole job, while
/// `band_height` counts the rows carried in `buffer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandMessage {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub y_start: u32,
    pub band_height: u32,
    pub buffer: Vec<u8>,
}

impl BandMessage {
    #[must_use]
    pub fn from_band(band: &Band, job_height: u32) -> Self {
        Self {
            id: band.request_id(),
            width: band.width(),
            height: job_height,
            y_start: band.y_start(),
            band_height: band.height(),
            buffer: band.pixels().to_vec(),
        }
    }
}

impl TryFrom<BandMessage> for Band {
    type Error = BandError;

    fn try_from(message: BandMessage) -> Result<Self, Self::Error> {
        Band::new(
            message.id,
            message.width,
            message.y_start,
            message.band_height,
            message.buffer,
        )
    }
}
