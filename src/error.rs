//! Replay errors.

use crate::{LightId, VehicleId};
use thiserror::Error;

/// Replay result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or replaying a scenario.
#[derive(Debug, Error)]
pub enum Error {
    #[error("vehicle {id} appears more than once in frame {frame}")]
    DuplicateVehicle { frame: usize, id: VehicleId },

    #[error("traffic light {id} appears more than once in frame {frame}")]
    DuplicateLight { frame: usize, id: LightId },

    #[error("frame {found} supplied out of order, expected frame {expected}")]
    FrameOutOfOrder { expected: usize, found: usize },

    #[error("invalid heading ({dx}, {dz}), expected an axis-aligned unit direction")]
    InvalidHeading { dx: i32, dz: i32 },

    #[error("unknown traffic light phase {0:?}")]
    UnknownPhase(String),

    #[error("traffic light {0} is already registered")]
    LightAlreadyRegistered(LightId),

    #[error("malformed step data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
