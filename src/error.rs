use std::io;
use thiserror::Error;

use crate::physics::BodyId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Unknown body: {0:?}")]
    UnknownBody(BodyId),

    #[error("Missing page element: #{0}")]
    MissingElement(String),

    #[error("Graphics error: {0}")]
    Graphics(String),
}

pub type Result<T> = std::result::Result<T, Error>;
