use dc_core::CoreError;
use dc_fleet::FleetError;
use dc_generate::GenerationError;
use dc_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CenterError {
    #[error("dispatch center configuration error: {0}")]
    Config(String),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),

    #[error("startup data error: {0}")]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("spatial setup error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type CenterResult<T> = Result<T, CenterError>;
