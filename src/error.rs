//! Errors raised while loading assets and scenes.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("block registry: {0}")]
    Registry(String),

    #[error("unknown material `{0}`")]
    UnknownMaterial(String),

    #[error("unknown block `{0}`")]
    UnknownBlock(String),

    #[error("unknown render tag `{0}`")]
    UnknownTag(String),

    #[error("unknown face `{0}`")]
    UnknownFace(String),

    #[error("unknown display context `{0}`")]
    UnknownDisplay(String),

    #[error("unknown blend mode `{0}`")]
    UnknownBlend(String),

    #[error("malformed sprite reference `{0}`")]
    BadSpriteRef(String),

    #[error("material `{material}` has no tile {tile}")]
    InvalidTile { material: String, tile: u32 },

    #[error("model `{model}`: invalid depth {depth}")]
    InvalidDepth { model: String, depth: f32 },

    #[error("model `{0}`: layer has an empty sprite table")]
    EmptySpriteTable(String),

    #[error("model `{0}`: sprite variants need a positive weight")]
    ZeroWeight(String),

    #[error("scene: invalid chunk size {0}")]
    ChunkSize(usize),

    #[error("logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
