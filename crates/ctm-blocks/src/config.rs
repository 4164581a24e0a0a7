use serde::Deserialize;
use std::collections::HashMap;

// Top-level blocks config file
#[derive(Deserialize, Debug, Default)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
    // Render tags: tag name -> member block names. Blocks may also list tags directly.
    #[serde(default)]
    pub tags: HashMap<String, Vec<String>>,
    // Optional name of a block to use as the default unknown/fallback block
    // when a requested block is unavailable. If absent or not found, fallbacks
    // will use `air`.
    #[serde(default)]
    pub unknown_block: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub state_schema: Option<HashMap<String, Vec<String>>>,
}
