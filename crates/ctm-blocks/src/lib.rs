//! Block, material, tag and registry crate.
#![forbid(unsafe_code)]

pub mod config;
pub mod material;
pub mod registry;
pub mod tags;
pub mod types;

pub use material::MaterialCatalog;
pub use registry::BlockRegistry;
pub use tags::{RenderTags, TagId};
pub use types::{Block, BlockId, BlockState, ItemStack, MaterialId};
