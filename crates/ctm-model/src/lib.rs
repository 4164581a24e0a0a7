//! Connected-texture block models: quadrant connection logic, layered models and
//! the chunk mesher that drives them.
#![forbid(unsafe_code)]

pub mod connector;
pub mod constants;
pub mod ct;
pub mod cube;
pub mod cube_layer;
pub mod emit;
pub mod face_pos;
pub mod layer;
pub mod layered;
pub mod mesh_build;
pub mod mesher;
pub mod model;
pub mod quad;
pub mod sprite;
pub mod texdir;

pub use connector::{Connector, ModelConnector, RenderTagConnector, SameBlockConnector};
pub use ct::{BakedCtLayer, FaceConnections, Quadrant, QuadrantState, quadrant_rects};
pub use cube::emit_cube;
pub use cube_layer::BakedCubeLayer;
pub use emit::{BuildSink, MeshSink};
pub use face_pos::{FacePos, UvRotation};
pub use layer::BakedModelLayer;
pub use layered::BakedLayeredModel;
pub use mesh_build::MeshBuild;
pub use mesher::{ChunkMesh, ModelSet, build_chunk_mesh, build_grid_meshes, position_seed};
pub use model::{BakedModel, DisplayContext, ModelTransformation, Transformation};
pub use quad::{BlendMode, Quad, QuadSink, RenderMaterial};
pub use sprite::{
    BakedSpriteSupplier, Sprite, SpriteContext, SpriteSupplier, UvRect, WeightedSprites,
};
pub use texdir::TexDir;
