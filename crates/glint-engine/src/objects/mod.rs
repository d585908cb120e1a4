//! Driver object registry.
//!
//! Describes the live buffers, textures, programs and so on that a driver
//! tracks, and dispatches over them with an `ObjectVisitor`.

mod kinds;
mod registry;
mod visitor;

pub use kinds::{
    Attachment, BufferInfo, FramebufferInfo, Object, ObjectKind, ProgramInfo, RenderbufferInfo,
    ShaderInfo, ShaderStage, TextureInfo, TransformFeedbackInfo, VertexArrayInfo,
};
pub use registry::{ObjectId, ObjectRecord, ObjectRegistry};
pub use visitor::ObjectVisitor;
