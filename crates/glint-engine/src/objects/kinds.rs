use std::fmt;

use super::ObjectId;

/// The eight object kinds a driver tracks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ObjectKind {
    Buffer,
    Framebuffer,
    Program,
    Renderbuffer,
    Shader,
    Texture,
    TransformFeedback,
    VertexArray,
}

impl ObjectKind {
    /// Singular name used for individual objects.
    pub fn type_name(self) -> &'static str {
        match self {
            ObjectKind::Buffer => "Buffer",
            ObjectKind::Framebuffer => "FrameBufferObject",
            ObjectKind::Program => "Program",
            ObjectKind::Renderbuffer => "RenderBufferObject",
            ObjectKind::Shader => "Shader",
            ObjectKind::Texture => "Texture",
            ObjectKind::TransformFeedback => "TransformFeedback",
            ObjectKind::VertexArray => "VertexArrayObject",
        }
    }

    /// Plural name used for report groups.
    pub fn group_name(self) -> &'static str {
        match self {
            ObjectKind::Buffer => "Buffers",
            ObjectKind::Framebuffer => "FrameBufferObjects",
            ObjectKind::Program => "Programs",
            ObjectKind::Renderbuffer => "RenderBufferObjects",
            ObjectKind::Shader => "Shaders",
            ObjectKind::Texture => "Textures",
            ObjectKind::TransformFeedback => "TransformFeedbacks",
            ObjectKind::VertexArray => "VertexArrayObjects",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BufferInfo {
    /// Allocated size in bytes.
    pub size: u64,
    pub usage: String,
}

/// One framebuffer attachment point and the texture or renderbuffer bound there.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub point: String,
    pub target: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FramebufferInfo {
    /// The window-system provided framebuffer.
    pub default: bool,
    pub complete: bool,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgramInfo {
    pub linked: bool,
    pub shaders: Vec<ObjectId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderbufferInfo {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub bytes_per_pixel: u32,
}

impl RenderbufferInfo {
    pub fn memory_bytes(&self) -> u64 {
        u64::from(self.width)
            .saturating_mul(u64::from(self.height))
            .saturating_mul(u64::from(self.bytes_per_pixel))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    TessellationControl,
    TessellationEvaluation,
    Geometry,
    Fragment,
    Compute,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::TessellationControl => "tessellation control",
            ShaderStage::TessellationEvaluation => "tessellation evaluation",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Compute => "compute",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaderInfo {
    pub stage: ShaderStage,
    pub compiled: bool,

    /// Where the source came from (file path, `<inline>`, ...).
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,

    /// 1 for 2D textures.
    pub depth: u32,
    pub format: String,
    pub bytes_per_pixel: u32,
    pub mip_levels: u32,
}

impl TextureInfo {
    /// Storage of the full mip chain. Each level halves every dimension,
    /// clamped to 1. Saturates instead of overflowing.
    pub fn memory_bytes(&self) -> u64 {
        let levels = self.mip_levels.max(1);
        let bpp = u64::from(self.bytes_per_pixel);

        // From level 32 on every dimension of a u32 extent is down to 1 texel.
        let shrinking = levels.min(u32::BITS);
        let tail = u64::from(levels - shrinking).saturating_mul(bpp);

        (0..shrinking)
            .map(|level| {
                let w = u64::from((self.width >> level).max(1));
                let h = u64::from((self.height >> level).max(1));
                let d = u64::from((self.depth >> level).max(1));
                w.saturating_mul(h).saturating_mul(d).saturating_mul(bpp)
            })
            .fold(tail, u64::saturating_add)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformFeedbackInfo {
    pub active: bool,
    pub paused: bool,
    pub buffers: Vec<ObjectId>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexArrayInfo {
    /// Number of enabled vertex attributes.
    pub attributes: u32,
    pub element_buffer: Option<ObjectId>,
}

/// Kind-specific description of a live driver object.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Buffer(BufferInfo),
    Framebuffer(FramebufferInfo),
    Program(ProgramInfo),
    Renderbuffer(RenderbufferInfo),
    Shader(ShaderInfo),
    Texture(TextureInfo),
    TransformFeedback(TransformFeedbackInfo),
    VertexArray(VertexArrayInfo),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Buffer(_) => ObjectKind::Buffer,
            Object::Framebuffer(_) => ObjectKind::Framebuffer,
            Object::Program(_) => ObjectKind::Program,
            Object::Renderbuffer(_) => ObjectKind::Renderbuffer,
            Object::Shader(_) => ObjectKind::Shader,
            Object::Texture(_) => ObjectKind::Texture,
            Object::TransformFeedback(_) => ObjectKind::TransformFeedback,
            Object::VertexArray(_) => ObjectKind::VertexArray,
        }
    }
}

macro_rules! impl_from_info {
    ($($info:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$info> for Object {
                fn from(info: $info) -> Self {
                    Object::$variant(info)
                }
            }
        )*
    };
}

impl_from_info! {
    BufferInfo => Buffer,
    FramebufferInfo => Framebuffer,
    ProgramInfo => Program,
    RenderbufferInfo => Renderbuffer,
    ShaderInfo => Shader,
    TextureInfo => Texture,
    TransformFeedbackInfo => TransformFeedback,
    VertexArrayInfo => VertexArray,
}
