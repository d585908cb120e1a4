use super::kinds::{
    BufferInfo, FramebufferInfo, Object, ProgramInfo, RenderbufferInfo, ShaderInfo, TextureInfo,
    TransformFeedbackInfo, VertexArrayInfo,
};
use super::ObjectRecord;

/// Double-dispatch over registry objects.
///
/// One method per object kind; unimplemented kinds are skipped.
#[allow(unused_variables)]
pub trait ObjectVisitor {
    fn visit_buffer(&mut self, record: &ObjectRecord, buffer: &BufferInfo) {}

    fn visit_framebuffer(&mut self, record: &ObjectRecord, fbo: &FramebufferInfo) {}

    fn visit_program(&mut self, record: &ObjectRecord, program: &ProgramInfo) {}

    fn visit_renderbuffer(&mut self, record: &ObjectRecord, rbo: &RenderbufferInfo) {}

    fn visit_shader(&mut self, record: &ObjectRecord, shader: &ShaderInfo) {}

    fn visit_texture(&mut self, record: &ObjectRecord, texture: &TextureInfo) {}

    fn visit_transform_feedback(&mut self, record: &ObjectRecord, tf: &TransformFeedbackInfo) {}

    fn visit_vertex_array(&mut self, record: &ObjectRecord, vao: &VertexArrayInfo) {}
}

impl ObjectRecord {
    /// Calls the visitor method matching this record's kind.
    pub fn accept(&self, visitor: &mut dyn ObjectVisitor) {
        match &self.object {
            Object::Buffer(info) => visitor.visit_buffer(self, info),
            Object::Framebuffer(info) => visitor.visit_framebuffer(self, info),
            Object::Program(info) => visitor.visit_program(self, info),
            Object::Renderbuffer(info) => visitor.visit_renderbuffer(self, info),
            Object::Shader(info) => visitor.visit_shader(self, info),
            Object::Texture(info) => visitor.visit_texture(self, info),
            Object::TransformFeedback(info) => visitor.visit_transform_feedback(self, info),
            Object::VertexArray(info) => visitor.visit_vertex_array(self, info),
        }
    }
}
