use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::device::DriverInfo;
use crate::objects::{
    BufferInfo, FramebufferInfo, ObjectId, ObjectRecord, ObjectRegistry, ObjectVisitor,
    ProgramInfo, RenderbufferInfo, ShaderInfo, TextureInfo, TransformFeedbackInfo,
    VertexArrayInfo,
};

use super::{human_readable_size, InfoGroup, InfoUnit};

/// Visitor collecting one `InfoUnit` per registry object, grouped by kind.
///
/// Groups are ordered by name; units within a group follow visit order.
pub struct DebugInfo<'r> {
    registry: &'r ObjectRegistry,
    groups: BTreeMap<String, InfoGroup>,
}

impl<'r> DebugInfo<'r> {
    pub fn new(registry: &'r ObjectRegistry) -> Self {
        Self {
            registry,
            groups: BTreeMap::new(),
        }
    }

    /// Visits every object in the registry and returns the groups.
    pub fn collect(mut self) -> Vec<InfoGroup> {
        let registry = self.registry;
        registry.accept(&mut self);
        self.groups.into_values().collect()
    }

    fn add_info(&mut self, record: &ObjectRecord, unit: InfoUnit) {
        let name = record.object.kind().group_name();
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| InfoGroup::new(name))
            .add_info_unit(unit);
    }

    /// Display name of an object referenced by id.
    fn reference(&self, id: ObjectId) -> String {
        match self.registry.get(id) {
            Some(record) => object_name(record),
            None => format!("<deleted {id}>"),
        }
    }

    fn references(&self, ids: &[ObjectId]) -> String {
        if ids.is_empty() {
            return "none".to_string();
        }
        ids.iter()
            .map(|id| self.reference(*id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl ObjectVisitor for DebugInfo<'_> {
    fn visit_buffer(&mut self, record: &ObjectRecord, buffer: &BufferInfo) {
        let mut unit = InfoUnit::new(object_name(record));
        unit.add_property("size", human_readable_size(buffer.size));
        unit.add_property("usage", &buffer.usage);
        self.add_info(record, unit);
    }

    fn visit_framebuffer(&mut self, record: &ObjectRecord, fbo: &FramebufferInfo) {
        let mut unit = InfoUnit::new(object_name(record));
        if fbo.default {
            unit.add_property("default", yes_no(true));
        }
        unit.add_property("complete", yes_no(fbo.complete));
        for attachment in &fbo.attachments {
            unit.add_property(&attachment.point, self.reference(attachment.target));
        }
        self.add_info(record, unit);
    }

    fn visit_program(&mut self, record: &ObjectRecord, program: &ProgramInfo) {
        let mut unit = InfoUnit::new(object_name(record));
        unit.add_property("linked", yes_no(program.linked));
        unit.add_property("shaders", self.references(&program.shaders));
        self.add_info(record, unit);
    }

    fn visit_renderbuffer(&mut self, record: &ObjectRecord, rbo: &RenderbufferInfo) {
        let mut unit = InfoUnit::new(object_name(record));
        unit.add_property("size", format!("{}x{}", rbo.width, rbo.height));
        unit.add_property("format", &rbo.format);
        unit.add_property("memory", human_readable_size(rbo.memory_bytes()));
        self.add_info(record, unit);
    }

    fn visit_shader(&mut self, record: &ObjectRecord, shader: &ShaderInfo) {
        let mut unit = InfoUnit::new(object_name(record));
        unit.add_property("stage", shader.stage);
        unit.add_property("compiled", yes_no(shader.compiled));
        unit.add_property("source", &shader.source);
        self.add_info(record, unit);
    }

    fn visit_texture(&mut self, record: &ObjectRecord, texture: &TextureInfo) {
        let mut unit = InfoUnit::new(object_name(record));
        let size = if texture.depth > 1 {
            format!("{}x{}x{}", texture.width, texture.height, texture.depth)
        } else {
            format!("{}x{}", texture.width, texture.height)
        };
        unit.add_property("size", size);
        unit.add_property("format", &texture.format);
        unit.add_property("mip levels", texture.mip_levels);
        unit.add_property("memory", human_readable_size(texture.memory_bytes()));
        self.add_info(record, unit);
    }

    fn visit_transform_feedback(&mut self, record: &ObjectRecord, tf: &TransformFeedbackInfo) {
        let mut unit = InfoUnit::new(object_name(record));
        unit.add_property("active", yes_no(tf.active));
        unit.add_property("paused", yes_no(tf.paused));
        unit.add_property("buffers", self.references(&tf.buffers));
        self.add_info(record, unit);
    }

    fn visit_vertex_array(&mut self, record: &ObjectRecord, vao: &VertexArrayInfo) {
        let mut unit = InfoUnit::new(object_name(record));
        unit.add_property("attributes", vao.attributes);
        let element_buffer = match vao.element_buffer {
            Some(id) => self.reference(id),
            None => "none".to_string(),
        };
        unit.add_property("element buffer", element_buffer);
        self.add_info(record, unit);
    }
}

/// `"<Kind> <id>"`, with the label appended in parentheses when present.
pub fn object_name(record: &ObjectRecord) -> String {
    let type_name = record.object.kind().type_name();
    match &record.label {
        Some(label) => format!("{type_name} {} ({label})", record.id),
        None => format!("{type_name} {}", record.id),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Driver and platform capabilities. No object traversal.
///
/// Returns no groups when the driver has no live context to query.
pub fn general_info(driver: &dyn DriverInfo) -> Vec<InfoGroup> {
    let Some(summary) = driver.driver_summary() else {
        log::debug!("no driver summary available");
        return Vec::new();
    };

    let mut general = InfoGroup::new("General");
    let mut unit = InfoUnit::new("Driver");
    unit.add_property("vendor", &summary.vendor);
    unit.add_property("renderer", &summary.renderer);
    unit.add_property("version", &summary.version);
    unit.add_property("backend", &summary.backend);
    unit.add_property("device type", &summary.device_type);
    general.add_info_unit(unit);

    let mut extensions = InfoGroup::new("Extensions");
    let mut unit = InfoUnit::new("Features");
    unit.add_property("count", summary.extensions.len());
    for extension in &summary.extensions {
        unit.add_property(extension, yes_no(true));
    }
    extensions.add_info_unit(unit);

    let mut limits = InfoGroup::new("Limits");
    for family in &summary.limits {
        let mut unit = InfoUnit::new(&family.name);
        for (name, value) in &family.limits {
            unit.add_property(name, value);
        }
        limits.add_info_unit(unit);
    }

    vec![general, extensions, limits]
}

/// One group per object kind present in `registry`.
pub fn object_info(registry: &ObjectRegistry) -> Vec<InfoGroup> {
    DebugInfo::new(registry).collect()
}

/// Formats groups as indented text, one property per line.
pub fn render(groups: &[InfoGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "[{}]", group.name);
        for unit in &group.units {
            let _ = writeln!(out, "  {}", unit.name);
            for property in &unit.properties {
                let _ = writeln!(out, "    {}: {}", property.name, property.value);
            }
        }
    }
    out
}

/// Writes the report to the log sink at info level, line by line.
pub fn print(groups: &[InfoGroup]) {
    for line in render(groups).lines() {
        log::info!("{line}");
    }
}

pub fn print_general_info(driver: &dyn DriverInfo) {
    print(&general_info(driver));
}

pub fn print_object_info(registry: &ObjectRegistry) {
    print(&object_info(registry));
}

pub fn print_all(driver: &dyn DriverInfo, registry: &ObjectRegistry) {
    print_general_info(driver);
    print_object_info(registry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DriverSummary, LimitFamily};
    use crate::objects::{Attachment, ShaderStage};

    struct FixedDriver(Option<DriverSummary>);

    impl DriverInfo for FixedDriver {
        fn driver_summary(&self) -> Option<DriverSummary> {
            self.0.clone()
        }
    }

    fn summary() -> DriverSummary {
        DriverSummary {
            vendor: "NVIDIA (0x10de)".to_string(),
            renderer: "Test GPU".to_string(),
            version: "550.1".to_string(),
            backend: "Vulkan".to_string(),
            device_type: "DiscreteGpu".to_string(),
            extensions: vec!["timestamp query".to_string(), "shader f16".to_string()],
            limits: vec![LimitFamily::new("Textures").with("max 2d size", 8192)],
        }
    }

    fn shader(stage: ShaderStage) -> ShaderInfo {
        ShaderInfo {
            stage,
            compiled: true,
            source: "<inline>".to_string(),
        }
    }

    fn texture() -> TextureInfo {
        TextureInfo {
            width: 16,
            height: 16,
            depth: 1,
            format: "rgba8".to_string(),
            bytes_per_pixel: 4,
            mip_levels: 1,
        }
    }

    // ── general_info ──────────────────────────────────────────────────────

    #[test]
    fn general_info_groups() {
        let groups = general_info(&FixedDriver(Some(summary())));
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["General", "Extensions", "Limits"]);

        let driver = groups[0].unit("Driver").unwrap();
        assert_eq!(driver.property("renderer"), Some("Test GPU"));
        assert_eq!(driver.property("device type"), Some("DiscreteGpu"));

        let features = groups[1].unit("Features").unwrap();
        assert_eq!(features.property("count"), Some("2"));
        assert_eq!(features.property("shader f16"), Some("yes"));

        let textures = groups[2].unit("Textures").unwrap();
        assert_eq!(textures.property("max 2d size"), Some("8192"));
    }

    #[test]
    fn general_info_without_driver_is_empty() {
        assert!(general_info(&FixedDriver(None)).is_empty());
    }

    // ── object_info ───────────────────────────────────────────────────────

    #[test]
    fn empty_registry_has_no_groups() {
        assert!(object_info(&ObjectRegistry::new()).is_empty());
    }

    fn group<'g>(groups: &'g [InfoGroup], name: &str) -> &'g InfoGroup {
        groups
            .iter()
            .find(|g| g.name == name)
            .unwrap_or_else(|| panic!("no group {name}"))
    }

    #[test]
    fn groups_are_sorted_by_name() {
        let mut reg = ObjectRegistry::new();
        reg.register(shader(ShaderStage::Vertex));
        reg.register(BufferInfo {
            size: 2048,
            usage: "vertex".to_string(),
        });
        reg.register(shader(ShaderStage::Fragment));

        let groups = object_info(&reg);
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Buffers", "Shaders"]);
        assert_eq!(groups[0].units[0].property("size"), Some("2.0 kB"));
        assert_eq!(groups[1].units.len(), 2);
        assert_eq!(groups[1].units[0].name, "Shader 1");
        assert_eq!(groups[1].units[1].name, "Shader 3");
    }

    #[test]
    fn labeled_objects_carry_label_in_name() {
        let mut reg = ObjectRegistry::new();
        let id = reg.register_labeled("quad", BufferInfo {
            size: 96,
            usage: "vertex".to_string(),
        });
        assert_eq!(object_name(reg.get(id).unwrap()), "Buffer 1 (quad)");
    }

    #[test]
    fn program_lists_shaders_and_deleted_references() {
        let mut reg = ObjectRegistry::new();
        let vs = reg.register_labeled("basic.vert", shader(ShaderStage::Vertex));
        let fs = reg.register(shader(ShaderStage::Fragment));
        reg.register(ProgramInfo {
            linked: true,
            shaders: vec![vs, fs],
        });
        reg.remove(fs);

        let groups = object_info(&reg);
        let program = group(&groups, "Programs").unit("Program 3").unwrap();
        assert_eq!(program.property("linked"), Some("yes"));
        assert_eq!(
            program.property("shaders"),
            Some("Shader 1 (basic.vert), <deleted 2>")
        );
    }

    #[test]
    fn framebuffer_lists_attachments() {
        let mut reg = ObjectRegistry::new();
        let color = reg.register(texture());
        reg.register(FramebufferInfo {
            default: true,
            complete: true,
            attachments: vec![Attachment {
                point: "color0".to_string(),
                target: color,
            }],
        });

        let groups = object_info(&reg);
        let fbo = group(&groups, "FrameBufferObjects").unit("FrameBufferObject 2").unwrap();
        let names: Vec<_> = fbo.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["default", "complete", "color0"]);
        assert_eq!(fbo.property("color0"), Some("Texture 1"));
    }

    #[test]
    fn texture_and_renderbuffer_properties() {
        let mut reg = ObjectRegistry::new();
        reg.register(TextureInfo {
            depth: 4,
            ..texture()
        });
        reg.register(RenderbufferInfo {
            width: 512,
            height: 512,
            format: "depth24stencil8".to_string(),
            bytes_per_pixel: 4,
        });

        let groups = object_info(&reg);
        let tex = group(&groups, "Textures").unit("Texture 1").unwrap();
        assert_eq!(tex.property("size"), Some("16x16x4"));
        assert_eq!(tex.property("mip levels"), Some("1"));
        assert_eq!(tex.property("memory"), Some("4.0 kB"));

        let rbo = group(&groups, "RenderBufferObjects").unit("RenderBufferObject 2").unwrap();
        assert_eq!(rbo.property("size"), Some("512x512"));
        assert_eq!(rbo.property("memory"), Some("1.0 MB"));
    }

    #[test]
    fn vertex_array_and_transform_feedback_properties() {
        let mut reg = ObjectRegistry::new();
        let ibo = reg.register(BufferInfo {
            size: 12,
            usage: "index".to_string(),
        });
        reg.register(VertexArrayInfo {
            attributes: 3,
            element_buffer: Some(ibo),
        });
        reg.register(VertexArrayInfo::default());
        reg.register(TransformFeedbackInfo {
            active: true,
            paused: false,
            buffers: vec![ibo],
        });

        let groups = object_info(&reg);
        let vaos = group(&groups, "VertexArrayObjects");
        assert_eq!(vaos.units[0].property("element buffer"), Some("Buffer 1"));
        assert_eq!(vaos.units[1].property("element buffer"), Some("none"));

        let tf = group(&groups, "TransformFeedbacks").unit("TransformFeedback 4").unwrap();
        assert_eq!(tf.property("active"), Some("yes"));
        assert_eq!(tf.property("paused"), Some("no"));
        assert_eq!(tf.property("buffers"), Some("Buffer 1"));
    }

    #[test]
    fn oversized_mip_chain_does_not_break_report() {
        let mut reg = ObjectRegistry::new();
        reg.register(TextureInfo {
            width: 4096,
            height: 4096,
            mip_levels: 40,
            ..texture()
        });

        let groups = object_info(&reg);
        let tex = group(&groups, "Textures").unit("Texture 1").unwrap();
        assert_eq!(tex.property("mip levels"), Some("40"));
        assert!(tex.property("memory").is_some());
    }

    // ── render ────────────────────────────────────────────────────────────

    #[test]
    fn render_indents_units_and_properties() {
        let mut unit = InfoUnit::new("Buffer 1");
        unit.add_property("size", "12 B");
        let mut group = InfoGroup::new("Buffers");
        group.add_info_unit(unit);

        assert_eq!(render(&[group]), "[Buffers]\n  Buffer 1\n    size: 12 B\n");
    }
}
