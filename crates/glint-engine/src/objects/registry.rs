use std::collections::BTreeMap;
use std::fmt;

use super::kinds::Object;
use super::ObjectVisitor;

/// Registry-assigned object name. Allocated from 1 and never reused.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ObjectId(u32);

impl ObjectId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live object as the registry sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    pub id: ObjectId,
    pub label: Option<String>,
    pub object: Object,
}

/// Bookkeeping of live driver objects.
///
/// Iteration and visiting run in id order, which is creation order.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    last_id: u32,
    objects: BTreeMap<ObjectId, ObjectRecord>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, object: impl Into<Object>) -> ObjectId {
        self.insert(None, object.into())
    }

    pub fn register_labeled(
        &mut self,
        label: impl Into<String>,
        object: impl Into<Object>,
    ) -> ObjectId {
        self.insert(Some(label.into()), object.into())
    }

    fn insert(&mut self, label: Option<String>, object: Object) -> ObjectId {
        self.last_id += 1;
        let id = ObjectId(self.last_id);
        log::trace!("registered {} {id}", object.kind().type_name());
        self.objects.insert(id, ObjectRecord { id, label, object });
        id
    }

    /// Forgets a deleted object. References to it elsewhere are left dangling.
    pub fn remove(&mut self, id: ObjectId) -> Option<ObjectRecord> {
        self.objects.remove(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectRecord> {
        self.objects.get(&id)
    }

    /// Mutable access to the description, e.g. after a resize or relink.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(&id).map(|r| &mut r.object)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.objects.values()
    }

    pub fn accept(&self, visitor: &mut dyn ObjectVisitor) {
        for record in self.objects.values() {
            record.accept(visitor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{BufferInfo, ObjectKind, ShaderInfo, ShaderStage, TextureInfo};

    fn buffer(size: u64) -> BufferInfo {
        BufferInfo {
            size,
            usage: "vertex".to_string(),
        }
    }

    #[derive(Default)]
    struct KindCollector(Vec<(u32, ObjectKind)>);

    impl ObjectVisitor for KindCollector {
        fn visit_buffer(&mut self, record: &ObjectRecord, _: &BufferInfo) {
            self.0.push((record.id.get(), ObjectKind::Buffer));
        }

        fn visit_shader(&mut self, record: &ObjectRecord, _: &ShaderInfo) {
            self.0.push((record.id.get(), ObjectKind::Shader));
        }
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut reg = ObjectRegistry::new();
        assert_eq!(reg.register(buffer(1)).get(), 1);
        assert_eq!(reg.register(buffer(2)).get(), 2);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut reg = ObjectRegistry::new();
        let a = reg.register(buffer(1));
        reg.remove(a).unwrap();
        let b = reg.register(buffer(2));
        assert_ne!(a, b);
        assert!(reg.get(a).is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn labels_are_kept() {
        let mut reg = ObjectRegistry::new();
        let id = reg.register_labeled("quad", buffer(64));
        assert_eq!(reg.get(id).unwrap().label.as_deref(), Some("quad"));
    }

    #[test]
    fn get_mut_updates_description() {
        let mut reg = ObjectRegistry::new();
        let id = reg.register(buffer(64));
        if let Some(Object::Buffer(info)) = reg.get_mut(id) {
            info.size = 128;
        }
        assert_eq!(reg.get(id).unwrap().object, Object::Buffer(buffer(128)));
    }

    #[test]
    fn accept_visits_in_id_order_and_skips_unhandled_kinds() {
        let mut reg = ObjectRegistry::new();
        reg.register(ShaderInfo {
            stage: ShaderStage::Vertex,
            compiled: true,
            source: "<inline>".to_string(),
        });
        reg.register(TextureInfo {
            width: 1,
            height: 1,
            depth: 1,
            format: "r8".to_string(),
            bytes_per_pixel: 1,
            mip_levels: 1,
        });
        reg.register(buffer(4));

        let mut collector = KindCollector::default();
        reg.accept(&mut collector);
        assert_eq!(
            collector.0,
            vec![(1, ObjectKind::Shader), (3, ObjectKind::Buffer)]
        );
    }
}
