//! Reflective query interface between the inspector and a live object graph.
//!
//! The inspector never touches a concrete object system. Hosts implement
//! [`ObjectHost`]; property reads and writes go through the narrower
//! [`PropertyStore`] capability bound to one object.

use crate::property::PropertyDescriptor;
use crate::variant::Variant;
use bevy_ecs::entity::Entity;

/// Handle to a live object. May go stale when the object is destroyed.
pub type ObjectId = Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptId(pub u32);

/// Class and script metadata queries.
pub trait ClassDb {
    /// Parent of `class`, or an empty string at the root of the hierarchy.
    fn parent_class(&self, class: &str) -> String;

    fn class_property_list(&self, class: &str, include_inherited: bool) -> Vec<PropertyDescriptor>;

    /// Exported properties of a script. The first entry names the script class.
    fn script_property_list(&self, script: ScriptId) -> Vec<PropertyDescriptor>;

    fn base_script(&self, script: ScriptId) -> Option<ScriptId>;
}

pub trait ObjectHost: ClassDb {
    /// Liveness check; every dereference of an [`ObjectId`] is preceded by one.
    fn is_instance_valid(&self, object: ObjectId) -> bool;

    /// Most-derived native class name. Empty for stale handles.
    fn class_of(&self, object: ObjectId) -> String;

    fn script_of(&self, object: ObjectId) -> Option<ScriptId>;

    fn get_property(&self, object: ObjectId, name: &str) -> Variant;

    fn set_property(&mut self, object: ObjectId, name: &str, value: Variant);

    /// Short human-readable label used on navigation buttons.
    fn describe(&self, object: ObjectId) -> String {
        format!("{}#{}", self.class_of(object), object.index())
    }
}

/// Name-keyed property access on a single object.
pub trait PropertyStore {
    fn get(&self, name: &str) -> Variant;
    fn set(&mut self, name: &str, value: Variant);
}

/// [`PropertyStore`] over one object of an [`ObjectHost`].
pub struct BoundObject<'a, H: ObjectHost + ?Sized> {
    host: &'a mut H,
    object: ObjectId,
}

impl<'a, H: ObjectHost + ?Sized> BoundObject<'a, H> {
    /// Returns `None` for stale handles.
    pub fn bind(host: &'a mut H, object: ObjectId) -> Option<Self> {
        host.is_instance_valid(object).then_some(Self { host, object })
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn host(&self) -> &H {
        self.host
    }
}

impl<H: ObjectHost + ?Sized> PropertyStore for BoundObject<'_, H> {
    fn get(&self, name: &str) -> Variant {
        self.host.get_property(self.object, name)
    }

    fn set(&mut self, name: &str, value: Variant) {
        self.host.set_property(self.object, name, value);
    }
}

/// Single-slot handle to the object currently shown by the inspector.
///
/// Written by selection, read every frame by the property walker. A handle whose
/// object has been destroyed reads as empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InspectedObject {
    slot: Option<ObjectId>,
}

impl InspectedObject {
    pub fn new(object: Option<ObjectId>) -> Self {
        Self { slot: object }
    }

    pub fn set(&mut self, object: Option<ObjectId>) {
        self.slot = object;
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// The inspected object if it is still alive.
    pub fn get<H: ObjectHost + ?Sized>(&self, host: &H) -> Option<ObjectId> {
        self.slot.filter(|object| host.is_instance_valid(*object))
    }

    /// Raw slot contents without a liveness check.
    pub fn raw(&self) -> Option<ObjectId> {
        self.slot
    }

    pub fn slot_mut(&mut self) -> &mut Option<ObjectId> {
        &mut self.slot
    }
}
