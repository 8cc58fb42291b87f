//! Registered component descriptors.
//!
//! The registry is an ordered list: registration order is the order in which
//! descriptors are tried during upgrade. Lookups are linear scans; the
//! registry holds one entry per component type, not per element.

use crate::component::{Component, Constructible};
use crate::error::{ComponentError, ComponentResult};
use crate::handler::ComponentHandler;
use hatch_dom::NodeId;
use std::any::TypeId;
use std::rc::Rc;

/// Slot name the engine reserves for its own per-instance bookkeeping.
///
/// Widgets are attached to their element under their component name, so a
/// component may not be named after this slot.
pub const RESERVED_PROPERTY: &str = "hatchComponentConfigInternal_";

/// Type-erased constructor stored in a descriptor.
pub type ComponentFactory = Rc<dyn Fn(&mut ComponentHandler, NodeId) -> ComponentResult<Box<dyn Component>>>;

/// Callback run after an element was upgraded for a component type.
pub type UpgradeCallback = Rc<dyn Fn(&mut ComponentHandler, NodeId)>;

/// Public registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentConfig {
    pub name: String,
    pub selector: String,
    pub is_widget: bool,
}

impl ComponentConfig {
    /// Create a config for a widget component (`is_widget` defaults to true).
    pub fn new(name: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            is_widget: true,
        }
    }

    /// Set whether instances are attached to their element for direct access.
    pub fn with_widget(mut self, is_widget: bool) -> Self {
        self.is_widget = is_widget;
        self
    }
}

/// Registration record for a component type.
pub struct ComponentDescriptor {
    name: String,
    selector: String,
    is_widget: bool,
    type_id: TypeId,
    type_name: &'static str,
    factory: ComponentFactory,
    callbacks: Vec<UpgradeCallback>,
}

impl ComponentDescriptor {
    /// Build a descriptor whose constructor is `T::construct`.
    pub fn of<T: Constructible>(config: ComponentConfig) -> Self {
        let factory: ComponentFactory = Rc::new(|handler: &mut ComponentHandler, element: NodeId| {
            T::construct(handler, element).map(|instance| Box::new(instance) as Box<dyn Component>)
        });
        Self {
            name: config.name,
            selector: config.selector,
            is_widget: config.is_widget,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            factory,
            callbacks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class name candidate elements carry.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn is_widget(&self) -> bool {
        self.is_widget
    }

    /// `TypeId` of the component type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type name of the component, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn factory(&self) -> ComponentFactory {
        self.factory.clone()
    }

    pub(crate) fn callbacks(&self) -> Vec<UpgradeCallback> {
        self.callbacks.clone()
    }

    /// Number of upgrade callbacks registered for this type.
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }
}

impl std::fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("selector", &self.selector)
            .field("is_widget", &self.is_widget)
            .field("type", &self.type_name)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

/// Ordered list of component descriptors.
#[derive(Default)]
pub struct ComponentRegistry {
    descriptors: Vec<ComponentDescriptor>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    fn validate(&self, descriptor: &ComponentDescriptor, skip: Option<usize>) -> ComponentResult<()> {
        for (index, existing) in self.descriptors.iter().enumerate() {
            if Some(index) == skip {
                continue;
            }
            if existing.selector == descriptor.selector {
                return Err(ComponentError::DuplicateSelector {
                    selector: descriptor.selector.clone(),
                });
            }
            if existing.name == descriptor.name {
                return Err(ComponentError::DuplicateName {
                    name: descriptor.name.clone(),
                });
            }
        }

        if descriptor.name == RESERVED_PROPERTY {
            return Err(ComponentError::ReservedProperty {
                name: descriptor.name.clone(),
                property: RESERVED_PROPERTY,
            });
        }
        Ok(())
    }

    /// Append a descriptor.
    ///
    /// # Errors
    /// Fails on a duplicate selector or name, or a reserved name. The
    /// registry is left unchanged on failure.
    pub fn register(&mut self, descriptor: ComponentDescriptor) -> ComponentResult<()> {
        self.validate(&descriptor, None)?;
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Overwrite the descriptor with the same name in place, keeping its
    /// position. Appends when no descriptor has that name. Returns the
    /// replaced descriptor.
    ///
    /// # Errors
    /// Fails when the replacement's selector belongs to another descriptor,
    /// or its name is reserved.
    pub fn replace(&mut self, descriptor: ComponentDescriptor) -> ComponentResult<Option<ComponentDescriptor>> {
        let position = self.position(&descriptor.name);
        self.validate(&descriptor, position)?;
        match position {
            Some(index) => Ok(Some(std::mem::replace(&mut self.descriptors[index], descriptor))),
            None => {
                self.descriptors.push(descriptor);
                Ok(None)
            }
        }
    }

    /// Index of the descriptor named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.descriptors.iter().position(|d| d.name == name)
    }

    /// Find a descriptor by name.
    pub fn find(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Find the first descriptor registered for component type `type_id`.
    pub fn find_by_type(&self, type_id: TypeId) -> Option<&ComponentDescriptor> {
        self.descriptors.iter().find(|d| d.type_id == type_id)
    }

    /// Find a descriptor by selector.
    pub fn find_by_selector(&self, selector: &str) -> Option<&ComponentDescriptor> {
        self.descriptors.iter().find(|d| d.selector == selector)
    }

    /// Append an upgrade callback. Returns `false` when `name` is unknown.
    pub fn add_callback(&mut self, name: &str, callback: UpgradeCallback) -> bool {
        match self.descriptors.iter_mut().find(|d| d.name == name) {
            Some(descriptor) => {
                descriptor.callbacks.push(callback);
                true
            }
            None => false,
        }
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.descriptors.iter()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.descriptors.iter().map(|d| d.name.clone()).collect()
    }

    /// Number of registered component types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct Foo {
        element: NodeId,
    }

    impl Component for Foo {
        fn element(&self) -> NodeId {
            self.element
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    impl Constructible for Foo {
        fn construct(_handler: &mut ComponentHandler, element: NodeId) -> ComponentResult<Self> {
            Ok(Foo { element })
        }
    }

    fn descriptor(name: &str, selector: &str) -> ComponentDescriptor {
        ComponentDescriptor::of::<Foo>(ComponentConfig::new(name, selector))
    }

    #[test]
    fn test_register_and_find() {
        let mut registry = ComponentRegistry::new();
        registry.register(descriptor("Foo", "js-foo")).unwrap();
        registry.register(descriptor("Bar", "js-bar")).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("Bar").map(|d| d.selector()), Some("js-bar"));
        assert_eq!(registry.find_by_selector("js-foo").map(|d| d.name()), Some("Foo"));
        assert_eq!(registry.find_by_type(TypeId::of::<Foo>()).map(|d| d.name()), Some("Foo"));
        assert!(registry.find("Baz").is_none());
        assert_eq!(registry.names(), vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_duplicates_rejected_without_mutation() {
        let mut registry = ComponentRegistry::new();
        registry.register(descriptor("Foo", "js-foo")).unwrap();

        assert_eq!(
            registry.register(descriptor("Other", "js-foo")),
            Err(ComponentError::DuplicateSelector {
                selector: "js-foo".to_string()
            })
        );
        assert_eq!(
            registry.register(descriptor("Foo", "js-other")),
            Err(ComponentError::DuplicateName {
                name: "Foo".to_string()
            })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reserved_name_rejected() {
        let mut registry = ComponentRegistry::new();
        let err = registry
            .register(descriptor(RESERVED_PROPERTY, "js-reserved"))
            .unwrap_err();

        assert!(err.is_registration_error());
        assert!(matches!(err, ComponentError::ReservedProperty { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut registry = ComponentRegistry::new();
        registry.register(descriptor("Foo", "js-foo")).unwrap();
        registry.register(descriptor("Bar", "js-bar")).unwrap();

        let old = registry.replace(descriptor("Foo", "js-foo-v2")).unwrap();
        assert_eq!(old.map(|d| d.selector().to_string()).as_deref(), Some("js-foo"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.position("Foo"), Some(0));
        assert_eq!(registry.find("Foo").map(|d| d.selector()), Some("js-foo-v2"));

        // Cannot take over another descriptor's selector.
        assert!(registry.replace(descriptor("Foo", "js-bar")).is_err());

        // Unknown names are appended.
        assert!(registry.replace(descriptor("Baz", "js-baz")).unwrap().is_none());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_add_callback_unknown_name() {
        let mut registry = ComponentRegistry::new();
        registry.register(descriptor("Foo", "js-foo")).unwrap();

        assert!(registry.add_callback("Foo", Rc::new(|_: &mut ComponentHandler, _: NodeId| {})));
        assert!(!registry.add_callback("Missing", Rc::new(|_: &mut ComponentHandler, _: NodeId| {})));
        assert_eq!(registry.find("Foo").map(|d| d.callback_count()), Some(1));
    }
}
