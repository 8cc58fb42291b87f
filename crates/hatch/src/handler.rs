//! The component handler: registration, upgrade and downgrade.

use crate::component::{Component, Constructible};
use crate::config::HandlerConfig;
use crate::error::{ComponentError, ComponentResult};
use crate::marker::{MarkerTable, encode_marker};
use crate::observer::{LifecycleEvent, LifecycleKind, LifecycleObserver, ObserverList};
use crate::registry::{ComponentConfig, ComponentDescriptor, ComponentRegistry, UpgradeCallback};
use hatch_core::alloc::{HashMap, HashSet, IndexMap};
use hatch_core::profiling::{profile_function, profile_scope};
use hatch_dom::{Document, DomEvent, IntoNodes, NodeId};
use std::any::TypeId;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Identifier of a tracked instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

/// A created instance together with the descriptor name it was built from.
struct TrackedInstance {
    element: NodeId,
    component: String,
    instance: Box<dyn Component>,
}

/// Owns a document, the registered component types and every instance
/// created from them.
///
/// All operations are synchronous. Constructors and upgrade callbacks get
/// `&mut ComponentHandler` and may upgrade further elements while an
/// upgrade is in progress.
pub struct ComponentHandler {
    document: Document,
    config: HandlerConfig,
    registry: ComponentRegistry,
    /// Tracked instances in creation order.
    instances: IndexMap<InstanceId, TrackedInstance>,
    next_instance: u64,
    markers: MarkerTable,
    /// Element/name pairs whose constructor is currently running.
    pending: HashSet<(NodeId, String)>,
    /// Widget slots: element -> component name -> instance.
    widgets: HashMap<NodeId, IndexMap<String, InstanceId>>,
    observers: ObserverList,
}

impl ComponentHandler {
    /// Create a handler over `document` with the default configuration.
    pub fn new(document: Document) -> Self {
        Self::with_config(document, HandlerConfig::default())
    }

    pub fn with_config(document: Document, config: HandlerConfig) -> Self {
        Self {
            document,
            config,
            registry: ComponentRegistry::new(),
            instances: IndexMap::default(),
            next_instance: 0,
            markers: MarkerTable::default(),
            pending: HashSet::new(),
            widgets: HashMap::new(),
            observers: ObserverList::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    // -- Registration --

    /// Register component type `T`.
    ///
    /// # Errors
    /// Fails with [`ComponentError::DuplicateSelector`],
    /// [`ComponentError::DuplicateName`] or [`ComponentError::ReservedProperty`].
    pub fn register<T: Constructible>(&mut self, config: ComponentConfig) -> ComponentResult<()> {
        let descriptor = ComponentDescriptor::of::<T>(config);
        debug!(
            "Registering component '{}' for selector '{}' ({})",
            descriptor.name(),
            descriptor.selector(),
            descriptor.type_name()
        );
        self.registry.register(descriptor)
    }

    /// Redefine the component registered under `config.name` in place.
    ///
    /// Returns `true` when an existing descriptor was replaced and `false`
    /// when the name was new and the descriptor appended. Upgrade callbacks
    /// of the replaced descriptor are dropped; existing instances stay.
    pub fn redefine<T: Constructible>(&mut self, config: ComponentConfig) -> ComponentResult<bool> {
        let descriptor = ComponentDescriptor::of::<T>(config);
        let name = descriptor.name().to_string();
        let replaced = self.registry.replace(descriptor)?.is_some();
        debug!("Redefined component '{}' (replaced: {})", name, replaced);
        Ok(replaced)
    }

    /// Run `callback` after every future upgrade of component `name`.
    ///
    /// Unknown names are ignored; the return value reports whether the
    /// callback was attached.
    pub fn on_upgraded<F>(&mut self, name: &str, callback: F) -> bool
    where
        F: Fn(&mut ComponentHandler, NodeId) + 'static,
    {
        let callback: UpgradeCallback = Rc::new(callback);
        let attached = self.registry.add_callback(name, callback);
        if !attached {
            trace!("Ignoring upgrade callback for unregistered component '{}'", name);
        }
        attached
    }

    /// Observe every upgrade, whatever the component type.
    pub fn on_any_upgraded<F>(&mut self, observer: F)
    where
        F: Fn(&LifecycleEvent) + 'static,
    {
        let observer: LifecycleObserver = Rc::new(observer);
        self.observers.push(LifecycleKind::Upgraded, observer);
    }

    /// Observe every downgrade, whatever the component type.
    pub fn on_any_downgraded<F>(&mut self, observer: F)
    where
        F: Fn(&LifecycleEvent) + 'static,
    {
        let observer: LifecycleObserver = Rc::new(observer);
        self.observers.push(LifecycleKind::Downgraded, observer);
    }

    // -- Upgrade --

    /// Page-load bootstrap: tag the root with the ready class, then upgrade
    /// every registered component found in the document.
    pub fn load(&mut self) -> ComponentResult<()> {
        let root = self.document.root();
        let ready_class = self.config.ready_class.clone();
        self.document.add_class(root, &ready_class)?;
        self.upgrade_all()?;
        hatch_core::profiling::new_frame();
        Ok(())
    }

    /// Upgrade every registered component type across the document, in
    /// registration order.
    pub fn upgrade_all(&mut self) -> ComponentResult<()> {
        profile_function!();
        for name in self.registry.names() {
            self.upgrade_dom(Some(&name), None)?;
        }
        Ok(())
    }

    /// Upgrade the document for one component type or selector.
    ///
    /// - neither argument: same as [`upgrade_all`](Self::upgrade_all)
    /// - `name` only: the selector comes from the registered descriptor
    /// - `selector` given: every connected element carrying it is upgraded,
    ///   as `name` when given, otherwise for all matching types
    ///
    /// # Errors
    /// [`ComponentError::UnregisteredComponent`] when `name` is unknown.
    pub fn upgrade_dom(&mut self, name: Option<&str>, selector: Option<&str>) -> ComponentResult<()> {
        let selector = match (name, selector) {
            (None, None) => return self.upgrade_all(),
            (_, Some(selector)) => selector.to_string(),
            (Some(name), None) => self
                .registry
                .find(name)
                .map(|d| d.selector().to_string())
                .ok_or_else(|| ComponentError::UnregisteredComponent {
                    name: name.to_string(),
                })?,
        };

        let elements = self.document.query_class_all(&selector);
        trace!("Upgrading {} element(s) matching '{}'", elements.len(), selector);
        for element in elements {
            self.upgrade_element(element, name)?;
        }
        Ok(())
    }

    /// Upgrade a single element.
    ///
    /// Without `name`, every registered type whose selector is in the
    /// element's class list and that is not yet applied is upgraded, in
    /// registration order. With `name`, only that type is considered.
    /// Already applied types are skipped, so repeated calls are no-ops.
    ///
    /// # Errors
    /// - [`ComponentError::InvalidElement`] when `element` is not an element
    /// - [`ComponentError::UnregisteredComponent`] when `name` is unknown
    /// - any error returned by a component constructor; types processed
    ///   before the failing one stay applied
    pub fn upgrade_element(&mut self, element: NodeId, name: Option<&str>) -> ComponentResult<()> {
        profile_function!();
        if !self.document.is_element(element) {
            return Err(ComponentError::InvalidElement { node: element });
        }

        let candidates: Vec<String> = match name {
            None => self
                .registry
                .iter()
                .filter(|d| self.document.has_class(element, d.selector()))
                .filter(|d| !self.is_upgraded(element, d.name()))
                .map(|d| d.name().to_string())
                .collect(),
            Some(name) => {
                if self.registry.find(name).is_none() {
                    return Err(ComponentError::UnregisteredComponent {
                        name: name.to_string(),
                    });
                }
                if self.is_upgraded(element, name) {
                    Vec::new()
                } else {
                    vec![name.to_string()]
                }
            }
        };

        for component in candidates {
            // A constructor earlier in this loop may already have upgraded
            // this element for `component` through a nested call.
            if self.is_upgraded(element, &component) {
                continue;
            }
            self.upgrade_one(element, component)?;
        }
        Ok(())
    }

    fn upgrade_one(&mut self, element: NodeId, component: String) -> ComponentResult<()> {
        profile_scope!("upgrade_one");
        let Some(descriptor) = self.registry.find(&component) else {
            return Err(ComponentError::UnregisteredComponent { name: component });
        };
        let factory = descriptor.factory();
        let is_widget = descriptor.is_widget();

        let key = (element, component.clone());
        self.pending.insert(key.clone());
        let constructed = (*factory)(self, element);
        self.pending.remove(&key);

        let instance = match constructed {
            Ok(instance) => instance,
            Err(e) => {
                warn!("Failed to upgrade {} as '{}': {}", element, component, e);
                return Err(e);
            }
        };

        self.add_marker(element, &component);

        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        self.instances.insert(
            id,
            TrackedInstance {
                element,
                component: component.clone(),
                instance,
            },
        );

        let callbacks = self
            .registry
            .find(&component)
            .map(ComponentDescriptor::callbacks)
            .unwrap_or_default();
        for callback in callbacks {
            (*callback)(self, element);
        }

        // A callback may already have downgraded the element again.
        if is_widget && self.instances.contains_key(&id) {
            self.widgets
                .entry(element)
                .or_default()
                .insert(component.clone(), id);
        }

        debug!("Upgraded {} as '{}'", element, component);
        self.notify(LifecycleKind::Upgraded, element, component);
        Ok(())
    }

    /// Upgrade `elements` and every element below them, in pre-order.
    ///
    /// Accepts a single node, a slice, a vector or a [`NodeList`](hatch_dom::NodeList).
    /// Non-element entries are skipped. Children are read after their parent
    /// was upgraded, so markup a constructor injects is upgraded as well.
    /// The walk uses an explicit stack, so nesting depth is not bounded by
    /// the call stack.
    pub fn upgrade_elements(&mut self, elements: impl IntoNodes) -> ComponentResult<()> {
        profile_function!();
        let mut stack = elements.into_nodes();
        stack.reverse();
        while let Some(element) = stack.pop() {
            if !self.document.is_element(element) {
                continue;
            }
            self.upgrade_element(element, None)?;
            let children = self.document.element_children(element);
            stack.extend(children.as_slice().iter().rev().copied());
        }
        Ok(())
    }

    // -- Downgrade --

    /// Downgrade every instance attached to `nodes`.
    ///
    /// Accepts a single node, a slice, a vector or a [`NodeList`](hatch_dom::NodeList).
    /// Nodes without instances are skipped. A node that was removed from the
    /// document but still has tracked instances is downgraded normally.
    ///
    /// # Errors
    /// [`ComponentError::InvalidArgument`] when a node is neither in the
    /// document nor tracked. Nothing is downgraded in that case.
    pub fn downgrade(&mut self, nodes: impl IntoNodes) -> ComponentResult<()> {
        profile_function!();
        let nodes = nodes.into_nodes();
        if let Some(&node) = nodes
            .iter()
            .find(|node| !self.document.contains(**node) && !self.is_tracked(**node))
        {
            return Err(ComponentError::InvalidArgument { node });
        }

        for node in nodes {
            let ids: Vec<InstanceId> = self
                .instances
                .iter()
                .filter(|(_, tracked)| tracked.element == node)
                .map(|(id, _)| *id)
                .collect();
            for id in ids {
                self.deconstruct(id);
            }
        }
        Ok(())
    }

    /// Downgrade `root` and every tracked element below it.
    pub fn downgrade_tree(&mut self, root: NodeId) -> ComponentResult<()> {
        if !self.document.contains(root) {
            return self.downgrade(root);
        }
        let nodes: Vec<NodeId> = self
            .document
            .descendants(root)
            .into_iter()
            .filter(|node| self.is_tracked(*node))
            .collect();
        self.downgrade(nodes)
    }

    /// Downgrade every instance in the subtree at `node`, then remove the
    /// subtree from the document and drop all bookkeeping for it.
    ///
    /// Returns the removed node ids in pre-order.
    pub fn remove(&mut self, node: NodeId) -> ComponentResult<Vec<NodeId>> {
        self.downgrade_tree(node)?;
        let removed = self.document.remove(node)?;
        for id in &removed {
            self.markers.forget(*id);
            self.widgets.remove(id);
        }
        trace!("Removed {} node(s) with their component state", removed.len());
        Ok(removed)
    }

    fn deconstruct(&mut self, id: InstanceId) {
        let Some(mut tracked) = self.instances.shift_remove(&id) else {
            return;
        };
        let element = tracked.element;
        let component = std::mem::take(&mut tracked.component);

        tracked.instance.downgrade(&mut self.document);
        self.remove_marker(element, &component);

        if let Some(slots) = self.widgets.get_mut(&element) {
            if slots.get(&component) == Some(&id) {
                slots.shift_remove(&component);
            }
            if slots.is_empty() {
                self.widgets.remove(&element);
            }
        }

        debug!("Downgraded {} from '{}'", element, component);
        self.notify(LifecycleKind::Downgraded, element, component);
    }

    // -- Markers --

    fn marker_attribute(&self, element: NodeId) -> Option<String> {
        self.document.attribute(element, &self.config.marker_attribute)
    }

    /// Record `component` on `element` and mirror the set to the attribute
    /// in one step.
    fn add_marker(&mut self, element: NodeId, component: &str) {
        let attribute = self.marker_attribute(element);
        let names = self.markers.entry(element, attribute.as_deref());
        names.insert(component.to_string());
        let encoded = encode_marker(names.iter().map(String::as_str));
        self.mirror_marker(element, &encoded);
    }

    fn remove_marker(&mut self, element: NodeId, component: &str) {
        let attribute = self.marker_attribute(element);
        let names = self.markers.entry(element, attribute.as_deref());
        names.shift_remove(component);
        let encoded = encode_marker(names.iter().map(String::as_str));
        if !self.document.contains(element) {
            if !self.is_tracked(element) {
                self.markers.forget(element);
            }
            return;
        }
        self.mirror_marker(element, &encoded);
    }

    fn mirror_marker(&mut self, element: NodeId, encoded: &str) {
        if !self.config.mirror_marker_attribute {
            return;
        }
        let attribute = self.config.marker_attribute.clone();
        if let Err(e) = self.document.set_attribute(element, &attribute, encoded) {
            warn!("Could not write upgrade marker on {}: {}", element, e);
        }
    }

    // -- Notification --

    fn notify(&mut self, kind: LifecycleKind, element: NodeId, component: String) {
        if self.config.dispatch_dom_events && self.document.contains(element) {
            let event_name = match kind {
                LifecycleKind::Upgraded => &self.config.upgraded_event,
                LifecycleKind::Downgraded => &self.config.downgraded_event,
            };
            let event = DomEvent::new(event_name.as_str(), element)
                .with_bubbles(true)
                .with_cancelable(true);
            if let Err(e) = self.document.dispatch_event(&event) {
                warn!("Failed to dispatch '{}' on {}: {}", event.kind, element, e);
            }
        }

        let observers = self.observers.snapshot(kind);
        if observers.is_empty() {
            return;
        }
        let event = LifecycleEvent {
            kind,
            element,
            component,
        };
        for observer in observers {
            (*observer)(&event);
        }
    }

    // -- Queries --

    /// Whether `element` has `name` applied (or being applied right now).
    pub fn is_upgraded(&self, element: NodeId, name: &str) -> bool {
        if self.pending.contains(&(element, name.to_string())) {
            return true;
        }
        match self.markers.get(element) {
            Some(names) => names.contains(name),
            None => self
                .marker_attribute(element)
                .is_some_and(|value| crate::marker::decode_marker(&value).contains(name)),
        }
    }

    /// Names applied to `element`, in application order.
    pub fn upgraded_names(&self, element: NodeId) -> Vec<String> {
        match self.markers.get(element) {
            Some(names) => names.iter().cloned().collect(),
            None => self
                .marker_attribute(element)
                .map(|value| crate::marker::decode_marker(&value).into_iter().collect())
                .unwrap_or_default(),
        }
    }

    fn is_tracked(&self, element: NodeId) -> bool {
        self.instances.values().any(|tracked| tracked.element == element)
    }

    /// Tracked instances built from `element`, in creation order.
    pub fn instances_for(&self, element: NodeId) -> Vec<&dyn Component> {
        self.instances
            .values()
            .filter(|tracked| tracked.element == element)
            .map(|tracked| &*tracked.instance)
            .collect()
    }

    /// `(element, component name)` for every tracked instance, in creation order.
    pub fn tracked(&self) -> Vec<(NodeId, &str)> {
        self.instances
            .values()
            .map(|tracked| (tracked.element, tracked.component.as_str()))
            .collect()
    }

    /// Number of tracked instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Widget instance attached to `element` under `name`.
    pub fn widget_by_name(&self, element: NodeId, name: &str) -> Option<&dyn Component> {
        let id = self.widgets.get(&element)?.get(name)?;
        self.instances.get(id).map(|tracked| &*tracked.instance)
    }

    /// Mutable widget instance attached to `element` under `name`.
    pub fn widget_by_name_mut(&mut self, element: NodeId, name: &str) -> Option<&mut dyn Component> {
        let id = *self.widgets.get(&element)?.get(name)?;
        self.instances.get_mut(&id).map(|tracked| &mut *tracked.instance)
    }

    /// Typed widget access: the `T` attached to `element`, if `T` is
    /// registered as a widget and `element` was upgraded to it.
    pub fn widget<T: Component>(&self, element: NodeId) -> Option<&T> {
        let name = self.registry.find_by_type(TypeId::of::<T>())?.name();
        self.widget_by_name(element, name)?.as_any().downcast_ref::<T>()
    }

    /// Typed mutable widget access.
    pub fn widget_mut<T: Component>(&mut self, element: NodeId) -> Option<&mut T> {
        let name = self.registry.find_by_type(TypeId::of::<T>())?.name().to_string();
        self.widget_by_name_mut(element, &name)?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Typed mutable widget access together with the document, for widget
    /// methods that update their element.
    pub fn widget_with_document<T: Component>(&mut self, element: NodeId) -> Option<(&mut T, &mut Document)> {
        let name = self.registry.find_by_type(TypeId::of::<T>())?.name();
        let id = *self.widgets.get(&element)?.get(name)?;
        let widget = self
            .instances
            .get_mut(&id)?
            .instance
            .as_any_mut()
            .downcast_mut::<T>()?;
        Some((widget, &mut self.document))
    }
}

impl Default for ComponentHandler {
    fn default() -> Self {
        Self::new(Document::new())
    }
}
