use crate::component::{Component, EngineContext};
use stagecraft_common::{ComponentId, ObjectId};

/// An ordered bundle of components sharing one identity.
///
/// Components run in insertion order for both `init` and `on_update`.
pub struct GameObject {
    id: ObjectId,
    name: Option<String>,
    components: Vec<Box<dyn Component>>,
}

impl GameObject {
    /// Create an unnamed object with no components.
    pub fn new() -> Self {
        Self {
            id: ObjectId::new(),
            name: None,
            components: Vec::new(),
        }
    }

    /// Create an empty object with a label used in logs.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new()
        }
    }

    /// Identity of this object.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Label given at construction, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Append a component and return its id.
    pub fn add_component(&mut self, component: impl Component) -> ComponentId {
        self.add_boxed(Box::new(component))
    }

    /// Append an already boxed component and return its id.
    pub fn add_boxed(&mut self, component: Box<dyn Component>) -> ComponentId {
        let id = component.id();
        tracing::trace!(object = %self.id.0, component = %id, name = component.name(), "component added");
        self.components.push(component);
        id
    }

    /// First component whose display name equals `name`.
    pub fn get_component_by_name(&self, name: &str) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// Component with exactly this id.
    pub fn get_component(&self, id: ComponentId) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref())
    }

    /// First component of type `T`.
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components.iter().find_map(|c| (**c).downcast_ref::<T>())
    }

    /// First component of type `T`, mutably.
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|c| (**c).downcast_mut::<T>())
    }

    /// Detach the first component named `name`, calling its `before_remove`.
    /// Does nothing when no component has that name.
    pub fn remove_component_by_name(
        &mut self,
        name: &str,
        ctx: &mut EngineContext,
    ) -> Option<Box<dyn Component>> {
        let Some(index) = self.components.iter().position(|c| c.name() == name) else {
            tracing::warn!(object = %self.id.0, name, "no component with that name");
            return None;
        };
        Some(self.remove_at(index, ctx))
    }

    /// Detach the component with this id, calling its `before_remove`.
    pub fn remove_component(
        &mut self,
        id: ComponentId,
        ctx: &mut EngineContext,
    ) -> Option<Box<dyn Component>> {
        let index = self.components.iter().position(|c| c.id() == id)?;
        Some(self.remove_at(index, ctx))
    }

    fn remove_at(&mut self, index: usize, ctx: &mut EngineContext) -> Box<dyn Component> {
        let mut component = self.components.remove(index);
        component.before_remove(ctx);
        tracing::debug!(object = %self.id.0, component = %component.id(), name = component.name(), "component removed");
        component
    }

    /// Run `init` on every component in insertion order.
    pub fn init_all(&mut self, ctx: &mut EngineContext) {
        for component in &mut self.components {
            component.init(ctx);
        }
    }

    /// Run `on_update` on every component in insertion order.
    pub fn update_all(&mut self, ctx: &mut EngineContext) {
        for component in &mut self.components {
            component.on_update(ctx);
        }
    }

    /// Display names in order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name())
    }

    /// Number of attached components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("components", &self.component_names().collect::<Vec<_>>())
            .finish()
    }
}
