use stagecraft_common::ComponentId;
use stagecraft_input::InputHub;
use stagecraft_physics::PhysicsWorld;
use stagecraft_render::{PerspectiveCamera, Scene};
use std::any::Any;

/// Mutable engine state every component works against.
///
/// Owned by the engine and lent to components for the duration of one
/// lifecycle call.
#[derive(Debug, Default)]
pub struct EngineContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub physics: PhysicsWorld,
    pub input: InputHub,
}

impl EngineContext {
    pub fn new(scene: Scene, camera: PerspectiveCamera, physics: PhysicsWorld) -> Self {
        Self {
            scene,
            camera,
            physics,
            input: InputHub::new(),
        }
    }
}

/// Type-erasure helpers, implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A behavior attached to a [`GameObject`](crate::GameObject).
///
/// Lifecycle: `init` once when the engine starts (or when the owning object
/// joins a running engine), `on_update` every frame, `before_remove` once
/// right before the component is detached.
pub trait Component: AsAny {
    /// Stable handle, unique per component instance.
    fn id(&self) -> ComponentId;

    /// Display name. Not unique; lookups by name return the first match.
    fn name(&self) -> &str;

    fn init(&mut self, _ctx: &mut EngineContext) {}

    fn on_update(&mut self, _ctx: &mut EngineContext) {}

    fn before_remove(&mut self, _ctx: &mut EngineContext) {}
}

impl dyn Component {
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    pub fn is<T: Component>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
