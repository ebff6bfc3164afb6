use crate::animation::Animation;
use crate::settings::EngineSettings;
use glam::Vec3;
use stagecraft_common::{ComponentId, ObjectId};
use stagecraft_ecs::{Component, EngineContext, GameObject};
use stagecraft_physics::PhysicsWorld;
use stagecraft_render::{Color, Light, PerspectiveCamera, Renderer, Scene};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Lifecycle of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Built, components not yet initialized.
    Setup,
    Running,
    /// Stopped through a [`StopHandle`]. Further updates do nothing.
    Stopped,
}

/// Cloneable signal that stops an engine's frame loop.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Owns the renderer, the shared engine state and the object and animation pools.
///
/// Every [`update`](Self::update) runs animations, then component updates,
/// then one fixed physics step, then renders. The host decides when frames
/// happen: a window's redraw callback, or [`run`](Self::run) for headless use.
pub struct Engine<R: Renderer> {
    settings: EngineSettings,
    renderer: R,
    ctx: EngineContext,
    object_pool: Vec<GameObject>,
    animation_pool: Vec<Animation>,
    state: EngineState,
    stop: StopHandle,
    frames: u64,
}

impl<R: Renderer> Engine<R> {
    /// Build an engine: renderer, camera, scene, lights, then physics.
    pub fn new(settings: EngineSettings, renderer: R) -> Self {
        let viewport = renderer.viewport();
        tracing::debug!(width = viewport.width, height = viewport.height, "renderer ready");

        let camera = Self::init_camera(&settings, viewport.aspect());
        let mut scene = Scene::new();
        tracing::debug!("scene ready");
        Self::init_lights(&mut scene);
        let physics = PhysicsWorld::new(settings.physics.gravity, settings.physics.time_step);
        tracing::debug!(
            gravity = ?settings.physics.gravity,
            time_step = settings.physics.time_step,
            "physics ready"
        );

        Self {
            settings,
            renderer,
            ctx: EngineContext::new(scene, camera, physics),
            object_pool: Vec::new(),
            animation_pool: Vec::new(),
            state: EngineState::Setup,
            stop: StopHandle::default(),
            frames: 0,
        }
    }

    fn init_camera(settings: &EngineSettings, aspect: f32) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(
            settings.camera.fov,
            aspect,
            settings.camera.near,
            settings.camera.far,
        );
        camera.position = Vec3::new(0.0, 5.0, 5.0);
        camera.look_at(Vec3::ZERO);
        tracing::debug!(fov = settings.camera.fov, aspect, "camera ready");
        camera
    }

    fn init_lights(scene: &mut Scene) {
        scene.add_light(Light::Directional {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vec3::new(0.0, 10.0, 0.0),
        });
        scene.add_light(Light::Ambient {
            color: Color::WHITE,
            intensity: 1.0,
        });
        tracing::debug!(lights = scene.lights().len(), "lights ready");
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Append a game object. Objects joining a running engine are initialized
    /// on the spot.
    pub fn add_game_object(&mut self, mut object: GameObject) -> ObjectId {
        let id = object.id();
        if self.state == EngineState::Running {
            object.init_all(&mut self.ctx);
        }
        tracing::debug!(object = %id.0, components = object.len(), "game object added");
        self.object_pool.push(object);
        id
    }

    pub fn game_object(&self, id: ObjectId) -> Option<&GameObject> {
        self.object_pool.iter().find(|o| o.id() == id)
    }

    pub fn game_object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.object_pool.iter_mut().find(|o| o.id() == id)
    }

    /// Objects in pool order.
    pub fn game_objects(&self) -> impl Iterator<Item = &GameObject> {
        self.object_pool.iter()
    }

    /// Detach one component from an object, running its `before_remove`.
    pub fn remove_component(
        &mut self,
        object: ObjectId,
        component: ComponentId,
    ) -> Option<Box<dyn Component>> {
        let target = self.object_pool.iter_mut().find(|o| o.id() == object)?;
        target.remove_component(component, &mut self.ctx)
    }

    pub fn remove_component_by_name(
        &mut self,
        object: ObjectId,
        name: &str,
    ) -> Option<Box<dyn Component>> {
        let target = self.object_pool.iter_mut().find(|o| o.id() == object)?;
        target.remove_component_by_name(name, &mut self.ctx)
    }

    /// Register a callback that runs on `target` at the start of every frame.
    pub fn add_animation<T, F>(&mut self, target: T, callback: F)
    where
        T: 'static,
        F: FnMut(&mut T, &mut EngineContext) + 'static,
    {
        self.animation_pool.push(Animation::new(target, callback));
    }

    /// Initialize every component. Only the first call has an effect.
    pub fn start(&mut self) {
        if self.state != EngineState::Setup {
            tracing::warn!(state = ?self.state, "engine already started");
            return;
        }
        for object in &mut self.object_pool {
            object.init_all(&mut self.ctx);
        }
        self.state = EngineState::Running;
        tracing::info!(
            objects = self.object_pool.len(),
            bodies = self.ctx.physics.body_count(),
            "engine started"
        );
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Run one frame. Returns `None` once the engine has been stopped.
    pub fn update(&mut self) -> Option<R::Output> {
        if self.stop.is_stopped() {
            if self.state != EngineState::Stopped {
                self.state = EngineState::Stopped;
                tracing::info!(frames = self.frames, "engine stopped");
            }
            return None;
        }

        for animation in &mut self.animation_pool {
            animation.on_update(&mut self.ctx);
        }
        for object in &mut self.object_pool {
            object.update_all(&mut self.ctx);
        }
        self.ctx.physics.step();
        let output = self.renderer.render(&self.ctx.scene, &self.ctx.camera);
        self.frames += 1;
        tracing::trace!(frame = self.frames, "frame done");
        Some(output)
    }

    /// Start if needed, then tick until stopped or `frame_limit` frames have
    /// run. Returns the number of frames ticked by this call.
    pub fn run(&mut self, frame_limit: Option<u64>) -> u64 {
        if self.state == EngineState::Setup {
            self.start();
        }
        let mut ticked = 0;
        while frame_limit.is_none_or(|limit| ticked < limit) {
            if self.update().is_none() {
                break;
            }
            ticked += 1;
        }
        ticked
    }

    /// Resize the render target and keep the camera aspect in step.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.ctx.camera.aspect = self.renderer.viewport().aspect();
        tracing::debug!(width, height, "resized");
    }
}
