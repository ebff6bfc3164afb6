use stagecraft_ecs::EngineContext;

/// A per-frame callback bound to a target value.
///
/// The target is moved into the animation and handed back to the callback on
/// every tick, together with the engine context.
pub struct Animation {
    tick: Box<dyn FnMut(&mut EngineContext)>,
}

impl Animation {
    pub fn new<T, F>(target: T, mut callback: F) -> Self
    where
        T: 'static,
        F: FnMut(&mut T, &mut EngineContext) + 'static,
    {
        let mut target = target;
        Self {
            tick: Box::new(move |ctx| callback(&mut target, ctx)),
        }
    }

    pub fn on_update(&mut self, ctx: &mut EngineContext) {
        (self.tick)(ctx);
    }
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation").finish_non_exhaustive()
    }
}
