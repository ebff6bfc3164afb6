use anyhow::{Context, Result};
use clap::Parser;
use stagecraft_engine::{Engine, EngineSettings, populate_sandbox};
use stagecraft_input::Key;
use stagecraft_render_wgpu::SurfaceRenderer;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "stagecraft-desktop", about = "Stagecraft sandbox in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn movement_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::Forward),
        KeyCode::KeyA => Some(Key::Left),
        KeyCode::KeyS => Some(Key::Back),
        KeyCode::KeyD => Some(Key::Right),
        _ => None,
    }
}

struct App {
    settings: EngineSettings,
    engine: Option<Engine<SurfaceRenderer>>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            engine: None,
            error: None,
        }
    }

    fn create_engine(&self, event_loop: &ActiveEventLoop) -> Result<Engine<SurfaceRenderer>> {
        let window = &self.settings.window;
        let attrs = Window::default_attributes()
            .with_title(window.title.clone())
            .with_inner_size(PhysicalSize::new(window.width, window.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("creating window")?,
        );
        let renderer = SurfaceRenderer::new(window).context("initializing GPU")?;

        let mut engine = Engine::new(self.settings.clone(), renderer);
        populate_sandbox(&mut engine);
        engine.start();
        Ok(engine)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() {
            return;
        }
        match self.create_engine(event_loop) {
            Ok(engine) => self.engine = Some(engine),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                engine.stop_handle().stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                engine.resize(size.width, size.height);
            }
            WindowEvent::Focused(false) => {
                engine.context_mut().input.release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    engine.stop_handle().stop();
                    event_loop.exit();
                    return;
                }
                if let Some(key) = movement_key(code) {
                    let input = &mut engine.context_mut().input;
                    match state {
                        ElementState::Pressed => input.key_down(key),
                        ElementState::Released => input.key_up(key),
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if engine.update().is_none() {
                    event_loop.exit();
                    return;
                }
                engine.renderer().window().request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = &self.engine {
            engine.renderer().window().request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let settings = match &cli.config {
        Some(path) => EngineSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => EngineSettings::default(),
    };

    tracing::info!("stagecraft-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.error {
        return Err(err);
    }
    if let Some(engine) = &app.engine {
        tracing::info!(frames = engine.frame_count(), "stagecraft-desktop exiting");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_maps_to_movement_keys() {
        assert_eq!(movement_key(KeyCode::KeyW), Some(Key::Forward));
        assert_eq!(movement_key(KeyCode::KeyA), Some(Key::Left));
        assert_eq!(movement_key(KeyCode::KeyS), Some(Key::Back));
        assert_eq!(movement_key(KeyCode::KeyD), Some(Key::Right));
        assert_eq!(movement_key(KeyCode::Space), None);
    }
}
