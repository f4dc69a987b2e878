//! Meadow - grass, sky and a day/night switch

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use meadow::assets::AssetLoader;
use meadow::core::{
    camera::Camera,
    camera_controller::OrbitCameraController,
    logging,
    time::FrameTimer,
};
use meadow::frame::FrameLoop;
use meadow::render::Renderer;
use meadow::scene::SceneConfig;

/// Command-line options.
#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    night: bool,
    seed: Option<u64>,
}

impl Options {
    fn parse(args: &[String]) -> Self {
        let mut options = Self::default();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    options.config = args.get(i + 1).map(PathBuf::from);
                    i += 1;
                }
                "--night" | "-n" => options.night = true,
                "--seed" | "-s" => {
                    options.seed = args.get(i + 1).and_then(|s| s.parse().ok());
                    i += 1;
                }
                other => log::warn!("Ignoring unknown argument {}", other),
            }
            i += 1;
        }
        options
    }
}

struct App {
    config: SceneConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    loader: AssetLoader,
    camera: Camera,
    controller: OrbitCameraController,
    timer: FrameTimer,
    frame_loop: FrameLoop,
    dragging: bool,
    cursor: Option<PhysicalPosition<f64>>,
}

impl App {
    fn new(config: SceneConfig, night: bool) -> meadow::core::Result<Self> {
        let loader = AssetLoader::new()?;
        let mut frame_loop = FrameLoop::new(&config.atmosphere, &config.particles, night)?;
        frame_loop.load_title_font(loader.load_font(&config.assets.title_font));
        let controller = OrbitCameraController::new(&config.camera);
        let mut camera = Camera::new(controller.eye(), config.camera.fov_degrees, 16.0 / 9.0);
        camera.look_at(controller.target());
        Ok(Self {
            loader,
            config,
            window: None,
            renderer: None,
            camera,
            controller,
            timer: FrameTimer::new(),
            frame_loop,
            dragging: false,
            cursor: None,
        })
    }

    fn redraw(&mut self) {
        let raw_dt = self.timer.tick();
        let state = self.frame_loop.tick(raw_dt);
        self.controller.update(&mut self.camera, state.dt);

        if let Some(renderer) = &mut self.renderer {
            renderer.poll_assets();
            if let Err(e) = renderer.render(&state, &self.camera) {
                log::error!("Render failed: {}", e);
            }
        }

        if let Some(window) = &self.window {
            let mode = if self.frame_loop.controller().is_night() { "night" } else { "day" };
            window.set_title(&format!("Meadow - {:.1} FPS | {} | N=toggle, 1=day, 2=night, drag=orbit", self.timer.fps(), mode));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Meadow")
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.camera.set_aspect(size.width as f32, size.height as f32);
        log::info!("Window created: {}x{}", size.width, size.height);

        match pollster::block_on(Renderer::new(window.clone(), &self.config, &self.loader)) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("Failed to create renderer: {}", e);
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.camera.set_aspect(size.width as f32, size.height as f32);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(size.width, size.height);
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                        PhysicalKey::Code(KeyCode::KeyN) => self.frame_loop.toggle_night(),
                        PhysicalKey::Code(KeyCode::Digit1) => self.frame_loop.set_night(false),
                        PhysicalKey::Code(KeyCode::Digit2) => self.frame_loop.set_night(true),
                        _ => {}
                    }
                }
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.dragging = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some(last)) = (self.dragging, self.cursor) {
                    let height = self.renderer.as_ref().map_or(0, |r| r.size().1) as f32;
                    self.controller.drag(
                        (position.x - last.x) as f32,
                        (position.y - last.y) as f32,
                        height,
                    );
                }
                self.cursor = Some(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    logging::init();
    log::info!("Meadow starting...");

    let args: Vec<String> = std::env::args().collect();
    let options = Options::parse(&args);

    let config = match &options.config {
        Some(path) => match SceneConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SceneConfig::default(),
    };
    let config = match options.seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    };

    let mut app = match App::new(config, options.night) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("meadow").chain(list.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let options = Options::parse(&args(&[]));
        assert!(options.config.is_none());
        assert!(!options.night);
        assert!(options.seed.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let options = Options::parse(&args(&["--config", "scene.json", "--night", "--seed", "42"]));
        assert_eq!(options.config, Some(PathBuf::from("scene.json")));
        assert!(options.night);
        assert_eq!(options.seed, Some(42));
    }

    #[test]
    fn test_parse_bad_seed_ignored() {
        let options = Options::parse(&args(&["--seed", "many"]));
        assert!(options.seed.is_none());
    }
}
