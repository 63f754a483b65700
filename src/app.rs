//! Native application shell: window, event loop and frame pacing

use std::sync::Arc;

use anyhow::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::assets::Assets;
use crate::input::{InputState, Key};
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{GameState, tick};
use crate::time::FrameClock;

/// How often the smoothed frame rate is logged when `show_fps` is on
const FPS_LOG_INTERVAL_FRAMES: u64 = 300;

/// Everything that exists once the window is up
struct Running {
    window: Arc<Window>,
    renderer: Renderer,
    game: GameState,
    input: InputState,
    clock: FrameClock,
}

pub struct App {
    settings: Settings,
    running: Option<Running>,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            running: None,
            error: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running> {
        let settings = &self.settings;
        let world_size = (settings.window_width, settings.window_height);

        let attributes = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(LogicalSize::new(world_size.0, world_size.1));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("creating window")?,
        );
        log::info!("Window created: {}x{}", world_size.0, world_size.1);

        let tuning = &settings.tuning;
        let assets = Assets::load(&settings.asset_dir, tuning);
        let stage = assets.stage(world_size.0, world_size.1, tuning);
        let renderer = Renderer::new(window.clone(), settings.vsync, world_size, &assets)?;
        let game = GameState::new(settings.resolve_seed(), stage, tuning.clone());

        Ok(Running {
            window,
            renderer,
            game,
            input: InputState::new(),
            clock: FrameClock::new(),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            running.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    running.renderer.resize(size.width, size.height);
                    log::debug!("Resized to {}x{}", size.width, size.height);
                }
            }

            WindowEvent::Focused(false) => running.input.clear(),

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let Some(key) = Key::from_key_code(code) else {
                    return;
                };
                match event.state {
                    ElementState::Pressed if event.repeat => {}
                    ElementState::Pressed => {
                        if key == Key::Escape {
                            log::info!("Escape pressed, exiting");
                            event_loop.exit();
                            return;
                        }
                        running.input.key_down(key);
                    }
                    ElementState::Released => running.input.key_up(key),
                }
            }

            WindowEvent::RedrawRequested => {
                let (width, height) = running.renderer.ctx.size;
                if width == 0 || height == 0 {
                    return;
                }

                running.clock.begin_frame();
                let dt = running.clock.dt();
                while running.clock.should_step() {
                    let input = running.input.tick_input();
                    tick(&mut running.game, &input, dt);
                    // One press drives one step
                    running.input.end_frame();
                }

                running.renderer.render(&running.game);

                if self.settings.show_fps && running.clock.frame_count % FPS_LOG_INTERVAL_FRAMES == 0 {
                    log::info!(
                        "{:.0} fps, {} steps in {:.1}s, phase {}",
                        running.clock.smoothed_fps,
                        running.clock.fixed_step_count,
                        running.clock.total_time,
                        running.game.phase.as_str()
                    );
                }
            }

            _ => {}
        }
    }
}

/// Open the window and run until it is closed
pub fn run(settings: Settings) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("creating event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    event_loop.run_app(&mut app).context("event loop")?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
