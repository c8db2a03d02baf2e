//! Player application implementing winit ApplicationHandler
//!
//! Every redraw is one display refresh: the driver runs a due frame on the
//! software canvas, then the presenter puts the canvas on screen.

use crate::animation::{build_canvas, build_driver};
use anyhow::{Context, Result};
use log::{error, info, warn};
use pinkboard_particles::settings::Settings;
use pinkboard_render::{Canvas, FramePresenter, RenderContext};
use pinkboard_runtime::AnimationDriver;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

#[derive(Debug, Clone)]
pub struct PlayerOptions {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            seed: None,
        }
    }
}

pub struct PlayerApp {
    settings: Settings,
    options: PlayerOptions,

    driver: Option<AnimationDriver<Canvas>>,
    canvas: Option<Canvas>,

    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    presenter: Option<FramePresenter>,

    /// Fatal startup error, surfaced once the event loop returns
    init_error: Option<anyhow::Error>,
}

impl PlayerApp {
    pub fn new(settings: Settings, options: PlayerOptions) -> Self {
        Self {
            settings,
            options,
            driver: None,
            canvas: None,
            window: None,
            render_context: None,
            presenter: None,
            init_error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.init_error.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title("Pinkboard")
            .with_inner_size(PhysicalSize::new(self.options.width, self.options.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        if self.options.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let render_context = pollster::block_on(RenderContext::new(window.clone()))
            .context("Failed to initialize GPU")?;
        let presenter = FramePresenter::new(&render_context.device, render_context.format());

        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));
        let canvas =
            build_canvas(&self.settings, width, height).context("Failed to allocate canvas")?;

        let mut driver = build_driver(
            &self.settings,
            pinkboard_runtime::MonotonicClock::new(),
            self.options.seed,
        )
        .context("Failed to build animation")?;
        driver.set_displayed_size(width, height);
        driver.start(Instant::now());

        info!(
            "Window ready at {}x{} (falling text {})",
            width,
            height,
            if canvas.has_text() { "on" } else { "off" }
        );

        self.window = Some(window);
        self.render_context = Some(render_context);
        self.presenter = Some(presenter);
        self.canvas = Some(canvas);
        self.driver = Some(driver);
        Ok(())
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if let Some(context) = &mut self.render_context {
            context.resize(new_size);
        }
        if let (Some(driver), Some(canvas)) = (&mut self.driver, &mut self.canvas) {
            if let Err(e) = driver.on_resize(canvas, new_size.width, new_size.height) {
                warn!("Resize to {}x{} failed: {}", new_size.width, new_size.height, e);
            }
        }
    }

    fn refresh(&mut self) {
        let (Some(driver), Some(canvas)) = (&mut self.driver, &mut self.canvas) else {
            return;
        };

        match driver.on_display_refresh(canvas, Instant::now()) {
            Ok(true) => {}
            Ok(false) => return,
            Err(e) => {
                error!("Animation stopped: {}", e);
                driver.stop();
                return;
            }
        }

        if let (Some(context), Some(presenter)) = (&self.render_context, &mut self.presenter) {
            if let Err(e) = presenter.present(context, canvas) {
                error!("Present failed: {}", e);
            }
        }
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(driver) = &mut self.driver {
            if let Err(e) = driver.shutdown() {
                warn!("Shutdown error: {}", e);
            }
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            error!("{:#}", e);
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.exit(event_loop),

            WindowEvent::Resized(new_size) => self.resize(new_size),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    self.exit(event_loop);
                }
            }

            WindowEvent::RedrawRequested => self.refresh(),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Open a window and run the animation until it is closed
pub fn run(settings: Settings, options: PlayerOptions) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PlayerApp::new(settings, options);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
