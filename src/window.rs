//! Windowed host: a winit event loop driving a [`FrameLoop`] over a
//! [`GpuRenderer`].

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::animator::Animator;
use crate::config::PlexusConfig;
use crate::error::RunError;
use crate::gpu::GpuRenderer;
use crate::network::Network;
use crate::render::Renderer;
use crate::scheduler::{CancellationToken, FrameLoop, Tick};
use crate::spawn::rng_from_seed;

struct App {
    config: PlexusConfig,
    /// Network waiting for a window to draw into.
    pending: Option<Network>,
    frames: Option<FrameLoop<GpuRenderer>>,
    window: Option<Arc<Window>>,
    token: CancellationToken,
    error: Option<RunError>,
}

impl App {
    fn new(config: PlexusConfig, network: Network, token: CancellationToken) -> Self {
        Self {
            config,
            pending: Some(network),
            frames: None,
            window: None,
            token,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RunError) {
        tracing::error!(%error, "stopping");
        self.error = Some(error);
        self.shutdown(event_loop);
    }

    /// Cancel the loop, tear the animator down and leave the event loop.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.token.cancel();
        close_frames(&mut self.frames);
        event_loop.exit();
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let Some(network) = self.pending.take() else {
            return Ok(());
        };

        let window_attrs = Window::default_attributes()
            .with_title("plexus")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let renderer = pollster::block_on(GpuRenderer::new(window.clone(), &self.config.visuals))?;
        let mut animator = Animator::with_network(network, &self.config, renderer)?;
        let size = window.inner_size();
        animator.resize(size.width, size.height);

        self.frames = Some(FrameLoop::with_token(animator, self.token.clone()));
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(frames) = &mut self.frames else {
            return;
        };

        match frames.tick() {
            Ok(Tick::Rendered) => {}
            Ok(Tick::Cancelled) => {
                self.shutdown(event_loop);
                return;
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring");
                frames.animator_mut().renderer_mut().reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, wgpu::SurfaceError::OutOfMemory.into());
                return;
            }
            Err(e) => tracing::warn!(error = ?e, "frame skipped"),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(error) = self.start(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(physical_size) => {
                if let Some(frames) = &mut self.frames {
                    frames
                        .animator_mut()
                        .resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Tear down a running frame loop, if any, and hand its renderer back.
fn close_frames<R: Renderer>(frames: &mut Option<FrameLoop<R>>) -> Option<R> {
    frames.take().map(FrameLoop::teardown)
}

/// Open a window and animate a freshly generated network until it closes.
pub fn run(config: PlexusConfig) -> Result<(), RunError> {
    config.validate()?;
    let mut rng = rng_from_seed(config.network.seed);
    let network = Network::generate(&config, &mut rng)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, network, CancellationToken::new());
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
