use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::RenderSize;
use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "metaballs".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = RuntimeState::new(config, gpu_init, app);
        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    frame_index: u64,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    error: Option<anyhow::Error>,
}

impl<A: App + 'static> RuntimeState<A> {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            error: None,
        }
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            frame_index: 0,
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        self.entry = None;
        event_loop.exit();
    }

    fn resize(&mut self, size: RenderSize) {
        let Some(entry) = self.entry.as_mut() else { return };
        entry.with_gpu_mut(|gpu| gpu.resize(size));
        log::debug!("drawable resized to {size}");
        if !size.is_empty() {
            self.app.on_resize(size);
        }
    }

    fn redraw(&mut self) -> AppControl {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return AppControl::Continue;
        };

        entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                frame_index: *fields.frame_index,
            };
            let control = app.on_frame(&mut ctx);
            *fields.frame_index = fields.frame_index.wrapping_add(1);
            control
        })
    }
}

impl<A: App + 'static> ApplicationHandler for RuntimeState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_entry(event_loop) {
            Ok(entry) => {
                let size = entry.borrow_gpu().size();
                self.entry = Some(entry);
                self.app.on_resize(size);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Continuous redraw: the producer uploads fresh data every frame.
        if let Some(entry) = self.entry.as_ref() {
            entry.borrow_window().request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => self.resize(RenderSize::from(*new_size)),

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self
                    .entry
                    .as_ref()
                    .map(|e| RenderSize::from(e.borrow_window().inner_size()));
                if let Some(size) = size {
                    self.resize(size);
                }
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    self.entry = None;
                    event_loop.exit();
                }
            }

            _ => {
                if self.app.on_window_event(&event) == AppControl::Exit {
                    self.entry = None;
                    event_loop.exit();
                }
            }
        }
    }
}
