use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{InputEvent, InputFrame, InputState, Key, KeyState};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "scoot".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the app returns [`AppControl::Exit`] or the
    /// window is closed.
    pub fn run<A: App + 'static>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host {
            config,
            gpu_init,
            app,
            session: None,
            exiting: false,
        };
        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;
        Ok(())
    }
}

// The surface borrows the window, so both live in one self-referencing
// struct; ouroboros generates the constructor and accessors.
#[self_referencing]
struct Session {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Host<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    session: Option<Session>,
    exiting: bool,
}

impl<A: App + 'static> Host<A> {
    fn open_session(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        self.session = Some(
            SessionBuilder {
                input_state: InputState::default(),
                input_frame: InputFrame::default(),
                clock: FrameClock::default(),
                window,
                gpu_builder: |w| {
                    pollster::block_on(Gpu::new(w, gpu_init)).expect("GPU initialization failed")
                },
            }
            .build(),
        );
        Ok(())
    }

    /// Ticks the clock, hands one frame to the app, then drops the frame's
    /// input edges.
    fn run_frame(&mut self, window_id: WindowId) -> AppControl {
        let Some(session) = self.session.as_mut() else {
            return AppControl::Continue;
        };

        let app = &mut self.app;
        let mut control = AppControl::Continue;

        session.with_mut(|f| {
            let time = f.clock.tick();
            {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: window_id,
                        window: f.window,
                    },
                    gpu: f.gpu,
                    input: f.input_state,
                    input_frame: f.input_frame,
                    time,
                };
                control = app.on_frame(&mut ctx);
            }
            f.input_frame.clear();
        });

        control
    }

    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        self.exiting = true;
        event_loop.exit();
    }

    fn redraw(&self) {
        if let Some(session) = &self.session {
            session.with_window(|w| w.request_redraw());
        }
    }
}

impl<A: App + 'static> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match self.open_session(event_loop) {
            Ok(()) => self.redraw(),
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.shut_down(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }
        // Continuous redraw; frame rate is governed by the app's pacer, not
        // by event-loop waits.
        event_loop.set_control_flow(ControlFlow::Poll);
        self.redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exiting {
            event_loop.exit();
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.with_window(|w| w.id()) != window_id {
            return;
        }

        if let Some(ev) = map_event(&event) {
            session.with_mut(|f| f.input_state.apply_event(f.input_frame, ev));
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.session = None;
                self.shut_down(event_loop);
            }
            WindowEvent::Resized(new_size) => {
                session.with_gpu_mut(|gpu| gpu.resize(*new_size));
                self.redraw();
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = session.with_window(|w| w.inner_size());
                session.with_gpu_mut(|gpu| gpu.resize(new_size));
                self.redraw();
            }
            WindowEvent::RedrawRequested => {
                if self.run_frame(window_id) == AppControl::Exit {
                    self.shut_down(event_loop);
                }
            }
            _ => {}
        }
    }
}

fn map_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),
        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            },
            repeat: event.repeat,
        }),
        _ => None,
    }
}

macro_rules! key_table {
    ($code:expr => { $($from:ident : $to:ident),* $(,)? }) => {
        match $code {
            $(KeyCode::$from => Key::$to,)*
            other => Key::Unknown(other as u32),
        }
    };
}

fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        // Unidentified keys carry no stable numeric in winit 0.30.
        return Key::Unknown(0);
    };
    key_table!(code => {
        Escape: Escape, Enter: Enter, Tab: Tab, Backspace: Backspace, Space: Space,
        ArrowUp: ArrowUp, ArrowDown: ArrowDown, ArrowLeft: ArrowLeft, ArrowRight: ArrowRight,
        KeyA: A, KeyB: B, KeyC: C, KeyD: D, KeyE: E, KeyF: F, KeyG: G,
        KeyH: H, KeyI: I, KeyJ: J, KeyK: K, KeyL: L, KeyM: M, KeyN: N,
        KeyO: O, KeyP: P, KeyQ: Q, KeyR: R, KeyS: S, KeyT: T, KeyU: U,
        KeyV: V, KeyW: W, KeyX: X, KeyY: Y, KeyZ: Z,
        Digit0: Digit0, Digit1: Digit1, Digit2: Digit2, Digit3: Digit3, Digit4: Digit4,
        Digit5: Digit5, Digit6: Digit6, Digit7: Digit7, Digit8: Digit8, Digit9: Digit9,
    })
}
