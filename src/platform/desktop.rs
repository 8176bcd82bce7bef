//! Windowed driver: winit event loop around a wgpu surface

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKey, ModifiersState, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::app::Host;
use crate::clock::SystemClock;
use crate::consts::PHYS_DT;
use crate::error::Error;
use crate::game::Scroller;
use crate::input::{InputEvent, KeyCode, Modifiers};
use crate::renderer::GpuSurface;
use crate::scheduler::FixedTimestep;
use crate::settings::Settings;

struct Running {
    host: Host<Scroller, SystemClock>,
    surface: GpuSurface,
}

struct DesktopApp {
    settings: Settings,
    running: Option<Running>,
    modifiers: Modifiers,
    /// First fatal error; ends the loop
    error: Option<Error>,
}

impl DesktopApp {
    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running, Error> {
        let attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| Error::Surface(format!("create window: {e}")))?,
        );

        let mut surface = pollster::block_on(GpuSurface::new(window, &self.settings.title))?;

        let seed = self.settings.resolve_seed();
        let scheduler = FixedTimestep::new(PHYS_DT, self.settings.max_catch_up_ticks);
        let mut host = Host::from_settings(
            Scroller::new(seed, scheduler),
            SystemClock::new(),
            &self.settings,
        )?;
        host.init(&mut surface)?;

        Ok(Running { host, surface })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        log::error!("{}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                running.surface.request_redraw();
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                running
                    .host
                    .handle_event(&mut running.surface, &InputEvent::QuitRequested);
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                running.surface.resize(size.width, size.height);
            }
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = map_modifiers(mods.state());
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let Some(input) = map_key_event(&event, self.modifiers) else {
                    return;
                };
                if running.host.handle_event(&mut running.surface, &input) {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = running.host.frame(&mut running.surface) {
                    self.fail(event_loop, e);
                    return;
                }
                running.surface.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            running.surface.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = self.running.as_mut() {
            running.host.shutdown(&mut running.surface);
        }
    }
}

fn map_modifiers(state: ModifiersState) -> Modifiers {
    let mut mods = Modifiers::empty();
    mods.set(Modifiers::SHIFT, state.shift_key());
    mods.set(Modifiers::CTRL, state.control_key());
    mods.set(Modifiers::ALT, state.alt_key());
    mods.set(Modifiers::SUPER, state.super_key());
    mods
}

fn map_key(code: WinitKey) -> Option<KeyCode> {
    Some(match code {
        WinitKey::Space => KeyCode::SPACE,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::KeyP => KeyCode::P,
        WinitKey::KeyQ => KeyCode::Q,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyW => KeyCode::W,
        WinitKey::ArrowRight => KeyCode::RIGHT,
        WinitKey::ArrowLeft => KeyCode::LEFT,
        WinitKey::ArrowDown => KeyCode::DOWN,
        WinitKey::ArrowUp => KeyCode::UP,
        WinitKey::F1 => KeyCode::F1,
        _ => return None,
    })
}

fn map_key_event(event: &KeyEvent, modifiers: Modifiers) -> Option<InputEvent> {
    let PhysicalKey::Code(code) = event.physical_key else {
        return None;
    };
    let key = map_key(code)?;
    Some(match event.state {
        ElementState::Pressed => InputEvent::KeyDown {
            key,
            modifiers,
            repeat: event.repeat,
        },
        ElementState::Released => InputEvent::KeyUp { key, modifiers },
    })
}

/// Open the window and run until quit
pub fn run(settings: Settings) -> Result<(), Error> {
    let event_loop = EventLoop::new().map_err(|e| Error::Surface(format!("event loop: {e}")))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DesktopApp {
        settings,
        running: None,
        modifiers: Modifiers::empty(),
        error: None,
    };
    event_loop
        .run_app(&mut app)
        .map_err(|e| Error::Surface(format!("event loop: {e}")))?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
