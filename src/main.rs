use std::collections::HashSet;
use std::num::NonZeroU32;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use slabcaster::framebuffer::{SCREEN_HEIGHT, SCREEN_WIDTH};
use slabcaster::scaler::{ScaleLut, blit_nearest, build_scale_lut};
use slabcaster::{
    Camera, DataError, FrameBuffer, RenderSettings, Scene, Sector, Sprite, Texture, demo,
    render_frame,
};

const SETTINGS_FILE: &str = "slabcaster.json";
const FRAME_TIME: Duration = Duration::from_micros(16_667);

const LIT: u32 = 0x00E0_F0FF;
const UNLIT: u32 = 0x0010_1418;
const BORDER: u32 = 0;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,

    sectors: [Sector<'static>; 2],
    textures: [Texture<'static>; 2],
    sprites: [Sprite; 3],
    camera: Camera,
    settings: RenderSettings,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Panel-sized buffers
    frame: FrameBuffer,
    fb_rgb: Vec<u32>,

    scale_lut: ScaleLut,

    // Input and movement
    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
    move_speed: f32,
    turn_speed: f32,
}

impl App {
    fn new(settings: RenderSettings) -> Result<Self, DataError> {
        Ok(Self {
            window: None,
            surface: None,

            sectors: demo::sectors()?,
            textures: demo::textures()?,
            sprites: demo::sprites(),
            camera: demo::camera(),
            settings,

            frame_counter: 0,
            last_fps_print: Instant::now(),

            frame: FrameBuffer::new(),
            fb_rgb: vec![0; usize::from(SCREEN_WIDTH) * usize::from(SCREEN_HEIGHT)],

            scale_lut: ScaleLut::empty(),

            keys_down: HashSet::new(),
            last_tick: Instant::now(),
            move_speed: 6.0,
            turn_speed: std::f32::consts::PI,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("Slabcaster")
            .with_inner_size(LogicalSize::new(
                f64::from(SCREEN_WIDTH) * 6.0,
                f64::from(SCREEN_HEIGHT) * 6.0,
            ));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                log::error!("could not create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        let surface = match surface {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("could not create drawing surface: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.rebuild_lut(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        window.request_redraw();
        self.window = Some(window);

        self.last_tick = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if !repeat {
                        self.on_key_pressed(code);
                    }
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::RedrawRequested => {
                // Wait for the next panel frame, like a handheld's frame gate
                let now = Instant::now();
                if now.duration_since(self.last_tick) >= FRAME_TIME {
                    let dt = now.duration_since(self.last_tick).min(Duration::from_millis(100));
                    self.last_tick = now;
                    self.tick(dt.as_secs_f32());
                    self.render();
                    self.present(id);
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::Resized(new_size) => {
                log::info!("resized to {}x{}", new_size.width, new_size.height);
                self.rebuild_lut(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl App {
    fn on_key_pressed(&mut self, code: KeyCode) {
        match code {
            KeyCode::Tab => {
                self.settings.view = self.settings.view.next();
                log::info!("view: {:?}", self.settings.view);
            }
            KeyCode::Space => {
                self.settings.transparency = self.settings.transparency.next();
                log::info!("transparency: {}", self.settings.transparency.as_str());
            }
            KeyCode::KeyL => {
                self.settings.label_vertices = !self.settings.label_vertices;
            }
            KeyCode::KeyK => {
                self.settings.show_sprite_anchors = !self.settings.show_sprite_anchors;
            }
            _ => {}
        }
    }

    fn axis(&self, positive: KeyCode, negative: KeyCode) -> f32 {
        let mut value = 0.0;
        if self.keys_down.contains(&positive) {
            value += 1.0;
        }
        if self.keys_down.contains(&negative) {
            value -= 1.0;
        }
        value
    }

    fn tick(&mut self, dt: f32) {
        let forward = self.axis(KeyCode::ArrowUp, KeyCode::ArrowDown);
        let strafe = self.axis(KeyCode::ArrowRight, KeyCode::ArrowLeft);
        let turn = self.axis(KeyCode::KeyX, KeyCode::KeyZ);

        self.camera.turn(turn * self.turn_speed * dt);
        self.camera.move_forward(forward * self.move_speed * dt);
        self.camera.strafe(strafe * self.move_speed * dt);

        demo::step_sprites(&mut self.sprites, dt);
    }

    fn render(&mut self) {
        self.frame.clear();
        let scene = Scene {
            sectors: &self.sectors,
            sprites: &self.sprites,
            textures: &self.textures,
        };
        render_frame(&mut self.frame, &self.camera, &scene, &self.settings);
        self.frame.expand_into(&mut self.fb_rgb, LIT, UNLIT);
    }

    fn present(&mut self, id: WindowId) {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return,
        };

        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return; // Minimized window, skip drawing
        };

        if let Err(e) = surface.resize(w, h) {
            log::warn!("surface resize failed: {e}");
            return;
        }

        let mut buf = match surface.buffer_mut() {
            Ok(buf) => buf,
            Err(e) => {
                log::warn!("no surface buffer: {e}");
                return;
            }
        };
        blit_nearest(
            &mut buf,
            size.width as usize,
            &self.fb_rgb,
            &self.scale_lut,
            BORDER,
        );
        if let Err(e) = buf.present() {
            log::warn!("present failed: {e}");
        }

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            log::debug!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
    }

    fn rebuild_lut(&mut self, dst_w: usize, dst_h: usize) {
        self.scale_lut = build_scale_lut(
            dst_w,
            dst_h,
            usize::from(SCREEN_WIDTH),
            usize::from(SCREEN_HEIGHT),
        );
    }
}

fn load_settings() -> RenderSettings {
    let path = std::env::args().nth(1);
    let path = path.as_deref().unwrap_or(SETTINGS_FILE);
    if !Path::new(path).exists() {
        log::info!("no settings at {path}, using defaults");
        return RenderSettings::default();
    }
    match RenderSettings::load(path) {
        Ok(settings) => {
            log::info!("loaded settings from {path}");
            settings
        }
        Err(e) => {
            log::warn!("{e}; using defaults");
            RenderSettings::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Slabcaster starting...");

    let mut app = match App::new(load_settings()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("bad level data: {e}");
            std::process::exit(1);
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("could not start event loop: {e}");
            std::process::exit(1);
        }
    };

    // Poll: redraws are gated on FRAME_TIME inside the handler.
    event_loop.set_control_flow(ControlFlow::Poll);

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("event loop exited with error: {e}");
    }
}
