//! Interactive viewer for the hanging-robot simulator.
//!
//! Drives the driver-control loop from the keyboard, steps the physics once
//! per frame and draws the field, robot and telemetry with SDL2.
//!
//! Usage: `rascent [config.toml]`

mod view;

use std::error::Error;
use std::time::{Duration, Instant};

use env_logger::Env;
use rascent::body::PhysicsEntity;
use rascent::telemetry::Telemetry;
use rascent::teleop::{Gamepad, Key, Teleop};
use rascent::{ArmRobot, SimConfig};
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::ttf::Font;
use sdl2::video::Window;

use crate::view::Viewport;

/// Window title displayed in the title bar
const TITLE: &str = "rascent";
/// Background color for the canvas
const BACKGROUND: Color = Color::BLACK;
/// Color shown behind a paused simulation
const PAUSED_BACKGROUND: Color = Color::RGB(30, 0, 0);

/// Keyboard state mapped onto the gamepad keys the driver loop reads.
fn held_keys(event_pump: &sdl2::EventPump) -> Vec<Key> {
    event_pump
        .keyboard_state()
        .pressed_scancodes()
        .filter_map(|scancode| match scancode {
            Scancode::W => Some(Key::W),
            Scancode::A => Some(Key::A),
            Scancode::S => Some(Key::S),
            Scancode::D => Some(Key::D),
            Scancode::M => Some(Key::M),
            Scancode::R => Some(Key::R),
            Scancode::Up => Some(Key::Up),
            Scancode::Down => Some(Key::Down),
            Scancode::Left => Some(Key::Left),
            Scancode::Right => Some(Key::Right),
            Scancode::Return => Some(Key::Enter),
            Scancode::LShift | Scancode::RShift => Some(Key::Shift),
            Scancode::Apostrophe => Some(Key::Quote),
            _ => None,
        })
        .collect()
}

/// Everything one simulated run owns. Rebuilt from the config on reset.
struct Session {
    robot: ArmRobot,
    teleop: Teleop,
    telemetry: Telemetry,
    elapsed: f64,
}

impl Session {
    fn new(config: &SimConfig) -> rascent::Result<Session> {
        let mut telemetry = Telemetry::new();
        telemetry.set_transmission_interval(config.viewer.telemetry_interval_ms);
        Ok(Session {
            robot: ArmRobot::new(config)?,
            teleop: Teleop::new(config),
            telemetry,
            elapsed: 0.0,
        })
    }

    /// One frame: driver loop, physics, then telemetry.
    fn step(&mut self, gamepad: Gamepad, dt: f64) {
        self.elapsed += dt;
        self.teleop.set_gamepad(gamepad);
        self.teleop.run(&mut self.robot, self.elapsed, &mut self.telemetry);
        self.robot.update(self.elapsed, dt);
        self.robot.report(&mut self.telemetry);
        self.telemetry.update(self.elapsed);
    }
}

/// Renders one frame of the simulation.
fn main_loop(
    session: &Session,
    config: &SimConfig,
    viewport: &Viewport,
    canvas: &mut Canvas<Window>,
    font: Option<&Font>,
    paused: bool,
) {
    canvas.set_draw_color(if paused { PAUSED_BACKGROUND } else { BACKGROUND });
    canvas.clear();

    viewport.draw_field(canvas, &config.field);
    viewport.draw_robot(canvas, &session.robot.shapes());

    if let Some(font) = font {
        if let Err(e) = view::draw_text(canvas, font, session.telemetry.published()) {
            log::warn!("Failed to draw telemetry: {e}");
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {path}");
            SimConfig::from_file(&path)?
        }
        None => SimConfig::default(),
    };
    let viewer = &config.viewer;

    // Initialize SDL2 subsystems
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let ttf_context = sdl2::ttf::init()?;

    let window = video_subsystem
        .window(TITLE, viewer.window_width, viewer.window_height)
        .position_centered()
        .build()?;
    let font = match ttf_context.load_font(&viewer.font_path, viewer.font_size) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("Telemetry text disabled, could not load {}: {e}", viewer.font_path);
            None
        }
    };

    let mut canvas = window.into_canvas().build()?;
    canvas.set_draw_color(BACKGROUND);
    canvas.clear();
    canvas.present();

    let viewport = Viewport::new(viewer);
    let mut session = Session::new(&config)?;
    let mut paused = false;

    let mut last_frame_time = Instant::now();
    let mut event_pump = sdl_context.event_pump()?;

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } | Event::KeyDown { keycode: Some(Keycode::Escape), .. } => break 'running,
                Event::KeyDown { keycode: Some(Keycode::P), repeat: false, .. } => {
                    paused = !paused;
                    log::info!("{}", if paused { "Paused" } else { "Resumed" });
                }
                Event::KeyDown { keycode: Some(Keycode::Backspace), repeat: false, .. } => {
                    log::info!("Restarting at t = {:.2}s", session.elapsed);
                    session = Session::new(&config)?;
                }
                _ => {}
            }
        }

        // Long frames are clipped so a stall never becomes one huge step
        let now = Instant::now();
        let dt = now.duration_since(last_frame_time).as_secs_f64().min(viewer.max_dt);
        last_frame_time = now;

        if !paused && dt > 0.0 {
            session.step(Gamepad::from_keys(held_keys(&event_pump)), dt);
        }

        main_loop(&session, &config, &viewport, &mut canvas, font.as_ref(), paused);

        canvas.present();
        // Target 60 FPS
        ::std::thread::sleep(Duration::new(0, 1_000_000_000u32 / 60));
    }

    log::info!("Stopped after {:.2}s of simulated time", session.elapsed);
    Ok(())
}
