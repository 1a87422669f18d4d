use rascent::config::{FieldConfig, ViewerConfig};
use rascent::{Arc, RobotShapes, Vector2};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, RenderTarget};
use sdl2::ttf::Font;
use sdl2::video::Window;

const FIELD_COLOR: Color = Color::RGB(120, 120, 120);
const RUNG_COLOR: Color = Color::RGB(230, 200, 40);
const CHASSIS_COLOR: Color = Color::RGB(60, 140, 230);
const ARM_COLOR: Color = Color::RGB(220, 220, 220);
const HOOK_COLOR: Color = Color::RGB(230, 80, 60);
const COM_COLOR: Color = Color::GREEN;
const TEXT_COLOR: Color = Color::WHITE;

/// Width of field lines in pixels
const LINE_WIDTH: u8 = 3;

fn to_abgr(color: Color) -> Color {
    Color::RGBA(color.a, color.b, color.g, color.r)
}

/// Maps world inches (y up) onto window pixels (y down).
pub struct Viewport {
    origin: Vector2,
    pixels_per_inch: f64,
    height: u32,
}

impl Viewport {
    pub fn new(config: &ViewerConfig) -> Viewport {
        Viewport {
            origin: config.origin,
            pixels_per_inch: config.pixels_per_inch,
            height: config.window_height,
        }
    }

    fn to_screen(&self, point: Vector2) -> (i16, i16) {
        let x = (point.x - self.origin.x) * self.pixels_per_inch;
        let y = self.height as f64 - (point.y - self.origin.y) * self.pixels_per_inch;
        (x.round() as i16, y.round() as i16)
    }

    fn to_pixels(&self, inches: f64) -> i16 {
        (inches * self.pixels_per_inch).round() as i16
    }

    fn line<T: RenderTarget>(&self, canvas: &mut Canvas<T>, a: Vector2, b: Vector2, width: u8, color: Color) {
        let (x1, y1) = self.to_screen(a);
        let (x2, y2) = self.to_screen(b);
        let _ = canvas.thick_line(x1, y1, x2, y2, width, to_abgr(color));
    }

    /// Ground, barrier and both rungs.
    pub fn draw_field<T: RenderTarget>(&self, canvas: &mut Canvas<T>, field: &FieldConfig) {
        let ground = field.ground_extent;
        self.line(canvas, Vector2::new(-ground, 0.0), Vector2::new(ground, 0.0), LINE_WIDTH, FIELD_COLOR);
        self.line(canvas, Vector2::ZERO, Vector2::new(0.0, field.barrier_height), LINE_WIDTH, FIELD_COLOR);

        let radius = self.to_pixels(field.rung_diameter / 2.0).max(1);
        for rung in [field.pivot, field.high_rung] {
            let (x, y) = self.to_screen(rung);
            let _ = canvas.filled_circle(x, y, radius, to_abgr(RUNG_COLOR));
        }
    }

    pub fn draw_robot<T: RenderTarget>(&self, canvas: &mut Canvas<T>, shapes: &RobotShapes) {
        let (xs, ys): (Vec<i16>, Vec<i16>) = shapes.chassis.iter().map(|&corner| self.to_screen(corner)).unzip();
        let _ = canvas.polygon(&xs, &ys, to_abgr(CHASSIS_COLOR));

        self.line(canvas, shapes.arm.0, shapes.arm.1, LINE_WIDTH, ARM_COLOR);
        self.draw_arc(canvas, &shapes.hook, HOOK_COLOR);

        let (x, y) = self.to_screen(shapes.center_of_mass);
        let _ = canvas.filled_circle(x, y, 3, to_abgr(COM_COLOR));
    }

    /// SDL_gfx sweeps clockwise on screen, which is clockwise in the world
    /// once y is flipped, so the world angles are negated.
    fn draw_arc<T: RenderTarget>(&self, canvas: &mut Canvas<T>, arc: &Arc, color: Color) {
        let (x, y) = self.to_screen(arc.center());
        let start = -arc.start_angle().to_degrees();
        let end = -arc.end_angle().to_degrees();
        let (from, to) = if arc.is_between() { (end, start) } else { (start, end) };
        let _ = canvas.arc(x, y, self.to_pixels(arc.radius()), from.round() as i16, to.round() as i16, to_abgr(color));
    }
}

/// Writes telemetry lines down the top-left corner of the window.
pub fn draw_text(canvas: &mut Canvas<Window>, font: &Font, lines: &[String]) -> Result<(), String> {
    let texture_creator = canvas.texture_creator();
    let mut y = 8;
    for line in lines {
        if line.is_empty() {
            y += font.height() / 2;
            continue;
        }
        let text_surface = font.render(line).blended(TEXT_COLOR).map_err(|e| e.to_string())?;
        let text_texture = texture_creator
            .create_texture_from_surface(&text_surface)
            .map_err(|e| e.to_string())?;
        let texture_query = text_texture.query();
        let target_rect = Rect::new(8, y, texture_query.width, texture_query.height);
        canvas.copy(&text_texture, None, Some(target_rect))?;
        y += texture_query.height as i32;
    }
    Ok(())
}
