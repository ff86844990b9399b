//! Browser render surface
//!
//! Geometry goes through the wgpu pipeline; text is laid out as absolutely
//! positioned spans in a DOM overlay stacked on the canvas.

use glam::Vec2;
use web_sys::HtmlElement;

use super::pipeline::{RenderState, field_scale};
use super::shapes;
use super::vertex::Vertex;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::{Color, RenderSurface, Sprite};

pub struct WebSurface {
    pub render: RenderState,
    overlay: HtmlElement,
    vertices: Vec<Vertex>,
    clear: Color,
    html: String,
    last_html: String,
}

impl WebSurface {
    pub fn new(render: RenderState, overlay: HtmlElement) -> Self {
        Self {
            render,
            overlay,
            vertices: Vec::with_capacity(4096),
            clear: [0.0, 0.0, 0.0, 1.0],
            html: String::new(),
            last_html: String::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.render.resize(width, height);
        // Force the overlay to re-layout at the new scale
        self.last_html.clear();
    }
}

fn css_color(color: Color) -> String {
    format!(
        "rgba({},{},{},{})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3]
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl RenderSurface for WebSurface {
    fn begin_frame(&mut self, clear: Color) {
        self.clear = clear;
        self.vertices.clear();
        self.html.clear();
    }

    fn end_frame(&mut self) {
        match self.render.render(&self.vertices, self.clear) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.render.size;
                self.render.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        if self.html != self.last_html {
            self.overlay.set_inner_html(&self.html);
            std::mem::swap(&mut self.html, &mut self.last_html);
        }
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.vertices.extend_from_slice(&shapes::rect(x, y, w, h, color));
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32) {
        let size = self.sprite_size(sprite);
        self.vertices
            .extend(shapes::sprite(sprite, Vec2::new(x, y), size));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        // Overlay covers the whole canvas; device pixels -> CSS pixels
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio() as f32)
            .unwrap_or(1.0);
        let px = field_scale(self.render.size);
        let (w, h) = (self.render.size.0 as f32, self.render.size.1 as f32);
        let left = (w - SCREEN_WIDTH * px) / 2.0 + x * px;
        let top = (h - SCREEN_HEIGHT * px) / 2.0 + y * px;
        let scale = px / dpr;
        self.html.push_str(&format!(
            "<span style=\"position:absolute;left:{:.1}px;top:{:.1}px;font-size:{:.1}px;line-height:1;color:{};white-space:pre\">{}</span>",
            left / dpr,
            top / dpr,
            size * scale,
            css_color(color),
            escape_html(text)
        ));
    }
}
