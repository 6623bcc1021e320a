/// Single-cube model viewer
/// Spins a textured unit cube with the arrow keys; the view stays fixed at
/// the origin looking down +Z.
use anyhow::anyhow;
use mimalloc::MiMalloc;
use softvox::math::{rotation_x, rotation_y};
use softvox::*;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const ROTATE_STEP: f32 = 0.05;

fn model_matrix(rx: f32, ry: f32) -> glam::Mat4 {
    glam::Mat4::from_translation(glam::Vec3::new(0.0, 0.0, 3.0)) * rotation_y(ry) * rotation_x(rx)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let assets = std::env::var_os("SOFTVOX_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets/textures"));
    let rasterizer = Rasterizer::new_with_atlas(Arc::new(TextureAtlas::load_dir(&assets)?));
    let mesh = Mesh::unit_cube(BlockType::Grass);
    let view = softvox::math::look_at(glam::Vec3::ZERO, glam::Vec3::Z, glam::Vec3::Y);

    let event_loop = EventLoop::new().map_err(|e| anyhow!("creating event loop: {e}"))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("softvox viewer")
            .with_inner_size(winit::dpi::LogicalSize::new(640, 640))
            .build(&event_loop)
            .map_err(|e| anyhow!("creating window: {e}"))?,
    );
    let context = softbuffer::Context::new(window.clone())
        .map_err(|e| anyhow!("creating softbuffer context: {e}"))?;
    let mut surface = softbuffer::Surface::new(&context, window.clone())
        .map_err(|e| anyhow!("creating softbuffer surface: {e}"))?;

    let size = window.inner_size();
    let mut framebuffer = Framebuffer::new(size.width as usize, size.height as usize);
    let (mut rx, mut ry) = (0.0f32, 0.0f32);

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Wait);

        let Event::WindowEvent { event, .. } = event else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(new_size) => {
                framebuffer.resize(new_size.width as usize, new_size.height as usize);
                window.request_redraw();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::ArrowUp) => rx += ROTATE_STEP,
                    PhysicalKey::Code(KeyCode::ArrowDown) => rx -= ROTATE_STEP,
                    PhysicalKey::Code(KeyCode::ArrowLeft) => ry += ROTATE_STEP,
                    PhysicalKey::Code(KeyCode::ArrowRight) => ry -= ROTATE_STEP,
                    PhysicalKey::Code(KeyCode::Escape) => elwt.exit(),
                    _ => return,
                }
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let (Some(width), Some(height)) = (
                    NonZeroU32::new(framebuffer.width as u32),
                    NonZeroU32::new(framebuffer.height as u32),
                ) else {
                    return;
                };
                framebuffer.clear(SKY_COLOR);
                let stats = rasterizer.render_mesh_with_model(&mesh, &model_matrix(rx, ry), &view, &mut framebuffer);
                log::debug!("rx {rx:.2} ry {ry:.2}: {stats:?}");

                let presented = surface.resize(width, height).and_then(|_| {
                    let mut buffer = surface.buffer_mut()?;
                    buffer.copy_from_slice(framebuffer.color_buffer_slice());
                    buffer.present()
                });
                if let Err(err) = presented {
                    log::error!("present failed: {err}");
                    elwt.exit();
                }
            }
            _ => {}
        }
    })
    .map_err(|e| anyhow!("event loop: {e}"))
}
