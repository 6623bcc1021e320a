/// Main application entry point
/// Generates the world, then runs a cooperative tick-then-render loop
use anyhow::{anyhow, Context};
use mimalloc::MiMalloc;
use softvox::*;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowBuilder},
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Longest simulated step after a stall (window drag, breakpoint).
const MAX_TICK: f32 = 0.05;

fn key_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::KeyW => Some(Action::Forward),
        KeyCode::KeyS => Some(Action::Backward),
        KeyCode::KeyA => Some(Action::Left),
        KeyCode::KeyD => Some(Action::Right),
        KeyCode::Space => Some(Action::Jump),
        _ => None,
    }
}

fn world_config_from_env() -> anyhow::Result<WorldConfig> {
    let mut config = WorldConfig::default();
    if let Ok(seed) = std::env::var("SOFTVOX_SEED") {
        config.seed = seed
            .parse()
            .with_context(|| format!("SOFTVOX_SEED must be an unsigned integer, got {seed:?}"))?;
    }
    Ok(config)
}

fn set_pointer_lock(window: &Window, input: &mut InputState, locked: bool) {
    let grab = if locked {
        window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };
    if let Err(err) = grab {
        log::warn!("cursor grab failed: {err}");
    }
    window.set_cursor_visible(!locked);
    input.apply(if locked {
        InputEvent::LockPointer
    } else {
        InputEvent::UnlockPointer
    });
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("controls: WASD move, Space jump, click to capture mouse, Esc release/quit");

    let assets = std::env::var_os("SOFTVOX_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets/textures"));
    let atlas = Arc::new(TextureAtlas::load_dir(&assets)?);

    let world_config = world_config_from_env()?;
    let world = World::generate(&world_config);
    let mesh = FaceCullingMesher::default().build(&world);
    let mut player = PlayerController::spawn_above(&world, 0, 0, PhysicsConfig::default());
    let rasterizer = Rasterizer::new_with_atlas(atlas);

    // Create event loop and window
    let event_loop = EventLoop::new().map_err(|e| anyhow!("creating event loop: {e}"))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("softvox")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
            .build(&event_loop)
            .map_err(|e| anyhow!("creating window: {e}"))?,
    );

    let context = softbuffer::Context::new(window.clone())
        .map_err(|e| anyhow!("creating softbuffer context: {e}"))?;
    let mut surface = softbuffer::Surface::new(&context, window.clone())
        .map_err(|e| anyhow!("creating softbuffer surface: {e}"))?;

    let size = window.inner_size();
    let mut framebuffer = Framebuffer::new(size.width as usize, size.height as usize);
    let mut input = InputState::new();
    let mut timings = FrameTimings::new(Duration::from_secs(1));
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(new_size) => {
                    framebuffer.resize(new_size.width as usize, new_size.height as usize);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    let PhysicalKey::Code(code) = event.physical_key else {
                        return;
                    };
                    let pressed = event.state == ElementState::Pressed;
                    if code == KeyCode::Escape && pressed {
                        if input.pointer_locked() {
                            set_pointer_lock(&window, &mut input, false);
                        } else {
                            elwt.exit();
                        }
                    } else if let Some(action) = key_action(code) {
                        input.apply(if pressed {
                            InputEvent::Pressed(action)
                        } else {
                            InputEvent::Released(action)
                        });
                    }
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => set_pointer_lock(&window, &mut input, true),
                WindowEvent::Focused(false) if input.pointer_locked() => {
                    set_pointer_lock(&window, &mut input, false);
                }
                WindowEvent::RedrawRequested => {
                    let (Some(width), Some(height)) = (
                        NonZeroU32::new(framebuffer.width as u32),
                        NonZeroU32::new(framebuffer.height as u32),
                    ) else {
                        return;
                    };

                    let now = Instant::now();
                    let dt = (now - last_frame).as_secs_f32().min(MAX_TICK);
                    last_frame = now;

                    // Tick, then render the published snapshot.
                    let tick_start = Instant::now();
                    let tick = input.frame();
                    player.tick(&tick, &world, dt);
                    let camera = player.camera();
                    let tick_time = tick_start.elapsed();

                    let render_start = Instant::now();
                    let stats = rasterizer.render_frame(&mesh, &camera, &mut framebuffer);
                    let render_time = render_start.elapsed();

                    let present_start = Instant::now();
                    let presented = surface.resize(width, height).and_then(|_| {
                        let mut buffer = surface.buffer_mut()?;
                        buffer.copy_from_slice(framebuffer.color_buffer_slice());
                        buffer.present()
                    });
                    if let Err(err) = presented {
                        log::error!("present failed: {err}");
                        elwt.exit();
                        return;
                    }
                    timings.record(tick_time, render_time, present_start.elapsed(), stats);
                }
                _ => {}
            },
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta: (dx, dy) },
                ..
            } => input.apply(InputEvent::LookDelta(glam::Vec2::new(dx as f32, dy as f32))),
            Event::AboutToWait => window.request_redraw(),
            _ => {}
        }
    })
    .map_err(|e| anyhow!("event loop: {e}"))
}
