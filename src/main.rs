use trimask::colors;
use trimask::config::RenderConfig;
use trimask::render::{argb_to_rgba, draw_mesh_with, FrameBuffer, ImageSink, PixelSink};
use trimask::window::{FrameLimiter, Window, WindowEvent};
use trimask::{Mesh, Vec4};

/// Spins `model` to its pose at `time_secs`, projects it and paints it.
fn render_frame<S: PixelSink>(
    config: &RenderConfig,
    model: &Mesh,
    time_secs: f32,
    sink: &mut S,
    to_color: impl Fn(u32) -> S::Color,
) {
    let [sx, sy, sz] = config.spin();
    let mut posed = model.clone();
    posed.rotate("xyz", &[sx * time_secs, sy * time_secs, sz * time_secs]);
    posed.translate(Vec4::direction(0.0, 0.0, -config.distance()));

    let projection = config.projection();
    let mut screen: Mesh = posed
        .triangles()
        .iter()
        .map(|t| projection.project_triangle(t, config.width(), config.height()))
        .collect();

    sink.clear(to_color(config.background()));
    draw_mesh_with(&mut screen, sink, |t| {
        let intensity = (config.distance() / t.depth()).powi(2);
        to_color(colors::shade(config.fill(), intensity))
    });
}

fn load_model(config: &RenderConfig) -> Result<Mesh, String> {
    match config.obj_path() {
        Some(path) => {
            let mesh = Mesh::from_obj(path).map_err(|e| e.to_string())?;
            log::info!("loaded {} triangles from {}", mesh.len(), path.display());
            Ok(mesh)
        }
        None => Ok(Mesh::cube()),
    }
}

fn main() -> Result<(), String> {
    env_logger::init();

    let mut config = RenderConfig::from_args(std::env::args().skip(1)).map_err(|e| e.to_string())?;
    let model = load_model(&config)?;

    if let Some(path) = config.snapshot_path() {
        let mut sink = ImageSink::new(
            config.width(),
            config.height(),
            argb_to_rgba(config.background()),
        );
        render_frame(&config, &model, 1.0, &mut sink, argb_to_rgba);
        sink.save(path).map_err(|e| e.to_string())?;
        log::info!("wrote snapshot to {}", path.display());
        return Ok(());
    }

    let mut window = Window::new("trimask", config.width(), config.height())?;
    let mut frame = FrameBuffer::new(config.width(), config.height(), config.background());
    let mut limiter = FrameLimiter::new(&window);
    let mut elapsed_ms: u64 = 0;

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                frame.resize(w, h, config.background());
                config.set_size(w, h);
            }
            WindowEvent::None => {}
        }

        elapsed_ms += limiter.wait_and_get_delta(&window);
        render_frame(&config, &model, elapsed_ms as f32 / 1000.0, &mut frame, |c| c);
        window.present(&frame)?;
    }

    Ok(())
}
