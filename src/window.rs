//! SDL2 presentation for a [`FrameBuffer`]. Only built with the `window`
//! feature.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::config::FRAME_TARGET_TIME;
use crate::render::FrameBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Sleeps off the rest of the frame budget and returns the milliseconds
    /// since the previous call.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = FRAME_TARGET_TIME as u64 - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

pub struct Window {
    canvas: Canvas<sdl2::video::Window>,
    // Declared before `texture_creator` so it drops first.
    texture: Texture<'static>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        let texture = streaming_texture(&texture_creator, width, height)?;

        log::info!("opened {width}x{height} window");

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    pub fn poll_events(&mut self) -> WindowEvent {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => return WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32),
                _ => {}
            }
        }
        WindowEvent::None
    }

    /// Uploads `frame` and shows it. The frame must match the window size.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        if (frame.width(), frame.height()) != (self.width, self.height) {
            return Err(format!(
                "frame is {}x{} but window is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            ));
        }

        self.texture
            .update(None, frame.as_bytes(), (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        log::debug!("window resized to {width}x{height}");
        self.texture = streaming_texture(&self.texture_creator, width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

fn streaming_texture(
    creator: &TextureCreator<WindowContext>,
    width: u32,
    height: u32,
) -> Result<Texture<'static>, String> {
    // SAFETY: the creator is boxed and owned by `Window`, which drops the
    // texture before it, so extending the borrow never outlives the creator.
    let creator: &'static TextureCreator<WindowContext> = unsafe { &*(creator as *const _) };
    creator
        .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
        .map_err(|e| e.to_string())
}
