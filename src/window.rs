//! SDL2 window: keyboard input in, palette-indexed frames out.

use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::camera::Control;
use crate::engine::Presenter;
use crate::palette::Palette;
use crate::render::FrameBuffer;

pub const FPS: u64 = 30;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

/// Maps a key to its camera control.
///
/// Arrow keys drive and turn, `N`/`M` roll, `A`/`Z` pitch, `D`/`C` move
/// vertically, keypad minus/plus zoom and `F`/`S` scale the speed.
pub fn map_key(key: Keycode) -> Option<Control> {
    let control = match key {
        Keycode::Up => Control::Accelerate,
        Keycode::Down => Control::Decelerate,
        Keycode::N => Control::RollLeft,
        Keycode::M => Control::RollRight,
        Keycode::A => Control::PitchUp,
        Keycode::Z => Control::PitchDown,
        Keycode::Left => Control::YawLeft,
        Keycode::Right => Control::YawRight,
        Keycode::D => Control::MoveUp,
        Keycode::C => Control::MoveDown,
        Keycode::KpMinus => Control::ZoomIn,
        Keycode::KpPlus => Control::ZoomOut,
        Keycode::F => Control::SpeedUp,
        Keycode::S => Control::SlowDown,
        _ => return None,
    };
    Some(control)
}

/// Zoom and speed-scale controls step once per key press, so they are taken
/// from the key release instead of the auto-repeating key down.
pub fn fires_on_release(control: Control) -> bool {
    matches!(
        control,
        Control::ZoomIn | Control::ZoomOut | Control::SpeedUp | Control::SlowDown
    )
}

/// Everything the window collected since the last poll.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrameInput {
    /// Controls in arrival order. Auto-repeat repeats movement and turns;
    /// zoom and speed scale arrive once per release.
    pub controls: Vec<Control>,
    pub quit: bool,
    /// Latest size the window was resized to.
    pub resize: Option<(u32, u32)>,
    /// `P` was pressed.
    pub snapshot: bool,
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

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time.saturating_sub(self.previous_frame_time);
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before `texture_creator` so it is dropped first
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    palette: Palette,
    argb: Vec<u8>,
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
        let texture = create_texture(&texture_creator, width, height)?;

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            palette: Palette::standard(),
            argb: Vec::with_capacity(width as usize * height as usize * 4),
            width,
            height,
        })
    }

    /// Drains pending SDL events.
    pub fn poll_events(&mut self) -> FrameInput {
        let mut input = FrameInput::default();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => input.quit = true,
                Event::KeyDown {
                    keycode: Some(Keycode::P),
                    repeat: false,
                    ..
                } => input.snapshot = true,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(control) = map_key(key).filter(|&c| !fires_on_release(c)) {
                        input.controls.push(control);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(control) = map_key(key).filter(|&c| fires_on_release(c)) {
                        input.controls.push(control);
                    }
                }
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => input.resize = Some((w.max(0) as u32, h.max(0) as u32)),
                _ => {}
            }
        }
        input
    }

    /// Recreates the streaming texture for a new frame size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.texture = create_texture(&self.texture_creator, width, height)?;
        self.width = width;
        self.height = height;
        debug!("window texture now {width}x{height}");
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

impl Presenter for Window {
    /// Expands the frame through the palette and blits it to the window.
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        if (frame.width(), frame.height()) != (self.width, self.height) {
            self.resize(frame.width(), frame.height())?;
        }

        self.palette.expand_argb(frame.as_slice(), &mut self.argb);
        self.texture
            .update(None, &self.argb, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }
}

fn create_texture(
    creator: &sdl2::render::TextureCreator<sdl2::video::WindowContext>,
    width: u32,
    height: u32,
) -> Result<sdl2::render::Texture<'static>, String> {
    // SAFETY: the creator is boxed inside `Window`, so its address is stable,
    // and `Window` drops its texture before the creator.
    let creator: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
        unsafe { &*(creator as *const _) };
    creator
        .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_control_has_a_key() {
        let keys = [
            Keycode::Up,
            Keycode::Down,
            Keycode::N,
            Keycode::M,
            Keycode::A,
            Keycode::Z,
            Keycode::Left,
            Keycode::Right,
            Keycode::D,
            Keycode::C,
            Keycode::KpMinus,
            Keycode::KpPlus,
            Keycode::F,
            Keycode::S,
        ];
        let mut controls: Vec<Control> = keys.iter().filter_map(|&k| map_key(k)).collect();
        assert_eq!(controls.len(), 14);
        controls.sort_by_key(|c| *c as u8);
        controls.dedup();
        assert_eq!(controls.len(), 14);
    }

    #[test]
    fn pitch_and_zoom_keys_follow_the_classic_layout() {
        assert_eq!(map_key(Keycode::A), Some(Control::PitchUp));
        assert_eq!(map_key(Keycode::Z), Some(Control::PitchDown));
        assert_eq!(map_key(Keycode::KpMinus), Some(Control::ZoomIn));
        assert_eq!(map_key(Keycode::KpPlus), Some(Control::ZoomOut));
    }

    #[test]
    fn zoom_and_speed_scale_step_on_release() {
        let on_release: Vec<Control> = [
            Keycode::Up,
            Keycode::N,
            Keycode::A,
            Keycode::Left,
            Keycode::D,
            Keycode::KpMinus,
            Keycode::KpPlus,
            Keycode::F,
            Keycode::S,
        ]
        .iter()
        .filter_map(|&k| map_key(k))
        .filter(|&c| fires_on_release(c))
        .collect();

        assert_eq!(
            on_release,
            vec![
                Control::ZoomIn,
                Control::ZoomOut,
                Control::SpeedUp,
                Control::SlowDown
            ]
        );
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(map_key(Keycode::Q), None);
        assert_eq!(map_key(Keycode::P), None);
    }
}
