//! Interactive demo shell for the crop selection machine.
//!
//! Opens a minifb window showing the image, polls mouse and keyboard state
//! every frame, and translates edges in that state into the pointer entry
//! points of [`RubberBand`]:
//! - press/release edges map to `on_press`/`on_release`
//! - two primary presses close together in time and space synthesize
//!   `on_double_click`, which commits the crop to a PNG
//! - `D` toggles fit/native display, `X` toggles the machine, `Esc` quits

use std::cell::RefCell;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use cropband_core::{
    CursorHint, Point, PointerButton, Rect, RubberBand, Size, StatusEvent,
};
use cropband_paint::{crop, Frame};
use image::RgbaImage;
use minifb::{CursorStyle, Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::config::AppConfig;

const WINDOW_TITLE: &str = "cropband";

/// Window dimensions follow the image but stay within these bounds.
const MIN_WINDOW_SIZE: (usize, usize) = (320, 240);
const MAX_WINDOW_SIZE: (usize, usize) = (1600, 1000);

/// Two primary presses this close together count as a double-click.
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);
const DOUBLE_CLICK_SLOP: i32 = 4;

// ============================================================================
// Double-click synthesis
// ============================================================================

/// Detects double-clicks from a stream of press positions and timestamps.
///
/// minifb only reports button state, so the shell derives press edges and
/// feeds them here; a press that lands within [`DOUBLE_CLICK_SLOP`] pixels
/// and [`DOUBLE_CLICK_WINDOW`] of the previous one completes a double-click.
struct ClickTimer {
    last_press: Option<(Instant, Point)>,
}

impl ClickTimer {
    fn new() -> Self {
        Self { last_press: None }
    }

    /// Record a primary press. Returns true when it completes a double-click;
    /// the press is consumed, so a triple-click starts a fresh cycle.
    fn register(&mut self, position: Point, now: Instant) -> bool {
        if let Some((then, there)) = self.last_press.take() {
            let near = (position.x - there.x).abs() <= DOUBLE_CLICK_SLOP
                && (position.y - there.y).abs() <= DOUBLE_CLICK_SLOP;
            if near && now.duration_since(then) <= DOUBLE_CLICK_WINDOW {
                return true;
            }
        }
        self.last_press = Some((now, position));
        false
    }
}

// ============================================================================
// Image loading
// ============================================================================

/// Load the image named on the command line, falling back to a generated
/// test card so the demo always has something to crop.
fn load_image(path: Option<&Path>) -> RgbaImage {
    match path {
        Some(path) => match image::open(path) {
            Ok(img) => {
                log::info!("Loaded {:?} ({}x{})", path, img.width(), img.height());
                img.to_rgba8()
            }
            Err(e) => {
                log::error!("Failed to open {:?}: {}", path, e);
                test_card()
            }
        },
        None => {
            log::info!("No image argument, using built-in test card");
            test_card()
        }
    }
}

/// Colorful gradient standing in for a real photograph.
fn test_card() -> RgbaImage {
    let (width, height) = (800u32, 600u32);
    RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width) as u8;
        let g = (y * 255 / height) as u8;
        image::Rgba([r, g, 128, 255])
    })
}

// ============================================================================
// Event translation helpers
// ============================================================================

/// Buttons polled each frame, paired with the machine's identifier for them.
const BUTTONS: [(MouseButton, PointerButton); 3] = [
    (MouseButton::Left, PointerButton::Left),
    (MouseButton::Right, PointerButton::Right),
    (MouseButton::Middle, PointerButton::Middle),
];

fn cursor_style(hint: CursorHint) -> CursorStyle {
    match hint {
        CursorHint::Default => CursorStyle::Arrow,
        CursorHint::Crosshair => CursorStyle::Crosshair,
        CursorHint::Move => CursorStyle::ResizeAll,
        CursorHint::EwResize => CursorStyle::ResizeLeftRight,
        CursorHint::NsResize => CursorStyle::ResizeUpDown,
        // minifb has no diagonal resize cursors
        CursorHint::NwseResize | CursorHint::NeswResize => CursorStyle::ResizeAll,
    }
}

/// Folder the cropped PNGs land in: the configured export folder when set,
/// otherwise next to the source image, otherwise the working directory.
fn export_dir(config: &AppConfig, source: Option<&Path>) -> PathBuf {
    if !config.export_folder.is_empty() {
        return PathBuf::from(&config.export_folder);
    }
    source
        .and_then(|p| p.parent())
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn export_path(config: &AppConfig, source: Option<&Path>) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    export_dir(config, source).join(format!("crop-{}.png", stamp))
}

fn status_title(event: &StatusEvent) -> String {
    format!(
        "{} - Pos: ({}, {})  Area: {} x {}",
        WINDOW_TITLE, event.position.x, event.position.y, event.selection.width, event.selection.height
    )
}

// ============================================================================
// Main loop
// ============================================================================

/// Run the demo window until the user closes it or presses Esc.
pub fn run(mut config: AppConfig, image_path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let source = load_image(image_path.as_deref());

    let width = (source.width() as usize).clamp(MIN_WINDOW_SIZE.0, MAX_WINDOW_SIZE.0);
    let height = (source.height() as usize).clamp(MIN_WINDOW_SIZE.1, MAX_WINDOW_SIZE.1);

    let mut window = Window::new(
        WINDOW_TITLE,
        width,
        height,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    // Notifications fire while the machine is borrowed, so the callbacks
    // park their payloads here and the loop drains them afterwards.
    let status_slot: Rc<RefCell<Option<StatusEvent>>> = Rc::new(RefCell::new(None));
    let commit_slot: Rc<RefCell<Option<Rect>>> = Rc::new(RefCell::new(None));

    let mut machine = RubberBand::new()
        .with_zones(config.hit_zones)
        .on_status({
            let slot = Rc::clone(&status_slot);
            move |event| {
                slot.borrow_mut().replace(event);
            }
        })
        .on_commit({
            let slot = Rc::clone(&commit_slot);
            move |rect| {
                slot.borrow_mut().replace(rect);
            }
        });

    machine.set_container_size(Size::new(width as i32, height as i32));
    machine.set_display_mode(config.display_mode);
    machine.set_image(Size::new(source.width() as i32, source.height() as i32));

    let mut frame = Frame::blank(width, height);
    frame.blit(&source, machine.view_frame());
    machine.repaint(&mut frame);

    let mut clicks = ClickTimer::new();
    let mut held = [false; BUTTONS.len()];
    let mut last_position = Point::new(-1, -1);
    let mut last_cursor = CursorHint::Default;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        // Track window resizes before handling input so hit testing uses
        // the frame the user actually sees.
        let (win_width, win_height) = window.get_size();
        if win_width != frame.width() || win_height != frame.height() {
            machine.set_container_size(Size::new(win_width as i32, win_height as i32));
            frame = Frame::blank(win_width, win_height);
            frame.blit(&source, machine.view_frame());
            machine.repaint(&mut frame);
        }

        if window.is_key_pressed(Key::D, KeyRepeat::No) {
            machine.set_display_mode(machine.display_mode().toggled());
            frame.blit(&source, machine.view_frame());
            machine.repaint(&mut frame);
        }
        if window.is_key_pressed(Key::X, KeyRepeat::No) {
            machine.set_disabled(!machine.is_disabled());
            machine.repaint(&mut frame);
        }

        let position = window
            .get_mouse_pos(MouseMode::Pass)
            .map(|(x, y)| Point::new(x as i32, y as i32))
            .unwrap_or(last_position);

        if position != last_position {
            machine.on_move(position, &mut frame);
            last_position = position;
        }

        for (i, (probe, button)) in BUTTONS.iter().enumerate() {
            let down = window.get_mouse_down(*probe);
            if down && !held[i] {
                machine.on_press(position, *button, &mut frame);
                if button.is_primary() && clicks.register(position, Instant::now()) {
                    machine.on_double_click(&mut frame);
                }
            } else if !down && held[i] {
                machine.on_release(position, &mut frame);
            }
            held[i] = down;
        }

        let hint = machine.cursor_hint();
        if hint != last_cursor {
            window.set_cursor_style(cursor_style(hint));
            last_cursor = hint;
        }

        if let Some(event) = status_slot.borrow_mut().take() {
            window.set_title(&status_title(&event));
        }

        if let Some(selection) = commit_slot.borrow_mut().take() {
            let cropped = crop::crop_selection(&source, selection);
            let path = export_path(&config, image_path.as_deref());
            if let Err(e) = crop::write_png(&cropped, &path) {
                log::error!("Failed to write crop to {:?}: {}", path, e);
            }
        }

        window.update_with_buffer(frame.pixels(), frame.width(), frame.height())?;
    }

    config.display_mode = machine.display_mode();
    if let Err(e) = config.save_to_default_path() {
        log::warn!("Failed to save configuration: {}", e);
    }

    Ok(())
}
