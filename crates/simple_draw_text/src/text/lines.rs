//! Timed on-screen text lines
//!
//! Lines are stacked from the top of the screen in insertion order. A line with a
//! finite duration starts counting down the first time it is rendered and is
//! dropped on the first render after the countdown goes negative; later lines
//! then scroll up one row.

use std::time::{Duration, Instant};

use super::draw::TextRenderer;
use crate::config::TextOverlayConfig;
use crate::font::BitmapFont;
use crate::foundation::math::Color;
use crate::foundation::time::{Clock, SystemClock};
use crate::render::DrawSurface;

/// How long a line stays on screen once first rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineDuration {
    /// Never expires
    #[default]
    Forever,
    /// Remaining milliseconds; zero or negative expires on the next render that sees time pass
    Millis(i64),
}

impl LineDuration {
    /// Whether the line never expires
    pub const fn is_forever(self) -> bool {
        matches!(self, Self::Forever)
    }

    /// Remaining milliseconds, `None` for [`LineDuration::Forever`]
    pub const fn millis(self) -> Option<i64> {
        match self {
            Self::Forever => None,
            Self::Millis(ms) => Some(ms),
        }
    }
}

impl From<i64> for LineDuration {
    fn from(millis: i64) -> Self {
        Self::Millis(millis)
    }
}

impl From<i32> for LineDuration {
    fn from(millis: i32) -> Self {
        Self::Millis(i64::from(millis))
    }
}

impl From<u32> for LineDuration {
    fn from(millis: u32) -> Self {
        Self::Millis(i64::from(millis))
    }
}

impl From<Duration> for LineDuration {
    fn from(duration: Duration) -> Self {
        Self::Millis(i64::try_from(duration.as_millis()).unwrap_or(i64::MAX))
    }
}

impl From<Option<Duration>> for LineDuration {
    fn from(duration: Option<Duration>) -> Self {
        duration.map_or(Self::Forever, Self::from)
    }
}

/// One entry of the registry
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    text: String,
    color: Color,
    remaining: LineDuration,
    started_at: Option<Instant>,
}

impl TextLine {
    fn new(text: String, color: Color, remaining: LineDuration) -> Self {
        Self {
            text,
            color,
            remaining,
            started_at: None,
        }
    }

    /// Line content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Line color
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Time left before expiry
    pub const fn remaining(&self) -> LineDuration {
        self.remaining
    }

    /// Whether the countdown has begun
    pub const fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Advance the countdown to `now`; returns true once the line has expired
    fn tick(&mut self, now: Instant) -> bool {
        let LineDuration::Millis(remaining) = self.remaining else {
            return false;
        };

        let Some(stamp) = self.started_at else {
            self.started_at = Some(now);
            return false;
        };

        let elapsed = now.saturating_duration_since(stamp);
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        // Only whole milliseconds are consumed; the remainder carries into the next frame
        self.started_at = Some(stamp.checked_add(Duration::from_millis(elapsed_ms)).unwrap_or(now));

        let remaining = remaining.saturating_sub(i64::try_from(elapsed_ms).unwrap_or(i64::MAX));
        self.remaining = LineDuration::Millis(remaining);
        remaining < 0
    }
}

/// Scrolling list of timed text lines drawn at the top-left of the screen
#[derive(Debug, Clone)]
pub struct SimpleDrawText<C: Clock = SystemClock> {
    renderer: TextRenderer,
    default_color: Color,
    line_height: u32,
    lines: Vec<TextLine>,
    clock: C,
}

impl Default for SimpleDrawText<SystemClock> {
    fn default() -> Self {
        Self::new(TextOverlayConfig::default())
    }
}

impl SimpleDrawText<SystemClock> {
    /// Registry timed by the system clock
    pub fn new(config: TextOverlayConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> SimpleDrawText<C> {
    /// Registry timed by `clock`
    pub fn with_clock(config: TextOverlayConfig, clock: C) -> Self {
        let renderer = TextRenderer::new(config.screen_width, config.screen_height)
            .with_font(BitmapFont::with_scale(config.font_scale));
        Self {
            renderer,
            default_color: config.text_color,
            line_height: config.line_height,
            lines: Vec::new(),
            clock,
        }
    }

    /// Append a line in the default color
    pub fn add_text(&mut self, text: impl Into<String>, duration: impl Into<LineDuration>) {
        let color = self.default_color;
        self.add_colored_text(text, color, duration);
    }

    /// Append a line in `color`
    pub fn add_colored_text(
        &mut self,
        text: impl Into<String>,
        color: Color,
        duration: impl Into<LineDuration>,
    ) {
        let line = TextLine::new(text.into(), color, duration.into());
        log::trace!("Adding text line {:?} ({:?})", line.text, line.remaining);
        self.lines.push(line);
    }

    /// Draw a free-standing string, outside the managed list
    pub fn draw_text<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
    ) {
        self.renderer.draw_text(surface, text, x, y, color);
    }

    /// Draw every line, then drop the ones whose countdown went negative
    ///
    /// Call once per frame.
    pub fn render<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        let now = self.clock.now();
        let screen_height = i64::from(self.renderer.screen_size().1);
        let line_height = i64::from(self.line_height);
        let mut expired = Vec::new();

        for (index, line) in self.lines.iter_mut().enumerate() {
            let row = i64::try_from(index).unwrap_or(i64::MAX);
            let y = screen_height.saturating_sub(row.saturating_add(1).saturating_mul(line_height));
            let y = i32::try_from(y).unwrap_or(i32::MIN);
            self.renderer.draw_text(surface, &line.text, 0, y, line.color);

            if line.tick(now) {
                expired.push(index);
            }
        }

        // Highest index first so earlier removals don't shift the rest
        for index in expired.into_iter().rev() {
            let line = self.lines.remove(index);
            log::debug!("Text line {:?} expired", line.text);
        }
    }

    /// Lines in render order
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines are pending
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Underlying immediate renderer
    pub const fn renderer(&self) -> &TextRenderer {
        &self.renderer
    }

    /// Mutable renderer, e.g. to change the font
    pub fn renderer_mut(&mut self) -> &mut TextRenderer {
        &mut self.renderer
    }

    /// Color for lines added without one
    pub const fn default_color(&self) -> Color {
        self.default_color
    }

    /// Change the color for lines added from now on
    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
    }

    /// Vertical distance between lines
    pub const fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Change the vertical distance between lines
    pub fn set_line_height(&mut self, line_height: u32) {
        self.line_height = line_height;
    }

    /// Change the pixel-space size lines are laid out in
    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.renderer.set_screen_size(width, height);
    }

    /// Clock driving the countdowns
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable clock, for hosts that drive time explicitly
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::time::ManualClock;
    use crate::render::{DrawCommand, RecordingSurface, SoftwareSurface};

    fn registry() -> SimpleDrawText<ManualClock> {
        crate::foundation::logging::init_for_tests();
        SimpleDrawText::with_clock(TextOverlayConfig::default(), ManualClock::new())
    }

    fn texts(overlay: &SimpleDrawText<ManualClock>) -> Vec<&str> {
        overlay.lines().iter().map(TextLine::text).collect()
    }

    #[test]
    fn test_forever_line_survives_many_renders() {
        let mut overlay = registry();
        overlay.add_text("B", LineDuration::Forever);

        let mut surface = RecordingSurface::new(800, 600);
        for _ in 0..1000 {
            overlay.clock_mut().advance_millis(16);
            overlay.render(&mut surface);
        }
        assert_eq!(texts(&overlay), vec!["B"]);
        assert!(!overlay.lines()[0].is_started());
    }

    #[test]
    fn test_line_expires_after_duration() {
        let mut overlay = registry();
        overlay.add_text("A", 1000);
        let mut surface = RecordingSurface::new(800, 600);

        overlay.render(&mut surface);
        assert!(overlay.lines()[0].is_started());
        assert_eq!(overlay.lines()[0].remaining(), LineDuration::Millis(1000));

        overlay.clock_mut().advance_millis(1200);
        surface.clear();
        overlay.render(&mut surface);

        // Drawn one last time on the frame it expires
        assert_eq!(surface.glyph_count(), 1);
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_line_at_exact_duration_is_kept() {
        let mut overlay = registry();
        overlay.add_text("edge", 500);
        let mut surface = RecordingSurface::new(800, 600);

        overlay.render(&mut surface);
        overlay.clock_mut().advance_millis(500);
        overlay.render(&mut surface);
        assert_eq!(overlay.lines()[0].remaining(), LineDuration::Millis(0));

        overlay.clock_mut().advance_millis(1);
        overlay.render(&mut surface);
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_countdown_starts_on_first_render_not_on_add() {
        let mut overlay = registry();
        overlay.add_text("late", 100);
        overlay.clock_mut().advance_millis(5000);

        let mut surface = RecordingSurface::new(800, 600);
        overlay.render(&mut surface);
        assert_eq!(overlay.len(), 1);

        overlay.clock_mut().advance_millis(50);
        overlay.render(&mut surface);
        assert_eq!(overlay.lines()[0].remaining(), LineDuration::Millis(50));
    }

    #[test]
    fn test_countdown_keeps_sub_millisecond_remainder() {
        let mut overlay = registry();
        overlay.add_text("fine", 10);
        let mut surface = RecordingSurface::new(800, 600);
        overlay.render(&mut surface);

        for _ in 0..7 {
            overlay.clock_mut().advance(Duration::from_micros(1500));
            overlay.render(&mut surface);
        }
        // 10.5ms elapsed: 10 whole milliseconds consumed
        assert_eq!(overlay.lines()[0].remaining(), LineDuration::Millis(0));

        overlay.clock_mut().advance(Duration::from_micros(1500));
        overlay.render(&mut surface);
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_rows_follow_insertion_order() {
        let mut overlay = registry();
        overlay.add_text("first", LineDuration::Forever);
        overlay.add_text("second", LineDuration::Forever);
        overlay.add_text("third", LineDuration::Forever);

        let mut surface = RecordingSurface::new(800, 600);
        overlay.render(&mut surface);
        assert_eq!(surface.raster_positions(), vec![(0, 585), (0, 570), (0, 555)]);
    }

    #[test]
    fn test_later_lines_scroll_up_after_expiry() {
        let mut overlay = registry();
        overlay.add_text("short", 100);
        overlay.add_text("stays", LineDuration::Forever);
        let mut surface = RecordingSurface::new(800, 600);

        overlay.render(&mut surface);
        overlay.clock_mut().advance_millis(150);
        overlay.render(&mut surface);
        surface.clear();
        overlay.render(&mut surface);

        assert_eq!(surface.raster_positions(), vec![(0, 585)]);
        assert_eq!(texts(&overlay), vec!["stays"]);
    }

    #[test]
    fn test_several_removals_in_one_pass() {
        let mut overlay = registry();
        overlay.add_text("0", 10);
        overlay.add_text("1", LineDuration::Forever);
        overlay.add_text("2", 20);
        overlay.add_text("3", 1000);
        overlay.add_text("4", 5);
        let mut surface = RecordingSurface::new(800, 600);

        overlay.render(&mut surface);
        overlay.clock_mut().advance_millis(25);
        overlay.render(&mut surface);

        assert_eq!(texts(&overlay), vec!["1", "3"]);
        assert_eq!(overlay.lines()[1].remaining(), LineDuration::Millis(975));
    }

    #[test]
    fn test_staggered_durations_expire_in_turn() {
        let mut overlay = registry();
        overlay.add_text("permanent", LineDuration::Forever);
        for i in 0..10 {
            overlay.add_text(format!("{i}. line"), 500 * i);
        }
        let mut surface = RecordingSurface::new(800, 600);
        overlay.render(&mut surface);

        overlay.clock_mut().advance_millis(1);
        overlay.render(&mut surface);
        // Line "0." had a zero budget
        assert_eq!(overlay.len(), 10);

        overlay.clock_mut().advance_millis(1100);
        overlay.render(&mut surface);
        assert_eq!(texts(&overlay)[..2], ["permanent", "3. line"]);

        overlay.clock_mut().advance_millis(5000);
        overlay.render(&mut surface);
        assert_eq!(texts(&overlay), vec!["permanent"]);
    }

    #[test]
    fn test_zero_duration_waits_for_time_to_pass() {
        let mut overlay = registry();
        overlay.add_text("blink", 0);
        let mut surface = RecordingSurface::new(800, 600);

        overlay.render(&mut surface);
        overlay.render(&mut surface);
        assert_eq!(overlay.len(), 1);

        overlay.clock_mut().advance_millis(1);
        overlay.render(&mut surface);
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_negative_duration_expires_on_second_render() {
        let mut overlay = registry();
        overlay.add_text("gone", -5);
        let mut surface = RecordingSurface::new(800, 600);

        overlay.render(&mut surface);
        assert_eq!(overlay.len(), 1);
        overlay.render(&mut surface);
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_colors_default_and_explicit() {
        let mut overlay = registry();
        overlay.set_default_color(Color::GREEN);
        overlay.add_text("g", LineDuration::Forever);
        overlay.add_colored_text("r", Color::RED, LineDuration::Forever);

        let mut surface = RecordingSurface::new(800, 600);
        overlay.render(&mut surface);
        let colors: Vec<Color> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::SetColor(color) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Color::GREEN, Color::RED]);
    }

    #[test]
    fn test_screen_size_and_line_height_move_rows() {
        let mut overlay = registry();
        overlay.set_screen_size(320, 200);
        overlay.set_line_height(20);
        overlay.add_text("a", LineDuration::Forever);
        overlay.add_text("b", LineDuration::Forever);

        let mut surface = RecordingSurface::new(320, 200);
        overlay.render(&mut surface);
        assert_eq!(surface.raster_positions(), vec![(0, 180), (0, 160)]);
    }

    #[test]
    fn test_render_leaves_stacks_balanced() {
        let mut overlay = registry();
        for i in 0..50 {
            overlay.add_text(format!("line {i}"), LineDuration::Forever);
        }
        let mut surface = SoftwareSurface::new(800, 600);
        overlay.render(&mut surface);
        assert_eq!(surface.take_error(), None);
        assert_eq!(surface.state().stack(crate::render::MatrixMode::Projection).depth(), 1);
        // Rows below the bottom edge are skipped, the rest are drawn
        assert!(surface.count_pixels([255, 255, 255, 255]) > 0);
    }

    #[test]
    fn test_duration_conversions() {
        assert_eq!(LineDuration::from(Duration::from_secs(2)), LineDuration::Millis(2000));
        assert_eq!(LineDuration::from(None::<Duration>), LineDuration::Forever);
        assert_eq!(LineDuration::from(7_u32).millis(), Some(7));
        assert!(LineDuration::default().is_forever());
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut overlay = registry();
        overlay.add_text("x", 10);
        overlay.clear();
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_font_swap_through_renderer() {
        let mut overlay = registry();
        overlay.add_text("ab", LineDuration::Forever);
        overlay.renderer_mut().set_font(BitmapFont::FIXED_16X16);
        assert_eq!(overlay.renderer().font().scale(), 2);

        let mut surface = RecordingSurface::new(800, 600);
        overlay.render(&mut surface);
        let widths: Vec<u32> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Bitmap(glyph) => Some(glyph.width()),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![16, 16]);
    }

    #[test]
    fn test_clock_is_shared_with_host() {
        let mut overlay = registry();
        overlay.add_text("t", 100);
        let mut surface = RecordingSurface::new(800, 600);
        overlay.render(&mut surface);

        overlay.clock_mut().advance_millis(60);
        overlay.clock_mut().advance_millis(60);
        assert_eq!(overlay.clock().elapsed(), Duration::from_millis(120));
        overlay.render(&mut surface);
        assert!(overlay.is_empty());
    }
}
