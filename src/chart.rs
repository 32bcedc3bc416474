use iced::mouse;
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Stroke, Text};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use crate::samples::{EventTag, TimeSeries};
use crate::scrub::{self, ScrubSession};

/// Colors the chart needs from the active palette.
#[derive(Debug, Clone, Copy)]
pub struct ChartColors {
    pub bg: Color,
    pub border: Color,
    pub grid: Color,
    pub label: Color,
    pub text: Color,
}

/// Scrub gesture state: live only between press and release.
#[derive(Debug, Clone, Default)]
pub struct ChartState {
    session: ScrubSession,
    dragging: bool,
}

/// A single-series timeline chart drawn via iced Canvas. Pressing and
/// dragging over it scrubs through the samples; each index change is
/// reported through `on_scrub`, and release reports `None`.
#[derive(Debug)]
pub struct TimelineChart<'a, M> {
    pub series: &'a TimeSeries,
    pub color: Color,
    pub y_min: f32,
    pub y_max: f32,
    /// Unit suffix for the scrub readout (e.g. " bpm", "%", "°C").
    pub unit: &'static str,
    pub filled: bool,
    /// Shaded horizontal target band (low, high), e.g. the glucose range.
    pub band: Option<(f32, f32)>,
    pub colors: ChartColors,
    pub on_scrub: fn(Option<usize>) -> M,
}

const PAD_LEFT: f32 = 44.0;
const PAD_RIGHT: f32 = 8.0;
const PAD_TOP: f32 = 22.0;
const PAD_BOTTOM: f32 = 6.0;

impl<M> canvas::Program<M> for TimelineChart<'_, M> {
    type State = ChartState;

    fn update(
        &self,
        state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (canvas::event::Status, Option<M>) {
        let chart_w = bounds.width - PAD_LEFT - PAD_RIGHT;
        let n = self.series.len();

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(pos) = cursor.position_in(bounds) {
                    state.dragging = true;
                    let idx = state.session.update(pos.x - PAD_LEFT, chart_w, n);
                    return (canvas::event::Status::Captured, Some((self.on_scrub)(idx)));
                }
                (canvas::event::Status::Ignored, None)
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) if state.dragging => {
                // Use the absolute position so dragging past the edge
                // clamps to the nearest end instead of dropping the gesture.
                if let Some(pos) = cursor.position() {
                    let prev = state.session.active();
                    let idx = state
                        .session
                        .update(pos.x - bounds.x - PAD_LEFT, chart_w, n);
                    if idx != prev {
                        return (canvas::event::Status::Captured, Some((self.on_scrub)(idx)));
                    }
                }
                (canvas::event::Status::Captured, None)
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                if state.dragging =>
            {
                state.dragging = false;
                state.session.finish();
                (canvas::event::Status::Captured, Some((self.on_scrub)(None)))
            }
            _ => (canvas::event::Status::Ignored, None),
        }
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let c = &self.colors;

        let chart_w = bounds.width - PAD_LEFT - PAD_RIGHT;
        let chart_h = bounds.height - PAD_TOP - PAD_BOTTOM;

        if chart_w <= 0.0 || chart_h <= 0.0 {
            return vec![frame.into_geometry()];
        }

        let bg = Path::rectangle(Point::ORIGIN, bounds.size());
        frame.fill(&bg, c.bg);

        let border = Path::rectangle(
            Point::new(0.5, 0.5),
            Size::new(bounds.width - 1.0, bounds.height - 1.0),
        );
        frame.stroke(&border, Stroke::default().with_color(c.border).with_width(0.5));

        let y_range = self.y_max - self.y_min;

        // Target band shading behind everything else.
        if let Some((low, high)) = self.band {
            if y_range > 0.0 {
                let top = PAD_TOP + chart_h * (1.0 - (high - self.y_min) / y_range).clamp(0.0, 1.0);
                let bottom =
                    PAD_TOP + chart_h * (1.0 - (low - self.y_min) / y_range).clamp(0.0, 1.0);
                if bottom > top {
                    let band = Path::rectangle(
                        Point::new(PAD_LEFT, top),
                        Size::new(chart_w, bottom - top),
                    );
                    frame.fill(
                        &band,
                        Color::from_rgba(self.color.r, self.color.g, self.color.b, 0.08),
                    );
                }
            }
        }

        // Y-axis labels + grid at nice round tick values.
        if y_range > 0.0 {
            let step = nice_tick_step(y_range, 6);
            let first_tick = (self.y_min / step).ceil() * step;
            let mut val = first_tick;
            while val <= self.y_max + step * 0.001 {
                let frac = 1.0 - (val - self.y_min) / y_range;
                let y = PAD_TOP + chart_h * frac;

                let grid = Path::line(
                    Point::new(PAD_LEFT, y),
                    Point::new(PAD_LEFT + chart_w, y),
                );
                frame.stroke(&grid, Stroke::default().with_color(c.grid).with_width(1.0));

                let label_str = if step >= 1.0 {
                    format!("{val:.0}")
                } else {
                    format!("{val:.1}")
                };
                let mut label = Text::from(label_str);
                label.position = Point::new(4.0, y - 5.0);
                label.color = c.label;
                label.size = 10.0.into();
                frame.fill_text(label);

                val += step;
            }
        }

        let n = self.series.len();
        if n < 2 {
            return vec![frame.into_geometry()];
        }

        let point_at = |i: usize, val: f32| {
            let x = PAD_LEFT + (i as f32 / (n - 1) as f32) * chart_w;
            let y = PAD_TOP + scrub::marker_y(val, self.y_min, self.y_max, chart_h);
            Point::new(x, y)
        };

        // Filled area under the line.
        if self.filled {
            let mut builder = canvas::path::Builder::new();
            builder.move_to(Point::new(PAD_LEFT, PAD_TOP + chart_h));
            for (i, val) in self.series.values().enumerate() {
                builder.line_to(point_at(i, val));
            }
            builder.line_to(Point::new(PAD_LEFT + chart_w, PAD_TOP + chart_h));
            builder.close();
            let fill_path = builder.build();
            frame.fill(
                &fill_path,
                Color::from_rgba(self.color.r, self.color.g, self.color.b, 0.15),
            );
        }

        // Line with glow pass.
        let mut builder = canvas::path::Builder::new();
        for (i, val) in self.series.values().enumerate() {
            let p = point_at(i, val);
            if i == 0 {
                builder.move_to(p);
            } else {
                builder.line_to(p);
            }
        }
        let path = builder.build();
        let glow = Color::from_rgba(self.color.r, self.color.g, self.color.b, 0.2);
        frame.stroke(&path, Stroke::default().with_color(glow).with_width(4.0));
        frame.stroke(&path, Stroke::default().with_color(self.color).with_width(1.8));

        // Tagged events get a marker dot and a small caption on the line.
        for (i, sample) in self.series.samples().iter().enumerate() {
            if sample.event == EventTag::None {
                continue;
            }
            let p = point_at(i, sample.value);
            let halo = Path::circle(p, 6.0);
            frame.fill(
                &halo,
                Color::from_rgba(self.color.r, self.color.g, self.color.b, 0.25),
            );
            let dot = Path::circle(p, 3.0);
            frame.fill(&dot, c.text);

            let mut caption = Text::from(sample.event.label().to_string());
            caption.position = Point::new(p.x + 7.0, p.y - 13.0);
            caption.color = c.label;
            caption.size = 9.0.into();
            frame.fill_text(caption);
        }

        // Active scrub: crosshair, dot, value + time readout.
        if let Some(idx) = state.session.active() {
            if let Some(sample) = self.series.get(idx) {
                let p = point_at(idx, sample.value);

                let crosshair = Path::line(
                    Point::new(p.x, PAD_TOP),
                    Point::new(p.x, PAD_TOP + chart_h),
                );
                frame.stroke(
                    &crosshair,
                    Stroke::default()
                        .with_color(Color::from_rgba(c.text.r, c.text.g, c.text.b, 0.35))
                        .with_width(1.0),
                );

                let halo = Path::circle(p, 7.0);
                frame.fill(
                    &halo,
                    Color::from_rgba(self.color.r, self.color.g, self.color.b, 0.25),
                );
                let dot = Path::circle(p, 4.0);
                frame.fill(&dot, self.color);
                frame.stroke(
                    &Path::circle(p, 4.0),
                    Stroke::default().with_color(c.text).with_width(1.2),
                );

                let value_str = format!("{:.0}{}", sample.value, self.unit);
                let label_w = value_str.len().max(sample.label.len()) as f32 * 6.6 + 12.0;
                let tx = PAD_LEFT
                    + scrub::label_anchor_x(p.x - PAD_LEFT, chart_w, label_w);

                let box_path = Path::rectangle(
                    Point::new(tx - 4.0, PAD_TOP + 2.0),
                    Size::new(label_w, 32.0),
                );
                frame.fill(&box_path, Color::from_rgba(c.bg.r, c.bg.g, c.bg.b, 0.95));
                frame.stroke(
                    &box_path,
                    Stroke::default()
                        .with_color(Color::from_rgba(
                            self.color.r,
                            self.color.g,
                            self.color.b,
                            0.4,
                        ))
                        .with_width(0.8),
                );

                let mut value_text = Text::from(value_str);
                value_text.position = Point::new(tx, PAD_TOP + 4.0);
                value_text.color = self.color;
                value_text.size = 12.0.into();
                frame.fill_text(value_text);

                let mut time_text = Text::from(sample.label.clone());
                time_text.position = Point::new(tx, PAD_TOP + 19.0);
                time_text.color = c.label;
                time_text.size = 10.0.into();
                frame.fill_text(time_text);
            }
        }

        vec![frame.into_geometry()]
    }
}

/// Pick a "nice" tick step (1, 2, 5, 10, 20, 50, …) so that the range
/// is divided into at most `max_ticks` intervals.
pub fn nice_tick_step(range: f32, max_ticks: usize) -> f32 {
    let rough = range / max_ticks as f32;
    let mag = 10f32.powf(rough.log10().floor());
    let norm = rough / mag;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    (nice * mag).max(f32::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_tick_step_round_values() {
        assert_eq!(nice_tick_step(100.0, 10), 10.0);
        assert_eq!(nice_tick_step(7.0, 10), 1.0);
        assert_eq!(nice_tick_step(0.5, 10), 0.05);
    }

    #[test]
    fn test_nice_tick_step_never_zero() {
        assert!(nice_tick_step(0.0, 10) > 0.0);
    }
}
