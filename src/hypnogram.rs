use iced::mouse;
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Stroke, Text};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use crate::chart::ChartColors;
use crate::samples::{SleepSegment, SleepStage};
use crate::scrub::{self, ScrubSession};

/// Stage colors for the hypnogram bars, top to bottom of the depth scale.
#[derive(Debug, Clone, Copy)]
pub struct StageColors {
    pub awake: Color,
    pub rem: Color,
    pub light: Color,
    pub deep: Color,
}

impl StageColors {
    pub fn for_stage(&self, stage: SleepStage) -> Color {
        match stage {
            SleepStage::Awake => self.awake,
            SleepStage::Rem => self.rem,
            SleepStage::Light => self.light,
            SleepStage::Deep => self.deep,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HypnogramState {
    session: ScrubSession,
    dragging: bool,
}

/// Sleep-stage bar chart with the same press-drag scrubbing as the
/// timeline charts. One bar per five-minute slot, taller bars for deeper
/// stages.
#[derive(Debug)]
pub struct Hypnogram<'a, M> {
    pub segments: &'a [SleepSegment],
    pub stages: StageColors,
    pub colors: ChartColors,
    pub on_scrub: fn(Option<usize>) -> M,
}

const PAD: f32 = 8.0;

impl<M> canvas::Program<M> for Hypnogram<'_, M> {
    type State = HypnogramState;

    fn update(
        &self,
        state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (canvas::event::Status, Option<M>) {
        let chart_w = bounds.width - PAD * 2.0;
        let n = self.segments.len();

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(pos) = cursor.position_in(bounds) {
                    state.dragging = true;
                    let idx = state.session.update(pos.x - PAD, chart_w, n);
                    return (canvas::event::Status::Captured, Some((self.on_scrub)(idx)));
                }
                (canvas::event::Status::Ignored, None)
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) if state.dragging => {
                if let Some(pos) = cursor.position() {
                    let prev = state.session.active();
                    let idx = state.session.update(pos.x - bounds.x - PAD, chart_w, n);
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

        let chart_w = bounds.width - PAD * 2.0;
        let chart_h = bounds.height - PAD * 2.0;
        let n = self.segments.len();

        let bg = Path::rectangle(Point::ORIGIN, bounds.size());
        frame.fill(&bg, c.bg);
        let border = Path::rectangle(
            Point::new(0.5, 0.5),
            Size::new(bounds.width - 1.0, bounds.height - 1.0),
        );
        frame.stroke(&border, Stroke::default().with_color(c.border).with_width(0.5));

        if chart_w <= 0.0 || chart_h <= 0.0 || n == 0 {
            return vec![frame.into_geometry()];
        }

        let slot_w = chart_w / n as f32;
        let bar_w = (slot_w - 1.0).max(1.0);

        for (i, seg) in self.segments.iter().enumerate() {
            let h = chart_h * seg.stage.depth();
            let x = PAD + i as f32 * slot_w;
            let y = PAD + chart_h - h;
            let bar = Path::rectangle(Point::new(x, y), Size::new(bar_w, h));
            let color = self.stages.for_stage(seg.stage);
            let alpha = if state.session.active().is_some_and(|a| a != i) {
                0.45
            } else {
                1.0
            };
            frame.fill(&bar, Color::from_rgba(color.r, color.g, color.b, alpha));
        }

        // Scrub readout: stage name and clock time of the held slot.
        if let Some(idx) = state.session.active() {
            if let Some(seg) = self.segments.get(idx) {
                let snap_x = PAD + (idx as f32 + 0.5) * slot_w;
                let crosshair = Path::line(
                    Point::new(snap_x, PAD),
                    Point::new(snap_x, PAD + chart_h),
                );
                frame.stroke(
                    &crosshair,
                    Stroke::default()
                        .with_color(Color::from_rgba(c.text.r, c.text.g, c.text.b, 0.5))
                        .with_width(1.0),
                );

                let readout = format!("{} · {}", seg.stage.label(), seg.label);
                let label_w = readout.len() as f32 * 6.6 + 12.0;
                let tx = PAD + scrub::label_anchor_x(snap_x - PAD, chart_w, label_w);

                let box_path = Path::rectangle(
                    Point::new(tx - 4.0, PAD),
                    Size::new(label_w, 18.0),
                );
                frame.fill(&box_path, Color::from_rgba(c.bg.r, c.bg.g, c.bg.b, 0.95));
                frame.stroke(
                    &box_path,
                    Stroke::default().with_color(c.border).with_width(0.8),
                );

                let mut text = Text::from(readout);
                text.position = Point::new(tx, PAD + 2.0);
                text.color = self.stages.for_stage(seg.stage);
                text.size = 11.0.into();
                frame.fill_text(text);
            }
        }

        vec![frame.into_geometry()]
    }
}
