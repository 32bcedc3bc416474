use iced::keyboard;
use iced::widget::canvas::Canvas;
use iced::widget::{
    button, column, container, mouse_area, row, scrollable, text, Column, Row, Space,
};
use iced::{
    Alignment, Background, Border, Color, Element, Length, Point, Shadow, Subscription, Theme,
    Vector,
};
use std::time::Duration;

use chrono::NaiveDate;

use crate::chart::{ChartColors, TimelineChart};
use crate::gauge::{GaugeColors, ScoreRing, Sparkline, TirBar};
use crate::hypnogram::{Hypnogram, StageColors};
use crate::preferences::Preferences;
use crate::reorder::{slot_for_pointer, CardBoard};
use crate::samples::{
    self, format_slots, generate_day, hr_zones, sleep_totals, time_in_range, DayData, Metric,
    TimeSeries, TrendSet,
};
use crate::theme::{build_palette, AccentColor, Palette, ThemeVariant};

/// Fixed vertical pitch of one row in the edit-mode card list
/// (row height + spacing), used to map pointer y to a slot.
const EDIT_ROW_H: f32 = 56.0;
const EDIT_ROW_SPACING: f32 = 8.0;
const EDIT_ROW_PITCH: f32 = EDIT_ROW_H + EDIT_ROW_SPACING;

const GLUCOSE_STEP: f32 = 5.0;

// ─── MESSAGE & ENUMS ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Detail(Metric),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    pub const ALL: &[Period] = &[Period::Day, Period::Week, Period::Month];

    pub fn name(&self) -> &'static str {
        match self {
            Period::Day => "Day",
            Period::Week => "Week",
            Period::Month => "Month",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    OpenDetail(Metric),
    Back,
    PeriodSelected(Period),
    SelectDate(usize),
    Scrubbed(Option<usize>),
    SleepScrubbed(Option<usize>),
    ToggleEditMode,
    DragStarted(Metric),
    DragMoved(Point),
    DragEnded,
    ToggleSettings,
    SetTheme(ThemeVariant),
    SetAccent(AccentColor),
    AdjustGlucoseLow(f32),
    AdjustGlucoseHigh(f32),
    KeyPressed(keyboard::Key),
}

// ─── APP STATE ─────────────────────────────────────────────────

pub struct Vital {
    board: CardBoard,
    dates: Vec<NaiveDate>,
    selected_date: usize,
    day: DayData,
    trends: TrendSet,
    screen: Screen,
    period: Period,
    /// Sample index held by an active chart scrub, None when released.
    scrub_idx: Option<usize>,
    sleep_scrub_idx: Option<usize>,
    show_settings: bool,
    prefs: Preferences,
    pal: Palette,
}

impl Vital {
    pub fn new() -> Self {
        Self::with_preferences(Preferences::load())
    }

    /// Build the app from explicit preferences, without touching the
    /// config file. `new` is the only caller that reads from disk.
    fn with_preferences(prefs: Preferences) -> Self {
        let pal = build_palette(prefs.theme, prefs.accent);
        let today = chrono::Local::now().date_naive();
        let dates = samples::date_strip(today);
        let day = generate_day(today);
        Self {
            board: CardBoard::new(crate::cards::default_cards()),
            selected_date: dates.len() - 1,
            dates,
            day,
            trends: TrendSet::generate(),
            screen: Screen::Dashboard,
            period: Period::Day,
            scrub_idx: None,
            sleep_scrub_idx: None,
            show_settings: false,
            prefs,
            pal,
        }
    }

    pub fn title(&self) -> String {
        String::from("Vital")
    }

    pub fn theme(&self) -> Theme {
        if self.prefs.theme.is_light() {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let clock = iced::time::every(Duration::from_secs(1)).map(|_| Message::Tick);
        let keys = keyboard::on_key_press(|key, _modifiers| Some(Message::KeyPressed(key)));
        Subscription::batch([clock, keys])
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Tick => {
                // Redraw only, so the header clock stays current.
            }
            Message::OpenDetail(metric) => {
                if !self.board.edit_mode() {
                    self.screen = Screen::Detail(metric);
                    self.period = Period::Day;
                    self.scrub_idx = None;
                    self.sleep_scrub_idx = None;
                }
            }
            Message::Back => {
                if self.show_settings {
                    self.close_settings();
                } else {
                    self.screen = Screen::Dashboard;
                    self.scrub_idx = None;
                    self.sleep_scrub_idx = None;
                }
            }
            Message::PeriodSelected(period) => {
                self.period = period;
                self.scrub_idx = None;
            }
            Message::SelectDate(idx) => {
                if let Some(&date) = self.dates.get(idx) {
                    self.selected_date = idx;
                    self.day = generate_day(date);
                    self.scrub_idx = None;
                    self.sleep_scrub_idx = None;
                }
            }
            Message::Scrubbed(idx) => {
                self.scrub_idx = idx;
            }
            Message::SleepScrubbed(idx) => {
                self.sleep_scrub_idx = idx;
            }
            Message::ToggleEditMode => {
                self.board.toggle_edit_mode();
            }
            Message::DragStarted(key) => {
                self.board.begin_drag(key);
            }
            Message::DragMoved(point) => {
                if self.board.dragging().is_some() {
                    let slot = slot_for_pointer(point.y, EDIT_ROW_PITCH, self.board.len());
                    self.board.update_drag(slot);
                }
            }
            Message::DragEnded => {
                self.board.end_drag();
            }
            Message::ToggleSettings => {
                if self.show_settings {
                    self.close_settings();
                } else {
                    self.show_settings = true;
                }
            }
            Message::SetTheme(variant) => {
                self.prefs.theme = variant;
                self.pal = build_palette(self.prefs.theme, self.prefs.accent);
            }
            Message::SetAccent(accent) => {
                self.prefs.accent = accent;
                self.pal = build_palette(self.prefs.theme, self.prefs.accent);
            }
            Message::AdjustGlucoseLow(delta) => {
                self.prefs.glucose_low = (self.prefs.glucose_low + delta)
                    .clamp(40.0, self.prefs.glucose_high - 10.0);
            }
            Message::AdjustGlucoseHigh(delta) => {
                self.prefs.glucose_high = (self.prefs.glucose_high + delta)
                    .clamp(self.prefs.glucose_low + 10.0, 250.0);
            }
            Message::KeyPressed(key) => self.handle_key(key),
        }
    }

    /// Settings edits accumulate in memory and hit the config file
    /// once, when the sheet closes.
    fn close_settings(&mut self) {
        self.show_settings = false;
        self.prefs.save();
    }

    fn handle_key(&mut self, key: keyboard::Key) {
        match key.as_ref() {
            keyboard::Key::Named(keyboard::key::Named::Escape) => {
                self.update(Message::Back);
            }
            keyboard::Key::Character("e") => {
                if self.screen == Screen::Dashboard && !self.show_settings {
                    self.board.toggle_edit_mode();
                }
            }
            keyboard::Key::Character("1") => self.period_key(Period::Day),
            keyboard::Key::Character("2") => self.period_key(Period::Week),
            keyboard::Key::Character("3") => self.period_key(Period::Month),
            _ => {}
        }
    }

    fn period_key(&mut self, period: Period) {
        if matches!(self.screen, Screen::Detail(_)) && !self.show_settings {
            self.update(Message::PeriodSelected(period));
        }
    }

    /// The series a detail chart shows for the current period, if any.
    fn active_series(&self, metric: Metric) -> Option<&TimeSeries> {
        match self.period {
            Period::Day => self.day.series(metric),
            Period::Week => Some(self.trends.weekly(metric)),
            Period::Month => Some(self.trends.monthly(metric)),
        }
    }

    fn chart_colors(&self) -> ChartColors {
        let p = &self.pal;
        ChartColors {
            bg: p.card_bg,
            border: p.border,
            grid: p.grid,
            label: p.label,
            text: p.text,
        }
    }

    // ─── VIEW ──────────────────────────────────────────────────

    pub fn view(&self) -> Element<'_, Message> {
        let p = &self.pal;

        let title_str = if self.show_settings {
            "Settings".to_string()
        } else {
            match self.screen {
                Screen::Dashboard => "Vital".to_string(),
                Screen::Detail(m) => m.title().to_string(),
            }
        };

        let gear = button(text("⚙").size(15).color(p.accent))
            .on_press(Message::ToggleSettings)
            .style(button::text)
            .padding([2, 4]);

        let header = row![
            gear,
            Space::with_width(Length::Fill),
            text(title_str).size(15).color(p.text),
            Space::with_width(Length::Fill),
            text(chrono::Local::now().format("%H:%M").to_string())
                .size(13)
                .color(p.label),
        ]
        .align_y(Alignment::Center)
        .padding([8, 12]);

        let content: Element<Message> = if self.show_settings {
            self.view_settings()
        } else {
            match self.screen {
                Screen::Dashboard => self.view_dashboard(),
                Screen::Detail(metric) => self.view_detail(metric),
            }
        };

        let bg = p.bg;
        let main = column![header, content].spacing(0);
        container(main)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_: &Theme| container::Style {
                background: Some(Background::Color(bg)),
                ..Default::default()
            })
            .into()
    }

    // ─── DASHBOARD ─────────────────────────────────────────────

    fn view_dashboard(&self) -> Element<'_, Message> {
        let p = &self.pal;

        let mut strip = Row::new().spacing(4);
        for (i, &date) in self.dates.iter().enumerate() {
            strip = strip.push(pill(
                samples::date_label(date),
                i == self.selected_date,
                p,
                Message::SelectDate(i),
            ));
        }

        let edit_label = if self.board.edit_mode() { "Done" } else { "Edit" };
        let edit_btn = pill(
            edit_label,
            self.board.edit_mode(),
            p,
            Message::ToggleEditMode,
        );

        let top = row![
            scrollable(strip).direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::new().width(2).scroller_width(2),
            )),
            Space::with_width(8),
            edit_btn,
        ]
        .align_y(Alignment::Center)
        .padding([0, 12]);

        let list: Element<Message> = if self.board.edit_mode() {
            self.view_edit_list()
        } else {
            self.view_card_list()
        };

        column![top, Space::with_height(10), list]
            .spacing(0)
            .into()
    }

    /// Viewing mode: one tappable summary card per metric.
    fn view_card_list(&self) -> Element<'_, Message> {
        let p = &self.pal;
        let mut col = Column::new().spacing(8).padding([0, 12]);

        for card in self.board.cards() {
            let color = p.metric(card.key);
            let headline = self.card_headline(card.key);

            let spark: Element<Message> = Canvas::new(Sparkline {
                data: self.spark_data(card.key),
                color,
            })
            .width(90)
            .height(28)
            .into();

            let body = row![
                text(card.icon.glyph()).size(18).color(color),
                Space::with_width(10),
                column![
                    text(card.title).size(13).color(p.text),
                    text(headline).size(16).color(color),
                ]
                .spacing(2),
                Space::with_width(Length::Fill),
                spark,
            ]
            .align_y(Alignment::Center);

            let card_bg = p.card_bg;
            let border_c = p.border;
            let text_c = p.text;
            col = col.push(
                button(body)
                    .on_press(Message::OpenDetail(card.key))
                    .width(Length::Fill)
                    .padding(12)
                    .style(move |_: &Theme, status| {
                        let bg = match status {
                            button::Status::Hovered | button::Status::Pressed => Color::from_rgba(
                                border_c.r, border_c.g, border_c.b, 0.5,
                            ),
                            _ => card_bg,
                        };
                        button::Style {
                            background: Some(Background::Color(bg)),
                            text_color: text_c,
                            border: Border {
                                color: border_c,
                                width: 1.0,
                                radius: 10.0.into(),
                            },
                            shadow: Shadow {
                                color: Color::from_rgba(0.0, 0.0, 0.0, 0.15),
                                offset: Vector::new(0.0, 2.0),
                                blur_radius: 6.0,
                            },
                            ..Default::default()
                        }
                    }),
            );
        }

        scrollable(col).height(Length::Fill).into()
    }

    /// Edit mode: compact fixed-height rows with a drag handle. The whole
    /// column sits inside one mouse area so drag moves map cleanly from
    /// pointer y to a target slot.
    fn view_edit_list(&self) -> Element<'_, Message> {
        let p = &self.pal;
        let dragging = self.board.dragging();
        let mut col = Column::new().spacing(EDIT_ROW_SPACING as u16);

        for card in self.board.cards() {
            let is_dragged = dragging == Some(card.key);
            let alpha = if is_dragged { 0.5 } else { 1.0 };
            let color = p.metric(card.key);
            let faded = Color {
                a: alpha,
                ..p.text
            };

            let body = row![
                text("☰").size(15).color(Color { a: alpha, ..p.label }),
                Space::with_width(12),
                text(card.icon.glyph())
                    .size(16)
                    .color(Color { a: alpha, ..color }),
                Space::with_width(10),
                text(card.title).size(13).color(faded),
                Space::with_width(Length::Fill),
                text(card.unit).size(11).color(Color { a: alpha, ..p.label }),
            ]
            .align_y(Alignment::Center);

            let card_bg = p.card_bg;
            let border_c = if is_dragged { p.accent } else { p.border };
            let framed = container(body)
                .width(Length::Fill)
                .height(EDIT_ROW_H)
                .padding([0, 12])
                .align_y(Alignment::Center)
                .style(move |_: &Theme| container::Style {
                    background: Some(Background::Color(Color { a: alpha, ..card_bg })),
                    border: Border {
                        color: border_c,
                        width: 1.0,
                        radius: 10.0.into(),
                    },
                    ..Default::default()
                });

            col = col.push(mouse_area(framed).on_press(Message::DragStarted(card.key)));
        }

        // Leaving the surface mid-drag also drops the card, so a release
        // outside the list can never leave a drag latched.
        let surface = mouse_area(col.padding([0, 12]))
            .on_move(Message::DragMoved)
            .on_release(Message::DragEnded)
            .on_exit(Message::DragEnded);

        container(surface).height(Length::Fill).into()
    }

    /// Headline value shown on a dashboard card.
    fn card_headline(&self, metric: Metric) -> String {
        let d = &self.day;
        match metric {
            Metric::Sleep => format!("{:.0}", d.sleep_score),
            Metric::Exercise => format!("{:.0} kcal", d.exercise_kcal),
            Metric::HeartRate => format!("{:.0} bpm", d.heart_rate.average()),
            Metric::SpO2 => format!("{:.0}%", d.spo2.average()),
            Metric::Stress => format!("{:.0}", d.stress.average()),
            Metric::Glucose => format!("{:.0} mg/dL", d.glucose.average()),
            Metric::Hrv => format!("{:.0} ms", d.hrv.average()),
            Metric::Temperature => format!("{:.1}°C", d.temperature.average()),
            Metric::Vo2Max => format!("{:.0}", d.vo2max),
        }
    }

    fn spark_data(&self, metric: Metric) -> Vec<f32> {
        match self.day.series(metric) {
            Some(series) => {
                // Thin the 288-slot day down for a 90px mini.
                series.values().step_by(6).collect()
            }
            None => self.trends.weekly(metric).values().collect(),
        }
    }

    // ─── DETAIL ────────────────────────────────────────────────

    fn view_detail(&self, metric: Metric) -> Element<'_, Message> {
        let p = &self.pal;

        let back = button(text("← Back").size(12).color(p.label))
            .on_press(Message::Back)
            .style(button::text)
            .padding([2, 4]);

        let mut periods = Row::new().spacing(4);
        for &period in Period::ALL {
            periods = periods.push(pill(
                period.name(),
                period == self.period,
                p,
                Message::PeriodSelected(period),
            ));
        }

        let top = row![back, Space::with_width(Length::Fill), periods]
            .align_y(Alignment::Center)
            .padding([0, 12]);

        let mut col = Column::new().spacing(10).padding([0, 12]);

        if metric == Metric::Sleep && self.period == Period::Day {
            col = col.push(self.view_sleep_day());
        } else if let Some(series) = self.active_series(metric) {
            col = col.push(self.view_readout(metric, series));
            col = col.push(self.view_chart(metric, series));
        }

        col = self.push_extras(col, metric);

        column![top, Space::with_height(10), scrollable(col).height(Length::Fill)]
            .spacing(0)
            .into()
    }

    /// Readout above the chart: the held sample while scrubbing,
    /// otherwise the period summary.
    fn view_readout<'a>(&'a self, metric: Metric, series: &'a TimeSeries) -> Element<'a, Message> {
        let p = &self.pal;
        let color = p.metric(metric);

        let held = self.scrub_idx.and_then(|i| series.get(i));
        let (big, small) = match held {
            Some(sample) => (
                format!("{:.0}{}", sample.value, metric.unit()),
                sample.label.clone(),
            ),
            None => (
                format!("{:.0}{}", series.average(), metric.unit()),
                format!(
                    "avg · {:.0}–{:.0}",
                    series.min_value(),
                    series.max_value()
                ),
            ),
        };

        panel(
            row![
                column![
                    text(big).size(24).color(color),
                    text(small).size(11).color(p.label),
                ]
                .spacing(2),
                Space::with_width(Length::Fill),
            ]
            .align_y(Alignment::Center)
            .into(),
            p,
        )
    }

    fn view_chart<'a>(&'a self, metric: Metric, series: &'a TimeSeries) -> Element<'a, Message> {
        let lo = series.min_value();
        let hi = series.max_value();
        let pad = ((hi - lo) * 0.1).max(1.0);

        let band = if metric == Metric::Glucose {
            Some((self.prefs.glucose_low, self.prefs.glucose_high))
        } else {
            None
        };

        Canvas::new(TimelineChart {
            series,
            color: self.pal.metric(metric),
            y_min: lo - pad,
            y_max: hi + pad,
            unit: metric.unit(),
            filled: true,
            band,
            colors: self.chart_colors(),
            on_scrub: Message::Scrubbed,
        })
        .width(Length::Fill)
        .height(220)
        .into()
    }

    /// Sleep day view: score ring, scrubbable hypnogram, stage totals.
    fn view_sleep_day(&self) -> Element<'_, Message> {
        let p = &self.pal;

        let ring: Element<Message> = Canvas::new(ScoreRing {
            value: self.day.sleep_score,
            label: "SLEEP SCORE".into(),
            color: p.sleep,
            colors: self.gauge_colors(),
        })
        .width(150)
        .height(130)
        .into();

        let readout: Element<Message> = match self
            .sleep_scrub_idx
            .and_then(|i| self.day.sleep.get(i))
        {
            Some(seg) => column![
                text(seg.stage.label()).size(20).color(p.metric(Metric::Sleep)),
                text(seg.label.clone()).size(11).color(p.label),
            ]
            .spacing(2)
            .into(),
            None => {
                let totals = sleep_totals(&self.day.sleep);
                let asleep = totals.rem_slots + totals.light_slots + totals.deep_slots;
                column![
                    text(format_slots(asleep)).size(20).color(p.text),
                    text("time asleep").size(11).color(p.label),
                ]
                .spacing(2)
                .into()
            }
        };

        let head = row![readout, Space::with_width(Length::Fill), ring]
            .align_y(Alignment::Center);

        let hypnogram: Element<Message> = Canvas::new(Hypnogram {
            segments: &self.day.sleep,
            stages: StageColors {
                awake: p.stage_awake,
                rem: p.stage_rem,
                light: p.stage_light,
                deep: p.stage_deep,
            },
            colors: self.chart_colors(),
            on_scrub: Message::SleepScrubbed,
        })
        .width(Length::Fill)
        .height(140)
        .into();

        let totals = sleep_totals(&self.day.sleep);
        let stages = column![
            stage_row("Awake", totals.awake_slots, p.stage_awake, p),
            stage_row("REM", totals.rem_slots, p.stage_rem, p),
            stage_row("Light", totals.light_slots, p.stage_light, p),
            stage_row("Deep", totals.deep_slots, p.stage_deep, p),
        ]
        .spacing(4);

        column![panel(head.into(), p), hypnogram, panel(stages.into(), p)]
            .spacing(10)
            .into()
    }

    /// Metric-specific summary widgets below the chart.
    fn push_extras<'a>(&'a self, mut col: Column<'a, Message>, metric: Metric) -> Column<'a, Message> {
        let p = &self.pal;
        match metric {
            Metric::HeartRate => {
                if self.period == Period::Day {
                    let zones = hr_zones(&self.day.heart_rate);
                    let rows = column![
                        info_row("Intense (120+ bpm)", format_slots(zones.intense_slots), p),
                        info_row("Active (90–120 bpm)", format_slots(zones.active_slots), p),
                        info_row("Resting", format_slots(zones.resting_slots), p),
                    ]
                    .spacing(4);
                    col = col.push(panel(rows.into(), p));
                }
            }
            Metric::Glucose => {
                if self.period == Period::Day {
                    let tir = time_in_range(
                        &self.day.glucose,
                        self.prefs.glucose_low,
                        self.prefs.glucose_high,
                    );
                    let bar: Element<Message> = Canvas::new(TirBar {
                        tir,
                        low_color: p.warn,
                        in_range_color: p.good,
                        high_color: p.alert,
                        track: p.border,
                    })
                    .width(Length::Fill)
                    .height(14)
                    .into();
                    let rows = column![
                        text("Time in range").size(12).color(p.text),
                        bar,
                        info_row("Below band", format!("{:.0}%", tir.low * 100.0), p),
                        info_row("In range", format!("{:.0}%", tir.in_range * 100.0), p),
                        info_row("Above band", format!("{:.0}%", tir.high * 100.0), p),
                    ]
                    .spacing(6);
                    col = col.push(panel(rows.into(), p));
                }
            }
            Metric::Exercise => {
                if self.period == Period::Day {
                    let ring: Element<Message> = Canvas::new(ScoreRing {
                        value: self.day.exercise_score,
                        label: "ACTIVITY".into(),
                        color: p.exercise,
                        colors: self.gauge_colors(),
                    })
                    .width(150)
                    .height(130)
                    .into();
                    let body = row![
                        column![
                            text(format!("{:.0} kcal", self.day.exercise_kcal))
                                .size(20)
                                .color(p.exercise),
                            text("active burn").size(11).color(p.label),
                        ]
                        .spacing(2),
                        Space::with_width(Length::Fill),
                        ring,
                    ]
                    .align_y(Alignment::Center);
                    col = col.push(panel(body.into(), p));
                }
            }
            Metric::Vo2Max => {
                if self.period == Period::Day {
                    let rows = column![
                        info_row("Current estimate", format!("{:.0} mL/kg/min", self.day.vo2max), p),
                        info_row("Fitness level", "Good", p),
                    ]
                    .spacing(4);
                    col = col.push(panel(rows.into(), p));
                }
            }
            _ => {}
        }
        col
    }

    fn gauge_colors(&self) -> GaugeColors {
        let p = &self.pal;
        GaugeColors {
            bg: p.card_bg,
            label: p.label,
            text: p.text,
            track: p.border,
        }
    }

    // ─── SETTINGS ──────────────────────────────────────────────

    fn view_settings(&self) -> Element<'_, Message> {
        let p = &self.pal;

        let mut themes = Row::new().spacing(4);
        for &variant in ThemeVariant::ALL {
            themes = themes.push(pill(
                variant.name(),
                variant == self.prefs.theme,
                p,
                Message::SetTheme(variant),
            ));
        }

        let mut accents = Row::new().spacing(6);
        for &accent in AccentColor::ALL {
            let c = accent.color();
            let selected = accent == self.prefs.accent;
            let border_c = if selected { p.text } else { p.border };
            accents = accents.push(
                button(Space::new(18, 18))
                    .on_press(Message::SetAccent(accent))
                    .padding(2)
                    .style(move |_: &Theme, _| button::Style {
                        background: Some(Background::Color(c)),
                        border: Border {
                            color: border_c,
                            width: if selected { 2.0 } else { 1.0 },
                            radius: 10.0.into(),
                        },
                        ..Default::default()
                    }),
            );
        }

        let band = column![
            band_row(
                "Low threshold",
                self.prefs.glucose_low,
                Message::AdjustGlucoseLow(-GLUCOSE_STEP),
                Message::AdjustGlucoseLow(GLUCOSE_STEP),
                p,
            ),
            band_row(
                "High threshold",
                self.prefs.glucose_high,
                Message::AdjustGlucoseHigh(-GLUCOSE_STEP),
                Message::AdjustGlucoseHigh(GLUCOSE_STEP),
                p,
            ),
        ]
        .spacing(6);

        let about = column![
            info_row("Version", env!("CARGO_PKG_VERSION"), p),
            info_row("Data source", "Synthetic (demo)", p),
        ]
        .spacing(4);

        let col = column![
            section_title("Theme", p),
            panel(themes.into(), p),
            section_title("Accent", p),
            panel(accents.into(), p),
            section_title("Glucose target band (mg/dL)", p),
            panel(band.into(), p),
            section_title("About", p),
            panel(about.into(), p),
        ]
        .spacing(8)
        .padding([0, 12]);

        scrollable(col).height(Length::Fill).into()
    }
}

impl Default for Vital {
    fn default() -> Self {
        Self::new()
    }
}

// ─── WIDGET HELPERS ────────────────────────────────────────────

fn pill(
    label: impl ToString,
    active: bool,
    p: &Palette,
    msg: Message,
) -> Element<'static, Message> {
    let accent = p.accent;
    let label_c = p.label;
    let color = if active { accent } else { label_c };
    button(text(label.to_string()).size(12).color(color))
        .on_press(msg)
        .padding([4, 12])
        .style(move |_: &Theme, status| {
            let bg = match status {
                button::Status::Hovered => Color::from_rgba(accent.r, accent.g, accent.b, 0.15),
                button::Status::Pressed => Color::from_rgba(accent.r, accent.g, accent.b, 0.25),
                _ => {
                    if active {
                        Color::from_rgba(accent.r, accent.g, accent.b, 0.1)
                    } else {
                        Color::TRANSPARENT
                    }
                }
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: color,
                border: Border {
                    color: if active { accent } else { Color::TRANSPARENT },
                    width: if active { 1.0 } else { 0.0 },
                    radius: 12.0.into(),
                },
                ..Default::default()
            }
        })
        .into()
}

fn panel<'a>(content: Element<'a, Message>, p: &Palette) -> Element<'a, Message> {
    let card_bg = p.card_bg;
    let border_c = p.border;
    container(content)
        .width(Length::Fill)
        .padding(12)
        .style(move |_: &Theme| container::Style {
            background: Some(Background::Color(card_bg)),
            border: Border {
                color: border_c,
                width: 1.0,
                radius: 10.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.15),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 6.0,
            },
            ..Default::default()
        })
        .into()
}

fn section_title(label: impl ToString, p: &Palette) -> Element<'static, Message> {
    text(label.to_string()).size(12).color(p.accent).into()
}

fn info_row<'a>(
    label: impl ToString,
    value: impl ToString,
    p: &Palette,
) -> Element<'a, Message> {
    row![
        text(label.to_string()).size(12).color(p.label),
        Space::with_width(Length::Fill),
        text(value.to_string()).size(12).color(p.text),
    ]
    .align_y(Alignment::Center)
    .into()
}

fn stage_row<'a>(
    label: &'a str,
    slots: usize,
    color: Color,
    p: &Palette,
) -> Element<'a, Message> {
    row![
        container(Space::new(10, 10)).style(move |_: &Theme| container::Style {
            background: Some(Background::Color(color)),
            border: Border {
                radius: 5.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }),
        Space::with_width(8),
        text(label).size(12).color(p.text),
        Space::with_width(Length::Fill),
        text(format_slots(slots)).size(12).color(p.label),
    ]
    .align_y(Alignment::Center)
    .into()
}

fn band_row(
    label: &'static str,
    value: f32,
    dec: Message,
    inc: Message,
    p: &Palette,
) -> Element<'static, Message> {
    row![
        text(label).size(12).color(p.label),
        Space::with_width(Length::Fill),
        pill("−", false, p, dec),
        text(format!("{value:.0}")).size(13).color(p.text),
        pill("+", false, p, inc),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test instances never read or write the real config file.
    fn app() -> Vital {
        Vital::with_preferences(Preferences::default())
    }

    #[test]
    fn test_open_detail_blocked_in_edit_mode() {
        let mut app = app();
        app.update(Message::ToggleEditMode);
        app.update(Message::OpenDetail(Metric::HeartRate));
        assert_eq!(app.screen, Screen::Dashboard);
        app.update(Message::ToggleEditMode);
        app.update(Message::OpenDetail(Metric::HeartRate));
        assert_eq!(app.screen, Screen::Detail(Metric::HeartRate));
    }

    #[test]
    fn test_period_resets_scrub() {
        let mut app = app();
        app.update(Message::OpenDetail(Metric::Glucose));
        app.update(Message::Scrubbed(Some(42)));
        assert_eq!(app.scrub_idx, Some(42));
        app.update(Message::PeriodSelected(Period::Week));
        assert_eq!(app.scrub_idx, None);
    }

    #[test]
    fn test_drag_reorders_cards() {
        let mut app = app();
        let first = app.board.cards()[0].key;
        app.update(Message::ToggleEditMode);
        app.update(Message::DragStarted(first));
        app.update(Message::DragMoved(Point::new(20.0, EDIT_ROW_PITCH * 2.5)));
        app.update(Message::DragEnded);
        assert_eq!(app.board.cards()[2].key, first);
    }

    #[test]
    fn test_moves_after_drop_do_not_reorder() {
        let mut app = app();
        let first = app.board.cards()[0].key;
        app.update(Message::ToggleEditMode);
        app.update(Message::DragStarted(first));
        app.update(Message::DragMoved(Point::new(20.0, EDIT_ROW_PITCH * 2.5)));
        app.update(Message::DragEnded);
        let committed: Vec<_> = app.board.cards().iter().map(|c| c.key).collect();
        // Stray pointer moves after the drop must leave the order alone.
        app.update(Message::DragMoved(Point::new(20.0, 0.0)));
        let after: Vec<_> = app.board.cards().iter().map(|c| c.key).collect();
        assert_eq!(after, committed);
    }

    #[test]
    fn test_glucose_band_stays_ordered() {
        let mut app = app();
        for _ in 0..50 {
            app.update(Message::AdjustGlucoseLow(GLUCOSE_STEP));
        }
        assert!(app.prefs.glucose_low < app.prefs.glucose_high);
        assert!(app.prefs.glucose_high - app.prefs.glucose_low >= 10.0 - 0.01);
    }

    #[test]
    fn test_date_selection_regenerates_day() {
        let mut app = app();
        app.update(Message::SelectDate(0));
        assert_eq!(app.selected_date, 0);
        assert_eq!(app.day.date, app.dates[0]);
    }
}
