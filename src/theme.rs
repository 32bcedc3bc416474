use iced::Color;
use serde::{Deserialize, Serialize};

use crate::samples::Metric;

// ─── ACCENT COLORS ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccentColor {
    Rose,
    Sky,
    Mint,
    Amber,
    Violet,
}

impl AccentColor {
    pub const ALL: &[AccentColor] = &[
        AccentColor::Rose,
        AccentColor::Sky,
        AccentColor::Mint,
        AccentColor::Amber,
        AccentColor::Violet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AccentColor::Rose => "Rose",
            AccentColor::Sky => "Sky",
            AccentColor::Mint => "Mint",
            AccentColor::Amber => "Amber",
            AccentColor::Violet => "Violet",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AccentColor::Rose => hex(0xff, 0x70, 0x8d),
            AccentColor::Sky => hex(0xa5, 0xc9, 0xff),
            AccentColor::Mint => hex(0x50, 0xd6, 0xa3),
            AccentColor::Amber => hex(0xff, 0xb8, 0x6b),
            AccentColor::Violet => hex(0xb0, 0x8c, 0xe6),
        }
    }
}

// ─── THEME VARIANTS ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeVariant {
    /// Deep blue-black night palette.
    Midnight,
    /// Pure-black OLED variant.
    Ink,
    /// Soft warm light palette.
    Dawn,
    /// Neutral grey light palette.
    Paper,
}

impl ThemeVariant {
    pub const ALL: &[ThemeVariant] = &[
        ThemeVariant::Midnight,
        ThemeVariant::Ink,
        ThemeVariant::Dawn,
        ThemeVariant::Paper,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ThemeVariant::Midnight => "Midnight",
            ThemeVariant::Ink => "Ink",
            ThemeVariant::Dawn => "Dawn",
            ThemeVariant::Paper => "Paper",
        }
    }

    pub fn is_light(&self) -> bool {
        matches!(self, ThemeVariant::Dawn | ThemeVariant::Paper)
    }
}

// ─── PALETTE ────────────────────────────────────────────────────

/// All semantic colors the app uses, derived from theme + accent.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub card_bg: Color,
    pub border: Color,
    pub grid: Color,
    pub label: Color,
    pub text: Color,
    pub accent: Color,
    // Status colors.
    pub good: Color,
    pub warn: Color,
    pub alert: Color,
    // Per-metric chart colors.
    pub sleep: Color,
    pub exercise: Color,
    pub heart: Color,
    pub spo2: Color,
    pub stress: Color,
    pub glucose: Color,
    pub hrv: Color,
    pub temp: Color,
    pub vo2: Color,
    // Hypnogram stage colors.
    pub stage_awake: Color,
    pub stage_rem: Color,
    pub stage_light: Color,
    pub stage_deep: Color,
}

impl Palette {
    pub fn metric(&self, m: Metric) -> Color {
        match m {
            Metric::Sleep => self.sleep,
            Metric::Exercise => self.exercise,
            Metric::HeartRate => self.heart,
            Metric::SpO2 => self.spo2,
            Metric::Stress => self.stress,
            Metric::Glucose => self.glucose,
            Metric::Hrv => self.hrv,
            Metric::Temperature => self.temp,
            Metric::Vo2Max => self.vo2,
        }
    }
}

pub fn build_palette(theme: ThemeVariant, accent: AccentColor) -> Palette {
    let base = base_palette(theme);
    Palette {
        accent: accent.color(),
        ..base
    }
}

struct Chrome {
    bg: Color,
    card_bg: Color,
    border: Color,
    grid: Color,
    label: Color,
    text: Color,
    good: Color,
    warn: Color,
    alert: Color,
}

struct MetricColors {
    sleep: Color,
    exercise: Color,
    heart: Color,
    spo2: Color,
    stress: Color,
    glucose: Color,
    hrv: Color,
    temp: Color,
    vo2: Color,
}

fn base_palette(theme: ThemeVariant) -> Palette {
    // Metric hues stay recognizable across themes; light themes get a
    // darker cut of each so they hold contrast on pale cards.
    let metrics = if theme.is_light() {
        MetricColors {
            sleep: hex(0x7a, 0x4f, 0xc0),
            exercise: hex(0xc7, 0x77, 0x1d),
            heart: hex(0xd4, 0x3f, 0x62),
            spo2: hex(0x2e, 0x78, 0xb5),
            stress: hex(0xb5, 0x6d, 0x00),
            glucose: hex(0x1f, 0x9d, 0x6b),
            hrv: hex(0x2a, 0x9a, 0x8a),
            temp: hex(0xb8, 0x4a, 0x4d),
            vo2: hex(0x3b, 0x62, 0xc4),
        }
    } else {
        MetricColors {
            sleep: hex(0xb0, 0x8c, 0xe6),
            exercise: hex(0xff, 0xb8, 0x6b),
            heart: hex(0xff, 0x70, 0x8d),
            spo2: hex(0x5d, 0xad, 0xe2),
            stress: hex(0xf3, 0x9c, 0x12),
            glucose: hex(0x50, 0xd6, 0xa3),
            hrv: hex(0x94, 0xe2, 0xd5),
            temp: hex(0xe7, 0x82, 0x84),
            vo2: hex(0x89, 0xb4, 0xfa),
        }
    };

    let chrome = match theme {
        ThemeVariant::Midnight => Chrome {
            bg: hex(0x10, 0x14, 0x1c),
            card_bg: hex(0x16, 0x1b, 0x22),
            border: hex(0x2a, 0x31, 0x3d),
            grid: Color::from_rgba(1.0, 1.0, 1.0, 0.08),
            label: hex(0xbd, 0xbd, 0xbd),
            text: hex(0xea, 0xea, 0xea),
            good: hex(0x2e, 0xcc, 0x71),
            warn: hex(0xf3, 0x9c, 0x12),
            alert: hex(0xe7, 0x4c, 0x3c),
        },
        ThemeVariant::Ink => Chrome {
            bg: hex(0x0a, 0x0a, 0x0a),
            card_bg: hex(0x14, 0x14, 0x16),
            border: hex(0x26, 0x26, 0x2a),
            grid: Color::from_rgba(1.0, 1.0, 1.0, 0.07),
            label: hex(0xa8, 0xa8, 0xa8),
            text: hex(0xe8, 0xe8, 0xe8),
            good: hex(0x2e, 0xcc, 0x71),
            warn: hex(0xf3, 0x9c, 0x12),
            alert: hex(0xe7, 0x4c, 0x3c),
        },
        ThemeVariant::Dawn => Chrome {
            bg: hex(0xf6, 0xf2, 0xec),
            card_bg: hex(0xff, 0xff, 0xff),
            border: hex(0xd8, 0xd2, 0xc8),
            grid: Color::from_rgba(0.0, 0.0, 0.0, 0.07),
            label: hex(0x7a, 0x74, 0x6b),
            text: hex(0x36, 0x32, 0x2c),
            good: hex(0x1f, 0x9d, 0x6b),
            warn: hex(0xb5, 0x6d, 0x00),
            alert: hex(0xc0, 0x3e, 0x3e),
        },
        ThemeVariant::Paper => Chrome {
            bg: hex(0xf0, 0xf0, 0xf2),
            card_bg: hex(0xfa, 0xfa, 0xfb),
            border: hex(0xd0, 0xd0, 0xd6),
            grid: Color::from_rgba(0.0, 0.0, 0.0, 0.06),
            label: hex(0x6e, 0x72, 0x80),
            text: hex(0x2e, 0x32, 0x3a),
            good: hex(0x1f, 0x9d, 0x6b),
            warn: hex(0xb5, 0x6d, 0x00),
            alert: hex(0xc0, 0x3e, 0x3e),
        },
    };

    Palette {
        bg: chrome.bg,
        card_bg: chrome.card_bg,
        border: chrome.border,
        grid: chrome.grid,
        label: chrome.label,
        text: chrome.text,
        accent: metrics.spo2, // placeholder, overridden by build_palette
        good: chrome.good,
        warn: chrome.warn,
        alert: chrome.alert,
        sleep: metrics.sleep,
        exercise: metrics.exercise,
        heart: metrics.heart,
        spo2: metrics.spo2,
        stress: metrics.stress,
        glucose: metrics.glucose,
        hrv: metrics.hrv,
        temp: metrics.temp,
        vo2: metrics.vo2,
        // Stage colors reuse the metric family so the hypnogram matches
        // the rest of the sleep screen.
        stage_awake: metrics.exercise,
        stage_rem: metrics.spo2,
        stage_light: metrics.sleep,
        stage_deep: metrics.vo2,
    }
}

const fn hex(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}
