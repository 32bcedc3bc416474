use chrono::{Datelike, NaiveDate};
use rand::Rng;

/// Five-minute slots in one day's timeline.
pub const DAY_SLOTS: usize = 288;
/// Five-minute slots in one night of sleep (8 hours).
pub const SLEEP_SLOTS: usize = 96;

pub const WEEK_LABELS: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
pub const MONTH_LABELS: &[&str] = &["Week 1", "Week 2", "Week 3", "Week 4"];

/// Glucose band defaults (mg/dL) for Time in Range.
pub const GLUCOSE_LOW_DEFAULT: f32 = 70.0;
pub const GLUCOSE_HIGH_DEFAULT: f32 = 140.0;

// ─── METRICS ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Sleep,
    Exercise,
    HeartRate,
    SpO2,
    Stress,
    Glucose,
    Hrv,
    Temperature,
    Vo2Max,
}

impl Metric {
    pub const ALL: &[Metric] = &[
        Metric::Sleep,
        Metric::Exercise,
        Metric::HeartRate,
        Metric::SpO2,
        Metric::Stress,
        Metric::Glucose,
        Metric::Hrv,
        Metric::Temperature,
        Metric::Vo2Max,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Metric::Sleep => "Sleep",
            Metric::Exercise => "Exercise",
            Metric::HeartRate => "Heart Rate",
            Metric::SpO2 => "SpO2",
            Metric::Stress => "Stress",
            Metric::Glucose => "Glucose",
            Metric::Hrv => "HRV",
            Metric::Temperature => "Temperature",
            Metric::Vo2Max => "VO2Max",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Sleep => "score",
            Metric::Exercise => "kcal",
            Metric::HeartRate => "bpm",
            Metric::SpO2 => "%",
            Metric::Stress => "",
            Metric::Glucose => "mg/dL",
            Metric::Hrv => "ms",
            Metric::Temperature => "\u{00b0}C",
            Metric::Vo2Max => "ml/kg/min",
        }
    }
}

// ─── TIME SERIES ────────────────────────────────────────────────

/// Annotation on a single sample. Special points get a marker dot on the
/// timeline chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTag {
    None,
    Workout,
    Breakfast,
    Lunch,
}

impl EventTag {
    pub fn label(&self) -> &'static str {
        match self {
            EventTag::None => "",
            EventTag::Workout => "workout",
            EventTag::Breakfast => "breakfast",
            EventTag::Lunch => "lunch",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Display timestamp ("07:35") or trend bucket label ("Tue").
    pub label: String,
    pub value: f32,
    pub event: EventTag,
}

/// An ordered, fixed-length run of samples. Built once per screen/date
/// selection; read-only afterwards, so indices stay stable for the whole
/// rendering pass and the series can be shared by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Sample> {
        self.samples.get(idx)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().map(|s| s.value)
    }

    pub fn min_value(&self) -> f32 {
        self.values().fold(f32::INFINITY, f32::min)
    }

    pub fn max_value(&self) -> f32 {
        self.values().fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn average(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.values().sum::<f32>() / self.samples.len() as f32
    }
}

/// "HH:MM" label for the i-th five-minute slot of a day.
fn slot_label(i: usize) -> String {
    format!("{:02}:{:02}", (i * 5) / 60, (i * 5) % 60)
}

// ─── SLEEP MODEL ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepStage {
    Awake,
    Rem,
    Light,
    Deep,
}

impl SleepStage {
    pub fn label(&self) -> &'static str {
        match self {
            SleepStage::Awake => "AWAKE",
            SleepStage::Rem => "REM",
            SleepStage::Light => "LIGHT",
            SleepStage::Deep => "DEEP",
        }
    }

    /// Bar height fraction on the hypnogram (deeper stages draw taller).
    pub fn depth(&self) -> f32 {
        match self {
            SleepStage::Awake => 0.10,
            SleepStage::Rem => 0.40,
            SleepStage::Light => 0.70,
            SleepStage::Deep => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SleepSegment {
    pub label: String,
    pub stage: SleepStage,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SleepTotals {
    pub awake_slots: usize,
    pub rem_slots: usize,
    pub light_slots: usize,
    pub deep_slots: usize,
}

pub fn sleep_totals(segments: &[SleepSegment]) -> SleepTotals {
    let mut t = SleepTotals::default();
    for seg in segments {
        match seg.stage {
            SleepStage::Awake => t.awake_slots += 1,
            SleepStage::Rem => t.rem_slots += 1,
            SleepStage::Light => t.light_slots += 1,
            SleepStage::Deep => t.deep_slots += 1,
        }
    }
    t
}

// ─── DERIVED SUMMARIES ──────────────────────────────────────────

/// Fractions of a glucose series below, inside and above the target band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInRange {
    pub low: f32,
    pub in_range: f32,
    pub high: f32,
}

pub fn time_in_range(series: &TimeSeries, band_low: f32, band_high: f32) -> TimeInRange {
    let n = series.len();
    if series.is_empty() {
        return TimeInRange { low: 0.0, in_range: 0.0, high: 0.0 };
    }
    let mut low = 0usize;
    let mut high = 0usize;
    for v in series.values() {
        if v < band_low {
            low += 1;
        } else if v > band_high {
            high += 1;
        }
    }
    TimeInRange {
        low: low as f32 / n as f32,
        in_range: (n - low - high) as f32 / n as f32,
        high: high as f32 / n as f32,
    }
}

/// Five-minute slots spent per heart-rate intensity zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct HrZones {
    pub intense_slots: usize,
    pub active_slots: usize,
    pub resting_slots: usize,
}

const HR_INTENSE_BPM: f32 = 120.0;
const HR_ACTIVE_BPM: f32 = 90.0;

pub fn hr_zones(series: &TimeSeries) -> HrZones {
    let mut z = HrZones::default();
    for v in series.values() {
        if v >= HR_INTENSE_BPM {
            z.intense_slots += 1;
        } else if v >= HR_ACTIVE_BPM {
            z.active_slots += 1;
        } else {
            z.resting_slots += 1;
        }
    }
    z
}

/// "3h 15m" for a count of five-minute slots.
pub fn format_slots(slots: usize) -> String {
    let mins = slots * 5;
    if mins >= 60 {
        format!("{}h {:02}m", mins / 60, mins % 60)
    } else {
        format!("{}m", mins)
    }
}

// ─── MOCK GENERATORS ────────────────────────────────────────────

/// Everything the screens need for one selected day. Generated once per
/// date selection (the app has no sensor input; all values are synthetic).
#[derive(Debug, Clone)]
pub struct DayData {
    pub date: NaiveDate,
    pub heart_rate: TimeSeries,
    pub glucose: TimeSeries,
    pub spo2: TimeSeries,
    pub stress: TimeSeries,
    pub temperature: TimeSeries,
    pub hrv: TimeSeries,
    pub sleep: Vec<SleepSegment>,
    pub sleep_score: f32,
    pub exercise_score: f32,
    pub exercise_kcal: f32,
    pub vo2max: f32,
}

impl DayData {
    pub fn series(&self, metric: Metric) -> Option<&TimeSeries> {
        match metric {
            Metric::HeartRate => Some(&self.heart_rate),
            Metric::Glucose => Some(&self.glucose),
            Metric::SpO2 => Some(&self.spo2),
            Metric::Stress => Some(&self.stress),
            Metric::Temperature => Some(&self.temperature),
            Metric::Hrv => Some(&self.hrv),
            Metric::Sleep | Metric::Exercise | Metric::Vo2Max => None,
        }
    }
}

pub fn generate_day(date: NaiveDate) -> DayData {
    let mut rng = rand::thread_rng();

    // HR: 60-75 baseline with an afternoon workout window, as a wearable
    // trace would look. The workout midpoint carries the event marker.
    let heart_rate = TimeSeries::new(
        (0..DAY_SLOTS)
            .map(|i| {
                let workout = i > 180 && i < 204;
                let spike = if workout { rng.gen_range(0.0..50.0) } else { 0.0 };
                Sample {
                    label: slot_label(i),
                    value: 60.0 + rng.gen_range(0.0..15.0) + spike,
                    event: if i == 190 { EventTag::Workout } else { EventTag::None },
                }
            })
            .collect(),
    );

    let glucose = TimeSeries::new(
        (0..DAY_SLOTS)
            .map(|i| Sample {
                label: slot_label(i),
                value: 90.0 + rng.gen_range(0.0..15.0),
                event: match i {
                    96 => EventTag::Breakfast,
                    156 => EventTag::Lunch,
                    _ => EventTag::None,
                },
            })
            .collect(),
    );

    let spo2 = TimeSeries::new(
        (0..DAY_SLOTS)
            .map(|i| Sample {
                label: slot_label(i),
                value: 95.0 + rng.gen_range(0.0..4.0),
                event: EventTag::None,
            })
            .collect(),
    );

    let stress = TimeSeries::new(
        (0..DAY_SLOTS)
            .map(|i| {
                // Daytime slots trend more stressed than night ones.
                let daytime = (84..264).contains(&i);
                let base = if daytime { 25.0 } else { 12.0 };
                Sample {
                    label: slot_label(i),
                    value: base + rng.gen_range(0.0..30.0),
                    event: EventTag::None,
                }
            })
            .collect(),
    );

    let temperature = TimeSeries::new(
        (0..DAY_SLOTS)
            .map(|i| Sample {
                label: slot_label(i),
                value: 36.3 + rng.gen_range(0.0..0.6),
                event: EventTag::None,
            })
            .collect(),
    );

    let hrv = TimeSeries::new(
        (0..DAY_SLOTS)
            .map(|i| Sample {
                label: slot_label(i),
                value: 40.0 + rng.gen_range(0.0..30.0),
                event: EventTag::None,
            })
            .collect(),
    );

    let sleep = generate_sleep(&mut rng);

    DayData {
        date,
        heart_rate,
        glucose,
        spo2,
        stress,
        temperature,
        hrv,
        sleep,
        sleep_score: rng.gen_range(75.0..95.0_f32).round(),
        exercise_score: rng.gen_range(60.0..95.0_f32).round(),
        exercise_kcal: rng.gen_range(300.0..600.0_f32).round(),
        vo2max: rng.gen_range(42.0..48.0_f32).round(),
    }
}

/// One night as a stage walk. Stages change in runs of a few slots rather
/// than per-slot noise so the hypnogram shows plausible blocks.
fn generate_sleep(rng: &mut impl Rng) -> Vec<SleepSegment> {
    const STAGES: [SleepStage; 4] = [
        SleepStage::Awake,
        SleepStage::Rem,
        SleepStage::Light,
        SleepStage::Deep,
    ];
    let mut segments = Vec::with_capacity(SLEEP_SLOTS);
    let mut stage = SleepStage::Light;
    let mut run = 0usize;
    for i in 0..SLEEP_SLOTS {
        if run == 0 {
            stage = STAGES[rng.gen_range(0..STAGES.len())];
            run = rng.gen_range(2..8);
        }
        run -= 1;
        // Night starts at 23:00.
        let mins = (23 * 60 + i * 5) % (24 * 60);
        segments.push(SleepSegment {
            label: format!("{:02}:{:02}", mins / 60, mins % 60),
            stage,
        });
    }
    segments
}

/// Week and month trend buckets for every metric, generated once at
/// startup. Trend values are the metric's plausible daily aggregate.
#[derive(Debug, Clone)]
pub struct TrendSet {
    /// Indexed in `Metric::ALL` order.
    weekly: Vec<TimeSeries>,
    monthly: Vec<TimeSeries>,
}

impl TrendSet {
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let weekly = Metric::ALL
            .iter()
            .map(|&m| trend_series(m, WEEK_LABELS, &mut rng))
            .collect();
        let monthly = Metric::ALL
            .iter()
            .map(|&m| trend_series(m, MONTH_LABELS, &mut rng))
            .collect();
        Self { weekly, monthly }
    }

    fn index(metric: Metric) -> usize {
        Metric::ALL.iter().position(|&m| m == metric).unwrap_or(0)
    }

    pub fn weekly(&self, metric: Metric) -> &TimeSeries {
        &self.weekly[Self::index(metric)]
    }

    pub fn monthly(&self, metric: Metric) -> &TimeSeries {
        &self.monthly[Self::index(metric)]
    }
}

fn trend_series(metric: Metric, labels: &[&str], rng: &mut impl Rng) -> TimeSeries {
    let (base, spread) = match metric {
        Metric::Sleep => (82.0, 12.0),
        Metric::Exercise => (400.0, 180.0),
        Metric::HeartRate => (55.0, 5.0), // resting HR trend
        Metric::SpO2 => (96.0, 3.0),
        Metric::Stress => (25.0, 20.0),
        Metric::Glucose => (95.0, 12.0),
        Metric::Hrv => (50.0, 15.0),
        Metric::Temperature => (36.4, 0.4),
        Metric::Vo2Max => (44.0, 3.0),
    };
    TimeSeries::new(
        labels
            .iter()
            .map(|&l| Sample {
                label: l.to_string(),
                value: base + rng.gen_range(0.0..spread),
                event: EventTag::None,
            })
            .collect(),
    )
}

/// The seven days shown in the dashboard date strip, oldest first,
/// ending today.
pub fn date_strip(today: NaiveDate) -> Vec<NaiveDate> {
    (0..7)
        .rev()
        .map(|back| today - chrono::Duration::days(back))
        .collect()
}

/// "Tue 07/25" label for the date strip.
pub fn date_label(date: NaiveDate) -> String {
    format!("{} {:02}/{:02}", WEEK_LABELS[date.weekday().num_days_from_monday() as usize], date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> DayData {
        generate_day(NaiveDate::from_ymd_opt(2025, 8, 5).unwrap())
    }

    #[test]
    fn test_day_series_lengths_fixed() {
        let d = day();
        assert_eq!(d.heart_rate.len(), DAY_SLOTS);
        assert_eq!(d.glucose.len(), DAY_SLOTS);
        assert_eq!(d.sleep.len(), SLEEP_SLOTS);
    }

    #[test]
    fn test_hr_values_plausible() {
        let d = day();
        for v in d.heart_rate.values() {
            assert!((60.0..=130.0).contains(&v), "hr out of range: {v}");
        }
        assert!(d.heart_rate.min_value() <= d.heart_rate.average());
        assert!(d.heart_rate.average() <= d.heart_rate.max_value());
    }

    #[test]
    fn test_event_markers_present() {
        let d = day();
        assert_eq!(d.heart_rate.get(190).unwrap().event, EventTag::Workout);
        assert_eq!(d.glucose.get(96).unwrap().event, EventTag::Breakfast);
        assert_eq!(d.glucose.get(156).unwrap().event, EventTag::Lunch);
        // Chart captions come straight from the tag labels.
        assert_eq!(EventTag::Workout.label(), "workout");
        assert_eq!(EventTag::None.label(), "");
    }

    #[test]
    fn test_slot_labels() {
        assert_eq!(slot_label(0), "00:00");
        assert_eq!(slot_label(39), "03:15");
        assert_eq!(slot_label(287), "23:55");
    }

    #[test]
    fn test_time_in_range_fractions_sum_to_one() {
        let d = day();
        let tir = time_in_range(&d.glucose, GLUCOSE_LOW_DEFAULT, GLUCOSE_HIGH_DEFAULT);
        let sum = tir.low + tir.in_range + tir.high;
        assert!((sum - 1.0).abs() < 1e-5);
        // Mock glucose stays in 90..105, entirely inside the default band.
        assert!((tir.in_range - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_time_in_range_empty_series() {
        let empty = TimeSeries::new(Vec::new());
        let tir = time_in_range(&empty, GLUCOSE_LOW_DEFAULT, GLUCOSE_HIGH_DEFAULT);
        assert_eq!(tir.in_range, 0.0);
    }

    #[test]
    fn test_hr_zones_cover_series() {
        let d = day();
        let z = hr_zones(&d.heart_rate);
        assert_eq!(z.intense_slots + z.active_slots + z.resting_slots, DAY_SLOTS);
    }

    #[test]
    fn test_sleep_totals_cover_night() {
        let d = day();
        let t = sleep_totals(&d.sleep);
        assert_eq!(
            t.awake_slots + t.rem_slots + t.light_slots + t.deep_slots,
            SLEEP_SLOTS
        );
    }

    #[test]
    fn test_night_displays_as_eight_hours() {
        // 96 five-minute slots from 23:00 must render as exactly 8h,
        // summed across the stage totals.
        let d = day();
        assert_eq!(d.sleep.first().unwrap().label, "23:00");
        assert_eq!(d.sleep.last().unwrap().label, "06:55");
        let t = sleep_totals(&d.sleep);
        let all = t.awake_slots + t.rem_slots + t.light_slots + t.deep_slots;
        assert_eq!(format_slots(all), "8h 00m");
    }

    #[test]
    fn test_format_slots() {
        assert_eq!(format_slots(0), "0m");
        assert_eq!(format_slots(9), "45m");
        assert_eq!(format_slots(39), "3h 15m");
        assert_eq!(format_slots(240), "20h 00m");
    }

    #[test]
    fn test_date_strip_ends_today() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
        let strip = date_strip(today);
        assert_eq!(strip.len(), 7);
        assert_eq!(*strip.last().unwrap(), today);
        assert_eq!(strip[0], NaiveDate::from_ymd_opt(2025, 7, 30).unwrap());
    }

    #[test]
    fn test_date_label() {
        // 2025-07-25 is a Friday.
        let d = NaiveDate::from_ymd_opt(2025, 7, 25).unwrap();
        assert_eq!(date_label(d), "Fri 07/25");
    }

    #[test]
    fn test_trend_set_has_all_metrics() {
        let trends = TrendSet::generate();
        for &m in Metric::ALL {
            assert_eq!(trends.weekly(m).len(), WEEK_LABELS.len());
            assert_eq!(trends.monthly(m).len(), MONTH_LABELS.len());
        }
    }
}
