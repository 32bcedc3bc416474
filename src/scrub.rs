/// Mapping from a horizontal drag position over a chart surface to a
/// discrete sample index, plus the geometry helpers the chart overlays
/// need. All functions here are total: out-of-range positions clamp
/// rather than fail, and an empty series simply yields no index.

/// Snap a drag position `x` over a surface `chart_width` pixels wide to an
/// index into a series of `len` samples.
///
/// `index = clamp(floor(x / chart_width * len), 0, len - 1)`, so `x = 0`
/// maps to the first sample and `x = chart_width` to the last.
pub fn sample_index(x: f32, chart_width: f32, len: usize) -> Option<usize> {
    if len == 0 || chart_width <= 0.0 {
        return None;
    }
    let raw = (x / chart_width * len as f32).floor() as i64;
    Some(raw.clamp(0, len as i64 - 1) as usize)
}

/// Vertical position of the marker for `value` on a chart `chart_height`
/// pixels tall, given the series extrema. A flat series centers the marker.
pub fn marker_y(value: f32, min: f32, max: f32, chart_height: f32) -> f32 {
    let range = max - min;
    if range <= f32::EPSILON {
        return chart_height * 0.5;
    }
    (1.0 - (value - min) / range) * chart_height
}

/// Horizontal anchor for the scrub value label. The label sits just right
/// of the touch point until it would run off the chart edge, then flips to
/// the left side.
pub fn label_anchor_x(x: f32, chart_width: f32, label_width: f32) -> f32 {
    if x > chart_width - label_width {
        x - label_width
    } else {
        x + 5.0
    }
}

/// One scrub gesture: created fresh when a drag begins, updated on every
/// pointer move (last update wins), and cleared by the single end event.
/// Holds nothing across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrubSession {
    active: Option<usize>,
}

impl ScrubSession {
    /// Process one drag update. Returns the newly active index.
    pub fn update(&mut self, x: f32, chart_width: f32, len: usize) -> Option<usize> {
        self.active = sample_index(x, chart_width, len);
        self.active
    }

    /// Process the end event, clearing the highlight.
    pub fn finish(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_boundaries() {
        // x = 0 → first sample, x = width → last sample.
        assert_eq!(sample_index(0.0, 100.0, 288), Some(0));
        assert_eq!(sample_index(100.0, 100.0, 288), Some(287));
    }

    #[test]
    fn test_index_interior() {
        // 5 samples over 100px: x = 42 lands in the third bucket.
        assert_eq!(sample_index(42.0, 100.0, 5), Some(2));
    }

    #[test]
    fn test_out_of_range_clamps() {
        // Fast flicks can report positions outside the surface.
        assert_eq!(sample_index(-15.0, 100.0, 10), Some(0));
        assert_eq!(sample_index(250.0, 100.0, 10), Some(9));
    }

    #[test]
    fn test_empty_series_yields_nothing() {
        assert_eq!(sample_index(50.0, 100.0, 0), None);
        assert_eq!(sample_index(50.0, 0.0, 10), None);
    }

    #[test]
    fn test_session_idempotent_updates() {
        let mut s = ScrubSession::default();
        let a = s.update(42.0, 100.0, 5);
        let b = s.update(42.0, 100.0, 5);
        assert_eq!(a, Some(2));
        assert_eq!(a, b);
    }

    #[test]
    fn test_session_end_clears() {
        let mut s = ScrubSession::default();
        s.update(97.0, 100.0, 5);
        assert!(s.active().is_some());
        s.finish();
        assert_eq!(s.active(), None);
    }

    #[test]
    fn test_scenario_five_sample_series() {
        // Series [60, 65, 70, 75, 80] bpm, width 100, drag to x = 42.
        let series = [60.0f32, 65.0, 70.0, 75.0, 80.0];
        let idx = sample_index(42.0, 100.0, series.len()).unwrap();
        assert_eq!(idx, 2);
        assert_eq!(series[idx], 70.0);
    }

    #[test]
    fn test_marker_y_extremes() {
        // Max value sits at the top, min at the bottom.
        assert_eq!(marker_y(80.0, 60.0, 80.0, 150.0), 0.0);
        assert_eq!(marker_y(60.0, 60.0, 80.0, 150.0), 150.0);
        // Flat series centers.
        assert_eq!(marker_y(70.0, 70.0, 70.0, 150.0), 75.0);
    }

    #[test]
    fn test_label_flips_near_right_edge() {
        let w = 300.0;
        let lw = 50.0;
        // Left of the flip point the label trails the finger.
        assert_eq!(label_anchor_x(100.0, w, lw), 105.0);
        // Past it, the label leads so it stays on-screen.
        assert_eq!(label_anchor_x(280.0, w, lw), 230.0);
        assert!(label_anchor_x(280.0, w, lw) + lw <= w);
    }
}
