use crate::samples::Metric;

/// Icon glyph for a card, a closed set rather than a free-form field so a
/// card can only ever name an icon that exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Moon,
    Bolt,
    Heart,
    Droplet,
    Brain,
    Diamond,
    Wave,
    Thermometer,
    Lungs,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Moon => "\u{263e}",        // ☾
            Icon::Bolt => "\u{26a1}",        // ⚡
            Icon::Heart => "\u{2665}",       // ♥
            Icon::Droplet => "\u{25cf}",     // ●
            Icon::Brain => "\u{2248}",       // ≈
            Icon::Diamond => "\u{25c6}",     // ◆
            Icon::Wave => "\u{223f}",        // ∿
            Icon::Thermometer => "\u{00b0}", // °
            Icon::Lungs => "\u{25ca}",       // ◊
        }
    }
}

/// One dashboard tile. `key` is unique within a board and stable across
/// reorders; the rest is static display data (live values are read from
/// the day's generated series at render time).
#[derive(Debug, Clone)]
pub struct CardDescriptor {
    pub key: Metric,
    pub icon: Icon,
    pub title: &'static str,
    pub unit: &'static str,
}

impl CardDescriptor {
    fn new(key: Metric, icon: Icon) -> Self {
        Self {
            key,
            icon,
            title: key.title(),
            unit: key.unit(),
        }
    }
}

/// The fixed literal card set, in its factory order.
pub fn default_cards() -> Vec<CardDescriptor> {
    vec![
        CardDescriptor::new(Metric::Sleep, Icon::Moon),
        CardDescriptor::new(Metric::Exercise, Icon::Bolt),
        CardDescriptor::new(Metric::HeartRate, Icon::Heart),
        CardDescriptor::new(Metric::SpO2, Icon::Droplet),
        CardDescriptor::new(Metric::Stress, Icon::Brain),
        CardDescriptor::new(Metric::Glucose, Icon::Diamond),
        CardDescriptor::new(Metric::Hrv, Icon::Wave),
        CardDescriptor::new(Metric::Temperature, Icon::Thermometer),
        CardDescriptor::new(Metric::Vo2Max, Icon::Lungs),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cards_have_unique_keys() {
        let cards = default_cards();
        for (i, a) in cards.iter().enumerate() {
            for b in &cards[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn test_every_metric_has_a_card() {
        let cards = default_cards();
        for &m in Metric::ALL {
            assert!(cards.iter().any(|c| c.key == m), "missing card for {m:?}");
        }
    }
}
