//! Presentation of an estimate as a transient notification.

use std::time::Duration;

use crate::estimator::EstimationResult;

/// Fixed display duration for the estimate notice.
pub const NOTICE_DURATION: Duration = Duration::from_millis(5000);

/// Host-side notification sink: accepts a rendered fragment and how long to
/// display it. The host auto-dismisses after the duration elapses.
pub trait NotificationSurface {
    fn notify(&self, body: &str, duration: Duration);
}

/// The four labeled rows of an estimate, in fixed order. No row is omitted
/// even when its value is zero.
pub fn render_rows(result: &EstimationResult) -> Vec<(String, String)> {
    vec![
        ("Total tokens".to_string(), result.tokens.to_string()),
        (
            "Completion tokens".to_string(),
            result.completion_tokens.to_string(),
        ),
        ("Max tokens".to_string(), result.max_tokens.to_string()),
        ("Estimated Price".to_string(), format_price(result.cost)),
    ]
}

/// Render the estimate and post it to the surface for five seconds.
pub fn show_tokens(surface: &dyn NotificationSurface, result: &EstimationResult) {
    let body = render_rows(result)
        .into_iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n");
    surface.notify(&body, NOTICE_DURATION);
}

/// Format a price with locale-style thousands grouping: `1234.5` renders as
/// `$1,234.5`.
pub fn format_price(cost: f64) -> String {
    let text = cost.to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, ch) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    match fraction {
        Some(f) => format!("${grouped}.{f}"),
        None => format!("${grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSurface {
        posted: Mutex<Vec<(String, Duration)>>,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self {
                posted: Mutex::new(Vec::new()),
            }
        }
    }

    impl NotificationSurface for RecordingSurface {
        fn notify(&self, body: &str, duration: Duration) {
            self.posted.lock().unwrap().push((body.to_string(), duration));
        }
    }

    #[test]
    fn four_rows_in_order() {
        let result = EstimationResult {
            tokens: 10,
            max_tokens: 4096,
            completion_tokens: 256,
            cost: 1234.5,
        };
        let rows = render_rows(&result);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], ("Total tokens".to_string(), "10".to_string()));
        assert_eq!(
            rows[1],
            ("Completion tokens".to_string(), "256".to_string())
        );
        assert_eq!(rows[2], ("Max tokens".to_string(), "4096".to_string()));
        assert_eq!(
            rows[3],
            ("Estimated Price".to_string(), "$1,234.5".to_string())
        );
    }

    #[test]
    fn zero_fields_are_not_omitted() {
        let result = EstimationResult {
            tokens: 0,
            max_tokens: 0,
            completion_tokens: 0,
            cost: 0.0,
        };
        let rows = render_rows(&result);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].1, "0");
        assert_eq!(rows[3].1, "$0");
    }

    #[test]
    fn notice_uses_fixed_duration() {
        let surface = RecordingSurface::new();
        let result = EstimationResult {
            tokens: 42,
            max_tokens: 4096,
            completion_tokens: 500,
            cost: 0.0007,
        };
        show_tokens(&surface, &result);
        let posted = surface.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].1, Duration::from_millis(5000));
        assert!(posted[0].0.contains("Total tokens: 42"));
        assert!(posted[0].0.contains("Estimated Price: $0.0007"));
    }

    #[test]
    fn price_grouping() {
        assert_eq!(format_price(1234.5), "$1,234.5");
        assert_eq!(format_price(1234567.0), "$1,234,567");
        assert_eq!(format_price(999.0), "$999");
        assert_eq!(format_price(0.0007), "$0.0007");
    }
}
