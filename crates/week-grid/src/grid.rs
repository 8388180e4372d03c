//! Proportional column widths shared by every day of a location.
//!
//! Days need different numbers of lanes, but all days must render at the
//! same width. With `L = lcm(lane counts)`, each lane of a day with `s`
//! lanes gets `L / s` fractional units, so every day sums to `L`.

use std::fmt;

use serde::{Serialize, Serializer};

/// Greatest common divisor, with `gcd(0, x) = x`.
pub fn gcd(a: usize, b: usize) -> usize {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple of all values; `0` for an empty slice.
///
/// ```
/// use week_grid::grid::lcm;
///
/// assert_eq!(lcm(&[1, 2, 3]), 6);
/// assert_eq!(lcm(&[2, 3, 4]), 12);
/// assert_eq!(lcm(&[]), 0);
/// ```
pub fn lcm(values: &[usize]) -> usize {
    let Some((&first, rest)) = values.split_first() else {
        return 0;
    };
    rest.iter().fold(first, |acc, &v| match gcd(v, acc) {
        0 => 0,
        g => acc / g * v,
    })
}

/// One column track of a grid template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridTrack {
    /// Fixed-size track, such as the time-label column (`"50px"`).
    Fixed(String),
    /// Proportional track of `n` fractional units (`"nfr"`).
    Fraction(usize),
}

impl fmt::Display for GridTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridTrack::Fixed(size) => f.write_str(size),
            GridTrack::Fraction(n) => write!(f, "{n}fr"),
        }
    }
}

impl Serialize for GridTrack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Column tracks for a whole location: a label column, then every lane of
/// every day in weekday order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GridTemplate {
    tracks: Vec<GridTrack>,
}

impl GridTemplate {
    /// Build the template for the given per-day lane counts.
    ///
    /// ```
    /// use week_grid::grid::GridTemplate;
    ///
    /// let template = GridTemplate::new("50px", &[1, 2, 3, 1, 1, 1, 1]);
    /// assert_eq!(
    ///     template.to_string(),
    ///     "50px 6fr 3fr 3fr 2fr 2fr 2fr 6fr 6fr 6fr 6fr"
    /// );
    /// ```
    pub fn new(label_column: &str, spans: &[usize]) -> Self {
        let total = lcm(spans);
        let mut tracks = Vec::with_capacity(1 + spans.iter().sum::<usize>());
        tracks.push(GridTrack::Fixed(label_column.to_string()));
        for &span in spans.iter().filter(|&&span| span > 0) {
            tracks.extend(std::iter::repeat_n(GridTrack::Fraction(total / span), span));
        }
        GridTemplate { tracks }
    }

    pub fn tracks(&self) -> &[GridTrack] {
        &self.tracks
    }

    /// The lane tracks, without the label column.
    pub fn lane_tracks(&self) -> &[GridTrack] {
        self.tracks.get(1..).unwrap_or_default()
    }
}

impl fmt::Display for GridTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, track) in self.tracks.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{track}")?;
        }
        Ok(())
    }
}

/// Absolute grid-column indices for each day.
///
/// Column 1 is the label column, so the first day's lanes start at 2 and
/// each following day continues where the previous one ended.
pub fn column_indices(spans: &[usize]) -> Vec<Vec<usize>> {
    let mut next = 2;
    spans
        .iter()
        .map(|&span| {
            let columns: Vec<usize> = (next..next + span).collect();
            next += span;
            columns
        })
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn lane_tokens(template: &GridTemplate) -> Vec<String> {
        template.lane_tracks().iter().map(ToString::to_string).collect()
    }

    // ── gcd / lcm ───────────────────────────────────────────────────────

    #[test]
    fn test_gcd_with_zero() {
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn test_gcd_values() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(18, 12), 6);
        assert_eq!(gcd(7, 13), 1);
    }

    #[test]
    fn test_lcm_values() {
        assert_eq!(lcm(&[1, 2, 3]), 6);
        assert_eq!(lcm(&[2, 3, 4]), 12);
        assert_eq!(lcm(&[5]), 5);
        assert_eq!(lcm(&[1, 1, 1, 1, 1, 1, 1]), 1);
    }

    #[test]
    fn test_lcm_empty_is_zero() {
        assert_eq!(lcm(&[]), 0);
    }

    #[test]
    fn test_lcm_with_zeros_does_not_divide_by_zero() {
        assert_eq!(lcm(&[0, 0]), 0);
        assert_eq!(lcm(&[0, 3]), 0);
    }

    // ── GridTemplate ────────────────────────────────────────────────────

    #[test]
    fn test_template_lane_tokens() {
        let template = GridTemplate::new("50px", &[1, 2, 3, 1, 1, 1, 1]);
        assert_eq!(
            lane_tokens(&template).join(" "),
            "6fr 3fr 3fr 2fr 2fr 2fr 6fr 6fr 6fr 6fr"
        );
        assert_eq!(template.tracks()[0], GridTrack::Fixed("50px".to_string()));
    }

    #[test]
    fn test_template_with_fractional_label_column() {
        let template = GridTemplate::new("1fr", &[1, 2, 3, 1, 1, 1, 1]);
        assert_eq!(
            template.to_string(),
            "1fr 6fr 3fr 3fr 2fr 2fr 2fr 6fr 6fr 6fr 6fr"
        );
    }

    #[test]
    fn test_template_all_single_lane() {
        let template = GridTemplate::new("50px", &[1; 7]);
        assert_eq!(template.to_string(), "50px 1fr 1fr 1fr 1fr 1fr 1fr 1fr");
    }

    #[test]
    fn test_template_serializes_as_strings() {
        let template = GridTemplate::new("50px", &[2, 1]);
        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value, serde_json::json!(["50px", "1fr", "1fr", "2fr"]));
    }

    #[test]
    fn test_template_no_days() {
        let template = GridTemplate::new("50px", &[]);
        assert_eq!(template.to_string(), "50px");
        assert!(template.lane_tracks().is_empty());
    }

    // ── column_indices ──────────────────────────────────────────────────

    #[test]
    fn test_column_indices_are_consecutive_and_disjoint() {
        let columns = column_indices(&[1, 2, 3, 1]);
        assert_eq!(
            columns,
            vec![vec![2], vec![3, 4], vec![5, 6, 7], vec![8]]
        );
    }
}
