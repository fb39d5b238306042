//! Human-readable units and plain-text tables
//!
//! Distances scale through m/km/Mm/Gm/Tm at powers of 1000, durations
//! break into hrs/mins/secs, and speeds stay in m/s with thousands
//! separators. Formatting never loses the integer part: only the scaled
//! fraction is rounded.

use crate::{PlannerError, Result};

/// Scale a distance in meters into the largest unit that keeps the value
/// above 1. `round_to` limits the fractional digits; Tm values are always
/// pre-rounded to 12 digits so the float noise of the division never
/// shows.
///
/// Integral values print without a decimal point: `1 km`, not `1.0 km`.
pub fn pretty_distance(distance: u64, round_to: Option<u32>) -> String {
    if distance < 1_000 {
        return format!("{distance} m");
    }

    let (scale, suffix) = if distance < 1_000_000 {
        (1e3, "km")
    } else if distance < 1_000_000_000 {
        (1e6, "Mm")
    } else if distance < 1_000_000_000_000 {
        (1e9, "Gm")
    } else {
        (1e12, "Tm")
    };

    let mut scaled = distance as f64 / scale;
    if suffix == "Tm" {
        scaled = round_to_digits(scaled, 12);
    }
    if let Some(digits) = round_to {
        scaled = round_to_digits(scaled, digits);
    }

    format!("{scaled} {suffix}")
}

/// Break a duration in seconds into the largest applicable fields, keeping
/// zero fields visible: `1 hr 0 mins 0 secs`.
pub fn pretty_duration(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds} sec{}", plural(seconds));
    }

    let secs = seconds % 60;
    let mins = (seconds % 3600) / 60;
    if seconds < 3600 {
        return format!("{mins} min{} {secs} sec{}", plural(mins), plural(secs));
    }

    let hrs = seconds / 3600;
    format!(
        "{hrs} hr{} {mins} min{} {secs} sec{}",
        plural(hrs),
        plural(mins),
        plural(secs)
    )
}

/// Speed in m/s with digits grouped in threes: `1,273,893 m/s`.
pub fn pretty_speed(speed: u64) -> String {
    format!("{} m/s", group_thousands(speed))
}

/// Render a matrix of cells as a `|`-bordered table, one leading and
/// trailing space per cell, columns padded to the widest cell. With
/// `header_underline` a dashed line follows the first row, spanning the
/// borders of every column.
///
/// Errors on an empty matrix or rows of uneven width.
pub fn render_table(
    matrix: &[Vec<String>],
    row_prefix: &str,
    header_underline: bool,
) -> Result<String> {
    let first = matrix.first().ok_or(PlannerError::EmptyTable)?;
    let columns = first.len();
    if columns == 0 {
        return Err(PlannerError::EmptyTable);
    }
    if matrix.iter().any(|row| row.len() != columns) {
        return Err(PlannerError::RaggedTable);
    }

    let widths: Vec<usize> = (0..columns)
        .map(|col| matrix.iter().map(|row| row[col].len()).max().unwrap_or(0))
        .collect();

    let mut table = String::new();
    for (index, row) in matrix.iter().enumerate() {
        if index == 1 && header_underline {
            // 4 dashes cover the smallest possible 1x1 table, 3 more per
            // extra column, and one per padded cell character.
            let dashes = 4 + 3 * (columns - 1) + widths.iter().sum::<usize>();
            table.push_str(row_prefix);
            table.push_str(&"-".repeat(dashes));
            table.push('\n');
        }

        table.push_str(row_prefix);
        table.push('|');
        for (col, cell) in row.iter().enumerate() {
            table.push(' ');
            table.push_str(cell);
            table.push(' ');
            table.push_str(&" ".repeat(widths[col] - cell.len()));
            table.push('|');
        }
        table.push('\n');
    }
    table.pop();

    Ok(table)
}

fn plural(value: u64) -> &'static str {
    if value == 1 {
        ""
    } else {
        "s"
    }
}

fn round_to_digits(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_distance_scale_boundaries() {
        assert_eq!(pretty_distance(999, None), "999 m");
        assert_eq!(pretty_distance(1_000, None), "1 km");
        assert_eq!(pretty_distance(999_999, None), "999.999 km");
        assert_eq!(pretty_distance(1_000_000, None), "1 Mm");
        assert_eq!(pretty_distance(999_999_999, None), "999.999999 Mm");
        assert_eq!(pretty_distance(1_000_000_000, None), "1 Gm");
        assert_eq!(pretty_distance(1_000_000_000_000, None), "1 Tm");
    }

    #[test]
    fn test_pretty_distance_mid_scale() {
        assert_eq!(pretty_distance(542, None), "542 m");
        assert_eq!(pretty_distance(3_333, None), "3.333 km");
        assert_eq!(pretty_distance(75_671_382, None), "75.671382 Mm");
        assert_eq!(pretty_distance(75_671_382_123, None), "75.671382123 Gm");
        assert_eq!(pretty_distance(75_671_382_123_487, None), "75.671382123487 Tm");
        assert_eq!(
            pretty_distance(999_999_999_999_999, None),
            "999.999999999999 Tm"
        );
    }

    #[test]
    fn test_pretty_distance_rounding() {
        assert_eq!(pretty_distance(454_009, Some(3)), "454.009 km");
        assert_eq!(pretty_distance(1_234_567, Some(3)), "1.235 Mm");
        assert_eq!(pretty_distance(1_000_400, Some(3)), "1 Mm");
    }

    #[test]
    fn test_pretty_duration() {
        assert_eq!(pretty_duration(0), "0 secs");
        assert_eq!(pretty_duration(1), "1 sec");
        assert_eq!(pretty_duration(59), "59 secs");
        assert_eq!(pretty_duration(60), "1 min 0 secs");
        assert_eq!(pretty_duration(1_801), "30 mins 1 sec");
        assert_eq!(pretty_duration(3_599), "59 mins 59 secs");
        assert_eq!(pretty_duration(3_600), "1 hr 0 mins 0 secs");
        assert_eq!(pretty_duration(86_400), "24 hrs 0 mins 0 secs");
        assert_eq!(pretty_duration(923_643), "256 hrs 34 mins 3 secs");
    }

    #[test]
    fn test_pretty_speed() {
        assert_eq!(pretty_speed(1), "1 m/s");
        assert_eq!(pretty_speed(999), "999 m/s");
        assert_eq!(pretty_speed(1_000), "1,000 m/s");
        assert_eq!(pretty_speed(1_273_893), "1,273,893 m/s");
    }

    #[test]
    fn test_render_table() {
        let matrix = vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["x".to_string(), "longer".to_string()],
        ];

        let table = render_table(&matrix, "  ", true).unwrap();
        assert_eq!(
            table,
            "  | A | B      |\n  --------------\n  | x | longer |"
        );
    }

    #[test]
    fn test_render_table_without_underline() {
        let matrix = vec![
            vec!["a".to_string()],
            vec!["b".to_string()],
        ];

        assert_eq!(render_table(&matrix, "", false).unwrap(), "| a |\n| b |");
    }

    #[test]
    fn test_render_table_rejects_bad_matrices() {
        assert!(matches!(
            render_table(&[], "", false),
            Err(PlannerError::EmptyTable)
        ));

        let ragged = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ];
        assert!(matches!(
            render_table(&ragged, "", false),
            Err(PlannerError::RaggedTable)
        ));
    }
}
