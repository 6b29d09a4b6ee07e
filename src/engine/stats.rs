//! Descriptive statistics over a list of numbers typed by the user.

use crate::engine::format::format_plain;
use crate::model::InputError;

/// Summary of a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of values.
    pub count: usize,
    /// Sum of all values.
    pub sum: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Middle value, or the mean of the two middle values.
    pub median: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Population standard deviation.
    pub pstdev: f64,
    /// Sample standard deviation; `None` for a single value.
    pub stdev: Option<f64>,
}

impl Summary {
    /// One `name = value` line per statistic.
    pub fn lines(&self, precision: usize) -> Vec<String> {
        let fmt = |v: f64| format_plain(v, precision);
        let mut lines = vec![
            format!("n = {}", self.count),
            format!("sum = {}", fmt(self.sum)),
            format!("mean = {}", fmt(self.mean)),
            format!("median = {}", fmt(self.median)),
            format!("min = {}", fmt(self.min)),
            format!("max = {}", fmt(self.max)),
            format!("pstdev = {}", fmt(self.pstdev)),
        ];
        if let Some(stdev) = self.stdev {
            lines.push(format!("stdev = {}", fmt(stdev)));
        }
        lines
    }
}

/// Parse numbers separated by commas, semicolons or whitespace.
///
/// # Errors
///
/// Returns `InputError::Empty` if there are no numbers and
/// `InputError::NotANumber` for the first token that is not a finite number.
pub fn parse_numbers(text: &str) -> Result<Vec<f64>, InputError> {
    let numbers = text
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(InputError::NotANumber(token.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if numbers.is_empty() {
        return Err(InputError::Empty("statistics input"));
    }
    Ok(numbers)
}

/// Summarize the numbers in `text`.
///
/// # Errors
///
/// See [`parse_numbers`].
pub fn summarize(text: &str) -> Result<Summary, InputError> {
    let mut numbers = parse_numbers(text)?;
    numbers.sort_by(f64::total_cmp);

    let count = numbers.len();
    let n = count as f64;
    let sum: f64 = numbers.iter().sum();
    let mean = sum / n;
    let squared_deviations: f64 = numbers.iter().map(|x| (x - mean).powi(2)).sum();

    let median = if count % 2 == 1 {
        numbers[count / 2]
    } else {
        (numbers[count / 2 - 1] + numbers[count / 2]) / 2.0
    };

    Ok(Summary {
        count,
        sum,
        mean,
        median,
        min: numbers[0],
        max: numbers[count - 1],
        pstdev: (squared_deviations / n).sqrt(),
        stdev: (count > 1).then(|| (squared_deviations / (n - 1.0)).sqrt()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_mixed_separators() {
        let summary = summarize("2, 4 4;4 5 5 7 9").expect("valid input");
        assert_eq!(summary.count, 8);
        assert_eq!(summary.sum, 40.0);
        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.median, 4.5);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.pstdev, 2.0);
    }

    #[test]
    fn single_value_has_no_sample_stdev() {
        let summary = summarize("3").expect("valid input");
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.stdev, None);
        assert_eq!(summary.lines(10).len(), 7);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(summarize(" , ;"), Err(InputError::Empty("statistics input")));
    }

    #[test]
    fn non_numeric_token_is_rejected() {
        assert_eq!(
            summarize("1, two, 3"),
            Err(InputError::NotANumber("two".to_string()))
        );
        assert_eq!(summarize("1 inf"), Err(InputError::NotANumber("inf".to_string())));
    }

    #[test]
    fn lines_render_each_statistic() {
        let summary = summarize("1 2 3 4").expect("valid input");
        insta::assert_snapshot!(summary.lines(4).join("\n"), @r"
        n = 4
        sum = 10
        mean = 2.5
        median = 2.5
        min = 1
        max = 4
        pstdev = 1.118
        stdev = 1.291
        ");
    }
}
