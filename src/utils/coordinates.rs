/// Parse a decimal-degree coordinate as published by the dataset.
///
/// Returns `None` for text that is not a number. `nan`, `inf` and values
/// that overflow to infinity are accepted; they fall inside no region box.
///
/// # Examples
/// ```
/// use meteorite_sorter::utils::parse_decimal_coordinate;
///
/// let lat = parse_decimal_coordinate(" 50.775000 ").unwrap();
/// assert!((lat - 50.775).abs() < 0.000001);
/// assert!(parse_decimal_coordinate("50:46:30").is_none());
/// assert!(parse_decimal_coordinate("nan").unwrap().is_nan());
/// ```
pub fn parse_decimal_coordinate(coord_str: &str) -> Option<f64> {
    coord_str.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_coordinate() {
        assert!((parse_decimal_coordinate("51.5074").unwrap() - 51.5074).abs() < 0.000001);
        assert!((parse_decimal_coordinate(" -0.1278 ").unwrap() - -0.1278).abs() < 0.000001);
        assert_eq!(parse_decimal_coordinate("0.000000"), Some(0.0));
        assert_eq!(parse_decimal_coordinate("-33"), Some(-33.0));
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(parse_decimal_coordinate("").is_none());
        assert!(parse_decimal_coordinate("north").is_none());
        assert!(parse_decimal_coordinate("50:30:15").is_none());
    }

    #[test]
    fn test_non_finite_values_parse() {
        assert!(parse_decimal_coordinate("NaN").unwrap().is_nan());
        assert_eq!(parse_decimal_coordinate("inf"), Some(f64::INFINITY));
        assert_eq!(parse_decimal_coordinate("-infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_decimal_coordinate("1e400"), Some(f64::INFINITY));
    }
}
