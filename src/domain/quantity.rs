use std::fmt;

/// Stock quantities are real numbers: items can be counted in units,
/// kilograms, metres and so on.
pub type Quantity = f64;

/// Format a quantity for display.
/// Example: 15.0 -> "15", 2.5 -> "2.5", -0.0 -> "0"
pub fn format_quantity(quantity: Quantity) -> String {
    if quantity == 0.0 {
        return "0".to_string();
    }
    format!("{}", quantity)
}

/// Parse user or file input into a quantity.
/// Surrounding whitespace is ignored; the value must be a finite number.
/// Example: "10" -> 10.0, " 2.5 " -> 2.5, "1e3" -> 1000.0
pub fn parse_quantity(input: &str) -> Result<Quantity, ParseQuantityError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseQuantityError::Empty);
    }

    let value: f64 = input
        .parse()
        .map_err(|_| ParseQuantityError::InvalidFormat(input.to_string()))?;

    if !value.is_finite() {
        return Err(ParseQuantityError::NotFinite(input.to_string()));
    }

    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseQuantityError {
    Empty,
    InvalidFormat(String),
    NotFinite(String),
}

impl fmt::Display for ParseQuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseQuantityError::Empty => write!(f, "quantity is not a number (empty value)"),
            ParseQuantityError::InvalidFormat(input) => {
                write!(f, "quantity is not a number ('{}')", input)
            }
            ParseQuantityError::NotFinite(input) => {
                write!(f, "quantity must be a finite number ('{}')", input)
            }
        }
    }
}

impl std::error::Error for ParseQuantityError {}
