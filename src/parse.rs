// Free-text entry for script-page lengths and shoot-time estimates.
//
// Durations are canonically integer eighths of a script page, times are
// integer minutes. Parsing is lenient about input shape; formatting always
// produces a shape the matching parser accepts.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("invalid page length: {0:?}")]
    InvalidDuration(String),
    #[error("invalid time: {0:?}")]
    InvalidTime(String),
}

/// Parse a script-page length into eighths.
///
/// Accepted shapes: `"15"` (literal eighths), `"2.5"` (pages, rounded to the
/// nearest eighth), `"7/8"` (fraction of a page, truncating), `"1 7/8"`
/// (mixed number).
pub fn parse_duration(text: &str) -> Result<u32, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    let invalid = || ParseError::InvalidDuration(text.to_string());

    // Mixed number: whole pages, then a fraction.
    if let Some((whole, frac)) = text.split_once(char::is_whitespace) {
        let whole: u32 = whole.parse().map_err(|_| invalid())?;
        return Ok(whole * 8 + parse_fraction(frac.trim()).ok_or_else(invalid)?);
    }
    if text.contains('/') {
        return parse_fraction(text).ok_or_else(invalid);
    }
    if let Ok(n) = text.parse::<u32>() {
        return Ok(n);
    }
    match text.parse::<f64>() {
        Ok(v) if v >= 0.0 => Ok((v * 8.0).round() as u32),
        _ => Err(invalid()),
    }
}

fn parse_fraction(text: &str) -> Option<u32> {
    let (num, den) = text.split_once('/')?;
    let num: u32 = num.trim().parse().ok()?;
    let den: u32 = den.trim().parse().ok()?;
    if den == 0 {
        return None;
    }
    // Truncating division: "1/3" of a page is 2 eighths.
    Some(num * 8 / den)
}

/// Render eighths the way schedule paperwork writes them.
pub fn format_eighths(eighths: u32) -> String {
    match (eighths / 8, eighths % 8) {
        (0, 0) => "0".to_string(),
        (0, rem) => format!("{rem}/8"),
        (whole, 0) => whole.to_string(),
        (whole, rem) => format!("{whole} {rem}/8"),
    }
}

/// Parse a shoot-time estimate into minutes.
///
/// Accepted shapes: `"2:30"`, `"2 hr 30 min"` (and the `"H hr"` / `"M min"`
/// halves), plus bare numbers. Bare whole numbers up to 10 read as hours,
/// larger ones as minutes; bare decimals up to 14 read as hours, larger ones
/// as minutes. The two thresholds differ; both are pinned by tests.
pub fn parse_time(text: &str) -> Result<u32, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    let invalid = || ParseError::InvalidTime(text.to_string());

    if let Some((hours, minutes)) = text.split_once(':') {
        let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
        let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;
        if minutes > 59 {
            return Err(invalid());
        }
        return Ok(hours * 60 + minutes);
    }
    if text.contains("hr") || text.contains("min") {
        return parse_unit_words(text).ok_or_else(invalid);
    }
    if let Ok(n) = text.parse::<u32>() {
        return Ok(if n <= 10 { n * 60 } else { n });
    }
    match text.parse::<f64>() {
        Ok(v) if v >= 0.0 => Ok(if v <= 14.0 {
            (v * 60.0).round() as u32
        } else {
            v.round() as u32
        }),
        _ => Err(invalid()),
    }
}

fn parse_unit_words(text: &str) -> Option<u32> {
    let mut tokens = text.split_whitespace();
    let mut total = 0u32;
    let mut seen = false;
    while let Some(value) = tokens.next() {
        let value: u32 = value.parse().ok()?;
        match tokens.next()? {
            "hr" => total += value * 60,
            "min" => total += value,
            _ => return None,
        }
        seen = true;
    }
    seen.then_some(total)
}

/// Render minutes with `hr`/`min` unit words.
pub fn format_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, rem) => format!("{rem} min"),
        (hours, 0) => format!("{hours} hr"),
        (hours, rem) => format!("{hours} hr {rem} min"),
    }
}
