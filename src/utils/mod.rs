/// Parses `MIN-MAX` (or a single `N`, meaning `N-N`).
pub fn parse_range(value: &str) -> Result<(u32, u32), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("expected format MIN-MAX".to_string());
    }
    let parts: Vec<&str> = trimmed.split('-').collect();
    let (min, max) = match parts.as_slice() {
        [single] => (*single, *single),
        [min, max] => (*min, *max),
        _ => return Err("expected format MIN-MAX".to_string()),
    };
    let min: u32 = min
        .trim()
        .parse()
        .map_err(|_| "invalid MIN value".to_string())?;
    let max: u32 = max
        .trim()
        .parse()
        .map_err(|_| "invalid MAX value".to_string())?;
    if min > max {
        return Err("MIN must not exceed MAX".to_string());
    }
    Ok((min, max))
}

/// Parses a 1-based page number.
pub fn parse_page_number(value: &str) -> Result<usize, String> {
    let page: usize = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid page number '{}'", value.trim()))?;
    if page == 0 {
        return Err("page numbers start at 1".to_string());
    }
    Ok(page)
}

pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// Red at `min`, green at `max`, linear in between. Values outside the
/// range are clamped.
pub fn gradient_rgb(value: u32, min: u32, max: u32) -> (u8, u8, u8) {
    if max <= min {
        return (0, 255, 0);
    }
    let percent = (value.saturating_sub(min) as f64 / (max - min) as f64).clamp(0.0, 1.0);
    let r = (255.0 * (1.0 - percent)).round() as u8;
    let g = (255.0 * percent).round() as u8;
    (r, g, 0)
}
