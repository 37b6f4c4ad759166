use grille_core::format::OutputFormat;

/// Parse output format from string
pub fn parse_output_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse a `<criterion-id>=<score>` assignment
pub fn parse_score_assignment(s: &str) -> std::result::Result<(String, i64), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <id>=<score>, got '{}'", s))?;

    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing criterion id in '{}'", s));
    }

    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("score must be an integer, got '{}'", value.trim()))?;

    Ok((id.to_string(), value))
}
