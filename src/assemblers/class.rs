/// Descriptive class for an earthquake magnitude.
///
/// | Range       | Class    |
/// |-------------|----------|
/// | >= 8.0      | great    |
/// | >= 7.0      | major    |
/// | >= 6.0      | strong   |
/// | >= 5.0      | moderate |
/// | >= 4.0      | light    |
/// | >= 2.0      | minor    |
/// | < 2.0       | micro    |
pub fn magnitude_class(m: f64) -> &'static str {
    match m {
        m if m >= 8.0 => "great",
        m if m >= 7.0 => "major",
        m if m >= 6.0 => "strong",
        m if m >= 5.0 => "moderate",
        m if m >= 4.0 => "light",
        m if m >= 2.0 => "minor",
        _ => "micro",
    }
}

/// All classes from weakest to strongest.
pub const MAGNITUDE_CLASSES: [&str; 7] =
    ["micro", "minor", "light", "moderate", "strong", "major", "great"];
