//! GPA extraction from free-text education details.

use regex::Regex;
use std::sync::LazyLock;

/// Tried in order; the first pattern that matches wins. The `/4.0` forms come
/// first so "GPA: 3.2/4.0" never reads the scale as the grade.
static GPA_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"CGPA:\s*(\d+\.\d+)/4\.0",
        r"C-GPA:\s*(\d+\.\d+)/4\.0",
        r"GPA:\s*(\d+\.\d+)/4\.0",
        r"CGPA\s*(\d+\.\d+)/4\.0",
        r"C-GPA\s*(\d+\.\d+)/4\.0",
        r"GPA\s*(\d+\.\d+)/4\.0",
        r"CGPA:?\s*(\d+\.\d+)",
        r"GPA:?\s*(\d+\.\d+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("GPA pattern is valid"))
    .collect()
});

/// Pull a decimal GPA out of text such as `"First class, CGPA: 3.72/4.0"`.
pub fn extract_gpa(details: &str) -> Option<f64> {
    if details.is_empty() {
        return None;
    }
    GPA_PATTERNS.iter().find_map(|re| {
        re.captures(details)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    })
}
