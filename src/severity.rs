//! Clasificación de la gravedad de una interacción a partir de su texto.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const HIGH_KEYWORDS: [&str; 2] = ["severe", "life-threatening"];
const MEDIUM_KEYWORDS: [&str; 2] = ["moderate", "caution"];

/// Devuelve la gravedad de una descripción de interacción.
///
/// Las palabras clave se buscan sin distinguir mayúsculas y por prioridad:
/// cualquier término de gravedad alta gana a los de gravedad media.
pub fn classify(text: &str) -> Severity {
    let text = text.to_lowercase();
    if HIGH_KEYWORDS.iter().any(|k| text.contains(k)) {
        Severity::High
    } else if MEDIUM_KEYWORDS.iter().any(|k| text.contains(k)) {
        Severity::Medium
    } else {
        Severity::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severe_wins_over_everything() {
        assert_eq!(classify("SEVERE bleeding"), Severity::High);
        assert_eq!(classify("moderate effect, but Severe when combined"), Severity::High);
        assert_eq!(classify("use caution: life-threatening arrhythmia"), Severity::High);
    }

    #[test]
    fn moderate_and_caution_are_medium() {
        assert_eq!(classify("Moderate increase in absorption"), Severity::Medium);
        assert_eq!(classify("Use with CAUTION"), Severity::Medium);
    }

    #[test]
    fn everything_else_is_low() {
        assert_eq!(classify("Take with a full glass of water"), Severity::Low);
        assert_eq!(classify(""), Severity::Low);
    }

    #[test]
    fn serializes_as_plain_label() {
        assert_eq!(serde_json::to_string(&Severity::Medium).unwrap(), "\"Medium\"");
        assert_eq!(Severity::High.to_string(), "High");
    }
}
