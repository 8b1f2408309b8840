use std::sync::Arc;

use serde::Serialize;

use crate::reference::ReferenceData;

pub const COLOR_NEUTRAL: &str = "#666666";
pub const COLOR_SUCCESS: &str = "#2ECC71";
pub const COLOR_DANGER: &str = "#E74C3C";
pub const COLOR_CAUTION: &str = "#FFC300";

const LABEL_MISSING_PHONE: &str = "❓ กรุณาใส่เบอร์โทรศัพท์";
const LABEL_OFFICIAL_PREFIX: &str = "🟢✅ หมายเลขหน่วยงาน: ";
const LABEL_SCAM: &str = "🔴🚨 หมายเลขมิจฉาชีพ";
const LABEL_UNKNOWN: &str = "💛⭐ หมายเลขไม่พบในระบบ (ถือว่าปลอดภัยเบื้องต้น)";

/// Three-way outcome of a lookup, plus the empty-input case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    MissingPhone,
    Official { agency: String },
    Scam,
    Unknown,
}

impl Verdict {
    /// Only real lookups are recorded in the call log.
    pub fn should_log(&self) -> bool {
        !matches!(self, Verdict::MissingPhone)
    }
}

/// Classification as returned to the client: `{"result": ..., "color": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    #[serde(skip)]
    pub verdict: Verdict,
    #[serde(rename = "result")]
    pub label: String,
    pub color: &'static str,
}

impl Classification {
    fn from_verdict(verdict: Verdict) -> Self {
        let (label, color) = match &verdict {
            Verdict::MissingPhone => (LABEL_MISSING_PHONE.to_string(), COLOR_NEUTRAL),
            Verdict::Official { agency } => {
                (format!("{}{}", LABEL_OFFICIAL_PREFIX, agency), COLOR_SUCCESS)
            }
            Verdict::Scam => (LABEL_SCAM.to_string(), COLOR_DANGER),
            Verdict::Unknown => (LABEL_UNKNOWN.to_string(), COLOR_CAUTION),
        };
        Self {
            verdict,
            label,
            color,
        }
    }
}

/// Looks phone numbers up against the reference tables.
///
/// Official numbers take precedence over the blacklist. Matching is exact on
/// the trimmed input; separators and country codes are not normalized.
#[derive(Debug, Clone)]
pub struct Classifier {
    reference: Arc<ReferenceData>,
}

impl Classifier {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn classify(&self, phone: &str) -> Classification {
        let phone = phone.trim();

        let verdict = if phone.is_empty() {
            Verdict::MissingPhone
        } else if let Some(agency) = self.reference.agency_for(phone) {
            Verdict::Official {
                agency: agency.to_string(),
            }
        } else if self.reference.is_blacklisted(phone) {
            Verdict::Scam
        } else {
            Verdict::Unknown
        };

        Classification::from_verdict(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        let data = ReferenceData::default()
            .with_official("021234567", "กสทช.")
            .with_official("1111", "Bank")
            .with_blacklisted("0899999999")
            .with_blacklisted("1111");
        Classifier::new(Arc::new(data))
    }

    #[test]
    fn test_official_number() {
        let result = classifier().classify("021234567");
        assert_eq!(
            result.verdict,
            Verdict::Official {
                agency: "กสทช.".to_string()
            }
        );
        assert_eq!(result.label, "🟢✅ หมายเลขหน่วยงาน: กสทช.");
        assert_eq!(result.color, COLOR_SUCCESS);
    }

    #[test]
    fn test_official_beats_blacklist() {
        let result = classifier().classify("1111");
        assert!(matches!(result.verdict, Verdict::Official { .. }));
        assert!(result.label.contains("Bank"));
        assert_eq!(result.color, COLOR_SUCCESS);
    }

    #[test]
    fn test_scam_number() {
        let result = classifier().classify("0899999999");
        assert_eq!(result.verdict, Verdict::Scam);
        assert_eq!(result.label, LABEL_SCAM);
        assert_eq!(result.color, COLOR_DANGER);
    }

    #[test]
    fn test_unknown_number() {
        let result = classifier().classify("0000000000");
        assert_eq!(result.verdict, Verdict::Unknown);
        assert_eq!(result.label, LABEL_UNKNOWN);
        assert_eq!(result.color, COLOR_CAUTION);
    }

    #[test]
    fn test_blank_input_prompts() {
        for input in ["", "   ", "\t\n"] {
            let result = classifier().classify(input);
            assert_eq!(result.verdict, Verdict::MissingPhone);
            assert_eq!(result.label, LABEL_MISSING_PHONE);
            assert_eq!(result.color, COLOR_NEUTRAL);
            assert!(!result.verdict.should_log());
        }
    }

    #[test]
    fn test_input_is_trimmed_but_not_normalized() {
        let c = classifier();
        assert_eq!(c.classify("  0899999999 ").verdict, Verdict::Scam);
        assert_eq!(c.classify("089-999-9999").verdict, Verdict::Unknown);
    }

    #[test]
    fn test_serializes_result_and_color_only() {
        let json = serde_json::to_value(classifier().classify("0899999999")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"result": LABEL_SCAM, "color": COLOR_DANGER})
        );
    }
}
