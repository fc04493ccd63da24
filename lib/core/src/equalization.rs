//! Course equalization eligibility
//!
//! Straight-line heuristic over credits, topic word count and grade. It is
//! independent of answer resolution and only shares the error type.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Grades accepted for equalization
pub const PASSING_GRADES: &[&str] = &["A+", "A", "B+", "B", "C+", "C"];

const LIKELY_MIN_WORDS: usize = 40;
const PARTIAL_MIN_WORDS: usize = 25;

/// A course offered by the receiving institution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetCourse {
    pub code: String,
    pub name: String,
    pub credits: f32,
}

impl TargetCourse {
    fn new(code: &str, name: &str, credits: f32) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            credits,
        }
    }
}

/// Courses a previous course can be equalized against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseCatalog {
    courses: Vec<TargetCourse>,
}

impl CourseCatalog {
    pub fn new(courses: Vec<TargetCourse>) -> Self {
        Self { courses }
    }

    /// Parse a JSON array of `{code, name, credits}` courses
    pub fn from_json(json: &str) -> Result<Self> {
        let courses: Vec<TargetCourse> = serde_json::from_str(json)?;
        if courses.is_empty() {
            return Err(Error::InvalidConfig("course catalog is empty".to_string()));
        }
        Ok(Self::new(courses))
    }

    pub fn find(&self, code: &str) -> Option<&TargetCourse> {
        let code = code.trim();
        self.courses.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn courses(&self) -> &[TargetCourse] {
        &self.courses
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::new(vec![
            TargetCourse::new("BAIS101", "Introduction to Information Systems", 3.0),
            TargetCourse::new("BAIS200", "Introduction to Programming", 3.0),
            TargetCourse::new("BAIS210", "Database Management", 3.0),
            TargetCourse::new("BAIS300", "Business Application Development", 3.0),
            TargetCourse::new("BAIS305", "E-Commerce", 3.0),
            TargetCourse::new("BAIS310", "Web & Mobile App Development", 3.0),
            TargetCourse::new("BAIS405", "System Analysis & Design", 3.0),
            TargetCourse::new("BAIS415", "Data Mining & Analysis", 3.0),
            TargetCourse::new("BUS470", "Research Methods", 3.0),
            TargetCourse::new("BUS471", "Strategic Management", 3.0),
        ])
    }
}

/// Equalization request as submitted by the wizard form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EqualizationRequest {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub previous_code: String,
    #[serde(default)]
    pub previous_name: String,
    #[serde(default)]
    pub previous_credits: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub topics: String,
    #[serde(default)]
    pub target_code: String,
    #[serde(default)]
    pub notes: String,
}

impl EqualizationRequest {
    /// First required field that is blank, if any
    pub fn validate(&self) -> Result<()> {
        let required: [(&'static str, &str); 6] = [
            ("institution", &self.institution),
            ("previous_code", &self.previous_code),
            ("previous_name", &self.previous_name),
            ("previous_credits", &self.previous_credits),
            ("grade", &self.grade),
            ("target_code", &self.target_code),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(Error::MissingField(*field)),
            None => Ok(()),
        }
    }

    /// Leading number of the credits field, so `"3 credits"` is 3.
    /// Text without a leading number counts as zero.
    pub fn credits(&self) -> f32 {
        leading_number(&self.previous_credits).unwrap_or(0.0)
    }

    pub fn topic_word_count(&self) -> usize {
        self.topics.split_whitespace().count()
    }

    pub fn grade_passes(&self) -> bool {
        PASSING_GRADES.contains(&self.grade.trim())
    }
}

/// Longest numeric prefix of `text` after leading whitespace
fn leading_number(text: &str) -> Option<f32> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());
    let candidate = &text[..end];

    (1..=candidate.len())
        .rev()
        .find_map(|len| candidate[..len].parse::<f32>().ok())
        .filter(|n| n.is_finite())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    LikelyEligible,
    PartiallyEligible,
    Unlikely,
    NeedsReview,
}

impl Decision {
    pub fn title(self) -> &'static str {
        match self {
            Decision::LikelyEligible => "Likely eligible for equalization",
            Decision::PartiallyEligible => "Partially eligible / possible conditional equalization",
            Decision::Unlikely => "Unlikely to be equalized",
            Decision::NeedsReview => "Needs manual review",
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Decision::LikelyEligible => "The course has similar or higher credit hours, enough listed topics, and a passing grade. It is likely to be accepted, subject to official approval.",
            Decision::PartiallyEligible => "The course is close in credits and content. The committee may accept it conditionally or ask for extra documents or an interview.",
            Decision::Unlikely => "There may be a shortage in credit hours, topics covered, or grade. It is unlikely to be accepted as a full equivalent.",
            Decision::NeedsReview => "Based on the provided information, the course may be similar but requires detailed review by the equalization committee.",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    pub decision: Decision,
    pub title: String,
    pub reason: String,
    /// `PREV → TARGET` label, absent when the target course is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    pub credits: f32,
    pub topic_words: usize,
}

/// Evaluate a request against `catalog`. Fails only on missing fields.
pub fn evaluate(request: &EqualizationRequest, catalog: &CourseCatalog) -> Result<Evaluation> {
    request.validate()?;

    let credits = request.credits();
    let words = request.topic_word_count();
    let grade_ok = request.grade_passes();
    let target = catalog.find(&request.target_code);

    let decision = match target {
        None => Decision::NeedsReview,
        Some(t) if credits >= t.credits && words >= LIKELY_MIN_WORDS && grade_ok => Decision::LikelyEligible,
        Some(t) if credits >= t.credits - 1.0 && words >= PARTIAL_MIN_WORDS && grade_ok => {
            Decision::PartiallyEligible
        }
        Some(_) => Decision::Unlikely,
    };

    Ok(Evaluation {
        decision,
        title: decision.title().to_string(),
        reason: decision.reason().to_string(),
        matched: target.map(|t| format!("{} → {}", request.previous_code.trim().to_uppercase(), t.code)),
        credits,
        topic_words: words,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(credits: &str, grade: &str, words: usize) -> EqualizationRequest {
        EqualizationRequest {
            institution: "City College".to_string(),
            previous_code: "cs101".to_string(),
            previous_name: "Intro to Computing".to_string(),
            previous_credits: credits.to_string(),
            grade: grade.to_string(),
            topics: vec!["topic"; words].join(" "),
            target_code: "BAIS101".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_likely_eligible() {
        let eval = evaluate(&request("3", "B+", 40), &CourseCatalog::default()).unwrap();
        assert_eq!(eval.decision, Decision::LikelyEligible);
        assert_eq!(eval.matched.as_deref(), Some("CS101 → BAIS101"));
        assert_eq!(eval.topic_words, 40);
    }

    #[test]
    fn test_partially_eligible() {
        let eval = evaluate(&request("2", "C", 25), &CourseCatalog::default()).unwrap();
        assert_eq!(eval.decision, Decision::PartiallyEligible);
    }

    #[test]
    fn test_failing_grade_is_unlikely() {
        let eval = evaluate(&request("4", "D", 60), &CourseCatalog::default()).unwrap();
        assert_eq!(eval.decision, Decision::Unlikely);
    }

    #[test]
    fn test_short_topics_unlikely() {
        let eval = evaluate(&request("3", "A", 10), &CourseCatalog::default()).unwrap();
        assert_eq!(eval.decision, Decision::Unlikely);
    }

    #[test]
    fn test_unknown_target_needs_review() {
        let mut req = request("3", "A", 50);
        req.target_code = "ZZZ999".to_string();
        let eval = evaluate(&req, &CourseCatalog::default()).unwrap();
        assert_eq!(eval.decision, Decision::NeedsReview);
        assert!(eval.matched.is_none());
    }

    #[test]
    fn test_missing_field() {
        let mut req = request("3", "A", 50);
        req.grade = "  ".to_string();
        assert!(matches!(evaluate(&req, &CourseCatalog::default()), Err(Error::MissingField("grade"))));
    }

    #[test]
    fn test_credits_use_leading_number() {
        assert_eq!(request("3 credits", "A", 0).credits(), 3.0);
        assert_eq!(request("  2.5hrs", "A", 0).credits(), 2.5);
        assert_eq!(request("4.", "A", 0).credits(), 4.0);
        assert_eq!(request("1.5.2", "A", 0).credits(), 1.5);
        assert_eq!(request("3e", "A", 0).credits(), 3.0);
        assert_eq!(request("-", "A", 0).credits(), 0.0);

        let eval = evaluate(&request("3 credit hours", "A", 45), &CourseCatalog::default()).unwrap();
        assert_eq!(eval.decision, Decision::LikelyEligible);
        assert_eq!(eval.credits, 3.0);
    }

    #[test]
    fn test_catalog_from_json() {
        let catalog = CourseCatalog::from_json(
            r#"[{"code": "CS200", "name": "Data Structures", "credits": 4}]"#,
        )
        .unwrap();
        assert_eq!(catalog.find("cs200").unwrap().credits, 4.0);
        assert!(catalog.find("BAIS101").is_none());

        assert!(matches!(CourseCatalog::from_json("[]"), Err(Error::InvalidConfig(_))));
        assert!(matches!(CourseCatalog::from_json("{"), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_garbage_credits_are_zero() {
        let req = request("three", "A", 50);
        assert_eq!(req.credits(), 0.0);
        let eval = evaluate(&req, &CourseCatalog::default()).unwrap();
        assert_eq!(eval.decision, Decision::Unlikely);
    }
}
