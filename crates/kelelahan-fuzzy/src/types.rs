//! Common Types and Constants
//!
//! Inputs, categories and results shared by the engine and its callers.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::rule::InputVariable;

// ==================== Constants ====================

/// Lowest possible crisp score
pub const SCORE_MIN: f64 = 0.0;

/// Highest possible crisp score
pub const SCORE_MAX: f64 = 10.0;

// ==================== Inputs ====================

/// The six self-reported readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FatigueInputs {
    /// Hours slept, 0-10
    pub sleep: i32,
    /// Pending tasks, 0-10
    pub tasks: i32,
    /// Cups of caffeine, 0-5
    pub caffeine: i32,
    /// Stress level, 0-10
    pub stress: i32,
    /// Hours studied, 0-10
    pub study_hours: i32,
    /// Emotional state, 0 positive to 10 negative
    pub emotion: i32,
}

impl FatigueInputs {
    pub fn new(
        sleep: i32,
        tasks: i32,
        caffeine: i32,
        stress: i32,
        study_hours: i32,
        emotion: i32,
    ) -> Self {
        Self {
            sleep,
            tasks,
            caffeine,
            stress,
            study_hours,
            emotion,
        }
    }

    pub fn value(&self, variable: InputVariable) -> i32 {
        match variable {
            InputVariable::Sleep => self.sleep,
            InputVariable::Tasks => self.tasks,
            InputVariable::Caffeine => self.caffeine,
            InputVariable::Stress => self.stress,
            InputVariable::StudyHours => self.study_hours,
            InputVariable::Emotion => self.emotion,
        }
    }
}

// ==================== Category ====================

/// Fatigue category derived from the crisp score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TidakLelah,
    LelahRingan,
    LelahSedang,
    SangatLelah,
    ButuhIstirahatSerius,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::TidakLelah,
        Category::LelahRingan,
        Category::LelahSedang,
        Category::SangatLelah,
        Category::ButuhIstirahatSerius,
    ];

    /// Half-open bands `[2k, 2k+2)`, the last one unbounded above.
    pub fn from_score(score: f64) -> Self {
        if score < 2.0 {
            Category::TidakLelah
        } else if score < 4.0 {
            Category::LelahRingan
        } else if score < 6.0 {
            Category::LelahSedang
        } else if score < 8.0 {
            Category::SangatLelah
        } else {
            Category::ButuhIstirahatSerius
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::TidakLelah => "Tidak Lelah",
            Category::LelahRingan => "Lelah Ringan",
            Category::LelahSedang => "Lelah Sedang",
            Category::SangatLelah => "Sangat Lelah",
            Category::ButuhIstirahatSerius => "Butuh Istirahat Serius",
        }
    }

    pub fn english_label(self) -> &'static str {
        match self {
            Category::TidakLelah => "Not Fatigued",
            Category::LelahRingan => "Mildly Fatigued",
            Category::LelahSedang => "Moderately Fatigued",
            Category::SangatLelah => "Very Fatigued",
            Category::ButuhIstirahatSerius => "Needs Serious Rest",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Category::TidakLelah => "😁",
            Category::LelahRingan => "🙂",
            Category::LelahSedang => "😐",
            Category::SangatLelah => "😫",
            Category::ButuhIstirahatSerius => "🛌",
        }
    }

    /// Inclusive lower bound of the band.
    pub fn lower_bound(self) -> f64 {
        match self {
            Category::TidakLelah => SCORE_MIN,
            Category::LelahRingan => 2.0,
            Category::LelahSedang => 4.0,
            Category::SangatLelah => 6.0,
            Category::ButuhIstirahatSerius => 8.0,
        }
    }

    /// Exclusive upper bound, `None` for the last band.
    pub fn upper_bound(self) -> Option<f64> {
        match self {
            Category::ButuhIstirahatSerius => None,
            other => Some(other.lower_bound() + 2.0),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==================== Result ====================

/// Serializes as `{ score, label, category, inconclusive }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceResult {
    /// Crisp score in `[SCORE_MIN, SCORE_MAX]`
    pub score: f64,
    pub category: Category,
    /// No rule fired; `score` is the output domain midpoint.
    pub inconclusive: bool,
}

impl InferenceResult {
    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}

impl Serialize for InferenceResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("InferenceResult", 4)?;
        state.serialize_field("score", &self.score)?;
        state.serialize_field("label", self.label())?;
        state.serialize_field("category", &self.category)?;
        state.serialize_field("inconclusive", &self.inconclusive)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        let cases = [
            (0.0, "Tidak Lelah"),
            (1.99, "Tidak Lelah"),
            (2.0, "Lelah Ringan"),
            (3.99, "Lelah Ringan"),
            (4.0, "Lelah Sedang"),
            (5.99, "Lelah Sedang"),
            (6.0, "Sangat Lelah"),
            (7.99, "Sangat Lelah"),
            (8.0, "Butuh Istirahat Serius"),
            (10.0, "Butuh Istirahat Serius"),
        ];
        for (score, label) in cases {
            assert_eq!(Category::from_score(score).label(), label, "score {score}");
        }
    }

    #[test]
    fn test_bands_are_contiguous() {
        for pair in Category::ALL.windows(2) {
            assert_eq!(pair[0].upper_bound(), Some(pair[1].lower_bound()));
            assert_eq!(Category::from_score(pair[1].lower_bound()), pair[1]);
        }
        assert_eq!(Category::ButuhIstirahatSerius.upper_bound(), None);
    }

    #[test]
    fn test_input_lookup_by_variable() {
        let inputs = FatigueInputs::new(1, 2, 3, 4, 5, 6);
        let values: Vec<i32> = InputVariable::ALL.iter().map(|&v| inputs.value(v)).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_inputs_deserialize_from_camel_case() {
        let inputs: FatigueInputs = serde_json::from_str(
            r#"{"sleep":6,"tasks":3,"caffeine":1,"stress":5,"studyHours":4,"emotion":5}"#,
        )
        .unwrap();
        assert_eq!(inputs, FatigueInputs::new(6, 3, 1, 5, 4, 5));
    }

    #[test]
    fn test_result_serializes_category_text_as_label() {
        let result = InferenceResult {
            score: 57.0 / 7.0,
            category: Category::ButuhIstirahatSerius,
            inconclusive: false,
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["label"], "Butuh Istirahat Serius");
        assert_eq!(json["category"], "butuh_istirahat_serius");
        assert_eq!(json["inconclusive"], false);
        assert!((json["score"].as_f64().unwrap() - 57.0 / 7.0).abs() < 1e-12);
    }
}
