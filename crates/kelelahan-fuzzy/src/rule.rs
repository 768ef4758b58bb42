//! Rule Base
//!
//! Rules are conjunctions of input clauses implying one output set.
//! Conjunction is fuzzy AND via min.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FuzzyError;
use crate::variable::{
    CaffeineSet, EmotionSet, FatigueSet, FuzzyTerm, SleepSet, StressSet, StudySet, TaskSet,
};

/// The six input variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputVariable {
    Sleep,
    Tasks,
    Caffeine,
    Stress,
    StudyHours,
    Emotion,
}

impl InputVariable {
    pub const ALL: [InputVariable; 6] = [
        InputVariable::Sleep,
        InputVariable::Tasks,
        InputVariable::Caffeine,
        InputVariable::Stress,
        InputVariable::StudyHours,
        InputVariable::Emotion,
    ];

    /// Name of the linguistic variable.
    pub fn name(self) -> &'static str {
        match self {
            InputVariable::Sleep => "jam_tidur",
            InputVariable::Tasks => "jumlah_tugas",
            InputVariable::Caffeine => "kafein",
            InputVariable::Stress => "stres",
            InputVariable::StudyHours => "jam_belajar",
            InputVariable::Emotion => "emosi",
        }
    }
}

/// A `(variable, set)` pair in a rule antecedent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "variable", content = "set", rename_all = "camelCase")]
pub enum Clause {
    Sleep(SleepSet),
    Tasks(TaskSet),
    Caffeine(CaffeineSet),
    Stress(StressSet),
    StudyHours(StudySet),
    Emotion(EmotionSet),
}

impl Clause {
    pub fn variable(self) -> InputVariable {
        match self {
            Clause::Sleep(_) => InputVariable::Sleep,
            Clause::Tasks(_) => InputVariable::Tasks,
            Clause::Caffeine(_) => InputVariable::Caffeine,
            Clause::Stress(_) => InputVariable::Stress,
            Clause::StudyHours(_) => InputVariable::StudyHours,
            Clause::Emotion(_) => InputVariable::Emotion,
        }
    }

    pub fn set_name(self) -> &'static str {
        match self {
            Clause::Sleep(set) => set.name(),
            Clause::Tasks(set) => set.name(),
            Clause::Caffeine(set) => set.name(),
            Clause::Stress(set) => set.name(),
            Clause::StudyHours(set) => set.name(),
            Clause::Emotion(set) => set.name(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.variable().name(), self.set_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    antecedent: Vec<Clause>,
    consequent: FatigueSet,
}

impl Rule {
    pub fn new(antecedent: Vec<Clause>, consequent: FatigueSet) -> Self {
        Self {
            antecedent,
            consequent,
        }
    }

    pub fn antecedent(&self) -> &[Clause] {
        &self.antecedent
    }

    pub fn consequent(&self) -> FatigueSet {
        self.consequent
    }

    /// Firing strength: min of the clause degrees supplied by `degree`.
    pub fn strength(&self, degree: impl Fn(Clause) -> f64) -> f64 {
        self.antecedent
            .iter()
            .map(|&clause| degree(clause))
            .fold(1.0, f64::min)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.antecedent.iter().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            write!(f, "{clause}")?;
        }
        write!(f, " -> kelelahan={}", self.consequent)
    }
}

/// Ordered, validated list of rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Every rule needs a non-empty antecedent mentioning each variable at most once.
    pub fn new(rules: Vec<Rule>) -> Result<Self, FuzzyError> {
        if rules.is_empty() {
            return Err(FuzzyError::definition("rule base", "no rules"));
        }
        for (i, rule) in rules.iter().enumerate() {
            let subject = format!("rule {}", i + 1);
            if rule.antecedent.is_empty() {
                return Err(FuzzyError::definition(subject, "empty antecedent"));
            }
            for (j, clause) in rule.antecedent.iter().enumerate() {
                let repeated = rule.antecedent[..j]
                    .iter()
                    .any(|earlier| earlier.variable() == clause.variable());
                if repeated {
                    return Err(FuzzyError::definition(
                        subject,
                        format!("{} appears more than once", clause.variable().name()),
                    ));
                }
            }
        }
        Ok(Self { rules })
    }

    /// The ten fixed student fatigue rules.
    pub fn standard() -> Result<Self, FuzzyError> {
        use Clause::*;

        Self::new(vec![
            Rule::new(
                vec![
                    Sleep(SleepSet::Sedikit),
                    Tasks(TaskSet::Banyak),
                    Stress(StressSet::Tinggi),
                    StudyHours(StudySet::Lama),
                    Emotion(EmotionSet::Negatif),
                ],
                FatigueSet::IstirahatSerius,
            ),
            Rule::new(
                vec![Sleep(SleepSet::Sedikit), Tasks(TaskSet::Banyak)],
                FatigueSet::SangatLelah,
            ),
            Rule::new(
                vec![Sleep(SleepSet::Sedikit), Stress(StressSet::Tinggi)],
                FatigueSet::SangatLelah,
            ),
            Rule::new(
                vec![
                    Sleep(SleepSet::Cukup),
                    Tasks(TaskSet::Sedang),
                    Stress(StressSet::Sedang),
                ],
                FatigueSet::LelahSedang,
            ),
            Rule::new(
                vec![
                    Sleep(SleepSet::Cukup),
                    Caffeine(CaffeineSet::Banyak),
                    Stress(StressSet::Rendah),
                ],
                FatigueSet::LelahRingan,
            ),
            Rule::new(
                vec![
                    Sleep(SleepSet::Banyak),
                    Tasks(TaskSet::Sedikit),
                    Emotion(EmotionSet::Positif),
                ],
                FatigueSet::TidakLelah,
            ),
            Rule::new(
                vec![Sleep(SleepSet::Banyak), Tasks(TaskSet::Banyak)],
                FatigueSet::LelahSedang,
            ),
            Rule::new(
                vec![Caffeine(CaffeineSet::Banyak), Stress(StressSet::Tinggi)],
                FatigueSet::LelahSedang,
            ),
            Rule::new(
                vec![Emotion(EmotionSet::Negatif), Stress(StressSet::Tinggi)],
                FatigueSet::SangatLelah,
            ),
            Rule::new(
                vec![
                    StudyHours(StudySet::Lama),
                    Caffeine(CaffeineSet::Sedikit),
                    Sleep(SleepSet::Sedikit),
                ],
                FatigueSet::SangatLelah,
            ),
        ])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleBase {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rule_base_order() {
        let rules = RuleBase::standard().unwrap();
        assert_eq!(rules.len(), 10);

        let consequents: Vec<FatigueSet> = rules.iter().map(Rule::consequent).collect();
        assert_eq!(
            consequents,
            vec![
                FatigueSet::IstirahatSerius,
                FatigueSet::SangatLelah,
                FatigueSet::SangatLelah,
                FatigueSet::LelahSedang,
                FatigueSet::LelahRingan,
                FatigueSet::TidakLelah,
                FatigueSet::LelahSedang,
                FatigueSet::LelahSedang,
                FatigueSet::SangatLelah,
                FatigueSet::SangatLelah,
            ]
        );

        let sizes: Vec<usize> = rules.iter().map(|r| r.antecedent().len()).collect();
        assert_eq!(sizes, vec![5, 2, 2, 3, 3, 3, 2, 2, 2, 3]);
    }

    #[test]
    fn test_rule_display() {
        let rules = RuleBase::standard().unwrap();
        let last = rules.iter().last().unwrap();
        assert_eq!(
            last.to_string(),
            "jam_belajar=lama & kafein=sedikit & jam_tidur=sedikit -> kelelahan=sangat_lelah"
        );
    }

    #[test]
    fn test_strength_is_min_of_clauses() {
        let rule = Rule::new(
            vec![Clause::Sleep(SleepSet::Sedikit), Clause::Stress(StressSet::Tinggi)],
            FatigueSet::SangatLelah,
        );
        let strength = rule.strength(|clause| match clause {
            Clause::Sleep(_) => 0.8,
            _ => 0.25,
        });
        assert_eq!(strength, 0.25);
    }

    #[test]
    fn test_rejects_empty_antecedent() {
        let err = RuleBase::new(vec![Rule::new(vec![], FatigueSet::TidakLelah)]).unwrap_err();
        assert_eq!(
            err,
            FuzzyError::InvalidDefinition {
                subject: "rule 1".to_string(),
                reason: "empty antecedent".to_string(),
            }
        );
        assert!(RuleBase::new(vec![]).is_err());
    }

    #[test]
    fn test_rejects_repeated_variable() {
        let err = RuleBase::new(vec![Rule::new(
            vec![Clause::Sleep(SleepSet::Sedikit), Clause::Sleep(SleepSet::Banyak)],
            FatigueSet::TidakLelah,
        )])
        .unwrap_err();
        assert!(matches!(err, FuzzyError::InvalidDefinition { .. }));
    }

    #[test]
    fn test_clause_serializes_with_variable_tag() {
        let json = serde_json::to_value(Clause::StudyHours(StudySet::Lama)).unwrap();
        assert_eq!(json, serde_json::json!({ "variable": "studyHours", "set": "lama" }));
    }
}
