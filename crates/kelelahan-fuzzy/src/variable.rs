//! Variable Model
//!
//! Fuzzy set enums for every linguistic variable, the generic
//! [`LinguisticVariable`] and the fixed [`FatigueModel`] tables.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::FuzzyError;
use crate::membership::{Domain, Triangle};
use crate::rule::{Clause, InputVariable, RuleBase};

// ==================== Fuzzy Set Tags ====================

/// A closed set of fuzzy set names belonging to one variable.
pub trait FuzzyTerm: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every set, in declaration order.
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    /// Position in [`FuzzyTerm::ALL`].
    fn index(self) -> usize;
}

macro_rules! fuzzy_terms {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl FuzzyTerm for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn index(self) -> usize {
                self as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

fuzzy_terms! {
    /// Sets of `jam_tidur` (hours slept).
    SleepSet { Sedikit => "sedikit", Cukup => "cukup", Banyak => "banyak" }
}

fuzzy_terms! {
    /// Sets of `jumlah_tugas` (pending tasks).
    TaskSet { Sedikit => "sedikit", Sedang => "sedang", Banyak => "banyak" }
}

fuzzy_terms! {
    /// Sets of `kafein` (cups of caffeine).
    CaffeineSet { Tidak => "tidak", Sedikit => "sedikit", Banyak => "banyak" }
}

fuzzy_terms! {
    /// Sets of `stres` (self-rated stress).
    StressSet { Rendah => "rendah", Sedang => "sedang", Tinggi => "tinggi" }
}

fuzzy_terms! {
    /// Sets of `jam_belajar` (hours studied).
    StudySet { Sebentar => "sebentar", Normal => "normal", Lama => "lama" }
}

fuzzy_terms! {
    /// Sets of `emosi`, 0 = positive through 10 = negative.
    EmotionSet { Positif => "positif", Netral => "netral", Negatif => "negatif" }
}

fuzzy_terms! {
    /// Sets of the output variable `kelelahan`.
    FatigueSet {
        TidakLelah => "tidak_lelah",
        LelahRingan => "lelah_ringan",
        LelahSedang => "lelah_sedang",
        SangatLelah => "sangat_lelah",
        IstirahatSerius => "istirahat_serius",
    }
}

// ==================== Fixed Tables ====================

pub const SLEEP_DOMAIN: Domain = Domain::new(0, 10);
pub const TASK_DOMAIN: Domain = Domain::new(0, 10);
pub const CAFFEINE_DOMAIN: Domain = Domain::new(0, 5);
pub const STRESS_DOMAIN: Domain = Domain::new(0, 10);
pub const STUDY_DOMAIN: Domain = Domain::new(0, 10);
pub const EMOTION_DOMAIN: Domain = Domain::new(0, 10);
pub const FATIGUE_DOMAIN: Domain = Domain::new(0, 10);

pub const SLEEP_SETS: [(SleepSet, Triangle); 3] = [
    (SleepSet::Sedikit, Triangle::new(0.0, 0.0, 4.0)),
    (SleepSet::Cukup, Triangle::new(3.0, 5.0, 7.0)),
    (SleepSet::Banyak, Triangle::new(6.0, 10.0, 10.0)),
];

pub const TASK_SETS: [(TaskSet, Triangle); 3] = [
    (TaskSet::Sedikit, Triangle::new(0.0, 0.0, 3.0)),
    (TaskSet::Sedang, Triangle::new(2.0, 5.0, 8.0)),
    (TaskSet::Banyak, Triangle::new(7.0, 10.0, 10.0)),
];

pub const CAFFEINE_SETS: [(CaffeineSet, Triangle); 3] = [
    (CaffeineSet::Tidak, Triangle::new(0.0, 0.0, 1.0)),
    (CaffeineSet::Sedikit, Triangle::new(0.0, 2.0, 3.0)),
    (CaffeineSet::Banyak, Triangle::new(2.0, 5.0, 5.0)),
];

pub const STRESS_SETS: [(StressSet, Triangle); 3] = [
    (StressSet::Rendah, Triangle::new(0.0, 0.0, 4.0)),
    (StressSet::Sedang, Triangle::new(3.0, 5.0, 7.0)),
    (StressSet::Tinggi, Triangle::new(6.0, 10.0, 10.0)),
];

pub const STUDY_SETS: [(StudySet, Triangle); 3] = [
    (StudySet::Sebentar, Triangle::new(0.0, 0.0, 3.0)),
    (StudySet::Normal, Triangle::new(2.0, 5.0, 8.0)),
    (StudySet::Lama, Triangle::new(7.0, 10.0, 10.0)),
];

pub const EMOTION_SETS: [(EmotionSet, Triangle); 3] = [
    (EmotionSet::Positif, Triangle::new(0.0, 0.0, 3.0)),
    (EmotionSet::Netral, Triangle::new(2.0, 5.0, 8.0)),
    (EmotionSet::Negatif, Triangle::new(7.0, 10.0, 10.0)),
];

pub const FATIGUE_SETS: [(FatigueSet, Triangle); 5] = [
    (FatigueSet::TidakLelah, Triangle::new(0.0, 0.0, 2.0)),
    (FatigueSet::LelahRingan, Triangle::new(1.0, 3.0, 5.0)),
    (FatigueSet::LelahSedang, Triangle::new(4.0, 5.0, 6.0)),
    (FatigueSet::SangatLelah, Triangle::new(5.0, 7.0, 9.0)),
    (FatigueSet::IstirahatSerius, Triangle::new(8.0, 10.0, 10.0)),
];

// ==================== Linguistic Variable ====================

/// Degrees of one value against every set of a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Memberships<S> {
    degrees: Vec<f64>,
    _marker: PhantomData<S>,
}

impl<S: FuzzyTerm> Memberships<S> {
    pub fn get(&self, set: S) -> f64 {
        self.degrees[set.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, f64)> + '_ {
        S::ALL.iter().map(move |&set| (set, self.get(set)))
    }

    pub fn max(&self) -> f64 {
        self.degrees.iter().copied().fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinguisticVariable<S> {
    name: &'static str,
    domain: Domain,
    /// Indexed by [`FuzzyTerm::index`].
    sets: Vec<Triangle>,
    _marker: PhantomData<S>,
}

impl<S: FuzzyTerm> LinguisticVariable<S> {
    /// Builds a variable, requiring exactly one well-formed triangle per set
    /// and no uncovered integer in the domain.
    pub fn new(
        name: &'static str,
        domain: Domain,
        sets: &[(S, Triangle)],
    ) -> Result<Self, FuzzyError> {
        if domain.min > domain.max {
            return Err(FuzzyError::definition(
                name,
                format!("empty domain {}..={}", domain.min, domain.max),
            ));
        }
        if sets.len() != S::ALL.len() {
            return Err(FuzzyError::definition(
                name,
                format!("expected {} sets, got {}", S::ALL.len(), sets.len()),
            ));
        }

        let mut slots: Vec<Option<Triangle>> = vec![None; S::ALL.len()];
        for &(set, triangle) in sets {
            let subject = format!("{name}.{}", set.name());
            if let Some(reason) = triangle.defect(&domain) {
                return Err(FuzzyError::definition(subject, reason));
            }
            let slot = &mut slots[set.index()];
            if slot.is_some() {
                return Err(FuzzyError::definition(subject, "set defined twice"));
            }
            *slot = Some(triangle);
        }
        // Lengths match and no set repeats, so every slot is filled.
        let sets: Vec<Triangle> = slots.into_iter().flatten().collect();

        for x in domain.points() {
            let covered = sets.iter().any(|tri| tri.degree(x as f64) > 0.0);
            if !covered {
                return Err(FuzzyError::definition(
                    name,
                    format!("value {x} is not covered by any set"),
                ));
            }
        }

        Ok(Self {
            name,
            domain,
            sets,
            _marker: PhantomData,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn triangle(&self, set: S) -> Triangle {
        self.sets[set.index()]
    }

    /// Degree of `value` in `set`; out-of-domain values are rejected.
    pub fn membership(&self, set: S, value: i32) -> Result<f64, FuzzyError> {
        self.domain.check(self.name, value)?;
        Ok(self.triangle(set).degree(value as f64))
    }

    pub fn fuzzify(&self, value: i32) -> Result<Memberships<S>, FuzzyError> {
        self.domain.check(self.name, value)?;
        Ok(Memberships {
            degrees: self.sets.iter().map(|tri| tri.degree(value as f64)).collect(),
            _marker: PhantomData,
        })
    }

    /// Unchecked degree at an arbitrary point, used to sample the output curve.
    pub(crate) fn degree_at(&self, set: S, x: f64) -> f64 {
        self.triangle(set).degree(x)
    }
}

// ==================== Fatigue Model ====================

/// The immutable fuzzy model: six inputs, one output and the rule base.
///
/// Built once and shared read-only between evaluations.
#[derive(Debug, Clone)]
pub struct FatigueModel {
    sleep: LinguisticVariable<SleepSet>,
    tasks: LinguisticVariable<TaskSet>,
    caffeine: LinguisticVariable<CaffeineSet>,
    stress: LinguisticVariable<StressSet>,
    study: LinguisticVariable<StudySet>,
    emotion: LinguisticVariable<EmotionSet>,
    fatigue: LinguisticVariable<FatigueSet>,
    rules: RuleBase,
}

impl FatigueModel {
    /// The fixed student fatigue model.
    pub fn standard() -> Result<Self, FuzzyError> {
        Ok(Self {
            sleep: LinguisticVariable::new("jam_tidur", SLEEP_DOMAIN, &SLEEP_SETS)?,
            tasks: LinguisticVariable::new("jumlah_tugas", TASK_DOMAIN, &TASK_SETS)?,
            caffeine: LinguisticVariable::new("kafein", CAFFEINE_DOMAIN, &CAFFEINE_SETS)?,
            stress: LinguisticVariable::new("stres", STRESS_DOMAIN, &STRESS_SETS)?,
            study: LinguisticVariable::new("jam_belajar", STUDY_DOMAIN, &STUDY_SETS)?,
            emotion: LinguisticVariable::new("emosi", EMOTION_DOMAIN, &EMOTION_SETS)?,
            fatigue: LinguisticVariable::new("kelelahan", FATIGUE_DOMAIN, &FATIGUE_SETS)?,
            rules: RuleBase::standard()?,
        })
    }

    /// Same variables, different rules.
    pub fn with_rules(mut self, rules: RuleBase) -> Self {
        self.rules = rules;
        self
    }

    pub fn sleep(&self) -> &LinguisticVariable<SleepSet> {
        &self.sleep
    }

    pub fn tasks(&self) -> &LinguisticVariable<TaskSet> {
        &self.tasks
    }

    pub fn caffeine(&self) -> &LinguisticVariable<CaffeineSet> {
        &self.caffeine
    }

    pub fn stress(&self) -> &LinguisticVariable<StressSet> {
        &self.stress
    }

    pub fn study(&self) -> &LinguisticVariable<StudySet> {
        &self.study
    }

    pub fn emotion(&self) -> &LinguisticVariable<EmotionSet> {
        &self.emotion
    }

    pub fn fatigue(&self) -> &LinguisticVariable<FatigueSet> {
        &self.fatigue
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    pub fn input_domain(&self, variable: InputVariable) -> Domain {
        match variable {
            InputVariable::Sleep => self.sleep.domain(),
            InputVariable::Tasks => self.tasks.domain(),
            InputVariable::Caffeine => self.caffeine.domain(),
            InputVariable::Stress => self.stress.domain(),
            InputVariable::StudyHours => self.study.domain(),
            InputVariable::Emotion => self.emotion.domain(),
        }
    }

    /// Degree of `value` in the input set named by `clause`.
    pub fn membership(&self, clause: Clause, value: i32) -> Result<f64, FuzzyError> {
        match clause {
            Clause::Sleep(set) => self.sleep.membership(set, value),
            Clause::Tasks(set) => self.tasks.membership(set, value),
            Clause::Caffeine(set) => self.caffeine.membership(set, value),
            Clause::Stress(set) => self.stress.membership(set, value),
            Clause::StudyHours(set) => self.study.membership(set, value),
            Clause::Emotion(set) => self.emotion.membership(set, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> FatigueModel {
        FatigueModel::standard().expect("fixed tables are valid")
    }

    fn assert_bounds<S: FuzzyTerm>(var: &LinguisticVariable<S>) {
        let domain = var.domain();
        for &set in S::ALL {
            let tri = var.triangle(set);
            for x in domain.points() {
                let degree = var.membership(set, x).unwrap();
                assert!((0.0..=1.0).contains(&degree), "{}.{set:?} at {x}", var.name());
            }
            assert_eq!(tri.degree(tri.peak), 1.0, "{}.{set:?} peak", var.name());
            if tri.left < tri.peak {
                assert_eq!(tri.degree(tri.left), 0.0);
            }
            if tri.peak < tri.right {
                assert_eq!(tri.degree(tri.right), 0.0);
            }
            assert_eq!(tri.degree(tri.left - 1.0), 0.0);
            assert_eq!(tri.degree(tri.right + 1.0), 0.0);
        }
    }

    fn assert_covered<S: FuzzyTerm>(var: &LinguisticVariable<S>) {
        for x in var.domain().points() {
            let memberships = var.fuzzify(x).unwrap();
            assert!(memberships.max() > 0.0, "{} has a gap at {x}", var.name());
        }
    }

    #[test]
    fn test_membership_bounds_for_all_variables() {
        let m = model();
        assert_bounds(m.sleep());
        assert_bounds(m.tasks());
        assert_bounds(m.caffeine());
        assert_bounds(m.stress());
        assert_bounds(m.study());
        assert_bounds(m.emotion());
        assert_bounds(m.fatigue());
    }

    #[test]
    fn test_every_domain_is_covered() {
        let m = model();
        assert_covered(m.sleep());
        assert_covered(m.tasks());
        assert_covered(m.caffeine());
        assert_covered(m.stress());
        assert_covered(m.study());
        assert_covered(m.emotion());
        assert_covered(m.fatigue());
    }

    #[test]
    fn test_table_breakpoints() {
        let m = model();
        assert_eq!(m.caffeine().domain(), Domain::new(0, 5));
        assert_eq!(
            m.caffeine().triangle(CaffeineSet::Sedikit),
            Triangle::new(0.0, 2.0, 3.0)
        );
        assert_eq!(
            m.fatigue().triangle(FatigueSet::LelahSedang),
            Triangle::new(4.0, 5.0, 6.0)
        );
        assert_eq!(m.sleep().name(), "jam_tidur");
    }

    #[test]
    fn test_membership_through_clause() {
        let m = model();
        assert_eq!(m.membership(Clause::Sleep(SleepSet::Cukup), 6).unwrap(), 0.5);
        assert_eq!(m.membership(Clause::Caffeine(CaffeineSet::Sedikit), 1).unwrap(), 0.5);
        assert_eq!(m.membership(Clause::Caffeine(CaffeineSet::Sedikit), 0).unwrap(), 0.0);
        assert!(m.membership(Clause::Sleep(SleepSet::Sedikit), 15).is_err());
        assert!(m.membership(Clause::Caffeine(CaffeineSet::Banyak), 6).is_err());
    }

    #[test]
    fn test_fuzzify_lists_sets_in_order() {
        let m = model();
        let degrees: Vec<(StressSet, f64)> = m.stress().fuzzify(7).unwrap().iter().collect();
        assert_eq!(
            degrees,
            vec![
                (StressSet::Rendah, 0.0),
                (StressSet::Sedang, 0.0),
                (StressSet::Tinggi, 0.25),
            ]
        );
    }

    #[test]
    fn test_rejects_unordered_breakpoints() {
        let err = LinguisticVariable::new(
            "jam_tidur",
            SLEEP_DOMAIN,
            &[
                (SleepSet::Sedikit, Triangle::new(0.0, 0.0, 4.0)),
                (SleepSet::Cukup, Triangle::new(6.0, 5.0, 7.0)),
                (SleepSet::Banyak, Triangle::new(6.0, 10.0, 10.0)),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FuzzyError::InvalidDefinition { ref subject, .. } if subject == "jam_tidur.cukup"
        ));
    }

    #[test]
    fn test_rejects_missing_and_duplicate_sets() {
        let missing = LinguisticVariable::new(
            "kafein",
            CAFFEINE_DOMAIN,
            &[(CaffeineSet::Tidak, Triangle::new(0.0, 0.0, 5.0))],
        );
        assert!(missing.is_err());

        let duplicate = LinguisticVariable::new(
            "kafein",
            CAFFEINE_DOMAIN,
            &[
                (CaffeineSet::Tidak, Triangle::new(0.0, 0.0, 1.0)),
                (CaffeineSet::Tidak, Triangle::new(0.0, 2.0, 3.0)),
                (CaffeineSet::Banyak, Triangle::new(2.0, 5.0, 5.0)),
            ],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_rejects_domain_gap() {
        let err = LinguisticVariable::new(
            "stres",
            STRESS_DOMAIN,
            &[
                (StressSet::Rendah, Triangle::new(0.0, 0.0, 2.0)),
                (StressSet::Sedang, Triangle::new(4.0, 5.0, 6.0)),
                (StressSet::Tinggi, Triangle::new(8.0, 10.0, 10.0)),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            FuzzyError::InvalidDefinition {
                subject: "stres".to_string(),
                reason: "value 2 is not covered by any set".to_string(),
            }
        );
    }

    #[test]
    fn test_set_names_serialize_as_snake_case() {
        let json = serde_json::to_string(&FatigueSet::IstirahatSerius).unwrap();
        assert_eq!(json, "\"istirahat_serius\"");
        assert_eq!(FatigueSet::LelahRingan.to_string(), "lelah_ringan");
    }
}
