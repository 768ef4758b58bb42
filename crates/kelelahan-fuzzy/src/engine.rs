//! Inference Engine
//!
//! Mamdani max-min inference over the fixed [`FatigueModel`]:
//!
//! 1. fuzzify every reading against its own sets
//! 2. fire each rule with the min of its clause degrees
//! 3. per output set, keep the max firing strength of the rules targeting it
//! 4. clip each output set at that level, union by max, and take the centre
//!    of gravity of the curve sampled at every integer of the output domain
//!
//! When nothing fires the curve is flat zero; the engine then returns the
//! output domain midpoint and marks the result inconclusive.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::FuzzyError;
use crate::rule::{Clause, InputVariable};
use crate::types::{Category, FatigueInputs, InferenceResult};
use crate::variable::{
    CaffeineSet, EmotionSet, FatigueModel, FatigueSet, FuzzyTerm, Memberships, SleepSet,
    StressSet, StudySet, TaskSet,
};

// ==================== Trace Types ====================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipDegree {
    pub variable: &'static str,
    pub set: &'static str,
    pub degree: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleFiring {
    /// 1-based position in the rule base
    pub index: usize,
    pub rule: String,
    pub consequent: FatigueSet,
    pub strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActivation {
    pub set: FatigueSet,
    pub level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    pub x: f64,
    pub membership: f64,
}

/// Every intermediate value of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceTrace {
    pub result: InferenceResult,
    pub memberships: Vec<MembershipDegree>,
    pub rules: Vec<RuleFiring>,
    pub activations: Vec<SetActivation>,
    pub curve: Vec<CurvePoint>,
}

// ==================== Engine ====================

struct Fuzzified {
    sleep: Memberships<SleepSet>,
    tasks: Memberships<TaskSet>,
    caffeine: Memberships<CaffeineSet>,
    stress: Memberships<StressSet>,
    study: Memberships<StudySet>,
    emotion: Memberships<EmotionSet>,
}

impl Fuzzified {
    fn degree(&self, clause: Clause) -> f64 {
        match clause {
            Clause::Sleep(set) => self.sleep.get(set),
            Clause::Tasks(set) => self.tasks.get(set),
            Clause::Caffeine(set) => self.caffeine.get(set),
            Clause::Stress(set) => self.stress.get(set),
            Clause::StudyHours(set) => self.study.get(set),
            Clause::Emotion(set) => self.emotion.get(set),
        }
    }

    fn degrees(&self) -> Vec<MembershipDegree> {
        fn push<S: FuzzyTerm>(
            out: &mut Vec<MembershipDegree>,
            variable: InputVariable,
            memberships: &Memberships<S>,
        ) {
            out.extend(memberships.iter().map(|(set, degree)| MembershipDegree {
                variable: variable.name(),
                set: set.name(),
                degree,
            }));
        }

        let mut out = Vec::with_capacity(18);
        push(&mut out, InputVariable::Sleep, &self.sleep);
        push(&mut out, InputVariable::Tasks, &self.tasks);
        push(&mut out, InputVariable::Caffeine, &self.caffeine);
        push(&mut out, InputVariable::Stress, &self.stress);
        push(&mut out, InputVariable::StudyHours, &self.study);
        push(&mut out, InputVariable::Emotion, &self.emotion);
        out
    }
}

struct Evaluation {
    fuzzified: Fuzzified,
    strengths: Vec<f64>,
    activation: Vec<f64>,
    curve: Vec<CurvePoint>,
    result: InferenceResult,
}

/// Stateless evaluator holding a read-only model.
///
/// `FuzzyEngine` is `Send + Sync`; share it behind an `Arc` or a reference.
#[derive(Debug, Clone)]
pub struct FuzzyEngine {
    model: FatigueModel,
}

impl FuzzyEngine {
    pub fn new(model: FatigueModel) -> Self {
        Self { model }
    }

    /// Engine over the fixed student fatigue model.
    pub fn standard() -> Result<Self, FuzzyError> {
        Ok(Self::new(FatigueModel::standard()?))
    }

    pub fn model(&self) -> &FatigueModel {
        &self.model
    }

    /// Crisp score and category for one set of readings.
    pub fn infer(&self, inputs: &FatigueInputs) -> Result<InferenceResult, FuzzyError> {
        self.evaluate(inputs).map(|evaluation| evaluation.result)
    }

    /// Like [`FuzzyEngine::infer`], keeping every intermediate value.
    pub fn infer_traced(&self, inputs: &FatigueInputs) -> Result<InferenceTrace, FuzzyError> {
        let evaluation = self.evaluate(inputs)?;

        let rules = self
            .model
            .rules()
            .iter()
            .zip(&evaluation.strengths)
            .enumerate()
            .map(|(i, (rule, &strength))| RuleFiring {
                index: i + 1,
                rule: rule.to_string(),
                consequent: rule.consequent(),
                strength,
            })
            .collect();

        let activations = FatigueSet::ALL
            .iter()
            .map(|&set| SetActivation {
                set,
                level: evaluation.activation[set.index()],
            })
            .collect();

        Ok(InferenceTrace {
            result: evaluation.result,
            memberships: evaluation.fuzzified.degrees(),
            rules,
            activations,
            curve: evaluation.curve,
        })
    }

    /// Evaluates many readings in parallel; results keep the input order.
    pub fn infer_batch(
        &self,
        inputs: &[FatigueInputs],
    ) -> Vec<Result<InferenceResult, FuzzyError>> {
        inputs.par_iter().map(|input| self.infer(input)).collect()
    }

    fn evaluate(&self, inputs: &FatigueInputs) -> Result<Evaluation, FuzzyError> {
        let fuzzified = self.fuzzify(inputs)?;

        let strengths: Vec<f64> = self
            .model
            .rules()
            .iter()
            .map(|rule| rule.strength(|clause| fuzzified.degree(clause)))
            .collect();

        let mut activation = vec![0.0_f64; FatigueSet::ALL.len()];
        for (i, (rule, &strength)) in self.model.rules().iter().zip(&strengths).enumerate() {
            if strength <= 0.0 {
                continue;
            }
            tracing::debug!(rule = i + 1, strength, consequent = %rule.consequent(), "rule fired");
            let slot = &mut activation[rule.consequent().index()];
            *slot = slot.max(strength);
        }

        let curve = self.aggregate(&activation);
        let result = match centroid(&curve) {
            Some(score) => InferenceResult {
                score,
                category: Category::from_score(score),
                inconclusive: false,
            },
            None => {
                let score = self.model.fatigue().domain().midpoint();
                tracing::warn!(?inputs, fallback = score, "no rule fired, returning domain midpoint");
                InferenceResult {
                    score,
                    category: Category::from_score(score),
                    inconclusive: true,
                }
            }
        };

        Ok(Evaluation {
            fuzzified,
            strengths,
            activation,
            curve,
            result,
        })
    }

    fn fuzzify(&self, inputs: &FatigueInputs) -> Result<Fuzzified, FuzzyError> {
        let m = &self.model;
        Ok(Fuzzified {
            sleep: m.sleep().fuzzify(inputs.sleep)?,
            tasks: m.tasks().fuzzify(inputs.tasks)?,
            caffeine: m.caffeine().fuzzify(inputs.caffeine)?,
            stress: m.stress().fuzzify(inputs.stress)?,
            study: m.study().fuzzify(inputs.study_hours)?,
            emotion: m.emotion().fuzzify(inputs.emotion)?,
        })
    }

    /// Union of the clipped output sets at each integer of the output domain.
    fn aggregate(&self, activation: &[f64]) -> Vec<CurvePoint> {
        let fatigue = self.model.fatigue();
        fatigue
            .domain()
            .points()
            .map(|x| {
                let x = x as f64;
                let membership = FatigueSet::ALL
                    .iter()
                    .map(|&set| activation[set.index()].min(fatigue.degree_at(set, x)))
                    .fold(0.0, f64::max);
                CurvePoint { x, membership }
            })
            .collect()
    }
}

/// Centre of gravity of sampled points, `None` when the curve has no mass.
fn centroid(curve: &[CurvePoint]) -> Option<f64> {
    let (moment, mass) = curve.iter().fold((0.0, 0.0), |(moment, mass), p| {
        (moment + p.x * p.membership, mass + p.membership)
    });
    if mass <= 0.0 {
        return None;
    }
    Some(moment / mass)
}
