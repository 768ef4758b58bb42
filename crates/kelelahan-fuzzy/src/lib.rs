//! # kelelahan-fuzzy - student fatigue fuzzy inference
//!
//! Estimates how tired a student is from six self-reported readings using a
//! fixed Mamdani fuzzy model:
//!
//! - **Variable Model** - six input variables and one output variable, each a
//!   bounded integer domain covered by triangular fuzzy sets
//! - **Rule Base** - ten fixed rules, antecedents joined by min
//! - **Inference Engine** - fuzzify, fire rules, aggregate by max, centroid
//!
//! ## Module layout
//!
//! - [`membership`] - domains and triangular membership functions
//! - [`variable`] - fuzzy set enums, linguistic variables, the fatigue model
//! - [`rule`] - rule clauses and the fixed rule base
//! - [`engine`] - inference, traces and batch evaluation
//! - [`types`] - inputs, categories and results
//! - [`error`] - error type
//!
//! ## Example
//!
//! ```rust
//! use kelelahan_fuzzy::{Category, FatigueInputs, FuzzyEngine};
//!
//! let engine = FuzzyEngine::standard().expect("fixed tables are valid");
//! let inputs = FatigueInputs::new(10, 0, 0, 0, 0, 0);
//! let result = engine.infer(&inputs).unwrap();
//! assert_eq!(result.category, Category::TidakLelah);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod engine;
pub mod error;
pub mod membership;
pub mod rule;
pub mod types;
pub mod variable;

// ============================================================================
// Re-exports
// ============================================================================

pub use engine::{
    CurvePoint, FuzzyEngine, InferenceTrace, MembershipDegree, RuleFiring, SetActivation,
};
pub use error::{DomainBound, FuzzyError};
pub use membership::{Domain, Triangle};
pub use rule::{Clause, InputVariable, Rule, RuleBase};
pub use types::*;
pub use variable::{
    CaffeineSet, EmotionSet, FatigueModel, FatigueSet, FuzzyTerm, LinguisticVariable,
    Memberships, SleepSet, StressSet, StudySet, TaskSet,
};
