pub mod alcochoden;
pub mod hyleg;
pub mod types;

pub use alcochoden::{planetary_years, resolve_alcochoden, resolve_alcochoden_with};
pub use hyleg::{evaluate_candidate, is_hylegical_place, resolve_hyleg, resolve_hyleg_with, PROROGATORY_BODIES};
pub use types::{
    Alcochoden, AlcochodenCandidate, AlcochodenResult, AlcochodenStatus, CandidateEvaluation,
    CandidateStatus, Hyleg, HylegCandidate, HylegResult, PointPlacement, QualificationRule,
    QualifyingAspect, YearsModifier, YearsTier,
};
