pub mod mentality;
pub mod temperament;

pub use mentality::{compute_mentality, MentalityAxis, MentalityResult, MentalityType, ScoreContribution};
pub use temperament::{
    compute_temperament, lord_of_nativity, Qualities, QualityScores, Temperament,
    TemperamentFactor, TemperamentFactorKind, TemperamentResult,
};
