pub mod dignities;
pub mod rulers;
pub mod tables;
pub mod types;
pub mod zodiac;

pub use dignities::{
    dignities_of, dignity_points, dignity_weight, rulers_at, DegreeRulers, DignityLabel,
    DignityReport, EssentialState, ParseLabelError,
};
pub use rulers::{domicile_ruler, exaltation_ruler};
pub use tables::{face_ruler, term_ruler, triplicity_ruler, Bound};
pub use types::Sect;
pub use zodiac::{
    angular_separation, degree_in_sign, normalize_degrees, sign_of, signed_difference, Element,
    Modality, Sign,
};
