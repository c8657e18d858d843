mod methods;
mod transitions;
mod types;


pub use types::{Deal, DealDraft, DealPatch, DealStage, ProbabilityBand};
