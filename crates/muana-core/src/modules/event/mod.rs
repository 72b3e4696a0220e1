mod model;
mod parser;

pub use model::{BeamSpot, CandidateTrack, EventRecord, RecoCandidate, TruthParticle, Vertex};
pub use parser::{EVENT_FILE_HEADER_KEY, EventReader};
