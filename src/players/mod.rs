pub mod base;
pub mod random;

pub use base::Participant;
pub use random::RandomParticipant;
