mod team;

pub use team::{Team, TeamDraft, TeamId};
