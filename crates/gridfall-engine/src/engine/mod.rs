//! Game orchestration: the state machine, gravity timing, and the injectable
//! collaborators (piece selection, score persistence).

pub use self::{clock::*, game::*, score_store::*, shape_source::*};

mod clock;
mod game;
mod score_store;
mod shape_source;
