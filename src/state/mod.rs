mod history;
mod persistence;
mod session;

pub use history::{PlanRecord, SavedPlan, HISTORY_LIMIT};
pub use persistence::{builtin_catalog, load_catalog, save_catalog};
pub use session::{Screen, Session, SessionStore};
