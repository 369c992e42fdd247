pub use self::{projection::ProjectionRecord, rating_table::RatingTable};

mod projection;
mod rating_table;
