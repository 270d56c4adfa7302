pub mod history;
pub mod issue;

pub use history::*;
pub use issue::*;
