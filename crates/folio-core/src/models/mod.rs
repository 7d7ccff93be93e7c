pub mod author;
pub mod galley;
pub mod issue;
pub mod journal;
pub mod publication;
pub mod section;
pub mod submission;

pub use author::*;
pub use galley::*;
pub use issue::*;
pub use journal::*;
pub use publication::*;
pub use section::*;
pub use submission::*;
