pub mod description;
pub mod evaluation;
pub mod listing;

pub use description::{Description, RelatedListing};
pub use evaluation::{Evaluation, RankedReport};
pub use listing::ListingRef;
