mod criteria;
pub use self::criteria::{Criteria, Operator, QueryField};

mod search;
pub use self::search::{SearchQuery, MAX_ROWS_PER_QUERY};
