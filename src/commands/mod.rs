pub mod convert;
pub mod docs;
pub mod new;
pub mod search;
pub mod stats;
pub mod validate;
