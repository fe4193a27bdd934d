pub mod book;
pub mod errors;
pub mod member;
pub mod receipt;
pub mod value_objects;

pub use book::*;
pub use errors::*;
pub use member::*;
pub use receipt::*;
pub use value_objects::*;
