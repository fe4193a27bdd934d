mod demo;
mod errors;
mod library_service;

pub use demo::demo_service;
pub use errors::{LibraryError, Result};
pub use library_service::{
    InMemoryLibraryService, LibraryService, MAX_PAGE_SIZE, MIN_PAGE_SIZE, SEARCH_WILDCARD,
};
