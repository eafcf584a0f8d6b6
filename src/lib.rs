// Library exports for the binary and integration tests
pub mod filter;
pub mod list;
pub mod logging;
pub mod paging;
pub mod render;
pub mod selection;
pub mod session;
pub mod store;
pub mod summary;
pub mod timeunit;
