/// Mapping of domain errors to HTTP error pages
pub mod error_handling;
/// One-shot flash messages carried between a form submission and the next page
pub mod flash;
