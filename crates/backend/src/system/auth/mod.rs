pub mod extractor;
pub mod middleware;
