pub mod extractor;
pub mod form;
pub mod session;
pub mod test_utils;
