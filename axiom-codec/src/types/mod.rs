/// Rust native types, bytes based
pub mod native;
