pub mod ast;
pub mod emitters;
pub mod generator;

pub use generator::GoGenerator;
