pub mod file;
pub mod helpers;
pub mod imports;
pub mod modifiers;
