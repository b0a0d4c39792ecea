pub mod constants;
pub mod gluex;
