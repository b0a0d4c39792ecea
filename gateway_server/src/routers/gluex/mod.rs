pub mod gluex;
pub mod requests;
pub mod responses;
