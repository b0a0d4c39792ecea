pub mod number_conversion;
