pub mod hyperlend;
pub mod openai;
