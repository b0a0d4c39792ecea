// https://docs.gluex.xyz/api-reference/router-api/post-quote
pub const GLUEX_BASE_API_URL: &str = "https://router.gluex.xyz";
pub const GLUEX_QUOTE_PATH: &str = "/v1/quote";
