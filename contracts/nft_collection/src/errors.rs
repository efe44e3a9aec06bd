/// All panic messages used by the nft_collection contract.
///
/// Using string constants avoids typos in `#[should_panic(expected = "...")]` tests.
pub const ERR_ALREADY_INITIALIZED: &str = "already initialized";
pub const ERR_NOT_INITIALIZED: &str = "not initialized";
pub const ERR_NO_TOKEN: &str = "token does not exist";
pub const ERR_NOT_TOKEN_OWNER: &str = "from is not the token owner";
pub const ERR_NOT_OWNER_NOR_APPROVED: &str = "caller is not owner nor approved";
pub const ERR_ID_OVERFLOW: &str = "token id overflow";
