pub mod access_key_logic;
pub mod search_logic;
