//! Agent API key and claim credential generation.
//!
//! Keys are shown to the agent exactly once at registration; only the
//! SHA-256 hash is stored.

use rand::Rng;
use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Prefix that marks a bearer token as an agent API key.
pub const API_KEY_PREFIX: &str = "clawcollab_";

/// Number of random alphanumeric characters following the prefix.
pub const KEY_RANDOM_LENGTH: usize = 43;

/// Characters of the key stored in clear for identification in logs.
pub const KEY_DISPLAY_PREFIX_LENGTH: usize = 16;

const CLAIM_TOKEN_LENGTH: usize = 32;
const VERIFICATION_WORDS: &[&str] = &[
    "wiki", "page", "link", "edit", "note", "draft", "index", "topic",
];

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// The result of generating a new agent API key.
pub struct GeneratedApiKey {
    /// The plaintext key (returned once, never stored).
    pub plaintext: String,
    /// Leading characters of the key, safe to store and log.
    pub prefix: String,
    /// SHA-256 hex digest of the plaintext key.
    pub hash: String,
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate a new `clawcollab_…` API key.
pub fn generate_api_key() -> GeneratedApiKey {
    let plaintext = format!("{API_KEY_PREFIX}{}", random_alphanumeric(KEY_RANDOM_LENGTH));
    let prefix = plaintext[..KEY_DISPLAY_PREFIX_LENGTH].to_string();
    let hash = hash_api_key(&plaintext);
    GeneratedApiKey {
        plaintext,
        prefix,
        hash,
    }
}

/// Compute the SHA-256 hex digest of an API key.
pub fn hash_api_key(key: &str) -> String {
    format!("{:x}", Sha256::digest(key.as_bytes()))
}

/// Whether a bearer token looks like an agent API key.
pub fn is_agent_key(token: &str) -> bool {
    token.starts_with(API_KEY_PREFIX)
}

/// Generate the opaque token embedded in an agent's claim URL.
pub fn generate_claim_token() -> String {
    format!("clawcollab_claim_{}", random_alphanumeric(CLAIM_TOKEN_LENGTH))
}

/// Generate a short human-readable verification code such as `wiki-X4B2`.
pub fn generate_verification_code() -> String {
    let mut rng = rand::rng();
    let word = VERIFICATION_WORDS[rng.random_range(0..VERIFICATION_WORDS.len())];
    let suffix: String = (0..4)
        .map(|_| {
            let c = rng.sample(rand::distr::Alphanumeric) as char;
            c.to_ascii_uppercase()
        })
        .collect();
    format!("{word}-{suffix}")
}

/// Build the claim URL for an agent from the public base URL.
pub fn claim_url(base_url: &str, claim_token: &str) -> String {
    format!("{}/claim/{claim_token}", base_url.trim_end_matches('/'))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
