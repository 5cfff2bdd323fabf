use openssl::{base64::encode_block, rand::rand_bytes, sha::sha256};
use regex::Regex;

/// Replace control characters (newlines, tabs, ...) with a space
pub fn blank_control_characters(s: &str) -> String
{
    match Regex::new(r"[\u0000-\u001F\u007F]")
    {
        Ok(re) => re.replace_all(s, " ").to_string(),
        Err(e) =>
        {
            crate::debug(format!("control character regex failed, {}", e), None);
            s.to_string()
        }
    }
}

/// Base64 with the url safe alphabet and no padding (RFC 7636)
pub fn base64_url(bytes: &[u8]) -> String
{
    encode_block(bytes)
        .replace('+', "-")
        .replace('/', "_")
        .trim_end_matches('=')
        .to_string()
}

/// Hex encoded openssl random bytes, 2*n characters long
pub fn random_hex(n: usize) -> Option<String>
{
    let mut buf = vec![0u8; n];
    match rand_bytes(&mut buf)
    {
        Ok(_) => Some(hex::encode(buf)),
        Err(e) =>
        {
            crate::debug(format!("openssl rand_bytes failed, {}", e), None);
            None
        }
    }
}

/// S256 code challenge for a PKCE code verifier
pub fn code_challenge(verifier: &str) -> String
{
    base64_url(&sha256(verifier.as_bytes()))
}
