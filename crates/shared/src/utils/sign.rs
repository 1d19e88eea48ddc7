use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Agent request signature: hex HMAC-SHA256 of `payload` followed by the unix timestamp.
pub fn create_sign(secret: &str, payload: &str, timestamp: i64) -> String {
    // HMAC accepts keys of any length, including empty.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };

    mac.update(payload.as_bytes());
    mac.update(timestamp.to_string().as_bytes());

    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_deterministic() {
        let a = create_sign("secret", "agentplayer1pass", 1_700_000_000);
        let b = create_sign("secret", "agentplayer1pass", 1_700_000_000);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn signature_covers_payload_and_time() {
        let base = create_sign("secret", "agentplayer1100", 1_700_000_000);
        assert_ne!(base, create_sign("secret", "agentplayer1101", 1_700_000_000));
        assert_ne!(base, create_sign("secret", "agentplayer1100", 1_700_000_001));
        assert_ne!(base, create_sign("other", "agentplayer1100", 1_700_000_000));
    }
}
