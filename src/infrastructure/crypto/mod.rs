use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine as _;
use rand::RngCore;
use sha2::{Digest, Sha256};

const SEALED_PREFIX: &str = "v1:";

fn derive_key(secret: &str) -> Key<Aes256Gcm> {
    let digest = Sha256::digest(secret.as_bytes());
    *Key::<Aes256Gcm>::from_slice(&digest)
}

/// Seals a secret (GitHub access token) as `v1:<nonce b64>:<ciphertext b64>`.
pub fn encrypt_string(secret: &str, plaintext: &str) -> anyhow::Result<String> {
    let cipher = Aes256Gcm::new(&derive_key(secret));
    let mut nonce_bytes = [0u8; 12];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);
    let ct = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| anyhow::anyhow!("encrypt failed: {}", e))?;
    let b64 = base64::engine::general_purpose::STANDARD;
    Ok(format!(
        "{SEALED_PREFIX}{}:{}",
        b64.encode(nonce_bytes),
        b64.encode(ct)
    ))
}

pub fn decrypt_string(secret: &str, sealed: &str) -> anyhow::Result<String> {
    let rest = sealed
        .strip_prefix(SEALED_PREFIX)
        .ok_or_else(|| anyhow::anyhow!("stored token is not sealed"))?;
    let (n_b64, c_b64) = rest
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("invalid sealed token format"))?;
    let b64 = base64::engine::general_purpose::STANDARD;
    let nonce_bytes = b64
        .decode(n_b64)
        .map_err(|e| anyhow::anyhow!("b64 decode nonce: {}", e))?;
    if nonce_bytes.len() != 12 {
        anyhow::bail!("invalid nonce length");
    }
    let ct_bytes = b64
        .decode(c_b64)
        .map_err(|e| anyhow::anyhow!("b64 decode ct: {}", e))?;
    let cipher = Aes256Gcm::new(&derive_key(secret));
    let pt = cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), ct_bytes.as_ref())
        .map_err(|e| anyhow::anyhow!("decrypt failed: {}", e))?;
    Ok(String::from_utf8(pt)?)
}
