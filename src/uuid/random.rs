use ::uuid::Uuid;

use crate::base64;

/// Bytes in a random UUID
pub const RAW_LEN: usize = 16;

/// Generator of random (version 4, RFC 4122 variant) UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUuidGenerator;

impl RandomUuidGenerator {
    pub const fn new() -> Self {
        Self
    }

    /// 16 random bytes with the version and variant bits set
    pub fn generate_raw(&self) -> [u8; RAW_LEN] {
        *Uuid::new_v4().as_bytes()
    }

    /// Compact form: 22 characters of unpadded URL-safe Base64
    pub fn generate(&self) -> String {
        base64::encode(&self.generate_raw())
    }

    /// Canonical form, e.g. `1b4e28ba-2fa1-41d2-883f-0016d3cca427`
    pub fn generate_hyphenated(&self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}
