/**
 * Token Issuance and Verification
 *
 * This module mints and verifies the two JWT kinds of the session
 * lifecycle:
 *
 * - access tokens: 15 minutes, claims `sub` (user id) and optionally
 *   `role`. Login-issued access tokens carry the role; refresh-minted
 *   ones are subject-only. Verified statelessly by signature and expiry.
 * - refresh tokens: 7 days, `sub` plus a unique `jti`, signed with a
 *   separate secret. Their stored row, not the signature alone, decides
 *   validity.
 *
 * All secrets and lifetimes come from an `AuthConfig` passed in at
 * construction; there are no ambient environment lookups at call sites.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Role;

/// Signing secrets and token lifetimes.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access-token lifetime in seconds (15 minutes by default).
    pub access_ttl_secs: i64,
    /// Refresh-token lifetime in seconds (7 days by default).
    pub refresh_ttl_secs: i64,
}

pub const ACCESS_TTL_SECS: i64 = 15 * 60;
pub const REFRESH_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims carried by an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User ID
    pub sub: String,
    /// Role claim; present on login-issued tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Claims carried by a refresh token
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// User ID
    pub sub: String,
    /// Unique token id. Timestamps have second resolution, so without it
    /// two tokens minted in the same second for the same user would be
    /// byte-identical and collide in the store.
    pub jti: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl AccessClaims {
    /// Parse the subject back into a user id.
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

impl RefreshClaims {
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Stateless issuer and verifier for access/refresh token pairs.
#[derive(Clone)]
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_ref()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_ref()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_ref()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_ref()),
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
        }
    }

    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl_secs
    }

    pub fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_ttl_secs
    }

    /// Create an access token for a user.
    ///
    /// `role` is included for login-issued tokens and omitted for tokens
    /// minted during refresh rotation.
    pub fn issue_access(
        &self,
        user_id: Uuid,
        role: Option<Role>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: user_id.to_string(),
            role,
            exp: now + self.access_ttl_secs,
            iat: now,
        };

        encode(&Header::default(), &claims, &self.access_encoding)
    }

    /// Create a refresh token for a user.
    ///
    /// Returns the signed token together with its expiry timestamp so the
    /// caller can persist the matching store row.
    pub fn issue_refresh(
        &self,
        user_id: Uuid,
    ) -> Result<(String, chrono::DateTime<Utc>), jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::seconds(self.refresh_ttl_secs);
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.refresh_encoding)?;
        Ok((token, expires_at))
    }

    /// Verify and decode an access token (signature + expiry).
    pub fn verify_access(
        &self,
        token: &str,
    ) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
        let validation = Validation::default();
        let data = decode::<AccessClaims>(token, &self.access_decoding, &validation)?;
        Ok(data.claims)
    }

    /// Verify and decode a refresh token (signature + expiry).
    pub fn verify_refresh(
        &self,
        token: &str,
    ) -> Result<RefreshClaims, jsonwebtoken::errors::Error> {
        let validation = Validation::default();
        let data = decode::<RefreshClaims>(token, &self.refresh_decoding, &validation)?;
        Ok(data.claims)
    }
}
