// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication: password login and stateless bearer tokens.
//!
//! Tokens are HS256 JWTs signed with a server secret. Nothing about a token
//! is stored; each request resolves its token back to a fresh user row.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use phonedesk_persistence::{Persistence, UserData};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// The `token_type` reported to clients.
pub const TOKEN_TYPE: &str = "bearer";

/// Default token lifetime in minutes.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Signing configuration for bearer tokens.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    ttl: Duration,
}

impl TokenConfig {
    /// Creates a token configuration.
    #[must_use]
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Creates a token configuration with the default lifetime.
    #[must_use]
    pub fn with_default_ttl(secret: impl Into<String>) -> Self {
        Self::new(secret, Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES))
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Claims carried by every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The user's `user_name`.
    pub sub: String,
    /// The user's type id at issue time.
    pub user_type: i64,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// A user resolved from valid credentials or a valid token.
///
/// Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub user_name: String,
    pub name: String,
    pub email: String,
    pub user_type_id: i64,
}

impl From<&UserData> for AuthenticatedUser {
    fn from(user: &UserData) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            user_type_id: user.user_type_id,
        }
    }
}

/// Credential and token service.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Verifies a username and password and issues a token.
    ///
    /// # Returns
    ///
    /// A tuple of (`access_token`, `authenticated_user`)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No user has this `user_name` (exact match)
    /// - The password does not match
    /// - Signing the token fails
    pub fn authenticate(
        persistence: &mut Persistence,
        tokens: &TokenConfig,
        user_name: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedUser), AuthError> {
        let user: UserData = persistence
            .get_user_by_user_name(user_name)?
            .ok_or_else(|| {
                warn!(user_name, "Login for unknown user");
                AuthError::UserNotFound {
                    user_name: user_name.to_string(),
                }
            })?;

        if !persistence.verify_password(password, &user.password_hash)? {
            warn!(user_name, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let authenticated: AuthenticatedUser = AuthenticatedUser::from(&user);
        let token: String = Self::issue_token(tokens, &authenticated)?;

        info!(user_id = authenticated.id, user_name, "User logged in");
        Ok((token, authenticated))
    }

    /// Issues a token for a user, valid from now.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn issue_token(
        tokens: &TokenConfig,
        user: &AuthenticatedUser,
    ) -> Result<String, AuthError> {
        Self::issue_token_at(tokens, user, OffsetDateTime::now_utc())
    }

    /// Issues a token as if the current time were `issued_at`.
    pub(crate) fn issue_token_at(
        tokens: &TokenConfig,
        user: &AuthenticatedUser,
        issued_at: OffsetDateTime,
    ) -> Result<String, AuthError> {
        let claims: Claims = Claims {
            sub: user.user_name.clone(),
            user_type: user.user_type_id,
            iat: issued_at.unix_timestamp(),
            exp: (issued_at + tokens.ttl).unix_timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &tokens.encoding_key(),
        )
        .map_err(|e| AuthError::TokenIssueFailed {
            reason: e.to_string(),
        })
    }

    /// Verifies a token's signature and expiry and returns its claims.
    ///
    /// Expiry is checked with zero leeway.
    ///
    /// # Errors
    ///
    /// Returns `TokenExpired` for a well-signed token past its expiry and
    /// `TokenInvalid` for anything else that fails verification.
    pub fn decode_token(tokens: &TokenConfig, token: &str) -> Result<Claims, AuthError> {
        let mut validation: Validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &tokens.decoding_key(), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid {
                    reason: e.to_string(),
                },
            })
    }

    /// Resolves a bearer token to the current user row.
    ///
    /// # Errors
    ///
    /// Returns an error if the token does not verify or its user no longer exists.
    pub fn resolve(
        persistence: &mut Persistence,
        tokens: &TokenConfig,
        token: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let claims: Claims = Self::decode_token(tokens, token).inspect_err(|e| {
            debug!(error = %e, "Rejected bearer token");
        })?;

        let user: UserData = persistence
            .get_user_by_user_name(&claims.sub)?
            .ok_or_else(|| {
                warn!(user_name = %claims.sub, "Token for a user that no longer exists");
                AuthError::UserNotFound {
                    user_name: claims.sub.clone(),
                }
            })?;

        Ok(AuthenticatedUser::from(&user))
    }
}
