use crate::errors::ServiceError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminClaims {
    #[serde(default)]
    pub admin_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: usize,
}

impl AdminClaims {
    pub fn has_identity(&self) -> bool {
        self.admin_id.is_some() || self.username.is_some() || self.role.is_some()
    }

    pub fn admin_id(&self) -> i64 {
        self.admin_id.unwrap_or_default()
    }

    pub fn username(&self) -> String {
        self.username.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberClaims {
    pub user_id: i64,
    pub exp: usize,
}

#[derive(Clone)]
pub struct JwtConfig {
    admin_secret: String,
    member_secret: String,
}

impl JwtConfig {
    pub fn new(admin_secret: &str, member_secret: &str) -> Self {
        Self {
            admin_secret: admin_secret.to_string(),
            member_secret: member_secret.to_string(),
        }
    }

    pub fn verify_admin(&self, token: &str) -> Result<AdminClaims, ServiceError> {
        let data = decode::<AdminClaims>(
            token,
            &DecodingKey::from_secret(self.admin_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| {
            warn!("rejected admin token: {e}");
            ServiceError::Unauthorized
        })?;

        if !data.claims.has_identity() {
            return Err(ServiceError::Unauthorized);
        }

        Ok(data.claims)
    }

    pub fn verify_member(&self, token: &str) -> Result<MemberClaims, ServiceError> {
        decode::<MemberClaims>(
            token,
            &DecodingKey::from_secret(self.member_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            warn!("rejected member token: {e}");
            ServiceError::Unauthorized
        })
    }

    pub fn sign_admin(&self, claims: &AdminClaims) -> Result<String, ServiceError> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.admin_secret.as_bytes()),
        )
        .map_err(|e| ServiceError::Storage(format!("failed to sign token: {e}")))
    }

    pub fn sign_member(&self, claims: &MemberClaims) -> Result<String, ServiceError> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.member_secret.as_bytes()),
        )
        .map_err(|e| ServiceError::Storage(format!("failed to sign token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn admin_token_round_trip_keeps_identity() {
        let jwt = JwtConfig::new("admin-secret", "member-secret");
        let token = jwt
            .sign_admin(&AdminClaims {
                admin_id: Some(7),
                username: Some("ops".into()),
                role: None,
                exp: far_future(),
            })
            .unwrap();

        let claims = jwt.verify_admin(&token).unwrap();
        assert_eq!(claims.admin_id(), 7);
        assert_eq!(claims.username(), "ops");
    }

    #[test]
    fn admin_token_without_identity_is_rejected() {
        let jwt = JwtConfig::new("admin-secret", "member-secret");
        let token = jwt
            .sign_admin(&AdminClaims {
                admin_id: None,
                username: None,
                role: None,
                exp: far_future(),
            })
            .unwrap();

        assert!(matches!(jwt.verify_admin(&token), Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn member_token_is_not_an_admin_token() {
        let jwt = JwtConfig::new("admin-secret", "member-secret");
        let token = jwt
            .sign_member(&MemberClaims {
                user_id: 3,
                exp: far_future(),
            })
            .unwrap();

        assert!(jwt.verify_admin(&token).is_err());
        assert_eq!(jwt.verify_member(&token).unwrap().user_id, 3);
    }
}
