//! Identity of the caller, decoded from the JWT issued by the auth service.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::role::Role;
use crate::domain::types::{TypeConstraintError, UserId};
use crate::models::config::ServerConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Numeric id of the `users` row, as a string.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> Result<UserId, TypeConstraintError> {
        let id = self
            .sub
            .parse::<i32>()
            .map_err(|_| TypeConstraintError::InvalidValue(format!("subject {}", self.sub)))?;
        UserId::new(id)
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

/// 401 with the JSON error body used across the API.
fn unauthorized(reason: &'static str) -> actix_web::Error {
    InternalError::from_response(
        reason,
        HttpResponse::Unauthorized().json(json!({ "error": "ログインしてください" })),
    )
    .into()
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("ServerConfig is not registered as app data");
            return ready(Err(actix_web::error::ErrorInternalServerError(
                "server misconfigured",
            )));
        };

        let token = match bearer_token(req) {
            Some(token) => Ok(token),
            None => Identity::from_request(req, payload)
                .into_inner()
                .and_then(|identity| identity.id().map_err(Into::into)),
        };

        let result = token
            .map_err(|_| unauthorized("missing identity"))
            .and_then(|token| {
                AuthenticatedUser::from_jwt(&token, &config.secret).map_err(|e| {
                    log::warn!("Rejected identity token: {e}");
                    unauthorized("invalid identity")
                })
            });

        ready(result)
    }
}
