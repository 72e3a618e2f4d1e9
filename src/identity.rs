//! Caller identity, as handed over by an upstream auth layer.
//!
//! The service trusts `X-Caller-Id` and `X-Caller-Role` to have been
//! verified before the request reaches it; no credential checking
//! happens here. Handlers take [`Caller`] (any authenticated caller)
//! or [`Staff`] (barber or admin) as an extractor argument.

use std::future::{ready, Ready};

use actix_web::{
    error::ErrorUnauthorized, dev::Payload, Error, FromRequest, HttpRequest,
};

pub const CALLER_ID_HEADER: &str = "X-Caller-Id";
pub const CALLER_ROLE_HEADER: &str = "X-Caller-Role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Client,
    Barber,
    Admin,
}

impl Role {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "client" => Some(Role::Client),
            "barber" => Some(Role::Barber),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn is_staff(self) -> bool {
        matches!(self, Role::Barber | Role::Admin)
    }
}

#[derive(Debug, Clone)]
pub struct Caller {
    pub id: String,
    pub role: Role,
}

fn extract_caller(req: &HttpRequest) -> Option<Caller> {
    let id = req
        .headers()
        .get(CALLER_ID_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .to_string();
    if id.is_empty() {
        return None;
    }
    let role = Role::parse(req.headers().get(CALLER_ROLE_HEADER)?.to_str().ok()?)?;
    Some(Caller { id, role })
}

impl FromRequest for Caller {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_caller(req).ok_or_else(|| ErrorUnauthorized("caller identity required")))
    }
}

/// Barber or admin caller, required for block management.
#[derive(Debug, Clone)]
pub struct Staff(pub Caller);

impl FromRequest for Staff {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match extract_caller(req) {
            Some(caller) if caller.role.is_staff() => Ok(Staff(caller)),
            Some(_) => Err(ErrorUnauthorized("staff access required")),
            None => Err(ErrorUnauthorized("caller identity required")),
        };
        ready(result)
    }
}
