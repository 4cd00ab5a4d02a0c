//! Request identity extraction
//!
//! The acting user and tenant come from the `x-stele-user` and
//! `x-stele-tenant` headers, normally set by the authenticating reverse
//! proxy in front of the service. Absent headers fall back to fixed
//! development identities so a local instance works without a proxy.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};

use stele_common::ActorContext;

pub const USER_HEADER: &str = "x-stele-user";
pub const TENANT_HEADER: &str = "x-stele-tenant";

const DEFAULT_USER_ID: &str = "dummy-user-id";
const DEFAULT_TENANT_ID: &str = "dummy-tenant-id";

/// Extractor wrapper around `ActorContext` (orphan rules prevent
/// implementing `FromRequest` for the foreign type directly).
#[derive(Clone, Debug)]
pub struct RequestIdentity(pub ActorContext);

fn header_or(req: &HttpRequest, name: &str, default: &str) -> String {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

impl FromRequest for RequestIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let actor_id = header_or(req, USER_HEADER, DEFAULT_USER_ID);
        let tenant_id = header_or(req, TENANT_HEADER, DEFAULT_TENANT_ID);

        ready(Ok(RequestIdentity(ActorContext::new(actor_id, tenant_id))))
    }
}
