//! The authenticated caller.
//!
//! Identity lives outside this crate. A request boundary asks an
//! [`IdentityResolver`] for the caller once, turns the answer into a
//! [`Principal`] with [`resolve_principal`], and passes that principal
//! explicitly to every [`TaskBoard`](crate::TaskBoard) operation.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{Error, Result};

/// Opaque id of the caller, as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Returns `None` for a blank id.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Turn a resolver answer into a principal, failing with
    /// [`Error::Unauthenticated`] when nobody is signed in.
    pub fn require(resolved: Option<Principal>) -> Result<Self> {
        resolved.ok_or(Error::Unauthenticated)
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Looks up the caller behind an inbound request of type `R`.
#[async_trait]
pub trait IdentityResolver<R: ?Sized + Sync>: Send + Sync {
    async fn current_principal(&self, request: &R) -> Option<Principal>;
}

/// Resolves to the same answer for every request.
///
/// Handy for single-user deployments and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedIdentity(Option<Principal>);

impl FixedIdentity {
    pub fn signed_in(principal: Principal) -> Self {
        Self(Some(principal))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait]
impl<R: ?Sized + Sync> IdentityResolver<R> for FixedIdentity {
    async fn current_principal(&self, _request: &R) -> Option<Principal> {
        self.0.clone()
    }
}

/// Ask `resolver` for the caller of `request`.
pub async fn resolve_principal<R, I>(resolver: &I, request: &R) -> Result<Principal>
where
    R: ?Sized + Sync,
    I: IdentityResolver<R> + ?Sized,
{
    let principal = Principal::require(resolver.current_principal(request).await);
    if principal.is_err() {
        log::debug!("request carried no principal");
    }
    principal
}
