use std::{ops::Deref, sync::Arc};

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{self, request},
};
use scrawl_api::{ArticleStore, IdentityClaim};

use crate::{verify::VerifyToken, Error};

#[derive(Clone, axum::extract::FromRef)]
pub struct AppState {
    pub store: Store,
    pub verifier: Verifier,
}

#[derive(Clone)]
pub struct Store(Arc<dyn ArticleStore>);

impl Store {
    pub fn new(store: Arc<dyn ArticleStore>) -> Store {
        Store(store)
    }
}

impl Deref for Store {
    type Target = dyn ArticleStore;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[derive(Clone)]
pub struct Verifier(Arc<dyn VerifyToken>);

impl Verifier {
    pub fn new(verifier: Arc<dyn VerifyToken>) -> Verifier {
        Verifier(verifier)
    }
}

impl Deref for Verifier {
    type Target = dyn VerifyToken;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

/// Bearer token pulled off the Authorization header, not verified yet.
/// `None` when the header is absent, i.e. the caller is anonymous.
pub struct PreAuth(pub Option<String>);

#[async_trait]
impl<S: Sync> FromRequestParts<S> for PreAuth {
    type Rejection = Error;

    async fn from_request_parts(req: &mut request::Parts, _state: &S) -> Result<PreAuth, Error> {
        match req.headers.get(http::header::AUTHORIZATION) {
            None => Ok(PreAuth(None)),
            Some(auth) => {
                let auth = auth.to_str().map_err(|_| Error::invalid_token())?;
                let mut auth = auth.split(' ');
                if !auth
                    .next()
                    .ok_or(Error::invalid_token())?
                    .eq_ignore_ascii_case("bearer")
                {
                    return Err(Error::invalid_token());
                }
                let token = auth.next().ok_or(Error::invalid_token())?;
                if !auth.next().is_none() {
                    return Err(Error::invalid_token());
                }
                Ok(PreAuth(Some(String::from(token))))
            }
        }
    }
}

/// Optional authentication: the empty claim when no token was supplied, the
/// verified claim otherwise. A supplied-but-invalid token rejects the whole
/// request before any route logic runs.
pub struct MaybeClaim(pub IdentityClaim);

#[async_trait]
impl FromRequestParts<AppState> for MaybeClaim {
    type Rejection = Error;

    async fn from_request_parts(
        req: &mut request::Parts,
        state: &AppState,
    ) -> Result<MaybeClaim, Error> {
        match PreAuth::from_request_parts(req, state).await?.0 {
            None => Ok(MaybeClaim(IdentityClaim::anonymous())),
            Some(token) => Ok(MaybeClaim(state.verifier.verify(&token).await?)),
        }
    }
}

/// Required authentication: rejects the fully-anonymous caller.
pub struct Auth(pub IdentityClaim);

#[async_trait]
impl FromRequestParts<AppState> for Auth {
    type Rejection = Error;

    async fn from_request_parts(req: &mut request::Parts, state: &AppState) -> Result<Auth, Error> {
        let claim = MaybeClaim::from_request_parts(req, state).await?.0;
        if claim.is_anonymous() {
            return Err(Error::unauthenticated());
        }
        Ok(Auth(claim))
    }
}
