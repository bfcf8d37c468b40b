//! Bearer token middleware.
//!
//! Requests without an `Authorization` header continue anonymously and each
//! operation decides whether that is enough. A header that is present but
//! cannot be resolved to an active principal stops the request.

use std::sync::Arc;

use frameshop_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{error, warn};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if !req.headers().contains_key(AUTHORIZATION) {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    let Some(token) = extract_bearer_token(req) else {
        reject(res, ctrl, StatusError::unauthorized().brief("Malformed Authorization header"));

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(status) => {
            reject(res, ctrl, status);

            return;
        }
    };

    let principal = match state.app.auth.authenticate_bearer(token).await {
        Ok(principal) => principal,
        Err(
            AuthServiceError::NotFound
            | AuthServiceError::PrincipalNotFound
            | AuthServiceError::Token(_),
        ) => {
            warn!("rejected bearer token");
            reject(res, ctrl, StatusError::unauthorized().brief("Invalid API token"));

            return;
        }
        Err(AuthServiceError::Blocked) => {
            reject(res, ctrl, StatusError::forbidden().brief("Account is blocked"));

            return;
        }
        Err(AuthServiceError::Store(source)) => {
            error!("failed to validate api token: {source}");
            reject(res, ctrl, StatusError::internal_server_error());

            return;
        }
    };

    tracing::Span::current().record("principal_uuid", tracing::field::display(principal.uuid));

    depot.insert_principal(principal);

    ctrl.call_next(req, depot, res).await;
}

fn reject(res: &mut Response, ctrl: &mut FlowCtrl, status: StatusError) {
    res.render(status);
    ctrl.skip_rest();
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
