//! `spectre login` / `spectre logout` – token endpoints.

use anyhow::Result;
use spectre_core::api::types::{AuthReqBody, RevokeReqBody, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use spectre_core::api::GhostApi;

use super::blocking;
use crate::cli::{bare_token, bearer};

pub async fn run_login(api: GhostApi, email: &str, password: &str) -> Result<()> {
    let email = email.to_string();
    let password = password.to_string();
    let token = blocking(move || {
        let secret = api.get_client_secret()?;
        let credentials = AuthReqBody::from_password(api.client_id(), &secret, &email, &password);
        api.get_auth_token(&credentials)
    })
    .await?;
    tracing::info!("obtained access token (expires in {}s)", token.expires_in);
    println!("{}", serde_json::to_string_pretty(&token)?);
    Ok(())
}

pub async fn run_logout(api: GhostApi, access_token: &str, refresh_token: Option<&str>) -> Result<()> {
    let access_token = bare_token(access_token).to_string();
    let refresh_token = refresh_token.map(|t| bare_token(t).to_string());
    let revoked = blocking(move || {
        let secret = api.get_client_secret()?;
        let auth = bearer(&access_token);
        let mut requests = Vec::new();
        if let Some(refresh) = &refresh_token {
            requests.push(RevokeReqBody::new(TOKEN_TYPE_REFRESH, refresh, api.client_id(), &secret));
        }
        // access token last: it authorizes the revocations
        requests.push(RevokeReqBody::new(
            TOKEN_TYPE_ACCESS,
            &access_token,
            api.client_id(),
            &secret,
        ));
        let mut revoked = 0;
        for req in &requests {
            api.revoke_auth_token(&auth, req)?;
            revoked += 1;
        }
        Ok(revoked)
    })
    .await?;
    println!("Revoked {revoked} token(s).");
    Ok(())
}
