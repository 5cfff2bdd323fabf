//! Installed app OAuth flow with a loopback redirect
//!
//! A local axum server on 127.0.0.1 receives the authorisation code after the
//!   user approves access in the browser, the code is then exchanged (with the
//!   PKCE verifier) at the client's token endpoint.

use std::{collections::HashMap, sync::Arc};

use axum::{extract::{Query, State}, routing::get, Router};
use tokio::{net::TcpListener, sync::{oneshot, Mutex}};
use uuid::Uuid;

use crate::util::{code_challenge, random_hex};

use super::{request_token, AuthError, ClientSecret, Token};

pub const SUCCESS_MESSAGE: &str = "The authentication flow has completed. You may close this window.";

#[derive(Clone)]
struct RedirectState
{
    sender: Arc<Mutex<Option<oneshot::Sender<HashMap<String, String>>>>>
}

/// Pass the query of the first redirect back to [LoopbackFlow::complete]
async fn redirect
(
    State(state): State<RedirectState>,
    Query(params): Query<HashMap<String, String>>
) -> &'static str
{
    if let Some(sender) = state.sender.lock().await.take()
    {
        if sender.send(params).is_err()
        {
            crate::debug("Redirect received after the flow ended".to_string(), Some("AUTH"));
        }
    }
    SUCCESS_MESSAGE
}

pub fn authorization_url
(
    secret: &ClientSecret,
    scopes: &[String],
    redirect_uri: &str,
    state: &str,
    challenge: &str
) -> Result<String, AuthError>
{
    let scope = scopes.join(" ");
    match reqwest::Url::parse_with_params
    (
        &secret.auth_uri,
        &[
            ("response_type", "code"),
            ("client_id", secret.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("scope", scope.as_str()),
            ("state", state),
            ("code_challenge", challenge),
            ("code_challenge_method", "S256"),
            ("access_type", "offline")
        ]
    )
    {
        Ok(url) => Ok(url.to_string()),
        Err(e) => Err(AuthError::new(format!("invalid auth_uri {}, {}", secret.auth_uri, e)))
    }
}

pub struct LoopbackFlow
{
    listener: TcpListener,
    secret: ClientSecret,
    scopes: Vec<String>,
    redirect_uri: String,
    state: String,
    verifier: String,
    url: String
}

impl LoopbackFlow
{
    /// Bind an ephemeral local port and prepare the authorisation url
    pub async fn bind(secret: &ClientSecret, scopes: &[String]) -> Result<LoopbackFlow, AuthError>
    {
        let listener = match TcpListener::bind("127.0.0.1:0").await
        {
            Ok(l) => l,
            Err(e) => return Err(AuthError::new(format!("could not bind the redirect listener, {}", e)))
        };

        let port = match listener.local_addr()
        {
            Ok(a) => a.port(),
            Err(e) => return Err(AuthError::new(format!("redirect listener has no address, {}", e)))
        };

        let redirect_uri = format!("http://127.0.0.1:{}/", port);
        let state = Uuid::new_v4().simple().to_string();
        let verifier = match random_hex(32)
        {
            Some(v) => v,
            None => return Err(AuthError::new("could not generate a PKCE verifier".to_string()))
        };
        let url = authorization_url(secret, scopes, &redirect_uri, &state, &code_challenge(&verifier))?;

        Ok(LoopbackFlow
        {
            listener,
            secret: secret.clone(),
            scopes: scopes.to_vec(),
            redirect_uri,
            state,
            verifier,
            url
        })
    }

    pub fn authorization_url(&self) -> String { self.url.clone() }

    pub fn redirect_uri(&self) -> String { self.redirect_uri.clone() }

    pub fn state(&self) -> String { self.state.clone() }

    /// Serve until the redirect arrives, then exchange its code for a [Token]
    pub async fn complete(self) -> Result<Token, AuthError>
    {
        let (sender, receiver) = oneshot::channel();
        let app = Router::new()
            .route("/", get(redirect))
            .with_state(RedirectState { sender: Arc::new(Mutex::new(Some(sender))) });

        let listener = self.listener;
        let server = tokio::spawn(async move { axum::serve(listener, app).await });

        let received = receiver.await;
        server.abort();

        let params = match received
        {
            Ok(p) => p,
            Err(_) => return Err(AuthError::new("redirect server stopped before receiving a code".to_string()))
        };

        if let Some(error) = params.get("error")
        {
            return Err(AuthError::new(format!("authorisation was refused, {}", error)))
        }

        if params.get("state") != Some(&self.state)
        {
            return Err(AuthError::new("redirect state does not match, possible CSRF".to_string()))
        }

        let code = match params.get("code")
        {
            Some(c) => c,
            None => return Err(AuthError::new("redirect did not include a code".to_string()))
        };

        let response = request_token
        (
            &self.secret.token_uri,
            &[
                ("grant_type", "authorization_code"),
                ("code", code.as_str()),
                ("client_id", self.secret.client_id.as_str()),
                ("client_secret", self.secret.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("code_verifier", self.verifier.as_str())
            ]
        ).await?;

        Ok(response.into_token(&self.secret, None, &self.scopes))
    }
}

/// Print the authorisation url and wait for the user to approve access
pub async fn run_local_server(secret: &ClientSecret, scopes: &[String]) -> Result<Token, AuthError>
{
    let flow = LoopbackFlow::bind(secret, scopes).await?;
    crate::log(format!("Please visit this URL to authorise drivelock:\n{}", flow.authorization_url()), Some("AUTH"));
    flow.complete().await
}
