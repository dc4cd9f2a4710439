use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, StatusCode, Url, header::AUTHORIZATION};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    config::{Config, Credentials, Endpoints},
    error::{Error, Result},
    info,
    management::TokenManager,
    spotify, success,
    types::{Token, TokenResponse},
    warning,
};

/// Builds the URL the user has to visit to grant access.
///
/// The URL points at the accounts service `authorize` endpoint and carries
/// `client_id`, `response_type=code`, `redirect_uri`, `scope` and
/// `show_dialog=true`, so consent is asked for on every run. All values are
/// form-encoded. No request is made.
///
/// # Errors
///
/// [`Error::Config`] when `client_id` is empty or the configured accounts
/// URL is not a valid base URL.
///
/// # Example
///
/// ```
/// let url = authorize_url(
///     &Endpoints::default(),
///     "abc123",
///     "http://localhost:8888/callback",
///     "user-top-read",
/// )?;
/// assert!(url.as_str().contains("response_type=code"));
/// ```
pub fn authorize_url(
    endpoints: &Endpoints,
    client_id: &str,
    redirect_uri: &str,
    scope: &str,
) -> Result<Url> {
    if client_id.trim().is_empty() {
        return Err(Error::Config("client id must not be empty".to_string()));
    }

    Url::parse_with_params(
        &endpoints.authorize_url(),
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("scope", scope),
            ("show_dialog", "true"),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid accounts URL: {e}")))
}

/// Pulls the authorization code out of whatever the user pasted.
///
/// Accepts the full URL the browser was redirected to
/// (`http://localhost:8888/callback?code=AQD...`) or the bare code. If the
/// provider redirected with an `error` parameter instead (the user pressed
/// cancel), that reason is reported.
pub fn extract_code(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::Parse("no authorization code given".to_string()));
    }

    let Ok(url) = Url::parse(input) else {
        // a bare code never parses as an absolute URL
        return Ok(input.to_string());
    };

    let mut code = None;
    for (key, value) in url.query_pairs() {
        match &*key {
            "error" => {
                return Err(Error::Parse(format!("authorization was denied: {value}")));
            }
            "code" if !value.is_empty() => code = Some(value.into_owned()),
            _ => {}
        }
    }

    code.ok_or_else(|| Error::Parse(format!("no code parameter in '{input}'")))
}

/// Performs the authorization code exchange and returns the full token
/// response.
///
/// Sends a single `POST {accounts}/api/token` with HTTP Basic authentication
/// (`base64(client_id:client_secret)`) and the form body
/// `grant_type=authorization_code`, `code`, `redirect_uri`. The redirect URI
/// has to be the one used to build the authorization URL or the accounts
/// service rejects the request.
///
/// # Errors
///
/// - [`Error::AuthExchange`] for any status other than 200, with the raw body
/// - [`Error::Parse`] when a 200 body has no usable `access_token`
/// - [`Error::Http`] on network failures or timeouts
///
/// The request is never retried; authorization codes are single use.
pub async fn request_token(
    client: &Client,
    endpoints: &Endpoints,
    credentials: &Credentials,
    code: &str,
) -> Result<TokenResponse> {
    let basic = STANDARD.encode(format!(
        "{}:{}",
        credentials.client_id, credentials.client_secret
    ));

    let res = client
        .post(endpoints.token_url())
        .header(AUTHORIZATION, format!("Basic {basic}"))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", credentials.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;

    if status != StatusCode::OK {
        return Err(Error::AuthExchange {
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| Error::Parse(format!("invalid token response: {e}")))?;

    if token.access_token.is_empty() {
        return Err(Error::Parse("token response has an empty access_token".to_string()));
    }

    Ok(token)
}

/// Exchanges an authorization code for an access token.
///
/// See [`request_token`] for the request shape and error cases.
pub async fn exchange_code(
    client: &Client,
    endpoints: &Endpoints,
    credentials: &Credentials,
    code: &str,
) -> Result<String> {
    request_token(client, endpoints, credentials, code)
        .await
        .map(|t| t.access_token)
}

/// Runs the interactive authorization flow.
///
/// 1. Builds the authorization URL and opens it in the default browser
/// 2. Waits for the user to paste the URL they were redirected to
/// 3. Exchanges the contained code for an access token
/// 4. Caches the token so later runs can skip this step
///
/// Reading from stdin blocks without a timeout.
pub async fn auth(config: &Config, credentials: &Credentials) -> Result<Token> {
    let client = spotify::http_client(config)?;
    let auth_url = authorize_url(
        &config.endpoints,
        &credentials.client_id,
        &credentials.redirect_uri,
        &credentials.scope(),
    )?;

    info!("Authorize the application at:\n{}", auth_url);
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!("Failed to open browser. Please navigate to the URL above manually.");
    }

    info!("Paste the URL you were redirected to:");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    let code = extract_code(&line)?;

    let response = request_token(&client, &config.endpoints, credentials, &code).await?;
    let token = Token {
        access_token: response.access_token,
        scope: response.scope.unwrap_or_else(|| credentials.scope()),
        obtained_at: Utc::now().timestamp() as u64,
    };

    if let Err(e) = TokenManager::new(token.clone()).persist().await {
        warning!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
    Ok(token)
}
