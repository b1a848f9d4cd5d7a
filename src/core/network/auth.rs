//! Session establishment: web token, mobile (username + password hash), and a token
//! supplied at construction.

use crate::core::executor::Request;
use crate::core::extract;
use crate::core::signer::md5_hex;
use crate::core::FmError;

/// A freshly established session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub key: String,
    pub username: Option<String>,
}

impl super::Network {
    /// Establishes a session from whatever the builder was given.
    ///
    /// Does nothing when a session key is already set. Otherwise a construction-time token
    /// is exchanged via `auth.getSession`, or username + password hash via
    /// `auth.getMobileSession`. Without either, the network stays anonymous.
    ///
    /// # Errors
    ///
    /// Returns the error of the authentication call.
    pub async fn authenticate(&self) -> Result<(), FmError> {
        if self.session_key().await.is_some() {
            return Ok(());
        }

        // the token stays pending until the exchange succeeds, so a failed attempt can be retried
        if let Some(token) = self.pending_token().await {
            self.web_auth_session(&token).await?;
            self.clear_pending_token().await;
            return Ok(());
        }

        if let (Some(username), Some(hash)) = (self.username().await, self.password_hash().await) {
            self.mobile_session(&username, &hash).await?;
        }
        Ok(())
    }

    /// Requests an unauthorized web token (`auth.getToken`).
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the response has no `token`.
    pub async fn web_auth_token(&self) -> Result<String, FmError> {
        let doc = self.execute(&Request::new("auth.getToken").signed(true)).await?;
        extract::text(doc.root(), "token", 0).ok_or_else(|| FmError::client("auth.getToken returned no token"))
    }

    /// The page where a user authorizes `token` for this application.
    #[must_use]
    pub fn web_auth_url(&self, token: &str) -> String {
        format!(
            "{}/api/auth/?api_key={}&token={}",
            self.homepage(),
            self.api_key(),
            token
        )
    }

    /// Starts the web flow: returns the token and the URL to show the user.
    ///
    /// # Errors
    ///
    /// See [`Network::web_auth_token`].
    pub async fn begin_web_auth(&self) -> Result<(String, String), FmError> {
        let token = self.web_auth_token().await?;
        let url = self.web_auth_url(&token);
        Ok((token, url))
    }

    /// Exchanges an authorized token for a session (`auth.getSession`) and stores it.
    ///
    /// # Errors
    ///
    /// Returns a service error (typically token unauthorized or expired) if the user has not
    /// approved the token yet.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, token), err))]
    pub async fn web_auth_session(&self, token: &str) -> Result<Session, FmError> {
        let request = Request::new("auth.getSession")
            .param("token", token)
            .signed(true);
        let doc = self.execute(&request).await?;
        let key = extract::text(doc.root(), "key", 0)
            .ok_or_else(|| FmError::client("auth.getSession returned no key"))?;
        let username = extract::text(doc.root(), "name", 0);

        self.set_session_key(key.clone()).await;
        if let Some(name) = &username {
            self.set_username(name.clone()).await;
        }
        Ok(Session { key, username })
    }

    /// Establishes a session from credentials (`auth.getMobileSession`) and stores it.
    ///
    /// `password_hash` is the hex MD5 of the password; the request carries
    /// `authToken = MD5(username + password_hash)`.
    ///
    /// # Errors
    ///
    /// Returns a service error (authentication failed) for bad credentials.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, password_hash), err))]
    pub async fn mobile_session(&self, username: &str, password_hash: &str) -> Result<Session, FmError> {
        let auth_token = md5_hex(&format!("{username}{password_hash}"));
        let request = Request::new("auth.getMobileSession")
            .param("username", username)
            .param("authToken", auth_token)
            .signed(true);
        let doc = self.execute(&request).await?;
        let key = extract::text(doc.root(), "key", 0)
            .ok_or_else(|| FmError::client("auth.getMobileSession returned no key"))?;

        self.set_session_key(key.clone()).await;
        self.set_username(username).await;
        Ok(Session {
            key,
            username: Some(username.to_string()),
        })
    }
}
