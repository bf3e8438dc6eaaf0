//! Asynchronous CloudAtCost panel client.

use crate::transport::{HttpTransport, PreparedRequest, RawResponse, Transport};
use cac_core::{
    BuildServerRequest, ClientConfig, Credentials, Endpoint, Error, HttpMethod, PowerAction,
    RequestParams, Result, RunMode, SecretString, ServerId,
};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};
use validator::Validate;

/// Successful panel response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code (always 200 for a returned response)
    pub status: u16,
    /// Raw body, usually JSON
    pub body: String,
}

/// Builder for [`CloudAtCostClient`].
#[derive(Default)]
pub struct CloudAtCostClientBuilder {
    login: Option<String>,
    key: Option<String>,
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl CloudAtCostClientBuilder {
    /// Create a builder with default configuration and no explicit credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both halves of the credential pair.
    #[must_use]
    pub fn with_credentials(mut self, login: impl Into<String>, key: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self.key = Some(key.into());
        self
    }

    /// Set the login. Without a key as well, both are read from the environment.
    #[must_use]
    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    /// Set the API key. Without a login as well, both are read from the environment.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Override the client configuration.
    #[must_use]
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Toggle TLS certificate and hostname verification (on by default).
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.config = self.config.with_tls_verify(verify);
        self
    }

    /// Use a custom transport instead of the reqwest one.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Resolve credentials, validate the configuration and build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if no complete credential pair is
    /// available, or [`Error::ConfigError`] for an invalid configuration.
    pub fn build(self) -> Result<CloudAtCostClient> {
        let credentials = Credentials::resolve(self.login, self.key)?;
        self.config.validate()?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };

        Ok(CloudAtCostClient {
            credentials: Arc::new(credentials),
            config: Arc::new(self.config),
            transport,
            last_http_code: RwLock::new(None),
        })
    }
}

/// Asynchronous client for the CloudAtCost panel API.
///
/// Each operation is a single request; the raw body is returned untouched.
/// The status of the most recent response is also kept for
/// [`last_http_code`](Self::last_http_code). When one client is shared between
/// tasks that value belongs to whichever call finished last, so prefer
/// [`Error::status`] in that case.
pub struct CloudAtCostClient {
    credentials: Arc<Credentials>,
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    last_http_code: RwLock<Option<u16>>,
}

impl CloudAtCostClient {
    /// Construct a client with explicit credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if either value is empty.
    pub fn new(login: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        CloudAtCostClientBuilder::new()
            .with_credentials(login, key)
            .build()
    }

    /// Construct a client from `CAC_LOGIN` and `CAC_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if either variable is missing.
    pub fn from_env() -> Result<Self> {
        CloudAtCostClientBuilder::new().build()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder() -> CloudAtCostClientBuilder {
        CloudAtCostClientBuilder::new()
    }

    /// Account login.
    #[must_use]
    pub fn login(&self) -> &str {
        self.credentials.login()
    }

    /// API key.
    #[must_use]
    pub fn key(&self) -> &SecretString {
        self.credentials.key()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Status of the most recent response, `None` before the first response
    /// or after a call that received no status line.
    #[must_use]
    pub fn last_http_code(&self) -> Option<u16> {
        *self
            .last_http_code
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// List all servers on the account.
    pub async fn list_servers(&self) -> Result<String> {
        self.call(Endpoint::ListServers, RequestParams::new()).await
    }

    /// List all available OS templates.
    pub async fn list_templates(&self) -> Result<String> {
        self.call(Endpoint::ListTemplates, RequestParams::new()).await
    }

    /// List all tasks in operation.
    pub async fn list_tasks(&self) -> Result<String> {
        self.call(Endpoint::ListTasks, RequestParams::new()).await
    }

    /// Power on, power off or reset a server.
    ///
    /// Accepts a [`PowerAction`] or its wire name. Unknown names fail with
    /// [`Error::UnsupportedPowerOperation`] before anything is sent.
    pub async fn power_control<A>(
        &self,
        server_id: impl Into<ServerId>,
        action: A,
    ) -> Result<String>
    where
        A: TryInto<PowerAction>,
        Error: From<A::Error>,
    {
        let action = action.try_into()?;
        let params = server_params(server_id).with("action", action);
        self.call(Endpoint::PowerOperation, params).await
    }

    /// Set the run mode of a server.
    ///
    /// `safe` powers the server off after 7 days of idle usage, `normal` keeps
    /// it on. Unknown names fail with [`Error::UnsupportedRunMode`] before
    /// anything is sent.
    pub async fn change_run_mode<M>(
        &self,
        server_id: impl Into<ServerId>,
        mode: M,
    ) -> Result<String>
    where
        M: TryInto<RunMode>,
        Error: From<M::Error>,
    {
        let mode = mode.try_into()?;
        let params = server_params(server_id).with("mode", mode);
        self.call(Endpoint::RunMode, params).await
    }

    /// Rename the server label.
    pub async fn rename_server(
        &self,
        server_id: impl Into<ServerId>,
        name: &str,
    ) -> Result<String> {
        let params = server_params(server_id).with("name", name);
        self.call(Endpoint::RenameServer, params).await
    }

    /// Modify the reverse DNS and hostname of a server.
    pub async fn change_hostname(
        &self,
        server_id: impl Into<ServerId>,
        hostname: &str,
    ) -> Result<String> {
        let params = server_params(server_id).with("hostname", hostname);
        self.call(Endpoint::ReverseDns, params).await
    }

    /// Request a console access URL for a server.
    pub async fn console_url(&self, server_id: impl Into<ServerId>) -> Result<String> {
        let params = server_params(server_id);
        self.call(Endpoint::Console, params).await
    }

    /// CloudPro: build a server from available resources.
    pub async fn build_server(&self, request: &BuildServerRequest) -> Result<String> {
        let params = RequestParams::new()
            .with("cpu", &request.cpu)
            .with("ram", &request.ram)
            .with("storage", &request.storage)
            .with("os", &request.template_id);
        self.call(Endpoint::CloudProBuild, params).await
    }

    /// CloudPro: delete a server and return its resources to the pool.
    pub async fn delete_server(&self, server_id: impl Into<ServerId>) -> Result<String> {
        let params = server_params(server_id);
        self.call(Endpoint::CloudProDelete, params).await
    }

    /// CloudPro: resources available and in use.
    pub async fn resources_info(&self) -> Result<String> {
        self.call(Endpoint::CloudProResources, RequestParams::new()).await
    }

    /// Send a request to an arbitrary path below the versioned base URL.
    ///
    /// `method` may be an [`HttpMethod`] or its name; anything other than GET
    /// or POST fails with [`Error::UnsupportedMethod`] before anything is sent.
    pub async fn request<M>(
        &self,
        path: &str,
        method: M,
        params: RequestParams,
    ) -> Result<ApiResponse>
    where
        M: TryInto<HttpMethod>,
        Error: From<M::Error>,
    {
        let method = method.try_into()?;
        self.execute(path, method, params).await
    }

    async fn call(&self, endpoint: Endpoint, params: RequestParams) -> Result<String> {
        self.execute(endpoint.path(), endpoint.method(), params)
            .await
            .map(|response| response.body)
    }

    async fn execute(
        &self,
        path: &str,
        method: HttpMethod,
        mut params: RequestParams,
    ) -> Result<ApiResponse> {
        params.merge_credentials(&self.credentials);
        let url = self.config.endpoint_url(path)?;

        info!(path = %path, method = %method, "Sending CloudAtCost request");

        let request = PreparedRequest {
            method,
            url,
            params: params.into_pairs(),
        };

        let RawResponse { status, body } = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                self.record_status(err.status());
                warn!(path = %path, error = %err, "CloudAtCost request did not complete");
                if let Error::IncompleteResponse { status, .. } = &err {
                    classify_status(*status)?;
                }
                return Err(err);
            }
        };

        self.record_status(Some(status));
        debug!(path = %path, status, "CloudAtCost response received");

        if let Err(err) = classify_status(status) {
            warn!(path = %path, status, error = %err, "CloudAtCost request failed");
            return Err(err);
        }

        Ok(ApiResponse { status, body })
    }

    fn record_status(&self, status: Option<u16>) {
        *self
            .last_http_code
            .write()
            .unwrap_or_else(PoisonError::into_inner) = status;
    }
}

impl Clone for CloudAtCostClient {
    /// The clone starts with the current last status and tracks its own after that.
    fn clone(&self) -> Self {
        Self {
            credentials: Arc::clone(&self.credentials),
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            last_http_code: RwLock::new(self.last_http_code()),
        }
    }
}

impl std::fmt::Debug for CloudAtCostClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudAtCostClient")
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .field("last_http_code", &self.last_http_code())
            .finish_non_exhaustive()
    }
}

/// Start a parameter list with the `sid` of the target server.
fn server_params(server_id: impl Into<ServerId>) -> RequestParams {
    let server_id: ServerId = server_id.into();
    RequestParams::new().with("sid", server_id)
}

/// Map a panel status code to success or the matching error.
fn classify_status(status: u16) -> Result<()> {
    match status {
        200 => Ok(()),
        400 => Err(Error::InvalidApiUrl),
        403 => Err(Error::InvalidApiKey),
        412 => Err(Error::RequestFailed),
        500 => Err(Error::InternalServerError),
        503 => Err(Error::RateLimitExceeded),
        other => Err(Error::UnsupportedResponseCode(other)),
    }
}
