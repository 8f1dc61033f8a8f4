//! Command execution.
//!
//! API commands print the decoded response as pretty JSON on stdout;
//! `verify-webhook` runs a captured delivery through the webhook gateway.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use thiserror::Error;

use abacatepay::api::{API_VERSION, AbacatePay};
use abacatepay::config::{Command, ConfigError, EventVersionArg, ValidatedConfig};
use abacatepay::rest::{HttpClient, RestError};
use abacatepay::time::Sleeper;
use abacatepay::webhook::{
    HandlerError, HandlerRegistry, RawWebhookRequest, SECRET_QUERY_PARAM, SIGNATURE_HEADER,
    WebhookConfig, WebhookConfigError, WebhookEvent, WebhookGateway, WebhookRejection, handler_fn,
    v1, v2,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration is incomplete for the chosen command.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The webhook gateway could not be built.
    #[error(transparent)]
    WebhookSetup(#[from] WebhookConfigError),

    /// An API call failed.
    #[error("API call failed: {0}")]
    Api(#[from] RestError),

    /// The captured delivery was rejected.
    #[error("Webhook rejected with {status}: {0}", status = .0.status())]
    Rejected(#[source] WebhookRejection),

    /// The body file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    ReadBody {
        /// Path of the body file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A response could not be rendered as JSON.
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl RunError {
    /// Returns true for errors caused by missing or invalid setup.
    #[must_use]
    pub const fn is_setup_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::WebhookSetup(_))
    }
}

/// Executes one command.
///
/// # Errors
///
/// Returns [`RunError`] if the command cannot be configured, the API call
/// fails, or the webhook is rejected.
pub async fn execute(command: &Command, config: &ValidatedConfig) -> Result<(), RunError> {
    if let Command::VerifyWebhook {
        body,
        signature,
        event_version,
    } = command
    {
        let report = verify_webhook(
            config.webhook_config()?,
            body,
            signature.as_deref(),
            *event_version,
        )
        .await?;
        println!("{report}");
        return Ok(());
    }

    if config.version != API_VERSION {
        tracing::warn!(
            configured = config.version,
            "CLI commands use API v{API_VERSION}; ignoring configured version"
        );
    }

    let client = AbacatePay::from_rest(config.rest_client()?);
    let output = query(&client, command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Runs the API call behind `command` and returns the decoded response.
///
/// # Errors
///
/// Returns [`RunError::Api`] if the call fails.
pub async fn query<H: HttpClient, S: Sleeper>(
    client: &AbacatePay<H, S>,
    command: &Command,
) -> Result<serde_json::Value, RunError> {
    let value = match command {
        Command::Store => json(&client.store().get().await?)?,
        Command::Customers => json(&client.customers().list().await?)?,
        Command::Billings => json(&client.billings().list().await?)?,
        Command::Coupons => json(&client.coupons().list().await?)?,
        Command::Withdraws {
            external_id: Some(id),
        } => json(&client.withdraw().get(id).await?)?,
        Command::Withdraws { external_id: None } => json(&client.withdraw().list().await?)?,
        Command::PixStatus { id } => json(&client.pix().status(id).await?)?,
        Command::Mrr {
            start: Some(start),
            end: Some(end),
        } => json(&client.mrr().revenue(*start, *end).await?)?,
        Command::Mrr { .. } => serde_json::json!({
            "mrr": json(&client.mrr().get().await?)?,
            "merchant": json(&client.mrr().merchant().await?)?,
        }),
        Command::Init { .. } | Command::VerifyWebhook { .. } => serde_json::Value::Null,
    };
    Ok(value)
}

/// Checks a captured delivery against the webhook configuration.
///
/// The configured secret is supplied as the query parameter, so only the
/// signature and the payload are really under test. Without `signature`
/// the expected signature is returned instead.
///
/// # Errors
///
/// Returns [`RunError::ReadBody`] if the file cannot be read, or
/// [`RunError::Rejected`] if the gateway rejects the delivery.
pub async fn verify_webhook(
    config: WebhookConfig,
    body_path: &Path,
    signature: Option<&str>,
    version: EventVersionArg,
) -> Result<String, RunError> {
    let body = std::fs::read(body_path).map_err(|source| RunError::ReadBody {
        path: body_path.to_path_buf(),
        source,
    })?;

    match version {
        EventVersionArg::V1 => check_delivery::<v1::Event>(config, body, signature).await,
        EventVersionArg::V2 => check_delivery::<v2::Event>(config, body, signature).await,
    }
}

async fn check_delivery<E: WebhookEvent>(
    config: WebhookConfig,
    body: Vec<u8>,
    signature: Option<&str>,
) -> Result<String, RunError> {
    let secret = config.secret.clone();
    let seen = Arc::new(Mutex::new(None::<String>));
    let recorder = Arc::clone(&seen);

    let registry = HandlerRegistry::<E>::builder()
        .fallback(handler_fn(move |event: E| {
            let recorder = Arc::clone(&recorder);
            async move {
                let mode = if event.dev_mode() { " (dev mode)" } else { "" };
                let summary = format!("{} {}{mode}", event.event_type(), event.id());
                if let Ok(mut slot) = recorder.lock() {
                    *slot = Some(summary);
                }
                Ok::<(), HandlerError>(())
            }
        }))
        .build();
    let gateway = WebhookGateway::new(config, registry)?;

    let Some(signature) = signature else {
        return Ok(format!(
            "expected signature: {}",
            gateway.verifier().sign(&body)
        ));
    };

    let request = RawWebhookRequest::new(body)
        .with_query(SECRET_QUERY_PARAM, secret)
        .with_header(SIGNATURE_HEADER, signature);
    gateway.handle(&request).await.map_err(RunError::Rejected)?;

    let summary = seen
        .lock()
        .ok()
        .and_then(|mut slot| slot.take())
        .unwrap_or_default();
    Ok(format!("valid: {summary}"))
}

fn json<T: Serialize>(value: &T) -> Result<serde_json::Value, RunError> {
    serde_json::to_value(value).map_err(RunError::from)
}
