//! HTTP client for an Appium server speaking the W3C WebDriver protocol.

mod gesture;
mod session;

use std::time::Duration;

use reqwest::{Client, Method};
use serde::de::{DeserializeOwned, IgnoredAny};
use storetally_core::AppiumCapabilities;

use crate::driver::UiDriver;
use crate::error::{DriverError, NO_SUCH_ELEMENT};
use crate::locator::Locator;
use crate::types::{ElementRef, Swipe, WindowRect, WireElement, WireError, WireResponse};

const USER_AGENT: &str = "storetally/0.1 (appium-client)";

/// A live Appium session.
///
/// Every command is a blocking round trip awaited in sequence; the client is
/// never shared between tasks. Dropping the client does not end the remote
/// session, call [`UiDriver::quit`] for that.
pub struct AppiumClient {
    client: Client,
    base_url: String,
    session_id: String,
}

impl AppiumClient {
    /// Opens a new session against `base_url` (e.g. `http://localhost:4723/wd/hub`).
    ///
    /// `timeout_secs` bounds every request made through this client, so it must
    /// be longer than any implicit wait set on the session.
    ///
    /// # Errors
    ///
    /// - [`DriverError::InvalidUrl`] if `base_url` does not parse.
    /// - [`DriverError::Http`] if the server is unreachable.
    /// - [`DriverError::WebDriver`] if the server refuses the capabilities.
    /// - [`DriverError::MalformedResponse`] if no session id comes back.
    pub async fn connect(
        base_url: &str,
        capabilities: &AppiumCapabilities,
        timeout_secs: u64,
    ) -> Result<Self, DriverError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        let base_url = normalise_base_url(base_url)?;
        let url = format!("{base_url}/session");
        let response = client
            .post(&url)
            .json(&session::new_session_body(capabilities))
            .send()
            .await?;
        let body: serde_json::Value = decode(response, &url, "new session").await?;
        let session_id = session::extract_session_id(&body)?;

        tracing::info!(
            session_id = %session_id,
            device = %capabilities.device_name,
            app = %capabilities.app_package,
            "appium session started"
        );

        Ok(Self {
            client,
            base_url,
            session_id,
        })
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn session_url(&self, path: &str) -> String {
        if path.is_empty() {
            format!("{}/session/{}", self.base_url, self.session_id)
        } else {
            format!("{}/session/{}/{path}", self.base_url, self.session_id)
        }
    }

    /// Sends one session command and unwraps the `{"value": ...}` envelope.
    async fn command<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        context: &str,
    ) -> Result<T, DriverError> {
        let url = self.session_url(path);
        tracing::debug!(%method, path, "webdriver command");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let envelope: WireResponse<T> = decode(response, &url, context).await?;
        Ok(envelope.value)
    }

    async fn find_one(&self, path: &str, locator: &Locator) -> Result<ElementRef, DriverError> {
        let context = locator.to_string();
        let element: WireElement = self
            .command(
                Method::POST,
                path,
                Some(locator.to_request_body()),
                &context,
            )
            .await?;
        element
            .into_element_ref()
            .ok_or_else(|| DriverError::MalformedResponse {
                context,
                reason: "element reference has no id".to_string(),
            })
    }

    async fn find_many(
        &self,
        path: &str,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, DriverError> {
        let context = locator.to_string();
        let elements: Vec<WireElement> = self
            .command(
                Method::POST,
                path,
                Some(locator.to_request_body()),
                &context,
            )
            .await?;
        elements
            .into_iter()
            .map(|element| {
                element
                    .into_element_ref()
                    .ok_or_else(|| DriverError::MalformedResponse {
                        context: context.clone(),
                        reason: "element reference has no id".to_string(),
                    })
            })
            .collect()
    }
}

impl UiDriver for AppiumClient {
    async fn find_element(&self, locator: &Locator) -> Result<ElementRef, DriverError> {
        self.find_one("element", locator).await
    }

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        self.find_many("elements", locator).await
    }

    async fn find_child_elements(
        &self,
        parent: &ElementRef,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, DriverError> {
        self.find_many(&format!("element/{}/elements", parent.as_str()), locator)
            .await
    }

    async fn click(&self, element: &ElementRef) -> Result<(), DriverError> {
        let _: IgnoredAny = self
            .command(
                Method::POST,
                &format!("element/{}/click", element.as_str()),
                Some(serde_json::json!({})),
                "click",
            )
            .await?;
        Ok(())
    }

    async fn text(&self, element: &ElementRef) -> Result<String, DriverError> {
        self.command(
            Method::GET,
            &format!("element/{}/text", element.as_str()),
            None,
            "element text",
        )
        .await
    }

    async fn window_rect(&self) -> Result<WindowRect, DriverError> {
        self.command(Method::GET, "window/rect", None, "window rect")
            .await
    }

    async fn display_density(&self) -> Result<u32, DriverError> {
        self.command(
            Method::GET,
            "appium/device/display_density",
            None,
            "display density",
        )
        .await
    }

    async fn swipe(&self, swipe: &Swipe) -> Result<(), DriverError> {
        let _: IgnoredAny = self
            .command(
                Method::POST,
                "actions",
                Some(gesture::swipe_actions_body(swipe)),
                "swipe",
            )
            .await?;
        Ok(())
    }

    async fn set_implicit_wait(&self, wait: Duration) -> Result<(), DriverError> {
        let millis = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
        let _: IgnoredAny = self
            .command(
                Method::POST,
                "timeouts",
                Some(serde_json::json!({ "implicit": millis })),
                "implicit wait",
            )
            .await?;
        Ok(())
    }

    async fn close_app(&self) -> Result<(), DriverError> {
        let _: IgnoredAny = self
            .command(
                Method::POST,
                "appium/app/close",
                Some(serde_json::json!({})),
                "close app",
            )
            .await?;
        Ok(())
    }

    async fn quit(self) -> Result<(), DriverError> {
        let _: IgnoredAny = self
            .command(Method::DELETE, "", None, "delete session")
            .await?;
        tracing::info!(session_id = %self.session_id, "appium session closed");
        Ok(())
    }
}

/// Validates `base_url` and strips trailing slashes so paths can be appended.
fn normalise_base_url(base_url: &str) -> Result<String, DriverError> {
    reqwest::Url::parse(base_url).map_err(|e| DriverError::InvalidUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(base_url.trim_end_matches('/').to_owned())
}

/// Reads a response body, mapping non-2xx statuses to typed errors.
async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    url: &str,
    context: &str,
) -> Result<T, DriverError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(error_from_body(status.as_u16(), &body, url, context));
    }

    serde_json::from_str::<T>(&body).map_err(|e| DriverError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Interprets a W3C error body. Bodies that are not W3C errors become
/// [`DriverError::UnexpectedStatus`].
fn error_from_body(status: u16, body: &str, url: &str, context: &str) -> DriverError {
    match serde_json::from_str::<WireResponse<WireError>>(body) {
        Ok(WireResponse { value }) if value.error == NO_SUCH_ELEMENT => {
            DriverError::NoSuchElement {
                context: context.to_owned(),
            }
        }
        Ok(WireResponse { value }) => DriverError::WebDriver {
            status,
            error: value.error,
            message: value.message,
            context: context.to_owned(),
        },
        Err(_) => DriverError::UnexpectedStatus {
            status,
            url: url.to_owned(),
        },
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
