use crate::utils::error::{MujiError, Result};
use reqwest::RequestBuilder;
use std::time::Duration;

/// 送出單一請求並讀回成功的回應內容，不重試
pub(crate) async fn send_once(
    service: &str,
    request: RequestBuilder,
    timeout: Option<Duration>,
) -> Result<String> {
    let request = match timeout {
        Some(timeout) => request.timeout(timeout),
        None => request,
    };

    let response = request
        .send()
        .await
        .map_err(|e| MujiError::transport(service, describe(e)))?;

    let status = response.status();
    tracing::debug!("{} response status: {}", service, status);

    let body = response
        .text()
        .await
        .map_err(|e| MujiError::transport(service, describe(e)))?;

    if !status.is_success() {
        return Err(MujiError::transport(
            service,
            format!("HTTP {}: {}", status.as_u16(), body.trim()),
        ));
    }

    Ok(body)
}

/// 請求網址的查詢字串可能帶有金鑰，錯誤訊息一律去掉網址
fn describe(error: reqwest::Error) -> String {
    let error = error.without_url();
    if error.is_timeout() {
        format!("request timed out: {}", error)
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}
