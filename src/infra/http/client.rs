use crate::core::error::GatewayError;

/// Build the outbound reqwest client. No request timeout is set; the
/// transport defaults apply.
pub fn make_http_client() -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .build()
        .map_err(GatewayError::Transport)
}

#[cfg(test)]
mod tests {
    #[test]
    fn builds_client() {
        assert!(super::make_http_client().is_ok());
    }
}
