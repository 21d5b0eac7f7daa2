//! Cognito user-pool configuration.

use store::AppConfig;

/// Identity provider settings taken from the startup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CognitoConfig {
    pub region: String,
    pub user_pool_id: String,
    pub client_id: String,
}

impl CognitoConfig {
    pub fn new(region: &str, user_pool_id: &str, client_id: &str) -> Self {
        Self {
            region: region.to_string(),
            user_pool_id: user_pool_id.to_string(),
            client_id: client_id.to_string(),
        }
    }

    /// Regional Cognito Identity Provider endpoint.
    pub fn endpoint(&self) -> String {
        format!("https://cognito-idp.{}.amazonaws.com/", self.region)
    }
}

impl From<&AppConfig> for CognitoConfig {
    fn from(config: &AppConfig) -> Self {
        Self::new(&config.region, &config.user_pool_id, &config.client_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uses_region() {
        let config = CognitoConfig::new("eu-central-1", "eu-central-1_x", "client");
        assert_eq!(
            config.endpoint(),
            "https://cognito-idp.eu-central-1.amazonaws.com/"
        );
    }
}
