pub const MAP_CONTAINER_ID: &str = "map-canvas";
pub const TOKEN_META_NAME: &str = "mapbox-token";

/// Stand-in latency for a future network search.
pub const SEARCH_DELAY_MS: u32 = 1_000;
pub const CAMERA_EASE_MS: u32 = 800;
/// Locations listed in the empty-state panel.
pub const PREVIEW_COUNT: usize = 3;

const BUILD_TOKEN: Option<&str> = option_env!("MAPBOX_TOKEN");
const PUBLIC_TOKEN_PREFIX: &str = "pk.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("No map access token configured. Set MAPBOX_TOKEN at build time or add a mapbox-token meta tag.")]
    MissingToken,

    #[error("The map access token is not a public token (expected a \"pk.\" prefix).")]
    MalformedToken,
}

/// Public map-service token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Token from the host page, falling back to the build environment.
pub fn load_token() -> Result<AccessToken, ConfigError> {
    resolve_token(page_token(), BUILD_TOKEN)
}

/// Blank values are treated as absent so an empty placeholder meta tag falls
/// through to the build token.
pub fn resolve_token(
    page: Option<String>,
    build: Option<&str>,
) -> Result<AccessToken, ConfigError> {
    let token = page
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| build.map(str::trim).filter(|value| !value.is_empty()))
        .ok_or(ConfigError::MissingToken)?;
    if !token.starts_with(PUBLIC_TOKEN_PREFIX) || token.len() == PUBLIC_TOKEN_PREFIX.len() {
        return Err(ConfigError::MalformedToken);
    }
    Ok(AccessToken(token.to_string()))
}

fn page_token() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"{TOKEN_META_NAME}\"]");
    document
        .query_selector(&selector)
        .ok()
        .flatten()?
        .get_attribute("content")
}
