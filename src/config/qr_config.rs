use crate::domain::confirmation_link::Scheme;

#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct QrConfig {
    /// Forces the scheme of confirmation links. Unset means `http` for loopback
    /// hosts and `https` otherwise.
    #[serde(default)]
    pub scheme: Option<Scheme>,
}
