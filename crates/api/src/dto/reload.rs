use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct ReloadResponse {
    pub status: &'static str,
    pub blocked_domains: usize,
}

#[derive(Serialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: &'static str,
}
