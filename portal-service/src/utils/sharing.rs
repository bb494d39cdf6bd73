/// Public link for a sharing token: `{base}/shared/{token}`.
pub fn share_url(base_url: &str, token: &str) -> String {
    format!("{}/shared/{}", base_url.trim_end_matches('/'), token)
}
