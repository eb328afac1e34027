use velmap_shared::error::LoadError;
use velmap_shared::geojson;
use velmap_shared::models::VelocityPoint;

/// Path of the velocity dataset on the serving host.
pub const DATA_PATH: &str = "/data/velocity.geojson";

/// Build the dataset URL from the page origin.
pub fn data_url(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), DATA_PATH)
}

fn page_origin() -> Result<String, LoadError> {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .ok_or_else(|| LoadError::Fetch("page origin unavailable".to_string()))
}

/// Fetch and decode the velocity dataset. Called once at startup.
pub async fn fetch_velocity_points() -> Result<Vec<VelocityPoint>, LoadError> {
    let url = data_url(&page_origin()?);

    let resp = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .map_err(|e| LoadError::Fetch(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::Fetch(format!("{} returned {}", url, status)));
    }

    let text = resp
        .text()
        .await
        .map_err(|e| LoadError::Fetch(e.to_string()))?;

    geojson::decode_velocity_points(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url() {
        assert_eq!(
            data_url("http://localhost:3000"),
            "http://localhost:3000/data/velocity.geojson"
        );
    }

    #[test]
    fn test_data_url_trailing_slash() {
        assert_eq!(
            data_url("https://velocity.example.com/"),
            "https://velocity.example.com/data/velocity.geojson"
        );
    }
}
