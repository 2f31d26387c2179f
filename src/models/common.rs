use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub description: String,
}

/// Image models known to work with the Together images endpoint.
/// Informational only: any model id is passed through to the provider.
pub fn known_image_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            id: "black-forest-labs/FLUX.1-dev".to_string(),
            name: "FLUX.1 [dev]".to_string(),
            provider: "Black Forest Labs".to_string(),
            description: "Open-weight guidance-distilled model".to_string(),
        },
        ModelInfo {
            id: "black-forest-labs/FLUX.1-schnell".to_string(),
            name: "FLUX.1 [schnell]".to_string(),
            provider: "Black Forest Labs".to_string(),
            description: "Fast few-step model".to_string(),
        },
        ModelInfo {
            id: "black-forest-labs/FLUX.1-schnell-Free".to_string(),
            name: "FLUX.1 [schnell] Free".to_string(),
            provider: "Black Forest Labs".to_string(),
            description: "Rate-limited free tier of FLUX.1 [schnell]".to_string(),
        },
        ModelInfo {
            id: "black-forest-labs/FLUX.1.1-pro".to_string(),
            name: "FLUX1.1 [pro]".to_string(),
            provider: "Black Forest Labs".to_string(),
            description: "Hosted pro model".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::image::DEFAULT_MODEL;

    #[test]
    fn test_default_model_is_listed() {
        assert!(known_image_models().iter().any(|m| m.id == DEFAULT_MODEL));
    }
}
