pub struct DefaultsConfig {
    pub matrix: String,
    pub default_score: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            matrix: "62".to_string(),
            default_score: f64::NEG_INFINITY,
        }
    }
}
