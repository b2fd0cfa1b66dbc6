pub struct Config {
    pub host: String,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let host = std::env::var("CINDER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let http_port = std::env::var("CINDER_HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .unwrap_or(8080);
        Self { host, http_port }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}
