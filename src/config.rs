use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub wa_gateway_url: String,
    pub cash_item_token: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:pos.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            wa_gateway_url: env::var("WA_GATEWAY_URL")
                .unwrap_or_else(|_| "http://localhost:3001/send-message".to_string()),
            // Items whose name contains this token are treated as cash on
            // hand, not sellable stock (see services::report).
            cash_item_token: env::var("CASH_ITEM_TOKEN").unwrap_or_else(|_| "KAS".to_string()),
        })
    }
}
