use anyhow::{Context, Result};

pub const DEFAULT_MAIL_FROM: &str = "noreply@nakanostay.com";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub mail: MailConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?
                .parse()
                .context("DATABASE_PORT must be a port number")?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let auth = AuthConfig {
            jwt_secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
        };
        let mail = MailConfig {
            api_url: std::env::var("MAIL_API_URL").ok(),
            access_token: std::env::var("MAIL_ACCESS_TOKEN").ok(),
            from: std::env::var("MAIL_FROM").unwrap_or_else(|_| DEFAULT_MAIL_FROM.into()),
        };
        let server = ServerConfig {
            port: match std::env::var("PORT") {
                Ok(port) => port.parse().context("PORT must be a port number")?,
                Err(_) => DEFAULT_PORT,
            },
        };
        Ok(Self {
            database,
            auth,
            mail,
            server,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    // 管理者トークンを発行する認証基盤と共有する HS256 の秘密鍵
    pub jwt_secret: String,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    // {"raw": <base64url の RFC 822 メッセージ>} を受け付けるエンドポイント
    // 未設定なら送信せずログに出すだけ
    pub api_url: Option<String>,
    pub access_token: Option<String>,
    pub from: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            access_token: None,
            from: DEFAULT_MAIL_FROM.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}
