use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TABLE: &str = "todos";
const DEFAULT_REGION: &str = "ap-northeast-1";
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// プロセス起動時に一度だけ読み込む設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub dynamodb_table: String,
    /// DynamoDB Local などへの接続先上書き
    pub dynamodb_endpoint: Option<String>,
    pub aws_region: String,
    pub store_connect_timeout: Duration,
}

impl Config {
    /// 環境変数から読み込みます。カレントディレクトリに `.env` があれば先に取り込みます。
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から読み込みます（テスト用に環境変数を差し替え可能）。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(v) => parse("PORT", v)?,
            None => DEFAULT_PORT,
        };
        let timeout_ms = match lookup("STORE_CONNECT_TIMEOUT_MS") {
            Some(v) => parse("STORE_CONNECT_TIMEOUT_MS", v)?,
            None => DEFAULT_CONNECT_TIMEOUT_MS,
        };

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            dynamodb_table: lookup("TABLE_NAME").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            dynamodb_endpoint: lookup("DYNAMODB_ENDPOINT").filter(|v| !v.is_empty()),
            aws_region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            store_connect_timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
