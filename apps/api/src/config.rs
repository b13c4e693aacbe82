//! # アプリケーション設定
//!
//! 環境変数からサービスの設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `{PREFIX}_HOST` | `0.0.0.0` | バインドアドレス（`TODO_SERVICE` / `USER_SERVICE`） |
//! | `{PREFIX}_PORT` | `8080` | ポート番号 |
//! | `DB_HOST` | `localhost` | PostgreSQL ホスト |
//! | `DB_PORT` | `5432` | PostgreSQL ポート |
//! | `DB_USER` | `local` | 接続ユーザー |
//! | `DB_PASSWORD` | `local` | 接続パスワード |
//! | `DB_NAME` | `todo` | データベース名 |
//! | `LOG_FORMAT` | `pretty` | ログ出力形式（`json` / `pretty`） |
//!
//! 解釈できない値（数値でないポート、未対応のログ形式）は起動時エラー（[`ConfigError`]）とする。

use std::{env, fmt, str::FromStr};

use examdesk_shared::observability::LogFormat;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
   /// 値を解釈できない
   #[error("環境変数 {name} の値が不正です: {value:?}")]
   InvalidValue { name: String, value: String },
}

/// HTTP サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
   /// バインドアドレス（例: `0.0.0.0`, `127.0.0.1`）
   pub host: String,
   /// ポート番号
   pub port: u16,
}

impl ServerConfig {
   /// `host:port` 形式のアドレス
   pub fn addr(&self) -> String {
      format!("{}:{}", self.host, self.port)
   }
}

/// データベース接続設定
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
   pub host:     String,
   pub port:     u16,
   pub user:     String,
   pub password: String,
   pub dbname:   String,
}

// パスワードはログに出さない
impl fmt::Debug for DatabaseConfig {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("DatabaseConfig")
         .field("host", &self.host)
         .field("port", &self.port)
         .field("user", &self.user)
         .field("password", &"[REDACTED]")
         .field("dbname", &self.dbname)
         .finish()
   }
}

impl DatabaseConfig {
   /// sqlx の接続オプションに変換する
   ///
   /// SSL は使用しない。
   pub fn connect_options(&self) -> PgConnectOptions {
      PgConnectOptions::new()
         .host(&self.host)
         .port(self.port)
         .username(&self.user)
         .password(&self.password)
         .database(&self.dbname)
         .ssl_mode(PgSslMode::Disable)
   }
}

/// サービス全体の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
   pub server:     ServerConfig,
   pub database:   DatabaseConfig,
   pub log_format: LogFormat,
}

impl ServiceConfig {
   /// 環境変数から設定を読み込む
   ///
   /// `prefix` はサーバー設定の変数名の接頭辞（例: `"TODO_SERVICE"`）。
   pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
      Self::from_lookup(prefix, |name| env::var(name).ok())
   }

   /// 任意の参照関数から設定を読み込む
   ///
   /// プロセスの環境変数を書き換えずにテストするために使う。
   pub fn from_lookup(
      prefix: &str,
      lookup: impl Fn(&str) -> Option<String>,
   ) -> Result<Self, ConfigError> {
      let string = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

      Ok(Self {
         server:     ServerConfig {
            host: string(&format!("{prefix}_HOST"), "0.0.0.0"),
            port: parse_or(&lookup, &format!("{prefix}_PORT"), 8080)?,
         },
         database:   DatabaseConfig {
            host:     string("DB_HOST", "localhost"),
            port:     parse_or(&lookup, "DB_PORT", 5432)?,
            user:     string("DB_USER", "local"),
            password: string("DB_PASSWORD", "local"),
            dbname:   string("DB_NAME", "todo"),
         },
         log_format: parse_or(&lookup, "LOG_FORMAT", LogFormat::default())?,
      })
   }
}

/// 未設定なら `default`、設定されていれば `FromStr` で解釈する
fn parse_or<T: FromStr>(
   lookup: &impl Fn(&str) -> Option<String>,
   name: &str,
   default: T,
) -> Result<T, ConfigError> {
   match lookup(name) {
      None => Ok(default),
      Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
         name: name.to_string(),
         value,
      }),
   }
}

#[cfg(test)]
mod tests {
   use std::collections::HashMap;

   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
      let map: HashMap<String, String> = vars
         .iter()
         .map(|(k, v)| (k.to_string(), v.to_string()))
         .collect();
      move |name: &str| map.get(name).cloned()
   }

   #[test]
   fn test_未設定の場合はデフォルト値を使う() {
      let config = ServiceConfig::from_lookup("TODO_SERVICE", lookup_from(&[])).unwrap();

      assert_eq!(
         config,
         ServiceConfig {
            server:     ServerConfig {
               host: "0.0.0.0".to_string(),
               port: 8080,
            },
            database:   DatabaseConfig {
               host:     "localhost".to_string(),
               port:     5432,
               user:     "local".to_string(),
               password: "local".to_string(),
               dbname:   "todo".to_string(),
            },
            log_format: LogFormat::Pretty,
         }
      );
   }

   #[test]
   fn test_接頭辞ごとにサーバー設定を読み分ける() {
      let lookup = lookup_from(&[
         ("TODO_SERVICE_PORT", "8081"),
         ("USER_SERVICE_PORT", "8082"),
         ("DB_NAME", "examdesk"),
      ]);

      let todo = ServiceConfig::from_lookup("TODO_SERVICE", &lookup).unwrap();
      let user = ServiceConfig::from_lookup("USER_SERVICE", &lookup).unwrap();

      assert_eq!(todo.server.port, 8081);
      assert_eq!(user.server.port, 8082);
      assert_eq!(user.database.dbname, "examdesk");
      assert_eq!(todo.server.addr(), "0.0.0.0:8081");
   }

   #[test]
   fn test_ログ形式を設定から読み込む() {
      let config =
         ServiceConfig::from_lookup("USER_SERVICE", lookup_from(&[("LOG_FORMAT", "json")]))
            .unwrap();

      assert_eq!(config.log_format, LogFormat::Json);
   }

   #[rstest]
   #[case("TODO_SERVICE_PORT", "http")]
   #[case("DB_PORT", "-1")]
   #[case("DB_PORT", "70000")]
   #[case("LOG_FORMAT", "xml")]
   fn test_解釈できない値はエラーになる(#[case] name: &str, #[case] value: &str) {
      let result = ServiceConfig::from_lookup("TODO_SERVICE", lookup_from(&[(name, value)]));

      let Err(ConfigError::InvalidValue { name: actual, .. }) = result else {
         panic!("不正な値がエラーになっていない");
      };
      assert_eq!(actual, name);
   }

   #[test]
   fn test_debug出力にパスワードを含めない() {
      let config = ServiceConfig::from_lookup(
         "USER_SERVICE",
         lookup_from(&[("DB_PASSWORD", "s3cret")]),
      )
      .unwrap();

      let debug = format!("{:?}", config.database);

      assert!(!debug.contains("s3cret"));
      assert!(debug.contains("[REDACTED]"));
   }
}
