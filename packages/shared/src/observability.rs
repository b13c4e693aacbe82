//! # ログ出力
//!
//! Todo Service / User Service が共有する tracing subscriber の初期化。
//!
//! 出力形式（[`LogFormat`]）はサービス設定の `LOG_FORMAT` から読み込み、
//! 呼び出し元が渡す。このモジュールが直接参照する環境変数は
//! ログレベルを決める `RUST_LOG` だけ。

use std::str::FromStr;

use thiserror::Error;

/// `RUST_LOG` が未設定のときのフィルタ
pub const DEFAULT_FILTER: &str = "info,examdesk=debug,tower_http=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
   /// 1 イベント 1 行の JSON（イベントのフィールドはトップレベルに展開）
   Json,
   /// 開発用の人間向け出力
   #[default]
   Pretty,
}

/// 未対応のログ形式
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("未対応のログ形式です: {0:?}（json / pretty）")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
   type Err = UnknownLogFormat;

   /// 大文字小文字と前後の空白は区別しない
   fn from_str(s: &str) -> Result<Self, Self::Err> {
      match s.trim().to_ascii_lowercase().as_str() {
         "json" => Ok(Self::Json),
         "pretty" => Ok(Self::Pretty),
         _ => Err(UnknownLogFormat(s.to_string())),
      }
   }
}

/// グローバルな tracing subscriber を登録する
///
/// `RUST_LOG` でフィルタを上書きできる。未設定なら [`DEFAULT_FILTER`]。
///
/// `tracing_error::ErrorLayer` も登録するため、インフラ層のエラーが捕捉する
/// SpanTrace には失敗したリポジトリ操作のスパンが入る。
/// サービス名は呼び出し元の `app` スパン（`service` フィールド）で付ける。
#[cfg(feature = "observability")]
pub fn init_tracing(format: LogFormat) {
   use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

   let env_filter =
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

   let fmt_layer = match format {
      LogFormat::Json => tracing_subscriber::fmt::layer()
         .json()
         .flatten_event(true)
         .with_current_span(true)
         .with_span_list(false)
         .boxed(),
      LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
   };

   tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt_layer)
      .with(tracing_error::ErrorLayer::default())
      .init();
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   #[case("json", LogFormat::Json)]
   #[case("JSON", LogFormat::Json)]
   #[case(" pretty\n", LogFormat::Pretty)]
   fn test_ログ形式を解釈できる(#[case] input: &str, #[case] expected: LogFormat) {
      assert_eq!(input.parse::<LogFormat>(), Ok(expected));
   }

   #[rstest]
   #[case("")]
   #[case("text")]
   fn test_未対応のログ形式はエラーになる(#[case] input: &str) {
      assert_eq!(
         input.parse::<LogFormat>(),
         Err(UnknownLogFormat(input.to_string()))
      );
   }

   #[test]
   fn test_デフォルトは人間向け出力() {
      assert_eq!(LogFormat::default(), LogFormat::Pretty);
   }
}
