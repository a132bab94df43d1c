//! # nav-route-gen
//!
//! Flutter のナビゲーションパッケージ向けに、新しいルートを既存の Dart ソースへ追加するコード生成器。
//!
//! 1 回の実行で次のファイルを書き換える:
//!
//! | ファイル | 追加されるもの |
//! |----------|----------------|
//! | ルートファイル | `class PageSettings extends NavPage<Never>` のようなルートクラス |
//! | マッパーファイル | `routers` リスト内のビルダーエントリ (または新しいマッパーセクション) |
//! | 抽象サービス | `Future<void> openPageSettings();` |
//! | 実装サービス | `push` / `pushInTab` を呼ぶ実装メソッド |
//!
//! 挿入位置は [`parser`] の構文木を [`locator`] で検索して決め、[`resolver`] が
//! バイトオフセット単位で差し込む。挿入箇所以外のバイトは変更しない。

pub mod config;
pub mod error;
pub mod generator;
pub mod locator;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod template;
pub mod workspace;

pub use error::GeneratorError;
pub use generator::{Edit, RouteGenerator, RouteRequest};
pub use model::{GenerationConfig, NamingConventions, RouteDescriptor, RouteKind};
