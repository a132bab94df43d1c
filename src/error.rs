// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::parser::ParseError;

/// ルート追加処理で起こりうるエラー。どれも致命的で、リトライはしない。
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// ルートファイルに基底クラスを継承したクラスが 1 つもない
    #[error("{}: `{base_class}` を継承したクラスが見つからないため、新しいルートを挿入できません", .path.display())]
    RouteInsertion { path: PathBuf, base_class: String },

    #[error("{}: `{mapper_class}` を継承したマッパークラスが見つかりません", .path.display())]
    MapperNotFound { path: PathBuf, mapper_class: String },

    /// `routers` がリストリテラルを返す式本体 (`=> [...]`) になっていない
    #[error("{}: `{method}` はリストリテラルを返す式本体 (`=> [...]`) である必要があります", .path.display())]
    RoutersMethodInvalid { path: PathBuf, method: String },

    #[error("{}: ナビゲーションサービスのクラスが見つかりません", .path.display())]
    ServiceInsertion { path: PathBuf },

    #[error("ルートの種類は --page / --bottom-sheet / --dialog / --tab-holder のうち 1 つだけ指定してください (指定数: {selected})")]
    RouteKindSelection { selected: usize },

    #[error("設定ファイル {} を読み込めません: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("`addToService` が true の場合は設定キー `{key}` が必要です")]
    MissingServicePath { key: &'static str },

    #[error("{}: 構文解析に失敗しました: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeneratorError::Io {
            path: path.into(),
            source,
        }
    }

    /// ファイルを書き換える前に検出される検証エラーかどうか
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GeneratorError::RouteKindSelection { .. }
                | GeneratorError::Config { .. }
                | GeneratorError::MissingServicePath { .. }
        )
    }
}
