// src/config.rs
use path_absolutize::Absolutize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::GeneratorError;
use crate::model::GenerationConfig;

/// 設定ファイル名の既定値 (カレントディレクトリ基準)
pub const DEFAULT_CONFIG_FILE: &str = "nav_route_gen.json";

/// 設定ファイルを読み込み、検証したうえで各パスを絶対パス化して返す。
/// ここで失敗した場合、対象ファイルには一切触れていない。
pub fn load_config(path: &Path) -> Result<GenerationConfig, GeneratorError> {
    let text = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
    let config = parse_config(&text).map_err(|source| GeneratorError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    validate(&config)?;
    let config = absolutize_paths(config)?;
    debug!(?config, "設定ファイルを読み込みました");
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<GenerationConfig, serde_json::Error> {
    serde_json::from_str(text)
}

/// サービスへの追加が有効なら、2 つのサービスファイルのパスが必須
pub fn validate(config: &GenerationConfig) -> Result<(), GeneratorError> {
    if !config.add_to_service {
        return Ok(());
    }
    if config.service_file_path.is_none() {
        return Err(GeneratorError::MissingServicePath { key: "servicePath" });
    }
    if config.service_impl_file_path.is_none() {
        return Err(GeneratorError::MissingServicePath {
            key: "serviceImplPath",
        });
    }
    Ok(())
}

/// 相対パスをカレントディレクトリ基準で絶対パスに変換する
fn absolutize_paths(config: GenerationConfig) -> Result<GenerationConfig, GeneratorError> {
    let abs = |p: PathBuf| -> Result<PathBuf, GeneratorError> {
        p.absolutize()
            .map(|c| c.to_path_buf())
            .map_err(|e| GeneratorError::io(&p, e))
    };
    Ok(GenerationConfig {
        routes_file_path: abs(config.routes_file_path)?,
        route_mapper_file_path: abs(config.route_mapper_file_path)?,
        service_file_path: config.service_file_path.map(abs).transpose()?,
        service_impl_file_path: config.service_impl_file_path.map(abs).transpose()?,
        add_to_service: config.add_to_service,
    })
}
