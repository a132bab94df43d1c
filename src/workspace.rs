// src/workspace.rs
//
// 対象ファイルの読み書き。編集内容はまずメモリ上に積み、
// すべての挿入位置が決まってから `commit` でまとめてディスクへ書き出す。

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::GeneratorError;

#[derive(Debug)]
struct StagedFile {
    original: String,
    current: String,
}

/// 1 回の実行で触るファイル群の作業領域
#[derive(Debug, Default)]
pub struct SourceFiles {
    files: HashMap<PathBuf, StagedFile>,
    /// 初めて読んだ順
    order: Vec<PathBuf>,
}

impl SourceFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在の内容を返す。まだ読んでいなければディスクから読む。
    pub fn read(&mut self, path: &Path) -> Result<String, GeneratorError> {
        if let Some(file) = self.files.get(path) {
            return Ok(file.current.clone());
        }
        let text = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        debug!(path = %path.display(), bytes = text.len(), "ファイルを読み込みました");
        self.files.insert(
            path.to_path_buf(),
            StagedFile {
                original: text.clone(),
                current: text.clone(),
            },
        );
        self.order.push(path.to_path_buf());
        Ok(text)
    }

    /// 新しい内容を積む。まだ読んでいないファイルは先にディスクから読み、
    /// その内容を変更前の状態として記録する。
    pub fn stage(&mut self, path: &Path, content: String) -> Result<(), GeneratorError> {
        if !self.files.contains_key(path) {
            self.read(path)?;
        }
        if let Some(file) = self.files.get_mut(path) {
            file.current = content;
        }
        Ok(())
    }

    /// 内容が変わったファイルのパス (読んだ順)
    pub fn changed_paths(&self) -> Vec<&Path> {
        self.order
            .iter()
            .filter(|p| {
                self.files
                    .get(*p)
                    .is_some_and(|f| f.original != f.current)
            })
            .map(PathBuf::as_path)
            .collect()
    }

    pub fn current(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(|f| f.current.as_str())
    }

    /// 変更されたファイルを順に書き出す。
    /// 途中で書き込みに失敗した場合、それまでに書いたファイルは元に戻さない。
    pub fn commit(self) -> Result<Vec<PathBuf>, GeneratorError> {
        let mut written = Vec::new();
        for path in &self.order {
            let Some(file) = self.files.get(path) else {
                continue;
            };
            if file.original == file.current {
                continue;
            }
            fs::write(path, &file.current).map_err(|e| GeneratorError::io(path, e))?;
            info!(path = %path.display(), "ファイルを更新しました");
            written.push(path.clone());
        }
        Ok(written)
    }
}
