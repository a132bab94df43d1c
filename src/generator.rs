// src/generator.rs
//
// ルート追加の全体フロー:
//   1) ルートクラスをルートファイルへ
//   2) マッパーエントリをマッパーファイルへ
//   3) (有効なら) 抽象サービスと実装サービスへメソッドを
// 各ステップは作業領域上の最新内容を毎回解析し直してから挿入位置を決める。

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::GeneratorError;
use crate::model::{GenerationConfig, NamingConventions, RouteDescriptor};
use crate::parser::{SyntaxProvider, TreeSitterDart};
use crate::resolver::{
    resolve_mapper_entry, resolve_route_class, resolve_service_impl_method,
    resolve_service_method, Splice,
};
use crate::template::RouteTemplates;
use crate::workspace::SourceFiles;

/// 追加するルート 1 件分の入力
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub descriptor: RouteDescriptor,
    /// PascalCase のルート名 (`Settings` など)
    pub name: String,
    /// UI を組み立てる式。生成コードにそのまま埋め込まれる
    pub component: Option<String>,
}

/// 1 箇所への挿入結果 (報告用)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub path: PathBuf,
    pub offset: usize,
    pub line: usize,
    pub inserted: String,
}

pub struct RouteGenerator<P = TreeSitterDart> {
    provider: P,
    conventions: NamingConventions,
}

impl Default for RouteGenerator<TreeSitterDart> {
    fn default() -> Self {
        Self::new(TreeSitterDart, NamingConventions::default())
    }
}

impl<P: SyntaxProvider> RouteGenerator<P> {
    pub fn new(provider: P, conventions: NamingConventions) -> Self {
        Self {
            provider,
            conventions,
        }
    }

    /// すべての挿入を作業領域上で行う。ディスクへは書かない。
    /// 途中で失敗した場合、それ以降のステップは実行されない。
    pub fn plan(
        &self,
        request: &RouteRequest,
        config: &GenerationConfig,
        files: &mut SourceFiles,
    ) -> Result<Vec<Edit>, GeneratorError> {
        if request.component.as_deref().is_none_or(|c| c.trim().is_empty()) {
            warn!("UI コンポーネントの式が指定されていないため、生成されるマッパーエントリは不完全になります");
        }

        let mut edits = vec![
            self.insert_route_class(request, &config.routes_file_path, files)?,
            self.insert_mapper_entry(request, &config.route_mapper_file_path, files)?,
        ];

        if config.add_to_service {
            let service = config
                .service_file_path
                .as_deref()
                .ok_or(GeneratorError::MissingServicePath { key: "servicePath" })?;
            let service_impl = config
                .service_impl_file_path
                .as_deref()
                .ok_or(GeneratorError::MissingServicePath {
                    key: "serviceImplPath",
                })?;
            edits.extend(self.insert_service_methods(request, service, service_impl, files)?);
        }

        Ok(edits)
    }

    /// 計画してからまとめて書き出す
    pub fn run(
        &self,
        request: &RouteRequest,
        config: &GenerationConfig,
    ) -> Result<Vec<Edit>, GeneratorError> {
        let mut files = SourceFiles::new();
        let edits = self.plan(request, config, &mut files)?;
        files.commit()?;
        Ok(edits)
    }

    pub fn insert_route_class(
        &self,
        request: &RouteRequest,
        path: &Path,
        files: &mut SourceFiles,
    ) -> Result<Edit, GeneratorError> {
        let templates = self.templates(request);
        let rendered = templates.route_class();
        let content = files.read(path)?;
        let splice = resolve_route_class(
            &self.provider,
            path,
            &content,
            request.descriptor.base_class_name(),
            &rendered,
        )?;
        info!(class = %templates.route_class_name(), "ルートクラスを追加します");
        Self::apply(files, path, &content, splice)
    }

    pub fn insert_mapper_entry(
        &self,
        request: &RouteRequest,
        path: &Path,
        files: &mut SourceFiles,
    ) -> Result<Edit, GeneratorError> {
        let templates = self.templates(request);
        let content = files.read(path)?;
        let splice = resolve_mapper_entry(
            &self.provider,
            path,
            &content,
            &self.conventions,
            request.descriptor.type_name(),
            &templates.mapper_section(),
            &templates.mapper_entry(),
        )?;
        info!(mapper = %templates.mapper_name(), "マッパーにルートを登録します");
        Self::apply(files, path, &content, splice)
    }

    /// 抽象サービスと実装サービスの両方にメソッドを追加する
    pub fn insert_service_methods(
        &self,
        request: &RouteRequest,
        service_path: &Path,
        service_impl_path: &Path,
        files: &mut SourceFiles,
    ) -> Result<Vec<Edit>, GeneratorError> {
        let templates = self.templates(request);
        let method = templates.service_method_name();

        let content = files.read(service_path)?;
        let splice = resolve_service_method(
            &self.provider,
            service_path,
            &content,
            &self.conventions,
            &templates.abstract_method(),
        )?;
        let abstract_edit = Self::apply(files, service_path, &content, splice)?;

        let content = files.read(service_impl_path)?;
        let splice = resolve_service_impl_method(
            &self.provider,
            service_impl_path,
            &content,
            &self.conventions,
            &templates.concrete_method(),
        )?;
        let impl_edit = Self::apply(files, service_impl_path, &content, splice)?;

        info!(%method, "サービスにメソッドを追加します");
        Ok(vec![abstract_edit, impl_edit])
    }

    fn templates<'a>(&'a self, request: &'a RouteRequest) -> RouteTemplates<'a> {
        RouteTemplates::new(
            &request.descriptor,
            &self.conventions,
            &request.name,
            request.component.as_deref(),
        )
    }

    fn apply(
        files: &mut SourceFiles,
        path: &Path,
        content: &str,
        splice: Splice,
    ) -> Result<Edit, GeneratorError> {
        let line = splice.line(content);
        files.stage(path, splice.apply(content))?;
        Ok(Edit {
            path: path.to_path_buf(),
            offset: splice.offset,
            line,
            inserted: splice.text,
        })
    }
}
