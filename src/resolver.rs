// src/resolver.rs
//
// 各対象ファイルについて、構文木から挿入位置 (バイトオフセット) を決め、
// 描画済みテキストを差し込む `Splice` を組み立てる。
// 挿入位置が見つからなければ推測はせず、必ずエラーを返す。

use std::path::Path;
use tracing::debug;

use crate::error::GeneratorError;
use crate::locator::{
    find_last_matching_class, find_named_method_return_list, implements_one_of,
    superclass_contains, superclass_is_one_of,
};
use crate::model::NamingConventions;
use crate::parser::{ClassNode, ExprNode, ListNode, SyntaxProvider};

/// 1 段分のインデント
const INDENT_UNIT: &str = "  ";

/// `offset` の位置に `text` をそのまま差し込む編集。
/// `separator` があれば、その位置 (`offset` より前) にも `,` を 1 文字差し込む。
/// 差し込んだ文字以外のバイト列は一切変更しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub offset: usize,
    pub text: String,
    pub separator: Option<usize>,
}

impl Splice {
    pub fn apply(&self, content: &str) -> String {
        debug_assert!(self.offset <= content.len());
        debug_assert!(content.is_char_boundary(self.offset));
        let mut out = String::with_capacity(content.len() + self.text.len() + 1);
        let mut rest = 0;
        if let Some(at) = self.separator.filter(|&at| at <= self.offset) {
            out.push_str(&content[..at]);
            out.push(',');
            rest = at;
        }
        out.push_str(&content[rest..self.offset]);
        out.push_str(&self.text);
        out.push_str(&content[self.offset..]);
        out
    }

    /// 挿入位置の行番号 (1 始まり)
    pub fn line(&self, content: &str) -> usize {
        content[..self.offset].matches('\n').count() + 1
    }
}

/// 宣言の終端の直後に、空行を 1 つ挟んで差し込む
pub fn splice_after(content: &str, end: usize, rendered: &str) -> Splice {
    let nl = newline_of(content);
    Splice {
        offset: end,
        text: format!("{nl}{nl}{}", indent_lines(rendered, "", nl)),
        separator: None,
    }
}

/// 閉じ括弧 (`]` / `}`) の直前に差し込み、改行で終える。
///
/// 閉じ括弧が行頭 (空白のみの後) にある場合は、その行の先頭に挿入して
/// 閉じ括弧の桁を保つ。描画テキストは閉じ括弧より 1 段深くインデントする。
pub fn splice_before_closing(content: &str, close: usize, rendered: &str) -> Splice {
    let nl = newline_of(content);
    let start = line_start(content, close);
    let before = &content[start..close];

    if before.trim().is_empty() {
        let indent = format!("{before}{INDENT_UNIT}");
        Splice {
            offset: start,
            text: format!("{}{nl}", indent_lines(rendered, &indent, nl)),
            separator: None,
        }
    } else {
        let base = leading_whitespace(before);
        let indent = format!("{base}{INDENT_UNIT}");
        Splice {
            offset: close,
            text: format!("{nl}{}{nl}{base}", indent_lines(rendered, &indent, nl)),
            separator: None,
        }
    }
}

/// リストリテラルの末尾に要素を追加する。
/// 最後の要素の後ろにカンマがなければ、その直後にカンマを補う。
pub fn splice_into_list(content: &str, list: &ListNode, rendered: &str) -> Splice {
    let close = list.close_bracket.start;
    let mut splice = splice_before_closing(content, close, rendered);
    splice.separator = list
        .elements
        .last()
        .map(|last| last.span().end)
        .filter(|&end| !content[end..close].contains(','));
    splice
}

/// ルートファイル: 基底クラス名を含むクラスを継承した最後のクラスの後ろ
pub fn resolve_route_class<P: SyntaxProvider + ?Sized>(
    provider: &P,
    path: &Path,
    content: &str,
    base_class: &str,
    rendered: &str,
) -> Result<Splice, GeneratorError> {
    let anchor = locate(provider, path, content, superclass_contains(base_class))?.ok_or_else(
        || GeneratorError::RouteInsertion {
            path: path.to_path_buf(),
            base_class: base_class.to_string(),
        },
    )?;
    debug!(anchor = %anchor.name, "ルートクラスの挿入位置を決定しました");
    Ok(splice_after(content, anchor.span.end, rendered))
}

/// マッパーファイル: 既存のマッパー呼び出しの `routes:` リスト末尾にエントリを追加する。
/// 該当する呼び出しがなければ、外側のリスト末尾に新しいセクションを追加する。
pub fn resolve_mapper_entry<P: SyntaxProvider + ?Sized>(
    provider: &P,
    path: &Path,
    content: &str,
    conventions: &NamingConventions,
    type_name: &str,
    section: &str,
    entry: &str,
) -> Result<Splice, GeneratorError> {
    let mapper = locate(
        provider,
        path,
        content,
        superclass_contains(&conventions.mapper_base_class),
    )?
    .ok_or_else(|| GeneratorError::MapperNotFound {
        path: path.to_path_buf(),
        mapper_class: conventions.mapper_base_class.clone(),
    })?;

    let routers = find_named_method_return_list(&mapper, &conventions.routers_method).ok_or_else(
        || GeneratorError::RoutersMethodInvalid {
            path: path.to_path_buf(),
            method: conventions.routers_method.clone(),
        },
    )?;

    let existing = routers
        .elements
        .iter()
        .filter_map(|element| match element {
            ExprNode::Call(call) if call.callee.starts_with(type_name) => Some(call),
            _ => None,
        })
        .find_map(|call| {
            call.named_argument(&conventions.routes_argument)
                .and_then(|arg| arg.value.as_list())
                .map(|list| (call.callee.as_str(), list))
        });

    match existing {
        Some((callee, inner)) => {
            debug!(%callee, "既存のマッパーにエントリを追加します");
            Ok(splice_into_list(content, inner, entry))
        }
        None => {
            debug!(mapper = %mapper.name, "マッパーセクションを新規に追加します");
            Ok(splice_into_list(content, routers, section))
        }
    }
}

/// 抽象サービスファイル: サービスインターフェースを実装した最後のクラスの末尾
pub fn resolve_service_method<P: SyntaxProvider + ?Sized>(
    provider: &P,
    path: &Path,
    content: &str,
    conventions: &NamingConventions,
    rendered: &str,
) -> Result<Splice, GeneratorError> {
    let class = locate(
        provider,
        path,
        content,
        implements_one_of(&conventions.service_interfaces),
    )?
    .ok_or_else(|| GeneratorError::ServiceInsertion {
        path: path.to_path_buf(),
    })?;
    Ok(splice_before_closing(content, class.close_brace.start, rendered))
}

/// サービス実装ファイル: 実装基底クラスを直接継承した最後のクラスの末尾
pub fn resolve_service_impl_method<P: SyntaxProvider + ?Sized>(
    provider: &P,
    path: &Path,
    content: &str,
    conventions: &NamingConventions,
    rendered: &str,
) -> Result<Splice, GeneratorError> {
    let class = locate(
        provider,
        path,
        content,
        superclass_is_one_of(&conventions.service_impl_bases),
    )?
    .ok_or_else(|| GeneratorError::ServiceInsertion {
        path: path.to_path_buf(),
    })?;
    Ok(splice_before_closing(content, class.close_brace.start, rendered))
}

fn locate<P, F>(
    provider: &P,
    path: &Path,
    content: &str,
    predicate: F,
) -> Result<Option<ClassNode>, GeneratorError>
where
    P: SyntaxProvider + ?Sized,
    F: Fn(&ClassNode) -> bool,
{
    find_last_matching_class(provider, content, predicate).map_err(|source| {
        GeneratorError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn newline_of(content: &str) -> &'static str {
    if content.contains("\r\n") { "\r\n" } else { "\n" }
}

fn line_start(content: &str, offset: usize) -> usize {
    content[..offset].rfind('\n').map_or(0, |i| i + 1)
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// 各行 (空行を除く) に `indent` を付け、`nl` で連結する
fn indent_lines(text: &str, indent: &str, nl: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join(nl)
}
