// src/parser/mod.rs
//
// Dart ソースの構造解析。文法そのものは tree-sitter-dart に任せ、
// ロケータが必要とする「トップレベルのクラス宣言」「クラスメンバーとその本体の形」
// 「リストリテラルの要素」「呼び出し式の引数」だけを構造木として取り出す。

mod dart;
pub mod tree;

use thiserror::Error;
use tree_sitter::Parser;

pub use tree::{
    ArgumentNode, CallNode, ClassNode, CompilationUnit, ExprNode, ListNode, MemberBody,
    MemberKind, MemberNode, Span,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// 文法に合わないトークン列 (tree-sitter の ERROR ノード)
    Unexpected,
    /// 必要なトークンの欠落 (閉じ括弧など)
    Missing,
    /// 文法を読み込めなかった、または木が得られなかった
    Unavailable,
}

/// 構文解析の失敗。`line` / `column` は 1 始まり、`offset` はソース先頭からのバイト位置。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({line} 行 {column} 列)")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: ParseErrorKind::Unavailable,
            message: message.into(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// 構文木を提供するパーサの抽象。
/// ロケータはこの trait 越しにしか木を要求しないので、別の実装に差し替えられる。
pub trait SyntaxProvider {
    fn parse(&self, source: &str) -> Result<CompilationUnit, ParseError>;
}

/// tree-sitter-dart による Dart パーサ
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterDart;

impl SyntaxProvider for TreeSitterDart {
    fn parse(&self, source: &str) -> Result<CompilationUnit, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_dart::LANGUAGE.into())
            .map_err(|e| ParseError::unavailable(format!("Dart の文法を読み込めません: {e}")))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::unavailable("構文木を生成できませんでした"))?;
        dart::build(source, tree.root_node())
    }
}
