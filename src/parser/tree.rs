// src/parser/tree.rs
//
// ロケータが参照する最小限の構造木 (クラス / メンバー / 式)。
// tree-sitter の具象構文木から必要な部分だけを写し取ったもの。

/// ソース上のバイト範囲 `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// 1 ファイル分の解析結果。トップレベルのクラス宣言をファイル順に保持する。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompilationUnit {
    pub classes: Vec<ClassNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    pub name: String,
    /// `extends` の型名。型引数とインポート接頭辞は除く (`nav.NavPage<Never>` → `NavPage`)
    pub superclass: Option<String>,
    /// `implements` の型名 (同じく接頭辞・型引数なし)
    pub interfaces: Vec<String>,
    pub members: Vec<MemberNode>,
    /// 宣言の先頭から閉じ波括弧までの範囲
    pub span: Span,
    /// クラス本体を閉じる `}` の位置
    pub close_brace: Span,
}

impl ClassNode {
    pub fn member(&self, name: &str) -> Option<&MemberNode> {
        self.members
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Method,
    Getter,
    Setter,
    Constructor,
    Field,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberNode {
    pub name: Option<String>,
    pub kind: MemberKind,
    pub body: MemberBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberBody {
    /// 本体なし (抽象メソッド、フィールド)
    None,
    /// `{ ... }` 形式
    Block(Span),
    /// `=> expr;` 形式
    Expression(ExprNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprNode {
    List(ListNode),
    Call(CallNode),
    Other(Span),
}

impl ExprNode {
    pub fn span(&self) -> Span {
        match self {
            ExprNode::List(list) => list.span,
            ExprNode::Call(call) => call.span,
            ExprNode::Other(span) => *span,
        }
    }

    pub fn as_list(&self) -> Option<&ListNode> {
        match self {
            ExprNode::List(list) => Some(list),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub elements: Vec<ExprNode>,
    pub span: Span,
    pub close_bracket: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallNode {
    /// 呼び出し先の識別子 (接頭辞と型引数を除いた最後の名前)
    pub callee: String,
    pub arguments: Vec<ArgumentNode>,
    pub span: Span,
}

impl CallNode {
    pub fn named_argument(&self, label: &str) -> Option<&ArgumentNode> {
        self.arguments
            .iter()
            .find(|a| a.label.as_deref() == Some(label))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentNode {
    /// 名前付き引数のラベル。位置引数なら `None`
    pub label: Option<String>,
    pub value: ExprNode,
}
