// src/locator.rs
//
// 構文木上での構造検索。名前の一致だけを見る純粋に構文的な照合で、
// インポートの別名や継承の連鎖は解決しない。
// そのため無関係な同名クラスを継承していても一致として扱われる。

use tracing::debug;

use crate::parser::{ClassNode, ListNode, MemberBody, MemberKind, ParseError, SyntaxProvider};

/// ソースを解析し、述語を満たすトップレベルのクラスのうちファイル中で最後のものを返す。
/// クラスが 1 つもない場合も、一致するものがない場合も同じく `None`。
pub fn find_last_matching_class<P, F>(
    provider: &P,
    source: &str,
    predicate: F,
) -> Result<Option<ClassNode>, ParseError>
where
    P: SyntaxProvider + ?Sized,
    F: Fn(&ClassNode) -> bool,
{
    let unit = provider.parse(source)?;
    let total = unit.classes.len();
    let found = unit.classes.into_iter().rev().find(|c| predicate(c));
    debug!(
        classes = total,
        matched = found.as_ref().map(|c| c.name.as_str()),
        "クラス宣言を検索しました"
    );
    Ok(found)
}

/// 名前付きメソッド (またはゲッター) が `=> [...]` でリストリテラルを返していれば、そのリストを返す
pub fn find_named_method_return_list<'a>(class: &'a ClassNode, method: &str) -> Option<&'a ListNode> {
    let member = class.member(method)?;
    if !matches!(member.kind, MemberKind::Getter | MemberKind::Method) {
        return None;
    }
    match &member.body {
        MemberBody::Expression(expr) => expr.as_list(),
        MemberBody::Block(_) | MemberBody::None => None,
    }
}

/// 直接の基底クラス名が `needle` を部分文字列として含む
pub fn superclass_contains(needle: &str) -> impl Fn(&ClassNode) -> bool + '_ {
    move |class| {
        class
            .superclass
            .as_ref()
            .is_some_and(|s| s.contains(needle))
    }
}

/// 直接の基底クラス名がいずれかと完全一致する
pub fn superclass_is_one_of(names: &[String]) -> impl Fn(&ClassNode) -> bool + '_ {
    move |class| {
        class
            .superclass
            .as_ref()
            .is_some_and(|s| names.iter().any(|n| n == s))
    }
}

/// `implements` 節にいずれかの名前が含まれる
pub fn implements_one_of(names: &[String]) -> impl Fn(&ClassNode) -> bool + '_ {
    move |class| {
        class
            .interfaces
            .iter()
            .any(|i| names.contains(i))
    }
}
