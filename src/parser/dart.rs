// src/parser/dart.rs
//
// tree-sitter-dart の具象構文木を `tree` の構造木へ写す。
// 見るのはクラス宣言・メンバー・リストリテラル・呼び出し式だけで、
// それ以外のノードは `ExprNode::Other` として範囲だけを残す。

use tree_sitter::Node;

use super::tree::{
    ArgumentNode, CallNode, ClassNode, CompilationUnit, ExprNode, ListNode, MemberBody,
    MemberKind, MemberNode, Span,
};
use super::{ParseError, ParseErrorKind};

/// エラーメッセージに載せる構文断片の最大文字数
const SNIPPET_CHARS: usize = 24;

/// ルートノード (`source_file`) から構造木を組み立てる。
/// tree-sitter はエラー回復して木を返すが、壊れたファイルへの挿入は行わないのでここで失敗させる。
pub(super) fn build(source: &str, root: Node<'_>) -> Result<CompilationUnit, ParseError> {
    if root.has_error() {
        return Err(syntax_error(source, root));
    }

    let mapper = NodeMapper { source };
    let classes = named_children(root)
        .into_iter()
        .filter(|n| n.kind() == "class_declaration")
        .filter_map(|n| mapper.class(n))
        .collect();
    Ok(CompilationUnit { classes })
}

struct NodeMapper<'s> {
    source: &'s str,
}

impl<'s> NodeMapper<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        &self.source[node.byte_range()]
    }

    // ─── クラス宣言 ─────────────────────────────────────────────

    /// `class A = B with C;` のようなミックスイン適用は本体を持たないので `None`
    fn class(&self, node: Node<'_>) -> Option<ClassNode> {
        let name = node.child_by_field_name("name")?;
        let body = node.child_by_field_name("body")?;

        let superclass = node
            .child_by_field_name("superclass")
            .and_then(|s| s.child_by_field_name("type"))
            .map(|t| type_name(self.text(t)));
        let interfaces = node
            .child_by_field_name("interfaces")
            .map(|clause| {
                named_children(clause)
                    .into_iter()
                    .filter(|t| t.kind() == "type")
                    .map(|t| type_name(self.text(t)))
                    .collect()
            })
            .unwrap_or_default();
        let members = named_children(body)
            .into_iter()
            .filter(|m| m.kind() == "class_member")
            .filter_map(|m| self.member(m))
            .collect();

        Some(ClassNode {
            name: self.text(name).to_string(),
            superclass,
            interfaces,
            members,
            span: span(node),
            close_brace: closing_token(body, "}")?,
        })
    }

    // ─── メンバー ───────────────────────────────────────────────

    /// `class_member` は本体付きの `method_declaration` か、
    /// `;` で終わる `declaration` (抽象メソッド・フィールド・初期化子付きコンストラクタ) のどちらか
    fn member(&self, node: Node<'_>) -> Option<MemberNode> {
        let inner = named_children(node)
            .into_iter()
            .find(|c| matches!(c.kind(), "method_declaration" | "declaration"))?;

        let (signature, body) = if inner.kind() == "method_declaration" {
            let body = inner
                .child_by_field_name("body")
                .map_or(MemberBody::None, |b| self.body(b));
            (inner.child_by_field_name("signature")?, body)
        } else {
            (inner, MemberBody::None)
        };

        let (name, kind) = self.signature(signature);
        Some(MemberNode { name, kind, body })
    }

    fn signature(&self, node: Node<'_>) -> (Option<String>, MemberKind) {
        for child in named_children(node) {
            let kind = match child.kind() {
                "function_signature" => MemberKind::Method,
                "getter_signature" => MemberKind::Getter,
                "setter_signature" => MemberKind::Setter,
                "constructor_signature"
                | "constant_constructor_signature"
                | "factory_constructor_signature"
                | "redirecting_factory_constructor_signature" => MemberKind::Constructor,
                "operator_signature" => return (Some("operator".to_string()), MemberKind::Other),
                "initialized_identifier_list" | "static_final_declaration_list" => {
                    let name = named_children(child)
                        .first()
                        .and_then(|decl| decl.child_by_field_name("name"))
                        .map(|n| self.text(n).to_string());
                    return (name, MemberKind::Field);
                }
                "identifier_list" => {
                    let name = named_children(child)
                        .first()
                        .map(|n| self.text(*n).to_string());
                    return (name, MemberKind::Field);
                }
                _ => continue,
            };
            let name = child
                .child_by_field_name("name")
                .map(|n| self.text(n).to_string());
            return (name, kind);
        }
        (None, MemberKind::Other)
    }

    fn body(&self, node: Node<'_>) -> MemberBody {
        match named_children(node).first() {
            Some(block) if block.kind() == "block" => MemberBody::Block(span(*block)),
            Some(native) if native.kind() == "native" => MemberBody::None,
            Some(expr) => MemberBody::Expression(self.expr(*expr)),
            None => MemberBody::None,
        }
    }

    // ─── 式 ─────────────────────────────────────────────────────

    fn expr(&self, node: Node<'_>) -> ExprNode {
        match node.kind() {
            "list_literal" => match closing_token(node, "]") {
                Some(close_bracket) => ExprNode::List(ListNode {
                    elements: named_children(node)
                        .into_iter()
                        .filter(|c| c.kind() != "type_arguments")
                        .map(|c| self.expr(c))
                        .collect(),
                    span: span(node),
                    close_bracket,
                }),
                None => ExprNode::Other(span(node)),
            },
            "call_expression" => self.call(node, "function"),
            // `const Foo(...)` / `new Foo(...)` / `Foo<T>.named(...)`
            "const_object_expression" | "new_expression" | "constructor_invocation" => {
                self.call(node, "type")
            }
            _ => ExprNode::Other(span(node)),
        }
    }

    fn call(&self, node: Node<'_>, callee_field: &str) -> ExprNode {
        let (Some(callee), Some(arguments)) = (
            node.child_by_field_name(callee_field),
            node.child_by_field_name("arguments"),
        ) else {
            return ExprNode::Other(span(node));
        };
        ExprNode::Call(CallNode {
            callee: type_name(self.text(callee)),
            arguments: named_children(arguments)
                .into_iter()
                .map(|a| self.argument(a))
                .collect(),
            span: span(node),
        })
    }

    fn argument(&self, node: Node<'_>) -> ArgumentNode {
        if node.kind() != "named_argument" {
            return ArgumentNode {
                label: None,
                value: self.expr(node),
            };
        }
        let parts = named_children(node);
        let label = parts
            .iter()
            .find(|c| c.kind() == "label")
            .map(|l| self.text(*l).trim().trim_end_matches(':').trim().to_string());
        let value = parts
            .iter()
            .find(|c| c.kind() != "label")
            .map_or(ExprNode::Other(span(node)), |v| self.expr(*v));
        ArgumentNode { label, value }
    }
}

// ─── ノード補助 ─────────────────────────────────────────────────

fn span(node: Node<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

/// コメントを除いた名前付きの子ノード
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !matches!(c.kind(), "comment" | "block_comment" | "documentation_block_comment"))
        .collect()
}

/// `}` や `]` などの無名トークンのうち最後のものの範囲
fn closing_token(node: Node<'_>, token: &str) -> Option<Span> {
    let mut cursor = node.walk();
    let last = node.children(&mut cursor).filter(|c| c.kind() == token).last();
    last.map(span)
}

/// 型引数・nullable 記号・インポート接頭辞を取り除いた最後の識別子
fn type_name(text: &str) -> String {
    let base = text.split('<').next().unwrap_or(text);
    let last = base.rsplit('.').next().unwrap_or(base);
    last.trim().trim_end_matches('?').trim().to_string()
}

// ─── 構文エラー ─────────────────────────────────────────────────

fn syntax_error(source: &str, root: Node<'_>) -> ParseError {
    let node = first_error(root).unwrap_or(root);
    let point = node.start_position();
    let (kind, message) = if node.is_missing() {
        (
            ParseErrorKind::Missing,
            format!("`{}` が見つかりません", node.kind()),
        )
    } else {
        let snippet: String = source[node.byte_range()].chars().take(SNIPPET_CHARS).collect();
        (
            ParseErrorKind::Unexpected,
            format!("解釈できない構文です: `{}`", snippet.trim()),
        )
    };
    ParseError {
        kind,
        message,
        offset: node.start_byte(),
        line: point.row + 1,
        column: point.column + 1,
    }
}

/// ソース順で最初の ERROR / MISSING ノード
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

#[cfg(test)]
mod tests {
    use crate::parser::tree::*;
    use crate::parser::{ParseErrorKind, SyntaxProvider, TreeSitterDart};

    fn parse(source: &str) -> CompilationUnit {
        TreeSitterDart.parse(source).unwrap()
    }

    const ROUTES: &str = r#"import 'package:nav/nav.dart' as nav;

abstract class BaseThing {}

class PageHome extends NavPage<Never> {
  const PageHome() : super('home');
}

final class DialogConfirm extends nav.NavDialog<bool> with Logging implements Describable, Comparable<DialogConfirm> {
  const DialogConfirm();
}
"#;

    #[test]
    fn collects_top_level_classes_in_order() {
        let unit = parse(ROUTES);
        let names: Vec<_> = unit.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["BaseThing", "PageHome", "DialogConfirm"]);
    }

    #[test]
    fn reads_class_header_clauses() {
        let unit = parse(ROUTES);
        let dialog = &unit.classes[2];
        assert_eq!(dialog.superclass.as_deref(), Some("NavDialog"));
        assert_eq!(dialog.interfaces, vec!["Describable", "Comparable"]);
        assert!(unit.classes[0].superclass.is_none());
    }

    #[test]
    fn class_span_covers_modifiers_and_closing_brace() {
        let unit = parse(ROUTES);
        let base = &unit.classes[0];
        assert_eq!(&ROUTES[base.span.start..base.span.end], "abstract class BaseThing {}");
        let home = &unit.classes[1];
        assert!(ROUTES[home.span.start..home.span.end].ends_with("super('home');\n}"));
        assert_eq!(&ROUTES[home.close_brace.start..home.close_brace.end], "}");
    }

    #[test]
    fn constructor_is_classified() {
        let unit = parse(ROUTES);
        let ctor = &unit.classes[1].members[0];
        assert_eq!(ctor.kind, MemberKind::Constructor);
        assert_eq!(ctor.name.as_deref(), Some("PageHome"));
    }

    #[test]
    fn ignores_classes_outside_top_level() {
        let source = "void main() { final s = 'class Fake {}'; }\nenum E { a, b }\nclass Real {}\n";
        let unit = parse(source);
        assert_eq!(unit.classes.len(), 1);
        assert_eq!(unit.classes[0].name, "Real");
    }

    #[test]
    fn mixin_application_has_no_body() {
        let source = "class A = B with C;\nclass D extends B {}\n";
        let unit = parse(source);
        assert_eq!(unit.classes.len(), 1);
        assert_eq!(unit.classes[0].name, "D");
    }

    const MAPPER: &str = r#"class AppRouteMapper extends NavRouteMapper {
  @override
  List<NavMapper> get routers => [
        PageMapper(
          // ホーム
          routes: [
            NavRouteBuilder<PageHome>((route) => const HomeScreen()),
          ],
        ),
        const DialogMapper(routes: <NavRouteBuilder>[]),
        ...extra,
      ];

  int count() {
    return 1;
  }

  final Map<String, int> cache = {'a': 1, 'b': 2};
  late final String label;
}
"#;

    #[test]
    fn getter_with_expression_body_returns_list() {
        let unit = parse(MAPPER);
        let routers = unit.classes[0].member("routers").unwrap();
        assert_eq!(routers.kind, MemberKind::Getter);
        let MemberBody::Expression(expr) = &routers.body else {
            panic!("expected expression body");
        };
        let list = expr.as_list().unwrap();
        assert_eq!(list.elements.len(), 3);
        assert_eq!(&MAPPER[list.close_bracket.start..list.close_bracket.end], "]");
    }

    #[test]
    fn call_arguments_are_labelled() {
        let unit = parse(MAPPER);
        let routers = unit.classes[0].member("routers").unwrap();
        let MemberBody::Expression(ExprNode::List(list)) = &routers.body else {
            panic!("expected list");
        };

        let ExprNode::Call(page) = &list.elements[0] else {
            panic!("expected call");
        };
        assert_eq!(page.callee, "PageMapper");
        let routes = page.named_argument("routes").unwrap().value.as_list().unwrap();
        assert_eq!(routes.elements.len(), 1);

        let ExprNode::Call(dialog) = &list.elements[1] else {
            panic!("expected const call");
        };
        assert_eq!(dialog.callee, "DialogMapper");
        assert!(dialog.named_argument("routes").unwrap().value.as_list().unwrap().elements.is_empty());

        assert!(matches!(list.elements[2], ExprNode::Other(_)));
    }

    #[test]
    fn block_method_and_fields_are_separate_members() {
        let unit = parse(MAPPER);
        let class = &unit.classes[0];
        let count = class.member("count").unwrap();
        assert_eq!(count.kind, MemberKind::Method);
        assert!(matches!(count.body, MemberBody::Block(_)));
        assert_eq!(class.member("cache").unwrap().kind, MemberKind::Field);
        assert_eq!(class.member("label").unwrap().kind, MemberKind::Field);
        assert_eq!(class.members.len(), 4);
    }

    #[test]
    fn abstract_methods_have_no_body() {
        let source = "abstract class S {\n  Future<T?> push<T>(Object route);\n  void pop();\n}\n";
        let unit = parse(source);
        let names: Vec<_> = unit.classes[0]
            .members
            .iter()
            .map(|m| (m.name.as_deref(), m.kind, m.body == MemberBody::None))
            .collect();
        assert_eq!(
            names,
            vec![
                (Some("push"), MemberKind::Method, true),
                (Some("pop"), MemberKind::Method, true),
            ]
        );
    }

    #[test]
    fn prefixed_superclass_is_reduced_to_last_name() {
        let unit = parse("class Wrong extends other.NavPage<String?> {}\n");
        assert_eq!(unit.classes[0].superclass.as_deref(), Some("NavPage"));
    }

    #[test]
    fn unclosed_class_body_reports_position() {
        let err = TreeSitterDart.parse("class A {\n  void f() {}\n").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Missing | ParseErrorKind::Unexpected));
        assert!(err.line >= 1 && err.column >= 1);
        assert!(err.to_string().contains(&format!("{} 行", err.line)));
    }
}
