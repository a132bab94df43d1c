// src/template.rs
//
// 生成コードのテンプレート。`{name}` 形式のプレースホルダを置換するだけの純粋関数群。
// インデントは挿入先に合わせて resolver 側で付け直すので、ここでは 0 段で書く。

use crate::model::{NamingConventions, RouteDescriptor};

const ROUTE_CLASS: &str = "\
class {route_class} extends {base_class}<{generic_type}> {
  const {route_class}() : super('{route_id}');
}";

const ABSTRACT_METHOD: &str = "Future<{return_type}> {method_name}();";

const CONCRETE_METHOD: &str = "\
@override
Future<{return_type}> {method_name}() {
  return {push_call}<{return_type}>(const {route_class}());
}";

const MAPPER_SECTION: &str = "\
{mapper_name}(
  routes: [
    {mapper_entry}
  ],
),";

const MAPPER_ENTRY: &str = "{route_builder}<{route_class}>((route) => {component}),";

const PUSH: &str = "push";
const PUSH_IN_TAB: &str = "pushInTab";

/// テンプレート中の `{key}` を対応する値で置き換える。未知のキーはそのまま残す。
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let key_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let key = &after[..key_len];
        let value = values.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);
        match value {
            Some(v) if !key.is_empty() && after[key_len..].starts_with('}') => {
                out.push_str(v);
                rest = &after[key_len + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// 1 つのルートに対する全テンプレートの描画
#[derive(Debug, Clone)]
pub struct RouteTemplates<'a> {
    descriptor: &'a RouteDescriptor,
    conventions: &'a NamingConventions,
    name: &'a str,
    component: &'a str,
}

impl<'a> RouteTemplates<'a> {
    /// `component` は UI を組み立てる式の文字列。省略時は空文字で描画され、
    /// 生成コードは不完全になる (検証はしない)。
    pub fn new(
        descriptor: &'a RouteDescriptor,
        conventions: &'a NamingConventions,
        name: &'a str,
        component: Option<&'a str>,
    ) -> Self {
        Self {
            descriptor,
            conventions,
            name,
            component: component.unwrap_or(""),
        }
    }

    pub fn route_class_name(&self) -> String {
        self.descriptor.route_class_name(self.name)
    }

    pub fn route_class(&self) -> String {
        let route_class = self.route_class_name();
        let route_id = self.descriptor.to_route_identifier(self.name);
        fill(
            ROUTE_CLASS,
            &[
                ("route_class", route_class.as_str()),
                ("base_class", self.descriptor.base_class_name()),
                ("generic_type", self.descriptor.generic_type()),
                ("route_id", route_id.as_str()),
            ],
        )
    }

    /// `open` + `Page` + `Settings` → `openPageSettings`
    pub fn service_method_name(&self) -> String {
        format!(
            "{}{}{}",
            self.conventions.service_method_prefix,
            self.descriptor.type_name(),
            self.name
        )
    }

    pub fn abstract_method(&self) -> String {
        let return_type = self.descriptor.method_return_type();
        let method_name = self.service_method_name();
        fill(
            ABSTRACT_METHOD,
            &[("return_type", return_type.as_str()), ("method_name", method_name.as_str())],
        )
    }

    pub fn concrete_method(&self) -> String {
        let return_type = self.descriptor.method_return_type();
        let method_name = self.service_method_name();
        let route_class = self.route_class_name();
        let push_call = if self.descriptor.is_in_tab() {
            PUSH_IN_TAB
        } else {
            PUSH
        };
        fill(
            CONCRETE_METHOD,
            &[
                ("return_type", return_type.as_str()),
                ("method_name", method_name.as_str()),
                ("push_call", push_call),
                ("route_class", route_class.as_str()),
            ],
        )
    }

    /// `PageMapper` のように、種類ごとのマッパー呼び出し名
    pub fn mapper_name(&self) -> String {
        format!(
            "{}{}",
            self.descriptor.type_name(),
            self.conventions.mapper_suffix
        )
    }

    pub fn mapper_section(&self) -> String {
        let mapper_name = self.mapper_name();
        let entry = self.mapper_entry();
        fill(
            MAPPER_SECTION,
            &[("mapper_name", mapper_name.as_str()), ("mapper_entry", entry.as_str())],
        )
    }

    pub fn mapper_entry(&self) -> String {
        let route_class = self.route_class_name();
        fill(
            MAPPER_ENTRY,
            &[
                ("route_builder", self.conventions.route_builder.as_str()),
                ("route_class", route_class.as_str()),
                ("component", self.component),
            ],
        )
    }
}
