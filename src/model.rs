// src/model.rs
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::GeneratorError;

/// ジェネリック型が指定されなかったときの既定値
pub const DEFAULT_GENERIC_TYPE: &str = "Never";

/// 生成できるルートの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Page,
    BottomSheet,
    Dialog,
    TabHolder,
}

impl RouteKind {
    pub const ALL: [RouteKind; 4] = [
        RouteKind::Page,
        RouteKind::BottomSheet,
        RouteKind::Dialog,
        RouteKind::TabHolder,
    ];

    /// CLI フラグの組み合わせからちょうど 1 つの種類を選ぶ。
    /// 0 個や 2 個以上が選ばれていたら検証エラー。
    pub fn from_flags(
        page: bool,
        bottom_sheet: bool,
        dialog: bool,
        tab_holder: bool,
    ) -> Result<RouteKind, GeneratorError> {
        let selected: Vec<RouteKind> = [page, bottom_sheet, dialog, tab_holder]
            .into_iter()
            .zip(RouteKind::ALL)
            .filter_map(|(on, kind)| on.then_some(kind))
            .collect();
        match selected.as_slice() {
            [kind] => Ok(*kind),
            _ => Err(GeneratorError::RouteKindSelection {
                selected: selected.len(),
            }),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            RouteKind::Page => "Page",
            RouteKind::BottomSheet => "BottomSheet",
            RouteKind::Dialog => "Dialog",
            RouteKind::TabHolder => "TabHolder",
        }
    }

    pub fn base_class_name(&self) -> &'static str {
        match self {
            RouteKind::Page => "NavPage",
            RouteKind::BottomSheet => "NavBottomSheet",
            RouteKind::Dialog => "NavDialog",
            RouteKind::TabHolder => "NavTabHolder",
        }
    }

    pub fn descriptor(&self, generic_type: Option<&str>, is_in_tab: bool) -> RouteDescriptor {
        RouteDescriptor::new(self.type_name(), self.base_class_name(), generic_type, is_in_tab)
    }
}

/// 1 種類のルートを表す不変の記述子
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    type_name: String,
    base_class_name: String,
    generic_type: String,
    is_in_tab: bool,
}

impl RouteDescriptor {
    pub fn new(
        type_name: impl Into<String>,
        base_class_name: impl Into<String>,
        generic_type: Option<&str>,
        is_in_tab: bool,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            base_class_name: base_class_name.into(),
            generic_type: generic_type
                .filter(|g| !g.trim().is_empty())
                .unwrap_or(DEFAULT_GENERIC_TYPE)
                .to_string(),
            is_in_tab,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn base_class_name(&self) -> &str {
        &self.base_class_name
    }

    pub fn generic_type(&self) -> &str {
        &self.generic_type
    }

    pub fn is_in_tab(&self) -> bool {
        self.is_in_tab
    }

    /// サービスメソッドの戻り値型。結果型がなければ `void`、あれば nullable にする。
    pub fn method_return_type(&self) -> String {
        if self.generic_type == DEFAULT_GENERIC_TYPE {
            "void".to_string()
        } else {
            format!("{}?", self.generic_type)
        }
    }

    /// 生成されるルートクラス名 (`Page` + `Settings` → `PageSettings`)
    pub fn route_class_name(&self, raw_name: &str) -> String {
        format!("{}{}", self.type_name, raw_name)
    }

    pub fn to_route_identifier(&self, raw_name: &str) -> String {
        to_kebab_case(raw_name)
    }
}

/// `UserProfile` → `user-profile`。既にケバブケースの文字列はそのまま返る。
pub fn to_kebab_case(raw: &str) -> String {
    let chars: Vec<char> = raw.trim().chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        }
        out.extend(c.to_lowercase());
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// 挿入位置の特定に使う固定の名前群。
/// テストでは別名のフィクスチャを使えるよう、生成器の構築時に注入する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConventions {
    pub mapper_base_class: String,
    pub routers_method: String,
    pub routes_argument: String,
    pub service_interfaces: [String; 2],
    pub service_impl_bases: [String; 2],
    pub service_method_prefix: String,
    pub mapper_suffix: String,
    pub route_builder: String,
}

impl Default for NamingConventions {
    fn default() -> Self {
        Self {
            mapper_base_class: "NavRouteMapper".to_string(),
            routers_method: "routers".to_string(),
            routes_argument: "routes".to_string(),
            service_interfaces: [
                "NavigationService".to_string(),
                "TabNavigationService".to_string(),
            ],
            service_impl_bases: [
                "NavigationServiceImpl".to_string(),
                "TabNavigationServiceImpl".to_string(),
            ],
            service_method_prefix: "open".to_string(),
            mapper_suffix: "Mapper".to_string(),
            route_builder: "NavRouteBuilder".to_string(),
        }
    }
}

/// 設定ファイル (JSON) の内容
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationConfig {
    #[serde(rename = "routesPath")]
    pub routes_file_path: PathBuf,

    #[serde(rename = "routeMapperPath")]
    pub route_mapper_file_path: PathBuf,

    #[serde(rename = "servicePath", default)]
    pub service_file_path: Option<PathBuf>,

    #[serde(rename = "serviceImplPath", default)]
    pub service_impl_file_path: Option<PathBuf>,

    #[serde(rename = "addToService")]
    pub add_to_service: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_type_is_void_for_default_generic() {
        for kind in RouteKind::ALL {
            assert_eq!(kind.descriptor(None, false).method_return_type(), "void");
            assert_eq!(kind.descriptor(Some("Never"), true).method_return_type(), "void");
        }
    }

    #[test]
    fn return_type_is_nullable_generic() {
        let d = RouteKind::Dialog.descriptor(Some("bool"), false);
        assert_eq!(d.method_return_type(), "bool?");
        let d = RouteKind::Page.descriptor(Some("List<Item>"), false);
        assert_eq!(d.method_return_type(), "List<Item>?");
    }

    #[test]
    fn blank_generic_falls_back_to_default() {
        let d = RouteKind::Page.descriptor(Some("  "), false);
        assert_eq!(d.generic_type(), DEFAULT_GENERIC_TYPE);
    }

    #[test]
    fn kebab_case_examples() {
        assert_eq!(to_kebab_case("UserProfile"), "user-profile");
        assert_eq!(to_kebab_case("SelectTheme"), "select-theme");
        assert_eq!(to_kebab_case("Settings"), "settings");
        assert_eq!(to_kebab_case("HTTPServer"), "http-server");
        assert_eq!(to_kebab_case("Step2Details"), "step2-details");
        assert_eq!(to_kebab_case("my_route name"), "my-route-name");
    }

    #[test]
    fn kebab_case_is_idempotent() {
        for raw in ["UserProfile", "SelectTheme", "HTTPServer", "a", "ABC", "Step2Details", "x__Y"] {
            let once = to_kebab_case(raw);
            assert_eq!(to_kebab_case(&once), once, "{raw}");
            assert_eq!(once, once.to_lowercase());
            assert!(!once.contains("--"));
        }
    }

    #[test]
    fn exactly_one_kind_flag() {
        assert_eq!(
            RouteKind::from_flags(false, false, true, false).unwrap(),
            RouteKind::Dialog
        );
        assert!(matches!(
            RouteKind::from_flags(false, false, false, false),
            Err(GeneratorError::RouteKindSelection { selected: 0 })
        ));
        assert!(matches!(
            RouteKind::from_flags(true, false, true, true),
            Err(GeneratorError::RouteKindSelection { selected: 3 })
        ));
    }

    #[test]
    fn config_reads_camel_case_keys() {
        let json = r#"{
            "routesPath": "lib/routes.dart",
            "routeMapperPath": "lib/mapper.dart",
            "addToService": false,
            "unknownKey": 1
        }"#;
        let config: GenerationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.routes_file_path, PathBuf::from("lib/routes.dart"));
        assert_eq!(config.service_file_path, None);
        assert!(!config.add_to_service);
    }

    #[test]
    fn config_requires_add_to_service() {
        let json = r#"{ "routesPath": "a", "routeMapperPath": "b" }"#;
        assert!(serde_json::from_str::<GenerationConfig>(json).is_err());
    }
}
