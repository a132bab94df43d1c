#![allow(dead_code)]

use nav_route_gen::GenerationConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const ROUTES: &str = r#"import 'package:nav/nav.dart';

class PageHome extends NavPage<Never> {
  const PageHome() : super('home');
}

class DialogConfirm extends NavDialog<bool> {
  const DialogConfirm() : super('confirm');
}
"#;

pub const MAPPER: &str = r#"import 'package:nav/nav.dart';

import 'routes.dart';

class AppRouteMapper extends NavRouteMapper {
  @override
  List<NavMapper> get routers => [
        PageMapper(
          routes: [
            NavRouteBuilder<PageHome>((route) => const HomeScreen()),
          ],
        ),
      ];
}
"#;

pub const MAPPER_BLOCK_BODY: &str = r#"class AppRouteMapper extends NavRouteMapper {
  @override
  List<NavMapper> get routers {
    return [
      PageMapper(routes: []),
    ];
  }
}
"#;

pub const SERVICE: &str = r#"import 'package:nav/nav.dart';

abstract class AppNavigationService implements TabNavigationService {
  Future<void> openPageHome();

  Future<bool?> openDialogConfirm();
}
"#;

pub const SERVICE_IMPL: &str = r#"import 'package:nav/nav.dart';

import 'service.dart';

class AppNavigationServiceImpl extends TabNavigationServiceImpl
    implements AppNavigationService {
  @override
  Future<void> openPageHome() {
    return push<void>(const PageHome());
  }
}
"#;

/// 一時ディレクトリに 4 つの対象ファイルを置いたプロジェクト
pub struct Project {
    pub dir: TempDir,
    pub routes: PathBuf,
    pub mapper: PathBuf,
    pub service: PathBuf,
    pub service_impl: PathBuf,
}

impl Project {
    pub fn new() -> Self {
        Self::with_mapper(MAPPER)
    }

    pub fn with_mapper(mapper: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir_all(&lib).unwrap();

        let project = Project {
            routes: lib.join("routes.dart"),
            mapper: lib.join("mapper.dart"),
            service: lib.join("service.dart"),
            service_impl: lib.join("service_impl.dart"),
            dir,
        };
        fs::write(&project.routes, ROUTES).unwrap();
        fs::write(&project.mapper, mapper).unwrap();
        fs::write(&project.service, SERVICE).unwrap();
        fs::write(&project.service_impl, SERVICE_IMPL).unwrap();
        project
    }

    pub fn config(&self, add_to_service: bool) -> GenerationConfig {
        GenerationConfig {
            routes_file_path: self.routes.clone(),
            route_mapper_file_path: self.mapper.clone(),
            service_file_path: Some(self.service.clone()),
            service_impl_file_path: Some(self.service_impl.clone()),
            add_to_service,
        }
    }

    /// CLI 用の設定ファイルを書き出してそのパスを返す
    pub fn write_config_file(&self, add_to_service: bool) -> PathBuf {
        let path = self.dir.path().join("nav_route_gen.json");
        let json = serde_json::json!({
            "routesPath": self.routes,
            "routeMapperPath": self.mapper,
            "servicePath": self.service,
            "serviceImplPath": self.service_impl,
            "addToService": add_to_service,
        });
        fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();
        path
    }

    pub fn read(&self, path: &PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }
}
