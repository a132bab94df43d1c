// src/main.rs

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use nav_route_gen::config::{load_config, DEFAULT_CONFIG_FILE};
use nav_route_gen::workspace::SourceFiles;
use nav_route_gen::{GeneratorError, RouteGenerator, RouteKind, RouteRequest};

/// CLI 引数定義
#[derive(Parser, Debug)]
#[command(
    name = "nav-route-gen",
    version,
    about = "ルートクラス・マッパー・ナビゲーションサービスに新しいルートを追加する CLI ツール"
)]
struct Cli {
    /// ページとして追加する
    #[arg(long)]
    page: bool,

    /// ボトムシートとして追加する
    #[arg(long = "bottom-sheet")]
    bottom_sheet: bool,

    /// ダイアログとして追加する
    #[arg(long)]
    dialog: bool,

    /// タブホルダーとして追加する
    #[arg(long = "tab-holder")]
    tab_holder: bool,

    /// ルート名 (PascalCase)。例: `--name Settings`
    #[arg(short = 'n', long, value_name = "NAME")]
    name: String,

    /// マッパーに埋め込む UI の式。例: `--component "const SettingsScreen()"`
    #[arg(short = 'c', long, value_name = "EXPR")]
    component: Option<String>,

    /// ルートが返す結果の型 (省略時は Never)
    #[arg(short = 'r', long, value_name = "TYPE")]
    result: Option<String>,

    /// 現在のタブ内に push する
    #[arg(long = "in-tab")]
    in_tab: bool,

    /// 設定ファイル
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// ファイルを書き換えずに挿入内容だけを表示する
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// ログを詳しくする (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {e}", "✗".red());
        if e.is_validation() {
            eprintln!("  対象ファイルは変更していません。");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GeneratorError> {
    // 1) ルートの種類を検証 (ファイルには触れない)
    let kind = RouteKind::from_flags(cli.page, cli.bottom_sheet, cli.dialog, cli.tab_holder)?;

    // 2) 設定ファイルを読み込み
    let config = load_config(&cli.config)?;

    let request = RouteRequest {
        descriptor: kind.descriptor(cli.result.as_deref(), cli.in_tab),
        name: cli.name,
        component: cli.component,
    };
    let generator = RouteGenerator::default();

    // 3) すべての挿入位置を決めてから書き出す
    let mut files = SourceFiles::new();
    let edits = generator.plan(&request, &config, &mut files)?;

    if cli.dry_run {
        for edit in &edits {
            println!(
                "{} {}:{} に挿入:",
                "•".cyan(),
                edit.path.display(),
                edit.line
            );
            for line in edit.inserted.lines() {
                println!("    {}", line.green());
            }
        }
        println!("--dry-run のためファイルは変更していません。");
        return Ok(());
    }

    let written = files.commit()?;
    for path in &written {
        println!("{} 更新: {}", "✓".green(), path.display().to_string().cyan());
    }
    println!(
        "{} {} を追加しました",
        "✓".green(),
        request.descriptor.route_class_name(&request.name).bold()
    );
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
