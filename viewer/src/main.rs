//! 数据库查看器命令行入口
//!
//! 通过向导控制器访问数据库查看服务：
//! - 列出、上传数据库文件
//! - 浏览表与列
//! - 查看列的汇总数据

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use common::config::{load_dotenv, AppConfig};
use db_client::HttpDatabaseClient;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use viewer::cli::{run_command, Args};
use viewer::{AlertQueue, PolicyTable, WizardController};

const SERVICE_NAME: &str = "viewer";

#[tokio::main]
async fn main() -> ExitCode {
    // 先加载 .env（如果存在）
    load_dotenv();

    // 初始化日志追踪（输出到 stderr，stdout 留给结果）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{SERVICE_NAME}: error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    // 加载配置，命令行参数优先
    let mut config = AppConfig::load_with_service(SERVICE_NAME);
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if args.no_alerts {
        config.alert_on_error = false;
    }

    // 创建客户端与向导控制器
    let client = HttpDatabaseClient::from_config(&config)?;
    let alerts = Arc::new(AlertQueue::new());
    let controller = WizardController::new(client, PolicyTable::from_config(&config), alerts.clone());

    info!(service = %config.service, base_url = %config.base_url, "启动数据库查看器");

    let mut stdout = std::io::stdout().lock();
    run_command(&controller, &alerts, args.command, &mut stdout).await
}
