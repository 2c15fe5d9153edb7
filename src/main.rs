use std::path::PathBuf;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use product_catalog::app::catalog::handler::AppState;
use product_catalog::infrastructure::{config::load_config, logger::Logger};
use product_catalog::{build_app, build_shell};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let explicit = std::env::args().nth(1).map(PathBuf::from);
    let (config, source) = load_config(explicit.as_deref())?;

    let _guard = Logger::init(&config.logging)?;
    match &source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let shell = build_shell(&config).context("无法打开商品存储")?;
    info!(
        "商品存储已就绪: {:?} / 键 {}，当前 {} 个商品",
        config.storage.backend,
        config.storage.key,
        shell.products().len()
    );

    let app = build_app(AppState::new(shell), &config);

    let address = config.http.socket_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("无法绑定到 {}", address))?;

    info!("🚀 商品目录服务运行在 http://{}", address);
    info!("📖 API 端点:");
    info!("   GET    /              - 商品列表");
    info!("   GET    /create        - 打开新建表单");
    info!("   POST   /create        - 提交新建表单");
    info!("   GET    /edit/:id      - 打开编辑表单");
    info!("   POST   /edit/:id      - 提交编辑表单");
    info!("   PATCH  /form          - 修改当前表单的一个字段");
    info!("   POST   /form/submit   - 提交当前表单");
    info!("   POST   /form/cancel   - 取消当前表单");
    info!("   DELETE /products/:id  - 删除商品");
    info!("   GET    /health        - 健康检查");

    axum::serve(listener, app).await.context("服务器运行失败")?;
    Ok(())
}
