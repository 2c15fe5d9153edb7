//! 商品目录处理器
//!
//! 路由只是外壳的信号来源：`/`、`/create`、`/edit/:id` 以及兜底的 404 页面。

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};
use parking_lot::Mutex;

use super::model::{FieldEdit, ProductFormData};
use super::shell::{Shell, ShellState, SubmitOutcome};
use super::view::Page;
use crate::core::{error::CoreError, response::ApiResponse};
use crate::infrastructure::storage::DynStore;

pub type SharedShell = Arc<Mutex<Shell<DynStore>>>;

#[derive(Clone)]
pub struct AppState {
    pub shell: SharedShell,
}

impl AppState {
    pub fn new(shell: Shell<DynStore>) -> Self {
        Self {
            shell: Arc::new(Mutex::new(shell)),
        }
    }
}

type PageResponse = Result<(StatusCode, Json<ApiResponse<Page>>), CoreError>;

fn page_ok(shell: &Shell<DynStore>, status: StatusCode, message: impl Into<String>) -> PageResponse {
    Ok((status, Json(ApiResponse::success(Page::render(shell), message))))
}

/// 错误响应中携带的页面
fn page_json(page: &Page) -> serde_json::Value {
    serde_json::to_value(page).unwrap_or_default()
}

/// 把提交结果映射为响应
fn submit_response(shell: &Shell<DynStore>, outcome: SubmitOutcome) -> PageResponse {
    match outcome {
        SubmitOutcome::Created(product) => page_ok(
            shell,
            StatusCode::CREATED,
            format!("商品 {} 创建成功", product.id),
        ),
        SubmitOutcome::Updated(product) => {
            page_ok(shell, StatusCode::OK, format!("商品 {} 更新成功", product.id))
        }
        SubmitOutcome::Rejected(_) => Err(CoreError::Validation(page_json(&Page::render(shell)))),
        SubmitOutcome::Stale(id) => Err(CoreError::NotFound(format!("商品 {} 不存在", id))),
        SubmitOutcome::NoForm => Err(CoreError::BadRequest("当前没有打开的表单".to_string())),
    }
}

fn fill_form(shell: &mut Shell<DynStore>, data: ProductFormData) {
    for edit in data.into_edits() {
        shell.edit_field(edit);
    }
}

/// 商品列表，同时丢弃任何未提交的表单
pub async fn list_products(State(state): State<AppState>) -> PageResponse {
    let mut shell = state.shell.lock();
    shell.navigate_home();
    let count = shell.products().len();
    page_ok(&shell, StatusCode::OK, format!("共 {} 个商品", count))
}

/// 打开新建表单；已经打开时保留当前输入
pub async fn open_create_form(State(state): State<AppState>) -> PageResponse {
    let mut shell = state.shell.lock();
    if shell.state() != ShellState::Creating {
        shell.navigate_home();
        shell.request_create();
    }
    page_ok(&shell, StatusCode::OK, "新建商品")
}

/// 一次性填写并提交新建表单
pub async fn submit_create_form(
    State(state): State<AppState>,
    Json(payload): Json<ProductFormData>,
) -> PageResponse {
    let mut shell = state.shell.lock();
    if shell.state() != ShellState::Creating {
        shell.navigate_home();
        shell.request_create();
    }
    fill_form(&mut shell, payload);
    let outcome = shell.submit();
    submit_response(&shell, outcome)
}

/// 打开编辑表单；商品不存在时停留在列表
pub async fn open_edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PageResponse {
    let mut shell = state.shell.lock();
    if shell.state() != ShellState::Editing(id.clone()) {
        shell.navigate_home();
        if !shell.request_edit(&id) {
            return page_ok(&shell, StatusCode::OK, format!("商品 {} 不存在", id));
        }
    }
    page_ok(&shell, StatusCode::OK, format!("编辑商品 {}", id))
}

/// 一次性填写并提交编辑表单
pub async fn submit_edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductFormData>,
) -> PageResponse {
    let mut shell = state.shell.lock();
    if shell.state() != ShellState::Editing(id.clone()) {
        shell.navigate_home();
        if !shell.request_edit(&id) {
            return Err(CoreError::NotFound(format!("商品 {} 不存在", id)));
        }
    }
    fill_form(&mut shell, payload);
    let outcome = shell.submit();
    submit_response(&shell, outcome)
}

/// 修改当前表单的一个字段
pub async fn update_form_field(
    State(state): State<AppState>,
    Json(edit): Json<FieldEdit>,
) -> PageResponse {
    let mut shell = state.shell.lock();
    if !shell.edit_field(edit) {
        return Err(CoreError::BadRequest("当前没有打开的表单".to_string()));
    }
    page_ok(&shell, StatusCode::OK, "字段已更新")
}

pub async fn submit_form(State(state): State<AppState>) -> PageResponse {
    let mut shell = state.shell.lock();
    let outcome = shell.submit();
    submit_response(&shell, outcome)
}

pub async fn cancel_form(State(state): State<AppState>) -> PageResponse {
    let mut shell = state.shell.lock();
    shell.cancel();
    page_ok(&shell, StatusCode::OK, "已取消")
}

/// 删除商品；不存在的 id 不算错误
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PageResponse {
    let mut shell = state.shell.lock();
    shell.navigate_home();
    let message = if shell.request_delete(&id) {
        format!("商品 {} 删除成功", id)
    } else {
        format!("商品 {} 不存在，未做修改", id)
    };
    page_ok(&shell, StatusCode::OK, message)
}

/// 健康检查
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let (products, shell_state) = {
        let shell = state.shell.lock();
        (shell.products().len(), shell.state())
    };

    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "catalog": {
            "products_count": products,
            "shell": shell_state,
        }
    }))
}

pub async fn not_found() -> CoreError {
    CoreError::PageNotFound(page_json(&Page::not_found()))
}

/// 商品目录路由
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/create", get(open_create_form).post(submit_create_form))
        .route("/edit/:id", get(open_edit_form).post(submit_edit_form))
        .route("/form", patch(update_form_field))
        .route("/form/submit", post(submit_form))
        .route("/form/cancel", post(cancel_form))
        .route("/products/:id", delete(delete_product))
        .route("/health", get(health_check))
        .fallback(not_found)
        .with_state(state)
}
