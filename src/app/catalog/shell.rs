//! 商品目录外壳：唯一持有商品集合并驱动视图切换
//!
//! 状态转换：
//! - `Listing -> Creating -> Listing`（提交成功追加到末尾，取消不改动）
//! - `Listing -> Editing(id) -> Listing`（提交成功原位替换，取消不改动）
//! - `Listing -> Listing`（删除）
//!
//! 每次修改集合后立即调用 `commit` 写回存储。

use std::mem;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::form::ProductForm;
use super::model::{new_product_id, FieldEdit, Product, ProductCollection};
use super::repository::ProductRepository;
use super::validation::ValidationErrors;
use crate::infrastructure::storage::KeyValueStore;

/// 当前显示的视图，表单状态随视图存在
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Listing,
    Creating(ProductForm),
    Editing(ProductForm),
}

/// 对外可观察的状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "product_id", rename_all = "snake_case")]
pub enum ShellState {
    Listing,
    Creating,
    Editing(String),
}

/// 提交表单的结果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Product),
    Updated(Product),
    /// 校验失败，表单保持打开
    Rejected(ValidationErrors),
    /// 编辑目标已不存在，回到列表且不做修改
    Stale(String),
    /// 当前没有打开的表单
    NoForm,
}

pub struct Shell<S> {
    repository: ProductRepository<S>,
    products: ProductCollection,
    view: View,
}

impl<S: KeyValueStore> Shell<S> {
    /// 启动时从存储加载一次集合
    pub fn new(mut repository: ProductRepository<S>) -> Self {
        let products = repository.load();
        Self {
            repository,
            products,
            view: View::Listing,
        }
    }

    pub fn products(&self) -> &ProductCollection {
        &self.products
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn repository(&self) -> &ProductRepository<S> {
        &self.repository
    }

    pub fn state(&self) -> ShellState {
        match &self.view {
            View::Listing => ShellState::Listing,
            View::Creating(_) => ShellState::Creating,
            View::Editing(form) => {
                ShellState::Editing(form.product_id().unwrap_or_default().to_string())
            }
        }
    }

    pub fn form(&self) -> Option<&ProductForm> {
        match &self.view {
            View::Listing => None,
            View::Creating(form) | View::Editing(form) => Some(form),
        }
    }

    pub fn request_create(&mut self) -> bool {
        if !matches!(self.view, View::Listing) {
            return false;
        }
        self.view = View::Creating(ProductForm::create());
        true
    }

    /// 目标不存在时静默失败，停留在列表
    pub fn request_edit(&mut self, id: &str) -> bool {
        if !matches!(self.view, View::Listing) {
            return false;
        }
        match self.products.get(id) {
            Some(product) => {
                self.view = View::Editing(ProductForm::edit(product));
                true
            }
            None => {
                debug!("编辑目标 {} 不存在，忽略", id);
                false
            }
        }
    }

    /// 删除不存在的 id 不做任何事
    pub fn request_delete(&mut self, id: &str) -> bool {
        if !matches!(self.view, View::Listing) {
            return false;
        }
        match self.products.remove(id) {
            Some(product) => {
                info!("删除商品 {} ({})", product.id, product.name);
                self.commit();
                true
            }
            None => {
                debug!("删除目标 {} 不存在，忽略", id);
                false
            }
        }
    }

    pub fn edit_field(&mut self, edit: FieldEdit) -> bool {
        match &mut self.view {
            View::Listing => false,
            View::Creating(form) | View::Editing(form) => {
                form.apply(edit);
                true
            }
        }
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        let submitted = match &mut self.view {
            View::Listing => return SubmitOutcome::NoForm,
            View::Creating(form) | View::Editing(form) => form.submit(),
        };
        let mut product = match submitted {
            Ok(product) => product,
            Err(errors) => {
                debug!("表单校验失败: {} 个字段", errors.len());
                return SubmitOutcome::Rejected(errors);
            }
        };

        match mem::replace(&mut self.view, View::Listing) {
            View::Creating(_) => {
                while self.products.contains(&product.id) {
                    product.id = new_product_id();
                }
                self.products.push(product.clone());
                info!("新增商品 {} ({})", product.id, product.name);
                self.commit();
                SubmitOutcome::Created(product)
            }
            View::Editing(_) => {
                if self.products.replace(product.clone()) {
                    info!("更新商品 {} ({})", product.id, product.name);
                    self.commit();
                    SubmitOutcome::Updated(product)
                } else {
                    warn!("编辑期间商品 {} 已被删除，放弃修改", product.id);
                    SubmitOutcome::Stale(product.id)
                }
            }
            View::Listing => SubmitOutcome::NoForm,
        }
    }

    /// 关闭当前表单，不做校验和修改
    pub fn cancel(&mut self) -> bool {
        if matches!(self.view, View::Listing) {
            return false;
        }
        self.view = View::Listing;
        true
    }

    /// 回到列表，丢弃任何打开的表单
    pub fn navigate_home(&mut self) {
        if self.cancel() {
            debug!("导航回列表，已丢弃未提交的表单");
        }
    }

    /// 把当前集合整体写回存储；失败只记录日志，内存中的集合保持不变
    fn commit(&mut self) {
        if let Err(e) = self.repository.save(&self.products) {
            error!("保存商品失败: {}", e);
        }
    }
}
