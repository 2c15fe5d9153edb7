//! 商品集合持久化
//!
//! 整个集合序列化为一个 JSON 数组，存放在单个存储槽中，每次保存整体覆盖。

use tracing::{error, info, warn};

use super::model::{seed_products, ProductCollection};
use crate::infrastructure::storage::{KeyValueStore, StorageResult};

/// 默认存储槽名称
pub const PRODUCTS_KEY: &str = "products";

pub struct ProductRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ProductRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, PRODUCTS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 读取集合，永不失败
    ///
    /// - 槽位不存在：写入并返回示例商品
    /// - 内容无法解析或不满足不变量：返回空集合
    pub fn load(&mut self) -> ProductCollection {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                error!("读取商品存储失败，使用空列表: {}", e);
                return ProductCollection::new();
            }
        };

        let Some(raw) = raw else {
            let seed = seed_products();
            match self.save(&seed) {
                Ok(()) => info!("存储为空，已写入 {} 个示例商品", seed.len()),
                Err(e) => warn!("写入示例商品失败: {}", e),
            }
            return seed;
        };

        match serde_json::from_str::<ProductCollection>(&raw) {
            Ok(products) if products.check_invariants() => {
                info!("已加载 {} 个商品", products.len());
                products
            }
            Ok(_) => {
                warn!("存储中的商品数据不合法，使用空列表");
                ProductCollection::new()
            }
            Err(e) => {
                warn!("解析商品存储失败，使用空列表: {}", e);
                ProductCollection::new()
            }
        }
    }

    /// 整体覆盖写入，后写者胜
    pub fn save(&mut self, products: &ProductCollection) -> StorageResult<()> {
        let blob = serde_json::to_string(products)?;
        self.store.set(&self.key, &blob)
    }
}
